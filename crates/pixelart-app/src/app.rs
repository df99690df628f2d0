use std::sync::Arc;
use std::time::Instant;

use glam::{UVec2, Vec2};
use pixelart_core::input::{InputEvent, SliderChannel};
use pixelart_core::presets::{PhotoSet, ScreenKind};
use pixelart_core::screen::Screen;
use pixelart_gpu::{GpuContext, PanelTexture, Presenter, QuadUniforms};
use winit::event::WindowEvent;
use winit::window::Window;

use crate::input::{Gesture, InputAction, PointerState};
use crate::layout::Layout;

// ---------------------------------------------------------------------------
// Simple FPS counter: logs to console once per second
// ---------------------------------------------------------------------------

struct FpsCounter {
    frames: u32,
    last_report: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            last_report: Instant::now(),
        }
    }

    /// Count a frame. Returns the rate once a full second has elapsed.
    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.last_report = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

/// What the control window asked for during one egui pass.
#[derive(Default)]
struct UiRequests {
    sliders: Vec<(SliderChannel, f32)>,
    reset: bool,
    switch_to: Option<ScreenKind>,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    window: Arc<Window>,
    gpu: GpuContext,
    presenter: Presenter,
    textures: Vec<Option<PanelTexture>>,

    photos: PhotoSet,
    screen: Screen,
    layout: Layout,

    pointer: PointerState,
    /// Panel the current press started on.
    pressed_panel: Option<(usize, Vec2)>,

    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    fps: FpsCounter,
}

impl App {
    pub fn new(window: Arc<Window>, kind: ScreenKind, photos: PhotoSet) -> anyhow::Result<Self> {
        let gpu = GpuContext::for_window(Arc::clone(&window))?;
        let presenter = Presenter::new(&gpu.device, gpu.format());

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        let screen = Screen::new(kind, &photos);
        let (width, height) = gpu.size();
        let layout = Layout::stack(screen.presets(), UVec2::new(width, height));

        let mut app = Self {
            window,
            gpu,
            presenter,
            textures: Vec::new(),
            photos,
            screen,
            layout,
            pointer: PointerState::new(),
            pressed_panel: None,
            egui_ctx,
            egui_state,
            egui_renderer,
            fps: FpsCounter::new(),
        };
        app.relayout()?;
        log::info!("Showing the {} screen", kind.name());
        Ok(app)
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }

    // -------------------------------------------------------------------------
    // Layout
    // -------------------------------------------------------------------------

    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        self.gpu.resize(width, height);
        self.relayout()
    }

    /// Restack the panels for the current surface and push the sizes down to
    /// the screen. Panel textures follow the new sizes.
    fn relayout(&mut self) -> anyhow::Result<()> {
        let (width, height) = self.gpu.size();
        let scroll = self.layout.scroll();
        self.layout = Layout::stack(self.screen.presets(), UVec2::new(width, height));
        self.layout.scroll_by(scroll);

        self.textures.resize_with(self.layout.slots().len(), || None);
        for (i, slot) in self.layout.slots().iter().enumerate() {
            self.screen.resize_panel(i, slot.size.x, slot.size.y)?;
            let stale = self.textures[i]
                .as_ref()
                .map_or(true, |t| !t.matches(slot.size.x, slot.size.y));
            if stale {
                self.textures[i] =
                    Some(self.presenter.create_texture(&self.gpu.device, slot.size.x, slot.size.y));
            }
        }
        Ok(())
    }

    fn switch_screen(&mut self, kind: ScreenKind) -> anyhow::Result<()> {
        if kind == self.screen.kind() {
            return Ok(());
        }
        self.screen.teardown();
        self.screen = Screen::new(kind, &self.photos);
        self.textures.clear();
        self.layout.scroll_by(-self.layout.scroll());
        self.pressed_panel = None;
        log::info!("Switched to the {} screen", kind.name());
        self.relayout()
    }

    // -------------------------------------------------------------------------
    // Input: called by main.rs window_event handler
    // -------------------------------------------------------------------------

    /// Offer a window event to egui. Returns `true` if egui consumed it.
    pub fn on_egui_event(&mut self, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(&self.window, event).consumed
    }

    /// Apply an action. Returns `true` if the app should exit.
    pub fn handle_action(&mut self, action: InputAction) -> anyhow::Result<bool> {
        match action {
            InputAction::SwitchScreen => self.switch_screen(self.screen.kind().toggled())?,
            InputAction::ShowScreen(kind) => self.switch_screen(kind)?,
            InputAction::ResetSliders => {
                log::info!("Sliders reset");
                self.screen.apply(InputEvent::ResetSliders)?;
            }
            InputAction::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn panel_offset(&self, index: usize) -> Vec2 {
        self.screen
            .panels()
            .get(index)
            .map_or(Vec2::ZERO, |panel| panel.offset())
    }

    pub fn on_cursor_moved(&mut self, position: Vec2) -> anyhow::Result<()> {
        if let Some(Gesture::Drag(delta)) = self.pointer.moved(position) {
            if let Some((panel, _)) = self.pressed_panel {
                self.screen.apply(InputEvent::Drag { panel, delta })?;
            }
        }
        Ok(())
    }

    pub fn on_mouse_pressed(&mut self) {
        self.pointer.press();
        let cursor = self.pointer.cursor();
        self.pressed_panel = self.layout.hit_test(cursor, |i| self.panel_offset(i));
    }

    pub fn on_mouse_released(&mut self) -> anyhow::Result<()> {
        let pressed = self.pressed_panel.take();
        if let (Some(Gesture::Tap(_)), Some((panel, position))) = (self.pointer.release(), pressed)
        {
            self.screen.apply(InputEvent::Tap { panel, position })?;
        }
        Ok(())
    }

    pub fn on_scroll(&mut self, dy: f32) {
        self.layout.scroll_by(dy);
    }

    /// Advance the screen clock by one step.
    pub fn tick(&mut self) {
        self.screen.tick();
    }

    // -------------------------------------------------------------------------
    // Control window
    // -------------------------------------------------------------------------

    fn controls_ui(ctx: &egui::Context, tint: [f32; 4], kind: ScreenKind) -> UiRequests {
        let mut requests = UiRequests::default();
        egui::Window::new("Controls")
            .default_pos([12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                for channel in SliderChannel::ALL {
                    let mut value = tint[channel.index()];
                    let slider = egui::Slider::new(&mut value, 0.0..=1.0).text(channel.label());
                    if ui.add(slider).changed() {
                        requests.sliders.push((channel, value));
                    }
                }
                ui.horizontal(|ui| {
                    if ui.button("Reset").clicked() {
                        requests.reset = true;
                    }
                    let label = match kind {
                        ScreenKind::Gallery => "Card View",
                        ScreenKind::Card => "Gallery",
                    };
                    if ui.button(label).clicked() {
                        requests.switch_to = Some(kind.toggled());
                    }
                });
            });
        requests
    }

    fn apply_ui(&mut self, requests: UiRequests) -> anyhow::Result<()> {
        for (channel, value) in requests.sliders {
            self.screen.apply(InputEvent::Slider { channel, value })?;
        }
        if requests.reset {
            self.screen.apply(InputEvent::ResetSliders)?;
        }
        if let Some(kind) = requests.switch_to {
            self.switch_screen(kind)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Composite visible panels on the CPU, upload them and draw the frame.
    /// A lost or outdated surface is reconfigured and the frame dropped; only
    /// unrecoverable failures are returned.
    pub fn render(&mut self) -> anyhow::Result<()> {
        if let Some(fps) = self.fps.tick() {
            log::debug!(
                "FPS: {:.1}  screen: {}  t: {:.2}",
                fps,
                self.screen.kind().name(),
                self.screen.time()
            );
        }

        // --- egui pass (may change screen state) -----------------------------
        let raw_input = self.egui_state.take_egui_input(&self.window);
        let tint = self.screen.context().tint.to_array();
        let kind = self.screen.kind();
        let mut requests = UiRequests::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            requests = Self::controls_ui(ctx, tint, kind);
        });
        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);
        self.apply_ui(requests)?;

        // --- CPU composite ---------------------------------------------------
        let offsets: Vec<Vec2> = (0..self.layout.slots().len())
            .map(|i| self.panel_offset(i))
            .collect();
        let layout = &self.layout;
        self.screen
            .render_where(|i| offsets.get(i).is_some_and(|&o| layout.is_visible(i, o)))?;

        let (width, height) = self.gpu.size();
        let surface = Vec2::new(width as f32, height as f32);
        let mut drawn = Vec::new();
        for (i, slot) in self.layout.slots().iter().enumerate() {
            let (Some(texture), Some(frame)) = (&self.textures[i], self.screen.output(i)) else {
                continue;
            };
            if !self.layout.is_visible(i, offsets[i]) {
                continue;
            }
            let Some(origin) = self.layout.screen_origin(i, offsets[i]) else {
                continue;
            };
            texture.upload(&self.gpu.queue, frame);
            texture.place(
                &self.gpu.queue,
                QuadUniforms::from_pixels(origin, slot.size.as_vec2(), surface),
            );
            drawn.push(texture);
        }

        // --- GPU frame -------------------------------------------------------
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => anyhow::bail!("GPU out of memory"),
            Err(err) => {
                log::warn!("render error: {err:?}");
                return Ok(());
            }
        };
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_desc = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };
        for (id, delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.gpu.device, &self.gpu.queue, *id, delta);
        }
        let egui_cmds = self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_desc,
        );

        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("panel-pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &surface_view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                })
                .forget_lifetime();
            self.presenter.draw(&mut pass, drawn);
            self.egui_renderer.render(&mut pass, &paint_jobs, &screen_desc);
        }

        self.gpu.queue.submit(
            egui_cmds
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        output.present();

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.screen.teardown();
    }
}
