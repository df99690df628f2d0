use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use pixelart_core::clock::{Cadence, TICK_PERIOD};
use pixelart_core::presets::{PhotoSet, ScreenKind};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

mod app;
mod cli;
mod export;
mod input;
mod layout;
mod photos;

use app::App;
use cli::Cli;
use input::{action_for_key, Key};

/// Pixels scrolled per wheel line.
const LINE_SCROLL: f32 = 40.0;

fn key_from_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Digit1 => Some(Key::Digit1),
        KeyCode::Digit2 => Some(Key::Digit2),
        KeyCode::KeyR => Some(Key::R),
        KeyCode::KeyQ => Some(Key::Q),
        KeyCode::Escape => Some(Key::Escape),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Handler: winit ApplicationHandler
// ---------------------------------------------------------------------------

struct Handler {
    kind: ScreenKind,
    photos: PhotoSet,
    app: Option<App>,
    cadence: Cadence,
}

impl Handler {
    /// Log `result`'s error and stop the loop if it failed.
    fn check(event_loop: &ActiveEventLoop, result: anyhow::Result<()>) {
        if let Err(err) = result {
            log::error!("{err:#}");
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for Handler {
    /// Called once on desktop when the event loop starts.
    /// Creates the window then initialises the wgpu surface.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let window_attrs = Window::default_attributes()
            .with_title("Pixel Art")
            .with_inner_size(winit::dpi::LogicalSize::new(800u32, 900u32));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };
        log::info!("Window created (800×900)");

        match App::new(window, self.kind, self.photos.clone()) {
            Ok(app) => self.app = Some(app),
            Err(err) => {
                log::error!("{err:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(app) = &mut self.app else {
            return;
        };
        if app.on_egui_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = key_from_code(code).and_then(action_for_key) {
                    match app.handle_action(action) {
                        Ok(true) => {
                            log::info!("Quit requested, exiting");
                            event_loop.exit();
                        }
                        Ok(false) => {}
                        Err(err) => Self::check(event_loop, Err(err)),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                Self::check(event_loop, app.on_cursor_moved(position));
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => match state {
                ElementState::Pressed => app.on_mouse_pressed(),
                ElementState::Released => Self::check(event_loop, app.on_mouse_released()),
            },

            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * LINE_SCROLL,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                app.on_scroll(dy);
            }

            WindowEvent::Resized(new_size) => {
                Self::check(event_loop, app.resize(new_size.width, new_size.height));
            }

            WindowEvent::RedrawRequested => {
                Self::check(event_loop, app.render());
            }

            _ => {}
        }
    }

    /// Tick the screen clock on its fixed period and sleep until the next one.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(app) = &mut self.app else {
            return;
        };
        if self.cadence.poll(Instant::now()) {
            app.tick();
            app.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(self.cadence.next_deadline()));
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let photos = photos::photo_set(&cli.photos)?;
    let kind = ScreenKind::from(cli.screen);

    if let Some(dir) = &cli.export {
        let job = export::ExportJob {
            kind,
            dir,
            frames: cli.frames,
            width: cli.width,
        };
        export::run(&job, &photos)?;
        return Ok(());
    }

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    let mut handler = Handler {
        kind,
        photos,
        app: None,
        cadence: Cadence::new(TICK_PERIOD, Instant::now()),
    };
    event_loop
        .run_app(&mut handler)
        .context("event loop error")?;
    Ok(())
}
