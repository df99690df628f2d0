//! A screen: one clock, one frame context and the panels it drives.

use crate::clock::FrameClock;
use crate::error::{PixelError, PixelResult};
use crate::image::Frame;
use crate::input::{set_slider, InputEvent};
use crate::panel::Panel;
use crate::presets::{PhotoSet, Preset, ScreenKind};
use crate::FrameContext;

pub struct Screen {
    kind: ScreenKind,
    clock: FrameClock,
    ctx: FrameContext,
    panels: Vec<Panel>,
    presets: Vec<Preset>,
    live: bool,
}

impl Screen {
    pub fn new(kind: ScreenKind, photos: &PhotoSet) -> Self {
        let presets: Vec<Preset> = kind.presets().collect();
        let panels = presets.iter().map(|p| p.build(photos)).collect();
        Self {
            kind,
            clock: FrameClock::new(kind.start_time()),
            ctx: FrameContext::new(kind.start_time()),
            panels,
            presets,
            live: true,
        }
    }

    pub fn kind(&self) -> ScreenKind {
        self.kind
    }

    pub fn time(&self) -> f32 {
        self.ctx.time
    }

    pub fn context(&self) -> &FrameContext {
        &self.ctx
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Advance the clock one step. Returns the new time, or `None` once the
    /// screen is torn down.
    pub fn tick(&mut self) -> Option<f32> {
        if !self.live {
            return None;
        }
        self.ctx.time = self.clock.tick();
        self.ctx.frame = self.clock.ticks();
        Some(self.ctx.time)
    }

    pub fn resize_panel(&mut self, index: usize, width: u32, height: u32) -> PixelResult<()> {
        if !self.live {
            return Ok(());
        }
        self.panels
            .get_mut(index)
            .ok_or(PixelError::UnknownPanel(index))?
            .resize(width, height)
    }

    pub fn apply(&mut self, event: InputEvent) -> PixelResult<()> {
        if !self.live {
            return Ok(());
        }
        match event {
            InputEvent::Drag { panel, delta } => {
                self.panel_mut(panel)?.drag_by(delta);
            }
            InputEvent::Tap { panel, position } => {
                if self.panel_mut(panel)?.record_tap(position) {
                    log::debug!("tap at {position} on panel {panel}");
                }
            }
            InputEvent::Slider { channel, value } => {
                set_slider(&mut self.ctx.tint, channel, value);
            }
            InputEvent::ResetSliders => {
                self.ctx.tint = glam::Vec4::ZERO;
            }
        }
        Ok(())
    }

    /// Composite every panel against the same frame context.
    pub fn render(&mut self) -> PixelResult<usize> {
        self.render_where(|_| true)
    }

    /// Composite the panels `visible` selects. Returns how many produced a
    /// frame.
    pub fn render_where(&mut self, mut visible: impl FnMut(usize) -> bool) -> PixelResult<usize> {
        if !self.live {
            return Ok(0);
        }
        let ctx = &self.ctx;
        let mut rendered = 0;
        for (index, panel) in self.panels.iter_mut().enumerate() {
            if visible(index) && panel.render(ctx)?.is_some() {
                rendered += 1;
            }
        }
        Ok(rendered)
    }

    pub fn output(&self, index: usize) -> Option<&Frame> {
        self.panels.get(index).and_then(Panel::output)
    }

    /// Release every panel. Later ticks, input and renders do nothing.
    pub fn teardown(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        for panel in &mut self.panels {
            panel.teardown();
        }
        log::info!("{} screen torn down", self.kind.name());
    }

    fn panel_mut(&mut self, index: usize) -> PixelResult<&mut Panel> {
        self.panels
            .get_mut(index)
            .ok_or(PixelError::UnknownPanel(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::SliderChannel;
    use glam::{Vec2, Vec4};
    use std::sync::Arc;

    fn gallery() -> Screen {
        Screen::new(ScreenKind::Gallery, &PhotoSet::placeholder())
    }

    fn index_of(screen: &Screen, preset: Preset) -> usize {
        screen.presets().iter().position(|p| *p == preset).unwrap()
    }

    #[test]
    fn clock_starts_per_screen_and_advances_exactly() {
        let mut card = Screen::new(ScreenKind::Card, &PhotoSet::placeholder());
        assert_eq!(card.time(), 59.0);
        for _ in 0..100 {
            card.tick();
        }
        assert!((card.time() - 60.0).abs() < 1e-4, "got {}", card.time());
        assert_eq!(card.context().frame, 100);
    }

    #[test]
    fn sliders_clamp_and_reset() {
        let mut screen = gallery();
        screen
            .apply(InputEvent::Slider { channel: SliderChannel::Green, value: 2.0 })
            .unwrap();
        screen
            .apply(InputEvent::Slider { channel: SliderChannel::Alpha, value: 0.5 })
            .unwrap();
        assert_eq!(screen.context().tint, Vec4::new(0.0, 1.0, 0.0, 0.5));
        screen.apply(InputEvent::ResetSliders).unwrap();
        assert_eq!(screen.context().tint, Vec4::ZERO);
    }

    #[test]
    fn taps_only_register_on_tap_aware_panels() {
        let mut screen = gallery();
        let blip = index_of(&screen, Preset::Blip);
        let molecule = index_of(&screen, Preset::Molecule);
        let notification = index_of(&screen, Preset::Notification);
        for panel in [blip, notification] {
            screen
                .apply(InputEvent::Tap { panel, position: Vec2::new(3.0, 4.0) })
                .unwrap();
        }
        assert!(screen.panels().iter().all(|p| p.tap().is_none()));
        screen
            .apply(InputEvent::Tap { panel: molecule, position: Vec2::new(30.0, 40.0) })
            .unwrap();
        assert_eq!(screen.panels()[molecule].tap(), Some(Vec2::new(30.0, 40.0)));
    }

    #[test]
    fn tapping_another_panel_leaves_the_molecule_untouched() {
        let mut screen = gallery();
        let molecule = index_of(&screen, Preset::Molecule);
        let notification = index_of(&screen, Preset::Notification);
        screen.resize_panel(molecule, 200, 100).unwrap();
        screen.resize_panel(notification, 200, 100).unwrap();
        screen.render().unwrap();
        let before = screen.output(molecule).unwrap().clone();

        screen
            .apply(InputEvent::Tap { panel: notification, position: Vec2::new(100.0, 50.0) })
            .unwrap();
        screen.render().unwrap();
        assert_eq!(screen.output(molecule).unwrap(), &before);

        screen
            .apply(InputEvent::Tap { panel: molecule, position: Vec2::new(100.0, 50.0) })
            .unwrap();
        screen.render().unwrap();
        assert_ne!(screen.output(molecule).unwrap(), &before);
    }

    #[test]
    fn unknown_panel_is_an_error() {
        let mut screen = gallery();
        let err = screen
            .apply(InputEvent::Drag { panel: 42, delta: Vec2::ONE })
            .unwrap_err();
        assert!(matches!(err, PixelError::UnknownPanel(42)));
        assert!(screen.resize_panel(42, 10, 10).is_err());
    }

    #[test]
    fn render_skips_unsized_and_invisible_panels() {
        let mut screen = gallery();
        assert_eq!(screen.render().unwrap(), 0);
        screen.resize_panel(0, 16, 8).unwrap();
        screen.resize_panel(1, 16, 8).unwrap();
        assert_eq!(screen.render().unwrap(), 2);
        assert_eq!(screen.render_where(|i| i == 1).unwrap(), 1);
        assert!(screen.output(0).is_some());
        assert!(screen.output(2).is_none());
    }

    #[test]
    fn teardown_stops_everything() {
        let photos = PhotoSet::placeholder();
        let mut screen = Screen::new(ScreenKind::Gallery, &photos);
        for i in 0..screen.panels().len() {
            screen.resize_panel(i, 8, 8).unwrap();
        }
        screen.tick();
        screen.render().unwrap();
        let before = screen.time();

        screen.teardown();
        assert!(!screen.is_live());
        assert_eq!(screen.tick(), None);
        assert_eq!(screen.time(), before);
        screen
            .apply(InputEvent::Slider { channel: SliderChannel::Red, value: 1.0 })
            .unwrap();
        assert_eq!(screen.context().tint, Vec4::ZERO);
        assert_eq!(screen.render().unwrap(), 0);
        for instance in screen.panels().iter().flat_map(|p| p.compositor().instances()) {
            let u = instance.uniforms();
            assert!(u.slots().iter().all(|s| !u.is_bound(s.name)), "{}", instance.name());
        }
        assert_eq!(Arc::strong_count(&photos.primary), 1);
        assert_eq!(Arc::strong_count(&photos.secondary), 1);
    }
}
