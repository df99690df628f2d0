use glam::{UVec2, Vec2};
use pixelart_core::presets::Preset;

/// Vertical space between stacked panels, in physical pixels.
pub const PANEL_GAP: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    /// Top-left corner in content coordinates (before scrolling).
    pub origin: Vec2,
    pub size: UVec2,
}

impl Slot {
    fn contains(&self, origin: Vec2, point: Vec2) -> bool {
        let local = point - origin;
        local.cmpge(Vec2::ZERO).all() && local.cmplt(self.size.as_vec2()).all()
    }
}

/// Panels stacked top to bottom, each centred horizontally, inside a
/// scrollable viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    slots: Vec<Slot>,
    viewport: UVec2,
    content_height: f32,
    scroll: f32,
}

impl Layout {
    pub fn stack(presets: &[Preset], viewport: UVec2) -> Self {
        let mut y = PANEL_GAP;
        let slots = presets
            .iter()
            .map(|preset| {
                let width = preset.width().resolve(viewport.x);
                let x = (viewport.x - width) as f32 * 0.5;
                let slot = Slot {
                    origin: Vec2::new(x, y),
                    size: UVec2::new(width, preset.height()),
                };
                y += preset.height() as f32 + PANEL_GAP;
                slot
            })
            .collect();
        Self {
            slots,
            viewport,
            content_height: y,
            scroll: 0.0,
        }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.y as f32).max(0.0)
    }

    /// Scroll by `dy` pixels (positive moves content up), clamped to the
    /// content.
    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll = (self.scroll + dy).clamp(0.0, self.max_scroll());
    }

    /// Top-left of panel `index` on screen, after scrolling and the panel's
    /// own drag offset.
    pub fn screen_origin(&self, index: usize, offset: Vec2) -> Option<Vec2> {
        self.slots
            .get(index)
            .map(|slot| slot.origin + offset - Vec2::new(0.0, self.scroll))
    }

    pub fn is_visible(&self, index: usize, offset: Vec2) -> bool {
        let (Some(slot), Some(origin)) = (self.slots.get(index), self.screen_origin(index, offset))
        else {
            return false;
        };
        let bottom = origin.y + slot.size.y as f32;
        bottom > 0.0 && origin.y < self.viewport.y as f32
    }

    /// Topmost panel under `point` and the point in that panel's pixels.
    /// Later panels are drawn on top, so they win.
    pub fn hit_test(&self, point: Vec2, offset: impl Fn(usize) -> Vec2) -> Option<(usize, Vec2)> {
        self.slots.iter().enumerate().rev().find_map(|(i, slot)| {
            let origin = self.screen_origin(i, offset(i))?;
            slot.contains(origin, point).then(|| (i, point - origin))
        })
    }
}
