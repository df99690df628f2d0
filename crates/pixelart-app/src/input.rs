use glam::Vec2;
use pixelart_core::presets::ScreenKind;

// ---------------------------------------------------------------------------
// Key: windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A keyboard key, independent of any windowing library.
///
/// `main.rs` maps `winit::keyboard::PhysicalKey` → `Key`; everything else
/// in the input pipeline works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Digit1,
    Digit2,
    R,
    Q,
    Escape,
}

/// High-level action produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Flip between the gallery and the card screen.
    SwitchScreen,
    ShowScreen(ScreenKind),
    ResetSliders,
    Quit,
}

pub fn action_for_key(key: Key) -> Option<InputAction> {
    match key {
        Key::Tab => Some(InputAction::SwitchScreen),
        Key::Digit1 => Some(InputAction::ShowScreen(ScreenKind::Gallery)),
        Key::Digit2 => Some(InputAction::ShowScreen(ScreenKind::Card)),
        Key::R => Some(InputAction::ResetSliders),
        Key::Q | Key::Escape => Some(InputAction::Quit),
    }
}

// ---------------------------------------------------------------------------
// Pointer: press/move/release folded into taps and drags
// ---------------------------------------------------------------------------

/// Pointer travel (physical pixels) after which a press becomes a drag.
pub const DRAG_THRESHOLD: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Movement since the previous drag event.
    Drag(Vec2),
    /// Press and release without travelling past the threshold.
    Tap(Vec2),
}

#[derive(Debug, Default)]
pub struct PointerState {
    cursor: Vec2,
    pressed_at: Option<Vec2>,
    dragging: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn press(&mut self) {
        self.pressed_at = Some(self.cursor);
        self.dragging = false;
    }

    pub fn moved(&mut self, position: Vec2) -> Option<Gesture> {
        let delta = position - self.cursor;
        self.cursor = position;
        let start = self.pressed_at?;
        if self.dragging {
            return Some(Gesture::Drag(delta));
        }
        if position.distance(start) >= DRAG_THRESHOLD {
            self.dragging = true;
            return Some(Gesture::Drag(position - start));
        }
        None
    }

    pub fn release(&mut self) -> Option<Gesture> {
        let start = self.pressed_at.take()?;
        if std::mem::take(&mut self.dragging) {
            None
        } else {
            Some(Gesture::Tap(start))
        }
    }
}
