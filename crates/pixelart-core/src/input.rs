use glam::{Vec2, Vec4};

/// One of the four tint sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderChannel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl SliderChannel {
    pub const ALL: [SliderChannel; 4] = [
        SliderChannel::Red,
        SliderChannel::Green,
        SliderChannel::Blue,
        SliderChannel::Alpha,
    ];

    pub fn index(self) -> usize {
        match self {
            SliderChannel::Red => 0,
            SliderChannel::Green => 1,
            SliderChannel::Blue => 2,
            SliderChannel::Alpha => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SliderChannel::Red => "Red",
            SliderChannel::Green => "Green",
            SliderChannel::Blue => "Blue",
            SliderChannel::Alpha => "Alpha",
        }
    }
}

/// Host input, already routed to a panel index where it concerns one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer drag by `delta` pixels over a panel.
    Drag { panel: usize, delta: Vec2 },
    /// Tap at `position`, in the panel's own pixel coordinates.
    Tap { panel: usize, position: Vec2 },
    Slider { channel: SliderChannel, value: f32 },
    ResetSliders,
}

/// Store a slider value into the tint, clamped to `[0, 1]`. NaN counts as 0.
pub fn set_slider(tint: &mut Vec4, channel: SliderChannel, value: f32) {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    tint[channel.index()] = value;
}
