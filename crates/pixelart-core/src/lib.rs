pub mod binder;
pub mod blur;
pub mod clock;
pub mod compositor;
pub mod error;
pub mod image;
pub mod input;
pub mod kernels;
pub mod panel;
pub mod presets;
pub mod screen;
pub mod shading;
pub mod uniforms;

use glam::{Vec2, Vec4};

pub use error::{PixelError, PixelResult};
pub use image::{Bitmap, Frame, Sampler};
pub use uniforms::{UniformKind, UniformSlot, UniformValue, Uniforms};

// ---------------------------------------------------------------------------
// FrameContext: the shared state handed to every compositing pass
// ---------------------------------------------------------------------------

/// Everything a frame reads that is not owned by a single panel: the clock
/// value captured for this frame and the slider tint. Taps belong to the
/// panel that received them.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext {
    pub time: f32,
    pub frame: u64,
    /// Four slider values in `[0, 1]`, consumed as an RGBA tint.
    pub tint: Vec4,
}

impl FrameContext {
    pub fn new(time: f32) -> Self {
        Self {
            time,
            frame: 0,
            tint: Vec4::ZERO,
        }
    }
}

impl Default for FrameContext {
    fn default() -> Self {
        Self::new(0.0)
    }
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A kernel that synthesises its output from uniforms alone.
pub trait Generator: Send + Sync {
    fn name(&self) -> &'static str;
    /// Declared uniform slots, in declaration order.
    fn slots(&self) -> &'static [UniformSlot];
    fn generate(&self, coord: Vec2, uniforms: &Uniforms) -> Vec4;
}

/// A kernel that transforms the colour of its source at each pixel.
pub trait Effect: Send + Sync {
    fn name(&self) -> &'static str;
    fn slots(&self) -> &'static [UniformSlot];
    fn apply(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4;
}
