//! Colour filters over a source image: the fixed "1987" grade and the
//! slider-driven tint.

use glam::{Vec2, Vec3, Vec4};

use crate::image::Sampler;
use crate::shading::{luminance, premultiply, screen, unpremultiply};
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION, TIME, TINT};
use crate::Effect;

// ---------------------------------------------------------------------------
// ColorGrade
// ---------------------------------------------------------------------------

const GRADE_SLOTS: &[UniformSlot] = &[RESOLUTION, TIME];

const SATURATION: f32 = 1.3;
const CONTRAST: f32 = 1.1;
const BRIGHTNESS: f32 = 1.1;
/// Warm pink screened over the graded image.
pub const GRADE_TINT: Vec3 = Vec3::new(0.9529, 0.4157, 0.7373);

/// Saturation/contrast boost followed by a pink screen. Depends on the source
/// pixel only.
pub struct ColorGrade;

impl ColorGrade {
    pub fn grade(rgb: Vec3) -> Vec3 {
        let lum = Vec3::splat(luminance(rgb));
        let saturated = lum.lerp(rgb, SATURATION);
        let contrasted = Vec3::ONE.lerp(saturated, CONTRAST);
        screen(contrasted * BRIGHTNESS, GRADE_TINT).clamp(Vec3::ZERO, Vec3::ONE)
    }
}

impl Effect for ColorGrade {
    fn name(&self) -> &'static str {
        "filter_1987"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        GRADE_SLOTS
    }

    fn apply(&self, coord: Vec2, source: &dyn Sampler, _uniforms: &Uniforms) -> Vec4 {
        Self::grade(unpremultiply(source.eval(coord))).extend(1.0)
    }
}

// ---------------------------------------------------------------------------
// TintBlend
// ---------------------------------------------------------------------------

const TINT_SLOTS: &[UniformSlot] = &[RESOLUTION, TIME, TINT];

/// Screens the host-supplied RGBA tint over the source's straight colour and
/// keeps the source alpha. The tint is applied premultiplied, so a zero alpha
/// or a black tint leaves the source as is.
pub struct TintBlend;

impl Effect for TintBlend {
    fn name(&self) -> &'static str {
        "mix"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        TINT_SLOTS
    }

    fn apply(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4 {
        let color = source.eval(coord);
        let tint = uniforms.float4(TINT.name);
        if tint.w == 0.0 {
            return color;
        }
        let rgb = screen(unpremultiply(color), tint.truncate() * tint.w);
        premultiply(rgb, color.w)
    }
}
