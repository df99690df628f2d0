use glam::{Vec2, Vec3, Vec4};

use crate::shading::smoothstep;
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION, TIME};
use crate::Generator;

const SLOTS: &[UniformSlot] = &[RESOLUTION, TIME];

const WAVES: usize = 3;
const BASE_THICKNESS: f32 = 0.002;
/// Envelope steepness.
const K: f32 = 4.0;
/// Oscillations across the panel.
const B: f32 = 10.0;
const SPEED: f32 = 10.3;
/// Pixels at or below this level on every channel are dropped.
pub const CUTOFF: f32 = 0.02;

/// Three overlaid voice-assistant style sine traces on a transparent ground.
pub struct WaveLine;

impl WaveLine {
    fn line(uv: Vec2, time: f32, index: usize) -> Vec3 {
        let i = index as f32;
        let brightness = 1.0 - i * 0.2;
        let attenuation = (1.0 - i * 0.2) * 0.3;
        let thickness = BASE_THICKNESS + BASE_THICKNESS / WAVES as f32 * i;

        let x = uv.x * 2.5;
        let envelope = (K / (K + x.powi(4))).powi(4);
        let offset = uv.y + attenuation * envelope * (B * x - (time + i * 2.5)).cos();

        Vec3::splat(smoothstep(0.0, 1.0, (thickness / offset).abs()) * brightness)
    }
}

impl Generator for WaveLine {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        SLOTS
    }

    /// All three traces stay visible: each channel takes the brightest line
    /// at this pixel, not the last one drawn. Opaque wherever that exceeds
    /// [`CUTOFF`], transparent elsewhere.
    fn generate(&self, coord: Vec2, uniforms: &Uniforms) -> Vec4 {
        let uv = -1.0 + 2.0 * (coord / uniforms.resolution());
        let time = uniforms.time() * SPEED;

        let color = (0..WAVES).fold(Vec3::ZERO, |acc, i| acc.max(Self::line(uv, time, i)));
        if color.max_element() <= CUTOFF {
            return Vec4::ZERO;
        }
        color.extend(1.0)
    }
}
