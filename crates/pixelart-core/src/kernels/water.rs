use std::f32::consts::TAU;

use glam::{Vec2, Vec3, Vec4};

use crate::shading::glsl_mod;
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION, TIME};
use crate::Generator;

const SLOTS: &[UniformSlot] = &[RESOLUTION, TIME];

const ITERATIONS: usize = 5;
const INTENSITY: f32 = 0.005;

/// Caustic-style water surface: monochrome, fully generative.
pub struct WaterRipple;

impl Generator for WaterRipple {
    fn name(&self) -> &'static str {
        "water"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        SLOTS
    }

    fn generate(&self, coord: Vec2, uniforms: &Uniforms) -> Vec4 {
        let local_time = uniforms.time() * 0.5 + 23.0;
        let uv = coord / uniforms.resolution();

        let scaled = uv * TAU * 2.0;
        let p = Vec2::new(glsl_mod(scaled.x, TAU), glsl_mod(scaled.y, TAU)) - 250.0;

        let mut i = p;
        let mut c = 1.0;
        for n in 0..ITERATIONS {
            let t = local_time * (1.0 - 3.5 / (n + 1) as f32);
            i = p + Vec2::new(
                (t - i.x).cos() + (t + i.y).sin(),
                (t - i.y).sin() + (t + i.x).cos(),
            );
            let warped = Vec2::new(
                p.x / ((i.x + t).sin() / INTENSITY),
                p.y / ((i.y + t).cos() / INTENSITY),
            );
            c += 1.0 / warped.length();
        }
        c /= ITERATIONS as f32;
        c = 1.17 - c.powf(1.4);

        let level = c.abs().powi(8);
        (Vec3::splat(level) + 0.1)
            .clamp(Vec3::ZERO, Vec3::ONE)
            .extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniforms(time: f32) -> Uniforms {
        let mut u = Uniforms::new("water", SLOTS);
        u.set("resolution", Vec2::new(500.0, 100.0)).unwrap();
        u.set("time", time).unwrap();
        u
    }

    #[test]
    fn output_is_opaque_grey_with_floor() {
        let u = uniforms(59.0);
        for y in [0.5, 33.5, 99.5] {
            for x in [0.5, 125.5, 250.5, 499.5] {
                let c = WaterRipple.generate(Vec2::new(x, y), &u);
                assert_eq!(c.w, 1.0);
                assert_eq!(c.x, c.y);
                assert_eq!(c.y, c.z);
                assert!((0.1..=1.0).contains(&c.x), "({x},{y}) -> {c}");
            }
        }
    }

    #[test]
    fn surface_moves_over_time() {
        let coord = Vec2::new(250.5, 50.5);
        let frames: Vec<f32> = (0..20)
            .map(|n| WaterRipple.generate(coord, &uniforms(n as f32 * 0.5)).x)
            .collect();
        assert!(frames.windows(2).any(|w| w[0] != w[1]));
    }
}
