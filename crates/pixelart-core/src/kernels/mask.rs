use glam::{Vec2, Vec4};

use crate::image::Sampler;
use crate::shading::fract;
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION};
use crate::Effect;

const SLOTS: &[UniformSlot] = &[RESOLUTION];

pub const CORNER_RADIUS: f32 = 30.0;
const GRAIN_BASE: Vec4 = Vec4::new(0.3, 0.3, 0.3, 1.0);
const GRAIN_WEIGHT: f32 = 0.4;
const NOISE_MIX: f32 = 0.5;

/// Signed distance from `position` to a rounded box centred on the origin.
/// Negative inside, zero on the boundary.
pub fn rounded_rect_sdf(position: Vec2, half_size: Vec2, radius: f32) -> f32 {
    let q = position.abs() - half_size + radius;
    q.x.max(q.y).min(0.0) + q.max(Vec2::ZERO).length() - radius
}

fn grain(st: Vec2) -> f32 {
    fract(st.dot(Vec2::new(12.9898, 78.233)).sin() * 43758.5453123)
}

/// Frosted panel: keeps the source outside a rounded rectangle that fills the
/// panel and mixes grey grain into everything inside it.
pub struct RoundedMask;

impl Effect for RoundedMask {
    fn name(&self) -> &'static str {
        "rounded_mask"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        SLOTS
    }

    fn apply(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4 {
        let resolution = uniforms.resolution();
        let center = resolution / 2.0;
        let color = source.eval(coord);
        if rounded_rect_sdf(coord - center, center, CORNER_RADIUS) > 0.0 {
            return color;
        }
        let n = grain(coord / resolution);
        let texture = GRAIN_BASE.lerp(Vec4::new(n, n, n, 1.0), GRAIN_WEIGHT);
        color.lerp(texture, NOISE_MIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Frame;

    fn uniforms(w: f32, h: f32) -> Uniforms {
        let mut u = Uniforms::new("rounded_mask", SLOTS);
        u.set("resolution", Vec2::new(w, h)).unwrap();
        u
    }

    #[test]
    fn sdf_sign_convention() {
        let half = Vec2::new(100.0, 50.0);
        assert!(rounded_rect_sdf(Vec2::ZERO, half, 30.0) < 0.0);
        assert!(rounded_rect_sdf(Vec2::new(150.0, 0.0), half, 30.0) > 0.0);
        assert!(rounded_rect_sdf(Vec2::new(100.0, 0.0), half, 30.0).abs() < 1e-5);
    }

    #[test]
    fn corners_outside_the_rounding_pass_through() {
        let source = Frame::filled(200, 100, Vec4::new(0.8, 0.1, 0.4, 1.0));
        let u = uniforms(200.0, 100.0);
        for corner in [
            Vec2::new(0.5, 0.5),
            Vec2::new(199.5, 0.5),
            Vec2::new(0.5, 99.5),
            Vec2::new(199.5, 99.5),
        ] {
            assert!(rounded_rect_sdf(corner - Vec2::new(100.0, 50.0), Vec2::new(100.0, 50.0), CORNER_RADIUS) > 0.0);
            assert_eq!(RoundedMask.apply(corner, &source, &u), source.eval(corner));
        }
    }

    #[test]
    fn interior_blends_half_with_grain() {
        let src = Vec4::new(0.8, 0.1, 0.4, 1.0);
        let source = Frame::filled(200, 100, src);
        let coord = Vec2::new(100.5, 50.5);
        let out = RoundedMask.apply(coord, &source, &uniforms(200.0, 100.0));

        let n = grain(coord / Vec2::new(200.0, 100.0));
        let texture = GRAIN_BASE.lerp(Vec4::new(n, n, n, 1.0), GRAIN_WEIGHT);
        let expected = (src + texture) * 0.5;
        assert!((out - expected).abs().max_element() < 1e-6, "{out} vs {expected}");
        assert!((out.w - 1.0).abs() < 1e-6);
    }

    #[test]
    fn grain_stays_in_unit_range() {
        for i in 0..64 {
            let n = grain(Vec2::new(i as f32 / 64.0, 1.0 - i as f32 / 64.0));
            assert!((0.0..1.0).contains(&n), "{n}");
        }
    }
}
