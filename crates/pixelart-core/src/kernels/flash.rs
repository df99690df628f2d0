use glam::{Vec2, Vec4};

use crate::image::Sampler;
use crate::shading::smoothstep;
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION, TIME};
use crate::Effect;

const SLOTS: &[UniformSlot] = &[RESOLUTION, TIME];

/// Angular speed of the flicker, radians per unit of clock time.
const RATE: f32 = 20.0;

/// Periodic flicker: fades the whole source in and out.
pub struct Flash;

impl Flash {
    pub fn alpha(time: f32) -> f32 {
        smoothstep(0.0, 1.0, (time * RATE).sin())
    }
}

impl Effect for Flash {
    fn name(&self) -> &'static str {
        "blip"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        SLOTS
    }

    fn apply(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4 {
        source.eval(coord) * Self::alpha(uniforms.time())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Frame;
    use std::f32::consts::PI;

    fn at(time: f32) -> Uniforms {
        let mut u = Uniforms::new("blip", SLOTS);
        u.set("resolution", Vec2::new(4.0, 4.0)).unwrap();
        u.set("time", time).unwrap();
        u
    }

    #[test]
    fn trough_is_fully_transparent() {
        // sin(20t) = -1
        let source = Frame::filled(4, 4, Vec4::new(0.2, 0.7, 0.4, 1.0));
        let out = Flash.apply(Vec2::splat(1.5), &source, &at(3.0 * PI / 40.0));
        assert_eq!(out, Vec4::ZERO);
    }

    #[test]
    fn crest_shows_the_source() {
        // sin(20t) = 1
        let src = Vec4::new(0.2, 0.7, 0.4, 1.0);
        let source = Frame::filled(4, 4, src);
        let out = Flash.apply(Vec2::splat(1.5), &source, &at(PI / 40.0));
        assert!((out - src).abs().max_element() < 1e-5, "{out}");
    }

    #[test]
    fn negative_half_of_the_cycle_stays_dark() {
        for step in 0..10 {
            let t = PI / 20.0 + step as f32 * (PI / 200.0) + 1e-3;
            if (t * RATE).sin() < 0.0 {
                assert_eq!(Flash::alpha(t), 0.0, "t={t}");
            }
        }
    }

    #[test]
    fn alpha_stays_in_unit_range() {
        for n in 0..400 {
            let a = Flash::alpha(n as f32 * 0.01);
            assert!((0.0..=1.0).contains(&a), "{a}");
        }
    }
}
