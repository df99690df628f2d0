use glam::{Mat2, Vec2, Vec3, Vec4};

use crate::shading::{fract, fract2, mix};
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION, TIME};
use crate::Generator;

const SLOTS: &[UniformSlot] = &[RESOLUTION, TIME];

const OCTAVES: usize = 3;
/// Amplitude growth per octave.
const GAIN: f32 = 2.8;
const SHIFT: Vec2 = Vec2::splat(100.0);
const AMBER_DARK: Vec3 = Vec3::new(0.730, 0.237, 0.003);
const AMBER_LIGHT: Vec3 = Vec3::new(0.667, 0.295, 0.005);

fn hash(st: Vec2) -> f32 {
    fract(st.dot(Vec2::new(0.9, -0.5)).sin() * 757.153)
}

/// Value noise with smooth Hermite interpolation between lattice corners.
fn value_noise(st: Vec2) -> f32 {
    let i = st.floor();
    let f = fract2(st);

    let a = hash(i);
    let b = hash(i + Vec2::new(1.0, 0.0));
    let c = hash(i + Vec2::new(0.0, 1.0));
    let d = hash(i + Vec2::new(1.0, 1.0));

    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);
    mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y
}

/// Animated amber cloud field. Ignores any source image.
pub struct CloudNoise {
    /// Domain rotation applied between octaves to break up axis alignment.
    rot: Mat2,
}

impl CloudNoise {
    pub fn new() -> Self {
        Self {
            rot: Mat2::from_cols_array(&[0.5_f32.cos(), 1.0_f32.sin(), -(0.5_f32.sin()), 0.5_f32.acos()]),
        }
    }

    fn fbm(&self, mut st: Vec2, time: f32) -> f32 {
        let mut v = (time * 0.3).sin() * 0.1;
        let mut amplitude = 0.1;
        for _ in 0..OCTAVES {
            v += amplitude * value_noise(st);
            st = self.rot * st * 2.0 + SHIFT;
            amplitude *= GAIN;
        }
        v
    }
}

impl Default for CloudNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for CloudNoise {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        SLOTS
    }

    fn generate(&self, coord: Vec2, uniforms: &Uniforms) -> Vec4 {
        let resolution = uniforms.resolution();
        let time = uniforms.time();

        let st = (coord * 2.0 - resolution) / resolution.x.min(resolution.y) * 0.8;
        let len = (st + Vec2::splat(0.2 * time)).length() - 3.0;

        let q = Vec2::new(
            self.fbm(st + 1.0, time),
            self.fbm(st + Vec2::new(-0.450, 0.650), time),
        );
        let r = Vec2::new(
            self.fbm(st + q + Vec2::new(0.570, 0.520) + 0.1 * time, time),
            self.fbm(st + q + Vec2::new(0.340, -0.570) + 0.07 * time, time),
        );

        let band = Vec3::new((len + 0.2).cos(), len.cos(), (len + 0.5).cos());
        let color = AMBER_DARK + (AMBER_LIGHT - AMBER_DARK) * band;

        let f = self.fbm(st + r, time);
        (2.0 * (f * f * f + 0.6 * f * f + 0.5 * f) * color).extend(1.0)
    }
}
