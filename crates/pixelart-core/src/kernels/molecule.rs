//! Organic patterns screened or glazed over a photo.

use std::f32::consts::PI;

use glam::{Vec2, Vec3, Vec4};

use crate::image::Sampler;
use crate::shading::{fract, hsv2rgb, premultiply, rotate, screen, smoothstep, unpremultiply};
use crate::uniforms::{UniformSlot, Uniforms, RESOLUTION, TAP, TEXTURE, TIME};
use crate::Effect;

const SLOTS: &[UniformSlot] = &[RESOLUTION, TIME, TEXTURE, TAP];
const GLASS_SLOTS: &[UniformSlot] = &[RESOLUTION, TIME];

/// Tap influence radius as a fraction of the shorter panel side.
const TAP_RADIUS: f32 = 0.35;
/// How far the pattern domain is pushed away from the tap point.
const TAP_STRENGTH: f32 = 0.5;

const GLASS_OPACITY: f32 = 0.4;

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

fn noise(p: Vec2, ltime: f32) -> f32 {
    (p.x * 10.0).sin() * (p.y * (3.0 + (ltime / 11.0).sin())).sin() + 0.2
}

fn fbm(mut p: Vec2, ltime: f32) -> f32 {
    p *= 1.1;
    let mut f = 0.0;
    let mut amp = 0.5;
    for i in 0..3 {
        let modify = rotate(ltime / 50.0 * (i * i) as f32);
        f += amp * noise(p, ltime);
        p = modify * p * 2.0;
        amp /= 2.2;
    }
    f
}

/// Two-level domain warp. Returns the pattern value and both warp vectors.
fn pattern(p: Vec2, ltime: f32) -> (f32, Vec2, Vec2) {
    let q = Vec2::new(
        fbm(p + 1.0, ltime),
        fbm(rotate(0.1 * ltime) * p + 3.0, ltime),
    );
    let r = Vec2::new(fbm(rotate(0.2) * q, ltime), fbm(q, ltime));
    (fbm(p + r, ltime), q, r)
}

/// Eased, quantised remap of the clock: holds for a while then swings ahead in
/// steps of six, with a per-pixel phase from a slow noise field.
fn pattern_time(p: Vec2, time: f32) -> f32 {
    let ctime = time + fbm(p / 8.0, time) * 40.0;
    let ftime = fract(ctime / 6.0);
    ((ctime / 6.0).floor() + (1.0 - (ftime * PI).cos() / 2.0)) * 6.0
}

fn vignette(p: Vec2) -> f32 {
    let edge = |v: f32| 1.0 - (4.0 * (v - 0.5) * (v - 0.5)).powi(10);
    edge(p.x) * edge(p.y)
}

/// Domain offset caused by a tap at `tap`, fading to nothing at the radius.
fn tap_push(coord: Vec2, tap: Vec2, resolution: Vec2) -> Vec2 {
    let radius = TAP_RADIUS * resolution.min_element();
    let falloff = 1.0 - smoothstep(0.0, radius, coord.distance(tap));
    (coord - tap) / resolution * falloff * TAP_STRENGTH
}

// ---------------------------------------------------------------------------
// Molecule
// ---------------------------------------------------------------------------

/// Layered fbm colour field, vignetted and screened over the source. A bound
/// `tap` warps the field around the touch point. `texture` is accepted as a
/// child image binding and not sampled.
pub struct Molecule;

impl Effect for Molecule {
    fn name(&self) -> &'static str {
        "molecule"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        SLOTS
    }

    fn apply(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4 {
        let resolution = uniforms.resolution();
        let uv = coord / resolution;
        let p = if uniforms.is_bound(TAP.name) {
            uv + tap_push(coord, uniforms.float2(TAP.name), resolution)
        } else {
            uv
        };

        let ltime = pattern_time(p, uniforms.time());
        let (f, q, r) = pattern(p, ltime);
        let col = hsv2rgb(Vec3::new(
            q.x / 10.0 + ltime / 100.0 + 0.4,
            r.y.abs() * 3.0 + 0.1,
            r.x + f,
        ));

        let color = source.eval(coord);
        let rgb = screen(unpremultiply(color), col * vignette(uv));
        premultiply(rgb.clamp(Vec3::ZERO, Vec3::ONE), color.w)
    }
}

// ---------------------------------------------------------------------------
// MoleculeGlass
// ---------------------------------------------------------------------------

fn s_curve(x: f32) -> f32 {
    let y = x * 2.0 - 1.0;
    -y * y.abs() * 0.5 + y + 0.5
}

/// Frosted-glass wash: a vertical grey ramp with the source colour showing
/// through at 40%. Alpha is the source's. Does not react to taps.
pub struct MoleculeGlass;

impl Effect for MoleculeGlass {
    fn name(&self) -> &'static str {
        "molecule_glass"
    }

    fn slots(&self) -> &'static [UniformSlot] {
        GLASS_SLOTS
    }

    fn apply(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4 {
        let v = (coord.y / uniforms.resolution().y).clamp(0.0, 1.0);
        let color = source.eval(coord);
        let rgb = Vec3::splat(s_curve(v)).lerp(unpremultiply(color), GLASS_OPACITY);
        premultiply(rgb, color.w)
    }
}
