//! Scalar and vector helpers with shader-language semantics.
//!
//! Kernels are written against these instead of the Rust std equivalents where
//! the two disagree (`fract`, `mod`) so the math reads like the fragment
//! programs it animates.

use glam::{Mat2, Vec2, Vec3, Vec4};

/// `x - floor(x)`, always in `[0, 1)` (also for negative inputs).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

#[inline]
pub fn fract2(v: Vec2) -> Vec2 {
    v - v.floor()
}

#[inline]
pub fn fract3(v: Vec3) -> Vec3 {
    v - v.floor()
}

/// Shader `mod`: result takes the sign of `y`.
#[inline]
pub fn glsl_mod(x: f32, y: f32) -> f32 {
    x - y * (x / y).floor()
}

#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite interpolation between `edge0` and `edge1`, clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Column-major rotation matrix, same layout as `mat2(c, -s, s, c)`.
#[inline]
pub fn rotate(angle: f32) -> Mat2 {
    let (s, c) = angle.sin_cos();
    Mat2::from_cols_array(&[c, -s, s, c])
}

pub fn hsv2rgb(c: Vec3) -> Vec3 {
    let k = Vec4::new(1.0, 2.0 / 3.0, 1.0 / 3.0, 3.0);
    let p = (fract3(Vec3::splat(c.x) + k.truncate()) * 6.0 - Vec3::splat(k.w)).abs();
    c.z * Vec3::ONE.lerp((p - Vec3::ONE).clamp(Vec3::ZERO, Vec3::ONE), c.y)
}

/// Rec. 709 luma.
#[inline]
pub fn luminance(rgb: Vec3) -> f32 {
    rgb.dot(Vec3::new(0.2126, 0.7152, 0.0722))
}

// ---------------------------------------------------------------------------
// Blend modes
// ---------------------------------------------------------------------------

/// Screen blend `1 - (1 - a)(1 - b)` per channel, expanded to `a + b - ab`
/// so a black layer leaves the other bit-for-bit unchanged.
#[inline]
pub fn screen(a: Vec3, b: Vec3) -> Vec3 {
    a + b - a * b
}

/// Straight-alpha colour of a premultiplied pixel. Fully transparent pixels
/// have no colour and come back black.
#[inline]
pub fn unpremultiply(c: Vec4) -> Vec3 {
    if c.w > 0.0 {
        (c.truncate() / c.w).min(Vec3::ONE)
    } else {
        Vec3::ZERO
    }
}

/// Inverse of [`unpremultiply`].
#[inline]
pub fn premultiply(rgb: Vec3, alpha: f32) -> Vec4 {
    (rgb * alpha).extend(alpha)
}

/// Porter-Duff source-over for premultiplied colours.
#[inline]
pub fn source_over(dst: Vec4, src: Vec4) -> Vec4 {
    src + dst * (1.0 - src.w)
}

/// Screen blend of two premultiplied layers (`src + dst - src·dst`).
#[inline]
pub fn screen_over(dst: Vec4, src: Vec4) -> Vec4 {
    src + dst - src * dst
}

/// Separable overlay blend of premultiplied layers.
pub fn overlay_over(dst: Vec4, src: Vec4) -> Vec4 {
    let (sa, da) = (src.w, dst.w);
    let channel = |s: f32, d: f32| {
        let blended = if 2.0 * d <= da {
            2.0 * s * d
        } else {
            sa * da - 2.0 * (da - d) * (sa - s)
        };
        blended + s * (1.0 - da) + d * (1.0 - sa)
    };
    Vec4::new(
        channel(src.x, dst.x),
        channel(src.y, dst.y),
        channel(src.z, dst.z),
        sa + da - sa * da,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fract_wraps_negative_values_upward() {
        assert!((fract(-0.25) - 0.75).abs() < 1e-6);
        assert!((fract(2.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn glsl_mod_follows_divisor_sign() {
        assert!((glsl_mod(-1.0, 4.0) - 3.0).abs() < 1e-6);
        assert!((glsl_mod(9.0, 4.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn smoothstep_clamps_and_is_symmetric() {
        assert_eq!(smoothstep(0.0, 1.0, -3.0), 0.0);
        assert_eq!(smoothstep(0.0, 1.0, 7.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
        assert_eq!(smoothstep(0.0, 1.0, f32::INFINITY), 1.0);
    }

    #[test]
    fn rotate_quarter_turn_matches_column_major_layout() {
        // mat2(c, -s, s, c) * (1, 0) = first column = (c, -s)
        let v = rotate(std::f32::consts::FRAC_PI_2) * Vec2::X;
        assert!(v.x.abs() < 1e-6, "x={}", v.x);
        assert!((v.y + 1.0).abs() < 1e-6, "y={}", v.y);
    }

    #[test]
    fn hsv2rgb_primary_hues() {
        let red = hsv2rgb(Vec3::new(0.0, 1.0, 1.0));
        assert!((red - Vec3::new(1.0, 0.0, 0.0)).abs().max_element() < 1e-5, "{red}");
        let green = hsv2rgb(Vec3::new(1.0 / 3.0, 1.0, 1.0));
        assert!((green - Vec3::new(0.0, 1.0, 0.0)).abs().max_element() < 1e-5, "{green}");
        let grey = hsv2rgb(Vec3::new(0.7, 0.0, 0.5));
        assert!((grey - Vec3::splat(0.5)).abs().max_element() < 1e-5, "{grey}");
    }

    #[test]
    fn screen_with_black_is_identity() {
        let c = Vec3::new(0.2, 0.5, 0.9);
        assert_eq!(screen(c, Vec3::ZERO), c);
        assert!((screen(c, Vec3::ONE) - Vec3::ONE).abs().max_element() < 1e-6);
    }

    #[test]
    fn premultiplication_round_trips_translucent_colour() {
        let px = Vec4::new(0.1, 0.05, 0.0, 0.2);
        let rgb = unpremultiply(px);
        assert!((rgb - Vec3::new(0.5, 0.25, 0.0)).abs().max_element() < 1e-6, "{rgb}");
        assert!((premultiply(rgb, px.w) - px).abs().max_element() < 1e-6);
        assert_eq!(unpremultiply(Vec4::ZERO), Vec3::ZERO);
    }

    #[test]
    fn source_over_opaque_source_wins() {
        let dst = Vec4::new(0.1, 0.2, 0.3, 1.0);
        let src = Vec4::new(0.9, 0.8, 0.7, 1.0);
        assert_eq!(source_over(dst, src), src);
        assert_eq!(source_over(dst, Vec4::ZERO), dst);
    }

    #[test]
    fn overlay_with_transparent_source_keeps_destination() {
        let dst = Vec4::new(0.4, 0.6, 0.2, 1.0);
        let out = overlay_over(dst, Vec4::ZERO);
        assert!((out - dst).abs().max_element() < 1e-6, "{out}");
    }

    #[test]
    fn overlay_mid_grey_source_on_dark_destination_darkens() {
        // d = 0.2 ≤ 0.5 → 2·s·d = 2·0.5·0.2 = 0.2 (opaque layers)
        let out = overlay_over(Vec4::new(0.2, 0.2, 0.2, 1.0), Vec4::new(0.5, 0.5, 0.5, 1.0));
        assert!((out.x - 0.2).abs() < 1e-6);
        assert!((out.w - 1.0).abs() < 1e-6);
    }
}
