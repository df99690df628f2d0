//! Separable blur used between kernel stages.
//!
//! A Gaussian of standard deviation `sigma` is approximated by three
//! successive box blurs, each run as a horizontal then a vertical running-sum
//! pass with clamp-to-edge sampling. Cost per pass is independent of the
//! radius, which keeps large panel blurs affordable on the CPU.

use glam::Vec4;

use crate::image::Frame;

const PASSES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianBlur {
    sigma: f32,
}

impl GaussianBlur {
    pub fn new(sigma: f32) -> Self {
        Self {
            sigma: sigma.max(0.0),
        }
    }

    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Half-widths of the three box passes.
    pub fn box_radii(&self) -> [usize; PASSES] {
        let sigma = self.sigma;
        let n = PASSES as f32;
        let ideal = (12.0 * sigma * sigma / n + 1.0).sqrt();
        let mut lower = ideal.floor() as i32;
        if lower % 2 == 0 {
            lower -= 1;
        }
        let lower = lower.max(1);
        let upper = lower + 2;
        let lf = lower as f32;
        let m = ((12.0 * sigma * sigma - n * lf * lf - 4.0 * n * lf - 3.0 * n) / (-4.0 * lf - 4.0))
            .round()
            .clamp(0.0, n) as usize;

        let mut radii = [0; PASSES];
        for (i, r) in radii.iter_mut().enumerate() {
            let size = if i < m { lower } else { upper };
            *r = ((size - 1) / 2) as usize;
        }
        radii
    }

    pub fn apply(&self, frame: &Frame) -> Frame {
        if self.sigma <= 0.0 || frame.pixels().is_empty() {
            return frame.clone();
        }
        let (w, h) = (frame.width() as usize, frame.height() as usize);
        let mut src = frame.clone();
        let mut tmp = frame.clone();
        for radius in self.box_radii() {
            if radius == 0 {
                continue;
            }
            box_pass(src.pixels(), tmp.pixels_mut(), w, h, radius, Axis::Horizontal);
            box_pass(tmp.pixels(), src.pixels_mut(), w, h, radius, Axis::Vertical);
        }
        src
    }
}

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

fn box_pass(src: &[Vec4], dst: &mut [Vec4], w: usize, h: usize, radius: usize, axis: Axis) {
    let (len, lines) = match axis {
        Axis::Horizontal => (w, h),
        Axis::Vertical => (h, w),
    };
    let index = |line: usize, i: usize| match axis {
        Axis::Horizontal => line * w + i,
        Axis::Vertical => i * w + line,
    };
    let clamp = |i: isize| i.clamp(0, len as isize - 1) as usize;
    let r = radius as isize;
    let scale = 1.0 / (2 * radius + 1) as f32;

    for line in 0..lines {
        let mut acc = Vec4::ZERO;
        for k in -r..=r {
            acc += src[index(line, clamp(k))];
        }
        for i in 0..len {
            dst[index(line, i)] = acc * scale;
            let i = i as isize;
            acc += src[index(line, clamp(i + r + 1))] - src[index(line, clamp(i - r))];
        }
    }
}
