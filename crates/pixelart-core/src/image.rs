//! Rasters flowing through the pipeline.
//!
//! [`Bitmap`] is the immutable RGBA8 input handed over by whoever decodes the
//! photos; [`Frame`] is the float, premultiplied raster every stage produces.

use glam::{UVec2, Vec2, Vec4};

use crate::error::{PixelError, PixelResult};

/// Anything a kernel can `eval` at a pixel coordinate.
pub trait Sampler {
    fn size(&self) -> UVec2;

    /// Premultiplied colour at `coord` (pixel units, nearest texel, clamped
    /// to the edge).
    fn eval(&self, coord: Vec2) -> Vec4;
}

fn texel_index(coord: Vec2, width: u32, height: u32) -> usize {
    let x = (coord.x.floor() as i64).clamp(0, width as i64 - 1) as usize;
    let y = (coord.y.floor() as i64).clamp(0, height as i64 - 1) as usize;
    y * width as usize + x
}

// ---------------------------------------------------------------------------
// Bitmap
// ---------------------------------------------------------------------------

/// Decoded image, straight (non-premultiplied) RGBA8, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Bitmap {
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> PixelResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(PixelError::BitmapSize {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        let pixels = data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> [u8; 4]) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self::from_fn(width, height, |_, _| rgba)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

impl Sampler for Bitmap {
    fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn eval(&self, coord: Vec2) -> Vec4 {
        if self.pixels.is_empty() {
            return Vec4::ZERO;
        }
        let [r, g, b, a] = self.pixels[texel_index(coord, self.width, self.height)];
        let straight = Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0;
        (straight.truncate() * straight.w).extend(straight.w)
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// Float RGBA raster, premultiplied alpha, one per stage output.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<Vec4>,
}

impl Frame {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Vec4::ZERO)
    }

    pub fn filled(width: u32, height: u32, color: Vec4) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Evaluate `f` at every pixel centre, row-major from the top-left.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(Vec2) -> Vec4) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Stretch `source` over a `width`×`height` raster (nearest sampling).
    pub fn resampled(source: &dyn Sampler, width: u32, height: u32) -> Self {
        let scale = source.size().as_vec2() / Vec2::new(width as f32, height as f32);
        Self::from_fn(width, height, |coord| source.eval(coord * scale))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    pub fn pixels(&self) -> &[Vec4] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Vec4] {
        &mut self.pixels
    }

    /// Combine two frames of equal size pixel by pixel.
    pub fn zip_map(&self, other: &Frame, f: impl Fn(Vec4, Vec4) -> Vec4) -> Frame {
        debug_assert_eq!(self.size(), other.size());
        Frame {
            width: self.width,
            height: self.height,
            pixels: self
                .pixels
                .iter()
                .zip(&other.pixels)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Premultiplied RGBA8, the layout uploaded to the GPU.
    pub fn to_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels.iter().map(|&px| quantize(px)).collect()
    }

    /// Straight-alpha RGBA8, the layout image files expect.
    pub fn to_straight_rgba8(&self) -> Vec<[u8; 4]> {
        self.pixels
            .iter()
            .map(|&px| {
                if px.w <= 0.0 {
                    [0, 0, 0, 0]
                } else {
                    quantize((px.truncate() / px.w).extend(px.w))
                }
            })
            .collect()
    }
}

fn quantize(px: Vec4) -> [u8; 4] {
    let v = (px.clamp(Vec4::ZERO, Vec4::ONE) * 255.0).round();
    [v.x as u8, v.y as u8, v.z as u8, v.w as u8]
}

impl Sampler for Frame {
    fn size(&self) -> UVec2 {
        UVec2::new(self.width, self.height)
    }

    fn eval(&self, coord: Vec2) -> Vec4 {
        if self.pixels.is_empty() {
            return Vec4::ZERO;
        }
        self.pixels[texel_index(coord, self.width, self.height)]
    }
}
