use std::sync::Arc;

use glam::{UVec2, Vec2};

use crate::error::PixelResult;
use crate::image::Bitmap;
use crate::kernels::KernelInstance;
use crate::uniforms::{RESOLUTION, TAP, TEXTURE, TIME, TINT};
use crate::FrameContext;

/// Keeps the uniforms of one panel's kernel instances current.
///
/// Resolution is written on size changes, everything else once per frame.
/// Until a non-zero size has been bound the binder reports "not ready" and
/// the panel must not run its kernels.
#[derive(Debug, Default, Clone)]
pub struct UniformBinder {
    resolution: Option<UVec2>,
}

impl UniformBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolution(&self) -> Option<UVec2> {
        self.resolution
    }

    pub fn is_ready(&self) -> bool {
        self.resolution.is_some()
    }

    /// Bind a new panel size. A zero dimension unbinds the previous size.
    pub fn resize<'a>(
        &mut self,
        width: u32,
        height: u32,
        instances: impl IntoIterator<Item = &'a mut KernelInstance>,
    ) -> PixelResult<()> {
        if width == 0 || height == 0 {
            if self.resolution.take().is_some() {
                log::debug!("panel collapsed to {width}x{height}; resolution unbound");
            }
            for instance in instances {
                instance.uniforms_mut().clear(RESOLUTION.name);
            }
            return Ok(());
        }

        let resolution = Vec2::new(width as f32, height as f32);
        for instance in instances {
            let uniforms = instance.uniforms_mut();
            if uniforms.declares(RESOLUTION.name) {
                uniforms.set(RESOLUTION.name, resolution)?;
            }
        }
        self.resolution = Some(UVec2::new(width, height));
        Ok(())
    }

    /// Write per-frame values. `tap` is the panel's own last tap, in its pixel
    /// coordinates. Returns `false` (and writes nothing) while no resolution is
    /// bound.
    pub fn bind_frame<'a>(
        &self,
        ctx: &FrameContext,
        backing: Option<&Arc<Bitmap>>,
        tap: Option<Vec2>,
        instances: impl IntoIterator<Item = &'a mut KernelInstance>,
    ) -> PixelResult<bool> {
        if !self.is_ready() {
            return Ok(false);
        }
        for instance in instances {
            let uniforms = instance.uniforms_mut();
            if uniforms.declares(TIME.name) {
                uniforms.set(TIME.name, ctx.time)?;
            }
            if uniforms.declares(TINT.name) {
                uniforms.set(TINT.name, ctx.tint)?;
            }
            if let Some(tap) = tap.filter(|_| uniforms.declares(TAP.name)) {
                uniforms.set(TAP.name, tap)?;
            }
            if let Some(bitmap) = backing.filter(|_| uniforms.declares(TEXTURE.name)) {
                uniforms.set(TEXTURE.name, Arc::clone(bitmap))?;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::KernelKind;
    use glam::Vec4;

    fn instances() -> Vec<KernelInstance> {
        vec![
            KernelInstance::from_kind(KernelKind::Molecule),
            KernelInstance::from_kind(KernelKind::TintBlend),
            KernelInstance::from_kind(KernelKind::RoundedMask),
        ]
    }

    #[test]
    fn starts_unready_and_binds_nothing() {
        let binder = UniformBinder::new();
        let mut kernels = instances();
        let bound = binder
            .bind_frame(&FrameContext::new(3.0), None, None, kernels.iter_mut())
            .unwrap();
        assert!(!bound);
        assert!(kernels.iter().all(|k| !k.uniforms().is_bound("time")));
    }

    #[test]
    fn resize_writes_resolution_everywhere_it_is_declared() {
        let mut binder = UniformBinder::new();
        let mut kernels = instances();
        binder.resize(320, 240, kernels.iter_mut()).unwrap();
        assert_eq!(binder.resolution(), Some(UVec2::new(320, 240)));
        for k in &kernels {
            assert_eq!(k.uniforms().resolution(), Vec2::new(320.0, 240.0), "{}", k.name());
        }
    }

    #[test]
    fn zero_size_unbinds() {
        let mut binder = UniformBinder::new();
        let mut kernels = instances();
        binder.resize(320, 240, kernels.iter_mut()).unwrap();
        binder.resize(0, 240, kernels.iter_mut()).unwrap();
        assert!(!binder.is_ready());
        assert!(kernels.iter().all(|k| !k.uniforms().is_bound("resolution")));
        assert!(!binder
            .bind_frame(&FrameContext::new(1.0), None, None, kernels.iter_mut())
            .unwrap());
    }

    #[test]
    fn frame_binding_routes_each_value_to_its_slot() {
        let mut binder = UniformBinder::new();
        let mut kernels = instances();
        binder.resize(64, 64, kernels.iter_mut()).unwrap();

        let backing = Arc::new(Bitmap::solid(4, 4, [1, 2, 3, 255]));
        let mut ctx = FrameContext::new(59.5);
        ctx.tint = Vec4::new(0.1, 0.2, 0.3, 0.4);
        let tap = Some(Vec2::new(12.0, 34.0));
        assert!(binder
            .bind_frame(&ctx, Some(&backing), tap, kernels.iter_mut())
            .unwrap());

        let molecule = kernels[0].uniforms();
        assert_eq!(molecule.time(), 59.5);
        assert_eq!(molecule.float2("tap"), Vec2::new(12.0, 34.0));
        assert!(Arc::ptr_eq(molecule.image("texture").unwrap(), &backing));

        let tint = kernels[1].uniforms();
        assert_eq!(tint.float4("tint"), ctx.tint);
        assert!(!tint.declares("tap"));

        // The mask only declares resolution; nothing else lands there.
        assert_eq!(kernels[2].uniforms().slots().len(), 1);
    }

    #[test]
    fn no_tap_leaves_tap_unbound() {
        let mut binder = UniformBinder::new();
        let mut kernels = instances();
        binder.resize(64, 64, kernels.iter_mut()).unwrap();
        binder
            .bind_frame(&FrameContext::new(0.0), None, None, kernels.iter_mut())
            .unwrap();
        assert!(!kernels[0].uniforms().is_bound("tap"));
        assert!(!kernels[0].uniforms().is_bound("texture"));
    }
}
