//! Stage ordering for a panel: kernels, blurs and blended overlays applied to
//! the panel's base layer in sequence.

use glam::Vec4;

use crate::blur::GaussianBlur;
use crate::image::Frame;
use crate::kernels::{KernelInstance, KernelKind};
use crate::shading::{overlay_over, screen_over, source_over};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    SourceOver,
    Screen,
    Overlay,
}

impl BlendMode {
    pub fn blend(self, dst: Vec4, src: Vec4) -> Vec4 {
        match self {
            BlendMode::SourceOver => source_over(dst, src),
            BlendMode::Screen => screen_over(dst, src),
            BlendMode::Overlay => overlay_over(dst, src),
        }
    }
}

#[derive(Debug)]
pub enum Stage {
    /// Replace the layer with the kernel's output.
    Kernel(KernelInstance),
    Blur(GaussianBlur),
    /// Render the kernel over the current layer and blend the result on top.
    Overlay {
        instance: KernelInstance,
        mode: BlendMode,
    },
}

impl Stage {
    pub fn instance(&self) -> Option<&KernelInstance> {
        match self {
            Stage::Kernel(instance) | Stage::Overlay { instance, .. } => Some(instance),
            Stage::Blur(_) => None,
        }
    }

    pub fn instance_mut(&mut self) -> Option<&mut KernelInstance> {
        match self {
            Stage::Kernel(instance) | Stage::Overlay { instance, .. } => Some(instance),
            Stage::Blur(_) => None,
        }
    }

    fn run(&self, layer: Frame) -> Frame {
        match self {
            Stage::Kernel(instance) => instance.render(&layer),
            Stage::Blur(blur) => blur.apply(&layer),
            Stage::Overlay { instance, mode } => {
                let top = instance.render(&layer);
                layer.zip_map(&top, |dst, src| mode.blend(dst, src))
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct Compositor {
    stages: Vec<Stage>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_kernel(mut self, kind: KernelKind) -> Self {
        self.stages.push(Stage::Kernel(KernelInstance::from_kind(kind)));
        self
    }

    pub fn then_blur(mut self, sigma: f32) -> Self {
        self.stages.push(Stage::Blur(GaussianBlur::new(sigma)));
        self
    }

    pub fn then_overlay(mut self, kind: KernelKind, mode: BlendMode) -> Self {
        self.stages.push(Stage::Overlay {
            instance: KernelInstance::from_kind(kind),
            mode,
        });
        self
    }

    pub fn push(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn instances(&self) -> impl Iterator<Item = &KernelInstance> {
        self.stages.iter().filter_map(Stage::instance)
    }

    pub fn instances_mut(&mut self) -> impl Iterator<Item = &mut KernelInstance> {
        self.stages.iter_mut().filter_map(Stage::instance_mut)
    }

    /// Run every stage over `base`, in order.
    pub fn run(&self, base: Frame) -> Frame {
        self.stages.iter().fold(base, |layer, stage| stage.run(layer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn sized(mut compositor: Compositor, w: u32, h: u32) -> Compositor {
        for instance in compositor.instances_mut() {
            let u = instance.uniforms_mut();
            u.set("resolution", Vec2::new(w as f32, h as f32)).unwrap();
        }
        compositor
    }

    #[test]
    fn empty_compositor_passes_the_base_through() {
        let base = Frame::filled(3, 2, Vec4::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(Compositor::new().run(base.clone()), base);
    }

    #[test]
    fn instances_skip_blur_stages() {
        let compositor = Compositor::new()
            .then_blur(28.0)
            .then_kernel(KernelKind::RoundedMask)
            .then_overlay(KernelKind::WaterRipple, BlendMode::Overlay);
        let names: Vec<_> = compositor.instances().map(|i| i.name()).collect();
        assert_eq!(names, ["rounded_mask", "water"]);
        assert_eq!(compositor.stages().len(), 3);
    }

    #[test]
    fn stages_run_in_order() {
        // A mask over a blurred constant is the mask over the constant: blur
        // first must leave nothing for the mask to disagree with.
        let base = Frame::filled(80, 60, Vec4::new(0.2, 0.4, 0.6, 1.0));
        let blurred_then_masked = sized(
            Compositor::new().then_blur(6.0).then_kernel(KernelKind::RoundedMask),
            80,
            60,
        )
        .run(base.clone());
        let masked = sized(Compositor::new().then_kernel(KernelKind::RoundedMask), 80, 60)
            .run(base);
        for (a, b) in blurred_then_masked.pixels().iter().zip(masked.pixels()) {
            assert!((*a - *b).abs().max_element() < 1e-5);
        }
    }

    #[test]
    fn transparent_overlay_keeps_the_layer() {
        // Wave output below the cutoff is fully transparent.
        let base = Frame::filled(40, 40, Vec4::new(0.5, 0.25, 0.0, 1.0));
        let out = sized(
            Compositor::new().then_overlay(KernelKind::WaveLine, BlendMode::SourceOver),
            40,
            40,
        )
        .run(base.clone());
        // Top-left corner sits far from every line.
        assert_eq!(out.pixel(0, 0), base.pixel(0, 0));
    }

    #[test]
    fn blend_modes_with_transparent_source_are_identity() {
        let dst = Vec4::new(0.3, 0.2, 0.1, 0.8);
        for mode in [BlendMode::SourceOver, BlendMode::Screen, BlendMode::Overlay] {
            let out = mode.blend(dst, Vec4::ZERO);
            assert!((out - dst).abs().max_element() < 1e-6, "{mode:?}: {out}");
        }
    }
}
