//! The kernel registry: every effect a panel can chain, plus the instance type
//! that pairs a kernel with its own uniform bindings.

pub mod cloud;
pub mod flash;
pub mod grade;
pub mod mask;
pub mod molecule;
pub mod water;
pub mod wave;

use glam::{Vec2, Vec4};

use crate::image::{Frame, Sampler};
use crate::uniforms::{UniformSlot, Uniforms};
use crate::{Effect, Generator};

/// Names every kernel the registry can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelKind {
    RoundedMask,
    CloudNoise,
    WaterRipple,
    WaveLine,
    ColorGrade,
    TintBlend,
    Flash,
    Molecule,
    MoleculeGlass,
}

impl KernelKind {
    pub const ALL: [KernelKind; 9] = [
        KernelKind::RoundedMask,
        KernelKind::CloudNoise,
        KernelKind::WaterRipple,
        KernelKind::WaveLine,
        KernelKind::ColorGrade,
        KernelKind::TintBlend,
        KernelKind::Flash,
        KernelKind::Molecule,
        KernelKind::MoleculeGlass,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KernelKind::RoundedMask => "rounded_mask",
            KernelKind::CloudNoise => "cloud",
            KernelKind::WaterRipple => "water",
            KernelKind::WaveLine => "wave",
            KernelKind::ColorGrade => "filter_1987",
            KernelKind::TintBlend => "mix",
            KernelKind::Flash => "blip",
            KernelKind::Molecule => "molecule",
            KernelKind::MoleculeGlass => "molecule_glass",
        }
    }

    pub fn from_name(name: &str) -> Option<KernelKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn build(self) -> ImageKernel {
        match self {
            KernelKind::RoundedMask => ImageKernel::Effect(Box::new(mask::RoundedMask)),
            KernelKind::CloudNoise => ImageKernel::Generator(Box::new(cloud::CloudNoise::new())),
            KernelKind::WaterRipple => ImageKernel::Generator(Box::new(water::WaterRipple)),
            KernelKind::WaveLine => ImageKernel::Generator(Box::new(wave::WaveLine)),
            KernelKind::ColorGrade => ImageKernel::Effect(Box::new(grade::ColorGrade)),
            KernelKind::TintBlend => ImageKernel::Effect(Box::new(grade::TintBlend)),
            KernelKind::Flash => ImageKernel::Effect(Box::new(flash::Flash)),
            KernelKind::Molecule => ImageKernel::Effect(Box::new(molecule::Molecule)),
            KernelKind::MoleculeGlass => ImageKernel::Effect(Box::new(molecule::MoleculeGlass)),
        }
    }
}

// ---------------------------------------------------------------------------
// ImageKernel: generator or source transform behind one sampling interface
// ---------------------------------------------------------------------------

pub enum ImageKernel {
    Generator(Box<dyn Generator>),
    Effect(Box<dyn Effect>),
}

impl ImageKernel {
    pub fn name(&self) -> &'static str {
        match self {
            ImageKernel::Generator(g) => g.name(),
            ImageKernel::Effect(e) => e.name(),
        }
    }

    pub fn slots(&self) -> &'static [UniformSlot] {
        match self {
            ImageKernel::Generator(g) => g.slots(),
            ImageKernel::Effect(e) => e.slots(),
        }
    }

    pub fn is_generator(&self) -> bool {
        matches!(self, ImageKernel::Generator(_))
    }

    /// Colour at `coord`. Generators never look at `source`.
    pub fn shade(&self, coord: Vec2, source: &dyn Sampler, uniforms: &Uniforms) -> Vec4 {
        match self {
            ImageKernel::Generator(g) => g.generate(coord, uniforms),
            ImageKernel::Effect(e) => e.apply(coord, source, uniforms),
        }
    }
}

impl std::fmt::Debug for ImageKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let role = if self.is_generator() { "Generator" } else { "Effect" };
        write!(f, "{role}({})", self.name())
    }
}

// ---------------------------------------------------------------------------
// KernelInstance
// ---------------------------------------------------------------------------

/// One kernel as used by one panel, with bindings scoped to that use.
#[derive(Debug)]
pub struct KernelInstance {
    kernel: ImageKernel,
    uniforms: Uniforms,
}

impl KernelInstance {
    pub fn new(kernel: ImageKernel) -> Self {
        let uniforms = Uniforms::new(kernel.name(), kernel.slots());
        Self { kernel, uniforms }
    }

    pub fn from_kind(kind: KernelKind) -> Self {
        Self::new(kind.build())
    }

    pub fn name(&self) -> &'static str {
        self.kernel.name()
    }

    pub fn kernel(&self) -> &ImageKernel {
        &self.kernel
    }

    pub fn uniforms(&self) -> &Uniforms {
        &self.uniforms
    }

    pub fn uniforms_mut(&mut self) -> &mut Uniforms {
        &mut self.uniforms
    }

    /// Evaluate the kernel over a raster the size of `source`. Output colours
    /// are clamped to `[0, 1]` the way a render target stores them.
    pub fn render(&self, source: &Frame) -> Frame {
        debug_assert!(
            !self.uniforms.declares("resolution")
                || self.uniforms.resolution().min_element() > 0.0,
            "kernel '{}' rendered without a resolution",
            self.name()
        );
        Frame::from_fn(source.width(), source.height(), |coord| {
            self.kernel
                .shade(coord, source, &self.uniforms)
                .clamp(Vec4::ZERO, Vec4::ONE)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_names_are_unique_and_round_trip() {
        let mut seen = HashSet::new();
        for kind in KernelKind::ALL {
            assert!(seen.insert(kind.name()), "duplicate kernel name {}", kind.name());
            assert_eq!(KernelKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.build().name(), kind.name());
        }
        assert_eq!(KernelKind::from_name("sepia"), None);
    }

    #[test]
    fn every_kernel_declares_resolution_first() {
        for kind in KernelKind::ALL {
            let slots = kind.build().slots();
            assert_eq!(slots.first().map(|s| s.name), Some("resolution"), "{kind:?}");
        }
    }

    #[test]
    fn generators_are_the_three_procedural_kernels() {
        let generators: Vec<_> = KernelKind::ALL
            .into_iter()
            .filter(|k| k.build().is_generator())
            .collect();
        assert_eq!(
            generators,
            [KernelKind::CloudNoise, KernelKind::WaterRipple, KernelKind::WaveLine]
        );
    }

    #[test]
    fn render_keeps_source_dimensions() {
        let mut instance = KernelInstance::from_kind(KernelKind::WaveLine);
        instance
            .uniforms_mut()
            .set("resolution", Vec2::new(7.0, 3.0))
            .unwrap();
        let out = instance.render(&Frame::new(7, 3));
        assert_eq!((out.width(), out.height()), (7, 3));
        assert!(out
            .pixels()
            .iter()
            .all(|px| px.cmpge(Vec4::ZERO).all() && px.cmple(Vec4::ONE).all()));
    }
}
