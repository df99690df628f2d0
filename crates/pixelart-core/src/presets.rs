use std::sync::Arc;

use glam::Vec4;

use crate::compositor::{BlendMode, Compositor};
use crate::image::Bitmap;
use crate::kernels::KernelKind;
use crate::panel::{Content, Panel};

/// The three photos panels draw from, decoded once and shared.
#[derive(Debug, Clone)]
pub struct PhotoSet {
    pub primary: Arc<Bitmap>,
    pub secondary: Arc<Bitmap>,
    pub tertiary: Arc<Bitmap>,
}

impl PhotoSet {
    pub fn new(primary: Bitmap, secondary: Bitmap, tertiary: Bitmap) -> Self {
        Self {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
            tertiary: Arc::new(tertiary),
        }
    }

    /// Generated stand-ins for when no photos are supplied: a warm diagonal,
    /// a cool radial and a striped gradient.
    pub fn placeholder() -> Self {
        const W: u32 = 256;
        const H: u32 = 160;
        let unit = |v: f32| (v.clamp(0.0, 1.0) * 255.0) as u8;

        let warm = Bitmap::from_fn(W, H, |x, y| {
            let t = (x + y) as f32 / (W + H) as f32;
            [unit(0.9 - 0.2 * t), unit(0.4 + 0.3 * t), unit(0.2 + 0.2 * t), 255]
        });
        let cool = Bitmap::from_fn(W, H, |x, y| {
            let dx = x as f32 / W as f32 - 0.5;
            let dy = y as f32 / H as f32 - 0.5;
            let d = (dx * dx + dy * dy).sqrt() * 2.0;
            [unit(0.1 + 0.3 * d), unit(0.3 + 0.2 * d), unit(0.8 - 0.3 * d), 255]
        });
        let stripes = Bitmap::from_fn(W, H, |x, y| {
            let band = ((x / 16) % 2) as f32;
            let t = y as f32 / H as f32;
            [unit(0.3 + 0.4 * band), unit(0.7 * t), unit(0.5 + 0.3 * band * t), 255]
        });
        Self::new(warm, cool, stripes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Gallery,
    Card,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 2] = [ScreenKind::Gallery, ScreenKind::Card];

    pub fn name(self) -> &'static str {
        match self {
            ScreenKind::Gallery => "gallery",
            ScreenKind::Card => "card",
        }
    }

    pub fn from_name(name: &str) -> Option<ScreenKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Clock value the screen starts from.
    pub fn start_time(self) -> f32 {
        match self {
            ScreenKind::Gallery => 0.0,
            ScreenKind::Card => 59.0,
        }
    }

    pub fn toggled(self) -> ScreenKind {
        match self {
            ScreenKind::Gallery => ScreenKind::Card,
            ScreenKind::Card => ScreenKind::Gallery,
        }
    }

    pub fn presets(self) -> impl Iterator<Item = Preset> {
        Preset::ALL.into_iter().filter(move |p| p.screen() == self)
    }
}

/// How wide a panel wants to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelWidth {
    /// Span the window.
    Fill,
    /// Fixed pixel width, capped by the window.
    Fixed(u32),
}

impl PanelWidth {
    pub fn resolve(self, available: u32) -> u32 {
        match self {
            PanelWidth::Fill => available,
            PanelWidth::Fixed(w) => w.min(available),
        }
    }
}

const CARD_WIDTH: u32 = 500;
const NOTIFICATION_FILL: Vec4 = Vec4::new(0.92, 0.92, 0.95, 1.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Blip,
    Filter1987,
    Mix,
    Molecule,
    Notification,
    CloudCard,
    GlassCard,
    WaterCard,
    WaveCard,
}

impl Preset {
    pub const ALL: [Preset; 9] = [
        Preset::Blip,
        Preset::Filter1987,
        Preset::Mix,
        Preset::Molecule,
        Preset::Notification,
        Preset::CloudCard,
        Preset::GlassCard,
        Preset::WaterCard,
        Preset::WaveCard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Blip => "Blip",
            Preset::Filter1987 => "1987",
            Preset::Mix => "Mix",
            Preset::Molecule => "Molecule",
            Preset::Notification => "Notification",
            Preset::CloudCard => "Cloud",
            Preset::GlassCard => "Glass",
            Preset::WaterCard => "Water",
            Preset::WaveCard => "Wave",
        }
    }

    pub fn screen(self) -> ScreenKind {
        match self {
            Preset::Blip
            | Preset::Filter1987
            | Preset::Mix
            | Preset::Molecule
            | Preset::Notification => ScreenKind::Gallery,
            Preset::CloudCard | Preset::GlassCard | Preset::WaterCard | Preset::WaveCard => {
                ScreenKind::Card
            }
        }
    }

    pub fn height(self) -> u32 {
        match self {
            Preset::Blip | Preset::Filter1987 | Preset::Mix | Preset::Molecule => 250,
            Preset::Notification => 100,
            Preset::CloudCard => 250,
            Preset::GlassCard => 150,
            Preset::WaterCard | Preset::WaveCard => 100,
        }
    }

    pub fn width(self) -> PanelWidth {
        match self.screen() {
            ScreenKind::Gallery => PanelWidth::Fill,
            ScreenKind::Card => PanelWidth::Fixed(CARD_WIDTH),
        }
    }

    pub fn build(self, photos: &PhotoSet) -> Panel {
        let photo = |p: &Arc<Bitmap>| Content::Photo(Arc::clone(p));
        match self {
            Preset::Blip => Panel::new(
                self.name(),
                photo(&photos.primary),
                Compositor::new().then_kernel(KernelKind::Flash),
            ),
            Preset::Filter1987 => Panel::new(
                self.name(),
                photo(&photos.secondary),
                Compositor::new().then_kernel(KernelKind::ColorGrade),
            ),
            Preset::Mix => Panel::new(
                self.name(),
                photo(&photos.tertiary),
                Compositor::new().then_kernel(KernelKind::TintBlend),
            ),
            Preset::Molecule => Panel::new(
                self.name(),
                photo(&photos.secondary),
                Compositor::new().then_kernel(KernelKind::Molecule),
            ),
            Preset::Notification => Panel::new(
                self.name(),
                Content::Fill(NOTIFICATION_FILL),
                Compositor::new().then_kernel(KernelKind::MoleculeGlass),
            ),
            Preset::CloudCard => Panel::new(
                self.name(),
                Content::Fill(Vec4::ZERO),
                Compositor::new()
                    .then_kernel(KernelKind::CloudNoise)
                    .then_blur(10.0),
            ),
            Preset::GlassCard => Panel::new(
                self.name(),
                photo(&photos.tertiary),
                Compositor::new()
                    .then_blur(28.0)
                    .then_kernel(KernelKind::RoundedMask),
            )
            .draggable(),
            Preset::WaterCard => Panel::new(
                self.name(),
                photo(&photos.primary),
                Compositor::new()
                    .then_blur(100.0)
                    .then_overlay(KernelKind::WaterRipple, BlendMode::Overlay),
            ),
            Preset::WaveCard => Panel::new(
                self.name(),
                Content::Fill(Vec4::ZERO),
                Compositor::new().then_kernel(KernelKind::WaveLine),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_nine_presets() {
        assert_eq!(Preset::ALL.len(), 9);
    }

    #[test]
    fn all_names_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for p in Preset::ALL {
            assert!(seen.insert(p.name()), "duplicate preset name: {}", p.name());
        }
    }

    #[test]
    fn screens_split_five_and_four() {
        assert_eq!(ScreenKind::Gallery.presets().count(), 5);
        assert_eq!(ScreenKind::Card.presets().count(), 4);
    }

    #[test]
    fn screen_names_round_trip() {
        for kind in ScreenKind::ALL {
            assert_eq!(ScreenKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.toggled().toggled(), kind);
        }
        assert_eq!(ScreenKind::from_name("settings"), None);
    }

    #[test]
    fn start_times() {
        assert_eq!(ScreenKind::Gallery.start_time(), 0.0);
        assert_eq!(ScreenKind::Card.start_time(), 59.0);
    }

    #[test]
    fn card_width_is_capped_by_the_window() {
        assert_eq!(Preset::GlassCard.width().resolve(800), 500);
        assert_eq!(Preset::GlassCard.width().resolve(320), 320);
        assert_eq!(Preset::Blip.width().resolve(800), 800);
    }

    #[test]
    fn built_panels_carry_the_expected_kernels() {
        let photos = PhotoSet::placeholder();
        let kernels = |p: Preset| -> Vec<&'static str> {
            p.build(&photos).compositor().instances().map(|i| i.name()).collect()
        };
        assert_eq!(kernels(Preset::Blip), ["blip"]);
        assert_eq!(kernels(Preset::Filter1987), ["filter_1987"]);
        assert_eq!(kernels(Preset::Mix), ["mix"]);
        assert_eq!(kernels(Preset::Notification), ["molecule_glass"]);
        assert_eq!(kernels(Preset::GlassCard), ["rounded_mask"]);
        assert_eq!(kernels(Preset::WaterCard), ["water"]);
    }

    #[test]
    fn only_the_glass_card_is_draggable() {
        let photos = PhotoSet::placeholder();
        for p in Preset::ALL {
            assert_eq!(p.build(&photos).is_draggable(), p == Preset::GlassCard, "{p:?}");
        }
    }

    #[test]
    fn photo_panels_share_the_decoded_bitmaps() {
        let photos = PhotoSet::placeholder();
        let molecule = Preset::Molecule.build(&photos);
        let filter = Preset::Filter1987.build(&photos);
        assert!(Arc::ptr_eq(molecule.backing().unwrap(), &photos.secondary));
        assert!(Arc::ptr_eq(filter.backing().unwrap(), &photos.secondary));
        assert!(Preset::WaveCard.build(&photos).backing().is_none());
    }
}
