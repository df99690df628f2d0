use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pixelart_core::presets::ScreenKind;

/// Most photos a run can use; panels draw from three.
pub const MAX_PHOTOS: usize = 3;

#[derive(Debug, Parser)]
#[command(name = "pixelart", version, about = "Procedural shader panels composited over photos")]
pub struct Cli {
    /// Screen shown at start-up.
    #[arg(long, value_enum, default_value_t = ScreenArg::Gallery)]
    pub screen: ScreenArg,

    /// Photo to draw panels over (repeat up to three times). Missing photos
    /// are replaced by generated gradients.
    #[arg(long = "photo", value_name = "FILE")]
    pub photos: Vec<PathBuf>,

    /// Render headless and write PNGs into DIR instead of opening a window.
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Frames to export.
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub frames: u32,

    /// Window width in pixels when exporting.
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScreenArg {
    Gallery,
    Card,
}

impl From<ScreenArg> for ScreenKind {
    fn from(arg: ScreenArg) -> Self {
        match arg {
            ScreenArg::Gallery => ScreenKind::Gallery,
            ScreenArg::Card => ScreenKind::Card,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["pixelart"]).unwrap();
        assert_eq!(cli.screen, ScreenArg::Gallery);
        assert!(cli.photos.is_empty());
        assert!(cli.export.is_none());
        assert_eq!(cli.frames, 1);
        assert_eq!(cli.width, 800);
    }

    #[test]
    fn photos_repeat_and_keep_order() {
        let cli = Cli::try_parse_from([
            "pixelart", "--photo", "a.jpg", "--photo", "b.png", "--screen", "card",
        ])
        .unwrap();
        assert_eq!(cli.photos, [PathBuf::from("a.jpg"), PathBuf::from("b.png")]);
        assert_eq!(ScreenKind::from(cli.screen), ScreenKind::Card);
    }

    #[test]
    fn zero_frames_is_rejected() {
        assert!(Cli::try_parse_from(["pixelart", "--export", "out", "--frames", "0"]).is_err());
    }
}
