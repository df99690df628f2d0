//! Headless rendering: drive a screen for a number of ticks and write every
//! panel's frames as PNG files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use pixelart_core::presets::{PhotoSet, ScreenKind};
use pixelart_core::screen::Screen;
use pixelart_core::Frame;

pub struct ExportJob<'a> {
    pub kind: ScreenKind,
    pub dir: &'a Path,
    pub frames: u32,
    pub width: u32,
}

/// Render `job.frames` ticks and return the written paths, in write order.
pub fn run(job: &ExportJob<'_>, photos: &PhotoSet) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(job.dir)
        .with_context(|| format!("failed to create {}", job.dir.display()))?;

    let mut screen = Screen::new(job.kind, photos);
    let presets = screen.presets().to_vec();
    for (i, preset) in presets.iter().enumerate() {
        screen.resize_panel(i, preset.width().resolve(job.width), preset.height())?;
    }

    let mut written = Vec::new();
    for frame in 0..job.frames {
        screen.tick();
        screen.render()?;
        for (i, preset) in presets.iter().enumerate() {
            let Some(output) = screen.output(i) else {
                continue;
            };
            let name = format!("{}_{:04}.png", file_stem(preset.name()), frame);
            let path = job.dir.join(name);
            write_png(output, &path)?;
            written.push(path);
        }
    }
    screen.teardown();

    log::info!(
        "Exported {} images of the {} screen to {}",
        written.len(),
        job.kind.name(),
        job.dir.display()
    );
    Ok(written)
}

fn file_stem(name: &str) -> String {
    name.to_ascii_lowercase().replace(' ', "_")
}

fn write_png(frame: &Frame, path: &Path) -> anyhow::Result<()> {
    let data = frame.to_straight_rgba8().concat();
    let image = image::RgbaImage::from_raw(frame.width(), frame.height(), data)
        .context("frame buffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelart_core::presets::Preset;

    #[test]
    fn card_export_writes_one_png_per_panel_per_frame() {
        let dir = std::env::temp_dir().join(format!("pixelart-export-{}", std::process::id()));
        let job = ExportJob {
            kind: ScreenKind::Card,
            dir: &dir,
            frames: 2,
            width: 48,
        };
        let written = run(&job, &PhotoSet::placeholder()).unwrap();
        assert_eq!(written.len(), 2 * ScreenKind::Card.presets().count());

        let wave = dir.join("wave_0001.png");
        assert!(written.contains(&wave));
        let decoded = image::open(&wave).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (48, Preset::WaveCard.height()));
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn file_stems_are_lowercase() {
        assert_eq!(file_stem("Notification"), "notification");
        assert_eq!(file_stem("1987"), "1987");
    }
}
