use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::spectrogram::SpectrogramImage;

/// Receives a redraw signal whenever the pipeline's spectrogram changes.
pub trait ViewSink {
    fn view_changed(&mut self, image: Option<&SpectrogramImage>);
}

/// Logs the refresh and does nothing else. Used when no view is attached.
pub struct LogView;

impl ViewSink for LogView {
    fn view_changed(&mut self, image: Option<&SpectrogramImage>) {
        match image {
            Some(image) => log::debug!(
                "View refresh: {}x{} spectrogram, {} column(s) written",
                image.width(),
                image.height(),
                image.columns_written()
            ),
            None => log::debug!("View refresh: no spectrogram yet"),
        }
    }
}

/// Writes the current spectrogram to a PNG file on every refresh.
pub struct PngSnapshot {
    path: PathBuf,
}

impl PngSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ViewSink for PngSnapshot {
    fn view_changed(&mut self, image: Option<&SpectrogramImage>) {
        let Some(image) = image else {
            return;
        };
        match save_png(image, &self.path) {
            Ok(()) => log::info!("Spectrogram written to {}", self.path.display()),
            Err(err) => log::warn!("Failed to write spectrogram: {:#}", err),
        }
    }
}

pub fn save_png(image: &SpectrogramImage, path: &Path) -> Result<()> {
    let rgb = image::RgbImage::from_raw(
        image.width() as u32,
        image.height() as u32,
        image.to_rgb_bytes(),
    )
    .context("Spectrogram pixel buffer has the wrong size")?;
    rgb.save(path)
        .with_context(|| format!("Failed to save PNG: {}", path.display()))?;
    Ok(())
}
