use serde::Deserialize;
use std::path::{Path, PathBuf};

use vocalis::audio::bands::{DEFAULT_HIGH_CUTOFF_HZ, DEFAULT_LOW_CUTOFF_HZ};
use vocalis::encode::wav::DEFAULT_MAX_EXPORT_SAMPLES;
use vocalis::pipeline::{DEFAULT_FFT_SIZE, DEFAULT_VIEW_WIDTH};
use vocalis::{Cutoffs, PipelineConfig, Stages};

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub separation: SeparationConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub stages: StagesConfig,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,
    #[serde(default = "default_view_width")]
    pub view_width: usize,
}

#[derive(Debug, Deserialize)]
pub struct SeparationConfig {
    #[serde(default = "default_low_cutoff")]
    pub low_cutoff_hz: f32,
    #[serde(default = "default_high_cutoff")]
    pub high_cutoff_hz: f32,
    #[serde(default = "default_low_gain")]
    pub low_gain: f32,
    #[serde(default)]
    pub mid_gain: f32,
    #[serde(default)]
    pub high_gain: f32,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

#[derive(Debug, Deserialize)]
pub struct StagesConfig {
    #[serde(default = "default_true")]
    pub spectrogram: bool,
    #[serde(default = "default_true")]
    pub separation: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fft_size: default_fft_size(),
            view_width: default_view_width(),
        }
    }
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            low_cutoff_hz: default_low_cutoff(),
            high_cutoff_hz: default_high_cutoff(),
            low_gain: default_low_gain(),
            mid_gain: 0.0,
            high_gain: 0.0,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_samples: default_max_samples(),
        }
    }
}

impl Default for StagesConfig {
    fn default() -> Self {
        Self {
            spectrogram: true,
            separation: true,
        }
    }
}

fn default_fft_size() -> usize { DEFAULT_FFT_SIZE }
fn default_view_width() -> usize { DEFAULT_VIEW_WIDTH }
fn default_low_cutoff() -> f32 { DEFAULT_LOW_CUTOFF_HZ }
fn default_high_cutoff() -> f32 { DEFAULT_HIGH_CUTOFF_HZ }
fn default_low_gain() -> f32 { 1.0 }
fn default_max_samples() -> usize { DEFAULT_MAX_EXPORT_SAMPLES }
fn default_true() -> bool { true }

impl Config {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            fft_size: self.analysis.fft_size,
            view_width: self.analysis.view_width,
            cutoffs: Cutoffs {
                low_hz: self.separation.low_cutoff_hz,
                high_hz: self.separation.high_cutoff_hz,
            },
            max_export_samples: self.export.max_samples,
            stages: Stages {
                spectrogram: self.stages.spectrogram,
                separation: self.stages.separation,
            },
        }
    }
}

/// Explicit path, else `vocalis.toml` in the working directory, else the
/// per-user config file.
pub fn find_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let local = PathBuf::from("vocalis.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("vocalis").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("vocalis").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::debug!("Config parse error in {}: {}", path.display(), err);
            None
        }
    }
}
