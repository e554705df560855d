use indicatif::ProgressBar;
use std::path::Path;

use crate::audio::analysis;
use crate::audio::bands::{BandGainProfile, BandGains, Cutoffs};
use crate::audio::buffer::SampleBuffer;
use crate::audio::decode::decode_audio;
use crate::audio::separate::separate;
use crate::audio::transform::SpectralTransform;
use crate::encode::wav::{self, DEFAULT_MAX_EXPORT_SAMPLES};
use crate::error::PipelineError;
use crate::render::spectrogram::{SpectrogramAccumulator, SpectrogramImage};
use crate::render::view::{LogView, ViewSink};

pub const DEFAULT_FFT_SIZE: usize = 4096;
pub const DEFAULT_VIEW_WIDTH: usize = 800;

/// Optional pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stages {
    pub spectrogram: bool,
    pub separation: bool,
}

impl Default for Stages {
    fn default() -> Self {
        Self {
            spectrogram: true,
            separation: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    pub fft_size: usize,
    pub view_width: usize,
    pub cutoffs: Cutoffs,
    pub max_export_samples: usize,
    pub stages: Stages,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fft_size: DEFAULT_FFT_SIZE,
            view_width: DEFAULT_VIEW_WIDTH,
            cutoffs: Cutoffs::default(),
            max_export_samples: DEFAULT_MAX_EXPORT_SAMPLES,
            stages: Stages::default(),
        }
    }
}

/// Owns the current sample buffer and spectrogram and runs every stage
/// synchronously on the calling thread.
///
/// Buffer replacement is all-or-nothing: a failed load or separation leaves
/// the previous buffer and image untouched.
pub struct Pipeline {
    config: PipelineConfig,
    transform: SpectralTransform,
    buffer: Option<SampleBuffer>,
    spectrogram: SpectrogramAccumulator,
    view: Box<dyn ViewSink>,
    progress: ProgressBar,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        let transform = SpectralTransform::new(config.fft_size)?;
        Ok(Self {
            config,
            transform,
            buffer: None,
            spectrogram: SpectrogramAccumulator::new(config.view_width),
            view: Box::new(LogView),
            progress: ProgressBar::hidden(),
        })
    }

    pub fn with_view(mut self, view: Box<dyn ViewSink>) -> Self {
        self.view = view;
        self
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn buffer(&self) -> Option<&SampleBuffer> {
        self.buffer.as_ref()
    }

    pub fn spectrogram(&self) -> Option<&SpectrogramImage> {
        self.spectrogram.image()
    }

    /// Decode `path`, make it the current buffer and draw it.
    pub fn load_and_process(&mut self, path: &Path) -> Result<(), PipelineError> {
        log::info!("Loading {}", path.display());
        let buffer = decode_audio(path)?;
        self.load_buffer(buffer)
    }

    /// Make an already decoded buffer current and draw it.
    pub fn load_buffer(&mut self, buffer: SampleBuffer) -> Result<(), PipelineError> {
        if buffer.is_empty() {
            return Err(PipelineError::EmptyAudio);
        }
        self.replace_buffer(buffer);
        Ok(())
    }

    /// Replace the current buffer with its band-shaped stereo difference.
    pub fn apply_separation(&mut self, gains: BandGains) -> Result<(), PipelineError> {
        if !self.config.stages.separation {
            return Err(PipelineError::StageDisabled("separation"));
        }
        let buffer = self.buffer.as_ref().ok_or(PipelineError::NoAudioLoaded)?;

        let profile = BandGainProfile::new(
            self.config.cutoffs,
            gains,
            self.config.fft_size,
            buffer.sample_rate(),
        );
        log::info!(
            "Isolating: bins <{} x{:.2}, <{} x{:.2}, rest x{:.2}",
            profile.low_mid_cutoff(),
            gains.low,
            profile.mid_high_cutoff(),
            gains.mid,
            gains.high
        );

        let separated = separate(buffer, &mut self.transform, &profile, &self.progress)?;
        self.progress.finish_and_clear();
        self.replace_buffer(separated);
        Ok(())
    }

    /// Down-mix the current buffer to mono and write it as 16-bit WAV.
    ///
    /// Size and emptiness are checked before the file is created.
    pub fn export_current_buffer(&self, path: &Path) -> Result<(), PipelineError> {
        let buffer = self.buffer.as_ref().ok_or(PipelineError::NoAudioLoaded)?;

        let frames = buffer.frame_count();
        if frames > self.config.max_export_samples {
            return Err(PipelineError::BufferTooLarge {
                frames,
                limit: self.config.max_export_samples,
            });
        }
        if buffer.channel_count() == 0 || frames == 0 {
            return Err(PipelineError::EmptyAudio);
        }

        let mono = buffer.downmix_mono();
        wav::write_mono_wav(path, &mono, buffer.sample_rate())?;
        log::info!("Audio file has been exported to: {}", path.display());
        Ok(())
    }

    fn replace_buffer(&mut self, buffer: SampleBuffer) {
        self.buffer = Some(buffer);

        if self.config.stages.spectrogram {
            if let Some(buffer) = self.buffer.as_ref() {
                let blocks = analysis::analyze(
                    buffer,
                    &mut self.transform,
                    &mut self.spectrogram,
                    &self.progress,
                );
                self.progress.finish_and_clear();
                log::info!("Spectrogram: {} block(s) drawn", blocks);
            }
        }

        self.view.view_changed(self.spectrogram.image());
    }
}
