use std::path::PathBuf;

/// Errors raised by the analysis and separation pipeline.
///
/// Every variant is terminal for the operation that produced it. None of them
/// leave the pipeline unusable.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("could not read audio file {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("audio buffer is empty")]
    EmptyAudio,

    #[error("stereo audio is required for vocal isolation (found {found} channel(s))")]
    InsufficientChannels { found: usize },

    #[error("audio buffer is too large for export ({frames} samples, limit {limit})")]
    BufferTooLarge { frames: usize, limit: usize },

    #[error("couldn't create the WAV writer for {}: {source}", .path.display())]
    WriterCreationFailed {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to write audio data to {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("no audio has been loaded")]
    NoAudioLoaded,

    #[error("the {0} stage is disabled in this configuration")]
    StageDisabled(&'static str),

    #[error("FFT size must be a power of two of at least 4, got {0}")]
    InvalidFftSize(usize),
}

impl PipelineError {
    pub(crate) fn unreadable<E>(path: &std::path::Path, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        PipelineError::UnreadableFile {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
