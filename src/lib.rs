//! Block-wise spectral analysis and stereo vocal isolation.
//!
//! A decoded buffer is cut into disjoint FFT blocks. Each block feeds a
//! scrolling spectrogram and, on request, a stereo-difference separator whose
//! output is band-shaped, inverted and written back as a new buffer.

pub mod audio;
pub mod encode;
pub mod error;
pub mod pipeline;
pub mod render;
pub mod session;

pub use audio::bands::{BandGainProfile, BandGains, Cutoffs};
pub use audio::buffer::SampleBuffer;
pub use error::PipelineError;
pub use pipeline::{Pipeline, PipelineConfig, Stages};
pub use render::spectrogram::SpectrogramImage;
pub use session::{Command, PathChoice, PickMode, Session};
