use std::path::Path;

use crate::error::PipelineError;

/// Ten minutes at 48 kHz.
pub const DEFAULT_MAX_EXPORT_SAMPLES: usize = 48_000 * 60 * 10;

pub const EXPORT_BIT_DEPTH: u16 = 16;

/// Write mono float samples as a 16-bit PCM WAV file.
pub fn write_mono_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<(), PipelineError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: EXPORT_BIT_DEPTH,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|source| PipelineError::WriterCreationFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let write_failed = |source: hound::Error| PipelineError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    for &sample in samples {
        writer.write_sample(to_pcm16(sample)).map_err(write_failed)?;
    }
    writer.finalize().map_err(write_failed)?;

    log::debug!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

fn to_pcm16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32).round() as i16
}
