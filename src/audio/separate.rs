use indicatif::ProgressBar;
use rustfft::num_complex::Complex;

use super::bands::BandGainProfile;
use super::buffer::SampleBuffer;
use super::framer::BlockFramer;
use super::transform::{SpectralBlock, SpectralTransform};
use crate::error::PipelineError;

/// Build the edited spectrum for one block from the left/right spectra.
///
/// For every bin in `[0, N/2)` the center estimate is `re(left) - re(right)`,
/// scaled by the band gain. Only real components are used. Each edited bin
/// `i >= 1` is mirrored to `N - i` so the block inverts to real samples; the
/// Nyquist bin stays at zero.
pub fn center_block(
    left: &SpectralBlock,
    right: &SpectralBlock,
    profile: &BandGainProfile,
) -> SpectralBlock {
    let n = left.bins();
    debug_assert_eq!(n, right.bins());

    let mut block = SpectralBlock::zeroed(n);
    for i in 0..n / 2 {
        let center = (left.re(i) - right.re(i)) * profile.gain_for_bin(i);
        block.set_bin(i, Complex::new(center, 0.0));
        if i > 0 {
            // Conjugate of a purely real bin is itself
            block.set_bin(n - i, block.bin(i));
        }
    }
    block
}

/// Stereo-difference vocal isolation over the whole buffer.
///
/// Reads channels 0 and 1, writes the identical processed block to every
/// output channel. The result has `block_count * N` frames; the trailing
/// remainder is not carried over. Fails without touching anything when fewer
/// than two channels are present.
pub fn separate(
    buffer: &SampleBuffer,
    transform: &mut SpectralTransform,
    profile: &BandGainProfile,
    progress: &ProgressBar,
) -> Result<SampleBuffer, PipelineError> {
    let channel_count = buffer.channel_count();
    if channel_count < 2 {
        return Err(PipelineError::InsufficientChannels {
            found: channel_count,
        });
    }

    let fft_size = transform.size();
    let left = BlockFramer::new(buffer.channel(0), fft_size);
    let right = BlockFramer::new(buffer.channel(1), fft_size);
    let block_count = left.block_count();

    log::debug!(
        "Separating {} block(s) of {} samples, dropping {} trailing sample(s)",
        block_count,
        fft_size,
        left.remainder()
    );

    progress.reset();
    progress.set_length(block_count as u64);

    let mut processed = Vec::with_capacity(block_count * fft_size);
    for (left_block, right_block) in left.blocks().zip(right.blocks()) {
        let left_spectrum = transform.forward(left_block);
        let right_spectrum = transform.forward(right_block);
        let center = center_block(&left_spectrum, &right_spectrum, profile);
        processed.extend(transform.inverse(&center));
        progress.inc(1);
    }

    let channels = vec![processed; channel_count];
    Ok(SampleBuffer::new(channels, buffer.sample_rate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::bands::{BandGains, Cutoffs};
    use std::f32::consts::PI;

    const N: usize = 1024;
    const RATE: u32 = 44100;

    fn cosine(bin: usize, frames: usize, amplitude: f32) -> Vec<f32> {
        (0..frames)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / N as f32).cos())
            .collect()
    }

    fn profile(gains: BandGains) -> BandGainProfile {
        BandGainProfile::new(Cutoffs::default(), gains, N, RATE)
    }

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
    }

    #[test]
    fn mono_input_is_rejected() {
        let buffer = SampleBuffer::new(vec![vec![0.1; N * 2]], RATE);
        let before = buffer.clone();
        let mut transform = SpectralTransform::new(N).unwrap();

        let result = separate(
            &buffer,
            &mut transform,
            &profile(BandGains::UNITY),
            &ProgressBar::hidden(),
        );
        assert!(matches!(
            result,
            Err(PipelineError::InsufficientChannels { found: 1 })
        ));
        assert_eq!(buffer, before);
    }

    #[test]
    fn identical_channels_cancel() {
        let signal: Vec<f32> = (0..N * 3)
            .map(|i| 0.3 * (i as f32 * 0.013).sin() + 0.2 * (i as f32 * 0.41).cos())
            .collect();
        let buffer = SampleBuffer::new(vec![signal.clone(), signal], RATE);
        let mut transform = SpectralTransform::new(N).unwrap();

        let out = separate(
            &buffer,
            &mut transform,
            &profile(BandGains::UNITY),
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(out.frame_count(), N * 3);
        assert!(peak(out.channel(0)) < 1e-5);
        assert!(peak(out.channel(1)) < 1e-5);
    }

    #[test]
    fn short_buffer_yields_empty_output() {
        let buffer = SampleBuffer::new(vec![vec![0.5; N - 1], vec![0.0; N - 1]], RATE);
        let mut transform = SpectralTransform::new(N).unwrap();

        let out = separate(
            &buffer,
            &mut transform,
            &profile(BandGains::UNITY),
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(out.channel_count(), 2);
        assert_eq!(out.frame_count(), 0);
    }

    #[test]
    fn remainder_is_dropped_and_channels_match() {
        let left = cosine(40, N * 2 + 100, 0.5);
        let right = vec![0.0; N * 2 + 100];
        let buffer = SampleBuffer::new(vec![left, right], RATE);
        let mut transform = SpectralTransform::new(N).unwrap();

        let out = separate(
            &buffer,
            &mut transform,
            &profile(BandGains::UNITY),
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(out.frame_count(), N * 2);
        assert_eq!(out.channel(0), out.channel(1));
    }

    #[test]
    fn band_gain_controls_single_bin() {
        // Bin 100 at N=1024, 44.1 kHz is ~4.3 kHz: the mid band.
        let bin = 100;
        let left = cosine(bin, N, 0.5);
        let right = vec![0.0; N];
        let buffer = SampleBuffer::new(vec![left.clone(), right], RATE);
        let mut transform = SpectralTransform::new(N).unwrap();

        let muted = separate(
            &buffer,
            &mut transform,
            &profile(BandGains {
                low: 1.0,
                mid: 0.0,
                high: 1.0,
            }),
            &ProgressBar::hidden(),
        )
        .unwrap();
        assert!(peak(muted.channel(0)) < 1e-4);

        let kept = separate(
            &buffer,
            &mut transform,
            &profile(BandGains {
                low: 0.0,
                mid: 1.0,
                high: 0.0,
            }),
            &ProgressBar::hidden(),
        )
        .unwrap();
        let max_err = kept
            .channel(0)
            .iter()
            .zip(&left)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-4, "max error {max_err}");
    }

    #[test]
    fn edited_block_is_mirrored() {
        let mut transform = SpectralTransform::new(N).unwrap();
        let left = transform.forward(&cosine(7, N, 0.4));
        let right: Vec<f32> = (0..N).map(|i| ((i * 31 % 17) as f32 - 8.0) / 10.0).collect();
        let right = transform.forward(&right);
        let gains = BandGains {
            low: 0.3,
            mid: 0.7,
            high: 0.2,
        };

        let block = center_block(&left, &right, &profile(gains));
        for i in 1..N / 2 {
            assert_eq!(block.bin(N - i), block.bin(i));
        }
        assert_eq!(block.bin(N / 2), Complex::new(0.0, 0.0));
        assert!(block.is_hermitian(0.0));
    }
}
