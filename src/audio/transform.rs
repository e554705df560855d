use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::error::PipelineError;

/// The frequency-domain image of one block: N complex bins stored as 2N
/// interleaved `(re, im)` floats.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralBlock {
    data: Vec<f32>,
}

impl SpectralBlock {
    pub fn zeroed(bins: usize) -> Self {
        Self {
            data: vec![0.0; bins * 2],
        }
    }

    /// Number of complex bins (N).
    pub fn bins(&self) -> usize {
        self.data.len() / 2
    }

    pub fn bin(&self, index: usize) -> Complex<f32> {
        Complex::new(self.data[index * 2], self.data[index * 2 + 1])
    }

    pub fn set_bin(&mut self, index: usize, value: Complex<f32>) {
        self.data[index * 2] = value.re;
        self.data[index * 2 + 1] = value.im;
    }

    /// Real component of a bin, the level proxy used by separation and the
    /// spectrogram.
    pub fn re(&self, index: usize) -> f32 {
        self.data[index * 2]
    }

    pub fn as_interleaved(&self) -> &[f32] {
        &self.data
    }

    /// True when every bin above Nyquist is the conjugate of its mirror, i.e.
    /// the block can be inverted to real samples.
    pub fn is_hermitian(&self, tolerance: f32) -> bool {
        let n = self.bins();
        (1..n / 2).all(|i| {
            let diff = self.bin(n - i) - self.bin(i).conj();
            diff.re.abs() <= tolerance && diff.im.abs() <= tolerance
        })
    }
}

/// Forward/inverse FFT over a fixed power-of-two block length.
///
/// Plans are built once at construction. `forward` and `inverse` reuse an
/// internal work buffer, so they take `&mut self`.
pub struct SpectralTransform {
    size: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    work: Vec<Complex<f32>>,
}

impl SpectralTransform {
    pub fn new(size: usize) -> Result<Self, PipelineError> {
        if size < 4 || !size.is_power_of_two() {
            return Err(PipelineError::InvalidFftSize(size));
        }

        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);

        Ok(Self {
            size,
            forward,
            inverse,
            work: vec![Complex::new(0.0, 0.0); size],
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn forward(&mut self, samples: &[f32]) -> SpectralBlock {
        debug_assert_eq!(samples.len(), self.size);

        for (slot, &s) in self.work.iter_mut().zip(samples) {
            *slot = Complex::new(s, 0.0);
        }
        self.forward.process(&mut self.work);

        let mut block = SpectralBlock::zeroed(self.size);
        for (i, &c) in self.work.iter().enumerate() {
            block.set_bin(i, c);
        }
        block
    }

    /// Inverse transform, scaled by 1/N so that `inverse(forward(x)) == x`.
    /// Imaginary residue is discarded; callers restore Hermitian symmetry
    /// first.
    pub fn inverse(&mut self, block: &SpectralBlock) -> Vec<f32> {
        debug_assert_eq!(block.bins(), self.size);

        for (i, slot) in self.work.iter_mut().enumerate() {
            *slot = block.bin(i);
        }
        self.inverse.process(&mut self.work);

        let scale = 1.0 / self.size as f32;
        self.work.iter().map(|c| c.re * scale).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn rejects_non_power_of_two() {
        assert!(matches!(
            SpectralTransform::new(1000),
            Err(PipelineError::InvalidFftSize(1000))
        ));
        assert!(SpectralTransform::new(2).is_err());
        assert!(SpectralTransform::new(0).is_err());
        assert!(SpectralTransform::new(4096).is_ok());
    }

    #[test]
    fn round_trip_restores_samples() {
        let n = 4096;
        let mut transform = SpectralTransform::new(n).unwrap();
        // Deterministic pseudo-noise in [-1, 1]
        let mut state = 0x1234_5678u32;
        let samples: Vec<f32> = (0..n)
            .map(|_| {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (state >> 8) as f32 / (1u32 << 23) as f32 - 1.0
            })
            .collect();

        let block = transform.forward(&samples);
        let restored = transform.inverse(&block);

        let max_err = samples
            .iter()
            .zip(&restored)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f32, f32::max);
        assert!(max_err < 1e-4, "max error {max_err}");
    }

    #[test]
    fn forward_of_real_input_is_hermitian() {
        let n = 256;
        let mut transform = SpectralTransform::new(n).unwrap();
        let samples: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * 5.0 * i as f32 / n as f32).sin() + 0.25)
            .collect();
        let block = transform.forward(&samples);
        assert_eq!(block.bins(), n);
        assert_eq!(block.as_interleaved().len(), 2 * n);
        assert!(block.is_hermitian(1e-3));
    }

    #[test]
    fn cosine_lands_in_its_bin() {
        let n = 64;
        let k = 3;
        let mut transform = SpectralTransform::new(n).unwrap();
        let samples: Vec<f32> = (0..n)
            .map(|i| (2.0 * PI * k as f32 * i as f32 / n as f32).cos())
            .collect();
        let block = transform.forward(&samples);

        assert!((block.re(k) - n as f32 / 2.0).abs() < 1e-3);
        assert!((block.re(n - k) - n as f32 / 2.0).abs() < 1e-3);
        assert!(block.re(k + 1).abs() < 1e-3);
    }
}
