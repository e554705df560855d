pub const DEFAULT_LOW_CUTOFF_HZ: f32 = 250.0;
pub const DEFAULT_HIGH_CUTOFF_HZ: f32 = 5000.0;

/// Crossover frequencies between the low/mid and mid/high bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cutoffs {
    pub low_hz: f32,
    pub high_hz: f32,
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self {
            low_hz: DEFAULT_LOW_CUTOFF_HZ,
            high_hz: DEFAULT_HIGH_CUTOFF_HZ,
        }
    }
}

/// Per-band gain knobs. Nominally in [0, 1]; values outside are passed
/// through unclamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandGains {
    pub low: f32,
    pub mid: f32,
    pub high: f32,
}

impl BandGains {
    pub const UNITY: BandGains = BandGains {
        low: 1.0,
        mid: 1.0,
        high: 1.0,
    };
}

impl Default for BandGains {
    fn default() -> Self {
        Self {
            low: 1.0,
            mid: 0.0,
            high: 0.0,
        }
    }
}

/// Maps an FFT bin index to one of three gains.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandGainProfile {
    low_mid_cutoff: usize,
    mid_high_cutoff: usize,
    gains: BandGains,
}

impl BandGainProfile {
    pub fn new(cutoffs: Cutoffs, gains: BandGains, fft_size: usize, sample_rate: u32) -> Self {
        Self {
            low_mid_cutoff: cutoff_bin(cutoffs.low_hz, fft_size, sample_rate),
            mid_high_cutoff: cutoff_bin(cutoffs.high_hz, fft_size, sample_rate),
            gains,
        }
    }

    pub fn low_mid_cutoff(&self) -> usize {
        self.low_mid_cutoff
    }

    pub fn mid_high_cutoff(&self) -> usize {
        self.mid_high_cutoff
    }

    pub fn gains(&self) -> BandGains {
        self.gains
    }

    pub fn gain_for_bin(&self, bin: usize) -> f32 {
        if bin < self.low_mid_cutoff {
            self.gains.low
        } else if bin < self.mid_high_cutoff {
            self.gains.mid
        } else {
            self.gains.high
        }
    }
}

/// `floor(hz * N / sample_rate)`, saturating at zero for negative input.
fn cutoff_bin(hz: f32, fft_size: usize, sample_rate: u32) -> usize {
    if sample_rate == 0 {
        return 0;
    }
    let bin = (hz as f64 * fft_size as f64 / sample_rate as f64).floor();
    if bin.is_finite() && bin > 0.0 {
        bin as usize
    } else {
        0
    }
}
