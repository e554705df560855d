/// Decoded multichannel PCM, stored planar.
///
/// Every channel holds the same number of frames. The pipeline never edits a
/// buffer in place; reprocessing produces a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        debug_assert!(
            channels.windows(2).all(|w| w[0].len() == w[1].len()),
            "all channels must have the same frame count"
        );
        Self {
            channels,
            sample_rate,
        }
    }

    /// Split interleaved samples into planar channels. A trailing partial
    /// frame is dropped.
    pub fn from_interleaved(samples: &[f32], channel_count: usize, sample_rate: u32) -> Self {
        let channel_count = channel_count.max(1);
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in samples.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }
        Self::new(channels, sample_rate)
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frame_count() == 0
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> impl Iterator<Item = &[f32]> {
        self.channels.iter().map(Vec::as_slice)
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frame_count() as f32 / self.sample_rate as f32
    }

    /// Average all channels into one.
    pub fn downmix_mono(&self) -> Vec<f32> {
        match self.channels.len() {
            0 => Vec::new(),
            1 => self.channels[0].clone(),
            count => (0..self.frame_count())
                .map(|i| self.channels.iter().map(|c| c[i]).sum::<f32>() / count as f32)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deinterleaves_stereo() {
        let buffer = SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2, 0.3], 2, 44100);
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.frame_count(), 2);
        assert_eq!(buffer.channel(0), &[0.1, 0.2]);
        assert_eq!(buffer.channel(1), &[-0.1, -0.2]);
    }

    #[test]
    fn downmix_averages_channels() {
        let buffer = SampleBuffer::new(vec![vec![1.0, 0.5], vec![0.0, -0.5]], 48000);
        assert_eq!(buffer.downmix_mono(), vec![0.5, 0.0]);
    }

    #[test]
    fn empty_buffer_reports_zero_frames() {
        let buffer = SampleBuffer::new(Vec::new(), 48000);
        assert!(buffer.is_empty());
        assert_eq!(buffer.frame_count(), 0);
        assert!(buffer.downmix_mono().is_empty());
    }
}
