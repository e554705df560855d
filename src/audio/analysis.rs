use indicatif::ProgressBar;

use super::buffer::SampleBuffer;
use super::framer::BlockFramer;
use super::transform::SpectralTransform;
use crate::render::spectrogram::SpectrogramAccumulator;

/// Spectrogram pass: every channel, every full block, in order.
///
/// Channels are walked one after another, so a stereo buffer scrolls the
/// left channel's blocks through the image before the right channel's.
/// Returns the number of blocks accumulated.
pub fn analyze(
    buffer: &SampleBuffer,
    transform: &mut SpectralTransform,
    spectrogram: &mut SpectrogramAccumulator,
    progress: &ProgressBar,
) -> usize {
    let fft_size = transform.size();
    let total: usize = buffer
        .channels()
        .map(|samples| BlockFramer::new(samples, fft_size).block_count())
        .sum();

    log::debug!(
        "Spectrogram pass: {} block(s) across {} channel(s)",
        total,
        buffer.channel_count()
    );

    progress.reset();
    progress.set_length(total as u64);

    for samples in buffer.channels() {
        for block in BlockFramer::new(samples, fft_size) {
            let spectrum = transform.forward(block);
            spectrogram.accumulate(&spectrum);
            progress.inc(1);
        }
    }

    total
}
