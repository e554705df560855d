use std::slice::ChunksExact;

/// Splits one channel into disjoint, non-overlapping blocks of `block_size`
/// samples.
///
/// The trailing `len % block_size` samples never form a block and are not
/// processed. There is no padding and no overlap.
#[derive(Clone, Copy, Debug)]
pub struct BlockFramer<'a> {
    samples: &'a [f32],
    block_size: usize,
}

impl<'a> BlockFramer<'a> {
    pub fn new(samples: &'a [f32], block_size: usize) -> Self {
        debug_assert!(block_size > 0, "block size must be non-zero");
        Self {
            samples,
            block_size,
        }
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn block_count(&self) -> usize {
        self.samples.len() / self.block_size
    }

    /// Samples dropped at the end of the channel.
    pub fn remainder(&self) -> usize {
        self.samples.len() % self.block_size
    }

    /// A fresh pass over the blocks, starting at offset 0.
    pub fn blocks(&self) -> ChunksExact<'a, f32> {
        self.samples.chunks_exact(self.block_size)
    }
}

impl<'a> IntoIterator for BlockFramer<'a> {
    type Item = &'a [f32];
    type IntoIter = ChunksExact<'a, f32>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks()
    }
}
