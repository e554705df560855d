use crate::audio::transform::SpectralBlock;

pub const SPECTROGRAM_HEIGHT: usize = 300;

pub type Rgb = [u8; 3];

const BLANK: Rgb = [0, 0, 0];

/// Fixed-height scrolling image, one column per analysed block.
///
/// New columns enter at the right edge; the leftmost column is discarded.
#[derive(Clone, Debug)]
pub struct SpectrogramImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    columns_written: usize,
}

impl SpectrogramImage {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![BLANK; width * height],
            columns_written: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total columns pushed since creation, including ones already scrolled out.
    pub fn columns_written(&self) -> usize {
        self.columns_written
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.pixels[y * self.width + x]
    }

    pub fn column(&self, x: usize) -> Vec<Rgb> {
        (0..self.height).map(|y| self.pixel(x, y)).collect()
    }

    /// Row-major packed RGB8, top row first.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    /// Shift one column left and write `column` (top to bottom) at the right
    /// edge.
    pub fn push_column(&mut self, column: &[Rgb]) {
        debug_assert_eq!(column.len(), self.height);
        self.columns_written += 1;
        if self.width == 0 {
            return;
        }

        let width = self.width;
        for (row, &color) in self.pixels.chunks_exact_mut(width).zip(column) {
            row.copy_within(1.., 0);
            row[width - 1] = color;
        }
    }
}

/// Turns forward-transformed blocks into spectrogram columns.
pub struct SpectrogramAccumulator {
    view_width: usize,
    image: Option<SpectrogramImage>,
    column: Vec<Rgb>,
}

impl SpectrogramAccumulator {
    pub fn new(view_width: usize) -> Self {
        Self {
            view_width,
            image: None,
            column: vec![BLANK; SPECTROGRAM_HEIGHT],
        }
    }

    pub fn image(&self) -> Option<&SpectrogramImage> {
        self.image.as_ref()
    }

    pub fn view_width(&self) -> usize {
        self.view_width
    }

    /// Append one block as the newest column.
    ///
    /// Levels are the real components of bins `[0, N/2)` normalised by their
    /// maximum. A block whose maximum is not positive renders as a blank
    /// column.
    pub fn accumulate(&mut self, block: &SpectralBlock) {
        let height = SPECTROGRAM_HEIGHT;
        let view_width = self.view_width;
        let image = self
            .image
            .get_or_insert_with(|| SpectrogramImage::new(view_width, height));

        let half = block.bins() / 2;
        let max_level = (0..half).map(|i| block.re(i)).fold(f32::NEG_INFINITY, f32::max);

        if max_level.is_nan() || max_level <= 0.0 {
            self.column.fill(BLANK);
        } else {
            for y in 0..height {
                let bin = y * half / height;
                let level = block.re(bin) / max_level;
                // Low bins at the bottom
                self.column[height - 1 - y] = level_color(level);
            }
        }

        image.push_column(&self.column);
    }
}

/// hue = 1 - level, saturation = 1, value = level.
pub fn level_color(level: f32) -> Rgb {
    hsv_to_rgb(1.0 - level, 1.0, level)
}

/// HSV to RGB8. Hue wraps into [0, 1); saturation and value are clamped.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb {
    let h = (hue - hue.floor()) * 6.0;
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);

    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [to_byte(r), to_byte(g), to_byte(b)]
}

fn to_byte(x: f32) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustfft::num_complex::Complex;

    fn block_with(bins: usize, levels: &[(usize, f32)]) -> SpectralBlock {
        let mut block = SpectralBlock::zeroed(bins);
        for &(i, re) in levels {
            block.set_bin(i, Complex::new(re, 0.0));
        }
        block
    }

    #[test]
    fn hsv_endpoints() {
        assert_eq!(level_color(1.0), [255, 0, 0]);
        assert_eq!(level_color(0.0), [0, 0, 0]);
        // hue 0.5 is cyan
        assert_eq!(level_color(0.5), [0, 128, 128]);
        assert_eq!(hsv_to_rgb(1.0 / 3.0, 1.0, 1.0), [0, 255, 0]);
        assert_eq!(hsv_to_rgb(2.0 / 3.0, 1.0, 1.0), [0, 0, 255]);
    }

    #[test]
    fn negative_levels_render_black() {
        assert_eq!(level_color(-0.5), [0, 0, 0]);
    }

    #[test]
    fn image_is_created_lazily() {
        let mut acc = SpectrogramAccumulator::new(16);
        assert!(acc.image().is_none());
        acc.accumulate(&block_with(64, &[(3, 1.0)]));
        let image = acc.image().unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), SPECTROGRAM_HEIGHT);
    }

    #[test]
    fn silent_block_appends_blank_column() {
        let mut acc = SpectrogramAccumulator::new(4);
        acc.accumulate(&block_with(64, &[(0, 1.0)]));
        acc.accumulate(&block_with(64, &[]));

        let image = acc.image().unwrap();
        assert!(image.column(3).iter().all(|&p| p == [0, 0, 0]));
        assert!(image.column(2).iter().any(|&p| p != [0, 0, 0]));
    }

    #[test]
    fn peak_bin_is_bright_red_at_its_row() {
        let mut acc = SpectrogramAccumulator::new(8);
        // N = 600, so N/2 = 300 bins map one-to-one onto rows
        acc.accumulate(&block_with(600, &[(42, 2.0), (10, 1.0)]));

        let image = acc.image().unwrap();
        let x = image.width() - 1;
        assert_eq!(image.pixel(x, SPECTROGRAM_HEIGHT - 1 - 42), [255, 0, 0]);
        assert_eq!(image.pixel(x, SPECTROGRAM_HEIGHT - 1 - 10), level_color(0.5));
        assert_eq!(image.pixel(x, SPECTROGRAM_HEIGHT - 1 - 11), [0, 0, 0]);
    }

    #[test]
    fn width_is_bounded_and_fifo() {
        let view_width = 5;
        let mut acc = SpectrogramAccumulator::new(view_width);
        // Each block peaks at a different bin, so each column is distinct.
        for k in 0..12 {
            acc.accumulate(&block_with(600, &[(k, 1.0)]));
        }

        let image = acc.image().unwrap();
        assert_eq!(image.width(), view_width);
        assert_eq!(image.columns_written(), 12);
        for x in 0..view_width {
            let k = 12 - view_width + x;
            assert_eq!(image.pixel(x, SPECTROGRAM_HEIGHT - 1 - k), [255, 0, 0]);
        }
    }
}
