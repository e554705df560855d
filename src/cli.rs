use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vocalis", about = "Spectrogram and stereo vocal isolation for audio files")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG)
    pub input: PathBuf,

    /// Export the resulting buffer as 16-bit mono WAV
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the spectrogram image to this PNG after every change
    #[arg(short, long)]
    pub spectrogram: Option<PathBuf>,

    /// Run stereo vocal isolation after loading
    #[arg(short, long)]
    pub isolate: bool,

    /// Low band gain (below the low cutoff)
    #[arg(long, default_value_t = 1.0)]
    pub low: f32,

    /// Mid band gain
    #[arg(long, default_value_t = 0.0)]
    pub mid: f32,

    /// High band gain (above the high cutoff)
    #[arg(long, default_value_t = 0.0)]
    pub high: f32,

    /// FFT block size (power of two)
    #[arg(long, default_value_t = 4096)]
    pub fft_size: usize,

    /// Spectrogram width in columns
    #[arg(long, default_value_t = 800)]
    pub view_width: usize,

    /// Config file (defaults to vocalis.toml or the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,
}
