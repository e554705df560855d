pub mod spectrogram;
pub mod view;
