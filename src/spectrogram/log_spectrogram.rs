use std::path::Path;

use log::debug;
use ndarray::{Array1, Array2};

use crate::config::SpectrogramConfig;
use crate::error::ExtractError;
use crate::preprocessing::framed_signal::frame_signal;
use crate::preprocessing::load_audio::load_mono_audio;

use super::filterbank::LogFilterbank;
use super::stft::MagnitudeStft;

/// Compute the log filtered spectrogram of a mono signal.
///
/// # Arguments
///
/// * `signal` - Mono samples at `config.sample_rate`.
/// * `config` - Framing, filterbank and compression parameters.
///
/// # Returns
///
/// * Time-major spectrogram of shape (n_frames, n_bands).
pub fn log_filtered_spectrogram(signal: &Array1<f32>, config: &SpectrogramConfig) -> Result<Array2<f32>, ExtractError> {
    config.validate()?;

    let frames = frame_signal(signal, config.frame_size, config.hop_size());
    let mut stft = MagnitudeStft::new(config.frame_size);
    let filterbank = LogFilterbank::new(stft.num_bins(), config)?;

    let magnitudes = stft.process(frames);
    let mut filtered = filterbank.apply(&magnitudes);
    filtered.mapv_inplace(|v| (config.log_mul * v + config.log_add).log10());

    debug!(
        "Spectrogram: {} frames x {} bands (hop {:.1} samples)",
        filtered.nrows(),
        filtered.ncols(),
        config.hop_size()
    );

    Ok(filtered)
}

/// Load an audio file and compute its log filtered spectrogram.
pub fn extract_spectrogram<P: AsRef<Path>>(audio_path: P, config: &SpectrogramConfig) -> Result<Array2<f32>, ExtractError> {
    let signal = load_mono_audio(audio_path, config.sample_rate)?;
    log_filtered_spectrogram(&signal, config)
}
