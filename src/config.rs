//! Parameters for spectrogram extraction and annotation.

use crate::constants::{
    AUDIO_SAMPLE_RATE, BANDS_PER_OCTAVE, DEFAULT_FPS, FILTERBANK_FMAX, FILTERBANK_FMIN,
    FILTERBANK_FREF, FRAME_SIZE,
};
use crate::error::ExtractError;

/// Parameters of the log filtered spectrogram.
#[derive(Debug, Clone)]
pub struct SpectrogramConfig {
    /// Sample rate the audio is resampled to before framing (default: 22050)
    pub sample_rate: u32,

    /// Samples per frame, also the FFT size (default: 2048)
    pub frame_size: usize,

    /// Frames per second; the hop size is `sample_rate / fps` (default: 20)
    pub fps: f64,

    /// Filterbank bands per octave (default: 16)
    pub bands_per_octave: usize,

    /// Lowest filter frequency in Hz (default: 30)
    pub fmin: f32,

    /// Highest filter frequency in Hz (default: 6000)
    pub fmax: f32,

    /// Tuning reference the band frequencies are aligned to (default: 440)
    pub fref: f32,

    /// Normalise each triangular filter to unit area (default: true)
    pub norm_filters: bool,

    /// Drop filters that map to the same FFT bins (default: true)
    pub unique_filters: bool,

    /// Log compression computes `log10(mul * x + add)`
    pub log_mul: f32,
    pub log_add: f32,
}

impl Default for SpectrogramConfig {
    fn default() -> Self {
        Self {
            sample_rate: AUDIO_SAMPLE_RATE,
            frame_size: FRAME_SIZE,
            fps: DEFAULT_FPS,
            bands_per_octave: BANDS_PER_OCTAVE,
            fmin: FILTERBANK_FMIN,
            fmax: FILTERBANK_FMAX,
            fref: FILTERBANK_FREF,
            norm_filters: true,
            unique_filters: true,
            log_mul: 1.0,
            log_add: 1.0,
        }
    }
}

impl SpectrogramConfig {
    /// Hop size in (fractional) samples.
    pub fn hop_size(&self) -> f64 {
        self.sample_rate as f64 / self.fps
    }

    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.sample_rate == 0 {
            return Err(ExtractError::InvalidParameter("sample_rate must be > 0".to_string()));
        }
        // the filterbank maps frequencies between two neighbouring FFT bins
        if self.frame_size < 4 {
            return Err(ExtractError::InvalidParameter(format!(
                "frame_size must be at least 4, got {}",
                self.frame_size
            )));
        }
        if !(self.fps > 0.0) {
            return Err(ExtractError::InvalidParameter(format!("fps must be > 0, got {}", self.fps)));
        }
        if self.bands_per_octave == 0 {
            return Err(ExtractError::InvalidParameter("bands_per_octave must be > 0".to_string()));
        }
        if !(self.fmin > 0.0 && self.fmin < self.fmax) {
            return Err(ExtractError::InvalidParameter(format!(
                "need 0 < fmin < fmax, got fmin={} fmax={}",
                self.fmin, self.fmax
            )));
        }
        Ok(())
    }
}

/// Settings of [`crate::extractor::AnnotationExtractor`].
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Annotation frame rate; overrides `spectrogram.fps` so both stay aligned.
    pub fps: f64,

    /// Also return the piano roll and the sorted note list.
    pub with_piano_roll: bool,

    /// Log a summary of every computed array.
    pub show: bool,

    pub spectrogram: SpectrogramConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            with_piano_roll: false,
            show: false,
            spectrogram: SpectrogramConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Seconds per frame.
    pub fn dt(&self) -> f64 {
        1.0 / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hop_size() {
        let config = SpectrogramConfig::default();
        assert!((config.hop_size() - 1102.5).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_range() {
        let config = SpectrogramConfig {
            fmin: 8000.0,
            ..SpectrogramConfig::default()
        };
        assert!(matches!(config.validate(), Err(ExtractError::InvalidParameter(_))));

        let config = SpectrogramConfig {
            fps: 0.0,
            ..SpectrogramConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_needs_two_fft_bins() {
        for frame_size in [2, 3] {
            let config = SpectrogramConfig {
                frame_size,
                ..SpectrogramConfig::default()
            };
            assert!(matches!(config.validate(), Err(ExtractError::InvalidParameter(_))));
        }
        let config = SpectrogramConfig {
            frame_size: 4,
            ..SpectrogramConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
