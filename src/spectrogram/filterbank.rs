use log::debug;
use ndarray::{s, Array1, Array2};

use crate::config::SpectrogramConfig;
use crate::error::ExtractError;
use crate::helpers::ported::numpy::{linspace_exclusive, search_sorted_left, search_sorted_right, unique};

/// Center frequencies of the FFT bins, Nyquist excluded.
pub fn fft_frequencies(num_bins: usize, sample_rate: u32) -> Vec<f32> {
    let bin_width = sample_rate as f32 / (2 * num_bins) as f32;
    (0..num_bins).map(|k| k as f32 * bin_width).collect()
}

/// Logarithmically spaced frequencies aligned to `fref`.
///
/// # Arguments
///
/// * `bands_per_octave` - Number of frequencies per octave.
/// * `fmin` - Lowest frequency to return.
/// * `fmax` - Highest frequency to return.
/// * `fref` - Tuning frequency, always on the grid if it lies in range.
///
/// # Returns
///
/// * Ascending frequencies within `[fmin, fmax]`.
pub fn log_frequencies(bands_per_octave: usize, fmin: f32, fmax: f32, fref: f32) -> Vec<f32> {
    let bpo = bands_per_octave as f32;
    let left = ((fmin / fref).log2() * bpo).floor() as i32;
    let right = ((fmax / fref).log2() * bpo).ceil() as i32;

    let frequencies: Vec<f32> = (left..right).map(|k| fref * 2.0_f32.powf(k as f32 / bpo)).collect();

    let lo = search_sorted_left(&frequencies, fmin);
    let frequencies = &frequencies[lo..];
    let hi = search_sorted_right(frequencies, fmax);
    frequencies[..hi].to_vec()
}

/// Map frequencies to the index of the closest FFT bin.
pub fn frequencies_to_bins(frequencies: &[f32], bin_frequencies: &[f32], unique_bins: bool) -> Vec<usize> {
    let last = bin_frequencies.len().saturating_sub(1).max(1);

    let bins: Vec<usize> = frequencies
        .iter()
        .map(|&f| {
            let idx = search_sorted_left(bin_frequencies, f).clamp(1, last);
            let left = bin_frequencies[idx - 1];
            let right = bin_frequencies[idx];
            if f - left < right - f {
                idx - 1
            } else {
                idx
            }
        })
        .collect();

    if unique_bins {
        unique(&bins)
    } else {
        bins
    }
}

/// One rising/falling triangle over `start..stop` peaking at `center`.
fn triangular_filter(start: usize, center: usize, stop: usize, norm: bool) -> Vec<f32> {
    let center = center - start;
    let stop = stop - start;

    let mut data = linspace_exclusive(0.0, 1.0, center);
    data.extend(linspace_exclusive(1.0, 0.0, stop - center));

    if norm {
        let sum: f32 = data.iter().sum();
        if sum > 0.0 {
            data.iter_mut().for_each(|v| *v /= sum);
        }
    }

    data
}

/// Triangular filterbank on a logarithmic frequency scale.
#[derive(Debug, Clone)]
pub struct LogFilterbank {
    /// Filter weights, shape (n_fft_bins, n_bands).
    pub weights: Array2<f32>,
    pub center_frequencies: Vec<f32>,
}

impl LogFilterbank {
    pub fn new(num_fft_bins: usize, config: &SpectrogramConfig) -> Result<Self, ExtractError> {
        if num_fft_bins < 2 {
            return Err(ExtractError::InvalidParameter(format!(
                "filterbank needs at least 2 FFT bins, got {}",
                num_fft_bins
            )));
        }

        let bin_frequencies = fft_frequencies(num_fft_bins, config.sample_rate);
        let frequencies = log_frequencies(config.bands_per_octave, config.fmin, config.fmax, config.fref);
        let bins = frequencies_to_bins(&frequencies, &bin_frequencies, config.unique_filters);

        if bins.len() < 3 {
            return Err(ExtractError::InvalidParameter(format!(
                "filterbank needs at least 3 distinct bins, got {}",
                bins.len()
            )));
        }

        let n_bands = bins.len() - 2;
        let mut weights = Array2::zeros((num_fft_bins, n_bands));
        let mut center_frequencies = Vec::with_capacity(n_bands);

        for (band, triple) in bins.windows(3).enumerate() {
            let (start, mut center, mut stop) = (triple[0], triple[1], triple[2]);
            // too narrow for a triangle, use a single bin
            if stop - start < 2 {
                center = start;
                stop = start + 1;
            }

            let filter = Array1::from(triangular_filter(start, center, stop, config.norm_filters));
            weights.slice_mut(s![start..stop, band]).assign(&filter);
            center_frequencies.push(bin_frequencies[center]);
        }

        debug!(
            "Built log filterbank: {} bands over {} FFT bins ({:.1}-{:.1} Hz)",
            n_bands,
            num_fft_bins,
            center_frequencies.first().copied().unwrap_or_default(),
            center_frequencies.last().copied().unwrap_or_default()
        );

        Ok(Self { weights, center_frequencies })
    }

    pub fn num_bands(&self) -> usize {
        self.weights.ncols()
    }

    /// Apply the filterbank to a time-major magnitude spectrogram.
    pub fn apply(&self, spectrogram: &Array2<f32>) -> Array2<f32> {
        spectrogram.dot(&self.weights)
    }
}
