use std::path::Path;

use hound::{SampleFormat, WavReader};
use log::debug;
use ndarray::Array1;
use rubato::{Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction};

use crate::error::ExtractError;

/// Read a WAV file, mix it down to mono and scale it to [-1, 1].
///
/// # Returns
///
/// * The mono samples and the file's sample rate.
fn read_mono_wav(path: &Path) -> Result<(Vec<f64>, u32), ExtractError> {
    let audio_err = |source| ExtractError::Audio { path: path.to_path_buf(), source };

    let reader = WavReader::open(path).map_err(audio_err)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|s| s as f64))
            .collect::<Result<_, _>>()
            .map_err(audio_err)?,
        SampleFormat::Int => {
            let max_sample_value = 2.0_f64.powi(spec.bits_per_sample as i32 - 1) - 1.0;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f64 / max_sample_value))
                .collect::<Result<_, _>>()
                .map_err(audio_err)?
        }
    };

    // Average all channels into one
    let samples = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    };

    debug!(
        "Read {} mono samples at {} Hz from {} channel(s)",
        samples.len(),
        spec.sample_rate,
        channels
    );

    Ok((samples, spec.sample_rate))
}

/// Resample mono audio with a sinc interpolator.
///
/// The signal goes through as a single chunk, then the resampler is flushed
/// so its latency does not cut off the end. The leading delay is dropped and
/// the output holds `floor(len * target_rate / source_rate)` samples.
fn resample(samples: Vec<f64>, source_rate: u32, target_rate: u32) -> Result<Vec<f64>, ExtractError> {
    if source_rate == target_rate || samples.is_empty() {
        return Ok(samples);
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let resample_ratio = target_rate as f64 / source_rate as f64;
    let duration = samples.len();
    let expected_len = (duration as f64 * resample_ratio) as usize;
    let mut resampler = SincFixedIn::<f64>::new(resample_ratio, 2.0, params, duration, 1)
        .map_err(|e| ExtractError::Resample(e.to_string()))?;
    let delay = resampler.output_delay();

    let channel_data = vec![samples];
    let mut output = resampler
        .process(&channel_data, None)
        .map_err(|e| ExtractError::Resample(e.to_string()))?
        .swap_remove(0);

    // flush the samples still held back by the interpolator
    while output.len() < delay + expected_len {
        let tail = resampler
            .process_partial::<Vec<f64>>(None, None)
            .map_err(|e| ExtractError::Resample(e.to_string()))?
            .swap_remove(0);
        if tail.is_empty() {
            break;
        }
        output.extend(tail);
    }

    output.drain(..delay.min(output.len()));
    output.truncate(expected_len);

    debug!(
        "Resampled {} -> {} Hz: {} -> {} samples (delay {})",
        source_rate,
        target_rate,
        duration,
        output.len(),
        delay
    );

    Ok(output)
}

/// Load an audio file as a mono signal at the requested sample rate.
///
/// # Arguments
///
/// * `path` - Path of a WAV file (integer or float PCM, any channel count).
/// * `target_sample_rate` - Sample rate of the returned signal.
///
/// # Returns
///
/// * The mono signal, scaled to [-1, 1].
pub fn load_mono_audio<P: AsRef<Path>>(path: P, target_sample_rate: u32) -> Result<Array1<f32>, ExtractError> {
    let (samples, sample_rate) = read_mono_wav(path.as_ref())?;
    let resampled = resample(samples, sample_rate, target_sample_rate)?;

    Ok(resampled.into_iter().map(|s| s as f32).collect())
}
