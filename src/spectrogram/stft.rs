use std::sync::Arc;

use ndarray::{Array1, Array2};
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::helpers::ported::numpy::hanning;
use crate::preprocessing::framed_signal::FramedSignal;

/// Magnitude short-time Fourier transform with a Hann window.
pub struct MagnitudeStft {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
}

impl MagnitudeStft {
    pub fn new(frame_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            window: hanning(frame_size),
            fft: planner.plan_fft_forward(frame_size),
            buffer: vec![Complex::new(0.0, 0.0); frame_size],
        }
    }

    /// Number of frequency bins per frame; the Nyquist bin is dropped.
    pub fn num_bins(&self) -> usize {
        self.window.len() / 2
    }

    /// Magnitude spectrum of a single frame.
    pub fn frame_magnitudes(&mut self, frame: &Array1<f32>) -> Vec<f32> {
        for ((slot, &sample), &w) in self.buffer.iter_mut().zip(frame.iter()).zip(self.window.iter()) {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut self.buffer);

        self.buffer[..self.num_bins()].iter().map(|c| c.norm()).collect()
    }

    /// Magnitude spectrogram, time-major (n_frames, n_bins).
    pub fn process(&mut self, frames: FramedSignal) -> Array2<f32> {
        let n_frames = frames.num_frames();
        let n_bins = self.num_bins();
        let mut spectrogram = Array2::zeros((n_frames, n_bins));

        for (mut row, frame) in spectrogram.rows_mut().into_iter().zip(frames) {
            let magnitudes = self.frame_magnitudes(&frame);
            row.assign(&Array1::from(magnitudes));
        }

        spectrogram
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::preprocessing::framed_signal::frame_signal;

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let frame_size = 1024;
        let sample_rate = 8192.0;
        // bin 64 of a 1024-point FFT at 8192 Hz
        let freq = 512.0;
        let signal = Array1::from(
            (0..4096)
                .map(|n| (2.0 * std::f32::consts::PI * freq * n as f32 / sample_rate).sin())
                .collect::<Vec<_>>(),
        );

        let mut stft = MagnitudeStft::new(frame_size);
        let spec = stft.process(frame_signal(&signal, frame_size, 512.0));

        assert_eq!(spec.shape(), &[8, 512]);
        let row = spec.row(0);
        let peak = row
            .iter()
            .enumerate()
            .fold((0, f32::MIN), |(bi, bv), (i, &v)| if v > bv { (i, v) } else { (bi, bv) })
            .0;
        assert_eq!(peak, 64);
    }

    #[test]
    fn test_silence_is_zero() {
        let signal = Array1::zeros(300);
        let mut stft = MagnitudeStft::new(64);
        let spec = stft.process(frame_signal(&signal, 64, 100.0));
        assert_eq!(spec.shape(), &[3, 32]);
        assert!(spec.iter().all(|&v| v == 0.0));
    }
}
