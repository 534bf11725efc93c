use std::path::Path;

use log::{info, warn};
use ndarray::{Array1, Array2};

use crate::annotations::frames::{notes_to_durations, notes_to_onsets};
use crate::annotations::piano_roll::notes_to_piano_roll;
use crate::config::{ExtractorConfig, SpectrogramConfig};
use crate::error::ExtractError;
use crate::helpers::ported::numpy::min_max;
use crate::midi::notes::{sort_notes, Note};
use crate::midi::read_midi::read_midi_notes;
use crate::spectrogram::log_spectrogram::extract_spectrogram;

/// Frame-aligned annotations of one MIDI/audio pair.
#[derive(Debug, Clone)]
pub struct Annotations {
    /// Log filtered spectrogram, shape (n_bands, n_frames); `None` without audio.
    pub spectrogram: Option<Array2<f32>>,
    /// Onset frame of every note, ascending.
    pub onsets: Array1<f32>,
    /// Duration in frames of every note, in sorted-note order.
    pub durations: Array1<u32>,
    /// Pitch x frame occupancy counts, only with `with_piano_roll`.
    pub piano_roll: Option<Array2<u8>>,
    /// Notes sorted by onset, top-down in simultaneities, only with `with_piano_roll`.
    pub notes: Option<Vec<Note>>,
}

/// Turns a MIDI file and an optional audio recording into annotations.
#[derive(Debug, Clone, Default)]
pub struct AnnotationExtractor {
    config: ExtractorConfig,
}

impl AnnotationExtractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn spectrogram_config(&self) -> SpectrogramConfig {
        SpectrogramConfig {
            fps: self.config.fps,
            ..self.config.spectrogram.clone()
        }
    }

    /// Compute the annotations of an already loaded note list.
    ///
    /// # Arguments
    ///
    /// * `notes` - Notes in any order; sorted here.
    /// * `spectrogram` - Band-major spectrogram to attach, if any.
    pub fn annotate_notes(&self, mut notes: Vec<Note>, spectrogram: Option<Array2<f32>>) -> Result<Annotations, ExtractError> {
        if !(self.config.fps > 0.0) {
            return Err(ExtractError::InvalidParameter(format!("fps must be > 0, got {}", self.config.fps)));
        }
        let dt = self.config.dt();

        sort_notes(&mut notes);
        let onsets = notes_to_onsets(&notes, dt);
        let durations = notes_to_durations(&notes, self.config.fps);
        let piano_roll = notes_to_piano_roll(&notes, dt)?;

        let annotations = if self.config.with_piano_roll {
            Annotations {
                spectrogram,
                onsets,
                durations,
                piano_roll: Some(piano_roll),
                notes: Some(notes),
            }
        } else {
            Annotations {
                spectrogram,
                onsets,
                durations,
                piano_roll: None,
                notes: None,
            }
        };

        if self.config.show {
            show(&annotations);
        }

        Ok(annotations)
    }

    /// Extract annotations from a MIDI file and, optionally, its audio rendition.
    ///
    /// A missing audio file is reported but not checked further; decoding it fails.
    pub fn extract<P: AsRef<Path>>(&self, midi_path: P, audio_path: Option<&Path>) -> Result<Annotations, ExtractError> {
        let spectrogram = match audio_path {
            Some(audio_path) => {
                info!("Computing spectrogram from audio path: {}", audio_path.display());
                if !audio_path.is_file() {
                    warn!("...audio file does not exist!");
                }
                // band-major, one column per frame
                Some(extract_spectrogram(audio_path, &self.spectrogram_config())?.reversed_axes())
            }
            None => None,
        };

        let notes = read_midi_notes(midi_path.as_ref())?;
        self.annotate_notes(notes, spectrogram)
    }
}

fn piano_roll_summary(annotations: &Annotations) -> String {
    match &annotations.piano_roll {
        Some(roll) => format!("piano roll {:?}, {} active cells", roll.shape(), roll.iter().filter(|&&c| c > 0).count()),
        None => "no piano roll".to_string(),
    }
}

fn show(annotations: &Annotations) {
    if let Some(spec) = &annotations.spectrogram {
        let (lo, hi) = min_max(spec.iter()).unwrap_or_default();
        info!("spectrogram {:?}, values {:.3}..{:.3}", spec.shape(), lo, hi);
    }
    info!(
        "{} onsets (last frame {}), {} durations, {}",
        annotations.onsets.len(),
        annotations.onsets.iter().next_back().copied().unwrap_or_default(),
        annotations.durations.len(),
        piano_roll_summary(annotations)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(with_piano_roll: bool) -> AnnotationExtractor {
        AnnotationExtractor::new(ExtractorConfig {
            with_piano_roll,
            ..ExtractorConfig::default()
        })
    }

    #[test]
    fn test_annotate_sorts_notes_first() {
        let notes = vec![Note::new(0.5, 60, 0.25), Note::new(0.0, 60, 0.5), Note::new(0.0, 64, 0.5)];
        let annotations = extractor(true).annotate_notes(notes, None).unwrap();

        assert!(annotations.spectrogram.is_none());
        assert_eq!(annotations.onsets.to_vec(), vec![0.0, 0.0, 10.0]);
        assert_eq!(annotations.durations.to_vec(), vec![10, 10, 5]);

        let sorted = annotations.notes.unwrap();
        assert_eq!(sorted.iter().map(|n| n.pitch_midi).collect::<Vec<_>>(), vec![64, 60, 60]);

        let roll = annotations.piano_roll.unwrap();
        assert_eq!(roll.shape(), &[128, 15]);
        assert_eq!(roll.row(60).iter().filter(|&&c| c > 0).count(), 15);
    }

    #[test]
    fn test_piano_roll_is_optional() {
        let annotations = extractor(false).annotate_notes(vec![Note::new(0.0, 60, 0.1)], None).unwrap();
        assert!(annotations.piano_roll.is_none());
        assert!(annotations.notes.is_none());
        assert_eq!(annotations.onsets.len(), 1);
    }

    #[test]
    fn test_empty_notes_is_error() {
        let result = extractor(false).annotate_notes(vec![], None);
        assert!(matches!(result, Err(ExtractError::EmptyInput(_))));
    }

    #[test]
    fn test_missing_audio_fails_in_decoding() {
        let result = extractor(false).extract("/nonexistent/song.midi", Some(Path::new("/nonexistent/song.wav")));
        assert!(matches!(result, Err(ExtractError::Audio { .. })));
    }

    #[test]
    fn test_missing_midi_is_io_error() {
        let result = extractor(false).extract("/nonexistent/song.midi", None);
        assert!(matches!(result, Err(ExtractError::Io { .. })));
    }
}
