use log::debug;
use ndarray::{s, Array2};

use crate::constants::N_MIDI_PITCHES;
use crate::error::ExtractError;
use crate::midi::notes::Note;

use super::frames::time_to_frame;

/// Build a pitch x frame occupancy matrix from notes.
///
/// The number of frames is taken from the end of the last note in `notes`,
/// so the list should be sorted by onset (pitch descending on ties). Notes
/// ending after that are cut at the last frame. Overlapping notes of the same
/// pitch add up, saturating at 255. Pitches must be below 128.
///
/// # Arguments
///
/// * `notes` - Sorted, non-empty note list.
/// * `dt` - Frame duration in seconds.
///
/// # Returns
///
/// * Matrix of shape (128, n_frames).
pub fn notes_to_piano_roll(notes: &[Note], dt: f64) -> Result<Array2<u8>, ExtractError> {
    let last = notes
        .last()
        .ok_or(ExtractError::EmptyInput("piano roll needs at least one note"))?;

    if let Some(note) = notes.iter().find(|n| n.pitch_midi as usize >= N_MIDI_PITCHES) {
        return Err(ExtractError::InvalidParameter(format!(
            "MIDI pitch must be below {}, got {}",
            N_MIDI_PITCHES, note.pitch_midi
        )));
    }

    let n_frames = time_to_frame(last.offset_seconds(), dt);
    let mut piano_roll = Array2::<u8>::zeros((N_MIDI_PITCHES, n_frames));

    for note in notes {
        let onset = time_to_frame(note.onset_seconds, dt).min(n_frames);
        let offset = time_to_frame(note.offset_seconds(), dt).min(n_frames);
        if offset <= onset {
            continue;
        }

        piano_roll
            .slice_mut(s![note.pitch_midi as usize, onset..offset])
            .mapv_inplace(|count| count.saturating_add(1));
    }

    debug!("Piano roll: {} notes over {} frames", notes.len(), n_frames);

    Ok(piano_roll)
}
