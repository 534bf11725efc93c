use ndarray::Array1;

use crate::midi::notes::Note;

/// Convert a time in seconds to a frame index, rounding up.
///
/// # Arguments
///
/// * `time_seconds` - Non-negative time.
/// * `dt` - Frame duration in seconds.
///
/// # Returns
///
/// * `ceil(time_seconds / dt)`.
pub fn time_to_frame(time_seconds: f64, dt: f64) -> usize {
    (time_seconds / dt).ceil() as usize
}

/// Convert notes to onset frames.
///
/// The result is sorted ascending on its own and is not kept parallel to `notes`.
///
/// # Arguments
///
/// * `notes` - Notes in any order.
/// * `dt` - Frame duration in seconds.
///
/// # Returns
///
/// * One onset frame per note, ascending.
pub fn notes_to_onsets(notes: &[Note], dt: f64) -> Array1<f32> {
    let mut onsets: Vec<usize> = notes.iter().map(|n| time_to_frame(n.onset_seconds, dt)).collect();
    onsets.sort_unstable();

    onsets.into_iter().map(|frame| frame as f32).collect()
}

/// Convert note durations to frame counts, `ceil(duration_seconds * fps)`.
///
/// Unlike [`notes_to_onsets`] the result keeps the order of `notes`.
pub fn notes_to_durations(notes: &[Note], fps: f64) -> Array1<u32> {
    notes
        .iter()
        .map(|n| (n.duration_seconds * fps).ceil() as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::midi::notes::sort_notes;

    #[test]
    fn test_time_to_frame_rounds_up() {
        assert_eq!(time_to_frame(0.024, 0.05), 1);
        assert_eq!(time_to_frame(0.0, 0.05), 0);
        assert_eq!(time_to_frame(0.05, 0.05), 1);
        assert_eq!(time_to_frame(0.051, 0.05), 2);
    }

    #[test]
    fn test_simultaneous_onsets() {
        let mut notes = vec![Note::new(0.0, 60, 0.5), Note::new(0.0, 64, 0.5)];
        sort_notes(&mut notes);

        let onsets = notes_to_onsets(&notes, 1.0 / 20.0);
        assert_eq!(onsets.to_vec(), vec![0.0, 0.0]);
    }

    #[test]
    fn test_onsets_are_sorted_and_one_per_note() {
        let notes = vec![Note::new(1.0, 60, 0.5), Note::new(0.25, 62, 0.5), Note::new(0.5, 64, 0.5)];
        let onsets = notes_to_onsets(&notes, 0.25);
        assert_eq!(onsets.len(), notes.len());
        assert_eq!(onsets.to_vec(), vec![1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_durations_keep_note_order() {
        let notes = vec![Note::new(1.0, 60, 0.5), Note::new(0.0, 62, 0.01), Note::new(0.5, 64, 0.125)];
        let durations = notes_to_durations(&notes, 20.0);
        assert_eq!(durations.to_vec(), vec![10, 1, 3]);
    }

    #[test]
    fn test_empty_notes() {
        assert!(notes_to_onsets(&[], 0.05).is_empty());
        assert!(notes_to_durations(&[], 20.0).is_empty());
    }
}
