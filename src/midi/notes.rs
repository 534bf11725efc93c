use std::cmp::Ordering;

/// A note read from a MIDI file, times in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub onset_seconds: f64,
    pub pitch_midi: u8,
    pub duration_seconds: f64,
    pub velocity: u8,
    pub channel: u8,
}

impl Note {
    pub fn new(onset_seconds: f64, pitch_midi: u8, duration_seconds: f64) -> Self {
        Self {
            onset_seconds,
            pitch_midi,
            duration_seconds,
            velocity: 100,
            channel: 0,
        }
    }

    pub fn offset_seconds(&self) -> f64 {
        self.onset_seconds + self.duration_seconds
    }
}

/// Onset ascending, and top-down (pitch descending) within simultaneities.
pub fn onset_then_pitch_desc(a: &Note, b: &Note) -> Ordering {
    a.onset_seconds
        .total_cmp(&b.onset_seconds)
        .then_with(|| b.pitch_midi.cmp(&a.pitch_midi))
}

/// Stable sort of notes by onset, highest pitch first for equal onsets.
pub fn sort_notes(notes: &mut [Note]) {
    notes.sort_by(onset_then_pitch_desc);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simultaneous_notes_sort_top_down() {
        let mut notes = vec![Note::new(0.0, 60, 0.5), Note::new(0.0, 64, 0.5)];
        sort_notes(&mut notes);
        assert_eq!(notes[0].pitch_midi, 64);
        assert_eq!(notes[1].pitch_midi, 60);
    }

    #[test]
    fn test_onset_takes_precedence_over_pitch() {
        let mut notes = vec![
            Note::new(1.0, 80, 0.5),
            Note::new(0.5, 40, 0.5),
            Note::new(0.5, 50, 2.0),
        ];
        sort_notes(&mut notes);
        let order: Vec<u8> = notes.iter().map(|n| n.pitch_midi).collect();
        assert_eq!(order, vec![50, 40, 80]);
        assert_eq!(notes[0].offset_seconds(), 2.5);
    }
}
