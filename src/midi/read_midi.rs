use std::collections::HashMap;
use std::path::Path;

use log::debug;
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

use crate::constants::DEFAULT_TEMPO_US_PER_BEAT;
use crate::error::ExtractError;

use super::notes::Note;

#[derive(Debug, Clone)]
struct TrackEventAbsolute<'a> {
    tick: u64,
    kind: TrackEventKind<'a>,
}

#[derive(Debug, Clone, Copy)]
struct TempoSegment {
    tick: u64,
    seconds: f64,
    seconds_per_tick: f64,
}

/// Converts absolute ticks to seconds, honouring tempo changes from every track.
#[derive(Debug, Clone)]
pub struct TempoMap {
    segments: Vec<TempoSegment>,
}

impl TempoMap {
    /// Build the map from a header timing and `(tick, microseconds per beat)` changes sorted by tick.
    pub fn new(timing: Timing, tempo_changes: &[(u64, u32)]) -> Self {
        let ticks_per_beat = match timing {
            Timing::Metrical(tpb) => tpb.as_int().max(1) as f64,
            Timing::Timecode(fps, subframes) => {
                // SMPTE timing is absolute, tempo events do not apply
                let seconds_per_tick = 1.0 / (fps.as_f32() as f64 * subframes.max(1) as f64);
                return Self {
                    segments: vec![TempoSegment { tick: 0, seconds: 0.0, seconds_per_tick }],
                };
            }
        };

        let per_tick = |us_per_beat: u32| us_per_beat as f64 / 1_000_000.0 / ticks_per_beat;

        let mut segments = vec![TempoSegment {
            tick: 0,
            seconds: 0.0,
            seconds_per_tick: per_tick(DEFAULT_TEMPO_US_PER_BEAT),
        }];

        for &(tick, us_per_beat) in tempo_changes {
            let last = segments[segments.len() - 1];
            let seconds = last.seconds + (tick - last.tick) as f64 * last.seconds_per_tick;
            let segment = TempoSegment { tick, seconds, seconds_per_tick: per_tick(us_per_beat) };

            // a later change at the same tick wins
            if last.tick == tick {
                let idx = segments.len() - 1;
                segments[idx] = segment;
            } else {
                segments.push(segment);
            }
        }

        Self { segments }
    }

    pub fn tick_to_seconds(&self, tick: u64) -> f64 {
        let idx = self.segments.partition_point(|s| s.tick <= tick).saturating_sub(1);
        let segment = &self.segments[idx];
        segment.seconds + (tick - segment.tick) as f64 * segment.seconds_per_tick
    }
}

/// Flatten all tracks into one event list ordered by absolute tick.
///
/// Events at the same tick keep their track order, then their in-track order.
fn merge_tracks<'a>(smf: &Smf<'a>) -> Vec<TrackEventAbsolute<'a>> {
    let mut events: Vec<TrackEventAbsolute<'a>> = vec![];

    for track in &smf.tracks {
        let mut tick = 0u64;
        for event in track {
            tick += event.delta.as_int() as u64;
            events.push(TrackEventAbsolute { tick, kind: event.kind });
        }
    }

    events.sort_by_key(|e| e.tick);
    events
}

/// Convert a parsed MIDI file into notes.
///
/// A note-off closes the sounding note of the same channel and key. A
/// repeated note-on for a key that is still sounding restarts it, dropping
/// the earlier one, and the extra note-off that follows is ignored. A note-on
/// with velocity 0 counts as a note-off. Notes still sounding at the end of
/// the file are dropped.
///
/// # Arguments
///
/// * `smf` - Parsed standard MIDI file.
///
/// # Returns
///
/// * Notes in order of their note-off events.
pub fn smf_to_notes(smf: &Smf) -> Vec<Note> {
    let events = merge_tracks(smf);

    let tempo_changes: Vec<(u64, u32)> = events
        .iter()
        .filter_map(|e| match e.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(t)) => Some((e.tick, t.as_int())),
            _ => None,
        })
        .collect();
    let tempo_map = TempoMap::new(smf.header.timing, &tempo_changes);

    let mut sounding: HashMap<(u8, u8), (f64, u8)> = HashMap::new();
    let mut notes = vec![];
    let mut restarted = 0usize;

    for event in &events {
        let TrackEventKind::Midi { channel, message } = event.kind else {
            continue;
        };
        let channel = channel.as_int();
        let time = tempo_map.tick_to_seconds(event.tick);

        let (key, note_on_velocity) = match message {
            MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => (key.as_int(), Some(vel.as_int())),
            MidiMessage::NoteOn { key, .. } | MidiMessage::NoteOff { key, .. } => (key.as_int(), None),
            _ => continue,
        };

        match note_on_velocity {
            Some(velocity) => {
                if sounding.insert((channel, key), (time, velocity)).is_some() {
                    restarted += 1;
                }
            }
            None => {
                if let Some((onset, velocity)) = sounding.remove(&(channel, key)) {
                    notes.push(Note {
                        onset_seconds: onset,
                        pitch_midi: key,
                        duration_seconds: time - onset,
                        velocity,
                        channel,
                    });
                }
            }
        }
    }

    if restarted > 0 {
        debug!("Dropped {} notes restarted before their note-off", restarted);
    }
    if !sounding.is_empty() {
        debug!("Dropping {} notes without a note-off", sounding.len());
    }

    notes
}

/// Parse MIDI file bytes into notes.
pub fn parse_midi_bytes(bytes: &[u8], path: &Path) -> Result<Vec<Note>, ExtractError> {
    let smf = Smf::parse(bytes).map_err(|e| ExtractError::Midi {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let notes = smf_to_notes(&smf);
    debug!("Read {} notes from {} track(s) in {}", notes.len(), smf.tracks.len(), path.display());

    Ok(notes)
}

/// Read a MIDI file into notes.
pub fn read_midi_notes<P: AsRef<Path>>(path: P) -> Result<Vec<Note>, ExtractError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_midi_bytes(&bytes, path)
}
