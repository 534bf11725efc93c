// Spectrogram
pub const AUDIO_SAMPLE_RATE: u32 = 22050;
pub const FRAME_SIZE: usize = 2048;
pub const BANDS_PER_OCTAVE: usize = 16;
pub const FILTERBANK_FMIN: f32 = 30.0;
pub const FILTERBANK_FMAX: f32 = 6000.0;
pub const FILTERBANK_FREF: f32 = 440.0;

// Annotations
pub const DEFAULT_FPS: f64 = 20.0;
pub const N_MIDI_PITCHES: usize = 128;

// MIDI file reading
pub const DEFAULT_TEMPO_US_PER_BEAT: u32 = 500_000;

// Batch driver
pub const AUDIO_DIR_NAME: &str = "/audio";
pub const SPEC_DIR_NAME: &str = "/spec";
pub const AUDIO_EXTENSION: &str = "wav";
pub const MIDI_EXTENSIONS: [&str; 2] = ["midi", "mid"];
