//! Frame-aligned training annotations from MIDI performances and their audio.
//!
//! A MIDI file is read into notes, which are quantized to a fixed frame rate
//! (onset frames, durations in frames, a 128-pitch piano roll). When an audio
//! rendition is available, a log filtered spectrogram at the same frame rate is
//! computed alongside.

pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod output;
pub mod helpers {
    pub mod ported {
        pub mod numpy;
    }
}
pub mod preprocessing {
    pub mod framed_signal;
    pub mod load_audio;
}
pub mod spectrogram {
    pub mod filterbank;
    pub mod log_spectrogram;
    pub mod stft;
}
pub mod midi {
    pub mod notes;
    pub mod read_midi;
}
pub mod annotations {
    pub mod frames;
    pub mod piano_roll;
}

pub use config::{ExtractorConfig, SpectrogramConfig};
pub use error::ExtractError;
pub use extractor::{AnnotationExtractor, Annotations};
pub use midi::notes::Note;
