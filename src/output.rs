use std::path::{Path, PathBuf};

use log::debug;
use ndarray::{ArrayBase, Data, Dimension};
use ndarray_npy::{write_npy, WritableElement};

use crate::constants::{AUDIO_DIR_NAME, AUDIO_EXTENSION, MIDI_EXTENSIONS, SPEC_DIR_NAME};
use crate::error::ExtractError;

/// Files belonging to one MIDI file of a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedPaths {
    pub midi: PathBuf,
    pub audio: PathBuf,
    pub spectrogram: PathBuf,
    pub onsets: PathBuf,
}

/// Derive the audio and output paths of a MIDI file.
///
/// The audio file sits next to the MIDI file with the same stem. Outputs go
/// to the same directory with `/audio` replaced by `/spec` in its path.
pub fn paired_paths(midi_path: &Path) -> PairedPaths {
    let directory = midi_path.parent().unwrap_or_else(|| Path::new(""));
    let stem = midi_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let output_directory = PathBuf::from(directory.to_string_lossy().replace(AUDIO_DIR_NAME, SPEC_DIR_NAME));

    PairedPaths {
        midi: midi_path.to_path_buf(),
        audio: directory.join(format!("{}.{}", stem, AUDIO_EXTENSION)),
        spectrogram: output_directory.join(format!("{}_spec.npy", stem)),
        onsets: output_directory.join(format!("{}_onsets.npy", stem)),
    }
}

/// List the MIDI files of a directory, sorted by path.
pub fn find_midi_files(directory: &Path) -> Result<Vec<PathBuf>, ExtractError> {
    let io_err = |source| ExtractError::Io { path: directory.to_path_buf(), source };

    let mut midi_files = vec![];
    for entry in std::fs::read_dir(directory).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_midi = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| MIDI_EXTENSIONS.iter().any(|m| m.eq_ignore_ascii_case(ext)))
            .unwrap_or(false);
        if is_midi && path.is_file() {
            midi_files.push(path);
        }
    }

    midi_files.sort();
    Ok(midi_files)
}

/// Write an array as `.npy`, creating the parent directory when needed.
pub fn save_array<A, S, D>(path: &Path, array: &ArrayBase<S, D>) -> Result<(), ExtractError>
where
    A: WritableElement,
    S: Data<Elem = A>,
    D: Dimension,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExtractError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    write_npy(path, array).map_err(|source| ExtractError::Npy {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote {:?} array to {}", array.shape(), path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::Array1;

    #[test]
    fn test_paired_paths_rewrite_audio_dir() {
        let paths = paired_paths(Path::new("/data/sonata/audio/take_1.midi"));

        assert_eq!(paths.audio, PathBuf::from("/data/sonata/audio/take_1.wav"));
        assert_eq!(paths.spectrogram, PathBuf::from("/data/sonata/spec/take_1_spec.npy"));
        assert_eq!(paths.onsets, PathBuf::from("/data/sonata/spec/take_1_onsets.npy"));
    }

    #[test]
    fn test_paired_paths_without_audio_dir() {
        let paths = paired_paths(Path::new("songs/a.mid"));
        assert_eq!(paths.spectrogram, PathBuf::from("songs/a_spec.npy"));
    }

    #[test]
    fn test_find_midi_files_filters_and_sorts() {
        let dir = std::env::temp_dir().join(format!("midi_annotations_find_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        for name in ["b.midi", "a.MID", "a.wav", "notes.txt"] {
            std::fs::write(dir.join(name), b"").unwrap();
        }

        let found = find_midi_files(&dir).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let names: Vec<String> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.MID", "b.midi"]);
    }

    #[test]
    fn test_save_array_creates_directory() {
        let dir = std::env::temp_dir().join(format!("midi_annotations_save_{}", std::process::id()));
        let path = dir.join("spec").join("x_onsets.npy");

        save_array(&path, &Array1::from(vec![0.0f32, 1.0, 4.0])).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(&bytes[..6], b"\x93NUMPY");
    }
}
