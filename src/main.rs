use std::{error::Error, path::PathBuf};

use log::{error, info};

use midi_annotations::output::{find_midi_files, paired_paths, save_array};
use midi_annotations::{AnnotationExtractor, ExtractorConfig};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(directory) = std::env::args().nth(1).map(PathBuf::from) else {
        eprintln!("usage: midi-annotations <directory with .midi files>");
        std::process::exit(2);
    };

    let extractor = AnnotationExtractor::new(ExtractorConfig {
        show: true,
        ..ExtractorConfig::default()
    });

    let midi_files = find_midi_files(&directory)?;
    info!("Found {} MIDI files in {}", midi_files.len(), directory.display());

    for midi_file_path in midi_files {
        info!("{}", midi_file_path.display());
        let paths = paired_paths(&midi_file_path);

        let annotations = extractor
            .extract(&paths.midi, Some(&paths.audio))
            .map_err(|e| {
                error!("Failed on {}: {}", paths.midi.display(), e);
                e
            })?;

        if let Some(spectrogram) = &annotations.spectrogram {
            save_array(&paths.spectrogram, spectrogram)?;
        }
        save_array(&paths.onsets, &annotations.onsets)?;
    }

    Ok(())
}
