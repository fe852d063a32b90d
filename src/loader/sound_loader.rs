use std::path::{Path, PathBuf};

use crate::audio::SampleBuffer;
use crate::catalog::SoundType;

const SOUNDS_DIR: &str = "sounds";

// <base_dir>/sounds/<type>_<variation>.wav
pub fn sound_path(base_dir: &Path, sound: SoundType, variation: u8) -> PathBuf {
    base_dir
        .join(SOUNDS_DIR)
        .join(format!("{}.wav", sound.file_stem(variation)))
}

/// Decode the whole catalog up front so slot presses never touch the disk.
///
/// Missing or broken files are logged and skipped; the engine plays silence
/// for takes that never arrive, and everything else keeps working.
pub fn load_all(base_dir: &Path, target_rate: u32) -> Vec<(SoundType, u8, SampleBuffer)> {
    let mut loaded = Vec::new();
    for sound in SoundType::ALL {
        for variation in 1..=sound.variation_count() {
            let path = sound_path(base_dir, sound, variation);
            match SampleBuffer::load_wav(&path, target_rate) {
                Ok(buffer) => loaded.push((sound, variation, buffer)),
                Err(err) => log::warn!("could not load {}: {}", path.display(), err),
            }
        }
    }
    log::info!("loaded {} of {} catalog sounds", loaded.len(), catalog_size());
    loaded
}

fn catalog_size() -> usize {
    SoundType::ALL
        .iter()
        .map(|s| s.variation_count() as usize)
        .sum()
}
