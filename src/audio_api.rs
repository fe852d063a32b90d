pub use crate::audio::SampleBuffer;
use crate::catalog::SoundType;

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // The engine can't touch the filesystem (it runs in the output callback),
    // so every sound gets decoded up front (see sound_loader.rs) and handed
    // over as a ready buffer, one per (sound, variation).
    RegisterSound {
        sound: SoundType,
        variation: u8,
        buffer: SampleBuffer,
    },

    // Start looping a registered sound in the given slot, replacing whatever
    // voice that slot held before.
    LoadSlot {
        slot: usize,
        sound: SoundType,
        variation: u8,
        volume: f32,
    },

    // Adjust a running voice in place; the loop position is untouched.
    SetSlotVolume { slot: usize, volume: f32 },

    ClearSlot { slot: usize },
    ClearAll,

    // Master gate. Voices keep their positions while false, so resuming
    // picks up where the mix left off.
    SetPlaying(bool),
}
