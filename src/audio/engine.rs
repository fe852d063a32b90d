use crate::audio_api::AudioCommand;
use crate::catalog::{MAX_VARIATIONS, SoundType};
use crate::shared::NUM_SLOTS;

use super::sample_buffer::SampleBuffer;
use super::voice::LoopVoice;

const NUM_SOUNDS: usize = SoundType::ALL.len();

// All playback state, owned by the output callback. Commands are the only
// way in. Nothing here touches the filesystem or allocates while rendering,
// apart from the Arc bump when a voice starts.
pub struct Engine {
    // every decoded take, indexed by (sound, variation - 1)
    bank: [[Option<SampleBuffer>; MAX_VARIATIONS]; NUM_SOUNDS],
    // one voice per mixer slot
    voices: [Option<LoopVoice>; NUM_SLOTS],
    // master gate; voices hold their positions while false
    playing: bool,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            bank: std::array::from_fn(|_| std::array::from_fn(|_| None)),
            voices: std::array::from_fn(|_| None),
            playing: false,
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSound {
                sound,
                variation,
                buffer,
            } => self.register_sound(sound, variation, buffer),
            AudioCommand::LoadSlot {
                slot,
                sound,
                variation,
                volume,
            } => self.load_slot(slot, sound, variation, volume),
            AudioCommand::SetSlotVolume { slot, volume } => self.set_slot_volume(slot, volume),
            AudioCommand::ClearSlot { slot } => self.clear_slot(slot),
            AudioCommand::ClearAll => self.clear_all(),
            AudioCommand::SetPlaying(playing) => self.playing = playing,
        }
    }

    fn register_sound(&mut self, sound: SoundType, variation: u8, buffer: SampleBuffer) {
        let Some(bay) = bank_bay(variation) else {
            return; // out-of-range take, drop deterministically
        };
        self.bank[sound as usize][bay] = Some(buffer);
    }

    fn load_slot(&mut self, slot: usize, sound: SoundType, variation: u8, volume: f32) {
        if slot >= NUM_SLOTS {
            return;
        }
        // A sound that never made it into the bank still gets a voice, just a
        // silent one, so the engine's slots stay in step with the mixer's.
        let buffer = bank_bay(variation)
            .and_then(|bay| self.bank[sound as usize][bay].clone())
            .unwrap_or_else(SampleBuffer::empty);
        self.voices[slot] = Some(LoopVoice::new(buffer, clamp_volume(volume)));
    }

    fn set_slot_volume(&mut self, slot: usize, volume: f32) {
        if let Some(voice) = self.voices.get_mut(slot).and_then(Option::as_mut) {
            voice.set_volume(clamp_volume(volume));
        }
    }

    fn clear_slot(&mut self, slot: usize) {
        if slot < NUM_SLOTS {
            self.voices[slot] = None;
        }
    }

    fn clear_all(&mut self) {
        for voice in &mut self.voices {
            *voice = None;
        }
    }

    // Fill an interleaved output block. Paused means silence with every loop
    // position frozen where it was.
    pub fn render(&mut self, out: &mut [f32], channels: usize) {
        out.fill(0.0);
        if !self.playing || channels == 0 {
            return;
        }
        for voice in self.voices.iter_mut().flatten() {
            voice.mix_into(out, channels);
        }
    }
}

fn bank_bay(variation: u8) -> Option<usize> {
    (1..=MAX_VARIATIONS as u8)
        .contains(&variation)
        .then(|| variation as usize - 1)
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
