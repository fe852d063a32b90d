use super::sample_buffer::SampleBuffer;

// One looping layer. Unlike a one-shot voice there is no finished state: the
// position wraps at the buffer end and keeps going until the slot is cleared.
// A voice over an empty buffer is legal and renders nothing, which is how a
// slot whose sound failed to load stays configured but silent.
#[derive(Clone, Debug)]
pub struct LoopVoice {
    buffer: SampleBuffer,
    pos: usize,
    volume: f32,
}

impl LoopVoice {
    pub fn new(buffer: SampleBuffer, volume: f32) -> Self {
        Self {
            buffer,
            pos: 0,
            volume,
        }
    }

    // live adjustment; the loop position is deliberately untouched
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    // Add this voice into an interleaved output block and advance the loop.
    // Devices beyond stereo get the first two channels; the rest stay as the
    // engine zeroed them.
    pub fn mix_into(&mut self, out: &mut [f32], channels: usize) {
        let len = self.buffer.len();
        if len == 0 || channels == 0 {
            return;
        }
        for frame in out.chunks_exact_mut(channels) {
            let s = self.buffer.frames[self.pos];
            if channels == 1 {
                frame[0] += s.mono() * self.volume;
            } else {
                frame[0] += s.left * self.volume;
                frame[1] += s.right * self.volume;
            }
            self.pos = (self.pos + 1) % len;
        }
    }
}
