use std::path::Path;
use std::sync::Arc;

use super::frame::StereoFrame;

// Decoded audio, already at the device rate. The frames sit behind an Arc so
// cloning one of these (loader keeps a copy, engine gets another, every voice
// over the same sound shares it) never copies sample data.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    pub frames: Arc<[StereoFrame]>,
}

impl SampleBuffer {
    pub fn from_frames(frames: Vec<StereoFrame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    // stand-in for a sound that couldn't be loaded; a voice over this is
    // legal and renders nothing
    pub fn empty() -> Self {
        Self {
            frames: Arc::new([]),
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    // Load a WAV file from disk, resampled to the device rate
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader // float, pass it through
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                // int, scale down to [-1, 1]
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let channels = spec.channels as usize;
        anyhow::ensure!(channels > 0, "zero-channel WAV: {}", path.display());

        let mut frames: Vec<StereoFrame> = if channels == 1 {
            samples
                .into_iter()
                .map(|x| StereoFrame { left: x, right: x }) // mono, duplicate
                .collect()
        } else {
            // keep the first two channels, drop the rest
            samples
                .chunks_exact(channels)
                .map(|c| StereoFrame {
                    left: c[0],
                    right: c[1],
                })
                .collect()
        };

        if spec.sample_rate != target_rate {
            frames = resample_linear(&frames, spec.sample_rate, target_rate);
        }

        Ok(Self::from_frames(frames))
    }
}

// Plain linear resampler. Good enough for ambience beds; anything tonal
// would want a windowed-sinc pass instead.
fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    if source_rate == target_rate || frames.is_empty() {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        // fractional position in the source buffer
        let src_pos = i as f64 / ratio;
        let idx = src_pos.floor() as usize;
        let frac = (src_pos - idx as f64) as f32;
        if idx + 1 >= frames.len() {
            out.push(*frames.last().unwrap_or(&StereoFrame::zero()));
        } else {
            let a = frames[idx];
            let b = frames[idx + 1];
            out.push(StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            });
        }
    }
    out
}
