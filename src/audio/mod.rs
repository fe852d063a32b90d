use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, Sender};

use crate::audio_api::AudioCommand;

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;

use engine::Engine;

pub struct AudioHandle {
    tx: Sender<AudioCommand>,
    sample_rate: u32,
    _stream: cpal::Stream, // dropping this stops audio
}

impl AudioHandle {
    // Fire and forget. If the callback is so far behind that the queue is
    // full, dropping the command beats blocking the input loop.
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.tx.try_send(cmd);
    }

    // the rate sounds must be decoded at before registering them
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}

pub fn start_audio() -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(1024);

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .context("no default output device")?;
    let config = device
        .default_output_config()
        .context("no default output config")?;

    let sample_rate = config.sample_rate();
    let channels = config.channels() as usize;
    log::info!("audio output: {channels} ch @ {sample_rate} Hz");

    match config.sample_format() {
        cpal::SampleFormat::F32 => {
            let stream = build_output_stream_f32(&device, &config.into(), rx, channels)?;
            stream.play().context("failed to start output stream")?;
            Ok(AudioHandle {
                tx,
                sample_rate,
                _stream: stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 for now)"),
    }
}

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();

    // stderr is the terminal's; log instead
    let err_fn = |err| log::error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info| {
            // commands queue up between callbacks; apply them all first
            while let Ok(cmd) = rx.try_recv() {
                engine.handle_cmd(cmd);
            }
            engine.render(data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
