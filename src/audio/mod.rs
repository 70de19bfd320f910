use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{Receiver, SendTimeoutError, Sender, TrySendError};
use tracing::{error, info, warn};

use crate::audio_api::{AudioCommand, AudioSink, TriggerParams};
use crate::config::AudioConfig;
use crate::loader::sample_loader;

mod engine;
mod frame;
mod sample_buffer;
mod voice;

pub use engine::{Engine, MAX_VOICES};
pub use frame::StereoFrame;
pub use sample_buffer::SampleBuffer;

// rate used to decode samples when there's no device to ask
pub const FALLBACK_SAMPLE_RATE: u32 = 44100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleId(pub u64);

// How long startup waits for the audio thread to take a sample
const REGISTER_TIMEOUT: Duration = Duration::from_secs(2);

// frames the callback can mix without growing its scratch block
const BLOCK_FRAMES: usize = 4096;

// The sending half of the audio queue. Registering happens once per sample at
// startup and waits for room; triggers come from the frame loop and never wait.
pub struct CommandSender {
    tx: Sender<AudioCommand>,
    register_timeout: Duration,
}

impl CommandSender {
    pub fn new(tx: Sender<AudioCommand>, register_timeout: Duration) -> Self {
        Self { tx, register_timeout }
    }

    pub fn register(&self, id: SampleId, buffer: SampleBuffer) -> anyhow::Result<()> {
        self.tx
            .send_timeout(AudioCommand::RegisterSample { id, buffer }, self.register_timeout)
            .map_err(|e| match e {
                SendTimeoutError::Timeout(_) => anyhow::anyhow!(
                    "audio thread did not take sample {} within {:?}",
                    id.0,
                    self.register_timeout
                ),
                SendTimeoutError::Disconnected(_) => anyhow::anyhow!("audio thread has stopped"),
            })
    }

    pub fn trigger(&self, params: TriggerParams) {
        match self.tx.try_send(AudioCommand::Trigger(params)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("audio queue full, dropping trigger"),
            Err(TrySendError::Disconnected(_)) => warn!("audio thread has stopped, dropping trigger"),
        }
    }
}

pub struct AudioHandle {
    commands: CommandSender,
    sample_rate: u32,
    gain: f32,
    next_id: u64,
    _output_stream: cpal::Stream,
}

impl AudioSink for AudioHandle {
    type Handle = SampleId;

    fn load(&mut self, path: &Path) -> anyhow::Result<SampleId> {
        let id = SampleId(self.next_id);
        self.next_id += 1;
        let buffer = sample_loader::load(path, self.sample_rate)?;
        self.commands
            .register(id, buffer)
            .with_context(|| format!("Error loading instrument sample {}", path.display()))?;
        Ok(id)
    }

    fn play(&mut self, handle: &SampleId) {
        self.commands.trigger(TriggerParams {
            sample_id: *handle,
            gain: self.gain,
        });
    }
}

pub fn start_audio(config: &AudioConfig) -> anyhow::Result<AudioHandle> {
    let (tx, rx) = crossbeam_channel::bounded::<AudioCommand>(config.queue_capacity);

    let host = cpal::default_host();
    let device = host.default_output_device().context("no default output device")?;
    let supported = device.default_output_config().context("no default output config")?;

    let sample_rate = supported.sample_rate();
    let channels = supported.channels() as usize;

    match supported.sample_format() {
        cpal::SampleFormat::F32 => {
            let output_stream = build_output_stream_f32(&device, &supported.into(), rx, channels)?;
            output_stream.play().context("failed to play output stream")?;
            info!(sample_rate, channels, "audio output started");

            Ok(AudioHandle {
                commands: CommandSender::new(tx, REGISTER_TIMEOUT),
                sample_rate,
                gain: config.gain,
                next_id: 0,
                _output_stream: output_stream,
            })
        }
        other => anyhow::bail!("unsupported sample format {other:?} (only f32 supported for now)"),
    }
}

// ── Output stream ─────────────────────────────────────────────────

fn build_output_stream_f32(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    rx: Receiver<AudioCommand>,
    channels: usize,
) -> anyhow::Result<cpal::Stream> {
    let mut engine = Engine::new();
    let frames = match config.buffer_size {
        cpal::BufferSize::Fixed(n) => (n as usize).max(BLOCK_FRAMES),
        cpal::BufferSize::Default => BLOCK_FRAMES,
    };
    // resizing within capacity never allocates
    let mut block: Vec<StereoFrame> = Vec::with_capacity(frames);

    let err_fn = |err| error!("audio output stream error: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [f32], _info: &cpal::OutputCallbackInfo| {
            while let Ok(cmd) = rx.try_recv() { // set up command handling
                engine.handle_cmd(cmd);
            }

            let n_frames = data.len() / channels.max(1);
            block.resize(n_frames, StereoFrame::zero());
            engine.render_block(&mut block);

            // interleave back out, extra channels get the left side
            for (out, frame) in data.chunks_exact_mut(channels.max(1)).zip(&block) {
                for (ch, sample) in out.iter_mut().enumerate() {
                    *sample = if ch == 1 { frame.right } else { frame.left };
                }
            }
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

// Where the app sends sound. Muted keeps decoding samples so a broken file is
// still caught at startup, it just never plays anything.
pub enum Output {
    Device(AudioHandle),
    Muted { next_id: u64 },
}

impl Output {
    // best effort: no sound card is a warning, not a reason to quit
    pub fn open(config: &AudioConfig) -> Self {
        match start_audio(config) {
            Ok(handle) => Output::Device(handle),
            Err(e) => {
                warn!("audio unavailable, running muted: {e:#}");
                Output::Muted { next_id: 0 }
            }
        }
    }
}

impl AudioSink for Output {
    type Handle = SampleId;

    fn load(&mut self, path: &Path) -> anyhow::Result<SampleId> {
        match self {
            Output::Device(handle) => handle.load(path),
            Output::Muted { next_id } => {
                sample_loader::load(path, FALLBACK_SAMPLE_RATE)?;
                let id = SampleId(*next_id);
                *next_id += 1;
                Ok(id)
            }
        }
    }

    fn play(&mut self, handle: &SampleId) {
        if let Output::Device(device) = self {
            device.play(handle);
        }
    }
}
