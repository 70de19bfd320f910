use std::path::Path;

pub use crate::audio::{SampleBuffer, SampleId};

#[derive(Clone, Debug)]
pub struct TriggerParams {
    pub sample_id: SampleId,
    pub gain: f32,
}

#[derive(Clone, Debug)]
pub enum AudioCommand {
    // Decoding happens on the main thread at startup (see sample_loader.rs);
    // the audio thread only ever receives finished buffers
    RegisterSample { id: SampleId, buffer: SampleBuffer },

    // start a new voice for a registered sample
    Trigger(TriggerParams),
}

// What the sequencer needs from whoever makes the noise. `play` is fire and
// forget: it must not block, and a second play of the same sample layers on
// top of the first instead of cutting it off.
pub trait AudioSink {
    type Handle;

    fn load(&mut self, path: &Path) -> anyhow::Result<Self::Handle>;
    fn play(&mut self, handle: &Self::Handle);
}
