use std::collections::HashMap;

use crate::audio_api::{AudioCommand, TriggerParams};
use crate::sequencer::Instrument;

use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::voice::Voice;
use super::SampleId;

pub const MAX_VOICES: usize = 16; // hard cap so triggers never malloc in audio callback

// Lives on the audio thread. Samples get registered once at startup into a
// registry sized for every instrument, after that only triggers come through.
pub struct Engine {
    samples: HashMap<SampleId, SampleBuffer>,
    voices: [Voice; MAX_VOICES], // fixed pool of voices
}

impl Engine {
    pub fn new() -> Self {
        Self {
            samples: HashMap::with_capacity(Instrument::COUNT),
            voices: [Voice::idle(); MAX_VOICES],
        }
    }

    pub fn handle_cmd(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::RegisterSample { id, buffer } => {
                self.samples.insert(id, buffer);
            }
            AudioCommand::Trigger(t) => self.trigger_voice(t),
        }
    }

    fn trigger_voice(&mut self, t: TriggerParams) {
        if !self.samples.contains_key(&t.sample_id) {
            return;
        }
        // what slot do we write to? steal the first one when all are busy
        let slot = self.voices.iter().position(|v| !v.active).unwrap_or(0);
        self.voices[slot] = Voice::new(t.sample_id, t.gain);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.active).count()
    }

    // sum every live voice into a silent block
    pub fn render_block(&mut self, out: &mut [StereoFrame]) {
        out.fill(StereoFrame::zero());
        for voice in self.voices.iter_mut().filter(|v| v.active) {
            match self.samples.get(&voice.sample_id) {
                Some(buffer) => voice.render_into(buffer, out),
                None => voice.active = false,
            }
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
