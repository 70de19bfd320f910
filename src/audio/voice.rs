use super::frame::StereoFrame;
use super::sample_buffer::SampleBuffer;
use super::SampleId;

// One playing copy of a sample. Voices don't know about each other, the engine
// just sums them, so retriggering a sample layers a new voice on the old one.
#[derive(Clone, Copy, Debug)]
pub struct Voice {
    pub sample_id: SampleId,
    pub pos: usize,
    pub gain: f32,
    pub active: bool,
}

impl Voice {
    pub fn new(sample_id: SampleId, gain: f32) -> Self {
        Self {
            sample_id,
            pos: 0,
            gain,
            active: true,
        }
    }

    pub fn idle() -> Self {
        Self {
            sample_id: SampleId(0),
            pos: 0,
            gain: 0.0,
            active: false,
        }
    }

    pub fn render_into(&mut self, buffer: &SampleBuffer, out: &mut [StereoFrame]) {
        // we're at a certain playback position, it's our job to render this voice into the output buffer
        if !self.active {
            return;
        }
        let remaining = buffer.data.get(self.pos..).unwrap_or(&[]);
        let n = remaining.len().min(out.len());
        for (frame, sample) in out.iter_mut().zip(&remaining[..n]) {
            frame.add_scaled(*sample, self.gain);
        }
        self.pos += n;
        if self.pos >= buffer.data.len() {
            self.active = false; // one shot, no looping
        }
    }
}
