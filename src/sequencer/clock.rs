use crate::shared::SUBDIVISIONS_PER_BEAT;

// Turns wall-clock time into 16th-note ticks. At most one tick per call: when
// a frame takes longer than a subdivision the extra time is dropped, not carried
// over, so slow frames drift the tempo rather than double-firing.
#[derive(Clone, Debug)]
pub struct Clock {
    bpm: f64,
    timer: f64, // seconds since the last tick
}

impl Clock {
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            timer: 0.0,
        }
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn accumulated(&self) -> f64 {
        self.timer
    }

    // seconds per subdivision
    pub fn threshold(&self) -> f64 {
        (60.0 / self.bpm) / SUBDIVISIONS_PER_BEAT as f64
    }

    pub fn tick(&mut self, elapsed: f64) -> bool {
        self.timer += elapsed;
        if self.timer >= self.threshold() {
            self.timer = 0.0; // overshoot is discarded
            return true;
        }
        false
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(100.0)
    }
}
