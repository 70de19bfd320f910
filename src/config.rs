use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use crate::sequencer::{GridGeometry, Instrument, Layout};
use crate::shared::{NUM_SLOTS, V2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_bpm")]
    pub bpm: f64,
    #[serde(default)]
    pub grid: GridGeometry,
    #[serde(default = "Config::default_window")]
    pub window: V2, // halved iphone 6 resolution (1334x750)
    #[serde(default = "Config::default_visible_slots")]
    pub visible_slots: usize,
    #[serde(default = "Config::default_switch_key")]
    pub switch_key: char,
    #[serde(default)]
    pub samples: SampleConfig,
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Config {
    fn default_bpm() -> f64 {
        100.0
    }
    fn default_window() -> V2 {
        V2::new(667, 375)
    }
    fn default_visible_slots() -> usize {
        NUM_SLOTS
    }
    fn default_switch_key() -> char {
        ' '
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bpm: Self::default_bpm(),
            grid: GridGeometry::default(),
            window: Self::default_window(),
            visible_slots: Self::default_visible_slots(),
            switch_key: Self::default_switch_key(),
            samples: SampleConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleConfig {
    #[serde(default = "SampleConfig::default_kick")]
    pub kick: PathBuf,
    #[serde(default = "SampleConfig::default_snare")]
    pub snare: PathBuf,
}

impl SampleConfig {
    fn default_kick() -> PathBuf {
        PathBuf::from("kick.wav")
    }
    fn default_snare() -> PathBuf {
        PathBuf::from("snare.wav")
    }

    pub fn path(&self, instrument: Instrument) -> &Path {
        match instrument {
            Instrument::Kick => &self.kick,
            Instrument::Snare => &self.snare,
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            kick: Self::default_kick(),
            snare: Self::default_snare(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "AudioConfig::default_queue_capacity")]
    pub queue_capacity: usize,
    #[serde(default = "AudioConfig::default_gain")]
    pub gain: f32,
}

impl AudioConfig {
    fn default_queue_capacity() -> usize {
        1024
    }
    fn default_gain() -> f32 {
        0.8
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            queue_capacity: Self::default_queue_capacity(),
            gain: Self::default_gain(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            bail!("bpm must be a positive number, got {}", self.bpm);
        }
        if self.grid.dimension == 0 {
            bail!("grid dimension must be at least 1");
        }
        if self.grid.cell_size.x <= 0 || self.grid.cell_size.y <= 0 {
            bail!("cell size must be positive, got {:?}", self.grid.cell_size);
        }
        if self.grid.padding < 0 {
            bail!("padding can't be negative, got {}", self.grid.padding);
        }
        if !(1..=NUM_SLOTS).contains(&self.visible_slots) {
            bail!("visible_slots must be 1 or 2, got {}", self.visible_slots);
        }
        if self.audio.queue_capacity == 0 {
            bail!("audio queue capacity must be at least 1");
        }
        Ok(())
    }

    // relative sample paths are looked up next to the project dir
    pub fn resolve(mut self, base: &Path) -> Self {
        for path in [&mut self.samples.kick, &mut self.samples.snare] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    pub fn layout(&self) -> Layout {
        Layout {
            window: self.window,
            geometry: self.grid,
            visible_slots: self.visible_slots,
        }
    }
}
