// The frame loop. Everything runs on one thread: drain input, apply it, tick
// the clock, advance every track, draw. The sinks are injected so the whole
// loop can run against fakes.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::audio_api::AudioSink;
use crate::config::{Config, SampleConfig};
use crate::input::{InputRouter, InputSource};
use crate::render_api::RenderSink;
use crate::sequencer::{Clock, Instrument, TrackSet};
use crate::shared::{Action, Rgb};

const BACKGROUND: Rgb = Rgb::BLACK;

// What happened during one frame, mostly for tests and logging
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub tick: bool,
    pub played: Vec<Instrument>,
    pub quit: bool,
}

pub struct App<H> {
    clock: Clock,
    tracks: TrackSet<H>,
    router: InputRouter,
    running: bool,
    startup_tick: bool, // the first frame always steps onto cell 0
}

impl<H> App<H> {
    pub fn new(config: &Config, handles: [H; Instrument::COUNT]) -> Self {
        Self {
            clock: Clock::new(config.bpm),
            tracks: TrackSet::new(config.layout(), handles),
            router: InputRouter::new(config.switch_key),
            running: true,
            startup_tick: true,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tracks(&self) -> &TrackSet<H> {
        &self.tracks
    }

    pub fn tracks_mut(&mut self) -> &mut TrackSet<H> {
        &mut self.tracks
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::ClickAt(position) => self.tracks.dispatch_click(position),
            Action::SwitchTrack(slot) => {
                self.tracks.switch_slot(slot);
            }
        }
    }

    // One whole frame. A quit still lets the frame finish; the caller stops
    // looping afterwards.
    pub fn frame<I, R, A>(
        &mut self,
        elapsed: f64,
        input: &mut I,
        render: &mut R,
        audio: &mut A,
    ) -> anyhow::Result<FrameReport>
    where
        I: InputSource + ?Sized,
        R: RenderSink + ?Sized,
        A: AudioSink<Handle = H> + ?Sized,
    {
        for action in self.router.drain(input)? {
            self.apply(action);
        }

        let clock_tick = self.clock.tick(elapsed);
        let tick = std::mem::take(&mut self.startup_tick) || clock_tick;
        if tick {
            trace!("tick");
        }
        let played = self.tracks.advance_all(tick, audio);
        if !played.is_empty() {
            debug!(?played, "triggered");
        }

        render.clear(BACKGROUND);
        for fill in self.tracks.render() {
            render.fill(fill);
        }
        render.present()?;

        Ok(FrameReport {
            tick,
            played,
            quit: !self.running,
        })
    }

    // Run until someone asks to quit
    pub fn run<I, R, A>(&mut self, input: &mut I, render: &mut R, audio: &mut A) -> anyhow::Result<()>
    where
        I: InputSource + ?Sized,
        R: RenderSink + ?Sized,
        A: AudioSink<Handle = H> + ?Sized,
    {
        let mut last_frame = Instant::now();
        while self.running {
            let now = Instant::now();
            let elapsed = now.saturating_duration_since(last_frame).as_secs_f64();
            last_frame = now;
            self.frame(elapsed, input, render, audio)?;
        }
        info!("quit");
        Ok(())
    }
}

// Load every instrument's sample up front, in instrument order. The first
// failure wins.
pub fn load_instruments<A>(
    audio: &mut A,
    samples: &SampleConfig,
) -> anyhow::Result<[A::Handle; Instrument::COUNT]>
where
    A: AudioSink + ?Sized,
{
    let mut handles = Vec::with_capacity(Instrument::COUNT);
    for instrument in Instrument::ALL {
        let path = samples.path(instrument);
        let handle = audio.load(path)?;
        info!(instrument = instrument.name(), path = %path.display(), "loaded sample");
        handles.push(handle);
    }
    handles
        .try_into()
        .map_err(|_| anyhow::anyhow!("expected {} instruments", Instrument::COUNT))
}
