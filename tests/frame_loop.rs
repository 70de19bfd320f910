use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use beatgrid::audio_api::AudioSink;
use beatgrid::input::{InputSource, RawEvent};
use beatgrid::render_api::RenderSink;
use beatgrid::shared::{Rgb, Rgba};
use beatgrid::{App, Config, Instrument, Slot, V2, load_instruments};

// One frame's worth of events per entry
#[derive(Default)]
struct ScriptedInput {
    frames: VecDeque<Vec<RawEvent>>,
    pending: VecDeque<RawEvent>,
    started: bool,
}

impl ScriptedInput {
    fn new(frames: Vec<Vec<RawEvent>>) -> Self {
        Self {
            frames: frames.into(),
            ..Self::default()
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll_next(&mut self) -> anyhow::Result<Option<RawEvent>> {
        if !self.started {
            self.started = true;
            self.pending = self.frames.pop_front().unwrap_or_default().into();
        }
        match self.pending.pop_front() {
            Some(e) => Ok(Some(e)),
            None => {
                self.started = false; // next poll belongs to the next frame
                Ok(None)
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum Op {
    Clear(Rgb),
    Fill(V2, V2, Rgba),
    Present,
}

#[derive(Default)]
struct RecordingCanvas {
    ops: Vec<Op>,
}

impl RenderSink for RecordingCanvas {
    fn clear(&mut self, color: Rgb) {
        self.ops.push(Op::Clear(color));
    }

    fn fill_rect(&mut self, position: V2, size: V2, color: Rgba) {
        self.ops.push(Op::Fill(position, size, color));
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.ops.push(Op::Present);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingAudio {
    loaded: Vec<PathBuf>,
    played: Vec<Instrument>,
    fail_on: Option<PathBuf>,
}

impl AudioSink for RecordingAudio {
    type Handle = Instrument;

    fn load(&mut self, path: &Path) -> anyhow::Result<Instrument> {
        if self.fail_on.as_deref() == Some(path) {
            anyhow::bail!("Error loading instrument sample {}", path.display());
        }
        self.loaded.push(path.to_path_buf());
        Ok(Instrument::ALL[self.loaded.len() - 1])
    }

    fn play(&mut self, handle: &Instrument) {
        self.played.push(*handle);
    }
}

const SUBDIVISION: f64 = 0.15; // one 16th at 100 bpm

// a point inside cell (2, 1) of the left grid, whose anchor is (79, 80)
const LEFT_CELL_6: V2 = V2::new(79 + 2 * 55 + 1, 80 + 55 + 5);

fn app() -> (App<Instrument>, RecordingAudio) {
    let mut audio = RecordingAudio::default();
    let handles = load_instruments(&mut audio, &Config::default().samples).unwrap();
    (App::new(&Config::default(), handles), audio)
}

#[test]
fn click_then_sixth_tick_triggers_once() {
    let (mut app, mut audio) = app();
    let mut input = ScriptedInput::new(vec![vec![RawEvent::PointerDown(LEFT_CELL_6)]]);
    let mut canvas = RecordingCanvas::default();

    // the first frame steps onto cell 0 with no time elapsed
    let first = app.frame(0.0, &mut input, &mut canvas, &mut audio).unwrap();
    assert!(first.tick);
    assert!(first.played.is_empty());
    assert_eq!(app.tracks().grid(Instrument::Kick).playhead(), 0);
    assert!(app.tracks().grid(Instrument::Kick).cell(6).unwrap().enabled);

    let mut fired_on = Vec::new();
    for clock_tick in 1..=20 {
        let report = app.frame(SUBDIVISION, &mut input, &mut canvas, &mut audio).unwrap();
        assert!(report.tick);
        if !report.played.is_empty() {
            assert_eq!(report.played, vec![Instrument::Kick]);
            fired_on.push(clock_tick);
        }
        if clock_tick == 5 {
            assert_eq!(app.tracks().grid(Instrument::Kick).playhead(), 5);
        }
    }
    assert_eq!(fired_on, vec![6]);
    assert_eq!(audio.played, vec![Instrument::Kick]);
}

#[test]
fn only_the_first_frame_ticks_without_elapsed_time() {
    let (mut app, mut audio) = app();
    app.tracks_mut().grid_mut(Instrument::Kick).set_enabled(0, true);
    let mut input = ScriptedInput::default();
    let mut canvas = RecordingCanvas::default();
    let ticks: Vec<bool> = (0..10)
        .map(|_| app.frame(0.0, &mut input, &mut canvas, &mut audio).unwrap().tick)
        .collect();
    assert_eq!(ticks.iter().filter(|t| **t).count(), 1);
    assert!(ticks[0]);
    assert_eq!(app.tracks().grid(Instrument::Kick).playhead(), 0);
    assert_eq!(audio.played, vec![Instrument::Kick]);
}

#[test]
fn frame_draws_both_grids_in_order() {
    let (mut app, mut audio) = app();
    let mut input = ScriptedInput::default();
    let mut canvas = RecordingCanvas::default();
    app.frame(0.0, &mut input, &mut canvas, &mut audio).unwrap();

    assert_eq!(canvas.ops.len(), 1 + 32 + 1);
    assert_eq!(canvas.ops[0], Op::Clear(Rgb::BLACK));
    assert_eq!(canvas.ops[33], Op::Present);
    let gray = Rgb::new(0xaa, 0xaa, 0xaa);
    // the first frame already moved both playheads onto cell 0
    assert_eq!(
        canvas.ops[1],
        Op::Fill(V2::new(79, 80), V2::new(50, 50), gray.with_alpha(0xaa))
    );
    assert_eq!(
        canvas.ops[2],
        Op::Fill(V2::new(79 + 55, 80), V2::new(50, 50), gray.with_alpha(0x88))
    );
    assert_eq!(
        canvas.ops[17],
        Op::Fill(V2::new(373, 80), V2::new(50, 50), gray.with_alpha(0xaa))
    );
    assert_eq!(
        canvas.ops[32],
        Op::Fill(V2::new(373 + 165, 80 + 165), V2::new(50, 50), gray.with_alpha(0x88))
    );
}

#[test]
fn switch_then_click_edits_the_newly_shown_grid() {
    let (mut app, mut audio) = app();
    let mut input = ScriptedInput::new(vec![vec![
        RawEvent::KeyDown { key: ' ', repeat: false },
        RawEvent::KeyDown { key: ' ', repeat: true },
        RawEvent::PointerDown(LEFT_CELL_6),
    ]]);
    let mut canvas = RecordingCanvas::default();
    app.frame(0.0, &mut input, &mut canvas, &mut audio).unwrap();

    assert_eq!(app.tracks().displayed(Slot::Left), Some(Instrument::Snare));
    assert!(app.tracks().grid(Instrument::Snare).cell(6).unwrap().enabled);
    assert!(!app.tracks().grid(Instrument::Kick).cell(6).unwrap().enabled);
}

#[test]
fn quit_finishes_the_frame_then_stops() {
    let (mut app, mut audio) = app();
    let mut input = ScriptedInput::new(vec![vec![], vec![RawEvent::WindowClose, RawEvent::Other]]);
    let mut canvas = RecordingCanvas::default();

    let first = app.frame(SUBDIVISION, &mut input, &mut canvas, &mut audio).unwrap();
    assert!(!first.quit);
    let second = app.frame(SUBDIVISION, &mut input, &mut canvas, &mut audio).unwrap();
    assert!(second.quit);
    assert!(!app.is_running());
    assert_eq!(canvas.ops.iter().filter(|op| **op == Op::Present).count(), 2);
    assert_eq!(app.tracks().grid(Instrument::Kick).playhead(), 1);
}

#[test]
fn load_stops_at_first_missing_sample() {
    let config = Config::default();
    let mut audio = RecordingAudio {
        fail_on: Some(config.samples.kick.clone()),
        ..RecordingAudio::default()
    };
    let err = load_instruments(&mut audio, &config.samples).unwrap_err();
    assert!(format!("{err:#}").contains("kick.wav"));
    assert!(audio.loaded.is_empty());
}

#[test]
fn load_goes_in_instrument_order() {
    let config = Config::default().resolve(Path::new("/samples"));
    let mut audio = RecordingAudio::default();
    let handles = load_instruments(&mut audio, &config.samples).unwrap();
    assert_eq!(handles, [Instrument::Kick, Instrument::Snare]);
    assert_eq!(
        audio.loaded,
        vec![PathBuf::from("/samples/kick.wav"), PathBuf::from("/samples/snare.wav")]
    );
}
