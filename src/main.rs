use std::path::PathBuf;

use clap::Parser;
use crossterm::terminal;
use tracing::info;

use beatgrid::audio::Output;
use beatgrid::tui::{TerminalCanvas, TerminalInput};
use beatgrid::{App, Config, load_instruments, logging};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory the sample paths are relative to
    sample_dir: Option<PathBuf>,

    /// JSON config file, anything missing keeps its default
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the tempo
    #[arg(long)]
    bpm: Option<f64>,

    /// Write logs here instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    logging::init(args.log_file.as_deref())?;

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bpm) = args.bpm {
        config.bpm = bpm;
    }
    config.validate()?;
    let sample_dir = args
        .sample_dir
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config = config.resolve(&sample_dir);
    info!(?config, "starting");

    // samples first, a missing one should fail before we take over the terminal
    let mut audio = Output::open(&config.audio);
    let handles = load_instruments(&mut audio, &config.samples)?;
    let mut app = App::new(&config, handles);

    terminal::enable_raw_mode()?;
    let _guard = RawModeGuard; // auto drops when out of scope
    crossterm::execute!(
        std::io::stdout(),
        terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;
    // Enable keyboard enhancement for real press/repeat detection.
    // Falls back gracefully if the terminal doesn't support it.
    let _ = crossterm::execute!(
        std::io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        )
    );

    let mut canvas = TerminalCanvas::new(config.window)?;
    let mut input = TerminalInput::new(config.window);
    app.run(&mut input, &mut canvas, &mut audio)
}

struct RawModeGuard;
impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags,
            crossterm::event::DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
