//! beatgrid - a tiny two-track step sequencer
//!
//! The timing core (clock, grids, track set, input router) is plain state with
//! no I/O. It talks to the outside through three traits:
//! - `input::InputSource` for raw events
//! - `render_api::RenderSink` for colored rectangles
//! - `audio_api::AudioSink` for loading and playing samples
//!
//! `tui` and `audio` are the terminal + cpal implementations the binary uses.
pub mod app;
pub mod audio;
pub mod audio_api;
pub mod config;
pub mod input;
pub mod loader;
pub mod logging;
pub mod render_api;
pub mod sequencer;
pub mod shared;
pub mod tui;

// Re-export commonly used types
pub use app::{App, FrameReport, load_instruments};
pub use config::Config;
pub use sequencer::{Clock, Grid, GridGeometry, Instrument, TrackSet};
pub use shared::{Action, Slot, V2};
