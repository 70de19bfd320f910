//! Timing and sequencing core: tempo clock, per-instrument step grids, and the
//! track set that owns them. No I/O happens in here.
pub mod clock;
pub mod grid;
pub mod tracks;

pub use clock::Clock;
pub use grid::{Cell, Grid, GridGeometry};
pub use tracks::{Instrument, Layout, TrackSet};
