// Owns every track: one grid and one loaded sample per instrument, plus the
// two on-screen slots that decide which grids are visible right now.
//
// Hidden tracks keep time. Switching a slot only changes which grid is drawn
// and clickable there; the grid it stops showing carries on exactly as before.

use tracing::{debug, trace};

use crate::audio_api::AudioSink;
use crate::shared::{Fill, Slot, V2, NUM_SLOTS};

use super::grid::{Grid, GridGeometry};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Instrument {
    Kick = 0,
    Snare = 1,
}

impl Instrument {
    pub const COUNT: usize = 2;
    pub const ALL: [Instrument; Instrument::COUNT] = [Instrument::Kick, Instrument::Snare];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::COUNT]
    }

    pub fn name(self) -> &'static str {
        match self {
            Instrument::Kick => "kick",
            Instrument::Snare => "snare",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub window: V2,
    pub geometry: GridGeometry,
    pub visible_slots: usize, // 1 or 2
}

#[derive(Clone, Copy, Debug)]
struct SlotView {
    instrument: Instrument,
    anchor: V2,
}

pub struct TrackSet<H> {
    grids: [Grid; Instrument::COUNT],
    handles: [H; Instrument::COUNT],
    slots: Vec<SlotView>,
}

impl<H> TrackSet<H> {
    pub fn new(layout: Layout, handles: [H; Instrument::COUNT]) -> Self {
        let grids = std::array::from_fn(|_| Grid::new(layout.geometry));
        let visible = layout.visible_slots.clamp(1, NUM_SLOTS);

        // center vertically, spread the grids evenly across the width
        let size = layout.geometry.predicted_total_size();
        let k = visible as i32;
        let ext_padding = (layout.window.x - k * size.x) / (k + 1);
        let center_y = layout.window.y / 2 - size.y / 2;

        let slots = (0..visible)
            .map(|i| {
                let i_ = i as i32;
                SlotView {
                    instrument: Instrument::ALL[i % Instrument::COUNT],
                    anchor: V2::new(ext_padding * (i_ + 1) + i_ * size.x, center_y),
                }
            })
            .collect();

        Self {
            grids,
            handles,
            slots,
        }
    }

    pub fn visible_slots(&self) -> usize {
        self.slots.len()
    }

    pub fn displayed(&self, slot: Slot) -> Option<Instrument> {
        self.slots.get(slot.index()).map(|s| s.instrument)
    }

    pub fn anchor(&self, slot: Slot) -> Option<V2> {
        self.slots.get(slot.index()).map(|s| s.anchor)
    }

    pub fn grid(&self, instrument: Instrument) -> &Grid {
        &self.grids[instrument.index()]
    }

    pub fn grid_mut(&mut self, instrument: Instrument) -> &mut Grid {
        &mut self.grids[instrument.index()]
    }

    // Rotate the instrument shown in `slot`. None if that slot isn't on screen.
    pub fn switch_slot(&mut self, slot: Slot) -> Option<Instrument> {
        let view = self.slots.get_mut(slot.index())?;
        view.instrument = view.instrument.next();
        debug!(?slot, instrument = view.instrument.name(), "switched slot");
        Some(view.instrument)
    }

    // Every visible grid gets a look at the click, each against its own anchor
    pub fn dispatch_click(&mut self, position: V2) {
        for view in &self.slots {
            let grid = &mut self.grids[view.instrument.index()];
            match grid.toggle_at(view.anchor, position) {
                Some(index) => debug!(instrument = view.instrument.name(), index, "toggled cell"),
                None => trace!(?position, "click missed grid"),
            }
        }
    }

    // Advance all grids, visible or not, and play whatever landed on an
    // enabled cell. Returns the instruments that were played.
    pub fn advance_all<A>(&mut self, tick: bool, audio: &mut A) -> Vec<Instrument>
    where
        A: AudioSink<Handle = H> + ?Sized,
    {
        let mut played = Vec::new();
        for instrument in Instrument::ALL {
            if self.grids[instrument.index()].advance(tick) {
                audio.play(&self.handles[instrument.index()]);
                played.push(instrument);
            }
        }
        played
    }

    pub fn render(&self) -> Vec<Fill> {
        self.slots
            .iter()
            .flat_map(|view| self.grids[view.instrument.index()].render(view.anchor))
            .collect()
    }
}
