use serde::{Deserialize, Serialize};

use crate::shared::{Fill, Rgb, V2};

const ENABLED: Rgb = Rgb::new(0xff, 0xff, 0xff);
const DISABLED: Rgb = Rgb::new(0xaa, 0xaa, 0xaa);
const PLAYHEAD_ALPHA: u8 = 0xaa;
const IDLE_ALPHA: u8 = 0x88;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub enabled: bool, // has it been toggled by a click?
    pub playhead: bool, // derived, exactly one per grid
}

// Everything needed to lay a grid out, known before any grid exists
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridGeometry {
    pub cell_size: V2,
    pub dimension: usize, // N, for an N x N grid
    pub padding: i32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_size: V2::new(50, 50),
            dimension: 4,
            padding: 5,
        }
    }
}

impl GridGeometry {
    pub fn cell_count(&self) -> usize {
        self.dimension * self.dimension
    }

    pub fn predicted_total_size(&self) -> V2 {
        let n = self.dimension as i32;
        V2::new(
            self.cell_size.x * n + self.padding * (n - 1),
            self.cell_size.y * n + self.padding * (n - 1),
        )
    }

    // top left corner of a cell, row-major
    pub fn cell_origin(&self, anchor: V2, index: usize) -> V2 {
        let x = (index % self.dimension) as i32;
        let y = (index / self.dimension) as i32;
        V2::new(
            anchor.x + x * (self.cell_size.x + self.padding),
            anchor.y + y * (self.cell_size.y + self.padding),
        )
    }

    fn cell_contains(&self, anchor: V2, index: usize, point: V2) -> bool {
        let origin = self.cell_origin(anchor, index);
        point.x >= origin.x
            && point.x < origin.x + self.cell_size.x
            && point.y >= origin.y
            && point.y < origin.y + self.cell_size.y
    }
}

#[derive(Clone, Debug)]
pub struct Grid {
    geometry: GridGeometry,
    cells: Box<[Cell]>, // fixed at construction, never resized
    playhead: usize,
}

impl Grid {
    pub fn new(geometry: GridGeometry) -> Self {
        let geometry = GridGeometry {
            dimension: geometry.dimension.max(1),
            ..geometry
        };
        let mut cells = vec![Cell::default(); geometry.cell_count()].into_boxed_slice();
        // parked on the last cell so the very first tick lands on cell 0
        let playhead = cells.len() - 1;
        cells[playhead].playhead = true;
        Self {
            geometry,
            cells,
            playhead,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn playhead(&self) -> usize {
        self.playhead
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.enabled = enabled;
        }
    }

    // Flip the cell under `position`, if any. Cells never overlap so at most
    // one cell changes.
    pub fn toggle_at(&mut self, anchor: V2, position: V2) -> Option<usize> {
        let index = (0..self.cells.len())
            .find(|&i| self.geometry.cell_contains(anchor, i, position))?;
        let cell = &mut self.cells[index];
        cell.enabled = !cell.enabled;
        Some(index)
    }

    // Move the playhead on a tick and report whether the cell it landed on
    // should sound. Without a tick nothing changes.
    pub fn advance(&mut self, tick: bool) -> bool {
        if !tick {
            return false;
        }
        self.cells[self.playhead].playhead = false;
        self.playhead = (self.playhead + 1) % self.cells.len();
        let cell = &mut self.cells[self.playhead];
        cell.playhead = true;
        cell.enabled
    }

    pub fn render(&self, anchor: V2) -> Vec<Fill> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let base = if cell.enabled { ENABLED } else { DISABLED };
                let alpha = if cell.playhead { PLAYHEAD_ALPHA } else { IDLE_ALPHA };
                Fill {
                    position: self.geometry.cell_origin(anchor, i),
                    size: self.geometry.cell_size,
                    color: base.with_alpha(alpha),
                }
            })
            .collect()
    }
}
