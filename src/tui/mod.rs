// Terminal shell around the core: crossterm for input, ratatui for drawing.
// The core thinks in display units, the terminal in cells; Viewport converts.

use ratatui::layout::Rect;

use crate::shared::V2;

pub mod input;
pub mod view;

pub use input::TerminalInput;
pub use view::TerminalCanvas;

// The configured window stretched over the whole terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    window: V2,
}

impl Viewport {
    pub fn new(window: V2) -> Self {
        Self { window }
    }

    // display units per cell, per axis
    fn scale(&self, area: Rect) -> Option<(f64, f64)> {
        if area.width == 0 || area.height == 0 || self.window.x <= 0 || self.window.y <= 0 {
            return None;
        }
        Some((
            self.window.x as f64 / area.width as f64,
            self.window.y as f64 / area.height as f64,
        ))
    }

    // cells covered by a display rectangle, clipped to the area. Anything that
    // survives clipping is at least one cell wide so small pads don't vanish.
    pub fn to_cells(&self, area: Rect, position: V2, size: V2) -> Option<Rect> {
        let (sx, sy) = self.scale(area)?;
        let x0 = (position.x as f64 / sx).floor().max(0.0);
        let y0 = (position.y as f64 / sy).floor().max(0.0);
        let x1 = ((position.x + size.x) as f64 / sx).floor().max(x0 + 1.0);
        let y1 = ((position.y + size.y) as f64 / sy).floor().max(y0 + 1.0);
        let clamp = |v: f64| v.min(u16::MAX as f64) as u16;
        let rect = Rect::new(
            area.x.saturating_add(clamp(x0)),
            area.y.saturating_add(clamp(y0)),
            clamp(x1 - x0),
            clamp(y1 - y0),
        );
        let clipped = rect.intersection(area);
        (clipped.width > 0 && clipped.height > 0).then_some(clipped)
    }

    // display position at the middle of a cell
    pub fn to_display(&self, area: Rect, column: u16, row: u16) -> V2 {
        let Some((sx, sy)) = self.scale(area) else {
            return V2::default();
        };
        let cx = column.saturating_sub(area.x) as f64 + 0.5;
        let cy = row.saturating_sub(area.y) as f64 + 0.5;
        V2::new((cx * sx).floor() as i32, (cy * sy).floor() as i32)
    }
}
