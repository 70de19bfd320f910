use std::io::Stdout;
use std::time::{Duration, Instant};

use ratatui::backend::CrosstermBackend;
use ratatui::buffer::Buffer;
use ratatui::style::{Color, Style};
use ratatui::Terminal;

use crate::render_api::RenderSink;
use crate::shared::{Rgb, Rgba, V2};

use super::Viewport;

const FRAME_TIME: Duration = Duration::from_millis(16); // ~60fps, our stand-in for vsync

// Collects the frame's rectangles and blits them all on present
pub struct TerminalCanvas {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    viewport: Viewport,
    background: Rgb,
    fills: Vec<(V2, V2, Rgba)>,
    last_present: Instant,
}

impl TerminalCanvas {
    pub fn new(window: V2) -> anyhow::Result<Self> {
        let backend = CrosstermBackend::new(std::io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            viewport: Viewport::new(window),
            background: Rgb::BLACK,
            fills: Vec::new(),
            last_present: Instant::now(),
        })
    }
}

impl RenderSink for TerminalCanvas {
    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.fills.clear();
    }

    fn fill_rect(&mut self, position: V2, size: V2, color: Rgba) {
        self.fills.push((position, size, color));
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let (viewport, background, fills) = (self.viewport, self.background, &self.fills);
        self.terminal.draw(|frame| {
            paint(frame.buffer_mut(), viewport, background, fills);
        })?;

        // block for the rest of the frame, like a vsynced present would
        let spent = self.last_present.elapsed();
        if let Some(rest) = FRAME_TIME.checked_sub(spent) {
            std::thread::sleep(rest);
        }
        self.last_present = Instant::now();
        Ok(())
    }
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

// Fill the whole buffer with the background, then every rectangle in order,
// blended against the background since cells can't be translucent.
pub fn paint(buf: &mut Buffer, viewport: Viewport, background: Rgb, fills: &[(V2, V2, Rgba)]) {
    let area = buf.area;
    buf.set_style(area, Style::default().bg(to_color(background)));
    for &(position, size, color) in fills {
        if let Some(rect) = viewport.to_cells(area, position, size) {
            buf.set_style(rect, Style::default().bg(to_color(color.over(background))));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;

    fn bg_at(buf: &Buffer, x: u16, y: u16) -> Color {
        buf.cell((x, y)).map(|c| c.bg).unwrap_or(Color::Reset)
    }

    #[test]
    fn test_paint_blends_against_background() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        let viewport = Viewport::new(V2::new(20, 10));
        let white = Rgb::new(0xff, 0xff, 0xff);
        let fills = [(V2::new(2, 2), V2::new(3, 3), white.with_alpha(0x88))];
        paint(&mut buf, viewport, Rgb::BLACK, &fills);

        assert_eq!(bg_at(&buf, 0, 0), Color::Rgb(0, 0, 0));
        assert_eq!(bg_at(&buf, 2, 2), Color::Rgb(0x88, 0x88, 0x88));
        assert_eq!(bg_at(&buf, 4, 4), Color::Rgb(0x88, 0x88, 0x88));
        assert_eq!(bg_at(&buf, 5, 5), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_paint_ignores_offscreen() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 4));
        let viewport = Viewport::new(V2::new(4, 4));
        let fills = [(V2::new(10, 10), V2::new(2, 2), Rgb::new(1, 2, 3).with_alpha(0xff))];
        paint(&mut buf, viewport, Rgb::BLACK, &fills);
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(bg_at(&buf, x, y), Color::Rgb(0, 0, 0));
            }
        }
    }
}
