use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::terminal;
use ratatui::layout::Rect;

use crate::input::{InputSource, RawEvent};
use crate::shared::V2;

use super::Viewport;

// poll for input from the terminal without waiting, one event at a time
pub struct TerminalInput {
    viewport: Viewport,
}

impl TerminalInput {
    pub fn new(window: V2) -> Self {
        Self {
            viewport: Viewport::new(window),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll_next(&mut self) -> anyhow::Result<Option<RawEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        let raw = match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                // the canvas always takes the whole terminal
                let (cols, rows) = terminal::size()?;
                let area = Rect::new(0, 0, cols, rows);
                RawEvent::PointerDown(self.viewport.to_display(area, column, row))
            }
            _ => RawEvent::Other,
        };
        Ok(Some(raw))
    }
}

// Esc and ctrl-c are the terminal's version of closing the window
fn map_key(key: KeyEvent) -> RawEvent {
    if key.kind == KeyEventKind::Release {
        return RawEvent::Other;
    }
    let repeat = key.kind == KeyEventKind::Repeat;
    match key.code {
        KeyCode::Esc => RawEvent::WindowClose,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => RawEvent::WindowClose,
        KeyCode::Char(c) => RawEvent::KeyDown { key: c, repeat },
        KeyCode::Tab => RawEvent::KeyDown { key: '\t', repeat },
        KeyCode::Enter => RawEvent::KeyDown { key: '\n', repeat },
        _ => RawEvent::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, kind)
    }

    #[test]
    fn test_map_keys() {
        let press = KeyEventKind::Press;
        assert_eq!(map_key(key(KeyCode::Esc, KeyModifiers::NONE, press)), RawEvent::WindowClose);
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL, press)),
            RawEvent::WindowClose
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyModifiers::NONE, press)),
            RawEvent::KeyDown { key: ' ', repeat: false }
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Repeat)),
            RawEvent::KeyDown { key: ' ', repeat: true }
        );
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyModifiers::NONE, KeyEventKind::Release)),
            RawEvent::Other
        );
        assert_eq!(map_key(key(KeyCode::F(1), KeyModifiers::NONE, press)), RawEvent::Other);
    }
}
