use crate::shared::{Action, Slot, V2};

// Raw events, already stripped of whatever library produced them
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawEvent {
    WindowClose,
    PointerDown(V2),
    KeyDown { key: char, repeat: bool },
    Other,
}

// Anything that can hand us input events without blocking. None means the
// queue is empty for this frame.
pub trait InputSource {
    fn poll_next(&mut self) -> anyhow::Result<Option<RawEvent>>;
}

#[derive(Clone, Copy, Debug)]
pub struct InputRouter {
    switch_key: char,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self::new(' ')
    }
}

impl InputRouter {
    pub fn new(switch_key: char) -> Self {
        Self { switch_key }
    }

    pub fn route(&self, event: RawEvent) -> Option<Action> {
        match event {
            RawEvent::WindowClose => Some(Action::Quit),
            RawEvent::PointerDown(position) => Some(Action::ClickAt(position)),
            // only the left slot has a key, the right one stays put
            RawEvent::KeyDown { key, repeat: false } if key == self.switch_key => {
                Some(Action::SwitchTrack(Slot::Left))
            }
            _ => None,
        }
    }

    // Empty the source for this frame, keeping the order events arrived in
    pub fn drain<S: InputSource + ?Sized>(&self, source: &mut S) -> anyhow::Result<Vec<Action>> {
        let mut actions = Vec::new();
        while let Some(event) = source.poll_next()? {
            actions.extend(self.route(event));
        }
        Ok(actions)
    }
}
