// The input plan:
//
// Mouse:
//   left button down   //  PointerDown(position under the cursor, in display units)
//
// Keys:
//   Space              //  KeyDown(' ') -> SwitchTrack(Left), ignored while held (repeat)
//   Esc / Ctrl-C       //  WindowClose -> Quit
//
// The idea of the rendering process:
//   - Everything the core knows about is in "display units", a virtual window
//     (667x375 by default, half an iphone 6 screen). The grids never see the
//     terminal.
//   - Each frame the core clears to black, then emits one filled rectangle per
//     pad of each visible grid. The terminal canvas scales those rectangles onto
//     cells and blends the alpha against the clear color itself.
//   - Enabled pads are white, disabled pads are light gray, and the pad under the
//     playhead is drawn a bit more opaque than the rest.

use serde::{Deserialize, Serialize};

pub const SUBDIVISIONS_PER_BEAT: u32 = 4; // 16th notes
pub const NUM_SLOTS: usize = 2;

// ye olde types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct V2 {
    pub x: i32,
    pub y: i32,
}

impl V2 {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for V2 {
    type Output = V2;
    fn add(self, rhs: V2) -> V2 {
        V2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn with_alpha(self, a: u8) -> Rgba {
        Rgba { r: self.r, g: self.g, b: self.b, a }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    // "source over" against an opaque background, terminals have no alpha
    pub fn over(self, bg: Rgb) -> Rgb {
        let mix = |fg: u8, bg: u8| -> u8 {
            let a = self.a as u32;
            ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
        };
        Rgb::new(mix(self.r, bg.r), mix(self.g, bg.g), mix(self.b, bg.b))
    }
}

// One filled rectangle, what a grid hands to the render sink
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    pub position: V2,
    pub size: V2,
    pub color: Rgba,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Left = 0,
    Right = 1,
}

impl Slot {
    pub const ALL: [Slot; NUM_SLOTS] = [Slot::Left, Slot::Right];

    pub fn index(self) -> usize {
        self as usize
    }
}

// What the rest of the app can ask the core to do, resolved from raw input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    ClickAt(V2),
    SwitchTrack(Slot),
}
