use crate::shared::{Fill, Rgb, Rgba, V2};

// Whatever draws the frame. Positions and sizes are display units; it's up to
// the sink to map them onto real pixels or cells.
pub trait RenderSink {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, position: V2, size: V2, color: Rgba);
    fn present(&mut self) -> anyhow::Result<()>;

    fn fill(&mut self, fill: Fill) {
        self.fill_rect(fill.position, fill.size, fill.color);
    }
}
