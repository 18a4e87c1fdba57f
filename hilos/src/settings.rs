use serde::{Deserialize, Serialize};

/// Generation parameters. Defaults match the physical frames the output is
/// built on: 240 pins on a 500 pixel working circle, 3500 threads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Number of pins surrounding the image.
    pub pins: usize,
    /// Number of chords to draw.
    pub lines: usize,
    /// Side of the square working buffer, in pixels.
    pub pixel_width: u32,
    /// Minimum circular index distance between linked pins.
    pub min_distance: usize,
    /// How many recently visited pins are excluded from reselection.
    pub recent_window: usize,
    /// Ink debt removed from every residual cell a chord crosses.
    pub line_width: f64,
    /// Upscale factor of the stroke canvas over the working resolution.
    pub scale: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pins: 240,
            lines: 3500,
            pixel_width: 500,
            min_distance: 20,
            recent_window: 20,
            line_width: 30.0,
            scale: 50,
        }
    }
}

impl Settings {
    /// Clamps pins and lines into their supported ranges. Out of range
    /// values are accepted permissively; only the derived invariant
    /// `pins > 2 * min_distance` is rejected, later, by the chord table.
    pub fn clamped(mut self) -> Self {
        self.pins = self.pins.clamp(10, 1000);
        self.lines = self.lines.clamp(100, 10000);
        self.pixel_width = self.pixel_width.max(1);
        self
    }
}
