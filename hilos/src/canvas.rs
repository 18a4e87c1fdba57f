use std::collections::TryReserveError;

use image::GrayImage;

use crate::geometry::Point;

/// Side of the encoded PNG, independent of the working resolution.
pub const FINAL_SIDE: u32 = 500;

const STROKE_THICKNESS: i64 = 4;

/// Oversized stroke accumulator. Chords are drawn at `scale` times the
/// working resolution and box averaged down once at the end; the upscale
/// plus downsample stands in for true anti-aliasing.
pub struct StrokeCanvas {
    pixels: Vec<u8>,
    side: u32,
    scale: u32,
}

impl StrokeCanvas {
    pub fn new(working_side: u32, scale: u32) -> Result<Self, TryReserveError> {
        let side = working_side * scale;
        let len = side as usize * side as usize;
        let mut pixels = Vec::new();
        // At the default 500 * 50 this is a 625 MB buffer; surface the
        // allocation failure instead of aborting.
        pixels.try_reserve_exact(len)?;
        pixels.resize(len, 255);
        Ok(Self {
            pixels,
            side,
            scale,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Draws a fixed thickness black stroke between two working resolution
    /// points, scaled onto the canvas.
    pub fn stroke(&mut self, a: Point<i64>, b: Point<i64>) {
        let a = a * self.scale as i64;
        let b = b * self.scale as i64;
        let delta = b - a;
        let steps = delta.x.abs().max(delta.y.abs());
        let steep = delta.y.abs() > delta.x.abs();
        for k in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                k as f64 / steps as f64
            };
            let x = (a.x as f64 + delta.x as f64 * t).round() as i64;
            let y = (a.y as f64 + delta.y as f64 * t).round() as i64;
            for w in -(STROKE_THICKNESS / 2)..STROKE_THICKNESS - STROKE_THICKNESS / 2 {
                if steep {
                    self.put(x + w, y);
                } else {
                    self.put(x, y + w);
                }
            }
        }
    }

    fn put(&mut self, x: i64, y: i64) {
        if x >= 0 && y >= 0 && (x as u32) < self.side && (y as u32) < self.side {
            self.pixels[y as usize * self.side as usize + x as usize] = 0;
        }
    }

    /// Area averaging downsample to a square of `out_side` pixels.
    pub fn downsample(&self, out_side: u32) -> GrayImage {
        let side = self.side as u64;
        let out = out_side as u64;
        let mut buffer = Vec::with_capacity((out * out) as usize);
        for oy in 0..out {
            let y0 = oy * side / out;
            let y1 = ((oy + 1) * side / out).clamp(y0 + 1, side);
            for ox in 0..out {
                let x0 = ox * side / out;
                let x1 = ((ox + 1) * side / out).clamp(x0 + 1, side);
                let mut sum = 0u64;
                for y in y0..y1 {
                    for x in x0..x1 {
                        sum += self.pixels[(y * side + x) as usize] as u64;
                    }
                }
                let count = (y1 - y0) * (x1 - x0);
                buffer.push(((sum + count / 2) / count) as u8);
            }
        }
        GrayImage::from_vec(out_side, out_side, buffer)
            .expect("downsample buffer matches its dimensions")
    }
}

#[cfg(test)]
mod tests {
    use super::StrokeCanvas;
    use crate::geometry::Point;

    #[test]
    fn stroke_marks_the_scaled_segment() {
        let mut canvas = StrokeCanvas::new(10, 4).unwrap();
        canvas.stroke(Point::new(1, 5), Point::new(8, 5));
        let side = 40usize;
        // Midpoint of the stroke, at scaled coordinates.
        assert_eq!(canvas.pixels()[20 * side + 16], 0);
        // Far corner untouched.
        assert_eq!(canvas.pixels()[side * side - 1], 255);
    }

    #[test]
    fn downsample_averages_blocks() {
        let mut canvas = StrokeCanvas::new(4, 1).unwrap();
        canvas.stroke(Point::new(0, 0), Point::new(0, 0));
        let small = canvas.downsample(2);
        // The top left 2x2 block holds the stamped pixels; everything else
        // stays white.
        assert!(small.get_pixel(0, 0).0[0] < 255);
        assert_eq!(small.get_pixel(1, 1).0[0], 255);
    }

    #[test]
    fn downsample_is_exact_on_uniform_input() {
        let canvas = StrokeCanvas::new(8, 2).unwrap();
        let small = canvas.downsample(4);
        assert!(small.pixels().all(|p| p.0[0] == 255));
    }
}
