use crate::image::GrayMap;

/// Remaining ink debt per pixel, initialized to `255 - intensity`.
///
/// Values are never clamped: a heavily inked cell goes negative and keeps
/// accumulating, which is what steers later chords away from it. Clamping
/// to zero here changes which chords win.
pub struct Residual {
    values: Vec<f64>,
}

impl Residual {
    pub fn from_image(image: &GrayMap) -> Self {
        Self {
            values: image
                .pixels()
                .iter()
                .map(|&intensity| 255.0 - intensity as f64)
                .collect(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Ink debt removed by this chord. Duplicate lattice points are summed
    /// as many times as they occur in the raster.
    pub fn score(&self, chord: &[u32]) -> f64 {
        chord.iter().map(|&idx| self.values[idx as usize]).sum()
    }

    /// Debits `amount` once per distinct pixel. A chord's duplicates are
    /// always consecutive (both coordinates are monotone along the line),
    /// so skipping repeats of the previous index is enough.
    pub fn darken(&mut self, chord: &[u32], amount: f64) {
        let mut previous = None;
        for &idx in chord {
            if previous != Some(idx) {
                self.values[idx as usize] -= amount;
            }
            previous = Some(idx);
        }
    }
}
