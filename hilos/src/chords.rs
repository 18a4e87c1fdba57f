use std::ops::Range;

use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::{
    error::ConfigError,
    geometry::Point,
    grid::Grid,
    pins::PinTable,
    verboser::{Message, Verboser},
};

/// Valid index separations between linked pins on the ring.
#[derive(Clone, Copy)]
pub struct Distancer {
    min: usize,
    max: usize,
}

impl Distancer {
    pub fn new(count: usize, distance: usize) -> Result<Self, ConfigError> {
        if count <= 2 * distance {
            Err(ConfigError::PinDistance {
                pins: count,
                min_distance: distance,
            })
        } else {
            Ok(Self {
                min: distance,
                max: count - distance,
            })
        }
    }

    /// Candidate index differences for the greedy step, in the tie breaking
    /// order: increasing difference from the current pin.
    pub fn differences(&self) -> Range<usize> {
        self.min..self.max
    }
}

/// Precomputed chord rasters for every eligible pin pair.
///
/// Stored as one flat arena of linear pixel indices plus an `i * N + j`
/// indexed span table; (i, j) and (j, i) share a span. Precomputing here
/// keeps rasterization out of the greedy loop, where it would dominate.
pub struct ChordTable {
    spans: Vec<Range<u32>>,
    arena: Vec<u32>,
    distancer: Distancer,
    count: usize,
}

impl ChordTable {
    pub fn bake(
        pins: &PinTable,
        grid: &Grid,
        min_distance: usize,
        verboser: &mut impl Verboser,
    ) -> Result<Self, ConfigError> {
        let count = pins.len();
        let distancer = Distancer::new(count, min_distance)?;
        verboser.verbose(Message::Baking);

        // Pairs are independent; rasterize rows in parallel, then assemble
        // the arena sequentially so span order stays deterministic.
        let rows: Vec<Vec<(usize, Vec<u32>)>> = (0..count)
            .into_par_iter()
            .map(|i| {
                (i + min_distance..count)
                    .map(|j| (j, raster(pins.pins()[i], pins.pins()[j], grid)))
                    .collect()
            })
            .collect();

        let mut spans = vec![0u32..0u32; count * count];
        let mut arena = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            for (j, pixels) in row {
                let start = arena.len() as u32;
                arena.extend_from_slice(&pixels);
                let span = start..arena.len() as u32;
                spans[i * count + j] = span.clone();
                spans[j * count + i] = span;
            }
        }
        Ok(Self {
            spans,
            arena,
            distancer,
            count,
        })
    }

    /// Ordered pixel indices of the chord between pins `i` and `j`; empty
    /// for pairs below the minimum separation.
    pub fn chord(&self, i: usize, j: usize) -> &[u32] {
        let span = &self.spans[i * self.count + j];
        &self.arena[span.start as usize..span.end as usize]
    }

    pub fn distancer(&self) -> Distancer {
        self.distancer
    }

    pub fn pin_count(&self) -> usize {
        self.count
    }
}

/// Evenly interpolated lattice points between two pins, linspace style:
/// `trunc(euclidean length)` samples including both endpoints, each
/// coordinate truncated toward zero. The final sample is forced onto the
/// exact endpoint.
fn raster(a: Point<i64>, b: Point<i64>, grid: &Grid) -> Vec<u32> {
    let delta = (b - a).as_::<f64>();
    let samples = (delta.x * delta.x + delta.y * delta.y).sqrt() as usize;
    match samples {
        0 => Vec::new(),
        1 => vec![index_of(a, grid)],
        _ => {
            let step_x = delta.x / (samples - 1) as f64;
            let step_y = delta.y / (samples - 1) as f64;
            (0..samples)
                .map(|k| {
                    let point = if k == samples - 1 {
                        b
                    } else {
                        Point::new(
                            (a.x as f64 + step_x * k as f64) as i64,
                            (a.y as f64 + step_y * k as f64) as i64,
                        )
                    };
                    index_of(point, grid)
                })
                .collect()
        }
    }
}

fn index_of(point: Point<i64>, grid: &Grid) -> u32 {
    debug_assert!(point.x >= 0 && (point.x as u32) < grid.width);
    debug_assert!(point.y >= 0 && (point.y as u32) < grid.height);
    point.y as u32 * grid.width + point.x as u32
}

#[cfg(test)]
mod tests {
    use super::{ChordTable, Distancer};
    use crate::{error::ConfigError, grid::Grid, pins::PinTable, verboser::Silent};

    fn table(pins: usize, side: u32, min_distance: usize) -> ChordTable {
        let grid = Grid::square(side);
        let pin_table = PinTable::circular(pins, &grid, &mut Silent);
        ChordTable::bake(&pin_table, &grid, min_distance, &mut Silent).unwrap()
    }

    #[test]
    fn chords_are_symmetric() {
        let chords = table(60, 200, 10);
        for (i, j) in [(0, 15), (3, 42), (10, 55)] {
            assert!(!chords.chord(i, j).is_empty());
            assert_eq!(chords.chord(i, j), chords.chord(j, i));
        }
    }

    #[test]
    fn near_pairs_have_no_chord() {
        let chords = table(60, 200, 10);
        assert!(chords.chord(0, 5).is_empty());
        assert!(chords.chord(20, 21).is_empty());
    }

    #[test]
    fn chord_length_is_the_truncated_euclidean_distance() {
        let grid = Grid::square(200);
        let pin_table = PinTable::circular(60, &grid, &mut Silent);
        let chords = ChordTable::bake(&pin_table, &grid, 10, &mut Silent).unwrap();
        let a = pin_table.pins()[0];
        let b = pin_table.pins()[30];
        let expected = (((b.x - a.x).pow(2) + (b.y - a.y).pow(2)) as f64).sqrt() as usize;
        assert_eq!(chords.chord(0, 30).len(), expected);
    }

    #[test]
    fn chord_spans_both_endpoints() {
        let grid = Grid::square(200);
        let pin_table = PinTable::circular(60, &grid, &mut Silent);
        let chords = ChordTable::bake(&pin_table, &grid, 10, &mut Silent).unwrap();
        let a = pin_table.pins()[5];
        let b = pin_table.pins()[40];
        let chord = chords.chord(5, 40);
        assert_eq!(chord[0], a.y as u32 * 200 + a.x as u32);
        assert_eq!(chord[chord.len() - 1], b.y as u32 * 200 + b.x as u32);
    }

    #[test]
    fn too_few_pins_for_the_distance_fails() {
        assert!(matches!(
            Distancer::new(10, 20),
            Err(ConfigError::PinDistance {
                pins: 10,
                min_distance: 20
            })
        ));
        // Equality violates the invariant too: the candidate range is empty.
        assert!(Distancer::new(40, 20).is_err());
        assert!(Distancer::new(41, 20).is_ok());
    }
}
