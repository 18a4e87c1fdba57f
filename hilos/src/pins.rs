use crate::{
    geometry::Point,
    grid::Grid,
    verboser::{Message, Verboser},
};

/// Evenly spaced pins on the canvas circle, built once and immutable.
#[derive(Clone)]
pub struct PinTable {
    pins: Vec<Point<i64>>,
}

impl PinTable {
    /// Pin k sits at angle `2*pi*k / count`, floor truncated to integer
    /// coordinates. Rounding instead of flooring would shift every pin and
    /// with it every cached chord raster.
    pub fn circular(count: usize, grid: &Grid, verboser: &mut impl Verboser) -> Self {
        let center = Point::new(grid.width as f64 / 2.0, grid.height as f64 / 2.0);
        let radius = grid.width as f64 / 2.0 - 0.5;
        let increment = std::f64::consts::TAU / count as f64;
        let pins = (0..count)
            .map(|i| {
                verboser.verbose(Message::CreatingPin(i));
                let theta = i as f64 * increment;
                Point::new(
                    (center.x + radius * theta.cos()).floor() as i64,
                    (center.y + radius * theta.sin()).floor() as i64,
                )
            })
            .collect();
        Self { pins }
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn pins(&self) -> &[Point<i64>] {
        &self.pins
    }
}

#[cfg(test)]
mod tests {
    use super::PinTable;
    use crate::{grid::Grid, verboser::Silent};

    #[test]
    fn pins_are_distinct_and_on_the_circle() {
        let grid = Grid::square(500);
        let table = PinTable::circular(240, &grid, &mut Silent);
        assert_eq!(table.len(), 240);

        let radius = 500.0 / 2.0 - 0.5;
        for pin in table.pins() {
            let dx = pin.x as f64 - 250.0;
            let dy = pin.y as f64 - 250.0;
            let distance = (dx * dx + dy * dy).sqrt();
            // Floor truncation moves each coordinate at most one pixel.
            assert!((distance - radius).abs() < 1.5, "pin off circle: {distance}");
            assert!(pin.x >= 0 && pin.x < 500 && pin.y >= 0 && pin.y < 500);
        }
        for (i, a) in table.pins().iter().enumerate() {
            for b in table.pins().iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn first_pin_lies_on_the_positive_x_axis() {
        let grid = Grid::square(500);
        let table = PinTable::circular(60, &grid, &mut Silent);
        assert_eq!(table.pins()[0].x, 499);
        assert_eq!(table.pins()[0].y, 250);
    }
}
