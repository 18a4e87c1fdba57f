use std::ops::Deref;
use std::path::Path;

use image::{imageops::FilterType, DynamicImage};

use crate::{
    error::Error,
    grid::Grid,
    verboser::{Message, Verboser},
};

#[derive(Clone)]
pub struct PixelMap<T> {
    pixels: Vec<T>,
    grid: Grid,
}

impl<T> PixelMap<T> {
    pub fn from_raw(pixels: Vec<T>, grid: Grid) -> Self {
        assert_eq!(pixels.len(), grid.len());
        Self { pixels, grid }
    }

    pub fn pixels(&self) -> &[T] {
        &self.pixels
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl<T> Deref for PixelMap<T> {
    type Target = Grid;

    fn deref(&self) -> &Self::Target {
        &self.grid
    }
}

/// The masked working buffer: square, single channel, 255 outside the
/// canvas circle.
pub type GrayMap = PixelMap<u8>;

pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage, Error> {
    image::open(path).map_err(Error::from_image)
}

/// Decodes the source into an S x S masked intensity buffer.
///
/// Both dimensions are resized directly to S, without an aspect preserving
/// crop first; non square inputs get distorted rather than cropped.
pub fn prepare(source: DynamicImage, side: u32, verboser: &mut impl Verboser) -> GrayMap {
    let gray = source.to_luma8();
    let gray = if gray.width() != side || gray.height() != side {
        image::imageops::resize(&gray, side, side, FilterType::Triangle)
    } else {
        gray
    };
    verboser.verbose(Message::Masking);
    let grid = Grid::square(side);
    let center = side as f64 / 2.0;
    let radius = side as f64 / 2.0 - 0.5;
    let sq_radius = radius * radius;
    let mut pixels = gray.into_raw();
    for y in 0..side {
        for x in 0..side {
            let dx = x as f64 - center;
            let dy = y as f64 - center;
            if dx * dx + dy * dy >= sq_radius {
                pixels[(y * side + x) as usize] = 255;
            }
        }
    }
    PixelMap::from_raw(pixels, grid)
}

#[cfg(test)]
mod tests {
    use super::prepare;
    use crate::verboser::Silent;

    #[test]
    fn corners_are_masked_white() {
        let source = image::DynamicImage::new_luma8(64, 64);
        let masked = prepare(source, 64, &mut Silent);
        let side = 64usize;
        assert_eq!(masked.pixels()[0], 255);
        assert_eq!(masked.pixels()[side - 1], 255);
        assert_eq!(masked.pixels()[side * side - 1], 255);
        // The center survives the mask with its decoded intensity (black).
        assert_eq!(masked.pixels()[side * 32 + 32], 0);
    }

    #[test]
    fn oversized_input_is_resized_to_the_working_side() {
        let source = image::DynamicImage::new_luma8(120, 80);
        let masked = prepare(source, 64, &mut Silent);
        assert_eq!(masked.grid().width, 64);
        assert_eq!(masked.grid().height, 64);
        assert_eq!(masked.pixels().len(), 64 * 64);
    }
}
