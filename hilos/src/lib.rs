pub mod geometry {
    pub mod point;

    pub use point::Point;
}

mod canvas;
mod chords;
mod error;
pub mod grid;
pub mod image;
mod pins;
mod residual;
mod sequence;
mod sequencer;
mod settings;
pub mod verboser;

pub use canvas::{StrokeCanvas, FINAL_SIDE};
pub use chords::{ChordTable, Distancer};
pub use error::{ConfigError, Error};
pub use grid::Grid;
pub use image::{prepare, GrayMap, PixelMap};
pub use pins::PinTable;
pub use residual::Residual;
pub use sequence::{write_sequence, Artifacts};
pub use sequencer::{RecentWindow, Sequencer};
pub use settings::Settings;
pub use verboser::{Message, Silent, Verboser};

use std::path::Path;

use crate::image::load;

/// Runs the whole pipeline on one input image and writes both artifacts
/// under `output_dir`: `{stem}_output.png` and `{stem}.json`.
///
/// The run is fully deterministic for identical input bytes and settings.
pub fn generate(
    input: &Path,
    output_dir: &Path,
    settings: Settings,
    verboser: &mut impl Verboser,
) -> Result<Artifacts, Error> {
    let settings = settings.clamped();
    tracing::info!(
        pins = settings.pins,
        lines = settings.lines,
        pixel_width = settings.pixel_width,
        "generating thread image"
    );

    let source = load(input)?;
    let prepared = prepare(source, settings.pixel_width, verboser);
    let pins = PinTable::circular(settings.pins, prepared.grid(), verboser);
    let chords = ChordTable::bake(&pins, prepared.grid(), settings.min_distance, verboser)?;
    tracing::debug!(pins = pins.len(), "chord table baked");

    let residual = Residual::from_image(&prepared);
    let mut canvas = StrokeCanvas::new(settings.pixel_width, settings.scale)?;
    let sequencer = Sequencer::new(
        &pins,
        &chords,
        residual,
        settings.line_width,
        settings.recent_window,
    );
    let sequence = sequencer.run(settings.lines, &mut canvas, verboser)?;
    tracing::debug!(steps = sequence.len() - 1, "greedy loop finished");

    std::fs::create_dir_all(output_dir)?;
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    let image_path = output_dir.join(format!("{stem}_output.png"));
    canvas
        .downsample(FINAL_SIDE)
        .save(&image_path)
        .map_err(Error::from_image)?;
    let sequence_path = output_dir.join(format!("{stem}.json"));
    write_sequence(&sequence_path, &sequence)?;

    Ok(Artifacts {
        image: image_path,
        sequence: sequence_path,
    })
}
