use std::path::PathBuf;

use clap::Parser;
use hilos::{Message, Settings, Verboser};

#[derive(Parser, Debug)]
#[command(version, about = "Convert a photograph into circular thread art.")]
struct Args {
    /// Input image path.
    #[arg()]
    input: PathBuf,

    /// Directory for the generated artifacts.
    #[arg(short, long, default_value = "thread_outputs")]
    output_dir: PathBuf,

    /// Number of pins surrounding the image (clamped to 10..=1000).
    #[arg(short, long, default_value_t = 240)]
    pins: usize,

    /// Number of chords to draw (clamped to 100..=10000).
    #[arg(short, long, default_value_t = 3500)]
    lines: usize,

    /// Side in pixels of the square working buffer.
    #[arg(long, default_value_t = 500)]
    pixel_width: u32,

    /// Minimum circular index distance between linked pins.
    #[arg(long, default_value_t = 20)]
    min_distance: usize,

    /// How many recently visited pins are excluded from reselection.
    #[arg(long, default_value_t = 20)]
    recent_window: usize,

    /// Ink debt removed per residual cell a chord crosses.
    #[arg(long, default_value_t = 30.0)]
    line_width: f64,

    /// Upscale factor of the stroke canvas over the working resolution.
    #[arg(long, default_value_t = 50)]
    scale: u32,
}

/// Reports greedy loop progress without touching algorithmic state.
struct Progress {
    total: usize,
}

impl Verboser for Progress {
    fn verbose(&mut self, message: Message) {
        match message {
            Message::Masking => tracing::info!("masking input image"),
            Message::Baking => tracing::info!("baking chord table"),
            Message::Computing(step) if step % 500 == 0 => {
                tracing::info!("creating lines: {step}/{}", self.total)
            }
            _ => {}
        }
    }
}

fn main() {
    tracing_subscriber::fmt().init();
    let args = Args::parse();
    let settings = Settings {
        pins: args.pins,
        lines: args.lines,
        pixel_width: args.pixel_width,
        min_distance: args.min_distance,
        recent_window: args.recent_window,
        line_width: args.line_width,
        scale: args.scale,
    }
    .clamped();
    let mut progress = Progress {
        total: settings.lines,
    };
    match hilos::generate(&args.input, &args.output_dir, settings, &mut progress) {
        Ok(artifacts) => {
            println!("{}", artifacts.image.display());
            println!("{}", artifacts.sequence.display());
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
