//! # Telar CLI
//!
//! Command-line interface for string-art generation.
//!
//! ## Usage
//!
//! ```bash
//! # Generate 2000 segments from a photo on a 240-pin circular frame
//! telar generate photo.jpg
//!
//! # Denser pattern on a square frame, printing every build step
//! telar generate photo.jpg --pins 300 --shape square --count 3500 --steps
//!
//! # Inspect pin coordinates for a layout
//! telar pins --pins 12 --size 100
//! ```

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use telar::{
    CancelToken, GenerationConfig, GenerationEvent, GrayscaleMap, PinLayout, PinShape, TelarError,
    engine,
};

/// Telar - string-art pattern generator
#[derive(Parser, Debug)]
#[command(name = "telar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a thread sequence from an image
    Generate {
        /// Input image (any format the image crate can decode)
        image: PathBuf,

        /// Number of pins around the frame
        #[arg(long, default_value = "240")]
        pins: usize,

        /// Frame shape: circle or square
        #[arg(long, default_value = "circle")]
        shape: String,

        /// Number of thread segments
        #[arg(long, default_value = "2000")]
        count: usize,

        /// Darkness removed per pass (1-255)
        #[arg(long, default_value = "24")]
        weight: u8,

        /// Minimum pin index distance between consecutive segments
        #[arg(long, default_value = "1")]
        min_distance: usize,

        /// Working canvas size in pixels (square)
        #[arg(long, default_value = "500")]
        size: usize,

        /// Print the numbered pin-to-pin build steps
        #[arg(long)]
        steps: bool,
    },

    /// Print pin coordinates for a layout
    Pins {
        /// Number of pins around the frame
        #[arg(long, default_value = "240")]
        pins: usize,

        /// Frame shape: circle or square
        #[arg(long, default_value = "circle")]
        shape: String,

        /// Canvas size in pixels (square)
        #[arg(long, default_value = "500")]
        size: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), TelarError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            image,
            pins,
            shape,
            count,
            weight,
            min_distance,
            size,
            steps,
        } => {
            let shape = parse_shape(&shape)?;
            let decoded = image::open(&image)
                .map_err(|e| TelarError::Image(format!("{}: {}", image.display(), e)))?;

            let gray = GrayscaleMap::from_image(&decoded, size, size);
            let layout = PinLayout::generate(pins, shape, size, size)?;
            let config = GenerationConfig {
                thread_count: count,
                line_weight: weight,
                min_pin_distance: min_distance,
                ..GenerationConfig::default()
            };

            println!("Generating {} segments across {} pins...", count, pins);
            let task = engine::spawn(gray, layout, config, CancelToken::new())?;
            for event in task.events() {
                if let GenerationEvent::Progress(p) = event {
                    print!("\r  {:>3.0}%", p.fraction() * 100.0);
                    let _ = std::io::stdout().flush();
                }
            }
            println!();

            let outcome = task.join();
            if steps {
                for (i, thread) in outcome.threads.iter().enumerate() {
                    println!("{:>5}. pin {} -> pin {}", i + 1, thread.from, thread.to);
                }
            }
            println!("Done: {} segments.", outcome.threads.len());
        }

        Commands::Pins { pins, shape, size } => {
            let shape = parse_shape(&shape)?;
            let layout = PinLayout::generate(pins, shape, size, size)?;
            for (i, pin) in layout.pins().iter().enumerate() {
                println!("{:>4}: ({:.1}, {:.1})", i, pin.x, pin.y);
            }
        }
    }

    Ok(())
}

fn parse_shape(s: &str) -> Result<PinShape, TelarError> {
    PinShape::from_str(s).ok_or_else(|| {
        TelarError::Configuration(format!(
            "unknown shape '{}', expected 'circle' or 'square'",
            s
        ))
    })
}
