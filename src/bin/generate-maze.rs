//! CLI for maze generation

use anyhow::Context;
use clap::{Parser, ValueEnum};
use maze_carver::logging::{init_logging, LoggingConfig};
use maze_carver::maze_generator::MazeGenerator;
use maze_carver::{Point, Style};

/// Output symbols
#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputStyle {
    /// 🟫 walls, 🟩 paths
    Emoji,
    /// `#` walls, `.` paths
    Ascii,
}

impl From<OutputStyle> for Style {
    fn from(style: OutputStyle) -> Self {
        match style {
            OutputStyle::Emoji => Style::Emoji,
            OutputStyle::Ascii => Style::Ascii,
        }
    }
}

/// Perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Maze width in cells
    #[arg(long, default_value_t = 21, allow_negative_numbers = true)]
    width: i64,

    /// Maze height in cells
    #[arg(long, default_value_t = 21, allow_negative_numbers = true)]
    height: i64,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Column of the start cell
    #[arg(long, default_value_t = 0)]
    start_x: usize,

    /// Row of the start cell
    #[arg(long, default_value_t = 0)]
    start_y: usize,

    /// Output symbols
    #[arg(short, long, value_enum, default_value_t = OutputStyle::Emoji)]
    style: OutputStyle,

    /// Log filter, e.g. `debug`. Defaults to `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,

    /// Log more from maze carving (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        filter: args.log,
        verbose: args.verbose,
    });

    let mut gen = MazeGenerator::new(args.seed);
    let grid = gen
        .generate_from(
            args.width,
            args.height,
            Point::new(args.start_x, args.start_y),
        )
        .context("Could not generate maze")?;
    println!("{}", grid.render(args.style.into()));
    Ok(())
}
