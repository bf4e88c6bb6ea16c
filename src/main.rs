//! CLI for maze checking

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use maze_carver::logging::{init_logging, LoggingConfig};
use maze_carver::Grid;

/// Report whether a rendered maze is perfect
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Log filter, e.g. `debug`. Defaults to `RUST_LOG`.
    #[arg(long)]
    log: Option<String>,

    /// Log more from maze carving (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print report
fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(LoggingConfig {
        filter: args.log,
        verbose: args.verbose,
    });

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Could not read {}", args.file.display()))?
    };
    let grid = Grid::parse(&text)?;
    log::debug!("Parsed {}x{} maze", grid.width(), grid.height());

    grid.analyze().print_report();
    Ok(())
}
