//! CLI tool for sheetgrid - computes a column layout and outputs JSON
//!
//! Usage:
//!   sheetgrid_cli <viewport-width>                       # Output JSON to stdout
//!   sheetgrid_cli <viewport-width> --hide url,notes      # Hide columns first
//!   sheetgrid_cli <viewport-width> --resize job=300      # Apply a user resize
//!   sheetgrid_cli <viewport-width> --config layout.json  # Override metrics
//!   sheetgrid_cli <viewport-width> -o out.json           # Output JSON to file
//!
//! Set `RUST_LOG=sheetgrid=debug` to trace the layout steps.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use sheetgrid::{LayoutConfig, SheetState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sheetgrid_cli")]
#[command(version, about = "Compute a sheet column layout and print it as JSON")]
struct Cli {
    /// Viewport width in pixels
    #[arg(value_parser = parse_viewport_width)]
    viewport_width: f64,

    /// Columns to hide, comma separated
    #[arg(long, value_delimiter = ',')]
    hide: Vec<String>,

    /// User resize as key=width; may be repeated
    #[arg(long, value_parser = parse_resize)]
    resize: Vec<(String, u32)>,

    /// JSON file overriding the layout metrics
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JSON file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_viewport_width(value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        _ => Err(format!("invalid viewport width: {value}")),
    }
}

fn parse_resize(value: &str) -> Result<(String, u32), String> {
    let (key, width) = value
        .split_once('=')
        .ok_or_else(|| format!("expected key=width, got {value}"))?;
    let width = width
        .parse::<u32>()
        .map_err(|e| format!("invalid width in {value}: {e}"))?;
    Ok((key.to_string(), width))
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match LayoutConfig::from_path(path) {
            Ok(c) => c,
            Err(e) => fail(&format!("Error loading {}: {e}", path.display())),
        },
        None => LayoutConfig::default(),
    };

    let mut sheet = match SheetState::new(config, Some(cli.viewport_width)) {
        Ok(s) => s,
        Err(e) => fail(&format!("Error building layout: {e}")),
    };

    for key in cli.hide.iter().filter(|k| !k.is_empty()) {
        if let Err(e) = sheet.hide_column(key) {
            fail(&format!("Error hiding column: {e}"));
        }
    }
    for (key, width) in &cli.resize {
        if let Err(e) = sheet.resize_column(key, *width) {
            fail(&format!("Error resizing column: {e}"));
        }
    }

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&sheet.snapshot()) {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    // Output
    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("Error writing {}: {e}", path.display()));
            }
            eprintln!("Written: {}", path.display());
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "sheetgrid_cli",
            "1280",
            "--hide",
            "url,due",
            "--resize",
            "job=300",
            "--resize",
            "status=90",
            "-o",
            "out.json",
        ])
        .unwrap();
        assert!((cli.viewport_width - 1280.0).abs() < f64::EPSILON);
        assert_eq!(cli.hide, vec!["url", "due"]);
        assert_eq!(
            cli.resize,
            vec![("job".to_string(), 300), ("status".to_string(), 90)]
        );
        assert_eq!(cli.output, Some(PathBuf::from("out.json")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Cli::try_parse_from(["sheetgrid_cli", "wide"]).is_err());
        assert!(Cli::try_parse_from(["sheetgrid_cli", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["sheetgrid_cli", "800", "--resize", "job"]).is_err());
        assert!(Cli::try_parse_from(["sheetgrid_cli", "800", "--resize", "job=-4"]).is_err());
    }
}
