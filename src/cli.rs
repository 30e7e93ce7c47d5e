//! Command-line interface for Spellduel
//!
//! Supports both graphical (default) and headless modes.

use clap::Parser;
use std::path::PathBuf;

/// Wizard duel with cast-timed, cooldown-gated skills
#[derive(Parser, Debug)]
#[command(name = "spellduel")]
#[command(about = "Wizard duel with cast-timed, cooldown-gated skills")]
#[command(version)]
pub struct Args {
    /// Run in headless mode with the specified JSON config file
    #[arg(long, value_name = "CONFIG_FILE")]
    pub headless: Option<PathBuf>,

    /// Duel configuration (RON); overrides the default asset path
    #[arg(long, value_name = "DUEL_RON")]
    pub config: Option<PathBuf>,

    /// Output path for the duel log (headless mode only)
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Maximum duel duration in seconds (headless mode only)
    #[arg(long)]
    pub max_duration: Option<f32>,
}

pub fn parse_args() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_windowed_mode() {
        let args = Args::try_parse_from(["spellduel"]).unwrap();
        assert!(args.headless.is_none());
        assert!(args.config.is_none());
        assert!(args.max_duration.is_none());
    }

    #[test]
    fn test_headless_flags() {
        let args = Args::try_parse_from([
            "spellduel",
            "--headless",
            "duel.json",
            "--output",
            "out.json",
            "--max-duration",
            "30",
        ])
        .unwrap();
        assert_eq!(args.headless, Some(PathBuf::from("duel.json")));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert_eq!(args.max_duration, Some(30.0));
    }
}
