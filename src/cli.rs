use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Log more of what the engine does (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate figures and print their strokes
    Generate {
        /// Seed for the placement jitter (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Amount to generate (default: 1)
        #[arg(short = 'n', long, value_name = "AMOUNT")]
        amount: Option<u32>,

        /// Symbol to expand (default: the grammar's start symbol)
        #[arg(long, value_name = "SYMBOL")]
        start: Option<String>,

        /// Stretch each figure to fill a viewport
        #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
        fit: Option<(f64, f64)>,

        /// Print coordinates with y growing downwards
        #[arg(long)]
        screen: bool,
    },

    /// Print the terminal symbol of a single stroke
    #[command(allow_negative_numbers = true)]
    Classify {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },

    /// Check whether a stroke list forms the figure
    Recognize {
        /// File with one `x1 y1 x2 y2` stroke per line
        file: PathBuf,

        /// Threads used per rule stage (default: available cores)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Generate figures and feed their strokes back into recognition
    Roundtrip {
        /// Seed for the placement jitter (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Amount to generate (default: 1)
        #[arg(short = 'n', long, value_name = "AMOUNT")]
        amount: Option<u32>,

        /// Threads used per rule stage (default: available cores)
        #[arg(short, long)]
        workers: Option<usize>,
    },
}

// Reads `WIDTHxHEIGHT`, e.g. `640x480`
fn parse_viewport(text: &str) -> Result<(f64, f64), String> {
    let (width, height) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{}`", text))?;
    let side = |value: &str| {
        value.trim()
            .parse::<f64>()
            .ok()
            .filter(|side| side.is_finite() && *side > 0.0)
            .ok_or_else(|| format!("`{}` is not a positive size", value))
    };

    Ok((side(width)?, side(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_sizes() {
        assert_eq!(parse_viewport("640x480"), Ok((640.0, 480.0)));
        assert_eq!(parse_viewport("12.5X3"), Ok((12.5, 3.0)));
        assert!(parse_viewport("640").is_err());
        assert!(parse_viewport("0x10").is_err());
        assert!(parse_viewport("ax10").is_err());
    }

    #[test]
    fn classify_takes_negative_coordinates() {
        let cli = Cli::try_parse_from(["catgram", "classify", "-5", "0", "5", "-1.5"]).unwrap();

        assert!(matches!(cli.command, Command::Classify { x1, y2, .. } if x1 == -5.0 && y2 == -1.5));
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["catgram", "-vv", "roundtrip", "--seed", "3"]).unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Roundtrip { seed: Some(3), amount: None, workers: None }));
    }
}
