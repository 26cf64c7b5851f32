use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seqrip")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rip embedded .SEQ resource names out of game executables")]
#[command(
    long_about = "SeqRip scans each game binary for runs of printable ASCII, keeps the ones \
                  ending in .SEQ, and writes them sorted to <input>.txt as quoted literals. \
                  With no arguments it scans the nine known build variants in the current directory."
)]
#[command(after_help = "EXAMPLES:\n  \
    seqrip\n  \
    seqrip AoPc AoPsx --output-dir lists\n  \
    seqrip game.exe --suffix .VH --min-length 3\n  \
    seqrip --config my-config.toml --dry-run")]
pub struct Cli {
    /// Binaries to scan (replaces the configured input list)
    pub inputs: Vec<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Minimum printable run length
    #[arg(short = 'n', long, help = "Minimum length of a printable run (default: 4)")]
    pub min_length: Option<usize>,

    /// Case-sensitive suffix a run must end with
    #[arg(short, long, help = "Suffix to keep, matched case-sensitively (default: .SEQ)")]
    pub suffix: Option<String>,

    /// Directory for the generated lists
    #[arg(short, long, help = "Write lists here instead of next to each input")]
    pub output_dir: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be done without executing)
    #[arg(long, help = "Show what would be scanned without reading or writing files")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        let inputs = if self.inputs.is_empty() {
            None
        } else {
            Some(self.inputs.clone())
        };

        CliOverrides::new()
            .with_inputs(inputs)
            .with_min_length(self.min_length)
            .with_suffix(self.suffix.clone())
            .with_output_dir(self.output_dir.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
