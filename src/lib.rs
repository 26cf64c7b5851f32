pub mod cli;
pub mod config;
pub mod error;
pub mod scanner;
pub mod extractor;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{BatchEntry, CliOverrides, Config, ScanConfig};
pub use error::{Result, SeqRipError, UserFriendlyError};

// Core functionality re-exports
pub use scanner::{extract_strings, is_printable, Candidate, PrintableRuns, ScanStatistics, SuffixFilter};
pub use extractor::{BatchDriver, BatchProgress, BatchReport, EntryReport, LiteralWriter};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface for SeqRip functionality
pub struct SeqRip {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl SeqRip {
    /// Create a new SeqRip instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Ok(Self::with_shutdown(config, output_mode, verbose, quiet, shutdown))
    }

    /// Create a new SeqRip instance for testing (no signal handler conflicts)
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self::with_shutdown(config, output_mode, verbose, quiet, GracefulShutdown::new_for_test())
    }

    fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Self {
        // progress bars would interleave with JSON records
        let show_progress = !quiet && output_mode == OutputMode::Human;

        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(show_progress),
            shutdown,
        }
    }

    /// Create SeqRip instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    /// Scan every configured input and write its `.SEQ` list.
    pub fn rip_all(&self) -> Result<BatchReport> {
        self.shutdown.check_shutdown()?;

        let entries = self.config.batch_entries()?;
        if let Some(ref dir) = self.config.batch.output_directory {
            std::fs::create_dir_all(dir).map_err(|e| SeqRipError::OutputNotWritable {
                path: dir.display().to_string(),
                source: e,
            })?;
        }

        self.output_formatter.start_operation(&format!(
            "Scanning {} binaries for *{} strings",
            entries.len(),
            self.config.scan.suffix
        ));

        let batch_progress = self.progress_manager.create_batch_progress(entries.len() as u64);
        let progress_callback = {
            let pb = batch_progress.clone();
            move |progress: &BatchProgress| {
                ui::progress::update_batch_progress(&pb, progress);
            }
        };

        let driver = BatchDriver::new(&self.config.scan);
        let result = driver.run(&entries, Some(&self.shutdown), Some(&progress_callback));

        let report = match result {
            Ok(report) => report,
            Err(e) => {
                batch_progress.abandon();
                return Err(e);
            }
        };

        ui::progress::finish_progress_with_summary(
            &batch_progress,
            &format!("Scanned {} binaries", report.entries.len()),
            report.duration,
        );

        self.progress_manager.suspend(|| {
            for entry in &report.entries {
                self.output_formatter.print_entry(entry);
            }
            self.output_formatter.debug(&report.display_summary());
        });

        self.output_formatter.success(&format!(
            "Wrote {} matches across {} lists",
            report.total_matches,
            report.entries.len()
        ));

        Ok(report)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(SeqRipError::Io)?;
        Ok(())
    }

    /// Get configuration reference
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Check if shutdown has been requested
    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    /// Request graceful shutdown
    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SeqRipError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Extract, filter and sort the `suffix` strings of one in-memory binary.
pub fn rip_bytes(bytes: &[u8], scan: &ScanConfig) -> Vec<String> {
    BatchDriver::new(scan).process_bytes(bytes).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn test_config(dir: &Path, names: &[&str]) -> Config {
        let mut config = Config::default();
        config.batch.inputs = names.iter().map(|name| dir.join(name)).collect();
        config
    }

    #[test]
    fn test_seqrip_creation() {
        let seqrip = SeqRip::new_for_test(Config::default(), OutputMode::Plain, 0, true);
        assert!(seqrip.is_running());
        assert_eq!(seqrip.config().batch.inputs.len(), 9);
    }

    #[test]
    fn test_rip_bytes() {
        let bytes = b"\x01\x01LEVEL1.SEQ\x00\x00credits.seq\x01MENU.SEQ\x00";
        assert_eq!(
            rip_bytes(bytes, &ScanConfig::default()),
            vec!["LEVEL1.SEQ", "MENU.SEQ"]
        );
    }

    #[test]
    fn test_rip_all_writes_every_list() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("AePc"), b"\x00ZZ.SEQ\x00AA.SEQ\x00").unwrap();
        fs::write(temp_dir.path().join("AoPc"), b"no matches\x00").unwrap();

        let config = test_config(temp_dir.path(), &["AePc", "AoPc"]);
        let seqrip = SeqRip::new_for_test(config, OutputMode::Plain, 0, true);

        let report = seqrip.rip_all().unwrap();

        assert_eq!(report.total_matches, 2);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("AePc.txt")).unwrap(),
            "\"AA.SEQ\",\n\"ZZ.SEQ\",\n"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("AoPc.txt")).unwrap(),
            ""
        );
    }

    #[test]
    fn test_rip_all_creates_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("AoPsx"), b"BGM.SEQ").unwrap();

        let mut config = test_config(temp_dir.path(), &["AoPsx"]);
        let out_dir = temp_dir.path().join("lists");
        config.batch.output_directory = Some(out_dir.clone());

        let seqrip = SeqRip::new_for_test(config, OutputMode::Plain, 0, true);
        seqrip.rip_all().unwrap();

        assert_eq!(
            fs::read_to_string(out_dir.join("AoPsx.txt")).unwrap(),
            "\"BGM.SEQ\",\n"
        );
    }

    #[test]
    fn test_rip_all_fails_on_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(temp_dir.path(), &["AePsxCd2"]);
        let seqrip = SeqRip::new_for_test(config, OutputMode::Plain, 0, true);

        let result = seqrip.rip_all();
        assert!(matches!(result, Err(SeqRipError::InputNotFound { .. })));
    }

    #[test]
    fn test_shutdown_handling() {
        let seqrip = SeqRip::new_for_test(Config::default(), OutputMode::Plain, 0, true);

        seqrip.request_shutdown();
        assert!(!seqrip.is_running());
        assert!(matches!(seqrip.rip_all(), Err(SeqRipError::Cancelled)));
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path: PathBuf = temp_dir.path().join("sample.toml");

        SeqRip::generate_sample_config(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.scan, ScanConfig::default());
    }
}
