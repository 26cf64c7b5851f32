use crate::config::{BatchEntry, ScanConfig};
use crate::error::{Result, SeqRipError};
use crate::extractor::literal_writer::{needs_escaping, LiteralWriter};
use crate::scanner::{PrintableRuns, ScanStatistics, SuffixFilter};
use crate::ui::GracefulShutdown;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub entries_processed: usize,
    pub total_entries: usize,
    pub bytes_scanned: u64,
    pub matches_found: usize,
    pub current_input: Option<String>,
    pub start_time: Instant,
}

impl BatchProgress {
    pub fn new(total_entries: usize) -> Self {
        Self {
            entries_processed: 0,
            total_entries,
            bytes_scanned: 0,
            matches_found: 0,
            current_input: None,
            start_time: Instant::now(),
        }
    }

    pub fn start_entry(&mut self, input: String) {
        self.current_input = Some(input);
    }

    pub fn finish_entry(&mut self, statistics: &ScanStatistics) {
        self.entries_processed += 1;
        self.bytes_scanned += statistics.bytes_scanned;
        self.matches_found += statistics.matches;
    }

    pub fn percentage(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            (self.entries_processed as f64 / self.total_entries as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.entries_processed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.elapsed();
        let rate = self.entries_processed as f64 / elapsed.as_secs_f64();
        let remaining = self.total_entries.saturating_sub(self.entries_processed);

        if rate > 0.0 && rate.is_finite() {
            Duration::from_secs_f64(remaining as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub input: String,
    pub output: String,
    pub statistics: ScanStatistics,
    /// Written values containing `"` or `\`, which are not escaped.
    pub unescaped_literals: usize,
    pub duration: Duration,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub entries: Vec<EntryReport>,
    pub total_bytes_scanned: u64,
    pub total_matches: usize,
    pub duration: Duration,
    pub generated_at: DateTime<Utc>,
    pub config_used: ScanConfig,
}

impl BatchReport {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Batch Results:\n  Inputs processed: {}\n  Bytes scanned: {}\n  Matches written: {}\n",
            self.entries.len(),
            self.total_bytes_scanned,
            self.total_matches
        );

        for entry in &self.entries {
            summary.push_str(&format!(
                "    {} -> {}: {} matches\n",
                entry.input, entry.output, entry.statistics.matches
            ));
        }

        summary
    }
}

/// Runs read, extract, filter, sort and write for each entry in order.
///
/// The first failure aborts the batch. Outputs already written are left as-is.
pub struct BatchDriver {
    scan: ScanConfig,
    filter: SuffixFilter,
    writer: LiteralWriter,
}

impl BatchDriver {
    pub fn new(scan: &ScanConfig) -> Self {
        Self {
            scan: scan.clone(),
            filter: SuffixFilter::from_config(scan),
            writer: LiteralWriter::new(),
        }
    }

    /// Extracts, filters and sorts the matches in `bytes`. Duplicates are kept.
    pub fn process_bytes(&self, bytes: &[u8]) -> (Vec<String>, ScanStatistics) {
        let mut runs = PrintableRuns::new(bytes, self.scan.min_length);
        let mut candidates = 0;

        let mut matches: Vec<String> = self
            .filter
            .filter(runs.by_ref().inspect(|_| candidates += 1))
            .map(|candidate| candidate.to_text())
            .collect();
        matches.sort();

        let statistics = ScanStatistics {
            bytes_scanned: bytes.len() as u64,
            printable_runs: runs.runs_seen(),
            candidates,
            matches: matches.len(),
            duplicate_matches: matches.windows(2).filter(|w| w[0] == w[1]).count(),
        };

        (matches, statistics)
    }

    pub fn read_input(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SeqRipError::InputNotFound {
                path: path.display().to_string(),
            },
            _ => SeqRipError::InputUnreadable {
                path: path.display().to_string(),
                source: e,
            },
        })
    }

    pub fn process_entry(&self, entry: &BatchEntry) -> Result<EntryReport> {
        let start = Instant::now();

        let bytes = self.read_input(&entry.input)?;
        let (matches, statistics) = self.process_bytes(&bytes);
        drop(bytes);

        self.writer.write_file(&matches, &entry.output)?;

        Ok(EntryReport {
            input: entry.input.display().to_string(),
            output: entry.output.display().to_string(),
            unescaped_literals: matches.iter().filter(|m| needs_escaping(m)).count(),
            statistics,
            duration: start.elapsed(),
        })
    }

    pub fn run(
        &self,
        entries: &[BatchEntry],
        shutdown: Option<&GracefulShutdown>,
        progress_callback: Option<&dyn Fn(&BatchProgress)>,
    ) -> Result<BatchReport> {
        let mut progress = BatchProgress::new(entries.len());
        let mut reports = Vec::with_capacity(entries.len());

        for entry in entries {
            if let Some(shutdown) = shutdown {
                shutdown.check_shutdown()?;
            }

            progress.start_entry(entry.input.display().to_string());
            if let Some(callback) = progress_callback {
                callback(&progress);
            }

            let report = self.process_entry(entry)?;
            progress.finish_entry(&report.statistics);
            reports.push(report);
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        Ok(BatchReport {
            total_bytes_scanned: progress.bytes_scanned,
            total_matches: progress.matches_found,
            entries: reports,
            duration: progress.elapsed(),
            generated_at: Utc::now(),
            config_used: self.scan.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tempfile::TempDir;

    const SYNTHETIC_BINARY: &[u8] = b"\x01\x01LEVEL1.SEQ\x00\x00credits.seq\x01MENU.SEQ\x00";

    fn driver() -> BatchDriver {
        BatchDriver::new(&ScanConfig::default())
    }

    fn write_input(dir: &Path, name: &str, content: &[u8]) -> BatchEntry {
        let input = dir.join(name);
        fs::write(&input, content).unwrap();
        BatchEntry::from_identifier(input, "txt")
    }

    #[test]
    fn test_process_bytes_sorts_by_byte_value() {
        let (matches, _) = driver().process_bytes(b"b.SEQ\x00A.SEQ\x00");
        assert_eq!(matches, vec!["A.SEQ", "b.SEQ"]);
    }

    #[test]
    fn test_duplicates_survive_sorting() {
        let (matches, stats) = driver().process_bytes(b"FOO.SEQ\x00BAR.SEQ\x00FOO.SEQ");
        assert_eq!(matches, vec!["BAR.SEQ", "FOO.SEQ", "FOO.SEQ"]);
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.duplicate_matches, 1);
    }

    #[test]
    fn test_process_bytes_statistics() {
        let (matches, stats) = driver().process_bytes(SYNTHETIC_BINARY);
        assert_eq!(matches, vec!["LEVEL1.SEQ", "MENU.SEQ"]);
        assert_eq!(stats.bytes_scanned, SYNTHETIC_BINARY.len() as u64);
        assert_eq!(stats.printable_runs, 3);
        assert_eq!(stats.candidates, 3);
        assert_eq!(stats.matches, 2);
    }

    #[test]
    fn test_end_to_end_entry() {
        let temp_dir = TempDir::new().unwrap();
        let entry = write_input(temp_dir.path(), "AePc", SYNTHETIC_BINARY);

        let report = driver().process_entry(&entry).unwrap();

        assert_eq!(entry.output, temp_dir.path().join("AePc.txt"));
        let content = fs::read_to_string(&entry.output).unwrap();
        assert_eq!(content, "\"LEVEL1.SEQ\",\n\"MENU.SEQ\",\n");
        assert_eq!(report.statistics.matches, 2);
        assert_eq!(report.unescaped_literals, 0);
    }

    #[test]
    fn test_missing_input_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let entry = BatchEntry::from_identifier(temp_dir.path().join("AoPsx"), "txt");

        let result = driver().process_entry(&entry);
        assert!(matches!(result, Err(SeqRipError::InputNotFound { .. })));
        assert!(!entry.output.exists());
    }

    #[test]
    fn test_missing_input_aborts_batch() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_input(temp_dir.path(), "AePc", b"ONE.SEQ\x00");
        let missing = BatchEntry::from_identifier(temp_dir.path().join("AePcDemo"), "txt");
        let last = write_input(temp_dir.path(), "AePsxCd1", b"THREE.SEQ\x00");

        let result = driver().run(&[first.clone(), missing, last.clone()], None, None);

        assert!(matches!(result, Err(SeqRipError::InputNotFound { .. })));
        assert_eq!(
            fs::read_to_string(&first.output).unwrap(),
            "\"ONE.SEQ\",\n"
        );
        assert!(!last.output.exists());
    }

    #[test]
    fn test_unwritable_output_aborts_batch() {
        let temp_dir = TempDir::new().unwrap();
        let first = write_input(temp_dir.path(), "AoPc", b"ONE.SEQ\x00");
        let blocked = write_input(temp_dir.path(), "AoPcDemo", b"TWO.SEQ\x00");
        let last = write_input(temp_dir.path(), "AoPsx", b"THREE.SEQ\x00");
        fs::create_dir(&blocked.output).unwrap();

        let result = driver().run(&[first.clone(), blocked, last.clone()], None, None);

        assert!(matches!(result, Err(SeqRipError::OutputNotWritable { .. })));
        assert_eq!(
            fs::read_to_string(&first.output).unwrap(),
            "\"ONE.SEQ\",\n"
        );
        assert!(!last.output.exists());
    }

    #[test]
    fn test_directory_input_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("AePsxCd1");
        fs::create_dir(&input).unwrap();
        let entry = BatchEntry::from_identifier(input, "txt");

        let result = driver().process_entry(&entry);
        assert!(matches!(result, Err(SeqRipError::InputUnreadable { .. })));
        assert!(!entry.output.exists());
    }

    #[test]
    fn test_unescaped_literals_are_counted() {
        let temp_dir = TempDir::new().unwrap();
        let entry = write_input(
            temp_dir.path(),
            "AoPsxDemo",
            b"\x00say \"hi\".SEQ\x00C:\\X.SEQ\x00PLAIN.SEQ\x00",
        );

        let report = driver().process_entry(&entry).unwrap();

        assert_eq!(report.statistics.matches, 3);
        assert_eq!(report.unescaped_literals, 2);
        assert_eq!(
            fs::read_to_string(&entry.output).unwrap(),
            "\"C:\\X.SEQ\",\n\"PLAIN.SEQ\",\n\"say \"hi\".SEQ\",\n"
        );
    }

    #[test]
    fn test_batch_report_and_progress() {
        let temp_dir = TempDir::new().unwrap();
        let entries = vec![
            write_input(temp_dir.path(), "AoPc", b"\xffA.SEQ\x00B.SEQ"),
            write_input(temp_dir.path(), "AoPcDemo", b"nothing here"),
        ];

        let calls = Cell::new(0);
        let callback = |progress: &BatchProgress| {
            calls.set(calls.get() + 1);
            assert!(progress.entries_processed <= progress.total_entries);
        };

        let report = driver().run(&entries, None, Some(&callback)).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.total_matches, 2);
        assert_eq!(report.entries[1].statistics.matches, 0);
        assert_eq!(fs::read_to_string(&entries[1].output).unwrap(), "");
        assert_eq!(calls.get(), 3);
        assert!(report.display_summary().contains("Inputs processed: 2"));
    }

    #[test]
    fn test_cancelled_batch_stops_before_next_entry() {
        let temp_dir = TempDir::new().unwrap();
        let entry = write_input(temp_dir.path(), "AePsxDemo", b"X.SEQ\x00");
        let shutdown = GracefulShutdown::new_for_test();
        shutdown.request_shutdown();

        let result = driver().run(&[entry.clone()], Some(&shutdown), None);

        assert!(matches!(result, Err(SeqRipError::Cancelled)));
        assert!(!entry.output.exists());
    }

    #[test]
    fn test_progress_tracking() {
        let mut progress = BatchProgress::new(4);
        assert_eq!(progress.percentage(), 0.0);

        progress.start_entry("AePc".to_string());
        progress.finish_entry(&ScanStatistics {
            bytes_scanned: 100,
            matches: 3,
            ..Default::default()
        });

        assert_eq!(progress.percentage(), 25.0);
        assert_eq!(progress.bytes_scanned, 100);
        assert_eq!(progress.matches_found, 3);
        assert_eq!(progress.current_input.as_deref(), Some("AePc"));
    }
}
