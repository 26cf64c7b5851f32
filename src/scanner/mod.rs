pub mod printable_runs;
pub mod suffix_filter;

pub use printable_runs::{extract_strings, is_printable, Candidate, PrintableRuns, ScanStatistics};
pub use suffix_filter::SuffixFilter;
