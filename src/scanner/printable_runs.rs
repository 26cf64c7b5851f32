use serde::Serialize;

/// Digits, letters, punctuation, space, and `\t \n \r \x0B \x0C`.
///
/// Operates on raw byte values; bytes >= 0x80 are never printable.
pub fn is_printable(byte: u8) -> bool {
    byte.is_ascii_graphic() || matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
}

/// A printable run long enough to be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    offset: usize,
    bytes: &'a [u8],
}

impl<'a> Candidate<'a> {
    /// Byte offset of the run within the scanned stream.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn ends_with(&self, suffix: &[u8]) -> bool {
        self.bytes.ends_with(suffix)
    }

    pub fn to_text(&self) -> String {
        self.bytes.iter().map(|&b| char::from(b)).collect()
    }
}

/// Lazily yields every maximal printable run of at least `min_length` bytes.
///
/// Calling [`PrintableRuns::new`] again on the same bytes restarts the scan.
#[derive(Debug, Clone)]
pub struct PrintableRuns<'a> {
    bytes: &'a [u8],
    min_length: usize,
    position: usize,
    runs_seen: usize,
}

impl<'a> PrintableRuns<'a> {
    pub fn new(bytes: &'a [u8], min_length: usize) -> Self {
        Self {
            bytes,
            min_length,
            position: 0,
            runs_seen: 0,
        }
    }

    /// Number of non-empty printable runs passed so far, reported or not.
    pub fn runs_seen(&self) -> usize {
        self.runs_seen
    }

    fn is_reportable(&self, len: usize) -> bool {
        len > 0 && len >= self.min_length
    }
}

impl<'a> Iterator for PrintableRuns<'a> {
    type Item = Candidate<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut start = self.position;

        while self.position < self.bytes.len() {
            let byte = self.bytes[self.position];
            self.position += 1;

            if is_printable(byte) {
                continue;
            }

            // run is [start, position - 1); the separator is dropped
            let len = self.position - 1 - start;
            if len > 0 {
                self.runs_seen += 1;
            }
            if self.is_reportable(len) {
                return Some(Candidate {
                    offset: start,
                    bytes: &self.bytes[start..start + len],
                });
            }
            start = self.position;
        }

        // run ending exactly at end of stream
        let len = self.bytes.len() - start;
        if len > 0 {
            self.runs_seen += 1;
            // mark the tail as consumed so a further call yields nothing
            let tail = &self.bytes[start..];
            self.bytes = &self.bytes[..start];
            self.position = start;
            if self.is_reportable(len) {
                return Some(Candidate {
                    offset: start,
                    bytes: tail,
                });
            }
        }

        None
    }
}

/// Scan statistics for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStatistics {
    pub bytes_scanned: u64,
    pub printable_runs: usize,
    pub candidates: usize,
    pub matches: usize,
    pub duplicate_matches: usize,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        format!(
            "Scan Results:\n  Bytes scanned: {}\n  Printable runs: {}\n  Candidates: {}\n  Matches: {} ({} duplicates)\n",
            self.bytes_scanned,
            self.printable_runs,
            self.candidates,
            self.matches,
            self.duplicate_matches
        )
    }
}

/// Collects the text of every candidate in `bytes`.
pub fn extract_strings(bytes: &[u8], min_length: usize) -> Vec<String> {
    PrintableRuns::new(bytes, min_length)
        .map(|candidate| candidate.to_text())
        .collect()
}
