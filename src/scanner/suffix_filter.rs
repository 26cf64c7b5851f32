use crate::config::ScanConfig;
use crate::scanner::printable_runs::Candidate;

/// Keeps candidates whose final bytes are exactly the configured suffix.
///
/// The comparison is case-sensitive: `credits.seq` does not match `.SEQ`.
#[derive(Debug, Clone)]
pub struct SuffixFilter {
    suffix: String,
}

impl SuffixFilter {
    pub fn new<S: Into<String>>(suffix: S) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.suffix.clone())
    }

    pub fn matches(&self, text: &[u8]) -> bool {
        text.ends_with(self.suffix.as_bytes())
    }

    /// Lazily keeps the matching candidates, in input order.
    pub fn filter<'s, 'a, I>(&'s self, candidates: I) -> impl Iterator<Item = Candidate<'a>> + 's
    where
        I: IntoIterator<Item = Candidate<'a>>,
        I::IntoIter: 's,
    {
        candidates
            .into_iter()
            .filter(move |candidate| self.matches(candidate.as_bytes()))
    }
}

impl Default for SuffixFilter {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::printable_runs::PrintableRuns;

    #[test]
    fn test_suffix_matching() {
        let filter = SuffixFilter::default();

        assert!(filter.matches(b"DATA.SEQ"));
        assert!(filter.matches(b".SEQ"));
        assert!(!filter.matches(b"README.TXT"));
        assert!(!filter.matches(b"credits.seq"));
        assert!(!filter.matches(b"LEVEL.SEQ "));
        assert!(!filter.matches(b"SEQ"));
    }

    #[test]
    fn test_filter_preserves_order() {
        let input = b"DATA.SEQ\x00LEVEL1.SEQ\x00README.TXT\x00X.SEQ";
        let filter = SuffixFilter::new(".SEQ");

        let kept: Vec<String> = filter
            .filter(PrintableRuns::new(input, 4))
            .map(|c| c.to_text())
            .collect();

        assert_eq!(kept, vec!["DATA.SEQ", "LEVEL1.SEQ", "X.SEQ"]);
    }

    #[test]
    fn test_custom_suffix() {
        let filter = SuffixFilter::new(".VH");
        assert!(filter.matches(b"MUSIC.VH"));
        assert!(!filter.matches(b"MUSIC.SEQ"));
    }
}
