//! DALI result-file parsing.
//!
//! A DALI hit line looks like `47:  1abc-A 32.1 ...`: a rank index, a colon,
//! whitespace, the 4-character structure id, a hyphen, and the matched chain.
//! Everything after the chain character (scores, descriptions) is ignored,
//! and lines that do not match the shape are silently skipped — DALI output
//! interleaves hits with headers and summary text.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashSet;

use crate::error::ChainprepError;

#[allow(clippy::expect_used)]
static HIT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+):\s+(\w{4})-(\w)").expect("hit-line pattern is valid")
});

/// One parsed DALI hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// 4-character structure id, lowercased.
    pub id: String,
    /// Chain identifier, case preserved from the result file.
    pub chain: char,
}

/// Unique hits in file order.
///
/// Each structure id appears at most once; the chain from its first
/// occurrence wins and later duplicates are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hits {
    entries: Vec<Hit>,
}

impl Hits {
    /// Parse a DALI result file, keeping at most `limit` distinct ids.
    ///
    /// Parsing stops as soon as `limit` ids have been collected, so a cap of
    /// K yields exactly the first K distinct ids in file order.
    pub fn from_file(
        path: &Path,
        limit: Option<usize>,
    ) -> Result<Self, ChainprepError> {
        let content =
            fs::read_to_string(path).map_err(ChainprepError::ResultFile)?;
        Ok(Self::from_text(&content, limit))
    }

    pub(crate) fn from_text(text: &str, limit: Option<usize>) -> Self {
        let mut entries: Vec<Hit> = Vec::new();
        let mut seen = FxHashSet::default();
        for line in text.lines() {
            if limit.is_some_and(|cap| entries.len() >= cap) {
                break;
            }
            let Some(caps) = HIT_LINE.captures(line.trim()) else {
                continue;
            };
            let id = caps[2].to_lowercase();
            let Some(chain) = caps[3].chars().next() else {
                continue;
            };
            if !seen.insert(id.clone()) {
                continue;
            }
            entries.push(Hit { id, chain });
        }
        Self { entries }
    }

    /// Iterate over hits in file order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.entries.iter()
    }

    /// Iterate over structure ids in file order.
    #[must_use]
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|hit| hit.id.as_str())
    }

    /// Chain recorded for a structure id, if present.
    #[must_use]
    pub fn chain_for(&self, id: &str) -> Option<char> {
        self.entries
            .iter()
            .find(|hit| hit.id == id)
            .map(|hit| hit.chain)
    }

    /// Number of distinct structure ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no hits were parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Hits {
    type Item = &'a Hit;
    type IntoIter = std::slice::Iter<'a, Hit>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Parse a DALI result file, treating any read failure as "nothing to do".
///
/// The failure is logged and an empty [`Hits`] is returned; the driver ends
/// the run without starting the engine when the result set is empty.
#[must_use]
pub fn load_hits(path: &Path, limit: Option<usize>) -> Hits {
    match Hits::from_file(path, limit) {
        Ok(hits) => hits,
        Err(e) => {
            log::error!(
                "error reading or processing the DALI result file {}: {e}",
                path.display()
            );
            Hits::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn extracts_id_and_chain_from_well_formed_line() {
        let hits = Hits::from_text("1:  1ABC-A 45.2 molecule desc", None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.chain_for("1abc"), Some('A'));
    }

    #[test]
    fn id_is_lowercased_but_chain_case_is_preserved() {
        let hits = Hits::from_text("7:  9XYZ-b", None);
        assert_eq!(hits.chain_for("9xyz"), Some('b'));
    }

    #[test]
    fn first_occurrence_wins_for_duplicate_ids() {
        let text = "1:  1ABC-A\n2:  1abc-B\n";
        let hits = Hits::from_text(text, None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.chain_for("1abc"), Some('A'));
    }

    #[test]
    fn limit_keeps_first_distinct_ids_in_file_order() {
        let text = "1:  1AAA-A\n2:  1AAA-B\n3:  2BBB-C\n4:  3CCC-D\n";
        let hits = Hits::from_text(text, Some(2));
        let ids: Vec<&str> = hits.ids().collect();
        assert_eq!(ids, vec!["1aaa", "2bbb"]);
    }

    #[test]
    fn limit_of_zero_yields_no_hits() {
        let hits = Hits::from_text("1:  1AAA-A\n", Some(0));
        assert!(hits.is_empty());
    }

    #[test]
    fn non_matching_lines_are_skipped() {
        let text = "# Job: query\nNo: Chain   Z    rmsd\ngarbage\n1:  1ABC-A\n";
        let hits = Hits::from_text(text, None);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn spec_scenario_duplicate_and_case_handling() {
        let text = "1: 1ABC-A\n2: 1abc-B\n3: 2XYZ-C\n";
        let hits = Hits::from_text(text, None);
        let pairs: Vec<(String, char)> = hits
            .iter()
            .map(|hit| (hit.id.clone(), hit.chain))
            .collect();
        assert_eq!(
            pairs,
            vec![("1abc".to_owned(), 'A'), ("2xyz".to_owned(), 'C')]
        );
    }

    #[test]
    fn from_file_reads_hits_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "1:  4HHB-A").unwrap();
        let hits = Hits::from_file(&path, None).unwrap();
        assert_eq!(hits.chain_for("4hhb"), Some('A'));
    }

    #[test]
    fn unreadable_file_is_an_error_strictly_and_empty_leniently() {
        let missing = Path::new("definitely/not/here.txt");
        assert!(Hits::from_file(missing, None).is_err());
        assert!(load_hits(missing, None).is_empty());
    }
}
