// src/process/header.rs
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::CANONICAL_COLUMNS;

/// One whole-word pattern per canonical column, in catalog order.
///
/// Names are matched literally: `qr|qw` is not an alternation and `%` is just
/// a character. A match must be bounded by whitespace or the line ends, so
/// `res` never matches inside another word.
static COLUMN_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    CANONICAL_COLUMNS
        .iter()
        .map(|name| {
            let pattern = format!(r"(?:^|\s)({})(?:\s|$)", regex::escape(name));
            let re = Regex::new(&pattern).expect("escaped literal is a valid regex");
            (*name, re)
        })
        .collect()
});

/// How positions are assigned to the canonical names found in a header line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderStrategy {
    /// Positions follow the left-to-right order of the names in the header text.
    #[default]
    Positional,
    /// Positions follow catalog order, whatever the header's layout.
    /// Only correct when the header happens to list columns in catalog order.
    Catalog,
}

/// Canonical column name → token position, for one input stream.
///
/// Positions are contiguous from 0, so the position of a column is its index
/// in `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderMapping {
    columns: Vec<&'static str>,
}

impl HeaderMapping {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Column names in position order.
    pub fn names(&self) -> &[&'static str] {
        &self.columns
    }

    /// `(name, position)` pairs in position order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.columns.iter().enumerate().map(|(pos, name)| (*name, pos))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Find every canonical column in `line` with the byte offset of its first
/// occurrence. Results are in catalog order.
fn locate_columns(line: &str) -> Vec<(&'static str, usize)> {
    COLUMN_PATTERNS
        .iter()
        .filter_map(|(name, re)| {
            re.captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| (*name, m.start()))
        })
        .collect()
}

/// Build the header mapping for one header line.
///
/// Canonical columns missing from the line are simply absent from the mapping;
/// which columns mongostat prints depends on the server it watches.
pub fn parse_header(line: &str, strategy: HeaderStrategy) -> HeaderMapping {
    let mut found = locate_columns(line);
    if strategy == HeaderStrategy::Positional {
        found.sort_by_key(|(_, offset)| *offset);
    }
    HeaderMapping {
        columns: found.into_iter().map(|(name, _)| name).collect(),
    }
}

/// True when catalog order and left-to-right order give different positions
/// for this header line.
pub fn strategies_disagree(line: &str) -> bool {
    parse_header(line, HeaderStrategy::Positional) != parse_header(line, HeaderStrategy::Catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_HEADER: &str = "insert  query update delete getmore command flushes mapped  vsize    res faults  locked db idx miss %     qr|qw   ar|aw  netIn netOut  conn    set repl       time";

    #[test]
    fn test_full_header_matches_catalog() {
        let mapping = parse_header(FULL_HEADER, HeaderStrategy::Positional);
        assert_eq!(mapping.names(), &CANONICAL_COLUMNS[..]);
        assert_eq!(mapping.position("locked db"), Some(11));
        assert_eq!(mapping.position("idx miss %"), Some(12));
        assert_eq!(mapping.position("time"), Some(20));
        assert!(!strategies_disagree(FULL_HEADER));
    }

    #[test]
    fn test_missing_columns_are_absent() {
        let line = "insert  query update delete getmore command flushes mapped  vsize    res faults  locked db idx miss %     qr|qw   ar|aw  netIn netOut  conn       time";
        let mapping = parse_header(line, HeaderStrategy::Positional);
        assert_eq!(mapping.len(), 19);
        assert!(!mapping.contains("set"));
        assert!(!mapping.contains("repl"));
        assert_eq!(mapping.position("time"), Some(18));
    }

    #[test]
    fn test_catalog_strategy_ignores_text_order() {
        let line = "insert  time  query";
        let mapping = parse_header(line, HeaderStrategy::Catalog);
        assert_eq!(mapping.names(), &["insert", "query", "time"]);
        assert_eq!(mapping.position("time"), Some(2));
    }

    #[test]
    fn test_positional_strategy_follows_text_order() {
        let line = "insert  time  query";
        let mapping = parse_header(line, HeaderStrategy::Positional);
        assert_eq!(mapping.names(), &["insert", "time", "query"]);
        assert_eq!(mapping.position("time"), Some(1));
        assert!(strategies_disagree(line));
    }

    #[test]
    fn test_parse_is_idempotent() {
        for strategy in [HeaderStrategy::Positional, HeaderStrategy::Catalog] {
            let first = parse_header("insert  conn  res  time", strategy);
            let second = parse_header("insert  conn  res  time", strategy);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_names_are_matched_literally_and_whole() {
        // "qr" alone must not satisfy "qr|qw", and "resident" is not "res"
        let mapping = parse_header("insert qr resident netInx", HeaderStrategy::Positional);
        assert_eq!(mapping.names(), &["insert"]);

        let mapping = parse_header("insert qr|qw idx miss %", HeaderStrategy::Positional);
        assert_eq!(mapping.names(), &["insert", "qr|qw", "idx miss %"]);
    }
}
