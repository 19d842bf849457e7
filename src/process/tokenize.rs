// src/process/tokenize.rs

/// Decorative marker mongostat prefixes to values replicated from a primary.
const MARKER: char = '*';

/// Split one mongostat data line into positional fields.
///
/// - the line terminator and surrounding whitespace are dropped
/// - any run of whitespace separates two fields
/// - `*` is stripped from every field; a lone `*` becomes an empty field so
///   that later positions stay aligned with the header
///
/// A blank line yields no fields.
pub fn tokenize_line(line: &str) -> Vec<String> {
    line.split_whitespace()
        .map(|tok| tok.replace(MARKER, ""))
        .collect()
}
