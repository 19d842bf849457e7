// src/catalog/mod.rs

/// Every column name mongostat is known to print, in its default display order.
///
/// A given run only prints a subset: `set` and `repl` appear only against a
/// replica set member, for instance.
pub const CANONICAL_COLUMNS: [&str; 21] = [
    "insert",
    "query",
    "update",
    "delete",
    "getmore",
    "command",
    "flushes",
    "mapped",
    "vsize",
    "res",
    "faults",
    "locked db",
    "idx miss %",
    "qr|qw",
    "ar|aw",
    "netIn",
    "netOut",
    "conn",
    "set",
    "repl",
    "time",
];

/// A header line (first or repeated) starts with the first canonical column.
pub const HEADER_MARKER: &str = CANONICAL_COLUMNS[0];

/// Prefix of the one-off "connected to: ..." banner mongostat prints first.
pub const BANNER_PREFIX: &str = "connected";

/// Look up the catalog's own `&'static str` for `name`, if it is canonical.
pub fn canonical(name: &str) -> Option<&'static str> {
    CANONICAL_COLUMNS.iter().copied().find(|c| *c == name)
}

pub fn is_header_line(line: &str) -> bool {
    line.trim_start().starts_with(HEADER_MARKER)
}

pub fn is_banner_line(line: &str) -> bool {
    line.starts_with(BANNER_PREFIX)
}
