// src/process/project.rs
use tracing::warn;

use crate::catalog::canonical;
use crate::error::ConvertError;
use crate::process::header::HeaderMapping;

/// The columns to write, in output order, each with its token position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    columns: Vec<(&'static str, usize)>,
}

impl Selection {
    /// Resolve the requested column names against a header mapping.
    ///
    /// With no request every mapped column is selected in position order.
    /// Requested names the header lacks are warned about and dropped; the
    /// rest keep the order they were requested in, duplicates included.
    pub fn resolve(mapping: &HeaderMapping, requested: &[String]) -> Self {
        if requested.is_empty() {
            return Self {
                columns: mapping.iter().collect(),
            };
        }

        let mut columns = Vec::with_capacity(requested.len());
        for name in requested {
            match mapping.iter().find(|(known, _)| *known == name.as_str()) {
                Some(col) => columns.push(col),
                None if canonical(name).is_some() => warn!(
                    column = %name,
                    "selected column is not in the mongostat output; ignoring"
                ),
                None => warn!(
                    column = %name,
                    "selected column is not a mongostat column name; ignoring"
                ),
            }
        }
        Self { columns }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Smallest token count a row needs for every selected position to exist.
    pub fn required_width(&self) -> usize {
        self.columns
            .iter()
            .map(|(_, pos)| pos + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pick the selected fields out of a tokenized row, in selection order.
    ///
    /// A row too short for any selected position is an error for that row;
    /// output is never silently truncated.
    pub fn project<'a>(
        &self,
        tokens: &'a [String],
        line: u64,
    ) -> Result<Vec<&'a str>, ConvertError> {
        let needed = self.required_width();
        if tokens.len() < needed {
            return Err(ConvertError::ShortRow {
                line,
                needed,
                found: tokens.len(),
            });
        }
        Ok(self
            .columns
            .iter()
            .map(|(_, pos)| tokens[*pos].as_str())
            .collect())
    }
}
