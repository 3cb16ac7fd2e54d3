//! Configurable value substitution.
//!
//! [`ReplacementTable`] rewrites cell values on the way out of a source
//! table. Three substitution layers apply, in order:
//!
//! 1. **Whole-value replacement**: the cell equals a registered value and is
//!    replaced by its mapping (e.g. `Text("[NULL]")` → `Null`).
//! 2. **Delimited-substring replacement**: occurrences of
//!    `{start}{name}{end}` inside text cells are replaced by the mapping for
//!    `name` (delimiters default to `${`/`}`).
//! 3. **Raw-substring replacement**: plain substring occurrences inside text
//!    cells are replaced.
//!
//! In strict mode an unreplaced delimited marker left in a text cell fails
//! the read instead of passing through silently.

use std::sync::Arc;

use crate::core::{Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// A pass-through decorator substituting configured values.
pub struct ReplacementTable {
    source: Arc<dyn Table>,
    values: Vec<(Value, Value)>,
    substrings: Vec<(String, String)>,
    delimited: Vec<(String, String)>,
    start_delimiter: String,
    end_delimiter: String,
    strict: bool,
}

impl ReplacementTable {
    /// Wrap `source` with no substitutions and `${`/`}` delimiters.
    pub fn new(source: Arc<dyn Table>) -> Self {
        Self {
            source,
            values: Vec::new(),
            substrings: Vec::new(),
            delimited: Vec::new(),
            start_delimiter: "${".to_string(),
            end_delimiter: "}".to_string(),
            strict: false,
        }
    }

    /// Replace whole cell values equal to `from` with `to`.
    pub fn add_value(&mut self, from: Value, to: Value) -> &mut Self {
        self.values.push((from, to));
        self
    }

    /// Replace raw substring occurrences of `from` inside text cells.
    pub fn add_substring(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<&mut Self> {
        let from = from.into();
        if from.is_empty() {
            return Err(FixtureError::config(
                "substring replacement source must not be empty",
            ));
        }
        self.substrings.push((from, to.into()));
        Ok(self)
    }

    /// Replace `{start}{name}{end}` markers inside text cells.
    pub fn add_delimited(
        &mut self,
        name: impl Into<String>,
        to: impl Into<String>,
    ) -> Result<&mut Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(FixtureError::config(
                "delimited replacement name must not be empty",
            ));
        }
        self.delimited.push((name, to.into()));
        Ok(self)
    }

    /// Change the delimiters used by delimited replacement.
    pub fn set_delimiters(
        &mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Result<&mut Self> {
        let start = start.into();
        let end = end.into();
        if start.is_empty() || end.is_empty() {
            return Err(FixtureError::config("delimiters must not be empty"));
        }
        self.start_delimiter = start;
        self.end_delimiter = end;
        Ok(self)
    }

    /// Fail reads that leave a delimited marker unreplaced.
    pub fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    fn replace_text(&self, text: &str) -> Result<String> {
        let mut out = text.to_string();
        for (name, to) in &self.delimited {
            let marker = format!("{}{}{}", self.start_delimiter, name, self.end_delimiter);
            out = out.replace(&marker, to);
        }
        if self.strict {
            if let Some(start) = out.find(&self.start_delimiter) {
                if out[start + self.start_delimiter.len()..].contains(&self.end_delimiter) {
                    return Err(FixtureError::config(format!(
                        "unreplaced substitution marker in '{}'",
                        out
                    )));
                }
            }
        }
        for (from, to) in &self.substrings {
            out = out.replace(from, to);
        }
        Ok(out)
    }
}

impl Table for ReplacementTable {
    fn metadata(&self) -> &TableMetadata {
        self.source.metadata()
    }

    fn row_count(&self) -> Result<usize> {
        self.source.row_count()
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let value = self.source.value(row, column)?;

        for (from, to) in &self.values {
            if *from == value {
                return Ok(to.clone());
            }
        }

        if let Value::Text(text) = &value {
            let replaced = self.replace_text(text)?;
            if replaced != *text {
                return Ok(Value::Text(replaced));
            }
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, DataKind};
    use crate::dataset::DefaultTable;

    fn make_table(cell: &str) -> Arc<dyn Table> {
        let meta = TableMetadata::new("t", vec![Column::new("v", DataKind::Text)]).unwrap();
        let table = DefaultTable::new(meta)
            .with_row(vec![Value::Text(cell.to_string())])
            .unwrap();
        Arc::new(table)
    }

    #[test]
    fn test_whole_value_replacement() {
        let mut table = ReplacementTable::new(make_table("[NULL]"));
        table.add_value(Value::Text("[NULL]".to_string()), Value::Null);
        assert_eq!(table.value(0, "v").unwrap(), Value::Null);
    }

    #[test]
    fn test_delimited_replacement() {
        let mut table = ReplacementTable::new(make_table("created by ${user} today"));
        table.add_delimited("user", "alice").unwrap();
        assert_eq!(
            table.value(0, "v").unwrap(),
            Value::Text("created by alice today".to_string())
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let mut table = ReplacementTable::new(make_table("value=%(token)"));
        table.set_delimiters("%(", ")").unwrap();
        table.add_delimited("token", "42").unwrap();
        assert_eq!(
            table.value(0, "v").unwrap(),
            Value::Text("value=42".to_string())
        );
    }

    #[test]
    fn test_raw_substring_replacement() {
        let mut table = ReplacementTable::new(make_table("foo-bar-foo"));
        table.add_substring("foo", "baz").unwrap();
        assert_eq!(
            table.value(0, "v").unwrap(),
            Value::Text("baz-bar-baz".to_string())
        );
    }

    #[test]
    fn test_strict_mode_rejects_unreplaced_marker() {
        let mut table = ReplacementTable::new(make_table("hello ${ghost}"));
        table.add_delimited("user", "alice").unwrap();
        table.set_strict(true);
        let err = table.value(0, "v").unwrap_err();
        assert!(matches!(err, FixtureError::Config(_)));
    }

    #[test]
    fn test_non_text_values_pass_through() {
        let meta = TableMetadata::new("t", vec![Column::new("v", DataKind::Integer)]).unwrap();
        let inner = DefaultTable::new(meta).with_row(vec![Value::I32(5)]).unwrap();
        let mut table = ReplacementTable::new(Arc::new(inner));
        table.add_substring("5", "6").unwrap();
        assert_eq!(table.value(0, "v").unwrap(), Value::I32(5));
    }
}
