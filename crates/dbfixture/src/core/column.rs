//! Column metadata.

use serde::{Deserialize, Serialize};

use super::kind::DataKind;

/// Whether a column accepts NULL values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nullability {
    /// The column rejects NULL.
    NoNulls,
    /// The column accepts NULL.
    Nullable,
    /// Nullability was not reported by the source.
    Unknown,
}

/// Whether a column is auto-incremented by the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoIncrement {
    /// The column is auto-incremented.
    Yes,
    /// The column is not auto-incremented.
    No,
    /// Auto-increment status was not reported by the source.
    Unknown,
}

/// Column metadata.
///
/// Immutable value object. The name's case is preserved, but all lookups in
/// this library compare column names case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Column name, case preserved.
    name: String,

    /// Semantic kind used for type-aware comparison.
    kind: DataKind,

    /// Native type name as reported by the source (e.g. "nvarchar").
    native_type: Option<String>,

    /// Whether the column allows NULL.
    nullable: Nullability,

    /// Default value expression, if any.
    default_value: Option<String>,

    /// Free-form remarks from the source.
    remarks: Option<String>,

    /// Whether the column is auto-incremented.
    auto_increment: AutoIncrement,
}

impl Column {
    /// Create a column with the given name and kind.
    ///
    /// Nullability and auto-increment start as `Unknown`.
    pub fn new(name: impl Into<String>, kind: DataKind) -> Self {
        Self {
            name: name.into(),
            kind,
            native_type: None,
            nullable: Nullability::Unknown,
            default_value: None,
            remarks: None,
            auto_increment: AutoIncrement::Unknown,
        }
    }

    /// Set the native type name.
    pub fn with_native_type(mut self, native_type: impl Into<String>) -> Self {
        self.native_type = Some(native_type.into());
        self
    }

    /// Set the nullability.
    pub fn with_nullable(mut self, nullable: Nullability) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the default value expression.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Set the remarks.
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }

    /// Set the auto-increment status.
    pub fn with_auto_increment(mut self, auto_increment: AutoIncrement) -> Self {
        self.auto_increment = auto_increment;
        self
    }

    /// Column name, case preserved.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Semantic kind.
    #[must_use]
    pub fn kind(&self) -> DataKind {
        self.kind
    }

    /// Native type name, if reported.
    #[must_use]
    pub fn native_type(&self) -> Option<&str> {
        self.native_type.as_deref()
    }

    /// Nullability.
    #[must_use]
    pub fn nullable(&self) -> Nullability {
        self.nullable
    }

    /// Default value expression, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Remarks, if any.
    #[must_use]
    pub fn remarks(&self) -> Option<&str> {
        self.remarks.as_deref()
    }

    /// Auto-increment status.
    #[must_use]
    pub fn auto_increment(&self) -> AutoIncrement {
        self.auto_increment
    }

    /// Case-insensitive name match.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Equality by (name, kind, nullability, native type name, default value).
/// Remarks and auto-increment are informational and do not participate.
impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.nullable == other.nullable
            && self.native_type == other.native_type
            && self.default_value == other.default_value
    }
}

impl Eq for Column {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let col = Column::new("id", DataKind::Integer);
        assert_eq!(col.name(), "id");
        assert_eq!(col.kind(), DataKind::Integer);
        assert_eq!(col.nullable(), Nullability::Unknown);
        assert_eq!(col.auto_increment(), AutoIncrement::Unknown);
        assert!(col.native_type().is_none());
    }

    #[test]
    fn test_matches_name_case_insensitive() {
        let col = Column::new("CustomerId", DataKind::Integer);
        assert!(col.matches_name("customerid"));
        assert!(col.matches_name("CUSTOMERID"));
        assert!(!col.matches_name("customer_id"));
    }

    #[test]
    fn test_equality_contract() {
        let a = Column::new("id", DataKind::Integer).with_native_type("int");
        let b = Column::new("id", DataKind::Integer).with_native_type("int");
        assert_eq!(a, b);

        // remarks do not participate in equality
        let c = b.clone().with_remarks("surrogate key");
        assert_eq!(a, c);

        // default value does
        let d = Column::new("id", DataKind::Integer)
            .with_native_type("int")
            .with_default("0");
        assert_ne!(a, d);

        // kind does
        let e = Column::new("id", DataKind::Text).with_native_type("int");
        assert_ne!(a, e);
    }
}
