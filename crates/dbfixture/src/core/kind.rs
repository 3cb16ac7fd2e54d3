//! Semantic data kinds and type-aware value comparison.
//!
//! [`DataKind`] is a closed enumeration of the semantic kinds a column can
//! carry. Each kind knows how to order two [`Value`]s of its kind; anything
//! it cannot interpret falls back to lexical comparison of the canonical
//! text form, so ordering never fails.
//!
//! [`KindRegistry`] maps native type-name strings (as reported by a
//! database or file format) to kinds. It is explicitly constructed and
//! passed around rather than being a global singleton, so tests can build
//! custom registries without cross-talk.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value::Value;

/// Semantic kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    /// Character data.
    Text,
    /// Integer of any width.
    Integer,
    /// Floating point of any width.
    Float,
    /// Exact decimal/numeric.
    Decimal,
    /// Boolean/bit.
    Boolean,
    /// UUID/GUID.
    Uuid,
    /// Date without time.
    Date,
    /// Time without date.
    Time,
    /// Timestamp without timezone.
    DateTime,
    /// Timestamp with timezone offset.
    DateTimeTz,
    /// Binary data.
    Bytes,
    /// Unrecognized type; compared lexically.
    Unknown,
}

impl DataKind {
    /// Order two values under this kind.
    ///
    /// NULL and the no-value sentinel sort before every concrete value and
    /// are equal to each other for ordering purposes (cell *equality* keeps
    /// them distinct, see the comparison engine). Values the kind cannot
    /// interpret are ordered by their canonical text form.
    #[must_use]
    pub fn compare(&self, a: &Value, b: &Value) -> Ordering {
        match (a.is_null_like(), b.is_null_like()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        match self {
            DataKind::Integer => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => lexical(a, b),
            },
            DataKind::Float => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => lexical(a, b),
            },
            DataKind::Decimal => match (a.as_decimal(), b.as_decimal()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => lexical(a, b),
            },
            DataKind::Boolean => match (a.as_bool(), b.as_bool()) {
                (Some(x), Some(y)) => x.cmp(&y),
                _ => lexical(a, b),
            },
            DataKind::Uuid => match (a, b) {
                (Value::Uuid(x), Value::Uuid(y)) => x.cmp(y),
                _ => lexical(a, b),
            },
            DataKind::Date => match (a, b) {
                (Value::Date(x), Value::Date(y)) => x.cmp(y),
                _ => lexical(a, b),
            },
            DataKind::Time => match (a, b) {
                (Value::Time(x), Value::Time(y)) => x.cmp(y),
                _ => lexical(a, b),
            },
            DataKind::DateTime => match (a, b) {
                (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
                _ => lexical(a, b),
            },
            DataKind::DateTimeTz => match (a, b) {
                (Value::DateTimeTz(x), Value::DateTimeTz(y)) => x.cmp(y),
                _ => lexical(a, b),
            },
            DataKind::Bytes => match (a, b) {
                (Value::Bytes(x), Value::Bytes(y)) => x.cmp(y),
                _ => lexical(a, b),
            },
            DataKind::Text | DataKind::Unknown => lexical(a, b),
        }
    }
}

/// Lexical comparison of canonical text forms.
fn lexical(a: &Value, b: &Value) -> Ordering {
    a.to_text().cmp(&b.to_text())
}

/// Registry of native type-name → semantic kind mappings.
///
/// The built-in table covers the common names across SQL Server,
/// PostgreSQL, and MySQL; additional names can be registered for exotic
/// sources. Lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kinds: HashMap<String, DataKind>,
}

impl KindRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Create a registry with the standard built-in mappings.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();

        for name in [
            "char", "nchar", "varchar", "nvarchar", "text", "ntext", "character",
            "character varying", "clob", "longtext", "mediumtext", "tinytext",
        ] {
            registry.register(name, DataKind::Text);
        }
        for name in [
            "tinyint", "smallint", "int", "integer", "bigint", "int2", "int4", "int8",
            "serial", "bigserial", "mediumint",
        ] {
            registry.register(name, DataKind::Integer);
        }
        for name in ["real", "float", "float4", "float8", "double", "double precision"] {
            registry.register(name, DataKind::Float);
        }
        for name in ["decimal", "numeric", "money", "smallmoney"] {
            registry.register(name, DataKind::Decimal);
        }
        for name in ["bit", "bool", "boolean"] {
            registry.register(name, DataKind::Boolean);
        }
        for name in ["uniqueidentifier", "uuid"] {
            registry.register(name, DataKind::Uuid);
        }
        registry.register("date", DataKind::Date);
        for name in ["time", "time without time zone"] {
            registry.register(name, DataKind::Time);
        }
        for name in [
            "datetime", "datetime2", "smalldatetime", "timestamp",
            "timestamp without time zone",
        ] {
            registry.register(name, DataKind::DateTime);
        }
        for name in ["datetimeoffset", "timestamptz", "timestamp with time zone"] {
            registry.register(name, DataKind::DateTimeTz);
        }
        for name in ["binary", "varbinary", "image", "bytea", "blob", "longblob"] {
            registry.register(name, DataKind::Bytes);
        }

        registry
    }

    /// Register a native type name.
    pub fn register(&mut self, native_name: impl Into<String>, kind: DataKind) {
        self.kinds.insert(native_name.into().to_lowercase(), kind);
    }

    /// Look up the kind for a native type name.
    ///
    /// Unrecognized names map to [`DataKind::Unknown`] rather than failing,
    /// so unmapped columns degrade to lexical comparison.
    #[must_use]
    pub fn kind_for(&self, native_name: &str) -> DataKind {
        self.kinds
            .get(&native_name.to_lowercase())
            .copied()
            .unwrap_or(DataKind::Unknown)
    }

    /// Check if a native type name is registered.
    #[must_use]
    pub fn contains(&self, native_name: &str) -> bool {
        self.kinds.contains_key(&native_name.to_lowercase())
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sorts_first() {
        let kind = DataKind::Integer;
        assert_eq!(kind.compare(&Value::Null, &Value::I32(0)), Ordering::Less);
        assert_eq!(kind.compare(&Value::I32(0), &Value::Null), Ordering::Greater);
        assert_eq!(kind.compare(&Value::Null, &Value::NoValue), Ordering::Equal);
    }

    #[test]
    fn test_integer_comparison_across_widths() {
        let kind = DataKind::Integer;
        assert_eq!(kind.compare(&Value::I16(2), &Value::I64(10)), Ordering::Less);
        assert_eq!(kind.compare(&Value::I32(10), &Value::I32(10)), Ordering::Equal);
    }

    #[test]
    fn test_lexical_vs_numeric_ordering() {
        // lexically "10" < "2", numerically 10 > 2
        assert_eq!(
            DataKind::Text.compare(&Value::I32(10), &Value::I32(2)),
            Ordering::Less
        );
        assert_eq!(
            DataKind::Integer.compare(&Value::I32(10), &Value::I32(2)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_mismatched_payload_falls_back_to_lexical() {
        // an integer column holding text still orders deterministically
        let kind = DataKind::Integer;
        assert_eq!(
            kind.compare(&Value::Text("a".to_string()), &Value::Text("b".to_string())),
            Ordering::Less
        );
    }

    #[test]
    fn test_registry_builtins() {
        let registry = KindRegistry::with_builtins();
        assert_eq!(registry.kind_for("VARCHAR"), DataKind::Text);
        assert_eq!(registry.kind_for("int8"), DataKind::Integer);
        assert_eq!(registry.kind_for("timestamptz"), DataKind::DateTimeTz);
        assert_eq!(registry.kind_for("no_such_type"), DataKind::Unknown);
    }

    #[test]
    fn test_registry_extension() {
        let mut registry = KindRegistry::with_builtins();
        assert!(!registry.contains("hierarchyid"));
        registry.register("hierarchyid", DataKind::Bytes);
        assert_eq!(registry.kind_for("HierarchyId"), DataKind::Bytes);
    }
}
