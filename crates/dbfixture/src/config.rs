//! Runtime configuration.
//!
//! [`FixtureConfig`] is a typed property bag: each property declares the
//! semantic kind its value must have, and [`set`](FixtureConfig::set)
//! rejects wrong-kinded values at assignment time rather than at point of
//! use. Unset properties fall back to documented defaults.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::{DataKind, Value};
use crate::error::{FixtureError, Result};

/// Default bound of the streaming channel.
pub const DEFAULT_STREAM_CAPACITY: usize = 16;

/// Configurable properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfigProperty {
    /// Whether cell comparison goes through each column's semantic kind
    /// (boolean, default `true`). When off, cells compare by canonical text.
    TypedComparison,

    /// Whether comparison sorts rows before matching them (boolean, default
    /// `true`), so row order differences never fail an assertion.
    SortRows,

    /// Bound of the streaming producer/consumer channel (positive integer,
    /// default [`DEFAULT_STREAM_CAPACITY`]).
    StreamCapacity,
}

impl ConfigProperty {
    /// The kind a value assigned to this property must have.
    #[must_use]
    pub fn expected_kind(&self) -> DataKind {
        match self {
            ConfigProperty::TypedComparison | ConfigProperty::SortRows => DataKind::Boolean,
            ConfigProperty::StreamCapacity => DataKind::Integer,
        }
    }

    /// Stable display name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ConfigProperty::TypedComparison => "typed_comparison",
            ConfigProperty::SortRows => "sort_rows",
            ConfigProperty::StreamCapacity => "stream_capacity",
        }
    }
}

/// Typed runtime property bag.
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    values: HashMap<ConfigProperty, Value>,
}

impl FixtureConfig {
    /// Create a config with every property at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a property.
    ///
    /// # Errors
    ///
    /// Fails with [`FixtureError::Config`] if the value's kind does not
    /// match the property's expected kind, or if an integer property gets a
    /// non-positive value.
    pub fn set(&mut self, property: ConfigProperty, value: Value) -> Result<()> {
        if value.kind() != property.expected_kind() {
            return Err(FixtureError::config(format!(
                "property '{}' expects {:?}, got {:?}",
                property.name(),
                property.expected_kind(),
                value.kind()
            )));
        }
        if property == ConfigProperty::StreamCapacity {
            match value.as_i64() {
                Some(n) if n > 0 => {}
                _ => {
                    return Err(FixtureError::config(format!(
                        "property '{}' must be a positive integer",
                        property.name()
                    )))
                }
            }
        }
        self.values.insert(property, value);
        Ok(())
    }

    /// Raw value of a property, if set.
    #[must_use]
    pub fn get(&self, property: ConfigProperty) -> Option<&Value> {
        self.values.get(&property)
    }

    /// Boolean property with its default.
    #[must_use]
    pub fn bool_value(&self, property: ConfigProperty) -> bool {
        match self.values.get(&property).and_then(Value::as_bool) {
            Some(v) => v,
            None => match property {
                ConfigProperty::TypedComparison | ConfigProperty::SortRows => true,
                ConfigProperty::StreamCapacity => false,
            },
        }
    }

    /// The streaming channel bound.
    #[must_use]
    pub fn stream_capacity(&self) -> usize {
        self.values
            .get(&ConfigProperty::StreamCapacity)
            .and_then(Value::as_i64)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_STREAM_CAPACITY)
    }
}
