//! Split registry data model.
//!
//! The registry is owned by the surrounding platform and handed to this crate
//! already deserialized. Its serde shape follows the platform's registry
//! document:
//!
//! ```json
//! { "splits": { "checkout_flow": { "weights": { "true": 50, "false": 50 } } } }
//! ```
//!
//! Fields the platform carries beyond `splits` and `weights` are ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Variant weights for a single split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDefinition {
    weights: BTreeMap<String, u32>,
}

impl SplitDefinition {
    /// Creates a definition from `(variant, weight)` pairs.
    pub fn new<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            weights: weights
                .into_iter()
                .map(|(variant, weight)| (variant.into(), weight))
                .collect(),
        }
    }

    /// Variant label to weight mapping.
    #[must_use]
    pub fn weights(&self) -> &BTreeMap<String, u32> {
        &self.weights
    }

    /// Weight of a single variant, if it exists.
    #[must_use]
    pub fn weight(&self, variant: &str) -> Option<u32> {
        self.weights.get(variant).copied()
    }

    /// Variant labels in ascending order.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Number of variants in the split.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.weights.len()
    }
}

/// All known splits, keyed by split name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitRegistry {
    #[serde(default)]
    splits: BTreeMap<String, SplitDefinition>,
}

impl SplitRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a split, replacing any previous definition with the same name.
    #[must_use]
    pub fn with_split<I, S>(mut self, name: impl Into<String>, weights: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.insert_split(name, SplitDefinition::new(weights));
        self
    }

    /// Inserts a split definition, returning the one it replaced.
    pub fn insert_split(
        &mut self,
        name: impl Into<String>,
        definition: SplitDefinition,
    ) -> Option<SplitDefinition> {
        self.splits.insert(name.into(), definition)
    }

    /// Looks up a split by name.
    #[must_use]
    pub fn split(&self, name: &str) -> Option<&SplitDefinition> {
        self.splits.get(name)
    }

    /// Returns true if the registry defines `name`.
    #[must_use]
    pub fn contains_split(&self, name: &str) -> bool {
        self.splits.contains_key(name)
    }

    /// Split names in ascending order.
    pub fn split_names(&self) -> impl Iterator<Item = &str> {
        self.splits.keys().map(String::as_str)
    }

    /// Number of splits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Returns true if no splits are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }
}
