//! Binary variant labels.

use serde::{Deserialize, Serialize};

/// Label used for the true outcome when none is asserted.
pub const DEFAULT_TRUE_VARIANT: &str = "true";

/// Label used for the false outcome when the registry offers no alternative.
pub const DEFAULT_FALSE_VARIANT: &str = "false";

/// The canonical true/false variants of a split consumed as a boolean.
///
/// Serializes as `{"true": "<label>", "false": "<label>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantPair {
    /// Variant reported for a `true` outcome.
    #[serde(rename = "true")]
    pub true_label: String,
    /// Variant reported for a `false` outcome.
    #[serde(rename = "false")]
    pub false_label: String,
}

impl VariantPair {
    /// Creates a pair from explicit labels.
    pub fn new(true_label: impl Into<String>, false_label: impl Into<String>) -> Self {
        Self {
            true_label: true_label.into(),
            false_label: false_label.into(),
        }
    }

    /// Variant label for a boolean outcome.
    #[must_use]
    pub fn label(&self, outcome: bool) -> &str {
        if outcome {
            &self.true_label
        } else {
            &self.false_label
        }
    }

    /// Boolean outcome for an assigned variant.
    ///
    /// Returns `None` for variants outside the pair, which happens when a
    /// split carries more than two variants.
    #[must_use]
    pub fn outcome_of(&self, variant: &str) -> Option<bool> {
        if variant == self.true_label {
            Some(true)
        } else if variant == self.false_label {
            Some(false)
        } else {
            None
        }
    }
}

impl Default for VariantPair {
    fn default() -> Self {
        Self::new(DEFAULT_TRUE_VARIANT, DEFAULT_FALSE_VARIANT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_and_outcome() {
        let pair = VariantPair::new("enabled", "control");
        assert_eq!(pair.label(true), "enabled");
        assert_eq!(pair.label(false), "control");
        assert_eq!(pair.outcome_of("enabled"), Some(true));
        assert_eq!(pair.outcome_of("control"), Some(false));
        assert_eq!(pair.outcome_of("holdout"), None);
    }

    #[test]
    fn test_default_pair() {
        let pair = VariantPair::default();
        assert_eq!(pair.true_label, "true");
        assert_eq!(pair.false_label, "false");
    }

    #[test]
    fn test_serializes_with_boolean_keys() {
        let value = serde_json::to_value(VariantPair::new("foo", "false")).unwrap();
        assert_eq!(value, json!({ "true": "foo", "false": "false" }));
    }
}
