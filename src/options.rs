//! Resolver options.
//!
//! `AbOptions` is the typed form of the option hash a resolver is built from.
//! Every recognized option keeps track of whether the key was supplied at
//! all, which is what separates "omitted" (an error for required keys) from
//! "supplied without a value" (accepted, falls back to a default).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::{AbError, AbResult};
use crate::registry::SplitRegistry;

/// Option key for the split name.
pub const SPLIT_NAME: &str = "split_name";
/// Option key for the asserted true variant.
pub const TRUE_VARIANT: &str = "true_variant";
/// Option key for the split registry.
pub const SPLIT_REGISTRY: &str = "split_registry";

/// Presence of a single option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue<T> {
    /// The key was never supplied.
    Absent,
    /// The key was supplied without a value.
    Nil,
    /// The key was supplied with a value.
    Present(T),
}

impl<T> Default for OptionValue<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> OptionValue<T> {
    /// Returns true unless the key was never supplied.
    #[must_use]
    pub const fn is_supplied(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Collapses `Absent` and `Nil` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Nil => None,
        }
    }
}

impl<T> From<Option<T>> for OptionValue<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Self::Present)
    }
}

/// Options consumed by [`crate::SplitVariantResolver`].
///
/// # Example
/// ```rust,ignore
/// let options = AbOptions::new()
///     .split_name("checkout_flow")
///     .no_true_variant()
///     .split_registry(registry);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AbOptions {
    pub(crate) split_name: OptionValue<String>,
    pub(crate) true_variant: OptionValue<String>,
    pub(crate) split_registry: OptionValue<Arc<SplitRegistry>>,
    pub(crate) unrecognized: BTreeMap<String, Value>,
}

impl AbOptions {
    /// Creates an option set with nothing supplied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies the split name.
    #[must_use]
    pub fn split_name(mut self, name: impl Into<String>) -> Self {
        self.split_name = OptionValue::Present(name.into());
        self
    }

    /// Supplies the asserted true variant.
    #[must_use]
    pub fn true_variant(mut self, variant: impl Into<String>) -> Self {
        self.true_variant = OptionValue::Present(variant.into());
        self
    }

    /// Supplies the `true_variant` key with no value, selecting the default.
    #[must_use]
    pub fn no_true_variant(mut self) -> Self {
        self.true_variant = OptionValue::Nil;
        self
    }

    /// Supplies the split registry.
    #[must_use]
    pub fn split_registry(mut self, registry: impl Into<Arc<SplitRegistry>>) -> Self {
        self.split_registry = OptionValue::Present(registry.into());
        self
    }

    /// Supplies the `split_registry` key with no value (local mode).
    #[must_use]
    pub fn no_split_registry(mut self) -> Self {
        self.split_registry = OptionValue::Nil;
        self
    }

    /// Adds an option this crate does not recognize.
    ///
    /// Kept only so construction can report it; resolvers refuse to build
    /// while any are present.
    #[must_use]
    pub fn extra_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.unrecognized.insert(key.into(), value);
        self
    }

    /// Builds options from a raw option hash.
    ///
    /// Recognized keys are type-checked; everything else is carried along as
    /// unrecognized.
    pub fn from_map(map: Map<String, Value>) -> AbResult<Self> {
        let mut options = Self::new();
        for (key, value) in map {
            match key.as_str() {
                SPLIT_NAME => options.split_name = parse_split_name(value)?,
                TRUE_VARIANT => options.true_variant = parse_true_variant(value)?,
                SPLIT_REGISTRY => options.split_registry = parse_split_registry(value)?,
                _ => {
                    options.unrecognized.insert(key, value);
                }
            }
        }
        Ok(options)
    }

    /// Builds options from a raw JSON object.
    pub fn from_value(value: Value) -> AbResult<Self> {
        match value {
            Value::Object(map) => Self::from_map(map),
            other => Err(AbError::invalid(
                "options",
                format!("expected an object, got {}", json_kind(&other)),
            )),
        }
    }

    /// Keys supplied that this crate does not recognize, ascending.
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.unrecognized.keys().map(String::as_str)
    }
}

fn parse_split_name(value: Value) -> AbResult<OptionValue<String>> {
    match value {
        Value::Null => Ok(OptionValue::Nil),
        Value::String(name) => Ok(OptionValue::Present(name)),
        other => Err(AbError::invalid(
            SPLIT_NAME,
            format!("expected a string, got {}", json_kind(&other)),
        )),
    }
}

// Scalars are stringified so `true_variant: true` names the "true" variant.
fn parse_true_variant(value: Value) -> AbResult<OptionValue<String>> {
    match value {
        Value::Null => Ok(OptionValue::Nil),
        Value::String(variant) => Ok(OptionValue::Present(variant)),
        Value::Bool(flag) => Ok(OptionValue::Present(flag.to_string())),
        Value::Number(number) => Ok(OptionValue::Present(number.to_string())),
        other => Err(AbError::invalid(
            TRUE_VARIANT,
            format!("expected a scalar, got {}", json_kind(&other)),
        )),
    }
}

fn parse_split_registry(value: Value) -> AbResult<OptionValue<Arc<SplitRegistry>>> {
    if value.is_null() {
        return Ok(OptionValue::Nil);
    }
    let registry: SplitRegistry = serde_json::from_value(value)
        .map_err(|e| AbError::invalid(SPLIT_REGISTRY, e.to_string()))?;
    Ok(OptionValue::Present(Arc::new(registry)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
