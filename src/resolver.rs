//! Binary variant resolution for A/B splits.
//!
//! A [`SplitVariantResolver`] is validated when it is built and resolves its
//! [`VariantPair`] lazily, once, on first access. Resolvers are cheap and
//! meant to be request-scoped.

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::ResolverContext;
use crate::error::{AbError, AbResult, SCHEMA_RESYNC_HINT};
use crate::notifier::MisconfigurationNotifier;
use crate::options::{AbOptions, OptionValue, SPLIT_NAME, SPLIT_REGISTRY, TRUE_VARIANT};
use crate::registry::{SplitDefinition, SplitRegistry};
use crate::variant::{VariantPair, DEFAULT_FALSE_VARIANT, DEFAULT_TRUE_VARIANT};

/// Resolves which variants of a split stand for `true` and `false`.
///
/// # Example
/// ```rust,ignore
/// let resolver = SplitVariantResolver::new(
///     AbOptions::new()
///         .split_name("checkout_flow")
///         .no_true_variant()
///         .split_registry(registry),
/// )?;
/// assert_eq!(resolver.variants().true_label, "true");
/// ```
pub struct SplitVariantResolver {
    split_name: String,
    true_variant: Option<String>,
    split_registry: Option<Arc<SplitRegistry>>,
    notifier: Arc<dyn MisconfigurationNotifier>,
    variants: OnceLock<VariantPair>,
}

impl SplitVariantResolver {
    /// Builds a resolver with the default [`ResolverContext`].
    pub fn new(options: AbOptions) -> AbResult<Self> {
        Self::with_context(options, &ResolverContext::default())
    }

    /// Builds a resolver, validating `options` against `ctx`.
    ///
    /// Returns `AbError` if:
    /// - `split_name` is missing, nil or empty
    /// - the `true_variant` or `split_registry` key was never supplied
    ///   (supplying either without a value is fine)
    /// - any unrecognized option was supplied
    /// - a registry was supplied that does not define the split
    pub fn with_context(options: AbOptions, ctx: &ResolverContext) -> AbResult<Self> {
        let AbOptions {
            split_name,
            true_variant,
            split_registry,
            unrecognized,
        } = options;

        let split_name = match split_name {
            OptionValue::Present(name) if !name.is_empty() => name,
            _ => return Err(AbError::missing(SPLIT_NAME)),
        };
        if !true_variant.is_supplied() {
            return Err(AbError::missing(TRUE_VARIANT));
        }
        if !split_registry.is_supplied() {
            return Err(AbError::missing(SPLIT_REGISTRY));
        }
        if !unrecognized.is_empty() {
            return Err(AbError::UnrecognizedOption {
                options: unrecognized.into_keys().collect(),
            });
        }

        let split_registry = split_registry.into_option();
        if let Some(registry) = &split_registry {
            if !registry.contains_split(&split_name) {
                return Err(AbError::UnknownSplit {
                    hint: ctx
                        .environment()
                        .is_development()
                        .then(|| SCHEMA_RESYNC_HINT.to_string()),
                    split_name,
                });
            }
        }

        tracing::debug!(
            target: "absplit",
            split_name = %split_name,
            has_registry = split_registry.is_some(),
            "resolver_validated"
        );

        Ok(Self {
            split_name,
            true_variant: true_variant.into_option(),
            split_registry,
            notifier: Arc::clone(ctx.notifier()),
            variants: OnceLock::new(),
        })
    }

    /// The true/false variant pair, computed on first call.
    ///
    /// Notifies the misconfiguration channel (at most once per resolver) when
    /// the split has more than two variants.
    pub fn variants(&self) -> &VariantPair {
        self.variants.get_or_init(|| self.build_variant_pair())
    }

    /// Name of the split being resolved.
    #[must_use]
    pub fn split_name(&self) -> &str {
        &self.split_name
    }

    /// The resolved true variant.
    #[must_use]
    pub fn true_variant(&self) -> &str {
        self.true_variant.as_deref().unwrap_or(DEFAULT_TRUE_VARIANT)
    }

    /// Returns true when resolving against a registry.
    #[must_use]
    pub fn has_registry(&self) -> bool {
        self.split_registry.is_some()
    }

    fn split(&self) -> Option<&SplitDefinition> {
        self.split_registry
            .as_deref()
            .and_then(|registry| registry.split(&self.split_name))
    }

    fn build_variant_pair(&self) -> VariantPair {
        let true_label = self.true_variant();

        let false_label = match self.split() {
            None => DEFAULT_FALSE_VARIANT,
            Some(split) => {
                if split.variant_count() > 2 {
                    self.notify_because_ab("configures split with more than 2 variants");
                }
                // Registry present but nothing besides the true variant: same
                // fallback as local mode.
                split
                    .variants()
                    .filter(|variant| *variant != true_label)
                    .min()
                    .unwrap_or(DEFAULT_FALSE_VARIANT)
            }
        };

        tracing::debug!(
            target: "absplit",
            split_name = %self.split_name,
            true_label,
            false_label,
            "variants_resolved"
        );

        VariantPair::new(true_label, false_label)
    }

    fn notify_because_ab(&self, msg: &str) {
        self.notifier.notify(&format!("A/B for \"{}\" {msg}", self.split_name));
    }
}

impl fmt::Debug for SplitVariantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitVariantResolver")
            .field("split_name", &self.split_name)
            .field("true_variant", &self.true_variant)
            .field("has_registry", &self.has_registry())
            .field("variants", &self.variants.get())
            .finish_non_exhaustive()
    }
}
