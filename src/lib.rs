//! # absplit - binary variant resolution for A/B splits
//!
//! Feature-experimentation platforms describe every experiment as a *split*
//! with weighted *variants*. Application code often consumes a split as a
//! plain boolean; absplit decides which variant label stands for `true` and
//! which for `false`, validating the split against the platform's registry.
//!
//! ## Core Concepts
//!
//! - **SplitRegistry**: All known splits and their variant weights
//! - **AbOptions**: The option set a resolver is built from
//! - **SplitVariantResolver**: Validates options, then resolves the pair lazily
//! - **VariantPair**: The canonical true/false variant labels
//! - **MisconfigurationNotifier**: Advisory channel for modeling drift
//!
//! ## Usage
//!
//! ```rust,ignore
//! use absplit::{AbOptions, SplitRegistry, SplitVariantResolver};
//!
//! let registry = SplitRegistry::new()
//!     .with_split("checkout_flow", [("true", 50), ("nope", 50)]);
//!
//! let resolver = SplitVariantResolver::new(
//!     AbOptions::new()
//!         .split_name("checkout_flow")
//!         .no_true_variant()
//!         .split_registry(registry),
//! )?;
//!
//! assert_eq!(resolver.variants().false_label, "nope");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod notifier;
pub mod options;
pub mod registry;
pub mod resolver;
pub mod variant;

// Re-export primary types at crate root for convenience
pub use config::{Environment, EnvironmentProbe, ResolverContext};
pub use error::{AbError, AbResult};
pub use notifier::{
    MemoryNotifier, MisconfigurationNotifier, NoopNotifier, SafeNotifier, TracingNotifier,
};
pub use options::{AbOptions, OptionValue};
pub use registry::{SplitDefinition, SplitRegistry};
pub use resolver::SplitVariantResolver;
pub use variant::{VariantPair, DEFAULT_FALSE_VARIANT, DEFAULT_TRUE_VARIANT};
