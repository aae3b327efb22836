//! Resolver context: the collaborators injected into every resolver.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::AbError;
use crate::notifier::{MisconfigurationNotifier, NoopNotifier, SafeNotifier, TracingNotifier};

/// Environment variable read by [`ResolverContext::from_env`].
pub const ENV_VAR: &str = "ABSPLIT_ENV";

/// Reports whether the runtime is development-like.
///
/// Only affects error text: development environments get a remediation hint
/// on unknown-split errors.
pub trait EnvironmentProbe: Send + Sync {
    /// Returns true for development-like environments.
    fn is_development(&self) -> bool;
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development.
    Development,
    /// Test suites and CI.
    Test,
    /// Anything else.
    #[default]
    Production,
}

impl Environment {
    /// Reads [`ENV_VAR`], falling back to production when unset or unknown.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(ENV_VAR).ok().as_deref())
    }

    /// Interprets a raw [`ENV_VAR`] value; `None` means unset.
    #[must_use]
    pub fn from_env_value(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        raw.parse().unwrap_or_else(|err: AbError| {
            tracing::debug!(target: "absplit", error = %err, "unknown_environment_defaulting");
            Self::default()
        })
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl EnvironmentProbe for Environment {
    fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = AbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            "production" | "prod" => Ok(Self::Production),
            other => Err(AbError::invalid(
                ENV_VAR,
                format!("unknown environment '{other}'"),
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collaborators shared by the resolvers an application builds.
///
/// Notifiers supplied through [`ResolverContext::with_notifier`] are wrapped
/// in a [`SafeNotifier`], so a failing alerting backend never reaches the
/// resolver.
#[derive(Clone)]
pub struct ResolverContext {
    notifier: Arc<dyn MisconfigurationNotifier>,
    environment: Arc<dyn EnvironmentProbe>,
}

impl Default for ResolverContext {
    fn default() -> Self {
        Self {
            notifier: Arc::new(NoopNotifier),
            environment: Arc::new(Environment::Production),
        }
    }
}

impl fmt::Debug for ResolverContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverContext")
            .field("development", &self.environment.is_development())
            .finish_non_exhaustive()
    }
}

impl ResolverContext {
    /// Creates the default context: no-op notifier, production environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a deployed process: environment from [`ENV_VAR`],
    /// misconfigurations logged through `tracing`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new()
            .with_notifier(Arc::new(TracingNotifier))
            .with_environment(Arc::new(Environment::from_env()))
    }

    /// Replaces the notifier, shielding it with a [`SafeNotifier`].
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn MisconfigurationNotifier>) -> Self {
        self.notifier = Arc::new(SafeNotifier::new(notifier));
        self
    }

    /// Replaces the environment probe.
    #[must_use]
    pub fn with_environment(mut self, environment: Arc<dyn EnvironmentProbe>) -> Self {
        self.environment = environment;
        self
    }

    /// Receives advisory misconfiguration messages.
    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn MisconfigurationNotifier> {
        &self.notifier
    }

    /// Decides whether error text carries development hints.
    #[must_use]
    pub fn environment(&self) -> &Arc<dyn EnvironmentProbe> {
        &self.environment
    }
}
