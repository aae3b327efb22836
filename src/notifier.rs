//! Misconfiguration notification.
//!
//! A resolver reports likely modeling drift (for example a split consumed as
//! a boolean that carries more than two variants) through this capability
//! instead of failing. Delivery problems stay inside the notifier:
//! [`SafeNotifier`] contains a panicking implementation so it never unwinds
//! back into the resolver.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

/// Receives advisory misconfiguration messages.
pub trait MisconfigurationNotifier: Send + Sync {
    /// Delivers a human-readable message.
    fn notify(&self, message: &str);
}

/// Discards every message. The default notifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl MisconfigurationNotifier for NoopNotifier {
    fn notify(&self, _message: &str) {}
}

/// Emits each message as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl MisconfigurationNotifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(
            target: "absplit::misconfiguration",
            detail = %message,
            "split_misconfigured"
        );
    }
}

/// Shields the caller from a notifier that panics.
///
/// [`crate::ResolverContext`] wraps every notifier it is given in one of
/// these. A caught panic is logged and the message is dropped.
#[derive(Clone)]
pub struct SafeNotifier {
    inner: Arc<dyn MisconfigurationNotifier>,
}

impl SafeNotifier {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: Arc<dyn MisconfigurationNotifier>) -> Self {
        Self { inner }
    }
}

impl MisconfigurationNotifier for SafeNotifier {
    fn notify(&self, message: &str) {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| self.inner.notify(message))) {
            tracing::warn!(
                target: "absplit::misconfiguration",
                detail = %message,
                panic = panic_message(payload.as_ref()),
                "notifier_panicked"
            );
        }
    }
}

impl std::fmt::Debug for SafeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeNotifier").finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "non-string panic payload"
    }
}

/// Records messages in memory.
///
/// Useful for embedding applications that batch alerts, and for tests.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    messages: Mutex<Vec<String>>,
}

impl MemoryNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes and returns all recorded messages.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl MisconfigurationNotifier for MemoryNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[derive(Default)]
    struct PanickingNotifier {
        calls: AtomicUsize,
    }

    impl MisconfigurationNotifier for PanickingNotifier {
        fn notify(&self, _message: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            panic!("alerting backend unavailable");
        }
    }

    #[test]
    fn test_safe_notifier_contains_panics() {
        let inner = Arc::new(PanickingNotifier::default());
        let notifier = SafeNotifier::new(inner.clone());

        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(inner.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_safe_notifier_forwards_messages() {
        let inner = Arc::new(MemoryNotifier::new());
        let notifier: Arc<dyn MisconfigurationNotifier> =
            Arc::new(SafeNotifier::new(inner.clone()));

        notifier.notify("via dyn");
        assert_eq!(inner.messages(), vec!["via dyn"]);
    }

    #[test]
    fn test_panic_message_extraction() {
        let payload = catch_unwind(|| panic!("static")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "static");

        let payload = catch_unwind(|| panic!("formatted {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "formatted 1");
    }

    #[test]
    fn test_builtin_notifiers_never_panic() {
        let result = catch_unwind(|| {
            NoopNotifier.notify("ignored");
            TracingNotifier.notify("no subscriber installed");
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();
        assert!(notifier.is_empty());

        notifier.notify("first");
        notifier.notify("second");

        assert_eq!(notifier.len(), 2);
        assert_eq!(notifier.messages(), vec!["first", "second"]);
        assert_eq!(notifier.drain(), vec!["first", "second"]);
        assert!(notifier.is_empty());
    }

    #[test]
    fn test_memory_notifier_survives_poisoned_lock() {
        let notifier = Arc::new(MemoryNotifier::new());
        let poisoner = Arc::clone(&notifier);
        let _ = thread::spawn(move || {
            let _guard = poisoner.messages.lock().unwrap();
            panic!("poison the lock");
        })
        .join();

        notifier.notify("after poison");
        assert_eq!(notifier.messages(), vec!["after poison"]);
    }
}
