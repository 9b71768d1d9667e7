//! Placeholder registry: identifier to handler mapping

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use super::{FnPlaceholder, HandlerResult, Placeholder};

/// Errors that can occur during registry operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An identifier (compared case-insensitively) is already registered
    #[error("duplicate placeholder identifier: {identifier}")]
    Duplicate { identifier: String },
}

/// Registry of placeholders keyed by lowercased identifier
///
/// All operations take a single lock. Lookups hand out shared pointers so
/// handlers never run while the lock is held. Entries keep registration order.
pub struct Registry<C: ?Sized> {
    placeholders: Mutex<IndexMap<String, Arc<dyn Placeholder<C>>>>,
}

impl<C: ?Sized> Default for Registry<C> {
    fn default() -> Self {
        Self {
            placeholders: Mutex::new(IndexMap::new()),
        }
    }
}

impl<C: ?Sized> Registry<C> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared placeholder
    ///
    /// Fails without touching the registry if the identifier is taken.
    pub fn try_register(&self, placeholder: Arc<dyn Placeholder<C>>) -> Result<(), RegistryError> {
        let key = placeholder.identifier().to_lowercase();
        let mut placeholders = self.placeholders.lock();

        if placeholders.contains_key(&key) {
            debug!(identifier = %key, "rejected duplicate placeholder");
            return Err(RegistryError::Duplicate { identifier: key });
        }

        debug!(identifier = %key, "registered placeholder");
        placeholders.insert(key, placeholder);
        Ok(())
    }

    /// Register a placeholder, returning `false` if the identifier is taken
    pub fn register<P>(&self, placeholder: P) -> bool
    where
        P: Placeholder<C> + 'static,
    {
        self.try_register(Arc::new(placeholder)).is_ok()
    }

    /// Register a closure with explicit capability flags
    pub fn register_fn<F>(
        &self,
        identifier: impl Into<String>,
        handler: F,
        requires_context: bool,
        supports_parameters: bool,
    ) -> bool
    where
        C: 'static,
        F: Fn(Option<&C>, Option<&str>) -> HandlerResult + Send + Sync + 'static,
    {
        self.register(
            FnPlaceholder::new(identifier, handler)
                .with_context_required(requires_context)
                .with_parameters(supports_parameters),
        )
    }

    /// Remove a placeholder, returning whether it was registered
    ///
    /// The remaining entries keep their order.
    pub fn unregister(&self, identifier: &str) -> bool {
        let key = identifier.to_lowercase();
        if self.placeholders.lock().shift_remove(&key).is_none() {
            return false;
        }
        debug!(identifier = %key, "unregistered placeholder");
        true
    }

    /// Get a placeholder by identifier (case-insensitive)
    pub fn lookup(&self, identifier: &str) -> Option<Arc<dyn Placeholder<C>>> {
        self.placeholders
            .lock()
            .get(&identifier.to_lowercase())
            .cloned()
    }

    /// Check if a placeholder is registered
    pub fn contains(&self, identifier: &str) -> bool {
        self.placeholders
            .lock()
            .contains_key(&identifier.to_lowercase())
    }

    /// All registered identifiers, lowercased, in registration order
    pub fn identifiers(&self) -> Vec<String> {
        self.placeholders.lock().keys().cloned().collect()
    }

    /// Number of registered placeholders
    pub fn count(&self) -> usize {
        self.placeholders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl<C: ?Sized> fmt::Debug for Registry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ctx;

    fn constant(identifier: &str, value: &str) -> FnPlaceholder<Ctx> {
        FnPlaceholder::constant(identifier, value)
    }

    #[test]
    fn test_registry_register_and_lookup() {
        let registry = Registry::new();
        assert!(registry.register(constant("server_online", "5")));
        assert!(registry.contains("server_online"));

        let found = registry.lookup("server_online").expect("Should be registered");
        assert_eq!(found.process(None, None), Ok("5".to_string()));
    }

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        let registry = Registry::new();
        registry.register(constant("Foo", "1"));
        assert!(registry.lookup("foo").is_some());
        assert!(registry.lookup("FOO").is_some());
        assert_eq!(registry.identifiers(), vec!["foo".to_string()]);
    }

    #[test]
    fn test_registry_duplicate_rejected() {
        let registry = Registry::new();
        assert!(registry.register(constant("Foo", "first")));
        assert!(!registry.register(constant("foo", "second")));
        assert_eq!(registry.count(), 1);

        let found = registry.lookup("foo").expect("Should be registered");
        assert_eq!(found.process(None, None), Ok("first".to_string()));
    }

    #[test]
    fn test_registry_try_register_error() {
        let registry = Registry::new();
        registry.register(constant("a", "1"));
        let result = registry.try_register(Arc::new(constant("A", "2")));
        assert_eq!(
            result,
            Err(RegistryError::Duplicate {
                identifier: "a".to_string()
            })
        );
    }

    #[test]
    fn test_registry_unregister() {
        let registry = Registry::new();
        registry.register(constant("a", "1"));
        registry.register(constant("b", "2"));

        assert!(registry.unregister("A"));
        assert!(!registry.unregister("a"));
        assert!(!registry.contains("a"));
        assert_eq!(registry.identifiers(), vec!["b".to_string()]);

        // The key is free again
        assert!(registry.register(constant("a", "3")));
        assert_eq!(registry.identifiers(), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_registry_unregister_keeps_order_of_the_rest() {
        let registry = Registry::<Ctx>::new();
        for id in ["a", "b", "c", "d"] {
            registry.register(constant(id, id));
        }

        assert!(registry.unregister("b"));
        assert_eq!(registry.identifiers(), vec!["a", "c", "d"]);
        let found = registry.lookup("d").expect("Should be registered");
        assert_eq!(found.process(None, None), Ok("d".to_string()));
    }

    #[test]
    fn test_registry_usable_after_panicking_handler() {
        let registry = Arc::new(Registry::<Ctx>::new());
        registry.register_fn("boom", |_, _| panic!("handler bug"), false, false);

        let shared = Arc::clone(&registry);
        let result = std::thread::spawn(move || {
            let found = shared.lookup("boom").expect("Should be registered");
            found.process(None, None)
        })
        .join();
        assert!(result.is_err());

        assert!(registry.register(constant("after", "ok")));
        assert_eq!(registry.identifiers(), vec!["boom", "after"]);
    }

    #[test]
    fn test_registry_identifiers_in_insertion_order() {
        let registry = Registry::new();
        for id in ["zeta", "alpha", "mid"] {
            registry.register(constant(id, id));
        }
        assert_eq!(registry.identifiers(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.count(), 3);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_register_fn_flags() {
        let registry = Registry::<Ctx>::new();
        assert!(registry.register_fn("greet", |_, _| Ok("hi".to_string()), true, false));
        let found = registry.lookup("greet").expect("Should be registered");
        assert!(found.requires_context());
        assert!(!found.supports_parameters());
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(Registry::<Ctx>::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.register(constant(&format!("p{}", i), "x")))
            })
            .collect();
        for handle in handles {
            assert!(handle.join().expect("thread should not panic"));
        }
        assert_eq!(registry.count(), 4);
    }
}
