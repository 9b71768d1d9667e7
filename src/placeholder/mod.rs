//! Placeholder handlers, their registry, and the token resolver
//!
//! A placeholder is a named handler producing the replacement for a
//! `{identifier}` or `{identifier:params}` token. Handlers are registered in a
//! [`Registry`] and looked up by the [`Resolver`] while it scans a message.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use placeholder_api::placeholder::{FnPlaceholder, Registry, Resolver};
//!
//! struct Session { name: String }
//!
//! let registry = Arc::new(Registry::<Session>::new());
//! registry.register(FnPlaceholder::contextual("user", |s: &Session, _| Ok(s.name.clone())));
//! registry.register(FnPlaceholder::constant("greeting", "Hello {user}"));
//!
//! let resolver = Resolver::new(registry);
//! let session = Session { name: "Alex".to_string() };
//! assert_eq!(resolver.parse("{greeting}!", Some(&session)), "Hello Alex!");
//! assert_eq!(resolver.parse("{greeting}!", None), "Hello {user}!");
//! ```

pub mod defaults;
mod registry;
mod resolver;

use std::fmt;

use crate::error::PlaceholderError;

pub use registry::{Registry, RegistryError};
pub use resolver::{Resolver, MAX_RECURSION_DEPTH};

/// Result of invoking a placeholder handler
pub type HandlerResult = Result<String, PlaceholderError>;

/// A named producer of replacement text
///
/// `C` is the caller-supplied context type (typically a player). The resolver
/// only checks whether a context is present and passes it through.
pub trait Placeholder<C: ?Sized>: Send + Sync {
    /// Unique identifier, matched case-insensitively
    fn identifier(&self) -> &str;

    /// Whether the resolver must have a context to invoke this placeholder
    fn requires_context(&self) -> bool {
        false
    }

    /// Whether a trailing `:params` segment is accepted
    fn supports_parameters(&self) -> bool {
        false
    }

    /// Produce the replacement value
    ///
    /// The value is parsed again by the resolver, so it may contain further tokens.
    fn process(&self, context: Option<&C>, params: Option<&str>) -> HandlerResult;
}

type Handler<C> = dyn Fn(Option<&C>, Option<&str>) -> HandlerResult + Send + Sync;

/// A placeholder backed by a function plus capability flags
pub struct FnPlaceholder<C: ?Sized> {
    identifier: String,
    requires_context: bool,
    supports_parameters: bool,
    handler: Box<Handler<C>>,
}

impl<C: ?Sized + 'static> FnPlaceholder<C> {
    /// Wrap an arbitrary handler; both capability flags start out `false`
    pub fn new<F>(identifier: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&C>, Option<&str>) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            identifier: identifier.into(),
            requires_context: false,
            supports_parameters: false,
            handler: Box::new(handler),
        }
    }

    /// A placeholder that needs a context
    ///
    /// Invoked without one, it produces an empty string.
    pub fn contextual<F>(identifier: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&C, Option<&str>) -> HandlerResult + Send + Sync + 'static,
    {
        Self::new(identifier, move |context: Option<&C>, params: Option<&str>| {
            match context {
                Some(context) => handler(context, params),
                None => Ok(String::new()),
            }
        })
        .with_context_required(true)
    }

    /// A placeholder that ignores the context
    pub fn context_free<F>(identifier: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&str>) -> HandlerResult + Send + Sync + 'static,
    {
        Self::new(identifier, move |_: Option<&C>, params: Option<&str>| {
            handler(params)
        })
    }

    /// A context-free placeholder with a fixed value
    pub fn constant(identifier: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::context_free(identifier, move |_| Ok(value.clone()))
    }

    /// Set whether a context is required
    pub fn with_context_required(mut self, required: bool) -> Self {
        self.requires_context = required;
        self
    }

    /// Set whether `:params` are accepted
    pub fn with_parameters(mut self, supported: bool) -> Self {
        self.supports_parameters = supported;
        self
    }
}

impl<C: ?Sized> Placeholder<C> for FnPlaceholder<C> {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn requires_context(&self) -> bool {
        self.requires_context
    }

    fn supports_parameters(&self) -> bool {
        self.supports_parameters
    }

    fn process(&self, context: Option<&C>, params: Option<&str>) -> HandlerResult {
        (self.handler)(context, params)
    }
}

impl<C: ?Sized> fmt::Debug for FnPlaceholder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPlaceholder")
            .field("identifier", &self.identifier)
            .field("requires_context", &self.requires_context)
            .field("supports_parameters", &self.supports_parameters)
            .finish_non_exhaustive()
    }
}
