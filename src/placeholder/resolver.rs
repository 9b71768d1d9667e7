//! Token resolution - substitutes placeholder values into messages

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{Diagnostic, Unresolved};
use crate::parser::{scan, Segment, TokenRef};

use super::{Placeholder, Registry};

/// Default bound on nested expansion
pub const MAX_RECURSION_DEPTH: usize = 10;

/// Parses messages against a shared [`Registry`]
///
/// Each replacement value is parsed again, so placeholders may expand into
/// other tokens. Nesting is cut off at `max_depth`: a message reached at that
/// depth is returned untouched. The depth travels with each call, so one
/// resolver can serve concurrent callers.
///
/// A panicking handler still goes through the process panic hook before it is
/// caught, so the default hook prints to stderr. Hosts that want silence
/// install their own hook with [`std::panic::set_hook`].
pub struct Resolver<C: ?Sized> {
    registry: Arc<Registry<C>>,
    max_depth: usize,
}

impl<C: ?Sized> Clone for Resolver<C> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            max_depth: self.max_depth,
        }
    }
}

impl<C: ?Sized> fmt::Debug for Resolver<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("registry", &self.registry)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}

impl<C: ?Sized> Resolver<C> {
    /// Create a resolver with the default depth bound
    pub fn new(registry: Arc<Registry<C>>) -> Self {
        Self {
            registry,
            max_depth: MAX_RECURSION_DEPTH,
        }
    }

    /// Set the nesting bound
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn registry(&self) -> &Arc<Registry<C>> {
        &self.registry
    }

    /// Substitute every resolvable token in `message`
    ///
    /// Tokens that cannot be resolved are left verbatim; nothing here fails.
    pub fn parse(&self, message: &str, context: Option<&C>) -> String {
        self.parse_at(message, context, 0)
    }

    /// Parse each message independently, preserving order
    pub fn parse_multiple<S: AsRef<str>>(
        &self,
        messages: &[S],
        context: Option<&C>,
    ) -> Vec<String> {
        messages
            .iter()
            .map(|message| self.parse(message.as_ref(), context))
            .collect()
    }

    /// Report every top-level token that [`Resolver::parse`] would leave verbatim
    pub fn check(&self, message: &str, context: Option<&C>) -> Vec<Diagnostic> {
        scan(message)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Token(token) => self
                    .check_token(&token, context)
                    .map(|reason| Diagnostic {
                        span: token.span,
                        reason,
                    }),
                Segment::Text(_) => None,
            })
            .collect()
    }

    fn check_token(&self, token: &TokenRef<'_>, context: Option<&C>) -> Option<Unresolved> {
        // A zero bound means parse never touches the message
        if self.max_depth == 0 {
            return Some(Unresolved::RecursionLimit {
                identifier: token.identifier.to_lowercase(),
            });
        }
        self.resolve_token(token, context, 0).err()
    }

    fn parse_at(&self, message: &str, context: Option<&C>, depth: usize) -> String {
        if depth >= self.max_depth {
            return message.to_string();
        }

        let mut result = String::with_capacity(message.len());
        for segment in scan(message) {
            match segment {
                Segment::Text(text) => result.push_str(text),
                Segment::Token(token) => match self.resolve_token(&token, context, depth) {
                    Ok(value) => result.push_str(&value),
                    Err(_) => result.push_str(token.raw),
                },
            }
        }
        result
    }

    /// Resolve one token at `depth`, recursing into its value
    fn resolve_token(
        &self,
        token: &TokenRef<'_>,
        context: Option<&C>,
        depth: usize,
    ) -> Result<String, Unresolved> {
        let identifier = token.identifier.to_lowercase();

        let Some(placeholder) = self.registry.lookup(&identifier) else {
            return Err(Unresolved::UnknownIdentifier { identifier });
        };

        if placeholder.requires_context() && context.is_none() {
            return Err(Unresolved::MissingRequiredContext { identifier });
        }

        if token.params.is_some() && !placeholder.supports_parameters() {
            return Err(Unresolved::UnsupportedParameters { identifier });
        }

        let value = invoke(placeholder.as_ref(), context, token.params)
            .map_err(|message| Unresolved::HandlerFailure {
                identifier,
                message,
            })?;

        Ok(self.parse_at(&value, context, depth + 1))
    }
}

/// Run a handler, turning both errors and panics into a message
fn invoke<C: ?Sized>(
    placeholder: &dyn Placeholder<C>,
    context: Option<&C>,
    params: Option<&str>,
) -> Result<String, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| placeholder.process(context, params))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
