//! Placeholder API - `{token}` substitution for game-server messages
//!
//! Messages contain `{identifier}` or `{identifier:params}` tokens that are
//! replaced by registered placeholders: player stats, server stats, color
//! codes, or anything user code registers.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use placeholder_api::{PlaceholderApi, StaticPlayer, StaticServer};
//!
//! let api = PlaceholderApi::<StaticPlayer>::new();
//! api.init(Arc::new(StaticServer { online_players: 5, ..StaticServer::default() }));
//!
//! let player = StaticPlayer::named("Alex");
//! let line = api.parse(
//!     "{gold}{player}{reset} joined ({server_online}/{server_max})",
//!     Some(&player),
//! );
//! assert_eq!(line, "§6Alex§r joined (5/20)");
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod host;
pub mod parser;
pub mod placeholder;

pub use config::{Config, ConfigError};
pub use error::{Diagnostic, PlaceholderError, Unresolved};
pub use format::{strip_formatting, Palette};
pub use host::{Player, Position, Server, StaticPlayer, StaticServer};
pub use placeholder::{
    FnPlaceholder, HandlerResult, Placeholder, Registry, RegistryError, Resolver,
};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use placeholder::defaults;

/// Registry, resolver and palette behind one handle
///
/// `C` is the context type handed to player placeholders.
pub struct PlaceholderApi<C: ?Sized> {
    resolver: Resolver<C>,
    palette: Palette,
    text: Vec<(String, String)>,
    initialized: AtomicBool,
}

impl<C: ?Sized + 'static> Default for PlaceholderApi<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static> PlaceholderApi<C> {
    /// Create an uninitialized API with the default configuration
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create an uninitialized API from a configuration
    ///
    /// Colors and text placeholders from the config are registered by [`PlaceholderApi::init`].
    pub fn from_config(config: &Config) -> Self {
        let registry = Arc::new(Registry::new());
        Self {
            resolver: Resolver::new(registry).with_max_depth(config.resolver.max_depth),
            palette: config.palette(),
            text: config
                .placeholders
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn registry(&self) -> &Arc<Registry<C>> {
        self.resolver.registry()
    }

    pub fn resolver(&self) -> &Resolver<C> {
        &self.resolver
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether the default set has been registered
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Register colors and configured text placeholders, but no player or server ones
    ///
    /// Returns `false` if already initialized.
    pub fn init_without_host(&self) -> bool {
        if !self.claim_init() {
            return false;
        }
        self.register_common();
        true
    }

    fn claim_init(&self) -> bool {
        let first = !self.initialized.swap(true, Ordering::SeqCst);
        if !first {
            debug!("placeholder defaults already registered, skipping");
        }
        first
    }

    fn register_common(&self) {
        let colors = defaults::register_colors(self.registry(), &self.palette);
        let text = defaults::register_text(
            self.registry(),
            self.text.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        debug!(colors, text, "registered color and text placeholders");
    }

    /// Register a placeholder, returning `false` if the identifier is taken
    pub fn register<P>(&self, placeholder: P) -> bool
    where
        P: Placeholder<C> + 'static,
    {
        self.registry().register(placeholder)
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
        F: Fn(Option<&C>, Option<&str>) -> HandlerResult + Send + Sync + 'static,
    {
        self.registry()
            .register_fn(identifier, handler, requires_context, supports_parameters)
    }

    /// Remove a placeholder, returning whether it was registered
    pub fn unregister(&self, identifier: &str) -> bool {
        self.registry().unregister(identifier)
    }

    /// All registered identifiers in registration order
    pub fn registered_placeholders(&self) -> Vec<String> {
        self.registry().identifiers()
    }

    /// Substitute every resolvable token in `message`
    pub fn parse(&self, message: &str, context: Option<&C>) -> String {
        self.resolver.parse(message, context)
    }

    /// Parse each message independently, preserving order
    pub fn parse_multiple<S: AsRef<str>>(
        &self,
        messages: &[S],
        context: Option<&C>,
    ) -> Vec<String> {
        self.resolver.parse_multiple(messages, context)
    }

    /// Parse without a context, so only context-free placeholders (colors among them) apply
    pub fn parse_colors(&self, message: &str) -> String {
        self.resolver.parse(message, None)
    }

    /// Report tokens that [`PlaceholderApi::parse`] would leave verbatim
    pub fn check(&self, message: &str, context: Option<&C>) -> Vec<Diagnostic> {
        self.resolver.check(message, context)
    }

    /// Character gradient using this API's palette
    pub fn character_gradient<S: AsRef<str>>(&self, text: &str, colors: &[S]) -> String {
        self.palette.character_gradient(text, colors)
    }

    /// Word gradient using this API's palette
    pub fn word_gradient<S: AsRef<str>>(&self, text: &str, colors: &[S]) -> String {
        self.palette.word_gradient(text, colors)
    }

    /// Turn format codes back into `{color}` tokens (best effort)
    pub fn revert(&self, formatted: &str) -> String {
        self.palette.revert(formatted)
    }
}

impl<C: Player + ?Sized + 'static> PlaceholderApi<C> {
    /// Register the full default set: colors, configured text, player and server placeholders
    ///
    /// Only the first call registers anything; later calls return `false`.
    pub fn init(&self, server: Arc<dyn Server>) -> bool {
        if !self.claim_init() {
            return false;
        }
        self.register_common();
        let player_count = defaults::register_player(self.registry());
        let server_count = defaults::register_server(self.registry(), server);
        debug!(
            player = player_count,
            server = server_count,
            total = self.registry().count(),
            "registered default placeholders"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn api() -> PlaceholderApi<StaticPlayer> {
        let api = PlaceholderApi::<StaticPlayer>::new();
        assert!(api.init(Arc::new(StaticServer::default())));
        api
    }

    #[test]
    fn test_init_is_idempotent() {
        let api = api();
        let count = api.registry().count();
        assert_eq!(count, 22 + 14 + 4);
        assert!(!api.init(Arc::new(StaticServer::default())));
        assert!(!api.init_without_host());
        assert_eq!(api.registry().count(), count);
        assert!(api.is_initialized());
    }

    #[test]
    fn test_uninitialized_api_is_empty() {
        let api = PlaceholderApi::<StaticPlayer>::new();
        assert!(!api.is_initialized());
        assert_eq!(api.parse("{red}{player}", None), "{red}{player}");
    }

    #[test]
    fn test_init_without_host() {
        let config = Config::new().with_placeholder("motto", "{green}be nice");
        let api = PlaceholderApi::<StaticPlayer>::from_config(&config);
        assert!(api.init_without_host());
        assert_eq!(api.parse_colors("{motto} {player}"), "§abe nice {player}");
        assert_eq!(api.registry().count(), 23);
    }

    #[test]
    fn test_parse_colors_skips_player_tokens() {
        let api = api();
        assert_eq!(api.parse_colors("{bold}{player_name}"), "§l{player_name}");
    }

    #[test]
    fn test_register_custom_and_override_color() {
        let api = api();
        let double = |_: Option<&StaticPlayer>, params: Option<&str>| -> HandlerResult {
            let param = params.unwrap_or("");
            let n: i64 = param
                .trim()
                .parse()
                .map_err(|_| PlaceholderError::invalid_parameter(param, "expected an integer"))?;
            Ok((n * 2).to_string())
        };
        assert!(api.register_fn("double", double, false, true));
        assert_eq!(api.parse("{double:21} {double:x}", None), "42 {double:x}");

        assert!(!api.register(FnPlaceholder::constant("red", "§4")));
        assert!(api.unregister("RED"));
        assert!(api.register(FnPlaceholder::constant("red", "§4")));
        assert_eq!(api.parse_colors("{red}!"), "§4!");
    }

    #[test]
    fn test_config_colors_and_depth() {
        let config = Config::new()
            .with_color("brand", "§6")
            .with_placeholder("echo", "{echo}")
            .with_max_depth(3);
        let api = PlaceholderApi::<StaticPlayer>::from_config(&config);
        api.init(Arc::new(StaticServer::default()));

        assert_eq!(api.parse_colors("{brand}x"), "§6x");
        assert_eq!(api.parse_colors("{echo}"), "{echo}");
        assert_eq!(api.resolver().max_depth(), 3);
        assert_eq!(api.revert("§6x"), "{gold}x");
    }

    #[test]
    fn test_registered_placeholders_order() {
        let api = api();
        let ids = api.registered_placeholders();
        assert_eq!(ids.first().map(String::as_str), Some("black"));
        assert_eq!(ids.last().map(String::as_str), Some("server_tps"));
    }

    #[test]
    fn test_gradients_use_palette() {
        let config = Config::new().with_color("brand", "§6");
        let api = PlaceholderApi::<StaticPlayer>::from_config(&config);
        assert_eq!(api.character_gradient("ab", &["brand"]), "§6a§6b");
        assert_eq!(api.word_gradient("a b", &["brand", "red"]), "§6a §cb");
    }

    #[test]
    fn test_dyn_player_context() {
        let api = PlaceholderApi::<dyn Player>::new();
        api.init(Arc::new(StaticServer::default()));
        let player = StaticPlayer::named("Alex");
        assert_eq!(api.parse("{player}", Some(&player as &dyn Player)), "Alex");
    }
}
