//! Default placeholder set
//!
//! Player and server placeholders are plain accessor tables; each row becomes
//! one [`FnPlaceholder`]. Colors come from a [`Palette`].

use std::sync::Arc;

use crate::format::Palette;
use crate::host::{Player, Server};

use super::{FnPlaceholder, Registry};

type PlayerField<C> = (&'static str, fn(&C) -> String);
type ServerField = (&'static str, fn(&dyn Server) -> String);

fn player_fields<C: Player + ?Sized>() -> [PlayerField<C>; 14] {
    [
        ("player", |p| p.name().to_string()),
        ("player_name", |p| p.name().to_string()),
        ("player_display", |p| p.display_name().to_string()),
        ("player_health", |p| format_rounded(p.health(), 1)),
        ("player_max_health", |p| format_number(p.max_health())),
        ("player_food", |p| format_number(p.food())),
        ("player_level", |p| p.xp_level().to_string()),
        ("player_xp", |p| p.total_xp().to_string()),
        ("player_gamemode", |p| p.gamemode().to_string()),
        ("player_ping", |p| p.ping().to_string()),
        ("player_x", |p| format_rounded(p.position().x, 2)),
        ("player_y", |p| format_rounded(p.position().y, 2)),
        ("player_z", |p| format_rounded(p.position().z, 2)),
        ("player_world", |p| p.world().to_string()),
    ]
}

fn server_fields() -> [ServerField; 4] {
    [
        ("server_motd", |s| s.motd()),
        ("server_online", |s| s.online_players().to_string()),
        ("server_max", |s| s.max_players().to_string()),
        ("server_tps", |s| format_rounded(s.ticks_per_second(), 2)),
    ]
}

/// Identifiers of the default player placeholders
pub fn player_identifiers() -> impl Iterator<Item = &'static str> {
    // The identifier column does not depend on the context type
    player_fields::<crate::host::StaticPlayer>()
        .into_iter()
        .map(|(identifier, _)| identifier)
}

/// Identifiers of the default server placeholders
pub fn server_identifiers() -> impl Iterator<Item = &'static str> {
    server_fields().into_iter().map(|(identifier, _)| identifier)
}

/// Register the context-bound player placeholders
///
/// Returns how many were newly registered; taken identifiers are skipped.
pub fn register_player<C: Player + ?Sized + 'static>(registry: &Registry<C>) -> usize {
    let mut registered = 0;
    for (identifier, accessor) in player_fields::<C>() {
        let placeholder =
            FnPlaceholder::contextual(identifier, move |player: &C, _| Ok(accessor(player)));
        if registry.register(placeholder) {
            registered += 1;
        }
    }
    registered
}

/// Register the server placeholders, reading from `server` on every use
pub fn register_server<C: ?Sized + 'static>(
    registry: &Registry<C>,
    server: Arc<dyn Server>,
) -> usize {
    let mut registered = 0;
    for (identifier, accessor) in server_fields() {
        let server = Arc::clone(&server);
        let placeholder =
            FnPlaceholder::context_free(identifier, move |_| Ok(accessor(server.as_ref())));
        if registry.register(placeholder) {
            registered += 1;
        }
    }
    registered
}

/// Register one constant placeholder per palette entry
pub fn register_colors<C: ?Sized + 'static>(registry: &Registry<C>, palette: &Palette) -> usize {
    register_text(registry, palette.iter())
}

/// Register constant text placeholders; values are parsed like any other value
pub fn register_text<'a, C, I>(registry: &Registry<C>, entries: I) -> usize
where
    C: ?Sized + 'static,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut registered = 0;
    for (identifier, value) in entries {
        if registry.register(FnPlaceholder::constant(identifier, value)) {
            registered += 1;
        }
    }
    registered
}

/// Format a number the way the host prints it: no trailing `.0`
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Round to `places` decimals, then format with [`format_number`]
pub fn format_rounded(value: f64, places: i32) -> String {
    let factor = 10f64.powi(places);
    format_number((value * factor).round() / factor)
}
