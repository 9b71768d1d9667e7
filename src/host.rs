//! Host-side state read by the default placeholders
//!
//! The resolver never looks inside a context; only the default player
//! placeholders do, through [`Player`]. Server-wide values are read through a
//! [`Server`] captured when the defaults are registered.

use serde::Deserialize;

/// A position in a world
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Player state exposed to player placeholders
pub trait Player {
    fn name(&self) -> &str;
    fn display_name(&self) -> &str;
    fn health(&self) -> f64;
    fn max_health(&self) -> f64;
    fn food(&self) -> f64;
    fn xp_level(&self) -> u32;
    fn total_xp(&self) -> u32;
    /// English gamemode name, e.g. "Survival"
    fn gamemode(&self) -> &str;
    /// Network latency in milliseconds
    fn ping(&self) -> u32;
    fn position(&self) -> Position;
    /// Folder name of the player's current world
    fn world(&self) -> &str;
}

/// Server-wide state exposed to server placeholders
pub trait Server: Send + Sync {
    fn motd(&self) -> String;
    fn online_players(&self) -> usize;
    fn max_players(&self) -> usize;
    fn ticks_per_second(&self) -> f64;
}

/// Fixed player snapshot, loadable from the `[player]` config table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaticPlayer {
    pub name: String,
    /// Falls back to `name` when empty
    pub display_name: String,
    pub health: f64,
    pub max_health: f64,
    pub food: f64,
    pub xp_level: u32,
    pub total_xp: u32,
    pub gamemode: String,
    pub ping: u32,
    pub position: Position,
    pub world: String,
}

impl Default for StaticPlayer {
    fn default() -> Self {
        Self {
            name: "Steve".to_string(),
            display_name: String::new(),
            health: 20.0,
            max_health: 20.0,
            food: 20.0,
            xp_level: 0,
            total_xp: 0,
            gamemode: "Survival".to_string(),
            ping: 0,
            position: Position::default(),
            world: "world".to_string(),
        }
    }
}

impl StaticPlayer {
    /// Create a default player with the given name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

impl Player for StaticPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    fn health(&self) -> f64 {
        self.health
    }

    fn max_health(&self) -> f64 {
        self.max_health
    }

    fn food(&self) -> f64 {
        self.food
    }

    fn xp_level(&self) -> u32 {
        self.xp_level
    }

    fn total_xp(&self) -> u32 {
        self.total_xp
    }

    fn gamemode(&self) -> &str {
        &self.gamemode
    }

    fn ping(&self) -> u32 {
        self.ping
    }

    fn position(&self) -> Position {
        self.position
    }

    fn world(&self) -> &str {
        &self.world
    }
}

/// Fixed server snapshot, loadable from the `[server]` config table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StaticServer {
    pub motd: String,
    pub online_players: usize,
    pub max_players: usize,
    pub ticks_per_second: f64,
}

impl Default for StaticServer {
    fn default() -> Self {
        Self {
            motd: "A Minecraft Server".to_string(),
            online_players: 0,
            max_players: 20,
            ticks_per_second: 20.0,
        }
    }
}

impl Server for StaticServer {
    fn motd(&self) -> String {
        self.motd.clone()
    }

    fn online_players(&self) -> usize {
        self.online_players
    }

    fn max_players(&self) -> usize {
        self.max_players
    }

    fn ticks_per_second(&self) -> f64 {
        self.ticks_per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_name() {
        let mut player = StaticPlayer::named("Alex");
        assert_eq!(player.display_name(), "Alex");
        player.display_name = "§6Alex".to_string();
        assert_eq!(player.display_name(), "§6Alex");
    }

    #[test]
    fn test_partial_player_table() {
        let player: StaticPlayer = toml::from_str(
            r#"
name = "Alex"
ping = 42

[position]
x = 1.5
y = 64.0
z = -3.25
"#,
        )
        .expect("Should parse");
        assert_eq!(player.name, "Alex");
        assert_eq!(player.ping, 42);
        assert_eq!(player.health, 20.0);
        assert_eq!(player.position.z, -3.25);
    }
}
