//! Color palette and format-code utilities
//!
//! Format codes are the Minecraft-style `§` escape followed by a single code
//! character. The palette maps symbolic names (`red`, `bold`, ...) to codes;
//! each entry is also registered as a context-free placeholder so `{red}`
//! resolves through the ordinary parser.
//!
//! The helpers here operate on already-formatted text, never on tokens.

use indexmap::IndexMap;

/// Escape character that starts every format code
pub const ESCAPE: char = '§';

/// Fallback code for color names missing from the palette
pub const WHITE: &str = "§f";

/// Default named colors and styles
const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("black", "§0"),
    ("dark_blue", "§1"),
    ("dark_green", "§2"),
    ("dark_aqua", "§3"),
    ("dark_red", "§4"),
    ("dark_purple", "§5"),
    ("gold", "§6"),
    ("gray", "§7"),
    ("dark_gray", "§8"),
    ("blue", "§9"),
    ("green", "§a"),
    ("aqua", "§b"),
    ("red", "§c"),
    ("light_purple", "§d"),
    ("yellow", "§e"),
    ("white", "§f"),
    ("bold", "§l"),
    ("italic", "§o"),
    ("obfuscated", "§k"),
    ("underline", "§n"),
    ("strikethrough", "§m"),
    ("reset", "§r"),
];

/// Check if a character is a recognized format code (`[0-9a-fk-or]`)
pub fn is_format_code(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f' | 'k'..='o' | 'r')
}

/// Ordered mapping of color/style names to format codes
///
/// Names are stored lowercased. Lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: IndexMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: DEFAULT_COLORS
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }
}

impl Palette {
    /// Create a palette with no entries
    pub fn empty() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Add or replace a named code
    ///
    /// Replacing keeps the entry's original position.
    pub fn set(&mut self, name: &str, code: impl Into<String>) {
        self.entries.insert(name.to_lowercase(), code.into());
    }

    /// Builder form of [`Palette::set`]
    pub fn with(mut self, name: &str, code: impl Into<String>) -> Self {
        self.set(name, code);
        self
    }

    /// Resolve a color name to its format code
    pub fn code(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Resolve a format code back to a color name
    ///
    /// When several names share a code, the earliest entry wins.
    pub fn name_of(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(name, _)| name.as_str())
    }

    /// Iterate over `(name, code)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn code_or_white<S: AsRef<str>>(&self, name: S) -> &str {
        self.code(name.as_ref()).unwrap_or(WHITE)
    }

    /// Prefix every character with a color, spreading `colors` evenly over the text
    ///
    /// Returns the text unchanged if `colors` is empty.
    pub fn character_gradient<S: AsRef<str>>(&self, text: &str, colors: &[S]) -> String {
        if colors.is_empty() {
            return text.to_string();
        }

        let total = text.chars().count();
        let mut result = String::with_capacity(text.len() * 3);
        for (i, c) in text.chars().enumerate() {
            result.push_str(self.code_or_white(&colors[gradient_index(i, total, colors.len())]));
            result.push(c);
        }
        result
    }

    /// Prefix every space-separated word with a color, spreading `colors` evenly
    pub fn word_gradient<S: AsRef<str>>(&self, text: &str, colors: &[S]) -> String {
        if colors.is_empty() {
            return text.to_string();
        }

        let words: Vec<&str> = text.split(' ').collect();
        let total = words.len();
        words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                let code = self.code_or_white(&colors[gradient_index(i, total, colors.len())]);
                format!("{}{}", code, word)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Turn known format codes back into `{name}` tokens
    ///
    /// Best effort: codes missing from the palette pass through unchanged,
    /// and the result is not guaranteed to parse back to the same text when
    /// several names share a code.
    pub fn revert(&self, formatted: &str) -> String {
        let mut result = String::with_capacity(formatted.len());
        let mut chars = formatted.chars().peekable();

        while let Some(c) = chars.next() {
            if c == ESCAPE {
                if let Some(&next) = chars.peek() {
                    let code: String = [c, next].iter().collect();
                    if let Some(name) = self.name_of(&code) {
                        chars.next();
                        result.push('{');
                        result.push_str(name);
                        result.push('}');
                        continue;
                    }
                }
            }
            result.push(c);
        }

        result
    }
}

/// Color index for item `i` of `total` with `colors` colors
fn gradient_index(i: usize, total: usize, colors: usize) -> usize {
    // i / total * colors, in integers: floor((i * colors) / total)
    ((i * colors) / total).min(colors - 1)
}

/// Remove every recognized format code from a message
pub fn strip_formatting(message: &str) -> String {
    let mut result = String::with_capacity(message.len());
    let mut chars = message.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE {
            if let Some(&next) = chars.peek() {
                if is_format_code(next) {
                    chars.next();
                    continue;
                }
            }
        }
        result.push(c);
    }

    result
}

/// [`Palette::character_gradient`] with the default palette
pub fn character_gradient<S: AsRef<str>>(text: &str, colors: &[S]) -> String {
    Palette::default().character_gradient(text, colors)
}

/// [`Palette::word_gradient`] with the default palette
pub fn word_gradient<S: AsRef<str>>(text: &str, colors: &[S]) -> String {
    Palette::default().word_gradient(text, colors)
}

/// [`Palette::revert`] with the default palette
pub fn revert(formatted: &str) -> String {
    Palette::default().revert(formatted)
}
