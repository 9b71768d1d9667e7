//! Scanner for placeholder messages

pub mod lexer;

pub use lexer::Span;

use lexer::{lex, Piece};

/// A `{identifier}` or `{identifier:params}` token found in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRef<'a> {
    /// The full matched text, braces included
    pub raw: &'a str,
    /// Identifier as written (not lowercased)
    pub identifier: &'a str,
    /// Raw parameter string; `Some("")` for `{id:}`
    pub params: Option<&'a str>,
    /// Byte range of the token in the message
    pub span: Span,
}

impl<'a> TokenRef<'a> {
    fn from_raw(raw: &'a str, span: Span) -> Self {
        let inner = &raw[1..raw.len() - 1];
        let (identifier, params) = match inner.split_once(':') {
            Some((identifier, params)) => (identifier, Some(params)),
            None => (inner, None),
        };
        Self {
            raw,
            identifier,
            params,
            span,
        }
    }
}

/// A segment of a scanned message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text
    Text(&'a str),
    /// Placeholder token
    Token(TokenRef<'a>),
}

/// Scan a message into literal text and tokens, left to right.
///
/// Consecutive literal pieces are merged, so two `Text` segments are never adjacent.
pub fn scan(message: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start: Option<usize> = None;

    for (piece, span) in lex(message) {
        match piece {
            Piece::Text => {
                text_start.get_or_insert(span.start);
            }
            Piece::Token => {
                if let Some(start) = text_start.take() {
                    segments.push(Segment::Text(&message[start..span.start]));
                }
                segments.push(Segment::Token(TokenRef::from_raw(&message[span.clone()], span)));
            }
        }
    }

    if let Some(start) = text_start {
        segments.push(Segment::Text(&message[start..]));
    }

    segments
}

/// Iterate over the tokens of a message, skipping literal text
pub fn tokens(message: &str) -> impl Iterator<Item = TokenRef<'_>> {
    scan(message).into_iter().filter_map(|seg| match seg {
        Segment::Token(token) => Some(token),
        Segment::Text(_) => None,
    })
}

/// Check if a message contains any token syntax
pub fn has_tokens(message: &str) -> bool {
    lex(message).any(|(piece, _)| piece == Piece::Token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_empty() {
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_scan_literal_only() {
        assert_eq!(scan("no tokens here"), vec![Segment::Text("no tokens here")]);
    }

    #[test]
    fn test_scan_merges_stray_braces_into_text() {
        assert_eq!(scan("a { b {c"), vec![Segment::Text("a { b {c")]);
    }

    #[test]
    fn test_scan_token_fields() {
        let segments = scan("Players: {server_online}/{Server_Max:fmt}");
        assert_eq!(
            segments,
            vec![
                Segment::Text("Players: "),
                Segment::Token(TokenRef {
                    raw: "{server_online}",
                    identifier: "server_online",
                    params: None,
                    span: 9..24,
                }),
                Segment::Text("/"),
                Segment::Token(TokenRef {
                    raw: "{Server_Max:fmt}",
                    identifier: "Server_Max",
                    params: Some("fmt"),
                    span: 25..41,
                }),
            ]
        );
    }

    #[test]
    fn test_empty_params_distinct_from_none() {
        let found: Vec<_> = tokens("{a:} {a}").map(|t| t.params).collect();
        assert_eq!(found, vec![Some(""), None]);
    }

    #[test]
    fn test_params_keep_colons() {
        let token = tokens("{clock:12:30}").next().expect("token");
        assert_eq!(token.identifier, "clock");
        assert_eq!(token.params, Some("12:30"));
    }

    #[test]
    fn test_has_tokens() {
        assert!(has_tokens("hi {player}"));
        assert!(!has_tokens("hi {player"));
        assert!(!has_tokens("plain"));
    }
}
