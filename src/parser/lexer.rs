//! Lexer for placeholder tokens using logos
//!
//! A message is split into complete `{identifier}` / `{identifier:params}`
//! tokens and runs of plain text. An opening brace that does not start a
//! complete token is plain text.

use logos::{Lexer, Logos};

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece {
    #[token("{", close_token)]
    Token,

    #[regex(r"[^{]+")]
    Text,
}

/// Extend a `{` into a complete token, or reject it.
///
/// Identifier is `[A-Za-z0-9_]+`; params run up to the first `}`.
fn close_token(lex: &mut Lexer<Piece>) -> bool {
    let rest = lex.remainder();
    let ident_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if ident_len == 0 {
        return false;
    }

    let after = &rest[ident_len..];
    let len = match after.as_bytes().first() {
        Some(b'}') => ident_len + 1,
        Some(b':') => match after.find('}') {
            Some(close) => ident_len + close + 1,
            None => return false,
        },
        _ => return false,
    };

    lex.bump(len);
    true
}

/// Lex input string into pieces with spans
///
/// A rejected `{` comes back from logos as an error; it is reported as
/// [`Piece::Text`] since a lone brace is literal.
pub fn lex(input: &str) -> impl Iterator<Item = (Piece, Span)> + '_ {
    Piece::lexer(input)
        .spanned()
        .map(|(piece, span)| (piece.unwrap_or(Piece::Text), span))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pieces(input: &str) -> Vec<(Piece, &str)> {
        lex(input).map(|(p, span)| (p, &input[span])).collect()
    }

    fn tokens(input: &str) -> Vec<&str> {
        pieces(input)
            .into_iter()
            .filter(|(p, _)| *p == Piece::Token)
            .map(|(_, s)| s)
            .collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(pieces("hello world"), vec![(Piece::Text, "hello world")]);
    }

    #[test]
    fn test_simple_token() {
        assert_eq!(
            pieces("hi {player}!"),
            vec![
                (Piece::Text, "hi "),
                (Piece::Token, "{player}"),
                (Piece::Text, "!"),
            ]
        );
    }

    #[test]
    fn test_token_with_params() {
        assert_eq!(pieces("{time:HH mm}"), vec![(Piece::Token, "{time:HH mm}")]);
    }

    #[test]
    fn test_token_with_empty_params() {
        assert_eq!(tokens("{a:}"), vec!["{a:}"]);
    }

    #[test]
    fn test_unclosed_brace_is_not_a_token() {
        assert!(tokens("{player").is_empty());
        assert!(tokens("{player:abc").is_empty());
    }

    #[test]
    fn test_invalid_identifier_chars() {
        assert!(tokens("{not a token}").is_empty());
        assert!(tokens("{}").is_empty());
        assert!(tokens("{-x}").is_empty());
    }

    #[test]
    fn test_brace_before_token() {
        assert_eq!(tokens("{{a}}"), vec!["{a}"]);
        let text: String = pieces("{{a}}").into_iter().map(|(_, s)| s).collect();
        assert_eq!(text, "{{a}}");
    }

    #[test]
    fn test_failed_token_does_not_hide_later_token() {
        assert_eq!(tokens("{ab{cd}"), vec!["{cd}"]);
    }

    #[test]
    fn test_params_may_contain_open_brace() {
        assert_eq!(tokens("{a:{b}}"), vec!["{a:{b}"]);
    }

    #[test]
    fn test_adjacent_tokens() {
        assert_eq!(
            pieces("{a}{b}"),
            vec![(Piece::Token, "{a}"), (Piece::Token, "{b}")]
        );
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(tokens("§a{player} ♥"), vec!["{player}"]);
    }
}
