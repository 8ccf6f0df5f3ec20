//! Tokenizer for term expressions.

use crate::error::{ExprError, ExprResult};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    /// `^` or `**`.
    Caret,
    LParen,
    RParen,
}

/// Token with its byte offset in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

pub(crate) fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Characters that belong to a word for whole-word matching.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// True when `name` is a valid constant or variable identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_word_char),
        _ => false,
    }
}

pub fn tokenize(input: &str) -> ExprResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(position, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let kind = match c {
            '+' => {
                chars.next();
                TokenKind::Plus
            }
            '-' => {
                chars.next();
                TokenKind::Minus
            }
            '*' => {
                chars.next();
                if matches!(chars.peek(), Some(&(_, '*'))) {
                    chars.next();
                    TokenKind::Caret
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                chars.next();
                TokenKind::Slash
            }
            '^' => {
                chars.next();
                TokenKind::Caret
            }
            '(' => {
                chars.next();
                TokenKind::LParen
            }
            ')' => {
                chars.next();
                TokenKind::RParen
            }
            c if c.is_ascii_digit() || c == '.' => {
                let end = scan_number(input, position);
                let text = &input[position..end];
                let value = text.parse::<f64>().map_err(|_| ExprError::Syntax {
                    position,
                    message: format!("invalid number literal {text:?}"),
                })?;
                while chars.peek().is_some_and(|&(i, _)| i < end) {
                    chars.next();
                }
                TokenKind::Number(value)
            }
            c if is_ident_start(c) => {
                let mut end = position;
                while let Some(&(i, ch)) = chars.peek() {
                    if !is_word_char(ch) {
                        break;
                    }
                    end = i + ch.len_utf8();
                    chars.next();
                }
                TokenKind::Ident(input[position..end].to_string())
            }
            other => {
                return Err(ExprError::Syntax {
                    position,
                    message: format!("unexpected character {other:?}"),
                });
            }
        };

        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}

/// Byte offset one past the numeric literal starting at `start`.
///
/// Accepts `12`, `1.5`, `.5`, `2.`, and an exponent `e[+-]digits` only when
/// at least one exponent digit follows.
fn scan_number(input: &str, start: usize) -> usize {
    let bytes = input.as_bytes();
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn operators_and_parens() {
        assert_eq!(
            kinds("(1+2)*3/4-5^6"),
            vec![
                TokenKind::LParen,
                TokenKind::Number(1.0),
                TokenKind::Plus,
                TokenKind::Number(2.0),
                TokenKind::RParen,
                TokenKind::Star,
                TokenKind::Number(3.0),
                TokenKind::Slash,
                TokenKind::Number(4.0),
                TokenKind::Minus,
                TokenKind::Number(5.0),
                TokenKind::Caret,
                TokenKind::Number(6.0),
            ]
        );
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(
            kinds("s**2"),
            vec![
                TokenKind::Ident("s".to_string()),
                TokenKind::Caret,
                TokenKind::Number(2.0)
            ]
        );
    }

    #[test]
    fn number_forms() {
        assert_eq!(kinds("1.5"), vec![TokenKind::Number(1.5)]);
        assert_eq!(kinds(".25"), vec![TokenKind::Number(0.25)]);
        assert_eq!(kinds("2."), vec![TokenKind::Number(2.0)]);
        assert_eq!(kinds("1e-3"), vec![TokenKind::Number(1e-3)]);
        assert_eq!(kinds("2E+2"), vec![TokenKind::Number(200.0)]);
    }

    #[test]
    fn dangling_exponent_is_left_as_identifier() {
        assert_eq!(
            kinds("1e"),
            vec![TokenKind::Number(1.0), TokenKind::Ident("e".to_string())]
        );
    }

    #[test]
    fn positions_are_byte_offsets() {
        let tokens = tokenize("  Kp * s").unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2, 5, 7]);
    }

    #[test]
    fn lone_dot_is_rejected() {
        assert!(matches!(tokenize("."), Err(ExprError::Syntax { .. })));
    }

    #[test]
    fn unknown_character_is_rejected() {
        let err = tokenize("2 % 3").unwrap_err();
        assert_eq!(
            err,
            ExprError::Syntax {
                position: 2,
                message: "unexpected character '%'".to_string()
            }
        );
    }

    #[test]
    fn identifier_rules() {
        assert!(is_identifier("Kp"));
        assert!(is_identifier("_tau2"));
        assert!(!is_identifier("2K"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("K-p"));
    }
}
