//! Stack value literals
//!
//! Reads the values a user types into the CLI or REPL: `true`/`false`,
//! signed decimal integers, double-quoted strings, and bare words (taken as
//! text). Only single values are read here; there is no script syntax.

use std::fmt;

use num_bigint::BigInt;

use super::models::StackValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    /// A quoted string is missing its closing quote
    UnterminatedString { start: usize },
    /// Unsupported escape such as `\n`
    InvalidEscape { ch: char, position: usize },
    /// Characters directly after a closing quote
    TrailingCharacters { position: usize },
    Empty,
}

impl fmt::Display for LiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedString { start } => {
                write!(f, "Unterminated string starting at column {}", start + 1)
            }
            Self::InvalidEscape { ch, position } => {
                write!(f, "Invalid escape '\\{}' at column {}", ch, position + 1)
            }
            Self::TrailingCharacters { position } => {
                write!(f, "Unexpected characters after string at column {}", position + 1)
            }
            Self::Empty => write!(f, "Empty literal"),
        }
    }
}

impl std::error::Error for LiteralError {}

pub type LiteralResult<T> = Result<T, LiteralError>;

/// Read one value.
pub fn parse_value(token: &str) -> LiteralResult<StackValue> {
    let values = parse_values(token)?;
    match <[StackValue; 1]>::try_from(values) {
        Ok([value]) => Ok(value),
        Err(values) if values.is_empty() => Err(LiteralError::Empty),
        // More than one token: keep it as a single text value
        Err(_) => Ok(StackValue::text(token.trim())),
    }
}

/// One whitespace-separated token of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Unquoted word: a keyword, an integer, an opcode name or plain text
    Word(String),
    /// Contents of a double-quoted string, escapes resolved
    Quoted(String),
}

impl Token {
    pub fn into_value(self) -> StackValue {
        match self {
            Token::Word(word) => bare_word(&word),
            Token::Quoted(text) => StackValue::Text(text),
        }
    }
}

/// Read every whitespace-separated value on a line.
pub fn parse_values(line: &str) -> LiteralResult<Vec<StackValue>> {
    Ok(tokenize(line)?.into_iter().map(Token::into_value).collect())
}

/// Split a line into tokens, honouring double quotes.
pub fn tokenize(line: &str) -> LiteralResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        if ch == '"' {
            chars.next();
            let mut text = String::new();
            let mut closed = false;
            while let Some((pos, c)) = chars.next() {
                match c {
                    '"' => {
                        closed = true;
                        break;
                    }
                    '\\' => match chars.next() {
                        Some((_, e @ ('"' | '\\'))) => text.push(e),
                        Some((_, other)) => {
                            return Err(LiteralError::InvalidEscape { ch: other, position: pos })
                        }
                        None => return Err(LiteralError::UnterminatedString { start }),
                    },
                    c => text.push(c),
                }
            }
            if !closed {
                return Err(LiteralError::UnterminatedString { start });
            }
            if let Some(&(pos, c)) = chars.peek() {
                if !c.is_whitespace() {
                    return Err(LiteralError::TrailingCharacters { position: pos });
                }
            }
            tokens.push(Token::Quoted(text));
            continue;
        }

        let mut end = line.len();
        while let Some(&(pos, c)) = chars.peek() {
            if c.is_whitespace() {
                end = pos;
                break;
            }
            chars.next();
        }
        tokens.push(Token::Word(line[start..end].to_string()));
    }

    Ok(tokens)
}

fn bare_word(word: &str) -> StackValue {
    match word {
        "true" => StackValue::Bool(true),
        "false" => StackValue::Bool(false),
        _ if is_integer(word) => match word.parse::<BigInt>() {
            Ok(n) => StackValue::Number(n),
            Err(_) => StackValue::text(word),
        },
        _ => StackValue::text(word),
    }
}

fn is_integer(word: &str) -> bool {
    let digits = word.strip_prefix(['-', '+']).unwrap_or(word);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(parse_value("true"), Ok(StackValue::Bool(true)));
        assert_eq!(parse_value("false"), Ok(StackValue::Bool(false)));
        assert_eq!(parse_value("42"), Ok(StackValue::from(42)));
        assert_eq!(parse_value("-7"), Ok(StackValue::from(-7)));
        assert_eq!(parse_value("+7"), Ok(StackValue::from(7)));
        assert_eq!(parse_value("abc"), Ok(StackValue::from("abc")));
        assert_eq!(parse_value("12ab"), Ok(StackValue::from("12ab")));
        assert_eq!(parse_value("-"), Ok(StackValue::from("-")));
    }

    #[test]
    fn test_big_number() {
        let value = parse_value("99999999999999999999999999").unwrap();
        assert_eq!(value.as_number().map(|n| n.to_string()).as_deref(), Some("99999999999999999999999999"));
    }

    #[test]
    fn test_quoted() {
        assert_eq!(parse_value(r#""5""#), Ok(StackValue::from("5")));
        assert_eq!(parse_value(r#""true""#), Ok(StackValue::from("true")));
        assert_eq!(parse_value(r#""a \"b\" \\ c""#), Ok(StackValue::from(r#"a "b" \ c"#)));
    }

    #[test]
    fn test_line() {
        let values = parse_values(r#"1 "two words" false  x"#).unwrap();
        assert_eq!(
            values,
            vec![
                StackValue::from(1),
                StackValue::from("two words"),
                StackValue::from(false),
                StackValue::from("x"),
            ]
        );
        assert!(parse_values("   ").unwrap().is_empty());
    }

    #[test]
    fn test_tokens_keep_quoting() {
        assert_eq!(
            tokenize(r#"OP_DUP "OP_DUP""#).unwrap(),
            vec![Token::Word("OP_DUP".to_string()), Token::Quoted("OP_DUP".to_string())]
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_values(r#"1 "open"#), Err(LiteralError::UnterminatedString { start: 2 }));
        assert_eq!(
            parse_values(r#""a\n""#),
            Err(LiteralError::InvalidEscape { ch: 'n', position: 2 })
        );
        assert_eq!(parse_values(r#""a"b"#), Err(LiteralError::TrailingCharacters { position: 3 }));
        assert_eq!(parse_value(""), Err(LiteralError::Empty));
    }

    #[test]
    fn test_display_roundtrip() {
        for value in [StackValue::from("a \"q\""), StackValue::from(-3), StackValue::from(true)] {
            assert_eq!(parse_value(&value.to_string()), Ok(value));
        }
    }
}
