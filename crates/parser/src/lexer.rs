//! Tokenizer for `.proto` source text
//!
//! Comments are first-class tokens: the parser needs them to attach
//! documentation to declarations. Every token records the line it starts on
//! so inline comments can be told apart from leading ones and so syntax
//! errors can point at a line.

use protodoc_common::{DocError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    Ident(String),

    /// Integer or float literal, kept as written
    Number(String),

    /// Quoted string literal, quotes stripped
    Str(String),

    /// Single punctuation character
    Symbol(char),

    /// Comment with its text already normalized: `//` markers stripped and
    /// trimmed; block comment lines stripped of leading `*` and joined with
    /// newlines
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

const SYMBOLS: &str = "{}()[]<>=;,.:-";

pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut line = 1;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            i += 1;
        } else if c.is_whitespace() {
            i += 1;
        } else if c == '/' && chars.get(i + 1) == Some(&'/') {
            let start = i + 2;
            let mut end = start;
            while end < chars.len() && chars[end] != '\n' {
                end += 1;
            }
            let text: String = chars[start..end].iter().collect();
            tokens.push(Token {
                kind: TokenKind::Comment(text.trim().to_string()),
                line,
            });
            i = end;
        } else if c == '/' && chars.get(i + 1) == Some(&'*') {
            let start_line = line;
            let start = i + 2;
            let mut end = start;
            loop {
                if end + 1 >= chars.len() {
                    return Err(DocError::Syntax {
                        line: start_line,
                        message: "unterminated block comment".to_string(),
                    });
                }
                if chars[end] == '*' && chars[end + 1] == '/' {
                    break;
                }
                if chars[end] == '\n' {
                    line += 1;
                }
                end += 1;
            }
            let text: String = chars[start..end].iter().collect();
            tokens.push(Token {
                kind: TokenKind::Comment(normalize_block(&text)),
                line: start_line,
            });
            i = end + 2;
        } else if c == '"' || c == '\'' {
            let quote = c;
            let start_line = line;
            let mut text = String::new();
            i += 1;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(DocError::Syntax {
                            line: start_line,
                            message: "unterminated string literal".to_string(),
                        });
                    }
                    Some(&ch) if ch == quote => {
                        i += 1;
                        break;
                    }
                    Some('\\') => {
                        text.push('\\');
                        if let Some(&escaped) = chars.get(i + 1) {
                            text.push(escaped);
                        }
                        i += 2;
                    }
                    Some(&ch) => {
                        if ch == '\n' {
                            line += 1;
                        }
                        text.push(ch);
                        i += 1;
                    }
                }
            }
            tokens.push(Token {
                kind: TokenKind::Str(text),
                line: start_line,
            });
        } else if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            tokens.push(Token {
                kind: TokenKind::Ident(ident),
                line,
            });
        } else if c.is_ascii_digit() {
            let start = i;
            while i < chars.len()
                && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_')
            {
                i += 1;
            }
            let number: String = chars[start..i].iter().collect();
            tokens.push(Token {
                kind: TokenKind::Number(number),
                line,
            });
        } else if SYMBOLS.contains(c) {
            tokens.push(Token {
                kind: TokenKind::Symbol(c),
                line,
            });
            i += 1;
        } else {
            return Err(DocError::Syntax {
                line,
                message: format!("unexpected character {:?}", c),
            });
        }
    }

    Ok(tokens)
}

/// Strip decorative `*` prefixes from block comment lines and rejoin them
fn normalize_block(text: &str) -> String {
    text.lines()
        .map(|l| l.trim().trim_start_matches('*').trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            kinds("message Pet { string name = 1; }"),
            vec![
                TokenKind::Ident("message".to_string()),
                TokenKind::Ident("Pet".to_string()),
                TokenKind::Symbol('{'),
                TokenKind::Ident("string".to_string()),
                TokenKind::Ident("name".to_string()),
                TokenKind::Symbol('='),
                TokenKind::Number("1".to_string()),
                TokenKind::Symbol(';'),
                TokenKind::Symbol('}'),
            ]
        );
    }

    #[test]
    fn test_line_comment_trimmed() {
        assert_eq!(
            kinds("//   hello world  \n"),
            vec![TokenKind::Comment("hello world".to_string())]
        );
    }

    #[test]
    fn test_block_comment_normalized() {
        assert_eq!(
            kinds("/*\n * line one\n * line two\n */"),
            vec![TokenKind::Comment("line one\nline two".to_string())]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("syntax\n\npackage // inline\nfoo").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 3, 3, 4]);
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(
            kinds("\"proto3\""),
            vec![TokenKind::Str("proto3".to_string())]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = tokenize("message X {}\n/* floating").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("message @").unwrap_err();
        assert!(err.to_string().contains("unexpected character"));
    }
}
