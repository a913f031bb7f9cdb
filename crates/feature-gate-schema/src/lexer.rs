// crates/feature-gate-schema/src/lexer.rs
// ============================================================================
// Module: Typed Source Lexer
// Description: Tokenizer for the TypeScript declaration subset.
// Purpose: Produce positioned tokens with attached doc comments.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The lexer turns declaration source into [`SpannedToken`]s. Whitespace,
//! line comments, and plain block comments are dropped. A `/** ... */` doc
//! comment is not a token of its own: its body is attached to the next token
//! emitted, so the parser can read the documentation of whatever declaration
//! starts at that token. When several doc comments precede a token, the last
//! one wins.
//!
//! Input is untrusted; size is capped at [`MAX_SOURCE_BYTES`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::ParseError;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum accepted typed source size in bytes.
pub const MAX_SOURCE_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Tokens
// ============================================================================

/// Token produced from typed source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Identifier or keyword.
    Ident(&'a str),
    /// Quoted string literal with escapes decoded.
    Str(String),
    /// Backtick template literal, raw.
    Template(&'a str),
    /// Numeric literal, raw.
    Number(&'a str),
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `<`
    LAngle,
    /// `>`
    RAngle,
    /// `:`
    Colon,
    /// `;`
    Semi,
    /// `,`
    Comma,
    /// `?`
    Question,
    /// `|`
    Pipe,
    /// `&`
    Amp,
    /// `=`
    Eq,
    /// `=>`
    Arrow,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `-`
    Minus,
    /// Any other single character.
    Symbol(char),
    /// End of input.
    Eof,
}

impl Token<'_> {
    /// Formats the token for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Ident(text) | Self::Number(text) => (*text).to_string(),
            Self::Str(text) => format!("\"{text}\""),
            Self::Template(text) => format!("`{text}`"),
            Self::LBrace => "{".to_string(),
            Self::RBrace => "}".to_string(),
            Self::LParen => "(".to_string(),
            Self::RParen => ")".to_string(),
            Self::LBracket => "[".to_string(),
            Self::RBracket => "]".to_string(),
            Self::LAngle => "<".to_string(),
            Self::RAngle => ">".to_string(),
            Self::Colon => ":".to_string(),
            Self::Semi => ";".to_string(),
            Self::Comma => ",".to_string(),
            Self::Question => "?".to_string(),
            Self::Pipe => "|".to_string(),
            Self::Amp => "&".to_string(),
            Self::Eq => "=".to_string(),
            Self::Arrow => "=>".to_string(),
            Self::Dot => ".".to_string(),
            Self::Ellipsis => "...".to_string(),
            Self::Minus => "-".to_string(),
            Self::Symbol(ch) => ch.to_string(),
            Self::Eof => "end of input".to_string(),
        }
    }
}

/// Token paired with its byte offset and preceding doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'a> {
    /// Token value.
    pub token: Token<'a>,
    /// Byte offset into the input.
    pub position: usize,
    /// Body of the doc comment directly preceding the token.
    pub doc: Option<&'a str>,
}

// ============================================================================
// SECTION: Lexer
// ============================================================================

/// Tokenizes `input`, always ending with [`Token::Eof`].
///
/// # Errors
///
/// Returns [`ParseError`] when the input is too large or a comment, string, or
/// template literal is unterminated.
pub fn tokenize(input: &str) -> Result<Vec<SpannedToken<'_>>, ParseError> {
    if input.len() > MAX_SOURCE_BYTES {
        return Err(ParseError::InputTooLarge {
            max_bytes: MAX_SOURCE_BYTES,
            actual_bytes: input.len(),
        });
    }
    Lexer::new(input).lex()
}

/// Lexer state over one input.
struct Lexer<'a> {
    /// Source input being tokenized.
    input: &'a str,
    /// Current byte offset into the input.
    offset: usize,
    /// Doc comment waiting to attach to the next token.
    pending_doc: Option<&'a str>,
    /// Tokens produced so far.
    tokens: Vec<SpannedToken<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the start of `input`.
    const fn new(input: &'a str) -> Self {
        Self {
            input,
            offset: 0,
            pending_doc: None,
            tokens: Vec::new(),
        }
    }

    /// Runs the lexer to completion.
    fn lex(mut self) -> Result<Vec<SpannedToken<'a>>, ParseError> {
        let input = self.input;
        while let Some(ch) = self.peek() {
            let start = self.offset;
            match ch {
                c if c.is_whitespace() => self.offset += c.len_utf8(),
                '/' if self.starts_with("//") => self.skip_line_comment(),
                '/' if self.starts_with("/*") => self.block_comment(start)?,
                '"' | '\'' => {
                    let text = self.string_literal(ch, start)?;
                    self.push(Token::Str(text), start);
                }
                '`' => {
                    let raw = self.template_literal(start)?;
                    self.push(Token::Template(raw), start);
                }
                '0' ..= '9' => {
                    self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
                    self.push(Token::Number(&input[start .. self.offset]), start);
                }
                c if is_ident_start(c) => {
                    self.consume_while(is_ident_continue);
                    self.push(Token::Ident(&input[start .. self.offset]), start);
                }
                '.' if self.starts_with("...") => {
                    self.offset += 3;
                    self.push(Token::Ellipsis, start);
                }
                '=' if self.starts_with("=>") => {
                    self.offset += 2;
                    self.push(Token::Arrow, start);
                }
                _ => {
                    self.offset += ch.len_utf8();
                    self.push(punctuation(ch), start);
                }
            }
        }
        let end = self.offset;
        self.push(Token::Eof, end);
        Ok(self.tokens)
    }

    /// Emits a token, attaching any pending doc comment.
    fn push(&mut self, token: Token<'a>, position: usize) {
        self.tokens.push(SpannedToken {
            token,
            position,
            doc: self.pending_doc.take(),
        });
    }

    /// Returns the character at the current offset.
    fn peek(&self) -> Option<char> {
        self.input[self.offset ..].chars().next()
    }

    /// Returns whether the remaining input starts with `prefix`.
    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.offset ..].starts_with(prefix)
    }

    /// Advances while `condition` holds for the current character.
    fn consume_while(&mut self, condition: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !condition(ch) {
                break;
            }
            self.offset += ch.len_utf8();
        }
    }

    /// Skips a `//` comment up to (not including) the newline.
    fn skip_line_comment(&mut self) {
        self.consume_while(|c| c != '\n');
    }

    /// Consumes a block comment, recording it when it is a doc comment.
    fn block_comment(&mut self, start: usize) -> Result<(), ParseError> {
        let body_start = start + 2;
        let Some(length) = self.input[body_start ..].find("*/") else {
            return Err(ParseError::UnterminatedComment {
                position: start,
            });
        };
        let input = self.input;
        let body = &input[body_start .. body_start + length];
        self.offset = body_start + length + 2;
        // `/**/` is an empty plain comment, not a doc comment.
        if let Some(doc) = body.strip_prefix('*') {
            self.pending_doc = Some(doc);
        }
        Ok(())
    }

    /// Consumes a quoted string literal and decodes its escapes.
    fn string_literal(&mut self, quote: char, start: usize) -> Result<String, ParseError> {
        self.offset += quote.len_utf8();
        let mut text = String::new();
        loop {
            let Some(ch) = self.peek() else {
                return Err(ParseError::UnterminatedString {
                    position: start,
                });
            };
            self.offset += ch.len_utf8();
            match ch {
                c if c == quote => return Ok(text),
                '\n' => {
                    return Err(ParseError::UnterminatedString {
                        position: start,
                    });
                }
                '\\' => {
                    let Some(escaped) = self.peek() else {
                        return Err(ParseError::UnterminatedString {
                            position: start,
                        });
                    };
                    self.offset += escaped.len_utf8();
                    match escaped {
                        'n' => text.push('\n'),
                        't' => text.push('\t'),
                        'r' => text.push('\r'),
                        '0' => text.push('\0'),
                        'u' => text.push(self.unicode_escape()),
                        other => text.push(other),
                    }
                }
                other => text.push(other),
            }
        }
    }

    /// Decodes the hex digits of a `\uXXXX` escape, keeping invalid ones verbatim.
    fn unicode_escape(&mut self) -> char {
        let digits = self.input[self.offset ..].get(.. 4).unwrap_or_default();
        let decoded = u32::from_str_radix(digits, 16).ok().and_then(char::from_u32);
        if let Some(ch) = decoded {
            self.offset += 4;
            ch
        } else {
            'u'
        }
    }

    /// Consumes a template literal and returns its raw body.
    fn template_literal(&mut self, start: usize) -> Result<&'a str, ParseError> {
        self.offset += 1;
        let body_start = self.offset;
        loop {
            let Some(ch) = self.peek() else {
                return Err(ParseError::UnterminatedString {
                    position: start,
                });
            };
            match ch {
                '`' => {
                    let input = self.input;
                    let body = &input[body_start .. self.offset];
                    self.offset += 1;
                    return Ok(body);
                }
                '\\' => {
                    self.offset += 1;
                    if let Some(escaped) = self.peek() {
                        self.offset += escaped.len_utf8();
                    }
                }
                other => self.offset += other.len_utf8(),
            }
        }
    }
}

/// Maps a single punctuation character to its token.
const fn punctuation(ch: char) -> Token<'static> {
    match ch {
        '{' => Token::LBrace,
        '}' => Token::RBrace,
        '(' => Token::LParen,
        ')' => Token::RParen,
        '[' => Token::LBracket,
        ']' => Token::RBracket,
        '<' => Token::LAngle,
        '>' => Token::RAngle,
        ':' => Token::Colon,
        ';' => Token::Semi,
        ',' => Token::Comma,
        '?' => Token::Question,
        '|' => Token::Pipe,
        '&' => Token::Amp,
        '=' => Token::Eq,
        '.' => Token::Dot,
        '-' => Token::Minus,
        other => Token::Symbol(other),
    }
}

/// Returns whether `ch` can start an identifier.
fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

/// Returns whether `ch` can continue an identifier.
fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests;
