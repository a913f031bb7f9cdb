// crates/feature-gate-schema/src/parser.rs
// ============================================================================
// Module: Typed Source Parser
// Description: Recursive-descent parser for interface declarations.
// Purpose: Build the declaration tree the schema compiler walks.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! Only top-level `interface` declarations are parsed into the tree. Every
//! other top-level construct (imports, type aliases, functions, namespaces) is
//! skipped with bracket balancing, so interfaces nested inside a namespace or
//! `declare global` block are not collected.
//!
//! ### Type grammar (informal)
//! - `type := union ('extends' union '?' type ':' type)?`
//! - `union := '|'? intersection ('|' intersection)*`
//! - `intersection := '&'? postfix ('&' postfix)*`
//! - `postfix := ('keyof' | 'unique' | 'readonly')* primary ('[' ']' | '[' type ']')*`
//! - `primary := keyword | literal | reference ('<' type, ... '>')? | '{' members '}'
//!   | '[' tuple ']' | '(' type ')' | function | typeof | infer`
//!
//! Conditional types, bigint literals, and `keyof`/`unique` operands are
//! accepted as opaque.
//!
//! Index signatures, call signatures, and methods are accepted and dropped.
//! Type nesting is capped at [`MAX_TYPE_NESTING`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::mem::discriminant;

use serde_json::Number;

use crate::ParseError;
use crate::ast::InterfaceDecl;
use crate::ast::Keyword;
use crate::ast::Literal;
use crate::ast::Member;
use crate::ast::SourceFile;
use crate::ast::TypeNode;
use crate::lexer::SpannedToken;
use crate::lexer::Token;
use crate::lexer::tokenize;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum nesting depth of types and object bodies.
pub const MAX_TYPE_NESTING: usize = 64;

/// Sentinel returned when reading past the token stream.
static EOF_TOKEN: SpannedToken<'static> = SpannedToken {
    token: Token::Eof,
    position: 0,
    doc: None,
};

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Parses typed source into its top-level interface declarations.
///
/// # Errors
///
/// Returns [`ParseError`] for lexical errors, malformed interface bodies, or
/// types nested deeper than [`MAX_TYPE_NESTING`].
pub fn parse_source(input: &str) -> Result<SourceFile, ParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser::new(tokens);
    parser.parse_file()
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser over a token stream.
struct Parser<'a> {
    /// Token stream ending in [`Token::Eof`].
    tokens: Vec<SpannedToken<'a>>,
    /// Current token index.
    index: usize,
    /// Current type nesting depth.
    nesting: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser at the first token.
    const fn new(tokens: Vec<SpannedToken<'a>>) -> Self {
        Self {
            tokens,
            index: 0,
            nesting: 0,
        }
    }

    /// Collects top-level interfaces, skipping everything else.
    fn parse_file(&mut self) -> Result<SourceFile, ParseError> {
        let mut file = SourceFile::default();
        let mut depth = 0usize;
        loop {
            match &self.current().token {
                Token::Eof => break,
                Token::LBrace | Token::LParen | Token::LBracket => {
                    depth += 1;
                    self.advance();
                }
                Token::RBrace | Token::RParen | Token::RBracket => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                Token::Ident("interface")
                    if depth == 0 && matches!(self.peek(1), Token::Ident(_)) =>
                {
                    file.interfaces.push(self.parse_interface()?);
                }
                _ => self.advance(),
            }
        }
        Ok(file)
    }

    /// Parses `interface Name<...> extends ... { members }`.
    fn parse_interface(&mut self) -> Result<InterfaceDecl, ParseError> {
        self.advance();
        let name = self.expect_ident("interface name")?;
        let mut angle = 0usize;
        loop {
            match &self.current().token {
                Token::LBrace if angle == 0 => break,
                Token::LAngle => angle += 1,
                Token::RAngle => angle = angle.saturating_sub(1),
                Token::Eof => return Err(self.unexpected("`{` opening the interface body")),
                _ => {}
            }
            self.advance();
        }
        let members = self.parse_object_body()?;
        Ok(InterfaceDecl {
            name,
            members,
        })
    }

    /// Parses `{ member; ... }` and returns the property members.
    fn parse_object_body(&mut self) -> Result<Vec<Member>, ParseError> {
        let position = self.current().position;
        self.expect(&Token::LBrace, "`{`")?;
        self.with_nesting(position, |parser| {
            let mut members = Vec::new();
            loop {
                while parser.matches(&Token::Semi) || parser.matches(&Token::Comma) {}
                match &parser.current().token {
                    Token::RBrace => {
                        parser.advance();
                        return Ok(members);
                    }
                    Token::Eof => return Err(parser.unexpected("`}` closing the object type")),
                    _ => {
                        if let Some(member) = parser.parse_member()? {
                            members.push(member);
                        }
                    }
                }
            }
        })
    }

    /// Parses one member; signatures without a property name yield `None`.
    fn parse_member(&mut self) -> Result<Option<Member>, ParseError> {
        let doc = self.current().doc.map(str::to_string);
        while matches!(self.current().token, Token::Ident("readonly"))
            && matches!(
                self.peek(1),
                Token::Ident(_) | Token::Str(_) | Token::Number(_) | Token::LBracket
            )
        {
            self.advance();
        }

        let name = match &self.current().token {
            Token::LBracket => {
                self.skip_group(&Token::LBracket, &Token::RBracket)?;
                self.matches(&Token::Question);
                if self.matches(&Token::Colon) {
                    self.parse_type()?;
                }
                return Ok(None);
            }
            Token::LParen | Token::LAngle => {
                self.skip_signature()?;
                return Ok(None);
            }
            Token::Ident("new") if matches!(self.peek(1), Token::LParen | Token::LAngle) => {
                self.advance();
                self.skip_signature()?;
                return Ok(None);
            }
            Token::Ident(text) | Token::Number(text) => (*text).to_string(),
            Token::Str(text) => text.clone(),
            _ => return Err(self.unexpected("property name")),
        };
        self.advance();
        let optional = self.matches(&Token::Question);

        let ty = match &self.current().token {
            Token::Colon => {
                self.advance();
                self.parse_type()?
            }
            Token::LParen | Token::LAngle => {
                self.skip_signature()?;
                return Ok(None);
            }
            Token::Semi | Token::Comma | Token::RBrace => TypeNode::Opaque,
            _ => return Err(self.unexpected("`:` after property name")),
        };
        Ok(Some(Member {
            name,
            optional,
            doc,
            ty,
        }))
    }

    /// Skips `<...>(...)` and an optional `: ReturnType`.
    fn skip_signature(&mut self) -> Result<(), ParseError> {
        if matches!(self.current().token, Token::LAngle) {
            self.skip_group(&Token::LAngle, &Token::RAngle)?;
        }
        self.skip_group(&Token::LParen, &Token::RParen)?;
        if self.matches(&Token::Colon) {
            self.parse_type()?;
        }
        Ok(())
    }

    /// Parses a full type expression.
    fn parse_type(&mut self) -> Result<TypeNode, ParseError> {
        let position = self.current().position;
        self.with_nesting(position, Self::parse_conditional)
    }

    /// Parses `Check extends Constraint ? True : False`; conditionals are opaque.
    fn parse_conditional(&mut self) -> Result<TypeNode, ParseError> {
        let check = self.parse_union()?;
        if !matches!(self.current().token, Token::Ident("extends")) {
            return Ok(check);
        }
        self.advance();
        self.parse_union()?;
        self.expect(&Token::Question, "`?` in conditional type")?;
        self.parse_type()?;
        self.expect(&Token::Colon, "`:` in conditional type")?;
        self.parse_type()?;
        Ok(TypeNode::Opaque)
    }

    /// Parses a union of intersections.
    fn parse_union(&mut self) -> Result<TypeNode, ParseError> {
        self.matches(&Token::Pipe);
        let mut members = vec![self.parse_intersection()?];
        while self.matches(&Token::Pipe) {
            members.push(self.parse_intersection()?);
        }
        if members.len() == 1 {
            Ok(members.remove(0))
        } else {
            Ok(TypeNode::Union(members))
        }
    }

    /// Parses an intersection; intersections are opaque to the compiler.
    fn parse_intersection(&mut self) -> Result<TypeNode, ParseError> {
        self.matches(&Token::Amp);
        let first = self.parse_postfix()?;
        if !matches!(self.current().token, Token::Amp) {
            return Ok(first);
        }
        while self.matches(&Token::Amp) {
            self.parse_postfix()?;
        }
        Ok(TypeNode::Opaque)
    }

    /// Parses prefix operators, array suffixes, and indexed access.
    ///
    /// Prefix operators are consumed in a loop so long operator chains stay
    /// within [`MAX_TYPE_NESTING`] accounting.
    fn parse_postfix(&mut self) -> Result<TypeNode, ParseError> {
        let mut opaque = false;
        loop {
            match self.current().token {
                Token::Ident("keyof" | "unique") => opaque = true,
                Token::Ident("readonly") => {}
                _ => break,
            }
            self.advance();
        }
        let mut ty = self.parse_primary()?;
        while matches!(self.current().token, Token::LBracket) {
            if matches!(self.peek(1), Token::RBracket) {
                self.advance();
                self.advance();
                ty = TypeNode::Array(Box::new(ty));
            } else {
                self.skip_group(&Token::LBracket, &Token::RBracket)?;
                ty = TypeNode::Opaque;
            }
        }
        Ok(if opaque { TypeNode::Opaque } else { ty })
    }

    /// Parses a primary type.
    fn parse_primary(&mut self) -> Result<TypeNode, ParseError> {
        let SpannedToken {
            token,
            position,
            ..
        } = self.current().clone();
        match token {
            Token::Ident("true") => {
                self.advance();
                Ok(TypeNode::Literal(Literal::Boolean(true)))
            }
            Token::Ident("false") => {
                self.advance();
                Ok(TypeNode::Literal(Literal::Boolean(false)))
            }
            Token::Ident("typeof") => {
                self.advance();
                self.parse_dotted_name()?;
                Ok(TypeNode::Opaque)
            }
            Token::Ident("infer") if matches!(self.peek(1), Token::Ident(_)) => {
                self.advance();
                self.advance();
                Ok(TypeNode::Opaque)
            }
            Token::Ident("new") => {
                self.advance();
                self.parse_function()
            }
            Token::Ident(ident) => {
                if let Some(keyword) = Keyword::from_ident(ident) {
                    self.advance();
                    return Ok(TypeNode::Keyword(keyword));
                }
                self.parse_reference()
            }
            Token::Str(text) => {
                self.advance();
                Ok(TypeNode::Literal(Literal::String(text)))
            }
            Token::Number(raw) => {
                self.advance();
                number_literal(raw, false, position)
            }
            Token::Minus => {
                self.advance();
                match self.current().token {
                    Token::Number(raw) => {
                        self.advance();
                        number_literal(raw, true, position)
                    }
                    _ => Err(self.unexpected("numeric literal after `-`")),
                }
            }
            Token::Template(_) => {
                self.advance();
                Ok(TypeNode::Opaque)
            }
            Token::LBrace => self.parse_object_body().map(TypeNode::Object),
            Token::LBracket => self.parse_tuple(),
            Token::LParen => {
                if self.is_function_type() {
                    self.parse_function()
                } else {
                    self.advance();
                    let inner = self.parse_type()?;
                    self.expect(&Token::RParen, "`)`")?;
                    Ok(inner)
                }
            }
            Token::LAngle => self.parse_function(),
            _ => Err(self.unexpected("type")),
        }
    }

    /// Parses `Name.Name<Args>`.
    fn parse_reference(&mut self) -> Result<TypeNode, ParseError> {
        let name = self.parse_dotted_name()?;
        let mut arguments = Vec::new();
        if self.matches(&Token::LAngle) {
            loop {
                arguments.push(self.parse_type()?);
                if self.matches(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RAngle, "`>` closing type arguments")?;
                break;
            }
        }
        Ok(TypeNode::Reference {
            name,
            arguments,
        })
    }

    /// Parses `Ident(.Ident)*`.
    fn parse_dotted_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.expect_ident("type name")?;
        while matches!(self.current().token, Token::Dot) {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident("type name after `.`")?);
        }
        Ok(name)
    }

    /// Parses `[A, name?: B, ...C]`.
    fn parse_tuple(&mut self) -> Result<TypeNode, ParseError> {
        self.advance();
        let mut elements = Vec::new();
        loop {
            if self.matches(&Token::RBracket) {
                break;
            }
            self.matches(&Token::Ellipsis);
            let labeled = matches!(self.current().token, Token::Ident(_))
                && (matches!(self.peek(1), Token::Colon)
                    || (matches!(self.peek(1), Token::Question)
                        && matches!(self.peek(2), Token::Colon)));
            if labeled {
                self.advance();
                self.matches(&Token::Question);
                self.advance();
            }
            elements.push(self.parse_type()?);
            self.matches(&Token::Question);
            if !self.matches(&Token::Comma) {
                self.expect(&Token::RBracket, "`]` closing the tuple")?;
                break;
            }
        }
        Ok(TypeNode::Tuple(elements))
    }

    /// Parses `<T>(params) => Return`; function types are opaque.
    fn parse_function(&mut self) -> Result<TypeNode, ParseError> {
        if matches!(self.current().token, Token::LAngle) {
            self.skip_group(&Token::LAngle, &Token::RAngle)?;
        }
        self.skip_group(&Token::LParen, &Token::RParen)?;
        self.expect(&Token::Arrow, "`=>` in function type")?;
        self.parse_type()?;
        Ok(TypeNode::Opaque)
    }

    /// Returns whether the `(` at the cursor opens a function parameter list.
    fn is_function_type(&self) -> bool {
        let mut depth = 0usize;
        let mut index = self.index;
        while let Some(spanned) = self.tokens.get(index) {
            match spanned.token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return matches!(
                            self.tokens.get(index + 1).map(|next| &next.token),
                            Some(Token::Arrow)
                        );
                    }
                }
                Token::Eof => return false,
                _ => {}
            }
            index += 1;
        }
        false
    }

    /// Skips a balanced `open ... close` group starting at the cursor.
    fn skip_group(&mut self, open: &Token<'_>, close: &Token<'_>) -> Result<(), ParseError> {
        let start = self.current().position;
        if !self.is_at(open) {
            return Err(self.unexpected("opening bracket"));
        }
        let mut depth = 0usize;
        loop {
            if self.is_at(open) {
                depth += 1;
            } else if self.is_at(close) {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    self.advance();
                    return Ok(());
                }
            } else if matches!(self.current().token, Token::Eof) {
                return Err(ParseError::UnexpectedToken {
                    expected: "closing bracket",
                    found: Token::Eof.describe(),
                    position: start,
                });
            }
            self.advance();
        }
    }

    /// Runs a parser step while enforcing the nesting limit.
    fn with_nesting<T>(
        &mut self,
        position: usize,
        step: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let next_depth = self.nesting + 1;
        if next_depth > MAX_TYPE_NESTING {
            return Err(ParseError::NestingTooDeep {
                max_depth: MAX_TYPE_NESTING,
                actual_depth: next_depth,
                position,
            });
        }
        self.nesting = next_depth;
        let result = step(self);
        self.nesting = self.nesting.saturating_sub(1);
        result
    }

    /// Consumes an identifier or returns an error.
    fn expect_ident(&mut self, expected: &'static str) -> Result<String, ParseError> {
        if let Token::Ident(text) = self.current().token {
            self.advance();
            Ok(text.to_string())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consumes the expected token kind or returns an error.
    fn expect(&mut self, token: &Token<'_>, expected: &'static str) -> Result<(), ParseError> {
        if self.matches(token) { Ok(()) } else { Err(self.unexpected(expected)) }
    }

    /// Consumes the token if it has the given kind.
    fn matches(&mut self, token: &Token<'_>) -> bool {
        if self.is_at(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Returns whether the current token has the given kind.
    fn is_at(&self, token: &Token<'_>) -> bool {
        discriminant(&self.current().token) == discriminant(token)
    }

    /// Returns the current token.
    fn current(&self) -> &SpannedToken<'a> {
        self.tokens.get(self.index).unwrap_or(&EOF_TOKEN)
    }

    /// Returns the token `offset` positions ahead.
    fn peek(&self, offset: usize) -> &Token<'a> {
        self.tokens.get(self.index + offset).map_or(&EOF_TOKEN.token, |spanned| &spanned.token)
    }

    /// Advances to the next token, stopping at end of input.
    fn advance(&mut self) {
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
    }

    /// Builds an unexpected-token error at the cursor.
    fn unexpected(&self, expected: &'static str) -> ParseError {
        let current = self.current();
        ParseError::UnexpectedToken {
            expected,
            found: current.token.describe(),
            position: current.position,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses a numeric literal type, accepting `_` separators and radix prefixes.
///
/// Bigint literals (`10n`) have no JSON counterpart and are opaque.
fn number_literal(raw: &str, negative: bool, position: usize) -> Result<TypeNode, ParseError> {
    if raw.ends_with('n') {
        return Ok(TypeNode::Opaque);
    }
    let invalid = || ParseError::InvalidNumber {
        raw: if negative { format!("-{raw}") } else { raw.to_string() },
        position,
    };
    let digits = raw.replace('_', "");
    let radix = match digits.get(.. 2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    let number = if let Some(radix) = radix {
        let magnitude = i64::from_str_radix(&digits[2 ..], radix).map_err(|_| invalid())?;
        Number::from(if negative { -magnitude } else { magnitude })
    } else if let Ok(integer) = digits.parse::<i64>() {
        Number::from(if negative { -integer } else { integer })
    } else {
        let float = digits.parse::<f64>().map_err(|_| invalid())?;
        Number::from_f64(if negative { -float } else { float }).ok_or_else(invalid)?
    };
    Ok(TypeNode::Literal(Literal::Number(number)))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
