// crates/feature-gate-schema/src/lexer/tests.rs
// ============================================================================
// Module: Typed Source Lexer Unit Tests
// Description: Unit coverage for tokens, doc comment attachment, and limits.
// Purpose: Ensure the parser receives positioned tokens with the right docs.
// Dependencies: feature-gate-schema
// ============================================================================

//! ## Overview
//! Tokenizes small declaration fragments and checks token kinds, decoded
//! literals, doc attachment, and lexical error positions.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based helpers for clarity."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use super::MAX_SOURCE_BYTES;
use super::Token;
use super::tokenize;
use crate::ParseError;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn kinds(input: &str) -> Vec<Token<'_>> {
    tokenize(input).expect("tokenize").into_iter().map(|spanned| spanned.token).collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn interface_member_tokens() {
    assert_eq!(
        kinds("interface A { b?: string; }"),
        vec![
            Token::Ident("interface"),
            Token::Ident("A"),
            Token::LBrace,
            Token::Ident("b"),
            Token::Question,
            Token::Colon,
            Token::Ident("string"),
            Token::Semi,
            Token::RBrace,
            Token::Eof,
        ]
    );
}

#[test]
fn multi_character_punctuation() {
    assert_eq!(
        kinds("...rest => -1.5"),
        vec![
            Token::Ellipsis,
            Token::Ident("rest"),
            Token::Arrow,
            Token::Minus,
            Token::Number("1.5"),
            Token::Eof,
        ]
    );
}

#[test]
fn positions_are_byte_offsets() {
    let tokens = tokenize("é x").expect("tokenize");
    assert_eq!(tokens[0].position, 0);
    assert_eq!(tokens[1].position, 3);
    assert_eq!(tokens[2].position, 4);
}

#[test]
fn doc_comment_attaches_to_next_token() {
    let tokens = tokenize("/** Title */\nname: string").expect("tokenize");
    assert_eq!(tokens[0].token, Token::Ident("name"));
    assert_eq!(tokens[0].doc, Some(" Title "));
    assert_eq!(tokens[1].doc, None);
}

#[test]
fn last_doc_comment_wins() {
    let tokens = tokenize("/** first */ /** second */ name").expect("tokenize");
    assert_eq!(tokens[0].doc, Some(" second "));
}

#[test]
fn plain_comments_are_dropped() {
    let tokens = tokenize("/* plain */ // line\n/**/ name").expect("tokenize");
    assert_eq!(tokens[0].token, Token::Ident("name"));
    assert_eq!(tokens[0].doc, None);
}

#[test]
fn string_escapes_are_decoded() {
    assert_eq!(
        kinds(r#"'it\'s' "\u0041\n""#),
        vec![Token::Str(String::from("it's")), Token::Str(String::from("A\n")), Token::Eof]
    );
}

#[test]
fn template_literal_is_raw() {
    assert_eq!(kinds("`a${b}`"), vec![Token::Template("a${b}"), Token::Eof]);
}

#[test]
fn unterminated_comment_reports_opening() {
    assert_eq!(
        tokenize("a /** never closed"),
        Err(ParseError::UnterminatedComment {
            position: 2
        })
    );
}

#[test]
fn string_cannot_span_lines() {
    assert_eq!(
        tokenize("x: \"open\n\""),
        Err(ParseError::UnterminatedString {
            position: 3
        })
    );
}

#[test]
fn oversized_input_is_rejected() {
    let input = "a".repeat(MAX_SOURCE_BYTES + 1);
    assert_eq!(
        tokenize(&input),
        Err(ParseError::InputTooLarge {
            max_bytes: MAX_SOURCE_BYTES,
            actual_bytes: MAX_SOURCE_BYTES + 1,
        })
    );
}
