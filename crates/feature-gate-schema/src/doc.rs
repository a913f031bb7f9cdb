// crates/feature-gate-schema/src/doc.rs
// ============================================================================
// Module: Doc Comment Tags
// Description: Title, description, and tag extraction from `/** */` bodies.
// Purpose: Turn declaration documentation into schema annotations.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A doc comment body is split into free text and `@tag` blocks. The first
//! line of the free text is the title; the remaining lines, joined and
//! trimmed, are the description. A one-line comment may carry its description
//! in an `@description` tag instead.
//!
//! Tag values are interpreted leniently. Malformed values are never errors:
//! - `@enum` parses as a JSON array, else splits on `,` after stripping
//!   brackets and quotes;
//! - `@enumDescription "label" - text` keeps only `text`; other text is kept
//!   verbatim;
//! - `@default` parses as JSON, else is kept as a string;
//! - `@min` / `@max` must be numbers, otherwise the tag is ignored.

use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Doc Comment
// ============================================================================

/// One `@name text` block of a doc comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    /// Tag name without `@`.
    pub name: String,
    /// Trimmed tag text; `None` when the tag has no text.
    pub text: Option<String>,
}

/// Parsed doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// First line of the free text.
    pub title: Option<String>,
    /// Remaining free text, or the first `@description` tag.
    pub description: Option<String>,
    /// Tags in source order.
    pub tags: Vec<DocTag>,
}

impl DocComment {
    /// Parses the body of a `/** ... */` comment (without the delimiters).
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let mut text_lines = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for raw in body.lines() {
            let line = strip_decoration(raw);
            if let Some(rest) = line.trim_start().strip_prefix('@') {
                if let Some((name, lines)) = current.take() {
                    tags.push(finish_tag(name, &lines));
                }
                let name_len =
                    rest.find(|c: char| !(c.is_alphanumeric() || c == '_')).unwrap_or(rest.len());
                let (name, text) = rest.split_at(name_len);
                current = Some((name.to_string(), vec![text.to_string()]));
            } else if let Some((_, lines)) = current.as_mut() {
                lines.push(line.to_string());
            } else {
                text_lines.push(line);
            }
        }
        if let Some((name, lines)) = current.take() {
            tags.push(finish_tag(name, &lines));
        }

        let free_text = text_lines.join("\n");
        let free_text = free_text.trim();
        let mut lines = free_text.lines();
        let title = lines.next().map(str::trim_end).filter(|line| !line.is_empty());
        let rest: Vec<&str> = lines.collect();
        let description = if rest.is_empty() {
            tags.iter().find(|tag| tag.name == "description").and_then(|tag| tag.text.clone())
        } else {
            Some(rest.join("\n").trim().to_string()).filter(|text| !text.is_empty())
        };

        Self {
            title: title.map(str::to_string),
            description,
            tags,
        }
    }

    /// Returns the text of the first tag named `name`.
    #[must_use]
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.iter().find(|tag| tag.name == name).and_then(|tag| tag.text.as_deref())
    }

    /// Iterates over every tag named `name`.
    pub fn tags_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s DocTag> + 's {
        self.tags.iter().filter(move |tag| tag.name == name)
    }
}

/// Removes comment decoration (` * `) from one line.
fn strip_decoration(line: &str) -> &str {
    let trimmed = line.trim_start();
    trimmed.strip_prefix('*').map_or(trimmed, |rest| rest.strip_prefix(' ').unwrap_or(rest))
}

/// Joins the lines of a tag block into its trimmed text.
fn finish_tag(name: String, lines: &[String]) -> DocTag {
    let joined = lines.join("\n");
    let text = joined.trim();
    DocTag {
        name,
        text: (!text.is_empty()).then(|| text.to_string()),
    }
}

// ============================================================================
// SECTION: Tag Values
// ============================================================================

/// Interprets `@enum` text as a list of allowed values.
///
/// JSON arrays are taken as-is. Anything else is split on `,` after removing
/// `[`, `]`, and `"`, yielding trimmed strings.
#[must_use]
pub fn parse_enum_tag(text: &str) -> Vec<Value> {
    if let Ok(Value::Array(values)) = serde_json::from_str::<Value>(text) {
        return values;
    }
    text.replace(['[', ']', '"'], "")
        .split(',')
        .map(|entry| Value::String(entry.trim().to_string()))
        .collect()
}

/// Interprets `@enumDescription` text.
///
/// The first `"label" - explanation` occurrence yields the trimmed
/// explanation; text without that shape is returned unchanged.
#[must_use]
pub fn parse_enum_description(text: &str) -> String {
    for (start, _) in text.match_indices('"') {
        if let Some(explanation) = labeled_explanation(&text[start + 1 ..]) {
            return explanation.trim().to_string();
        }
    }
    text.to_string()
}

/// Matches `label" <ws>- <ws>explanation` right after an opening quote.
fn labeled_explanation(after_quote: &str) -> Option<&str> {
    let close = after_quote.find('"')?;
    if close == 0 {
        return None;
    }
    let rest = after_quote[close + 1 ..].trim_start();
    let rest = rest.strip_prefix('-')?.trim_start();
    let line = rest.split('\n').next().unwrap_or_default();
    if line.is_empty() { None } else { Some(line) }
}

/// Interprets `@default` text as JSON, falling back to the raw string.
#[must_use]
pub fn parse_default_tag(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Interprets `@min` / `@max` text as a JSON number.
#[must_use]
pub fn parse_number_tag(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(Value::Number(number)) = serde_json::from_str::<Value>(trimmed) {
        return Some(Value::Number(number));
    }
    let float = trimmed.parse::<f64>().ok()?;
    Number::from_f64(float).map(Value::Number)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
