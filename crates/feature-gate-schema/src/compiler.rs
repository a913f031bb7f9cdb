// crates/feature-gate-schema/src/compiler.rs
// ============================================================================
// Module: Definition Compiler
// Description: Interface declaration to JSON Schema (draft-07) translation.
// Purpose: Derive the feature schema artifact from the typed definition.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The compiler is a recursive visitor over [`TypeNode`]. Each member becomes
//! one entry of `properties`, annotated from its doc comment, and every member
//! without `?` is listed in `required`. Both lists keep declaration order, so
//! compiling the same source twice yields identical output.
//!
//! | Declared type | Schema fragment |
//! | --- | --- |
//! | `string` / `number` / `boolean` | `{ "type": <same> }` |
//! | `null` | `{ "type": "null" }` |
//! | `T[]`, `Array<T>` | `{ "type": "array", "items": <T> }` |
//! | `"a" \| "b"` (literals only) | `{ "type": <first literal's type>, "enum": [...] }` |
//! | `A \| B` (anything else) | `{ "anyOf": [<A>, <B>] }` |
//! | `{ ... }` | `{ "type": "object", "properties", "required" }` |
//! | other references, `object` | `{ "type": "object" }` |
//! | anything else | `{}` |

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;

use crate::CompileError;
use crate::ast::InterfaceDecl;
use crate::ast::Keyword;
use crate::ast::Literal;
use crate::ast::Member;
use crate::ast::TypeNode;
use crate::doc::DocComment;
use crate::doc::parse_default_tag;
use crate::doc::parse_enum_description;
use crate::doc::parse_enum_tag;
use crate::doc::parse_number_tag;
use crate::parser::parse_source;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `$schema` marker stamped on generated artifacts.
pub const JSON_SCHEMA_DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Root interface name used when none is configured.
pub const DEFAULT_ROOT_INTERFACE: &str = "IFeature";

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Compiles the interface `root` declared in `source` into a schema artifact.
///
/// # Errors
///
/// Returns [`CompileError::Parse`] when the source cannot be parsed and
/// [`CompileError::DefinitionNotFound`] when no top-level interface is named
/// `root`.
pub fn compile_definition(source: &str, root: &str) -> Result<Value, CompileError> {
    let file = parse_source(source)?;
    let decl = file.interface(root).ok_or_else(|| CompileError::DefinitionNotFound {
        name: root.to_string(),
    })?;
    Ok(compile_interface(decl))
}

/// Compiles a parsed interface into a schema artifact titled with its name.
#[must_use]
pub fn compile_interface(decl: &InterfaceDecl) -> Value {
    let mut artifact = Map::new();
    artifact.insert(String::from("$schema"), Value::String(JSON_SCHEMA_DRAFT_07.to_string()));
    artifact.extend(object_schema(&decl.members));
    artifact.insert(String::from("title"), Value::String(decl.name.clone()));
    Value::Object(artifact)
}

// ============================================================================
// SECTION: Visitor
// ============================================================================

/// Builds `{ type: object, properties, required }` for a member list.
fn object_schema(members: &[Member]) -> Map<String, Value> {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for member in members {
        let mut property = type_schema(&member.ty);
        if let Some(doc) = &member.doc {
            annotate(&mut property, &DocComment::parse(doc));
        }
        properties.insert(member.name.clone(), Value::Object(property));
        if !member.optional && !required.contains(&Value::String(member.name.clone())) {
            required.push(Value::String(member.name.clone()));
        }
    }
    let mut schema = Map::new();
    schema.insert(String::from("type"), Value::String(String::from("object")));
    schema.insert(String::from("properties"), Value::Object(properties));
    schema.insert(String::from("required"), Value::Array(required));
    schema
}

/// Maps a declared type to its schema fragment.
fn type_schema(ty: &TypeNode) -> Map<String, Value> {
    match ty {
        TypeNode::Keyword(keyword) => keyword_schema(*keyword),
        TypeNode::Literal(literal) => enum_schema(std::slice::from_ref(literal)),
        TypeNode::Array(items) => array_schema(items),
        TypeNode::Union(members) => union_schema(members),
        TypeNode::Object(members) => object_schema(members),
        TypeNode::Reference {
            name,
            arguments,
        } => match (name.as_str(), arguments.as_slice()) {
            ("Array" | "ReadonlyArray", [items]) => array_schema(items),
            _ => typed("object"),
        },
        TypeNode::Tuple(_) | TypeNode::Opaque => Map::new(),
    }
}

/// Maps a primitive keyword.
fn keyword_schema(keyword: Keyword) -> Map<String, Value> {
    match keyword {
        Keyword::String => typed("string"),
        Keyword::Number => typed("number"),
        Keyword::Boolean => typed("boolean"),
        Keyword::Null => typed("null"),
        Keyword::Object => typed("object"),
        Keyword::Any => Map::new(),
    }
}

/// Builds `{ type: array, items }`.
fn array_schema(items: &TypeNode) -> Map<String, Value> {
    let mut schema = typed("array");
    schema.insert(String::from("items"), Value::Object(type_schema(items)));
    schema
}

/// Maps a union: literal-only unions become enums, others `anyOf`.
fn union_schema(members: &[TypeNode]) -> Map<String, Value> {
    let literals: Vec<Literal> = members
        .iter()
        .filter_map(|member| match member {
            TypeNode::Literal(literal) => Some(literal.clone()),
            _ => None,
        })
        .collect();
    if !literals.is_empty() && literals.len() == members.len() {
        return enum_schema(&literals);
    }
    let variants = members.iter().map(|member| Value::Object(type_schema(member))).collect();
    let mut schema = Map::new();
    schema.insert(String::from("anyOf"), Value::Array(variants));
    schema
}

/// Builds `{ type: <first literal's type>, enum }`.
fn enum_schema(literals: &[Literal]) -> Map<String, Value> {
    let kind = literals.first().map_or("string", Literal::primitive_type);
    let mut schema = typed(kind);
    schema.insert(
        String::from("enum"),
        Value::Array(literals.iter().map(Literal::to_value).collect()),
    );
    schema
}

/// Builds `{ type: <kind> }`.
fn typed(kind: &str) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert(String::from("type"), Value::String(kind.to_string()));
    schema
}

// ============================================================================
// SECTION: Annotations
// ============================================================================

/// Copies doc comment annotations onto a property schema.
///
/// Keys already produced by the type mapping keep their position when a tag
/// overrides them (`@enum` on a literal union, for example).
fn annotate(property: &mut Map<String, Value>, doc: &DocComment) {
    if let Some(title) = &doc.title {
        property.insert(String::from("title"), Value::String(title.clone()));
    }
    if let Some(description) = &doc.description {
        property.insert(String::from("description"), Value::String(description.clone()));
    }
    if let Some(text) = doc.tag("default") {
        property.insert(String::from("default"), parse_default_tag(text));
    }
    if let Some(minimum) = doc.tag("min").and_then(parse_number_tag) {
        property.insert(String::from("minimum"), minimum);
    }
    if let Some(maximum) = doc.tag("max").and_then(parse_number_tag) {
        property.insert(String::from("maximum"), maximum);
    }
    if let Some(text) = doc.tag("enum") {
        property.insert(String::from("enum"), Value::Array(parse_enum_tag(text)));
    }
    let descriptions: Vec<Value> = doc
        .tags_named("enumDescription")
        .map(|tag| {
            Value::String(tag.text.as_deref().map(parse_enum_description).unwrap_or_default())
        })
        .collect();
    if !descriptions.is_empty() {
        property.insert(String::from("enumDescriptions"), Value::Array(descriptions));
    }
}
