// crates/feature-gate-schema/src/ast.rs
// ============================================================================
// Module: Declaration Syntax Tree
// Description: Typed declaration nodes produced by the parser.
// Purpose: Give the schema compiler a closed set of type variants to visit.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The tree covers what a feature definition needs: interface declarations,
//! their members with optional markers and doc comments, and a closed
//! [`TypeNode`] enum. Anything the parser accepts but the compiler does not
//! interpret (intersections, functions, indexed access, template literals)
//! becomes [`TypeNode::Opaque`].

use serde_json::Number;
use serde_json::Value;

/// Parsed typed source: top-level interface declarations in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Interfaces declared at the top level.
    pub interfaces: Vec<InterfaceDecl>,
}

impl SourceFile {
    /// Returns the interface named `name`.
    ///
    /// Later declarations win when a name is declared more than once.
    #[must_use]
    pub fn interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.interfaces.iter().rev().find(|decl| decl.name == name)
    }
}

/// Top-level `interface` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDecl {
    /// Declared name.
    pub name: String,
    /// Property members in declaration order.
    pub members: Vec<Member>,
}

/// Property member of an interface or object type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Property name (quotes removed).
    pub name: String,
    /// Whether the member carries the `?` marker.
    pub optional: bool,
    /// Raw body of the preceding doc comment.
    pub doc: Option<String>,
    /// Declared type; members without an annotation are [`TypeNode::Opaque`].
    pub ty: TypeNode,
}

/// Primitive keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `object`
    Object,
    /// `any`, `unknown`, `never`, `void`, `undefined`, `bigint`, `symbol`.
    Any,
}

impl Keyword {
    /// Maps a keyword identifier to its variant.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            "null" => Some(Self::Null),
            "object" => Some(Self::Object),
            "any" | "unknown" | "never" | "void" | "undefined" | "bigint" | "symbol" => {
                Some(Self::Any)
            }
            _ => None,
        }
    }
}

/// Literal type value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// String literal.
    String(String),
    /// Numeric literal.
    Number(Number),
    /// `true` or `false`.
    Boolean(bool),
}

impl Literal {
    /// Returns the JSON Schema primitive type name of the literal.
    #[must_use]
    pub const fn primitive_type(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
        }
    }

    /// Returns the literal as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(text) => Value::String(text.clone()),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Boolean(flag) => Value::Bool(*flag),
        }
    }
}

/// Declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    /// Primitive keyword.
    Keyword(Keyword),
    /// Literal type.
    Literal(Literal),
    /// `T[]`.
    Array(Box<TypeNode>),
    /// `A | B | ...` with at least two members.
    Union(Vec<TypeNode>),
    /// Inline object type `{ ... }`.
    Object(Vec<Member>),
    /// Named type reference with optional type arguments.
    Reference {
        /// Dotted type name.
        name: String,
        /// Type arguments inside `<...>`.
        arguments: Vec<TypeNode>,
    },
    /// `[A, B]`.
    Tuple(Vec<TypeNode>),
    /// Accepted but uninterpreted type.
    Opaque,
}
