//! Synthesis passes.
//!
//! Each pass reads the shared [`SynthContext`] and produces IR members for
//! one class (or one supporting declaration). Passes never write to the
//! registry, so they can run on different classes concurrently.
pub mod ctor;
pub mod equality;
pub mod kinds;
pub mod visitor;

use heck::ToLowerCamelCase;

use crate::hints::HintTable;
use crate::ir::{Expr, TypeRef};
use crate::model::{ClassRegistry, Primitive, TypeShape};
use crate::settings::GeneratorSettings;

/// Read-only inputs shared by every pass.
#[derive(Clone, Copy)]
pub struct SynthContext<'a> {
    pub registry: &'a ClassRegistry,
    pub hints: &'a HintTable,
    pub settings: &'a GeneratorSettings,
    /// Name used in doc comments and as the visitor class prefix.
    pub schema_name: &'a str,
}

impl SynthContext<'_> {
    pub fn kind_enum(&self) -> &str {
        &self.settings.kind_enum_name
    }

    pub fn node_interface(&self) -> &str {
        &self.settings.node_interface_name
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TYPE MAPPING
// ————————————————————————————————————————————————————————————————————————————

pub fn primitive_type(primitive: Primitive) -> TypeRef {
    TypeRef::named(match primitive {
        Primitive::String => "string",
        Primitive::Integer => "int",
        Primitive::Number => "double",
        Primitive::Boolean => "bool",
        Primitive::Uri => "Uri",
        Primitive::DateTime => "DateTime",
        Primitive::Any => "object",
    })
}

/// Declared (interface) type of a property or element.
pub fn property_type(shape: &TypeShape) -> TypeRef {
    match shape {
        TypeShape::Scalar(p) => primitive_type(*p),
        TypeShape::Class(name) => TypeRef::named(name),
        TypeShape::Array(inner) => TypeRef::generic("IList", vec![property_type(inner)]),
        TypeShape::Map(inner) => TypeRef::generic("IDictionary", vec![TypeRef::named("string"), property_type(inner)]),
    }
}

static OPAQUE: TypeShape = TypeShape::Scalar(Primitive::Any);

/// Element shape of an array or map; opaque for anything else.
pub fn element_shape(shape: &TypeShape) -> &TypeShape {
    match shape {
        TypeShape::Array(inner) | TypeShape::Map(inner) => inner,
        _ => &OPAQUE,
    }
}

/// Concrete container type used when a fresh instance has to be built.
pub fn concrete_type(shape: &TypeShape) -> TypeRef {
    match shape {
        TypeShape::Array(inner) => TypeRef::generic("List", vec![property_type(inner)]),
        TypeShape::Map(inner) => TypeRef::generic("Dictionary", vec![TypeRef::named("string"), property_type(inner)]),
        other => property_type(other),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// NAMES
// ————————————————————————————————————————————————————————————————————————————

const RESERVED: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked", "class",
    "const", "continue", "decimal", "default", "delegate", "do", "double", "else", "enum", "event",
    "explicit", "extern", "false", "finally", "fixed", "float", "for", "foreach", "goto", "if",
    "implicit", "in", "int", "interface", "internal", "is", "lock", "long", "namespace", "new",
    "null", "object", "operator", "out", "override", "params", "private", "protected", "public",
    "readonly", "ref", "return", "sbyte", "sealed", "short", "sizeof", "stackalloc", "static",
    "string", "struct", "switch", "this", "throw", "true", "try", "typeof", "uint", "ulong",
    "unchecked", "unsafe", "ushort", "using", "virtual", "void", "volatile", "while",
];

/// Parameter / local name for a property.
pub fn parameter_name(property_name: &str) -> String {
    let name = property_name.to_lower_camel_case();
    if RESERVED.contains(&name.as_str()) { format!("@{name}") } else { name }
}

/// Per-nesting-level local names, so nested loops never shadow each other.
pub fn level(prefix: &str, depth: usize) -> String {
    format!("{prefix}_{depth}")
}

// ————————————————————————————————————————————————————————————————————————————
// EXPRESSION HELPERS
// ————————————————————————————————————————————————————————————————————————————

pub fn reference_equals(a: Expr, b: Expr) -> Expr {
    Expr::ident("ReferenceEquals").call(vec![a, b])
}

pub fn object_equals(a: Expr, b: Expr) -> Expr {
    Expr::ident("Object").member("Equals").call(vec![a, b])
}

pub fn argument_null(name: &str) -> Expr {
    Expr::new_object(
        TypeRef::named("ArgumentNullException"),
        vec![Expr::ident("nameof").call(vec![Expr::ident(name)])],
    )
}
