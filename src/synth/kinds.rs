//! Declarations every generated class depends on: the node-kind enum and
//! the node interface.
use crate::ir::{CompilationUnit, DocComment, Member, MethodDecl, PropertyBody, PropertyDecl, TypeDecl, TypeKind, TypeRef};
use crate::synth::SynthContext;
use crate::synth::ctor::DEEP_CLONE;

pub const NONE_KIND: &str = "None";

/// `enum <Kind> { None, <every class, sorted> }`
pub fn kind_enum(ctx: &SynthContext) -> CompilationUnit {
    let members = std::iter::once(NONE_KIND)
        .chain(ctx.registry.names().iter().map(String::as_str))
        .map(|name| Member::EnumValue { name: name.to_string(), doc: None })
        .collect();
    CompilationUnit {
        namespace: ctx.settings.namespace_name.clone(),
        name: ctx.kind_enum().to_string(),
        usings: Vec::new(),
        decl: TypeDecl {
            kind: TypeKind::Enum,
            name: ctx.kind_enum().to_string(),
            modifiers: vec!["public".into()],
            bases: Vec::new(),
            doc: Some(DocComment::summary(format!(
                "A set of values for all the types that implement <see cref=\"{}\" />.",
                ctx.node_interface()
            ))),
            members,
        },
    }
}

/// `interface <Node> { <Kind> <Kind> { get; } <Node> DeepClone(); }`
pub fn node_interface(ctx: &SynthContext) -> CompilationUnit {
    let kind = Member::Property(PropertyDecl {
        name: ctx.kind_enum().to_string(),
        ty: TypeRef::named(ctx.kind_enum()),
        modifiers: Vec::new(),
        body: PropertyBody::Abstract,
        doc: Some(DocComment::summary("Gets a value indicating what object type is represented by this instance.")),
    });
    let mut clone = MethodDecl::new(DEEP_CLONE, Some(TypeRef::named(ctx.node_interface())));
    clone.body = None;
    clone.doc = Some(DocComment::summary("Makes a deep copy of this instance."));

    CompilationUnit {
        namespace: ctx.settings.namespace_name.clone(),
        name: ctx.node_interface().to_string(),
        usings: Vec::new(),
        decl: TypeDecl {
            kind: TypeKind::Interface,
            name: ctx.node_interface().to_string(),
            modifiers: vec!["public".into()],
            bases: Vec::new(),
            doc: Some(DocComment::summary(format!(
                "An interface for all types generated from the {} schema.",
                ctx.schema_name
            ))),
            members: vec![kind, Member::Method(clone)],
        },
    }
}
