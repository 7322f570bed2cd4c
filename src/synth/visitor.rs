//! Rewriting visitor: one abstract traversal class per schema.
//!
//! Contract of the generated class:
//!
//! - `Visit(node)` delegates to `VisitActual(node)`; it is a separate virtual
//!   seam so overrides can act before/after dispatch.
//! - `VisitActual(node)` throws `ArgumentNullException` for null, otherwise
//!   switches on the node kind (one case per class, sorted by name) and falls
//!   back to returning the node unchanged.
//! - `VisitNullChecked(node)` returns null for null, otherwise `Visit(node)`
//!   cast back to the input type.
//! - `Visit<Class>(node)` replaces every schema-defined descendant held by a
//!   property with `VisitNullChecked(descendant)`, in place, at any depth of
//!   array/map nesting, and returns `node`.
use crate::ir::{CompilationUnit, DocComment, Expr, Member, MethodDecl, Param, Stmt, TypeDecl, TypeKind, TypeParam, TypeRef};
use crate::model::{ClassModel, TypeShape};
use crate::synth::{argument_null, level, SynthContext};

pub const NODE: &str = "node";
pub const VISIT: &str = "Visit";
pub const VISIT_ACTUAL: &str = "VisitActual";
pub const VISIT_NULL_CHECKED: &str = "VisitNullChecked";
const TYPE_PARAMETER: &str = "T";

pub fn visit_class_method_name(class_name: &str) -> String {
    format!("{VISIT}{class_name}")
}

pub fn generate_visitor(ctx: &SynthContext, class_name: &str) -> CompilationUnit {
    let mut members = vec![visit_method(ctx), visit_actual_method(ctx), visit_null_checked_method(ctx)];
    for name in ctx.registry.names() {
        if let Some(class) = ctx.registry.get(name) {
            members.push(visit_class_method(class));
        }
    }

    CompilationUnit {
        namespace: ctx.settings.namespace_name.clone(),
        name: class_name.to_string(),
        usings: vec!["System".into(), "System.Collections.Generic".into()],
        decl: TypeDecl {
            kind: TypeKind::Class,
            name: class_name.to_string(),
            modifiers: vec!["public".into(), "abstract".into()],
            bases: Vec::new(),
            doc: Some(DocComment::summary(format!(
                "Rewriting visitor for the {} object model.",
                ctx.schema_name
            ))),
            members,
        },
    }
}

fn visit_method(ctx: &SynthContext) -> Member {
    let mut method = MethodDecl::new(VISIT, Some(TypeRef::named("object")));
    method.modifiers = vec!["public".into(), "virtual".into()];
    method.params = vec![Param::new(NODE, TypeRef::named(ctx.node_interface()))];
    method.body = Some(vec![Stmt::ret(
        Expr::This.member(VISIT_ACTUAL).call(vec![Expr::ident(NODE)]),
    )]);
    method.doc = Some(
        DocComment::summary(format!("Starts a rewriting visit of a node in the {} object model.", ctx.schema_name))
            .param(NODE, "The node to rewrite.")
            .returns("A rewritten instance of the node."),
    );
    Member::Method(method)
}

fn visit_actual_method(ctx: &SynthContext) -> Member {
    let cases = ctx
        .registry
        .names()
        .iter()
        .map(|name| {
            let label = Expr::ident(ctx.kind_enum()).member(name);
            let call = Expr::ident(visit_class_method_name(name))
                .call(vec![Expr::ident(NODE).cast(TypeRef::named(name))]);
            (label, vec![Stmt::ret(call)])
        })
        .collect();

    let mut method = MethodDecl::new(VISIT_ACTUAL, Some(TypeRef::named("object")));
    method.modifiers = vec!["public".into(), "virtual".into()];
    method.params = vec![Param::new(NODE, TypeRef::named(ctx.node_interface()))];
    method.body = Some(vec![
        Stmt::if_then(
            Expr::ident(NODE).is_null(),
            vec![Stmt::Throw(argument_null(NODE))],
        ),
        Stmt::Switch {
            subject: Expr::ident(NODE).member(ctx.kind_enum()),
            cases,
            default: vec![Stmt::ret(Expr::ident(NODE))],
        },
    ]);
    method.doc = Some(
        DocComment::summary(format!("Visits and rewrites a node in the {} object model.", ctx.schema_name))
            .param(NODE, "The node to rewrite.")
            .returns("A rewritten instance of the node.")
            .exception("ArgumentNullException", "The node is null."),
    );
    Member::Method(method)
}

fn visit_null_checked_method(ctx: &SynthContext) -> Member {
    let t = TypeRef::named(TYPE_PARAMETER);
    let mut method = MethodDecl::new(VISIT_NULL_CHECKED, Some(t.clone()));
    method.modifiers = vec!["protected".into()];
    method.type_params = vec![TypeParam {
        name: TYPE_PARAMETER.into(),
        constraints: vec!["class".into(), ctx.node_interface().to_string()],
    }];
    method.params = vec![Param::new(NODE, t.clone())];
    method.body = Some(vec![
        Stmt::if_then(Expr::ident(NODE).is_null(), vec![Stmt::ret(Expr::Null)]),
        Stmt::ret(Expr::ident(VISIT).call(vec![Expr::ident(NODE)]).cast(t)),
    ]);
    Member::Method(method)
}

fn visit_class_method(class: &ClassModel) -> Member {
    let class_type = TypeRef::named(&class.name);
    let mut method = MethodDecl::new(visit_class_method_name(&class.name), Some(class_type.clone()));
    method.modifiers = vec!["public".into(), "virtual".into()];
    method.params = vec![Param::new(NODE, class_type)];

    let statements: Vec<Stmt> = class
        .visitable_properties()
        .flat_map(|p| rewrite_statements(Expr::ident(NODE).member(&p.name), &p.shape, 0))
        .collect();

    let mut body = Vec::new();
    if !statements.is_empty() {
        body.push(Stmt::if_then(Expr::ident(NODE).is_not_null(), statements));
    }
    body.push(Stmt::ret(Expr::ident(NODE)));
    method.body = Some(body);
    Member::Method(method)
}

/// Statements replacing every schema-defined value reachable from `target`
/// (an assignable expression of type `shape`) with its visited value.
///
/// Containers are updated in place: lists keep their instance and order,
/// maps keep their instance and keys. Shapes with no schema-defined leaf
/// produce nothing.
pub fn rewrite_statements(target: Expr, shape: &TypeShape, depth: usize) -> Vec<Stmt> {
    match shape {
        TypeShape::Class(_) => {
            let visited = Expr::ident(VISIT_NULL_CHECKED).call(vec![target.clone()]);
            vec![Stmt::Assign(target, visited)]
        }
        TypeShape::Array(inner) if inner.contains_class() => {
            let index = level("index", depth);
            let element = target.clone().index(Expr::ident(&index));
            let body = element_statements(element, inner, depth);
            vec![Stmt::if_then(
                target.clone().is_not_null(),
                vec![Stmt::For { index, bound: target.member("Count"), body }],
            )]
        }
        TypeShape::Map(inner) if inner.contains_class() => {
            let key = level("key", depth);
            let element = target.clone().index(Expr::ident(&key));
            let body = element_statements(element, inner, depth);
            // Snapshot the keys: assigning through the indexer while
            // enumerating `Keys` invalidates the enumerator.
            let keys = Expr::new_object(
                TypeRef::generic("List", vec![TypeRef::named("string")]),
                vec![target.clone().member("Keys")],
            );
            vec![Stmt::if_then(
                target.is_not_null(),
                vec![Stmt::ForEach { var: key, ty: Some(TypeRef::named("string")), iterable: keys, body }],
            )]
        }
        _ => Vec::new(),
    }
}

/// Body of the loop over one container level. Class elements are assigned
/// through the indexer; nested containers are aliased to a local and
/// rewritten in place.
fn element_statements(element: Expr, inner: &TypeShape, depth: usize) -> Vec<Stmt> {
    match inner {
        TypeShape::Class(_) => rewrite_statements(element, inner, depth + 1),
        _ => {
            let value = level("value", depth);
            let mut body = vec![Stmt::local(&value, element)];
            body.extend(rewrite_statements(Expr::ident(value), inner, depth + 1));
            body
        }
    }
}
