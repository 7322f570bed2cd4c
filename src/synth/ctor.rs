//! Constructors, accessors, kind discriminator and deep copy.
use crate::ir::{
    ConstructorDecl, DocComment, Expr, Member, MethodDecl, Param, PropertyBody, PropertyDecl, Stmt, TypeRef,
};
use crate::model::{ClassModel, TypeShape};
use crate::render::doc::escape_xml;
use crate::synth::{argument_null, concrete_type, level, parameter_name, property_type, SynthContext};

const OTHER: &str = "other";
const INIT: &str = "Init";
pub const DEEP_CLONE: &str = "DeepClone";
const DEEP_CLONE_CORE: &str = "DeepCloneCore";

pub fn ctor_members(ctx: &SynthContext, class: &ClassModel) -> Vec<Member> {
    let mut members = vec![kind_property(ctx, class)];
    members.extend(class.properties.iter().map(|p| {
        Member::Property(PropertyDecl {
            name: p.name.clone(),
            ty: property_type(&p.shape),
            modifiers: p.modifiers.clone(),
            body: PropertyBody::Auto,
            doc: p.description.as_deref().map(|d| DocComment::summary(escape_xml(d))),
        })
    }));
    members.push(default_constructor(class));
    members.push(full_constructor(class));
    members.push(copy_constructor(class));
    members.extend(deep_clone_methods(ctx, class));
    members.push(init_method(class));
    members
}

fn see(cref: &str) -> String {
    format!("<see cref=\"{cref}\" />")
}

fn kind_property(ctx: &SynthContext, class: &ClassModel) -> Member {
    Member::Property(PropertyDecl {
        name: ctx.kind_enum().to_string(),
        ty: TypeRef::named(ctx.kind_enum()),
        modifiers: vec!["public".into()],
        body: PropertyBody::Getter(Expr::ident(ctx.kind_enum()).member(&class.name)),
        doc: Some(DocComment::summary(format!(
            "Gets a value indicating the type of object implementing {}.",
            see(ctx.node_interface())
        ))),
    })
}

fn default_constructor(class: &ClassModel) -> Member {
    Member::Constructor(ConstructorDecl {
        modifiers: vec!["public".into()],
        params: Vec::new(),
        body: Vec::new(),
        doc: Some(DocComment::summary(format!("Initializes a new instance of the {} class.", see(&class.name)))),
    })
}

fn init_call(args: Vec<Expr>) -> Stmt {
    Stmt::Expr(Expr::ident(INIT).call(args))
}

fn full_constructor(class: &ClassModel) -> Member {
    let mut doc = DocComment::summary(format!(
        "Initializes a new instance of the {} class from the supplied values.",
        see(&class.name)
    ));
    let mut params = Vec::new();
    for p in &class.properties {
        let name = parameter_name(&p.name);
        doc = doc.param(
            name.trim_start_matches('@'),
            format!("An initialization value for the {} property.", see(&format!("P:{}", p.name))),
        );
        params.push(Param::new(name, property_type(&p.shape)));
    }
    let args = params.iter().map(|p| Expr::ident(&p.name)).collect();
    Member::Constructor(ConstructorDecl {
        modifiers: vec!["public".into()],
        params,
        body: vec![init_call(args)],
        doc: Some(doc),
    })
}

fn copy_constructor(class: &ClassModel) -> Member {
    let other = Expr::ident(OTHER);
    let args = class.properties.iter().map(|p| other.clone().member(&p.name)).collect();
    Member::Constructor(ConstructorDecl {
        modifiers: vec!["public".into()],
        params: vec![Param::new(OTHER, TypeRef::named(&class.name))],
        body: vec![
            Stmt::if_then(other.is_null(), vec![Stmt::Throw(argument_null(OTHER))]),
            init_call(args),
        ],
        doc: Some(
            DocComment::summary(format!(
                "Initializes a new instance of the {} class from the specified instance.",
                see(&class.name)
            ))
            .param(OTHER, "The instance from which the new instance is to be initialized.")
            .exception("ArgumentNullException", format!("Thrown if <paramref name=\"{OTHER}\" /> is null.")),
        ),
    })
}

fn deep_clone_methods(ctx: &SynthContext, class: &ClassModel) -> [Member; 3] {
    let node = TypeRef::named(ctx.node_interface());
    let core = Expr::ident(DEEP_CLONE_CORE).call(Vec::new());

    let mut explicit = MethodDecl::new(format!("{}.{DEEP_CLONE}", ctx.node_interface()), Some(node.clone()));
    explicit.body = Some(vec![Stmt::ret(core.clone())]);

    let mut typed = MethodDecl::new(DEEP_CLONE, Some(TypeRef::named(&class.name)));
    typed.modifiers = vec!["public".into()];
    typed.body = Some(vec![Stmt::ret(core.cast(TypeRef::named(&class.name)))]);
    typed.doc = Some(DocComment::summary("Creates a deep copy of this instance."));

    let mut inner = MethodDecl::new(DEEP_CLONE_CORE, Some(node));
    inner.modifiers = vec!["private".into()];
    inner.body = Some(vec![Stmt::ret(Expr::new_object(TypeRef::named(&class.name), vec![Expr::This]))]);

    [Member::Method(explicit), Member::Method(typed), Member::Method(inner)]
}

fn init_method(class: &ClassModel) -> Member {
    let mut method = MethodDecl::new(INIT, None);
    method.modifiers = vec!["private".into()];
    let mut body = Vec::new();
    for p in &class.properties {
        let name = parameter_name(&p.name);
        let target = Expr::ident(&p.name);
        body.extend(copy_statements(Expr::ident(&name), &p.shape, 0, false, &|value: Expr| {
            Stmt::Assign(target.clone(), value)
        }));
        method.params.push(Param::new(name, property_type(&p.shape)));
    }
    method.body = Some(body);
    Member::Method(method)
}

/// Statements handing a deep copy of `source` to `sink`.
///
/// Scalars are handed over as is. Class instances go through their copy
/// constructor. Containers are rebuilt into fresh lists and dictionaries,
/// level by level. With `keep_null`, a null source is handed over as null
/// (container elements); otherwise nothing is emitted for it.
pub fn copy_statements(
    source: Expr,
    shape: &TypeShape,
    depth: usize,
    keep_null: bool,
    sink: &dyn Fn(Expr) -> Stmt,
) -> Vec<Stmt> {
    let copied = match shape {
        TypeShape::Scalar(_) => return vec![sink(source)],
        TypeShape::Class(name) => {
            vec![sink(Expr::new_object(TypeRef::named(name), vec![source.clone()]))]
        }
        TypeShape::Array(inner) => {
            let destination = Expr::ident(level("destination", depth));
            let value = level("value", depth);
            let add = |e: Expr| Stmt::Expr(destination.clone().member("Add").call(vec![e]));
            let body = copy_statements(Expr::ident(&value), inner, depth + 1, true, &add);
            vec![
                Stmt::local(level("destination", depth), Expr::new_object(concrete_type(shape), Vec::new())),
                Stmt::ForEach { var: value, ty: None, iterable: source.clone(), body },
                sink(destination),
            ]
        }
        TypeShape::Map(inner) => {
            let destination = Expr::ident(level("destination", depth));
            let value = level("value", depth);
            let key = Expr::ident(&value).member("Key");
            let put = |e: Expr| Stmt::Assign(destination.clone().index(key.clone()), e);
            let body = copy_statements(Expr::ident(&value).member("Value"), inner, depth + 1, true, &put);
            vec![
                Stmt::local(level("destination", depth), Expr::new_object(concrete_type(shape), Vec::new())),
                Stmt::ForEach { var: value, ty: None, iterable: source.clone(), body },
                sink(destination),
            ]
        }
    };

    if keep_null {
        vec![Stmt::If { cond: source.is_null(), then: vec![sink(Expr::Null)], otherwise: copied }]
    } else {
        vec![Stmt::if_then(source.is_not_null(), copied)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::HintTable;
    use crate::model::{ClassRegistry, Primitive};
    use crate::schema::JsonSchema;
    use crate::settings::GeneratorSettings;

    fn assign(name: &str) -> impl Fn(Expr) -> Stmt + '_ {
        move |e| Stmt::Assign(Expr::ident(name), e)
    }

    #[test]
    fn member_order() {
        let schema = JsonSchema::from_json_str(r##"{
            "type": "object",
            "properties": {
                "child": { "$ref": "#/definitions/child", "description": "A <child>." },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "definitions": { "child": { "type": "object", "properties": { "name": { "type": "string" } } } }
        }"##).unwrap();
        let hints = HintTable::new();
        let reg = ClassRegistry::build(&schema, &hints, "Root").unwrap();
        let settings = GeneratorSettings::default();
        let ctx = SynthContext { registry: &reg, hints: &hints, settings: &settings, schema_name: "Root" };
        let members = ctor_members(&ctx, reg.get("Root").unwrap());
        let names: Vec<&str> = members.iter().map(Member::name).collect();
        assert_eq!(
            names,
            ["SNodeKind", "Child", "Tags", ".ctor", ".ctor", ".ctor", "ISNode.DeepClone", "DeepClone", "DeepCloneCore", "Init"]
        );
        let Member::Property(child) = &members[1] else { panic!() };
        assert_eq!(child.doc.as_ref().unwrap().summary, "A &lt;child&gt;.");
        let Member::Property(kind) = &members[0] else { panic!() };
        assert_eq!(kind.body, PropertyBody::Getter(Expr::ident("SNodeKind").member("Root")));
    }

    #[test]
    fn copy_constructor_rejects_null() {
        let class = ClassModel {
            schema_id: "Leaf".into(),
            name: "Leaf".into(),
            description: None,
            base_types: Vec::new(),
            properties: Vec::new(),
        };
        let Member::Constructor(ctor) = copy_constructor(&class) else { panic!() };
        assert_eq!(
            ctor.body[0],
            Stmt::if_then(Expr::ident("other").is_null(), vec![Stmt::Throw(argument_null("other"))])
        );
    }

    #[test]
    fn scalars_are_assigned() {
        let stmts = copy_statements(Expr::ident("name"), &TypeShape::Scalar(Primitive::String), 0, false, &assign("Name"));
        assert_eq!(stmts, [Stmt::Assign(Expr::ident("Name"), Expr::ident("name"))]);
    }

    #[test]
    fn class_values_use_copy_constructor() {
        let stmts = copy_statements(Expr::ident("child"), &TypeShape::Class("Child".into()), 0, false, &assign("Child"));
        assert_eq!(
            stmts,
            [Stmt::if_then(
                Expr::ident("child").is_not_null(),
                vec![Stmt::Assign(
                    Expr::ident("Child"),
                    Expr::new_object(TypeRef::named("Child"), vec![Expr::ident("child")]),
                )],
            )]
        );
    }

    #[test]
    fn arrays_of_classes_keep_null_elements() {
        let shape = TypeShape::array_of(TypeShape::Class("Child".into()));
        let stmts = copy_statements(Expr::ident("children"), &shape, 0, false, &assign("Children"));
        let Stmt::If { then, .. } = &stmts[0] else { panic!() };
        assert_eq!(
            then[0],
            Stmt::local("destination_0", Expr::new_object(TypeRef::generic("List", vec![TypeRef::named("Child")]), vec![]))
        );
        let Stmt::ForEach { var, body, .. } = &then[1] else { panic!() };
        assert_eq!(var, "value_0");
        let add = |e| Stmt::Expr(Expr::ident("destination_0").member("Add").call(vec![e]));
        assert_eq!(
            body,
            &vec![Stmt::If {
                cond: Expr::ident("value_0").is_null(),
                then: vec![add(Expr::Null)],
                otherwise: vec![add(Expr::new_object(TypeRef::named("Child"), vec![Expr::ident("value_0")]))],
            }]
        );
        assert_eq!(then[2], Stmt::Assign(Expr::ident("Children"), Expr::ident("destination_0")));
    }

    #[test]
    fn nested_maps_rebuild_each_level() {
        let shape = TypeShape::map_of(TypeShape::array_of(TypeShape::Scalar(Primitive::Integer)));
        let stmts = copy_statements(Expr::ident("m"), &shape, 0, false, &assign("M"));
        let Stmt::If { then, .. } = &stmts[0] else { panic!() };
        let Stmt::ForEach { body, .. } = &then[1] else { panic!() };
        let Stmt::If { cond, otherwise, .. } = &body[0] else { panic!() };
        assert_eq!(cond, &Expr::ident("value_0").member("Value").is_null());
        assert_eq!(
            otherwise[0],
            Stmt::local("destination_1", Expr::new_object(TypeRef::generic("List", vec![TypeRef::named("int")]), vec![]))
        );
        assert_eq!(
            *otherwise.last().unwrap(),
            Stmt::Assign(
                Expr::ident("destination_0").index(Expr::ident("value_0").member("Key")),
                Expr::ident("destination_1"),
            )
        );
    }
}
