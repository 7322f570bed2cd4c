//! Value equality, hashing and ordering members.
//!
//! All three walks follow the same `(Comparison, TypeShape)` pair of each
//! property, so two values that compare equal always hash equal.
use crate::ir::{BinOp, Expr, Member, MethodDecl, Param, Stmt, TypeRef};
use crate::model::{ClassModel, Comparison, Primitive, TypeShape};
use crate::synth::{element_shape, level, object_equals, reference_equals};

const OBJ: &str = "obj";
const OTHER: &str = "other";
const LEFT: &str = "left";
const RIGHT: &str = "right";
pub const HASH_SEED: i64 = 17;
pub const HASH_FACTOR: i64 = 31;
const RESULT: &str = "result";
const COMPARE_RESULT: &str = "compareResult";

pub fn equality_bases(class_name: &str) -> Vec<TypeRef> {
    vec![
        TypeRef::generic("IEquatable", vec![TypeRef::named(class_name)]),
        TypeRef::generic("IComparable", vec![TypeRef::named(class_name)]),
    ]
}

pub fn equality_members(class: &ClassModel) -> Vec<Member> {
    vec![
        equals_object(class),
        equals_typed(class),
        get_hash_code(class),
        compare_to(class),
        operator_equal(class),
        operator_not_equal(class),
    ]
}

fn int() -> TypeRef {
    TypeRef::named("int")
}

fn bool_type() -> TypeRef {
    TypeRef::named("bool")
}

fn return_false() -> Stmt {
    Stmt::ret(Expr::Bool(false))
}

fn comparer_instance(comparer: &str) -> Expr {
    Expr::ident(comparer).member("Instance")
}

fn is_container(comparison: &Comparison) -> bool {
    matches!(comparison, Comparison::Sequence(_) | Comparison::Unordered(_))
}

/// Element expressions of one loop level. Nested containers are aliased to
/// locals so deeper levels index a name instead of a growing chain.
fn element_pair(
    body: &mut Vec<Stmt>,
    left: Expr,
    right: Expr,
    inner: &Comparison,
    depth: usize,
) -> (Expr, Expr) {
    if !is_container(inner) {
        return (left, right);
    }
    let (left_name, right_name) = (level(LEFT, depth), level(RIGHT, depth));
    body.push(Stmt::local(&left_name, left));
    body.push(Stmt::local(&right_name, right));
    (Expr::ident(left_name), Expr::ident(right_name))
}

// ————————————————————————————————————————————————————————————————————————————
// EQUALITY
// ————————————————————————————————————————————————————————————————————————————

fn equals_object(class: &ClassModel) -> Member {
    let mut method = MethodDecl::new("Equals", Some(bool_type()));
    method.modifiers = vec!["public".into(), "override".into()];
    method.params = vec![Param::new(OBJ, TypeRef::named("object"))];
    method.body = Some(vec![Stmt::ret(
        Expr::ident("Equals").call(vec![Expr::As(Box::new(Expr::ident(OBJ)), TypeRef::named(&class.name))]),
    )]);
    Member::Method(method)
}

fn equals_typed(class: &ClassModel) -> Member {
    let other = Expr::ident(OTHER);
    let mut body = vec![
        Stmt::if_then(reference_equals(other.clone(), Expr::Null), vec![return_false()]),
        Stmt::if_then(reference_equals(Expr::This, other.clone()), vec![Stmt::ret(Expr::Bool(true))]),
    ];
    for p in &class.properties {
        body.extend(equal_statements(
            Expr::ident(&p.name),
            other.clone().member(&p.name),
            &p.comparison,
            &p.shape,
            0,
        ));
    }
    body.push(Stmt::ret(Expr::Bool(true)));

    let mut method = MethodDecl::new("Equals", Some(bool_type()));
    method.modifiers = vec!["public".into()];
    method.params = vec![Param::new(OTHER, TypeRef::named(&class.name))];
    method.body = Some(body);
    Member::Method(method)
}

/// Statements returning `false` as soon as `left` and `right` differ.
pub fn equal_statements(left: Expr, right: Expr, comparison: &Comparison, shape: &TypeShape, depth: usize) -> Vec<Stmt> {
    match comparison {
        Comparison::Value => {
            let differs = match shape {
                TypeShape::Scalar(Primitive::Any) => object_equals(left, right).negate(),
                TypeShape::Scalar(Primitive::Uri) => uri_equals(left, right).negate(),
                _ => left.not_equal_to(right),
            };
            vec![Stmt::if_then(differs, vec![return_false()])]
        }
        Comparison::Structural(_) => {
            vec![Stmt::if_then(object_equals(left, right).negate(), vec![return_false()])]
        }
        Comparison::Custom(comparer) => {
            let same = comparer_instance(comparer).member("Equals").call(vec![left, right]);
            vec![Stmt::if_then(same.negate(), vec![return_false()])]
        }
        Comparison::Sequence(inner) => {
            let index = level("index", depth);
            let mut body = Vec::new();
            let (l, r) = element_pair(
                &mut body,
                left.clone().index(Expr::ident(&index)),
                right.clone().index(Expr::ident(&index)),
                inner,
                depth,
            );
            body.extend(equal_statements(l, r, inner, element_shape(shape), depth + 1));
            vec![Stmt::if_then(
                reference_equals(left.clone(), right.clone()).negate(),
                vec![
                    Stmt::if_then(left.clone().is_null().or(right.clone().is_null()), vec![return_false()]),
                    Stmt::if_then(
                        left.clone().member("Count").not_equal_to(right.member("Count")),
                        vec![return_false()],
                    ),
                    Stmt::For { index, bound: left.member("Count"), body },
                ],
            )]
        }
        Comparison::Unordered(inner) => {
            let entry = level("entry", depth);
            let found = level("other", depth);
            let lookup = right
                .clone()
                .member("TryGetValue")
                .call(vec![Expr::ident(&entry).member("Key"), Expr::OutVar(found.clone())]);
            let mut body = vec![Stmt::if_then(lookup.negate(), vec![return_false()])];
            body.extend(equal_statements(
                Expr::ident(&entry).member("Value"),
                Expr::ident(found),
                inner,
                element_shape(shape),
                depth + 1,
            ));
            vec![Stmt::if_then(
                reference_equals(left.clone(), right.clone()).negate(),
                vec![
                    Stmt::if_then(left.clone().is_null().or(right.clone().is_null()), vec![return_false()]),
                    Stmt::if_then(
                        left.clone().member("Count").not_equal_to(right.member("Count")),
                        vec![return_false()],
                    ),
                    Stmt::ForEach { var: entry, ty: None, iterable: left, body },
                ],
            )]
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// HASHING
// ————————————————————————————————————————————————————————————————————————————

fn get_hash_code(class: &ClassModel) -> Member {
    let folds: Vec<Stmt> = class
        .properties
        .iter()
        .flat_map(|p| hash_statements(RESULT, Expr::ident(&p.name), &p.comparison, &p.shape, 0))
        .collect();

    let mut body = vec![Stmt::Local { name: RESULT.into(), ty: Some(int()), init: Expr::Int(HASH_SEED) }];
    if !folds.is_empty() {
        body.push(Stmt::Unchecked(folds));
    }
    body.push(Stmt::ret(Expr::ident(RESULT)));

    let mut method = MethodDecl::new("GetHashCode", Some(int()));
    method.modifiers = vec!["public".into(), "override".into()];
    method.body = Some(body);
    Member::Method(method)
}

fn fold(acc: &str, hash: Expr) -> Stmt {
    let scaled = Expr::ident(acc).binary(BinOp::Mul, Expr::Int(HASH_FACTOR));
    Stmt::Assign(Expr::ident(acc), scaled.binary(BinOp::Add, hash))
}

fn hash_code(value: Expr) -> Expr {
    value.member("GetHashCode").call(Vec::new())
}

/// Statements folding the hash of `value` into the `acc` local.
///
/// Null references fold nothing. Sequences fold every element in order;
/// maps fold the sum of their per-entry hashes, which does not depend on
/// enumeration order.
pub fn hash_statements(acc: &str, value: Expr, comparison: &Comparison, shape: &TypeShape, depth: usize) -> Vec<Stmt> {
    match comparison {
        Comparison::Value if !shape.is_reference_type() => vec![fold(acc, hash_code(value))],
        Comparison::Value if *shape == TypeShape::Scalar(Primitive::Uri) => {
            let text = value.clone().member("OriginalString");
            vec![Stmt::if_then(value.is_not_null(), vec![fold(acc, hash_code(text))])]
        }
        Comparison::Value | Comparison::Structural(_) => {
            vec![Stmt::if_then(value.clone().is_not_null(), vec![fold(acc, hash_code(value))])]
        }
        Comparison::Custom(comparer) => {
            let hash = comparer_instance(comparer).member("GetHashCode").call(vec![value.clone()]);
            vec![Stmt::if_then(value.is_not_null(), vec![fold(acc, hash)])]
        }
        Comparison::Sequence(inner) => {
            let item = level("item", depth);
            let body = hash_statements(acc, Expr::ident(&item), inner, element_shape(shape), depth + 1);
            vec![Stmt::if_then(
                value.clone().is_not_null(),
                vec![Stmt::ForEach { var: item, ty: None, iterable: value, body }],
            )]
        }
        Comparison::Unordered(inner) => {
            let sum = level("sum", depth);
            let entry = level("entry", depth);
            let entry_hash = level("entry_hash", depth);
            let mut body = vec![Stmt::Local {
                name: entry_hash.clone(),
                ty: Some(int()),
                init: hash_code(Expr::ident(&entry).member("Key")),
            }];
            body.extend(hash_statements(
                &entry_hash,
                Expr::ident(&entry).member("Value"),
                inner,
                element_shape(shape),
                depth + 1,
            ));
            body.push(Stmt::Assign(
                Expr::ident(&sum),
                Expr::ident(&sum).binary(BinOp::Add, Expr::ident(entry_hash)),
            ));
            vec![Stmt::if_then(
                value.clone().is_not_null(),
                vec![
                    Stmt::Local { name: sum.clone(), ty: Some(int()), init: Expr::Int(0) },
                    Stmt::ForEach { var: entry, ty: None, iterable: value, body },
                    fold(acc, Expr::ident(sum)),
                ],
            )]
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ORDERING
// ————————————————————————————————————————————————————————————————————————————

fn compare_to(class: &ClassModel) -> Member {
    let other = Expr::ident(OTHER);
    let mut body = vec![
        Stmt::if_then(reference_equals(other.clone(), Expr::Null), vec![Stmt::ret(Expr::Int(1))]),
        Stmt::if_then(reference_equals(Expr::This, other.clone()), vec![Stmt::ret(Expr::Int(0))]),
        Stmt::Local { name: COMPARE_RESULT.into(), ty: Some(int()), init: Expr::Int(0) },
    ];
    for p in &class.properties {
        body.extend(compare_statements(
            Expr::ident(&p.name),
            other.clone().member(&p.name),
            &p.comparison,
            &p.shape,
            0,
        ));
    }
    body.push(Stmt::ret(Expr::ident(COMPARE_RESULT)));

    let mut method = MethodDecl::new("CompareTo", Some(int()));
    method.modifiers = vec!["public".into()];
    method.params = vec![Param::new(OTHER, TypeRef::named(&class.name))];
    method.body = Some(body);
    Member::Method(method)
}

fn set_and_check(compare: Expr) -> [Stmt; 2] {
    [
        Stmt::Assign(Expr::ident(COMPARE_RESULT), compare),
        Stmt::if_then(
            Expr::ident(COMPARE_RESULT).not_equal_to(Expr::Int(0)),
            vec![Stmt::ret(Expr::ident(COMPARE_RESULT))],
        ),
    ]
}

fn ordinal(left: Expr, right: Expr) -> Expr {
    Expr::ident("string").member("CompareOrdinal").call(vec![left, right])
}

/// `value == null ? null : <text of value>`
fn text_of(value: Expr, text: impl FnOnce(Expr) -> Expr) -> Expr {
    Expr::conditional(value.clone().is_null(), Expr::Null, text(value))
}

fn uri_text(value: Expr) -> Expr {
    text_of(value, |v| v.member("OriginalString"))
}

/// Ordinal comparison of the original text, so URIs differing only in
/// their fragment are not equal.
fn uri_equals(left: Expr, right: Expr) -> Expr {
    Expr::ident("string").member("Equals").call(vec![
        uri_text(left),
        uri_text(right),
        Expr::ident("StringComparison").member("Ordinal"),
    ])
}

fn scalar_comparison(left: Expr, right: Expr, primitive: Primitive) -> Expr {
    match primitive {
        Primitive::String => ordinal(left, right),
        Primitive::Uri => ordinal(uri_text(left), uri_text(right)),
        Primitive::Any => ordinal(
            text_of(left, |v| v.member("ToString").call(Vec::new())),
            text_of(right, |v| v.member("ToString").call(Vec::new())),
        ),
        Primitive::Integer | Primitive::Number | Primitive::Boolean | Primitive::DateTime => {
            left.member("CompareTo").call(vec![right])
        }
    }
}

fn null_ordering(left: &Expr, right: &Expr) -> [Stmt; 2] {
    [
        Stmt::if_then(left.clone().is_null(), vec![Stmt::ret(Expr::Int(-1))]),
        Stmt::if_then(right.clone().is_null(), vec![Stmt::ret(Expr::Int(1))]),
    ]
}

/// Statements returning the first non-zero ordering between `left` and
/// `right`. Null sorts first.
pub fn compare_statements(left: Expr, right: Expr, comparison: &Comparison, shape: &TypeShape, depth: usize) -> Vec<Stmt> {
    match comparison {
        // Named comparers only define equality; order by shape.
        Comparison::Custom(_) => compare_statements(left, right, &shape.comparison(), shape, depth),
        Comparison::Value => {
            let primitive = match shape {
                TypeShape::Scalar(p) => *p,
                _ => Primitive::Any,
            };
            set_and_check(scalar_comparison(left, right, primitive)).to_vec()
        }
        Comparison::Structural(class) => {
            let comparer = Expr::ty(TypeRef::generic("Comparer", vec![TypeRef::named(class)])).member("Default");
            set_and_check(comparer.member("Compare").call(vec![left, right])).to_vec()
        }
        Comparison::Sequence(inner) => {
            let index = level("index", depth);
            let mut body = Vec::new();
            let (l, r) = element_pair(
                &mut body,
                left.clone().index(Expr::ident(&index)),
                right.clone().index(Expr::ident(&index)),
                inner,
                depth,
            );
            body.extend(compare_statements(l, r, inner, element_shape(shape), depth + 1));

            let mut guarded = null_ordering(&left, &right).to_vec();
            guarded.extend(set_and_check(
                left.clone().member("Count").member("CompareTo").call(vec![right.clone().member("Count")]),
            ));
            guarded.push(Stmt::For { index, bound: left.clone().member("Count"), body });
            vec![Stmt::if_then(reference_equals(left, right).negate(), guarded)]
        }
        Comparison::Unordered(inner) => {
            let left_keys = level("left_keys", depth);
            let right_keys = level("right_keys", depth);
            let index = level("index", depth);
            let key_list = |map: &Expr| {
                Expr::new_object(
                    TypeRef::generic("List", vec![TypeRef::named("string")]),
                    vec![map.clone().member("Keys")],
                )
            };
            let sort = |keys: &str| {
                Stmt::Expr(
                    Expr::ident(keys)
                        .member("Sort")
                        .call(vec![Expr::ident("StringComparer").member("Ordinal")]),
                )
            };
            let left_key = Expr::ident(&left_keys).index(Expr::ident(&index));
            let right_key = Expr::ident(&right_keys).index(Expr::ident(&index));

            let key_body = set_and_check(ordinal(left_key.clone(), right_key.clone())).to_vec();
            let mut value_body = Vec::new();
            let (l, r) = element_pair(
                &mut value_body,
                left.clone().index(left_key),
                right.clone().index(right_key),
                inner,
                depth,
            );
            value_body.extend(compare_statements(l, r, inner, element_shape(shape), depth + 1));

            let bound = Expr::ident(&left_keys).member("Count");
            let mut guarded = null_ordering(&left, &right).to_vec();
            guarded.extend(set_and_check(
                left.clone().member("Count").member("CompareTo").call(vec![right.clone().member("Count")]),
            ));
            guarded.extend([
                Stmt::local(&left_keys, key_list(&left)),
                sort(&left_keys),
                Stmt::local(&right_keys, key_list(&right)),
                sort(&right_keys),
                Stmt::For { index: index.clone(), bound: bound.clone(), body: key_body },
                Stmt::For { index, bound, body: value_body },
            ]);
            vec![Stmt::if_then(reference_equals(left, right).negate(), guarded)]
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// OPERATORS
// ————————————————————————————————————————————————————————————————————————————

fn operator(class: &ClassModel, symbol: &str, body: Vec<Stmt>) -> Member {
    let mut method = MethodDecl::new(format!("operator {symbol}"), Some(bool_type()));
    method.modifiers = vec!["public".into(), "static".into()];
    method.params = vec![
        Param::new(LEFT, TypeRef::named(&class.name)),
        Param::new(RIGHT, TypeRef::named(&class.name)),
    ];
    method.body = Some(body);
    Member::Method(method)
}

fn operator_equal(class: &ClassModel) -> Member {
    operator(
        class,
        "==",
        vec![
            Stmt::if_then(
                reference_equals(Expr::ident(LEFT), Expr::Null),
                vec![Stmt::ret(reference_equals(Expr::ident(RIGHT), Expr::Null))],
            ),
            Stmt::ret(Expr::ident(LEFT).member("Equals").call(vec![Expr::ident(RIGHT)])),
        ],
    )
}

fn operator_not_equal(class: &ClassModel) -> Member {
    operator(
        class,
        "!=",
        vec![Stmt::ret(Expr::ident(LEFT).equal_to(Expr::ident(RIGHT)).negate())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::{ComparerHint, Hint, HintTable};
    use crate::model::ClassRegistry;
    use crate::schema::JsonSchema;

    fn root() -> ClassModel {
        let schema = JsonSchema::from_json_str(r##"{
            "type": "object",
            "properties": {
                "child": { "$ref": "#/definitions/child" },
                "tags": { "type": "array", "items": { "type": "string" } },
                "count": { "type": "integer" },
                "props": { "type": "object", "additionalProperties": { "type": "string" } }
            },
            "definitions": {
                "child": { "type": "object", "properties": { "name": { "type": "string" } } }
            }
        }"##).unwrap();
        let reg = ClassRegistry::build(&schema, &HintTable::new(), "Root").unwrap();
        reg.get("Root").unwrap().clone()
    }

    fn body(member: &Member) -> &[Stmt] {
        let Member::Method(m) = member else { panic!("expected method") };
        m.body.as_deref().unwrap()
    }

    #[test]
    fn members_and_bases() {
        let members = equality_members(&root());
        let names: Vec<&str> = members.iter().map(Member::name).collect();
        assert_eq!(names, ["Equals", "Equals", "GetHashCode", "CompareTo", "operator ==", "operator !="]);
        assert_eq!(
            equality_bases("Root"),
            [
                TypeRef::generic("IEquatable", vec![TypeRef::named("Root")]),
                TypeRef::generic("IComparable", vec![TypeRef::named("Root")]),
            ]
        );
    }

    #[test]
    fn schema_defined_property_delegates_to_object_equals() {
        let stmts = equal_statements(
            Expr::ident("Child"),
            Expr::ident(OTHER).member("Child"),
            &Comparison::Structural("Child".into()),
            &TypeShape::Class("Child".into()),
            0,
        );
        assert_eq!(
            stmts,
            [Stmt::if_then(
                object_equals(Expr::ident("Child"), Expr::ident(OTHER).member("Child")).negate(),
                vec![return_false()],
            )]
        );
    }

    #[test]
    fn sequences_compare_count_then_elements_in_order() {
        let shape = TypeShape::array_of(TypeShape::Scalar(Primitive::String));
        let stmts = equal_statements(Expr::ident("Tags"), Expr::ident("o"), &shape.comparison(), &shape, 0);
        let Stmt::If { then, .. } = &stmts[0] else { panic!() };
        assert_eq!(then.len(), 3);
        let Stmt::For { index, body, .. } = &then[2] else { panic!("expected index loop") };
        assert_eq!(index, "index_0");
        assert_eq!(
            body,
            &vec![Stmt::if_then(
                Expr::ident("Tags")
                    .index(Expr::ident("index_0"))
                    .not_equal_to(Expr::ident("o").index(Expr::ident("index_0"))),
                vec![return_false()],
            )]
        );
    }

    #[test]
    fn maps_compare_by_lookup() {
        let shape = TypeShape::map_of(TypeShape::Scalar(Primitive::Integer));
        let stmts = equal_statements(Expr::ident("Props"), Expr::ident("o"), &shape.comparison(), &shape, 0);
        let Stmt::If { then, .. } = &stmts[0] else { panic!() };
        let Stmt::ForEach { var, body, .. } = &then[2] else { panic!("expected foreach") };
        assert_eq!(var, "entry_0");
        let Stmt::If { cond, .. } = &body[0] else { panic!() };
        assert_eq!(
            cond,
            &Expr::ident("o")
                .member("TryGetValue")
                .call(vec![Expr::ident("entry_0").member("Key"), Expr::OutVar("other_0".into())])
                .negate()
        );
    }

    #[test]
    fn nested_sequences_alias_elements() {
        let shape = TypeShape::array_of(TypeShape::array_of(TypeShape::Scalar(Primitive::Integer)));
        let stmts = equal_statements(Expr::ident("Grid"), Expr::ident("o"), &shape.comparison(), &shape, 0);
        let Stmt::If { then, .. } = &stmts[0] else { panic!() };
        let Stmt::For { body, .. } = &then[2] else { panic!() };
        assert_eq!(body[0], Stmt::local("left_0", Expr::ident("Grid").index(Expr::ident("index_0"))));
        assert_eq!(body[1], Stmt::local("right_0", Expr::ident("o").index(Expr::ident("index_0"))));
    }

    #[test]
    fn hash_starts_at_seed_inside_unchecked() {
        let members = equality_members(&root());
        let stmts = body(&members[2]);
        assert_eq!(stmts[0], Stmt::Local { name: "result".into(), ty: Some(int()), init: Expr::Int(17) });
        let Stmt::Unchecked(folds) = &stmts[1] else { panic!("expected unchecked block") };
        // child (guarded), tags (loop), count (direct), props (sum)
        assert_eq!(folds.len(), 4);
        assert_eq!(folds[2], fold("result", hash_code(Expr::ident("Count"))));
        assert_eq!(stmts[2], Stmt::ret(Expr::ident("result")));
    }

    #[test]
    fn map_hash_sums_entries() {
        let shape = TypeShape::map_of(TypeShape::Scalar(Primitive::String));
        let stmts = hash_statements("result", Expr::ident("Props"), &shape.comparison(), &shape, 0);
        let Stmt::If { then, .. } = &stmts[0] else { panic!() };
        assert_eq!(then[0], Stmt::Local { name: "sum_0".into(), ty: Some(int()), init: Expr::Int(0) });
        assert_eq!(then[2], fold("result", Expr::ident("sum_0")));
    }

    #[test]
    fn custom_comparer_drives_equality_and_hash() {
        let shape = TypeShape::array_of(TypeShape::Scalar(Primitive::String));
        let custom = Comparison::Custom("TagComparer".into());
        let eq = equal_statements(Expr::ident("Tags"), Expr::ident("o"), &custom, &shape, 0);
        assert_eq!(
            eq,
            [Stmt::if_then(
                comparer_instance("TagComparer")
                    .member("Equals")
                    .call(vec![Expr::ident("Tags"), Expr::ident("o")])
                    .negate(),
                vec![return_false()],
            )]
        );
        // ordering falls back to the shape
        let cmp = compare_statements(Expr::ident("Tags"), Expr::ident("o"), &custom, &shape, 0);
        assert!(matches!(cmp[0], Stmt::If { .. }));
    }

    #[test]
    fn strings_order_ordinally() {
        let stmts = compare_statements(
            Expr::ident("Name"),
            Expr::ident("o"),
            &Comparison::Value,
            &TypeShape::Scalar(Primitive::String),
            0,
        );
        assert_eq!(stmts[0], Stmt::Assign(Expr::ident(COMPARE_RESULT), ordinal(Expr::ident("Name"), Expr::ident("o"))));
    }

    #[test]
    fn comparer_hint_reaches_generated_members() {
        let schema = JsonSchema::from_json_str(r##"{
            "type": "object",
            "properties": { "tags": { "type": "array", "items": { "type": "string" } } }
        }"##).unwrap();
        let mut hints = HintTable::new();
        hints.insert("Root.tags", Hint::Comparer(ComparerHint { comparer_name: "TagComparer".into() }));
        let reg = ClassRegistry::build(&schema, &hints, "Root").unwrap();
        let members = equality_members(reg.get("Root").unwrap());
        let stmts = body(&members[1]);
        assert!(matches!(&stmts[2], Stmt::If { cond: Expr::Not(_), .. }));
    }

    #[test]
    fn uris_compare_and_hash_their_original_text() {
        let shape = TypeShape::Scalar(Primitive::Uri);
        let eq = equal_statements(Expr::ident("Home"), Expr::ident("o"), &Comparison::Value, &shape, 0);
        let text = |name: &str| {
            Expr::conditional(Expr::ident(name).is_null(), Expr::Null, Expr::ident(name).member("OriginalString"))
        };
        assert_eq!(
            eq,
            [Stmt::if_then(
                Expr::ident("string")
                    .member("Equals")
                    .call(vec![text("Home"), text("o"), Expr::ident("StringComparison").member("Ordinal")])
                    .negate(),
                vec![return_false()],
            )]
        );

        let hash = hash_statements("result", Expr::ident("Home"), &Comparison::Value, &shape, 0);
        assert_eq!(
            hash,
            [Stmt::if_then(
                Expr::ident("Home").is_not_null(),
                vec![fold("result", hash_code(Expr::ident("Home").member("OriginalString")))],
            )]
        );
    }
}
