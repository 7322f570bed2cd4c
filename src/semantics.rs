//! Reference evaluator of the generated contracts over JSON instances.
//!
//! Instances are JSON objects whose keys are the schema (JSON) property
//! names; a missing key reads as null. Every function walks the same
//! `(Comparison, TypeShape)` pairs the synthesis passes emit code for, so the
//! laws the generated classes must satisfy (equal values hash equal, maps
//! compare regardless of key order, the identity visitor changes nothing)
//! can be checked without a C# toolchain.
//!
//! Named comparers are opaque here; properties carrying one are evaluated
//! by their shape.
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{ClassModel, ClassRegistry, Comparison, Primitive, TypeShape};
use crate::synth::element_shape;
use crate::synth::equality::{HASH_FACTOR, HASH_SEED};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// `VisitActual` / the copy constructor received null.
    #[error("argument '{0}' must not be null")]
    NullArgument(&'static str),
    #[error("unknown class '{0}'")]
    UnknownClass(String),
}

static NULL: Value = Value::Null;

fn class<'r>(registry: &'r ClassRegistry, name: &str) -> Result<&'r ClassModel, EvalError> {
    registry.get(name).ok_or_else(|| EvalError::UnknownClass(name.to_string()))
}

fn field<'v>(instance: &'v Value, json_name: &str) -> &'v Value {
    instance.get(json_name).unwrap_or(&NULL)
}

/// Comparison actually evaluated for a property.
fn effective(comparison: &Comparison, shape: &TypeShape) -> Comparison {
    match comparison {
        Comparison::Custom(_) => shape.comparison(),
        other => other.clone(),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// EQUALITY
// ————————————————————————————————————————————————————————————————————————————

/// `Equals(T)` of class `class_name`.
pub fn equals(registry: &ClassRegistry, class_name: &str, a: &Value, b: &Value) -> Result<bool, EvalError> {
    let model = class(registry, class_name)?;
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ok(true),
        (true, false) | (false, true) => return Ok(false),
        _ => {}
    }
    for p in &model.properties {
        let comparison = effective(&p.comparison, &p.shape);
        if !values_equal(registry, &comparison, &p.shape, field(a, &p.json_name), field(b, &p.json_name))? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn scalar_equal(primitive: Primitive, a: &Value, b: &Value) -> bool {
    match (primitive, a, b) {
        (Primitive::Integer | Primitive::Number, Value::Number(x), Value::Number(y)) => {
            x.as_f64().map(OrderedFloat) == y.as_f64().map(OrderedFloat)
        }
        _ => json_compare(a, b) == Ordering::Equal,
    }
}

fn values_equal(
    registry: &ClassRegistry,
    comparison: &Comparison,
    shape: &TypeShape,
    a: &Value,
    b: &Value,
) -> Result<bool, EvalError> {
    if a.is_null() || b.is_null() {
        return Ok(a.is_null() && b.is_null());
    }
    match (comparison, a, b) {
        (Comparison::Structural(name), _, _) => equals(registry, name, a, b),
        (Comparison::Sequence(inner), Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (x, y) in xs.iter().zip(ys) {
                if !values_equal(registry, inner, element_shape(shape), x, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Comparison::Unordered(inner), Value::Object(xs), Value::Object(ys)) => {
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (key, x) in xs {
                let Some(y) = ys.get(key) else { return Ok(false) };
                if !values_equal(registry, inner, element_shape(shape), x, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (Comparison::Value, _, _) => Ok(match shape {
            TypeShape::Scalar(p) => scalar_equal(*p, a, b),
            _ => json_compare(a, b) == Ordering::Equal,
        }),
        _ => Ok(json_compare(a, b) == Ordering::Equal),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// HASHING
// ————————————————————————————————————————————————————————————————————————————

/// `GetHashCode()` of class `class_name`, with 32-bit wrapping arithmetic.
pub fn hash(registry: &ClassRegistry, class_name: &str, instance: &Value) -> Result<i32, EvalError> {
    let model = class(registry, class_name)?;
    let mut acc = HASH_SEED as i32;
    for p in &model.properties {
        let comparison = effective(&p.comparison, &p.shape);
        hash_into(registry, &mut acc, &comparison, &p.shape, field(instance, &p.json_name))?;
    }
    Ok(acc)
}

fn fold(acc: &mut i32, h: i32) {
    *acc = acc.wrapping_mul(HASH_FACTOR as i32).wrapping_add(h);
}

fn hash_into(
    registry: &ClassRegistry,
    acc: &mut i32,
    comparison: &Comparison,
    shape: &TypeShape,
    value: &Value,
) -> Result<(), EvalError> {
    match (comparison, value) {
        (Comparison::Value, v) if !shape.is_reference_type() => fold(acc, scalar_hash(shape, v)),
        (_, Value::Null) => {}
        (Comparison::Structural(name), v) => fold(acc, hash(registry, name, v)?),
        (Comparison::Sequence(inner), Value::Array(items)) => {
            for item in items {
                hash_into(registry, acc, inner, element_shape(shape), item)?;
            }
        }
        (Comparison::Unordered(inner), Value::Object(entries)) => {
            let mut sum = 0i32;
            for (key, v) in entries {
                let mut entry_hash = truncate(&key.as_str());
                hash_into(registry, &mut entry_hash, inner, element_shape(shape), v)?;
                sum = sum.wrapping_add(entry_hash);
            }
            fold(acc, sum);
        }
        (_, v) => fold(acc, scalar_hash(shape, v)),
    }
    Ok(())
}

fn truncate(value: &impl Hash) -> i32 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish() as i32
}

fn scalar_hash(shape: &TypeShape, value: &Value) -> i32 {
    match (shape, value) {
        (TypeShape::Scalar(Primitive::Integer | Primitive::Number), Value::Number(n)) => {
            truncate(&n.as_f64().map(OrderedFloat))
        }
        (_, v) => json_hash(v),
    }
}

/// Hash of an untyped value, consistent with [`json_compare`]: numbers hash
/// by numeric value and object key order does not matter.
fn json_hash(value: &Value) -> i32 {
    match value {
        Value::Null => 0,
        Value::Bool(b) => truncate(b),
        Value::Number(n) => truncate(&n.as_f64().map(OrderedFloat)),
        Value::String(s) => truncate(&s.as_str()),
        Value::Array(items) => items
            .iter()
            .fold(HASH_SEED as i32, |acc, item| acc.wrapping_mul(HASH_FACTOR as i32).wrapping_add(json_hash(item))),
        Value::Object(entries) => entries.iter().fold(0i32, |sum, (k, v)| {
            sum.wrapping_add(truncate(&k.as_str()).wrapping_mul(HASH_FACTOR as i32).wrapping_add(json_hash(v)))
        }),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ORDERING
// ————————————————————————————————————————————————————————————————————————————

/// `CompareTo(T)` of class `class_name`; null sorts first.
pub fn compare(registry: &ClassRegistry, class_name: &str, a: &Value, b: &Value) -> Result<Ordering, EvalError> {
    let model = class(registry, class_name)?;
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ok(Ordering::Equal),
        (true, false) => return Ok(Ordering::Less),
        (false, true) => return Ok(Ordering::Greater),
        _ => {}
    }
    for p in &model.properties {
        let comparison = effective(&p.comparison, &p.shape);
        let order = compare_values(registry, &comparison, &p.shape, field(a, &p.json_name), field(b, &p.json_name))?;
        if order != Ordering::Equal {
            return Ok(order);
        }
    }
    Ok(Ordering::Equal)
}

fn compare_values(
    registry: &ClassRegistry,
    comparison: &Comparison,
    shape: &TypeShape,
    a: &Value,
    b: &Value,
) -> Result<Ordering, EvalError> {
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ok(Ordering::Equal),
        (true, false) => return Ok(Ordering::Less),
        (false, true) => return Ok(Ordering::Greater),
        _ => {}
    }
    match (comparison, a, b) {
        (Comparison::Structural(name), _, _) => compare(registry, name, a, b),
        (Comparison::Sequence(inner), Value::Array(xs), Value::Array(ys)) => {
            let by_len = xs.len().cmp(&ys.len());
            if by_len != Ordering::Equal {
                return Ok(by_len);
            }
            for (x, y) in xs.iter().zip(ys) {
                let order = compare_values(registry, inner, element_shape(shape), x, y)?;
                if order != Ordering::Equal {
                    return Ok(order);
                }
            }
            Ok(Ordering::Equal)
        }
        (Comparison::Unordered(inner), Value::Object(xs), Value::Object(ys)) => {
            let by_len = xs.len().cmp(&ys.len());
            if by_len != Ordering::Equal {
                return Ok(by_len);
            }
            let sorted = |m: &Map<String, Value>| {
                let mut keys: Vec<String> = m.keys().cloned().collect();
                keys.sort();
                keys
            };
            let (left_keys, right_keys) = (sorted(xs), sorted(ys));
            let by_keys = left_keys.cmp(&right_keys);
            if by_keys != Ordering::Equal {
                return Ok(by_keys);
            }
            for key in &left_keys {
                let order = compare_values(registry, inner, element_shape(shape), &xs[key], &ys[key])?;
                if order != Ordering::Equal {
                    return Ok(order);
                }
            }
            Ok(Ordering::Equal)
        }
        _ => Ok(json_compare(a, b)),
    }
}

fn json_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over untyped values. Numbers compare by value, strings
/// ordinally, arrays by length then element-wise, objects by size, then
/// sorted keys, then values by sorted key. Values of different JSON types
/// order by type.
fn json_compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => x.as_f64().map(OrderedFloat).cmp(&y.as_f64().map(OrderedFloat)),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Array(xs), Value::Array(ys)) => xs
            .len()
            .cmp(&ys.len())
            .then_with(|| xs.iter().zip(ys).map(|(x, y)| json_compare(x, y)).find(|o| o.is_ne()).unwrap_or(Ordering::Equal)),
        (Value::Object(xs), Value::Object(ys)) => {
            let mut left: Vec<&String> = xs.keys().collect();
            let mut right: Vec<&String> = ys.keys().collect();
            left.sort();
            right.sort();
            xs.len().cmp(&ys.len()).then_with(|| left.cmp(&right)).then_with(|| {
                left.iter()
                    .map(|k| json_compare(&xs[k.as_str()], &ys[k.as_str()]))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
        }
        _ => json_rank(a).cmp(&json_rank(b)),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// REWRITING
// ————————————————————————————————————————————————————————————————————————————

/// `Visit(node)` of a visitor whose `Visit<Class>` overrides call the base
/// implementation and then pass the result through `substitute`.
///
/// The identity substitution models the generated visitor itself.
pub fn rewrite(
    registry: &ClassRegistry,
    class_name: &str,
    node: Value,
    substitute: &dyn Fn(&str, Value) -> Value,
) -> Result<Value, EvalError> {
    if node.is_null() {
        return Err(EvalError::NullArgument("node"));
    }
    let model = class(registry, class_name)?;
    let mut node = node;
    if let Value::Object(fields) = &mut node {
        for p in model.visitable_properties() {
            if let Some(value) = fields.get_mut(&p.json_name) {
                let current = value.take();
                *value = rewrite_value(registry, &p.shape, current, substitute)?;
            }
        }
    }
    Ok(substitute(&model.name, node))
}

/// `VisitNullChecked` over one property value, descending through
/// containers in place.
fn rewrite_value(
    registry: &ClassRegistry,
    shape: &TypeShape,
    value: Value,
    substitute: &dyn Fn(&str, Value) -> Value,
) -> Result<Value, EvalError> {
    match (shape, value) {
        (_, Value::Null) => Ok(Value::Null),
        (TypeShape::Class(name), v) => rewrite(registry, name, v, substitute),
        (TypeShape::Array(inner), Value::Array(items)) => Ok(Value::Array(
            items
                .into_iter()
                .map(|item| rewrite_value(registry, inner, item, substitute))
                .collect::<Result<_, _>>()?,
        )),
        (TypeShape::Map(inner), Value::Object(entries)) => Ok(Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| Ok((k, rewrite_value(registry, inner, v, substitute)?)))
                .collect::<Result<_, EvalError>>()?,
        )),
        (_, v) => Ok(v),
    }
}

// ————————————————————————————————————————————————————————————————————————————
// DEEP COPY
// ————————————————————————————————————————————————————————————————————————————

/// Deep copy through the generated copy constructor.
///
/// Only declared properties are copied; a null property is left unset.
/// Class values go through their own copy constructor and containers are
/// rebuilt level by level, keeping null elements.
pub fn deep_clone(registry: &ClassRegistry, class_name: &str, node: &Value) -> Result<Value, EvalError> {
    if node.is_null() {
        return Err(EvalError::NullArgument("other"));
    }
    let model = class(registry, class_name)?;
    let mut copy = Map::new();
    for p in &model.properties {
        let value = field(node, &p.json_name);
        if !value.is_null() {
            copy.insert(p.json_name.clone(), copy_value(registry, &p.shape, value)?);
        }
    }
    Ok(Value::Object(copy))
}

fn copy_value(registry: &ClassRegistry, shape: &TypeShape, value: &Value) -> Result<Value, EvalError> {
    match (shape, value) {
        (_, Value::Null) => Ok(Value::Null),
        (TypeShape::Class(name), v) => deep_clone(registry, name, v),
        (TypeShape::Array(inner), Value::Array(items)) => Ok(Value::Array(
            items.iter().map(|item| copy_value(registry, inner, item)).collect::<Result<_, _>>()?,
        )),
        (TypeShape::Map(inner), Value::Object(entries)) => Ok(Value::Object(
            entries
                .iter()
                .map(|(k, v)| Ok((k.clone(), copy_value(registry, inner, v)?)))
                .collect::<Result<_, EvalError>>()?,
        )),
        (_, v) => Ok(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hints::HintTable;
    use crate::schema::JsonSchema;
    use serde_json::json;

    const SCHEMA: &str = r##"{
        "type": "object",
        "properties": {
            "child": { "$ref": "#/definitions/child" },
            "tags": { "type": "array", "items": { "type": "string" } },
            "scores": { "type": "object", "additionalProperties": { "type": "number" } },
            "grid": { "type": "array", "items": { "type": "array", "items": { "$ref": "#/definitions/child" } } },
            "byName": { "type": "object", "additionalProperties": { "$ref": "#/definitions/child" } },
            "extra": {},
            "home": { "type": "string", "format": "uri" }
        },
        "definitions": {
            "child": { "type": "object", "properties": { "name": { "type": "string" }, "n": { "type": "integer" } } }
        }
    }"##;

    fn registry() -> ClassRegistry {
        let schema = JsonSchema::from_json_str(SCHEMA).unwrap();
        ClassRegistry::build(&schema, &HintTable::new(), "Root").unwrap()
    }

    fn sample() -> Value {
        json!({
            "child": { "name": "a", "n": 1 },
            "tags": ["x", "y"],
            "scores": { "a": 1.5, "b": 2.0 },
            "grid": [[{ "name": "g", "n": 2 }, null]],
            "byName": { "k": { "name": "m", "n": 3 } }
        })
    }

    #[test]
    fn equal_instances_hash_equal() {
        let reg = registry();
        let a = sample();
        let b = sample();
        assert!(equals(&reg, "Root", &a, &b).unwrap());
        assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &b).unwrap());
        assert_eq!(compare(&reg, "Root", &a, &b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn sequence_order_matters() {
        let reg = registry();
        let a = json!({ "tags": ["1", "2"] });
        let b = json!({ "tags": ["2", "1"] });
        assert!(equals(&reg, "Root", &a, &a.clone()).unwrap());
        assert!(!equals(&reg, "Root", &a, &b).unwrap());
    }

    #[test]
    fn map_key_order_does_not_matter() {
        let reg = registry();
        let a = json!({ "scores": { "a": 1, "b": 2 } });
        let b = json!({ "scores": { "b": 2, "a": 1 } });
        assert!(equals(&reg, "Root", &a, &b).unwrap());
        assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &b).unwrap());
        assert_eq!(compare(&reg, "Root", &a, &b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn changing_a_nested_field_breaks_equality() {
        let reg = registry();
        let a = sample();
        let mut b = sample();
        b["grid"][0][0]["n"] = json!(5);
        assert!(!equals(&reg, "Root", &a, &b).unwrap());
        assert_ne!(compare(&reg, "Root", &a, &b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn null_sorts_first() {
        let reg = registry();
        let a = json!({ "child": null });
        let b = json!({ "child": { "name": "" } });
        assert_eq!(compare(&reg, "Root", &a, &b).unwrap(), Ordering::Less);
        assert_eq!(compare(&reg, "Root", &b, &a).unwrap(), Ordering::Greater);
    }

    #[test]
    fn identity_visit_changes_nothing() {
        let reg = registry();
        let visited = rewrite(&reg, "Root", sample(), &|_, v| v).unwrap();
        assert_eq!(visited, sample());
    }

    #[test]
    fn substitution_reaches_every_depth() {
        let reg = registry();
        let rename = |class: &str, mut v: Value| {
            if class == "Child" {
                v["name"] = json!("visited");
            }
            v
        };
        let visited = rewrite(&reg, "Root", sample(), &rename).unwrap();
        assert_eq!(visited["child"]["name"], "visited");
        assert_eq!(visited["grid"][0][0]["name"], "visited");
        assert_eq!(visited["grid"][0][1], Value::Null);
        assert_eq!(visited["byName"]["k"]["name"], "visited");
        assert_eq!(visited["tags"], json!(["x", "y"]));
    }

    #[test]
    fn untyped_numbers_hash_by_value() {
        let reg = registry();
        let a = json!({ "extra": 0.0 });
        let b = json!({ "extra": -0.0 });
        assert!(equals(&reg, "Root", &a, &b).unwrap());
        assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &b).unwrap());

        let a = json!({ "extra": { "n": 1, "list": [2.0, "x"] } });
        let b = json!({ "extra": { "list": [2, "x"], "n": 1.0 } });
        assert!(equals(&reg, "Root", &a, &b).unwrap());
        assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &b).unwrap());
        assert_eq!(compare(&reg, "Root", &a, &b).unwrap(), Ordering::Equal);
    }

    #[test]
    fn uri_fragments_are_significant() {
        let reg = registry();
        let a = json!({ "home": "http://x/a#f1" });
        let b = json!({ "home": "http://x/a#f2" });
        assert!(!equals(&reg, "Root", &a, &b).unwrap());
        assert_eq!(compare(&reg, "Root", &a, &b).unwrap(), Ordering::Less);
    }

    #[test]
    fn deep_clone_copies_declared_properties_only() {
        let reg = registry();
        let mut source = sample();
        source["undeclared"] = json!("dropped");
        source["child"]["extra"] = json!(true);
        source["home"] = Value::Null;
        let copy = deep_clone(&reg, "Root", &source).unwrap();

        assert!(copy.get("undeclared").is_none());
        assert!(copy.get("home").is_none(), "null properties stay unset");
        assert_eq!(copy["child"], json!({ "name": "a", "n": 1 }));
        assert_eq!(copy["grid"], json!([[{ "name": "g", "n": 2 }, null]]));
        assert_eq!(copy["byName"], json!({ "k": { "name": "m", "n": 3 } }));
        assert!(equals(&reg, "Root", &copy, &sample()).unwrap());
    }

    #[test]
    fn deep_clone_of_unknown_class_fails() {
        let reg = registry();
        assert_eq!(deep_clone(&reg, "Nope", &json!({})), Err(EvalError::UnknownClass("Nope".into())));
    }

    #[test]
    fn visit_null_checked_returns_null_for_every_class() {
        let reg = registry();
        for name in reg.names() {
            let shape = TypeShape::Class(name.clone());
            assert_eq!(rewrite_value(&reg, &shape, Value::Null, &|_, v| v), Ok(Value::Null), "{name}");
        }
    }

    #[test]
    fn visiting_null_is_an_argument_error() {
        let reg = registry();
        assert_eq!(rewrite(&reg, "Root", Value::Null, &|_, v| v), Err(EvalError::NullArgument("node")));
        assert_eq!(deep_clone(&reg, "Root", &Value::Null), Err(EvalError::NullArgument("other")));
        assert_eq!(
            rewrite(&reg, "Nope", json!({}), &|_, v| v),
            Err(EvalError::UnknownClass("Nope".into()))
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn child() -> impl Strategy<Value = Value> {
            prop_oneof![
                1 => Just(Value::Null),
                4 => ("[a-z]{0,6}", -50i64..50).prop_map(|(name, n)| json!({ "name": name, "n": n })),
            ]
        }

        /// Arbitrary JSON for untyped properties, signed zeros included.
        fn untyped() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                (-20i64..20).prop_map(|n| json!(n)),
                prop_oneof![Just(0.0f64), Just(-0.0f64), -5.0f64..5.0].prop_map(|f| json!(f)),
                "[a-z]{0,3}".prop_map(Value::String),
            ];
            leaf.prop_recursive(2, 12, 3, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
                    prop::collection::btree_map("[a-z]{1,3}", inner, 0..3)
                        .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        fn root() -> impl Strategy<Value = Value> {
            (
                child(),
                prop::collection::vec("[a-z]{1,4}", 0..5),
                prop::collection::btree_map("[a-z]{1,4}", -1000i64..1000, 0..5),
                prop::collection::vec(prop::collection::vec(child(), 0..3), 0..3),
                prop::collection::btree_map("[a-z]{1,4}", child(), 0..4),
                untyped(),
            )
                .prop_map(|(child, tags, scores, grid, by_name, extra)| {
                    json!({
                        "child": child, "tags": tags, "scores": scores,
                        "grid": grid, "byName": by_name, "extra": extra
                    })
                })
        }

        /// Negates every zero, which must not change equality or hashes.
        fn flipped_zeros(value: &Value) -> Value {
            match value {
                Value::Number(n) if n.as_f64() == Some(0.0) && n.is_f64() => json!(-n.as_f64().unwrap_or(0.0)),
                Value::Object(m) => Value::Object(m.iter().map(|(k, v)| (k.clone(), flipped_zeros(v))).collect()),
                Value::Array(items) => Value::Array(items.iter().map(flipped_zeros).collect()),
                other => other.clone(),
            }
        }

        /// Same content, map keys inserted in reverse order.
        fn reversed_maps(value: &Value) -> Value {
            match value {
                Value::Object(m) => {
                    Value::Object(m.iter().rev().map(|(k, v)| (k.clone(), reversed_maps(v))).collect())
                }
                Value::Array(items) => Value::Array(items.iter().map(reversed_maps).collect()),
                other => other.clone(),
            }
        }

        proptest! {
            /// Equal instances always hash equal.
            #[test]
            fn equality_implies_equal_hash(a in root()) {
                let reg = registry();
                let b = reversed_maps(&a);
                prop_assert!(equals(&reg, "Root", &a, &b).unwrap());
                prop_assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &b).unwrap());
            }

            /// Signed zeros in untyped values are equal and hash equal.
            #[test]
            fn signed_zero_keeps_hash(a in root()) {
                let reg = registry();
                let b = flipped_zeros(&a);
                prop_assert!(equals(&reg, "Root", &a, &b).unwrap());
                prop_assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &b).unwrap());
            }

            /// A deep copy is equal to its source and hashes the same.
            #[test]
            fn deep_clone_is_equal(a in root()) {
                let reg = registry();
                let copy = deep_clone(&reg, "Root", &a).unwrap();
                prop_assert!(equals(&reg, "Root", &a, &copy).unwrap());
                prop_assert_eq!(hash(&reg, "Root", &a).unwrap(), hash(&reg, "Root", &copy).unwrap());
            }

            /// Ordering agrees with equality and is antisymmetric.
            #[test]
            fn ordering_agrees_with_equality(a in root(), b in root()) {
                let reg = registry();
                let eq = equals(&reg, "Root", &a, &b).unwrap();
                let ab = compare(&reg, "Root", &a, &b).unwrap();
                let ba = compare(&reg, "Root", &b, &a).unwrap();
                prop_assert_eq!(eq, ab == Ordering::Equal);
                prop_assert_eq!(ab, ba.reverse());
            }

            /// Appending a tag always breaks equality.
            #[test]
            fn perturbation_breaks_equality(a in root(), tag in "[a-z]{1,4}") {
                let reg = registry();
                let mut b = a.clone();
                b["tags"].as_array_mut().unwrap().push(json!(tag));
                prop_assert!(!equals(&reg, "Root", &a, &b).unwrap());
            }

            /// The generated visitor without overrides is the identity.
            #[test]
            fn identity_visit(a in root()) {
                let reg = registry();
                let visited = rewrite(&reg, "Root", a.clone(), &|_, v| v).unwrap();
                prop_assert!(equals(&reg, "Root", &a, &visited).unwrap());
                prop_assert_eq!(visited, a);
            }
        }
    }
}
