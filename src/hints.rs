//! Code generation hints: per-schema overrides of the default mapping.
//!
//! A hint document maps a schema identifier to an ordered list of entries of
//! the form `{ "kind": "...", "arguments": { ... } }`. Identifiers are a
//! definition name (`"Root"`) or a definition-qualified property
//! (`"Root.child"`).
//!
//! Decoding goes through a [`HintRegistry`] keyed by `kind`. New kinds are
//! added by registering a decoder; nothing else in the generator has to change.
use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{GenerateError, HintDecodeError, HintErrors};
use crate::path_de::{from_str_with_path, from_value_with_path};

// ————————————————————————————————————————————————————————————————————————————
// HINT KINDS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, PartialEq)]
pub enum Hint {
    ClassName(ClassNameHint),
    BaseType(BaseTypeHint),
    PropertyName(PropertyNameHint),
    Comparer(ComparerHint),
    Dictionary(DictionaryHint),
    PropertyModifiers(PropertyModifiersHint),
    /// A kind registered at runtime with [`HintRegistry::register_extension`].
    Extension { kind: String, arguments: Value },
}

/// Renames the generated class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassNameHint {
    pub class_name: String,
}

/// Adds base types (base class and/or interfaces) to the generated class.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaseTypeHint {
    pub base_type_names: Vec<String>,
}

/// Renames a generated property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyNameHint {
    pub dot_net_property_name: String,
}

/// Compares and hashes a property through a named comparer instead of the
/// default structural treatment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ComparerHint {
    pub comparer_name: String,
}

/// Forces a property to be generated as a string-keyed map.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DictionaryHint {
    /// Primitive keyword (`string`, `integer`, ...) or definition name.
    #[serde(default)]
    pub value_type: Option<String>,
}

/// Replaces the modifiers of a generated property (default `public`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PropertyModifiersHint {
    pub modifiers: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

type Decoder = Box<dyn Fn(&Value) -> Result<Hint, String> + Send + Sync>;

#[derive(Debug, Deserialize)]
struct RawHint {
    kind: String,
    #[serde(default)]
    arguments: Value,
}

/// Discriminator → decoder lookup.
pub struct HintRegistry {
    decoders: HashMap<String, Decoder>,
}

impl Default for HintRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("ClassNameHint", Hint::ClassName);
        registry.register("BaseTypeHint", Hint::BaseType);
        registry.register("PropertyNameHint", Hint::PropertyName);
        registry.register("ComparerHint", Hint::Comparer);
        registry.register("DictionaryHint", Hint::Dictionary);
        registry.register("PropertyModifiersHint", Hint::PropertyModifiers);
        registry
    }
}

impl HintRegistry {
    pub fn empty() -> Self {
        Self { decoders: HashMap::new() }
    }

    /// Register a typed decoder for `kind`. A later registration for the same
    /// kind replaces the earlier one.
    pub fn register<H, F>(&mut self, kind: &str, wrap: F)
    where
        H: DeserializeOwned + 'static,
        F: Fn(H) -> Hint + Send + Sync + 'static,
    {
        let decoder: Decoder = Box::new(move |arguments| {
            // `"arguments"` may be omitted for kinds without fields.
            let arguments = if arguments.is_null() { Value::Object(Default::default()) } else { arguments.clone() };
            from_value_with_path::<H>(&arguments).map(&wrap)
        });
        self.decoders.insert(kind.to_string(), decoder);
    }

    /// Register `kind` as an opaque extension; its arguments are kept as JSON.
    pub fn register_extension(&mut self, kind: &str) {
        let owned = kind.to_string();
        let decoder: Decoder = Box::new(move |arguments| {
            Ok(Hint::Extension { kind: owned.clone(), arguments: arguments.clone() })
        });
        self.decoders.insert(kind.to_string(), decoder);
    }

    pub fn is_registered(&self, kind: &str) -> bool {
        self.decoders.contains_key(kind)
    }

    /// Decode a single hint entry belonging to `schema_id`.
    pub fn decode(&self, schema_id: &str, entry: &Value) -> Result<Hint, HintDecodeError> {
        let fail = |reason: String| HintDecodeError {
            schema_id: schema_id.to_string(),
            payload: entry.to_string(),
            reason,
        };
        let raw: RawHint = from_value_with_path(entry).map_err(&fail)?;
        let decoder = self
            .decoders
            .get(&raw.kind)
            .ok_or_else(|| fail(format!("unknown hint kind '{}'", raw.kind)))?;
        decoder(&raw.arguments).map_err(fail)
    }

    /// Decode a whole hint document, entry by entry.
    ///
    /// A document that is not a JSON object is rejected outright. A schema
    /// identifier whose value is not an array, and individual entries that
    /// fail to decode, are collected in the report and left out of the table.
    pub fn load(&self, src: &str) -> Result<HintLoadReport, GenerateError> {
        let document: IndexMap<String, Value> = from_str_with_path(src).map_err(GenerateError::HintDocument)?;
        let mut table = HintTable::default();
        let mut errors = Vec::new();
        for (schema_id, value) in document {
            let Value::Array(entries) = &value else {
                errors.push(HintDecodeError {
                    schema_id,
                    payload: value.to_string(),
                    reason: "expected an array of hint entries".to_string(),
                });
                continue;
            };
            let mut hints = Vec::with_capacity(entries.len());
            for entry in entries {
                match self.decode(&schema_id, entry) {
                    Ok(hint) => hints.push(hint),
                    Err(error) => errors.push(error),
                }
            }
            if !hints.is_empty() {
                table.entries.insert(schema_id, hints);
            }
        }
        Ok(HintLoadReport { table, errors })
    }
}

/// Result of loading a hint document: the decoded table plus every entry
/// that could not be decoded.
#[derive(Debug)]
pub struct HintLoadReport {
    pub table: HintTable,
    pub errors: Vec<HintDecodeError>,
}

impl HintLoadReport {
    /// All-or-nothing: any decode error rejects the whole document.
    pub fn into_strict(self) -> Result<HintTable, HintErrors> {
        if self.errors.is_empty() { Ok(self.table) } else { Err(HintErrors(self.errors)) }
    }

    /// Best-effort: keep what decoded, log what didn't.
    pub fn into_lenient(self) -> HintTable {
        for error in &self.errors {
            tracing::warn!(schema_id = %error.schema_id, reason = %error.reason, "dropping hint entry");
        }
        self.table
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TABLE
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default)]
pub struct HintTable {
    entries: IndexMap<String, Vec<Hint>>,
}

impl HintTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, schema_id: impl Into<String>, hint: Hint) {
        self.entries.entry(schema_id.into()).or_default().push(hint);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn schema_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Hints for `schema_id`; empty when there are none.
    pub fn get(&self, schema_id: &str) -> &[Hint] {
        self.entries.get(schema_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn for_property(&self, definition: &str, property: &str) -> &[Hint] {
        self.get(&property_key(definition, property))
    }

    pub fn class_name(&self, definition: &str) -> Option<&str> {
        self.get(definition).iter().find_map(|h| match h {
            Hint::ClassName(h) => Some(h.class_name.as_str()),
            _ => None,
        })
    }

    pub fn base_types(&self, definition: &str) -> Vec<String> {
        self.get(definition)
            .iter()
            .filter_map(|h| match h {
                Hint::BaseType(h) => Some(h.base_type_names.iter().cloned()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn property_name(&self, definition: &str, property: &str) -> Option<&str> {
        self.for_property(definition, property).iter().find_map(|h| match h {
            Hint::PropertyName(h) => Some(h.dot_net_property_name.as_str()),
            _ => None,
        })
    }

    pub fn comparer(&self, definition: &str, property: &str) -> Option<&str> {
        self.for_property(definition, property).iter().find_map(|h| match h {
            Hint::Comparer(h) => Some(h.comparer_name.as_str()),
            _ => None,
        })
    }

    pub fn dictionary(&self, definition: &str, property: &str) -> Option<&DictionaryHint> {
        self.for_property(definition, property).iter().find_map(|h| match h {
            Hint::Dictionary(h) => Some(h),
            _ => None,
        })
    }

    pub fn property_modifiers(&self, definition: &str, property: &str) -> Option<&[String]> {
        self.for_property(definition, property).iter().find_map(|h| match h {
            Hint::PropertyModifiers(h) => Some(h.modifiers.as_slice()),
            _ => None,
        })
    }
}

pub fn property_key(definition: &str, property: &str) -> String {
    format!("{definition}.{property}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_builtin_kinds_in_order() {
        let src = r#"{
            "Root": [
                { "kind": "ClassNameHint", "arguments": { "className": "Tree" } },
                { "kind": "BaseTypeHint", "arguments": { "baseTypeNames": ["NodeBase", "IVisitable"] } }
            ],
            "Root.child": [
                { "kind": "PropertyNameHint", "arguments": { "dotNetPropertyName": "Kid" } }
            ]
        }"#;
        let table = HintRegistry::default().load(src).unwrap().into_strict().unwrap();
        assert_eq!(table.class_name("Root"), Some("Tree"));
        assert_eq!(table.base_types("Root"), ["NodeBase", "IVisitable"]);
        assert_eq!(table.property_name("Root", "child"), Some("Kid"));
        assert!(matches!(table.get("Root")[0], Hint::ClassName(_)));
    }

    #[test]
    fn missing_schema_id_is_not_an_error() {
        let table = HintTable::new();
        assert!(table.get("Nope").is_empty());
        assert_eq!(table.class_name("Nope"), None);
    }

    #[test]
    fn malformed_entry_is_reported_with_context_and_dropped() {
        let src = r#"{
            "Root": [
                { "kind": "ClassNameHint", "arguments": { "klassName": "Tree" } },
                { "kind": "BaseTypeHint", "arguments": { "baseTypeNames": ["B"] } }
            ],
            "Child": [ { "kind": "ClassNameHint", "arguments": { "className": "Kid" } } ]
        }"#;
        let report = HintRegistry::default().load(src).unwrap();
        assert_eq!(report.errors.len(), 1);
        let error = &report.errors[0];
        assert_eq!(error.schema_id, "Root");
        assert!(error.payload.contains("klassName"));

        let table = report.into_lenient();
        assert_eq!(table.class_name("Child"), Some("Kid"));
        assert_eq!(table.base_types("Root"), ["B"]);
        assert_eq!(table.class_name("Root"), None);
    }

    #[test]
    fn non_array_schema_id_is_reported_per_identifier() {
        let src = r#"{
            "Root": { "kind": "ClassNameHint", "arguments": { "className": "Tree" } },
            "Child": [ { "kind": "ClassNameHint", "arguments": { "className": "Kid" } } ]
        }"#;
        let report = HintRegistry::default().load(src).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].schema_id, "Root");
        assert!(report.errors[0].reason.contains("expected an array"));

        let table = report.into_lenient();
        assert_eq!(table.class_name("Child"), Some("Kid"));
        assert!(table.get("Root").is_empty());

        let err = HintRegistry::default().load(src).unwrap().into_strict().unwrap_err();
        assert_eq!(err.0[0].schema_id, "Root");
        assert!(HintRegistry::default().load("[1, 2]").is_err(), "the document itself must be an object");
    }

    #[test]
    fn strict_mode_rejects_whole_document() {
        let src = r#"{ "Root": [ { "kind": "Bogus" } ], "Child": [] }"#;
        let err = HintRegistry::default().load(src).unwrap().into_strict().unwrap_err();
        assert_eq!(err.0.len(), 1);
        assert!(err.0[0].reason.contains("unknown hint kind 'Bogus'"));
    }

    #[test]
    fn extension_kinds_decode_without_new_variants() {
        let mut registry = HintRegistry::default();
        assert!(!registry.is_registered("AttributeHint"));
        registry.register_extension("AttributeHint");
        let hint = registry
            .decode("Root.name", &json!({ "kind": "AttributeHint", "arguments": { "typeName": "Obsolete" } }))
            .unwrap();
        assert_eq!(
            hint,
            Hint::Extension { kind: "AttributeHint".into(), arguments: json!({ "typeName": "Obsolete" }) }
        );
    }

    #[test]
    fn registration_replaces_previous_decoder() {
        #[derive(Deserialize)]
        struct Legacy {
            name: String,
        }
        let mut registry = HintRegistry::default();
        registry.register("ClassNameHint", |h: Legacy| Hint::ClassName(ClassNameHint { class_name: h.name }));
        let hint = registry
            .decode("Root", &json!({ "kind": "ClassNameHint", "arguments": { "name": "Tree" } }))
            .unwrap();
        assert_eq!(hint, Hint::ClassName(ClassNameHint { class_name: "Tree".into() }));
    }

    #[test]
    fn arguments_may_be_omitted() {
        let hint = HintRegistry::default()
            .decode("Root.props", &json!({ "kind": "DictionaryHint" }))
            .unwrap();
        assert_eq!(hint, Hint::Dictionary(DictionaryHint { value_type: None }));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let err = HintRegistry::default().load("[1, 2]").unwrap_err();
        assert!(matches!(err, GenerateError::HintDocument(_)));
    }
}
