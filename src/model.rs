//! Class model: the canonical, ordered property classification every
//! synthesis pass reads.
//!
//! The registry is built once from the schema graph and hint table and is
//! never mutated afterwards; passes only ever see `&ClassRegistry`.
//! References are followed by definition name only, so cyclic schemas cannot
//! make the builder recurse forever.
pub mod reference;
pub mod shape;

use std::collections::{BTreeMap, BTreeSet};

use heck::ToUpperCamelCase;
use indexmap::IndexMap;

use crate::error::{ClassNameCollision, ModelError, ModelErrors, ReferenceFormatError};
use crate::hints::HintTable;
use crate::schema::{AdditionalProperties, JsonSchema, SchemaType};

pub use shape::{Comparison, Primitive, PropertyKind, TypeShape};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Classification of one property of one generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyInfo {
    /// Name as it appears in the schema (and in JSON instances).
    pub json_name: String,
    /// Generated member name.
    pub name: String,
    pub shape: TypeShape,
    pub kind: PropertyKind,
    pub array_depth: usize,
    /// Whether the bottom of the array/map chain is a generated class.
    pub element_is_schema_defined: bool,
    pub comparison: Comparison,
    pub required: bool,
    pub description: Option<String>,
    pub modifiers: Vec<String>,
}

/// Ordered property classifications for one generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassModel {
    /// Identifier used for hint lookup (definition name).
    pub schema_id: String,
    pub name: String,
    pub description: Option<String>,
    pub base_types: Vec<String>,
    pub properties: Vec<PropertyInfo>,
}

impl ClassModel {
    pub fn property(&self, json_name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.json_name == json_name)
    }

    /// Properties the rewriting visitor has to descend into.
    pub fn visitable_properties(&self) -> impl Iterator<Item = &PropertyInfo> {
        self.properties.iter().filter(|p| p.element_is_schema_defined)
    }
}

/// Every class of one run, keyed and ordered by generated name.
#[derive(Debug, Clone, Default)]
pub struct ClassRegistry {
    classes: BTreeMap<String, ClassModel>,
    names: Vec<String>,
}

impl ClassRegistry {
    /// Classify every class-producing definition of `schema`.
    ///
    /// All malformed references and class-name collisions across the graph
    /// are reported together.
    pub fn build(schema: &JsonSchema, hints: &HintTable, root_class: &str) -> Result<Self, ModelErrors> {
        ModelBuilder::new(schema, hints, root_class).build()
    }

    pub fn get(&self, class_name: &str) -> Option<&ClassModel> {
        self.classes.get(class_name)
    }

    /// Generated class names, sorted.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

}

// ————————————————————————————————————————————————————————————————————————————
// BUILDER
// ————————————————————————————————————————————————————————————————————————————

/// Does this schema become a generated class?
pub fn is_class_schema(schema: &JsonSchema) -> bool {
    match schema.safe_type() {
        Some(SchemaType::Object) | None => !schema.properties.is_empty(),
        _ => false,
    }
}

/// Where a generated class comes from. The root is never confused with a
/// definition that happens to share its name.
#[derive(Debug, Clone, Copy)]
enum ClassSource<'a> {
    Root,
    Definition(&'a str),
}

struct ModelBuilder<'a> {
    schema: &'a JsonSchema,
    hints: &'a HintTable,
    root_class: &'a str,
    /// definition name → generated class name, for class-producing definitions.
    class_names: IndexMap<&'a str, String>,
    errors: Vec<ModelError>,
}

impl<'a> ModelBuilder<'a> {
    fn new(schema: &'a JsonSchema, hints: &'a HintTable, root_class: &'a str) -> Self {
        let class_names = schema
            .definitions
            .iter()
            .filter(|(_, def)| is_class_schema(def))
            .map(|(name, _)| (name.as_str(), class_name_for(hints, name)))
            .collect();
        Self { schema, hints, root_class, class_names, errors: Vec::new() }
    }

    fn build(mut self) -> Result<ClassRegistry, ModelErrors> {
        let schema = self.schema;
        let mut sources: Vec<(ClassSource<'a>, &'a JsonSchema)> = Vec::new();
        if is_class_schema(schema) {
            sources.push((ClassSource::Root, schema));
        }
        for (name, def) in &schema.definitions {
            if self.class_names.contains_key(name.as_str()) {
                sources.push((ClassSource::Definition(name.as_str()), def));
            }
        }

        // generated name → schema id that claimed it first
        let mut claimed: BTreeMap<String, String> = BTreeMap::new();
        let mut classes = BTreeMap::new();
        for (source, def) in sources {
            let (schema_id, name) = self.identify(source);
            if let Some(first) = claimed.get(&name) {
                self.errors.push(ModelError::Collision(ClassNameCollision {
                    class_name: name,
                    first: first.clone(),
                    second: schema_id.to_string(),
                }));
                continue;
            }
            claimed.insert(name.clone(), schema_id.to_string());
            let model = self.class_model(schema_id, name, def);
            tracing::debug!(class = %model.name, properties = model.properties.len(), "classified");
            classes.insert(model.name.clone(), model);
        }

        if !self.errors.is_empty() {
            return Err(ModelErrors(self.errors));
        }
        let names = classes.keys().cloned().collect();
        Ok(ClassRegistry { classes, names })
    }

    /// Hint-lookup identifier and generated class name of a class source.
    fn identify(&self, source: ClassSource<'a>) -> (&'a str, String) {
        match source {
            ClassSource::Root => (self.root_class, class_name_for(self.hints, self.root_class)),
            ClassSource::Definition(name) => {
                let class = self.class_names.get(name).cloned().unwrap_or_else(|| class_name_for(self.hints, name));
                (name, class)
            }
        }
    }

    fn class_model(&mut self, schema_id: &str, name: String, def: &'a JsonSchema) -> ClassModel {
        let properties = def
            .properties
            .iter()
            .map(|(json_name, prop)| self.property_info(schema_id, def, json_name, prop))
            .collect();
        ClassModel {
            schema_id: schema_id.to_string(),
            name,
            description: def.description.clone(),
            base_types: self.hints.base_types(schema_id),
            properties,
        }
    }

    fn property_info(
        &mut self,
        schema_id: &str,
        def: &'a JsonSchema,
        json_name: &str,
        prop: &'a JsonSchema,
    ) -> PropertyInfo {
        let shape = match self.hints.dictionary(schema_id, json_name) {
            Some(hint) => {
                let value = match hint.value_type.as_deref() {
                    Some(keyword) => self.keyword_shape(keyword),
                    None => match &prop.additional_properties {
                        Some(AdditionalProperties::Schema(inner)) => {
                            self.classify(schema_id, json_name, inner, &mut BTreeSet::new())
                        }
                        _ => TypeShape::Scalar(Primitive::Any),
                    },
                };
                TypeShape::map_of(value)
            }
            None => self.classify(schema_id, json_name, prop, &mut BTreeSet::new()),
        };
        let comparison = match self.hints.comparer(schema_id, json_name) {
            Some(comparer) => Comparison::Custom(comparer.to_string()),
            None => shape.comparison(),
        };
        let name = self
            .hints
            .property_name(schema_id, json_name)
            .map(str::to_string)
            .unwrap_or_else(|| json_name.to_upper_camel_case());
        let modifiers = self
            .hints
            .property_modifiers(schema_id, json_name)
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| vec!["public".to_string()]);
        PropertyInfo {
            json_name: json_name.to_string(),
            name,
            kind: shape.kind(),
            array_depth: shape.array_depth(),
            element_is_schema_defined: shape.contains_class(),
            comparison,
            required: def.is_required(json_name),
            description: prop.description.clone(),
            modifiers,
            shape,
        }
    }

    fn keyword_shape(&self, keyword: &str) -> TypeShape {
        if let Some(primitive) = Primitive::from_keyword(keyword) {
            return TypeShape::Scalar(primitive);
        }
        match self.class_names.get(keyword) {
            Some(class) => TypeShape::Class(class.clone()),
            None => TypeShape::Class(class_name_for(self.hints, keyword)),
        }
    }

    /// `expanding` holds the non-class definitions currently being inlined;
    /// it stops alias cycles such as `A: { items: { $ref: A } }`.
    fn classify(
        &mut self,
        schema_id: &str,
        property: &str,
        schema: &'a JsonSchema,
        expanding: &mut BTreeSet<&'a str>,
    ) -> TypeShape {
        if let Some(fragment) = &schema.reference {
            return self.classify_reference(schema_id, property, fragment, expanding);
        }

        let ty = schema.safe_type().or_else(|| {
            if schema.items.is_some() {
                Some(SchemaType::Array)
            } else if !schema.properties.is_empty() || schema.additional_properties.is_some() {
                Some(SchemaType::Object)
            } else {
                None
            }
        });

        match ty {
            Some(SchemaType::Array) => {
                let item = match &schema.items {
                    Some(items) => self.classify(schema_id, property, items, expanding),
                    None => TypeShape::Scalar(Primitive::Any),
                };
                TypeShape::array_of(item)
            }
            Some(SchemaType::Object) => {
                if !schema.properties.is_empty() {
                    tracing::warn!(schema_id, property, "inline object schema is generated as an opaque map");
                    return TypeShape::map_of(TypeShape::Scalar(Primitive::Any));
                }
                match &schema.additional_properties {
                    Some(AdditionalProperties::Schema(value)) => {
                        TypeShape::map_of(self.classify(schema_id, property, value, expanding))
                    }
                    _ => TypeShape::map_of(TypeShape::Scalar(Primitive::Any)),
                }
            }
            Some(SchemaType::String) => TypeShape::Scalar(match schema.format.as_deref() {
                Some("uri") | Some("uri-reference") => Primitive::Uri,
                Some("date-time") => Primitive::DateTime,
                _ => Primitive::String,
            }),
            Some(SchemaType::Integer) => TypeShape::Scalar(Primitive::Integer),
            Some(SchemaType::Number) => TypeShape::Scalar(Primitive::Number),
            Some(SchemaType::Boolean) => TypeShape::Scalar(Primitive::Boolean),
            Some(SchemaType::Null) | None => TypeShape::Scalar(Primitive::Any),
        }
    }

    fn classify_reference(
        &mut self,
        schema_id: &str,
        property: &str,
        fragment: &str,
        expanding: &mut BTreeSet<&'a str>,
    ) -> TypeShape {
        let Some(definition) = reference::definition_name(fragment) else {
            self.errors.push(ModelError::Reference(ReferenceFormatError {
                schema_id: schema_id.to_string(),
                property: property.to_string(),
                fragment: fragment.to_string(),
            }));
            return TypeShape::Scalar(Primitive::Any);
        };

        if let Some(class) = self.class_names.get(definition) {
            return TypeShape::Class(class.clone());
        }

        // Non-class definitions (aliases of arrays, strings, maps) are inlined.
        let schema: &'a JsonSchema = self.schema;
        match schema.definitions.get_key_value(definition) {
            Some((key, target)) if !expanding.contains(key.as_str()) => {
                expanding.insert(key.as_str());
                let shape = self.classify(schema_id, property, target, expanding);
                expanding.remove(key.as_str());
                shape
            }
            Some(_) => {
                tracing::warn!(schema_id, property, definition, "cyclic alias definition; treated as untyped");
                TypeShape::Scalar(Primitive::Any)
            }
            None => {
                tracing::warn!(schema_id, property, definition, "reference to unknown definition");
                TypeShape::Class(class_name_for(self.hints, definition))
            }
        }
    }
}

fn class_name_for(hints: &HintTable, definition: &str) -> String {
    hints
        .class_name(definition)
        .map(str::to_string)
        .unwrap_or_else(|| definition.to_upper_camel_case())
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————
