//! Pipeline: schema graph + hint table → class registry → synthesis passes →
//! compilation units.
use rayon::prelude::*;

use crate::error::GenerateError;
use crate::hints::HintTable;
use crate::ir::{CompilationUnit, DocComment, TypeDecl, TypeKind, TypeRef};
use crate::model::{ClassModel, ClassRegistry};
use crate::render::Printer;
use crate::render::doc::escape_xml;
use crate::schema::JsonSchema;
use crate::settings::GeneratorSettings;
use crate::synth::ctor::ctor_members;
use crate::synth::equality::{equality_bases, equality_members};
use crate::synth::kinds::{kind_enum, node_interface};
use crate::synth::visitor::{VISIT_ACTUAL, VISIT_NULL_CHECKED, generate_visitor};
use crate::synth::SynthContext;

/// One rendered unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub file_name: String,
    pub text: String,
}

/// Generate every compilation unit for `schema`.
///
/// Classes come first, in class-name order, followed by the kind enum, the
/// node interface and (when enabled) the rewriting visitor. The output does
/// not depend on how per-class work is scheduled.
pub fn generate(
    schema: &JsonSchema,
    hints: &HintTable,
    settings: &GeneratorSettings,
) -> Result<Vec<CompilationUnit>, GenerateError> {
    let root_class = settings.root_class(schema.title.as_deref());
    let registry = ClassRegistry::build(schema, hints, &root_class)?;
    check_hint_targets(schema, hints, &root_class);
    check_reserved_names(&registry, settings);

    let schema_name = settings.schema_name.clone().unwrap_or_else(|| root_class.clone());
    let ctx = SynthContext { registry: &registry, hints, settings, schema_name: &schema_name };

    let mut units: Vec<CompilationUnit> = registry
        .names()
        .par_iter()
        .filter_map(|name| registry.get(name))
        .map(|class| class_unit(&ctx, class))
        .collect();

    units.push(kind_enum(&ctx));
    units.push(node_interface(&ctx));
    if settings.generate_visitor {
        units.push(generate_visitor(&ctx, &settings.visitor_class(&schema_name)));
    }
    tracing::info!(classes = registry.len(), units = units.len(), "generated compilation units");
    Ok(units)
}

pub fn render_all(printer: &dyn Printer, units: &[CompilationUnit]) -> Vec<RenderedFile> {
    units
        .par_iter()
        .map(|unit| RenderedFile { file_name: printer.file_name(unit), text: printer.print(unit) })
        .collect()
}

fn class_unit(ctx: &SynthContext, class: &ClassModel) -> CompilationUnit {
    let mut bases: Vec<TypeRef> = class.base_types.iter().map(TypeRef::named).collect();
    bases.push(TypeRef::named(ctx.node_interface()));
    let mut members = ctor_members(ctx, class);
    if ctx.settings.generate_equality {
        bases.extend(equality_bases(&class.name));
        members.extend(equality_members(class));
    }
    tracing::debug!(class = %class.name, members = members.len(), "synthesized");

    let summary = match &class.description {
        Some(text) => escape_xml(text),
        None => format!("Generated from the '{}' schema definition.", escape_xml(&class.schema_id)),
    };
    CompilationUnit {
        namespace: ctx.settings.namespace_name.clone(),
        name: class.name.clone(),
        usings: vec!["System".into(), "System.Collections.Generic".into()],
        decl: TypeDecl {
            kind: TypeKind::Class,
            name: class.name.clone(),
            modifiers: vec!["public".into(), "partial".into()],
            bases,
            doc: Some(DocComment::summary(summary)),
            members,
        },
    }
}

/// Hints whose identifier names neither the root nor a definition are
/// ignored by every pass; say so.
fn check_hint_targets(schema: &JsonSchema, hints: &HintTable, root_class: &str) {
    for id in hints.schema_ids() {
        let definition = id.split_once('.').map_or(id, |(definition, _)| definition);
        if definition != root_class && !schema.definitions.contains_key(definition) {
            tracing::warn!(schema_id = id, "hint targets an unknown schema identifier; ignored");
        }
    }
}

/// Class names that collide with generated support names.
fn check_reserved_names(registry: &ClassRegistry, settings: &GeneratorSettings) {
    let visitor_suffixes = [VISIT_ACTUAL, VISIT_NULL_CHECKED].map(|m| m.trim_start_matches("Visit"));
    for name in registry.names() {
        if visitor_suffixes.contains(&name.as_str()) {
            tracing::warn!(class = %name, "class name collides with a visitor helper method");
        }
        if *name == settings.kind_enum_name || *name == settings.node_interface_name {
            tracing::warn!(class = %name, "class name collides with a generated support type");
        }
    }
}
