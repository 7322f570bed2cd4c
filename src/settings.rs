//! Generator configuration.
//!
//! Every field has a default, so a settings file only needs the keys it
//! overrides. CLI flags are applied on top of whatever the file provides.
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct GeneratorSettings {
    pub namespace_name: String,
    /// Name of the class generated for the root schema (also its hint id).
    /// Falls back to the schema `title`, then to `Root`.
    pub root_class_name: Option<String>,
    /// Prefix of the visitor class and subject of its doc comments.
    /// Falls back to the root class name.
    pub schema_name: Option<String>,
    pub kind_enum_name: String,
    pub node_interface_name: String,
    /// Leading comment lines of every emitted unit.
    pub copyright_notice: Option<String>,
    pub generate_equality: bool,
    pub generate_visitor: bool,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            namespace_name: "Generated".to_string(),
            root_class_name: None,
            schema_name: None,
            kind_enum_name: "SNodeKind".to_string(),
            node_interface_name: "ISNode".to_string(),
            copyright_notice: None,
            generate_equality: true,
            generate_visitor: true,
        }
    }
}

impl GeneratorSettings {
    pub fn from_json_str(src: &str) -> Result<Self, GenerateError> {
        crate::path_de::from_str_with_path(src).map_err(GenerateError::Settings)
    }

    pub fn root_class(&self, schema_title: Option<&str>) -> String {
        use heck::ToUpperCamelCase;
        self.root_class_name
            .clone()
            .or_else(|| schema_title.map(|t| t.to_upper_camel_case()).filter(|t| !t.is_empty()))
            .unwrap_or_else(|| "Root".to_string())
    }

    pub fn visitor_class(&self, root_class: &str) -> String {
        format!("{}RewritingVisitor", self.schema_name.as_deref().unwrap_or(root_class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let s = GeneratorSettings::from_json_str(r#"{ "namespaceName": "Sarif" }"#).unwrap();
        assert_eq!(s.namespace_name, "Sarif");
        assert_eq!(s.kind_enum_name, "SNodeKind");
        assert!(s.generate_visitor);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(GeneratorSettings::from_json_str(r#"{ "nameSpace": "x" }"#).is_err());
    }

    #[test]
    fn root_class_falls_back_to_title_then_root() {
        let s = GeneratorSettings::default();
        assert_eq!(s.root_class(Some("static analysis log")), "StaticAnalysisLog");
        assert_eq!(s.root_class(None), "Root");
        assert_eq!(s.visitor_class("Sarif"), "SarifRewritingVisitor");
    }
}
