use once_cell::sync::Lazy;
use regex::Regex;

static DEFINITION_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#/definitions/(?P<name>[^/]+)$").expect("definition reference pattern is valid")
});

/// Name of the definition a `#/definitions/<name>` pointer designates, or
/// `None` for any other pointer shape.
pub fn definition_name(reference: &str) -> Option<&str> {
    DEFINITION_REF
        .captures(reference)
        .and_then(|c| c.name("name"))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_single_segment_definition_pointers() {
        assert_eq!(definition_name("#/definitions/Child"), Some("Child"));
        assert_eq!(definition_name("#/definitions/run-result"), Some("run-result"));
    }

    #[test]
    fn rejects_everything_else() {
        for bad in [
            "#/definitions/a/b",
            "#/definitions/",
            "#/properties/child",
            "other.json#/definitions/Child",
            "#Child",
            "",
        ] {
            assert_eq!(definition_name(bad), None, "{bad}");
        }
    }
}
