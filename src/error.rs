//! Generation-time errors.
//!
//! Everything here is reported with enough context (schema identifier,
//! property, raw payload) to build a complete report for the caller. The
//! null-argument failure of the *generated* code lives in
//! [`crate::semantics::EvalError`], not here.
use std::fmt;

use thiserror::Error;

/// A `$ref` that does not have the `#/definitions/<name>` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{schema_id}.{property}: only '#/definitions/<name>' references are supported, found '{fragment}'")]
pub struct ReferenceFormatError {
    pub schema_id: String,
    pub property: String,
    pub fragment: String,
}

/// A hint entry whose payload could not be decoded for its declared kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("hint for '{schema_id}' could not be decoded ({reason}): {payload}")]
pub struct HintDecodeError {
    pub schema_id: String,
    /// Raw JSON text of the offending entry.
    pub payload: String,
    pub reason: String,
}

/// Two class-producing schemas that map to the same generated class name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{first}' and '{second}' both generate class '{class_name}'; rename one with a ClassNameHint")]
pub struct ClassNameCollision {
    pub class_name: String,
    pub first: String,
    pub second: String,
}

/// One problem found while classifying the schema graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(transparent)]
    Reference(#[from] ReferenceFormatError),
    #[error(transparent)]
    Collision(#[from] ClassNameCollision),
}

/// Every problem found while classifying the schema graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ModelErrors(pub Vec<ModelError>);

impl fmt::Display for ModelErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s) in schema:", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

/// Every hint entry that failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct HintErrors(pub Vec<HintDecodeError>);

impl fmt::Display for HintErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hint entr(y/ies) could not be decoded:", self.0.len())?;
        for error in &self.0 {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid schema document: {0}")]
    Schema(String),
    #[error("invalid settings document: {0}")]
    Settings(String),
    #[error("invalid hint document: {0}")]
    HintDocument(String),
    #[error(transparent)]
    Model(#[from] ModelErrors),
    #[error(transparent)]
    Hints(#[from] HintErrors),
}
