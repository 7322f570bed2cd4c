//! Compile a JSON Schema into generated class declarations with value
//! equality, hashing, ordering, deep copy and a rewriting visitor.
//!
//! ```text
//! schema + hints → ClassRegistry → synth passes → CompilationUnit → Printer
//! ```
pub mod error;
pub mod generate;
pub mod hints;
pub mod ir;
pub mod model;
pub mod path_de;
pub mod render;
pub mod schema;
pub mod semantics;
pub mod settings;
pub mod synth;

pub use error::GenerateError;
pub use generate::{RenderedFile, generate, render_all};
pub use hints::{HintRegistry, HintTable};
pub use model::ClassRegistry;
pub use render::{CSharpPrinter, Printer};
pub use schema::JsonSchema;
pub use settings::GeneratorSettings;
