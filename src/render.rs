//! Text rendering of compilation units.
pub mod csharp;
pub mod doc;

use crate::ir::CompilationUnit;

pub use csharp::CSharpPrinter;

pub trait Printer: Sync {
    fn file_extension(&self) -> &'static str;

    fn print(&self, unit: &CompilationUnit) -> String;

    fn file_name(&self, unit: &CompilationUnit) -> String {
        format!("{}.{}", unit.name, self.file_extension())
    }
}
