// External Modules
extern crate pest;
#[macro_use]
extern crate pest_derive;

// Internal Modules
pub(crate) mod analyzer;

pub use self::analyzer::ast::ASTNode;
pub use self::analyzer::diagnostics::{Diagnostic, DiagnosticSink};
pub use self::analyzer::parser::PestAstParser;
pub use self::analyzer::symtab::{Symbol, SymbolTable};
pub use self::analyzer::{AnalysisOutcome, Analyzer};
