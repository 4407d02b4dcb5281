pub mod ast;
pub(crate) mod context;
pub mod diagnostics;
pub(crate) mod parser;
pub(crate) mod report;
pub(crate) mod semantic;
pub mod symtab;

use std::path::Path;

use anyhow::{Context as _, Result};

use self::ast::ASTNode;
use self::parser::AstParser;
use self::semantic::SemanticAnalyzer;
use self::symtab::SymbolTable;

/// Facade over the whole crate: parse, analyse, report. Grounded on the
/// reference crate's `Compiler<P, A, G>`
/// (`compiler/src/compiler/mod.rs`), narrowed to `Analyzer<P: AstParser>` —
/// no generator type parameter, since code generation is a Non-goal and
/// the semantic analyser here is a concrete type, not one more swappable
/// layer (there is exactly one way to analyse this language).
pub struct Analyzer<P: AstParser> {
    parser: P,
}

/// The result of a full run: the populated symbol table, the emitted
/// diagnostics, the parsed program (kept for the log's pretty-printed
/// reconstruction, §4.9), and the source line the last analysed reduction
/// fired on (the log's `Total lines` figure, §6).
pub struct AnalysisOutcome {
    pub symbols: SymbolTable,
    pub diagnostics: diagnostics::DiagnosticSink,
    pub program: ASTNode,
    pub line_number: u32,
}

impl<P: AstParser> Analyzer<P> {
    pub fn default() -> Self {
        Analyzer { parser: P::default() }
    }

    pub fn new(parser: P) -> Self {
        Analyzer { parser }
    }

    /// Parses and analyses a source string in one pass.
    pub fn analyse_str(&self, source: &str) -> AnalysisOutcome {
        let program = self.parser.parse(source);
        let mut analyzer = SemanticAnalyzer::new();
        analyzer.analyse(&program);
        AnalysisOutcome {
            symbols: analyzer.symbols,
            diagnostics: analyzer.context.diagnostics,
            line_number: analyzer.context.line_number,
            program,
        }
    }

    /// Reads a source file, analyses it, and writes the `_log.txt`/
    /// `_error.txt` report next to it. Mirrors the reference crate's
    /// `Compiler::compile` + `compile_and_save` for the read-then-process
    /// shape, but surfaces I/O failures as `anyhow::Result` per §7.
    pub fn analyse_file(&self, source_path: &Path) -> Result<AnalysisOutcome> {
        let source = std::fs::read_to_string(source_path)
            .with_context(|| format!("Couldn't read {}", source_path.display()))?;
        let outcome = self.analyse_str(&source);
        report::write_report(
            source_path,
            &outcome.program,
            &outcome.symbols,
            &outcome.diagnostics,
            outcome.line_number,
        )?;
        Ok(outcome)
    }
}
