use std::ffi::OsString;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analyzer::ast::ASTNode;
use crate::analyzer::diagnostics::DiagnosticSink;
use crate::analyzer::symtab::SymbolTable;

/// Renders and writes the two output artifacts described in §6:
/// `<base>_log.txt` (the full trace, pretty-printed program, scope dumps,
/// totals) and `<base>_error.txt` (diagnostics only, plus a total).
///
/// Grounded on the reference crate's `Compiler::compile_and_save`
/// (`compiler/src/compiler/mod.rs`) for the create/write/report-success
/// shape, and its `SymbolTable`'s `fmt::Display` scope-dump implementation
/// (`src/compiler/ast/symbol_table.rs`) for the rendering idiom. Unlike the
/// teacher, which panics directly on a file-creation/write failure, this
/// returns an `anyhow::Result` so the CLI can report the failure and still
/// exit cleanly (§7's ambient I/O-boundary error-handling note).
pub fn write_report(
    base_path: &Path,
    program: &ASTNode,
    symbols: &SymbolTable,
    diagnostics: &DiagnosticSink,
    line_number: u32,
) -> Result<()> {
    let log_path = with_suffix(base_path, "_log.txt");
    let error_path = with_suffix(base_path, "_error.txt");

    write_log(&log_path, program, symbols, diagnostics, line_number)?;
    write_errors(&error_path, diagnostics)?;
    Ok(())
}

fn with_suffix(base_path: &Path, suffix: &str) -> PathBuf {
    let mut file_name: OsString = base_path.file_stem().unwrap_or_default().to_os_string();
    file_name.push(suffix);
    base_path.with_file_name(file_name)
}

fn write_log(path: &Path, program: &ASTNode, symbols: &SymbolTable, diagnostics: &DiagnosticSink, line_number: u32) -> Result<()> {
    let mut rendered = String::new();
    rendered.push_str(&render_trace(program));
    rendered.push_str(&program.to_string());
    rendered.push('\n');
    rendered.push_str(&symbols.print_all_scopes());
    rendered.push('\n');
    for diagnostic in diagnostics.iter() {
        rendered.push_str(&diagnostic.render());
        rendered.push('\n');
    }
    rendered.push_str(&format!("Total lines: {}\n", line_number));
    rendered.push_str(&format!("Total errors: {}\n", diagnostics.error_count()));

    write_file(path, &rendered)
}

/// One `At line no: <N> <production> : <rhs>` line per reduction, in
/// document order, per §4.9/§6's log format.
fn render_trace(program: &ASTNode) -> String {
    let mut rendered = String::new();
    program.each_statement(&mut |line, production, rhs| {
        rendered.push_str(&format!("At line no: {} {} : {}\n", line, production, rhs));
    });
    rendered
}

fn write_errors(path: &Path, diagnostics: &DiagnosticSink) -> Result<()> {
    let mut rendered = String::new();
    for diagnostic in diagnostics.iter() {
        rendered.push_str(&diagnostic.render());
        rendered.push('\n');
    }
    rendered.push_str(&format!("Total errors: {}\n", diagnostics.error_count()));

    write_file(path, &rendered)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    let display_path = path.display().to_string();
    let mut file = File::create(path).with_context(|| format!("Couldn't create {}", display_path))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Couldn't write to {}", display_path))?;
    println!("Successfully wrote to {}", display_path);
    Ok(())
}
