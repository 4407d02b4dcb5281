/// A single emitted diagnostic: a source line and the literal message text
/// named in the taxonomy (SPEC_FULL §7). Warnings are not a distinct
/// variant — the message text itself carries the `Warning:` prefix when
/// applicable, and every diagnostic increments `error_count` uniformly
/// (Decision D2 in DESIGN.md).
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            message: message.into(),
        }
    }

    /// `At line no: <N> <message>`, bit-exact for test compatibility
    /// (SPEC_FULL §6).
    pub fn render(&self) -> String {
        format!("At line no: {} {}", self.line, self.message)
    }
}

/// Append-only diagnostic sink. Diagnostics are data, never `Result::Err`
/// (SPEC_FULL §7) — every semantic check pushes here and the analyzer keeps
/// going.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        DiagnosticSink::default()
    }

    pub fn push(&mut self, line: u32, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(line, message));
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_matches_the_bit_exact_format() {
        let diagnostic = Diagnostic::new(7, "Undeclared function: foo");
        assert_eq!(diagnostic.render(), "At line no: 7 Undeclared function: foo");
    }

    #[test]
    fn error_count_is_monotonically_nondecreasing() {
        let mut sink = DiagnosticSink::new();
        assert_eq!(sink.error_count(), 0);
        sink.push(1, "Undeclared variable");
        sink.push(2, "Warning: Assignment of float value into variable of integer type");
        assert_eq!(sink.error_count(), 2);
    }
}
