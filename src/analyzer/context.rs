use crate::analyzer::ast::DataType;
use crate::analyzer::diagnostics::DiagnosticSink;

/// One in-flight function call's accumulated argument list: rendered text
/// and propagated type per argument, in left-to-right order.
pub type ArgumentFrame = Vec<(String, DataType)>;

/// Transient state threaded through semantic actions during a single
/// analysis run (SPEC_FULL §3/§5). Grounded on the field list of the
/// teacher's `BarracudaSemanticAnalyser`
/// (`compiler/src/compiler/semantic_analyser/barracuda_pest_semantic_analyser.rs`),
/// generalized into one context value.
///
/// Departs from the teacher on one point (Decision D1): the teacher reuses
/// a single buffer for both a function header's formal-parameter list and
/// a call's argument list, which corrupts nested calls such as `f(g(x))`.
/// This context keeps `pending_formals` separate from a *stack* of
/// `pending_arguments` frames, one pushed per call still being parsed, so
/// nested calls never see each other's partially built argument lists.
pub struct AnalysisContext {
    pub current_type: DataType,
    pub current_func_name: Option<String>,
    pending_formals: Vec<(DataType, String)>,
    pending_arguments: Vec<ArgumentFrame>,
    pub line_number: u32,
    pub diagnostics: DiagnosticSink,
}

impl AnalysisContext {
    pub fn new() -> Self {
        AnalysisContext {
            current_type: DataType::Void,
            current_func_name: None,
            pending_formals: Vec::new(),
            pending_arguments: Vec::new(),
            line_number: 0,
            diagnostics: DiagnosticSink::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.error_count()
    }

    pub fn emit(&mut self, message: impl Into<String>) {
        self.diagnostics.push(self.line_number, message);
    }

    pub fn push_formal(&mut self, datatype: DataType, name: String) {
        self.pending_formals.push((datatype, name));
    }

    pub fn formal_has_duplicate(&self, name: &str) -> bool {
        self.pending_formals
            .iter()
            .filter(|(_, formal_name)| formal_name == name)
            .count()
            > 1
    }

    /// Hands ownership of the accumulated formals to the caller and clears
    /// the buffer, as required after a function header is inserted (§4.5).
    pub fn take_formals(&mut self) -> Vec<(DataType, String)> {
        std::mem::take(&mut self.pending_formals)
    }

    /// Opens a fresh argument frame for a call that is about to start
    /// accumulating its argument list.
    pub fn enter_call(&mut self) {
        self.pending_arguments.push(Vec::new());
    }

    pub fn push_argument(&mut self, text: String, datatype: DataType) {
        self.pending_arguments
            .last_mut()
            .expect("enter_call must precede push_argument")
            .push((text, datatype));
    }

    /// Pops and returns the innermost call's argument frame, as required
    /// after that call is checked (§4.6).
    pub fn take_call(&mut self) -> ArgumentFrame {
        self.pending_arguments
            .pop()
            .expect("enter_call must precede take_call")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_calls_do_not_corrupt_each_others_argument_frames() {
        let mut context = AnalysisContext::new();
        context.enter_call(); // f(
        context.enter_call(); // g(
        context.push_argument("x".to_string(), DataType::Int);
        let inner = context.take_call(); // g's frame
        context.push_argument("g(x)".to_string(), DataType::Int); // f's first arg
        let outer = context.take_call();

        assert_eq!(inner, vec![("x".to_string(), DataType::Int)]);
        assert_eq!(outer, vec![("g(x)".to_string(), DataType::Int)]);
    }

    #[test]
    fn duplicate_formal_name_is_detected() {
        let mut context = AnalysisContext::new();
        context.push_formal(DataType::Int, "a".to_string());
        assert!(!context.formal_has_duplicate("a"));
        context.push_formal(DataType::Float, "a".to_string());
        assert!(context.formal_has_duplicate("a"));
    }
}
