use crate::analyzer::ast::DataType;

/// A function's signature as captured at its definition site. Grounded on
/// the teacher's `FunctionTracker`
/// (`compiler/src/compiler/semantic_analyser/function_tracker.rs`), trimmed
/// to what §4.5/§4.6 need: this spec has no separate-implementation/
/// forward-declaration split, so `body`/`implementations` are dropped.
#[derive(Debug, Clone)]
pub struct FunctionSignature {
    pub name: String,
    pub return_type: DataType,
    pub parameters: Vec<(DataType, String)>,
}

/// Outcome of checking one call site's arguments against a signature,
/// mirroring the three failure modes enumerated in §4.6.
pub enum CallCheck {
    Ok,
    ArityMismatch,
    ArgumentMismatch(usize),
}

impl FunctionSignature {
    pub fn check_call(&self, arguments: &[(String, DataType)]) -> CallCheck {
        if arguments.len() != self.parameters.len() {
            return CallCheck::ArityMismatch;
        }
        for (index, ((_, argument_type), (parameter_type, _))) in
            arguments.iter().zip(self.parameters.iter()).enumerate()
        {
            if argument_type != parameter_type {
                return CallCheck::ArgumentMismatch(index + 1);
            }
        }
        CallCheck::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signature() -> FunctionSignature {
        FunctionSignature {
            name: "add".to_string(),
            return_type: DataType::Int,
            parameters: vec![
                (DataType::Int, "a".to_string()),
                (DataType::Int, "b".to_string()),
            ],
        }
    }

    #[test]
    fn matching_call_is_ok() {
        let arguments = vec![
            ("1".to_string(), DataType::Int),
            ("2".to_string(), DataType::Int),
        ];
        assert!(matches!(signature().check_call(&arguments), CallCheck::Ok));
    }

    #[test]
    fn wrong_arity_is_reported() {
        let arguments = vec![("1".to_string(), DataType::Int)];
        assert!(matches!(
            signature().check_call(&arguments),
            CallCheck::ArityMismatch
        ));
    }

    #[test]
    fn wrong_argument_type_reports_one_indexed_position() {
        let arguments = vec![
            ("1".to_string(), DataType::Int),
            ("2.0".to_string(), DataType::Float),
        ];
        assert!(matches!(
            signature().check_call(&arguments),
            CallCheck::ArgumentMismatch(2)
        ));
    }
}
