use strum_macros::Display;

/// Static type universe of the analyzed language.
///
/// `Unknown` is not a surface-syntax type; it is synthesized whenever lookup
/// fails so that downstream propagation has something to chain off without
/// cascading further diagnostics (see §7 propagation policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[allow(non_camel_case_types)]
pub enum DataType {
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "void")]
    Void,
    #[strum(serialize = "unknown")]
    Unknown,
}

impl DataType {
    /// Convert a type-specifier keyword spelling into a `DataType`.
    pub fn parse(spelling: &str) -> Option<DataType> {
        Some(match spelling.trim() {
            "int" => DataType::Int,
            "float" => DataType::Float,
            "void" => DataType::Void,
            _ => return None,
        })
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Int | DataType::Float)
    }
}
