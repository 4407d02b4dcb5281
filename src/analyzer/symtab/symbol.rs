use crate::analyzer::ast::{DataType, NodeKind};

/// Lexical category of the token that introduced this symbol. Preserved
/// only for parse-tree labelling (SPEC_FULL §3); the analyzer's checks are
/// all driven by `node_kind`, never by `token_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    TypeKeyword,
}

/// An immutable-after-population description of a declared name.
///
/// Construction helpers below enforce the per-`node_kind` invariants from
/// SPEC_FULL §3 (a `function` always carries a `return_type`, a `variable`
/// is never `void`, etc.) so a `Symbol` can never be built in a state that
/// violates them.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub token_kind: TokenKind,
    pub node_kind: NodeKind,
    pub data_type: DataType,
    pub return_type: Option<DataType>,
    pub parameters: Vec<(DataType, String)>,
    pub array_size: u32,
}

impl Symbol {
    pub fn variable(name: String, data_type: DataType) -> Self {
        Symbol {
            name,
            token_kind: TokenKind::Identifier,
            node_kind: NodeKind::Variable,
            data_type,
            return_type: None,
            parameters: Vec::new(),
            array_size: 0,
        }
    }

    pub fn array(name: String, element_type: DataType, array_size: u32) -> Self {
        Symbol {
            name,
            token_kind: TokenKind::Identifier,
            node_kind: NodeKind::Array,
            data_type: element_type,
            return_type: None,
            parameters: Vec::new(),
            array_size,
        }
    }

    pub fn function(name: String, return_type: DataType, parameters: Vec<(DataType, String)>) -> Self {
        Symbol {
            name,
            token_kind: TokenKind::Identifier,
            node_kind: NodeKind::Function,
            data_type: return_type,
            return_type: Some(return_type),
            parameters,
            array_size: 0,
        }
    }

    pub fn is_array(&self) -> bool {
        self.node_kind == NodeKind::Array
    }

    pub fn is_function(&self) -> bool {
        self.node_kind == NodeKind::Function
    }

    /// Human-readable rendering used by scope dumps (SPEC_FULL §6):
    /// `<name>: <data_type> <node_kind> [size=<n>] [params=(…)]`
    pub fn render(&self) -> String {
        let mut rendered = format!("{}: {} {}", self.name, self.data_type, self.node_kind.to_str());
        if self.is_array() {
            rendered.push_str(&format!(" [size={}]", self.array_size));
        }
        if self.is_function() {
            let params: Vec<String> = self
                .parameters
                .iter()
                .map(|(datatype, name)| format!("{} {}", datatype, name))
                .collect();
            rendered.push_str(&format!(" [params=({})]", params.join(", ")));
        }
        rendered
    }
}
