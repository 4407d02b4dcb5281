use super::bucket_scope::BucketScope;
use super::symbol::Symbol;
use crate::analyzer::ast::{ScopeId, ScopeIdGenerator};

/// A stack of `BucketScope`s plus the rendered history of every scope that
/// has already closed. Grounded on the teacher's `SymbolTable` +
/// `semantic_analyser/scope_tracker.rs`
/// (`compiler/src/compiler/ast/symbol_table.rs`,
/// `compiler/src/compiler/semantic_analyser/scope_tracker.rs`), merged into
/// one object per SPEC_FULL §4.1 instead of kept as the teacher's two
/// parallel trackers.
pub struct SymbolTable {
    stack: Vec<BucketScope>,
    generator: ScopeIdGenerator,
    closed: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            stack: vec![BucketScope::new(ScopeId::global())],
            generator: ScopeIdGenerator::new(),
            closed: Vec::new(),
        }
    }

    pub fn current_scope_id(&self) -> ScopeId {
        self.stack.last().expect("scope stack is never empty").id
    }

    pub fn enter_scope(&mut self) -> ScopeId {
        let id = self.generator.next().expect("ScopeIdGenerator never ends");
        self.stack.push(BucketScope::new(id));
        id
    }

    /// Pops the innermost scope, archiving its rendering for
    /// `print_all_scopes`. Panics if called with only the global scope left
    /// on the stack: every `enter_scope` must be paired with exactly one
    /// `exit_scope`, mirroring the teacher's own unpaired-scope panics.
    pub fn exit_scope(&mut self) -> BucketScope {
        if self.stack.len() <= 1 {
            panic!("exit_scope called with no open scope to close");
        }
        let scope = self.stack.pop().expect("checked len above");
        self.closed.push(render_scope(&scope));
        scope
    }

    pub fn insert(&mut self, symbol: Symbol) -> bool {
        self.stack
            .last_mut()
            .expect("scope stack is never empty")
            .insert(symbol)
    }

    /// Walks from the innermost open scope outward to the global scope,
    /// returning the first match. This is what makes an inner declaration
    /// shadow an outer one of the same name.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.stack.iter().rev().find_map(|scope| scope.lookup(name))
    }

    pub fn lookup_current_scope(&self, name: &str) -> Option<&Symbol> {
        self.stack
            .last()
            .expect("scope stack is never empty")
            .lookup(name)
    }

    pub fn print_current_scope(&self) -> String {
        render_scope(self.stack.last().expect("scope stack is never empty"))
    }

    /// Every scope that has ever existed in this analysis run, in the order
    /// each one closed, followed by whatever scopes remain open (innermost
    /// last). Used for the end-of-run report (SPEC_FULL §6).
    pub fn print_all_scopes(&self) -> String {
        let mut rendered: Vec<String> = self.closed.clone();
        for scope in &self.stack {
            rendered.push(render_scope(scope));
        }
        rendered.join("\n")
    }
}

fn render_scope(scope: &BucketScope) -> String {
    if scope.is_empty() {
        return format!("scope {:?}: <empty>", scope.id);
    }
    let mut lines = vec![format!("scope {:?}:", scope.id)];
    for symbol in scope.symbols() {
        lines.push(format!("  {}", symbol.render()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::ast::DataType;

    #[test]
    fn global_scope_exists_before_any_enter() {
        let table = SymbolTable::new();
        assert_eq!(table.current_scope_id(), ScopeId::global());
    }

    #[test]
    fn exit_scope_without_enter_panics() {
        let mut table = SymbolTable::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| table.exit_scope()));
        assert!(result.is_err());
    }

    #[test]
    fn inner_declaration_shadows_outer_one() {
        let mut table = SymbolTable::new();
        table.insert(Symbol::variable("x".to_string(), DataType::Int));
        table.enter_scope();
        table.insert(Symbol::variable("x".to_string(), DataType::Float));

        assert_eq!(table.lookup("x").unwrap().data_type, DataType::Float);
        table.exit_scope();
        assert_eq!(table.lookup("x").unwrap().data_type, DataType::Int);
    }

    #[test]
    fn duplicate_declaration_in_same_scope_is_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.insert(Symbol::variable("x".to_string(), DataType::Int)));
        assert!(!table.insert(Symbol::variable("x".to_string(), DataType::Float)));
    }

    #[test]
    fn insertion_order_is_preserved_within_a_bucket() {
        let mut table = SymbolTable::new();
        table.insert(Symbol::variable("aa".to_string(), DataType::Int));
        table.insert(Symbol::variable("qq".to_string(), DataType::Int));
        let names: Vec<&str> = table
            .stack
            .last()
            .unwrap()
            .symbols()
            .map(|symbol| symbol.name.as_str())
            .collect();
        assert_eq!(names, vec!["aa", "qq"]);
    }

    #[test]
    fn lookup_current_scope_does_not_see_outer_declarations() {
        let mut table = SymbolTable::new();
        table.insert(Symbol::variable("x".to_string(), DataType::Int));
        table.enter_scope();
        assert!(table.lookup_current_scope("x").is_none());
        assert!(table.lookup("x").is_some());
    }
}
