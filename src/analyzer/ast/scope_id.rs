/// Scope Id defines the unique id associated with every scope regardless
/// of position in the scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId {
    id: u64,
}

impl ScopeId {
    pub fn global() -> Self {
        ScopeId { id: 0 }
    }

    fn new(id: u64) -> Self {
        ScopeId { id }
    }
}

/// Hands out strictly increasing `ScopeId`s, starting just past the global
/// scope. One generator lives for the lifetime of a single analysis run.
pub struct ScopeIdGenerator {
    next: u64,
}

impl ScopeIdGenerator {
    pub fn new() -> Self {
        ScopeIdGenerator { next: 1 }
    }
}

impl Iterator for ScopeIdGenerator {
    type Item = ScopeId;

    fn next(&mut self) -> Option<ScopeId> {
        let id = ScopeId::new(self.next);
        self.next += 1;
        Some(id)
    }
}
