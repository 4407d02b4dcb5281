pub mod bucket_scope;
pub mod symbol;
pub mod symbol_table;

pub use self::{bucket_scope::BucketScope, symbol::Symbol, symbol_table::SymbolTable};
