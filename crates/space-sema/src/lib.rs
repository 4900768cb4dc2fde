//! Semantic analysis over a parsed SPACE source file: scope-aware name
//! resolution, declared-type checking, modifier enforcement, and
//! statement-placement rules.

pub mod analyze;
pub mod error;
pub mod external;
pub mod scope;
pub mod ty;

pub use analyze::{analyze, AnalysisResult};
pub use error::SemanticError;
pub use external::ExternalReference;
pub use scope::{Entry, EntryKind, ScopeArena, ScopeKind, Visibility};
pub use ty::VarDec;
