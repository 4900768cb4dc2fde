//! Semantic errors, one variant per rule enforced by `Analyzer`.

use std::fmt;

use space_common::{Category, Span};

#[derive(Debug, Clone)]
pub enum SemanticError {
    UndeclaredName {
        name: String,
        span: Span,
    },
    Redeclaration {
        name: String,
        span: Span,
    },
    UnknownType {
        name: String,
        span: Span,
    },
    TypeMismatch {
        expected: String,
        found: String,
        span: Span,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },
    ConstReassignment {
        name: String,
        span: Span,
    },
    ModifierViolation {
        name: String,
        reason: String,
        span: Span,
    },
    IllegalAccess {
        name: String,
        span: Span,
    },
    MisplacedStatement {
        what: &'static str,
        span: Span,
    },
    WrongAccessor {
        name: String,
        span: Span,
    },
    NoSuchArrayDimension {
        name: String,
        span: Span,
    },
}

impl SemanticError {
    pub fn span(&self) -> Span {
        match self {
            SemanticError::UndeclaredName { span, .. }
            | SemanticError::Redeclaration { span, .. }
            | SemanticError::UnknownType { span, .. }
            | SemanticError::TypeMismatch { span, .. }
            | SemanticError::ArityMismatch { span, .. }
            | SemanticError::ConstReassignment { span, .. }
            | SemanticError::ModifierViolation { span, .. }
            | SemanticError::IllegalAccess { span, .. }
            | SemanticError::MisplacedStatement { span, .. }
            | SemanticError::WrongAccessor { span, .. }
            | SemanticError::NoSuchArrayDimension { span, .. } => *span,
        }
    }

    /// Maps each rule to the exception category named in the fixed
    /// diagnostic format.
    pub fn category(&self) -> Category {
        match self {
            SemanticError::UndeclaredName { .. } => Category::Exception,
            SemanticError::Redeclaration { .. } => Category::AlreadyDefinedException,
            SemanticError::UnknownType { .. } => Category::Exception,
            SemanticError::TypeMismatch { .. } => Category::TypeMismatchException,
            SemanticError::ArityMismatch { .. } => Category::ArityMismatchException,
            SemanticError::ConstReassignment { .. } => Category::ModifierException,
            SemanticError::ModifierViolation { .. } => Category::ModifierException,
            SemanticError::IllegalAccess { .. } => Category::ModifierException,
            SemanticError::MisplacedStatement { .. } => Category::StatementMisplacementException,
            SemanticError::WrongAccessor { .. } => Category::WrongAccessorException,
            SemanticError::NoSuchArrayDimension { .. } => {
                Category::NoSuchArrayDimensionException
            }
        }
    }
}

impl fmt::Display for SemanticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticError::UndeclaredName { name, .. } => {
                write!(f, "undeclared name `{name}`")
            }
            SemanticError::Redeclaration { name, .. } => {
                write!(f, "`{name}` is already declared in this scope")
            }
            SemanticError::UnknownType { name, .. } => {
                write!(f, "unknown type `{name}`")
            }
            SemanticError::TypeMismatch {
                expected, found, ..
            } => {
                write!(f, "type mismatch: expected `{expected}`, found `{found}`")
            }
            SemanticError::ArityMismatch {
                name,
                expected,
                found,
                ..
            } => {
                write!(
                    f,
                    "`{name}` expects {expected} argument(s), found {found}"
                )
            }
            SemanticError::ConstReassignment { name, .. } => {
                write!(f, "cannot assign to constant `{name}`")
            }
            SemanticError::ModifierViolation { name, reason, .. } => {
                write!(f, "`{name}`: {reason}")
            }
            SemanticError::IllegalAccess { name, .. } => {
                write!(f, "`{name}` is not accessible from this context")
            }
            SemanticError::MisplacedStatement { what, .. } => {
                write!(f, "`{what}` is not valid in this position")
            }
            SemanticError::WrongAccessor { name, .. } => {
                write!(f, "wrong accessor used on `{name}`")
            }
            SemanticError::NoSuchArrayDimension { name, .. } => {
                write!(f, "`{name}` has no such array dimension")
            }
        }
    }
}
