//! Errors raised while generating a header.
//!
//! Every error aborts the whole translation unit: a header with a missing
//! forward declaration or an inconsistent vtable slot is not usable C++.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenError>;

/// Broad category of a [`GenError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or duplicated names in the input AST.
    InputValidation,
    /// Classes or declarations requested out of order.
    Ordering,
    /// An override flag without an inherited method to replace.
    DanglingOverride,
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("invalid {what} `{ident}` in `{context}`")]
    #[diagnostic(
        code(jtrans::invalid_identifier),
        help("identifiers must be non-empty and match [A-Za-z_][A-Za-z0-9_]*")
    )]
    InvalidIdentifier {
        context: String,
        what: &'static str,
        ident: String,
    },

    #[error("empty type name for {what} in `{context}`")]
    #[diagnostic(code(jtrans::empty_type))]
    EmptyTypeName { context: String, what: String },

    #[error("class `{class}` is declared more than once")]
    #[diagnostic(
        code(jtrans::duplicate_class),
        help("class names must be unique within their namespace")
    )]
    DuplicateClass { class: String },

    #[error("{kind} `{member}` is declared more than once in `{class}`")]
    #[diagnostic(code(jtrans::duplicate_member))]
    DuplicateMember {
        class: String,
        kind: &'static str,
        member: String,
    },

    #[error("method `{method}` of `{class}` reuses an inherited slot but is not marked as an override")]
    #[diagnostic(
        code(jtrans::unmarked_override),
        help("methods are keyed by name; set the override flag or rename the method")
    )]
    UnmarkedOverride { class: String, method: String },

    #[error("struct body for `{class}` requested before its forward declaration")]
    #[diagnostic(code(jtrans::body_before_forward))]
    BodyBeforeForward { class: String },

    #[error("base class `{base}` of `{class}` has not been emitted yet")]
    #[diagnostic(
        code(jtrans::base_not_emitted),
        help("classes must be ordered so every base precedes its subclasses")
    )]
    BaseNotEmitted { class: String, base: String },

    #[error("base class `{base}` of `{class}` is ambiguous: {candidates}")]
    #[diagnostic(
        code(jtrans::ambiguous_base),
        help("use the dotted package name of the base class")
    )]
    AmbiguousBase {
        class: String,
        base: String,
        candidates: String,
    },

    #[error("method `{method}` of `{class}` is marked as an override but no base class declares it")]
    #[diagnostic(code(jtrans::dangling_override))]
    DanglingOverride { class: String, method: String },
}

impl GenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenError::InvalidIdentifier { .. }
            | GenError::EmptyTypeName { .. }
            | GenError::DuplicateClass { .. }
            | GenError::DuplicateMember { .. }
            | GenError::UnmarkedOverride { .. }
            | GenError::AmbiguousBase { .. } => ErrorKind::InputValidation,
            GenError::BodyBeforeForward { .. } | GenError::BaseNotEmitted { .. } => {
                ErrorKind::Ordering
            }
            GenError::DanglingOverride { .. } => ErrorKind::DanglingOverride,
        }
    }
}
