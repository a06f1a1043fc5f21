//! Class-level AST for the jtrans header generator.
//!
//! The AST arrives already parsed and type-checked: classes are listed base
//! before derived, and every method carries its resolved `is_override` flag.
//! Nothing here validates semantics; the generator reports what it cannot emit.

mod class;
mod namespace;
mod unit;

pub use class::{ClassDef, FieldDef, MethodDef, Param};
pub use namespace::NamespacePath;
pub use unit::TranslationUnit;
