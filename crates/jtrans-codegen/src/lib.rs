//! C++ header generation for Java-style class hierarchies.
//!
//! Each class becomes a data struct holding a vtable pointer, a vtable struct
//! holding one function pointer per method, and static functions taking the
//! receiver as their first argument. No native C++ virtual functions are used.
//!
//! # Architecture
//!
//! ```text
//! TranslationUnit → HeaderGenerator
//!                     ├─ NamespaceResolver  → Head
//!                     ├─ layout             → ClassDecls
//!                     └─ vtable             → VTables
//!                   SectionBuffers::render() → header text
//! ```

mod error;
mod generator;
mod layout;
mod namespace;
mod options;
mod sections;
mod validate;
mod vtable;

pub use error::{ErrorKind, GenError, Result};
pub use generator::HeaderGenerator;
pub use layout::{emit_body, emit_forward};
pub use namespace::NamespaceResolver;
pub use options::GeneratorOptions;
pub use sections::{Section, SectionBuffers};
pub use vtable::{effective_slots, emit_vtable, ClassRef, Slot};

use jtrans_ast::TranslationUnit;

/// Generate the header for `unit`.
///
/// Classes must be ordered base before derived. On error nothing is
/// returned; a partially generated header is never valid C++.
pub fn generate(unit: &TranslationUnit, options: &GeneratorOptions) -> Result<String> {
    HeaderGenerator::new(options.clone()).generate(unit)
}
