//! Structural checks on a class before any of it is emitted.

use crate::error::{GenError, Result};
use jtrans_ast::ClassDef;
use rustc_hash::FxHashSet;

/// Members the generator declares in every struct body.
const GENERATED_MEMBERS: &[&str] = &["__vptr", "__class", "__vtable", "__is_a"];

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

pub(crate) fn check_identifier(context: &str, what: &'static str, ident: &str) -> Result<()> {
    if is_identifier(ident) {
        Ok(())
    } else {
        Err(GenError::InvalidIdentifier {
            context: context.to_string(),
            what,
            ident: ident.to_string(),
        })
    }
}

fn check_type(context: &str, what: String, ty: &str) -> Result<()> {
    if ty.trim().is_empty() {
        return Err(GenError::EmptyTypeName {
            context: context.to_string(),
            what,
        });
    }
    Ok(())
}

/// Reject names that would produce malformed or duplicate C++ declarations.
pub(crate) fn check_class(class: &ClassDef) -> Result<()> {
    let qualified = class.qualified_name();

    check_identifier(&qualified, "class name", &class.name)?;
    for segment in class.namespace.segments() {
        check_identifier(&qualified, "namespace segment", segment)?;
    }
    if let Some(base) = &class.base {
        for segment in base.split('.') {
            check_identifier(&qualified, "base class name", segment)?;
        }
    }

    let mut members: FxHashSet<&str> = GENERATED_MEMBERS.iter().copied().collect();

    for field in &class.fields {
        check_identifier(&qualified, "field name", &field.name)?;
        check_type(&qualified, format!("field `{}`", field.name), &field.ty)?;
        if !members.insert(field.name.as_str()) {
            return Err(GenError::DuplicateMember {
                class: qualified,
                kind: "field",
                member: field.name.to_string(),
            });
        }
    }

    for method in &class.methods {
        check_identifier(&qualified, "method name", &method.name)?;
        check_type(&qualified, format!("return of `{}`", method.name), &method.return_type)?;
        if !members.insert(method.name.as_str()) {
            return Err(GenError::DuplicateMember {
                class: qualified,
                kind: "method",
                member: method.name.to_string(),
            });
        }

        let mut params: FxHashSet<&str> = FxHashSet::default();
        params.insert("self");
        for (i, param) in method.params.iter().enumerate() {
            check_type(&qualified, format!("parameter {} of `{}`", i, method.name), &param.ty)?;
            if param.name.is_empty() {
                continue;
            }
            check_identifier(&qualified, "parameter name", &param.name)?;
            if !params.insert(param.name.as_str()) {
                return Err(GenError::DuplicateMember {
                    class: qualified,
                    kind: "parameter",
                    member: format!("{}::{}", method.name, param.name),
                });
            }
        }
    }

    Ok(())
}
