//! Vtable structs and the binding of each slot to its implementation.
//!
//! A class's slots are its ancestor's slots followed by its own new methods.
//! Each slot remembers the class that declared the implementation it is
//! bound to, so walking the hierarchy root to leaf gives every derived class
//! the nearest declaring ancestor in one lookup per slot.

use crate::error::{GenError, Result};
use crate::layout::{struct_name, vtable_name};
use crate::sections::{Section, SectionBuffers};
use jtrans_ast::{ClassDef, MethodDef, NamespacePath};
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use tracing::trace;

/// A class identified by its namespace and simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassRef {
    pub name: SmolStr,
    pub namespace: NamespacePath,
}

impl ClassRef {
    pub fn of(class: &ClassDef) -> Self {
        Self {
            name: class.name.clone(),
            namespace: class.namespace.clone(),
        }
    }

    /// Data struct name as seen from code emitted inside `from`.
    pub fn struct_path(&self, from: &NamespacePath) -> String {
        if &self.namespace == from {
            struct_name(&self.name)
        } else {
            format!("{}::{}", self.namespace.to_cpp(), struct_name(&self.name))
        }
    }
}

/// One function pointer in a vtable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    /// Signature of the bound implementation.
    pub method: MethodDef,
    /// Class whose static function the slot points to.
    pub declared_by: ClassRef,
}

/// Compute the slots of `class` given the slots of its base.
///
/// Order: inherited slots `class` does not override, then inherited slots it
/// overrides (rebound to `class`), then its new methods in declaration order.
pub fn effective_slots(class: &ClassDef, inherited: &[Slot]) -> Result<Vec<Slot>> {
    let this = ClassRef::of(class);
    let inherited_names: FxHashSet<&str> = inherited.iter().map(|s| s.method.name.as_str()).collect();

    let mut overrides: FxHashMap<&str, &MethodDef> = FxHashMap::default();
    for method in &class.methods {
        let is_inherited = inherited_names.contains(method.name.as_str());
        match (method.is_override, is_inherited) {
            (true, false) => {
                return Err(GenError::DanglingOverride {
                    class: class.qualified_name(),
                    method: method.name.to_string(),
                })
            }
            (false, true) => {
                return Err(GenError::UnmarkedOverride {
                    class: class.qualified_name(),
                    method: method.name.to_string(),
                })
            }
            (true, true) => {
                overrides.insert(method.name.as_str(), method);
            }
            (false, false) => {}
        }
    }

    let mut slots = Vec::with_capacity(inherited.len() + class.methods.len() - overrides.len());
    slots.extend(
        inherited
            .iter()
            .filter(|s| !overrides.contains_key(s.method.name.as_str()))
            .cloned(),
    );
    for slot in inherited {
        if let Some(method) = overrides.get(slot.method.name.as_str()) {
            slots.push(Slot {
                method: (*method).clone(),
                declared_by: this.clone(),
            });
        }
    }
    slots.extend(class.methods.iter().filter(|m| !m.is_override).map(|m| Slot {
        method: m.clone(),
        declared_by: this.clone(),
    }));
    Ok(slots)
}

/// Emit the vtable struct of `class` and return its slots.
pub fn emit_vtable(out: &mut SectionBuffers, class: &ClassDef, inherited: &[Slot]) -> Result<Vec<Slot>> {
    let slots = effective_slots(class, inherited)?;
    let this = ClassRef::of(class);
    let vtable = vtable_name(&class.name);

    out.line(Section::VTables, &format!("struct {} {{", vtable));
    out.indent(Section::VTables);

    out.line(Section::VTables, "Class __is_a;");
    for slot in &slots {
        out.line(
            Section::VTables,
            &format!(
                "{} (*{})({});",
                slot.method.return_type,
                slot.method.name,
                pointer_params(&class.name, &slot.method)
            ),
        );
    }
    out.blank(Section::VTables);

    let mut initializers = vec![format!("__is_a({}::__class())", struct_name(&class.name))];
    for slot in &slots {
        let binding = binding(&this, slot, &class.name);
        trace!(class = %class.qualified_name(), slot = %slot.method.name, %binding, "bound vtable slot");
        initializers.push(format!("{}({})", slot.method.name, binding));
    }

    out.line(Section::VTables, &format!("{}()", vtable));
    let last = initializers.len() - 1;
    for (i, init) in initializers.iter().enumerate() {
        let lead = if i == 0 { ": " } else { "  " };
        let sep = if i == last { "" } else { "," };
        out.line(Section::VTables, &format!("{}{}{}", lead, init, sep));
    }
    out.line(Section::VTables, "{}");

    out.dedent(Section::VTables);
    out.line(Section::VTables, "};");
    out.blank(Section::VTables);

    Ok(slots)
}

/// Receiver typedef followed by the parameter types.
fn pointer_params(receiver: &str, method: &MethodDef) -> String {
    std::iter::once(receiver)
        .chain(method.params.iter().map(|p| p.ty.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Initializer expression for `slot` in the vtable of `this`.
///
/// Implementations inherited from an ancestor take the ancestor's receiver
/// type, so the pointer is cast to the slot's type.
fn binding(this: &ClassRef, slot: &Slot, receiver: &str) -> String {
    let target = format!(
        "&{}::{}",
        slot.declared_by.struct_path(&this.namespace),
        slot.method.name
    );
    if &slot.declared_by == this {
        target
    } else {
        format!(
            "({}(*)({})){}",
            slot.method.return_type,
            pointer_params(receiver, &slot.method),
            target
        )
    }
}
