//! Header generation driver: orders the emitters over a translation unit.

use crate::error::{GenError, Result};
use crate::layout::{emit_body, emit_forward};
use crate::namespace::NamespaceResolver;
use crate::options::GeneratorOptions;
use crate::sections::{Section, SectionBuffers};
use crate::validate::check_class;
use crate::vtable::{effective_slots, emit_vtable, ClassRef, Slot};
use indexmap::IndexMap;
use jtrans_ast::{ClassDef, NamespacePath, TranslationUnit};
use tracing::debug;

/// Emission state of a class seen by the generator.
#[derive(Debug, Clone)]
struct ClassEntry {
    class_ref: ClassRef,
    /// Set once the class's slots are known.
    slots: Option<Vec<Slot>>,
}

/// Generates one C++ header from classes supplied base-first.
///
/// A generator owns its buffers; use one instance per translation unit.
#[derive(Debug)]
pub struct HeaderGenerator {
    options: GeneratorOptions,
    out: SectionBuffers,
    namespaces: NamespaceResolver,
    /// Keyed by dotted qualified name, in the order classes were declared.
    classes: IndexMap<String, ClassEntry>,
}

impl HeaderGenerator {
    /// Create a generator and write the fixed preamble.
    pub fn new(options: GeneratorOptions) -> Self {
        let mut out = SectionBuffers::new(options.indent_unit());
        out.write(Section::Head, "#pragma once", false, 2);
        out.write(
            Section::Head,
            &format!("#include \"{}\"", options.runtime_header),
            false,
            2,
        );
        if !options.runtime_namespace.is_empty() {
            out.write(
                Section::Head,
                &format!("using namespace {};", options.runtime_namespace.join("::")),
                false,
                2,
            );
        }
        Self {
            options,
            out,
            namespaces: NamespaceResolver::new(),
            classes: IndexMap::new(),
        }
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Generate a whole translation unit.
    pub fn generate(mut self, unit: &TranslationUnit) -> Result<String> {
        self.emit_unit(unit)?;
        Ok(self.finish())
    }

    /// Emit every class of `unit`.
    ///
    /// Classes are grouped by namespace path in first-seen order and emitted
    /// in three passes: every forward declaration, then every body, then
    /// every vtable. Each pass opens a group's namespace once, and a pass
    /// that starts in the namespace the previous one ended in reuses it.
    /// Slots are computed in unit order before anything but the forward
    /// declarations is written, so a derived class listed before its base
    /// fails before any body is emitted.
    pub fn emit_unit(&mut self, unit: &TranslationUnit) -> Result<()> {
        let mut groups: IndexMap<&NamespacePath, Vec<&ClassDef>> = IndexMap::new();
        for class in &unit.classes {
            groups.entry(&class.namespace).or_default().push(class);
        }

        self.emit_groups(&groups, |generator, class| generator.declare_forward(class))?;
        for class in &unit.classes {
            self.link(class)?;
        }
        self.emit_groups(&groups, |generator, class| generator.declare_body(class))?;
        self.emit_groups(&groups, |generator, class| {
            generator.declare_vtable(class).map(|_| ())
        })
    }

    /// Run `emit` over every class, one namespace block per group.
    fn emit_groups<F>(
        &mut self,
        groups: &IndexMap<&NamespacePath, Vec<&ClassDef>>,
        mut emit: F,
    ) -> Result<()>
    where
        F: FnMut(&mut Self, &ClassDef) -> Result<()>,
    {
        for (path, classes) in groups {
            self.out.flush();
            self.enter_namespace(path)?;
            for class in classes {
                emit(self, *class)?;
            }
        }
        Ok(())
    }

    /// Switch the head to `path`, closing everything when `path` is the
    /// global namespace.
    fn enter_namespace(&mut self, path: &NamespacePath) -> Result<()> {
        let written = if path.is_root() {
            self.namespaces.close_all(&mut self.out)
        } else {
            self.namespaces.open_namespace(&mut self.out, path)?
        };
        if written > 0 {
            self.out.blank(Section::Head);
        }
        Ok(())
    }

    /// Open `path` in the head section.
    pub fn open_namespace(&mut self, path: &NamespacePath) -> Result<()> {
        self.namespaces.open_namespace(&mut self.out, path)?;
        Ok(())
    }

    /// Close all open namespaces.
    pub fn close_all(&mut self) {
        self.namespaces.close_all(&mut self.out);
    }

    /// Validate `class` and emit its forward declarations.
    pub fn declare_forward(&mut self, class: &ClassDef) -> Result<()> {
        check_class(class)?;
        let key = class.qualified_name();
        if self.classes.contains_key(&key) {
            return Err(GenError::DuplicateClass { class: key });
        }
        emit_forward(&mut self.out, class);
        self.classes.insert(
            key,
            ClassEntry {
                class_ref: ClassRef::of(class),
                slots: None,
            },
        );
        Ok(())
    }

    /// Emit the struct body of a forward-declared class.
    pub fn declare_body(&mut self, class: &ClassDef) -> Result<()> {
        if !self.classes.contains_key(&class.qualified_name()) {
            return Err(GenError::BodyBeforeForward {
                class: class.qualified_name(),
            });
        }
        emit_body(&mut self.out, class);
        Ok(())
    }

    /// Emit the vtable of `class`, inheriting the slots of its already
    /// emitted base. Returns the class's slots.
    pub fn declare_vtable(&mut self, class: &ClassDef) -> Result<&[Slot]> {
        let key = class.qualified_name();
        if !self.classes.contains_key(&key) {
            return Err(GenError::BodyBeforeForward { class: key });
        }

        let inherited = self.inherited_slots(class)?;
        let slots = emit_vtable(&mut self.out, class, &inherited)?;
        debug!(
            class = %key,
            base = class.base.as_deref().unwrap_or("-"),
            slots = slots.len(),
            "emitted class"
        );
        self.store_slots(key, slots)
    }

    /// Compute the slots of a forward-declared class without writing
    /// anything.
    fn link(&mut self, class: &ClassDef) -> Result<()> {
        let inherited = self.inherited_slots(class)?;
        let slots = effective_slots(class, &inherited)?;
        self.store_slots(class.qualified_name(), slots)?;
        Ok(())
    }

    fn inherited_slots(&self, class: &ClassDef) -> Result<Vec<Slot>> {
        match &class.base {
            Some(base) => Ok(self.resolve_base(class, base)?.to_vec()),
            None => Ok(Vec::new()),
        }
    }

    fn store_slots(&mut self, key: String, slots: Vec<Slot>) -> Result<&[Slot]> {
        let entry = self
            .classes
            .get_mut(&key)
            .ok_or(GenError::BodyBeforeForward { class: key })?;
        let slots: &[Slot] = entry.slots.insert(slots);
        Ok(slots)
    }

    /// Slots of the class `base` refers to, from the point of view of
    /// `class`. A dotted name is looked up as written; a simple name is
    /// looked up in `class`'s namespace first, then across all emitted
    /// classes, where it must be unique.
    fn resolve_base(&self, class: &ClassDef, base: &str) -> Result<&[Slot]> {
        let not_emitted = || GenError::BaseNotEmitted {
            class: class.qualified_name(),
            base: base.to_string(),
        };

        let local = if base.contains('.') || class.namespace.is_root() {
            base.to_string()
        } else {
            format!("{}.{}", class.namespace, base)
        };
        if let Some(entry) = self.classes.get(&local) {
            return entry.slots.as_deref().ok_or_else(not_emitted);
        }
        if base.contains('.') {
            return Err(not_emitted());
        }

        let candidates: Vec<(&String, &[Slot])> = self
            .classes
            .iter()
            .filter(|(_, entry)| entry.class_ref.name == base)
            .filter_map(|(key, entry)| entry.slots.as_deref().map(|slots| (key, slots)))
            .collect();
        match candidates.as_slice() {
            [] => Err(not_emitted()),
            [(_, slots)] => Ok(*slots),
            _ => Err(GenError::AmbiguousBase {
                class: class.qualified_name(),
                base: base.to_string(),
                candidates: candidates
                    .iter()
                    .map(|(key, _)| key.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }

    /// Everything generated so far, without closing namespaces.
    pub fn render(&self) -> String {
        self.out.render()
    }

    /// Close all namespaces and return the finished header.
    pub fn finish(mut self) -> String {
        self.out.flush();
        self.namespaces.close_all(&mut self.out);
        self.out.into_string()
    }
}

impl Default for HeaderGenerator {
    fn default() -> Self {
        Self::new(GeneratorOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use jtrans_ast::MethodDef;

    #[test]
    fn test_preamble() {
        let header = HeaderGenerator::default().generate(&TranslationUnit::default()).unwrap();
        assert_eq!(
            header,
            "#pragma once\n\n#include \"java_lang.h\"\n\nusing namespace java::lang;\n\n"
        );
    }

    #[test]
    fn test_preamble_options() {
        let options = GeneratorOptions::default()
            .with_runtime_header("rt.h")
            .with_runtime_namespace(&[]);
        let header = HeaderGenerator::new(options).generate(&TranslationUnit::default()).unwrap();
        assert_eq!(header, "#pragma once\n\n#include \"rt.h\"\n\n");
    }

    #[test]
    fn test_body_before_forward() {
        let mut generator = HeaderGenerator::default();
        let err = generator.declare_body(&ClassDef::new("A")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ordering);
    }

    #[test]
    fn test_duplicate_class() {
        let mut generator = HeaderGenerator::default();
        generator.declare_forward(&ClassDef::new("A")).unwrap();
        let err = generator.declare_forward(&ClassDef::new("A")).unwrap_err();
        assert_eq!(err, GenError::DuplicateClass { class: "A".to_string() });
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A").in_namespace(&["x"]),
            ClassDef::new("A").in_namespace(&["y"]),
        ]);
        assert!(HeaderGenerator::default().generate(&unit).is_ok());
    }

    #[test]
    fn test_derived_before_base() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("B").extends("A"),
            ClassDef::new("A"),
        ]);
        let err = HeaderGenerator::default().generate(&unit).unwrap_err();
        assert_eq!(
            err,
            GenError::BaseNotEmitted {
                class: "B".to_string(),
                base: "A".to_string(),
            }
        );
    }

    #[test]
    fn test_self_inheritance() {
        let unit = TranslationUnit::new(vec![ClassDef::new("A").extends("A")]);
        let err = HeaderGenerator::default().generate(&unit).unwrap_err();
        assert!(matches!(err, GenError::BaseNotEmitted { .. }));
    }

    #[test]
    fn test_base_found_in_other_namespace() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A")
                .in_namespace(&["x"])
                .method(MethodDef::new("void", "run")),
            ClassDef::new("B").in_namespace(&["y"]).extends("A"),
        ]);
        let header = HeaderGenerator::default().generate(&unit).unwrap();
        assert!(header.contains("run((void(*)(B))&::x::__A::run)"));
    }

    #[test]
    fn test_ambiguous_base() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A").in_namespace(&["x"]),
            ClassDef::new("A").in_namespace(&["y"]),
            ClassDef::new("B").in_namespace(&["z"]).extends("A"),
        ]);
        let err = HeaderGenerator::default().generate(&unit).unwrap_err();
        assert_eq!(
            err,
            GenError::AmbiguousBase {
                class: "z.B".to_string(),
                base: "A".to_string(),
                candidates: "x.A, y.A".to_string(),
            }
        );
    }

    #[test]
    fn test_local_base_preferred() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A").in_namespace(&["x"]),
            ClassDef::new("A")
                .in_namespace(&["y"])
                .method(MethodDef::new("void", "run")),
            ClassDef::new("B").in_namespace(&["y"]).extends("A"),
        ]);
        let header = HeaderGenerator::default().generate(&unit).unwrap();
        assert!(header.contains("run((void(*)(B))&__A::run)"));
    }

    #[test]
    fn test_dotted_base_must_exist() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A").in_namespace(&["x"]),
            ClassDef::new("B").extends("y.A"),
        ]);
        let err = HeaderGenerator::default().generate(&unit).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ordering);
    }

    #[test]
    fn test_declare_vtable_returns_slots() {
        let mut generator = HeaderGenerator::default();
        let class = ClassDef::new("A").method(MethodDef::new("int", "size"));
        generator.declare_forward(&class).unwrap();
        generator.declare_body(&class).unwrap();
        let slots = generator.declare_vtable(&class).unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].method.name, "size");
    }

    #[test]
    fn test_root_class_after_namespaced_class() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A").in_namespace(&["x"]),
            ClassDef::new("Main"),
        ]);
        let header = HeaderGenerator::default().generate(&unit).unwrap();
        assert_eq!(header.matches("namespace x {").count(), 3);
        assert!(header.contains("}\n\nstruct __Main;"));
        assert!(header.contains("}\n\nstruct __Main {"));
        assert!(header.contains("}\n\nstruct __Main_VT {"));
        assert!(header.ends_with("};\n\n"));
    }

    #[test]
    fn test_derived_before_base_fails_before_bodies() {
        let mut generator = HeaderGenerator::default();
        let unit = TranslationUnit::new(vec![
            ClassDef::new("B").extends("A"),
            ClassDef::new("A"),
        ]);
        assert!(generator.emit_unit(&unit).is_err());
        assert!(!generator.render().contains("struct __A {"));
        assert!(generator.render().contains("typedef __A* A;"));
    }

    #[test]
    fn test_block_separated_from_next_namespace() {
        let unit = TranslationUnit::new(vec![
            ClassDef::new("A").in_namespace(&["x"]),
            ClassDef::new("B").in_namespace(&["y"]),
        ]);
        let header = HeaderGenerator::default().generate(&unit).unwrap();
        assert!(header.contains("}\n\nnamespace y {"));
        assert!(header.contains("}\n\nnamespace x {"));
        assert!(!header.contains("}\nnamespace"));
    }
}
