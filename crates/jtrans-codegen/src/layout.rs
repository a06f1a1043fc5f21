//! Forward declarations and struct bodies.
//!
//! Methods become static functions whose first parameter is the receiver,
//! typed as the class's pointer typedef, so they can be stored as plain
//! function pointers in the vtable.

use crate::sections::{Section, SectionBuffers};
use jtrans_ast::{ClassDef, MethodDef};

/// Name of the data struct for class `name`.
pub(crate) fn struct_name(name: &str) -> String {
    format!("__{}", name)
}

/// Name of the vtable struct for class `name`.
pub(crate) fn vtable_name(name: &str) -> String {
    format!("__{}_VT", name)
}

/// `p<index>` for unnamed parameters.
pub(crate) fn param_name(method: &MethodDef, index: usize) -> String {
    let name = &method.params[index].name;
    if name.is_empty() {
        format!("p{}", index)
    } else {
        name.to_string()
    }
}

/// Emit the forward declarations and pointer typedef of `class`.
pub fn emit_forward(out: &mut SectionBuffers, class: &ClassDef) {
    let data = struct_name(&class.name);
    out.line(Section::ClassDecls, &format!("struct {};", data));
    out.line(Section::ClassDecls, &format!("struct {};", vtable_name(&class.name)));
    out.line(Section::ClassDecls, &format!("typedef {}* {};", data, class.name));
    out.blank(Section::ClassDecls);
}

/// Emit the struct body of `class`: vptr, constructor, fields in source
/// order, static methods in declaration order, then the class accessor and
/// the vtable instance.
pub fn emit_body(out: &mut SectionBuffers, class: &ClassDef) {
    let data = struct_name(&class.name);
    let vtable = vtable_name(&class.name);

    out.line(Section::ClassDecls, &format!("struct {} {{", data));
    out.indent(Section::ClassDecls);

    out.line(Section::ClassDecls, &format!("{}* __vptr;", vtable));
    out.line(Section::ClassDecls, &format!("{}();", data));

    for field in &class.fields {
        out.line(Section::ClassDecls, &format!("{} {};", field.ty, field.name));
    }

    for method in &class.methods {
        out.line(Section::ClassDecls, &method_declaration(class, method));
    }

    out.line(Section::ClassDecls, "static Class __class();");
    out.line(Section::ClassDecls, &format!("static {} __vtable;", vtable));

    out.dedent(Section::ClassDecls);
    out.line(Section::ClassDecls, "};");
    out.blank(Section::ClassDecls);
}

fn method_declaration(class: &ClassDef, method: &MethodDef) -> String {
    let mut params = vec![format!("{} self", class.name)];
    params.extend(
        method
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {}", p.ty, param_name(method, i))),
    );
    format!(
        "static {} {}({});",
        method.return_type,
        method.name,
        params.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_declaration() {
        let mut out = SectionBuffers::default();
        emit_forward(&mut out, &ClassDef::new("A"));
        assert_eq!(
            out.pending(Section::ClassDecls),
            "struct __A;\nstruct __A_VT;\ntypedef __A* A;\n\n"
        );
    }

    #[test]
    fn test_body_layout() {
        let class = ClassDef::new("A")
            .field("int", "count")
            .method(MethodDef::new("String", "toString"))
            .method(MethodDef::new("int", "hash").param("int", "").param("bool", ""));
        let mut out = SectionBuffers::default();
        emit_body(&mut out, &class);

        let expected = "\
struct __A {
    __A_VT* __vptr;
    __A();
    int count;
    static String toString(A self);
    static int hash(A self, int p0, bool p1);
    static Class __class();
    static __A_VT __vtable;
};

";
        assert_eq!(out.pending(Section::ClassDecls), expected);
        assert_eq!(out.depth(Section::ClassDecls), 0);
    }

    #[test]
    fn test_named_parameters_kept_in_order() {
        let class = ClassDef::new("Point")
            .method(MethodDef::new("void", "move").param("int", "dy").param("int", "dx"));
        let mut out = SectionBuffers::default();
        emit_body(&mut out, &class);
        assert!(out
            .pending(Section::ClassDecls)
            .contains("static void move(Point self, int dy, int dx);"));
    }
}
