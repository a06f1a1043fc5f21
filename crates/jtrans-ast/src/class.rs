use crate::namespace::NamespacePath;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A method parameter. Order within [`MethodDef::params`] is positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(rename = "type")]
    pub ty: SmolStr,
    /// May be empty; the generator then names it after its position.
    #[serde(default)]
    pub name: SmolStr,
}

/// A field declaration. Initializers are handled elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    #[serde(rename = "type")]
    pub ty: SmolStr,
    pub name: SmolStr,
}

/// A method signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDef {
    pub return_type: SmolStr,
    pub name: SmolStr,
    #[serde(default)]
    pub params: Vec<Param>,
    /// Resolved upstream: this method replaces an inherited one of the same name.
    #[serde(default, rename = "override")]
    pub is_override: bool,
}

impl MethodDef {
    pub fn new(return_type: &str, name: &str) -> Self {
        Self {
            return_type: SmolStr::new(return_type),
            name: SmolStr::new(name),
            params: Vec::new(),
            is_override: false,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, ty: &str, name: &str) -> Self {
        self.params.push(Param {
            ty: SmolStr::new(ty),
            name: SmolStr::new(name),
        });
        self
    }

    /// Mark as overriding an inherited method.
    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }
}

/// A class with single inheritance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    pub name: SmolStr,
    #[serde(default)]
    pub namespace: NamespacePath,
    /// Simple (`A`) or dotted (`inputs.A`) name of the superclass. `None` is a root.
    #[serde(default, rename = "extends")]
    pub base: Option<SmolStr>,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    #[serde(default)]
    pub methods: Vec<MethodDef>,
}

impl ClassDef {
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            namespace: NamespacePath::root(),
            base: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn in_namespace<S: AsRef<str>>(mut self, segments: &[S]) -> Self {
        self.namespace = NamespacePath::new(segments);
        self
    }

    pub fn extends(mut self, base: &str) -> Self {
        self.base = Some(SmolStr::new(base));
        self
    }

    pub fn field(mut self, ty: &str, name: &str) -> Self {
        self.fields.push(FieldDef {
            ty: SmolStr::new(ty),
            name: SmolStr::new(name),
        });
        self
    }

    pub fn method(mut self, method: MethodDef) -> Self {
        self.methods.push(method);
        self
    }

    /// Dotted name used in diagnostics, e.g. `inputs.test002.A`.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_root() {
            self.name.to_string()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let class = ClassDef::new("A")
            .in_namespace(&["inputs", "test002"])
            .field("int", "count")
            .field("String", "label")
            .method(MethodDef::new("int", "hash").param("int", "a").param("bool", "b"));

        assert_eq!(class.qualified_name(), "inputs.test002.A");
        assert_eq!(class.fields[0].name, "count");
        assert_eq!(class.fields[1].name, "label");
        let params: Vec<_> = class.methods[0].params.iter().map(|p| p.ty.as_str()).collect();
        assert_eq!(params, vec!["int", "bool"]);
        assert!(!class.methods[0].is_override);
    }

    #[test]
    fn test_deserialize_class() {
        let json = r#"{
            "name": "B",
            "namespace": "inputs.test002",
            "extends": "A",
            "fields": [{ "type": "int", "name": "x" }],
            "methods": [
                { "return_type": "String", "name": "toString", "override": true },
                { "return_type": "void", "name": "set", "params": [{ "type": "int" }] }
            ]
        }"#;

        let class: ClassDef = serde_json::from_str(json).unwrap();
        assert_eq!(class.base.as_deref(), Some("A"));
        assert_eq!(class.namespace.segments(), &["inputs", "test002"]);
        assert!(class.methods[0].is_override);
        assert!(class.methods[0].params.is_empty());
        assert_eq!(class.methods[1].params[0].name, "");
    }

    #[test]
    fn test_root_qualified_name() {
        assert_eq!(ClassDef::new("Main").qualified_name(), "Main");
    }
}
