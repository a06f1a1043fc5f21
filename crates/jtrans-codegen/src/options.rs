/// Fixed preamble and formatting knobs for a generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Runtime header providing `Class` and the `__class()` machinery.
    pub runtime_header: String,
    /// Namespace of the runtime, brought in with `using namespace`.
    pub runtime_namespace: Vec<String>,
    /// Spaces per indent level.
    pub indent_width: usize,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_header: "java_lang.h".to_string(),
            runtime_namespace: vec!["java".to_string(), "lang".to_string()],
            indent_width: 4,
        }
    }
}

impl GeneratorOptions {
    pub fn with_runtime_header(mut self, header: impl Into<String>) -> Self {
        self.runtime_header = header.into();
        self
    }

    pub fn with_runtime_namespace(mut self, segments: &[&str]) -> Self {
        self.runtime_namespace = segments.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub(crate) fn indent_unit(&self) -> String {
        " ".repeat(self.indent_width)
    }
}
