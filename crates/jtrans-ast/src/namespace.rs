use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A package path such as `inputs.test002`, stored as ordered segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "PathRepr", into = "Vec<SmolStr>")]
pub struct NamespacePath {
    segments: Vec<SmolStr>,
}

/// Accepted JSON shapes: `["a", "b"]` or `"a.b"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PathRepr {
    Segments(Vec<SmolStr>),
    Dotted(String),
}

impl From<PathRepr> for NamespacePath {
    fn from(repr: PathRepr) -> Self {
        match repr {
            PathRepr::Segments(segments) => Self { segments },
            PathRepr::Dotted(dotted) => Self::parse(&dotted),
        }
    }
}

impl From<NamespacePath> for Vec<SmolStr> {
    fn from(path: NamespacePath) -> Self {
        path.segments
    }
}

impl NamespacePath {
    pub fn new<S: AsRef<str>>(segments: &[S]) -> Self {
        Self {
            segments: segments.iter().map(|s| SmolStr::new(s.as_ref())).collect(),
        }
    }

    /// Global namespace.
    pub fn root() -> Self {
        Self::default()
    }

    /// Split a dotted path. An empty string is the global namespace; empty
    /// segments (`a..b`) are kept so the generator can reject them.
    pub fn parse(dotted: &str) -> Self {
        if dotted.is_empty() {
            return Self::root();
        }
        Self {
            segments: dotted.split('.').map(SmolStr::new).collect(),
        }
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// C++ spelling with a leading `::`, e.g. `::inputs::test002`.
    pub fn to_cpp(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("::{}", s))
            .collect::<String>()
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotted() {
        let path = NamespacePath::parse("inputs.test002");
        assert_eq!(path.segments(), &["inputs", "test002"]);
        assert_eq!(path.to_string(), "inputs.test002");
        assert_eq!(path.to_cpp(), "::inputs::test002");
    }

    #[test]
    fn test_parse_empty_is_root() {
        assert!(NamespacePath::parse("").is_root());
        assert_eq!(NamespacePath::root().to_cpp(), "");
    }

    #[test]
    fn test_parse_keeps_empty_segments() {
        let path = NamespacePath::parse("a..b");
        assert_eq!(path.len(), 3);
        assert_eq!(path.segments()[1], "");
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let list: NamespacePath = serde_json::from_str(r#"["a", "b"]"#).unwrap();
        let dotted: NamespacePath = serde_json::from_str(r#""a.b""#).unwrap();
        assert_eq!(list, dotted);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a","b"]"#);
    }
}
