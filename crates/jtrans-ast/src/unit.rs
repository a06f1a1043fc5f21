use crate::class::ClassDef;
use serde::{Deserialize, Serialize};

/// All classes of one generated header, base classes first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "UnitRepr")]
pub struct TranslationUnit {
    pub classes: Vec<ClassDef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UnitRepr {
    Bare(Vec<ClassDef>),
    Wrapped { classes: Vec<ClassDef> },
}

impl From<UnitRepr> for TranslationUnit {
    fn from(repr: UnitRepr) -> Self {
        match repr {
            UnitRepr::Bare(classes) | UnitRepr::Wrapped { classes } => Self { classes },
        }
    }
}

impl TranslationUnit {
    pub fn new(classes: Vec<ClassDef>) -> Self {
        Self { classes }
    }

    /// Load a unit from JSON: either an array of classes or `{ "classes": [...] }`.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
