//! Project configuration types (jtrans.toml format).

use crate::error::{ConfigError, Result};
use jtrans_codegen::GeneratorOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Widest indent accepted in `[output]`.
const MAX_INDENT_WIDTH: usize = 16;

/// Root project configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata.
    pub project: ProjectMeta,

    /// Runtime library the generated header builds on.
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Where and how the header is written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMeta {
    /// Project name.
    pub name: String,

    /// Project version (optional).
    #[serde(default)]
    pub version: Option<String>,
}

/// Runtime header and namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Header providing `Class` (e.g., "java_lang.h").
    #[serde(default = "default_header")]
    pub header: String,

    /// Namespace segments of the runtime (e.g., ["java", "lang"]).
    #[serde(default = "default_namespace")]
    pub namespace: Vec<String>,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Header path, relative to the config file (optional).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Spaces per indent level.
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
}

fn default_header() -> String {
    GeneratorOptions::default().runtime_header
}

fn default_namespace() -> Vec<String> {
    GeneratorOptions::default().runtime_namespace
}

fn default_indent_width() -> usize {
    GeneratorOptions::default().indent_width
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            header: default_header(),
            namespace: default_namespace(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            indent_width: default_indent_width(),
        }
    }
}

impl ProjectConfig {
    /// A configuration with defaults for everything but the name.
    pub fn named(name: &str) -> Self {
        Self {
            project: ProjectMeta {
                name: name.to_string(),
                version: None,
            },
            runtime: RuntimeConfig::default(),
            output: OutputConfig::default(),
        }
    }

    /// Load and validate configuration from a TOML file. A relative output
    /// path is resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        if let (Some(out), Some(dir)) = (config.output.path.take(), path.parent()) {
            config.output.path = Some(if out.is_relative() { dir.join(out) } else { out });
        }
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ProjectConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce a malformed preamble.
    pub fn validate(&self) -> Result<()> {
        if self.project.name.trim().is_empty() {
            return Err(ConfigError::Validation("project name is empty".to_string()));
        }
        if self.runtime.header.trim().is_empty() {
            return Err(ConfigError::Validation("runtime header is empty".to_string()));
        }
        if self.runtime.namespace.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "runtime namespace {:?} has an empty segment",
                self.runtime.namespace
            )));
        }
        if self.output.indent_width == 0 || self.output.indent_width > MAX_INDENT_WIDTH {
            return Err(ConfigError::Validation(format!(
                "indent_width must be between 1 and {}, got {}",
                MAX_INDENT_WIDTH, self.output.indent_width
            )));
        }
        Ok(())
    }

    /// Generator options described by this configuration.
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            runtime_header: self.runtime.header.clone(),
            runtime_namespace: self.runtime.namespace.clone(),
            indent_width: self.output.indent_width,
        }
    }

    /// Set the output path.
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.path = Some(path.into());
        self
    }
}
