//! Project configuration for the jtrans header generator.
//!
//! # Example
//!
//! ```toml
//! # jtrans.toml
//! [project]
//! name = "inputs"
//!
//! [runtime]
//! header = "java_lang.h"
//! namespace = ["java", "lang"]
//!
//! [output]
//! path = "output/output.h"
//! indent_width = 4
//! ```

mod config;
mod error;

pub use config::{OutputConfig, ProjectConfig, ProjectMeta, RuntimeConfig};
pub use error::{ConfigError, Result};

/// Conventional file name of the project configuration.
pub const CONFIG_FILE_NAME: &str = "jtrans.toml";
