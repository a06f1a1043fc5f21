//! Failures loading `jtrans.toml`.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why a `jtrans.toml` could not be turned into generator options.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read jtrans.toml: {0}")]
    ReadConfig(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the `[project]` /
    /// `[runtime]` / `[output]` layout.
    #[error("malformed jtrans.toml: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A runtime or output setting the generator cannot use, such as an
    /// empty header name or an indent width out of range.
    #[error("invalid setting in jtrans.toml: {0}")]
    Validation(String),
}
