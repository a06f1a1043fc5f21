use jtrans_ast::TranslationUnit;
use jtrans_build::ProjectConfig;
use miette::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Outcome of one [`Driver::build`] call.
#[derive(Debug, Clone)]
pub struct BuildSummary {
    /// Number of classes emitted.
    pub classes: usize,
    /// Where the header was written, if anywhere.
    pub output: Option<PathBuf>,
    /// The generated header.
    pub header: String,
}

/// Orchestrates loading an AST, generating the header and writing it out.
pub struct Driver {
    config: ProjectConfig,
}

impl Driver {
    pub fn new() -> Self {
        Self::with_config(ProjectConfig::named("jtrans"))
    }

    pub fn with_config(config: ProjectConfig) -> Self {
        Self { config }
    }

    /// Create a driver from a `jtrans.toml` file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config = ProjectConfig::from_file(path)
            .map_err(|e| miette::miette!("Failed to load {}: {}", path.display(), e))?;
        info!(config = %path.display(), project = %config.project.name, "loaded configuration");
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Load a translation unit from a JSON AST file.
    pub fn load_unit(&self, path: impl AsRef<Path>) -> Result<TranslationUnit> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))?;
        let unit = TranslationUnit::from_json(&content)
            .map_err(|e| miette::miette!("Failed to parse AST {}: {}", path.display(), e))?;
        info!(input = %path.display(), classes = unit.len(), "loaded AST");
        Ok(unit)
    }

    /// Generate the header for `unit` with this driver's configuration.
    pub fn generate(&self, unit: &TranslationUnit) -> Result<String> {
        let header = jtrans_codegen::generate(unit, &self.config.generator_options())?;
        Ok(header)
    }

    /// Generate the header for a JSON AST file.
    pub fn generate_file(&self, input: impl AsRef<Path>) -> Result<String> {
        let unit = self.load_unit(input)?;
        self.generate(&unit)
    }

    /// Write `header` to `output`, creating parent directories.
    pub fn write_header(&self, header: &str, output: impl AsRef<Path>) -> Result<()> {
        let output = output.as_ref();
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| miette::miette!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(output, header)
            .map_err(|e| miette::miette!("Failed to write {}: {}", output.display(), e))?;
        info!(output = %output.display(), bytes = header.len(), "wrote header");
        Ok(())
    }

    /// Generate the header for `input` and write it to `output`, falling back
    /// to the configured output path. Nothing is written if generation fails.
    pub fn build(&self, input: impl AsRef<Path>, output: Option<&Path>) -> Result<BuildSummary> {
        let unit = self.load_unit(input)?;
        let header = self.generate(&unit)?;

        let output = output
            .map(Path::to_path_buf)
            .or_else(|| self.config.output.path.clone());
        if let Some(ref path) = output {
            self.write_header(&header, path)?;
        }

        Ok(BuildSummary {
            classes: unit.len(),
            output,
            header,
        })
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const AST: &str = r#"[
        {
            "name": "A",
            "namespace": "inputs.test001",
            "fields": [{ "type": "int", "name": "count" }],
            "methods": [{ "return_type": "String", "name": "toString" }]
        },
        {
            "name": "B",
            "namespace": "inputs.test001",
            "extends": "A",
            "methods": [{ "return_type": "String", "name": "toString", "override": true }]
        }
    ]"#;

    fn ast_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_generate_file() {
        let file = ast_file(AST);
        let header = Driver::new().generate_file(file.path()).unwrap();
        assert!(header.starts_with("#pragma once\n"));
        assert!(header.contains("namespace test001 {"));
        assert!(header.contains("toString(&__B::toString)"));
    }

    #[test]
    fn test_build_writes_header() {
        let file = ast_file(AST);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("nested/output.h");

        let summary = Driver::new().build(file.path(), Some(&output)).unwrap();
        assert_eq!(summary.classes, 2);
        assert_eq!(summary.output.as_deref(), Some(output.as_path()));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), summary.header);
    }

    #[test]
    fn test_build_uses_configured_output() {
        let file = ast_file(AST);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("configured.h");

        let driver = Driver::with_config(ProjectConfig::named("p").with_output(&output));
        driver.build(file.path(), None).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_failed_generation_writes_nothing() {
        let file = ast_file(r#"[{ "name": "A", "methods": [{ "return_type": "int", "name": "f", "override": true }] }]"#);
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("output.h");

        let err = Driver::new().build(file.path(), Some(&output)).unwrap_err();
        assert!(err.to_string().contains("override"));
        assert!(!output.exists());
    }

    #[test]
    fn test_bad_json() {
        let file = ast_file("not json");
        assert!(Driver::new().load_unit(file.path()).is_err());
    }

    #[test]
    fn test_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("jtrans.toml");
        std::fs::write(&config, "[project]\nname = \"p\"\n\n[runtime]\nheader = \"rt.h\"\n").unwrap();

        let driver = Driver::from_config_file(&config).unwrap();
        let header = driver.generate(&TranslationUnit::default()).unwrap();
        assert!(header.contains("#include \"rt.h\""));
    }
}
