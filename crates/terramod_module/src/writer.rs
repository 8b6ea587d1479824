//! Module directory writing.
//!
//! Persists the text artifacts of one resource type into a module
//! directory. Each file is written atomically (temp-then-rename) so an
//! aborted run never leaves a partially written file under its final name.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::fs;

use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{ModuleError, ModuleResult};

/// The text artifacts making up one module.
///
/// Generated artifacts are optional so a run with partial backend failures
/// can still persist the artifacts that did succeed; the version pinning
/// is always present because it never involves the backend.
#[derive(Debug, Clone)]
pub struct ModuleArtifacts {
    pub variables: Option<String>,
    pub main: Option<String>,
    pub outputs: Option<String>,
    pub versions: String,
}

impl ModuleArtifacts {
    /// Artifacts for a fully successful generation round.
    pub fn complete(
        variables: impl Into<String>,
        main: impl Into<String>,
        outputs: impl Into<String>,
        versions: impl Into<String>,
    ) -> Self {
        Self {
            variables: Some(variables.into()),
            main: Some(main.into()),
            outputs: Some(outputs.into()),
            versions: versions.into(),
        }
    }

    fn files(&self) -> Vec<(&'static str, &str)> {
        let mut files = Vec::new();
        if let Some(variables) = &self.variables {
            files.push(("variables.tf", variables.as_str()));
        }
        if let Some(main) = &self.main {
            files.push(("main.tf", main.as_str()));
        }
        if let Some(outputs) = &self.outputs {
            files.push(("outputs.tf", outputs.as_str()));
        }
        files.push(("terraform.tf", self.versions.as_str()));
        files
    }
}

/// Writer for per-resource-type module directories.
pub struct ModuleWriter {
    root: PathBuf,
}

impl ModuleWriter {
    /// Create a writer rooted at the module output tree.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write one resource type's artifacts, overwriting existing files.
    ///
    /// Returns the module directory path.
    pub fn write(&self, resource_type: &str, artifacts: &ModuleArtifacts) -> ModuleResult<PathBuf> {
        let dir = self.root.join(resource_type.to_lowercase());
        fs::create_dir_all(&dir)?;

        for (file_name, content) in artifacts.files() {
            Self::write_atomic(&dir, file_name, content)?;
            info!("Written {}", dir.join(file_name).display());
        }

        Ok(dir)
    }

    fn write_atomic(dir: &Path, file_name: &str, content: &str) -> ModuleResult<()> {
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(dir.join(file_name))
            .map_err(|e| ModuleError::Io(e.error))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_directory_and_files() {
        let root = tempfile::tempdir().unwrap();
        let writer = ModuleWriter::new(root.path());

        let artifacts = ModuleArtifacts::complete(
            "variable \"name\" {}",
            "resource \"azurerm_subnet\" \"snet\" {}",
            "output \"id\" {}",
            "terraform {}",
        );

        let dir = writer.write("AZURERM_SUBNET", &artifacts).unwrap();
        assert!(dir.ends_with("azurerm_subnet"));

        for file in ["variables.tf", "main.tf", "outputs.tf", "terraform.tf"] {
            assert!(dir.join(file).is_file(), "missing {}", file);
        }
        assert_eq!(
            fs::read_to_string(dir.join("main.tf")).unwrap(),
            "resource \"azurerm_subnet\" \"snet\" {}"
        );
    }

    #[test]
    fn test_write_overwrites_existing_files() {
        let root = tempfile::tempdir().unwrap();
        let writer = ModuleWriter::new(root.path());

        let first = ModuleArtifacts::complete("old", "old", "old", "old");
        let second = ModuleArtifacts::complete("new", "new", "new", "new");

        writer.write("azurerm_subnet", &first).unwrap();
        let dir = writer.write("azurerm_subnet", &second).unwrap();

        assert_eq!(fs::read_to_string(dir.join("variables.tf")).unwrap(), "new");
    }

    #[test]
    fn test_partial_artifacts_skip_missing_files() {
        let root = tempfile::tempdir().unwrap();
        let writer = ModuleWriter::new(root.path());

        let artifacts = ModuleArtifacts {
            variables: Some("variable \"name\" {}".to_string()),
            main: None,
            outputs: None,
            versions: "terraform {}".to_string(),
        };

        let dir = writer.write("azurerm_subnet", &artifacts).unwrap();
        assert!(dir.join("variables.tf").is_file());
        assert!(dir.join("terraform.tf").is_file());
        assert!(!dir.join("main.tf").exists());
    }

    #[test]
    fn test_no_stray_temp_files_left_behind() {
        let root = tempfile::tempdir().unwrap();
        let writer = ModuleWriter::new(root.path());

        let artifacts = ModuleArtifacts::complete("a", "b", "c", "d");
        let dir = writer.write("azurerm_subnet", &artifacts).unwrap();

        let entries: Vec<String> = fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries.len(), 4, "unexpected entries: {:?}", entries);
    }
}
