use std::fs;
use std::path::{Path, PathBuf};

use crate::modules::packs::domain::{Manifest, ManifestSource, ManifestType};
use crate::shared::errors::{AppError, AppResult};

/// Builtin manifests stored as `*.json` files in one directory
///
/// Files load in file-name order. Every manifest found here is builtin,
/// whatever its `type` field says.
#[derive(Debug, Clone)]
pub struct DirectoryManifestSource {
    dir: PathBuf,
}

impl DirectoryManifestSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_manifest(path: &Path) -> AppResult<Manifest> {
        let raw = fs::read_to_string(path)?;

        let mut manifest: Manifest = serde_json::from_str(&raw).map_err(|e| {
            AppError::SerializationError(format!("Invalid manifest {}: {}", path.display(), e))
        })?;

        if manifest.id.trim().is_empty() {
            return Err(AppError::InvalidInput(format!(
                "Manifest {} has no id",
                path.display()
            )));
        }

        manifest.manifest_type = ManifestType::Builtin;
        Ok(manifest)
    }
}

impl ManifestSource for DirectoryManifestSource {
    fn load(&self) -> AppResult<Vec<Manifest>> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .map_err(|e| {
                AppError::IoError(format!("Cannot read packs directory {}: {}", self.dir.display(), e))
            })?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();

        paths.sort();

        let manifests = paths
            .iter()
            .map(|path| Self::read_manifest(path))
            .collect::<AppResult<Vec<_>>>()?;

        log::debug!(
            "Packs: Read {} manifests from {}",
            manifests.len(),
            self.dir.display()
        );

        Ok(manifests)
    }
}
