// crates/infra/src/catalog.rs
use std::{
    fs,
    path::{Path, PathBuf},
};

use comment_blocks_ports::{
    catalog::{ExtensionCatalog, ExtensionManifest, LanguageContribution},
    json::JsonSource,
};
use comment_blocks_shared_kernel::{InfrastructureError, LanguageId, Result, path::join_normalized};
use tracing::{debug, warn};

use crate::{manifest::PackageManifest, persistence::JsoncReader};

pub const MANIFEST_FILE: &str = "package.json";

/// Enumerates extensions installed as directories under a list of roots.
///
/// Roots are scanned in order and the directories inside each root in
/// ascending name order, so the result is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DirectoryExtensionCatalog {
    roots: Vec<PathBuf>,
}

impl DirectoryExtensionCatalog {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn scan_root(root: &Path, out: &mut Vec<ExtensionManifest>) -> Result<()> {
        if !root.is_dir() {
            debug!(root = %root.display(), "extensions root missing");
            return Ok(());
        }
        let entries = fs::read_dir(root).map_err(|source| InfrastructureError::FileSystemOperation {
            operation: "read_dir".to_string(),
            path: root.to_path_buf(),
            source,
        })?;
        let mut dirs: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir() && !is_hidden(path))
            .collect();
        dirs.sort();

        for dir in dirs {
            if let Some(manifest) = Self::read_manifest(&dir) {
                out.push(manifest);
            }
        }
        Ok(())
    }

    fn read_manifest(dir: &Path) -> Option<ExtensionManifest> {
        let path = dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return None;
        }
        let parsed = JsoncReader
            .read_json(&path)
            .and_then(|value| serde_json::from_value::<PackageManifest>(value).map_err(Into::into));
        let manifest = match parsed {
            Ok(manifest) => manifest,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "unreadable extension manifest skipped");
                return None;
            }
        };
        let languages = manifest
            .contributes
            .languages
            .iter()
            .map(|language| LanguageContribution {
                id: LanguageId::from(language.id.as_str()),
                configuration: language.configuration.as_deref().map(|config| join_normalized(dir, Path::new(config))),
            })
            .collect();
        Some(ExtensionManifest { id: manifest.id(), path: dir.to_path_buf(), languages })
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name().and_then(|name| name.to_str()).is_some_and(|name| name.starts_with('.'))
}

impl ExtensionCatalog for DirectoryExtensionCatalog {
    fn extensions(&self) -> Result<Vec<ExtensionManifest>> {
        let mut out = Vec::new();
        for root in &self.roots {
            Self::scan_root(root, &mut out)?;
        }
        debug!(extensions = out.len(), "extensions enumerated");
        Ok(out)
    }
}
