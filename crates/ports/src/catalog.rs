// crates/ports/src/catalog.rs
use std::path::PathBuf;

use comment_blocks_shared_kernel::{LanguageId, Result};
use serde::{Deserialize, Serialize};

/// One `contributes.languages[]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageContribution {
    pub id: LanguageId,
    /// Absolute path of the language's configuration file, if it declares one.
    pub configuration: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionManifest {
    pub id: String,
    pub path: PathBuf,
    pub languages: Vec<LanguageContribution>,
}

/// This system's own identity, as read from its manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionIdentity {
    pub id: String,
    pub namespace: String,
    pub display_name: String,
    pub version: String,
}

/// Port for enumerating installed extensions.
///
/// Built-in extensions come first, third-party ones after, so a later
/// contribution of the same language replaces an earlier one.
pub trait ExtensionCatalog: Send + Sync {
    fn extensions(&self) -> Result<Vec<ExtensionManifest>>;
}
