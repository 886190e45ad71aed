// crates/infra/src/metadata.rs
use std::path::{Path, PathBuf};

use comment_blocks_ports::{catalog::ExtensionIdentity, json::JsonSource};
use comment_blocks_shared_kernel::{ErrorContext, Result};
use tracing::debug;

use crate::{
    catalog::MANIFEST_FILE,
    manifest::PackageManifest,
    persistence::JsoncReader,
    platform::{self, parent_of, windows_to_wsl_path},
};

/// Directory, under the install path, receiving the classification records.
pub const ARTIFACTS_DIR: &str = "auto-generated-language-definitions";

/// Windows-side locations reported by the host when it runs inside WSL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WslLocations {
    /// `VSCODE_WSL_EXT_LOCATION`: a directory inside the Windows user extensions.
    pub ext_location: String,
    /// `VSCODE_CWD`: the Windows install directory of the host.
    pub host_cwd: String,
}

impl WslLocations {
    pub fn from_env() -> Option<Self> {
        Some(Self {
            ext_location: std::env::var("VSCODE_WSL_EXT_LOCATION").ok()?,
            host_cwd: std::env::var("VSCODE_CWD").ok()?,
        })
    }
}

/// Where the host keeps its extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostLocations {
    /// The host application root; built-in extensions live in `<app_root>/extensions`.
    pub app_root: Option<PathBuf>,
    pub user_extensions: Option<PathBuf>,
    pub wsl: Option<WslLocations>,
}

impl HostLocations {
    /// Fill unset locations from the environment.
    pub fn detect(app_root: Option<PathBuf>, user_extensions: Option<PathBuf>) -> Self {
        let wsl = if platform::is_wsl() { WslLocations::from_env() } else { None };
        Self { app_root, user_extensions: user_extensions.or_else(platform::default_user_extensions_dir), wsl }
    }
}

/// This system's identity and the extension directories it scans.
///
/// Computed once at startup from the local manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionMetaData {
    pub id: String,
    pub namespace: String,
    pub display_name: String,
    pub version: String,
    pub install_path: PathBuf,
    pub user_extensions_path: Option<PathBuf>,
    pub builtin_extensions_path: Option<PathBuf>,
    pub windows_user_extensions_path: Option<PathBuf>,
    pub windows_builtin_extensions_path: Option<PathBuf>,
}

impl ExtensionMetaData {
    pub fn load(install_path: &Path, locations: &HostLocations) -> Result<Self> {
        let manifest_path = install_path.join(MANIFEST_FILE);
        let value = JsoncReader.read_json(&manifest_path).context("reading extension manifest")?;
        let manifest: PackageManifest = serde_json::from_value(value).context("parsing extension manifest")?;
        Ok(Self::from_manifest(manifest, install_path, locations))
    }

    pub fn from_manifest(manifest: PackageManifest, install_path: &Path, locations: &HostLocations) -> Self {
        let id = manifest.id();
        let namespace = manifest.name.replacen("automatic", "auto", 1);
        let display_name = manifest.display_name.clone().unwrap_or_else(|| manifest.name.clone());
        let wsl = locations.wsl.as_ref();

        let metadata = Self {
            id,
            namespace,
            display_name,
            version: manifest.version,
            install_path: install_path.to_path_buf(),
            user_extensions_path: locations.user_extensions.clone(),
            builtin_extensions_path: locations.app_root.as_ref().map(|root| root.join("extensions")),
            windows_user_extensions_path: wsl.map(|wsl| windows_to_wsl_path(parent_of(&wsl.ext_location))),
            windows_builtin_extensions_path: wsl
                .map(|wsl| windows_to_wsl_path(&wsl.host_cwd).join("resources").join("app").join("extensions")),
        };
        debug!(id = %metadata.id, namespace = %metadata.namespace, roots = metadata.extension_roots().len(), "extension metadata");
        metadata
    }

    pub fn identity(&self) -> ExtensionIdentity {
        ExtensionIdentity {
            id: self.id.clone(),
            namespace: self.namespace.clone(),
            display_name: self.display_name.clone(),
            version: self.version.clone(),
        }
    }

    /// Built-in roots first, then user roots, so third-party contributions win.
    pub fn extension_roots(&self) -> Vec<PathBuf> {
        [
            &self.builtin_extensions_path,
            &self.windows_builtin_extensions_path,
            &self.user_extensions_path,
            &self.windows_user_extensions_path,
        ]
        .into_iter()
        .flatten()
        .cloned()
        .collect()
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.install_path.join(ARTIFACTS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> PackageManifest {
        serde_json::from_str(
            r#"{"publisher": "kylepaulsen", "name": "automatic-comment-blocks", "displayName": "Automatic Comment Blocks", "version": "1.1.0"}"#,
        )
        .expect("parses")
    }

    #[test]
    fn identity_is_derived_from_manifest() {
        let metadata = ExtensionMetaData::from_manifest(manifest(), Path::new("/ext/acb"), &HostLocations::default());
        assert_eq!(metadata.id, "kylepaulsen.automatic-comment-blocks");
        assert_eq!(metadata.namespace, "auto-comment-blocks");
        assert_eq!(metadata.identity().display_name, "Automatic Comment Blocks");
        assert_eq!(metadata.artifacts_dir(), PathBuf::from("/ext/acb/auto-generated-language-definitions"));
        assert!(metadata.extension_roots().is_empty());
    }

    #[test]
    fn wsl_roots_follow_native_roots() {
        let locations = HostLocations {
            app_root: Some(PathBuf::from("/opt/host")),
            user_extensions: Some(PathBuf::from("/home/me/.vscode-server/extensions")),
            wsl: Some(WslLocations {
                ext_location: r"c:\Users\me\.vscode\extensions\ms-vscode-remote.remote-wsl-0.88.0".into(),
                host_cwd: r"C:\Program Files\Host".into(),
            }),
        };
        let metadata = ExtensionMetaData::from_manifest(manifest(), Path::new("/ext/acb"), &locations);
        assert_eq!(
            metadata.extension_roots(),
            vec![
                PathBuf::from("/opt/host/extensions"),
                PathBuf::from("/mnt/c/Program Files/Host/resources/app/extensions"),
                PathBuf::from("/home/me/.vscode-server/extensions"),
                PathBuf::from("/mnt/c/Users/me/.vscode/extensions"),
            ]
        );
    }

    #[test]
    fn load_reads_manifest_from_install_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"publisher": "p", "name": "automatic-comment-blocks", "version": "2.0.0", /* jsonc */ }"#,
        )
        .expect("write");
        let metadata = ExtensionMetaData::load(dir.path(), &HostLocations::default()).expect("loads");
        assert_eq!(metadata.version, "2.0.0");
        assert_eq!(metadata.display_name, "automatic-comment-blocks");
    }
}
