// crates/infra/src/manifest.rs
use serde::Deserialize;

/// The parts of an extension's `package.json` this system reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageManifest {
    pub publisher: String,
    pub name: String,
    pub display_name: Option<String>,
    pub version: String,
    pub contributes: Contributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contributes {
    pub languages: Vec<ManifestLanguage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestLanguage {
    pub id: String,
    #[serde(default)]
    pub configuration: Option<String>,
}

impl PackageManifest {
    /// `publisher.name`, the identifier the host knows the extension by.
    pub fn id(&self) -> String {
        format!("{}.{}", self.publisher, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_manifests_parse() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{"name": "rust", "publisher": "vscode", "contributes": {"languages": [{"id": "rust", "configuration": "./language-configuration.json"}, {"id": "ron"}]}}"#,
        )
        .expect("parses");
        assert_eq!(manifest.id(), "vscode.rust");
        assert_eq!(manifest.contributes.languages.len(), 2);
        assert!(manifest.contributes.languages[1].configuration.is_none());
        assert!(manifest.display_name.is_none());
    }
}
