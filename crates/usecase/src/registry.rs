use std::{collections::BTreeMap, path::PathBuf};

use comment_blocks_domain::{
    Classification, LanguageConfiguration, RawLanguageConfig, Settings, classify, language::normalize,
};
use comment_blocks_ports::{catalog::ExtensionCatalog, json::JsonSource};
use comment_blocks_shared_kernel::{
    ApplicationError, CommentBlocksError, InfrastructureError, JsonIssue, LanguageId, Result,
};
use tracing::{debug, info};

/// Languages without any comment syntax worth continuing.
pub const SKIPPED_LANGUAGES: &[&str] =
    &["log", "Log", "search-result", "plaintext", "scminput", "properties", "csv", "tsv", "excel"];

/// File category named in load failures.
pub const LANGUAGE_CONFIGURATION_CATEGORY: &str = "language configuration files";

/// Everything one configuration build learns about the installed languages.
///
/// Built wholesale by [`LanguageRegistry::load`] and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    paths: BTreeMap<LanguageId, PathBuf>,
    configs: BTreeMap<LanguageId, LanguageConfiguration>,
    classification: Classification,
}

impl LanguageRegistry {
    pub fn load(catalog: &dyn ExtensionCatalog, json: &dyn JsonSource, settings: &Settings) -> Result<Self> {
        let paths = discover(catalog)?;
        let configs = load_configs(json, &paths).map_err(|err| {
            CommentBlocksError::from(ApplicationError::ConfigurationLoadFailed {
                category: LANGUAGE_CONFIGURATION_CATEGORY.to_string(),
                reason: err.to_string(),
                source: Some(Box::new(err)),
            })
        })?;
        let classification = classify(&configs, settings);
        info!(
            discovered = paths.len(),
            loaded = configs.len(),
            single_line = classification.single_line.languages().len(),
            multi_line = classification.multi_line.languages().len(),
            "language registry built"
        );
        Ok(Self { paths, configs, classification })
    }

    pub fn paths(&self) -> &BTreeMap<LanguageId, PathBuf> {
        &self.paths
    }

    pub fn configs(&self) -> &BTreeMap<LanguageId, LanguageConfiguration> {
        &self.configs
    }

    pub fn config(&self, language: &str) -> Option<&LanguageConfiguration> {
        self.configs.get(language)
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }
}

/// Map every contributed language to its configuration file.
///
/// Later extensions replace earlier contributions of the same language.
fn discover(catalog: &dyn ExtensionCatalog) -> Result<BTreeMap<LanguageId, PathBuf>> {
    let mut paths = BTreeMap::new();
    for extension in catalog.extensions()? {
        for language in extension.languages {
            if SKIPPED_LANGUAGES.contains(&language.id.as_str()) {
                continue;
            }
            let Some(path) = language.configuration else {
                continue;
            };
            if let Some(previous) = paths.insert(language.id.clone(), path) {
                debug!(language = %language.id, extension = %extension.id, previous = %previous.display(), "contribution replaced");
            }
        }
    }
    Ok(paths)
}

/// Load and normalize every file, collecting parse and pattern problems
/// across files.
fn load_configs(
    json: &dyn JsonSource,
    paths: &BTreeMap<LanguageId, PathBuf>,
) -> Result<BTreeMap<LanguageId, LanguageConfiguration>> {
    let mut configs = BTreeMap::new();
    let mut issues: Vec<JsonIssue> = Vec::new();

    for (language, path) in paths {
        let value = match json.read_json(path) {
            Ok(value) => value,
            Err(CommentBlocksError::Infrastructure(InfrastructureError::MalformedJson { issues: found })) => {
                issues.extend(found);
                continue;
            }
            Err(err) => return Err(err),
        };
        let raw: RawLanguageConfig = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(err) => {
                issues.push(JsonIssue { path: path.clone(), line: 0, column: 0, message: err.to_string() });
                continue;
            }
        };
        if raw.is_empty() {
            debug!(language = %language, "empty configuration skipped");
            continue;
        }
        match normalize(raw) {
            Ok(config) => {
                configs.insert(language.clone(), config);
            }
            Err(err) => issues.push(JsonIssue { path: path.clone(), line: 0, column: 0, message: err.to_string() }),
        }
    }

    if !issues.is_empty() {
        return Err(InfrastructureError::MalformedJson { issues }.into());
    }
    Ok(configs)
}
