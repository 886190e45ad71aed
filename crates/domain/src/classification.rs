//! Comment-style classification.
//!
//! Two independent registries are kept per kind: `auto` (derived from each
//! language's native configuration) and `custom` (declared in settings). Both
//! are `BTreeMap`/`BTreeSet` so iteration is ascending by language id.

use std::collections::{BTreeMap, BTreeSet};

use comment_blocks_shared_kernel::LanguageId;
use serde::{Deserialize, Serialize};

use crate::{
    blade::BLADE,
    comment_style::SingleLineStyle,
    language::LanguageConfiguration,
    settings::{RegistryPrecedence, Settings},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleLineRegistry {
    pub auto: BTreeMap<LanguageId, SingleLineStyle>,
    pub custom: BTreeMap<LanguageId, SingleLineStyle>,
}

impl SingleLineRegistry {
    pub fn resolve(&self, language: &str, precedence: RegistryPrecedence) -> Option<SingleLineStyle> {
        let (first, second) = match precedence {
            RegistryPrecedence::Custom => (&self.custom, &self.auto),
            RegistryPrecedence::Auto => (&self.auto, &self.custom),
        };
        first.get(language).or_else(|| second.get(language)).copied()
    }

    /// Every language present in either registry, ascending.
    pub fn languages(&self) -> BTreeSet<&LanguageId> {
        self.auto.keys().chain(self.custom.keys()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLineRegistry {
    pub auto: BTreeSet<LanguageId>,
    pub custom: BTreeSet<LanguageId>,
}

impl MultiLineRegistry {
    pub fn contains(&self, language: &str) -> bool {
        self.custom.contains(language) || self.auto.contains(language)
    }

    pub fn languages(&self) -> BTreeSet<&LanguageId> {
        self.auto.iter().chain(self.custom.iter()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub single_line: SingleLineRegistry,
    pub multi_line: MultiLineRegistry,
}

/// Bucket every language into single-line and multi-line registries.
///
/// Disabled languages never enter either registry.
pub fn classify(configs: &BTreeMap<LanguageId, LanguageConfiguration>, settings: &Settings) -> Classification {
    let mut classification = Classification::default();

    for (language, config) in configs {
        if settings.is_disabled(language) {
            continue;
        }
        if let Some(style) = config.line_comment().and_then(SingleLineStyle::from_line_comment) {
            classification.single_line.auto.insert(language.clone(), style);
        }
        if supports_multi_line(language, config) {
            classification.multi_line.auto.insert(language.clone());
        }
    }

    let custom_lists = [
        (SingleLineStyle::Slash, &settings.slash_style_blocks),
        (SingleLineStyle::Hash, &settings.hash_style_blocks),
        (SingleLineStyle::Semicolon, &settings.semicolon_style_blocks),
    ];
    for (style, languages) in custom_lists {
        for language in declared(languages, settings) {
            classification.single_line.custom.insert(language.clone(), style);
        }
    }
    classification.multi_line.custom = declared(&settings.multi_line_style_blocks, settings).cloned().collect();

    classification
}

fn supports_multi_line(language: &LanguageId, config: &LanguageConfiguration) -> bool {
    // Blade's `{{--` block is served by the multi-line rule table.
    language == BLADE || config.block_comment().is_some_and(|(open, _)| open.contains("/*"))
}

fn declared<'a>(languages: &'a [LanguageId], settings: &'a Settings) -> impl Iterator<Item = &'a LanguageId> + 'a {
    languages.iter().filter(|id| !id.is_empty() && !settings.is_disabled(id))
}

/// Persisted record of the single-line registries, keyed style → languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleLineLanguageDefinitions {
    pub supported_languages: BTreeMap<SingleLineStyle, Vec<LanguageId>>,
    pub custom_supported_languages: BTreeMap<SingleLineStyle, Vec<LanguageId>>,
}

/// Persisted record of the multi-line registries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLineLanguageDefinitions {
    pub supported_languages: Vec<LanguageId>,
    pub custom_supported_languages: Vec<LanguageId>,
}

fn invert(map: &BTreeMap<LanguageId, SingleLineStyle>) -> BTreeMap<SingleLineStyle, Vec<LanguageId>> {
    let mut out: BTreeMap<SingleLineStyle, Vec<LanguageId>> = BTreeMap::new();
    for (language, style) in map {
        out.entry(*style).or_default().push(language.clone());
    }
    out
}

fn revert(map: &BTreeMap<SingleLineStyle, Vec<LanguageId>>) -> BTreeMap<LanguageId, SingleLineStyle> {
    map.iter()
        .flat_map(|(style, languages)| languages.iter().map(move |language| (language.clone(), *style)))
        .collect()
}

impl From<&SingleLineRegistry> for SingleLineLanguageDefinitions {
    fn from(registry: &SingleLineRegistry) -> Self {
        Self { supported_languages: invert(&registry.auto), custom_supported_languages: invert(&registry.custom) }
    }
}

impl From<&SingleLineLanguageDefinitions> for SingleLineRegistry {
    fn from(definitions: &SingleLineLanguageDefinitions) -> Self {
        Self {
            auto: revert(&definitions.supported_languages),
            custom: revert(&definitions.custom_supported_languages),
        }
    }
}

impl From<&MultiLineRegistry> for MultiLineLanguageDefinitions {
    fn from(registry: &MultiLineRegistry) -> Self {
        Self {
            supported_languages: registry.auto.iter().cloned().collect(),
            custom_supported_languages: registry.custom.iter().cloned().collect(),
        }
    }
}

impl From<&MultiLineLanguageDefinitions> for MultiLineRegistry {
    fn from(definitions: &MultiLineLanguageDefinitions) -> Self {
        Self {
            auto: definitions.supported_languages.iter().cloned().collect(),
            custom: definitions.custom_supported_languages.iter().cloned().collect(),
        }
    }
}
