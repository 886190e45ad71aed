//! User settings snapshot.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use comment_blocks_shared_kernel::LanguageId;
use serde::{Deserialize, Serialize};

/// Which single-line registry answers first when a language is in both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryPrecedence {
    #[default]
    Custom,
    Auto,
}

/// A snapshot of every setting under this system's namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub disabled_languages: BTreeSet<LanguageId>,
    pub single_line_block_on_enter: bool,
    pub slash_style_blocks: Vec<LanguageId>,
    pub hash_style_blocks: Vec<LanguageId>,
    pub semicolon_style_blocks: Vec<LanguageId>,
    pub multi_line_style_blocks: Vec<LanguageId>,
    pub override_default_language_multi_line_comments: BTreeMap<LanguageId, String>,
    pub blade_override_comments: bool,
    pub single_line_style_precedence: RegistryPrecedence,
}

impl Settings {
    pub fn is_disabled(&self, language: &str) -> bool {
        self.disabled_languages.contains(language)
    }

    /// Value of one setting as JSON, used to detect which keys changed.
    pub fn value_of(&self, key: SettingKey) -> serde_json::Value {
        serde_json::to_value(self)
            .ok()
            .and_then(|mut all| all.get_mut(key.as_str()).map(serde_json::Value::take))
            .unwrap_or(serde_json::Value::Null)
    }

    /// Keys whose value differs between `self` and `next`.
    pub fn changed_keys(&self, next: &Self) -> Vec<SettingKey> {
        SettingKey::ALL.into_iter().filter(|key| self.value_of(*key) != next.value_of(*key)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    DisabledLanguages,
    SingleLineBlockOnEnter,
    SlashStyleBlocks,
    HashStyleBlocks,
    SemicolonStyleBlocks,
    MultiLineStyleBlocks,
    OverrideDefaultLanguageMultiLineComments,
    BladeOverrideComments,
    SingleLineStylePrecedence,
}

impl SettingKey {
    pub const ALL: [Self; 9] = [
        Self::DisabledLanguages,
        Self::SingleLineBlockOnEnter,
        Self::SlashStyleBlocks,
        Self::HashStyleBlocks,
        Self::SemicolonStyleBlocks,
        Self::MultiLineStyleBlocks,
        Self::OverrideDefaultLanguageMultiLineComments,
        Self::BladeOverrideComments,
        Self::SingleLineStylePrecedence,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DisabledLanguages => "disabledLanguages",
            Self::SingleLineBlockOnEnter => "singleLineBlockOnEnter",
            Self::SlashStyleBlocks => "slashStyleBlocks",
            Self::HashStyleBlocks => "hashStyleBlocks",
            Self::SemicolonStyleBlocks => "semicolonStyleBlocks",
            Self::MultiLineStyleBlocks => "multiLineStyleBlocks",
            Self::OverrideDefaultLanguageMultiLineComments => "overrideDefaultLanguageMultiLineComments",
            Self::BladeOverrideComments => "bladeOverrideComments",
            Self::SingleLineStylePrecedence => "singleLineStylePrecedence",
        }
    }

    /// Dotted path as seen in a settings file, e.g. `auto-comment-blocks.disabledLanguages`.
    pub fn dotted(self, namespace: &str) -> String {
        format!("{namespace}.{}", self.as_str())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|key| key.as_str() == s).ok_or_else(|| format!("unknown setting: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"singleLineBlockOnEnter": true}"#).expect("parses");
        assert!(settings.single_line_block_on_enter);
        assert!(settings.disabled_languages.is_empty());
        assert!(!settings.blade_override_comments);
        assert_eq!(settings.single_line_style_precedence, RegistryPrecedence::Custom);
    }

    #[test]
    fn every_key_is_a_serialized_field() {
        let value = serde_json::to_value(Settings::default()).expect("serializes");
        for key in SettingKey::ALL {
            assert!(value.get(key.as_str()).is_some(), "{key}");
        }
    }

    #[test]
    fn changed_keys_reports_only_differences() {
        let before = Settings::default();
        let mut after = before.clone();
        after.blade_override_comments = true;
        after.disabled_languages.insert(LanguageId::from("blade"));
        assert_eq!(
            before.changed_keys(&after),
            vec![SettingKey::DisabledLanguages, SettingKey::BladeOverrideComments]
        );
    }

    #[test]
    fn keys_parse_and_format() {
        assert_eq!("bladeOverrideComments".parse::<SettingKey>(), Ok(SettingKey::BladeOverrideComments));
        assert!("nope".parse::<SettingKey>().is_err());
        assert_eq!(SettingKey::DisabledLanguages.dotted("auto-comment-blocks"), "auto-comment-blocks.disabledLanguages");
    }
}
