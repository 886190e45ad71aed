//! Composition of the configuration installed for one language.

use tracing::debug;

use crate::{
    blade::{BLADE, BladeOverride},
    comment_style::SingleLineStyle,
    language::{CommentRule, LanguageConfiguration, LineComment},
    merge::{merge_auto_closing_pairs, merge_enter_rules},
    rules::DefaultRules,
    settings::Settings,
};

const DEFAULT_BLOCK_CLOSE: &str = "*/";

/// What to install for a language: multi-line support and/or a single-line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Installation<'a> {
    pub language: &'a str,
    pub multi_line: bool,
    pub style: Option<SingleLineStyle>,
}

/// Build the complete configuration for `request`.
///
/// `native` is the language's normalized configuration, if it has one. Every
/// pattern in the result is already live because normalization happens when
/// the configuration is loaded and the default tables are compiled up front.
pub fn compose(
    request: Installation<'_>,
    native: Option<&LanguageConfiguration>,
    settings: &Settings,
    defaults: &DefaultRules,
) -> LanguageConfiguration {
    let mut config = native.cloned().unwrap_or_default();

    if request.multi_line {
        let pairs = config.auto_closing_pairs.take().unwrap_or_default();
        config.auto_closing_pairs = Some(merge_auto_closing_pairs(pairs, &defaults.pairs));

        let rules = config.on_enter_rules.take().unwrap_or_default();
        config.on_enter_rules = Some(merge_enter_rules(&defaults.multi_line, rules));

        if config.comments.is_none() {
            config.comments = Some(defaults.comments.clone());
        }

        if let Some(open) = settings.override_default_language_multi_line_comments.get(request.language) {
            debug!(language = request.language, open = %open, "overriding multi-line opening delimiter");
            let comments = config.comments.get_or_insert_with(CommentRule::default);
            let close = comments
                .block_comment
                .take()
                .map_or_else(|| DEFAULT_BLOCK_CLOSE.to_string(), |(_, close)| close);
            comments.block_comment = Some((open.clone(), close));
        }

        if request.language == BLADE {
            let pair = BladeOverride::from_settings(settings).pair();
            config.comments.get_or_insert_with(CommentRule::default).block_comment = Some(pair);
        }
    }

    if let Some(style) = request.style {
        if settings.single_line_block_on_enter {
            config.on_enter_rules.get_or_insert_with(Vec::new).extend(defaults.style_rules(style).iter().cloned());
        } else {
            let comments = config.comments.get_or_insert_with(CommentRule::default);
            let current = comments.line_comment.as_ref().map(LineComment::token);
            if current != Some(style.token()) {
                comments.line_comment = Some(LineComment::Token(style.token().to_string()));
            }
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{AutoClosingPair, RawLanguageConfig, normalize};

    fn defaults() -> DefaultRules {
        DefaultRules::compile().expect("tables compile")
    }

    fn native(json: &str) -> LanguageConfiguration {
        let raw: RawLanguageConfig = serde_json::from_str(json).expect("valid json");
        normalize(raw).expect("normalizes")
    }

    fn request(language: &str, multi_line: bool, style: Option<SingleLineStyle>) -> Installation<'_> {
        Installation { language, multi_line, style }
    }

    #[test]
    fn shorthand_native_pair_survives_merge() {
        let native = native(r#"{"autoClosingPairs": [["(", ")"], ["<", ">"]]}"#);
        let config = compose(request("c", true, None), Some(&native), &Settings::default(), &defaults());

        let pairs = config.auto_closing_pairs.expect("pairs");
        assert_eq!(pairs[0], AutoClosingPair::new("(", ")"));
        assert_eq!(pairs[1], AutoClosingPair::new("<", ">"));
        assert_eq!(pairs.iter().filter(|p| p.open == "(").count(), 1);
        assert!(pairs.iter().any(|p| p.open == "/**"));
    }

    #[test]
    fn default_rules_come_before_native_rules() {
        let native = native(r#"{"onEnterRules": [{"beforeText": "^\\s*--", "action": {"indent": "none", "appendText": "-- "}}]}"#);
        let defaults = defaults();
        let config = compose(request("sql", true, None), Some(&native), &Settings::default(), &defaults);

        let rules = config.on_enter_rules.expect("rules");
        assert_eq!(rules.len(), defaults.multi_line.len() + 1);
        assert_eq!(rules.last().map(|r| r.trigger()), Some(r"^\s*--"));
    }

    #[test]
    fn missing_comments_fall_back_to_block_default() {
        let config = compose(request("custom", true, None), None, &Settings::default(), &defaults());
        assert_eq!(config.block_comment(), Some(&("/*".to_string(), "*/".to_string())));
    }

    #[test]
    fn override_replaces_opening_delimiter() {
        let mut settings = Settings::default();
        settings.override_default_language_multi_line_comments.insert("php".into(), "/*!".into());
        let native = native(r#"{"comments": {"lineComment": "//", "blockComment": ["/*", "*/"]}}"#);
        let config = compose(request("php", true, None), Some(&native), &settings, &defaults());
        assert_eq!(config.block_comment(), Some(&("/*!".to_string(), "*/".to_string())));
        assert_eq!(config.line_comment(), Some("//"));
    }

    #[test]
    fn blade_uses_override_pair() {
        let settings = Settings { blade_override_comments: true, ..Settings::default() };
        let native = native(r#"{"comments": {"blockComment": ["<!--", "-->"]}}"#);
        let config = compose(request(BLADE, true, None), Some(&native), &settings, &defaults());
        assert_eq!(config.block_comment(), Some(&("{{--".to_string(), "--}}".to_string())));
    }

    #[test]
    fn on_enter_appends_style_rules() {
        let settings = Settings { single_line_block_on_enter: true, ..Settings::default() };
        let defaults = defaults();
        let config = compose(request("python", false, Some(SingleLineStyle::Hash)), None, &settings, &defaults);
        let rules = config.on_enter_rules.expect("rules");
        assert_eq!(rules, defaults.hash);
        assert!(config.comments.is_none());
    }

    #[test]
    fn without_on_enter_sets_line_comment_and_keeps_block() {
        let native = native(r#"{"comments": {"blockComment": ["\"\"\"", "\"\"\""]}}"#);
        let config = compose(
            request("python", false, Some(SingleLineStyle::Hash)),
            Some(&native),
            &Settings::default(),
            &defaults(),
        );
        assert_eq!(config.line_comment(), Some("#"));
        assert_eq!(config.block_comment(), Some(&("\"\"\"".to_string(), "\"\"\"".to_string())));
        assert!(config.on_enter_rules.is_none());
    }

    #[test]
    fn matching_line_comment_record_is_kept() {
        let native = native(r##"{"comments": {"lineComment": {"comment": "#", "noIndent": true}}}"##);
        let config = compose(
            request("makefile", false, Some(SingleLineStyle::Hash)),
            Some(&native),
            &Settings::default(),
            &defaults(),
        );
        assert_eq!(
            config.comments.and_then(|c| c.line_comment),
            Some(LineComment::Config { comment: "#".into(), no_indent: Some(true) })
        );
    }
}
