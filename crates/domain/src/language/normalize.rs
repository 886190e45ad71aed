use comment_blocks_shared_kernel::DomainResult;

use super::{
    model::{AutoClosingPair, FoldingMarkers, FoldingRules, IndentationRules, LanguageConfiguration, OnEnterRule},
    raw::{PairEntry, RawFolding, RawIndentationRules, RawLanguageConfig, RawOnEnterRule},
};
use crate::pattern::{Pattern, PatternField};

/// Turn a raw configuration into its canonical shape.
///
/// Pair shorthands become `{open, close}` records and every pattern field is
/// repaired into a live pattern. The raw value is consumed, so nothing else
/// can observe the half-normalized state.
pub fn normalize(raw: RawLanguageConfig) -> DomainResult<LanguageConfiguration> {
    Ok(LanguageConfiguration {
        comments: raw.comments,
        brackets: raw.brackets,
        auto_closing_pairs: raw.auto_closing_pairs.map(normalize_pairs),
        surrounding_pairs: raw.surrounding_pairs.map(normalize_pairs),
        on_enter_rules: raw.on_enter_rules.map(normalize_rules).transpose()?,
        word_pattern: repair_optional(raw.word_pattern)?,
        folding: raw.folding.map(normalize_folding).transpose()?,
        indentation_rules: raw.indentation_rules.map(normalize_indentation).transpose()?,
        other: raw.other,
    })
}

fn normalize_pairs(pairs: Vec<PairEntry>) -> Vec<AutoClosingPair> {
    pairs.into_iter().map(PairEntry::into_record).collect()
}

fn normalize_rules(rules: Vec<RawOnEnterRule>) -> DomainResult<Vec<OnEnterRule>> {
    rules
        .into_iter()
        .map(|rule| {
            Ok(OnEnterRule {
                before_text: rule.before_text.repair()?,
                after_text: repair_optional(rule.after_text)?,
                previous_line_text: repair_optional(rule.previous_line_text)?,
                action: rule.action,
            })
        })
        .collect()
}

fn normalize_folding(folding: RawFolding) -> DomainResult<FoldingRules> {
    let markers = match folding.markers {
        Some(markers) => Some(FoldingMarkers { start: markers.start.repair()?, end: markers.end.repair()? }),
        None => None,
    };
    Ok(FoldingRules { off_side: folding.off_side, markers })
}

fn normalize_indentation(rules: RawIndentationRules) -> DomainResult<IndentationRules> {
    Ok(IndentationRules {
        increase_indent_pattern: rules.increase_indent_pattern.repair()?,
        decrease_indent_pattern: rules.decrease_indent_pattern.repair()?,
        indent_next_line_pattern: repair_optional(rules.indent_next_line_pattern)?,
        un_indented_line_pattern: repair_optional(rules.un_indented_line_pattern)?,
    })
}

fn repair_optional(field: Option<PatternField>) -> DomainResult<Option<Pattern>> {
    field.map(PatternField::repair).transpose()
}
