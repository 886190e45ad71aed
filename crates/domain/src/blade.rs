//! Blade block-comment override.
//!
//! A persisted boolean picks between Blade's own `{{-- --}}` comments and the
//! HTML `<!-- -->` pair. It only has an effect while `blade` is enabled.

use crate::{language::CharacterPair, settings::Settings};

pub const BLADE: &str = "blade";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BladeOverride {
    On,
    Off,
}

impl BladeOverride {
    /// The startup state: the stored flag, forced off while Blade is disabled.
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.blade_override_comments && !settings.is_disabled(BLADE) { Self::On } else { Self::Off }
    }

    pub fn from_flag(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    pub fn pair(self) -> CharacterPair {
        let (open, close) = match self {
            Self::On => ("{{--", "--}}"),
            Self::Off => ("<!--", "-->"),
        };
        (open.to_string(), close.to_string())
    }
}

/// What the toggle command should do for the current settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Persist `persist` globally and install `pair`.
    Applied { persist: bool, pair: CharacterPair },
    /// Blade is disabled: nothing is persisted and the off pair is forced.
    Inert { pair: CharacterPair },
}

pub fn toggle(settings: &Settings) -> ToggleOutcome {
    if settings.is_disabled(BLADE) {
        return ToggleOutcome::Inert { pair: BladeOverride::Off.pair() };
    }
    let next = BladeOverride::from_flag(settings.blade_override_comments).toggled();
    ToggleOutcome::Applied { persist: next.is_on(), pair: next.pair() }
}

/// Notice shown when the toggle is invoked while Blade is disabled.
pub fn inert_notice(namespace: &str) -> String {
    format!(
        "Blade is set as disabled in the \"{namespace}.disabledLanguages\" setting. \
         The \"{namespace}.bladeOverrideComments\" setting will have no effect."
    )
}

/// Announcement after the override setting changed.
pub fn change_notice(enabled: bool) -> String {
    let state = if enabled { "Enabled" } else { "Disabled" };
    format!("{state} Blade Override Comments setting.")
}
