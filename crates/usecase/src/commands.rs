//! The two text-editor commands.

use comment_blocks_domain::{
    BLADE, Insertion, Invocation, SettingKey, ToggleOutcome,
    blade::{self, inert_notice},
};
use comment_blocks_ports::editor::TextEditor;
use comment_blocks_shared_kernel::{ErrorContext, Result};
use tracing::{debug, info};

use crate::configurator::Configurator;

pub const SINGLE_LINE_BLOCK: &str = "singleLineBlock";
pub const CHANGE_BLADE_MULTI_LINE_BLOCK: &str = "changeBladeMultiLineBlock";

/// Continue the single-line comment under the cursor.
///
/// Returns the insertion made, or `None` when the command had nothing to do.
pub fn single_line_block(
    configurator: &Configurator<'_>,
    editor: &mut dyn TextEditor,
    invocation: Invocation,
) -> Result<Option<Insertion>> {
    let Some(cursor) = editor.collapsed_cursor() else {
        return Ok(None);
    };
    let language = editor.language_id();
    let settings = configurator.settings();
    let registry = &configurator.registry().classification().single_line;
    let Some(style) = registry.resolve(&language, settings.single_line_style_precedence) else {
        return Ok(None);
    };
    let Some(line) = editor.line_text(cursor.line) else {
        return Ok(None);
    };

    let insertion =
        configurator.engine().continue_line(style, &line, settings.single_line_block_on_enter, invocation);
    if let Some(insertion) = &insertion {
        debug!(language = %language, token = %insertion.token, "continuing comment");
        editor.insert(cursor, &insertion.text).context(SINGLE_LINE_BLOCK)?;
    }
    Ok(insertion)
}

/// Toggles Blade's block comments between `{{-- --}}` and `<!-- -->`.
///
/// The inert notice for a disabled Blade is shown once per session.
#[derive(Debug, Default)]
pub struct BladeToggle {
    inert_notice_shown: bool,
}

impl BladeToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run(&mut self, configurator: &mut Configurator<'_>, editor: &dyn TextEditor) -> Result<Option<ToggleOutcome>> {
        if editor.language_id() != BLADE {
            return Ok(None);
        }
        let ports = configurator.ports();
        let settings = configurator.refresh_settings()?.clone();

        let outcome = blade::toggle(&settings);
        match &outcome {
            ToggleOutcome::Applied { persist, pair } => {
                ports
                    .settings
                    .update_global(SettingKey::BladeOverrideComments, serde_json::Value::Bool(*persist))
                    .context(CHANGE_BLADE_MULTI_LINE_BLOCK)?;
                configurator.refresh_settings()?;
                configurator.apply_blade_pair(pair.clone())?;
                info!(enabled = persist, "blade override toggled");
            }
            ToggleOutcome::Inert { pair } => {
                if !self.inert_notice_shown {
                    ports.notifier.show_information(&inert_notice(&configurator.identity().namespace), &["OK"]);
                    self.inert_notice_shown = true;
                }
                configurator.apply_blade_pair(pair.clone())?;
            }
        }
        Ok(Some(outcome))
    }
}
