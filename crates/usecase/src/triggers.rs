//! Reconfiguration triggers.
//!
//! Every host event maps to one of a small closed set of reactions. Nothing is
//! patched incrementally: a rebuild always reconstructs everything.

use comment_blocks_domain::{BLADE, BladeOverride, SettingKey, blade::change_notice};
use comment_blocks_shared_kernel::Result;
use tracing::{debug, info};

use crate::configurator::Configurator;

pub const RELOAD: &str = "Reload";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Activation,
    DocumentOpened,
    SettingChanged(SettingKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Activate,
    Rebuild,
    PromptReload,
    ReapplyBlade,
}

impl Trigger {
    pub fn reaction(self) -> Reaction {
        match self {
            Self::Activation => Reaction::Activate,
            Self::DocumentOpened => Reaction::Rebuild,
            Self::SettingChanged(key) => match key {
                SettingKey::DisabledLanguages | SettingKey::OverrideDefaultLanguageMultiLineComments => {
                    Reaction::PromptReload
                }
                SettingKey::BladeOverrideComments => Reaction::ReapplyBlade,
                SettingKey::SingleLineBlockOnEnter
                | SettingKey::SlashStyleBlocks
                | SettingKey::HashStyleBlocks
                | SettingKey::SemicolonStyleBlocks
                | SettingKey::MultiLineStyleBlocks
                | SettingKey::SingleLineStylePrecedence => Reaction::Rebuild,
            },
        }
    }
}

/// Run the reaction for `trigger` against `configurator`.
pub fn dispatch(configurator: &mut Configurator<'_>, trigger: Trigger) -> Result<Reaction> {
    let reaction = trigger.reaction();
    debug!(?trigger, ?reaction, "dispatching trigger");
    match reaction {
        Reaction::Activate => {
            configurator.activate()?;
        }
        Reaction::Rebuild => {
            configurator.configure()?;
        }
        Reaction::PromptReload => prompt_reload(configurator, trigger)?,
        Reaction::ReapplyBlade => reapply_blade(configurator)?,
    }
    Ok(reaction)
}

fn prompt_reload(configurator: &mut Configurator<'_>, trigger: Trigger) -> Result<()> {
    let Trigger::SettingChanged(key) = trigger else {
        return Ok(());
    };
    let ports = configurator.ports();
    let message = format!(
        "The {} setting has been changed. Please reload the Extension Host to take effect.",
        key.dotted(&configurator.identity().namespace)
    );
    if ports.notifier.show_information(&message, &[RELOAD]).as_deref() == Some(RELOAD) {
        info!(setting = %key, "restarting host");
        ports.commands.restart()?;
    }
    Ok(())
}

fn reapply_blade(configurator: &mut Configurator<'_>) -> Result<()> {
    let ports = configurator.ports();
    let settings = configurator.refresh_settings()?.clone();
    configurator.apply_blade_pair(BladeOverride::from_settings(&settings).pair())?;
    if !settings.is_disabled(BLADE) {
        ports.notifier.show_information(&change_notice(settings.blade_override_comments), &[]);
    }
    Ok(())
}
