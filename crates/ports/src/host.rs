// crates/ports/src/host.rs
use comment_blocks_domain::LanguageConfiguration;
use comment_blocks_shared_kernel::{LanguageId, Result};

/// An installed language configuration. Disposing it unregisters it.
pub trait Registration: Send {
    fn dispose(self: Box<Self>);
}

/// Port for installing composed configurations into the host editor.
pub trait LanguageConfigurationHost: Send + Sync {
    fn set_language_configuration(
        &self,
        language: &LanguageId,
        config: &LanguageConfiguration,
    ) -> Result<Box<dyn Registration>>;
}

/// Port for user-facing messages. Returns the selected action, if any.
pub trait Notifier: Send + Sync {
    fn show_information(&self, message: &str, actions: &[&str]) -> Option<String>;
    fn show_error(&self, message: &str, actions: &[&str]) -> Option<String>;
}

pub trait HostCommands: Send + Sync {
    /// Reload the host so settings that need a restart take effect.
    fn restart(&self) -> Result<()>;
    /// Reveal the log output.
    fn show_log(&self) -> Result<()>;
}
