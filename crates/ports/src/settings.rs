// crates/ports/src/settings.rs
use comment_blocks_domain::{SettingKey, Settings};
use comment_blocks_shared_kernel::Result;

/// Port for the settings under this system's namespace.
pub trait SettingsStore: Send + Sync {
    fn snapshot(&self) -> Result<Settings>;
    /// Persist `value` for `key` in the global (user) scope.
    fn update_global(&self, key: SettingKey, value: serde_json::Value) -> Result<()>;
}
