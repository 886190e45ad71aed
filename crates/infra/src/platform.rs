// crates/infra/src/platform.rs
//! Platform-specific lookups.
//!
//! This module centralizes OS-specific logic: WSL detection and the
//! translation of Windows host paths into paths reachable from inside WSL.

use std::path::PathBuf;

// ============================================================================
// WSL Detection
// ============================================================================

/// Whether this process runs inside the Windows Subsystem for Linux.
pub fn is_wsl() -> bool {
    #[cfg(target_os = "linux")]
    {
        if std::env::var_os("WSL_DISTRO_NAME").is_some() {
            return true;
        }
        std::fs::read_to_string("/proc/sys/kernel/osrelease")
            .map(|release| release.to_ascii_lowercase().contains("microsoft"))
            .unwrap_or(false)
    }

    #[cfg(not(target_os = "linux"))]
    {
        false
    }
}

// ============================================================================
// Path Conversion
// ============================================================================

/// Translate `C:\Users\me` into `/mnt/c/Users/me`. Paths without a drive
/// letter are only normalized to forward slashes.
pub fn windows_to_wsl_path(path: &str) -> PathBuf {
    let unified = path.replace('\\', "/");
    let mut chars = unified.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) if drive.is_ascii_alphabetic() => {
            let rest = unified[2..].trim_start_matches('/');
            PathBuf::from(format!("/mnt/{}/{rest}", drive.to_ascii_lowercase()))
        }
        _ => PathBuf::from(unified),
    }
}

/// Parent of a Windows or POSIX style path string.
pub fn parent_of(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed.rfind(['/', '\\']).map_or("", |index| &trimmed[..index])
}

// ============================================================================
// Default Locations
// ============================================================================

/// `~/.vscode/extensions`, where the host installs third-party extensions.
pub fn default_user_extensions_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vscode").join("extensions"))
}

/// The host's global user `settings.json`.
pub fn default_settings_file() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("Code").join("User").join("settings.json"))
}
