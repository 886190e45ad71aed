// src/args.rs
use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

use crate::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "comment-blocks",
    version = VERSION,
    about = "Merges language configurations and continues single-line comment blocks"
)]
pub struct Args {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Directory holding this system's package.json
    #[arg(long, global = true, default_value = ".")]
    pub install_path: PathBuf,

    /// Host settings.json (defaults to the user settings of the host)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Host application root; built-in extensions are read from <APP_ROOT>/extensions
    #[arg(long, global = true)]
    pub app_root: Option<PathBuf>,

    /// Directory of user-installed extensions (defaults to ~/.vscode/extensions)
    #[arg(long, global = true)]
    pub user_extensions: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build and install every language configuration
    Configure {
        /// Where installed configurations are written, one file per language
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },

    /// Continue the comment on a single line of text
    Continue {
        /// Language of the line
        #[arg(long)]
        language: String,

        /// Text of the line, the cursor is at its end
        #[arg(long, allow_hyphen_values = true)]
        line: String,

        /// Run as the keybinding rather than the Enter key
        #[arg(long)]
        keybinding: bool,
    },

    /// Toggle Blade block comments between `{{-- --}}` and `<!-- -->`
    ToggleBlade,

    /// Rebuild whenever the settings file changes
    Watch {
        /// Where installed configurations are written, one file per language
        #[arg(long, default_value = "out")]
        out: PathBuf,

        /// Debounce interval in milliseconds
        #[arg(long, default_value_t = 500)]
        interval: u64,
    },
}
