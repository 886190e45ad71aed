// src/app.rs
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, anyhow};
use comment_blocks_domain::{BLADE, Invocation, Settings, ToggleOutcome};
use comment_blocks_infra::{
    artifacts::ArtifactDirectory,
    catalog::DirectoryExtensionCatalog,
    metadata::{ExtensionMetaData, HostLocations},
    persistence::JsoncReader,
    platform,
    settings::FileSettingsStore,
    watch::SettingsWatcher,
};
use comment_blocks_ports::settings::SettingsStore;
use comment_blocks_shared_kernel::{PresentationError, PresentationResult, path::logical_absolute};
use comment_blocks_usecase::{BladeToggle, BuildReport, Configurator, HostPorts, Trigger, dispatch, single_line_block};
use tracing::{debug, info, warn};

use crate::{
    args::{Args, Command, GlobalArgs},
    host::{ConsoleNotifier, LineEditor, LoggedCommands, OutputHost},
};

/// Every adapter a configurator borrows for one run.
pub struct Session {
    metadata: ExtensionMetaData,
    catalog: DirectoryExtensionCatalog,
    json: JsoncReader,
    host: OutputHost,
    settings: FileSettingsStore,
    notifier: ConsoleNotifier,
    commands: LoggedCommands,
    artifacts: ArtifactDirectory,
}

impl Session {
    pub fn open(global: &GlobalArgs, out: Option<PathBuf>) -> Result<Self> {
        let install_path = logical_absolute(&global.install_path);
        let locations = HostLocations::detect(global.app_root.clone(), global.user_extensions.clone());
        let metadata = ExtensionMetaData::load(&install_path, &locations)
            .with_context(|| format!("no usable package.json under {}", install_path.display()))?;
        let settings_path = global
            .settings
            .clone()
            .or_else(platform::default_settings_file)
            .ok_or_else(|| anyhow!("cannot locate the host settings file; pass --settings"))?;
        debug!(settings = %settings_path.display(), roots = ?metadata.extension_roots(), "session opened");

        Ok(Self {
            catalog: DirectoryExtensionCatalog::new(metadata.extension_roots()),
            json: JsoncReader,
            host: OutputHost::new(out),
            settings: FileSettingsStore::new(settings_path, metadata.namespace.clone()),
            notifier: ConsoleNotifier,
            commands: LoggedCommands,
            artifacts: ArtifactDirectory::new(metadata.artifacts_dir()),
            metadata,
        })
    }

    pub fn ports(&self) -> HostPorts<'_> {
        HostPorts {
            catalog: &self.catalog,
            json: &self.json,
            host: &self.host,
            settings: &self.settings,
            notifier: &self.notifier,
            commands: &self.commands,
            artifacts: &self.artifacts,
        }
    }

    pub fn host(&self) -> &OutputHost {
        &self.host
    }

    pub fn configurator(&self) -> Result<Configurator<'_>> {
        Ok(Configurator::new(self.ports(), self.metadata.identity())?)
    }
}

pub fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Configure { out } => configure(&args.global, out),
        Command::Continue { language, line, keybinding } => {
            continue_line(&args.global, non_blank("--language", &language)?, &line, keybinding)
        }
        Command::ToggleBlade => toggle_blade(&args.global),
        Command::Watch { out, interval } => watch(&args.global, out, debounce(interval)?),
    }
}

fn non_blank<'a>(flag: &str, value: &'a str) -> PresentationResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(invalid(flag, value, "must not be empty"));
    }
    Ok(trimmed)
}

fn debounce(millis: u64) -> PresentationResult<Duration> {
    if millis == 0 {
        return Err(invalid("--interval", "0", "must be at least 1 millisecond"));
    }
    Ok(Duration::from_millis(millis))
}

fn invalid(flag: &str, value: &str, reason: &str) -> PresentationError {
    PresentationError::InvalidValue { flag: flag.to_string(), value: value.to_string(), reason: reason.to_string() }
}

fn configure(global: &GlobalArgs, out: PathBuf) -> Result<()> {
    let session = Session::open(global, Some(out.clone()))?;
    session.host.clear().with_context(|| format!("cannot clear {}", out.join("languages").display()))?;
    let mut configurator = session.configurator()?;
    let report = configurator.activate().context("configuration build failed")?;
    configurator.detach();
    print_report(&report, &out);
    Ok(())
}

fn print_report(report: &BuildReport, out: &Path) {
    for entry in &report.installed {
        let kind = if entry.multi_line { "multi-line" } else { "single-line" };
        let style = entry.style.map_or("-", |style| style.token());
        println!("{:<24} {kind:<12} {style}", entry.language.as_str());
    }
    println!("{} languages configured in {}", report.installed.len(), out.join("languages").display());
}

fn continue_line(global: &GlobalArgs, language: &str, line: &str, keybinding: bool) -> Result<()> {
    let session = Session::open(global, None)?;
    let mut configurator = session.configurator()?;
    configurator.configure().context("configuration build failed")?;

    let invocation = if keybinding { Invocation::Keybinding } else { Invocation::EnterKey };
    let mut editor = LineEditor::new(language, line);
    let insertion = single_line_block(&configurator, &mut editor, invocation)?;
    println!("{}", serde_json::to_string(&insertion.map(|insertion| insertion.text))?);
    Ok(())
}

fn toggle_blade(global: &GlobalArgs) -> Result<()> {
    let session = Session::open(global, None)?;
    let mut configurator = session.configurator()?;
    configurator.configure().context("configuration build failed")?;

    let editor = LineEditor::new(BLADE, "");
    match BladeToggle::new().run(&mut configurator, &editor)? {
        Some(ToggleOutcome::Applied { persist, pair }) => {
            let state = if persist { "on" } else { "off" };
            println!("blade override {state}: {} {}", pair.0, pair.1);
        }
        Some(ToggleOutcome::Inert { pair }) => println!("blade disabled: {} {}", pair.0, pair.1),
        None => {}
    }
    Ok(())
}

fn watch(global: &GlobalArgs, out: PathBuf, interval: Duration) -> Result<()> {
    let session = Session::open(global, Some(out.clone()))?;
    session.host.clear().with_context(|| format!("cannot clear {}", out.join("languages").display()))?;
    let mut configurator = session.configurator()?;
    dispatch(&mut configurator, Trigger::Activation)?;
    let mut last: Settings = configurator.settings().clone();
    info!(settings = %session.settings.path().display(), ?interval, "watching settings");

    let watched = SettingsWatcher::run(session.settings.path(), interval, || {
        let next = match session.settings.snapshot() {
            Ok(next) => next,
            Err(err) => {
                // Half-written files are common while the editor saves.
                warn!(error = %err, "settings unreadable, keeping previous snapshot");
                return Ok(());
            }
        };
        for key in last.changed_keys(&next) {
            match dispatch(&mut configurator, Trigger::SettingChanged(key)) {
                Ok(reaction) => info!(setting = %key, ?reaction, "setting changed"),
                Err(err) => warn!(setting = %key, error = %err, "reconfiguration failed, waiting for the next change"),
            }
        }
        last = next;
        Ok(())
    });
    configurator.detach();
    watched?;
    Ok(())
}
