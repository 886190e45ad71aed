// src/host.rs
//! Headless stand-ins for the editor host.

use std::{
    collections::BTreeMap,
    fs, io,
    path::PathBuf,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use comment_blocks_domain::LanguageConfiguration;
use comment_blocks_infra::persistence::FileWriter;
use comment_blocks_ports::{
    editor::{Position, Selection, TextEditor},
    host::{HostCommands, LanguageConfigurationHost, Notifier, Registration},
};
use comment_blocks_shared_kernel::{LanguageId, Result};
use tracing::{debug, error, info, warn};

/// Installs configurations by writing them to `<out>/languages/<id>.json`.
///
/// Without an output directory installations are only logged. Installations
/// for one language stack: disposing one rewrites the file with the newest
/// remaining layer, and disposing the last removes the file.
#[derive(Debug, Clone, Default)]
pub struct OutputHost {
    out: Option<PathBuf>,
    layers: Arc<Mutex<Layers>>,
}

#[derive(Debug, Default)]
struct Layers {
    next: u64,
    by_language: BTreeMap<LanguageId, Vec<(u64, LanguageConfiguration)>>,
}

impl OutputHost {
    pub fn new(out: Option<PathBuf>) -> Self {
        Self { out, layers: Arc::default() }
    }

    pub fn languages_dir(&self) -> Option<PathBuf> {
        self.out.as_ref().map(|out| out.join("languages"))
    }

    /// Remove every configuration file a previous run left behind.
    pub fn clear(&self) -> io::Result<usize> {
        let Some(dir) = self.languages_dir() else { return Ok(0) };
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err),
        };
        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") && path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        if removed > 0 {
            debug!(dir = %dir.display(), removed, "stale language configurations removed");
        }
        Ok(removed)
    }

    fn target(&self, language: &LanguageId) -> Option<PathBuf> {
        self.languages_dir().map(|dir| dir.join(format!("{language}.json")))
    }
}

fn lock(layers: &Mutex<Layers>) -> MutexGuard<'_, Layers> {
    layers.lock().unwrap_or_else(PoisonError::into_inner)
}

struct FileRegistration {
    language: LanguageId,
    id: u64,
    path: Option<PathBuf>,
    layers: Arc<Mutex<Layers>>,
}

impl Registration for FileRegistration {
    fn dispose(self: Box<Self>) {
        let below = {
            let mut layers = lock(&self.layers);
            let Some(stack) = layers.by_language.get_mut(&self.language) else {
                return;
            };
            stack.retain(|(id, _)| *id != self.id);
            let below = stack.last().map(|(_, config)| config.clone());
            if stack.is_empty() {
                layers.by_language.remove(&self.language);
            }
            below
        };
        debug!(language = %self.language, restored = below.is_some(), "language configuration disposed");

        let Some(path) = &self.path else { return };
        let outcome = match below {
            Some(config) => FileWriter::write_json(path, &config).map_err(|err| err.to_string()),
            None => match fs::remove_file(path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.to_string()),
                _ => Ok(()),
            },
        };
        if let Err(err) = outcome {
            warn!(language = %self.language, path = %path.display(), error = %err, "disposed configuration left on disk");
        }
    }
}

impl LanguageConfigurationHost for OutputHost {
    fn set_language_configuration(
        &self,
        language: &LanguageId,
        config: &LanguageConfiguration,
    ) -> Result<Box<dyn Registration>> {
        let path = self.target(language);
        if let Some(path) = &path {
            FileWriter::write_json(path, config)?;
            debug!(language = %language, path = %path.display(), "language configuration written");
        }
        let mut layers = lock(&self.layers);
        let id = layers.next;
        layers.next += 1;
        layers.by_language.entry(language.clone()).or_default().push((id, config.clone()));
        Ok(Box::new(FileRegistration { language: language.clone(), id, path, layers: Arc::clone(&self.layers) }))
    }
}

/// Prints notices to stderr. Nobody answers, so no action is ever chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_information(&self, message: &str, actions: &[&str]) -> Option<String> {
        info!(?actions, "{message}");
        eprintln!("{message}");
        None
    }

    fn show_error(&self, message: &str, actions: &[&str]) -> Option<String> {
        error!(?actions, "{message}");
        eprintln!("Error: {message}");
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggedCommands;

impl HostCommands for LoggedCommands {
    fn restart(&self) -> Result<()> {
        warn!("restart requested; restart the editor for the change to take effect");
        Ok(())
    }

    fn show_log(&self) -> Result<()> {
        info!("run with --debug for the full log");
        Ok(())
    }
}

/// A one-line buffer with the cursor at the end of the line.
#[derive(Debug, Clone)]
pub struct LineEditor {
    language: LanguageId,
    line: String,
    inserted: Vec<(Position, String)>,
}

impl LineEditor {
    pub fn new(language: impl Into<LanguageId>, line: impl Into<String>) -> Self {
        Self { language: language.into(), line: line.into(), inserted: Vec::new() }
    }

    pub fn inserted(&self) -> &[(Position, String)] {
        &self.inserted
    }

    fn end(&self) -> Position {
        Position { line: 0, character: self.line.chars().count() }
    }
}

impl TextEditor for LineEditor {
    fn language_id(&self) -> LanguageId {
        self.language.clone()
    }

    fn selections(&self) -> Vec<Selection> {
        vec![Selection::cursor(self.end())]
    }

    fn line_text(&self, line: usize) -> Option<String> {
        (line == 0).then(|| self.line.clone())
    }

    fn insert(&mut self, at: Position, text: &str) -> Result<()> {
        self.inserted.push((at, text.to_string()));
        Ok(())
    }
}
