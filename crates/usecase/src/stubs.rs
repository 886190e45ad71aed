//! In-memory port implementations for the use-case tests.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use comment_blocks_domain::{
    LanguageConfiguration, MultiLineLanguageDefinitions, SettingKey, Settings, SingleLineLanguageDefinitions,
};
use comment_blocks_ports::{
    artifacts::ArtifactSink,
    catalog::{ExtensionCatalog, ExtensionIdentity, ExtensionManifest, LanguageContribution},
    editor::{Position, Selection, TextEditor},
    host::{HostCommands, LanguageConfigurationHost, Notifier, Registration},
    json::JsonSource,
    settings::SettingsStore,
};
use comment_blocks_shared_kernel::{InfrastructureError, JsonIssue, LanguageId, Result};

use crate::configurator::HostPorts;

pub fn identity() -> ExtensionIdentity {
    ExtensionIdentity {
        id: "publisher.automatic-comment-blocks".into(),
        namespace: "auto-comment-blocks".into(),
        display_name: "Automatic Comment Blocks".into(),
        version: "1.0.0".into(),
    }
}

#[derive(Default)]
pub struct StubCatalog {
    extensions: Vec<ExtensionManifest>,
}

impl StubCatalog {
    pub fn extension(mut self, id: &str, languages: &[(&str, Option<&str>)]) -> Self {
        self.extensions.push(ExtensionManifest {
            id: id.into(),
            path: PathBuf::from("/extensions").join(id),
            languages: languages
                .iter()
                .map(|(language, path)| LanguageContribution {
                    id: LanguageId::from(*language),
                    configuration: path.map(PathBuf::from),
                })
                .collect(),
        });
        self
    }
}

impl ExtensionCatalog for StubCatalog {
    fn extensions(&self) -> Result<Vec<ExtensionManifest>> {
        Ok(self.extensions.clone())
    }
}

enum StubFile {
    Json(String),
    Malformed(usize, usize),
}

#[derive(Default)]
pub struct StubJson {
    files: BTreeMap<PathBuf, StubFile>,
}

impl StubJson {
    pub fn file(mut self, path: &str, content: &str) -> Self {
        self.files.insert(path.into(), StubFile::Json(content.into()));
        self
    }

    pub fn malformed(mut self, path: &str, line: usize, column: usize) -> Self {
        self.files.insert(path.into(), StubFile::Malformed(line, column));
        self
    }
}

impl JsonSource for StubJson {
    fn read_json(&self, path: &Path) -> Result<serde_json::Value> {
        match self.files.get(path) {
            Some(StubFile::Json(content)) => Ok(serde_json::from_str(content)?),
            Some(StubFile::Malformed(line, column)) => Err(InfrastructureError::MalformedJson {
                issues: vec![JsonIssue {
                    path: path.to_path_buf(),
                    line: *line,
                    column: *column,
                    message: "unexpected token".into(),
                }],
            }
            .into()),
            None => Err(InfrastructureError::FileRead {
                path: path.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            }
            .into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Installed(LanguageId, LanguageConfiguration),
    Disposed(LanguageId),
}

#[derive(Default, Clone)]
pub struct RecordingHost {
    pub events: Arc<Mutex<Vec<HostEvent>>>,
    /// Zero-based index of the installation that is refused.
    pub refuse: Option<usize>,
}

impl RecordingHost {
    pub fn refusing(index: usize) -> Self {
        Self { refuse: Some(index), ..Self::default() }
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    /// The configurations currently installed, in installation order.
    pub fn live(&self) -> Vec<(LanguageId, LanguageConfiguration)> {
        let mut live: Vec<(LanguageId, LanguageConfiguration)> = Vec::new();
        for event in self.events() {
            match event {
                HostEvent::Installed(language, config) => live.push((language, config)),
                HostEvent::Disposed(language) => {
                    if let Some(index) = live.iter().position(|(id, _)| *id == language) {
                        live.remove(index);
                    }
                }
            }
        }
        live
    }

    pub fn live_config(&self, language: &str) -> Option<LanguageConfiguration> {
        self.live().into_iter().rev().find(|(id, _)| id == language).map(|(_, config)| config)
    }
}

struct RecordingRegistration {
    language: LanguageId,
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl Registration for RecordingRegistration {
    fn dispose(self: Box<Self>) {
        self.events.lock().unwrap().push(HostEvent::Disposed(self.language));
    }
}

impl LanguageConfigurationHost for RecordingHost {
    fn set_language_configuration(
        &self,
        language: &LanguageId,
        config: &LanguageConfiguration,
    ) -> Result<Box<dyn Registration>> {
        let mut events = self.events.lock().unwrap();
        let attempts = events.iter().filter(|event| matches!(event, HostEvent::Installed(..))).count();
        if self.refuse == Some(attempts) {
            return Err(InfrastructureError::OutputError { message: format!("{language} refused"), source: None }.into());
        }
        events.push(HostEvent::Installed(language.clone(), config.clone()));
        drop(events);
        Ok(Box::new(RecordingRegistration { language: language.clone(), events: Arc::clone(&self.events) }))
    }
}

#[derive(Default)]
pub struct StubSettings {
    pub current: Mutex<Settings>,
    pub updates: Mutex<Vec<(SettingKey, serde_json::Value)>>,
}

impl StubSettings {
    pub fn with(settings: Settings) -> Self {
        Self { current: Mutex::new(settings), updates: Mutex::default() }
    }

    pub fn set(&self, settings: Settings) {
        *self.current.lock().unwrap() = settings;
    }
}

impl SettingsStore for StubSettings {
    fn snapshot(&self) -> Result<Settings> {
        Ok(self.current.lock().unwrap().clone())
    }

    fn update_global(&self, key: SettingKey, value: serde_json::Value) -> Result<()> {
        let mut current = self.current.lock().unwrap();
        let mut as_json = serde_json::to_value(&*current)?;
        as_json[key.as_str()] = value.clone();
        *current = serde_json::from_value(as_json)?;
        self.updates.lock().unwrap().push((key, value));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub information: Mutex<Vec<(String, Vec<String>)>>,
    pub errors: Mutex<Vec<(String, Vec<String>)>>,
    pub answer: Option<String>,
}

impl RecordingNotifier {
    pub fn answering(answer: &str) -> Self {
        Self { answer: Some(answer.into()), ..Self::default() }
    }

    pub fn information(&self) -> Vec<String> {
        self.information.lock().unwrap().iter().map(|(message, _)| message.clone()).collect()
    }

    pub fn errors(&self) -> Vec<(String, Vec<String>)> {
        self.errors.lock().unwrap().clone()
    }
}

fn owned(actions: &[&str]) -> Vec<String> {
    actions.iter().map(|action| (*action).to_string()).collect()
}

impl Notifier for RecordingNotifier {
    fn show_information(&self, message: &str, actions: &[&str]) -> Option<String> {
        self.information.lock().unwrap().push((message.into(), owned(actions)));
        self.answer.clone().filter(|answer| actions.contains(&answer.as_str()))
    }

    fn show_error(&self, message: &str, actions: &[&str]) -> Option<String> {
        self.errors.lock().unwrap().push((message.into(), owned(actions)));
        self.answer.clone().filter(|answer| actions.contains(&answer.as_str()))
    }
}

#[derive(Default)]
pub struct StubCommands {
    pub restarts: Mutex<usize>,
    pub log_shown: Mutex<usize>,
}

impl HostCommands for StubCommands {
    fn restart(&self) -> Result<()> {
        *self.restarts.lock().unwrap() += 1;
        Ok(())
    }

    fn show_log(&self) -> Result<()> {
        *self.log_shown.lock().unwrap() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryArtifacts {
    pub single_line: Mutex<Option<SingleLineLanguageDefinitions>>,
    pub multi_line: Mutex<Option<MultiLineLanguageDefinitions>>,
}

impl ArtifactSink for MemoryArtifacts {
    fn write_single_line(&self, definitions: &SingleLineLanguageDefinitions) -> Result<()> {
        *self.single_line.lock().unwrap() = Some(definitions.clone());
        Ok(())
    }

    fn write_multi_line(&self, definitions: &MultiLineLanguageDefinitions) -> Result<()> {
        *self.multi_line.lock().unwrap() = Some(definitions.clone());
        Ok(())
    }
}

/// A one-buffer editor.
pub struct StubEditor {
    pub language: LanguageId,
    pub lines: Vec<String>,
    pub selections: Vec<Selection>,
    pub inserted: Vec<(Position, String)>,
}

impl StubEditor {
    /// Cursor at the end of the only line.
    pub fn at_end(language: &str, line: &str) -> Self {
        let cursor = Position { line: 0, character: line.chars().count() };
        Self {
            language: LanguageId::from(language),
            lines: vec![line.to_string()],
            selections: vec![Selection::cursor(cursor)],
            inserted: Vec::new(),
        }
    }
}

impl TextEditor for StubEditor {
    fn language_id(&self) -> LanguageId {
        self.language.clone()
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn line_text(&self, line: usize) -> Option<String> {
        self.lines.get(line).cloned()
    }

    fn insert(&mut self, at: Position, text: &str) -> Result<()> {
        self.inserted.push((at, text.to_string()));
        Ok(())
    }
}

/// Every port, owned, so a test can lend them to a configurator.
#[derive(Default)]
pub struct Fixture {
    pub catalog: StubCatalog,
    pub json: StubJson,
    pub host: RecordingHost,
    pub settings: StubSettings,
    pub notifier: RecordingNotifier,
    pub commands: StubCommands,
    pub artifacts: MemoryArtifacts,
}

impl Fixture {
    /// rust (`//` + `/* */`), python (`#`), clojure (`;;`), html (`<!-- -->`), blade.
    pub fn languages(settings: Settings) -> Self {
        Self {
            catalog: StubCatalog::default().extension(
                "vscode.builtin",
                &[
                    ("blade", Some("/blade.json")),
                    ("clojure", Some("/clojure.json")),
                    ("html", Some("/html.json")),
                    ("python", Some("/python.json")),
                    ("rust", Some("/rust.json")),
                ],
            ),
            json: StubJson::default()
                .file("/blade.json", r#"{"comments": {"blockComment": ["{{--", "--}}"]}}"#)
                .file("/clojure.json", r#"{"comments": {"lineComment": ";;"}}"#)
                .file("/html.json", r#"{"comments": {"blockComment": ["<!--", "-->"]}}"#)
                .file("/python.json", r##"{"comments": {"lineComment": "#", "blockComment": ["\"\"\"", "\"\"\""]}}"##)
                .file(
                    "/rust.json",
                    r#"{"comments": {"lineComment": "//", "blockComment": ["/*", "*/"]}, "autoClosingPairs": [["(", ")"]]}"#,
                ),
            settings: StubSettings::with(settings),
            ..Self::default()
        }
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
}
