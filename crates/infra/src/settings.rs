// crates/infra/src/settings.rs
use std::path::{Path, PathBuf};

use comment_blocks_domain::{SettingKey, Settings};
use comment_blocks_ports::settings::SettingsStore;
use comment_blocks_shared_kernel::{ErrorContext, InfrastructureError, Result};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::persistence::{FileReader, FileWriter, parse_jsonc, set_member};

/// Settings kept in a host `settings.json` (JSONC) under a namespace.
///
/// Keys are read either flat (`"ns.key": value`, the host's own layout) or
/// nested (`"ns": { "key": value }`); flat keys win. A missing file means
/// every setting takes its default.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    namespace: String,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self { path: path.into(), namespace: namespace.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<Map<String, Value>> {
        let Some(content) = FileReader::read_optional(&self.path)? else {
            return Ok(Map::new());
        };
        match parse_jsonc(&self.path, &content)? {
            Value::Object(map) => Ok(map),
            other => Err(InfrastructureError::SerializationError {
                format: "settings".to_string(),
                details: format!("expected an object at the top level, found {}", kind(&other)),
            }
            .into()),
        }
    }

    /// The namespaced values found in `document`, keyed by bare setting name.
    fn extract(&self, document: &Map<String, Value>) -> Map<String, Value> {
        let mut values = Map::new();
        if let Some(Value::Object(nested)) = document.get(&self.namespace) {
            for key in SettingKey::ALL {
                if let Some(value) = nested.get(key.as_str()) {
                    values.insert(key.as_str().to_string(), value.clone());
                }
            }
        }
        for key in SettingKey::ALL {
            if let Some(value) = document.get(&key.dotted(&self.namespace)) {
                values.insert(key.as_str().to_string(), value.clone());
            }
        }
        values
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl SettingsStore for FileSettingsStore {
    fn snapshot(&self) -> Result<Settings> {
        let document = self.read_document()?;
        let values = self.extract(&document);
        debug!(path = %self.path.display(), keys = values.len(), "settings read");
        serde_json::from_value(Value::Object(values))
            .with_context(|| format!("invalid {} settings in {}", self.namespace, self.path.display()))
    }

    /// Sets the flat key in place, keeping comments and layout. A key that
    /// also sits in the nested namespace object, or a blank file, makes this
    /// rewrite the whole file as plain JSON, dropping its comments.
    fn update_global(&self, key: SettingKey, value: Value) -> Result<()> {
        let mut document = self.read_document()?;
        let dotted = key.dotted(&self.namespace);
        info!(setting = %dotted, %value, "updating global setting");

        let nested = matches!(document.get(&self.namespace), Some(Value::Object(n)) if n.contains_key(key.as_str()));
        if !nested {
            let edited = FileReader::read_optional(&self.path)?
                .and_then(|content| set_member(&content, &dotted, &value));
            if let Some(edited) = edited {
                FileWriter::atomic_write(&self.path, edited.as_bytes())?;
                return Ok(());
            }
        }

        debug!(path = %self.path.display(), "rewriting settings file");
        if let Some(Value::Object(nested)) = document.get_mut(&self.namespace) {
            nested.remove(key.as_str());
        }
        document.insert(dotted, value);
        FileWriter::write_json(&self.path, &document)?;
        Ok(())
    }
}
