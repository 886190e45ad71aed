// crates/infra/src/artifacts.rs
use std::path::{Path, PathBuf};

use comment_blocks_domain::{MultiLineLanguageDefinitions, SingleLineLanguageDefinitions};
use comment_blocks_ports::artifacts::ArtifactSink;
use comment_blocks_shared_kernel::Result;
use tracing::debug;

use crate::persistence::FileWriter;

pub const SINGLE_LINE_FILE: &str = "single-line-languages.json";
pub const MULTI_LINE_FILE: &str = "multi-line-languages.json";

/// Writes the classification records as tab-indented JSON files.
#[derive(Debug, Clone)]
pub struct ArtifactDirectory {
    dir: PathBuf,
}

impl ArtifactDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactSink for ArtifactDirectory {
    fn write_single_line(&self, definitions: &SingleLineLanguageDefinitions) -> Result<()> {
        let path = self.dir.join(SINGLE_LINE_FILE);
        FileWriter::write_json(&path, definitions)?;
        debug!(path = %path.display(), "single-line definitions written");
        Ok(())
    }

    fn write_multi_line(&self, definitions: &MultiLineLanguageDefinitions) -> Result<()> {
        let path = self.dir.join(MULTI_LINE_FILE);
        FileWriter::write_json(&path, definitions)?;
        debug!(path = %path.display(), "multi-line definitions written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use comment_blocks_domain::{LanguageConfiguration, Settings, SingleLineRegistry, SingleLineStyle, classify};
    use comment_blocks_ports::json::JsonSource;
    use comment_blocks_shared_kernel::LanguageId;
    use serde::de::DeserializeOwned;

    use super::*;
    use crate::persistence::JsoncReader;

    impl ArtifactDirectory {
        fn read_single_line(&self) -> Result<SingleLineLanguageDefinitions> {
            read(&self.dir.join(SINGLE_LINE_FILE))
        }

        fn read_multi_line(&self) -> Result<MultiLineLanguageDefinitions> {
            read(&self.dir.join(MULTI_LINE_FILE))
        }
    }

    fn read<T: DeserializeOwned>(path: &Path) -> Result<T> {
        Ok(serde_json::from_value(JsoncReader.read_json(path)?)?)
    }

    fn block(open: &str, close: &str) -> LanguageConfiguration {
        LanguageConfiguration::with_block_comment((open.to_string(), close.to_string()))
    }

    #[test]
    fn single_line_record_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = ArtifactDirectory::new(dir.path().join("generated"));
        let registry = SingleLineRegistry {
            auto: BTreeMap::from([
                (LanguageId::from("python"), SingleLineStyle::Hash),
                (LanguageId::from("rust"), SingleLineStyle::Slash),
                (LanguageId::from("lisp"), SingleLineStyle::Semicolon),
            ]),
            custom: BTreeMap::from([(LanguageId::from("nim"), SingleLineStyle::Hash)]),
        };

        artifacts.write_single_line(&SingleLineLanguageDefinitions::from(&registry)).expect("writes");
        let text = std::fs::read_to_string(dir.path().join("generated").join(SINGLE_LINE_FILE)).expect("reads");
        assert!(text.contains("\t\"supportedLanguages\""));
        assert!(text.contains("\"#\": ["));

        let back = artifacts.read_single_line().expect("reads back");
        assert_eq!(SingleLineRegistry::from(&back), registry);
    }

    #[test]
    fn multi_line_record_is_written() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = ArtifactDirectory::new(dir.path());
        let definitions = MultiLineLanguageDefinitions {
            supported_languages: vec!["c".into(), "rust".into()],
            custom_supported_languages: vec!["html".into()],
        };
        artifacts.write_multi_line(&definitions).expect("writes");
        assert_eq!(artifacts.read_multi_line().expect("reads back"), definitions);
    }

    #[test]
    fn classified_multi_line_languages_survive_the_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let artifacts = ArtifactDirectory::new(dir.path());
        let configs = BTreeMap::from([
            (LanguageId::from("blade"), block("{{--", "--}}")),
            (LanguageId::from("c"), block("/*", "*/")),
            (LanguageId::from("html"), block("<!--", "-->")),
            (LanguageId::from("lua"), block("--[[", "]]")),
        ]);
        let settings = Settings { multi_line_style_blocks: vec!["html".into()], ..Settings::default() };
        let classification = classify(&configs, &settings);

        let definitions = MultiLineLanguageDefinitions::from(&classification.multi_line);
        artifacts.write_multi_line(&definitions).expect("writes");

        let back = artifacts.read_multi_line().expect("reads back");
        assert_eq!(back, definitions);
        assert_eq!(back.supported_languages, vec![LanguageId::from("blade"), LanguageId::from("c")]);
        assert_eq!(back.custom_supported_languages, vec![LanguageId::from("html")]);
    }
}
