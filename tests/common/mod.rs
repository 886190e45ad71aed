// tests/common/mod.rs
#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use assert_cmd::Command;
use tempfile::TempDir;

pub const NAMESPACE: &str = "auto-comment-blocks";

/// An install directory, a user extensions directory and a settings file.
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("tempdir");
        let workspace = Self { root };
        workspace.write(
            "install/package.json",
            r#"{
                "publisher": "kevb34ns",
                "name": "automatic-comment-blocks",
                "displayName": "Automatic Comment Blocks",
                "version": "1.1.16"
            }"#,
        );
        workspace.language_extension(
            "vscode.rust",
            "rust",
            r#"{
                // rust
                "comments": { "lineComment": "//", "blockComment": ["/*", "*/"] },
                "brackets": [["{", "}"], ["[", "]"], ["(", ")"]],
            }"#,
        );
        workspace.language_extension(
            "vscode.python",
            "python",
            r##"{ "comments": { "lineComment": "#", "blockComment": ["\"\"\"", "\"\"\""] } }"##,
        );
        workspace
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create dirs");
        }
        fs::write(path, content).expect("write");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("read")
    }

    pub fn read_json(&self, relative: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(relative)).expect("json")
    }

    /// One extension contributing `language` with `config` as its configuration file.
    pub fn language_extension(&self, dir: &str, language: &str, config: &str) {
        self.write(
            &format!("extensions/{dir}/package.json"),
            &format!(
                r#"{{
                    "publisher": "vscode",
                    "name": "{language}",
                    "version": "1.0.0",
                    "contributes": {{
                        "languages": [{{ "id": "{language}", "configuration": "./language-configuration.json" }}]
                    }}
                }}"#
            ),
        );
        self.write(&format!("extensions/{dir}/language-configuration.json"), config);
    }

    pub fn settings(&self, content: &str) {
        self.write("settings.json", content);
    }

    /// The binary with every location pointed into this workspace.
    pub fn command(&self) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_comment-blocks"));
        command
            .arg("--install-path")
            .arg(self.path("install"))
            .arg("--user-extensions")
            .arg(self.path("extensions"))
            .arg("--settings")
            .arg(self.path("settings.json"))
            .env_remove("WSL_DISTRO_NAME")
            .env_remove("VSCODE_WSL_EXT_LOCATION");
        command
    }

    pub fn out(&self) -> PathBuf {
        self.path("out")
    }
}

pub fn exists(path: &Path) -> bool {
    path.is_file()
}
