// crates/infra/src/persistence/file_reader.rs
use std::{fs, path::Path};

use comment_blocks_shared_kernel::{InfraResult, InfrastructureError};

/// Convenience helpers for reading files with consistent error handling.
pub struct FileReader;

impl FileReader {
    /// Read the whole file as UTF-8, dropping a leading byte order mark.
    pub fn read_to_string(path: &Path) -> InfraResult<String> {
        let content = fs::read_to_string(path)
            .map_err(|source| InfrastructureError::FileRead { path: path.to_path_buf(), source })?;
        Ok(match content.strip_prefix('\u{feff}') {
            Some(rest) => rest.to_string(),
            None => content,
        })
    }

    /// Like [`FileReader::read_to_string`], but a missing file is `None`.
    pub fn read_optional(path: &Path) -> InfraResult<Option<String>> {
        match Self::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(InfrastructureError::FileRead { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
