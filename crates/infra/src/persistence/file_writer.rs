// crates/infra/src/persistence/file_writer.rs
use std::{
    fs,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use comment_blocks_shared_kernel::{InfraResult, InfrastructureError};
use serde::Serialize;
use tracing::warn;

/// Helper utilities for writing files.
pub struct FileWriter;

impl FileWriter {
    /// Atomically write `data` to `path` via a temp file and rename, creating
    /// missing parent directories.
    pub fn atomic_write(path: &Path, data: &[u8]) -> InfraResult<()> {
        let write_err = |source| InfrastructureError::FileWrite { path: path.to_path_buf(), source };
        let parent = path
            .parent()
            .ok_or_else(|| write_err(std::io::Error::other("path has no parent")))?;
        fs::create_dir_all(parent).map_err(|source| InfrastructureError::FileSystemOperation {
            operation: "create_dir_all".to_string(),
            path: parent.to_path_buf(),
            source,
        })?;

        // PID + nanos keeps concurrent writers from sharing a temp file.
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let tmp = parent.join(format!(".{}.{}.tmp", std::process::id(), nanos));

        let result = (|| {
            let mut w = BufWriter::new(File::create(&tmp)?);
            w.write_all(data)?;
            w.flush()?;
            if let Err(err) = w.get_ref().sync_all() {
                warn!(path = %path.display(), error = %err, "fsync failed, data may not be durable");
            }
            fs::rename(&tmp, path)
        })();
        if let Err(err) = result {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(err));
        }

        #[cfg(unix)]
        {
            if let Err(err) = File::open(parent).and_then(|dir| dir.sync_all()) {
                warn!(dir = %parent.display(), error = %err, "directory fsync failed");
            }
        }

        Ok(())
    }

    /// Serialize `value` as tab-indented JSON and write it atomically.
    pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> InfraResult<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;
        buf.push(b'\n');
        Self::atomic_write(path, &buf)
    }
}
