// crates/ports/src/json.rs
use std::path::Path;

use comment_blocks_shared_kernel::Result;

/// Port for reading JSON that may carry comments and trailing commas.
///
/// A missing file is an `InfrastructureError::FileRead`; a file that does not
/// parse is an `InfrastructureError::MalformedJson` listing every issue found.
pub trait JsonSource: Send + Sync {
    fn read_json(&self, path: &Path) -> Result<serde_json::Value>;
}
