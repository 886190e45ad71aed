// crates/ports/src/artifacts.rs
use comment_blocks_domain::{MultiLineLanguageDefinitions, SingleLineLanguageDefinitions};
use comment_blocks_shared_kernel::Result;

/// Port for the generated classification records.
pub trait ArtifactSink: Send + Sync {
    fn write_single_line(&self, definitions: &SingleLineLanguageDefinitions) -> Result<()>;
    fn write_multi_line(&self, definitions: &MultiLineLanguageDefinitions) -> Result<()>;
}
