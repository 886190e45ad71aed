// crates/infra/src/persistence.rs
mod file_reader;
mod file_writer;
mod jsonc;

pub use file_reader::FileReader;
pub use file_writer::FileWriter;
pub use jsonc::{JsoncReader, parse_jsonc, set_member};
