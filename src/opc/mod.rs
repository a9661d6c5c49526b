/// Package plumbing: part names, relationships and part readers.
///
/// ZIP container parsing is left to the caller; this module only needs part
/// names and their bytes.
pub mod packuri;
pub mod reader;
pub mod rels;

pub use packuri::PackUri;
pub use reader::{DirectoryPartReader, MemoryPartReader, PartReader};
pub use rels::{Resource, ResourceMap, reltype};
