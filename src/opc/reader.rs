/// Asynchronous part readers.
///
/// Diagram expansion loads its related parts through a [`PartReader`]; how the
/// bytes are obtained (an archive already in memory, an extracted package on
/// disk, a network store) is up to the implementation.
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::packuri::PackUri;
use crate::error::{Result, ShapeError};

/// Loads the raw bytes of a package part by absolute part name.
pub trait PartReader {
    /// Read one part. A missing part is reported as
    /// [`ShapeError::PartNotFound`].
    fn read_part(&self, part_name: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Parts held in memory, keyed by part name.
#[derive(Debug, Default)]
pub struct MemoryPartReader {
    parts: HashMap<String, Vec<u8>>,
    loads: AtomicUsize,
}

impl MemoryPartReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a part. Names without a leading slash are treated as absolute.
    pub fn insert(&mut self, part_name: &str, data: impl Into<Vec<u8>>) {
        self.parts.insert(absolute(part_name), data.into());
    }

    pub fn with_part(mut self, part_name: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(part_name, data);
        self
    }

    /// Number of `read_part` calls served so far, including failed ones.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl PartReader for MemoryPartReader {
    async fn read_part(&self, part_name: &str) -> Result<Vec<u8>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        self.parts
            .get(&absolute(part_name))
            .cloned()
            .ok_or_else(|| ShapeError::PartNotFound(part_name.to_string()))
    }
}

fn absolute(part_name: &str) -> String {
    if part_name.starts_with('/') {
        part_name.to_string()
    } else {
        format!("/{}", part_name)
    }
}

/// Parts read from an extracted package directory.
#[derive(Debug, Clone)]
pub struct DirectoryPartReader {
    root: PathBuf,
}

impl DirectoryPartReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PartReader for DirectoryPartReader {
    async fn read_part(&self, part_name: &str) -> Result<Vec<u8>> {
        // Dot segments are collapsed at the package root.
        let uri = PackUri::from_rel_ref("/", part_name)?;
        let path = self.root.join(uri.membername());
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ShapeError::PartNotFound(uri.as_str().to_string()))
            },
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_reader() {
        let reader = MemoryPartReader::new()
            .with_part("/ppt/diagrams/data1.xml", "<dgm:dataModel/>")
            .with_part("ppt/diagrams/layout1.xml", "<dgm:layoutDef/>");

        assert_eq!(
            reader.read_part("/ppt/diagrams/data1.xml").await.unwrap(),
            b"<dgm:dataModel/>"
        );
        assert_eq!(
            reader.read_part("/ppt/diagrams/layout1.xml").await.unwrap(),
            b"<dgm:layoutDef/>"
        );
        assert!(matches!(
            reader.read_part("/ppt/diagrams/colors1.xml").await,
            Err(ShapeError::PartNotFound(_))
        ));
        assert_eq!(reader.load_count(), 3);
    }

    #[tokio::test]
    async fn test_directory_reader() {
        let dir = tempfile::tempdir().unwrap();
        let diagrams = dir.path().join("ppt").join("diagrams");
        tokio::fs::create_dir_all(&diagrams).await.unwrap();
        tokio::fs::write(diagrams.join("data1.xml"), b"<dgm:dataModel/>")
            .await
            .unwrap();

        let reader = DirectoryPartReader::new(dir.path());
        let data = reader.read_part("/ppt/diagrams/data1.xml").await.unwrap();
        assert_eq!(data, b"<dgm:dataModel/>");

        assert!(matches!(
            reader.read_part("/ppt/diagrams/missing.xml").await,
            Err(ShapeError::PartNotFound(name)) if name == "/ppt/diagrams/missing.xml"
        ));
    }

    #[tokio::test]
    async fn test_directory_reader_stays_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join("outside.xml"), b"secret").await.unwrap();
        let root = dir.path().join("deck");
        tokio::fs::create_dir_all(root.join("ppt")).await.unwrap();
        tokio::fs::write(root.join("ppt").join("slide.xml"), b"<p:sld/>").await.unwrap();

        let reader = DirectoryPartReader::new(&root);
        assert!(matches!(
            reader.read_part("/../outside.xml").await,
            Err(ShapeError::PartNotFound(name)) if name == "/outside.xml"
        ));
        assert!(matches!(
            reader.read_part("ppt/../../outside.xml").await,
            Err(ShapeError::PartNotFound(_))
        ));
        assert_eq!(
            reader.read_part("/ppt/./../ppt/slide.xml").await.unwrap(),
            b"<p:sld/>"
        );
    }
}
