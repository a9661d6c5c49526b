/// Part names within a presentation package.
///
/// A part name always begins with a forward slash and uses forward slashes as
/// separators, e.g. `/ppt/diagrams/data1.xml`. Relationship targets are
/// relative to the directory of their source part and are resolved here.
use crate::error::{Result, ShapeError};

/// An absolute part name within a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackUri {
    uri: String,
}

impl PackUri {
    /// Create a part name. Fails unless `uri` begins with a slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(ShapeError::InvalidPackUri(uri));
        }
        Ok(PackUri { uri })
    }

    /// Resolve a relationship target such as `../diagrams/data1.xml` against
    /// the directory of its source part (`/ppt/slides`).
    ///
    /// Absolute targets are taken as-is.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self> {
        if relative_ref.starts_with('/') {
            return Self::new(normalize_path(relative_ref));
        }
        let joined = if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(normalize_path(&joined))
    }

    /// Part name with the leading slash stripped, as stored in the archive
    /// or on disk.
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

/// Collapse `.` and `..` segments. `..` never climbs above the root.
fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {},
            ".." => {
                parts.pop();
            },
            _ => parts.push(part),
        }
    }
    format!("/{}", parts.join("/"))
}

impl std::fmt::Display for PackUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackUri {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}
