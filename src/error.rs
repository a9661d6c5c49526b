/// Error types for shape resolution and diagram expansion.
use thiserror::Error;

/// Result type for slideshape operations.
pub type Result<T> = std::result::Result<T, ShapeError>;

/// Error types for slideshape operations.
///
/// Most of the rendering pipeline degrades to empty or default output
/// instead of failing; these variants cover the parse boundary, part
/// loading and the few inputs that have no sensible fallback.
#[derive(Error, Debug)]
pub enum ShapeError {
    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Malformed XML attribute
    #[error("Attribute error: {0}")]
    AttrError(String),

    /// Part not found in the package
    #[error("Part not found: {0}")]
    PartNotFound(String),

    /// Relationship id not present in the slide's resource map
    #[error("Relationship not found: {0}")]
    RelationshipNotFound(String),

    /// Part name that cannot be resolved to an absolute pack URI
    #[error("Invalid pack URI: {0}")]
    InvalidPackUri(String),

    /// Corner adjustment policy name outside `cornr1`, `cornr2`, `cornrAll`, `diag`
    #[error("Unknown corner adjustment policy: {0}")]
    UnknownCornerPolicy(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<quick_xml::Error> for ShapeError {
    fn from(err: quick_xml::Error) -> Self {
        ShapeError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for ShapeError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        ShapeError::AttrError(err.to_string())
    }
}

impl From<std::str::Utf8Error> for ShapeError {
    fn from(err: std::str::Utf8Error) -> Self {
        ShapeError::Xml(err.to_string())
    }
}
