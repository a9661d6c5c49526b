/// Relationship parsing and the per-slide resource map.
///
/// A slide's `.rels` part maps relationship ids (`rId4`) to target parts.
/// Diagram frames reference their four parts through such ids, so the map is
/// the bridge between a `dgm:relIds` block and the part reader.
use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::Event;

use super::packuri::PackUri;
use crate::error::{Result, ShapeError};

/// Relationship type URIs used by diagram frames.
pub mod reltype {
    pub const DIAGRAM_COLORS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramColors";
    pub const DIAGRAM_DATA: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramData";
    pub const DIAGRAM_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramLayout";
    pub const DIAGRAM_QUICK_STYLE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramQuickStyle";
    pub const DIAGRAM_DRAWING: &str =
        "http://schemas.microsoft.com/office/2007/relationships/diagramDrawing";
}

/// One resolved relationship target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub reltype: String,
    /// Absolute part name for internal targets, the raw URL for external ones
    pub target: String,
    pub is_external: bool,
}

/// Relationship id to target map for one source part.
#[derive(Debug, Clone, Default)]
pub struct ResourceMap {
    resources: HashMap<String, Resource>,
}

impl ResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `.rels` part. Internal targets are resolved against
    /// `base_uri`, the directory of the source part.
    ///
    /// # Examples
    ///
    /// ```
    /// use slideshape::opc::ResourceMap;
    ///
    /// let rels = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    ///   <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/diagramData" Target="../diagrams/data1.xml"/>
    /// </Relationships>"#;
    ///
    /// let map = ResourceMap::from_rels_xml(rels, "/ppt/slides")?;
    /// assert_eq!(map.target("rId2")?, "/ppt/diagrams/data1.xml");
    /// # Ok::<(), slideshape::ShapeError>(())
    /// ```
    pub fn from_rels_xml(rels_xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut map = Self::new();
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let mut r_id = None;
                        let mut reltype = None;
                        let mut target_ref = None;
                        let mut is_external = false;

                        for attr in e.attributes() {
                            let attr = attr?;
                            let value = std::str::from_utf8(&attr.value)?;
                            let value = quick_xml::escape::unescape(value)
                                .map_err(|e| ShapeError::Xml(e.to_string()))?;
                            match attr.key.as_ref() {
                                b"Id" => r_id = Some(value.into_owned()),
                                b"Type" => reltype = Some(value.into_owned()),
                                b"Target" => target_ref = Some(value.into_owned()),
                                b"TargetMode" => is_external = value == "External",
                                _ => {},
                            }
                        }

                        if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
                            let target = if is_external {
                                tr
                            } else {
                                PackUri::from_rel_ref(base_uri, &tr)?.as_str().to_string()
                            };
                            map.insert(
                                id,
                                Resource {
                                    reltype: rt,
                                    target,
                                    is_external,
                                },
                            );
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(ShapeError::Xml(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    pub fn insert(&mut self, r_id: impl Into<String>, resource: Resource) {
        self.resources.insert(r_id.into(), resource);
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Resource> {
        self.resources.get(r_id)
    }

    /// Target part name of `r_id`, or `RelationshipNotFound`.
    pub fn target(&self, r_id: &str) -> Result<&str> {
        self.get(r_id)
            .map(|r| r.target.as_str())
            .ok_or_else(|| ShapeError::RelationshipNotFound(r_id.to_string()))
    }

    /// First target with the given relationship type.
    pub fn target_by_type(&self, reltype: &str) -> Option<&str> {
        self.resources
            .values()
            .find(|r| r.reltype == reltype)
            .map(|r| r.target.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<(String, Resource)> for ResourceMap {
    fn from_iter<I: IntoIterator<Item = (String, Resource)>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}
