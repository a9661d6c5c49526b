/// Render configuration and the read-only inputs of one render session.
use std::collections::HashMap;

use crate::error::Result;
use crate::geometry::path::DEFAULT_PRECISION;
use crate::node::{DiagramDrawing, ShapeNode, SlideNode, parse_shape_tree};
use crate::opc::ResourceMap;
use crate::unit::{DEFAULT_DPI, px_per_emu};

/// Options controlling unit conversion and number formatting.
///
/// # Examples
///
/// ```rust
/// use slideshape::RenderOptions;
///
/// // 96 DPI output, two decimals
/// let options = RenderOptions::default();
///
/// // Or customize
/// let options = RenderOptions::new().with_dpi(72).with_precision(3);
/// assert_eq!(options.precision, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Output units per EMU; pixels at 96 DPI by default
    pub unit_factor: f64,
    /// Decimal places kept in placement styles and wrapper transforms
    pub precision: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            unit_factor: px_per_emu(DEFAULT_DPI),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl RenderOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the EMU scale factor directly.
    #[inline]
    pub fn with_unit_factor(mut self, factor: f64) -> Self {
        self.unit_factor = factor;
        self
    }

    /// Scale EMU to pixels at the given resolution.
    #[inline]
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.unit_factor = px_per_emu(dpi);
        self
    }

    #[inline]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }
}

/// Placeholder lookup tables of one ancestor level (layout or master).
///
/// Later shapes win when two share an index or type.
#[derive(Debug, Clone, Default)]
pub struct InheritanceTables {
    by_index: HashMap<u32, ShapeNode>,
    by_type: HashMap<String, ShapeNode>,
}

impl InheritanceTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every placeholder shape of a shape tree.
    pub fn from_shapes<I>(shapes: I) -> Self
    where
        I: IntoIterator<Item = ShapeNode>,
    {
        let mut tables = Self::new();
        for shape in shapes {
            tables.insert(shape);
        }
        tables
    }

    /// Parse a layout or master part and register its placeholders.
    pub fn from_part_xml(xml: &[u8]) -> Result<Self> {
        let shapes = parse_shape_tree(xml)?
            .into_iter()
            .filter_map(|node| match node {
                SlideNode::Shape(shape) => Some(shape),
                _ => None,
            });
        Ok(Self::from_shapes(shapes))
    }

    /// Register one shape under its placeholder index and type. Shapes
    /// without a placeholder are ignored.
    pub fn insert(&mut self, shape: ShapeNode) {
        let index = shape.nv.placeholder_index();
        let kind = shape.nv.placeholder_type().map(str::to_string);
        match (index, kind) {
            (None, None) => {},
            (Some(index), None) => {
                self.by_index.insert(index, shape);
            },
            (None, Some(kind)) => {
                self.by_type.insert(kind, shape);
            },
            (Some(index), Some(kind)) => {
                self.by_index.insert(index, shape.clone());
                self.by_type.insert(kind, shape);
            },
        }
    }

    #[inline]
    pub fn by_index(&self, index: u32) -> Option<&ShapeNode> {
        self.by_index.get(&index)
    }

    #[inline]
    pub fn by_type(&self, kind: &str) -> Option<&ShapeNode> {
        self.by_type.get(kind)
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty() && self.by_type.is_empty()
    }
}

/// Everything a render pass reads besides the node itself.
///
/// Built once per slide by the caller and shared by reference; nothing in
/// this crate mutates it.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub options: RenderOptions,
    /// Relationship targets of the slide being rendered
    pub resources: ResourceMap,
    pub layout_tables: InheritanceTables,
    pub master_tables: InheritanceTables,
    /// Pre-rendered drawing of the diagram being expanded, if any
    pub diagram_drawing: Option<DiagramDrawing>,
}

impl RenderContext {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    pub fn with_resources(mut self, resources: ResourceMap) -> Self {
        self.resources = resources;
        self
    }

    pub fn with_layout_tables(mut self, tables: InheritanceTables) -> Self {
        self.layout_tables = tables;
        self
    }

    pub fn with_master_tables(mut self, tables: InheritanceTables) -> Self {
        self.master_tables = tables;
        self
    }

    pub fn with_diagram_drawing(mut self, drawing: DiagramDrawing) -> Self {
        self.diagram_drawing = Some(drawing);
        self
    }

    #[inline]
    pub fn unit_factor(&self) -> f64 {
        self.options.unit_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NonVisualProps, Placeholder};

    fn placeholder(id: &str, index: Option<u32>, kind: Option<&str>) -> ShapeNode {
        ShapeNode {
            nv: NonVisualProps {
                id: Some(id.to_string()),
                placeholder: Some(Placeholder {
                    index,
                    kind: kind.map(str::to_string),
                }),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert!((options.unit_factor - 96.0 / 914_400.0).abs() < 1e-15);
        assert_eq!(options.precision, 2);

        let print = RenderOptions::new().with_dpi(72);
        assert!((print.unit_factor * 12_700.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tables_from_shapes() {
        let tables = InheritanceTables::from_shapes([
            placeholder("2", None, Some("title")),
            placeholder("3", Some(1), Some("body")),
            placeholder("4", Some(3), None),
            ShapeNode::default(),
        ]);

        assert_eq!(tables.by_type("title").unwrap().nv.id.as_deref(), Some("2"));
        assert_eq!(tables.by_index(1).unwrap().nv.id.as_deref(), Some("3"));
        assert_eq!(tables.by_type("body").unwrap().nv.id.as_deref(), Some("3"));
        assert_eq!(tables.by_index(3).unwrap().nv.id.as_deref(), Some("4"));
        assert!(tables.by_index(7).is_none());
    }

    #[test]
    fn test_later_shape_wins() {
        let tables = InheritanceTables::from_shapes([
            placeholder("2", None, Some("body")),
            placeholder("9", None, Some("body")),
        ]);
        assert_eq!(tables.by_type("body").unwrap().nv.id.as_deref(), Some("9"));
    }

    #[test]
    fn test_tables_from_layout_xml() {
        let xml = br#"<p:sldLayout xmlns:p="urn:p" xmlns:a="urn:a"><p:cSld><p:spTree>
            <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/>
              <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
            <p:sp><p:nvSpPr><p:cNvPr id="3" name="Content 2"/><p:cNvSpPr/>
              <p:nvPr><p:ph type="pic" idx="3"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
        </p:spTree></p:cSld></p:sldLayout>"#;

        let tables = InheritanceTables::from_part_xml(xml).unwrap();
        assert_eq!(
            tables.by_index(3).and_then(|s| s.nv.placeholder_type()),
            Some("pic")
        );
        assert!(tables.by_type("title").is_some());
    }
}
