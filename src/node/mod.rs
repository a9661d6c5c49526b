//! Typed shape-tree nodes.
//!
//! Nodes are built once at the parse boundary ([`parse`]) and are read-only
//! afterwards. Only the fields the renderer consults are modelled; anything
//! else in the source XML is dropped during parsing.

pub mod parse;

pub use parse::{parse_diagram_drawing, parse_shape_tree};

/// Shape offset in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

/// Shape extent in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub cx: i64,
    pub cy: i64,
}

/// A 2D transform (`a:xfrm`, `p:xfrm` or `dsp:txXfrm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub offset: Option<Offset>,
    pub extent: Option<Extent>,
    /// Rotation in 60 000ths of a degree
    pub rotation: Option<i64>,
    pub flip_h: bool,
    pub flip_v: bool,
}

/// Placeholder block (`p:ph`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Placeholder {
    pub index: Option<u32>,
    /// Placeholder type such as `title`, `body`, `dt`
    pub kind: Option<String>,
}

/// Non-visual properties shared by all shape kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NonVisualProps {
    pub id: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<Placeholder>,
    /// `txBox="1"` on the non-visual shape properties
    pub is_text_box: bool,
    /// Raw `userDrawn` attribute of `p:nvPr`
    pub user_drawn: Option<String>,
}

impl NonVisualProps {
    #[inline]
    pub fn placeholder_index(&self) -> Option<u32> {
        self.placeholder.as_ref().and_then(|ph| ph.index)
    }

    #[inline]
    pub fn placeholder_type(&self) -> Option<&str> {
        self.placeholder.as_ref().and_then(|ph| ph.kind.as_deref())
    }
}

/// One `a:gd` guide of a preset's adjustment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adjustment {
    pub name: String,
    /// Formula text, e.g. `val 16667`
    pub formula: String,
}

impl Adjustment {
    /// Numeric value of a `val N` formula.
    pub fn value(&self) -> Option<i64> {
        self.formula
            .strip_prefix("val ")
            .and_then(|v| v.trim().parse().ok())
    }
}

/// `a:prstGeom`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetGeometry {
    pub preset: String,
    pub adjustments: Vec<Adjustment>,
}

impl PresetGeometry {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            adjustments: Vec::new(),
        }
    }

    /// Value of the named adjustment handle, if present and numeric.
    pub fn adjustment(&self, name: &str) -> Option<i64> {
        self.adjustments
            .iter()
            .find(|a| a.name == name)
            .and_then(Adjustment::value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Geometry {
    Preset(PresetGeometry),
    /// `a:custGeom`; path commands are not interpreted here
    Custom,
}

/// Fill kind. Color resolution beyond literal sRGB values happens outside
/// this crate, so scheme colors surface as `Solid(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fill {
    None,
    /// Literal sRGB hex value without `#`, when one is present
    Solid(Option<String>),
    Gradient,
    Image,
}

/// `a:ln`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    /// Width in EMU
    pub width: Option<i64>,
    pub fill: Option<Fill>,
    /// `a:prstDash` value
    pub dash: Option<String>,
}

/// `p:sp` or `dsp:sp`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeNode {
    pub nv: NonVisualProps,
    pub xfrm: Option<Transform>,
    pub geometry: Option<Geometry>,
    /// Separate text-frame transform (`dsp:txXfrm`)
    pub text_xfrm: Option<Transform>,
    pub fill: Option<Fill>,
    pub line: Option<Line>,
    /// Position within the owning shape tree
    pub order: u32,
}

/// `p:cxnSp`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConnectorNode {
    pub nv: NonVisualProps,
    pub xfrm: Option<Transform>,
    pub geometry: Option<Geometry>,
    pub line: Option<Line>,
    pub order: u32,
}

/// Relationship ids of the four diagram parts (`dgm:relIds`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramRelationIds {
    /// `r:cs`
    pub colors: String,
    /// `r:dm`
    pub data: String,
    /// `r:lo`
    pub layout: String,
    /// `r:qs`
    pub quick_style: String,
}

/// `p:graphicFrame`; only diagram frames carry `rel_ids`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphicFrameNode {
    pub nv: NonVisualProps,
    pub xfrm: Option<Transform>,
    pub rel_ids: Option<DiagramRelationIds>,
    pub order: u32,
}

/// A direct child of a shape tree.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideNode {
    Shape(ShapeNode),
    Connector(ConnectorNode),
    GraphicFrame(GraphicFrameNode),
}

impl SlideNode {
    pub fn nv(&self) -> &NonVisualProps {
        match self {
            Self::Shape(s) => &s.nv,
            Self::Connector(c) => &c.nv,
            Self::GraphicFrame(g) => &g.nv,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeNode> {
        match self {
            Self::Shape(s) => Some(s),
            _ => None,
        }
    }
}

/// The pre-rendered drawing of a diagram (`dsp:drawing`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramDrawing {
    pub shapes: Vec<ShapeNode>,
}

/// Borrowed view over the two drawable node kinds.
#[derive(Debug, Clone, Copy)]
pub enum ShapeRef<'a> {
    Shape(&'a ShapeNode),
    Connector(&'a ConnectorNode),
}

impl<'a> ShapeRef<'a> {
    pub fn nv(&self) -> &'a NonVisualProps {
        match *self {
            Self::Shape(s) => &s.nv,
            Self::Connector(c) => &c.nv,
        }
    }

    pub fn xfrm(&self) -> Option<&'a Transform> {
        match *self {
            Self::Shape(s) => s.xfrm.as_ref(),
            Self::Connector(c) => c.xfrm.as_ref(),
        }
    }

    pub fn geometry(&self) -> Option<&'a Geometry> {
        match *self {
            Self::Shape(s) => s.geometry.as_ref(),
            Self::Connector(c) => c.geometry.as_ref(),
        }
    }

    /// Connectors never carry a separate text transform.
    pub fn text_xfrm(&self) -> Option<&'a Transform> {
        match *self {
            Self::Shape(s) => s.text_xfrm.as_ref(),
            Self::Connector(_) => None,
        }
    }

    pub fn fill(&self) -> Option<&'a Fill> {
        match *self {
            Self::Shape(s) => s.fill.as_ref(),
            Self::Connector(_) => None,
        }
    }

    pub fn line(&self) -> Option<&'a Line> {
        match *self {
            Self::Shape(s) => s.line.as_ref(),
            Self::Connector(c) => c.line.as_ref(),
        }
    }

    pub fn order(&self) -> u32 {
        match *self {
            Self::Shape(s) => s.order,
            Self::Connector(c) => c.order,
        }
    }
}
