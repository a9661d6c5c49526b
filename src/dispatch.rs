//! Placeholder inheritance and hand-off to a [`ShapeRenderer`].
//!
//! A slide shape that is a placeholder inherits its type (and, for the
//! renderer, its fallback geometry) from the layout and master shapes that
//! share its placeholder index or type. The dispatcher resolves that chain
//! and passes the result to the renderer injected for the session.

use std::fmt;

use crate::context::RenderContext;
use crate::node::{ConnectorNode, GraphicFrameNode, ShapeNode, ShapeRef, SlideNode};
use crate::props::{ResolvedShapeProperties, resolve};

/// Which pass a shape is being rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeSource {
    #[default]
    Slide,
    SlideLayoutBg,
    SlideMasterBg,
    DiagramBg,
}

impl ShapeSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Slide => "slide",
            Self::SlideLayoutBg => "slideLayoutBg",
            Self::SlideMasterBg => "slideMasterBg",
            Self::DiagramBg => "diagramBg",
        }
    }

    /// Layout and master background passes.
    #[inline]
    pub fn is_background(self) -> bool {
        matches!(self, Self::SlideLayoutBg | Self::SlideMasterBg)
    }
}

impl fmt::Display for ShapeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A shape with its placeholder chain resolved.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedShape<'a> {
    pub node: ShapeRef<'a>,
    pub parent: Option<&'a GraphicFrameNode>,
    pub layout: Option<&'a ShapeNode>,
    pub master: Option<&'a ShapeNode>,
    pub id: Option<&'a str>,
    pub name: Option<&'a str>,
    pub index: Option<u32>,
    /// Effective type. Always set for shapes; connectors only carry an
    /// explicit placeholder type.
    pub kind: Option<&'a str>,
    pub order: u32,
    /// `userDrawn` of layout/master background shapes, `None` elsewhere
    pub user_drawn_background: Option<bool>,
    pub subtype: Option<&'a str>,
    pub source: ShapeSource,
}

impl<'a> ResolvedShape<'a> {
    /// Geometry of the shape scaled by `unit_factor`.
    pub fn properties(&self, unit_factor: f64) -> ResolvedShapeProperties<'a> {
        resolve(self.node, unit_factor, self.parent, self.layout, self.master)
    }
}

/// Turns a resolved shape into markup.
pub trait ShapeRenderer {
    fn render_shape(&self, shape: &ResolvedShape<'_>, ctx: &RenderContext) -> String;
}

/// Resolves placeholder inheritance and delegates to a [`ShapeRenderer`].
pub struct ShapeDispatcher<'a, R: ?Sized> {
    pub(crate) ctx: &'a RenderContext,
    pub(crate) renderer: &'a R,
}

impl<'a, R: ShapeRenderer + ?Sized> ShapeDispatcher<'a, R> {
    pub fn new(ctx: &'a RenderContext, renderer: &'a R) -> Self {
        Self { ctx, renderer }
    }

    #[inline]
    pub fn context(&self) -> &'a RenderContext {
        self.ctx
    }

    /// Render a shape, walking the placeholder chain first.
    ///
    /// Type resolution order: explicit placeholder type, `textBox` for text
    /// boxes, the layout placeholder's type, then `diagram` inside diagrams
    /// and `obj` everywhere else.
    pub fn dispatch_shape<'n>(
        &'n self,
        node: &'n ShapeNode,
        parent: Option<&'n GraphicFrameNode>,
        source: ShapeSource,
        subtype: Option<&'n str>,
    ) -> String {
        let nv = &node.nv;
        let index = nv.placeholder_index();
        let mut kind = nv.placeholder_type();

        let layout_tables = &self.ctx.layout_tables;
        let master_tables = &self.ctx.master_tables;
        let (layout, master) = match (index, kind) {
            (Some(idx), Some(ty)) => (layout_tables.by_index(idx), master_tables.by_type(ty)),
            (Some(idx), None) => (layout_tables.by_index(idx), master_tables.by_index(idx)),
            (None, Some(ty)) => (layout_tables.by_type(ty), master_tables.by_type(ty)),
            (None, None) => (None, None),
        };

        if kind.is_none() {
            kind = if nv.is_text_box {
                Some("textBox")
            } else {
                layout.and_then(|l| l.nv.placeholder_type())
            };
        }
        let kind = kind.unwrap_or(match source {
            ShapeSource::DiagramBg => "diagram",
            _ => "obj",
        });

        let user_drawn_background = source
            .is_background()
            .then(|| nv.user_drawn.as_deref() == Some("1"));

        tracing::debug!(
            id = nv.id.as_deref(),
            index,
            kind,
            %source,
            has_layout = layout.is_some(),
            has_master = master.is_some(),
            "dispatch shape"
        );

        let shape = ResolvedShape {
            node: ShapeRef::Shape(node),
            parent,
            layout,
            master,
            id: nv.id.as_deref(),
            name: nv.name.as_deref(),
            index,
            kind: Some(kind),
            order: node.order,
            user_drawn_background,
            subtype,
            source,
        };
        self.renderer.render_shape(&shape, self.ctx)
    }

    /// Render a connector. Connectors never inherit from layout or master.
    pub fn dispatch_connector<'n>(
        &'n self,
        node: &'n ConnectorNode,
        parent: Option<&'n GraphicFrameNode>,
        source: ShapeSource,
        subtype: Option<&'n str>,
    ) -> String {
        let nv = &node.nv;
        tracing::debug!(id = nv.id.as_deref(), %source, "dispatch connector");

        let shape = ResolvedShape {
            node: ShapeRef::Connector(node),
            parent,
            layout: None,
            master: None,
            id: nv.id.as_deref(),
            name: nv.name.as_deref(),
            index: nv.placeholder_index(),
            kind: nv.placeholder_type(),
            order: node.order,
            user_drawn_background: None,
            subtype,
            source,
        };
        self.renderer.render_shape(&shape, self.ctx)
    }

    /// Render any shape-tree child. Graphic frames yield empty markup here;
    /// diagram frames are expanded with [`ShapeDispatcher::expand_diagram`].
    pub fn dispatch_node<'n>(
        &'n self,
        node: &'n SlideNode,
        parent: Option<&'n GraphicFrameNode>,
        source: ShapeSource,
        subtype: Option<&'n str>,
    ) -> String {
        match node {
            SlideNode::Shape(shape) => self.dispatch_shape(shape, parent, source, subtype),
            SlideNode::Connector(cxn) => self.dispatch_connector(cxn, parent, source, subtype),
            SlideNode::GraphicFrame(frame) => {
                tracing::debug!(id = frame.nv.id.as_deref(), "graphic frame left to caller");
                String::new()
            },
        }
    }
}
