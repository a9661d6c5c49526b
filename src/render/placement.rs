/// CSS placement of positioned containers.
use crate::context::RenderOptions;
use crate::geometry::path::write_num_prec;
use crate::node::Transform;
use crate::props::ResolvedShapeProperties;

/// Slide, layout and master transforms of one shape, most specific first.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransformChain<'a> {
    pub slide: Option<&'a Transform>,
    pub layout: Option<&'a Transform>,
    pub master: Option<&'a Transform>,
}

impl<'a> TransformChain<'a> {
    /// A chain holding only the node's own transform.
    pub fn own(xfrm: Option<&'a Transform>) -> Self {
        Self {
            slide: xfrm,
            ..Default::default()
        }
    }

    /// The first transform present.
    pub fn first(&self) -> Option<&'a Transform> {
        self.slide.or(self.layout).or(self.master)
    }
}

impl<'a> From<&ResolvedShapeProperties<'a>> for TransformChain<'a> {
    fn from(props: &ResolvedShapeProperties<'a>) -> Self {
        Self {
            slide: props.slide_xfrm,
            layout: props.layout_xfrm,
            master: props.master_xfrm,
        }
    }
}

/// Produces the style fragments that place a container on the slide.
pub trait Placement {
    /// `top`/`left` of the container, or an empty string.
    fn position_style(&self, chain: &TransformChain<'_>, options: &RenderOptions) -> String;

    /// `width`/`height` of the container, or an empty string.
    fn size_style(&self, chain: &TransformChain<'_>, options: &RenderOptions) -> String;
}

/// Absolute CSS placement in output units.
///
/// The first transform of the chain is used; when it lacks an offset (or
/// extent) the fragment is empty rather than falling through to the next
/// level.
#[derive(Debug, Clone, Copy, Default)]
pub struct CssPlacement;

impl Placement for CssPlacement {
    fn position_style(&self, chain: &TransformChain<'_>, options: &RenderOptions) -> String {
        let Some(off) = chain.first().and_then(|t| t.offset) else {
            return String::new();
        };
        let mut out = String::with_capacity(32);
        out.push_str("top:");
        write_num_prec(&mut out, off.y as f64 * options.unit_factor, options.precision);
        out.push_str("px; left:");
        write_num_prec(&mut out, off.x as f64 * options.unit_factor, options.precision);
        out.push_str("px;");
        out
    }

    fn size_style(&self, chain: &TransformChain<'_>, options: &RenderOptions) -> String {
        let Some(ext) = chain.first().and_then(|t| t.extent) else {
            return String::new();
        };
        let mut out = String::with_capacity(32);
        out.push_str("width:");
        write_num_prec(&mut out, ext.cx as f64 * options.unit_factor, options.precision);
        out.push_str("px; height:");
        write_num_prec(&mut out, ext.cy as f64 * options.unit_factor, options.precision);
        out.push_str("px;");
        out
    }
}
