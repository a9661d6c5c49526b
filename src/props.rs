//! Geometry extraction for a single shape.
//!
//! [`resolve`] reads position, size, rotation and flip from a shape's own
//! transform. It never fails: absent data yields zero.

use crate::node::{Geometry, GraphicFrameNode, ShapeNode, ShapeRef, Transform};
use crate::unit::angle_to_degrees;

/// Mirror transform derived from `flipH` / `flipV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
    Both,
}

impl Flip {
    pub fn from_flags(flip_h: bool, flip_v: bool) -> Self {
        match (flip_h, flip_v) {
            (false, false) => Self::None,
            (true, false) => Self::Horizontal,
            (false, true) => Self::Vertical,
            (true, true) => Self::Both,
        }
    }

    /// SVG/CSS transform fragment; empty for [`Flip::None`].
    pub fn as_transform(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Horizontal => "scale(-1,1)",
            Self::Vertical => "scale(1,-1)",
            Self::Both => "scale(-1,-1)",
        }
    }
}

/// Concrete geometry of one shape, scaled to output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShapeProperties<'a> {
    /// Preset geometry name, e.g. `roundRect`
    pub shape_type: Option<&'a str>,
    /// Whether the shape carries a custom geometry instead of a preset
    pub custom_shape_type: bool,
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
    /// Whole degrees
    pub rotation: f64,
    pub flip: Flip,
    /// Whole degrees
    pub text_rotation: f64,
    pub order: u32,
    pub slide_xfrm: Option<&'a Transform>,
    pub layout_xfrm: Option<&'a Transform>,
    pub master_xfrm: Option<&'a Transform>,
    /// Transform of the enclosing frame, for shapes inside a diagram
    pub parent_xfrm: Option<&'a Transform>,
}

/// Resolve the geometry of `node`.
///
/// Offset and extent are multiplied by `unit_factor`; each defaults to zero
/// independently when missing. When the node has a text transform with its
/// own rotation, text rotation is that angle plus 90 degrees, otherwise it
/// follows the shape rotation.
///
/// # Examples
///
/// ```
/// use slideshape::node::{Extent, ShapeNode, ShapeRef, Transform};
/// use slideshape::props::{resolve, Flip};
///
/// let shape = ShapeNode {
///     xfrm: Some(Transform {
///         extent: Some(Extent { cx: 914_400, cy: 457_200 }),
///         flip_v: true,
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
///
/// // 1/9525 px per EMU is 96 DPI
/// let props = resolve(ShapeRef::Shape(&shape), 1.0 / 9525.0, None, None, None);
/// assert!((props.width - 96.0).abs() < 1e-9);
/// assert!((props.height - 48.0).abs() < 1e-9);
/// assert_eq!(props.flip, Flip::Vertical);
/// ```
pub fn resolve<'a>(
    node: ShapeRef<'a>,
    unit_factor: f64,
    parent: Option<&'a GraphicFrameNode>,
    layout: Option<&'a ShapeNode>,
    master: Option<&'a ShapeNode>,
) -> ResolvedShapeProperties<'a> {
    let xfrm = node.xfrm();

    let (x, y) = xfrm
        .and_then(|t| t.offset)
        .map(|off| (off.x as f64 * unit_factor, off.y as f64 * unit_factor))
        .unwrap_or((0.0, 0.0));
    let (width, height) = xfrm
        .and_then(|t| t.extent)
        .map(|ext| (ext.cx as f64 * unit_factor, ext.cy as f64 * unit_factor))
        .unwrap_or((0.0, 0.0));

    let rotation = angle_to_degrees(xfrm.and_then(|t| t.rotation));
    let flip = xfrm
        .map(|t| Flip::from_flags(t.flip_h, t.flip_v))
        .unwrap_or_default();

    let text_rotation = match node.text_xfrm().and_then(|t| t.rotation) {
        Some(rot) => angle_to_degrees(Some(rot)) + 90.0,
        None => rotation,
    };

    let (shape_type, custom_shape_type) = match node.geometry() {
        Some(Geometry::Preset(prst)) => (Some(prst.preset.as_str()), false),
        Some(Geometry::Custom) => (None, true),
        None => (None, false),
    };

    ResolvedShapeProperties {
        shape_type,
        custom_shape_type,
        width: finite(width),
        height: finite(height),
        x: finite(x),
        y: finite(y),
        rotation,
        flip,
        text_rotation,
        order: node.order(),
        slide_xfrm: xfrm,
        layout_xfrm: layout.and_then(|n| n.xfrm.as_ref()),
        master_xfrm: master.and_then(|n| n.xfrm.as_ref()),
        parent_xfrm: parent.and_then(|p| p.xfrm.as_ref()),
    }
}

/// A non-finite `unit_factor` must not leak NaN into the markup.
#[inline]
fn finite(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{ConnectorNode, Extent, Offset, PresetGeometry};

    const HALF: f64 = 0.5;

    fn xfrm(off: Option<(i64, i64)>, ext: Option<(i64, i64)>, rot: Option<i64>) -> Transform {
        Transform {
            offset: off.map(|(x, y)| Offset { x, y }),
            extent: ext.map(|(cx, cy)| Extent { cx, cy }),
            rotation: rot,
            ..Default::default()
        }
    }

    #[test]
    fn test_no_transform_defaults_to_origin() {
        let shape = ShapeNode::default();
        let props = resolve(ShapeRef::Shape(&shape), HALF, None, None, None);
        assert_eq!((props.x, props.y, props.width, props.height), (0.0, 0.0, 0.0, 0.0));
        assert_eq!(props.rotation, 0.0);
        assert_eq!(props.flip.as_transform(), "");
        assert!(props.slide_xfrm.is_none());
    }

    #[test]
    fn test_offset_and_extent_default_independently() {
        let shape = ShapeNode {
            xfrm: Some(xfrm(None, Some((914_400, 1_828_800)), None)),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Shape(&shape), HALF, None, None, None);
        assert_eq!((props.x, props.y), (0.0, 0.0));
        assert_eq!((props.width, props.height), (457_200.0, 914_400.0));

        let shape = ShapeNode {
            xfrm: Some(xfrm(Some((457_200, 914_400)), None, None)),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Shape(&shape), HALF, None, None, None);
        assert_eq!((props.x, props.y), (228_600.0, 457_200.0));
        assert_eq!((props.width, props.height), (0.0, 0.0));
    }

    #[test]
    fn test_flip_transforms() {
        let cases = [
            (false, false, ""),
            (true, false, "scale(-1,1)"),
            (false, true, "scale(1,-1)"),
            (true, true, "scale(-1,-1)"),
        ];
        for (h, v, expected) in cases {
            assert_eq!(Flip::from_flags(h, v).as_transform(), expected);
        }
    }

    #[test]
    fn test_text_rotation() {
        let shape = ShapeNode {
            xfrm: Some(xfrm(None, None, Some(2_700_000))),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Shape(&shape), HALF, None, None, None);
        assert_eq!(props.rotation, 45.0);
        assert_eq!(props.text_rotation, 45.0);

        let shape = ShapeNode {
            xfrm: Some(xfrm(None, None, Some(2_700_000))),
            text_xfrm: Some(xfrm(None, None, Some(-5_400_000))),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Shape(&shape), HALF, None, None, None);
        assert_eq!(props.text_rotation, 0.0);

        // A text transform without its own angle does not shift the text.
        let shape = ShapeNode {
            xfrm: Some(xfrm(None, None, Some(2_700_000))),
            text_xfrm: Some(xfrm(Some((1, 1)), None, None)),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Shape(&shape), HALF, None, None, None);
        assert_eq!(props.text_rotation, 45.0);
    }

    #[test]
    fn test_ancestor_transforms_and_geometry() {
        let layout = ShapeNode {
            xfrm: Some(xfrm(Some((1, 2)), None, None)),
            ..Default::default()
        };
        let master = ShapeNode {
            xfrm: Some(xfrm(Some((3, 4)), None, None)),
            ..Default::default()
        };
        let frame = GraphicFrameNode {
            xfrm: Some(xfrm(Some((5, 6)), None, None)),
            ..Default::default()
        };
        let shape = ShapeNode {
            geometry: Some(Geometry::Preset(PresetGeometry::new("hexagon"))),
            order: 7,
            ..Default::default()
        };

        let props = resolve(
            ShapeRef::Shape(&shape),
            HALF,
            Some(&frame),
            Some(&layout),
            Some(&master),
        );
        assert_eq!(props.shape_type, Some("hexagon"));
        assert!(!props.custom_shape_type);
        assert_eq!(props.order, 7);
        assert_eq!(props.layout_xfrm.and_then(|t| t.offset), Some(Offset { x: 1, y: 2 }));
        assert_eq!(props.master_xfrm.and_then(|t| t.offset), Some(Offset { x: 3, y: 4 }));
        assert_eq!(props.parent_xfrm.and_then(|t| t.offset), Some(Offset { x: 5, y: 6 }));
    }

    #[test]
    fn test_connector() {
        let cxn = ConnectorNode {
            xfrm: Some(Transform {
                flip_h: true,
                ..xfrm(Some((914_400, 0)), Some((914_400, 0)), None)
            }),
            geometry: Some(Geometry::Custom),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Connector(&cxn), HALF, None, None, None);
        assert_eq!(props.flip, Flip::Horizontal);
        assert_eq!((props.x, props.width, props.height), (457_200.0, 457_200.0, 0.0));
        assert!(props.custom_shape_type);
    }

    #[test]
    fn test_non_finite_factor() {
        let shape = ShapeNode {
            xfrm: Some(xfrm(Some((1, 1)), Some((1, 1)), None)),
            ..Default::default()
        };
        let props = resolve(ShapeRef::Shape(&shape), f64::NAN, None, None, None);
        assert_eq!((props.x, props.width), (0.0, 0.0));
    }
}
