//! Geometry generators producing SVG markup.
//!
//! - [`primitives`]: fixed-topology shapes (rectangle, ellipse, polygons,
//!   decorated flow-chart rectangles)
//! - [`parametric`]: adjustable shapes (pie, gear, arc, round/snip rectangles)
//! - [`path`]: path data builder and number formatting shared by both

pub mod parametric;
pub mod path;
pub mod primitives;

use std::borrow::Cow;

use path::write_num;

use crate::xml::escape_attr;

pub use parametric::{CornerPolicy, CornerStyle};
pub use primitives::Decoration;

/// Stroke settings for a shape outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    /// Stroke color, e.g. `#000` or `none`
    pub color: String,
    /// Stroke width in pixels
    pub width: f64,
    /// SVG `stroke-dasharray` value, `none` for solid lines
    pub stroke_dasharray: String,
}

impl Border {
    pub fn new(color: impl Into<String>, width: f64, stroke_dasharray: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            width,
            stroke_dasharray: stroke_dasharray.into(),
        }
    }

    /// An invisible outline.
    pub fn none() -> Self {
        Self::new("none", 0.0, "none")
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::new("#000", 1.0, "none")
    }
}

/// Fill selection for a primitive.
///
/// Precedence: image pattern, then gradient, then the literal color. The
/// flags are expected to be mutually exclusive, but an image always wins.
#[derive(Debug, Clone, Copy)]
pub struct FillSpec<'a> {
    /// Fill with the image pattern registered for `shape_id`
    pub image: bool,
    /// Fill with the linear gradient registered for `shape_id`
    pub gradient: bool,
    pub shape_id: &'a str,
    /// Literal fill color, e.g. `#ff0000` or `none`
    pub color: &'a str,
}

impl<'a> FillSpec<'a> {
    /// A plain color fill.
    pub fn solid(shape_id: &'a str, color: &'a str) -> Self {
        Self {
            image: false,
            gradient: false,
            shape_id,
            color,
        }
    }

    pub fn with_image(mut self, image: bool) -> Self {
        self.image = image;
        self
    }

    pub fn with_gradient(mut self, gradient: bool) -> Self {
        self.gradient = gradient;
        self
    }

    /// The value of the `fill` attribute.
    pub fn paint(&self) -> Cow<'a, str> {
        if self.image {
            Cow::Owned(format!("url(#imgPtrn_{})", self.shape_id))
        } else if self.gradient {
            Cow::Owned(format!("url(#linGrd_{})", self.shape_id))
        } else {
            Cow::Borrowed(self.color)
        }
    }
}

/// Write ` fill='..' stroke='..' stroke-width='..' stroke-dasharray='..' `.
///
/// The trailing space is part of the format; callers append an optional
/// filter reference and then ` />`. Values are attribute-escaped.
pub(crate) fn write_paint_attrs(buf: &mut String, fill: &FillSpec<'_>, border: &Border) {
    buf.push_str(" fill='");
    buf.push_str(&escape_attr(&fill.paint()));
    write_stroke_attrs(buf, border);
}

/// Write the stroke part of [`write_paint_attrs`].
pub(crate) fn write_stroke_attrs(buf: &mut String, border: &Border) {
    buf.push_str("' stroke='");
    buf.push_str(&escape_attr(&border.color));
    buf.push_str("' stroke-width='");
    write_num(buf, border.width);
    buf.push_str("' stroke-dasharray='");
    buf.push_str(&escape_attr(&border.stroke_dasharray));
    buf.push_str("' ");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_precedence() {
        let fill = FillSpec::solid("7", "#ff0000");
        assert_eq!(fill.paint(), "#ff0000");
        assert_eq!(fill.with_gradient(true).paint(), "url(#linGrd_7)");
        assert_eq!(
            fill.with_gradient(true).with_image(true).paint(),
            "url(#imgPtrn_7)"
        );
    }

    #[test]
    fn test_paint_attrs() {
        let mut buf = String::new();
        write_paint_attrs(&mut buf, &FillSpec::solid("1", "red"), &Border::default());
        assert_eq!(
            buf,
            " fill='red' stroke='#000' stroke-width='1' stroke-dasharray='none' "
        );
    }

    #[test]
    fn test_paint_attrs_escape_quotes() {
        let mut buf = String::new();
        let fill = FillSpec::solid("1' onload='x", "none").with_image(true);
        let border = Border::new("#000' a='b", 1.0, "none");
        write_paint_attrs(&mut buf, &fill, &border);
        assert_eq!(
            buf,
            " fill='url(#imgPtrn_1&apos; onload=&apos;x)' stroke='#000&apos; a=&apos;b' \
             stroke-width='1' stroke-dasharray='none' "
        );
    }
}
