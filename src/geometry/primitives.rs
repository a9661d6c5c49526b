//! Fixed-topology primitives.
//!
//! Each generator draws in the shape's local coordinate space: the origin
//! is the top-left corner of the bounding box and the caller positions the
//! result.

use std::f64::consts::PI;

use smallvec::SmallVec;

use super::path::write_num;
use super::{Border, FillSpec, write_paint_attrs, write_stroke_attrs};

type Vertices = SmallVec<[(f64, f64); 6]>;

/// Overlay drawn on top of a flow-chart rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// Vertical guides at 1/8 and 7/8 of the width
    PredefinedProcess,
    /// Vertical guide at 1/8 width and horizontal guide at 1/8 height
    InternalStorage,
}

impl Decoration {
    /// Parse a preset name; unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "flowChartPredefinedProcess" => Some(Self::PredefinedProcess),
            "flowChartInternalStorage" => Some(Self::InternalStorage),
            _ => None,
        }
    }
}

/// Full bounding-box rectangle.
///
/// `shadow` is appended verbatim, typically `filter='url(#..)'`.
///
/// # Examples
///
/// ```
/// use slideshape::geometry::{Border, FillSpec, primitives};
///
/// let border = Border::new("#000", 1.0, "none");
/// let svg = primitives::rect(200.0, 100.0, &FillSpec::solid("1", "#ff0000"), &border, None);
/// assert_eq!(
///     svg,
///     "<rect x='0' y='0' width='200' height='100' fill='#ff0000' stroke='#000' stroke-width='1' stroke-dasharray='none'  />"
/// );
/// ```
pub fn rect(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border, shadow: Option<&str>) -> String {
    let mut out = String::with_capacity(160);
    write_rect(&mut out, w, h, fill, border);
    out.push_str(shadow.unwrap_or(""));
    out.push_str(" />");
    out
}

fn write_rect(out: &mut String, w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) {
    out.push_str("<rect x='0' y='0' width='");
    write_num(out, w);
    out.push_str("' height='");
    write_num(out, h);
    out.push('\'');
    write_paint_attrs(out, fill, border);
}

/// Ellipse filling the bounding box.
pub fn ellipse(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) -> String {
    let mut out = String::with_capacity(160);
    out.push_str("<ellipse cx='");
    write_num(&mut out, w / 2.0);
    out.push_str("' cy='");
    write_num(&mut out, h / 2.0);
    out.push_str("' rx='");
    write_num(&mut out, w / 2.0);
    out.push_str("' ry='");
    write_num(&mut out, h / 2.0);
    out.push('\'');
    write_paint_attrs(&mut out, fill, border);
    out.push_str("/>");
    out
}

/// Circle inscribed in the bounding box, radius `min(w, h) / 2`.
pub fn circle(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) -> String {
    let mut out = String::with_capacity(140);
    out.push_str("<circle cx='");
    write_num(&mut out, w / 2.0);
    out.push_str("' cy='");
    write_num(&mut out, h / 2.0);
    out.push_str("' r='");
    write_num(&mut out, w.min(h) / 2.0);
    out.push('\'');
    write_paint_attrs(&mut out, fill, border);
    out.push_str("/>");
    out
}

pub fn diamond(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) -> String {
    let vertices: Vertices = smallvec::smallvec![
        (w / 2.0, 0.0),
        (w, h / 2.0),
        (w / 2.0, h),
        (0.0, h / 2.0)
    ];
    polygon(&vertices, fill, border)
}

/// Isosceles triangle with its apex at the top centre.
pub fn triangle(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) -> String {
    let vertices: Vertices = smallvec::smallvec![(w / 2.0, 0.0), (0.0, h), (w, h)];
    polygon(&vertices, fill, border)
}

/// Regular pentagon inscribed in the circle of radius `min(w, h) / 2`.
pub fn pentagon(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) -> String {
    polygon(&regular_vertices(w, h, 5), fill, border)
}

/// Regular hexagon inscribed in the circle of radius `min(w, h) / 2`.
pub fn hexagon(w: f64, h: f64, fill: &FillSpec<'_>, border: &Border) -> String {
    polygon(&regular_vertices(w, h, 6), fill, border)
}

/// Vertices of a regular polygon: the top point of the inscribed circle
/// rotated by `2π·k/sides` around the centre.
pub fn regular_vertices(w: f64, h: f64, sides: usize) -> SmallVec<[(f64, f64); 6]> {
    let (cx, cy) = (w / 2.0, h / 2.0);
    let r = w.min(h) / 2.0;
    let step = 2.0 * PI / sides as f64;
    (0..sides)
        .map(|k| {
            let a = step * k as f64;
            (cx + r * a.sin(), cy - r * a.cos())
        })
        .collect()
}

fn polygon(vertices: &[(f64, f64)], fill: &FillSpec<'_>, border: &Border) -> String {
    let mut out = String::with_capacity(64 + vertices.len() * 16);
    out.push_str("<polygon points='");
    for (i, &(x, y)) in vertices.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_num(&mut out, x);
        out.push(' ');
        write_num(&mut out, y);
    }
    out.push('\'');
    write_paint_attrs(&mut out, fill, border);
    out.push_str("/>");
    out
}

/// Flow-chart rectangle with guide lines.
///
/// `kind` is the preset name; anything other than a known decoration
/// renders the plain rectangle.
pub fn decorated_rect(
    w: f64,
    h: f64,
    fill: &FillSpec<'_>,
    border: &Border,
    kind: &str,
) -> String {
    let mut out = String::with_capacity(400);
    write_rect(&mut out, w, h, fill, border);
    out.push_str("/>");

    match Decoration::from_name(kind) {
        Some(Decoration::PredefinedProcess) => {
            write_guide(&mut out, (w / 8.0, 0.0), (w / 8.0, h), border);
            write_guide(&mut out, (w * 7.0 / 8.0, 0.0), (w * 7.0 / 8.0, h), border);
        },
        Some(Decoration::InternalStorage) => {
            write_guide(&mut out, (w / 8.0, 0.0), (w / 8.0, h), border);
            write_guide(&mut out, (0.0, h / 8.0), (w, h / 8.0), border);
        },
        None => {},
    }

    out
}

fn write_guide(out: &mut String, from: (f64, f64), to: (f64, f64), border: &Border) {
    out.push_str(" <polyline points='");
    write_num(out, from.0);
    out.push(' ');
    write_num(out, from.1);
    out.push(' ');
    write_num(out, to.0);
    out.push(' ');
    write_num(out, to.1);
    out.push_str("' fill='none");
    write_stroke_attrs(out, border);
    out.push_str("/>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn border() -> Border {
        Border::new("#000", 1.0, "none")
    }

    fn polygon_points(svg: &str) -> Vec<(f64, f64)> {
        let start = svg.find("points='").expect("points attribute") + 8;
        let end = start + svg[start..].find('\'').expect("closing quote");
        svg[start..end]
            .split(',')
            .map(|pair| {
                let mut it = pair.split(' ').map(|n| n.parse::<f64>().expect("number"));
                (it.next().expect("x"), it.next().expect("y"))
            })
            .collect()
    }

    #[test]
    fn test_rect_end_to_end() {
        let svg = rect(200.0, 100.0, &FillSpec::solid("1", "#ff0000"), &border(), None);
        assert_eq!(
            svg,
            "<rect x='0' y='0' width='200' height='100' fill='#ff0000' stroke='#000' stroke-width='1' stroke-dasharray='none'  />"
        );
    }

    #[test]
    fn test_rect_shadow_appended() {
        let svg = rect(
            10.0,
            10.0,
            &FillSpec::solid("1", "none"),
            &border(),
            Some("filter='url(#shadow_1)'"),
        );
        assert!(svg.ends_with("stroke-dasharray='none' filter='url(#shadow_1)' />"));
    }

    #[test]
    fn test_image_fill_wins_for_every_primitive() {
        let fill = FillSpec::solid("42", "#00ff00")
            .with_gradient(true)
            .with_image(true);
        let outputs = [
            rect(10.0, 20.0, &fill, &border(), None),
            ellipse(10.0, 20.0, &fill, &border()),
            circle(10.0, 20.0, &fill, &border()),
            diamond(10.0, 20.0, &fill, &border()),
            triangle(10.0, 20.0, &fill, &border()),
            pentagon(10.0, 20.0, &fill, &border()),
            hexagon(10.0, 20.0, &fill, &border()),
            decorated_rect(10.0, 20.0, &fill, &border(), "flowChartPredefinedProcess"),
        ];
        for svg in &outputs {
            assert!(svg.contains("fill='url(#imgPtrn_42)'"), "{svg}");
            assert!(!svg.contains("#00ff00"), "{svg}");
        }
    }

    #[test]
    fn test_circle_is_inscribed() {
        let svg = circle(100.0, 40.0, &FillSpec::solid("1", "red"), &border());
        assert!(svg.starts_with("<circle cx='50' cy='20' r='20'"));
    }

    #[test]
    fn test_ellipse_radii() {
        let svg = ellipse(100.0, 40.0, &FillSpec::solid("1", "red"), &border());
        assert!(svg.starts_with("<ellipse cx='50' cy='20' rx='50' ry='20'"));
    }

    #[test]
    fn test_diamond_vertices() {
        let svg = diamond(40.0, 20.0, &FillSpec::solid("1", "red"), &border());
        assert_eq!(
            polygon_points(&svg),
            vec![(20.0, 0.0), (40.0, 10.0), (20.0, 20.0), (0.0, 10.0)]
        );
    }

    #[test]
    fn test_hexagon_vertices_on_circle() {
        let svg = hexagon(100.0, 100.0, &FillSpec::solid("1", "red"), &border());
        let points = polygon_points(&svg);
        assert_eq!(points.len(), 6);
        for (x, y) in points {
            let d = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
            assert!((d - 50.0).abs() < 0.01, "({x}, {y}) at distance {d}");
        }
    }

    #[test]
    fn test_pentagon_uses_smaller_extent() {
        let vertices = regular_vertices(200.0, 100.0, 5);
        assert_eq!(vertices.len(), 5);
        assert!((vertices[0].0 - 100.0).abs() < 1e-9);
        assert!(vertices[0].1.abs() < 1e-9);
        for (x, y) in vertices {
            let d = ((x - 100.0).powi(2) + (y - 50.0).powi(2)).sqrt();
            assert!((d - 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_decorations() {
        let fill = FillSpec::solid("1", "red");
        let predefined = decorated_rect(80.0, 40.0, &fill, &border(), "flowChartPredefinedProcess");
        assert!(predefined.contains("points='10 0 10 40'"));
        assert!(predefined.contains("points='70 0 70 40'"));

        let storage = decorated_rect(80.0, 40.0, &fill, &border(), "flowChartInternalStorage");
        assert!(storage.contains("points='10 0 10 40'"));
        assert!(storage.contains("points='0 5 80 5'"));

        let plain = decorated_rect(80.0, 40.0, &fill, &border(), "flowChartMagneticDisk");
        assert!(!plain.contains("polyline"));
        assert!(plain.starts_with("<rect x='0' y='0' width='80' height='40'"));
    }
}
