//! Adjustable and trigonometric preset geometry.
//!
//! All generators return SVG path data (and, for pies, the rotation that
//! places the wedge); the caller wraps it in a `<path>` element.

use std::f64::consts::PI;
use std::str::FromStr;

use super::path::{PathBuilder, write_num};
use crate::error::ShapeError;

/// Sweep of a pie wedge in degrees, normalised into `[0, 360]`.
///
/// # Examples
///
/// ```
/// use slideshape::geometry::parametric::pie_sweep;
///
/// assert_eq!(pie_sweep(30.0, 30.0), 0.0);
/// assert_eq!(pie_sweep(30.0, 20.0), 350.0);
/// ```
pub fn pie_sweep(start: f64, end: f64) -> f64 {
    let mut sweep = end - start;
    if sweep < 0.0 {
        sweep += 360.0;
    }
    sweep.clamp(0.0, 360.0)
}

/// Pie or wedge-ring sector.
///
/// Returns `(path_data, transform)`. Angles are in degrees.
///
/// The closed form draws both radii and the arc through the centre of a
/// circle of `diameter`. The open form draws only the arc, with horizontal
/// radius `alt_width / 2` and vertical radius `diameter / 2`. The two forms
/// measure their start from different axes, hence the different rotation.
pub fn pie(diameter: f64, alt_width: f64, start: f64, end: f64, closed: bool) -> (String, String) {
    let radius = diameter / 2.0;
    let sweep = pie_sweep(start, end).to_radians();
    let (x, y) = (sweep.cos(), sweep.sin());
    let large_arc = pie_sweep(start, end) > 180.0;

    let mut path = PathBuilder::new();
    let rotation;
    if closed {
        path.move_to(radius, radius)
            .line_to(radius, 0.0)
            .arc(
                radius,
                radius,
                0.0,
                large_arc,
                true,
                radius + y * radius,
                radius - x * radius,
            )
            .close();
        rotation = start - 270.0;
    } else {
        let r1 = radius;
        let r2 = alt_width / 2.0;
        path.move_to(r1, 0.0)
            .arc(r2, r1, 0.0, large_arc, true, r2 + y * r2, r1 - x * r1);
        rotation = start + 90.0;
    }

    (path.build(), rotate_transform(rotation, radius, radius))
}

/// `rotate(angle, cx, cy)`
pub fn rotate_transform(angle: f64, cx: f64, cy: f64) -> String {
    let mut out = String::with_capacity(32);
    out.push_str("rotate(");
    write_num(&mut out, angle);
    out.push_str(", ");
    write_num(&mut out, cx);
    out.push_str(", ");
    write_num(&mut out, cy);
    out.push(')');
    out
}

const GEAR_TAPER_INNER: f64 = 35.0;
const GEAR_TAPER_OUTER: f64 = 50.0;
const GEAR_OUTER_RATIO: f64 = 1.5;

/// Gear outline with `notches` teeth.
///
/// The outer radius is 1.5 × `inner_radius` and the gear is centred on
/// `(outer, outer)`. Each of the `2 × notches` flank steps adds two
/// vertices, alternating between a falling and a rising flank, and one more
/// step past the full revolution closes the outline. Zero notches yields an
/// empty path.
pub fn gear(inner_radius: f64, notches: u32) -> String {
    if notches == 0 {
        return String::new();
    }

    let radius_o = GEAR_OUTER_RATIO * inner_radius;
    let radius_i = inner_radius;
    let (cx, cy) = (radius_o, radius_o);

    let angle = 2.0 * PI / (notches as f64 * 2.0);
    let taper_ai = angle * GEAR_TAPER_INNER * 0.005;
    let taper_ao = angle * GEAR_TAPER_OUTER * 0.005;
    let at = |r: f64, a: f64| (cx + r * a.cos(), cy + r * a.sin());

    let mut path = PathBuilder::new();
    let (x, y) = at(radius_o, taper_ao);
    path.move_to(x, y);

    // 2n+1 half-tooth steps, two vertices each
    for step in 1..=(2 * notches + 1) {
        let a = angle * step as f64;
        let (first, second) = if step % 2 == 0 {
            (at(radius_i, a - taper_ai), at(radius_o, a + taper_ao))
        } else {
            (at(radius_o, a - taper_ao), at(radius_i, a + taper_ai))
        };
        path.line_to(first.0, first.1).line_to(second.0, second.1);
    }

    path.build()
}

/// Widest sweep [`arc`] samples, in degrees.
pub const MAX_ARC_SWEEP: f64 = 360.0;

/// Polyline approximation of an elliptical arc.
///
/// Samples one point per whole degree from `start` toward `end`; the
/// direction follows `end >= start`. `start == end` produces a single
/// zero-length segment, which is valid output. The sweep is capped at
/// [`MAX_ARC_SWEEP`]; non-finite angles yield an empty path.
pub fn arc(cx: f64, cy: f64, rx: f64, ry: f64, start: f64, end: f64, closed: bool) -> String {
    if !(start.is_finite() && end.is_finite()) {
        return String::new();
    }

    let span = (end - start).abs().min(MAX_ARC_SWEEP);
    let (samples, step) = if end >= start {
        (span.floor() as u32 + 1, 1.0)
    } else {
        (span.ceil() as u32, -1.0)
    };

    let mut path = PathBuilder::new();
    for i in 0..samples {
        let radians = (start + step * f64::from(i)).to_radians();
        let x = cx + radians.cos() * rx;
        let y = cy + radians.sin() * ry;
        if i == 0 {
            path.move_to(x, y);
        }
        path.line_to(x, y);
    }

    if closed {
        path.close();
    }
    path.build()
}

/// Corner treatment of a round/snip rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerStyle {
    /// Quarter-circle corners approximated by quadratic Béziers
    Round,
    /// Straight diagonal cuts
    Snip,
}

/// How two adjustment handles map onto the four corners.
///
/// Corners are named A (top-left), B (bottom-left), C (bottom-right) and
/// D (top-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerPolicy {
    /// Only D is adjustable
    Corner1,
    /// A and D share the first handle, B and C the second
    Corner2,
    /// One value for all four corners
    CornerAll,
    /// A and C share the first handle, B and D the second
    Diagonal,
}

impl CornerPolicy {
    /// Expand the two handles into the `[A, B, C, D]` factors.
    pub fn factors(self, adj1: f64, adj2: f64) -> [f64; 4] {
        match self {
            Self::Corner1 => [0.0, 0.0, 0.0, adj1],
            Self::Corner2 => [adj1, adj2, adj2, adj1],
            Self::CornerAll => [adj1, adj1, adj1, adj1],
            Self::Diagonal => [adj1, adj2, adj1, adj2],
        }
    }
}

impl FromStr for CornerPolicy {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cornr1" => Ok(Self::Corner1),
            "cornr2" => Ok(Self::Corner2),
            "cornrAll" => Ok(Self::CornerAll),
            "diag" => Ok(Self::Diagonal),
            other => Err(ShapeError::UnknownCornerPolicy(other.to_string())),
        }
    }
}

/// Rectangle with four independently adjustable corners.
///
/// Each factor is a fraction of the half-width (horizontally) and
/// half-height (vertically).
pub fn round_snip_rect(
    w: f64,
    h: f64,
    adj1: f64,
    adj2: f64,
    style: CornerStyle,
    policy: CornerPolicy,
) -> String {
    let [a, b, c, d] = policy.factors(adj1, adj2);
    let (hw, hh) = (w / 2.0, h / 2.0);

    let mut path = PathBuilder::new();
    match style {
        CornerStyle::Round => {
            path.move_to(0.0, hh + (1.0 - b) * hh)
                .quad_to(0.0, h, b * hw, h)
                .line_to(hw + (1.0 - c) * hw, h)
                .quad_to(w, h, w, hh + (1.0 - c) * hh)
                .line_to(w, hh * d)
                .quad_to(w, 0.0, hw + (1.0 - d) * hw, 0.0)
                .line_to(hw * a, 0.0)
                .quad_to(0.0, 0.0, 0.0, hh * a)
                .close();
        },
        CornerStyle::Snip => {
            path.move_to(0.0, a * hh)
                .line_to(0.0, hh + (1.0 - b) * hh)
                .line_to(b * hw, h)
                .line_to(hw + (1.0 - c) * hw, h)
                .line_to(w, hh + (1.0 - c) * hh)
                .line_to(w, d * hh)
                .line_to(hw + (1.0 - d) * hw, 0.0)
                .line_to(hw * a, 0.0)
                .close();
        },
    }
    path.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pie_sweep_edges() {
        assert_eq!(pie_sweep(90.0, 90.0), 0.0);
        assert_eq!(pie_sweep(100.0, 90.0), 350.0);
        assert_eq!(pie_sweep(0.0, 270.0), 270.0);
        assert_eq!(pie_sweep(0.0, 720.0), 360.0);
    }

    #[test]
    fn test_closed_pie() {
        let (d, rot) = pie(100.0, 100.0, 0.0, 90.0, true);
        assert_eq!(d, "M50 50 L50 0 A50 50 0 0 1 100 50 z");
        assert_eq!(rot, "rotate(-270, 50, 50)");

        let (d, _) = pie(100.0, 100.0, 0.0, 270.0, true);
        assert!(d.contains("A50 50 0 1 1 0 50"), "{d}");
    }

    #[test]
    fn test_open_pie_uses_both_radii() {
        let (d, rot) = pie(100.0, 60.0, 270.0, 0.0, false);
        assert!(d.starts_with("M50 0 A30 50 0 0 1"), "{d}");
        assert!(!d.contains('z'));
        assert_eq!(rot, "rotate(360, 50, 50)");
    }

    #[test]
    fn test_gear_vertex_count() {
        let d = gear(20.0, 6);
        assert!(d.starts_with('M'));
        assert_eq!(d.matches('L').count(), 2 * (2 * 6 + 1));
        assert_eq!(gear(20.0, 0), "");
    }

    #[test]
    fn test_gear_closes_past_revolution() {
        // The last step lands one step past 2π, i.e. on the first step's angle.
        let d = gear(10.0, 1);
        let coords: Vec<&str> = d.split(' ').collect();
        assert_eq!(d.matches('L').count(), 6);
        assert_eq!(coords[2..6], coords[coords.len() - 4..]);
    }

    #[test]
    fn test_arc_directions() {
        let up = arc(10.0, 10.0, 10.0, 10.0, 0.0, 90.0, false);
        assert_eq!(up.matches('L').count(), 91);
        assert!(up.starts_with("M20 10 L20 10"));

        let down = arc(10.0, 10.0, 10.0, 10.0, 90.0, 0.0, true);
        assert_eq!(down.matches('L').count(), 90);
        assert!(down.ends_with(" z"));
    }

    #[test]
    fn test_arc_degenerate() {
        let d = arc(0.0, 0.0, 5.0, 5.0, 45.0, 45.0, false);
        assert_eq!(d.matches('M').count(), 1);
        assert_eq!(d.matches('L').count(), 1);
    }

    #[test]
    fn test_arc_sweep_is_capped() {
        let d = arc(10.0, 10.0, 10.0, 10.0, 0.0, 600_000_000_000.0 / 60_000.0, true);
        assert_eq!(d.matches('L').count(), 361);

        let d = arc(10.0, 10.0, 10.0, 10.0, 1e300, -1e300, false);
        assert_eq!(d.matches('L').count(), 360);

        assert_eq!(arc(0.0, 0.0, 1.0, 1.0, 0.0, f64::INFINITY, false), "");
        assert_eq!(arc(0.0, 0.0, 1.0, 1.0, f64::NAN, 10.0, false), "");
    }

    #[test]
    fn test_round_rect_all_corners_symmetric() {
        let d = round_snip_rect(100.0, 100.0, 0.5, 0.0, CornerStyle::Round, CornerPolicy::CornerAll);
        assert_eq!(
            d,
            "M0 75 Q0 100 25 100 L75 100 Q100 100 100 75 L100 25 Q100 0 75 0 L25 0 Q0 0 0 25 z"
        );
    }

    #[test]
    fn test_snip_one_corner() {
        let d = round_snip_rect(100.0, 50.0, 0.4, 0.0, CornerStyle::Snip, CornerPolicy::Corner1);
        assert_eq!(
            d,
            "M0 0 L0 50 L0 50 L100 50 L100 50 L100 10 L80 0 L0 0 z"
        );
    }

    #[test]
    fn test_policy_factors() {
        assert_eq!(CornerPolicy::Corner2.factors(0.1, 0.2), [0.1, 0.2, 0.2, 0.1]);
        assert_eq!(CornerPolicy::Diagonal.factors(0.1, 0.2), [0.1, 0.2, 0.1, 0.2]);
        assert!(matches!(
            "cornr3".parse::<CornerPolicy>(),
            Err(ShapeError::UnknownCornerPolicy(name)) if name == "cornr3"
        ));
        assert_eq!("diag".parse::<CornerPolicy>().ok(), Some(CornerPolicy::Diagonal));
    }

    proptest! {
        #[test]
        fn prop_pie_sweep_in_range(start in -720.0f64..720.0, end in -720.0f64..720.0) {
            let sweep = pie_sweep(start, end);
            prop_assert!((0.0..=360.0).contains(&sweep));
        }

        #[test]
        fn prop_gear_vertex_count(notches in 1u32..40, inner in 1.0f64..500.0) {
            let d = gear(inner, notches);
            prop_assert_eq!(d.matches('M').count(), 1);
            prop_assert_eq!(d.matches('L').count() as u32, 2 * (2 * notches + 1));
        }
    }
}
