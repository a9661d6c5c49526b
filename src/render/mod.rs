//! Default SVG renderer.
//!
//! [`SvgShapeRenderer`] maps preset geometry names onto the generators in
//! [`crate::geometry`] and wraps the result in an absolutely positioned
//! `<svg class='drawing'>` element. Text bodies, custom geometry paths and
//! gradient/pattern definitions are left to the surrounding document
//! renderer.

pub mod placement;

pub use placement::{CssPlacement, Placement, TransformChain};

use phf::phf_map;

use crate::context::RenderContext;
use crate::dispatch::{ResolvedShape, ShapeRenderer};
use crate::geometry::parametric::{self, CornerPolicy, CornerStyle, rotate_transform};
use crate::geometry::path::{write_num, write_num_prec};
use crate::geometry::{Border, FillSpec, primitives, write_paint_attrs, write_stroke_attrs};
use crate::node::{Fill, Geometry, Line, PresetGeometry};
use crate::unit::{ADJUST_UNITS_PER_FACTOR, angle_units_to_degrees};
use crate::xml::escape_attr;

/// Generator family of a preset geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Preset {
    Rect,
    Ellipse,
    Circle,
    Diamond,
    Triangle,
    Pentagon,
    Hexagon,
    /// Flow-chart rectangle with guide lines
    Decorated,
    Line,
    /// Round/snip rectangle; `defaults` are the handle factors when the
    /// shape has no adjustment list, `mirrored` flips it horizontally
    Corners {
        style: CornerStyle,
        policy: CornerPolicy,
        defaults: (f64, f64),
        mirrored: bool,
    },
    /// Pie-family sector; angles in degrees, `diameter_scale` multiplies the
    /// shape height
    Pie {
        start: f64,
        end: f64,
        diameter_scale: f64,
        closed: bool,
    },
    Chord,
    Gear(u32),
}

const ROUND_DEFAULT: (f64, f64) = (0.33334, 0.0);

static PRESETS: phf::Map<&'static str, Preset> = phf_map! {
    "rect" => Preset::Rect,
    "flowChartProcess" => Preset::Rect,
    "ellipse" => Preset::Ellipse,
    "flowChartConnector" => Preset::Circle,
    "diamond" => Preset::Diamond,
    "flowChartDecision" => Preset::Diamond,
    "triangle" => Preset::Triangle,
    "flowChartExtract" => Preset::Triangle,
    "pentagon" => Preset::Pentagon,
    "hexagon" => Preset::Hexagon,
    "flowChartPredefinedProcess" => Preset::Decorated,
    "flowChartInternalStorage" => Preset::Decorated,
    "line" => Preset::Line,
    "straightConnector1" => Preset::Line,
    "roundRect" => Preset::Corners {
        style: CornerStyle::Round,
        policy: CornerPolicy::CornerAll,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "flowChartAlternateProcess" => Preset::Corners {
        style: CornerStyle::Round,
        policy: CornerPolicy::CornerAll,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "round1Rect" => Preset::Corners {
        style: CornerStyle::Round,
        policy: CornerPolicy::Corner1,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "round2SameRect" => Preset::Corners {
        style: CornerStyle::Round,
        policy: CornerPolicy::Corner2,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "round2DiagRect" => Preset::Corners {
        style: CornerStyle::Round,
        policy: CornerPolicy::Diagonal,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "snip1Rect" => Preset::Corners {
        style: CornerStyle::Snip,
        policy: CornerPolicy::Corner1,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "snip2SameRect" => Preset::Corners {
        style: CornerStyle::Snip,
        policy: CornerPolicy::Corner2,
        defaults: ROUND_DEFAULT,
        mirrored: false,
    },
    "snip2DiagRect" => Preset::Corners {
        style: CornerStyle::Snip,
        policy: CornerPolicy::Diagonal,
        defaults: (0.0, 0.33334),
        mirrored: false,
    },
    "flowChartPunchedCard" => Preset::Corners {
        style: CornerStyle::Snip,
        policy: CornerPolicy::Corner1,
        defaults: (0.2, 0.0),
        mirrored: true,
    },
    "pie" => Preset::Pie { start: 0.0, end: 270.0, diameter_scale: 1.0, closed: true },
    "pieWedge" => Preset::Pie { start: 180.0, end: 270.0, diameter_scale: 2.0, closed: true },
    "arc" => Preset::Pie { start: 270.0, end: 0.0, diameter_scale: 1.0, closed: false },
    "chord" => Preset::Chord,
    "gear6" => Preset::Gear(6),
    "gear9" => Preset::Gear(9),
};

/// `a:prstDash` values as SVG dash arrays.
static DASH_ARRAYS: phf::Map<&'static str, &'static str> = phf_map! {
    "solid" => "0",
    "dot" => "1, 5",
    "dash" => "5",
    "lgDash" => "10, 5",
    "dashDot" => "5, 5, 1, 5",
    "lgDashDot" => "10, 5, 1, 5",
    "lgDashDotDot" => "10, 5, 1, 5, 1, 5",
    "sysDash" => "5, 2",
    "sysDot" => "2, 5",
    "sysDashDot" => "5, 2, 1, 5",
    "sysDashDotDot" => "5, 2, 1, 5, 1, 5",
};

const CHORD_DEFAULT: (f64, f64) = (45.0, 270.0);
const GEAR_ROTATION: f64 = 20.0;
/// Inner gear radius as a divisor of the shape height
const GEAR_RADIUS_DIVISOR: f64 = 3.5;

/// Whether a preset name has a geometry generator.
pub fn is_supported_preset(name: &str) -> bool {
    PRESETS.contains_key(name)
}

/// Renders resolved shapes as positioned SVG fragments.
///
/// # Examples
///
/// ```
/// use slideshape::dispatch::{ShapeDispatcher, ShapeSource};
/// use slideshape::node::parse_shape_tree;
/// use slideshape::{RenderContext, RenderOptions, SvgShapeRenderer};
///
/// let xml = br#"<p:sld xmlns:p="urn:p" xmlns:a="urn:a"><p:cSld><p:spTree>
///   <p:sp><p:nvSpPr><p:cNvPr id="2" name="Box"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>
///     <p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="200" cy="100"/></a:xfrm>
///       <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
///       <a:solidFill><a:srgbClr val="FF0000"/></a:solidFill></p:spPr></p:sp>
/// </p:spTree></p:cSld></p:sld>"#;
///
/// let nodes = parse_shape_tree(xml)?;
/// let ctx = RenderContext::new(RenderOptions::new().with_unit_factor(1.0));
/// let renderer = SvgShapeRenderer::new();
/// let dispatcher = ShapeDispatcher::new(&ctx, &renderer);
///
/// let svg = dispatcher.dispatch_node(&nodes[0], None, ShapeSource::Slide, None);
/// assert!(svg.starts_with("<svg class='drawing' _id='2' _idx='' _type='obj' _name='Box'"));
/// assert!(svg.contains("<rect x='0' y='0' width='200' height='100' fill='#FF0000'"));
/// # Ok::<(), slideshape::ShapeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SvgShapeRenderer<P = CssPlacement> {
    placement: P,
}

impl SvgShapeRenderer<CssPlacement> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: Placement> SvgShapeRenderer<P> {
    pub fn with_placement(placement: P) -> Self {
        Self { placement }
    }

    #[inline]
    pub fn placement(&self) -> &P {
        &self.placement
    }
}

impl<P: Placement> ShapeRenderer for SvgShapeRenderer<P> {
    fn render_shape(&self, shape: &ResolvedShape<'_>, ctx: &RenderContext) -> String {
        // Layout/master placeholders only draw on the slide itself.
        if shape.user_drawn_background == Some(false) {
            return String::new();
        }

        let options = &ctx.options;
        let props = shape.properties(options.unit_factor);
        let chain = TransformChain::from(&props);
        let (w, h) = chain
            .first()
            .and_then(|t| t.extent)
            .map(|ext| {
                (
                    ext.cx as f64 * options.unit_factor,
                    ext.cy as f64 * options.unit_factor,
                )
            })
            .unwrap_or((props.width, props.height));

        let shape_id = shape.id.unwrap_or("");
        let fill = shape.node.fill();
        let color = fill_color(fill);
        let spec = FillSpec {
            image: matches!(fill, Some(Fill::Image)),
            gradient: matches!(fill, Some(Fill::Gradient)),
            shape_id,
            color: &color,
        };
        let border = border_of(shape.node.line(), options.unit_factor);

        let geometry = match shape.node.geometry() {
            Some(Geometry::Preset(prst)) => preset_markup(prst, w, h, &spec, &border),
            Some(Geometry::Custom) => {
                tracing::debug!(id = shape_id, "custom geometry left to caller");
                String::new()
            },
            None => String::new(),
        };

        let mut out = String::with_capacity(256 + geometry.len());
        out.push_str("<svg class='drawing' _id='");
        out.push_str(&escape_attr(shape_id));
        out.push_str("' _idx='");
        if let Some(idx) = shape.index {
            out.push_str(itoa::Buffer::new().format(idx));
        }
        out.push_str("' _type='");
        out.push_str(&escape_attr(shape.kind.unwrap_or("")));
        out.push_str("' _name='");
        out.push_str(&escape_attr(shape.name.unwrap_or("")));
        out.push_str("' style='");
        out.push_str(&self.placement.position_style(&chain, options));
        out.push_str(&self.placement.size_style(&chain, options));
        out.push_str(" z-index: ");
        out.push_str(itoa::Buffer::new().format(shape.order));
        out.push_str(";transform: rotate(");
        write_num_prec(&mut out, props.rotation, options.precision);
        out.push_str("deg)");
        out.push_str(props.flip.as_transform());
        out.push_str(";'>");
        out.push_str(&geometry);
        out.push_str("</svg>");
        out
    }
}

/// Markup for one preset, or an empty string when the preset has no
/// generator.
fn preset_markup(
    prst: &PresetGeometry,
    w: f64,
    h: f64,
    fill: &FillSpec<'_>,
    border: &Border,
) -> String {
    let Some(preset) = PRESETS.get(prst.preset.as_str()).copied() else {
        tracing::warn!(preset = prst.preset.as_str(), "unsupported preset geometry");
        return String::new();
    };

    match preset {
        Preset::Rect => primitives::rect(w, h, fill, border, None),
        Preset::Ellipse => primitives::ellipse(w, h, fill, border),
        Preset::Circle => primitives::circle(w, h, fill, border),
        Preset::Diamond => primitives::diamond(w, h, fill, border),
        Preset::Triangle => primitives::triangle(w, h, fill, border),
        Preset::Pentagon => primitives::pentagon(w, h, fill, border),
        Preset::Hexagon => primitives::hexagon(w, h, fill, border),
        Preset::Decorated => primitives::decorated_rect(w, h, fill, border, &prst.preset),
        Preset::Line => line_element(w, h, border),
        Preset::Corners {
            style,
            policy,
            defaults,
            mirrored,
        } => {
            let (adj1, adj2) = if prst.adjustments.is_empty() {
                defaults
            } else {
                (
                    adjust_factor(prst, &["adj1", "adj"]),
                    adjust_factor(prst, &["adj2"]),
                )
            };
            let d = parametric::round_snip_rect(w, h, adj1, adj2, style, policy);
            let transform = mirrored.then(|| {
                let mut t = String::from("translate(");
                write_num(&mut t, w);
                t.push_str(",0) scale(-1,1)");
                t
            });
            path_element(&d, transform.as_deref(), fill, border)
        },
        Preset::Pie {
            start,
            end,
            diameter_scale,
            closed,
        } => {
            let start = adjust_angle(prst, "adj1").unwrap_or(start);
            let end = adjust_angle(prst, "adj2").unwrap_or(end);
            let (d, transform) = parametric::pie(h * diameter_scale, w, start, end, closed);
            if closed {
                path_element(&d, Some(&transform), fill, border)
            } else {
                let none = FillSpec::solid(fill.shape_id, "none");
                path_element(&d, Some(&transform), &none, border)
            }
        },
        Preset::Chord => {
            let start = adjust_angle(prst, "adj1").unwrap_or(CHORD_DEFAULT.0);
            let end = adjust_angle(prst, "adj2").unwrap_or(CHORD_DEFAULT.1);
            let (rx, ry) = (w / 2.0, h / 2.0);
            let d = parametric::arc(rx, ry, rx, ry, start, end, true);
            path_element(&d, None, fill, border)
        },
        Preset::Gear(notches) => {
            let d = parametric::gear(h / GEAR_RADIUS_DIVISOR, notches);
            let centre = h * 3.0 / 7.0;
            let transform = rotate_transform(GEAR_ROTATION, centre, centre);
            path_element(&d, Some(&transform), fill, border)
        },
    }
}

/// First named handle as a factor (`val 50000` is 1.0); 0 when none of
/// the names has a numeric value.
fn adjust_factor(prst: &PresetGeometry, names: &[&str]) -> f64 {
    names
        .iter()
        .find_map(|name| prst.adjustment(name))
        .map(|v| v as f64 / ADJUST_UNITS_PER_FACTOR)
        .unwrap_or(0.0)
}

/// Angle handle in degrees, reduced into `[0, 360)`.
fn adjust_angle(prst: &PresetGeometry, name: &str) -> Option<f64> {
    prst.adjustment(name)
        .map(|v| angle_units_to_degrees(v).rem_euclid(360.0))
}

fn path_element(d: &str, transform: Option<&str>, fill: &FillSpec<'_>, border: &Border) -> String {
    let mut out = String::with_capacity(d.len() + 160);
    out.push_str("<path d='");
    out.push_str(d);
    out.push('\'');
    if let Some(t) = transform {
        out.push_str(" transform='");
        out.push_str(t);
        out.push('\'');
    }
    write_paint_attrs(&mut out, fill, border);
    out.push_str("/>");
    out
}

fn line_element(w: f64, h: f64, border: &Border) -> String {
    let mut out = String::with_capacity(128);
    out.push_str("<line x1='0' y1='0' x2='");
    write_num(&mut out, w);
    out.push_str("' y2='");
    write_num(&mut out, h);
    write_stroke_attrs(&mut out, border);
    out.push_str("/>");
    out
}

/// Literal fill color. Scheme colors are resolved outside this crate and
/// render as `none` here.
fn fill_color(fill: Option<&Fill>) -> String {
    match fill {
        Some(Fill::Solid(Some(hex))) => format!("#{}", hex),
        _ => "none".to_string(),
    }
}

/// Outline from `a:ln`. Shapes without a line element get a hairline in
/// black.
fn border_of(line: Option<&Line>, unit_factor: f64) -> Border {
    let Some(line) = line else {
        return Border::default();
    };
    let color = match &line.fill {
        Some(Fill::Solid(Some(hex))) => format!("#{}", hex),
        Some(Fill::None) => "none".to_string(),
        _ => "#000".to_string(),
    };
    let width = line
        .width
        .map(|w| w as f64 * unit_factor)
        .filter(|w| w.is_finite())
        .unwrap_or(1.0);
    let dash = line
        .dash
        .as_deref()
        .and_then(|d| DASH_ARRAYS.get(d).copied())
        .unwrap_or("0");
    Border::new(color, width, dash)
}
