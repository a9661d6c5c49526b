//! Conversion from XML to typed nodes.
//!
//! Works on local names only, so the same code reads slide, layout and
//! master shape trees (`p:`) as well as diagram drawings (`dsp:`).

use super::{
    Adjustment, ConnectorNode, DiagramDrawing, DiagramRelationIds, Extent, Fill, Geometry,
    GraphicFrameNode, Line, NonVisualProps, Offset, Placeholder, PresetGeometry, ShapeNode,
    SlideNode, Transform,
};
use crate::error::{Result, ShapeError};
use crate::xml::{Element, parse_document};

/// Parse the first shape tree (`spTree`) of a slide, layout, master or
/// drawing part.
///
/// Children other than shapes, connectors and graphic frames are skipped,
/// but still count towards `order` so z-order matches the document.
///
/// # Examples
///
/// ```
/// use slideshape::node::{parse_shape_tree, SlideNode};
///
/// let xml = br#"<p:sld xmlns:p="urn:p" xmlns:a="urn:a"><p:cSld><p:spTree>
///     <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/>
///     <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
/// </p:spTree></p:cSld></p:sld>"#;
///
/// let nodes = parse_shape_tree(xml)?;
/// assert!(matches!(&nodes[0], SlideNode::Shape(s) if s.nv.placeholder_type() == Some("title")));
/// # Ok::<(), slideshape::ShapeError>(())
/// ```
pub fn parse_shape_tree(xml: &[u8]) -> Result<Vec<SlideNode>> {
    let root = parse_document(xml)?;
    let tree = if root.name == "spTree" {
        &root
    } else {
        root.find("spTree")
            .ok_or_else(|| ShapeError::Xml("no spTree element".to_string()))?
    };
    Ok(tree_children(tree))
}

/// Parse a diagram drawing part (`dsp:drawing`) into its shapes.
pub fn parse_diagram_drawing(xml: &[u8]) -> Result<DiagramDrawing> {
    let shapes = parse_shape_tree(xml)?
        .into_iter()
        .filter_map(|node| match node {
            SlideNode::Shape(shape) => Some(shape),
            _ => None,
        })
        .collect();
    Ok(DiagramDrawing { shapes })
}

fn tree_children(tree: &Element) -> Vec<SlideNode> {
    tree.children
        .iter()
        .enumerate()
        .filter_map(|(i, el)| {
            let order = i as u32;
            match el.name.as_str() {
                "sp" => Some(SlideNode::Shape(shape_node(el, order))),
                "cxnSp" => Some(SlideNode::Connector(connector_node(el, order))),
                "graphicFrame" => Some(SlideNode::GraphicFrame(graphic_frame_node(el, order))),
                _ => None,
            }
        })
        .collect()
}

pub(crate) fn shape_node(el: &Element, order: u32) -> ShapeNode {
    let sp_pr = el.child("spPr");
    ShapeNode {
        nv: el.child("nvSpPr").map(non_visual).unwrap_or_default(),
        xfrm: sp_pr.and_then(|p| p.child("xfrm")).map(transform),
        geometry: sp_pr.and_then(geometry),
        text_xfrm: el.child("txXfrm").map(transform),
        fill: sp_pr.and_then(fill),
        line: sp_pr.and_then(|p| p.child("ln")).map(line),
        order,
    }
}

/// Connectors read their own `nvCxnSpPr` block.
pub(crate) fn connector_node(el: &Element, order: u32) -> ConnectorNode {
    let sp_pr = el.child("spPr");
    ConnectorNode {
        nv: el.child("nvCxnSpPr").map(non_visual).unwrap_or_default(),
        xfrm: sp_pr.and_then(|p| p.child("xfrm")).map(transform),
        geometry: sp_pr.and_then(geometry),
        line: sp_pr.and_then(|p| p.child("ln")).map(line),
        order,
    }
}

pub(crate) fn graphic_frame_node(el: &Element, order: u32) -> GraphicFrameNode {
    let rel_ids = el
        .path(&["graphic", "graphicData", "relIds"])
        .map(|ids| DiagramRelationIds {
            colors: ids.attr("cs").unwrap_or_default().to_string(),
            data: ids.attr("dm").unwrap_or_default().to_string(),
            layout: ids.attr("lo").unwrap_or_default().to_string(),
            quick_style: ids.attr("qs").unwrap_or_default().to_string(),
        });
    GraphicFrameNode {
        nv: el.child("nvGraphicFramePr").map(non_visual).unwrap_or_default(),
        xfrm: el.child("xfrm").map(transform),
        rel_ids,
        order,
    }
}

/// Read the `nvSpPr`-style block: `cNvPr`, the `cNv*Pr` sibling and `nvPr`.
fn non_visual(el: &Element) -> NonVisualProps {
    let c_nv_pr = el.child("cNvPr");
    let is_text_box = el
        .children
        .iter()
        .find(|c| c.name.starts_with("cNv") && c.name != "cNvPr")
        .and_then(|c| c.attr("txBox"))
        .is_some_and(|v| v == "1" || v == "true");
    let nv_pr = el.child("nvPr");
    let placeholder = nv_pr.and_then(|p| p.child("ph")).map(|ph| Placeholder {
        index: ph.attr("idx").and_then(|v| v.parse().ok()),
        kind: ph.attr("type").map(str::to_string),
    });

    NonVisualProps {
        id: c_nv_pr.and_then(|c| c.attr("id")).map(str::to_string),
        name: c_nv_pr.and_then(|c| c.attr("name")).map(str::to_string),
        placeholder,
        is_text_box,
        user_drawn: nv_pr.and_then(|p| p.attr("userDrawn")).map(str::to_string),
    }
}

fn transform(el: &Element) -> Transform {
    let int = |e: &Element, name: &str| e.attr(name).and_then(|v| v.parse::<i64>().ok());
    let flag = |name: &str| el.attr(name).is_some_and(|v| v == "1" || v == "true");

    Transform {
        offset: el.child("off").map(|off| Offset {
            x: int(off, "x").unwrap_or(0),
            y: int(off, "y").unwrap_or(0),
        }),
        extent: el.child("ext").map(|ext| Extent {
            cx: int(ext, "cx").unwrap_or(0),
            cy: int(ext, "cy").unwrap_or(0),
        }),
        rotation: int(el, "rot"),
        flip_h: flag("flipH"),
        flip_v: flag("flipV"),
    }
}

fn geometry(sp_pr: &Element) -> Option<Geometry> {
    if let Some(prst) = sp_pr.child("prstGeom") {
        let adjustments = prst
            .child("avLst")
            .map(|av| {
                av.children_named("gd")
                    .map(|gd| Adjustment {
                        name: gd.attr("name").unwrap_or_default().to_string(),
                        formula: gd.attr("fmla").unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        return Some(Geometry::Preset(PresetGeometry {
            preset: prst.attr("prst").unwrap_or_default().to_string(),
            adjustments,
        }));
    }
    sp_pr.child("custGeom").map(|_| Geometry::Custom)
}

fn fill(el: &Element) -> Option<Fill> {
    el.children.iter().find_map(|c| match c.name.as_str() {
        "noFill" => Some(Fill::None),
        "solidFill" => Some(Fill::Solid(
            c.child("srgbClr")
                .and_then(|clr| clr.attr("val"))
                .and_then(hex_color),
        )),
        "gradFill" => Some(Fill::Gradient),
        "blipFill" => Some(Fill::Image),
        _ => None,
    })
}

/// A `srgbClr/@val`, accepted only as six hex digits.
fn hex_color(val: &str) -> Option<String> {
    (val.len() == 6 && val.bytes().all(|b| b.is_ascii_hexdigit())).then(|| val.to_string())
}

fn line(ln: &Element) -> Line {
    Line {
        width: ln.attr("w").and_then(|v| v.parse().ok()),
        fill: fill(ln),
        dash: ln
            .child("prstDash")
            .and_then(|d| d.attr("val"))
            .map(str::to_string),
    }
}
