//! SmartArt diagram expansion.
//!
//! A diagram frame on a slide references four parts (colors, data, layout,
//! quick style) by relationship id, plus a pre-rendered drawing. Expansion
//! loads the four parts concurrently, then renders the drawing's shapes
//! through the dispatcher inside one positioned container.

use crate::context::RenderContext;
use crate::dispatch::{ShapeDispatcher, ShapeRenderer, ShapeSource};
use crate::error::Result;
use crate::node::{DiagramDrawing, DiagramRelationIds, GraphicFrameNode, parse_diagram_drawing};
use crate::opc::{PartReader, ResourceMap, reltype};
use crate::render::{Placement, TransformChain};
use crate::xml::{Element, parse_document};

/// SmartArt diagram family, derived from the layout definition id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramType {
    List,
    Process,
    Cycle,
    Hierarchy,
    Relationship,
    Matrix,
    Pyramid,
    Picture,
    Unknown,
}

/// Layout name fragments per family, checked in order.
const LAYOUT_FAMILIES: &[(&[&str], DiagramType)] = &[
    (&["list"], DiagramType::List),
    (&["process"], DiagramType::Process),
    (&["cycle"], DiagramType::Cycle),
    (&["hierarchy", "orgchart"], DiagramType::Hierarchy),
    (&["relationship", "venn"], DiagramType::Relationship),
    (&["matrix"], DiagramType::Matrix),
    (&["pyramid"], DiagramType::Pyramid),
    (&["picture"], DiagramType::Picture),
];

impl DiagramType {
    /// Classify a layout definition by its `uniqueId`, e.g.
    /// `urn:microsoft.com/office/officeart/2005/8/layout/process1`.
    ///
    /// Only the last path segment (the layout name) is inspected.
    pub fn from_layout_id(unique_id: &str) -> Self {
        let name = unique_id
            .rsplit('/')
            .next()
            .unwrap_or(unique_id)
            .to_ascii_lowercase();
        LAYOUT_FAMILIES
            .iter()
            .find(|(fragments, _)| fragments.iter().any(|f| name.contains(f)))
            .map(|&(_, family)| family)
            .unwrap_or(DiagramType::Unknown)
    }
}

/// Summary of the four loaded diagram parts.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramParts {
    /// `uniqueId` of the color definition
    pub colors_id: Option<String>,
    /// `uniqueId` of the layout definition
    pub layout_id: Option<String>,
    /// `uniqueId` of the quick style definition
    pub quick_style_id: Option<String>,
    pub diagram_type: DiagramType,
    /// Text of each content point of the data model, in document order
    pub items: Vec<String>,
}

impl DiagramParts {
    /// Build the summary from the raw part contents.
    pub fn from_parts(colors: &[u8], data: &[u8], layout: &[u8], quick_style: &[u8]) -> Result<Self> {
        let layout_id = unique_id(layout)?;
        let diagram_type = layout_id
            .as_deref()
            .map(DiagramType::from_layout_id)
            .unwrap_or(DiagramType::Unknown);

        Ok(Self {
            colors_id: unique_id(colors)?,
            layout_id,
            quick_style_id: unique_id(quick_style)?,
            diagram_type,
            items: data_items(&parse_document(data)?),
        })
    }
}

fn unique_id(xml: &[u8]) -> Result<Option<String>> {
    Ok(parse_document(xml)?.attr("uniqueId").map(str::to_string))
}

/// Text of content points (`dgm:pt` without a type, or of type `node`).
fn data_items(model: &Element) -> Vec<String> {
    let Some(points) = model.child("ptLst") else {
        return Vec::new();
    };
    points
        .children_named("pt")
        .filter(|pt| matches!(pt.attr("type"), None | Some("node")))
        .filter_map(|pt| {
            let mut text = String::new();
            collect_runs(pt, &mut text);
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect()
}

/// Concatenate the leaf `t` elements (`a:t` runs) below `el`.
fn collect_runs(el: &Element, out: &mut String) {
    for child in &el.children {
        if child.name == "t" && child.children.is_empty() {
            out.push_str(&child.text);
        } else {
            collect_runs(child, out);
        }
    }
}

/// Resolve the four relationship ids and load the parts concurrently.
///
/// All four loads must succeed; the first failure is returned.
pub async fn load_diagram_parts<R: PartReader>(
    resources: &ResourceMap,
    ids: &DiagramRelationIds,
    reader: &R,
) -> Result<DiagramParts> {
    let colors = resources.target(&ids.colors)?;
    let data = resources.target(&ids.data)?;
    let layout = resources.target(&ids.layout)?;
    let quick_style = resources.target(&ids.quick_style)?;

    let (colors, data, layout, quick_style) = tokio::try_join!(
        reader.read_part(colors),
        reader.read_part(data),
        reader.read_part(layout),
        reader.read_part(quick_style),
    )?;

    DiagramParts::from_parts(&colors, &data, &layout, &quick_style)
}

/// Load and parse the pre-rendered drawing referenced from a slide, if the
/// slide has one.
pub async fn load_diagram_drawing<R: PartReader>(
    resources: &ResourceMap,
    reader: &R,
) -> Result<Option<DiagramDrawing>> {
    let Some(target) = resources.target_by_type(reltype::DIAGRAM_DRAWING) else {
        return Ok(None);
    };
    let xml = reader.read_part(target).await?;
    parse_diagram_drawing(&xml).map(Some)
}

impl<'a, R: ShapeRenderer + ?Sized> ShapeDispatcher<'a, R> {
    /// Expand a diagram frame.
    ///
    /// Frames without `dgm:relIds` produce empty markup without touching
    /// `reader`. Otherwise the four parts are loaded, and the shapes of
    /// [`RenderContext::diagram_drawing`] are rendered with
    /// [`ShapeSource::DiagramBg`] inside
    /// `<div class='block diagram-content'>` placed at the frame's own
    /// transform.
    pub async fn expand_diagram<P, L>(
        &self,
        node: &GraphicFrameNode,
        source: ShapeSource,
        subtype: Option<&str>,
        reader: &P,
        placement: &L,
    ) -> Result<String>
    where
        P: PartReader,
        L: Placement + ?Sized,
    {
        let Some(ids) = node.rel_ids.as_ref() else {
            return Ok(String::new());
        };

        let ctx: &RenderContext = self.ctx;
        let parts = load_diagram_parts(&ctx.resources, ids, reader).await?;
        tracing::debug!(
            id = node.nv.id.as_deref(),
            %source,
            diagram_type = ?parts.diagram_type,
            items = parts.items.len(),
            "diagram parts loaded"
        );

        let chain = TransformChain::own(node.xfrm.as_ref());
        let mut out = String::with_capacity(256);
        out.push_str("<div class='block diagram-content' style='");
        out.push_str(&placement.position_style(&chain, &ctx.options));
        out.push_str(&placement.size_style(&chain, &ctx.options));
        out.push_str("'>");

        match &ctx.diagram_drawing {
            Some(drawing) => {
                for shape in &drawing.shapes {
                    out.push_str(&self.dispatch_shape(
                        shape,
                        Some(node),
                        ShapeSource::DiagramBg,
                        subtype,
                    ));
                }
            },
            None => {
                tracing::warn!(id = node.nv.id.as_deref(), "diagram has no drawing attached");
            },
        }

        out.push_str("</div>");
        Ok(out)
    }
}
