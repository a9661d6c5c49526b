//! Slideshape - presentation shape resolution and SVG geometry
//!
//! This library turns PresentationML shapes into SVG markup. It resolves the
//! placeholder inheritance cascade (slide, layout, master), computes preset
//! geometry from adjustment handles, and expands SmartArt diagrams whose parts
//! are loaded asynchronously.
//!
//! # Features
//!
//! - **Typed nodes**: shape trees are parsed once with quick-xml into typed
//!   nodes; rendering never reads raw attributes
//! - **Placeholder inheritance**: index and type lookups across layout and
//!   master tables
//! - **Preset geometry**: rectangles, ellipses, regular polygons, flow-chart
//!   decorations, pies, gears, arcs and round/snip rectangles
//! - **Diagram expansion**: the four diagram parts are loaded concurrently
//!   through a pluggable [`opc::PartReader`]
//!
//! # Example - Rendering a slide shape tree
//!
//! ```
//! use slideshape::{InheritanceTables, RenderContext, RenderOptions, ShapeDispatcher,
//!     ShapeSource, SvgShapeRenderer};
//! use slideshape::node::parse_shape_tree;
//!
//! # fn main() -> Result<(), slideshape::ShapeError> {
//! let layout = br#"<p:sldLayout xmlns:p="urn:p" xmlns:a="urn:a"><p:cSld><p:spTree>
//!   <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/>
//!     <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr>
//!     <p:spPr><a:xfrm><a:off x="457200" y="274638"/><a:ext cx="8229600" cy="1143000"/></a:xfrm>
//!       <a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:sp>
//! </p:spTree></p:cSld></p:sldLayout>"#;
//!
//! let slide = br#"<p:sld xmlns:p="urn:p" xmlns:a="urn:a"><p:cSld><p:spTree>
//!   <p:sp><p:nvSpPr><p:cNvPr id="2" name="Title 1"/><p:cNvSpPr/>
//!     <p:nvPr><p:ph type="title"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>
//! </p:spTree></p:cSld></p:sld>"#;
//!
//! let ctx = RenderContext::new(RenderOptions::default())
//!     .with_layout_tables(InheritanceTables::from_part_xml(layout)?);
//! let renderer = SvgShapeRenderer::new();
//! let dispatcher = ShapeDispatcher::new(&ctx, &renderer);
//!
//! for node in parse_shape_tree(slide)? {
//!     let svg = dispatcher.dispatch_node(&node, None, ShapeSource::Slide, None);
//!     // The title inherits its placement from the layout.
//!     assert!(svg.contains("_type='title'"));
//!     assert!(svg.contains("top:28.83px; left:48px;"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Expanding a diagram
//!
//! ```no_run
//! use slideshape::opc::{DirectoryPartReader, ResourceMap};
//! use slideshape::{CssPlacement, RenderContext, RenderOptions, ShapeDispatcher, ShapeSource,
//!     SvgShapeRenderer};
//! use slideshape::node::{SlideNode, parse_shape_tree};
//!
//! # async fn run() -> Result<(), slideshape::ShapeError> {
//! let reader = DirectoryPartReader::new("extracted-deck");
//! let rels = tokio::fs::read("extracted-deck/ppt/slides/_rels/slide1.xml.rels").await?;
//! let resources = ResourceMap::from_rels_xml(&rels, "/ppt/slides")?;
//! let drawing = slideshape::diagram::load_diagram_drawing(&resources, &reader).await?;
//!
//! let mut ctx = RenderContext::new(RenderOptions::default()).with_resources(resources);
//! ctx.diagram_drawing = drawing;
//!
//! let renderer = SvgShapeRenderer::new();
//! let dispatcher = ShapeDispatcher::new(&ctx, &renderer);
//! let slide = tokio::fs::read("extracted-deck/ppt/slides/slide1.xml").await?;
//! for node in parse_shape_tree(&slide)? {
//!     if let SlideNode::GraphicFrame(frame) = &node {
//!         let html = dispatcher
//!             .expand_diagram(frame, ShapeSource::Slide, None, &reader, &CssPlacement)
//!             .await?;
//!         println!("{html}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Render configuration and session inputs
pub mod context;

/// SmartArt diagram expansion
pub mod diagram;

/// Placeholder inheritance and renderer hand-off
pub mod dispatch;

pub mod error;

/// Preset geometry generators
pub mod geometry;

/// Typed shape-tree nodes and their XML parse boundary
pub mod node;

/// Part names, relationships and part readers
pub mod opc;

pub mod props;

/// Default SVG renderer and CSS placement
pub mod render;

pub mod unit;

pub mod xml;

pub use context::{InheritanceTables, RenderContext, RenderOptions};
pub use dispatch::{ResolvedShape, ShapeDispatcher, ShapeRenderer, ShapeSource};
pub use error::{Result, ShapeError};
pub use node::{ShapeNode, SlideNode};
pub use props::{Flip, ResolvedShapeProperties};
pub use render::{CssPlacement, Placement, SvgShapeRenderer};
