// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt::{self, Write as _};

use crate::model::{
    BrandMark, Edge, Halo, LineStyle, Motion, Node, NodeIcon, Position, Size,
};
use crate::resolve::ResolvedView;

use super::route::{view_paths, EdgePath};
use super::{legend_line, tone};

const MARGIN: i32 = 80;
const LEGEND_BAND: i32 = 40;

const BACKGROUND: &str = "#0a0a0a";
const PANEL_FILL: &str = "#171717";
const EDGE_STROKE: &str = "#a3a3a3";
const PORT_FILL: &str = "#e5e5e5";
const HIGHLIGHT: &str = "#facc15";
const TEXT_PRIMARY: &str = "#ffffff";
const TEXT_SECONDARY: &str = "#d4d4d4";
const TEXT_MUTED: &str = "#a3a3a3";
const TEXT_ICON: &str = "#f5f5f5";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvgOptions {
    /// Canvas size; derived from the view's bounding box when `None`.
    pub size: Option<Size>,
    /// Id of the node or edge to highlight.
    pub selection: Option<String>,
    pub legend: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SvgRenderError {
    #[error("view `{view_id}` has no nodes to render")]
    EmptyView { view_id: String },
    #[error("failed to format SVG output")]
    Fmt(#[from] fmt::Error),
}

/// Renders a resolved view as a standalone SVG document.
pub fn render_svg(view: &ResolvedView, options: &SvgOptions) -> Result<String, SvgRenderError> {
    let bounds = view.bounds().ok_or_else(|| SvgRenderError::EmptyView {
        view_id: view.view_id().to_string(),
    })?;
    let legend = if options.legend { legend_line(view) } else { None };
    // The canvas starts at the page origin unless nodes sit left of or above it.
    let origin = Position::new(
        (bounds.min.x - MARGIN).min(0),
        (bounds.min.y - MARGIN).min(0),
    );
    let size = options.size.unwrap_or_else(|| {
        let band = if legend.is_some() { LEGEND_BAND } else { 0 };
        Size::new(
            bounds.max.x + MARGIN - origin.x,
            bounds.max.y + MARGIN + band - origin.y,
        )
    });
    let selection = options.selection.as_deref();

    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" width="{w}" height="{h}" font-family="ui-sans-serif, system-ui, sans-serif">"#,
        x = origin.x,
        y = origin.y,
        w = size.w,
        h = size.h
    )?;
    writeln!(out, "  <title>{}</title>", escape(view.name()))?;
    writeln!(out, "  <defs>")?;
    writeln!(
        out,
        r#"    <marker id="arrowHead" markerWidth="10" markerHeight="10" refX="6" refY="3" orient="auto" markerUnits="strokeWidth"><path d="M0,0 L0,6 L9,3 z" fill="{TEXT_SECONDARY}"/></marker>"#
    )?;
    writeln!(out, "  </defs>")?;
    writeln!(
        out,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{BACKGROUND}"/>"#,
        origin.x, origin.y, size.w, size.h
    )?;

    for node in view.nodes() {
        let selected = selection == Some(node.id().as_str());
        write_node(&mut out, node, selected)?;
    }

    for (edge, path) in view_paths(view) {
        let selected = selection == Some(edge.id().as_str());
        write_edge(&mut out, edge, &path, selected)?;
    }

    if let Some(legend) = legend {
        writeln!(
            out,
            r#"  <text x="{}" y="{}" fill="{TEXT_SECONDARY}" font-size="12">{}</text>"#,
            origin.x + MARGIN,
            origin.y + size.h - 30,
            escape(&legend)
        )?;
    }

    out.push_str("</svg>\n");
    Ok(out)
}

fn write_node(out: &mut String, node: &Node, selected: bool) -> fmt::Result {
    let tone = tone(node.category());
    let Position { x, y } = node.position();
    let Size { w, h } = node.size();

    writeln!(out, r#"  <g data-node-id="{}">"#, escape(node.id().as_str()))?;

    match node.halo() {
        Halo::None => {}
        Halo::Static => {
            writeln!(
                out,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="16" fill="none" stroke="{}" stroke-width="8" opacity="0.18"/>"#,
                x - 6,
                y - 6,
                w + 12,
                h + 12,
                tone.stroke
            )?;
        }
        Halo::Pulse(delay_ms) => {
            writeln!(
                out,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="16" fill="none" stroke="{}" stroke-width="8" opacity="0.18"><animate attributeName="opacity" values="0.18;0.36;0.18" dur="2.6s" begin="{delay_ms}ms" repeatCount="indefinite"/></rect>"#,
                x - 6,
                y - 6,
                w + 12,
                h + 12,
                tone.stroke
            )?;
        }
    }

    if node.halo() == Halo::None {
        write_card(out, node, tone.soft, selected)?;
    } else {
        write_panel(out, node, tone.stroke, selected)?;
    }

    writeln!(out, "  </g>")
}

/// Top-level box: icon disc, centred title and subtitle, detail list, caption.
fn write_panel(out: &mut String, node: &Node, stroke: &str, selected: bool) -> fmt::Result {
    let Position { x, y } = node.position();
    let Size { w, h } = node.size();
    let (stroke, width) = if selected {
        (HIGHLIGHT, 3.0)
    } else {
        (stroke, 1.8)
    };

    writeln!(
        out,
        r#"    <rect x="{x}" y="{y}" width="{w}" height="{h}" rx="14" fill="{PANEL_FILL}" stroke="{stroke}" stroke-width="{width}"/>"#
    )?;

    if let Some(icon) = node.icon() {
        write_icon(out, icon, Position::new(x + 18, y + 20), stroke)?;
    }

    writeln!(
        out,
        r#"    <text x="{}" y="{}" fill="{TEXT_PRIMARY}" font-size="16" font-weight="700" text-anchor="middle">{}</text>"#,
        x + w / 2,
        y + 28,
        escape(node.title())
    )?;
    if let Some(subtitle) = node.subtitle() {
        writeln!(
            out,
            r#"    <text x="{}" y="{}" fill="{TEXT_SECONDARY}" font-size="12" text-anchor="middle">{}</text>"#,
            x + w / 2,
            y + 50,
            escape(subtitle)
        )?;
    }

    let first = if node.subtitle().is_some() { 92 } else { 70 };
    for (i, detail) in node.details().iter().enumerate() {
        writeln!(
            out,
            r#"    <text x="{}" y="{}" fill="{TEXT_SECONDARY}" font-size="13">{}</text>"#,
            x + 16,
            y + first + 24 * i as i32,
            escape(detail)
        )?;
    }

    if let Some(caption) = node.caption() {
        writeln!(
            out,
            r#"    <text x="{}" y="{}" fill="{TEXT_MUTED}" font-size="11">{}</text>"#,
            x + 12,
            y + h - 10,
            escape(caption)
        )?;
    }
    Ok(())
}

/// Component nested inside a panel: left-aligned title, glyph prefix, no icon disc.
fn write_card(out: &mut String, node: &Node, stroke: &str, selected: bool) -> fmt::Result {
    let Position { x, y } = node.position();
    let Size { w, h } = node.size();
    let (stroke, width) = if selected {
        (HIGHLIGHT, 3.0)
    } else {
        (stroke, 1.2)
    };

    writeln!(
        out,
        r#"    <rect x="{x}" y="{y}" width="{w}" height="{h}" rx="12" fill="{PANEL_FILL}" stroke="{stroke}" stroke-width="{width}"/>"#
    )?;

    let title = match node.icon() {
        Some(NodeIcon::Glyph(glyph)) => format!("{glyph} {}", node.title()),
        _ => node.title().to_owned(),
    };
    writeln!(
        out,
        r#"    <text x="{}" y="{}" fill="{TEXT_PRIMARY}" font-size="13" font-weight="600">{}</text>"#,
        x + 12,
        y + 26,
        escape(&title)
    )?;
    if let Some(subtitle) = node.subtitle() {
        writeln!(
            out,
            r#"    <text x="{}" y="{}" fill="{TEXT_SECONDARY}" font-size="11">{}</text>"#,
            x + 12,
            y + 48,
            escape(subtitle)
        )?;
    }
    Ok(())
}

fn write_icon(out: &mut String, icon: &NodeIcon, center: Position, stroke: &str) -> fmt::Result {
    let Position { x: cx, y: cy } = center;
    writeln!(
        out,
        r#"    <circle cx="{cx}" cy="{cy}" r="10" fill="{PANEL_FILL}" stroke="{stroke}" stroke-width="1.6"/>"#
    )?;

    match icon {
        NodeIcon::Glyph(glyph) => writeln!(
            out,
            r#"    <text x="{cx}" y="{}" fill="{TEXT_ICON}" font-size="11" text-anchor="middle">{}</text>"#,
            cy + 4,
            escape(glyph)
        ),
        NodeIcon::Brand(mark) => {
            writeln!(
                out,
                r#"    <g fill="none" stroke="{stroke}" stroke-width="1.4">"#
            )?;
            match mark {
                BrandMark::Ethereum => {
                    writeln!(
                        out,
                        r#"      <polygon points="{cx},{} {},{cy} {cx},{} {},{cy}"/>"#,
                        cy - 7,
                        cx + 5,
                        cy + 2,
                        cx - 5
                    )?;
                    writeln!(
                        out,
                        r#"      <polygon points="{cx},{} {},{} {cx},{} {},{}"/>"#,
                        cy + 3,
                        cx + 5,
                        cy + 6,
                        cy + 10,
                        cx - 5,
                        cy + 6
                    )?;
                }
                BrandMark::Fabric => {
                    // Four small squares in a 2x2 grid.
                    let (s, g) = (3, 2);
                    for (sx, sy) in [
                        (cx - s - g, cy - s - g),
                        (cx + g, cy - s - g),
                        (cx - s - g, cy + g),
                        (cx + g, cy + g),
                    ] {
                        writeln!(
                            out,
                            r#"      <rect x="{sx}" y="{sy}" width="{s}" height="{s}"/>"#
                        )?;
                    }
                }
                BrandMark::Adi => {
                    writeln!(
                        out,
                        r#"      <path d="M {cx},{} L {},{} L {},{} Z"/>"#,
                        cy - 7,
                        cx - 6,
                        cy + 7,
                        cx + 6,
                        cy + 7
                    )?;
                    writeln!(
                        out,
                        r#"      <line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
                        cx - 3,
                        cy + 1,
                        cx + 3,
                        cy + 1
                    )?;
                }
            }
            writeln!(out, "    </g>")
        }
    }
}

fn write_edge(out: &mut String, edge: &Edge, path: &EdgePath, selected: bool) -> fmt::Result {
    let style = edge.style();
    let (stroke, width) = if selected {
        (HIGHLIGHT, 2.4)
    } else {
        (EDGE_STROKE, 1.6)
    };

    writeln!(out, r#"  <g data-edge-id="{}">"#, escape(edge.id().as_str()))?;

    let mut attrs = String::new();
    match (style.line, style.motion) {
        (LineStyle::Dashed, _) => attrs.push_str(r#" stroke-dasharray="6 4""#),
        (LineStyle::Solid, Motion::Animated) => attrs.push_str(r#" stroke-dasharray="10 4""#),
        (LineStyle::Solid, Motion::Static) => {}
    }
    write!(
        out,
        r#"    <path d="{}" fill="none" stroke="{stroke}" stroke-width="{width}"{attrs} marker-end="url(#arrowHead)""#,
        path.svg_data()
    )?;
    match style.motion {
        Motion::Static => writeln!(out, "/>")?,
        Motion::Animated => writeln!(
            out,
            r#"><animate attributeName="stroke-dashoffset" from="28" to="0" dur="1.2s" repeatCount="indefinite"/></path>"#
        )?,
    }

    for Position { x, y } in [path.start(), path.end()] {
        writeln!(
            out,
            r#"    <circle cx="{x}" cy="{y}" r="3.5" fill="{PORT_FILL}"/>"#
        )?;
    }

    if let Some(label) = edge.display_label() {
        let Position { x, y } = path.label_anchor;
        let anchor = edge.label_placement().anchor.as_svg();
        write!(
            out,
            r#"    <text x="{x}" y="{y}" fill="{TEXT_SECONDARY}" font-size="11" text-anchor="{anchor}">{}"#,
            escape(&label)
        )?;
        for line in edge.label().map(|label| label.lines()).unwrap_or_default() {
            write!(
                out,
                r#"<tspan x="{x}" dy="14" fill="{TEXT_MUTED}">{}</tspan>"#,
                escape(line)
            )?;
        }
        writeln!(out, "</text>")?;
    }

    writeln!(out, "  </g>")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
