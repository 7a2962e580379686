// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{Halo, Node, Position, TextAnchor};
use crate::resolve::ResolvedView;

use super::route::view_paths;
use super::{legend_line, Grid};

/// Upper bound on grid cells; a bad cell size should fail, not allocate gigabytes.
const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    /// Pixels per character column.
    pub cell_width: i32,
    /// Pixels per character row.
    pub cell_height: i32,
    pub legend: bool,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            cell_width: 10,
            cell_height: 20,
            legend: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextRenderError {
    #[error("cell size must be positive, got {width}x{height} px")]
    InvalidCellSize { width: i32, height: i32 },
    #[error("view `{view_id}` has no nodes to render")]
    EmptyView { view_id: String },
    #[error("text canvas too large: {columns}x{rows} cells")]
    TooLarge { columns: usize, rows: usize },
}

#[derive(Debug, Clone, Copy)]
struct Projection {
    origin_x: i64,
    origin_y: i64,
    cell_width: i64,
    cell_height: i64,
}

impl Projection {
    /// One blank cell of margin on every side of the view's bounding box.
    fn new(min: Position, options: &TextOptions) -> Self {
        let cell_width = i64::from(options.cell_width);
        let cell_height = i64::from(options.cell_height);
        Self {
            origin_x: i64::from(min.x) - cell_width,
            origin_y: i64::from(min.y) - cell_height,
            cell_width,
            cell_height,
        }
    }

    fn col(&self, x: i32) -> i64 {
        (i64::from(x) - self.origin_x).div_euclid(self.cell_width)
    }

    fn row(&self, y: i32) -> i64 {
        (i64::from(y) - self.origin_y).div_euclid(self.cell_height)
    }

    fn point(&self, p: Position) -> (i64, i64) {
        (self.col(p.x), self.row(p.y))
    }
}

/// Renders a resolved view as Unicode box-drawing text.
pub fn render_text(view: &ResolvedView, options: &TextOptions) -> Result<String, TextRenderError> {
    if options.cell_width <= 0 || options.cell_height <= 0 {
        return Err(TextRenderError::InvalidCellSize {
            width: options.cell_width,
            height: options.cell_height,
        });
    }

    let bounds = view.bounds().ok_or_else(|| TextRenderError::EmptyView {
        view_id: view.view_id().to_string(),
    })?;

    let projection = Projection::new(bounds.min, options);
    let columns = usize::try_from(projection.col(bounds.max.x) + 2).unwrap_or(0);
    let legend = if options.legend { legend_line(view) } else { None };
    let legend_rows = if legend.is_some() { 2 } else { 0 };
    let rows = usize::try_from(projection.row(bounds.max.y) + 2).unwrap_or(0) + legend_rows;

    let too_large = TextRenderError::TooLarge { columns, rows };
    match columns.checked_mul(rows) {
        Some(cells) if cells <= MAX_CELLS => {}
        _ => return Err(too_large),
    }
    let mut grid = Grid::new(columns, rows).ok_or(too_large)?;

    for node in view.nodes() {
        draw_node(&mut grid, &projection, node);
    }

    let paths = view_paths(view);
    for (_, path) in &paths {
        let points = path.points.map(|p| projection.point(p));
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            if (x0, y0) == (x1, y1) {
                continue;
            }
            if y0 == y1 {
                grid.hline(x0, x1, y0);
            } else {
                grid.vline(x0, y0, y1);
            }
        }
        if let Some(head) = arrow_head(&points) {
            let (x, y) = points[3];
            grid.put(x, y, head);
        }
    }

    for (edge, path) in &paths {
        let Some(label) = edge.display_label() else {
            continue;
        };
        let (x, y) = projection.point(path.label_anchor);
        let len = label.chars().count() as i64;
        let x = match edge.label_placement().anchor {
            TextAnchor::Start => x,
            TextAnchor::Middle => x - len / 2,
            TextAnchor::End => x - len,
        };
        grid.write_str(x, y, &label);
    }

    if let Some(legend) = legend {
        grid.write_str(1, rows as i64 - 1, &legend);
    }

    Ok(grid.to_string())
}

/// Character cell (column, row) that `point` lands on in [`render_text`] output.
pub fn text_cell(view: &ResolvedView, options: &TextOptions, point: Position) -> Option<(i64, i64)> {
    if options.cell_width <= 0 || options.cell_height <= 0 {
        return None;
    }
    let bounds = view.bounds()?;
    Some(Projection::new(bounds.min, options).point(point))
}

fn draw_node(grid: &mut Grid, projection: &Projection, node: &Node) {
    let bounds = node.bounds();
    let (x0, y0) = projection.point(bounds.min);
    let x1 = (projection.col(bounds.max.x) - 1).max(x0 + 2);
    let y1 = (projection.row(bounds.max.y) - 1).max(y0 + 2);

    grid.clear_rect(x0, y0, x1, y1);
    grid.draw_box(x0, y0, x1, y1);

    let inner = usize::try_from(x1 - x0 - 3).unwrap_or(0);
    let panel = node.halo() != Halo::None;
    let mut row = y0 + 1;

    let mut line = |grid: &mut Grid, row: i64, text: &str, centered: bool| {
        let text = fit(text, inner);
        let x = if centered {
            let pad = inner.saturating_sub(text.chars().count()) / 2;
            x0 + 2 + pad as i64
        } else {
            x0 + 2
        };
        grid.write_str(x, row, &text);
    };

    line(grid, row, node.title(), panel);
    row += 1;

    if let Some(subtitle) = node.subtitle() {
        if row < y1 {
            line(grid, row, subtitle, panel);
            row += 1;
        }
    }

    let caption_row = node.caption().map(|_| y1 - 1);
    let mut detail_row = row + 1;
    for detail in node.details() {
        if detail_row >= y1 || Some(detail_row) == caption_row {
            break;
        }
        line(grid, detail_row, strip_glyph(detail), false);
        detail_row += 1;
    }

    if let (Some(caption), Some(caption_row)) = (node.caption(), caption_row) {
        if caption_row >= row {
            line(grid, caption_row, caption, false);
        }
    }
}

fn arrow_head(points: &[(i64, i64); 4]) -> Option<char> {
    points.windows(2).rev().find_map(|pair| {
        let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
        match (x1.cmp(&x0), y1.cmp(&y0)) {
            (std::cmp::Ordering::Greater, _) => Some('▶'),
            (std::cmp::Ordering::Less, _) => Some('◀'),
            (_, std::cmp::Ordering::Greater) => Some('▼'),
            (_, std::cmp::Ordering::Less) => Some('▲'),
            _ => None,
        }
    })
}

/// Truncates to `width` characters, marking the cut with `…`.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = text.chars().take(width - 1).collect::<String>();
    out.push('…');
    out
}

/// Drops a leading pictograph token ("📄 Khasra P2" -> "Khasra P2"); emoji are double width in
/// most terminals and would shift the box border.
fn strip_glyph(text: &str) -> &str {
    match text.split_once(' ') {
        Some((head, rest)) if !head.chars().any(char::is_alphanumeric) => rest,
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{fit, render_text, strip_glyph, text_cell, TextOptions, TextRenderError};
    use crate::model::fixtures::{nid, vid};
    use crate::model::{Catalog, Node, NodeCategory, Position, Size, View, ViewTable, COORD_LIMIT};
    use crate::atlas::Atlas;
    use crate::builtin;
    use crate::model::fixtures::{abc_catalog, abc_views};

    #[test]
    fn renders_edge_with_label_and_arrow_between_boxes() {
        let atlas = Atlas::new(abc_catalog(), abc_views()).expect("atlas");
        let view = atlas.resolve("full").expect("resolve");
        let text = render_text(&view, &TextOptions::default()).expect("render");

        assert!(text.contains("│────a-b───▶ B"), "{text}");
        assert!(text.contains("┌────────┐"), "{text}");
    }

    #[test]
    fn text_cell_matches_rendered_box_corner() {
        let atlas = Atlas::new(abc_catalog(), abc_views()).expect("atlas");
        let view = atlas.resolve("full").expect("resolve");
        let options = TextOptions::default();

        assert_eq!(text_cell(&view, &options, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(text_cell(&view, &options, Position::new(200, 30)), Some((21, 2)));

        let text = render_text(&view, &options).expect("render");
        let row = text.lines().nth(1).expect("row");
        assert_eq!(row.chars().nth(1), Some('┌'));
    }

    #[test]
    fn builtin_views_render_their_own_nodes_only() {
        let atlas = builtin::atlas().expect("atlas");

        let full = atlas.resolve(builtin::ARCHITECTURE_VIEW).expect("resolve");
        let text = render_text(&full, &TextOptions::default()).expect("render");
        assert!(text.contains("Hyperledger Fabric Network"), "{text}");
        assert!(text.contains("Client Applications"), "{text}");
        assert!(text.contains("zk proof [4]"), "{text}");
        assert!(text.contains("Khasra P2"), "{text}");
        assert!(text.contains("Legend: 1 Client→Fabric"), "{text}");

        let settlement = atlas.resolve(builtin::SETTLEMENT_VIEW).expect("resolve");
        let text = render_text(&settlement, &TextOptions::default()).expect("render");
        assert!(text.contains("Ethereum L1"), "{text}");
        assert!(!text.contains("Client Applications"), "{text}");
        assert!(!text.contains("Receipt / event"), "{text}");
    }

    #[test]
    fn legend_can_be_disabled() {
        let atlas = builtin::atlas().expect("atlas");
        let view = atlas.resolve(builtin::ARCHITECTURE_VIEW).expect("resolve");
        let options = TextOptions {
            legend: false,
            ..TextOptions::default()
        };
        let text = render_text(&view, &options).expect("render");
        assert!(!text.contains("Legend:"));
    }

    #[test]
    fn rejects_bad_cell_sizes() {
        let atlas = builtin::atlas().expect("atlas");
        let view = atlas.resolve(builtin::ARCHITECTURE_VIEW).expect("resolve");

        let err = render_text(
            &view,
            &TextOptions {
                cell_width: 0,
                ..TextOptions::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, TextRenderError::InvalidCellSize { width: 0, height: 20 });

        let err = render_text(
            &view,
            &TextOptions {
                cell_width: 1,
                cell_height: 1,
                legend: true,
            },
        )
        .unwrap_err();
        assert!(matches!(err, TextRenderError::TooLarge { .. }), "{err:?}");
    }

    #[test]
    fn extreme_cell_sizes_at_the_coordinate_limit_do_not_overflow() {
        let corner = Position::new(-COORD_LIMIT, -COORD_LIMIT);
        let catalog = Catalog::new(
            vec![Node::new(nid("far"), "Far", NodeCategory::Infra, corner, Size::new(100, 60))],
            Vec::new(),
        );
        let views = ViewTable::new(vec![View::new(vid("v"), "V").with_nodes([nid("far")])]);
        let atlas = Atlas::new(catalog, views).expect("atlas");
        let view = atlas.resolve("v").expect("resolve");

        let options = TextOptions {
            cell_width: i32::MAX,
            cell_height: i32::MAX,
            legend: false,
        };
        let text = render_text(&view, &options).expect("render");
        assert!(!text.is_empty());
        assert_eq!(text_cell(&view, &options, corner), Some((1, 1)));
    }

    #[test]
    fn fit_truncates_with_ellipsis() {
        assert_eq!(fit("Sequencer", 20), "Sequencer");
        assert_eq!(fit("Sequencer", 5), "Sequ…");
        assert_eq!(fit("Sequencer", 0), "");
    }

    #[test]
    fn strip_glyph_only_drops_pictograph_tokens() {
        assert_eq!(strip_glyph("📄 Khasra P2"), "Khasra P2");
        assert_eq!(strip_glyph("Event Indexer"), "Event Indexer");
    }
}
