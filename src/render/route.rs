// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Orthogonal edge routes in pixel space, shared by the SVG and text renderers.

use crate::model::{Bend, Edge, Node, Position};
use crate::resolve::ResolvedView;

/// Vertical distance between a horizontal leg and the label drawn above it.
const LABEL_LIFT: i32 = 8;

/// Three-leg orthogonal route plus the point its label is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePath {
    pub points: [Position; 4],
    pub label_anchor: Position,
}

impl EdgePath {
    pub fn start(&self) -> Position {
        self.points[0]
    }

    pub fn end(&self) -> Position {
        self.points[3]
    }

    /// SVG path data (`M x,y L x,y ...`).
    pub fn svg_data(&self) -> String {
        let [a, b, c, d] = self.points;
        format!(
            "M {},{} L {},{} L {},{} L {},{}",
            a.x, a.y, b.x, b.y, c.x, c.y, d.x, d.y
        )
    }
}

/// Routes `edge` between the already-positioned `source` and `target` boxes.
pub fn edge_path(edge: &Edge, source: &Node, target: &Node) -> EdgePath {
    let from = edge.source_port().point(source.position(), source.size());
    let to = edge.target_port().point(target.position(), target.size());
    let route = edge.route();
    let placement = edge.label_placement();

    let (points, anchor) = match route.bend {
        Bend::HorizontalFirst => {
            let mid_x = (from.x + to.x) / 2 + route.lateral_offset;
            (
                [
                    from,
                    Position::new(mid_x, from.y),
                    Position::new(mid_x, to.y),
                    to,
                ],
                Position::new(mid_x, (from.y + to.y) / 2 - LABEL_LIFT),
            )
        }
        Bend::VerticalFirst => {
            let mid_y = (from.y + to.y) / 2 + route.lateral_offset;
            (
                [
                    from,
                    Position::new(from.x, mid_y),
                    Position::new(to.x, mid_y),
                    to,
                ],
                Position::new((from.x + to.x) / 2, mid_y - LABEL_LIFT),
            )
        }
    };

    EdgePath {
        points,
        label_anchor: anchor.offset(placement.dx, placement.dy),
    }
}

/// Routes every edge of a resolved view, in edge order.
pub fn view_paths(view: &ResolvedView) -> Vec<(&Edge, EdgePath)> {
    view.edges()
        .iter()
        .filter_map(|edge| {
            let source = view.node(edge.source().as_str())?;
            let target = view.node(edge.target().as_str())?;
            Some((edge, edge_path(edge, source, target)))
        })
        .collect()
}
