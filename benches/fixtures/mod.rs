// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Deterministic atlases for benchmarks.

use trellis::atlas::Atlas;
use trellis::builtin;
use trellis::model::{
    Catalog, Edge, EdgeId, EdgeLabel, Node, NodeCategory, NodeId, Port, Position, Side, Size,
    View, ViewId, ViewTable,
};

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Builtin,
    Grid64,
    Grid400,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Builtin => "builtin",
            Self::Grid64 => "grid_64",
            Self::Grid400 => "grid_400",
        }
    }

    pub const ALL: [Self; 3] = [Self::Builtin, Self::Grid64, Self::Grid400];
}

pub fn atlas(case: Case) -> Atlas {
    match case {
        Case::Builtin => builtin::atlas().expect("builtin atlas"),
        Case::Grid64 => grid(8),
        Case::Grid400 => grid(20),
    }
}

const CATEGORIES: [NodeCategory; 5] = [
    NodeCategory::Infra,
    NodeCategory::Ledger,
    NodeCategory::Bridge,
    NodeCategory::Zk,
    NodeCategory::Chain,
];

/// `side * side` nodes with right and down edges. View `all` shows everything, view `diagonal`
/// shows the diagonal band and shifts every shown node.
fn grid(side: usize) -> Atlas {
    let node_id = |row: usize, col: usize| NodeId::new(format!("n{row}x{col}")).expect("node id");

    let mut nodes = Vec::with_capacity(side * side);
    let mut edges = Vec::new();
    for row in 0..side {
        for col in 0..side {
            let index = row * side + col;
            nodes.push(
                Node::new(
                    node_id(row, col),
                    format!("Service {index}"),
                    CATEGORIES[index % CATEGORIES.len()],
                    Position::new(col as i32 * 180, row as i32 * 110),
                    Size::new(120, 60),
                )
                .with_subtitle(format!("zone {}", row % 3))
                .with_details([format!("replicas: {}", 1 + index % 4)]),
            );
            if col + 1 < side {
                let id = EdgeId::new(format!("e{row}x{col}r")).expect("edge id");
                edges.push(
                    Edge::new(
                        id,
                        node_id(row, col),
                        Port::new(Side::Right),
                        node_id(row, col + 1),
                        Port::new(Side::Left),
                    )
                    .with_label(EdgeLabel::plain(format!("call {index}"))),
                );
            }
            if row + 1 < side {
                let id = EdgeId::new(format!("e{row}x{col}d")).expect("edge id");
                edges.push(Edge::new(
                    id,
                    node_id(row, col),
                    Port::new(Side::Bottom),
                    node_id(row + 1, col),
                    Port::new(Side::Top),
                ));
            }
        }
    }

    let all = View::new(ViewId::new("all").expect("view id"), "All")
        .with_nodes(nodes.iter().map(|node| node.id().clone()))
        .with_edges(edges.iter().map(|edge| edge.id().clone()));

    let band = |row: usize, col: usize| row.abs_diff(col) <= 1;
    let mut diagonal = View::new(ViewId::new("diagonal").expect("view id"), "Diagonal");
    diagonal = diagonal.with_nodes(
        (0..side)
            .flat_map(|row| (0..side).map(move |col| (row, col)))
            .filter(|&(row, col)| band(row, col))
            .map(|(row, col)| node_id(row, col)),
    );
    diagonal = diagonal.with_edges(
        edges
            .iter()
            .filter(|edge| {
                let shown = |id: &NodeId| {
                    let (row, col) = parse_grid_id(id.as_str());
                    band(row, col)
                };
                shown(edge.source()) && shown(edge.target())
            })
            .map(|edge| edge.id().clone()),
    );
    for row in 0..side {
        for col in 0..side {
            if band(row, col) {
                diagonal = diagonal.with_position(
                    node_id(row, col),
                    Position::new(col as i32 * 180 + 40, row as i32 * 110),
                );
            }
        }
    }

    Atlas::new(Catalog::new(nodes, edges), ViewTable::new(vec![all, diagonal]))
        .expect("grid atlas passes integrity")
}

fn parse_grid_id(id: &str) -> (usize, usize) {
    let (row, col) = id
        .trim_start_matches('n')
        .split_once('x')
        .expect("grid node id");
    (row.parse().expect("row"), col.parse().expect("col"))
}
