// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::{
    Catalog, Edge, EdgeId, EdgeLabel, Node, NodeCategory, NodeId, Port, Position, Side, Size,
    View, ViewId, ViewTable,
};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn vid(value: &str) -> ViewId {
    ViewId::new(value).expect("view id")
}

fn node(id: &str, x: i32, y: i32) -> Node {
    Node::new(nid(id), id.to_uppercase(), NodeCategory::Infra, Position::new(x, y), Size::new(100, 60))
}

fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(eid(id), nid(source), Port::new(Side::Right), nid(target), Port::new(Side::Left))
        .with_label(EdgeLabel::plain(id))
}

/// Nodes `a, b, c` in a row with edges `a-b` and `b-c`.
pub(crate) fn abc_catalog() -> Catalog {
    Catalog::new(
        vec![node("a", 0, 0), node("b", 200, 0), node("c", 400, 0)],
        vec![edge("a-b", "a", "b"), edge("b-c", "b", "c")],
    )
}

/// View `x` shows `a, b` and `a-b`, moving `a` to `(10, 20)`; view `full` shows everything.
pub(crate) fn abc_views() -> ViewTable {
    ViewTable::new(vec![
        View::new(vid("x"), "X")
            .with_nodes([nid("a"), nid("b")])
            .with_edges([eid("a-b")])
            .with_position(nid("a"), Position::new(10, 20)),
        View::new(vid("full"), "Full")
            .with_nodes([nid("a"), nid("b"), nid("c")])
            .with_edges([eid("a-b"), eid("b-c")]),
    ])
}
