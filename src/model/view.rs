// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::Position;
use super::ids::{EdgeId, NodeId, ViewId};

/// A named, focused subset of the catalog plus per-view position overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct View {
    id: ViewId,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    nodes: Vec<NodeId>,
    edges: Vec<EdgeId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    positions: BTreeMap<NodeId, Position>,
}

impl View {
    pub fn new(id: ViewId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            positions: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        self.nodes = nodes.into_iter().collect();
        self
    }

    pub fn with_edges(mut self, edges: impl IntoIterator<Item = EdgeId>) -> Self {
        self.edges = edges.into_iter().collect();
        self
    }

    pub fn with_position(mut self, node_id: NodeId, position: Position) -> Self {
        self.positions.insert(node_id, position);
        self
    }

    pub fn id(&self) -> &ViewId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn positions(&self) -> &BTreeMap<NodeId, Position> {
        &self.positions
    }

    pub fn shows_node(&self, node_id: &NodeId) -> bool {
        self.nodes.contains(node_id)
    }

    pub fn shows_edge(&self, edge_id: &EdgeId) -> bool {
        self.edges.contains(edge_id)
    }

    pub fn position_override(&self, node_id: &NodeId) -> Option<Position> {
        self.positions.get(node_id).copied()
    }
}

/// All views, in toggle order. The first view is the default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ViewTable {
    views: Vec<View>,
}

impl ViewTable {
    pub fn new(views: Vec<View>) -> Self {
        Self { views }
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    pub fn get(&self, view_id: &str) -> Option<&View> {
        self.views.iter().find(|view| view.id().as_str() == view_id)
    }

    pub fn index_of(&self, view_id: &str) -> Option<usize> {
        self.views.iter().position(|view| view.id().as_str() == view_id)
    }

    pub fn default_view(&self) -> Option<&View> {
        self.views.first()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{View, ViewTable};
    use crate::model::{NodeId, Position, ViewId};

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).unwrap()
    }

    #[test]
    fn view_lookup_and_overrides() {
        let view = View::new(ViewId::new("x").unwrap(), "X")
            .with_nodes([nid("a"), nid("b")])
            .with_position(nid("a"), Position::new(10, 20));

        assert!(view.shows_node(&nid("a")));
        assert!(!view.shows_node(&nid("c")));
        assert_eq!(view.position_override(&nid("a")), Some(Position::new(10, 20)));
        assert_eq!(view.position_override(&nid("b")), None);
    }

    #[test]
    fn table_keeps_order_and_defaults_to_first() {
        let table = ViewTable::new(vec![
            View::new(ViewId::new("overview").unwrap(), "Overview"),
            View::new(ViewId::new("settlement").unwrap(), "Settlement"),
        ]);
        assert_eq!(table.default_view().map(|v| v.id().as_str()), Some("overview"));
        assert_eq!(table.index_of("settlement"), Some(1));
        assert!(table.get("missing").is_none());
        assert_eq!(table.len(), 2);
    }
}
