// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::node::Node;

/// The master list of nodes and edges, independent of any view.
///
/// Order matters only for drawing: containers come before the components drawn on top of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    flow: Vec<FlowStep>,
}

/// One numbered line of the high-level walkthrough that accompanies the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FlowStep {
    pub step: u8,
    pub text: String,
}

impl FlowStep {
    pub fn new(step: u8, text: impl Into<String>) -> Self {
        Self {
            step,
            text: text.into(),
        }
    }
}

impl Catalog {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            flow: Vec::new(),
        }
    }

    pub fn with_flow(mut self, flow: impl IntoIterator<Item = FlowStep>) -> Self {
        self.flow = flow.into_iter().collect();
        self
    }

    /// Walkthrough steps in display order.
    pub fn flow(&self) -> &[FlowStep] {
        &self.flow
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id().as_str() == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id().as_str() == edge_id)
    }

    pub fn contains_node(&self, node_id: &str) -> bool {
        self.node(node_id).is_some()
    }

    pub fn contains_edge(&self, edge_id: &str) -> bool {
        self.edge(edge_id).is_some()
    }
}
