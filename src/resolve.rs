// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! View resolution: the node/edge subset and positions a view presents.

use std::collections::BTreeSet;

use tracing::debug;

use crate::integrity::{
    check_edge_geometry, check_node_geometry, check_override, ConfigIntegrityError, EdgeEnd,
    IntegrityViolation,
};
use crate::model::{Catalog, Edge, Node, Rect, ViewId, ViewTable};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown view `{view_id}`")]
    UnknownView { view_id: String },
    #[error(transparent)]
    Integrity(#[from] ConfigIntegrityError),
}

/// The nodes and edges one view presents, with position overrides applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedView {
    view_id: ViewId,
    name: String,
    description: Option<String>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl ResolvedView {
    pub fn view_id(&self) -> &ViewId {
        &self.view_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Visible nodes, in catalog order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Visible edges, in catalog order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id().as_str() == node_id)
    }

    pub fn edge(&self, edge_id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id().as_str() == edge_id)
    }

    /// Bounding box of all visible nodes, or `None` for an empty view.
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(Node::bounds)
            .reduce(Rect::union)
    }
}

/// Resolves `view_id` against `catalog`.
///
/// Nodes and edges keep catalog order regardless of the order the view lists them in. A view
/// that references ids missing from the catalog, or shows an edge whose endpoint it hides, is
/// reported as an integrity fault.
pub fn resolve_view(
    catalog: &Catalog,
    views: &ViewTable,
    view_id: &str,
) -> Result<ResolvedView, ConfigError> {
    let view = views.get(view_id).ok_or_else(|| ConfigError::UnknownView {
        view_id: view_id.to_owned(),
    })?;

    let mut violations = Vec::new();
    for node_id in view.nodes() {
        if !catalog.contains_node(node_id.as_str()) {
            violations.push(IntegrityViolation::UnknownNode {
                view_id: view.id().clone(),
                node_id: node_id.clone(),
            });
        }
    }
    for edge_id in view.edges() {
        if !catalog.contains_edge(edge_id.as_str()) {
            violations.push(IntegrityViolation::UnknownEdge {
                view_id: view.id().clone(),
                edge_id: edge_id.clone(),
            });
        }
    }

    let shown_nodes = view.nodes().iter().map(|id| id.as_str()).collect::<BTreeSet<_>>();
    let shown_edges = view.edges().iter().map(|id| id.as_str()).collect::<BTreeSet<_>>();

    let nodes = catalog
        .nodes()
        .iter()
        .filter(|node| shown_nodes.contains(node.id().as_str()))
        .map(|node| {
            check_node_geometry(node, &mut violations);
            let mut node = node.clone();
            if let Some(position) = view.position_override(node.id()) {
                violations.extend(check_override(view.id(), node.id(), position));
                node.set_position(position);
            }
            node
        })
        .collect::<Vec<_>>();

    let edges = catalog
        .edges()
        .iter()
        .filter(|edge| shown_edges.contains(edge.id().as_str()))
        .cloned()
        .collect::<Vec<_>>();

    for edge in &edges {
        check_edge_geometry(edge, &mut violations);
        for (end, node_id) in [(EdgeEnd::Source, edge.source()), (EdgeEnd::Target, edge.target())] {
            if !shown_nodes.contains(node_id.as_str()) {
                violations.push(IntegrityViolation::HiddenEndpoint {
                    view_id: view.id().clone(),
                    edge_id: edge.id().clone(),
                    end,
                    node_id: node_id.clone(),
                });
            }
        }
    }

    if !violations.is_empty() {
        return Err(ConfigIntegrityError::new(violations).into());
    }

    debug!(
        view = %view.id(),
        nodes = nodes.len(),
        edges = edges.len(),
        "resolved view"
    );

    Ok(ResolvedView {
        view_id: view.id().clone(),
        name: view.name().to_owned(),
        description: view.description().map(str::to_owned),
        nodes,
        edges,
    })
}
