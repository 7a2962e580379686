// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Startup integrity checks for a catalog and its view table.
//!
//! The data is static, so any violation is an authoring mistake: the checker reports every
//! violation it finds in one pass and callers abort startup on failure.

use std::collections::BTreeSet;
use std::fmt;

use tracing::warn;

use crate::model::{
    Catalog, Edge, EdgeId, Node, NodeId, Position, ViewId, ViewTable, COORD_LIMIT,
};
use crate::model::geometry::within_limit;

/// Which end of an edge a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeEnd {
    Source,
    Target,
}

impl fmt::Display for EdgeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntegrityViolation {
    #[error("view table is empty")]
    NoViews,
    #[error("duplicate node id `{node_id}` in catalog")]
    DuplicateNode { node_id: NodeId },
    #[error("duplicate edge id `{edge_id}` in catalog")]
    DuplicateEdge { edge_id: EdgeId },
    #[error("duplicate view id `{view_id}`")]
    DuplicateView { view_id: ViewId },
    #[error("edge `{edge_id}` has unknown {end} node `{node_id}`")]
    EdgeEndpointMissing {
        edge_id: EdgeId,
        end: EdgeEnd,
        node_id: NodeId,
    },
    #[error("view `{view_id}` references unknown node `{node_id}`")]
    UnknownNode { view_id: ViewId, node_id: NodeId },
    #[error("view `{view_id}` references unknown edge `{edge_id}`")]
    UnknownEdge { view_id: ViewId, edge_id: EdgeId },
    #[error("view `{view_id}` lists node `{node_id}` more than once")]
    RepeatedNode { view_id: ViewId, node_id: NodeId },
    #[error("view `{view_id}` lists edge `{edge_id}` more than once")]
    RepeatedEdge { view_id: ViewId, edge_id: EdgeId },
    #[error(
        "view `{view_id}` shows edge `{edge_id}` but hides its {end} node `{node_id}`"
    )]
    HiddenEndpoint {
        view_id: ViewId,
        edge_id: EdgeId,
        end: EdgeEnd,
        node_id: NodeId,
    },
    #[error("view `{view_id}` overrides the position of unknown node `{node_id}`")]
    UnknownOverride { view_id: ViewId, node_id: NodeId },
    #[error("node `{node_id}` has non-positive size {w}x{h}")]
    NonPositiveSize { node_id: NodeId, w: i32, h: i32 },
    #[error("node `{node_id}` position or size is outside ±{} px", COORD_LIMIT)]
    NodeOutOfRange { node_id: NodeId },
    #[error("edge `{edge_id}` has a port, route or label offset outside ±{} px", COORD_LIMIT)]
    EdgeOutOfRange { edge_id: EdgeId },
    #[error("view `{view_id}` moves node `{node_id}` outside ±{} px", COORD_LIMIT)]
    OverrideOutOfRange { view_id: ViewId, node_id: NodeId },
}

/// Every violation found by one integrity check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_report(.violations))]
pub struct ConfigIntegrityError {
    violations: Vec<IntegrityViolation>,
}

impl ConfigIntegrityError {
    pub fn new(violations: Vec<IntegrityViolation>) -> Self {
        Self { violations }
    }

    pub fn violations(&self) -> &[IntegrityViolation] {
        &self.violations
    }
}

fn format_report(violations: &[IntegrityViolation]) -> String {
    let mut out = format!(
        "configuration integrity check failed ({} violation{})",
        violations.len(),
        if violations.len() == 1 { "" } else { "s" }
    );
    for violation in violations {
        out.push_str("\n  - ");
        out.push_str(&violation.to_string());
    }
    out
}

/// Runs every check and fails with the full list of violations.
pub fn check_integrity(catalog: &Catalog, views: &ViewTable) -> Result<(), ConfigIntegrityError> {
    let violations = collect_violations(catalog, views);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConfigIntegrityError::new(violations))
    }
}

/// Collects violations in a stable order: catalog checks first, then views in table order.
pub fn collect_violations(catalog: &Catalog, views: &ViewTable) -> Vec<IntegrityViolation> {
    let mut violations = Vec::new();

    if views.is_empty() {
        violations.push(IntegrityViolation::NoViews);
    }

    let mut node_ids = BTreeSet::<&str>::new();
    for node in catalog.nodes() {
        if !node_ids.insert(node.id().as_str()) {
            violations.push(IntegrityViolation::DuplicateNode {
                node_id: node.id().clone(),
            });
        }
        check_node_geometry(node, &mut violations);
    }

    let mut edge_ids = BTreeSet::<&str>::new();
    for edge in catalog.edges() {
        if !edge_ids.insert(edge.id().as_str()) {
            violations.push(IntegrityViolation::DuplicateEdge {
                edge_id: edge.id().clone(),
            });
        }
        for (end, node_id) in [(EdgeEnd::Source, edge.source()), (EdgeEnd::Target, edge.target())] {
            if !node_ids.contains(node_id.as_str()) {
                violations.push(IntegrityViolation::EdgeEndpointMissing {
                    edge_id: edge.id().clone(),
                    end,
                    node_id: node_id.clone(),
                });
            }
        }
    }

    let mut view_ids = BTreeSet::<&str>::new();
    for view in views.views() {
        let view_id = view.id();
        if !view_ids.insert(view_id.as_str()) {
            violations.push(IntegrityViolation::DuplicateView {
                view_id: view_id.clone(),
            });
        }

        let mut shown_nodes = BTreeSet::<&str>::new();
        for node_id in view.nodes() {
            if !node_ids.contains(node_id.as_str()) {
                violations.push(IntegrityViolation::UnknownNode {
                    view_id: view_id.clone(),
                    node_id: node_id.clone(),
                });
            }
            if !shown_nodes.insert(node_id.as_str()) {
                violations.push(IntegrityViolation::RepeatedNode {
                    view_id: view_id.clone(),
                    node_id: node_id.clone(),
                });
            }
        }

        let mut shown_edges = BTreeSet::<&str>::new();
        for edge_id in view.edges() {
            if !shown_edges.insert(edge_id.as_str()) {
                violations.push(IntegrityViolation::RepeatedEdge {
                    view_id: view_id.clone(),
                    edge_id: edge_id.clone(),
                });
            }
            let Some(edge) = catalog.edge(edge_id.as_str()) else {
                violations.push(IntegrityViolation::UnknownEdge {
                    view_id: view_id.clone(),
                    edge_id: edge_id.clone(),
                });
                continue;
            };
            for (end, node_id) in [(EdgeEnd::Source, edge.source()), (EdgeEnd::Target, edge.target())] {
                if !shown_nodes.contains(node_id.as_str()) {
                    violations.push(IntegrityViolation::HiddenEndpoint {
                        view_id: view_id.clone(),
                        edge_id: edge_id.clone(),
                        end,
                        node_id: node_id.clone(),
                    });
                }
            }
        }

        for (node_id, position) in view.positions() {
            if !node_ids.contains(node_id.as_str()) {
                violations.push(IntegrityViolation::UnknownOverride {
                    view_id: view_id.clone(),
                    node_id: node_id.clone(),
                });
            } else if let Some(violation) = check_override(view_id, node_id, *position) {
                violations.push(violation);
            } else if !shown_nodes.contains(node_id.as_str()) {
                warn!(
                    view = %view_id,
                    node = %node_id,
                    "position override for a node the view does not show"
                );
            }
        }
    }

    violations
}

/// Sizes must be positive and every coordinate stay within [`COORD_LIMIT`].
pub(crate) fn check_node_geometry(node: &Node, violations: &mut Vec<IntegrityViolation>) {
    let size = node.size();
    if !size.is_positive() {
        violations.push(IntegrityViolation::NonPositiveSize {
            node_id: node.id().clone(),
            w: size.w,
            h: size.h,
        });
    }
    if !node.position().is_within_limit() || !size.is_within_limit() {
        violations.push(IntegrityViolation::NodeOutOfRange {
            node_id: node.id().clone(),
        });
    }
}

pub(crate) fn check_edge_geometry(edge: &Edge, violations: &mut Vec<IntegrityViolation>) {
    let placement = edge.label_placement();
    let offsets = [
        edge.source_port().offset,
        edge.target_port().offset,
        edge.route().lateral_offset,
        placement.dx,
        placement.dy,
    ];
    if !offsets.into_iter().all(within_limit) {
        violations.push(IntegrityViolation::EdgeOutOfRange {
            edge_id: edge.id().clone(),
        });
    }
}

pub(crate) fn check_override(
    view_id: &ViewId,
    node_id: &NodeId,
    position: Position,
) -> Option<IntegrityViolation> {
    (!position.is_within_limit()).then(|| IntegrityViolation::OverrideOutOfRange {
        view_id: view_id.clone(),
        node_id: node_id.clone(),
    })
}
