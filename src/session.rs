// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Per-session presentation state: the active view and the inspector selection.
//!
//! The atlas is shared and immutable; everything mutable lives in a `DiagramSession` that the
//! owner of the event loop passes around explicitly. Several sessions can run over one atlas.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::atlas::Atlas;
use crate::model::{EdgeId, NodeCategory, NodeId, Position, ViewId};
use crate::resolve::{ConfigError, ResolvedView};

/// What the inspector currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Node(NodeId),
    Edge(EdgeId),
}

impl Selection {
    pub fn is_unselected(&self) -> bool {
        matches!(self, Self::Unselected)
    }

    /// Id of the selected element, if any.
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Unselected => None,
            Self::Node(node_id) => Some(node_id.as_str()),
            Self::Edge(edge_id) => Some(edge_id.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("node `{node_id}` is not shown in view `{view_id}`")]
    NodeNotVisible { view_id: ViewId, node_id: String },
    #[error("edge `{edge_id}` is not shown in view `{view_id}`")]
    EdgeNotVisible { view_id: ViewId, edge_id: String },
    #[error("node `{node_id}` is not selectable")]
    NotSelectable { node_id: NodeId },
}

/// Inspector record for the selected element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    Node {
        id: NodeId,
        title: String,
        subtitle: Option<String>,
        category: NodeCategory,
        position: Position,
        details: Vec<String>,
        description: Option<String>,
    },
    Edge {
        id: EdgeId,
        source: NodeId,
        source_title: String,
        target: NodeId,
        target_title: String,
        label: Option<String>,
        label_lines: Vec<String>,
        step: Option<u8>,
    },
}

impl fmt::Display for Inspection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node {
                id,
                title,
                subtitle,
                category,
                position,
                details,
                description,
            } => {
                writeln!(f, "node      {id}")?;
                writeln!(f, "title     {title}")?;
                if let Some(subtitle) = subtitle {
                    writeln!(f, "subtitle  {subtitle}")?;
                }
                writeln!(f, "category  {category}")?;
                write!(f, "position  ({}, {})", position.x, position.y)?;
                for detail in details {
                    write!(f, "\n  · {detail}")?;
                }
                if let Some(description) = description {
                    write!(f, "\n\n{description}")?;
                }
                Ok(())
            }
            Self::Edge {
                id,
                source,
                source_title,
                target,
                target_title,
                label,
                label_lines,
                step,
            } => {
                writeln!(f, "edge      {id}")?;
                writeln!(f, "source    {source} ({source_title})")?;
                write!(f, "target    {target} ({target_title})")?;
                if let Some(step) = step {
                    write!(f, "\nstep      {step}")?;
                }
                if let Some(label) = label {
                    write!(f, "\nlabel     {label}")?;
                }
                for line in label_lines {
                    write!(f, "\n  · {line}")?;
                }
                Ok(())
            }
        }
    }
}

/// Session-scoped view and selection state over a shared atlas.
#[derive(Debug, Clone)]
pub struct DiagramSession {
    atlas: Arc<Atlas>,
    resolved: ResolvedView,
    selection: Selection,
    rev: u64,
}

impl DiagramSession {
    /// Starts on the atlas' default view.
    pub fn new(atlas: Arc<Atlas>) -> Result<Self, ConfigError> {
        let view_id = atlas.default_view_id().as_str().to_owned();
        Self::with_view(atlas, &view_id)
    }

    pub fn with_view(atlas: Arc<Atlas>, view_id: &str) -> Result<Self, ConfigError> {
        let resolved = atlas.resolve(view_id)?;
        Ok(Self {
            atlas,
            resolved,
            selection: Selection::Unselected,
            rev: 0,
        })
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn active_view_id(&self) -> &ViewId {
        self.resolved.view_id()
    }

    pub fn resolved(&self) -> &ResolvedView {
        &self.resolved
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Bumped on every state change.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Switches the active view and clears the selection.
    ///
    /// Re-selecting the active view still clears the selection. On error nothing changes.
    pub fn switch_view(&mut self, view_id: &str) -> Result<(), ConfigError> {
        let resolved = self.atlas.resolve(view_id)?;
        debug!(from = %self.resolved.view_id(), to = %resolved.view_id(), "switch view");
        self.resolved = resolved;
        self.selection = Selection::Unselected;
        self.bump();
        Ok(())
    }

    /// Moves to the next view in table order, wrapping around.
    pub fn cycle_view(&mut self) -> Result<(), ConfigError> {
        let views = self.atlas.views();
        let idx = views.index_of(self.resolved.view_id().as_str()).unwrap_or(0);
        let next = views.views()[(idx + 1) % views.len()].id().as_str().to_owned();
        self.switch_view(&next)
    }

    pub fn click_node(&mut self, node_id: &str) -> Result<(), SelectionError> {
        let Some(node) = self.resolved.node(node_id) else {
            return Err(SelectionError::NodeNotVisible {
                view_id: self.resolved.view_id().clone(),
                node_id: node_id.to_owned(),
            });
        };
        if !node.is_selectable() {
            return Err(SelectionError::NotSelectable {
                node_id: node.id().clone(),
            });
        }
        self.selection = Selection::Node(node.id().clone());
        self.bump();
        Ok(())
    }

    pub fn click_edge(&mut self, edge_id: &str) -> Result<(), SelectionError> {
        let Some(edge) = self.resolved.edge(edge_id) else {
            return Err(SelectionError::EdgeNotVisible {
                view_id: self.resolved.view_id().clone(),
                edge_id: edge_id.to_owned(),
            });
        };
        self.selection = Selection::Edge(edge.id().clone());
        self.bump();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        if self.selection.is_unselected() {
            return;
        }
        self.selection = Selection::Unselected;
        self.bump();
    }

    /// Selects the next selectable node after the current one (wrapping), or the first one.
    pub fn select_next_node(&mut self) {
        let nodes = self
            .resolved
            .nodes()
            .iter()
            .filter(|node| node.is_selectable())
            .map(|node| node.id().clone())
            .collect::<Vec<_>>();
        let current = match &self.selection {
            Selection::Node(node_id) => nodes.iter().position(|id| id == node_id),
            _ => None,
        };
        if let Some(next) = next_in_cycle(&nodes, current) {
            self.selection = Selection::Node(next);
            self.bump();
        }
    }

    /// Selects the next edge after the current one (wrapping), or the first one.
    pub fn select_next_edge(&mut self) {
        let edges = self
            .resolved
            .edges()
            .iter()
            .map(|edge| edge.id().clone())
            .collect::<Vec<_>>();
        let current = match &self.selection {
            Selection::Edge(edge_id) => edges.iter().position(|id| id == edge_id),
            _ => None,
        };
        if let Some(next) = next_in_cycle(&edges, current) {
            self.selection = Selection::Edge(next);
            self.bump();
        }
    }

    /// Inspector record for the current selection.
    pub fn inspect(&self) -> Option<Inspection> {
        match &self.selection {
            Selection::Unselected => None,
            Selection::Node(node_id) => {
                let node = self.resolved.node(node_id.as_str())?;
                Some(Inspection::Node {
                    id: node.id().clone(),
                    title: node.title().to_owned(),
                    subtitle: node.subtitle().map(str::to_owned),
                    category: node.category(),
                    position: node.position(),
                    details: node.details().to_vec(),
                    description: node.description().map(str::to_owned),
                })
            }
            Selection::Edge(edge_id) => {
                let edge = self.resolved.edge(edge_id.as_str())?;
                let title_of = |node_id: &NodeId| {
                    self.resolved
                        .node(node_id.as_str())
                        .map(|node| node.title().to_owned())
                        .unwrap_or_default()
                };
                Some(Inspection::Edge {
                    id: edge.id().clone(),
                    source: edge.source().clone(),
                    source_title: title_of(edge.source()),
                    target: edge.target().clone(),
                    target_title: title_of(edge.target()),
                    label: edge.label().map(|label| label.headline().to_owned()),
                    label_lines: edge.label().map(|label| label.lines().to_vec()).unwrap_or_default(),
                    step: edge.step(),
                })
            }
        }
    }

    fn bump(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

fn next_in_cycle<T: Clone>(items: &[T], current: Option<usize>) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    let idx = match current {
        Some(idx) => (idx + 1) % items.len(),
        None => 0,
    };
    Some(items[idx].clone())
}
