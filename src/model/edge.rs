// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::{is_zero, Port};
use super::ids::{EdgeId, NodeId};

/// Edge label content.
///
/// Rich blocks carry structured lines instead of markup so every renderer can decide how to lay
/// them out; only the heading is drawn on the diagram itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum EdgeLabel {
    PlainText { text: String },
    RichBlock { heading: String, lines: Vec<String> },
}

impl EdgeLabel {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn rich<I, S>(heading: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RichBlock {
            heading: heading.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// The single line drawn next to the edge.
    pub fn headline(&self) -> &str {
        match self {
            Self::PlainText { text } => text,
            Self::RichBlock { heading, .. } => heading,
        }
    }

    pub fn lines(&self) -> &[String] {
        match self {
            Self::PlainText { .. } => &[],
            Self::RichBlock { lines, .. } => lines,
        }
    }
}

impl fmt::Display for EdgeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Which leg an orthogonal route draws first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub enum Bend {
    /// Horizontal, vertical, horizontal.
    #[default]
    #[serde(rename = "hv")]
    HorizontalFirst,
    /// Vertical, horizontal, vertical.
    #[serde(rename = "vh")]
    VerticalFirst,
}

/// Routing hint for an orthogonal edge.
///
/// The middle leg sits halfway between the endpoints, shifted by `lateral_offset` pixels; parallel
/// edges between the same pair of boxes use different offsets to stay apart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct Route {
    #[serde(default)]
    pub bend: Bend,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub lateral_offset: i32,
}

impl Route {
    pub const fn horizontal_first() -> Self {
        Self {
            bend: Bend::HorizontalFirst,
            lateral_offset: 0,
        }
    }

    pub const fn vertical_first() -> Self {
        Self {
            bend: Bend::VerticalFirst,
            lateral_offset: 0,
        }
    }

    pub const fn with_lateral_offset(mut self, lateral_offset: i32) -> Self {
        self.lateral_offset = lateral_offset;
        self
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Nudge applied to the computed label anchor point.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct LabelPlacement {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dx: i32,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub dy: i32,
    #[serde(default)]
    pub anchor: TextAnchor,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    #[default]
    Static,
    Animated,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct EdgeStyle {
    #[serde(default)]
    pub line: LineStyle,
    #[serde(default)]
    pub motion: Motion,
}

fn is_default_style(style: &EdgeStyle) -> bool {
    *style == EdgeStyle::default()
}

fn is_default_placement(placement: &LabelPlacement) -> bool {
    *placement == LabelPlacement::default()
}

/// A catalog edge: a directed arrow between two node ports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    #[serde(default)]
    source_port: Port,
    #[serde(default)]
    target_port: Port,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<EdgeLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    legend: Option<String>,
    #[serde(default)]
    route: Route,
    #[serde(default, skip_serializing_if = "is_default_placement")]
    label_placement: LabelPlacement,
    #[serde(default, skip_serializing_if = "is_default_style")]
    style: EdgeStyle,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, source_port: Port, target: NodeId, target_port: Port) -> Self {
        Self {
            id,
            source,
            target,
            source_port,
            target_port,
            label: None,
            step: None,
            legend: None,
            route: Route::default(),
            label_placement: LabelPlacement::default(),
            style: EdgeStyle::default(),
        }
    }

    pub fn with_label(mut self, label: EdgeLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Marks the edge as numbered step `step` of the flow, with a short legend entry.
    pub fn with_step(mut self, step: u8, legend: impl Into<String>) -> Self {
        self.step = Some(step);
        self.legend = Some(legend.into());
        self
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    pub fn with_label_placement(mut self, placement: LabelPlacement) -> Self {
        self.label_placement = placement;
        self
    }

    pub fn with_style(mut self, style: EdgeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn source_port(&self) -> Port {
        self.source_port
    }

    pub fn target_port(&self) -> Port {
        self.target_port
    }

    pub fn label(&self) -> Option<&EdgeLabel> {
        self.label.as_ref()
    }

    pub fn step(&self) -> Option<u8> {
        self.step
    }

    pub fn legend(&self) -> Option<&str> {
        self.legend.as_deref()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn label_placement(&self) -> LabelPlacement {
        self.label_placement
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }

    /// Label text as drawn on the diagram: the headline with a `[n]` step suffix.
    pub fn display_label(&self) -> Option<String> {
        let label = self.label.as_ref()?;
        Some(match self.step {
            Some(step) => format!("{} [{step}]", label.headline()),
            None => label.headline().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Bend, Edge, EdgeLabel, Route};
    use crate::model::{EdgeId, NodeId, Port, Side};

    fn edge() -> Edge {
        Edge::new(
            EdgeId::new("prover-eth").unwrap(),
            NodeId::new("adi.prover").unwrap(),
            Port::new(Side::Bottom),
            NodeId::new("ethereum").unwrap(),
            Port::new(Side::Top),
        )
    }

    #[test]
    fn display_label_appends_step() {
        let edge = edge()
            .with_label(EdgeLabel::plain("zk proof"))
            .with_step(4, "ADI→Ethereum");
        assert_eq!(edge.display_label().as_deref(), Some("zk proof [4]"));
        assert_eq!(edge.legend(), Some("ADI→Ethereum"));
    }

    #[test]
    fn unlabeled_edge_has_no_display_label() {
        assert_eq!(edge().with_step(6, "Observability").display_label(), None);
    }

    #[test]
    fn rich_block_headline_is_heading() {
        let label = EdgeLabel::rich("Commitment batch", ["Merkle root", "state diff"]);
        assert_eq!(label.headline(), "Commitment batch");
        assert_eq!(label.lines().len(), 2);
        assert_eq!(label.to_string(), "Commitment batch");
        assert!(EdgeLabel::plain("x").lines().is_empty());
    }

    #[test]
    fn route_json_uses_short_bend_names() {
        let route = Route::vertical_first().with_lateral_offset(100);
        let json = serde_json::to_value(route).unwrap();
        assert_eq!(json["bend"], "vh");
        assert_eq!(json["lateral_offset"], 100);

        let back: Route = serde_json::from_str(r#"{"bend":"hv"}"#).unwrap();
        assert_eq!(back.bend, Bend::HorizontalFirst);
        assert_eq!(back.lateral_offset, 0);
    }
}
