// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::geometry::{Position, Rect, Size};
use super::ids::NodeId;

/// Visual category of a node; decides its tone in every renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeCategory {
    User,
    Ledger,
    Bridge,
    Zk,
    Chain,
    Infra,
    External,
}

impl NodeCategory {
    pub const ALL: [Self; 7] = [
        Self::User,
        Self::Ledger,
        Self::Bridge,
        Self::Zk,
        Self::Chain,
        Self::Infra,
        Self::External,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ledger => "ledger",
            Self::Bridge => "bridge",
            Self::Zk => "zk",
            Self::Chain => "chain",
            Self::Infra => "infra",
            Self::External => "external",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown node category `{0}`")]
pub struct ParseNodeCategoryError(String);

impl FromStr for NodeCategory {
    type Err = ParseNodeCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ParseNodeCategoryError(s.to_owned()))
    }
}

/// Brand marks drawn inside a node's icon disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BrandMark {
    Fabric,
    Adi,
    Ethereum,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum NodeIcon {
    Glyph(String),
    Brand(BrandMark),
}

/// Outline glow around top-level boxes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Halo {
    #[default]
    None,
    Static,
    /// Opacity pulse; the value staggers the animation start (milliseconds).
    Pulse(u32),
}

/// Text shown for a node: title, optional subtitle, and the category that tones it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodePayload {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub category: NodeCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeFlags {
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default)]
    pub draggable: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            selectable: true,
            draggable: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn is_default_flags(flags: &NodeFlags) -> bool {
    *flags == NodeFlags::default()
}

/// A catalog node: a box on the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Node {
    id: NodeId,
    #[serde(flatten)]
    payload: NodePayload,
    position: Position,
    size: Size,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    icon: Option<NodeIcon>,
    #[serde(default)]
    halo: Halo,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption: Option<String>,
    /// Longer prose shown by the inspector, not drawn on the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "is_default_flags")]
    flags: NodeFlags,
}

impl Node {
    pub fn new(
        id: NodeId,
        title: impl Into<String>,
        category: NodeCategory,
        position: Position,
        size: Size,
    ) -> Self {
        Self {
            id,
            payload: NodePayload {
                title: title.into(),
                subtitle: None,
                category,
            },
            position,
            size,
            icon: None,
            halo: Halo::None,
            details: Vec::new(),
            caption: None,
            description: None,
            flags: NodeFlags::default(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.payload.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_icon(mut self, icon: NodeIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_halo(mut self, halo: Halo) -> Self {
        self.halo = halo;
        self
    }

    pub fn with_details<I, S>(mut self, details: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn payload(&self) -> &NodePayload {
        &self.payload
    }

    pub fn title(&self) -> &str {
        &self.payload.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.payload.subtitle.as_deref()
    }

    pub fn category(&self) -> NodeCategory {
        self.payload.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn icon(&self) -> Option<&NodeIcon> {
        self.icon.as_ref()
    }

    pub fn halo(&self) -> Halo {
        self.halo
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn flags(&self) -> NodeFlags {
        self.flags
    }

    pub fn is_selectable(&self) -> bool {
        self.flags.selectable
    }
}
