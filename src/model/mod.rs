// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A `Catalog` holds every node and edge of the diagram; a `ViewTable` names focused subsets of
//! it. Neither is mutated after startup.

pub mod catalog;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod edge;
pub mod geometry;
pub mod ids;
pub mod node;
pub mod view;

pub use catalog::{Catalog, FlowStep};
pub use edge::{
    Bend, Edge, EdgeLabel, EdgeStyle, LabelPlacement, LineStyle, Motion, Route, TextAnchor,
};
pub use geometry::{Port, Position, Rect, Side, Size, COORD_LIMIT};
pub use ids::{EdgeId, Id, IdError, NodeId, ViewId};
pub use node::{
    BrandMark, Halo, Node, NodeCategory, NodeFlags, NodeIcon, NodePayload,
    ParseNodeCategoryError,
};
pub use view::{View, ViewTable};
