// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Trellis: architecture diagram views (catalog + views, SVG/text rendering, TUI).
//!
//! A [`model::Catalog`] holds every node and edge once. Views pick subsets of it and may move
//! nodes; [`atlas::Atlas`] pairs both after the integrity check and [`session::DiagramSession`]
//! tracks the active view and selection on top.

pub mod atlas;
pub mod builtin;
pub mod integrity;
pub mod model;
pub mod render;
pub mod resolve;
pub mod search;
pub mod session;
pub mod store;
pub mod tui;
