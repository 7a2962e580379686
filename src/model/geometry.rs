// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pixel-space geometry shared by the model and the renderers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest magnitude accepted for any coordinate, size or offset in a catalog.
///
/// Sums of a few bounded values (origin + size + port offset + route offset) stay far inside
/// `i32`, so renderers can do plain arithmetic on checked data.
pub const COORD_LIMIT: i32 = 1_000_000;

pub(crate) const fn within_limit(value: i32) -> bool {
    -COORD_LIMIT <= value && value <= COORD_LIMIT
}

/// Top-left corner of a node box, in pixels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn is_within_limit(self) -> bool {
        within_limit(self.x) && within_limit(self.y)
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Size {
    pub w: i32,
    pub h: i32,
}

impl Size {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub const fn is_positive(self) -> bool {
        self.w > 0 && self.h > 0
    }

    pub const fn is_within_limit(self) -> bool {
        within_limit(self.w) && within_limit(self.h)
    }
}

/// Axis-aligned rectangle; `max` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub min: Position,
    pub max: Position,
}

impl Rect {
    pub fn from_origin_size(origin: Position, size: Size) -> Self {
        Self {
            min: origin,
            max: origin.offset(size.w, size.h),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            min: Position::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Position::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

/// The side of a node box an edge attaches to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    #[default]
    Right,
    Bottom,
    Left,
}

/// Attachment point on a node box: a side plus an offset (pixels) from that side's midpoint.
///
/// Positive offsets move right along horizontal sides and down along vertical sides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
pub struct Port {
    pub side: Side,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub offset: i32,
}

impl Port {
    pub const fn new(side: Side) -> Self {
        Self { side, offset: 0 }
    }

    pub const fn at(side: Side, offset: i32) -> Self {
        Self { side, offset }
    }

    /// Resolves the port to an absolute point on a box at `origin` with `size`.
    pub fn point(&self, origin: Position, size: Size) -> Position {
        let cx = origin.x + size.w / 2;
        let cy = origin.y + size.h / 2;
        match self.side {
            Side::Top => Position::new(cx + self.offset, origin.y),
            Side::Bottom => Position::new(cx + self.offset, origin.y + size.h),
            Side::Left => Position::new(origin.x, cy + self.offset),
            Side::Right => Position::new(origin.x + size.w, cy + self.offset),
        }
    }
}

pub(crate) fn is_zero(value: &i32) -> bool {
    *value == 0
}
