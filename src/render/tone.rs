// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::NodeCategory;

/// Stroke colours for one node category (hex, SVG-ready).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub name: &'static str,
    /// Outline of top-level panels and halos.
    pub stroke: &'static str,
    /// Lighter outline for components nested in a panel.
    pub soft: &'static str,
}

pub fn tone(category: NodeCategory) -> Tone {
    match category {
        NodeCategory::User => Tone {
            name: "sky",
            stroke: "#38bdf8",
            soft: "#7dd3fc",
        },
        NodeCategory::Ledger => Tone {
            name: "indigo",
            stroke: "#818cf8",
            soft: "#a5b4fc",
        },
        NodeCategory::Bridge => Tone {
            name: "amber",
            stroke: "#fbbf24",
            soft: "#fcd34d",
        },
        NodeCategory::Zk => Tone {
            name: "emerald",
            stroke: "#34d399",
            soft: "#6ee7b7",
        },
        NodeCategory::Chain => Tone {
            name: "rose",
            stroke: "#fb7185",
            soft: "#fda4af",
        },
        NodeCategory::Infra | NodeCategory::External => Tone {
            name: "slate",
            stroke: "#94a3b8",
            soft: "#cbd5e1",
        },
    }
}
