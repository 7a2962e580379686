// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::info;

use crate::integrity::{check_integrity, ConfigIntegrityError};
use crate::model::{Catalog, View, ViewId, ViewTable};
use crate::resolve::{resolve_view, ConfigError, ResolvedView};

/// A catalog and view table that passed the integrity check.
///
/// Construction is the only place the check runs; an `Atlas` is immutable afterwards and is
/// shared between sessions behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atlas {
    catalog: Catalog,
    views: ViewTable,
}

impl Atlas {
    pub fn new(catalog: Catalog, views: ViewTable) -> Result<Self, ConfigIntegrityError> {
        check_integrity(&catalog, &views)?;
        info!(
            nodes = catalog.nodes().len(),
            edges = catalog.edges().len(),
            views = views.len(),
            "catalog integrity check passed"
        );
        Ok(Self { catalog, views })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn views(&self) -> &ViewTable {
        &self.views
    }

    /// The first view in the table; the integrity check guarantees there is one.
    pub fn default_view(&self) -> &View {
        &self.views.views()[0]
    }

    pub fn default_view_id(&self) -> &ViewId {
        self.default_view().id()
    }

    pub fn resolve(&self, view_id: &str) -> Result<ResolvedView, ConfigError> {
        resolve_view(&self.catalog, &self.views, view_id)
    }

    pub fn into_parts(self) -> (Catalog, ViewTable) {
        (self.catalog, self.views)
    }
}

#[cfg(test)]
mod tests {
    use super::Atlas;
    use crate::integrity::IntegrityViolation;
    use crate::model::fixtures::{abc_catalog, abc_views};
    use crate::model::ViewTable;

    #[test]
    fn builds_from_consistent_tables() {
        let atlas = Atlas::new(abc_catalog(), abc_views()).expect("atlas");
        assert_eq!(atlas.default_view_id().as_str(), "x");
        assert_eq!(atlas.resolve("full").unwrap().nodes().len(), 3);
    }

    #[test]
    fn refuses_empty_view_table() {
        let err = Atlas::new(abc_catalog(), ViewTable::default()).unwrap_err();
        assert_eq!(err.violations(), &[IntegrityViolation::NoViews]);
    }
}
