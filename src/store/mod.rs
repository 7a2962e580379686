// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Catalog files on disk.
//!
//! A catalog file carries nodes, edges and views as one JSON document. Loading always runs the
//! integrity check, so a file that loads is safe to render.

pub mod catalog_file;

pub use catalog_file::{
    catalog_schema, load_catalog_file, save_catalog_file, write_atomic, CatalogFile, StoreError,
};
