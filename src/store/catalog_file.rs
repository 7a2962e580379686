// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use schemars::{JsonSchema, Schema};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::atlas::Atlas;
use crate::integrity::ConfigIntegrityError;
use crate::model::{Catalog, Edge, FlowStep, Node, View, ViewTable};

/// On-disk catalog document: `{ "nodes": [...], "edges": [...], "views": [...], "flow": [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogFile {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Toggle order; the first view is the default.
    pub views: Vec<View>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flow: Vec<FlowStep>,
}

impl CatalogFile {
    pub fn from_atlas(atlas: &Atlas) -> Self {
        Self {
            nodes: atlas.catalog().nodes().to_vec(),
            edges: atlas.catalog().edges().to_vec(),
            views: atlas.views().views().to_vec(),
            flow: atlas.catalog().flow().to_vec(),
        }
    }

    pub fn into_atlas(self) -> Result<Atlas, ConfigIntegrityError> {
        Atlas::new(
            Catalog::new(self.nodes, self.edges).with_flow(self.flow),
            ViewTable::new(self.views),
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog {path:?} is inconsistent: {source}")]
    Integrity {
        path: PathBuf,
        #[source]
        source: ConfigIntegrityError,
    },
}

/// Reads a catalog file and runs the integrity check over it.
pub fn load_catalog_file(path: &Path) -> Result<Atlas, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: CatalogFile = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(
        path = %path.display(),
        nodes = file.nodes.len(),
        edges = file.edges.len(),
        views = file.views.len(),
        "catalog file parsed"
    );
    file.into_atlas().map_err(|source| StoreError::Integrity {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the atlas as pretty JSON, replacing `path` atomically.
pub fn save_catalog_file(path: &Path, atlas: &Atlas) -> Result<(), StoreError> {
    let mut json = serde_json::to_vec_pretty(&CatalogFile::from_atlas(atlas)).map_err(|source| {
        StoreError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;
    json.push(b'\n');
    write_atomic(path, &json)?;
    info!(path = %path.display(), "catalog file saved");
    Ok(())
}

/// JSON Schema describing [`CatalogFile`].
pub fn catalog_schema() -> Schema {
    schemars::schema_for!(CatalogFile)
}

/// Writes to a sibling temp file and renames it over `path`, so readers never see a partial file.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| StoreError::Io { path, source }
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".trellis.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_err(&tmp_path))?;
    file.write_all(contents).map_err(io_err(&tmp_path))?;
    file.sync_all().map_err(io_err(&tmp_path))?;
    drop(file);

    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
