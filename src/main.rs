// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Trellis CLI entrypoint.
//!
//! Without a subcommand this opens the interactive TUI on the default view. Every command loads
//! and integrity-checks the catalog first; a broken catalog aborts with the full report.

use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trellis::atlas::Atlas;
use trellis::builtin;
use trellis::integrity::ConfigIntegrityError;
use trellis::render::{
    render_svg, render_text, SvgOptions, SvgRenderError, TextOptions, TextRenderError,
};
use trellis::resolve::ConfigError;
use trellis::search::rank_nodes;
use trellis::session::{DiagramSession, SelectionError};
use trellis::store::{
    catalog_schema, load_catalog_file, save_catalog_file, write_atomic, CatalogFile, StoreError,
};
use trellis::tui::TuiError;

const LOG_ENV: &str = "TRELLIS_LOG";

#[derive(Debug, Parser)]
#[command(name = "trellis", version, about = "Architecture diagram views in the terminal")]
struct Cli {
    /// JSON catalog file (defaults to the built-in Fabric + ADI architecture).
    #[arg(long, global = true, env = "TRELLIS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the integrity check and print a summary
    Check,

    /// List views in toggle order (`*` marks the default)
    Views {
        /// Also print the numbered high-level flow
        #[arg(long)]
        flow: bool,
    },

    /// Render a view as SVG or Unicode text
    Render {
        #[arg(long)]
        view: Option<String>,
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,
        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Highlight this node or edge (SVG only)
        #[arg(long)]
        select: Option<String>,
        /// Omit the step legend
        #[arg(long)]
        no_legend: bool,
    },

    /// Print the inspector record for a node or edge
    Inspect {
        #[arg(long)]
        view: Option<String>,
        #[command(flatten)]
        target: InspectTarget,
    },

    /// Fuzzy-find nodes by title or id
    Find {
        query: String,
        /// Search only the nodes shown in this view
        #[arg(long)]
        view: Option<String>,
    },

    /// Write the catalog and views as a JSON catalog file
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the JSON Schema of catalog files
    Schema,

    /// Open the interactive viewer (default)
    Tui {
        #[arg(long)]
        view: Option<String>,
    },
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
struct InspectTarget {
    #[arg(long)]
    node: Option<String>,
    #[arg(long)]
    edge: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Text,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Integrity(#[from] ConfigIntegrityError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error("`{id}` is neither a node nor an edge of view `{view_id}`")]
    UnknownElement { view_id: String, id: String },
    #[error("no node matches `{query}`")]
    NoMatch { query: String },
    #[error(transparent)]
    Svg(#[from] SvgRenderError),
    #[error(transparent)]
    Text(#[from] TextRenderError),
    #[error(transparent)]
    Tui(#[from] TuiError),
    #[error("cannot encode JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cannot write output: {0}")]
    Io(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("trellis: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn load_atlas(catalog: Option<&Path>) -> Result<Atlas, CliError> {
    let atlas = match catalog {
        Some(path) => load_catalog_file(path)?,
        None => builtin::atlas()?,
    };
    info!(
        nodes = atlas.catalog().nodes().len(),
        edges = atlas.catalog().edges().len(),
        views = atlas.views().len(),
        "catalog passed integrity check"
    );
    Ok(atlas)
}

fn run(cli: Cli) -> Result<(), CliError> {
    let atlas = Arc::new(load_atlas(cli.catalog.as_deref())?);
    let command = cli.command.unwrap_or(Command::Tui { view: None });
    debug!(?command, "dispatch");

    match command {
        Command::Check => {
            let source = cli
                .catalog
                .as_deref()
                .map_or_else(|| "built-in catalog".to_owned(), |path| path.display().to_string());
            println!(
                "{source}: ok ({} nodes, {} edges, {} views)",
                atlas.catalog().nodes().len(),
                atlas.catalog().edges().len(),
                atlas.views().len()
            );
        }
        Command::Views { flow } => {
            let default_id = atlas.default_view_id();
            for view in atlas.views().views() {
                let marker = if view.id() == default_id { '*' } else { ' ' };
                println!(
                    "{marker} {:<16} {:<28} {} nodes, {} edges",
                    view.id().as_str(),
                    view.name(),
                    view.nodes().len(),
                    view.edges().len()
                );
            }
            if flow && !atlas.catalog().flow().is_empty() {
                println!();
                for step in atlas.catalog().flow() {
                    println!("{:>2}. {}", step.step, step.text);
                }
            }
        }
        Command::Render {
            view,
            format,
            out,
            select,
            no_legend,
        } => {
            let mut session = open_session(&atlas, view.as_deref())?;
            if let Some(id) = select.as_deref() {
                select_element(&mut session, id)?;
            }
            let resolved = session.resolved();
            let rendered = match format {
                Format::Svg => render_svg(
                    resolved,
                    &SvgOptions {
                        size: None,
                        selection: session.selection().id().map(str::to_owned),
                        legend: !no_legend,
                    },
                )?,
                Format::Text => {
                    let mut text = render_text(
                        resolved,
                        &TextOptions {
                            legend: !no_legend,
                            ..TextOptions::default()
                        },
                    )?;
                    text.push('\n');
                    text
                }
            };
            write_output(out.as_deref(), rendered.as_bytes())?;
        }
        Command::Inspect { view, target } => {
            let mut session = open_session(&atlas, view.as_deref())?;
            match (target.node, target.edge) {
                (Some(node_id), _) => session.click_node(&node_id)?,
                (None, Some(edge_id)) => session.click_edge(&edge_id)?,
                (None, None) => {}
            }
            if let Some(inspection) = session.inspect() {
                println!("{inspection}");
            }
        }
        Command::Find { query, view } => {
            let resolved = view
                .as_deref()
                .map(|view_id| atlas.resolve(view_id))
                .transpose()?;
            let nodes = match &resolved {
                Some(resolved) => resolved.nodes(),
                None => atlas.catalog().nodes(),
            };
            let matches = rank_nodes(nodes, &query);
            if matches.is_empty() {
                return Err(CliError::NoMatch { query });
            }
            for found in matches {
                println!(
                    "{:>6}  {:<16} {}",
                    found.score,
                    found.node.id().as_str(),
                    found.node.title()
                );
            }
        }
        Command::Export { out } => match out {
            Some(path) => save_catalog_file(&path, &atlas)?,
            None => {
                let mut json = serde_json::to_string_pretty(&CatalogFile::from_atlas(&atlas))?;
                json.push('\n');
                write_output(None, json.as_bytes())?;
            }
        },
        Command::Schema => {
            let mut json = serde_json::to_string_pretty(&catalog_schema())?;
            json.push('\n');
            write_output(None, json.as_bytes())?;
        }
        Command::Tui { view } => trellis::tui::run(atlas, view.as_deref())?,
    }

    Ok(())
}

fn open_session(atlas: &Arc<Atlas>, view_id: Option<&str>) -> Result<DiagramSession, ConfigError> {
    match view_id {
        Some(view_id) => DiagramSession::with_view(Arc::clone(atlas), view_id),
        None => DiagramSession::new(Arc::clone(atlas)),
    }
}

/// Selects `id` as a node if the view shows one with that id, else as an edge.
fn select_element(session: &mut DiagramSession, id: &str) -> Result<(), CliError> {
    if session.resolved().node(id).is_some() {
        return Ok(session.click_node(id)?);
    }
    if session.resolved().edge(id).is_some() {
        return Ok(session.click_edge(id)?);
    }
    Err(CliError::UnknownElement {
        view_id: session.active_view_id().to_string(),
        id: id.to_owned(),
    })
}

fn write_output(out: Option<&Path>, contents: &[u8]) -> Result<(), CliError> {
    match out {
        Some(path) => {
            write_atomic(path, contents)?;
            info!(path = %path.display(), bytes = contents.len(), "output written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(contents)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
