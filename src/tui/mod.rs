// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! View tabs, a scrollable Unicode rendering of the active view, and an inspector panel for the
//! selected node or edge (ratatui + crossterm).

use std::{io, sync::Arc, time::Duration};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
};
use tracing::debug;

use crate::atlas::Atlas;
use crate::render::{render_text, text_cell, TextOptions};
use crate::resolve::ConfigError;
use crate::search::rank_nodes;
use crate::session::{DiagramSession, Inspection, Selection};

mod theme;

pub use theme::{ThemeError, PALETTE_ENV};
use theme::TuiTheme;

const SCROLL_STEP_X: u16 = 4;
const SCROLL_STEP_Y: u16 = 1;

#[derive(Debug, thiserror::Error)]
pub enum TuiError {
    #[error(transparent)]
    Theme(#[from] ThemeError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// Runs the interactive viewer until the user quits.
pub fn run(atlas: Arc<Atlas>, view_id: Option<&str>) -> Result<(), TuiError> {
    let theme = TuiTheme::from_env()?;
    let session = match view_id {
        Some(view_id) => DiagramSession::with_view(atlas, view_id)?,
        None => DiagramSession::new(atlas)?,
    };
    let mut app = App::new(session, theme);
    let mut terminal = TerminalSession::new()?;

    while !app.should_quit {
        app.refresh();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Normal,
    Search { query: String },
}

#[derive(Debug)]
struct App {
    session: DiagramSession,
    theme: TuiTheme,
    text_options: TextOptions,
    diagram: Vec<String>,
    rendered_rev: Option<u64>,
    rendered_view: Option<String>,
    scroll_x: u16,
    scroll_y: u16,
    viewport: (u16, u16),
    mode: Mode,
    status: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(session: DiagramSession, theme: TuiTheme) -> Self {
        let mut app = Self {
            session,
            theme,
            text_options: TextOptions::default(),
            diagram: Vec::new(),
            rendered_rev: None,
            rendered_view: None,
            scroll_x: 0,
            scroll_y: 0,
            viewport: (80, 24),
            mode: Mode::Normal,
            status: None,
            should_quit: false,
        };
        app.refresh();
        app
    }

    /// Re-renders the diagram text when the session changed since the last frame.
    fn refresh(&mut self) {
        let rev = self.session.rev();
        if self.rendered_rev == Some(rev) {
            return;
        }

        let view_id = self.session.active_view_id().to_string();
        if self.rendered_view.as_deref() != Some(view_id.as_str()) {
            self.scroll_x = 0;
            self.scroll_y = 0;
        }

        match render_text(self.session.resolved(), &self.text_options) {
            Ok(text) => self.diagram = text.lines().map(str::to_owned).collect(),
            Err(err) => {
                self.diagram.clear();
                self.status = Some(err.to_string());
            }
        }
        debug!(view = %view_id, rev, lines = self.diagram.len(), "diagram re-rendered");
        self.rendered_rev = Some(rev);
        self.rendered_view = Some(view_id);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        let Mode::Search { query } = &mut self.mode else {
            self.handle_normal_key(key);
            return;
        };
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                let query = std::mem::take(query);
                self.mode = Mode::Normal;
                self.jump_to(&query);
            }
            KeyCode::Backspace => {
                query.pop();
            }
            KeyCode::Char(ch) => query.push(ch),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        self.status = None;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char(digit @ '1'..='9') => {
                let index = digit as usize - '1' as usize;
                let view_id = self
                    .session
                    .atlas()
                    .views()
                    .views()
                    .get(index)
                    .map(|view| view.id().to_string());
                match view_id {
                    Some(view_id) => {
                        if let Err(err) = self.session.switch_view(&view_id) {
                            self.status = Some(err.to_string());
                        }
                    }
                    None => self.status = Some(format!("no view {digit}")),
                }
            }
            KeyCode::Char('v') => {
                if let Err(err) = self.session.cycle_view() {
                    self.status = Some(err.to_string());
                }
            }
            KeyCode::Tab | KeyCode::Char('n') => {
                self.session.select_next_node();
                self.reveal_selection();
            }
            KeyCode::Char('e') => {
                self.session.select_next_edge();
                self.reveal_selection();
            }
            KeyCode::Esc => self.session.clear_selection(),
            KeyCode::Left | KeyCode::Char('h') => {
                self.scroll_x = self.scroll_x.saturating_sub(SCROLL_STEP_X);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.scroll_x = self.scroll_x.saturating_add(SCROLL_STEP_X);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.scroll_y = self.scroll_y.saturating_sub(SCROLL_STEP_Y);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.scroll_y = self.scroll_y.saturating_add(SCROLL_STEP_Y);
            }
            KeyCode::Char('/') => {
                self.mode = Mode::Search {
                    query: String::new(),
                };
            }
            _ => {}
        }
    }

    /// Selects the best fuzzy match among the selectable nodes of the active view.
    fn jump_to(&mut self, query: &str) {
        let resolved = self.session.resolved();
        let best = rank_nodes(
            resolved.nodes().iter().filter(|node| node.is_selectable()),
            query,
        )
        .first()
        .map(|found| found.node.id().to_string());

        let Some(node_id) = best else {
            self.status = Some(format!("no node matches `{}`", query.trim()));
            return;
        };
        match self.session.click_node(&node_id) {
            Ok(()) => self.reveal_selection(),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    /// Scrolls so the selected node's top-left corner (or edge start) is inside the viewport.
    fn reveal_selection(&mut self) {
        let resolved = self.session.resolved();
        let point = match self.session.selection() {
            Selection::Unselected => return,
            Selection::Node(node_id) => resolved.node(node_id.as_str()).map(|node| node.position()),
            Selection::Edge(edge_id) => resolved.edge(edge_id.as_str()).and_then(|edge| {
                resolved
                    .node(edge.source().as_str())
                    .map(|source| edge.source_port().point(source.position(), source.size()))
            }),
        };
        let Some((col, row)) = point.and_then(|p| text_cell(resolved, &self.text_options, p))
        else {
            return;
        };

        let (width, height) = self.viewport;
        self.scroll_x = scroll_to_reveal(self.scroll_x, width, col);
        self.scroll_y = scroll_to_reveal(self.scroll_y, height, row);
    }

    /// Text to highlight in the diagram for the current selection.
    fn highlight_needle(&self) -> Option<String> {
        let resolved = self.session.resolved();
        match self.session.selection() {
            Selection::Unselected => None,
            Selection::Node(node_id) => resolved
                .node(node_id.as_str())
                .map(|node| node.title().to_owned()),
            Selection::Edge(edge_id) => resolved
                .edge(edge_id.as_str())
                .and_then(|edge| edge.display_label()),
        }
    }
}

/// New scroll offset that keeps `target` visible, leaving a small margin when it moves.
fn scroll_to_reveal(offset: u16, extent: u16, target: i64) -> u16 {
    let margin = i64::from(extent / 4);
    let start = i64::from(offset);
    let end = start + i64::from(extent);
    if target >= start && target < end {
        return offset;
    }
    u16::try_from((target - margin).max(0)).unwrap_or(u16::MAX)
}

/// Splits `line` so every occurrence of `needle` gets `highlight`.
fn highlight_line(line: &str, needle: Option<&str>, base: Style, highlight: Style) -> Line<'static> {
    let Some(needle) = needle.filter(|needle| !needle.is_empty()) else {
        return Line::from(Span::styled(line.to_owned(), base));
    };

    let mut spans = Vec::new();
    let mut rest = line;
    while let Some(at) = rest.find(needle) {
        if at > 0 {
            spans.push(Span::styled(rest[..at].to_owned(), base));
        }
        spans.push(Span::styled(needle.to_owned(), highlight));
        rest = &rest[at + needle.len()..];
    }
    if !rest.is_empty() || spans.is_empty() {
        spans.push(Span::styled(rest.to_owned(), base));
    }
    Line::from(spans)
}

fn inspector_lines(app: &App) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let resolved = app.session.resolved();

    let Some(inspection) = app.session.inspect() else {
        let mut lines = vec![Line::from(Span::styled(
            "Nothing selected".to_owned(),
            theme.muted_style(),
        ))];
        if let Some(description) = resolved.description() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                description.to_owned(),
                theme.base_style(),
            )));
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!(
                "{} nodes · {} edges",
                resolved.nodes().len(),
                resolved.edges().len()
            ),
            theme.muted_style(),
        )));
        return lines;
    };

    let accent = match &inspection {
        Inspection::Node { category, .. } => theme.category_style(*category),
        Inspection::Edge { .. } => theme.key_style(),
    };
    inspection
        .to_string()
        .lines()
        .enumerate()
        .map(|(idx, text)| {
            let style = if idx == 0 { accent } else { theme.base_style() };
            Line::from(Span::styled(text.to_owned(), style))
        })
        .collect()
}

fn footer_line(app: &App) -> Line<'static> {
    let theme = &app.theme;

    if let Mode::Search { query } = &app.mode {
        let preview = rank_nodes(app.session.resolved().nodes(), query)
            .first()
            .map(|found| format!("  → {}", found.node.title()))
            .unwrap_or_default();
        return Line::from(vec![
            Span::styled("/".to_owned(), theme.key_style()),
            Span::styled(format!("{query}▏"), theme.base_style()),
            Span::styled(preview, theme.muted_style()),
        ]);
    }

    if let Some(status) = &app.status {
        return Line::from(Span::styled(status.clone(), theme.error_style()));
    }

    let hints = [
        ("1-9", "view"),
        ("v", "cycle"),
        ("Tab", "node"),
        ("e", "edge"),
        ("Esc", "clear"),
        ("/", "jump"),
        ("hjkl", "scroll"),
        ("q", "quit"),
    ];
    let mut spans = Vec::new();
    for (key, label) in hints {
        spans.push(Span::styled(key.to_owned(), theme.key_style()));
        spans.push(Span::styled(format!(" {label}  "), theme.muted_style()));
    }
    Line::from(spans)
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.size());
    let (tabs_area, main_area, footer_area) = (layout[0], layout[1], layout[2]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(main_area);
    let (diagram_area, inspector_area) = (panes[0], panes[1]);

    let theme = &app.theme;
    let views = app.session.atlas().views().views();
    let active = app
        .session
        .atlas()
        .views()
        .index_of(app.session.active_view_id().as_str())
        .unwrap_or(0);
    let titles = views
        .iter()
        .enumerate()
        .map(|(idx, view)| Line::from(format!("{} {}", idx + 1, view.name())))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(active)
        .style(theme.tab_style(false))
        .highlight_style(theme.tab_style(true))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .title(" trellis "),
        );
    frame.render_widget(tabs, tabs_area);

    let needle = app.highlight_needle();
    let diagram_lines = app
        .diagram
        .iter()
        .map(|line| {
            highlight_line(
                line,
                needle.as_deref(),
                theme.base_style(),
                theme.selection_style(),
            )
        })
        .collect::<Vec<_>>();
    let diagram_title = match app.session.selection().id() {
        Some(id) => format!(" {} · {id} ", app.session.resolved().name()),
        None => format!(" {} ", app.session.resolved().name()),
    };
    let diagram = Paragraph::new(diagram_lines)
        .scroll((app.scroll_y, app.scroll_x))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(true))
                .title(diagram_title),
        );
    frame.render_widget(diagram, diagram_area);

    let inspector = Paragraph::new(inspector_lines(app))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style(false))
                .title(" inspector "),
        );
    frame.render_widget(inspector, inspector_area);

    frame.render_widget(Paragraph::new(footer_line(app)), footer_area);

    app.viewport = (
        diagram_area.width.saturating_sub(2),
        diagram_area.height.saturating_sub(2),
    );
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

#[cfg(test)]
mod tests;
