// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, style::Style, text::Line, Terminal};
use rstest::{fixture, rstest};

use super::{draw, highlight_line, scroll_to_reveal, App, Mode, TuiTheme};
use crate::builtin;
use crate::session::{DiagramSession, Selection};

fn line_to_string(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_str(app: &mut App, text: &str) {
    for ch in text.chars() {
        press(app, KeyCode::Char(ch));
    }
}

#[fixture]
fn app() -> App {
    let atlas = Arc::new(builtin::atlas().expect("atlas"));
    let session = DiagramSession::new(atlas).expect("session");
    App::new(session, TuiTheme::default())
}

#[rstest]
fn starts_on_default_view_with_rendered_diagram(app: App) {
    assert_eq!(app.session.active_view_id().as_str(), builtin::ARCHITECTURE_VIEW);
    assert!(app.diagram.iter().any(|line| line.contains("Hyperledger Fabric Network")));
    assert_eq!(app.rendered_rev, Some(app.session.rev()));
}

#[rstest]
fn number_keys_switch_views_and_reset_selection(mut app: App) {
    press(&mut app, KeyCode::Tab);
    assert!(matches!(app.session.selection(), Selection::Node(_)));

    press(&mut app, KeyCode::Char('2'));
    assert_eq!(app.session.active_view_id().as_str(), builtin::SETTLEMENT_VIEW);
    assert!(app.session.selection().is_unselected());

    press(&mut app, KeyCode::Char('e'));
    press(&mut app, KeyCode::Char('2'));
    assert!(app.session.selection().is_unselected());

    press(&mut app, KeyCode::Char('9'));
    assert_eq!(app.status.as_deref(), Some("no view 9"));
    assert_eq!(app.session.active_view_id().as_str(), builtin::SETTLEMENT_VIEW);
}

#[rstest]
fn v_cycles_views_and_refresh_resets_scroll(mut app: App) {
    press(&mut app, KeyCode::Char('l'));
    press(&mut app, KeyCode::Char('j'));
    assert_eq!((app.scroll_x, app.scroll_y), (4, 1));

    press(&mut app, KeyCode::Char('v'));
    app.refresh();
    assert_eq!(app.session.active_view_id().as_str(), builtin::SETTLEMENT_VIEW);
    assert_eq!((app.scroll_x, app.scroll_y), (0, 0));
    assert!(!app.diagram.iter().any(|line| line.contains("Client Applications")));

    press(&mut app, KeyCode::Char('v'));
    assert_eq!(app.session.active_view_id().as_str(), builtin::ARCHITECTURE_VIEW);
}

#[rstest]
fn tab_and_e_walk_nodes_and_edges_and_esc_clears(mut app: App) {
    press(&mut app, KeyCode::Tab);
    assert_eq!(app.session.selection().id(), Some("client"));
    press(&mut app, KeyCode::Char('n'));
    assert_eq!(app.session.selection().id(), Some("fabric"));

    press(&mut app, KeyCode::Char('e'));
    assert_eq!(app.session.selection().id(), Some("client-fabric"));

    press(&mut app, KeyCode::Esc);
    assert!(app.session.selection().is_unselected());
}

#[rstest]
fn slash_search_jumps_to_best_node(mut app: App) {
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "provx");
    press(&mut app, KeyCode::Backspace);
    assert_eq!(
        app.mode,
        Mode::Search {
            query: "prov".to_owned()
        }
    );

    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Normal);
    assert_eq!(app.session.selection().id(), Some("adi.prover"));
}

#[rstest]
fn search_keys_do_not_trigger_commands(mut app: App) {
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "q2v");
    assert!(!app.should_quit);
    assert_eq!(app.session.active_view_id().as_str(), builtin::ARCHITECTURE_VIEW);

    press(&mut app, KeyCode::Esc);
    assert_eq!(app.mode, Mode::Normal);
}

#[rstest]
fn failed_search_reports_status(mut app: App) {
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "zzz");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status.as_deref(), Some("no node matches `zzz`"));
    assert!(app.session.selection().is_unselected());
}

#[rstest]
fn q_quits(mut app: App) {
    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}

#[rstest]
fn ctrl_c_quits_even_while_searching(mut app: App) {
    press(&mut app, KeyCode::Char('/'));
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
}

#[test]
fn highlight_line_splits_on_every_occurrence() {
    let hl = Style::default().fg(ratatui::style::Color::Yellow);
    let line = highlight_line("ab Sequencer cd Sequencer", Some("Sequencer"), Style::default(), hl);
    assert_eq!(line_to_string(&line), "ab Sequencer cd Sequencer");
    let highlighted = line
        .spans
        .iter()
        .filter(|span| span.style == hl)
        .count();
    assert_eq!(highlighted, 2);

    let plain = highlight_line("abc", None, Style::default(), hl);
    assert_eq!(plain.spans.len(), 1);
}

#[rstest]
#[case(0, 40, 10, 0)]
#[case(0, 40, 60, 50)]
#[case(50, 40, 10, 0)]
#[case(50, 40, 70, 50)]
fn scroll_only_moves_when_target_is_offscreen(
    #[case] offset: u16,
    #[case] extent: u16,
    #[case] target: i64,
    #[case] expected: u16,
) {
    assert_eq!(scroll_to_reveal(offset, extent, target), expected);
}

#[rstest]
fn draw_shows_tabs_inspector_and_footer(mut app: App) {
    press(&mut app, KeyCode::Tab);
    app.refresh();

    let mut terminal = Terminal::new(TestBackend::new(160, 40)).expect("terminal");
    terminal.draw(|frame| draw(frame, &mut app)).expect("draw");

    let buffer = terminal.backend().buffer();
    let screen = buffer
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect::<String>();
    assert!(screen.contains("1 Solution architecture"));
    assert!(screen.contains("2 Settlement path"));
    assert!(screen.contains("node      client"));
    assert!(screen.contains("inspector"));
    assert!(screen.contains("quit"));
    assert_eq!(app.viewport.1, 34);
    assert!(app.viewport.0 > 100, "{:?}", app.viewport);
}
