// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering for resolved views.
//!
//! The SVG renderer draws pixel-accurate slides; the text renderer projects the same geometry
//! onto a Unicode character grid for terminals.

use std::fmt;

pub mod route;
pub mod svg;
pub mod text;
pub mod tone;

pub use route::{edge_path, view_paths, EdgePath};
pub use svg::{render_svg, SvgOptions, SvgRenderError};
pub use text::{render_text, text_cell, TextOptions, TextRenderError};
pub use tone::{tone, Tone};

/// Legend line for the step-numbered edges of a view, e.g. `Legend: 1 Client→Fabric | 2 ...`.
pub fn legend_line(view: &crate::resolve::ResolvedView) -> Option<String> {
    let mut steps = view
        .edges()
        .iter()
        .filter_map(|edge| Some((edge.step()?, edge.legend()?)))
        .collect::<Vec<_>>();
    if steps.is_empty() {
        return None;
    }
    steps.sort_by_key(|(step, _)| *step);
    steps.dedup_by_key(|(step, _)| *step);
    let entries = steps
        .iter()
        .map(|(step, legend)| format!("{step} {legend}"))
        .collect::<Vec<_>>();
    Some(format!("Legend: {}", entries.join(" | ")))
}

pub const BOX_HORIZONTAL: char = '─';
pub const BOX_VERTICAL: char = '│';

const LINK_LEFT: u8 = 1 << 0;
const LINK_RIGHT: u8 = 1 << 1;
const LINK_UP: u8 = 1 << 2;
const LINK_DOWN: u8 = 1 << 3;

fn glyph_for_links(links: u8) -> char {
    match links {
        0b0001..=0b0011 => '─',
        0b0100 | 0b1000 | 0b1100 => '│',
        0b1010 => '┌',
        0b1001 => '┐',
        0b0110 => '└',
        0b0101 => '┘',
        0b1110 => '├',
        0b1101 => '┤',
        0b1011 => '┬',
        0b0111 => '┴',
        _ => '┼',
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    links: u8,
}

const BLANK: Cell = Cell { ch: ' ', links: 0 };

/// A character grid where line drawing merges into junctions and text overwrites.
///
/// All drawing clips silently at the grid border; projected diagrams routinely touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Returns `None` when `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Option<Self> {
        let len = width.checked_mul(height)?;
        Some(Self {
            width,
            height,
            cells: vec![BLANK; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn cell_mut(&mut self, x: i64, y: i64) -> Option<&mut Cell> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get_mut(y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let cell = self.cells[y * self.width + x];
        Some(if cell.links == 0 {
            cell.ch
        } else {
            glyph_for_links(cell.links)
        })
    }

    /// Writes a non-line character, replacing whatever was there.
    pub fn put(&mut self, x: i64, y: i64, ch: char) {
        if let Some(cell) = self.cell_mut(x, y) {
            *cell = Cell { ch, links: 0 };
        }
    }

    fn link(&mut self, x: i64, y: i64, links: u8) {
        if let Some(cell) = self.cell_mut(x, y) {
            cell.links |= links;
        }
    }

    pub fn write_str(&mut self, x: i64, y: i64, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(x + i as i64, y, ch);
        }
    }

    /// Blanks the rectangle `x0..=x1`, `y0..=y1`.
    pub fn clear_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        for y in y0.min(y1)..=y0.max(y1) {
            for x in x0.min(x1)..=x0.max(x1) {
                if let Some(cell) = self.cell_mut(x, y) {
                    *cell = BLANK;
                }
            }
        }
    }

    pub fn hline(&mut self, x0: i64, x1: i64, y: i64) {
        let (lo, hi) = (x0.min(x1), x0.max(x1));
        if lo == hi {
            self.link(lo, y, LINK_LEFT | LINK_RIGHT);
            return;
        }
        for x in lo..=hi {
            let mut links = 0;
            if x > lo {
                links |= LINK_LEFT;
            }
            if x < hi {
                links |= LINK_RIGHT;
            }
            self.link(x, y, links);
        }
    }

    pub fn vline(&mut self, x: i64, y0: i64, y1: i64) {
        let (lo, hi) = (y0.min(y1), y0.max(y1));
        if lo == hi {
            self.link(x, lo, LINK_UP | LINK_DOWN);
            return;
        }
        for y in lo..=hi {
            let mut links = 0;
            if y > lo {
                links |= LINK_UP;
            }
            if y < hi {
                links |= LINK_DOWN;
            }
            self.link(x, y, links);
        }
    }

    /// Draws a single-line box with corners at `(x0, y0)` and `(x1, y1)`.
    pub fn draw_box(&mut self, x0: i64, y0: i64, x1: i64, y1: i64) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        self.hline(left, right, top);
        self.hline(left, right, bottom);
        self.vline(left, top, bottom);
        self.vline(right, top, bottom);
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            let mut line = String::with_capacity(self.width);
            for x in 0..self.width {
                line.push(self.get(x, y).unwrap_or(' '));
            }
            f.write_str(line.trim_end())?;
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{legend_line, Grid};
    use crate::builtin;

    #[test]
    fn box_draws_corners_and_edges() {
        let mut g = Grid::new(6, 5).unwrap();
        g.draw_box(1, 1, 4, 3);
        assert_eq!(g.to_string(), "\n ┌──┐\n │  │\n └──┘\n");
    }

    #[test]
    fn crossing_lines_merge_into_junctions() {
        let mut g = Grid::new(5, 5).unwrap();
        g.hline(0, 4, 2);
        g.vline(2, 0, 4);
        assert_eq!(g.to_string(), "  │\n  │\n──┼──\n  │\n  │");

        let mut g = Grid::new(5, 3).unwrap();
        g.hline(0, 4, 1);
        g.vline(2, 1, 2);
        assert_eq!(g.to_string(), "\n──┬──\n  │");
    }

    #[test]
    fn box_sharing_a_border_with_a_line_gets_tees() {
        let mut g = Grid::new(7, 3).unwrap();
        g.draw_box(0, 0, 3, 2);
        g.hline(3, 6, 1);
        assert_eq!(g.to_string(), "┌──┐\n│  ├───\n└──┘");
    }

    #[test]
    fn drawing_clips_at_the_border() {
        let mut g = Grid::new(4, 1).unwrap();
        g.write_str(2, 0, "abcdef");
        g.hline(-3, 1, 0);
        assert_eq!(g.to_string(), "──ab");
        assert_eq!(g.get(4, 0), None);
    }

    #[test]
    fn text_overwrites_lines() {
        let mut g = Grid::new(5, 1).unwrap();
        g.hline(0, 4, 0);
        g.write_str(1, 0, "ab");
        assert_eq!(g.to_string(), "─ab──");
    }

    #[test]
    fn area_overflow_is_refused() {
        assert!(Grid::new(usize::MAX, 2).is_none());
    }

    #[test]
    fn legend_lists_steps_in_order() {
        let atlas = builtin::atlas().expect("atlas");
        let view = atlas.resolve(builtin::ARCHITECTURE_VIEW).expect("resolve");
        assert_eq!(
            legend_line(&view).as_deref(),
            Some(
                "Legend: 1 Client→Fabric | 2 Fabric→Bridge | 3 Bridge→ADI | 4 ADI→Ethereum | 5 Ethereum→KMS | 6 Observability"
            )
        );

        let settlement = atlas.resolve(builtin::SETTLEMENT_VIEW).expect("resolve");
        assert_eq!(
            legend_line(&settlement).as_deref(),
            Some("Legend: 2 Fabric→Bridge | 3 Bridge→ADI | 4 ADI→Ethereum")
        );
    }
}
