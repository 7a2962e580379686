// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trellis and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Fuzzy node lookup by title or id.

use crate::model::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeMatch<'a> {
    pub node: &'a Node,
    pub score: i64,
}

/// Ranks `nodes` against `query`, best match first. Nodes that do not contain the query as a
/// case-insensitive subsequence of their title or id are dropped.
pub fn rank_nodes<'a>(nodes: impl IntoIterator<Item = &'a Node>, query: &str) -> Vec<NodeMatch<'a>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches = nodes
        .into_iter()
        .filter_map(|node| {
            let title = fuzzy_score(&needle, &node.title().to_lowercase());
            let id = fuzzy_score(&needle, &node.id().as_str().to_lowercase());
            let score = title.into_iter().chain(id).max()?;
            Some(NodeMatch { node, score })
        })
        .collect::<Vec<_>>();

    matches.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| a.node.title().cmp(b.node.title()))
    });
    matches
}

/// How the needle sits in the haystack, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Scattered,
    Substring,
    WordStart,
    Exact,
}

/// Higher is better. Both arguments are already lowercase.
fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let (tier, penalty) = match haystack.find(needle) {
        Some(_) if haystack == needle => (Tier::Exact, 0),
        Some(at) if at == 0 || haystack[..at].ends_with(is_boundary_char) => (Tier::WordStart, at),
        Some(at) => (Tier::Substring, at),
        None => (Tier::Scattered, scattered_span(needle, haystack)?),
    };
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    Some(tier as i64 * 2000 + (ratio * 1000.0).round() as i64 - penalty as i64)
}

/// Chars from the first to the last hit of the leftmost greedy match of `needle`, if any.
fn scattered_span(needle: &str, haystack: &str) -> Option<usize> {
    let mut wanted = needle.chars().peekable();
    let mut start = None;
    for (idx, ch) in haystack.chars().enumerate() {
        if wanted.peek() == Some(&ch) {
            wanted.next();
            let start = *start.get_or_insert(idx);
            if wanted.peek().is_none() {
                return Some(idx - start + 1);
            }
        }
    }
    None
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, '.' | '-' | '_' | ' ' | '/' | '(')
}
