//! Tiered fuzzy matching and ranking.
//!
//! [`score`] rates a single field against a query using four tiers, from
//! best to worst:
//!
//! | tier        | condition                    | score                    |
//! |-------------|------------------------------|--------------------------|
//! | exact       | field equals query           | `1000`                   |
//! | prefix      | field starts with query      | `700 - len(field)`       |
//! | substring   | query occurs in field        | `500 - index`            |
//! | subsequence | query chars appear in order  | run bonus minus scatter  |
//!
//! [`rank`] applies the scorer to a candidate's primary field and, only if
//! that fails, to its secondary field.  Primary matches always sort ahead of
//! secondary matches regardless of score.  All comparisons are
//! case-insensitive and operate on characters, not bytes.

use crate::record::{WindowRecord, WorkspaceRecord};
use std::cmp::Reverse;

/// Outcome of matching one field against a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScore {
    /// The field matched; higher is better.
    Matched(i64),
    NotMatched,
}

impl MatchScore {
    pub fn is_match(self) -> bool {
        matches!(self, MatchScore::Matched(_))
    }
}

/// Which field of a candidate produced its match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Primary,
    Secondary,
}

/// Something that can be ranked against a query.
pub trait Candidate {
    /// The field matched first (application name, workspace id).
    fn primary(&self) -> &str;
    /// The fallback field (window title).  Return `""` for candidates that
    /// only match on their primary field.
    fn secondary(&self) -> &str;
}

impl Candidate for WindowRecord {
    fn primary(&self) -> &str {
        &self.app_name
    }

    fn secondary(&self) -> &str {
        &self.window_title
    }
}

impl Candidate for WorkspaceRecord {
    fn primary(&self) -> &str {
        &self.workspace
    }

    /// Workspaces are searched by id only.
    fn secondary(&self) -> &str {
        ""
    }
}

/// Score `field` against `query`.
///
/// An empty query matches everything with score `0`.  An empty field never
/// matches a non-empty query.
pub fn score(query: &str, field: &str) -> MatchScore {
    let needle: Vec<char> = query.to_lowercase().chars().collect();
    if needle.is_empty() {
        return MatchScore::Matched(0);
    }
    let hay: Vec<char> = field.to_lowercase().chars().collect();
    if hay.is_empty() {
        return MatchScore::NotMatched;
    }

    if hay == needle {
        return MatchScore::Matched(1000);
    }
    if hay.starts_with(&needle) {
        return MatchScore::Matched(700 - hay.len() as i64);
    }
    if let Some(index) = hay.windows(needle.len()).position(|w| w == needle.as_slice()) {
        return MatchScore::Matched(500 - index as i64);
    }
    subsequence_score(&needle, &hay)
}

/// Walk `needle` through `hay` left to right.
///
/// A character found right after the previous match (or at index 0 for the
/// first character) extends the current run and earns `3 + run`; any other
/// match resets the run and earns `1`.  The distance the walk travelled
/// beyond `needle.len()` is subtracted at the end.
fn subsequence_score(needle: &[char], hay: &[char]) -> MatchScore {
    let mut total: i64 = 0;
    let mut run: i64 = 0;
    let mut last: Option<usize> = None;

    for &c in needle {
        let start = last.map_or(0, |l| l + 1);
        let Some(offset) = hay[start..].iter().position(|&h| h == c) else {
            return MatchScore::NotMatched;
        };
        if offset == 0 {
            run += 1;
            total += 3 + run;
        } else {
            run = 0;
            total += 1;
        }
        last = Some(start + offset);
    }

    let end = last.map_or(0, |l| l + 1);
    total -= end.saturating_sub(needle.len()) as i64;
    MatchScore::Matched(total)
}

/// Filter and order `candidates` by how well they match `query`.
///
/// Order is: tier (primary first), then score descending, then original
/// position.  An empty query returns the input untouched.
pub fn rank<T: Candidate>(query: &str, candidates: Vec<T>) -> Vec<T> {
    if query.is_empty() {
        return candidates;
    }

    let mut scored: Vec<(Tier, i64, usize, T)> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(index, candidate)| {
            let (tier, value) = match score(query, candidate.primary()) {
                MatchScore::Matched(v) => (Tier::Primary, v),
                MatchScore::NotMatched => match score(query, candidate.secondary()) {
                    MatchScore::Matched(v) => (Tier::Secondary, v),
                    MatchScore::NotMatched => return None,
                },
            };
            Some((tier, value, index, candidate))
        })
        .collect();

    scored.sort_by_key(|(tier, value, index, _)| (*tier, Reverse(*value), *index));
    scored.into_iter().map(|(_, _, _, candidate)| candidate).collect()
}
