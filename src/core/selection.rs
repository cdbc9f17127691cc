//! Range selection - turns "1-3,6-8,10" into validated list positions
//!
//! Positions are 1-based and refer to the list as displayed, never to item ids.
//! A selection is either fully valid or rejected as a whole.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::core::item::Item;

/// Errors from parsing a range expression
///
/// Every variant carries the offending token as the user typed it (trimmed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid selection '{token}'. Use numbers (3), ranges (1-5), or comma-separated (1,3,5-7)")]
    InvalidToken { token: String },

    #[error("Invalid range '{token}': start {start} is greater than end {end}")]
    ReversedRange {
        token: String,
        start: usize,
        end: usize,
    },

    #[error("Invalid selection '{token}': {value} is outside 1-{max}")]
    OutOfRange {
        token: String,
        value: usize,
        max: usize,
    },
}

impl ParseError {
    /// The token that caused the parse to fail
    pub fn token(&self) -> &str {
        match self {
            ParseError::InvalidToken { token }
            | ParseError::ReversedRange { token, .. }
            | ParseError::OutOfRange { token, .. } => token,
        }
    }
}

/// A validated, deduplicated, ascending set of 1-based positions
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionRange {
    positions: BTreeSet<usize>,
}

impl SelectionRange {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Positions in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.positions.iter().copied().collect()
    }

    /// Map positions to the items they name, in ascending position order
    ///
    /// `items` must be the same sequence the selection was parsed against.
    /// Positions past the end of `items` are skipped.
    pub fn resolve<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        self.positions
            .iter()
            .filter_map(|&pos| items.get(pos - 1))
            .collect()
    }
}

/// Parse a range expression against a list of `max_index` items
///
/// Grammar: comma-separated tokens, each either `N` or `A-B` (inclusive,
/// `A <= B`). Whitespace around tokens and around the dash is ignored.
/// Empty input yields an empty selection.
pub fn parse_selection(input: &str, max_index: usize) -> Result<SelectionRange, ParseError> {
    let mut selection = SelectionRange::default();

    if input.trim().is_empty() {
        return Ok(selection);
    }

    for raw in input.split(',') {
        let token = raw.trim();

        let (start, end) = match token.split_once('-') {
            Some((a, b)) => {
                let start = parse_number(a).ok_or_else(|| invalid(token))?;
                let end = parse_number(b).ok_or_else(|| invalid(token))?;
                if start > end {
                    return Err(ParseError::ReversedRange {
                        token: token.to_string(),
                        start,
                        end,
                    });
                }
                (start, end)
            }
            None => {
                let n = parse_number(token).ok_or_else(|| invalid(token))?;
                (n, n)
            }
        };

        // Check both ends before expanding so huge ranges are rejected cheaply
        for value in [start, end] {
            if value < 1 || value > max_index {
                return Err(ParseError::OutOfRange {
                    token: token.to_string(),
                    value,
                    max: max_index,
                });
            }
        }

        selection.positions.extend(start..=end);
    }

    Ok(selection)
}

/// Strict positive-integer parse: ASCII digits only, no sign
fn parse_number(s: &str) -> Option<usize> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn invalid(token: &str) -> ParseError {
    ParseError::InvalidToken {
        token: token.to_string(),
    }
}
