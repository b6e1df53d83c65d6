//! # Operator Selection
//!
//! Parses answers like `"1,3"`, `"2-4"` or `"all"` into a subset of any
//! indexable list. Both the target menu and the handshake menu use it.
//!
//! Indices are 1-based. A malformed token, including an empty one as in
//! `"1,,3"`, rejects the whole answer. A blank answer selects nothing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("nothing was selected")]
    Empty,
    #[error("empty entry between commas")]
    EmptyToken,
    #[error("'{0}' is not a number, a range or 'all'")]
    InvalidToken(String),
    #[error("{index} is out of range (1-{len})")]
    OutOfRange { index: usize, len: usize },
    #[error("range {first}-{last} is reversed")]
    ReversedRange { first: usize, last: usize },
}

/// Selects elements of `items` according to `input`.
///
/// The result keeps the operator's order and repeats elements selected twice.
/// `all` returns every element and ignores the other tokens.
pub fn select<T: Clone>(items: &[T], input: &str) -> Result<Vec<T>, SelectionError> {
    let indices = parse_indices(input, items.len())?;
    Ok(indices.into_iter().map(|idx| items[idx - 1].clone()).collect())
}

/// Like [`select`], but returns the 1-based indices instead of the elements.
pub fn parse_indices(input: &str, len: usize) -> Result<Vec<usize>, SelectionError> {
    if input.trim().is_empty() {
        return Err(SelectionError::Empty);
    }

    let mut indices: Vec<usize> = Vec::new();

    for token in input.split(',').map(str::trim) {
        if token.is_empty() {
            return Err(SelectionError::EmptyToken);
        }

        if token.eq_ignore_ascii_case("all") {
            return Ok((1..=len).collect());
        }

        if let Some((first, last)) = token.split_once('-') {
            let first = parse_index(first, token)?;
            let last = parse_index(last, token)?;
            if first > last {
                return Err(SelectionError::ReversedRange { first, last });
            }
            for index in first..=last {
                indices.push(check_bounds(index, len)?);
            }
            continue;
        }

        let index = parse_index(token, token)?;
        indices.push(check_bounds(index, len)?);
    }

    Ok(indices)
}

fn parse_index(text: &str, token: &str) -> Result<usize, SelectionError> {
    let text = text.trim();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SelectionError::InvalidToken(token.to_string()));
    }
    text.parse::<usize>()
        .map_err(|_| SelectionError::InvalidToken(token.to_string()))
}

fn check_bounds(index: usize, len: usize) -> Result<usize, SelectionError> {
    if index == 0 || index > len {
        return Err(SelectionError::OutOfRange { index, len });
    }
    Ok(index)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
