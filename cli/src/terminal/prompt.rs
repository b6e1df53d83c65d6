use anyhow::bail;
use colored::*;
use console::Term;
use tracing::warn;

use airlock_common::selection::{self, SelectionError};

/// Asks a question on the terminal and returns the trimmed answer.
pub fn ask(question: &str) -> anyhow::Result<String> {
    let term = Term::stdout();
    term.write_str(&format!("{} {}: ", "[?]".blue().bold(), question))?;
    Ok(term.read_line()?.trim().to_string())
}

/// Lets the operator pick from `items` until the answer parses.
///
/// A blank answer aborts.
pub fn ask_selection<T: Clone>(items: &[T], what: &str) -> anyhow::Result<Vec<T>> {
    let question = format!(
        "Select {what} (1-{}) separated by commas, dashes or all",
        items.len()
    );

    loop {
        let answer = ask(&question)?;
        match selection::select(items, &answer) {
            Ok(chosen) => return Ok(chosen),
            Err(SelectionError::Empty) => bail!("nothing selected"),
            Err(e) => warn!("Invalid selection: {e}"),
        }
    }
}
