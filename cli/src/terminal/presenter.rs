use std::io::stdout;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::{Span, debug, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;
use tracing_indicatif::suspend_tracing_indicatif;

use airlock_common::ports::presenter::Presenter;

use crate::terminal::{print, spinner};

/// Draws the target table on a cleared screen and the status line on a spinner.
pub struct TerminalPresenter {
    span: Span,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        let span = info_span!("scan");
        span.pb_set_style(&spinner::style());
        span.pb_start();
        Self { span }
    }
}

impl Presenter for TerminalPresenter {
    fn render_block(&mut self, block: &str) {
        suspend_tracing_indicatif(|| {
            if let Err(e) = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)) {
                debug!("cannot clear terminal: {e}");
            }
        });
        print::table(block);
    }

    fn render_status(&mut self, line: &str) {
        self.span.pb_set_message(line);
    }
}
