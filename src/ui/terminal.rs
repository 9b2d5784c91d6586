//! Terminal UI.
//!
//! All launcher output goes to stderr; stdout belongs to the delegate.

use console::Term;
use std::io::Write;

use super::{
    should_use_colors, OutputMode, ProgressSpinner, SpinnerHandle, StatusLine, UserInterface,
    VenvoyTheme,
};

/// Terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: VenvoyTheme,
    mode: OutputMode,
    spinners: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            VenvoyTheme::new()
        } else {
            VenvoyTheme::plain()
        };

        let term = Term::stderr();
        let spinners = term.is_term() && !crate::shell::is_ci();

        Self {
            term,
            theme,
            mode,
            spinners,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn hint(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "  {}", self.theme.format_hint(msg)).ok();
        }
    }

    fn key_value(&mut self, key: &str, value: &str) {
        writeln!(self.term, "{}", self.theme.format_key_value(key, value)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.spinners && self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            self.message(message);
            Box::new(StatusLine::new(
                self.term.clone(),
                self.theme.clone(),
                self.mode.shows_status(),
            ))
        }
    }
}
