//! Colored terminal output on stderr.

use console::{Style, Term};

pub(crate) struct Output {
    term: Term,
    ok: Style,
    warn: Style,
    fail: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
        }
    }

    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.ok, msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.warn, msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.fail, msg);
    }

    /// Horizontal rule between a report and its summary.
    pub(crate) fn rule(&self) {
        let width = usize::from(self.term.size().1).clamp(20, 60);
        let _ = self.term.write_line(&"─".repeat(width));
    }

    fn styled(&self, style: &Style, msg: &str) {
        let _ = self.term.write_line(&style.apply_to(msg).to_string());
    }
}
