//! Console reporting.
//!
//! The pipeline talks to the user only through a [`Reporter`], so the library
//! can run against any sink (stderr for the CLI, a buffer in tests).

use std::fmt::Display;
use std::io::{self, Write};

use crate::filter::Summary;

/// Prefix for lines announcing a written file.
pub const DONE_MARK: &str = "\u{2713}";
/// Prefix for the fatal error line.
pub const ERROR_MARK: &str = "\u{2718}";

const RULE_WIDTH: usize = 60;

/// Human-readable progress and summary output.
///
/// Write failures on the sink are ignored.
pub struct Reporter<W: Write> {
    sink: W,
}

impl Reporter<io::Stderr> {
    /// Reporter writing to standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Returns the underlying sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// A horizontal rule with a centred title.
    pub fn rule(&mut self, title: &str) {
        let padded = format!(" {} ", title);
        let _ = writeln!(self.sink, "{:=^width$}", padded, width = RULE_WIDTH);
    }

    pub fn status(&mut self, message: impl Display) {
        let _ = writeln!(self.sink, "{}", message);
    }

    pub fn success(&mut self, message: impl Display) {
        let _ = writeln!(self.sink, "{} {}", DONE_MARK, message);
    }

    pub fn warning(&mut self, message: impl Display) {
        let _ = writeln!(self.sink, "warning: {}", message);
    }

    /// Reports a fatal error, with an optional hint on the following line.
    pub fn error(&mut self, message: impl Display, hint: Option<&str>) {
        let _ = writeln!(self.sink, "{} Error: {}", ERROR_MARK, message);
        if let Some(hint) = hint {
            let _ = writeln!(self.sink, "  hint: {}", hint);
        }
    }

    /// The end-of-run summary block.
    pub fn summary(&mut self, summary: &Summary) {
        let _ = writeln!(self.sink, "Summary:");
        let _ = writeln!(
            self.sink,
            "  Entries in original bibliography: {}",
            summary.total
        );
        let _ = writeln!(self.sink, "  Cited entries:                    {}", summary.used);
        let _ = writeln!(
            self.sink,
            "  Removed entries:                  {}",
            summary.removed
        );
        let _ = writeln!(
            self.sink,
            "  Cleaned bibliography:             {}",
            summary.output_path.display()
        );
        let _ = writeln!(
            self.sink,
            "  Removed entries backup:           {}",
            summary.backup_path.display()
        );
        let _ = self.sink.flush();
    }
}
