//! Result report writer.

use std::io::{self, Write};

use crate::models::ResultLine;

/// In-memory report for one input file, one line per input line.
#[derive(Debug, Default, Clone)]
pub struct ReportBuffer {
    buf: String,
    lines: usize,
}

impl ReportBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one result line
    pub fn push(&mut self, line: &ResultLine) {
        self.buf.push_str(&line.to_string());
        self.buf.push('\n');
        self.lines += 1;
    }

    pub fn len(&self) -> usize {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buf.as_bytes()
    }
}

/// Write the whole buffer in one go. Errors are returned unchanged.
pub fn write_report<W: Write>(out: &mut W, report: &ReportBuffer) -> io::Result<()> {
    out.write_all(report.as_bytes())?;
    out.flush()
}
