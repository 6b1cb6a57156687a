use std::fmt;

/// One line of user-facing log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry(String);

impl LogEntry {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for LogEntry {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Append-only record of selection and processing activity.
///
/// Lines are kept in call order for the life of the sink; only [`clear`]
/// removes them. Display surfaces pull lines with [`lines`] or [`since`].
///
/// [`clear`]: LogSink::clear
/// [`lines`]: LogSink::lines
/// [`since`]: LogSink::since
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    entries: Vec<LogEntry>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line. Trailing line terminators are stripped.
    pub fn append(&mut self, line: impl Into<String>) {
        let mut line = line.into();
        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        self.entries.push(LogEntry(line));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn lines(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Lines appended after the first `cursor` lines.
    ///
    /// A cursor past the end yields nothing. Cursors are not adjusted by
    /// [`clear`](LogSink::clear): a reader must reset its cursor to 0 when
    /// the log is cleared, or it will skip lines appended afterwards.
    pub fn since(&self, cursor: usize) -> &[LogEntry] {
        self.entries.get(cursor..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whole log as text, one line per entry.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(entry.as_str());
            text.push('\n');
        }
        text
    }
}
