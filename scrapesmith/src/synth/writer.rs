//! Indentation-aware line writer for emitted scripts.

const INDENT: &str = "    ";

/// Accumulates script lines at the current block depth.
#[derive(Debug, Default)]
pub(crate) struct ScriptWriter {
    out: String,
    depth: usize,
}

impl ScriptWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Writes one line. Empty lines carry no indentation.
    pub(crate) fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.out.push_str(INDENT);
            }
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Writes a blank separator line, never two in a row.
    pub(crate) fn blank(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    /// Writes `text` as `#` comments, one per source line.
    pub(crate) fn comment(&mut self, text: &str) {
        if text.is_empty() {
            self.line("#");
            return;
        }
        for part in text.lines() {
            if part.is_empty() {
                self.line("#");
            } else {
                self.line(format!("# {part}"));
            }
        }
    }

    /// Writes `header` and runs `body` one level deeper.
    ///
    /// An empty body gets a `pass` so the block stays valid.
    pub(crate) fn block(&mut self, header: impl AsRef<str>, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.depth += 1;
        let before = self.out.len();
        body(self);
        if self.out.len() == before {
            self.line("pass");
        }
        self.depth -= 1;
    }

    /// Returns the script with exactly one trailing newline.
    pub(crate) fn finish(self) -> String {
        let mut out = self.out;
        let trimmed = out.trim_end_matches('\n').len();
        out.truncate(trimmed);
        out.push('\n');
        out
    }
}
