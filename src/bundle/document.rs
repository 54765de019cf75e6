//! Line-oriented document builder with indent tracking

use super::formatter::indent;

/// Accumulates lines of generated text.
///
/// Every line pushed is prefixed with `depth * indent_width` spaces; nested
/// blocks raise the depth for their body only.
#[derive(Debug)]
pub struct Document {
    lines: Vec<String>,
    depth: usize,
    indent_width: usize,
}

impl Document {
    pub fn new(indent_width: usize) -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
            indent_width,
        }
    }

    /// Push text at the current depth; embedded newlines become separate lines
    pub fn line(&mut self, text: &str) -> &mut Self {
        let rendered = indent(self.depth * self.indent_width, text);
        self.lines.extend(rendered.split('\n').map(str::to_string));
        self
    }

    /// Push an empty line (never indented)
    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Push `open`, render `body` one level deeper, then push `close`
    pub fn block(&mut self, open: &str, close: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.line(open);
        self.depth += 1;
        body(self);
        self.depth -= 1;
        self.line(close)
    }

    /// Push comma separated entries; the last one carries no trailing comma
    pub fn entries<I>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = String>,
    {
        let entries: Vec<String> = entries.into_iter().collect();
        let last = entries.len().saturating_sub(1);
        for (i, entry) in entries.iter().enumerate() {
            if i < last {
                self.line(&format!("{entry},"));
            } else {
                self.line(entry);
            }
        }
        self
    }

    /// Join all lines, terminated by a single newline
    pub fn finish(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
