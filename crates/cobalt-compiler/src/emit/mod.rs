//! Text emission for generated C.
//!
//! [`SourceWriter`] buffers generated lines with indentation. Nothing is
//! written anywhere until the pipeline hands the finished text to the caller.

pub mod names;

pub use names::{RECEIVER, base_member, c_declaration, c_ident, c_type, function_name};

/// Line-oriented text buffer with indentation.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    buf: String,
    depth: usize,
    indent_width: usize,
}

impl SourceWriter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            buf: String::new(),
            depth: 0,
            indent_width,
        }
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buf
                .extend(std::iter::repeat_n(' ', self.depth * self.indent_width));
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Write `header {` and indent.
    pub fn open(&mut self, header: impl AsRef<str>) {
        self.line(format!("{} {{", header.as_ref()));
        self.depth += 1;
    }

    /// Dedent and write `text`, usually a closing brace.
    pub fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
