//! Indentation-aware text builder shared by the generators

use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Line-oriented source writer
///
/// Lines are terminated with `\n` and indented by two spaces per level.
/// Blank lines never carry trailing whitespace.
#[derive(Debug, Default)]
pub struct CodeWriter {
    buf: String,
    depth: usize,
}

impl CodeWriter {
    /// Create an empty writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one line at the current depth
    pub fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        let text = text.as_ref();
        if !text.is_empty() {
            for _ in 0..self.depth {
                self.buf.push_str(INDENT);
            }
            self.buf.push_str(text);
        }
        self.buf.push('\n');
        self
    }

    /// Write an empty line
    pub fn blank(&mut self) -> &mut Self {
        self.line("")
    }

    /// Write a line and indent what follows
    pub fn open(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.line(text);
        self.depth += 1;
        self
    }

    /// Dedent and write a closing line
    pub fn close(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self.line(text)
    }

    /// Indent subsequent lines by one level
    pub fn indent(&mut self) -> &mut Self {
        self.depth += 1;
        self
    }

    /// Remove one level of indentation
    pub fn dedent(&mut self) -> &mut Self {
        self.depth = self.depth.saturating_sub(1);
        self
    }

    /// Write a block of pre-formatted lines at the current depth
    pub fn lines(&mut self, block: &str) -> &mut Self {
        for line in block.lines() {
            self.line(line);
        }
        self
    }

    /// Write `import { a, b } from 'module';`, wrapping long lists
    pub fn import(&mut self, names: &[&str], module: &str) -> &mut Self {
        self.import_with("import", names, module)
    }

    /// Write `import type { a, b } from 'module';`
    pub fn import_type(&mut self, names: &[&str], module: &str) -> &mut Self {
        self.import_with("import type", names, module)
    }

    fn import_with(&mut self, keyword: &str, names: &[&str], module: &str) -> &mut Self {
        if names.is_empty() {
            return self;
        }
        let single = format!("{keyword} {{ {} }} from '{module}';", names.join(", "));
        if single.len() <= 80 {
            return self.line(single);
        }
        self.open(format!("{keyword} {{"));
        for name in names {
            self.line(format!("{name},"));
        }
        self.close(format!("}} from '{module}';"))
    }

    /// Finish and return the text
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Render `value` as a single-quoted string literal
///
/// # Examples
///
/// ```
/// # use feature_builder::generators::writer::quote;
/// assert_eq!(quote("it's"), r"'it\'s'");
/// ```
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:x}}}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// Render a number the way a script literal would show it
#[must_use]
pub fn number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
