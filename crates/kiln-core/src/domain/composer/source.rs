//! Line-oriented text builder shared by every template.

use crate::domain::value_objects::WrapperKind;

const INDENT_STEP: usize = 2;

/// Accumulates scaffold text one line at a time.
#[derive(Debug, Default)]
pub struct Source {
    buf: String,
}

impl Source {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` indented by `indent` spaces. Empty text yields an empty
    /// line with no trailing whitespace.
    pub fn line(&mut self, indent: usize, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.buf.extend(std::iter::repeat_n(' ', indent));
            self.buf.push_str(text);
        }
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Append several lines at the same indentation.
    pub fn lines<I, S>(&mut self, indent: usize, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(indent, line);
        }
    }

    /// Emit `wrappers` around `root`.
    ///
    /// Opening constructs are written outermost first, then the root, then
    /// the closing constructs innermost first. Each level indents by two
    /// more spaces. `lead` prefixes the outermost line and `child_lead`
    /// every line nested inside a wrapper; with no wrappers the root gets
    /// `lead`.
    ///
    /// `wrappers` must already be in nesting order.
    pub fn nest<F>(
        &mut self,
        indent: usize,
        (lead, child_lead): (&str, &str),
        wrappers: &[WrapperKind],
        layer: F,
        root: &str,
    ) where
        F: Fn(WrapperKind) -> (String, String),
    {
        let layers: Vec<_> = wrappers.iter().map(|kind| layer(*kind)).collect();
        let prefix = |depth: usize| if depth == 0 { lead } else { child_lead };

        for (depth, (open, _)) in layers.iter().enumerate() {
            self.line(indent + depth * INDENT_STEP, format!("{}{open}", prefix(depth)));
        }
        let depth = layers.len();
        self.line(indent + depth * INDENT_STEP, format!("{}{root}", prefix(depth)));
        for (depth, (_, close)) in layers.iter().enumerate().rev() {
            self.line(indent + depth * INDENT_STEP, close);
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(kind: WrapperKind) -> (String, String) {
        (format!("<{kind}>"), format!("</{kind}>"))
    }

    #[test]
    fn nest_without_wrappers_emits_only_root() {
        let mut src = Source::new();
        src.nest(2, ("", ""), &[], tags, "<App />");
        assert_eq!(src.finish(), "  <App />\n");
    }

    #[test]
    fn nest_indents_each_level() {
        let mut src = Source::new();
        src.nest(
            0,
            ("", ""),
            &[WrapperKind::Theme, WrapperKind::Database],
            tags,
            "<App />",
        );
        assert_eq!(
            src.finish(),
            "<theme>\n  <database>\n    <App />\n  </database>\n</theme>\n"
        );
    }

    #[test]
    fn nest_applies_leads() {
        let mut src = Source::new();
        src.nest(
            0,
            ("home: ", "child: "),
            &[WrapperKind::Auth],
            |_| ("Gate(".into(), "),".into()),
            "Page(),",
        );
        assert_eq!(src.finish(), "home: Gate(\n  child: Page(),\n),\n");
    }

    #[test]
    fn empty_line_has_no_trailing_spaces() {
        let mut src = Source::new();
        src.line(8, "");
        assert_eq!(src.finish(), "\n");
    }
}
