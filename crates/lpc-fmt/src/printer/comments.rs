use lpc_ast::{CommentKind, NodeId, TextRange};

use super::{Doc, Printer};

impl<'a> Printer<'a> {
    pub(super) fn comment(&self, id: NodeId, kind: CommentKind) -> Doc<'a> {
        let text = self.source(id).trim();
        match kind {
            CommentKind::Line => {
                let body = text.strip_prefix("//").unwrap_or(text).trim();
                let comment =
                    if body.is_empty() { self.text("//") } else { self.text(format!("// {body}")) };
                comment.append(self.break_parent())
            }
            CommentKind::Block => self.block_comment(text),
        }
    }

    /// Block comments are re-flowed with ` * ` line prefixes. A comment with
    /// a single line of text collapses onto one line.
    fn block_comment(&self, text: &str) -> Doc<'a> {
        let lines = block_comment_lines(text);
        let with_text = lines.iter().filter(|line| !line.is_empty()).count();

        if with_text <= 1 {
            let body = lines.concat();
            if body.is_empty() {
                return self.text("/* */");
            }
            return self.text(format!("/* {body} */"));
        }

        let last = lines.len() - 1;
        let mut doc = self.text("/*");
        for (idx, line) in lines.iter().enumerate() {
            doc = match idx {
                0 if line.is_empty() => doc,
                0 => doc.append(" ").append(self.text(line.to_string())),
                _ if idx == last && line.is_empty() => doc.append(self.hardline()),
                _ => doc.append(self.hardline()).append(self.text(format!(" * {line}"))),
            };
        }
        doc.append(" */")
    }

    /// `#name key` and the argument lines. When the group breaks every line
    /// ends with a `\` continuation.
    pub(super) fn directive(
        &self,
        name: TextRange,
        key: Option<TextRange>,
        args: &[TextRange],
    ) -> Doc<'a> {
        let mut head = self.text("#").append(self.slice(name));
        if let Some(key) = key {
            head = head.append(" ").append(self.slice(key).trim());
        }
        if args.is_empty() {
            return head;
        }

        let separator = self.text(" \\").append(self.hardline()).flat_alt(self.text(" "));
        let args = self.concat(
            args.iter().map(|&arg| separator.clone().append(self.slice(arg).trim())),
        );
        head.append(self.indent(args)).group()
    }
}

/// The text of each line between `/*` and `*/`, trimmed and stripped of
/// leading stars. Lines of four or more stars are headlines and stay as they
/// are.
pub(crate) fn block_comment_lines(text: &str) -> Vec<&str> {
    let inner = text.strip_prefix("/*").unwrap_or(text);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    inner
        .split('\n')
        .map(|line| {
            let mut line = line.trim();
            if !line.starts_with("****") {
                while let Some(rest) = line.strip_prefix('*') {
                    line = rest.trim();
                }
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::block_comment_lines;

    #[test]
    fn strips_markers_and_stars() {
        let text = "/**\n     * Should not move\n     *\n     * the comment\n     */";
        assert_eq!(block_comment_lines(text), ["", "Should not move", "", "the comment", ""]);
    }

    #[test]
    fn keeps_headlines() {
        assert_eq!(block_comment_lines("/*\n**** Section ****\n*/"), ["", "**** Section ****", ""]);
    }
}
