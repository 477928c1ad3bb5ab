use camino::Utf8PathBuf;
use line_index::{LineCol, LineIndex};
use text_size::TextSize;

/// A source file as handed to the formatter.
#[derive(Debug)]
pub struct SourceFile {
    path: Utf8PathBuf,
    text: String,
    line_index: LineIndex,
}

impl SourceFile {
    pub fn new(path: impl Into<Utf8PathBuf>, text: String) -> Self {
        let line_index = LineIndex::new(&text);
        Self { path: path.into(), text, line_index }
    }

    pub fn path(&self) -> &Utf8PathBuf {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// One-based line and column of `offset`, clamped to the end of the text.
    /// The column counts characters, not bytes.
    pub fn line_col(&self, offset: TextSize) -> (u32, u32) {
        let offset = offset.min(TextSize::of(self.text.as_str()));
        let LineCol { line, col } = self.line_index.line_col(offset);

        let end = usize::from(offset);
        let start = end - col as usize;
        let chars = self.text.get(start..end).map_or(col, |prefix| prefix.chars().count() as u32);
        (line + 1, chars + 1)
    }

    /// `path:line:col` for diagnostics.
    pub fn location(&self, offset: TextSize) -> String {
        let (line, col) = self.line_col(offset);
        format!("{}:{line}:{col}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_one_based() {
        let file = SourceFile::new("room.c", "int x;\nint y = ;\n".to_owned());
        assert_eq!(file.line_col(TextSize::new(0)), (1, 1));
        assert_eq!(file.line_col(TextSize::new(15)), (2, 9));
        assert_eq!(file.location(TextSize::new(15)), "room.c:2:9");
    }

    #[test]
    fn column_counts_characters() {
        let file = SourceFile::new("room.c", "s = \"Café\"; x = ;\n".to_owned());
        let offset = TextSize::of("s = \"Café\"; x = ");
        assert_eq!(file.line_col(offset), (1, 17));
        assert_eq!(file.location(offset), "room.c:1:17");
    }

    #[test]
    fn offset_past_the_end_is_clamped() {
        let file = SourceFile::new("room.c", "x".to_owned());
        assert_eq!(file.line_col(TextSize::new(40)), (1, 2));
    }
}
