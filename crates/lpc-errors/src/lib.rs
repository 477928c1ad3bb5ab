use std::fmt::Display;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::{TextRange, TextSize};

/// A fatal syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
    range: TextRange,
}

impl ParseError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self { message: message.into(), range }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let message = Level::Error.title(&self.message).snippet(
            Snippet::source(text)
                .origin(path)
                .annotation(Level::Error.span(self.span(text)).label("here"))
                .fold(true),
        );
        renderer.render(message)
    }

    // Clamped so an error at end of input still renders.
    fn span(&self, text: &str) -> std::ops::Range<usize> {
        let start = usize::from(self.range.start()).min(text.len());
        let end = usize::from(self.range.end()).min(text.len()).max(start);
        start..end
    }
}
