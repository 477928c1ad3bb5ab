mod options;
mod printer;
#[cfg(test)]
mod tests;

pub use lpc_ast::Document;
pub use lpc_errors::ParseError;
pub use options::FormatOptions;

/// Lays out a parsed document. Every line ends without trailing whitespace
/// and the output ends with a single newline.
pub fn print(document: &Document, options: &FormatOptions) -> String {
    printer::print_document(document, options)
}

/// Parses and prints `text` in one go.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn format(text: &str, options: &FormatOptions) -> Result<String, ParseError> {
    let document = lpc_parse::parse(text)?;
    let formatted = print(&document, options);
    tracing::debug!(len = formatted.len(), changed = formatted != text, "formatted source file");
    Ok(formatted)
}
