mod grammar;
mod parser;
#[cfg(test)]
mod tests;

pub use lpc_ast::Document;
pub use lpc_errors::ParseError;

/// Parses a whole LPC source file. There is no recovery: the first syntax
/// error is returned.
#[tracing::instrument(level = "debug", skip_all, fields(len = text.len()))]
pub fn parse(text: &str) -> Result<Document, ParseError> {
    let mut parser = parser::Parser::new(text);
    let roots = grammar::source_file(&mut parser)?;
    tracing::debug!(roots = roots.len(), "parsed source file");
    Ok(parser.finish(roots))
}
