use lpc_ast::{NodeId, NodeKind};
use lpc_tokenizer::SyntaxKind::{self, *};
use lpc_tokenizer::Token;

use crate::parser::{Parser, Result};

mod collections;
mod exprs;
mod items;
mod stmts;

/// Where a statement list lives. Only the file scope may define functions
/// without a return type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Context {
    Root,
    Block,
}

pub(crate) fn source_file(p: &mut Parser<'_>) -> Result<Vec<NodeId>> {
    let roots = statement_list(p, Context::Root, &[])?;

    let eof = p.raw();
    if let Some(message) = eof.error {
        return Err(lpc_errors::ParseError::new(message, eof.range));
    }
    if eof.kind != EOF {
        return Err(p.unexpected());
    }
    Ok(roots)
}

/// Statements up to (not including) one of `closers`, with comments and
/// blank lines placed as siblings or suffixes.
pub(crate) fn statement_list(
    p: &mut Parser<'_>,
    ctx: Context,
    closers: &[SyntaxKind],
) -> Result<Vec<NodeId>> {
    let mut items: Vec<NodeId> = Vec::new();

    loop {
        let token = p.raw();
        match token.kind {
            LINE_COMMENT | BLOCK_COMMENT => {
                let owner = items.last().copied().filter(|&last| {
                    !p.on_own_line()
                        && !p.has_suffix(last)
                        && !matches!(p.kind(last), NodeKind::BlankLine)
                });
                let comment = p.comment();
                match owner {
                    Some(owner) => p.set_suffix(owner, comment),
                    None => items.push(comment),
                }
            }
            BLANK_LINES => {
                p.bump_raw();
                let after_blank =
                    items.last().is_some_and(|&last| matches!(p.kind(last), NodeKind::BlankLine));
                if !items.is_empty() && !after_blank {
                    items.push(p.alloc(NodeKind::BlankLine, token.range));
                }
            }
            SEMICOLON => {
                p.bump()?;
            }
            EOF => break,
            kind if closers.contains(&kind) => break,
            _ => {
                let stmt = stmts::statement(p, ctx)?;
                items.push(stmt);
                let rest = p.flush_pending(stmt);
                items.extend(rest);
            }
        }
    }

    while items.last().is_some_and(|&last| matches!(p.kind(last), NodeKind::BlankLine)) {
        items.pop();
    }
    Ok(items)
}

/// Comma-separated items after an already consumed opener, up to `ket`.
/// Comments become suffixes of the item they follow on the same line, or
/// items of their own. Preprocessor lines are items without a separator.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    ket: SyntaxKind,
    ket_text: &str,
    mut item: impl FnMut(&mut Parser<'_>) -> Result<NodeId>,
) -> Result<(Vec<NodeId>, Token)> {
    let mut items: Vec<NodeId> = Vec::new();

    loop {
        match p.raw().kind {
            LINE_COMMENT | BLOCK_COMMENT => {
                let owner = items
                    .last()
                    .copied()
                    .filter(|&last| !p.on_own_line() && !p.has_suffix(last));
                let comment = p.comment();
                match owner {
                    Some(owner) => p.set_suffix(owner, comment),
                    None => items.push(comment),
                }
                continue;
            }
            BLANK_LINES => {
                p.bump_raw();
                continue;
            }
            _ => {}
        }

        match p.peek_kind() {
            kind if kind == ket => break,
            COMMA => return Err(p.unexpected()),
            DIRECTIVE => {
                items.push(items::directive(p)?);
                continue;
            }
            _ => {}
        }

        let id = item(p)?;
        items.push(id);

        let separator = p.peek_kind();
        let rest = p.flush_pending(id);
        items.extend(rest);

        match separator {
            COMMA => {
                p.bump()?;
            }
            kind if kind == ket => break,
            DIRECTIVE => {}
            _ => return Err(p.unexpected_with(&format!("expected `,` or {ket_text}"))),
        }
    }

    let close = p.expect(ket, ket_text)?;
    Ok((items, close))
}
