use lpc_ast::{IndexorMark, NodeId, NodeKind, TextRange};
use lpc_tokenizer::SyntaxKind::*;
use lpc_tokenizer::TokenSet;

use super::{Context, delimited, exprs, stmts};
use crate::parser::{Parser, Result};

/// Items of an inline closure that are parsed as full statements.
const CLOSURE_STATEMENTS: TokenSet = TokenSet::new([
    IF_KW,
    WHILE_KW,
    DO_KW,
    FOR_KW,
    FOREACH_KW,
    SWITCH_KW,
    RETURN_KW,
    BREAK_KW,
    CONTINUE_KW,
    MODIFIER,
    TYPE,
]);

pub(crate) fn string_block(p: &mut Parser<'_>) -> Result<NodeId> {
    let open = p.expect(STRING_BLOCK_START, "a text block")?;
    p.expect(STRING_BLOCK_BODY, "a text block body")?;
    let close = p.expect(STRING_BLOCK_END, "the text block marker")?;

    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::StringBlock, range))
}

/// `( ... )`, or a struct literal when the paren opens with `<name>`.
pub(crate) fn paren(p: &mut Parser<'_>) -> Result<NodeId> {
    let open = p.expect(PAREN_START, "`(`")?;

    if let Some(name) = p.eat(STRUCT_TYPE)? {
        let (items, close) = delimited(p, PAREN_END, "`)`", struct_item)?;
        let range = TextRange::new(open.range.start(), close.range.end());
        return Ok(p.alloc(NodeKind::StructLiteral { name: name.range, items }, range));
    }

    let (items, close) = delimited(p, PAREN_END, "`)`", exprs::expr)?;
    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::Paren { items }, range))
}

/// A positional value, or `member: value`.
fn struct_item(p: &mut Parser<'_>) -> Result<NodeId> {
    let key = exprs::expr(p)?;
    if !matches!(p.kind(key), NodeKind::Identifier) || p.eat(COLON)?.is_none() {
        return Ok(key);
    }

    let value = exprs::expr(p)?;
    let range = p.span(key, value);
    Ok(p.alloc(NodeKind::MappingPair { key, values: vec![value] }, range))
}

pub(crate) fn array(p: &mut Parser<'_>) -> Result<NodeId> {
    let open = p.expect(ARRAY_START, "`({`")?;
    let (elements, close) = delimited(p, ARRAY_END, "`})`", exprs::expr)?;

    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::Array { elements }, range))
}

pub(crate) fn mapping(p: &mut Parser<'_>) -> Result<NodeId> {
    let open = p.expect(MAPPING_START, "`([`")?;
    let (pairs, close) = delimited(p, MAPPING_END, "`])`", mapping_pair)?;

    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::Mapping { pairs }, range))
}

/// `key: value; value`. A key without values is a set-style entry.
fn mapping_pair(p: &mut Parser<'_>) -> Result<NodeId> {
    let key = exprs::expr(p)?;

    let mut values = Vec::new();
    if p.eat(COLON)?.is_some() {
        values.push(exprs::expr(p)?);
        while p.eat(SEMICOLON)?.is_some() {
            values.push(exprs::expr(p)?);
        }
    }

    let end = values.last().map_or(p.end(key), |&last| p.end(last));
    let range = TextRange::new(p.start(key), end);
    Ok(p.alloc(NodeKind::MappingPair { key, values }, range))
}

pub(crate) fn index(p: &mut Parser<'_>, object: NodeId) -> Result<NodeId> {
    let open = p.expect(INDEXOR_START, "`[`")?;

    let mut parts = Vec::new();
    loop {
        let token = p.peek();
        let mark = match token.kind {
            INDEXOR_END => break,
            FROM_END => IndexorMark::FromEnd,
            RANGE => IndexorMark::Range,
            COMMA => IndexorMark::Comma,
            _ => {
                parts.push(exprs::expr(p)?);
                continue;
            }
        };
        p.bump()?;
        parts.push(p.alloc(NodeKind::IndexorMark { mark }, token.range));
    }
    let close = p.expect(INDEXOR_END, "`]`")?;

    let indexor_range = TextRange::new(open.range.start(), close.range.end());
    let indexor = p.alloc(NodeKind::Indexor { parts }, indexor_range);

    let range = TextRange::new(p.start(object), close.range.end());
    Ok(p.alloc(NodeKind::Index { object, indexor }, range))
}

/// `(: ... :)`: expressions with optional `;` separators, or statements.
pub(crate) fn inline_closure(p: &mut Parser<'_>) -> Result<NodeId> {
    let open = p.expect(INLINE_CLOSURE_START, "`(:`")?;

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

        let kind = p.peek_kind();
        if kind == INLINE_CLOSURE_END {
            break;
        }
        if kind == SEMICOLON {
            p.bump()?;
            continue;
        }

        let item = if CLOSURE_STATEMENTS.contains(kind) {
            stmts::statement(p, Context::Block)?
        } else {
            let expr = exprs::expr(p)?;
            p.eat(SEMICOLON)?;
            expr
        };
        items.push(item);
        let rest = p.flush_pending(item);
        items.extend(rest);
    }
    let close = p.expect(INLINE_CLOSURE_END, "`:)`")?;

    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::InlineClosure { items }, range))
}

/// `lambda(args, code)`.
pub(crate) fn lambda(p: &mut Parser<'_>) -> Result<NodeId> {
    let open = p.expect(LAMBDA_START, "`lambda(`")?;
    let args = exprs::expr(p)?;
    p.expect(COMMA, "`,`")?;
    let code = exprs::expr(p)?;
    let close = p.expect(LAMBDA_END, "`)`")?;

    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::Lambda { args, code }, range))
}
