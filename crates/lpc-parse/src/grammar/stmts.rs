use lpc_ast::{ControlFlowKind, LiteralKind, NodeId, NodeKind, TextRange};
use lpc_errors::ParseError;
use lpc_tokenizer::SyntaxKind::*;

use super::{Context, exprs, items, statement_list};
use crate::parser::{Parser, Result};

pub(crate) fn statement(p: &mut Parser<'_>, ctx: Context) -> Result<NodeId> {
    match p.peek_kind() {
        LEFT_BRACE => block(p, None),
        IF_KW => if_(p),
        WHILE_KW => while_(p),
        DO_KW => do_while(p),
        FOR_KW => for_(p),
        FOREACH_KW => foreach(p),
        SWITCH_KW => switch(p),
        RETURN_KW => return_(p),
        BREAK_KW | CONTINUE_KW => control_flow(p),
        INHERIT_KW => {
            let start = p.peek().range.start();
            items::inherit(p, Vec::new(), start)
        }
        DIRECTIVE => items::directive(p),
        MODIFIER | TYPE => items::declaration(p, ctx),
        _ => items::expression_statement(p, ctx),
    }
}

pub(crate) fn block(p: &mut Parser<'_>, open_comment: Option<NodeId>) -> Result<NodeId> {
    let open = p.expect(LEFT_BRACE, "`{`")?;

    let mut open_comment = open_comment;
    if open_comment.is_none()
        && matches!(p.raw().kind, LINE_COMMENT | BLOCK_COMMENT)
        && !p.on_own_line()
    {
        open_comment = Some(p.comment());
    }

    let statements = statement_list(p, Context::Block, &[RIGHT_BRACE])?;
    let close = p.expect(RIGHT_BRACE, "`}`")?;

    let range = TextRange::new(open.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::CodeBlock { open_comment, statements }, range))
}

/// Comments between a control header and its body. The first one is
/// returned, any others are parked.
fn header_comment(p: &mut Parser<'_>) -> Option<NodeId> {
    let mut first = None;
    while matches!(p.raw().kind, LINE_COMMENT | BLOCK_COMMENT) {
        let comment = p.comment();
        match first {
            None => first = Some(comment),
            Some(_) => p.park(comment),
        }
    }
    first
}

/// The body of a control statement: a block, a lone `;`, or one statement.
fn body(p: &mut Parser<'_>) -> Result<NodeId> {
    let comment = header_comment(p);
    if p.at(LEFT_BRACE) {
        return block(p, comment);
    }
    if let Some(comment) = comment {
        p.park(comment);
    }
    if p.at(SEMICOLON) {
        return placeholder(p);
    }
    statement(p, Context::Block)
}

fn placeholder(p: &mut Parser<'_>) -> Result<NodeId> {
    let semi = p.expect(SEMICOLON, "`;`")?;
    Ok(p.alloc(NodeKind::Literal { kind: LiteralKind::Placeholder }, semi.range))
}

fn condition(p: &mut Parser<'_>) -> Result<NodeId> {
    p.expect(PAREN_START, "`(`")?;
    let test = exprs::expr(p)?;
    p.expect(PAREN_END, "`)`")?;
    Ok(test)
}

fn if_(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;

    p.expect(PAREN_START, "`(`")?;
    let test = exprs::expr(p)?;
    if p.at(COMMA) {
        let comma = p.peek();
        return Err(ParseError::new("unexpected `,` in if condition", comma.range));
    }
    p.expect(PAREN_END, "`)`")?;

    let consequent = body(p)?;
    let mut end = p.end(consequent);

    p.trailing_comment(consequent);
    p.hold_blank();

    let mut alternate = None;
    if p.kind_after_blank() == ELSE_KW {
        p.drop_held_blank();
        p.bump()?;
        let branch = if p.at(IF_KW) { if_(p)? } else { body(p)? };
        end = p.end(branch);
        alternate = Some(branch);
    }

    let range = TextRange::new(keyword.range.start(), end);
    Ok(p.alloc(NodeKind::If { test, consequent, alternate }, range))
}

fn while_(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;
    let test = condition(p)?;
    let body = body(p)?;

    let range = TextRange::new(keyword.range.start(), p.end(body));
    Ok(p.alloc(NodeKind::While { test, body }, range))
}

fn do_while(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;
    let body = body(p)?;
    p.expect(WHILE_KW, "`while`")?;
    let test = condition(p)?;
    let semi = p.expect(SEMICOLON, "`;`")?;

    let range = TextRange::new(keyword.range.start(), semi.range.end());
    Ok(p.alloc(NodeKind::DoWhile { body, test }, range))
}

fn for_(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;
    p.expect(PAREN_START, "`(`")?;

    let init = match p.peek_kind() {
        SEMICOLON => None,
        MODIFIER | TYPE => Some(items::local_declaration(p)?),
        _ => Some(comma_list(p)?),
    };
    p.expect(SEMICOLON, "`;`")?;

    let test = if p.at(SEMICOLON) { None } else { Some(exprs::expr(p)?) };
    p.expect(SEMICOLON, "`;`")?;

    let update = if p.at(PAREN_END) { None } else { Some(comma_list(p)?) };
    p.expect(PAREN_END, "`)`")?;

    let body = body(p)?;

    let range = TextRange::new(keyword.range.start(), p.end(body));
    Ok(p.alloc(NodeKind::For { init, test, update, body }, range))
}

/// One expression, or several joined by commas.
fn comma_list(p: &mut Parser<'_>) -> Result<NodeId> {
    let first = exprs::expr(p)?;
    if !p.at(COMMA) {
        return Ok(first);
    }

    let mut items = vec![first];
    while p.eat(COMMA)?.is_some() {
        items.push(exprs::expr(p)?);
    }

    let range = p.span(first, items[items.len() - 1]);
    Ok(p.alloc(NodeKind::MultiExpression { items }, range))
}

fn foreach(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;
    p.expect(PAREN_START, "`(`")?;

    let mut vars = Vec::new();
    loop {
        let var = match p.peek_kind() {
            MODIFIER | TYPE => items::parameter(p)?,
            _ => exprs::expr(p)?,
        };
        vars.push(var);
        if p.eat(COMMA)?.is_none() {
            break;
        }
    }
    p.expect(FOREACH_IN, "`in` or `:`")?;

    let iterable = exprs::expr(p)?;
    let iterable = if p.eat(RANGE)?.is_some() {
        let last = exprs::expr(p)?;
        let range = p.span(iterable, last);
        p.alloc(NodeKind::Range { first: iterable, last }, range)
    } else {
        iterable
    };
    p.expect(PAREN_END, "`)`")?;

    let body = body(p)?;

    let range = TextRange::new(keyword.range.start(), p.end(body));
    Ok(p.alloc(NodeKind::Foreach { vars, iterable, body }, range))
}

fn switch(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;
    let test = condition(p)?;
    p.expect(LEFT_BRACE, "`{`")?;

    let mut cases: Vec<NodeId> = Vec::new();
    loop {
        match p.raw().kind {
            LINE_COMMENT | BLOCK_COMMENT => {
                let comment = p.comment();
                cases.push(comment);
            }
            BLANK_LINES => {
                p.bump_raw();
            }
            CASE_KW | DEFAULT_KW => cases.push(case(p)?),
            _ => break,
        }
    }
    let close = p.expect(RIGHT_BRACE, "`}`")?;

    let range = TextRange::new(keyword.range.start(), close.range.end());
    Ok(p.alloc(NodeKind::Switch { test, cases }, range))
}

fn case(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;

    let test = if keyword.kind == CASE_KW {
        let first = exprs::expr(p)?;
        if p.eat(RANGE)?.is_some() {
            let last = exprs::expr(p)?;
            let range = p.span(first, last);
            Some(p.alloc(NodeKind::Range { first, last }, range))
        } else {
            Some(first)
        }
    } else {
        None
    };
    let colon = p.expect(COLON, "`:`")?;

    let body = statement_list(p, Context::Block, &[CASE_KW, DEFAULT_KW, RIGHT_BRACE])?;
    let end = body.last().map_or(colon.range.end(), |&last| p.end(last));

    let range = TextRange::new(keyword.range.start(), end);
    Ok(p.alloc(NodeKind::Case { test, body }, range))
}

fn return_(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;

    let argument = match p.peek_kind() {
        SEMICOLON | INLINE_CLOSURE_END => None,
        _ => Some(exprs::expr(p)?),
    };

    // The last statement of an inline closure may omit its `;`.
    let end = match p.eat(SEMICOLON)? {
        Some(semi) => semi.range.end(),
        None if p.at(INLINE_CLOSURE_END) => {
            argument.map_or(keyword.range.end(), |argument| p.end(argument))
        }
        None => return Err(p.unexpected_with("expected `;`")),
    };

    let range = TextRange::new(keyword.range.start(), end);
    Ok(p.alloc(NodeKind::Return { argument }, range))
}

fn control_flow(p: &mut Parser<'_>) -> Result<NodeId> {
    let keyword = p.bump()?;
    let kind = match keyword.kind {
        BREAK_KW => ControlFlowKind::Break,
        _ => ControlFlowKind::Continue,
    };
    let semi = p.expect(SEMICOLON, "`;`")?;

    let range = TextRange::new(keyword.range.start(), semi.range.end());
    Ok(p.alloc(NodeKind::ControlFlow { kind }, range))
}
