use lpc_ast::{LiteralKind, NodeId, NodeKind, TextRange, TextSize};
use lpc_tokenizer::SyntaxKind::{self, *};
use lpc_tokenizer::{Token, TokenSet, is_type_allowed_as_name};

use super::{collections, delimited, items};
use crate::parser::{Parser, Result};

const PREFIX_OPERATORS: TokenSet = TokenSet::new([UNARY_OP, ARITH_OP, ASSIGN_OP]);

pub(crate) fn expr(p: &mut Parser<'_>) -> Result<NodeId> {
    let lhs = unary(p)?;
    continue_expr(p, lhs)
}

/// Finishes an expression whose first operand was parsed elsewhere.
pub(crate) fn expr_from(p: &mut Parser<'_>, lhs: NodeId) -> Result<NodeId> {
    let lhs = postfix(p, lhs)?;
    continue_expr(p, lhs)
}

fn continue_expr(p: &mut Parser<'_>, lhs: NodeId) -> Result<NodeId> {
    let lhs = implied(p, lhs)?;
    let lhs = climb(p, lhs, 0)?;
    let lhs = ternary(p, lhs)?;
    assignment(p, lhs)
}

/// A call argument: a declaration inside a prototype, otherwise an
/// expression.
pub(crate) fn argument(p: &mut Parser<'_>) -> Result<NodeId> {
    match p.peek_kind() {
        MODIFIER | TYPE => items::parameter(p),
        _ => expr(p),
    }
}

fn binary_precedence(kind: SyntaxKind, op: &str) -> Option<u8> {
    let prec = match (kind, op) {
        (LOGICAL_OP, "||") => 1,
        (LOGICAL_OP, "&&") => 2,
        (ARITH_OP, "|") => 3,
        (ARITH_OP, "^") => 4,
        (ARITH_OP, "&") => 5,
        (BINARY_OP, "==" | "!=") => 6,
        (BINARY_OP, "<" | "<=" | ">" | ">=") => 7,
        (BINARY_OP, "<<" | ">>") => 8,
        (ARITH_OP, "+" | "-") => 9,
        (STAR, _) | (ARITH_OP, "/" | "%") => 10,
        _ => return None,
    };
    Some(prec)
}

fn current_precedence(p: &mut Parser<'_>) -> Option<u8> {
    let token = p.peek();
    binary_precedence(token.kind, p.text(token.range))
}

/// Precedence climbing. Only a tighter operator after the right operand
/// re-climbs into it, so a chain of equal rank groups left to right.
fn climb(p: &mut Parser<'_>, mut lhs: NodeId, min: u8) -> Result<NodeId> {
    while let Some(prec) = current_precedence(p).filter(|&prec| prec >= min) {
        let op = p.bump()?;

        let rhs = unary(p)?;
        let mut rhs = implied(p, rhs)?;
        while current_precedence(p).is_some_and(|next| next > prec) {
            rhs = climb(p, rhs, prec + 1)?;
        }

        let range = p.span(lhs, rhs);
        let kind = if op.kind == LOGICAL_OP {
            NodeKind::Logical { left: lhs, op: op.range, right: rhs }
        } else {
            NodeKind::Binary { left: lhs, op: op.range, right: rhs, implied: false }
        };
        lhs = p.alloc(kind, range);
    }
    Ok(lhs)
}

/// Adjacent string pieces (`"a" "b"`, `FOO "b"`, `"a" BAR`) are joined by an
/// implied `+` that has no operator text.
fn implied(p: &mut Parser<'_>, mut lhs: NodeId) -> Result<NodeId> {
    loop {
        let next = p.peek_kind();
        let joins = match p.kind(lhs) {
            NodeKind::Literal { kind: LiteralKind::String } => {
                matches!(next, STRING | STRING_BLOCK_START | NAME)
            }
            NodeKind::StringBlock
            | NodeKind::Identifier
            | NodeKind::Binary { implied: true, .. } => matches!(next, STRING | STRING_BLOCK_START),
            _ => false,
        };
        if !joins {
            return Ok(lhs);
        }

        let rhs = primary(p)?;
        let rhs = postfix(p, rhs)?;

        let op = TextRange::empty(p.end(lhs));
        let range = p.span(lhs, rhs);
        lhs = p.alloc(NodeKind::Binary { left: lhs, op, right: rhs, implied: true }, range);
    }
}

/// Both branches are full expressions, so `c ? x = 1 : y = 2` assigns in
/// either branch.
fn ternary(p: &mut Parser<'_>, test: NodeId) -> Result<NodeId> {
    if p.eat(QUESTION)?.is_none() {
        return Ok(test);
    }

    let consequent = expr(p)?;
    p.expect(COLON, "`:`")?;

    let alternate = expr(p)?;

    let range = p.span(test, alternate);
    Ok(p.alloc(NodeKind::Ternary { test, consequent, alternate }, range))
}

fn assignment(p: &mut Parser<'_>, left: NodeId) -> Result<NodeId> {
    let token = p.peek();
    if token.kind != ASSIGN_OP || is_step(p, token) {
        return Ok(left);
    }
    let op = p.bump()?;

    let right = expr(p)?;
    let range = p.span(left, right);
    Ok(p.alloc(NodeKind::Assignment { left, op: op.range, right: Some(right) }, range))
}

fn is_step(p: &Parser<'_>, token: Token) -> bool {
    token.kind == ASSIGN_OP && matches!(p.text(token.range), "++" | "--")
}

pub(crate) fn unary(p: &mut Parser<'_>) -> Result<NodeId> {
    let token = p.peek();

    if token.kind == TYPE_CAST {
        p.bump()?;
        let text = p.text(token.range);
        let word = text.trim_start_matches(|c: char| !c.is_ascii_alphabetic());
        let word_len = word
            .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(word.len());
        let skipped = TextSize::of(&text[..text.len() - word.len()]);
        let ty = TextRange::at(token.range.start() + skipped, TextSize::of(&word[..word_len]));
        let is_array = text.contains('*');

        let argument = unary(p)?;
        let range = TextRange::new(token.range.start(), p.end(argument));
        return Ok(p.alloc(NodeKind::TypeCast { ty, is_array, argument }, range));
    }

    let is_prefix = PREFIX_OPERATORS.contains(token.kind)
        && match token.kind {
            ASSIGN_OP => is_step(p, token),
            ARITH_OP => matches!(p.text(token.range), "-" | "+" | "&"),
            _ => true,
        };
    if is_prefix {
        p.bump()?;
        let argument = unary(p)?;
        let range = TextRange::new(token.range.start(), p.end(argument));
        return Ok(p.alloc(NodeKind::Unary { op: token.range, argument }, range));
    }

    let lhs = primary(p)?;
    postfix(p, lhs)
}

fn is_callable(kind: &NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Identifier
            | NodeKind::ParentAccessor { .. }
            | NodeKind::Paren { .. }
            | NodeKind::Index { .. }
            | NodeKind::Call { .. }
            | NodeKind::Member { .. }
    )
}

fn postfix(p: &mut Parser<'_>, mut lhs: NodeId) -> Result<NodeId> {
    loop {
        let token = p.peek();
        lhs = match token.kind {
            PAREN_START if is_callable(p.kind(lhs)) => call(p, lhs)?,
            INDEXOR_START => collections::index(p, lhs)?,
            ARROW | DOT => member(p, lhs)?,
            DOUBLE_COLON if matches!(p.kind(lhs), NodeKind::Identifier) => {
                p.bump()?;
                let member = name(p)?;
                let range = p.span(lhs, member);
                p.alloc(NodeKind::ParentAccessor { scope: Some(lhs), member }, range)
            }
            ASSIGN_OP if is_step(p, token) => {
                p.bump()?;
                let range = TextRange::new(p.start(lhs), token.range.end());
                p.alloc(NodeKind::Assignment { left: lhs, op: token.range, right: None }, range)
            }
            ELLIPSIS => {
                p.bump()?;
                let range = TextRange::new(p.start(lhs), token.range.end());
                p.alloc(NodeKind::Spread { argument: lhs }, range)
            }
            _ => return Ok(lhs),
        };
    }
}

fn call(p: &mut Parser<'_>, callee: NodeId) -> Result<NodeId> {
    p.expect(PAREN_START, "`(`")?;
    let (args, close) = delimited(p, PAREN_END, "`)`", argument)?;

    let range = TextRange::new(p.start(callee), close.range.end());
    Ok(p.alloc(NodeKind::Call { callee, args }, range))
}

fn member(p: &mut Parser<'_>, object: NodeId) -> Result<NodeId> {
    let dot = p.bump()?.kind == DOT;

    let property = if p.at(PAREN_START) {
        collections::paren(p)?
    } else {
        let name = name(p)?;
        if p.at(PAREN_START) { call(p, name)? } else { name }
    };

    let range = p.span(object, property);
    Ok(p.alloc(NodeKind::Member { object, property, dot }, range))
}

pub(crate) fn at_name(p: &mut Parser<'_>) -> bool {
    let token = p.peek();
    match token.kind {
        NAME => true,
        TYPE => is_type_allowed_as_name(p.text(token.range)),
        _ => false,
    }
}

/// An identifier, including type words that double as names.
pub(crate) fn name(p: &mut Parser<'_>) -> Result<NodeId> {
    if !at_name(p) {
        return Err(p.unexpected_with("expected a name"));
    }
    let token = p.bump()?;
    Ok(p.alloc(NodeKind::Identifier, token.range))
}

pub(crate) fn primary(p: &mut Parser<'_>) -> Result<NodeId> {
    let token = p.peek();

    let literal = match token.kind {
        NUMBER => Some(LiteralKind::Number),
        STRING => Some(LiteralKind::String),
        CHAR => Some(LiteralKind::Char),
        SYMBOL => Some(LiteralKind::Symbol),
        _ => None,
    };
    if let Some(kind) = literal {
        p.bump()?;
        return Ok(p.alloc(NodeKind::Literal { kind }, token.range));
    }

    match token.kind {
        NAME | TYPE if at_name(p) => name(p),
        CLOSURE_ARG => {
            p.bump()?;
            Ok(p.alloc(NodeKind::Identifier, token.range))
        }
        CLOSURE => {
            p.bump()?;
            Ok(p.alloc(NodeKind::Closure, token.range))
        }
        LAMBDA_INDEXOR => {
            p.bump()?;
            Ok(p.alloc(NodeKind::LambdaIndexor, token.range))
        }
        DOUBLE_COLON => {
            p.bump()?;
            let member = name(p)?;
            let range = TextRange::new(token.range.start(), p.end(member));
            Ok(p.alloc(NodeKind::ParentAccessor { scope: None, member }, range))
        }
        STRING_BLOCK_START => collections::string_block(p),
        PAREN_START => collections::paren(p),
        ARRAY_START => collections::array(p),
        MAPPING_START => collections::mapping(p),
        INLINE_CLOSURE_START => collections::inline_closure(p),
        LAMBDA_START => collections::lambda(p),
        _ => Err(p.unexpected_with("expected an expression")),
    }
}
