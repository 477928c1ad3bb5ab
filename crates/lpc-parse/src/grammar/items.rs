use lpc_ast::{NodeId, NodeKind, TextRange, TextSize};
use lpc_errors::ParseError;
use lpc_tokenizer::SyntaxKind::*;
use lpc_tokenizer::{Token, is_type_allowed_as_name};

use super::{Context, delimited, exprs, stmts};
use crate::parser::{Parser, Result};

fn modifiers(p: &mut Parser<'_>) -> Result<Vec<TextRange>> {
    let mut modifiers = Vec::new();
    while p.at(MODIFIER) {
        modifiers.push(p.bump()?.range);
    }
    Ok(modifiers)
}

fn at_ampersand(p: &mut Parser<'_>) -> bool {
    p.at_text(ARITH_OP, "&")
}

fn eat_ampersand(p: &mut Parser<'_>) -> Result<Option<Token>> {
    if at_ampersand(p) { p.bump().map(Some) } else { Ok(None) }
}

fn at_declarator(p: &mut Parser<'_>) -> bool {
    exprs::at_name(p) || matches!(p.peek_kind(), STAR | ELLIPSIS) || at_ampersand(p)
}

fn is_struct_word(p: &Parser<'_>, token: Token) -> bool {
    matches!(p.text(token.range), "struct" | "class")
}

/// The rest of a type after its first word: `struct` and `class` are
/// followed by the struct name.
fn type_ref(p: &mut Parser<'_>, first: Token) -> Result<TextRange> {
    if !is_struct_word(p, first) {
        return Ok(first.range);
    }
    let name = p.expect(NAME, "a struct name")?;
    Ok(TextRange::new(first.range.start(), name.range.end()))
}

/// A type word that names a variable (`status = 1;`) rather than starting a
/// declaration.
fn is_type_used_as_name(p: &mut Parser<'_>, modifiers: &[TextRange], ty: Token) -> bool {
    modifiers.is_empty() && is_type_allowed_as_name(p.text(ty.range)) && !at_declarator(p)
}

pub(crate) fn declaration(p: &mut Parser<'_>, ctx: Context) -> Result<NodeId> {
    let start = p.peek().range.start();
    let modifiers = modifiers(p)?;

    if p.at(INHERIT_KW) {
        return inherit(p, modifiers, start);
    }

    let ty = match p.peek_kind() {
        TYPE => {
            let first = p.bump()?;
            if is_type_used_as_name(p, &modifiers, first) {
                let name = p.alloc(NodeKind::Identifier, first.range);
                let expr = exprs::expr_from(p, name)?;
                statement_end(p)?;
                return Ok(expr);
            }

            if is_struct_word(p, first) {
                let name = p.expect(NAME, "a struct name")?;
                if p.at(LEFT_BRACE) {
                    if let Some(&modifier) = modifiers.first() {
                        return Err(ParseError::new(
                            "modifiers are not allowed on a struct definition",
                            modifier,
                        ));
                    }
                    return struct_def(p, start, name);
                }
                Some(TextRange::new(first.range.start(), name.range.end()))
            } else {
                Some(first.range)
            }
        }
        // `static create() { ... }` has modifiers but no type.
        _ if !modifiers.is_empty() => None,
        _ => return Err(p.unexpected_with("expected a type")),
    };

    let head = p.peek().range.start();
    let is_array = p.eat(STAR)?.is_some();
    let by_ref = eat_ampersand(p)?.is_some();
    let name = exprs::name(p)?;

    if !by_ref && p.at(PAREN_START) {
        return function(p, ctx, start, modifiers, ty, is_array, name);
    }

    let end = p.end(name);
    let first = finish_declarator(p, head, end, Some(name), is_array, by_ref, false)?;
    var_decl_rest(p, start, modifiers, ty, first)
}

/// `int i = 0, j` in a `for` head. The `;` is left to the caller.
pub(crate) fn local_declaration(p: &mut Parser<'_>) -> Result<NodeId> {
    let start = p.peek().range.start();
    let modifiers = modifiers(p)?;
    let first = p.expect(TYPE, "a type")?;
    let ty = type_ref(p, first)?;

    let first = declarator(p, false)?;
    let mut declarators = vec![first];
    while p.eat(COMMA)?.is_some() {
        declarators.push(declarator(p, false)?);
    }

    let range = TextRange::new(start, p.end(declarators[declarators.len() - 1]));
    Ok(p.alloc(NodeKind::VarDecl { modifiers, ty: Some(ty), declarators }, range))
}

fn var_decl_rest(
    p: &mut Parser<'_>,
    start: TextSize,
    modifiers: Vec<TextRange>,
    ty: Option<TextRange>,
    first: NodeId,
) -> Result<NodeId> {
    let mut declarators = vec![first];
    while p.eat(COMMA)?.is_some() {
        let previous = declarators[declarators.len() - 1];
        p.trailing_comment(previous);
        declarators.push(declarator(p, false)?);
    }
    statement_end(p)?;

    let range = TextRange::new(start, p.end(declarators[declarators.len() - 1]));
    Ok(p.alloc(NodeKind::VarDecl { modifiers, ty, declarators }, range))
}

/// One function parameter, foreach variable, or prototype argument. A type
/// word that is really a name (`status`) falls back to an expression.
pub(crate) fn parameter(p: &mut Parser<'_>) -> Result<NodeId> {
    let start = p.peek().range.start();
    let modifiers = modifiers(p)?;
    let first = p.expect(TYPE, "a type")?;

    if is_type_used_as_name(p, &modifiers, first) {
        let name = p.alloc(NodeKind::Identifier, first.range);
        return exprs::expr_from(p, name);
    }
    let ty = type_ref(p, first)?;

    let mut end = ty.end();
    let mut declarators = Vec::new();
    if at_declarator(p) {
        let declarator = declarator(p, true)?;
        end = p.end(declarator);
        declarators.push(declarator);
    }

    let range = TextRange::new(start, end);
    Ok(p.alloc(NodeKind::VarDecl { modifiers, ty: Some(ty), declarators }, range))
}

fn declarator(p: &mut Parser<'_>, allow_default: bool) -> Result<NodeId> {
    let start = p.peek().range.start();
    let mut end = start;

    let star = p.eat(STAR)?;
    let ampersand = eat_ampersand(p)?;
    for token in star.iter().chain(&ampersand) {
        end = token.range.end();
    }

    let name = if exprs::at_name(p) { Some(exprs::name(p)?) } else { None };
    if let Some(name) = name {
        end = p.end(name);
    } else if end == start && !p.at(ELLIPSIS) {
        return Err(p.unexpected_with("expected a variable name"));
    }

    finish_declarator(p, start, end, name, star.is_some(), ampersand.is_some(), allow_default)
}

fn finish_declarator(
    p: &mut Parser<'_>,
    start: TextSize,
    mut end: TextSize,
    name: Option<NodeId>,
    is_array: bool,
    by_ref: bool,
    allow_default: bool,
) -> Result<NodeId> {
    let mut spread = false;
    if let Some(ellipsis) = p.eat(ELLIPSIS)? {
        spread = true;
        end = ellipsis.range.end();
    }

    let mut init = None;
    let mut is_default = false;
    if p.at_text(ASSIGN_OP, "=") || (allow_default && p.at(COLON)) {
        is_default = p.bump()?.kind == COLON;
        let value = exprs::expr(p)?;
        end = p.end(value);
        init = Some(value);
    }

    let range = TextRange::new(start, end);
    Ok(p.alloc(NodeKind::VarDeclarator { name, is_array, by_ref, spread, init, is_default }, range))
}

fn function(
    p: &mut Parser<'_>,
    ctx: Context,
    start: TextSize,
    modifiers: Vec<TextRange>,
    ty: Option<TextRange>,
    is_array: bool,
    name: NodeId,
) -> Result<NodeId> {
    p.expect(PAREN_START, "`(`")?;
    let (params, close) = delimited(p, PAREN_END, "`)`", exprs::argument)?;

    if p.eat(SEMICOLON)?.is_some() {
        let range = TextRange::new(start, close.range.end());
        let kind = NodeKind::Function { modifiers, ty, is_array, name, params, body: None };
        return Ok(p.alloc(kind, range));
    }

    if ctx != Context::Root {
        return Err(ParseError::new(
            "functions can only be defined at file scope",
            p.range(name),
        ));
    }

    let body = function_body(p)?;
    let range = TextRange::new(start, p.end(body));
    let kind = NodeKind::Function { modifiers, ty, is_array, name, params, body: Some(body) };
    Ok(p.alloc(kind, range))
}

/// The block after a function head. A comment between `)` and `{` opens the
/// block.
fn function_body(p: &mut Parser<'_>) -> Result<NodeId> {
    if !p.at(LEFT_BRACE) {
        return Err(p.unexpected_with("expected `;` or `{`"));
    }

    let mut comments = p.take_pending().into_iter();
    let open_comment = comments.next();
    for comment in comments {
        p.park(comment);
    }
    stmts::block(p, open_comment)
}

fn struct_def(p: &mut Parser<'_>, start: TextSize, name: Token) -> Result<NodeId> {
    let name = p.alloc(NodeKind::Identifier, name.range);

    p.expect(LEFT_BRACE, "`{`")?;
    let members = super::statement_list(p, Context::Block, &[RIGHT_BRACE])?;
    let close = p.expect(RIGHT_BRACE, "`}`")?;
    p.eat(SEMICOLON)?;

    let range = TextRange::new(start, close.range.end());
    Ok(p.alloc(NodeKind::StructDef { name, members }, range))
}

pub(crate) fn inherit(
    p: &mut Parser<'_>,
    modifiers: Vec<TextRange>,
    start: TextSize,
) -> Result<NodeId> {
    p.expect(INHERIT_KW, "`inherit`")?;
    let argument = exprs::expr(p)?;
    let semi = p.expect(SEMICOLON, "`;`")?;

    let range = TextRange::new(start, semi.range.end());
    Ok(p.alloc(NodeKind::Inherit { modifiers, argument }, range))
}

/// A preprocessor line. Arguments are kept as source text, one range per
/// physical line.
pub(crate) fn directive(p: &mut Parser<'_>) -> Result<NodeId> {
    let hash = p.bump()?;
    let text = p.text(hash.range);
    let word = text.trim_start_matches('#').trim_start();
    let name = TextRange::new(hash.range.end() - TextSize::of(word), hash.range.end());
    let mut end = hash.range.end();

    let mut key = None;
    if p.raw().kind == DIRECTIVE_KEY {
        let token = p.bump_raw();
        end = token.range.end();
        key = Some(token.range);
    }

    let mut args = Vec::new();
    let mut line: Option<TextRange> = None;
    loop {
        let token = p.raw();
        if let Some(message) = token.error {
            return Err(ParseError::new(message, token.range));
        }
        match token.kind {
            DIRECTIVE_ARGUMENT | BLOCK_COMMENT => {
                p.bump_raw();
                end = token.range.end();
                line = Some(line.map_or(token.range, |line| line.cover(token.range)));
            }
            DIRECTIVE_LINE_BREAK => {
                p.bump_raw();
                args.extend(line.take());
            }
            DIRECTIVE_END => {
                p.bump_raw();
                args.extend(line.take());
                break;
            }
            _ => return Err(p.unexpected()),
        }
    }

    let range = TextRange::new(hash.range.start(), end);
    Ok(p.alloc(NodeKind::Directive { name, key, args }, range))
}

/// The end of a simple statement. A `,` stands in for `;`, and the `;` may
/// be left off before `}` or the end of the file.
fn statement_end(p: &mut Parser<'_>) -> Result<()> {
    match p.peek_kind() {
        SEMICOLON | COMMA => {
            p.bump()?;
            Ok(())
        }
        RIGHT_BRACE | EOF => Ok(()),
        _ => Err(p.unexpected_with("expected `;`")),
    }
}

/// An expression followed by `;`. At file scope a call followed by a block
/// is a function without a return type, and a call whose arguments are
/// declarations is its prototype.
pub(crate) fn expression_statement(p: &mut Parser<'_>, ctx: Context) -> Result<NodeId> {
    let expr = exprs::expr(p)?;

    let (callee, args) = match p.kind(expr) {
        NodeKind::Call { callee, args } if matches!(p.kind(*callee), NodeKind::Identifier) => {
            (*callee, args.clone())
        }
        _ => {
            statement_end(p)?;
            return Ok(expr);
        }
    };

    if ctx == Context::Root && p.at(LEFT_BRACE) {
        let body = function_body(p)?;
        let range = TextRange::new(p.start(expr), p.end(body));
        let kind = NodeKind::Function {
            modifiers: Vec::new(),
            ty: None,
            is_array: false,
            name: callee,
            params: args,
            body: Some(body),
        };
        p.replace(expr, kind, range);
        return Ok(expr);
    }

    let is_prototype =
        args.iter().any(|&arg| matches!(p.kind(arg), NodeKind::VarDecl { .. }));
    statement_end(p)?;
    if is_prototype {
        let kind = NodeKind::Function {
            modifiers: Vec::new(),
            ty: None,
            is_array: false,
            name: callee,
            params: args,
            body: None,
        };
        let range = p.range(expr);
        p.replace(expr, kind, range);
    }
    Ok(expr)
}
