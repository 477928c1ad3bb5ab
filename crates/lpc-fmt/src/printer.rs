use std::borrow::Cow;

use lpc_ast::{Document, LiteralKind, NodeId, NodeKind, TextRange, TextSize};
use pretty::{Arena, DocAllocator, DocBuilder};

use crate::FormatOptions;

mod collections;
mod comments;
mod expressions;
mod statements;

pub(crate) type Doc<'a> = DocBuilder<'a, Arena<'a>>;

pub(crate) fn print_document(document: &Document, options: &FormatOptions) -> String {
    let arena = Arena::new();
    let printer = Printer { arena: &arena, document, options };

    let doc = printer.source_file();
    let rendered = doc.into_doc().pretty(options.print_width).to_string();
    finish(&rendered, options)
}

/// Trims trailing whitespace, re-indents with tabs when asked, and leaves
/// exactly one newline at the end.
fn finish(rendered: &str, options: &FormatOptions) -> String {
    let mut out = String::with_capacity(rendered.len());
    for line in rendered.lines() {
        let line = line.trim_end();
        if options.use_tabs && options.tab_width > 0 {
            let content = line.trim_start_matches(' ');
            let width = line.len() - content.len();
            out.extend(std::iter::repeat_n('\t', width / options.tab_width));
            out.extend(std::iter::repeat_n(' ', width % options.tab_width));
            out.push_str(content);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }

    let len = out.trim_end_matches('\n').len();
    out.truncate(len);
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

pub(crate) struct Printer<'a> {
    arena: &'a Arena<'a>,
    document: &'a Document,
    options: &'a FormatOptions,
}

impl<'a> Printer<'a> {
    fn source_file(&self) -> Doc<'a> {
        let roots = self.document.roots();
        if roots.is_empty() {
            return self.nil();
        }
        self.statements(roots).append(self.hardline())
    }

    /// Statements one per line. Blank lines print as nothing, which leaves an
    /// empty line between their neighbours.
    fn statements(&self, ids: &[NodeId]) -> Doc<'a> {
        self.join(ids.iter().map(|&id| self.node(id)), self.hardline())
    }

    /// A node followed by its statement semicolon and its suffix comment.
    fn node(&self, id: NodeId) -> Doc<'a> {
        let mut doc = self.bare(id);
        if self.needs_semicolon(id) {
            doc = doc.group().append(";");
        }
        doc.append(self.suffix(id))
    }

    fn bare(&self, id: NodeId) -> Doc<'a> {
        match self.document.kind(id) {
            NodeKind::Literal { .. }
            | NodeKind::StringBlock
            | NodeKind::Identifier
            | NodeKind::Closure
            | NodeKind::LambdaIndexor => self.text(self.source(id).trim()),
            NodeKind::BlankLine => self.nil(),
            NodeKind::Comment { kind } => self.comment(id, *kind),
            NodeKind::Directive { name, key, args } => self.directive(*name, *key, args),

            NodeKind::Spread { argument } => self.node(*argument).append("..."),
            NodeKind::Call { callee, args } => self.call(*callee, args),
            NodeKind::Member { object, property, dot } => {
                let op = if *dot { "." } else { "->" };
                self.node(*object).append(op).append(self.node(*property))
            }
            NodeKind::Index { object, indexor } => self.index(*object, *indexor),
            NodeKind::Indexor { parts } => self.concat(parts.iter().map(|&part| self.node(part))),
            NodeKind::IndexorMark { mark } => self.indexor_mark(*mark),
            NodeKind::ParentAccessor { scope, member } => {
                let scope = scope.map_or_else(|| self.nil(), |scope| self.node(scope));
                scope.append("::").append(self.node(*member))
            }
            NodeKind::Binary { left, op, right, implied } => {
                let op = if *implied { None } else { Some(*op) };
                self.binaryish(id, *left, op, *right)
            }
            NodeKind::Logical { left, op, right } => self.binaryish(id, *left, Some(*op), *right),
            NodeKind::Ternary { test, consequent, alternate } => {
                self.ternary(*test, *consequent, *alternate)
            }
            NodeKind::Assignment { left, op, right } => self.assignment(*left, *op, *right),
            NodeKind::Unary { op, argument } => self.unary(*op, *argument),
            NodeKind::TypeCast { ty, is_array, argument } => {
                self.type_cast(*ty, *is_array, *argument)
            }
            NodeKind::Paren { items } => self.paren(items),
            NodeKind::MultiExpression { items } => {
                self.comma_list(items, self.line()).group()
            }
            NodeKind::Range { first, last } => self.range(*first, *last),

            NodeKind::Array { elements } => self.array(id, elements),
            NodeKind::Mapping { pairs } => self.mapping(pairs),
            NodeKind::MappingPair { key, values } => self.mapping_pair(*key, values),
            NodeKind::StructLiteral { name, items } => self.struct_literal(*name, items),
            NodeKind::InlineClosure { items } => self.inline_closure(items),
            NodeKind::Lambda { args, code } => self.lambda(*args, *code),

            NodeKind::VarDecl { modifiers, ty, declarators } => {
                self.var_decl(modifiers, *ty, declarators)
            }
            NodeKind::VarDeclarator { name, is_array, by_ref, spread, init, is_default } => {
                self.declarator(*name, *is_array, *by_ref, *spread, *init, *is_default)
            }
            NodeKind::Function { modifiers, ty, is_array, name, params, body } => {
                self.function(modifiers, *ty, *is_array, *name, params, *body)
            }
            NodeKind::StructDef { name, members } => self.struct_def(id, *name, members),
            NodeKind::Inherit { modifiers, argument } => self.inherit(modifiers, *argument),
            NodeKind::CodeBlock { open_comment, statements } => {
                self.code_block(id, *open_comment, statements)
            }
            NodeKind::If { test, consequent, alternate } => {
                self.if_(*test, *consequent, *alternate)
            }
            NodeKind::Switch { test, cases } => self.switch(*test, cases),
            NodeKind::Case { test, body } => self.case(*test, body),
            NodeKind::For { init, test, update, body } => self.for_(*init, *test, *update, *body),
            NodeKind::Foreach { vars, iterable, body } => self.foreach(vars, *iterable, *body),
            NodeKind::While { test, body } => self.while_(*test, *body),
            NodeKind::DoWhile { body, test } => self.do_while(*body, *test),
            NodeKind::Return { argument } => self.return_(*argument),
            NodeKind::ControlFlow { kind } => self.control_flow(*kind),
        }
    }

    /// Expressions and declarations used as statements end with `;`.
    fn needs_semicolon(&self, id: NodeId) -> bool {
        let is_expression = match self.document.kind(id) {
            NodeKind::Literal { kind } => *kind != LiteralKind::Placeholder,
            NodeKind::StringBlock
            | NodeKind::Identifier
            | NodeKind::Spread { .. }
            | NodeKind::Array { .. }
            | NodeKind::Mapping { .. }
            | NodeKind::Call { .. }
            | NodeKind::Member { .. }
            | NodeKind::Index { .. }
            | NodeKind::ParentAccessor { .. }
            | NodeKind::Binary { .. }
            | NodeKind::Logical { .. }
            | NodeKind::Ternary { .. }
            | NodeKind::Assignment { .. }
            | NodeKind::Unary { .. }
            | NodeKind::TypeCast { .. }
            | NodeKind::Paren { .. }
            | NodeKind::MultiExpression { .. }
            | NodeKind::VarDecl { .. }
            | NodeKind::StructLiteral { .. }
            | NodeKind::Closure
            | NodeKind::InlineClosure { .. }
            | NodeKind::Lambda { .. }
            | NodeKind::LambdaIndexor => true,
            _ => false,
        };
        is_expression && self.in_statement_position(id)
    }

    /// Whether the node sits in a slot that holds statements rather than
    /// inside an enclosing expression or header.
    fn in_statement_position(&self, id: NodeId) -> bool {
        let Some(parent) = self.document.parent(id) else {
            return true;
        };
        match self.document.kind(parent) {
            NodeKind::CodeBlock { .. } => true,
            NodeKind::StructDef { members, .. } => members.contains(&id),
            NodeKind::Case { test, .. } => *test != Some(id),
            NodeKind::If { test, .. }
            | NodeKind::While { test, .. }
            | NodeKind::DoWhile { test, .. } => *test != id,
            NodeKind::For { body, .. } | NodeKind::Foreach { body, .. } => *body == id,
            NodeKind::InlineClosure { items } => items.len() > 1,
            _ => false,
        }
    }

    fn suffix(&self, id: NodeId) -> Doc<'a> {
        match self.document.suffix_comment(id) {
            Some(comment) => self.text(" ").append(self.bare(comment)),
            None => self.nil(),
        }
    }

    /// Comma-separated items. Standalone comments take no comma, and a suffix
    /// comment lands after the comma of the item it belongs to.
    fn comma_list(&self, items: &[NodeId], separator: Doc<'a>) -> Doc<'a> {
        let last_value = items.iter().rposition(|&item| !self.stands_alone(item));

        let mut doc = self.nil();
        for (idx, &item) in items.iter().enumerate() {
            if idx > 0 {
                doc = doc.append(separator.clone());
            }
            doc = doc.append(self.list_item(item, last_value.is_some_and(|last| idx < last)));
        }
        doc
    }

    fn list_item(&self, item: NodeId, comma: bool) -> Doc<'a> {
        let mut doc = self.bare(item);
        if matches!(self.document.kind(item), NodeKind::Directive { .. }) {
            doc = doc.append(self.break_parent());
        } else if comma && !self.is_comment(item) {
            doc = doc.append(",");
        }
        doc.append(self.suffix(item))
    }

    fn is_comment(&self, id: NodeId) -> bool {
        self.document.kind(id).is_comment()
    }

    /// Comments and preprocessor lines sit in a list without a comma.
    fn stands_alone(&self, id: NodeId) -> bool {
        self.is_comment(id) || matches!(self.document.kind(id), NodeKind::Directive { .. })
    }

    fn has_newline(&self, start: TextSize, end: TextSize) -> bool {
        start < end && self.slice(TextRange::new(start, end)).contains('\n')
    }

    fn source(&self, id: NodeId) -> &'a str {
        self.document.source(id)
    }

    fn slice(&self, range: TextRange) -> &'a str {
        self.document.slice(range)
    }

    fn nil(&self) -> Doc<'a> {
        self.arena.nil()
    }

    fn text(&self, text: impl Into<Cow<'a, str>>) -> Doc<'a> {
        self.arena.text(text)
    }

    /// A space, or a newline when the enclosing group breaks.
    fn line(&self) -> Doc<'a> {
        self.arena.line()
    }

    /// Nothing, or a newline when the enclosing group breaks.
    fn softline(&self) -> Doc<'a> {
        self.arena.line_()
    }

    fn hardline(&self) -> Doc<'a> {
        self.arena.hardline()
    }

    /// Prints nothing, but keeps every enclosing group from fitting on one
    /// line.
    fn break_parent(&self) -> Doc<'a> {
        self.nil().flat_alt(self.hardline())
    }

    fn indent(&self, doc: Doc<'a>) -> Doc<'a> {
        doc.nest(self.options.tab_width as isize)
    }

    fn join(&self, docs: impl IntoIterator<Item = Doc<'a>>, separator: Doc<'a>) -> Doc<'a> {
        self.arena.intersperse(docs, separator)
    }

    fn concat(&self, docs: impl IntoIterator<Item = Doc<'a>>) -> Doc<'a> {
        self.arena.concat(docs)
    }

    /// `open`, the indented body on its own lines when the group breaks, then
    /// `close`.
    fn bracketed(&self, open: &'static str, body: Doc<'a>, close: &'static str) -> Doc<'a> {
        self.text(open)
            .append(self.indent(self.softline().append(body)))
            .append(self.softline())
            .append(close)
            .group()
    }
}
