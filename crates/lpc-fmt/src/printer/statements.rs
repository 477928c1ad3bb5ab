use lpc_ast::{ControlFlowKind, LiteralKind, NodeId, NodeKind, TextRange};

use super::{Doc, Printer};

impl<'a> Printer<'a> {
    /// A block with at most one statement that was written on one line stays
    /// on one line, unless it belongs to an `if`.
    pub(super) fn code_block(
        &self,
        id: NodeId,
        open_comment: Option<NodeId>,
        statements: &[NodeId],
    ) -> Doc<'a> {
        let mut open = self.text("{");
        if let Some(comment) = open_comment {
            open = open.append(" ").append(self.bare(comment));
        }

        let Some(&first) = statements.first() else {
            let gap = if open_comment.is_some() { self.hardline() } else { self.text("  ") };
            return open.append(gap).append("}");
        };

        let under_if = self
            .document
            .parent(id)
            .is_some_and(|parent| matches!(self.document.kind(parent), NodeKind::If { .. }));
        let condense = self.options.condense_single_statement_blocks
            && statements.len() == 1
            && !under_if
            && !self.has_newline(self.document.loc_start(id), self.document.loc_end(first));

        let separator = if condense { self.line() } else { self.hardline() };
        let body = self.join(statements.iter().map(|&stmt| self.node(stmt)), separator.clone());
        open.append(self.indent(separator.clone().append(body)).append(separator).group())
            .append("}")
    }

    /// The body of a loop or an `if` branch: a block after a space, a bare
    /// `;`, or a single statement that moves to the next line when it does
    /// not fit.
    fn branch(&self, body: NodeId) -> Doc<'a> {
        match self.document.kind(body) {
            NodeKind::CodeBlock { .. } => self.text(" ").append(self.node(body)),
            NodeKind::Literal { kind: LiteralKind::Placeholder } => self.node(body),
            _ => self.indent(self.line().append(self.node(body))).group(),
        }
    }

    /// `keyword (` header `)` that breaks inside the parentheses.
    fn header(&self, keyword: &'static str, inner: Doc<'a>) -> Doc<'a> {
        self.text(keyword).append(" ").append(self.bracketed("(", inner, ")"))
    }

    /// `else` stays on the closing brace line of a block consequent.
    pub(super) fn if_(
        &self,
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    ) -> Doc<'a> {
        let mut doc = self.header("if", self.node(test)).append(self.branch(consequent));

        if let Some(alternate) = alternate {
            let hugs = matches!(self.document.kind(consequent), NodeKind::CodeBlock { .. })
                && self.document.suffix_comment(consequent).is_none();
            let separator = if hugs { self.text(" ") } else { self.hardline() };

            let alternate = match self.document.kind(alternate) {
                NodeKind::If { .. } => self.text(" ").append(self.node(alternate)),
                _ => self.branch(alternate),
            };
            doc = doc.append(separator).append("else").append(alternate);
        }
        doc.group()
    }

    pub(super) fn switch(&self, test: NodeId, cases: &[NodeId]) -> Doc<'a> {
        let head = self.header("switch", self.node(test)).append(" {");
        if cases.is_empty() {
            return head.append(self.hardline()).append("}");
        }

        let cases = self.join(cases.iter().map(|&case| self.node(case)), self.hardline());
        head.append(self.indent(self.hardline().append(cases))).append(self.hardline()).append("}")
    }

    pub(super) fn case(&self, test: Option<NodeId>, body: &[NodeId]) -> Doc<'a> {
        let label = match test {
            Some(test) => self.text("case ").append(self.node(test)).append(":"),
            None => self.text("default:"),
        };
        if body.is_empty() {
            return label;
        }
        label.append(self.indent(self.hardline().append(self.statements(body))))
    }

    pub(super) fn for_(
        &self,
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    ) -> Doc<'a> {
        let mut inner = init.map_or_else(|| self.nil(), |init| self.node(init)).append(";");
        if let Some(test) = test {
            inner = inner.append(self.line()).append(self.node(test));
        }
        inner = inner.append(";");
        if let Some(update) = update {
            inner = inner.append(self.line()).append(self.node(update));
        }

        self.header("for", inner).append(self.branch(body))
    }

    /// The `in` or `:` separator is kept as written.
    pub(super) fn foreach(&self, vars: &[NodeId], iterable: NodeId, body: NodeId) -> Doc<'a> {
        let vars_end = vars.last().map_or(self.document.loc_start(iterable), |&last| {
            self.document.loc_end(last)
        });
        let between = TextRange::new(vars_end, self.document.loc_start(iterable));
        let separator = if self.slice(between).trim() == "in" { " in " } else { " : " };

        let inner = self
            .comma_list(vars, self.line())
            .append(separator)
            .append(self.node(iterable).group());
        self.header("foreach", inner).append(self.branch(body))
    }

    pub(super) fn while_(&self, test: NodeId, body: NodeId) -> Doc<'a> {
        self.header("while", self.node(test)).append(self.branch(body))
    }

    pub(super) fn do_while(&self, body: NodeId, test: NodeId) -> Doc<'a> {
        let body = match self.document.kind(body) {
            NodeKind::CodeBlock { .. } => self.text(" ").append(self.node(body)).append(" "),
            _ => self.branch(body).append(self.line()).group(),
        };
        self.text("do").append(body).append(self.header("while", self.node(test))).append(";")
    }

    pub(super) fn return_(&self, argument: Option<NodeId>) -> Doc<'a> {
        let Some(argument) = argument else {
            return self.text("return;");
        };
        let value = self.softline().append(self.node(argument)).append(";");
        self.text("return ").append(self.indent(value).group())
    }

    pub(super) fn control_flow(&self, kind: ControlFlowKind) -> Doc<'a> {
        match kind {
            ControlFlowKind::Break => self.text("break;"),
            ControlFlowKind::Continue => self.text("continue;"),
        }
    }

    /// Declarators after the first line up under the first one when the
    /// declaration breaks.
    pub(super) fn var_decl(
        &self,
        modifiers: &[TextRange],
        ty: Option<TextRange>,
        declarators: &[NodeId],
    ) -> Doc<'a> {
        let head = self.words(modifiers, ty);
        if declarators.is_empty() {
            return self.text(head);
        }

        let has_suffix =
            declarators.iter().any(|&decl| self.document.suffix_comment(decl).is_some());
        let separator = if has_suffix { self.hardline() } else { self.line() };
        let mut decls = self.comma_list(declarators, separator).group();

        if head.is_empty() {
            return decls;
        }
        if declarators.len() > 1 {
            decls = decls.nest(head.len() as isize + 1);
        }
        self.text(head).append(" ").append(decls)
    }

    pub(super) fn declarator(
        &self,
        name: Option<NodeId>,
        is_array: bool,
        by_ref: bool,
        spread: bool,
        init: Option<NodeId>,
        is_default: bool,
    ) -> Doc<'a> {
        let mut doc = self.nil();
        if is_array {
            doc = doc.append("*");
        }
        if by_ref {
            doc = doc.append("&");
        }
        if let Some(name) = name {
            doc = doc.append(self.node(name));
        }
        if spread {
            doc = doc.append("...");
        }

        match init {
            Some(init) if is_default => doc.append(": ").append(self.node(init)),
            Some(init) => doc.append(" =").append(self.value(init)),
            None => doc,
        }
    }

    pub(super) fn function(
        &self,
        modifiers: &[TextRange],
        ty: Option<TextRange>,
        is_array: bool,
        name: NodeId,
        params: &[NodeId],
        body: Option<NodeId>,
    ) -> Doc<'a> {
        let head = self.words(modifiers, ty);
        let mut doc = if head.is_empty() { self.nil() } else { self.text(head).append(" ") };
        if is_array {
            doc = doc.append("*");
        }
        doc = doc.append(self.node(name));

        doc = if params.is_empty() {
            doc.append("()")
        } else {
            doc.append(self.bracketed("(", self.comma_list(params, self.line()), ")"))
        };

        match body {
            Some(body) => doc.append(" ").append(self.node(body)),
            None => doc.append(";"),
        }
    }

    /// `struct name { members };`, on one line when it fits.
    pub(super) fn struct_def(&self, id: NodeId, name: NodeId, members: &[NodeId]) -> Doc<'a> {
        let keyword = self.source(id).split_whitespace().next().unwrap_or("struct");
        let head = self.text(keyword).append(" ").append(self.node(name)).append(" {");
        if members.is_empty() {
            return head.append("  };");
        }

        let members = self.join(members.iter().map(|&member| self.node(member)), self.line());
        head.append(self.indent(self.line().append(members)).append(self.line()).group())
            .append("};")
    }

    pub(super) fn inherit(&self, modifiers: &[TextRange], argument: NodeId) -> Doc<'a> {
        let head = self.words(modifiers, None);
        let doc = if head.is_empty() { self.nil() } else { self.text(head).append(" ") };
        doc.append("inherit ").append(self.node(argument).group()).append(";")
    }

    /// Modifiers and the type, space separated.
    fn words(&self, modifiers: &[TextRange], ty: Option<TextRange>) -> String {
        let words: Vec<&str> = modifiers
            .iter()
            .chain(&ty)
            .flat_map(|&range| self.slice(range).split_whitespace())
            .collect();
        words.join(" ")
    }
}
