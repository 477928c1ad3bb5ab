use lpc_ast::{IndexorMark, NodeId, NodeKind, TextRange};

use super::{Doc, Printer};

impl<'a> Printer<'a> {
    /// A lone array or mapping argument hugs the parentheses instead of
    /// adding a second indent.
    pub(super) fn call(&self, callee: NodeId, args: &[NodeId]) -> Doc<'a> {
        let callee = self.node(callee);
        match args {
            [] => callee.append("()"),
            [arg] if self.document.kind(*arg).is_collection() => {
                callee.append("(").append(self.node(*arg)).append(")")
            }
            _ => callee.append(self.bracketed("(", self.comma_list(args, self.line()), ")")),
        }
    }

    pub(super) fn index(&self, object: NodeId, indexor: NodeId) -> Doc<'a> {
        let inner = self
            .indent(self.softline().append(self.node(indexor)))
            .append(self.softline())
            .group();
        self.node(object).append("[").append(inner).append("]")
    }

    pub(super) fn indexor_mark(&self, mark: IndexorMark) -> Doc<'a> {
        match mark {
            IndexorMark::FromEnd => self.text("<"),
            IndexorMark::Range => self.text(".."),
            IndexorMark::Comma => self.text(", "),
        }
    }

    /// The right operand follows a line break opportunity. Links of a chain
    /// of the same kind share one group instead of nesting a group each, and
    /// the top of the chain groups the whole of it.
    pub(super) fn binaryish(
        &self,
        id: NodeId,
        left: NodeId,
        op: Option<TextRange>,
        right: NodeId,
    ) -> Doc<'a> {
        let kind = self.document.kind(id);
        let same_kind = |other: NodeId| {
            std::mem::discriminant(self.document.kind(other)) == std::mem::discriminant(kind)
        };
        let parent = self.document.parent(id);
        let in_paren = parent
            .is_some_and(|parent| matches!(self.document.kind(parent), NodeKind::Paren { .. }));

        let flat_in_paren = in_paren && matches!(kind, NodeKind::Logical { .. });
        let is_top = !parent.is_some_and(|parent| same_kind(parent));
        let should_group = !flat_in_paren && is_top && !same_kind(left) && !same_kind(right);

        let op = match op {
            Some(op) => self.text(" ").append(self.slice(op)),
            None => self.nil(),
        };
        let rhs = op.append(self.line()).append(self.node(right));
        let rhs = if should_group { rhs.group() } else { rhs };

        let doc = self.node(left).group().append(rhs);
        if is_top && !flat_in_paren { doc.group() } else { doc }
    }

    pub(super) fn ternary(&self, test: NodeId, consequent: NodeId, alternate: NodeId) -> Doc<'a> {
        let branches = self
            .softline()
            .append("? ")
            .append(self.node(consequent))
            .append(self.line())
            .append(": ")
            .append(self.node(alternate));
        self.node(test).append(" ").append(self.indent(branches)).group()
    }

    /// Postfix `++` and `--` hug their operand.
    pub(super) fn assignment(
        &self,
        left: NodeId,
        op: TextRange,
        right: Option<NodeId>,
    ) -> Doc<'a> {
        let op = self.slice(op);
        let left = self.node(left);
        match right {
            Some(right) => left.append(" ").append(op).append(self.value(right)),
            None => left.append(op),
        }
    }

    /// The right-hand side of `=`, or of a declarator initializer. A
    /// collection starts on the same line, anything else may move to the next
    /// one.
    pub(super) fn value(&self, value: NodeId) -> Doc<'a> {
        if self.document.kind(value).is_collection() {
            return self.text(" ").append(self.node(value));
        }
        self.indent(self.line().append(self.node(value))).group()
    }

    /// `- -x` keeps its space so it does not turn into a decrement.
    pub(super) fn unary(&self, op: TextRange, argument: NodeId) -> Doc<'a> {
        let op = self.slice(op);
        let doc = self.text(op);
        let doc = match op {
            "-" | "+" if self.source(argument).starts_with(op) => doc.append(" "),
            _ => doc,
        };
        doc.append(self.node(argument))
    }

    pub(super) fn type_cast(&self, ty: TextRange, is_array: bool, argument: NodeId) -> Doc<'a> {
        let star = if is_array { "*" } else { "" };
        self.text("(").append(self.slice(ty)).append(star).append(")").append(self.node(argument))
    }

    pub(super) fn paren(&self, items: &[NodeId]) -> Doc<'a> {
        if items.is_empty() {
            return self.text("()");
        }
        self.bracketed("(", self.comma_list(items, self.line()), ")")
    }

    pub(super) fn range(&self, first: NodeId, last: NodeId) -> Doc<'a> {
        self.node(first)
            .append(self.line())
            .append("..")
            .append(self.line())
            .append(self.node(last))
            .group()
    }
}
