use lpc_ast::{NodeId, NodeKind, TextRange, TextSize};

use super::{Doc, Printer};

const PAIR_MARKER: &str = "@prettier-pair";

impl<'a> Printer<'a> {
    /// Elements pack as many per line as fit. A newline after `({` in the
    /// source keeps the array broken.
    pub(super) fn array(&self, id: NodeId, elements: &[NodeId]) -> Doc<'a> {
        let Some(&first) = elements.first() else {
            return self.text("({})");
        };

        let pairs = self.prints_as_pairs(id, elements);
        let mut body = if pairs { self.pairs(elements) } else { self.fill(elements) };

        let open_end = self.document.loc_start(id) + TextSize::of("({");
        if self.has_newline(open_end, self.document.loc_start(first)) {
            body = self.break_parent().append(body);
        }
        if !pairs {
            body = body.append(self.trailing_comma(elements));
        }
        self.bracketed("({", body, "})")
    }

    /// Each element after the first moves to a new line on its own when it
    /// does not fit after its predecessor.
    fn fill(&self, elements: &[NodeId]) -> Doc<'a> {
        let last_value = elements.iter().rposition(|&element| !self.stands_alone(element));

        let mut doc = self.nil();
        for (idx, &element) in elements.iter().enumerate() {
            let item = self.list_item(element, last_value.is_some_and(|last| idx < last));
            doc = match idx.checked_sub(1).map(|prev| elements[prev]) {
                None => item,
                Some(prev) if self.breaks_after(prev) || self.is_directive(element) => {
                    doc.append(self.hardline()).append(item)
                }
                Some(_) => doc.append(self.line().append(item).group()),
            };
        }
        doc
    }

    fn breaks_after(&self, id: NodeId) -> bool {
        self.is_comment(id) || self.document.suffix_comment(id).is_some() || self.is_directive(id)
    }

    fn is_directive(&self, id: NodeId) -> bool {
        matches!(self.document.kind(id), NodeKind::Directive { .. })
    }

    /// Two elements per line, every pair ending with `,`.
    fn pairs(&self, elements: &[NodeId]) -> Doc<'a> {
        let lines = elements.chunks(2).map(|pair| {
            let (key, value) = (pair[0], pair[1]);
            let value = self.indent(self.line().append(self.bare(value)));
            self.bare(key)
                .append(",")
                .append(self.suffix(key))
                .append(value)
                .append(",")
                .group()
                .append(self.suffix(pair[1]))
        });
        self.join(lines, self.hardline())
    }

    fn trailing_comma(&self, items: &[NodeId]) -> Doc<'a> {
        let ends_with_value = items.last().is_some_and(|&last| !self.stands_alone(last));
        if self.options.trailing_comma && ends_with_value {
            self.text(",").flat_alt(self.nil())
        } else {
            self.nil()
        }
    }

    /// Even-length arrays assigned to a pair variable, or whose statement
    /// follows a `@prettier-pair` comment.
    fn prints_as_pairs(&self, id: NodeId, elements: &[NodeId]) -> bool {
        if elements.len() % 2 != 0 || elements.iter().any(|&element| self.stands_alone(element)) {
            return false;
        }

        let target = self.document.parent(id).and_then(|parent| match self.document.kind(parent) {
            NodeKind::Assignment { left, right: Some(right), .. } if *right == id => Some(*left),
            NodeKind::VarDeclarator { name, init: Some(init), .. } if *init == id => *name,
            _ => None,
        });
        let named = target.is_some_and(|target| {
            matches!(self.document.kind(target), NodeKind::Identifier)
                && self.options.is_pair_variable(self.source(target))
        });

        named || self.follows_pair_marker(id)
    }

    fn follows_pair_marker(&self, id: NodeId) -> bool {
        let statement = std::iter::once(id)
            .chain(self.document.ancestors(id))
            .find(|&node| match self.document.parent(node) {
                None => true,
                Some(parent) => {
                    matches!(self.document.kind(parent), NodeKind::CodeBlock { .. } | NodeKind::Case { .. })
                }
            })
            .unwrap_or(id);

        self.document
            .find_node_before(self.document.loc_start(statement))
            .is_some_and(|before| self.is_comment(before) && self.source(before).contains(PAIR_MARKER))
    }

    pub(super) fn mapping(&self, pairs: &[NodeId]) -> Doc<'a> {
        if pairs.is_empty() {
            return self.text("([])");
        }
        let body = self.comma_list(pairs, self.line()).append(self.trailing_comma(pairs));
        self.bracketed("([", body, "])")
    }

    /// `key: value; value`, or a bare key.
    pub(super) fn mapping_pair(&self, key: NodeId, values: &[NodeId]) -> Doc<'a> {
        let key = self.node(key);
        if values.is_empty() {
            return key;
        }

        let separator = self.text(";").append(self.line());
        let values = self.join(values.iter().map(|&value| self.node(value)), separator);
        key.append(":").append(self.indent(self.line().append(values)).group()).group()
    }

    pub(super) fn struct_literal(&self, name: TextRange, items: &[NodeId]) -> Doc<'a> {
        let open = self.text("(").append(self.slice(name));
        if items.is_empty() {
            return open.append(")");
        }
        let items = self.indent(self.comma_list(items, self.line()));
        open.append(" ").append(items).append(")").group()
    }

    pub(super) fn inline_closure(&self, items: &[NodeId]) -> Doc<'a> {
        if items.is_empty() {
            return self.text("(: :)");
        }
        let items = self.join(items.iter().map(|&item| self.node(item)), self.line());
        self.text("(:")
            .append(self.indent(self.line().append(items)))
            .append(self.line())
            .append(":)")
            .group()
    }

    pub(super) fn lambda(&self, args: NodeId, code: NodeId) -> Doc<'a> {
        let body = self.node(args).append(",").append(self.line()).append(self.node(code));
        self.bracketed("lambda(", body, ")")
    }
}
