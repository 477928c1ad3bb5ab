use std::fmt::Write;

use text_size::{TextRange, TextSize};

use crate::arena::Arena;
use crate::node::{Node, NodeId, NodeKind};

/// A parsed source file: the node arena plus the top-level statements.
#[derive(Debug)]
pub struct Document {
    text: String,
    nodes: Arena<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Takes ownership of a finished arena and links every node to its parent.
    pub fn new(text: String, mut nodes: Arena<Node>, roots: Vec<NodeId>) -> Self {
        let mut links = Vec::new();
        for (id, node) in nodes.iter_enumerated() {
            links.extend(node.kind.children().into_iter().map(|child| (child, id)));
            links.extend(node.suffix_comment.map(|comment| (comment, id)));
        }
        for (child, parent) in links {
            nodes[child].parent = Some(parent);
        }

        Self { text, nodes, roots }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id].range
    }

    pub fn loc_start(&self, id: NodeId) -> TextSize {
        self.nodes[id].range.start()
    }

    pub fn loc_end(&self, id: NodeId) -> TextSize {
        self.nodes[id].range.end()
    }

    pub fn source(&self, id: NodeId) -> &str {
        &self.text[self.nodes[id].range]
    }

    pub fn slice(&self, range: TextRange) -> &str {
        &self.text[range]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Parent first, then its parent, up to a root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), |&id| self.parent(id))
    }

    pub fn suffix_comment(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].suffix_comment
    }

    pub fn children(&self, id: Option<NodeId>) -> Vec<NodeId> {
        match id {
            Some(id) => self.nodes[id].kind.children(),
            None => self.roots.clone(),
        }
    }

    /// The deepest node that ends at or before `offset`. `None` stands for
    /// the document itself.
    pub fn find_node_before(&self, offset: TextSize) -> Option<NodeId> {
        let mut current = None;
        loop {
            let children = self.children(current);
            let idx = children.partition_point(|&child| self.loc_start(child) < offset);
            let Some(&child) = idx.checked_sub(1).and_then(|idx| children.get(idx)) else {
                return current;
            };
            if offset <= self.loc_start(child) {
                return current;
            }

            let ends_with_last_child = self
                .children(Some(child))
                .last()
                .is_some_and(|&last| self.loc_end(last) == self.loc_end(child));
            if offset < self.loc_end(child) || ends_with_last_child {
                current = Some(child);
            } else {
                return Some(child);
            }
        }
    }

    /// The deepest node whose range contains `offset`. `None` stands for the
    /// document itself.
    pub fn find_node_at(&self, offset: TextSize) -> Option<NodeId> {
        let mut current = None;
        loop {
            let children = self.children(current);
            let idx = children.partition_point(|&child| self.loc_start(child) < offset);
            let Some(&child) = idx.checked_sub(1).and_then(|idx| children.get(idx)) else {
                return current;
            };
            if offset > self.loc_start(child) && offset <= self.loc_end(child) {
                current = Some(child);
            } else {
                return current;
            }
        }
    }

    /// An indented outline of the tree, one node per line.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        for &root in &self.roots {
            self.debug_node(&mut out, root, 0, "");
        }
        out
    }

    fn debug_node(&self, out: &mut String, id: NodeId, depth: usize, label: &str) {
        let node = &self.nodes[id];
        let _ = write!(
            out,
            "{:indent$}{label}{}@{:?}",
            "",
            node.kind.name(),
            node.range,
            indent = depth * 2
        );
        self.debug_details(out, &node.kind, id);
        out.push('\n');

        for child in node.kind.children() {
            self.debug_node(out, child, depth + 1, "");
        }
        if let Some(comment) = node.suffix_comment {
            self.debug_node(out, comment, depth + 1, "suffix ");
        }
    }

    fn debug_details(&self, out: &mut String, kind: &NodeKind, id: NodeId) {
        let words = |ranges: &[TextRange]| {
            ranges.iter().map(|&range| self.slice(range)).collect::<Vec<_>>().join(" ")
        };

        let _ = match kind {
            NodeKind::Literal { kind } => write!(out, " {kind:?} {:?}", self.source(id)),
            NodeKind::StringBlock
            | NodeKind::Identifier
            | NodeKind::Closure
            | NodeKind::LambdaIndexor => write!(out, " {:?}", self.source(id)),
            NodeKind::Comment { kind } => write!(out, " {kind:?} {:?}", self.source(id)),
            NodeKind::IndexorMark { mark } => write!(out, " {mark:?}"),
            NodeKind::ControlFlow { kind } => write!(out, " {kind:?}"),
            NodeKind::Binary { op, implied: true, .. } => {
                write!(out, " implied {:?}", self.slice(*op))
            }
            NodeKind::Binary { op, .. }
            | NodeKind::Logical { op, .. }
            | NodeKind::Assignment { op, .. }
            | NodeKind::Unary { op, .. } => write!(out, " {:?}", self.slice(*op)),
            NodeKind::TypeCast { ty, is_array, .. } => {
                write!(out, " {:?}{}", self.slice(*ty), if *is_array { " array" } else { "" })
            }
            NodeKind::VarDecl { modifiers, ty, .. } => {
                let mut words = words(modifiers);
                if let Some(ty) = ty {
                    if !words.is_empty() {
                        words.push(' ');
                    }
                    words.push_str(self.slice(*ty));
                }
                write!(out, " {words:?}")
            }
            NodeKind::VarDeclarator { is_array, by_ref, spread, is_default, .. } => {
                let flags = [
                    (*is_array, "array"),
                    (*by_ref, "ref"),
                    (*spread, "spread"),
                    (*is_default, "default"),
                ];
                for (set, flag) in flags {
                    if set {
                        let _ = write!(out, " {flag}");
                    }
                }
                Ok(())
            }
            NodeKind::Function { modifiers, ty, is_array, body, .. } => {
                let mut words = words(modifiers);
                if let Some(ty) = ty {
                    if !words.is_empty() {
                        words.push(' ');
                    }
                    words.push_str(self.slice(*ty));
                }
                if *is_array {
                    words.push('*');
                }
                let shape = if body.is_some() { "" } else { " prototype" };
                write!(out, " {words:?}{shape}")
            }
            NodeKind::Inherit { modifiers, .. } if !modifiers.is_empty() => {
                write!(out, " {:?}", words(modifiers))
            }
            NodeKind::StructLiteral { name, .. } => write!(out, " {:?}", self.slice(*name)),
            NodeKind::Directive { name, key, args } => {
                let _ = write!(out, " {:?}", self.slice(*name));
                if let Some(key) = key {
                    let _ = write!(out, " key={:?}", self.slice(*key));
                }
                for &arg in args {
                    let _ = write!(out, " {:?}", self.slice(arg));
                }
                Ok(())
            }
            NodeKind::Case { test: None, .. } => write!(out, " default"),
            _ => Ok(()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::LiteralKind;

    fn node(kind: NodeKind, start: u32, end: u32) -> Node {
        Node {
            kind,
            range: TextRange::new(start.into(), end.into()),
            parent: None,
            suffix_comment: None,
        }
    }

    // x = 1 + 22;
    // y;
    fn sample() -> (Document, [NodeId; 6]) {
        let mut nodes = Arena::new();
        let x = nodes.alloc(node(NodeKind::Identifier, 0, 1));
        let one = nodes.alloc(node(NodeKind::Literal { kind: LiteralKind::Number }, 4, 5));
        let two = nodes.alloc(node(NodeKind::Literal { kind: LiteralKind::Number }, 8, 10));
        let sum = nodes.alloc(node(
            NodeKind::Binary {
                left: one,
                op: TextRange::new(6.into(), 7.into()),
                right: two,
                implied: false,
            },
            4,
            10,
        ));
        let assign = nodes.alloc(node(
            NodeKind::Assignment {
                left: x,
                op: TextRange::new(2.into(), 3.into()),
                right: Some(sum),
            },
            0,
            10,
        ));
        let y = nodes.alloc(node(NodeKind::Identifier, 12, 13));

        let document = Document::new("x = 1 + 22;\ny;".to_owned(), nodes, vec![assign, y]);
        (document, [x, one, two, sum, assign, y])
    }

    #[test]
    fn links_parents() {
        let (document, [x, one, _, sum, assign, y]) = sample();

        assert_eq!(document.parent(x), Some(assign));
        assert_eq!(document.parent(one), Some(sum));
        assert_eq!(document.parent(assign), None);
        assert_eq!(document.parent(y), None);

        let ancestors: Vec<_> = document.ancestors(one).collect();
        assert_eq!(ancestors, [sum, assign]);
    }

    #[test]
    fn find_node_at_descends_to_the_deepest_match() {
        let (document, [x, one, two, _, _, y]) = sample();

        assert_eq!(document.find_node_at(TextSize::new(1)), Some(x));
        assert_eq!(document.find_node_at(TextSize::new(5)), Some(one));
        assert_eq!(document.find_node_at(TextSize::new(9)), Some(two));
        assert_eq!(document.find_node_at(TextSize::new(13)), Some(y));
        assert_eq!(document.find_node_at(TextSize::new(0)), None);
    }

    #[test]
    fn find_node_before_follows_trailing_children() {
        let (document, [_, _, two, _, _, y]) = sample();

        assert_eq!(document.find_node_before(TextSize::new(11)), Some(two));
        assert_eq!(document.find_node_before(TextSize::new(14)), Some(y));
        assert_eq!(document.find_node_before(TextSize::new(0)), None);
    }

    #[test]
    fn debug_tree_shows_nesting() {
        let (document, _) = sample();
        assert_eq!(
            document.debug_tree(),
            "Assignment@0..10 \"=\"\n  Identifier@0..1 \"x\"\n  Binary@4..10 \"+\"\n    Literal@4..5 Number \"1\"\n    Literal@8..10 Number \"22\"\nIdentifier@12..13 \"y\"\n"
        );
    }
}
