use text_size::TextRange;

use crate::arena::Key;

pub type NodeId = Key<Node>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub range: TextRange,
    pub parent: Option<NodeId>,
    /// A trailing comment that shares the node's last line. It is not one of
    /// the node's children.
    pub suffix_comment: Option<NodeId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    Char,
    Number,
    Symbol,
    /// Stands in for an empty statement such as the `;` of `if (x) ;`.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexorMark {
    FromEnd,
    Range,
    Comma,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlowKind {
    Break,
    Continue,
}

/// Every syntactic form the formatter understands.
///
/// Text-bearing leaves (identifiers, literals, closures) keep no copy of their
/// text; it is recovered from the owning [`Document`](crate::Document) through
/// the node's range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Literal {
        kind: LiteralKind,
    },
    /// `@MARKER ... MARKER`, printed verbatim.
    StringBlock,
    Identifier,
    Spread {
        argument: NodeId,
    },

    Array {
        elements: Vec<NodeId>,
    },
    Mapping {
        pairs: Vec<NodeId>,
    },
    MappingPair {
        key: NodeId,
        values: Vec<NodeId>,
    },

    Call {
        callee: NodeId,
        args: Vec<NodeId>,
    },
    /// `object->property`, or `object.property` for struct and class
    /// members. The property is an identifier, a call, or a parenthesized
    /// struct member expression.
    Member {
        object: NodeId,
        property: NodeId,
        dot: bool,
    },
    Index {
        object: NodeId,
        indexor: NodeId,
    },
    Indexor {
        parts: Vec<NodeId>,
    },
    IndexorMark {
        mark: IndexorMark,
    },
    /// `::member` or `scope::member`.
    ParentAccessor {
        scope: Option<NodeId>,
        member: NodeId,
    },

    Binary {
        left: NodeId,
        op: TextRange,
        right: NodeId,
        /// Adjacent literals with no operator between them.
        implied: bool,
    },
    Logical {
        left: NodeId,
        op: TextRange,
        right: NodeId,
    },
    Ternary {
        test: NodeId,
        consequent: NodeId,
        alternate: NodeId,
    },
    /// Postfix `++`/`--` are assignments without a right-hand side.
    Assignment {
        left: NodeId,
        op: TextRange,
        right: Option<NodeId>,
    },
    Unary {
        op: TextRange,
        argument: NodeId,
    },
    TypeCast {
        ty: TextRange,
        is_array: bool,
        argument: NodeId,
    },
    Paren {
        items: Vec<NodeId>,
    },
    /// Comma-joined `for` init/update expressions.
    MultiExpression {
        items: Vec<NodeId>,
    },

    VarDecl {
        modifiers: Vec<TextRange>,
        ty: Option<TextRange>,
        declarators: Vec<NodeId>,
    },
    VarDeclarator {
        /// `None` for an unnamed prototype parameter.
        name: Option<NodeId>,
        is_array: bool,
        by_ref: bool,
        spread: bool,
        init: Option<NodeId>,
        /// The initializer is a parameter default written `name: value`.
        is_default: bool,
    },
    Function {
        modifiers: Vec<TextRange>,
        ty: Option<TextRange>,
        is_array: bool,
        name: NodeId,
        params: Vec<NodeId>,
        body: Option<NodeId>,
    },
    StructDef {
        name: NodeId,
        members: Vec<NodeId>,
    },
    StructLiteral {
        name: TextRange,
        items: Vec<NodeId>,
    },

    If {
        test: NodeId,
        consequent: NodeId,
        alternate: Option<NodeId>,
    },
    Switch {
        test: NodeId,
        cases: Vec<NodeId>,
    },
    /// `test` is `None` for `default:`.
    Case {
        test: Option<NodeId>,
        body: Vec<NodeId>,
    },
    For {
        init: Option<NodeId>,
        test: Option<NodeId>,
        update: Option<NodeId>,
        body: NodeId,
    },
    Foreach {
        vars: Vec<NodeId>,
        iterable: NodeId,
        body: NodeId,
    },
    /// `first .. last` in a foreach head or a case label.
    Range {
        first: NodeId,
        last: NodeId,
    },
    While {
        test: NodeId,
        body: NodeId,
    },
    DoWhile {
        body: NodeId,
        test: NodeId,
    },
    Return {
        argument: Option<NodeId>,
    },
    ControlFlow {
        kind: ControlFlowKind,
    },

    Inherit {
        modifiers: Vec<TextRange>,
        argument: NodeId,
    },
    Directive {
        name: TextRange,
        key: Option<TextRange>,
        /// One entry per source line. A block comment joins the line it starts on.
        args: Vec<TextRange>,
    },
    BlankLine,
    Comment {
        kind: CommentKind,
    },
    CodeBlock {
        /// A comment between a control header and the `{` it opens.
        open_comment: Option<NodeId>,
        statements: Vec<NodeId>,
    },

    /// `#'name`, `#'::name`, `#'!=`, printed verbatim.
    Closure,
    InlineClosure {
        items: Vec<NodeId>,
    },
    Lambda {
        args: NodeId,
        code: NodeId,
    },
    /// `#'[`, `#'[..<]` and friends, printed verbatim.
    LambdaIndexor,
}

impl NodeKind {
    /// Child nodes in source order.
    pub fn children(&self) -> Vec<NodeId> {
        let mut out = Vec::new();

        match self {
            Self::Literal { .. }
            | Self::StringBlock
            | Self::Identifier
            | Self::IndexorMark { .. }
            | Self::ControlFlow { .. }
            | Self::Directive { .. }
            | Self::BlankLine
            | Self::Comment { .. }
            | Self::Closure
            | Self::LambdaIndexor => {}
            Self::Spread { argument }
            | Self::Unary { argument, .. }
            | Self::TypeCast { argument, .. }
            | Self::Inherit { argument, .. } => out.push(*argument),
            Self::Array { elements: items }
            | Self::Mapping { pairs: items }
            | Self::Indexor { parts: items }
            | Self::Paren { items }
            | Self::MultiExpression { items }
            | Self::VarDecl { declarators: items, .. }
            | Self::StructLiteral { items, .. }
            | Self::InlineClosure { items } => out.extend(items),
            Self::MappingPair { key, values } => {
                out.push(*key);
                out.extend(values);
            }
            Self::Call { callee, args } => {
                out.push(*callee);
                out.extend(args);
            }
            Self::Member { object, property, .. } => {
                out.push(*object);
                out.push(*property);
            }
            Self::Index { object, indexor } => {
                out.push(*object);
                out.push(*indexor);
            }
            Self::ParentAccessor { scope, member } => {
                out.extend(*scope);
                out.push(*member);
            }
            Self::Binary { left, right, .. } | Self::Logical { left, right, .. } => {
                out.push(*left);
                out.push(*right);
            }
            Self::Ternary { test, consequent, alternate } => {
                out.push(*test);
                out.push(*consequent);
                out.push(*alternate);
            }
            Self::Assignment { left, right, .. } => {
                out.push(*left);
                out.extend(*right);
            }
            Self::VarDeclarator { name, init, .. } => {
                out.extend(*name);
                out.extend(*init);
            }
            Self::Function { name, params, body, .. } => {
                out.push(*name);
                out.extend(params);
                out.extend(body);
            }
            Self::StructDef { name, members } => {
                out.push(*name);
                out.extend(members);
            }
            Self::If { test, consequent, alternate } => {
                out.push(*test);
                out.push(*consequent);
                out.extend(*alternate);
            }
            Self::Switch { test, cases } => {
                out.push(*test);
                out.extend(cases);
            }
            Self::Case { test, body } => {
                out.extend(*test);
                out.extend(body);
            }
            Self::For { init, test, update, body } => {
                out.extend(*init);
                out.extend(*test);
                out.extend(*update);
                out.push(*body);
            }
            Self::Foreach { vars, iterable, body } => {
                out.extend(vars);
                out.push(*iterable);
                out.push(*body);
            }
            Self::Range { first, last } => {
                out.push(*first);
                out.push(*last);
            }
            Self::While { test, body } => {
                out.push(*test);
                out.push(*body);
            }
            Self::DoWhile { body, test } => {
                out.push(*body);
                out.push(*test);
            }
            Self::Return { argument } => out.extend(*argument),
            Self::CodeBlock { open_comment, statements } => {
                out.extend(*open_comment);
                out.extend(statements);
            }
            Self::Lambda { args, code } => {
                out.push(*args);
                out.push(*code);
            }
        }

        out
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "Literal",
            Self::StringBlock => "StringBlock",
            Self::Identifier => "Identifier",
            Self::Spread { .. } => "Spread",
            Self::Array { .. } => "Array",
            Self::Mapping { .. } => "Mapping",
            Self::MappingPair { .. } => "MappingPair",
            Self::Call { .. } => "Call",
            Self::Member { .. } => "Member",
            Self::Index { .. } => "Index",
            Self::Indexor { .. } => "Indexor",
            Self::IndexorMark { .. } => "IndexorMark",
            Self::ParentAccessor { .. } => "ParentAccessor",
            Self::Binary { .. } => "Binary",
            Self::Logical { .. } => "Logical",
            Self::Ternary { .. } => "Ternary",
            Self::Assignment { .. } => "Assignment",
            Self::Unary { .. } => "Unary",
            Self::TypeCast { .. } => "TypeCast",
            Self::Paren { .. } => "Paren",
            Self::MultiExpression { .. } => "MultiExpression",
            Self::VarDecl { .. } => "VarDecl",
            Self::VarDeclarator { .. } => "VarDeclarator",
            Self::Function { .. } => "Function",
            Self::StructDef { .. } => "StructDef",
            Self::StructLiteral { .. } => "StructLiteral",
            Self::If { .. } => "If",
            Self::Switch { .. } => "Switch",
            Self::Case { .. } => "Case",
            Self::For { .. } => "For",
            Self::Foreach { .. } => "Foreach",
            Self::Range { .. } => "Range",
            Self::While { .. } => "While",
            Self::DoWhile { .. } => "DoWhile",
            Self::Return { .. } => "Return",
            Self::ControlFlow { .. } => "ControlFlow",
            Self::Inherit { .. } => "Inherit",
            Self::Directive { .. } => "Directive",
            Self::BlankLine => "BlankLine",
            Self::Comment { .. } => "Comment",
            Self::CodeBlock { .. } => "CodeBlock",
            Self::Closure => "Closure",
            Self::InlineClosure { .. } => "InlineClosure",
            Self::Lambda { .. } => "Lambda",
            Self::LambdaIndexor => "LambdaIndexor",
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Self::Comment { .. })
    }

    pub fn is_binaryish(&self) -> bool {
        matches!(self, Self::Binary { .. } | Self::Logical { .. })
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Array { .. } | Self::Mapping { .. })
    }
}
