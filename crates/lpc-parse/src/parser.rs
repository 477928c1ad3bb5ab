use lpc_ast::{Arena, CommentKind, Document, Node, NodeId, NodeKind, TextRange, TextSize};
use lpc_errors::ParseError;
use lpc_tokenizer::{SyntaxKind, Token, Tokenizer};

pub(crate) type Result<T, E = ParseError> = std::result::Result<T, E>;

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokenizer: Tokenizer<'t>,
    nodes: Arena<Node>,
    /// Comments met in the middle of an expression. They are attached to the
    /// enclosing statement or list element once it is complete.
    pending: Vec<NodeId>,
    /// Blank lines consumed while looking past a statement for `else`.
    held_blank: Option<Token>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self {
            text,
            tokenizer: Tokenizer::new(text),
            nodes: Arena::new(),
            pending: Vec::new(),
            held_blank: None,
        }
    }

    pub(crate) fn text(&self, range: TextRange) -> &'t str {
        &self.text[range]
    }

    /// The next token, trivia included.
    pub(crate) fn raw(&self) -> Token {
        self.held_blank.unwrap_or(*self.tokenizer.peek())
    }

    pub(crate) fn bump_raw(&mut self) -> Token {
        match self.held_blank.take() {
            Some(token) => token,
            None => self.tokenizer.next_token(),
        }
    }

    /// Parks a blank-line token so that it is seen again by the next `raw`.
    pub(crate) fn hold_blank(&mut self) {
        if self.held_blank.is_none() && self.tokenizer.peek().kind == SyntaxKind::BLANK_LINES {
            self.held_blank = Some(self.tokenizer.next_token());
        }
    }

    /// The token after a held blank line.
    pub(crate) fn kind_after_blank(&self) -> SyntaxKind {
        self.tokenizer.peek().kind
    }

    pub(crate) fn drop_held_blank(&mut self) {
        self.held_blank = None;
    }

    pub(crate) fn on_own_line(&self) -> bool {
        self.held_blank.is_some() || self.tokenizer.did_token_start_on_own_line()
    }

    /// The next significant token. Comments in between are parked in
    /// `pending` and blank lines are dropped.
    pub(crate) fn peek(&mut self) -> Token {
        loop {
            let token = self.raw();
            match token.kind {
                SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => {
                    let comment = self.comment();
                    self.pending.push(comment);
                }
                SyntaxKind::BLANK_LINES => {
                    self.bump_raw();
                }
                _ => return token,
            }
        }
    }

    pub(crate) fn peek_kind(&mut self) -> SyntaxKind {
        self.peek().kind
    }

    pub(crate) fn at(&mut self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn at_text(&mut self, kind: SyntaxKind, text: &str) -> bool {
        let token = self.peek();
        token.kind == kind && self.text(token.range) == text
    }

    pub(crate) fn bump(&mut self) -> Result<Token> {
        let token = self.peek();
        if let Some(message) = token.error {
            return Err(ParseError::new(message, token.range));
        }
        Ok(self.bump_raw())
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> Result<Option<Token>> {
        if self.at(kind) { self.bump().map(Some) } else { Ok(None) }
    }

    pub(crate) fn expect(&mut self, kind: SyntaxKind, what: &str) -> Result<Token> {
        if self.at(kind) {
            return self.bump();
        }
        Err(self.unexpected_with(&format!("expected {what}")))
    }

    pub(crate) fn unexpected(&mut self) -> ParseError {
        let token = self.peek();
        match (token.error, token.kind) {
            (Some(message), _) => ParseError::new(message, token.range),
            (None, SyntaxKind::EOF) => ParseError::new("unexpected end of file", token.range),
            (None, _) => ParseError::new(
                format!("unexpected `{}`", self.text(token.range)),
                token.range,
            ),
        }
    }

    pub(crate) fn unexpected_with(&mut self, expected: &str) -> ParseError {
        let token = self.peek();
        if let Some(message) = token.error {
            return ParseError::new(message, token.range);
        }
        let found = match token.kind {
            SyntaxKind::EOF => "end of file".to_owned(),
            _ => format!("`{}`", self.text(token.range)),
        };
        ParseError::new(format!("{expected}, found {found}"), token.range)
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        self.nodes.alloc(Node { kind, range, parent: None, suffix_comment: None })
    }

    pub(crate) fn replace(&mut self, id: NodeId, kind: NodeKind, range: TextRange) {
        let node = &mut self.nodes[id];
        node.kind = kind;
        node.range = range;
    }

    pub(crate) fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub(crate) fn range(&self, id: NodeId) -> TextRange {
        self.nodes[id].range
    }

    pub(crate) fn start(&self, id: NodeId) -> TextSize {
        self.nodes[id].range.start()
    }

    pub(crate) fn end(&self, id: NodeId) -> TextSize {
        self.nodes[id].range.end()
    }

    pub(crate) fn span(&self, from: NodeId, to: NodeId) -> TextRange {
        TextRange::new(self.start(from), self.end(to))
    }

    pub(crate) fn has_suffix(&self, id: NodeId) -> bool {
        self.nodes[id].suffix_comment.is_some()
    }

    /// Consumes the comment token under the cursor.
    pub(crate) fn comment(&mut self) -> NodeId {
        let token = self.bump_raw();
        let kind = match token.kind {
            SyntaxKind::LINE_COMMENT => CommentKind::Line,
            _ => CommentKind::Block,
        };
        self.alloc(NodeKind::Comment { kind }, token.range)
    }

    pub(crate) fn set_suffix(&mut self, owner: NodeId, comment: NodeId) {
        tracing::trace!(owner = ?self.range(owner), comment = ?self.range(comment), "suffix comment");
        self.nodes[owner].suffix_comment = Some(comment);
    }

    /// Takes a comment that continues `owner`'s last line as its suffix.
    pub(crate) fn trailing_comment(&mut self, owner: NodeId) -> bool {
        let is_comment = matches!(
            self.raw().kind,
            SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT
        );
        if !is_comment || self.on_own_line() || self.has_suffix(owner) {
            return false;
        }
        let comment = self.comment();
        self.set_suffix(owner, comment);
        true
    }

    pub(crate) fn park(&mut self, comment: NodeId) {
        self.pending.push(comment);
    }

    /// Moves parked comments onto `owner`. The first becomes its suffix when
    /// it has none; the rest are returned for the caller to place after it.
    pub(crate) fn flush_pending(&mut self, owner: NodeId) -> Vec<NodeId> {
        let mut rest = Vec::new();
        for comment in std::mem::take(&mut self.pending) {
            if self.has_suffix(owner) {
                rest.push(comment);
            } else {
                self.set_suffix(owner, comment);
            }
        }
        rest
    }

    pub(crate) fn take_pending(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn finish(self, roots: Vec<NodeId>) -> Document {
        Document::new(self.text.to_owned(), self.nodes, roots)
    }
}
