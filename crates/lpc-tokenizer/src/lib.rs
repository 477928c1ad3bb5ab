mod cursor;
mod syntax_kind;
mod token_set;
mod words;

use cursor::{Cursor, EOF_CHAR};
use once_cell::sync::Lazy;
use regex::Regex;
pub use syntax_kind::SyntaxKind;
use syntax_kind::SyntaxKind::*;
pub use text_size::{TextRange, TextSize};
pub use token_set::TokenSet;
pub use words::is_type_allowed_as_name;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*").unwrap());

static CAST_TAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:int|string|status|object|array|mapping|closure|symbol|float|mixed|union|void)\s*(?:\*\s*)?\)",
    )
    .unwrap()
});

static CLOSURE_SYMBOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:::)?[_a-zA-Z][_a-zA-Z0-9]*(?:::[_a-zA-Z][_a-zA-Z0-9]*)?|\(\{|\(\[|[-+*/%<>=!&|^~?]+)",
    )
    .unwrap()
});

static LAMBDA_INDEXOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[(?:,\]|<\.\.<\]|<\.\.\]|\.\.<\]|\.\.\]|<)?").unwrap());

static CLOSURE_ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$(?:[0-9]+|\([_a-zA-Z][_a-zA-Z0-9]*\))").unwrap());

static STRUCT_TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<[_a-zA-Z][_a-zA-Z0-9]*>").unwrap());

static STRING_BLOCK_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@@?[_a-zA-Z][_a-zA-Z0-9]*").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub error: Option<&'static str>,
}

impl Token {
    const EOF: Self = Self { kind: EOF, range: TextRange::empty(TextSize::new(0)), error: None };
}

/// Opening constructs whose closing glyph depends on what is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BracketKind {
    Array,
    Mapping,
    Paren,
    InlineClosure,
    Lambda,
    ForEach,
    Indexor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    WithinFile,
    WithinCommentBlock,
    StartDirective,
    WithinDirective,
    WithinStringLiteralBlock { marker: TextRange },
    EndStringLiteralBlock { marker: TextRange },
}

pub struct Tokenizer<'a> {
    text: &'a str,
    cursor: Cursor<'a>,
    current: Token,
    state: LexState,
    states: Vec<LexState>,
    brackets: Vec<BracketKind>,
    last_kind: SyntaxKind,
    newline_credit: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            state: LexState::WithinFile,
            states: Vec::new(),
            brackets: Vec::new(),
            last_kind: EOF,
            newline_credit: 0,
        };
        tokenizer.next_token();
        tokenizer
    }

    /// The cached lookahead token. Repeated calls never consume input.
    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        std::mem::replace(&mut self.current, token)
    }

    /// Whether only horizontal whitespace separates the lookahead token from
    /// the previous newline (or the start of the text).
    pub fn did_token_start_on_own_line(&self) -> bool {
        is_line_start(self.text, self.current.range.start())
    }

    fn range(&self) -> TextRange {
        let end = self.cursor.pos();
        TextRange::new(end - self.cursor.pos_within_token(), end)
    }

    fn token(&self, kind: SyntaxKind) -> Token {
        Token { kind, range: self.range(), error: None }
    }

    fn error(&mut self, message: &'static str) -> Token {
        if self.cursor.pos_within_token() == TextSize::new(0) {
            self.cursor.advance();
        }
        Token { kind: UNKNOWN, range: self.range(), error: Some(message) }
    }

    fn scan(&mut self) -> Token {
        let start = self.cursor.pos();

        let token = match self.state {
            LexState::WithinFile => self.scan_file(),
            LexState::WithinCommentBlock => self.comment_block(),
            LexState::StartDirective => self.directive_key(),
            LexState::WithinDirective => self.directive_argument(),
            LexState::WithinStringLiteralBlock { marker } => self.string_block_body(marker),
            LexState::EndStringLiteralBlock { marker } => self.string_block_end(marker),
        };

        debug_assert!(
            self.cursor.pos() > start || self.cursor.eos(),
            "tokenizer did not advance at offset {start:?}"
        );

        if !token.kind.is_comment() && token.kind != BLANK_LINES {
            self.last_kind = token.kind;
        }
        token
    }

    fn scan_file(&mut self) -> Token {
        self.cursor.reset_pos_within_token();
        let at_file_start = self.cursor.pos() == TextSize::new(0);
        let newlines = self.cursor.skip_whitespace(true) + std::mem::take(&mut self.newline_credit);
        if newlines > 1 && self.brackets.is_empty() && !at_file_start {
            return self.token(BLANK_LINES);
        }

        self.cursor.reset_pos_within_token();
        if self.cursor.eos() {
            let error = (!self.brackets.is_empty()).then_some("unexpected end of file, a bracket is still open");
            return Token { kind: EOF, range: self.range(), error };
        }

        let kind = match self.cursor.peek() {
            '/' if self.cursor.second() == '/' => {
                self.cursor.advance_until_char('\n');
                LINE_COMMENT
            }
            '/' if self.cursor.second() == '*' => {
                self.states.push(self.state);
                self.state = LexState::WithinCommentBlock;
                return self.comment_block();
            }
            '#' => return self.hash(),
            '@' => return self.string_block_start(),
            '"' => return self.string(),
            '\'' => return self.quote(),
            '$' => match self.cursor.advance_if_regex(&CLOSURE_ARG_RE) {
                Some(_) => CLOSURE_ARG,
                None => return self.error("expected `$N` or `$(name)`"),
            },
            c @ '0'..='9' => {
                self.cursor.advance();
                self.number(c)
            }
            c if c == '_' || c.is_ascii_alphabetic() => self.word(),
            '(' => self.open_paren(),
            ')' => match self.brackets.last() {
                Some(BracketKind::Paren | BracketKind::ForEach) => {
                    self.cursor.advance();
                    self.brackets.pop();
                    PAREN_END
                }
                Some(BracketKind::Lambda) => {
                    self.cursor.advance();
                    self.brackets.pop();
                    LAMBDA_END
                }
                _ => return self.error("unexpected `)`"),
            },
            '{' => {
                self.cursor.advance();
                LEFT_BRACE
            }
            '}' => {
                if self.brackets.last() == Some(&BracketKind::Array)
                    && self.cursor.advance_if_chars(&['}', ')'])
                {
                    self.brackets.pop();
                    ARRAY_END
                } else {
                    self.cursor.advance();
                    RIGHT_BRACE
                }
            }
            '[' => {
                self.cursor.advance();
                self.brackets.push(BracketKind::Indexor);
                INDEXOR_START
            }
            ']' => match self.brackets.last() {
                Some(BracketKind::Indexor) => {
                    self.cursor.advance();
                    self.brackets.pop();
                    INDEXOR_END
                }
                Some(BracketKind::Mapping) if self.cursor.advance_if_chars(&[']', ')']) => {
                    self.brackets.pop();
                    MAPPING_END
                }
                _ => return self.error("unexpected `]`"),
            },
            ':' => self.colon(),
            ';' => {
                self.cursor.advance();
                SEMICOLON
            }
            ',' => {
                self.cursor.advance();
                COMMA
            }
            '?' => {
                self.cursor.advance();
                QUESTION
            }
            '.' => {
                if self.cursor.advance_if_chars(&['.', '.', '.']) {
                    ELLIPSIS
                } else if self.cursor.advance_if_chars(&['.', '.']) {
                    RANGE
                } else {
                    self.cursor.advance();
                    DOT
                }
            }
            '-' if self.cursor.second() == '>' => {
                self.cursor.advance_by(2);
                ARROW
            }
            '<' if self.at_from_end_marker() => {
                self.cursor.advance();
                FROM_END
            }
            '<' if self.last_kind == PAREN_START
                && self.cursor.advance_if_regex(&STRUCT_TYPE_RE).is_some() =>
            {
                STRUCT_TYPE
            }
            _ => return self.operator(),
        };

        self.token(kind)
    }

    fn word(&mut self) -> SyntaxKind {
        let Some(word) = self.cursor.advance_if_regex(&WORD) else {
            return UNKNOWN;
        };

        if word == "lambda" && self.cursor.advance_if_char('(') {
            self.brackets.push(BracketKind::Lambda);
            return LAMBDA_START;
        }

        if word == "in" && self.brackets.last() == Some(&BracketKind::ForEach) {
            return FOREACH_IN;
        }

        words::classify(word)
    }

    fn open_paren(&mut self) -> SyntaxKind {
        self.cursor.advance();

        if self.cursor.advance_if_char('{') {
            self.brackets.push(BracketKind::Array);
            return ARRAY_START;
        }
        if self.cursor.advance_if_char('[') {
            self.brackets.push(BracketKind::Mapping);
            return MAPPING_START;
        }

        let after_space = self.cursor.rest().trim_start_matches([' ', '\t']);
        if after_space.starts_with(':') && !after_space.starts_with("::") {
            self.cursor.skip_whitespace(false);
            self.cursor.advance();
            self.brackets.push(BracketKind::InlineClosure);
            return INLINE_CLOSURE_START;
        }

        let cannot_be_cast = matches!(
            self.last_kind,
            NAME | PAREN_END | INDEXOR_END | LAMBDA_END | IF_KW | WHILE_KW | SWITCH_KW | FOR_KW
        );
        if !cannot_be_cast && self.cursor.advance_if_regex(&CAST_TAIL).is_some() {
            return TYPE_CAST;
        }

        let bracket =
            if self.last_kind == FOREACH_KW { BracketKind::ForEach } else { BracketKind::Paren };
        self.brackets.push(bracket);
        PAREN_START
    }

    fn colon(&mut self) -> SyntaxKind {
        self.cursor.advance();
        if self.cursor.advance_if_char(':') {
            return DOUBLE_COLON;
        }

        match self.brackets.last() {
            Some(BracketKind::InlineClosure) => {
                let after_space = self.cursor.rest().trim_start();
                if after_space.starts_with(')') {
                    self.cursor.skip_whitespace(true);
                    self.cursor.advance();
                    self.brackets.pop();
                    return INLINE_CLOSURE_END;
                }
                COLON
            }
            Some(BracketKind::ForEach) => FOREACH_IN,
            _ => COLON,
        }
    }

    fn at_from_end_marker(&self) -> bool {
        self.brackets.last() == Some(&BracketKind::Indexor)
            && matches!(self.last_kind, INDEXOR_START | RANGE)
            && !matches!(self.cursor.second(), '<' | '=')
    }

    fn operator(&mut self) -> Token {
        let rest = self.cursor.rest();
        for &(op, kind) in words::OPERATORS {
            if rest.starts_with(op) {
                self.cursor.advance_by(op.len());
                return self.token(kind);
            }
        }
        self.error("unexpected character")
    }

    fn hash(&mut self) -> Token {
        if self.cursor.second() == '\'' {
            self.cursor.advance_by(2);
            if self.cursor.advance_if_regex(&LAMBDA_INDEXOR_RE).is_some() {
                return self.token(LAMBDA_INDEXOR);
            }
            if self.cursor.advance_if_regex(&CLOSURE_SYMBOL).is_some() {
                return self.token(CLOSURE);
            }
            return self.error("expected a symbol after `#'`");
        }

        if is_line_start(self.text, self.cursor.pos()) {
            self.cursor.advance();
            self.cursor.skip_whitespace(false);
            let is_directive =
                self.cursor.advance_if_regex(&WORD).is_some_and(|word| words::DIRECTIVES.contains(&word));
            if is_directive {
                self.state = LexState::StartDirective;
                return self.token(DIRECTIVE);
            }
            return self.error("unknown preprocessor directive");
        }

        self.error("unexpected `#`")
    }

    fn string(&mut self) -> Token {
        self.cursor.advance();
        loop {
            match self.cursor.advance() {
                '\\' => {
                    self.cursor.advance();
                }
                '"' => return self.token(STRING),
                EOF_CHAR if self.cursor.eos() => return self.error("unterminated string literal"),
                _ => {}
            }
        }
    }

    fn quote(&mut self) -> Token {
        self.cursor.advance();

        match (self.cursor.peek(), self.cursor.second()) {
            ('\\', _) => {
                self.cursor.advance_by(2);
                self.cursor.advance_while(|c| c != '\'' && c != '\n');
                if self.cursor.advance_if_char('\'') {
                    self.token(CHAR)
                } else {
                    self.error("unterminated character literal")
                }
            }
            (c, '\'') if c != '\n' => {
                self.cursor.advance_by(2);
                self.token(CHAR)
            }
            _ => match self.cursor.advance_if_regex(&WORD) {
                Some(_) => self.token(SYMBOL),
                None => self.error("unterminated character literal"),
            },
        }
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' {
            match self.cursor.peek() {
                'b' | 'o' => {
                    self.cursor.advance();
                    self.digits(false);
                }
                'x' | 'X' => {
                    self.cursor.advance();
                    self.digits(true);
                }
                '0'..='9' => {
                    self.digits(false);
                }
                _ => {}
            }
        } else {
            self.digits(false);
        }

        if self.cursor.peek() == '.' && self.cursor.second().is_ascii_digit() {
            self.cursor.advance();
            self.digits(false);
        }

        self.float_exponent();
        NUMBER
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if !matches!(self.cursor.peek(), 'e' | 'E') {
            return;
        }

        let signed = matches!(self.cursor.second(), '-' | '+');
        let first_digit = if signed { self.cursor.peek_char(2) } else { self.cursor.second() };
        if first_digit.is_ascii_digit() {
            self.cursor.advance_by(if signed { 2 } else { 1 });
            self.digits(false);
        }
    }

    fn comment_block(&mut self) -> Token {
        self.cursor.advance_by(2);
        let closed = self.cursor.advance_until_chars(&['*', '/']);
        self.state = self.states.pop().unwrap_or(LexState::WithinFile);

        if closed {
            self.cursor.advance_by(2);
            self.token(BLOCK_COMMENT)
        } else {
            Token { kind: UNKNOWN, range: self.range(), error: Some("unterminated block comment") }
        }
    }

    fn directive_key(&mut self) -> Token {
        self.cursor.skip_whitespace(false);
        self.cursor.reset_pos_within_token();
        self.state = LexState::WithinDirective;

        if self.cursor.eos() || self.cursor.peek() == '\n' || self.at_line_continuation() {
            return self.directive_argument();
        }

        if self.cursor.advance_if_regex(&WORD).is_some() {
            if self.cursor.peek() == '(' {
                let mut depth = 0usize;
                loop {
                    match self.cursor.peek() {
                        '(' => depth += 1,
                        ')' => depth -= 1,
                        '\n' => break,
                        _ if self.cursor.eos() => break,
                        _ => {}
                    }
                    self.cursor.advance();
                    if depth == 0 {
                        break;
                    }
                }
            }
        } else {
            self.cursor.advance_while(|c| !c.is_whitespace());
        }

        self.token(DIRECTIVE_KEY)
    }

    fn directive_argument(&mut self) -> Token {
        self.cursor.skip_whitespace(false);
        self.cursor.reset_pos_within_token();

        if self.cursor.eos() {
            self.state = LexState::WithinFile;
            return self.token(DIRECTIVE_END);
        }

        match self.cursor.peek() {
            '\n' => {
                self.cursor.advance();
                self.state = LexState::WithinFile;
                self.newline_credit = 1;
                return self.token(DIRECTIVE_END);
            }
            '\\' if self.at_line_continuation() => {
                self.cursor.advance_until_char('\n');
                self.cursor.advance();
                return self.token(DIRECTIVE_LINE_BREAK);
            }
            '/' if self.cursor.second() == '*' => {
                self.states.push(self.state);
                self.state = LexState::WithinCommentBlock;
                return self.comment_block();
            }
            _ => {}
        }

        loop {
            match self.cursor.peek() {
                '\n' => break,
                '\\' if self.at_line_continuation() => break,
                '/' if self.cursor.second() == '*' => break,
                '"' => {
                    self.cursor.advance();
                    while !self.cursor.eos() && !matches!(self.cursor.peek(), '"' | '\n') {
                        if self.cursor.advance() == '\\' {
                            self.cursor.advance();
                        }
                    }
                    self.cursor.advance_if_char('"');
                }
                _ if self.cursor.eos() => break,
                _ => {
                    self.cursor.advance();
                }
            }
        }

        let range = self.range();
        let trimmed = self.text[range].trim_end();
        let range = TextRange::at(range.start(), TextSize::of(trimmed));
        Token { kind: DIRECTIVE_ARGUMENT, range, error: None }
    }

    fn at_line_continuation(&self) -> bool {
        let rest = self.cursor.rest();
        let Some(after) = rest.strip_prefix('\\') else {
            return false;
        };
        let after = after.trim_start_matches([' ', '\t', '\r']);
        after.is_empty() || after.starts_with('\n')
    }

    fn string_block_start(&mut self) -> Token {
        let Some(opener) = self.cursor.advance_if_regex(&STRING_BLOCK_START_RE) else {
            return self.error("expected a text block marker after `@`");
        };

        let marker_len = TextSize::of(opener.trim_start_matches('@'));
        let marker = TextRange::at(self.cursor.pos() - marker_len, marker_len);
        self.states.push(self.state);
        self.state = LexState::WithinStringLiteralBlock { marker };
        self.token(STRING_BLOCK_START)
    }

    fn string_block_body(&mut self, marker: TextRange) -> Token {
        self.cursor.reset_pos_within_token();

        let terminator = format!(r"\n{}\b", regex::escape(&self.text[marker]));
        let found = match Regex::new(&terminator) {
            Ok(re) => self.cursor.advance_until_regex(&re),
            Err(_) => false,
        };

        if !found {
            self.state = self.states.pop().unwrap_or(LexState::WithinFile);
            return Token { kind: UNKNOWN, range: self.range(), error: Some("unterminated text block") };
        }

        self.cursor.advance();
        self.state = LexState::EndStringLiteralBlock { marker };
        self.token(STRING_BLOCK_BODY)
    }

    fn string_block_end(&mut self, marker: TextRange) -> Token {
        self.cursor.reset_pos_within_token();
        self.cursor.advance_by(self.text[marker].chars().count());
        self.state = self.states.pop().unwrap_or(LexState::WithinFile);
        self.token(STRING_BLOCK_END)
    }
}

fn is_line_start(text: &str, offset: TextSize) -> bool {
    let before = text[..usize::from(offset)].trim_end_matches([' ', '\t', '\r']);
    before.is_empty() || before.ends_with('\n')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
        &text[token.range]
    }

    fn tokens(text: &str) -> Vec<(SyntaxKind, &str)> {
        let mut tokenizer = Tokenizer::new(text);
        let mut tokens = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                break;
            }
            tokens.push((token.kind, token_text(&token, text)));
        }
        tokens
    }

    #[test]
    fn test_collection_brackets() {
        let text = r#"({ 1, ([ "a": 2 ]) })"#;
        assert_eq!(
            tokens(text),
            vec![
                (ARRAY_START, "({"),
                (NUMBER, "1"),
                (COMMA, ","),
                (MAPPING_START, "(["),
                (STRING, r#""a""#),
                (COLON, ":"),
                (NUMBER, "2"),
                (MAPPING_END, "])"),
                (ARRAY_END, "})"),
            ]
        );
    }

    #[test]
    fn test_brace_paren_only_closes_an_open_array() {
        let text = "(( 1, 2 })";
        assert_eq!(
            tokens(text),
            vec![
                (PAREN_START, "("),
                (PAREN_START, "("),
                (NUMBER, "1"),
                (COMMA, ","),
                (NUMBER, "2"),
                (RIGHT_BRACE, "}"),
                (PAREN_END, ")"),
            ]
        );
    }

    #[test]
    fn test_unmatched_closer_is_unknown() {
        let text = "a ] b";
        let mut tokenizer = Tokenizer::new(text);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, NAME);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, UNKNOWN);
        assert_eq!(token_text(&token, text), "]");
        assert_eq!(token.error, Some("unexpected `]`"));
    }

    #[test]
    fn test_open_bracket_at_eof() {
        let mut tokenizer = Tokenizer::new("({ 1");
        tokenizer.next_token();
        tokenizer.next_token();

        let eof = tokenizer.next_token();
        assert_eq!(eof.kind, EOF);
        assert!(eof.error.is_some());
    }

    #[test]
    fn test_type_cast() {
        let text = "(string *) env";
        assert_eq!(tokens(text), vec![(TYPE_CAST, "(string *)"), (NAME, "env")]);

        let text = "fn(string)";
        assert_eq!(
            tokens(text),
            vec![(NAME, "fn"), (PAREN_START, "("), (TYPE, "string"), (PAREN_END, ")")]
        );

        let text = "(string s)";
        assert_eq!(
            tokens(text),
            vec![(PAREN_START, "("), (TYPE, "string"), (NAME, "s"), (PAREN_END, ")")]
        );
    }

    #[test]
    fn test_longest_operator_wins() {
        let text = "a >>>= b >= c >> d > e";
        assert_eq!(
            tokens(text),
            vec![
                (NAME, "a"),
                (ASSIGN_OP, ">>>="),
                (NAME, "b"),
                (BINARY_OP, ">="),
                (NAME, "c"),
                (BINARY_OP, ">>"),
                (NAME, "d"),
                (BINARY_OP, ">"),
                (NAME, "e"),
            ]
        );
    }

    #[test]
    fn test_operator_families() {
        let text = "i++ && !j || k * -l";
        assert_eq!(
            tokens(text),
            vec![
                (NAME, "i"),
                (ASSIGN_OP, "++"),
                (LOGICAL_OP, "&&"),
                (UNARY_OP, "!"),
                (NAME, "j"),
                (LOGICAL_OP, "||"),
                (NAME, "k"),
                (STAR, "*"),
                (ARITH_OP, "-"),
                (NAME, "l"),
            ]
        );
    }

    #[test]
    fn test_indexor_markers() {
        let text = "a[ <1.. <2]";
        assert_eq!(
            tokens(text),
            vec![
                (NAME, "a"),
                (INDEXOR_START, "["),
                (FROM_END, "<"),
                (NUMBER, "1"),
                (RANGE, ".."),
                (FROM_END, "<"),
                (NUMBER, "2"),
                (INDEXOR_END, "]"),
            ]
        );

        let text = "a[0..]";
        assert_eq!(
            tokens(text),
            vec![
                (NAME, "a"),
                (INDEXOR_START, "["),
                (NUMBER, "0"),
                (RANGE, ".."),
                (INDEXOR_END, "]"),
            ]
        );
    }

    #[test]
    fn test_inline_closure() {
        let text = "(: $1->id() :)";
        assert_eq!(
            tokens(text),
            vec![
                (INLINE_CLOSURE_START, "(:"),
                (CLOSURE_ARG, "$1"),
                (ARROW, "->"),
                (NAME, "id"),
                (PAREN_START, "("),
                (PAREN_END, ")"),
                (INLINE_CLOSURE_END, ":)"),
            ]
        );

        let text = "( : $(var) : )";
        assert_eq!(
            tokens(text),
            vec![
                (INLINE_CLOSURE_START, "( :"),
                (CLOSURE_ARG, "$(var)"),
                (INLINE_CLOSURE_END, ": )"),
            ]
        );
    }

    #[test]
    fn test_dot_member_and_spread() {
        let text = r#"animals["bird"].name alarm.args..."#;
        assert_eq!(
            tokens(text),
            vec![
                (NAME, "animals"),
                (INDEXOR_START, "["),
                (STRING, r#""bird""#),
                (INDEXOR_END, "]"),
                (DOT, "."),
                (NAME, "name"),
                (NAME, "alarm"),
                (DOT, "."),
                (NAME, "args"),
                (ELLIPSIS, "..."),
            ]
        );
    }

    #[test]
    fn test_parent_accessor_is_not_a_closure() {
        let text = "(::create())";
        assert_eq!(
            tokens(text),
            vec![
                (PAREN_START, "("),
                (DOUBLE_COLON, "::"),
                (NAME, "create"),
                (PAREN_START, "("),
                (PAREN_END, ")"),
                (PAREN_END, ")"),
            ]
        );
    }

    #[test]
    fn test_foreach_separators() {
        let text = "foreach (string s in arr)";
        assert_eq!(
            tokens(text),
            vec![
                (FOREACH_KW, "foreach"),
                (PAREN_START, "("),
                (TYPE, "string"),
                (NAME, "s"),
                (FOREACH_IN, "in"),
                (NAME, "arr"),
                (PAREN_END, ")"),
            ]
        );

        let text = "foreach (int i : 1 .. 6)";
        assert_eq!(
            tokens(text),
            vec![
                (FOREACH_KW, "foreach"),
                (PAREN_START, "("),
                (TYPE, "int"),
                (NAME, "i"),
                (FOREACH_IN, ":"),
                (NUMBER, "1"),
                (RANGE, ".."),
                (NUMBER, "6"),
                (PAREN_END, ")"),
            ]
        );
    }

    #[test]
    fn test_lambda_and_closures() {
        let text = "lambda(({ 'a }), ({ #'!=, #'[..<], #'query_name }))";
        assert_eq!(
            tokens(text),
            vec![
                (LAMBDA_START, "lambda("),
                (ARRAY_START, "({"),
                (SYMBOL, "'a"),
                (ARRAY_END, "})"),
                (COMMA, ","),
                (ARRAY_START, "({"),
                (CLOSURE, "#'!="),
                (COMMA, ","),
                (LAMBDA_INDEXOR, "#'[..<]"),
                (COMMA, ","),
                (CLOSURE, "#'query_name"),
                (ARRAY_END, "})"),
                (LAMBDA_END, ")"),
            ]
        );
    }

    #[test]
    fn test_literals() {
        let text = r#"0x1f 1.5 1e3 'a' '\n' "say \"hi\"" ..."#;
        assert_eq!(
            tokens(text),
            vec![
                (NUMBER, "0x1f"),
                (NUMBER, "1.5"),
                (NUMBER, "1e3"),
                (CHAR, "'a'"),
                (CHAR, r"'\n'"),
                (STRING, r#""say \"hi\"""#),
                (ELLIPSIS, "..."),
            ]
        );
    }

    #[test]
    fn test_words() {
        let text = "private nomask int status if foo";
        assert_eq!(
            tokens(text),
            vec![
                (MODIFIER, "private"),
                (MODIFIER, "nomask"),
                (TYPE, "int"),
                (TYPE, "status"),
                (IF_KW, "if"),
                (NAME, "foo"),
            ]
        );
    }

    #[test]
    fn test_directive() {
        let text = "#define WRAP(str)  trim(str) \\\n  + 1\nint x;";
        assert_eq!(
            tokens(text),
            vec![
                (DIRECTIVE, "#define"),
                (DIRECTIVE_KEY, "WRAP(str)"),
                (DIRECTIVE_ARGUMENT, "trim(str)"),
                (DIRECTIVE_LINE_BREAK, "\\\n"),
                (DIRECTIVE_ARGUMENT, "+ 1"),
                (DIRECTIVE_END, "\n"),
                (TYPE, "int"),
                (NAME, "x"),
                (SEMICOLON, ";"),
            ]
        );
    }

    #[test]
    fn test_directive_with_block_comment_resumes() {
        let text = "#include \"/std/*.h\" /* multi\nline */ x\n";
        assert_eq!(
            tokens(text),
            vec![
                (DIRECTIVE, "#include"),
                (DIRECTIVE_KEY, "\"/std/*.h\""),
                (BLOCK_COMMENT, "/* multi\nline */"),
                (DIRECTIVE_ARGUMENT, "x"),
                (DIRECTIVE_END, "\n"),
            ]
        );
    }

    #[test]
    fn test_hash_inside_line_is_not_a_directive() {
        let text = "x = #define";
        let kinds: Vec<_> = tokens(text).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![NAME, ASSIGN_OP, UNKNOWN, NAME]);
    }

    #[test]
    fn test_blank_lines() {
        let text = "int x;\n\n\nint y;";
        let kinds: Vec<_> = tokens(text).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![TYPE, NAME, SEMICOLON, BLANK_LINES, TYPE, NAME, SEMICOLON]);

        let text = "foo(a,\n\n b);";
        let kinds: Vec<_> = tokens(text).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![NAME, PAREN_START, NAME, COMMA, NAME, PAREN_END, SEMICOLON]);

        let text = "#include <a.h>\n\nint x;";
        let kinds: Vec<_> = tokens(text).into_iter().map(|(kind, _)| kind).collect();
        assert_eq!(
            kinds,
            vec![DIRECTIVE, DIRECTIVE_KEY, DIRECTIVE_END, BLANK_LINES, TYPE, NAME, SEMICOLON]
        );
    }

    #[test]
    fn test_comment_on_own_line() {
        let text = "x; // same\n  // own";
        let mut tokenizer = Tokenizer::new(text);
        tokenizer.next_token();
        tokenizer.next_token();

        assert_eq!(tokenizer.peek().kind, LINE_COMMENT);
        assert!(!tokenizer.did_token_start_on_own_line());
        assert_eq!(token_text(&tokenizer.next_token(), text), "// same");

        assert_eq!(tokenizer.peek().kind, LINE_COMMENT);
        assert!(tokenizer.did_token_start_on_own_line());
    }

    #[test]
    fn test_string_block() {
        let text = "s = @END\nhello\nENDING\nEND;";
        assert_eq!(
            tokens(text),
            vec![
                (NAME, "s"),
                (ASSIGN_OP, "="),
                (STRING_BLOCK_START, "@END"),
                (STRING_BLOCK_BODY, "\nhello\nENDING\n"),
                (STRING_BLOCK_END, "END"),
                (SEMICOLON, ";"),
            ]
        );
    }

    #[test]
    fn test_struct_literal_type() {
        let text = "(<coords> 1, 2)";
        assert_eq!(
            tokens(text),
            vec![
                (PAREN_START, "("),
                (STRUCT_TYPE, "<coords>"),
                (NUMBER, "1"),
                (COMMA, ","),
                (NUMBER, "2"),
                (PAREN_END, ")"),
            ]
        );
    }

    #[test]
    fn test_peek_is_idempotent() {
        let text = "a b";
        let mut tokenizer = Tokenizer::new(text);

        let first = *tokenizer.peek();
        assert_eq!(*tokenizer.peek(), first);
        assert_eq!(tokenizer.next_token(), first);
        assert_eq!(token_text(tokenizer.peek(), text), "b");
    }
}
