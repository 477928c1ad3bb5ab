use std::str::Chars;

use regex::Regex;
use text_size::{TextLen, TextSize};

pub(crate) const EOF_CHAR: char = '\0';

/// Character stream over the source buffer.
///
/// Every `advance_if_*` call either consumes its whole match or leaves the
/// position untouched.
pub(crate) struct Cursor<'a> {
    text: &'a str,
    chars: Chars<'a>,
    len: TextSize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self { text, chars: text.chars(), len: text.text_len() }
    }

    pub(crate) fn len(&self) -> TextSize {
        TextSize::new(self.chars.as_str().len() as u32)
    }

    pub(crate) fn pos(&self) -> TextSize {
        self.text.text_len() - self.len()
    }

    pub(crate) fn rest(&self) -> &'a str {
        self.chars.as_str()
    }

    pub(crate) fn pos_within_token(&self) -> TextSize {
        self.len - self.len()
    }

    pub(crate) fn reset_pos_within_token(&mut self) {
        self.len = self.len();
    }

    pub(crate) fn eos(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    pub(crate) fn peek(&self) -> char {
        self.peek_char(0)
    }

    pub(crate) fn second(&self) -> char {
        self.peek_char(1)
    }

    pub(crate) fn peek_char(&self, n: usize) -> char {
        self.chars.clone().nth(n).unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance(&mut self) -> char {
        self.chars.next().unwrap_or(EOF_CHAR)
    }

    pub(crate) fn advance_by(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub(crate) fn advance_if_char(&mut self, c: char) -> bool {
        if self.peek() == c {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance_if_chars(&mut self, chars: &[char]) -> bool {
        let mut ahead = self.chars.clone();
        if chars.iter().all(|&c| ahead.next() == Some(c)) {
            self.advance_by(chars.len());
            true
        } else {
            false
        }
    }

    /// Consumes the match of `re` if it starts exactly at the current
    /// position. Patterns are written with a leading `^`.
    pub(crate) fn advance_if_regex(&mut self, re: &Regex) -> Option<&'a str> {
        let rest = self.rest();
        let found = re.find(rest).filter(|m| m.start() == 0 && !m.is_empty())?;
        let matched = &rest[..found.end()];
        self.skip_bytes(found.end());
        Some(matched)
    }

    /// Stops right before `c`. Returns `false` (at end of stream) when `c` never occurs.
    pub(crate) fn advance_until_char(&mut self, c: char) -> bool {
        match self.rest().find(c) {
            Some(offset) => {
                self.skip_bytes(offset);
                true
            }
            None => {
                self.skip_bytes(self.rest().len());
                false
            }
        }
    }

    pub(crate) fn advance_until_chars(&mut self, chars: &[char]) -> bool {
        let needle: String = chars.iter().collect();
        match self.rest().find(needle.as_str()) {
            Some(offset) => {
                self.skip_bytes(offset);
                true
            }
            None => {
                self.skip_bytes(self.rest().len());
                false
            }
        }
    }

    pub(crate) fn advance_until_regex(&mut self, re: &Regex) -> bool {
        match re.find(self.rest()) {
            Some(found) => {
                self.skip_bytes(found.start());
                true
            }
            None => {
                self.skip_bytes(self.rest().len());
                false
            }
        }
    }

    pub(crate) fn advance_while(&mut self, f: impl Fn(char) -> bool + Copy) {
        while self.peek() != EOF_CHAR && f(self.peek()) {
            self.advance();
        }
    }

    /// Returns the number of newlines crossed.
    pub(crate) fn skip_whitespace(&mut self, include_newlines: bool) -> usize {
        let mut newlines = 0;
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' | '\u{c}' => {}
                '\n' if include_newlines => newlines += 1,
                _ => return newlines,
            }
            self.advance();
        }
    }

    fn skip_bytes(&mut self, n: usize) {
        let target = self.rest().len() - n;
        while self.rest().len() > target {
            self.advance();
        }
    }
}
