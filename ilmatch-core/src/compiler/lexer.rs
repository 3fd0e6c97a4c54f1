use core::{
    ops::Range,
    str::CharIndices,
};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Token<'a> {
    /// Literal text (basically the fallback if no other token matched)
    Text(&'a str),

    /// Group open token: "("
    GroupOpen,
    /// Group close token: ")"
    GroupClose,

    /// Non capturing wildcard: ".."
    Wildcard,
    /// Capturing wildcard: "??"
    Capture,
}

pub struct Lexer<'a> {
    input: &'a str,
    iter: CharIndices<'a>,

    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            iter: input.char_indices(),

            token_start: 0,
        }
    }

    pub fn token_range(&self) -> Range<usize> {
        self.token_start..self.iter.offset()
    }

    /// Get the marker token starting with `value` if it is followed by the same character
    fn marker_to_token(value: char, next: Option<char>) -> Option<Token<'a>> {
        Some(match (value, next) {
            ('.', Some('.')) => Token::Wildcard,
            ('?', Some('?')) => Token::Capture,
            _ => return None,
        })
    }

    /// Returns true if a new token starts at the current iterator position
    fn is_token_start(&self) -> bool {
        let mut lookahead = self.iter.clone();
        let Some((_, value)) = lookahead.next() else {
            return true;
        };

        if matches!(value, '(' | ')') {
            return true;
        }

        let next = lookahead.next().map(|(_, v)| v);
        Self::marker_to_token(value, next).is_some()
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        let (token_pos, token) = self.iter.next()?;
        self.token_start = token_pos;

        match token {
            '(' => return Some(Token::GroupOpen),
            ')' => return Some(Token::GroupClose),
            _ => {}
        }

        let next = self.iter.clone().next().map(|(_, v)| v);
        if let Some(marker) = Self::marker_to_token(token, next) {
            self.iter.next();
            return Some(marker);
        }

        /* everything else is literal text, whitespaces and line breaks included */
        while !self.is_token_start() {
            self.iter.next();
        }

        Some(Token::Text(&self.input[token_pos..self.iter.offset()]))
    }
}
