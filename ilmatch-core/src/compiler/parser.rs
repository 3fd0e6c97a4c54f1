use alloc::{
    string::String,
    vec::Vec,
};
use core::{
    fmt::{
        self,
        Display,
    },
    ops::Range,
};

use super::{
    Lexer,
    PositionedError,
    Token,
};
use crate::{
    pattern::OwnedExpressionPattern,
    Atom,
};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ParseError {
    EmptyPattern,

    MissingCapture,
    MultipleCaptures,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPattern => write!(f, "pattern is empty"),
            Self::MissingCapture => write!(f, "pattern has no capturing wildcard (??)"),
            Self::MultipleCaptures => {
                write!(f, "pattern has more than one capturing wildcard (??)")
            }
        }
    }
}

pub struct PatternParser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,

    literal_text: String,
    atoms: Vec<Atom>,

    capture_position: Option<Range<usize>>,
}

impl<'a> PatternParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            lexer: Lexer::new(input),

            atoms: Vec::with_capacity(32),
            literal_text: String::with_capacity(input.len()),

            capture_position: None,
        }
    }

    pub fn parse(mut self) -> Result<OwnedExpressionPattern, PositionedError<ParseError>> {
        if self.input.is_empty() {
            return Err(PositionedError::new(0..0, ParseError::EmptyPattern));
        }

        while let Some(token) = self.lexer.next_token() {
            match token {
                Token::Text(value) => self.push_literal(value),

                /* parentheses are structural in the corpus and always matched literally */
                Token::GroupOpen => self.push_literal("("),
                Token::GroupClose => self.push_literal(")"),

                Token::Wildcard => self.atoms.push(Atom::Wildcard),
                Token::Capture => self.parse_capture()?,
            }
        }

        if self.capture_position.is_none() {
            return Err(PositionedError::new(
                0..self.input.len(),
                ParseError::MissingCapture,
            ));
        }

        Ok(OwnedExpressionPattern::new(
            self.atoms,
            self.literal_text,
            self.input.into(),
        ))
    }

    fn push_literal(&mut self, value: &str) {
        let text_start = self.literal_text.len();
        self.literal_text.push_str(value);

        self.atoms.push(Atom::Literal {
            text_start,
            text_end: self.literal_text.len(),
        });
    }

    fn parse_capture(&mut self) -> Result<(), PositionedError<ParseError>> {
        if self.capture_position.is_some() {
            return Err(PositionedError::new(
                self.lexer.token_range(),
                ParseError::MultipleCaptures,
            ));
        }

        self.capture_position = Some(self.lexer.token_range());
        self.atoms.push(Atom::Capture);
        Ok(())
    }
}

/// Parse the given string as expression pattern.
///
/// The pattern must contain exactly one capturing wildcard (`??`).
pub fn parse_pattern(pattern: &str) -> Result<OwnedExpressionPattern, PositionedError<ParseError>> {
    let parser = PatternParser::new(pattern);
    parser.parse()
}
