use core::ops::Range;

use crate::{
    atom::is_word_char,
    Atom,
    ExpressionPattern,
    MatchHint,
    MatchTarget,
};

/// A single match of an [ExpressionPattern] within a corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'a> {
    region: Range<usize>,
    capture_range: Range<usize>,
    capture: &'a str,
}

impl<'a> Match<'a> {
    /// Byte range of the corpus covered by the whole pattern.
    pub fn region(&self) -> &Range<usize> {
        &self.region
    }

    /// Byte range of the corpus covered by the capturing wildcard.
    pub fn capture_range(&self) -> &Range<usize> {
        &self.capture_range
    }

    /// The captured text, verbatim. No numeric interpretation is performed.
    pub fn capture(&self) -> &'a str {
        self.capture
    }
}

/// The `ExpressionMatcher` is responsible for searching an [ExpressionPattern] within a [MatchTarget].
///
/// Use [`ExpressionMatcher::next_match`] to iterate through matches of the specified pattern.
/// Matches are reported by their leftmost start position, the same way a backtracking
/// regular expression with greedy `\w+` wildcards would report them.
pub struct ExpressionMatcher<'a, T: MatchTarget + ?Sized = str> {
    pattern: &'a dyn ExpressionPattern,
    target: &'a T,

    match_offset: usize,
    capture: Range<usize>,
}

impl<'a, T: MatchTarget + ?Sized> ExpressionMatcher<'a, T> {
    pub fn new(pattern: &'a dyn ExpressionPattern, target: &'a T) -> Self {
        Self {
            pattern,
            target,

            match_offset: 0,
            capture: 0..0,
        }
    }

    /// Length in bytes of the word character run starting at `cursor`.
    fn word_run_length(&self, cursor: usize) -> Option<usize> {
        let remaining = self.target.remaining(cursor)?;
        let length = remaining
            .char_indices()
            .find(|(_, value)| !is_word_char(*value))
            .map_or(remaining.len(), |(index, _)| index);

        Some(length)
    }

    /// Matches the atoms starting at the data cursor.
    /// Returns the cursor after the last atom or `None` if the atoms do not match.
    fn match_atoms(&mut self, mut data_cursor: usize, atoms: &[Atom]) -> Option<usize> {
        let pattern = self.pattern;
        let target = self.target;

        let mut atom_cursor = 0;
        while atom_cursor < atoms.len() {
            match atoms[atom_cursor] {
                Atom::Literal {
                    text_start,
                    text_end,
                } => {
                    let expected_text = &pattern.literal_text()[text_start..text_end];
                    let actual_text = target.subrange(data_cursor, expected_text.len())?;

                    if expected_text != actual_text {
                        return None;
                    }

                    atom_cursor += 1;
                    data_cursor += expected_text.len();
                }

                atom @ (Atom::Wildcard | Atom::Capture) => {
                    let run_length = self.word_run_length(data_cursor)?;
                    let run = target.subrange(data_cursor, run_length)?;

                    /* greedy: try the longest run first and give back one character at a time */
                    let mut length = run_length;
                    while length > 0 {
                        if matches!(atom, Atom::Capture) {
                            self.capture = data_cursor..data_cursor + length;
                        }

                        if let Some(data_cursor) =
                            self.match_atoms(data_cursor + length, &atoms[atom_cursor + 1..])
                        {
                            /* match :) */
                            return Some(data_cursor);
                        }

                        length = run[..length]
                            .char_indices()
                            .next_back()
                            .map_or(0, |(index, _)| index);
                    }

                    return None;
                }
            }
        }

        Some(data_cursor)
    }

    /// Returns the text every match has to start with.
    fn leading_literal(&self) -> &'a str {
        let pattern = self.pattern;
        match pattern.atoms().first() {
            Some(Atom::Literal {
                text_start,
                text_end,
            }) => &pattern.literal_text()[*text_start..*text_end],
            _ => "",
        }
    }

    /// Finds the next match for the associated [ExpressionPattern] within the [MatchTarget].
    ///
    /// # Returns
    /// - `Some(Match)` containing the matched region and the captured text.
    /// - `None` if no further matches are available.
    pub fn next_match(&mut self) -> Option<Match<'a>> {
        let pattern = self.pattern;
        let target = self.target;
        let leading_literal = self.leading_literal();

        while self.match_offset <= target.match_length() {
            let offset = match target.match_hint(self.match_offset, leading_literal) {
                MatchHint::MaybeMatch(offset) => offset,
                MatchHint::NoMatches => break,
            };

            /* the next attempt starts at the following character */
            self.match_offset = offset
                + target
                    .remaining(offset)
                    .and_then(|remaining| remaining.chars().next())
                    .map_or(1, char::len_utf8);

            self.capture = 0..0;
            let Some(match_end) = self.match_atoms(offset, pattern.atoms()) else {
                continue;
            };

            let capture = target
                .subrange(self.capture.start, self.capture.len())
                .unwrap_or_default();

            return Some(Match {
                region: offset..match_end,
                capture_range: self.capture.clone(),
                capture,
            });
        }

        self.match_offset = target.match_length() + 1;
        None
    }
}

/// Search the corpus for the leftmost match of the pattern.
///
/// A pattern may span multiple instructions of a newline joined corpus.
pub fn find_first<'a>(pattern: &'a dyn ExpressionPattern, corpus: &'a str) -> Option<Match<'a>> {
    ExpressionMatcher::new(pattern, corpus).next_match()
}
