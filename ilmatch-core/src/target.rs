/// A hint where the next possible match of a pattern could start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchHint {
    /// The pattern may match at the given offset.
    MaybeMatch(usize),

    /// The pattern will not match anywhere after the requested offset.
    NoMatches,
}

/// A trait for corpora that can be searched with an expression pattern.
///
/// By default `str` does implement this trait.
pub trait MatchTarget {
    /// Returns the total length in bytes of the text which will be scanned.
    fn match_length(&self) -> usize;

    /// Return a match hint based of the given `literal` which is the text
    /// every match has to start with. The literal may be empty.
    fn match_hint(&self, offset: usize, literal: &str) -> MatchHint;

    /// Retrieves the text starting at `offset` and spanning `length` bytes.
    ///
    /// # Returns
    /// `None` if the range exceeds the corpus or does not lie on character boundaries.
    fn subrange(&self, offset: usize, length: usize) -> Option<&str>;

    /// Retrieves the text starting at `offset` until the end of the corpus.
    fn remaining(&self, offset: usize) -> Option<&str> {
        self.subrange(offset, self.match_length().checked_sub(offset)?)
    }
}

impl MatchTarget for str {
    fn match_length(&self) -> usize {
        self.len()
    }

    fn match_hint(&self, offset: usize, literal: &str) -> MatchHint {
        let Some(remaining) = self.get(offset..) else {
            return MatchHint::NoMatches;
        };

        match remaining.find(literal) {
            Some(position) => MatchHint::MaybeMatch(offset + position),
            None => MatchHint::NoMatches,
        }
    }

    fn subrange(&self, offset: usize, length: usize) -> Option<&str> {
        self.get(offset..offset.checked_add(length)?)
    }
}

#[cfg(test)]
mod test {
    use super::{
        MatchHint,
        MatchTarget,
    };

    #[test]
    fn test_match_hint() {
        let corpus = "VAR(x)\nCALL(y)";
        assert_eq!(corpus.match_hint(0, "CALL"), MatchHint::MaybeMatch(7));
        assert_eq!(corpus.match_hint(7, "CALL"), MatchHint::MaybeMatch(7));
        assert_eq!(corpus.match_hint(8, "CALL"), MatchHint::NoMatches);
        assert_eq!(corpus.match_hint(3, ""), MatchHint::MaybeMatch(3));
        assert_eq!(corpus.match_hint(100, ""), MatchHint::NoMatches);
    }

    #[test]
    fn test_subrange() {
        let corpus = "CONST(ä)";
        assert_eq!(corpus.subrange(0, 5), Some("CONST"));
        assert_eq!(corpus.subrange(6, 2), Some("ä"));
        assert_eq!(corpus.subrange(6, 1), None);
        assert_eq!(corpus.subrange(8, 2), None);
        assert_eq!(corpus.remaining(6), Some("ä)"));
        assert_eq!(corpus.remaining(9), Some(""));
        assert_eq!(corpus.remaining(10), None);
    }
}
