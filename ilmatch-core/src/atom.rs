/// An atom represents a single operation that the matcher should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Atom {
    /// Match a run of text from the literal text table.
    Literal { text_start: usize, text_end: usize },

    /// Match one or more word characters without saving them.
    Wildcard,

    /// Match one or more word characters and save them as the pattern capture.
    Capture,
}

/// Returns true if the character belongs to the word character class
/// matched by wildcards (alphanumeric or underscore).
pub fn is_word_char(value: char) -> bool {
    value == '_' || value.is_alphanumeric()
}
