mod lexer;
use lexer::{
    Lexer,
    Token,
};

mod error;
pub use error::PositionedError;

mod parser;
pub use parser::{
    parse_pattern,
    ParseError,
};

mod optimizer;
pub use optimizer::optimize_pattern;

use crate::pattern::OwnedExpressionPattern;

/// Parse and optimize the given pattern text.
///
/// This is the entry point to use when compiling patterns at runtime.
pub fn compile_pattern(
    pattern: &str,
) -> Result<OwnedExpressionPattern, PositionedError<ParseError>> {
    let pattern = self::parse_pattern(pattern)?;
    Ok(self::optimize_pattern(&pattern))
}
