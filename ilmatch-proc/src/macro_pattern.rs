use std::{
    io::{
        self,
        Cursor,
        Write,
    },
    ops::Range,
};

use ilmatch_core::{
    compiler,
    Atom,
    ExpressionPattern,
};
use proc_macro2::{
    Span,
    TokenStream,
};
use quote::ToTokens;
use syn::{
    parse2,
    Error,
    Expr,
    LitStr,
    Result,
};

fn emit_atom(output: &mut dyn Write, atom: &Atom) -> io::Result<()> {
    match atom {
        Atom::Literal {
            text_start,
            text_end,
        } => {
            write!(
                output,
                "ilmatch::Atom::Literal{{ text_start: 0x{:X}, text_end: 0x{:X} }}",
                text_start, text_end
            )?;
        }

        Atom::Wildcard => {
            write!(output, "ilmatch::Atom::Wildcard")?;
        }
        Atom::Capture => {
            write!(output, "ilmatch::Atom::Capture")?;
        }
    }

    Ok(())
}

fn emit_atoms(output: &mut dyn Write, atoms: &[Atom]) -> io::Result<()> {
    write!(output, "&[")?;

    if !atoms.is_empty() {
        self::emit_atom(output, &atoms[0])?;
    }

    if atoms.len() > 1 {
        for atom in &atoms[1..] {
            write!(output, ", ")?;
            self::emit_atom(output, atom)?;
        }
    }

    write!(output, "]")?;
    Ok(())
}

fn pattern_to_const_str(pattern: &dyn ExpressionPattern) -> io::Result<String> {
    let mut result_buffer = Vec::<u8>::with_capacity(1024);
    {
        let mut writer = Cursor::new(&mut result_buffer);

        write!(&mut writer, "ilmatch::BorrowedExpressionPattern::new(")?;
        emit_atoms(&mut writer, pattern.atoms())?;
        /* Debug formatting of a str yields a valid, escaped string literal */
        write!(&mut writer, ", {:?}", pattern.literal_text())?;
        write!(&mut writer, ", {:?}", pattern.source())?;
        write!(&mut writer, ")")?;
    }

    String::from_utf8(result_buffer).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}

/// Byte offset of the literal value within its source token.
///
/// Returns `None` if the source text differs from the value (e.g. escapes).
fn value_offset(literal: &LitStr) -> Option<usize> {
    let token = literal.token().to_string();

    /* raw strings are prefixed by r and hashes */
    let offset = token.find('"')? + 1;
    let close = token.rfind('"')?;
    if offset > close || token[offset..close] != literal.value() {
        return None;
    }

    Some(offset)
}

fn value_span(literal: &LitStr, range: Range<usize>) -> Span {
    self::value_offset(literal)
        .and_then(|offset| {
            literal
                .token()
                .subspan(range.start + offset..range.end + offset)
        })
        .unwrap_or(literal.span())
}

pub fn pattern(item: TokenStream) -> Result<TokenStream> {
    let pattern_str = parse2::<LitStr>(item)?;
    let pattern = match compiler::compile_pattern(&pattern_str.value()) {
        Ok(result) => result,
        Err(error) => {
            let error_span = self::value_span(&pattern_str, error.position().clone());
            return Err(Error::new(error_span, format!("{}", error.inner())));
        }
    };

    let pattern = pattern_to_const_str(&pattern)
        .map_err(|err| Error::new(pattern_str.span(), err.to_string()))?;
    let pattern = syn::parse_str::<Expr>(&pattern)?;
    Ok(pattern.to_token_stream())
}
