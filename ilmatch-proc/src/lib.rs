use proc_macro::TokenStream;
use syn::parse_macro_input;

extern crate proc_macro;

mod macro_pattern;

/// Compile an expression pattern and generate an instance of <a href="struct.BorrowedExpressionPattern.html">BorrowedExpressionPattern</a> at compile time.  
/// A pattern which does not contain exactly one capturing wildcard is rejected with a compile error.  
/// An exhausive overview of the pattern syntax can be found here: <a href="index.html">ilmatch</a>.
///
/// # Example
/// ```
/// # use ilmatch_core as ilmatch;
/// # use ilmatch_core::*;
/// # use ilmatch_proc::*;
/// static MY_PATTERN: &dyn ExpressionPattern = &pattern!("HLIL_CALL(HLIL_CONST_PTR(??), ())");
/// ```
///
/// A pattern without a capturing wildcard does not compile:
/// ```compile_fail
/// # use ilmatch_core as ilmatch;
/// # use ilmatch_core::*;
/// # use ilmatch_proc::*;
/// static MY_PATTERN: &dyn ExpressionPattern = &pattern!("A(..)");
/// ```
///
/// Neither does a pattern with more than one:
/// ```compile_fail
/// # use ilmatch_core as ilmatch;
/// # use ilmatch_core::*;
/// # use ilmatch_proc::*;
/// static MY_PATTERN: &dyn ExpressionPattern = &pattern!("A(??, ??)");
/// ```
#[proc_macro]
pub fn pattern(item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item);

    macro_pattern::pattern(item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
