#![cfg_attr(not(test), no_std)]
extern crate alloc;

pub mod compiler;

mod atom;
pub use atom::{
    is_word_char,
    Atom,
};

mod tree;
pub use tree::{
    Instruction,
    Operand,
    Scalar,
};

pub mod serializer;
pub use serializer::{
    serialize,
    serialize_body,
};

mod target;
pub use target::{
    MatchHint,
    MatchTarget,
};

mod matcher;
pub use matcher::{
    find_first,
    ExpressionMatcher,
    Match,
};

mod pattern;
pub use pattern::{
    BorrowedExpressionPattern,
    ExpressionPattern,
    OwnedExpressionPattern,
};

mod address;
pub use address::{
    parse_address,
    AddressError,
    AddressRadix,
};

mod catalog;
pub use catalog::{
    AddressResolution,
    CatalogError,
    CatalogMatch,
    SignatureCatalog,
    TargetDescriptor,
    TargetResolution,
};
