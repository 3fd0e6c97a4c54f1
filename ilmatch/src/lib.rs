/*!
Locate call and assignment sites inside decompiled intermediate language by matching
expression patterns against the canonical rendering of each instruction.

# How does it work?
Every instruction of a function is rendered into a canonical `OPERATION(operand, ...)` string
and the body is joined with line breaks. Patterns written in the same form, with wildcards in
place of the operands that differ between builds, are searched within that text. The capture
of the first matching pattern variant is parsed as the address of the function of interest.

*/
#![doc = include_str!("../GRAMMAR.md")]
extern crate self as ilmatch;

pub use ilmatch_core::*;
pub use ilmatch_proc::pattern;

pub mod builtin;

mod config;
pub use config::{
    CatalogConfig,
    ConfigError,
    DriverOptions,
    TargetConfig,
};

mod driver;
pub use driver::{
    resolve_batch,
    resolve_binary,
    resolve_function,
    AnalysisEngine,
    DriverError,
    EngineLoader,
    SignatureError,
    SignatureGenerator,
};

mod report;
pub use report::{
    BinaryReport,
    TargetOutcome,
    TargetReport,
};
