use alloc::{
    string::String,
    vec::Vec,
};
use core::fmt::Debug;

use crate::Atom;

/// An expression pattern is a structure used in matching processes and consists of three components:
///
/// 1. Atoms  
///    A list of instructions that define how the matcher should process the corpus at the current cursor.
///
/// 2. Literal Text  
///    The fixed text of the pattern which the literal atoms reference.
///
/// 3. Source  
///    The pattern text as it has been written by the author.
pub trait ExpressionPattern: Send + Sync + Debug {
    /// Retrieves the list of atoms within this pattern.
    fn atoms(&self) -> &[Atom];

    /// Retrieves the literal text referenced by the atoms.
    fn literal_text(&self) -> &str;

    /// Retrieves the pattern text this pattern has been compiled from.
    fn source(&self) -> &str;

    /// Returns the number of capturing wildcards.
    fn capture_count(&self) -> usize {
        self.atoms()
            .iter()
            .filter(|atom| matches!(atom, Atom::Capture))
            .count()
    }
}

/// An implementation of the [ExpressionPattern] interface that borrows all of its contents.
///
/// This struct is primarily used alongside the [pattern!] macro to generate patterns at compile time.
#[derive(Debug, Clone, Copy)]
pub struct BorrowedExpressionPattern<'a> {
    atoms: &'a [Atom],
    literal_text: &'a str,
    source: &'a str,
}

impl<'a> BorrowedExpressionPattern<'a> {
    pub const fn new(atoms: &'a [Atom], literal_text: &'a str, source: &'a str) -> Self {
        Self {
            atoms,
            literal_text,
            source,
        }
    }
}

impl ExpressionPattern for BorrowedExpressionPattern<'_> {
    fn atoms(&self) -> &[Atom] {
        self.atoms
    }

    fn literal_text(&self) -> &str {
        self.literal_text
    }

    fn source(&self) -> &str {
        self.source
    }
}

/// An implementation of the [ExpressionPattern] interface that owns its atoms and texts.
///
/// This struct is primarily used with [compiler::compile_pattern] to compile patterns at runtime.
#[derive(Debug, Default, Clone)]
pub struct OwnedExpressionPattern {
    atoms: Vec<Atom>,
    literal_text: String,
    source: String,
}

impl OwnedExpressionPattern {
    pub fn new(atoms: Vec<Atom>, literal_text: String, source: String) -> Self {
        Self {
            atoms,
            literal_text,
            source,
        }
    }
}

impl ExpressionPattern for OwnedExpressionPattern {
    fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    fn literal_text(&self) -> &str {
        &self.literal_text
    }

    fn source(&self) -> &str {
        &self.source
    }
}
