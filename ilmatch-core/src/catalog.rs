use alloc::{
    boxed::Box,
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

use crate::{
    compiler::{
        self,
        ParseError,
        PositionedError,
    },
    find_first,
    parse_address,
    AddressError,
    AddressRadix,
    ExpressionPattern,
    Match,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A target has been declared without any pattern variant.
    EmptyTarget { target: String },

    /// A pattern variant failed to compile.
    MalformedVariant {
        target: String,
        variant: usize,
        error: PositionedError<ParseError>,
    },

    /// A precompiled pattern variant does not contain exactly one capturing wildcard.
    CaptureCount {
        target: String,
        variant: usize,
        count: usize,
    },

    /// Two targets share the same name.
    DuplicateTarget { target: String },
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTarget { target } => write!(f, "target {} has no pattern variants", target),
            Self::MalformedVariant {
                target,
                variant,
                error,
            } => write!(f, "variant {} of target {}: {}", variant, target, error),
            Self::CaptureCount {
                target,
                variant,
                count,
            } => write!(
                f,
                "variant {} of target {} has {} capturing wildcards, expected exactly one",
                variant, target, count
            ),
            Self::DuplicateTarget { target } => write!(f, "target {} declared twice", target),
        }
    }
}

/// A logical function of interest and the ordered pattern variants locating it.
///
/// Variants cover platform and ABI differences and are tried strictly in declaration order.
#[derive(Debug)]
pub struct TargetDescriptor {
    name: String,
    variants: Vec<Box<dyn ExpressionPattern>>,
}

impl TargetDescriptor {
    /// Create a target from already compiled patterns (e.g. created by the `pattern!` macro).
    pub fn new(
        name: impl Into<String>,
        variants: Vec<Box<dyn ExpressionPattern>>,
    ) -> Result<Self, CatalogError> {
        let name = name.into();
        if variants.is_empty() {
            return Err(CatalogError::EmptyTarget { target: name });
        }

        for (variant, pattern) in variants.iter().enumerate() {
            let count = pattern.capture_count();
            if count != 1 {
                return Err(CatalogError::CaptureCount {
                    target: name,
                    variant,
                    count,
                });
            }
        }

        Ok(Self { name, variants })
    }

    /// Compile the pattern texts and create a target from them.
    pub fn compile<I, S>(name: impl Into<String>, variants: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let mut patterns = Vec::<Box<dyn ExpressionPattern>>::new();
        for (variant, source) in variants.into_iter().enumerate() {
            let pattern = compiler::compile_pattern(source.as_ref()).map_err(|error| {
                CatalogError::MalformedVariant {
                    target: name.clone(),
                    variant,
                    error,
                }
            })?;

            patterns.push(Box::new(pattern));
        }

        Self::new(name, patterns)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> impl Iterator<Item = &dyn ExpressionPattern> {
        self.variants.iter().map(|variant| variant.as_ref())
    }

    fn match_variants<'a>(&'a self, corpus: &'a str) -> impl Iterator<Item = CatalogMatch<'a>> {
        self.variants
            .iter()
            .enumerate()
            .filter_map(move |(variant, pattern)| {
                let pattern = pattern.as_ref();
                let inner = find_first(pattern, corpus)?;
                Some(CatalogMatch {
                    target: self,
                    variant,
                    pattern,
                    inner,
                })
            })
    }

    /// Try every variant in order against the corpus and return the first match.
    pub fn resolve<'a>(&'a self, corpus: &'a str) -> Option<CatalogMatch<'a>> {
        self.match_variants(corpus).next()
    }

    /// Try every variant in order and return the first match whose capture is an address.
    ///
    /// A variant capturing something else counts as not applying and the next variant is tried.
    /// The first rejected capture is only reported if no later variant yields an address.
    pub fn resolve_address<'a>(
        &'a self,
        corpus: &'a str,
        radix: AddressRadix,
    ) -> AddressResolution<'a> {
        let mut rejected = None;
        for matched in self.match_variants(corpus) {
            match matched.address(radix) {
                Ok(address) => return AddressResolution::Resolved { matched, address },
                Err(error) => {
                    if rejected.is_none() {
                        rejected = Some((matched, error));
                    }
                }
            }
        }

        match rejected {
            Some((matched, error)) => AddressResolution::InvalidCapture { matched, error },
            None => AddressResolution::Unresolved,
        }
    }
}

/// Address of a single target within a corpus.
#[derive(Debug, Clone)]
pub enum AddressResolution<'a> {
    /// A variant matched and captured an address.
    Resolved {
        matched: CatalogMatch<'a>,
        address: u64,
    },

    /// Variants matched but none of them captured an address.
    /// Contains the first of those matches.
    InvalidCapture {
        matched: CatalogMatch<'a>,
        error: AddressError,
    },

    /// No variant matched.
    Unresolved,
}

/// The first matching pattern variant of a target.
#[derive(Debug, Clone)]
pub struct CatalogMatch<'a> {
    target: &'a TargetDescriptor,
    variant: usize,
    pattern: &'a dyn ExpressionPattern,
    inner: Match<'a>,
}

impl<'a> CatalogMatch<'a> {
    pub fn target(&self) -> &'a TargetDescriptor {
        self.target
    }

    /// Index of the matching variant within the target.
    pub fn variant(&self) -> usize {
        self.variant
    }

    pub fn pattern(&self) -> &'a dyn ExpressionPattern {
        self.pattern
    }

    pub fn region(&self) -> &Range<usize> {
        self.inner.region()
    }

    pub fn capture(&self) -> &'a str {
        self.inner.capture()
    }

    /// Convert the capture into an address.
    ///
    /// A capture is any run of word characters and therefore this may fail
    /// even though the pattern itself did match.
    pub fn address(&self, radix: AddressRadix) -> Result<u64, AddressError> {
        parse_address(self.inner.capture(), radix)
    }
}

/// Resolution outcome of a single target.
#[derive(Debug, Clone)]
pub struct TargetResolution<'a> {
    target: &'a TargetDescriptor,
    result: Option<CatalogMatch<'a>>,
}

impl<'a> TargetResolution<'a> {
    pub fn target(&self) -> &'a TargetDescriptor {
        self.target
    }

    pub fn result(&self) -> Option<&CatalogMatch<'a>> {
        self.result.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.result.is_some()
    }
}

/// An immutable, ordered collection of [TargetDescriptor]s.
#[derive(Debug, Default)]
pub struct SignatureCatalog {
    targets: Vec<TargetDescriptor>,
}

impl SignatureCatalog {
    pub fn new(targets: Vec<TargetDescriptor>) -> Result<Self, CatalogError> {
        for (index, target) in targets.iter().enumerate() {
            if targets[..index]
                .iter()
                .any(|other| other.name == target.name)
            {
                return Err(CatalogError::DuplicateTarget {
                    target: target.name.clone(),
                });
            }
        }

        Ok(Self { targets })
    }

    pub fn targets(&self) -> &[TargetDescriptor] {
        &self.targets
    }

    pub fn target(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|target| target.name == name)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Resolve every target against the corpus.
    ///
    /// Targets are resolved independently of each other and reported in catalog order.
    pub fn resolve<'a>(&'a self, corpus: &'a str) -> Vec<TargetResolution<'a>> {
        self.targets
            .iter()
            .map(|target| TargetResolution {
                target,
                result: target.resolve(corpus),
            })
            .collect()
    }
}
