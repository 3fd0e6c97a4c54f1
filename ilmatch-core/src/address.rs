use alloc::string::String;
use core::{
    fmt::{
        self,
        Display,
    },
    num::ParseIntError,
};

/// The numeric base the analysis engine uses when rendering pointer constants.
///
/// Scalars of this crate render as decimal digits, so [AddressRadix::Decimal] is the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AddressRadix {
    #[default]
    Decimal,

    /// Hexadecimal digits with an optional `0x` prefix.
    Hexadecimal,
}

impl AddressRadix {
    fn base(self) -> u32 {
        match self {
            Self::Decimal => 10,
            Self::Hexadecimal => 16,
        }
    }
}

impl Display for AddressRadix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => write!(f, "decimal"),
            Self::Hexadecimal => write!(f, "hexadecimal"),
        }
    }
}

/// The captured text could not be converted into an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressError {
    capture: String,
    radix: AddressRadix,
    inner: ParseIntError,
}

impl AddressError {
    pub fn capture(&self) -> &str {
        &self.capture
    }

    pub fn radix(&self) -> AddressRadix {
        self.radix
    }

    pub fn inner(&self) -> &ParseIntError {
        &self.inner
    }
}

impl Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "capture {:?} is not a {} address: {}",
            self.capture, self.radix, self.inner
        )
    }
}

/// Parse a captured text into an address.
pub fn parse_address(capture: &str, radix: AddressRadix) -> Result<u64, AddressError> {
    let digits = match radix {
        AddressRadix::Decimal => capture,
        AddressRadix::Hexadecimal => capture
            .strip_prefix("0x")
            .or_else(|| capture.strip_prefix("0X"))
            .unwrap_or(capture),
    };

    u64::from_str_radix(digits, radix.base()).map_err(|inner| AddressError {
        capture: capture.into(),
        radix,
        inner,
    })
}
