//! Error types.

use core::fmt;

/// Error type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// Modulus has no words at all.
    ZeroLimbs,

    /// Modulus has more words than [`MAX_LIMBS`][`crate::MAX_LIMBS`].
    TooManyLimbs,

    /// Most significant word of the modulus is zero.
    HighWordZero,

    /// Modulus is even, so it has no inverse modulo `2^64`.
    EvenModulus,

    /// Modulus is smaller than 3.
    ModulusTooSmall,

    /// Encoding buffer has the wrong length.
    Length,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroLimbs => write!(f, "modulus must have at least one word"),
            Error::TooManyLimbs => write!(
                f,
                "modulus exceeds the supported maximum of {} words",
                crate::MAX_LIMBS
            ),
            Error::HighWordZero => write!(f, "most significant word of modulus is zero"),
            Error::EvenModulus => write!(f, "modulus must be odd"),
            Error::ModulusTooSmall => write!(f, "modulus must be at least 3"),
            Error::Length => write!(f, "invalid encoding length"),
        }
    }
}

impl core::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
