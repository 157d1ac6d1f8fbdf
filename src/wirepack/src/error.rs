//! Result and error for encoding and decoding.

use core::fmt::{self, Display};

/// A [`Result`][std::result::Result] produced by this
/// crate's operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error when a value cannot be encoded or decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A value does not fit the range its encoding supports.
    OutOfRange {
        /// The rejected value.
        value: u64,
        /// The largest value the encoding supports.
        max: u64,
    },

    /// A read needed more bytes than the source had left.
    Underflow {
        /// Bytes the read would have consumed.
        needed: usize,
        /// Bytes that were still unread.
        remaining: usize,
    },

    /// A string payload was not valid UTF-8.
    InvalidUtf8 {
        /// Offset of the first invalid byte into the payload.
        offset: usize,
    },
}

impl Error {
    /// Whether this error was caused by running out of input.
    pub fn is_underflow(&self) -> bool {
        matches!(self, Self::Underflow { .. })
    }

    /// Whether this error was caused by a value out of range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { value, max } => {
                write!(f, "value {value} out of range (maximum is {max})")
            }
            Self::Underflow { needed, remaining } => write!(
                f,
                "buffer underflow: needed {needed} bytes but only {remaining} remain"
            ),
            Self::InvalidUtf8 { offset } => {
                write!(f, "invalid UTF-8 in string payload at offset {offset}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cold]
#[inline(never)]
pub(crate) fn underflow(needed: usize, remaining: usize) -> Error {
    wirepack_utils::tracing::debug!(needed, remaining, "read past end of buffer");
    Error::Underflow { needed, remaining }
}
