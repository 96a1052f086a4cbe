//! Error types for the Vesta core crate.

use std::fmt;

/// Top-level error type for vesta-core operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Decimal construction or parsing failed.
    Dec(DecError),
    /// Serialization or deserialization failed.
    Serialization(SerializationError),
    /// Invalid denomination string.
    Denomination(DenominationError),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Dec(e) => write!(f, "decimal error: {}", e),
            CoreError::Serialization(e) => write!(f, "serialization error: {}", e),
            CoreError::Denomination(e) => write!(f, "denomination error: {}", e),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DecError> for CoreError {
    fn from(e: DecError) -> Self {
        CoreError::Dec(e)
    }
}

impl From<SerializationError> for CoreError {
    fn from(e: SerializationError) -> Self {
        CoreError::Serialization(e)
    }
}

impl From<DenominationError> for CoreError {
    fn from(e: DenominationError) -> Self {
        CoreError::Denomination(e)
    }
}

/// Errors related to decimal parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecError {
    /// The input is not a valid non-negative decimal literal.
    Malformed {
        /// The offending input.
        input: String,
    },
    /// More fractional digits than the 18 supported places.
    TooManyFractionalDigits {
        /// Number of fractional digits supplied.
        digits: usize,
    },
}

impl fmt::Display for DecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecError::Malformed { input } => write!(f, "malformed decimal: {:?}", input),
            DecError::TooManyFractionalDigits { digits } => {
                write!(f, "{} fractional digits exceed the 18 supported places", digits)
            }
        }
    }
}

impl std::error::Error for DecError {}

/// Errors related to serialization and deserialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to encode data to bytes.
    EncodeFailed(String),
    /// Failed to decode data from bytes.
    DecodeFailed(String),
}

impl fmt::Display for SerializationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationError::EncodeFailed(msg) => write!(f, "encode failed: {}", msg),
            SerializationError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
        }
    }
}

impl std::error::Error for SerializationError {}

/// Errors related to denomination string parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DenominationError {
    /// Denomination string exceeds 8 bytes.
    TooLong,
    /// Denomination string is empty.
    Empty,
}

impl fmt::Display for DenominationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenominationError::TooLong => write!(f, "denomination exceeds 8 bytes"),
            DenominationError::Empty => write!(f, "denomination is empty"),
        }
    }
}

impl std::error::Error for DenominationError {}
