//! Denomination type for reward tracking.
//!
//! A denomination is an 8-byte string tag identifying the token a
//! reward amount is accounted in (e.g. "stake", "photon").

use crate::error::DenominationError;

/// 8-byte denomination tag.
///
/// Reward ratios, pool balances, and payouts are all tracked per
/// denomination. Shorter names are padded with null bytes.
pub type Denomination = [u8; 8];

/// Create a denomination from a string.
///
/// The string must be 1 to 8 bytes. Shorter strings are padded with
/// null bytes.
pub fn denomination_from_str(s: &str) -> Result<Denomination, DenominationError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(DenominationError::Empty);
    }
    if bytes.len() > 8 {
        return Err(DenominationError::TooLong);
    }

    let mut denom = [0u8; 8];
    denom[..bytes.len()].copy_from_slice(bytes);
    Ok(denom)
}

/// Convert a denomination to a string.
///
/// Trailing null bytes are stripped.
pub fn denomination_to_string(denom: &Denomination) -> String {
    let end = denom.iter().position(|&b| b == 0).unwrap_or(8);
    String::from_utf8_lossy(&denom[..end]).into_owned()
}

/// Common denominations for convenience.
pub mod common {
    use super::Denomination;

    /// The chain's base bond denomination. Settlement notifications use
    /// a zero coin of this denomination when the paid amount is zero.
    pub const STAKE: Denomination = [b's', b't', b'a', b'k', b'e', 0, 0, 0];

    /// Secondary fee token, used in multi-denomination tests.
    pub const PHOTON: Denomination = [b'p', b'h', b'o', b't', b'o', b'n', 0, 0];
}
