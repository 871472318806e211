//! Chain-agnostic token identity.

use core::fmt;

/// A generic, chain-agnostic identity for the token issued by a curve.
///
/// Wraps a fixed-size `[u8; 32]` byte array. All 32-byte sequences are
/// considered valid identities, so construction is infallible.
///
/// # Examples
///
/// ```
/// use ember_curve::domain::TokenId;
///
/// let id = TokenId::from_bytes([1u8; 32]);
/// assert_eq!(id.as_bytes(), [1u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId([u8; 32]);

impl TokenId {
    /// Creates a `TokenId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns the all-zero identity.
    ///
    /// Useful as a sentinel or placeholder value; use sparingly.
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}

impl fmt::Display for TokenId {
    /// Renders the first four bytes as hex, enough to tell curves apart in
    /// logs and error messages.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "token:{:02x}{:02x}{:02x}{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}
