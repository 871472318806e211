//! Chain-agnostic account identity.

/// A generic, chain-agnostic identity for a fee recipient, fee-recipient
/// setter, or developer-reward account.
///
/// Wraps a fixed-size `[u8; 32]` byte array, mirroring [`TokenId`]. All
/// 32-byte sequences are valid, so construction is infallible.
///
/// [`TokenId`]: super::TokenId
///
/// # Examples
///
/// ```
/// use ember_curve::domain::AccountId;
///
/// let acct = AccountId::from_bytes([7u8; 32]);
/// assert_eq!(acct.as_bytes(), [7u8; 32]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// Creates an `AccountId` from raw bytes.
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
    #[must_use]
    pub const fn zero() -> Self {
        Self([0u8; 32])
    }
}
