//! Account identity type with `pdl_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Pedal account identity, always prefixed with `pdl_`.
///
/// Accounts are supplied by the external wallet/identity provider; the core
/// treats them as opaque, already-authenticated identifiers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// The standard prefix for all Pedal account identities.
    pub const PREFIX: &'static str = "pdl_";

    /// The reserved void identity used as the counterparty of token
    /// mints and burns in transfer events.
    pub const VOID: &'static str = "pdl_void";

    /// Create a new account id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `pdl_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "account must start with pdl_");
        Self(s)
    }

    /// The void sentinel identity.
    pub fn void() -> Self {
        Self(Self::VOID.to_string())
    }

    /// Whether this is the void sentinel.
    pub fn is_void(&self) -> bool {
        self.0 == Self::VOID
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that this identity is well-formed.
    pub fn is_valid(&self) -> bool {
        self.0.starts_with(Self::PREFIX) && self.0.len() > Self::PREFIX.len()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
