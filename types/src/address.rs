//! Account address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// An account identity on the host ledger, always prefixed with `0x`.
///
/// The core never derives addresses from keys; signing and key management
/// belong to the client library. Addresses are compared as opaque strings
/// after lower-casing.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// The standard prefix for all addresses.
    pub const PREFIX: &'static str = "0x";

    /// Maximum accepted length, prefix included.
    pub const MAX_LEN: usize = 66;

    /// Create a new address from a raw string.
    ///
    /// # Panics
    /// Panics if the string is not a well-formed address. Use [`Address::parse`]
    /// for untrusted input.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        match Self::parse(&s) {
            Ok(addr) => addr,
            Err(e) => panic!("{e}"),
        }
    }

    /// Parse and normalise an address from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let lower = raw.trim().to_ascii_lowercase();
        let body = lower
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| TypesError::InvalidAddress(raw.to_string()))?;
        if body.is_empty()
            || lower.len() > Self::MAX_LEN
            || !body.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(TypesError::InvalidAddress(raw.to_string()));
        }
        Ok(Self(lower))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}
