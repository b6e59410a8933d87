//! Session tokens and passwords with redacted Debug/Display output.

use crate::{ErrorLocation, RedactError};

use std::fmt;

use serde::ser::Error;
use zeroize::Zeroize;

/// A secret string (session token, password) that never shows up in logs.
///
/// The value is zeroized when dropped and refuses to be serialized; call
/// [`RedactedToken::as_str`] at the single point where it goes on the wire.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedToken {
    inner: String,
}

impl RedactedToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// The raw secret, for placing into a request header or body.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Length in bytes (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl From<String> for RedactedToken {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RedactedToken {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedToken([REDACTED])")
    }
}

impl fmt::Display for RedactedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED TOKEN]")
    }
}

impl Drop for RedactedToken {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

impl serde::Serialize for RedactedToken {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from("RedactedToken cannot be serialized - use as_str() explicitly"),
            location: ErrorLocation::caller(),
        }))
    }
}
