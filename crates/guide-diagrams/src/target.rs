//! Per-render target identifiers.

use std::fmt;

use rand::RngExt;

use crate::consts::TARGET_PREFIX;

/// Number of base-36 characters in the random part of a target id.
const TOKEN_LEN: usize = 8;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Unique id scoping the output of one render pass.
///
/// Collisions are improbable, not impossible: ids are random, not counted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderTarget(String);

impl RenderTarget {
    /// Generate a fresh id such as `chart-k3x9q0ab`.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn generate() -> Self {
        let mut value: u64 = rand::rng().random();
        let mut token = String::with_capacity(TARGET_PREFIX.len() + TOKEN_LEN);
        token.push_str(TARGET_PREFIX);
        for _ in 0..TOKEN_LEN {
            token.push(char::from(ALPHABET[(value % 36) as usize]));
            value /= 36;
        }
        Self(token)
    }

    #[cfg(test)]
    pub(crate) fn from_test(id: &str) -> Self {
        Self(id.to_owned())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
