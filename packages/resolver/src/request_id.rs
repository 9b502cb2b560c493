//! Random per-request token.
//!
//! The search endpoint rejects requests whose `X-Requested-By` header is
//! missing or reused, so every call gets a fresh lowercase alphanumeric
//! token.

use rand::Rng as _;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generates a random token of `len` characters drawn from `[a-z0-9]`.
#[must_use]
pub fn random_request_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(CHARSET[rng.gen_range(0..CHARSET.len())]))
        .collect()
}
