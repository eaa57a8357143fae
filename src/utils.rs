use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::FeatureVector;

/// Danceability above which a track is labelled `1`.
pub const DANCEABILITY_THRESHOLD: f64 = 0.5;

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generates a PKCE code verifier.
///
/// The verifier is 128 random alphanumeric characters, the maximum length
/// RFC 7636 allows. It is kept server-side and only sent to the token endpoint
/// when the authorization code is exchanged.
///
/// # Returns
///
/// A fresh verifier on every call.
///
/// # Example
///
/// ```
/// let verifier = generate_code_verifier();
/// let challenge = generate_code_challenge(&verifier);
/// ```
pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

/// Derives the `S256` code challenge for a verifier.
///
/// # Arguments
///
/// * `verifier` - Code verifier from [`generate_code_verifier`]
///
/// # Returns
///
/// The base64url encoding (no padding) of the verifier's SHA-256 digest, as sent
/// in the `code_challenge` parameter of the consent URL.
pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value round-tripped through the consent screen to pair a callback
/// with its code verifier.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

/// First `n` terms of the Fibonacci sequence starting `0, 1`.
///
/// `n = 0` yields an empty sequence and `n = 1` yields `[0]`. Callers are
/// expected to keep `n` at or below 94; larger counts saturate at `u64::MAX`.
pub fn fibonacci_sequence(n: usize) -> Vec<u64> {
    let mut sequence: Vec<u64> = vec![0, 1];
    for i in 2..n {
        sequence.push(sequence[i - 1].saturating_add(sequence[i - 2]));
    }
    sequence.truncate(n);
    sequence
}

/// Cap on the number of tracks sampled from a playlist.
///
/// # Arguments
///
/// * `n` - Number of Fibonacci terms to generate
///
/// # Returns
///
/// The final term of the `n`-term sequence, or `None` when `n < 2` and the
/// sequence does not define a length.
///
/// # Example
///
/// ```
/// assert_eq!(playlist_length(10), Some(34));
/// assert_eq!(playlist_length(1), None);
/// ```
pub fn playlist_length(n: usize) -> Option<u64> {
    if n < 2 {
        return None;
    }
    fibonacci_sequence(n).last().copied()
}

/// Binary target for the classifier: `1` when danceability exceeds
/// [`DANCEABILITY_THRESHOLD`], otherwise `0`.
pub fn danceability_label(features: &FeatureVector) -> u8 {
    if features[0] > DANCEABILITY_THRESHOLD { 1 } else { 0 }
}
