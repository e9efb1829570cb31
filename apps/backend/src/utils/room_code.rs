//! Room code generation.
//!
//! Room codes are 6-character strings drawn from an uppercase alphanumeric
//! alphabet without the easily confused `I`, `L`, `O` and `U`.

use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};

const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

pub const ROOM_CODE_LEN: usize = 6;

/// Generate a candidate room code using the OS's cryptographically secure RNG.
///
/// Uniqueness is the caller's concern; the room store rejects codes already in use.
///
/// # Example
/// ```
/// use cassino::utils::room_code::generate_room_code;
///
/// let code = generate_room_code();
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_room_code() -> String {
    let mut rng = OsRng.unwrap_err();
    (0..ROOM_CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Normalize a user-typed code: trimmed and uppercased.
pub fn normalize_room_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
