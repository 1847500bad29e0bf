//! Base-62 positional encoding for numeric link ids.

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes a non-negative integer as a base-62 string, most significant
/// digit first. `encode(0)` is `"0"`.
pub fn encode(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while n > 0 {
        digits.push(ALPHABET[(n % 62) as usize] as char);
        n /= 62;
    }
    digits.iter().rev().collect()
}

/// Arithmetic inverse of [`encode`].
///
/// Returns `None` for the empty string, characters outside the alphabet,
/// or values that overflow `u64`.
pub fn decode(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }

    let mut n: u64 = 0;
    for b in s.bytes() {
        let digit = ALPHABET.iter().position(|&c| c == b)? as u64;
        n = n.checked_mul(62)?.checked_add(digit)?;
    }
    Some(n)
}
