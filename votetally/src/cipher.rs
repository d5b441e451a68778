//! Autokey running-key cipher used as the admission check for encrypted ballots.
//!
//! Only ASCII letters carry meaning: every other character is dropped from both the
//! ciphertext and the key before decryption, and letters are compared case-insensitively.
//! The keystream starts as the key and is extended with each recovered plaintext letter,
//! so position `i` always depends on the plaintext at `i - key.len()`.

const ALPHABET_LEN: u8 = 26;

fn letters(input: &str) -> Vec<u8> {
    input
        .bytes()
        .filter(u8::is_ascii_alphabetic)
        .map(|b| b.to_ascii_lowercase() - b'a')
        .collect()
}

fn to_char(index: u8) -> char {
    (b'a' + index % ALPHABET_LEN) as char
}

/// Decrypt `ciphertext` under `key`.
///
/// Returns an empty string when either input has no letters, which callers treat as invalid.
pub fn decrypt(ciphertext: &str, key: &str) -> String {
    let cipher = letters(ciphertext);
    let mut keystream = letters(key);
    if cipher.is_empty() || keystream.is_empty() {
        return String::new();
    }

    let mut plaintext = String::with_capacity(cipher.len());
    for (i, c) in cipher.iter().enumerate() {
        let p = (c + ALPHABET_LEN - keystream[i]) % ALPHABET_LEN;
        plaintext.push(to_char(p));
        keystream.push(p);
    }
    plaintext
}

/// Encrypt `plaintext` under `key`. Inverse of [`decrypt`].
pub fn encrypt(plaintext: &str, key: &str) -> String {
    let plain = letters(plaintext);
    let mut keystream = letters(key);
    if plain.is_empty() || keystream.is_empty() {
        return String::new();
    }
    keystream.extend_from_slice(&plain);

    plain
        .iter()
        .zip(keystream.iter())
        .map(|(p, k)| to_char((p + k) % ALPHABET_LEN))
        .collect()
}

/// True iff `s` is non-empty and made only of ASCII letters.
pub fn is_well_formed(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_alphabetic())
}
