//! Sealing for the credential file.
//!
//! Contents are encrypted with ChaCha20-Poly1305 under a key derived from a
//! fixed application seed. Each write draws a fresh 12-byte nonce, which is
//! stored in front of the ciphertext; the whole blob is hex-encoded behind a
//! version prefix.
//!
//! The key ships with the binary, so this keeps tokens out of casual reads
//! of the config directory and detects tampering. It does not protect
//! against an attacker who can run code as the user.

use chacha20poly1305::aead::{Aead, KeyInit, OsRng};
use chacha20poly1305::{AeadCore, ChaCha20Poly1305, Key, Nonce};
use sha2::{Digest, Sha256};

const APPLICATION_KEY_SEED: &[u8] = b"shopctl/lockbox/credentials/v1";
const FORMAT_PREFIX: &str = "lockbox1:";
const NONCE_LEN: usize = 12;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum OpenError {
    UnknownFormat,
    Corrupt,
}

fn cipher() -> ChaCha20Poly1305 {
    let key = Sha256::digest(APPLICATION_KEY_SEED);
    ChaCha20Poly1305::new(Key::from_slice(key.as_slice()))
}

pub(crate) fn seal(plaintext: &[u8]) -> Result<String, chacha20poly1305::Error> {
    let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
    let ciphertext = cipher().encrypt(&nonce, plaintext)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce);
    blob.extend_from_slice(&ciphertext);
    Ok(format!("{FORMAT_PREFIX}{}", hex::encode(blob)))
}

pub(crate) fn open(sealed: &str) -> Result<Vec<u8>, OpenError> {
    let encoded = sealed
        .trim()
        .strip_prefix(FORMAT_PREFIX)
        .ok_or(OpenError::UnknownFormat)?;
    let blob = hex::decode(encoded).map_err(|_| OpenError::Corrupt)?;
    if blob.len() <= NONCE_LEN {
        return Err(OpenError::Corrupt);
    }
    let (nonce, ciphertext) = blob.split_at(NONCE_LEN);
    cipher()
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| OpenError::Corrupt)
}
