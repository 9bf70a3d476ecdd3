//! Sealing of sensitive settings
//!
//! AES-256-GCM with a PBKDF2-derived key. Persistent adapters use it to keep
//! `client_secret` and `sync_secret` out of the database in clear text.

mod versions;

pub use versions::{pbkdf2_iterations, CURRENT_SEAL_VERSION};

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use pbkdf2::pbkdf2_hmac_array;
use rand::RngCore;
use sha2::Sha256;

use crate::error::{CoreError, CoreResult};

const SALT_LENGTH: usize = 16;
const NONCE_LENGTH: usize = 12;
const KEY_LENGTH: usize = 32; // AES-256

/// A sealed value, every part Base64 encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedValue {
    pub salt: String,
    pub nonce: String,
    pub ciphertext: String,
    pub version: i32,
}

fn derive_key(password: &str, salt: &[u8], iterations: u32) -> [u8; KEY_LENGTH] {
    pbkdf2_hmac_array::<Sha256, KEY_LENGTH>(password.as_bytes(), salt, iterations)
}

fn iterations_for(version: i32) -> CoreResult<u32> {
    pbkdf2_iterations(version)
        .ok_or_else(|| CoreError::SecretError(format!("Unsupported seal version: {version}")))
}

fn decode(field: &str, value: &str) -> CoreResult<Vec<u8>> {
    BASE64
        .decode(value)
        .map_err(|e| CoreError::SecretError(format!("Invalid {field}: {e}")))
}

/// Seal `plaintext` with the current format version
pub fn seal(plaintext: &[u8], password: &str) -> CoreResult<SealedValue> {
    let mut salt = [0u8; SALT_LENGTH];
    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    rand::rng().fill_bytes(&mut salt);
    rand::rng().fill_bytes(&mut nonce_bytes);

    let key = derive_key(password, &salt, iterations_for(CURRENT_SEAL_VERSION)?);
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::SecretError(format!("Failed to create cipher: {e}")))?;

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| CoreError::SecretError(format!("Encryption failed: {e}")))?;

    Ok(SealedValue {
        salt: BASE64.encode(salt),
        nonce: BASE64.encode(nonce_bytes),
        ciphertext: BASE64.encode(ciphertext),
        version: CURRENT_SEAL_VERSION,
    })
}

/// Open a value sealed with any supported format version
pub fn open(sealed: &SealedValue, password: &str) -> CoreResult<Vec<u8>> {
    let salt = decode("salt", &sealed.salt)?;
    let nonce_bytes = decode("nonce", &sealed.nonce)?;
    let ciphertext = decode("ciphertext", &sealed.ciphertext)?;

    if nonce_bytes.len() != NONCE_LENGTH {
        return Err(CoreError::SecretError(format!(
            "Invalid nonce length: {}",
            nonce_bytes.len()
        )));
    }

    let key = derive_key(password, &salt, iterations_for(sealed.version)?);
    let cipher = Aes256Gcm::new_from_slice(&key)
        .map_err(|e| CoreError::SecretError(format!("Failed to create cipher: {e}")))?;

    cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_ref())
        .map_err(|_| {
            CoreError::SecretError("Decryption failed: invalid password or corrupted data".into())
        })
}

/// Open a sealed value and read it as UTF-8 text
pub fn open_string(sealed: &SealedValue, password: &str) -> CoreResult<String> {
    let bytes = open(sealed, password)?;
    String::from_utf8(bytes).map_err(|e| CoreError::SecretError(format!("Invalid UTF-8: {e}")))
}
