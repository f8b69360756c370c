//! Opaque token generation
//!
//! Provides AES-256-CBC encryption for claim tokens. Tokens are opaque
//! handles: the payload mixes the user id with a fresh UUID and a
//! timestamp, so the same user never receives the same token twice, and
//! nothing needs to decrypt them. Verification is by store lookup.

use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;
use warden_core::{AclError, AclResult};

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Key length for AES-256, in bytes.
const KEY_LEN: usize = 32;

/// AES block and IV length, in bytes.
const IV_LEN: usize = 16;

/// Generate an opaque token for a user.
///
/// # Arguments
/// * `user_id` - Internal id of the user the token belongs to
/// * `secret` - 32-byte encryption key
///
/// # Returns
/// Base64-encoded string containing: iv(16 bytes) || ciphertext
///
/// # Errors
/// `InvalidArgument` when the key is not exactly 32 bytes.
pub fn generate_token(user_id: Uuid, secret: &[u8]) -> AclResult<String> {
    if secret.len() != KEY_LEN {
        return Err(AclError::InvalidArgument(format!(
            "Encryption key must be exactly {} bytes (256 bits) for AES-256, got {}",
            KEY_LEN,
            secret.len()
        )));
    }

    // Unique payload per call, so issuing twice never collides
    let payload = format!(
        "{}:{}:{}",
        user_id,
        Uuid::now_v7(),
        Utc::now().timestamp_micros()
    );

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let cipher = Aes256CbcEnc::new_from_slices(secret, &iv)
        .map_err(|e| AclError::InvalidArgument(format!("Invalid cipher parameters: {e}")))?;
    let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(payload.as_bytes());

    // Combine: iv || ciphertext
    let mut combined = iv.to_vec();
    combined.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(combined))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: [u8; 32] = [7u8; 32];

    #[test]
    fn test_same_user_gets_different_tokens() {
        let user_id = Uuid::now_v7();

        let first = generate_token(user_id, &KEY).unwrap();
        let second = generate_token(user_id, &KEY).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_different_users_get_different_tokens() {
        let first = generate_token(Uuid::now_v7(), &KEY).unwrap();
        let second = generate_token(Uuid::now_v7(), &KEY).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_invalid_key_length() {
        let short_key = [0u8; 16];

        let result = generate_token(Uuid::now_v7(), &short_key);
        assert!(matches!(result, Err(AclError::InvalidArgument(_))));
    }

    #[test]
    fn test_token_decodes_to_whole_blocks() {
        let token = generate_token(Uuid::now_v7(), &KEY).unwrap();

        let raw = STANDARD.decode(token).unwrap();
        // IV plus at least one padded ciphertext block
        assert!(raw.len() >= 32);
        assert_eq!(raw.len() % 16, 0);
    }
}
