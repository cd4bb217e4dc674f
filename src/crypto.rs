//! Response codec for the Hbooker API.
//!
//! Every response body is base64 text wrapping AES-256-CBC ciphertext of a
//! JSON document. The key is `SHA-256(secret)` where the secret is either the
//! platform-wide shared default or a per-chapter command string, and the IV is
//! sixteen zero bytes. Both the zero IV and the trailing-byte unpadding rule
//! are fixed by the server's encoding and must be reproduced exactly.

use aes::Aes256;
use base64::{Engine, engine::general_purpose::STANDARD as B64};
use cbc::cipher::{
    BlockDecryptMut, BlockEncryptMut, KeyIvInit,
    block_padding::{NoPadding, Pkcs7},
};
use rand::Rng;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{HbookerError, Result};

/// Platform-wide shared secret used for every response except chapter text.
pub const DEFAULT_KEY: &str = "zG2nSeEfSHfvTCHy5LCcqtBbQehKNLXn";

const IV: [u8; 16] = [0u8; 16];
const BLOCK: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Derive the AES-256 key for `secret`: `SHA-256(secret)`.
pub fn derive_key(secret: &str) -> [u8; 32] {
    Sha256::digest(secret.as_bytes()).into()
}

/// Decrypt a base64 AES-256-CBC response body to UTF-8 text.
///
/// The server pads with PKCS7 but the unpadding contract is the literal one:
/// read the last decrypted byte as the padding length N and strip the final
/// N bytes. N of 0, N beyond one block, or N beyond the plaintext length is
/// rejected as a desync.
pub fn decrypt(ciphertext_b64: &str, secret: &str) -> Result<String> {
    let mut buf = B64.decode(ciphertext_b64.trim())?;
    if buf.is_empty() || buf.len() % BLOCK != 0 {
        return Err(HbookerError::Decode(format!(
            "ciphertext length {} is not a positive multiple of the AES block size",
            buf.len()
        )));
    }

    let key = derive_key(secret);
    Aes256CbcDec::new(&key.into(), &IV.into())
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|e| HbookerError::Decode(format!("AES decrypt failed: {e}")))?;

    let pad = usize::from(buf[buf.len() - 1]);
    if pad == 0 || pad > BLOCK || pad > buf.len() {
        return Err(HbookerError::Decode(format!(
            "invalid PKCS7 padding length {pad}"
        )));
    }
    buf.truncate(buf.len() - pad);

    String::from_utf8(buf)
        .map_err(|e| HbookerError::Decode(format!("plaintext is not UTF-8: {e}")))
}

/// Encrypt `plaintext` with AES-256-CBC (zero IV, PKCS7) and base64-encode.
///
/// Inverse of [`decrypt`] for the same secret. Not used on the normal request
/// path (requests go out in the clear); kept for round-trip testing and for
/// callers that re-encode chapter text.
pub fn encrypt(plaintext: &[u8], secret: &str) -> String {
    let key = derive_key(secret);
    let pad_len = BLOCK - (plaintext.len() % BLOCK);
    let mut buf = vec![0u8; plaintext.len() + pad_len];
    buf[..plaintext.len()].copy_from_slice(plaintext);
    let ct = Aes256CbcEnc::new(&key.into(), &IV.into())
        .encrypt_padded_mut::<Pkcs7>(&mut buf, plaintext.len())
        .expect("buffer is correctly sized");
    B64.encode(ct)
}

/// Generate a pseudo-UUID device identifier.
///
/// SHA-1 of the current wall-clock time concatenated with 16 random bytes,
/// formatted as the canonical 8-4-4-4-12 grouping of the first 32 hex digits.
/// This seeds anonymous device registration; it is not a security token.
pub fn generate_uuid() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let mut entropy = [0u8; 16];
    rand::rng().fill(&mut entropy[..]);

    let mut hasher = Sha1::new();
    hasher.update(format!("{}.{:09}", now.as_secs(), now.subsec_nanos()));
    hasher.update(entropy);
    let digest = hasher.finalize();

    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    format!(
        "{}-{}-{}-{}-{}",
        &hex[..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic() {
        assert_eq!(derive_key("secret"), derive_key("secret"));
        assert_ne!(derive_key("secret"), derive_key("Secret"));
    }

    #[test]
    fn roundtrip_default_key() {
        let plain = r#"{"code":"100000","data":{"reader_info":{"account":"书客123"}}}"#;
        let ct = encrypt(plain.as_bytes(), DEFAULT_KEY);
        assert_eq!(decrypt(&ct, DEFAULT_KEY).unwrap(), plain);
    }

    #[test]
    fn roundtrip_dynamic_key() {
        let ct = encrypt(b"hello world", "K");
        assert_eq!(decrypt(&ct, "K").unwrap(), "hello world");
    }

    #[test]
    fn roundtrip_block_aligned_plaintext() {
        // Exactly one block of input forces a full block of padding
        let plain = "0123456789abcdef";
        let ct = encrypt(plain.as_bytes(), "k2");
        assert_eq!(decrypt(&ct, "k2").unwrap(), plain);
    }

    #[test]
    fn wrong_key_does_not_roundtrip() {
        let ct = encrypt(b"some chapter text", "right");
        // Usually fails outright on padding/UTF-8; if it decodes, it's garbage
        if let Ok(plain) = decrypt(&ct, "wrong") {
            assert_ne!(plain, "some chapter text");
        }
    }

    #[test]
    fn rejects_malformed_base64() {
        assert!(matches!(
            decrypt("not base64!!!", DEFAULT_KEY),
            Err(HbookerError::Base64(_))
        ));
    }

    #[test]
    fn rejects_non_block_multiple() {
        let ct = B64.encode(b"short");
        assert!(matches!(
            decrypt(&ct, DEFAULT_KEY),
            Err(HbookerError::Decode(_))
        ));
    }

    #[test]
    fn rejects_empty_ciphertext() {
        assert!(matches!(decrypt("", DEFAULT_KEY), Err(HbookerError::Decode(_))));
    }

    /// Encrypt one raw block without padding so the final decrypted byte is
    /// chosen exactly.
    fn forged_block(last_byte: u8, secret: &str) -> String {
        let mut block = [0x41u8; BLOCK];
        block[BLOCK - 1] = last_byte;
        let key = derive_key(secret);
        let mut buf = block.to_vec();
        let ct = Aes256CbcEnc::new(&key.into(), &IV.into())
            .encrypt_padded_mut::<NoPadding>(&mut buf, BLOCK)
            .expect("block-aligned input");
        B64.encode(ct)
    }

    #[test]
    fn rejects_zero_padding_length() {
        let ct = forged_block(0, "k");
        assert!(matches!(decrypt(&ct, "k"), Err(HbookerError::Decode(_))));
    }

    #[test]
    fn rejects_padding_beyond_block() {
        let ct = forged_block(17, "k");
        assert!(matches!(decrypt(&ct, "k"), Err(HbookerError::Decode(_))));
    }

    #[test]
    fn uuid_matches_canonical_grouping() {
        let uuid = generate_uuid();
        let groups: Vec<&str> = uuid.split('-').collect();
        let lens: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        assert_eq!(lens, [8, 4, 4, 4, 12]);
        assert!(
            groups
                .iter()
                .all(|g| g.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()))
        );
    }

    #[test]
    fn uuid_is_randomized() {
        assert_ne!(generate_uuid(), generate_uuid());
    }
}
