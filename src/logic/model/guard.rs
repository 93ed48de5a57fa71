//! Model Guard - artifact integrity
//!
//! SHA-256 over the raw artifact bytes, compared against the expected digest
//! the operator configured.

use sha2::{Digest, Sha256};

use super::classifier::ModelError;

/// Hex-encoded SHA-256 of the artifact
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Verify the artifact against an expected digest (case-insensitive hex).
/// Returns the actual digest on success.
pub fn verify_checksum(bytes: &[u8], expected: Option<&str>) -> Result<String, ModelError> {
    let actual = sha256_hex(bytes);

    if let Some(expected) = expected {
        let expected = expected.trim().to_lowercase();
        if expected != actual {
            log::warn!("Model checksum mismatch (expected {}, got {})", expected, actual);
            return Err(ModelError::ChecksumMismatch { expected, actual });
        }
        log::info!("Model checksum verified");
    }

    Ok(actual)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_verify_checksum() {
        let digest = sha256_hex(b"model");
        assert_eq!(verify_checksum(b"model", None).unwrap(), digest);
        assert_eq!(verify_checksum(b"model", Some(&digest.to_uppercase())).unwrap(), digest);

        let err = verify_checksum(b"tampered", Some(&digest)).unwrap_err();
        assert!(matches!(err, ModelError::ChecksumMismatch { .. }));
    }
}
