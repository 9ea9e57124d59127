// src/mirror/fingerprint.rs
// =============================================================================
// A tiny content fingerprint for log output.
//
// It is the first 4 bytes of the MD5 digest, hex-encoded (8 characters).
// It plays no part in deduplication or in choosing where a file is stored.
// =============================================================================

use md5::{Digest, Md5};

// Number of digest bytes kept in the fingerprint
const FINGERPRINT_LEN: usize = 4;

/// Returns the 8-character hex fingerprint of `body`.
pub fn fingerprint(body: &[u8]) -> String {
    let digest = Md5::digest(body);
    hex::encode(&digest[..FINGERPRINT_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_empty_body() {
        // md5("") = d41d8cd98f00b204e9800998ecf8427e
        assert_eq!(fingerprint(b""), "d41d8cd9");
    }

    #[test]
    fn test_fingerprint_known_content() {
        // md5("hello") = 5d41402abc4b2a76b9719d911017c592
        assert_eq!(fingerprint(b"hello"), "5d41402a");
    }
}
