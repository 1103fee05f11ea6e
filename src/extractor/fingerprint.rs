use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of an artifact's bytes.
pub fn fingerprint(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_is_stable_and_content_sensitive() {
        let a = fingerprint(b"class A(Component): pass");
        assert_eq!(a, fingerprint(b"class A(Component): pass"));
        assert_ne!(a, fingerprint(b"class B(Component): pass"));
        assert_eq!(a.len(), 64);
    }
}
