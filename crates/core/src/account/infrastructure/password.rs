use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Fresh random salt for a new account.
pub fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Salted SHA-256 digest, hex-encoded.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Constant-shape comparison of a candidate password against a stored hash.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    hash_password(password, salt) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        assert_eq!(hash_password("secret", "s1"), hash_password("secret", "s1"));
    }

    #[test]
    fn test_salt_changes_the_hash() {
        assert_ne!(hash_password("secret", "s1"), hash_password("secret", "s2"));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let hash = hash_password("secret", "s1");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_verify_accepts_correct_password() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);
        assert!(verify_password("hunter2", &salt, &hash));
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let salt = generate_salt();
        let hash = hash_password("hunter2", &salt);
        assert!(!verify_password("hunter3", &salt, &hash));
    }

    #[test]
    fn test_salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
    }
}
