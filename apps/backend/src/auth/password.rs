//! Password hashing for email/password accounts.

use crate::AppError;

/// Bcrypt work factor. 10 rounds is the conventional balance between
/// login latency and brute-force cost.
const BCRYPT_COST: u32 = 10;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    bcrypt::hash(plain, BCRYPT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

pub fn verify_password(plain: &str, hash: &str) -> Result<bool, AppError> {
    bcrypt::verify(plain, hash)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password};

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same input").unwrap();
        let b = hash_password("same input").unwrap();
        assert_ne!(a, b);
    }
}
