//! Password check for builds without Argon2.

use folio_core::ports::{AuthError, PasswordService};

/// Keeps the secret as-is and compares without short-circuiting.
pub struct PlainPasswordService;

impl PasswordService for PlainPasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(password.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let (a, b) = (password.as_bytes(), hash.as_bytes());
        if a.len() != b.len() {
            return Ok(false);
        }
        Ok(a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0)
    }
}
