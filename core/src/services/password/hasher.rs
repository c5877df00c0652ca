//! Password hashing

use std::sync::Arc;

use crate::errors::DomainError;

/// Work factor used in production
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// One-way salted password hashing.
///
/// Both operations are CPU-bound. Services call them through
/// [`hash_password`] and [`verify_password`], which run them on the blocking
/// pool instead of a request worker.
pub trait PasswordHasher: Send + Sync + 'static {
    /// Hash with a fresh random salt embedded in the output
    fn hash(&self, plaintext: &str) -> Result<String, DomainError>;

    /// Constant-time check. Malformed stored hashes yield `false`.
    fn verify(&self, plaintext: &str, hashed: &str) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Out-of-range costs are clamped to bcrypt's 4..=31
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(4, 31),
        }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        bcrypt::hash(plaintext, self.cost)
            .map_err(|e| DomainError::internal(format!("password hashing failed: {}", e)))
    }

    fn verify(&self, plaintext: &str, hashed: &str) -> bool {
        bcrypt::verify(plaintext, hashed).unwrap_or(false)
    }
}

/// Hash on the blocking pool
pub async fn hash_password<H: PasswordHasher>(
    hasher: &Arc<H>,
    plaintext: &str,
) -> Result<String, DomainError> {
    let hasher = Arc::clone(hasher);
    let plaintext = plaintext.to_owned();
    tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| DomainError::internal(format!("password hashing task failed: {}", e)))?
}

/// Verify on the blocking pool
pub async fn verify_password<H: PasswordHasher>(
    hasher: &Arc<H>,
    plaintext: &str,
    hashed: &str,
) -> Result<bool, DomainError> {
    let hasher = Arc::clone(hasher);
    let plaintext = plaintext.to_owned();
    let hashed = hashed.to_owned();
    tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hashed))
        .await
        .map_err(|e| DomainError::internal(format!("password verification task failed: {}", e)))
}
