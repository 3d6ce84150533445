use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a secret with Argon2id. The per-hash salt is generated here and
/// carried inside the encoded hash string.
pub fn hash_password(secret: &str) -> Result<String, anyhow::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("failed to hash secret: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a secret against a stored hash. Any failure (malformed hash
/// included) is reported as a plain mismatch so callers stay uniform.
pub fn verify_password(secret: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
