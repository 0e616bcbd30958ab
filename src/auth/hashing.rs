//! Account password hashing (Argon2id, PHC strings)

use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, ParamsBuilder, PasswordHash, PasswordHasher, PasswordVerifier, Version,
};
use rand::Rng;

use crate::config::Config;
use crate::error::{PassgenError, Result};

const SALT_BYTES: usize = 16;

/// Build an Argon2id hasher with the configured costs
pub fn hasher(config: &Config) -> Result<Argon2<'static>> {
    let params = ParamsBuilder::new()
        .m_cost(config.hash_memory_kib)
        .t_cost(config.hash_iterations)
        .p_cost(config.hash_parallelism)
        .build()
        .map_err(|e| PassgenError::HashError(format!("Invalid Argon2 parameters: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password with a fresh random salt
pub fn hash_password(argon2: &Argon2<'_>, password: &str) -> Result<String> {
    let salt_bytes: [u8; SALT_BYTES] = rand::rng().random();
    let salt = SaltString::encode_b64(&salt_bytes)?;
    let hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a password against a PHC string
pub fn verify_password(argon2: &Argon2<'_>, password: &str, hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash)?;
    Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2<'static> {
        hasher(&Config {
            hash_memory_kib: 256,
            hash_iterations: 1,
            ..Config::default()
        })
        .unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let argon2 = cheap();
        let hash = hash_password(&argon2, "correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&argon2, "correct horse", &hash).unwrap());
        assert!(!verify_password(&argon2, "wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let argon2 = cheap();
        let a = hash_password(&argon2, "same").unwrap();
        let b = hash_password(&argon2, "same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash() {
        let result = verify_password(&cheap(), "pw", "not-a-phc-string");
        assert!(matches!(result, Err(PassgenError::HashError(_))));
    }

    #[test]
    fn test_invalid_params() {
        let result = hasher(&Config {
            hash_parallelism: 0,
            ..Config::default()
        });
        assert!(matches!(result, Err(PassgenError::HashError(_))));
    }
}
