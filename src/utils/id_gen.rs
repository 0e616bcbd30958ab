//! ID and token generation utilities

use rand::Rng;

/// Characters used for history ID suffixes (base 36)
const ID_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Generate a random base-36 string ID of specified length
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ID_CHARS.len());
            ID_CHARS[idx] as char
        })
        .collect()
}

/// Generate a history entry ID: `<unix millis>-<9 base-36 chars>`
pub fn generate_history_id() -> String {
    format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        generate_id(crate::HISTORY_ID_SUFFIX_LENGTH)
    )
}

/// Generate a user ID (UUID v4)
pub fn generate_user_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Generate a database ID (32 characters, UUID-like)
pub fn generate_database_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Generate a password reset token (32 random bytes, hex encoded)
pub fn generate_reset_token() -> String {
    let bytes: [u8; crate::RESET_TOKEN_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_length() {
        assert_eq!(generate_id(9).len(), 9);
        assert_eq!(generate_id(0).len(), 0);
        assert!(generate_id(32).bytes().all(|b| ID_CHARS.contains(&b)));
    }

    #[test]
    fn test_generate_history_id() {
        let id = generate_history_id();
        let (millis, suffix) = id.split_once('-').unwrap();
        assert!(millis.parse::<i64>().unwrap() > 0);
        assert_eq!(suffix.len(), 9);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_generate_user_id() {
        let id = generate_user_id();
        assert_eq!(id.len(), 36);
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_generate_database_id() {
        let id = generate_database_id();
        assert_eq!(id.len(), 32);
    }

    #[test]
    fn test_generate_reset_token() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(token, generate_reset_token());
    }
}
