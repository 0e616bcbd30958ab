//! Account records and request/response shapes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::mask_string;

/// Stored account
#[derive(Clone)]
pub struct User {
    /// User ID (UUID v4)
    pub id: String,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
    /// Last successful login
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// The account without its password hash
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .finish_non_exhaustive()
    }
}

/// Account data safe to hand to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

/// Registration form
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterRequest {
    pub fn new(name: &str, email: &str, password: &str, confirm_password: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &mask_string(&self.password))
            .field("confirm_password", &mask_string(&self.confirm_password))
            .finish()
    }
}

/// Login form
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &mask_string(&self.password))
            .finish()
    }
}

/// Reset form: token from the mail plus the new password twice
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordConfirm {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ResetPasswordConfirm {
    pub fn new(token: &str, new_password: &str, confirm_password: &str) -> Self {
        Self {
            token: token.to_string(),
            new_password: new_password.to_string(),
            confirm_password: confirm_password.to_string(),
        }
    }
}

impl std::fmt::Debug for ResetPasswordConfirm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResetPasswordConfirm")
            .field("token", &mask_string(&self.token))
            .field("new_password", &mask_string(&self.new_password))
            .field("confirm_password", &mask_string(&self.confirm_password))
            .finish()
    }
}

/// Successful register or login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: PublicUser,
    /// Signed session token
    pub token: String,
}

/// Pending password reset, keyed by its token
#[derive(Debug, Clone)]
pub(crate) struct ResetTicket {
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl ResetTicket {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_masks_secrets() {
        let request = RegisterRequest::new("Ana", "ana@example.com", "hunter22", "hunter22");
        let shown = format!("{request:?}");
        assert!(shown.contains("ana@example.com"));
        assert!(!shown.contains("hunter22"));

        let shown = format!("{:?}", LoginRequest::new("ana@example.com", "hunter22"));
        assert!(!shown.contains("hunter22"));

        let shown = format!("{:?}", ResetPasswordConfirm::new("abcdef", "newpass1", "newpass1"));
        assert!(!shown.contains("abcdef"));
        assert!(!shown.contains("newpass1"));
    }

    #[test]
    fn test_public_user_hides_hash() {
        let user = User {
            id: "id-1".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            created_at: Utc::now(),
            last_login: None,
        };

        let json = serde_json::to_string(&user.to_public()).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("lastLogin"));
        assert!(!json.contains("argon2"));
        assert!(!format!("{user:?}").contains("argon2"));
    }

    #[test]
    fn test_register_request_json() {
        let request: RegisterRequest = serde_json::from_str(
            r#"{"name":"Ana","email":"a@b.co","password":"secret1","confirmPassword":"secret1"}"#,
        )
        .unwrap();
        assert_eq!(request.confirm_password, "secret1");
    }

    #[test]
    fn test_ticket_expiry() {
        let now = Utc::now();
        let ticket = ResetTicket {
            user_id: "u".to_string(),
            email: "e".to_string(),
            expires_at: now,
        };
        assert!(!ticket.is_expired(now));
        assert!(ticket.is_expired(now + chrono::Duration::seconds(1)));
    }
}
