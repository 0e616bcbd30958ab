//! In-memory account store
//!
//! Holds users and pending reset tokens for the demo account flows.

use std::collections::HashMap;

use argon2::Argon2;
use chrono::{Duration, Utc};
use email_address::EmailAddress;

use super::hashing::{self, hash_password, verify_password};
use super::mailer::{LogMailer, MailMessage, Mailer};
use super::models::{
    AuthSession, LoginRequest, PublicUser, RegisterRequest, ResetPasswordConfirm, ResetTicket,
    User,
};
use super::token::{Claims, TokenIssuer};
use crate::config::Config;
use crate::error::{PassgenError, Result};
use crate::utils::{generate_reset_token, generate_user_id, now};
use crate::{ACCOUNT_NAME_MIN_LENGTH, ACCOUNT_PASSWORD_MIN_LENGTH};

/// Users and reset tokens, owned explicitly by the caller
pub struct AuthStore<M: Mailer = LogMailer> {
    /// Users keyed by email
    users: HashMap<String, User>,
    /// Pending resets keyed by token
    reset_tickets: HashMap<String, ResetTicket>,
    tokens: TokenIssuer,
    argon2: Argon2<'static>,
    /// Verified against for unknown emails so both login failures cost one hash
    dummy_hash: String,
    reset_token_ttl: Duration,
    frontend_url: String,
    mailer: M,
}

impl AuthStore<LogMailer> {
    /// Store that logs its mail
    pub fn with_log_mailer(config: &Config) -> Result<Self> {
        Self::new(config, LogMailer)
    }
}

impl<M: Mailer> AuthStore<M> {
    pub fn new(config: &Config, mailer: M) -> Result<Self> {
        let argon2 = hashing::hasher(config)?;
        let dummy_hash = hash_password(&argon2, &generate_reset_token())?;

        Ok(Self {
            users: HashMap::new(),
            reset_tickets: HashMap::new(),
            tokens: TokenIssuer::new(&config.jwt_secret, config.jwt_expires_in),
            argon2,
            dummy_hash,
            reset_token_ttl: config.reset_token_ttl,
            frontend_url: config.frontend_url.clone(),
            mailer,
        })
    }

    /// Create an account and sign it in
    pub fn register(&mut self, request: &RegisterRequest) -> Result<AuthSession> {
        let name = required(&request.name, "name")?;
        let email = required(&request.email, "email")?;
        required(&request.password, "password")?;
        required(&request.confirm_password, "confirmPassword")?;

        if name.chars().count() < ACCOUNT_NAME_MIN_LENGTH {
            return Err(PassgenError::InvalidName(name.to_string()));
        }
        validate_email(email)?;
        validate_password(&request.password)?;
        if request.password != request.confirm_password {
            return Err(PassgenError::PasswordMismatch);
        }
        if self.users.contains_key(email) {
            return Err(PassgenError::UserAlreadyExists(email.to_string()));
        }

        let user = User {
            id: generate_user_id(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&self.argon2, &request.password)?,
            created_at: now(),
            last_login: None,
        };
        let token = self.tokens.issue(&user.id, &user.email)?;
        let public = user.to_public();

        log::info!("Registered user {}", user.id);
        self.users.insert(user.email.clone(), user);

        // Registration stands even if the welcome mail fails
        if let Err(e) = self.mailer.send(&MailMessage::welcome(&public.email, &public.name)) {
            log::warn!("Welcome mail to {} failed: {}", public.email, e);
        }

        Ok(AuthSession { user: public, token })
    }

    /// Check credentials and sign in
    pub fn login(&mut self, request: &LoginRequest) -> Result<AuthSession> {
        let email = required(&request.email, "email")?;
        required(&request.password, "password")?;

        let Some(user) = self.users.get_mut(email) else {
            verify_password(&self.argon2, &request.password, &self.dummy_hash)?;
            return Err(PassgenError::InvalidCredentials);
        };

        if !verify_password(&self.argon2, &request.password, &user.password_hash)? {
            log::debug!("Failed login for user {}", user.id);
            return Err(PassgenError::InvalidCredentials);
        }

        user.last_login = Some(now());
        let token = self.tokens.issue(&user.id, &user.email)?;
        log::info!("User {} logged in", user.id);

        Ok(AuthSession {
            user: user.to_public(),
            token,
        })
    }

    /// Start a password reset.
    ///
    /// Unknown addresses succeed silently and send nothing.
    pub fn forgot_password(&mut self, email: &str) -> Result<()> {
        let email = required(email, "email")?;

        let Some(user) = self.users.get(email) else {
            log::debug!("Reset requested for unregistered address");
            return Ok(());
        };

        let token = generate_reset_token();
        let reset_url = format!("{}/reset-password?token={}", self.frontend_url, token);
        let message = MailMessage::password_reset(&user.email, &user.name, &reset_url);
        let expires_at = Utc::now().checked_add_signed(self.reset_token_ttl).ok_or_else(|| {
            PassgenError::ConfigError(format!(
                "Reset token lifetime out of range: {}",
                self.reset_token_ttl
            ))
        })?;
        let ticket = ResetTicket {
            user_id: user.id.clone(),
            email: user.email.clone(),
            expires_at,
        };

        self.mailer.send(&message).map_err(|e| {
            log::error!("Reset mail to {} failed: {}", ticket.email, e);
            PassgenError::MailError(e.to_string())
        })?;

        log::info!("Issued reset token for user {}", ticket.user_id);
        self.reset_tickets.insert(token, ticket);
        Ok(())
    }

    /// Finish a password reset; the token is consumed on success
    pub fn reset_password(&mut self, request: &ResetPasswordConfirm) -> Result<()> {
        let token = required(&request.token, "token")?;
        required(&request.new_password, "newPassword")?;
        required(&request.confirm_password, "confirmPassword")?;

        validate_password(&request.new_password)?;
        if request.new_password != request.confirm_password {
            return Err(PassgenError::PasswordMismatch);
        }

        let ticket = match self.reset_tickets.get(token) {
            Some(ticket) if !ticket.is_expired(Utc::now()) => ticket.clone(),
            _ => return Err(PassgenError::InvalidResetToken),
        };

        let user = self
            .users
            .values_mut()
            .find(|user| user.id == ticket.user_id)
            .ok_or_else(|| PassgenError::UserNotFound(ticket.user_id.clone()))?;

        user.password_hash = hash_password(&self.argon2, &request.new_password)?;
        self.reset_tickets.remove(token);

        log::info!("Password reset for user {}", ticket.user_id);
        Ok(())
    }

    /// Validate a session token issued by this store
    pub fn verify_session(&self, token: &str) -> Result<Claims> {
        let claims = self.tokens.verify(token)?;
        if !self.users.values().any(|user| user.id == claims.sub) {
            return Err(PassgenError::InvalidToken(format!("Unknown subject {}", claims.sub)));
        }
        Ok(claims)
    }

    /// Drop expired reset tokens; returns how many were removed
    pub fn purge_expired_tokens(&mut self) -> usize {
        let now = Utc::now();
        let before = self.reset_tickets.len();
        self.reset_tickets.retain(|_, ticket| !ticket.is_expired(now));
        before - self.reset_tickets.len()
    }

    /// Number of pending reset tokens
    pub fn pending_resets(&self) -> usize {
        self.reset_tickets.len()
    }

    /// Look up an account by email
    pub fn user_by_email(&self, email: &str) -> Option<PublicUser> {
        self.users.get(email.trim()).map(User::to_public)
    }

    /// Number of registered accounts
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// The mail transport
    pub fn mailer(&self) -> &M {
        &self.mailer
    }
}

impl<M: Mailer> std::fmt::Debug for AuthStore<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("users", &self.users.len())
            .field("reset_tickets", &self.reset_tickets.len())
            .field("tokens", &self.tokens)
            .field("reset_token_ttl", &self.reset_token_ttl)
            .field("frontend_url", &self.frontend_url)
            .finish_non_exhaustive()
    }
}

/// Trimmed value, or `MissingField` if blank
fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(PassgenError::MissingField(field));
    }
    Ok(value)
}

fn validate_email(email: &str) -> Result<()> {
    if !EmailAddress::is_valid(email) {
        return Err(PassgenError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < ACCOUNT_PASSWORD_MIN_LENGTH {
        return Err(PassgenError::WeakPassword);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::mailer::OutboxMailer;

    struct FailingMailer;

    impl Mailer for FailingMailer {
        fn send(&self, _message: &MailMessage) -> Result<()> {
            Err(PassgenError::MailError("smtp down".to_string()))
        }
    }

    fn test_config() -> Config {
        Config {
            jwt_secret: "test-secret".to_string(),
            hash_memory_kib: 256,
            hash_iterations: 1,
            ..Config::default()
        }
    }

    fn store() -> AuthStore<OutboxMailer> {
        AuthStore::new(&test_config(), OutboxMailer::new()).unwrap()
    }

    fn ana() -> RegisterRequest {
        RegisterRequest::new("Ana", "ana@example.com", "secret1", "secret1")
    }

    fn reset_token(store: &AuthStore<OutboxMailer>, email: &str) -> String {
        let mail = store.mailer().last_to(email).unwrap();
        let (_, rest) = mail.body.split_once("token=").unwrap();
        rest.chars().take(64).collect()
    }

    #[test]
    fn test_register() {
        let mut store = store();
        let session = store.register(&ana()).unwrap();

        assert_eq!(session.user.name, "Ana");
        assert_eq!(session.user.email, "ana@example.com");
        assert!(session.user.last_login.is_none());
        assert_eq!(store.user_count(), 1);
        assert_eq!(store.verify_session(&session.token).unwrap().sub, session.user.id);

        let welcome = store.mailer().last_to("ana@example.com").unwrap();
        assert_eq!(welcome.subject, crate::auth::mailer::WELCOME_SUBJECT);
    }

    #[test]
    fn test_register_validation() {
        let mut store = store();

        let cases = [
            (RegisterRequest::new("", "a@b.co", "secret1", "secret1"), "missing name"),
            (RegisterRequest::new("A", "a@b.co", "secret1", "secret1"), "short name"),
            (RegisterRequest::new("Ana", "not-an-email", "secret1", "secret1"), "bad email"),
            (RegisterRequest::new("Ana", "a@b.co", "12345", "12345"), "weak"),
            (RegisterRequest::new("Ana", "a@b.co", "secret1", "secret2"), "mismatch"),
        ];

        for (request, label) in cases {
            let err = store.register(&request).unwrap_err();
            let ok = match label {
                "missing name" => matches!(err, PassgenError::MissingField("name")),
                "short name" => matches!(err, PassgenError::InvalidName(_)),
                "bad email" => matches!(err, PassgenError::InvalidEmail(_)),
                "weak" => matches!(err, PassgenError::WeakPassword),
                _ => matches!(err, PassgenError::PasswordMismatch),
            };
            assert!(ok, "{label}: unexpected {err:?}");
        }
        assert_eq!(store.user_count(), 0);
    }

    #[test]
    fn test_register_duplicate() {
        let mut store = store();
        store.register(&ana()).unwrap();
        let result = store.register(&ana());
        assert!(matches!(result, Err(PassgenError::UserAlreadyExists(_))));
    }

    #[test]
    fn test_register_survives_mail_failure() {
        let mut store = AuthStore::new(&test_config(), FailingMailer).unwrap();
        assert!(store.register(&ana()).is_ok());
        assert_eq!(store.user_count(), 1);
    }

    #[test]
    fn test_login() {
        let mut store = store();
        store.register(&ana()).unwrap();

        let session = store.login(&LoginRequest::new("ana@example.com", "secret1")).unwrap();
        assert!(session.user.last_login.is_some());
        assert!(store.verify_session(&session.token).is_ok());
    }

    #[test]
    fn test_login_failures() {
        let mut store = store();
        store.register(&ana()).unwrap();

        let wrong = store.login(&LoginRequest::new("ana@example.com", "secret2"));
        assert!(matches!(wrong, Err(PassgenError::InvalidCredentials)));

        let unknown = store.login(&LoginRequest::new("bob@example.com", "secret1"));
        assert!(matches!(unknown, Err(PassgenError::InvalidCredentials)));

        let missing = store.login(&LoginRequest::new("ana@example.com", ""));
        assert!(matches!(missing, Err(PassgenError::MissingField("password"))));
    }

    #[test]
    fn test_login_unknown_email_checks_dummy_hash() {
        let mut store = store();
        assert!(store.dummy_hash.starts_with("$argon2id$"));
        assert!(!verify_password(&store.argon2, "secret1", &store.dummy_hash).unwrap());

        let result = store.login(&LoginRequest::new("nobody@example.com", "secret1"));
        assert!(matches!(result, Err(PassgenError::InvalidCredentials)));
    }

    #[test]
    fn test_reset_lifetime_overflow() {
        let config = Config {
            reset_token_ttl: Duration::MAX,
            ..test_config()
        };
        let mut store = AuthStore::new(&config, OutboxMailer::new()).unwrap();
        store.register(&ana()).unwrap();

        let result = store.forgot_password("ana@example.com");
        assert!(matches!(result, Err(PassgenError::ConfigError(_))));
        assert_eq!(store.pending_resets(), 0);
        assert_eq!(store.mailer().messages().len(), 1);
    }

    #[test]
    fn test_session_lifetime_overflow() {
        let config = Config {
            jwt_expires_in: Duration::MAX,
            ..test_config()
        };
        let mut store = AuthStore::new(&config, OutboxMailer::new()).unwrap();
        let result = store.register(&ana());
        assert!(matches!(result, Err(PassgenError::ConfigError(_))));
    }

    #[test]
    fn test_forgot_password_unknown_email_is_silent() {
        let mut store = store();
        store.forgot_password("ghost@example.com").unwrap();
        assert_eq!(store.pending_resets(), 0);
        assert!(store.mailer().messages().is_empty());

        assert!(matches!(
            store.forgot_password("  "),
            Err(PassgenError::MissingField("email"))
        ));
    }

    #[test]
    fn test_forgot_password_mail_failure() {
        let mut store = AuthStore::new(&test_config(), FailingMailer).unwrap();
        store.register(&ana()).unwrap();

        let result = store.forgot_password("ana@example.com");
        assert!(matches!(result, Err(PassgenError::MailError(_))));
        assert_eq!(store.pending_resets(), 0);
    }

    #[test]
    fn test_reset_flow() {
        let mut store = store();
        store.register(&ana()).unwrap();
        store.forgot_password("ana@example.com").unwrap();
        assert_eq!(store.pending_resets(), 1);

        let token = reset_token(&store, "ana@example.com");
        assert_eq!(token.len(), 64);

        store
            .reset_password(&ResetPasswordConfirm::new(&token, "newpass1", "newpass1"))
            .unwrap();
        assert_eq!(store.pending_resets(), 0);

        assert!(store.login(&LoginRequest::new("ana@example.com", "secret1")).is_err());
        assert!(store.login(&LoginRequest::new("ana@example.com", "newpass1")).is_ok());

        // Single use
        let again = store.reset_password(&ResetPasswordConfirm::new(&token, "other12", "other12"));
        assert!(matches!(again, Err(PassgenError::InvalidResetToken)));
    }

    #[test]
    fn test_reset_validation() {
        let mut store = store();
        store.register(&ana()).unwrap();
        store.forgot_password("ana@example.com").unwrap();
        let token = reset_token(&store, "ana@example.com");

        let weak = store.reset_password(&ResetPasswordConfirm::new(&token, "123", "123"));
        assert!(matches!(weak, Err(PassgenError::WeakPassword)));

        let mismatch =
            store.reset_password(&ResetPasswordConfirm::new(&token, "newpass1", "newpass2"));
        assert!(matches!(mismatch, Err(PassgenError::PasswordMismatch)));

        let unknown =
            store.reset_password(&ResetPasswordConfirm::new("deadbeef", "newpass1", "newpass1"));
        assert!(matches!(unknown, Err(PassgenError::InvalidResetToken)));

        // Failed attempts leave the token usable
        assert_eq!(store.pending_resets(), 1);
    }

    #[test]
    fn test_expired_reset_token() {
        let config = Config {
            reset_token_ttl: Duration::seconds(-1),
            ..test_config()
        };
        let mut store = AuthStore::new(&config, OutboxMailer::new()).unwrap();
        store.register(&ana()).unwrap();
        store.forgot_password("ana@example.com").unwrap();
        let token = reset_token(&store, "ana@example.com");

        let result =
            store.reset_password(&ResetPasswordConfirm::new(&token, "newpass1", "newpass1"));
        assert!(matches!(result, Err(PassgenError::InvalidResetToken)));

        assert_eq!(store.purge_expired_tokens(), 1);
        assert_eq!(store.pending_resets(), 0);
    }

    #[test]
    fn test_verify_session_rejects_foreign_tokens() {
        let store = store();
        let foreign = TokenIssuer::new("test-secret", Duration::hours(1))
            .issue("no-such-user", "x@y.co")
            .unwrap();
        assert!(matches!(store.verify_session(&foreign), Err(PassgenError::InvalidToken(_))));
    }

    #[test]
    fn test_user_by_email() {
        let mut store = store();
        store.register(&ana()).unwrap();
        assert_eq!(store.user_by_email(" ana@example.com ").unwrap().name, "Ana");
        assert!(store.user_by_email("bob@example.com").is_none());
    }
}
