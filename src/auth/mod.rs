//! Demo account flows
//!
//! Registration, login and the forgot/reset password cycle over an
//! in-memory store. Passwords are hashed with Argon2id and sessions are
//! HS256 JWTs.

pub mod hashing;
pub mod mailer;
pub mod models;
pub mod store;
pub mod token;

pub use mailer::{LogMailer, MailMessage, Mailer, OutboxMailer};
pub use models::{AuthSession, LoginRequest, PublicUser, RegisterRequest, ResetPasswordConfirm};
pub use store::AuthStore;
pub use token::{Claims, TokenIssuer};
