//! Outgoing account mail
//!
//! Delivery sits behind the `Mailer` trait. `LogMailer` only writes the
//! message to the log; `OutboxMailer` keeps messages in memory.

use std::sync::Mutex;

use crate::error::{PassgenError, Result};

/// Subject of the welcome mail
pub const WELCOME_SUBJECT: &str = "Bem-vindo ao Gerador de Senhas Seguras!";

/// Subject of the password reset mail
pub const RESET_SUBJECT: &str = "Redefinição de senha - Gerador de Senhas Seguras";

/// A rendered mail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    /// Welcome mail sent after registration
    pub fn welcome(to: &str, name: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            body: format!(
                "Bem-vindo, {name}!\n\n\
                 Seu cadastro foi realizado com sucesso.\n\
                 Agora você pode gerar senhas seguras para proteger suas contas online."
            ),
        }
    }

    /// Reset mail carrying the single-use link
    pub fn password_reset(to: &str, name: &str, reset_url: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: RESET_SUBJECT.to_string(),
            body: format!(
                "Olá {name},\n\n\
                 Você solicitou a redefinição de sua senha.\n\
                 Acesse o link abaixo para redefinir sua senha:\n\n\
                 {reset_url}\n\n\
                 Este link expira em 1 hora.\n\
                 Se você não solicitou esta redefinição, ignore este email."
            ),
        }
    }
}

/// Mail delivery
pub trait Mailer {
    fn send(&self, message: &MailMessage) -> Result<()>;
}

/// Writes mail to the log instead of delivering it
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, message: &MailMessage) -> Result<()> {
        log::info!("Mail to {}: {}", message.to, message.subject);
        // Bodies may carry reset links
        log::debug!("{}", message.body);
        Ok(())
    }
}

/// Keeps sent mail in memory
#[derive(Debug, Default)]
pub struct OutboxMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl OutboxMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first
    pub fn messages(&self) -> Vec<MailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Most recent message to `to`
    pub fn last_to(&self, to: &str) -> Option<MailMessage> {
        self.messages().into_iter().rev().find(|m| m.to == to)
    }
}

impl Mailer for OutboxMailer {
    fn send(&self, message: &MailMessage) -> Result<()> {
        self.sent
            .lock()
            .map_err(|_| PassgenError::MailError("Outbox lock poisoned".to_string()))?
            .push(message.clone());
        Ok(())
    }
}

impl<M: Mailer + ?Sized> Mailer for &M {
    fn send(&self, message: &MailMessage) -> Result<()> {
        (**self).send(message)
    }
}
