//! Person domain model

use std::fmt;
use std::sync::Arc;

use sha2::{Digest, Sha256};

use super::event::Notification;
use super::result::{Error, Result};
use crate::ports::{Clock, Notifier, Subscriber};

/// Number of leading identifier characters that form the credential
const CREDENTIAL_LEN: usize = 3;

/// Someone who can log in and act on accounts
///
/// The credential is the first three characters of the `sin`, stored only
/// as a digest.
#[derive(Debug)]
pub struct Person {
    name: String,
    sin: String,
    credential: [u8; 32],
    authenticated: bool,
    notifier: Notifier,
}

impl Person {
    pub fn new(name: impl Into<String>, sin: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let sin = sin.into();
        let credential_text: String = sin.chars().take(CREDENTIAL_LEN).collect();
        Self {
            name: name.into(),
            credential: digest(&credential_text),
            sin,
            authenticated: false,
            notifier: Notifier::new(clock),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sin(&self) -> &str {
        &self.sin
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Register for login notifications
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.notifier.subscribe(subscriber);
    }

    /// Check the password against the stored credential
    ///
    /// Exactly one login notification is raised per attempt. A failed
    /// attempt also clears any earlier authentication.
    pub fn login(&mut self, password: &str) -> Result<()> {
        let at = self.notifier.clock().peek();

        if digest(password) != self.credential {
            self.authenticated = false;
            self.notifier.emit(Notification::login(&self.name, false, at));
            tracing::warn!(person = %self.name, "Login rejected");
            return Err(Error::PasswordIncorrect(self.name.clone()));
        }

        self.authenticated = true;
        self.notifier.emit(Notification::login(&self.name, true, at));
        tracing::debug!(person = %self.name, "Login accepted");
        Ok(())
    }

    /// Drop authentication; no notification
    pub fn logout(&mut self) {
        self.authenticated = false;
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - Authenticated: {}", self.name, self.authenticated)
    }
}

fn digest(text: &str) -> [u8; 32] {
    Sha256::digest(text.as_bytes()).into()
}
