//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// The first seven variants are the business-rule rejections callers match
/// on. None of them are fatal: the operation is refused and the ledger is
/// left as it was.
#[derive(Error, Debug)]
pub enum Error {
    #[error("ACCOUNT_DOES_NOT_EXIST: {0}")]
    AccountDoesNotExist(String),

    #[error("CREDIT_LIMIT_HAS_BEEN_EXCEEDED: {number} would reach {attempted} (limit {limit})")]
    CreditLimitHasBeenExceeded {
        number: String,
        attempted: f64,
        limit: f64,
    },

    #[error("NAME_NOT_ASSOCIATED_WITH_ACCOUNT: {name} on {number}")]
    NameNotAssociatedWithAccount { name: String, number: String },

    #[error("NO_OVERDRAFT: {number} holds {balance}, requested {requested}")]
    NoOverdraft {
        number: String,
        balance: f64,
        requested: f64,
    },

    #[error("PASSWORD_INCORRECT: {0}")]
    PasswordIncorrect(String),

    #[error("USER_DOES_NOT_EXIST: {0}")]
    UserDoesNotExist(String),

    #[error("USER_NOT_LOGGED_IN: {0}")]
    UserNotLoggedIn(String),

    /// Operation the account kind does not offer (e.g. a Visa withdrawal)
    #[error("NOT_SUPPORTED: {0}")]
    NotSupported(String),

    #[error("Duplicate person: {0}")]
    DuplicatePerson(String),

    #[error("Duplicate account: {0}")]
    DuplicateAccount(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable code for matching and logging
    pub fn code(&self) -> &'static str {
        match self {
            Error::AccountDoesNotExist(_) => "ACCOUNT_DOES_NOT_EXIST",
            Error::CreditLimitHasBeenExceeded { .. } => "CREDIT_LIMIT_HAS_BEEN_EXCEEDED",
            Error::NameNotAssociatedWithAccount { .. } => "NAME_NOT_ASSOCIATED_WITH_ACCOUNT",
            Error::NoOverdraft { .. } => "NO_OVERDRAFT",
            Error::PasswordIncorrect(_) => "PASSWORD_INCORRECT",
            Error::UserDoesNotExist(_) => "USER_DOES_NOT_EXIST",
            Error::UserNotLoggedIn(_) => "USER_NOT_LOGGED_IN",
            Error::NotSupported(_) => "NOT_SUPPORTED",
            Error::DuplicatePerson(_) => "DUPLICATE_PERSON",
            Error::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Error::Config(_) => "CONFIG",
            Error::Io(_) => "IO",
            Error::Json(_) => "JSON",
        }
    }

    /// Create a not-supported error
    pub fn not_supported(msg: impl Into<String>) -> Self {
        Self::NotSupported(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
