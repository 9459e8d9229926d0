//! Sample registry contents
//!
//! Eleven persons, eight accounts, and the links between them. With the
//! default first number of 100000 the accounts come out as VS-100000 through
//! SV-100007.

use crate::domain::account::VISA_DEFAULT_CREDIT_LIMIT;
use crate::domain::AccountKind;

/// (name, sin)
pub const SEED_PERSONS: &[(&str, &str)] = &[
    ("Narendra", "1234-5678"),
    ("Ilia", "2345-6789"),
    ("Mehrdad", "3456-7890"),
    ("Vijay", "4567-8901"),
    ("Arben", "5678-9012"),
    ("Patrick", "6789-0123"),
    ("Yin", "7890-1234"),
    ("Hao", "8901-2345"),
    ("Jake", "9012-3456"),
    ("Mayy", "1224-5678"),
    ("Nicoletta", "2344-6789"),
];

/// Account kinds and opening balances, in creation order
pub fn seed_accounts() -> Vec<(AccountKind, f64)> {
    vec![
        (AccountKind::visa(VISA_DEFAULT_CREDIT_LIMIT), 0.0),
        (AccountKind::visa(-500.0), 150.0),
        (AccountKind::saving(false), 5000.0),
        (AccountKind::saving(false), 0.0),
        (AccountKind::checking(false), 2000.0),
        (AccountKind::checking(true), 1500.0),
        (AccountKind::visa(-550.0), 50.0),
        (AccountKind::saving(false), 1000.0),
    ]
}

/// Person names per account, indexed like `seed_accounts`
pub const SEED_MEMBERSHIPS: &[&[&str]] = &[
    &["Narendra", "Ilia", "Mehrdad"],
    &["Vijay", "Arben", "Patrick"],
    &["Yin", "Hao", "Jake"],
    &["Mayy", "Nicoletta"],
    &["Mehrdad", "Arben", "Yin"],
    &["Jake", "Nicoletta"],
    &["Ilia", "Vijay"],
    &["Patrick", "Hao"],
];
