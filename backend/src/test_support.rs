//! Shared helpers for unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{Email, FullName, PasswordHash, User, UserAccount, UserId};

/// Clock frozen at a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl FixtureClock {
    /// Freeze the clock at `utc_now`.
    pub fn at(utc_now: DateTime<Utc>) -> Self {
        Self { utc_now }
    }
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Fixed instant used across unit tests.
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("fixture timestamp is valid")
}

/// Clock frozen at [`fixture_timestamp`].
pub fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock::at(fixture_timestamp()))
}

/// Account with the given email and a placeholder hash.
pub fn account_with_email(email: &str) -> UserAccount {
    let user = User::new(
        UserId::random(),
        Email::new(email).expect("fixture email is valid"),
        FullName::new("Fixture User").expect("fixture name is valid"),
        None,
        fixture_timestamp(),
    );
    UserAccount::new(user, PasswordHash::new("$argon2id$fixture"))
}
