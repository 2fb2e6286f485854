//! Shared fixtures for domain unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{
    DisplayName, EmailAddress, PasswordDigest, Pet, PetDraft, PetFields, RawAge, User,
    UserAccount, UserId,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn pet_fields(name: &str) -> PetFields<'_> {
    PetFields {
        name,
        age: RawAge::Number(3),
        species: "DOG",
        breed: "Beagle",
        owner_name: "Ricardo",
        owner_contact: "21977665544",
        image: None,
    }
}

pub(crate) fn pet_owned_by(owner: &UserId, name: &str) -> Pet {
    let draft = PetDraft::try_from_fields(pet_fields(name)).expect("valid fixture pet");
    Pet::register(owner.clone(), draft, fixture_timestamp())
}

/// Reversible stand-in for a real hasher so tests can assert on digests.
pub(crate) struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, PasswordHashError> {
        Ok(PasswordDigest::new(format!("plain${password}")))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
        Ok(digest.as_str() == format!("plain${password}"))
    }
}

pub(crate) fn account(name: &str, email: &str, password: &str) -> UserAccount {
    let user = User::new(
        UserId::random(),
        DisplayName::new(name).expect("valid fixture name"),
        EmailAddress::new(email).expect("valid fixture email"),
    );
    UserAccount::new(user, PasswordDigest::new(format!("plain${password}")))
}
