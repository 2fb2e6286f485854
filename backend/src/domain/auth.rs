//! Authentication primitives: credentials, new passwords and stored digests.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.
//! Plain-text passwords live in [`Zeroizing`] buffers so they are wiped once
//! dropped.

use std::fmt;

use zeroize::Zeroizing;

use super::validation::{FieldViolation, Violations};
use super::{DisplayName, EmailAddress, UserValidationError};

/// Minimum number of characters in a password chosen by a user.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(err) => err.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised like every stored address.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use pet_registry::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Admin@Test.com", "password123").unwrap();
/// assert_eq!(creds.email().as_ref(), "admin@test.com");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation error for a password a user is choosing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    TooShort { min: usize },
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort { min } => write!(f, "password must be at least {min} characters"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// A password being set at registration or on a profile change.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Accept a password of at least [`PASSWORD_MIN_LENGTH`] characters.
    pub fn new(password: &str) -> Result<Self, PasswordValidationError> {
        if password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self(Zeroizing::new(password.to_owned())))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Salted password hash in PHC string format.
///
/// The digest is opaque to the domain; only a
/// [`PasswordHasher`](crate::domain::ports::PasswordHasher) can produce or
/// check one.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a hasher or read from storage.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

impl From<PasswordDigest> for String {
    fn from(value: PasswordDigest) -> Self {
        value.0
    }
}

/// Validated self-service registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: NewPassword,
}

impl Registration {
    /// Validate every registration field, collecting all failures.
    ///
    /// # Examples
    /// ```
    /// use pet_registry::domain::Registration;
    ///
    /// let err = Registration::try_from_parts("", "not-an-email", "123").unwrap_err();
    /// assert_eq!(err.fields(), ["name", "email", "password"]);
    /// ```
    pub fn try_from_parts(name: &str, email: &str, password: &str) -> Result<Self, Violations> {
        let mut violations = Violations::new();
        let name = violations.check("name", "invalid_name", DisplayName::new(name));
        let email = violations.check("email", "invalid_email", EmailAddress::new(email));
        let password = violations.check("password", "password_too_short", NewPassword::new(password));

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(Self {
                name,
                email,
                password,
            }),
            _ => Err(violations),
        }
    }
}

/// Unvalidated profile mutation fields as received from a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub current_password: Option<&'a str>,
    pub new_password: Option<&'a str>,
}

/// Validated profile mutation request.
///
/// Shape checks happen here, before the profile gate decides whether the
/// change needs the current password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub current_password: Option<Zeroizing<String>>,
    pub new_password: Option<NewPassword>,
}

impl ProfileUpdate {
    /// Validate a profile update.
    ///
    /// Blank `currentPassword` and `newPassword` values count as absent; a
    /// non-blank `newPassword` must meet [`PASSWORD_MIN_LENGTH`].
    pub fn try_from_fields(fields: ProfileFields<'_>) -> Result<Self, Violations> {
        let ProfileFields {
            name,
            email,
            current_password,
            new_password,
        } = fields;
        let mut violations = Violations::new();
        let name = violations.check("name", "invalid_name", DisplayName::new(name));
        let email = violations.check("email", "invalid_email", EmailAddress::new(email));
        let new_password = match new_password.filter(|value| !value.is_empty()) {
            Some(raw) => match NewPassword::new(raw) {
                Ok(password) => Some(password),
                Err(err) => {
                    violations.push(FieldViolation::new(
                        "newPassword",
                        "password_too_short",
                        err.to_string(),
                    ));
                    None
                }
            },
            None => None,
        };
        let current_password = current_password
            .filter(|value| !value.is_empty())
            .map(|value| Zeroizing::new(value.to_owned()));

        match (name, email) {
            (Some(name), Some(email)) if violations.is_empty() => Ok(Self {
                name,
                email,
                current_password,
                new_password,
            }),
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("   ", "pw")]
    #[case("not-an-email", "pw")]
    fn login_rejects_invalid_email(#[case] email: &str, #[case] password: &str) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert!(matches!(err, LoginValidationError::InvalidEmail(_)));
    }

    #[rstest]
    fn login_rejects_empty_password() {
        let err = LoginCredentials::try_from_parts("ada@example.com", "")
            .expect_err("empty password must fail");
        assert_eq!(err, LoginValidationError::EmptyPassword);
    }

    #[rstest]
    #[case("12345", false)]
    #[case("123456", true)]
    #[case("ççççç", false)]
    #[case("çççççç", true)]
    fn new_password_counts_characters(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(NewPassword::new(raw).is_ok(), accepted);
    }

    #[rstest]
    fn secrets_are_redacted_in_debug_output() {
        let password = NewPassword::new("hunter22").expect("valid password");
        let digest = PasswordDigest::new("$argon2id$secret");
        assert!(!format!("{password:?}").contains("hunter22"));
        assert!(!format!("{digest:?}").contains("secret"));
    }

    #[rstest]
    fn registration_accepts_valid_parts() {
        let registration = Registration::try_from_parts(" Ana ", "ANA@example.com", "secret1")
            .expect("valid registration");
        assert_eq!(registration.name.as_ref(), "Ana");
        assert_eq!(registration.email.as_ref(), "ana@example.com");
        assert_eq!(registration.password.expose(), "secret1");
    }

    fn fields<'a>(
        name: &'a str,
        email: &'a str,
        current_password: Option<&'a str>,
        new_password: Option<&'a str>,
    ) -> ProfileFields<'a> {
        ProfileFields {
            name,
            email,
            current_password,
            new_password,
        }
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), Some(""))]
    fn profile_update_treats_blank_passwords_as_absent(
        #[case] current: Option<&str>,
        #[case] new: Option<&str>,
    ) {
        let update = ProfileUpdate::try_from_fields(fields("Ana", "ana@example.com", current, new))
            .expect("valid update");
        assert!(update.current_password.is_none());
        assert!(update.new_password.is_none());
    }

    #[rstest]
    fn profile_update_rejects_short_new_password_without_current() {
        let err = ProfileUpdate::try_from_fields(fields("Ana", "ana@example.com", None, Some("123")))
            .expect_err("short password must fail");
        assert_eq!(err.fields(), ["newPassword"]);
    }

    #[rstest]
    fn profile_update_reports_every_invalid_field() {
        let err = ProfileUpdate::try_from_fields(fields(" ", "nope", Some("old"), Some("1")))
            .expect_err("invalid update");
        assert_eq!(err.fields(), ["name", "email", "newPassword"]);
    }
}
