//! User data model.
//!
//! Emails are normalised (trimmed and lower-cased) on construction so every
//! lookup and uniqueness check is case-insensitive without adapters having to
//! remember to fold case.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PasswordDigest;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyDisplayName => write!(f, "name is required"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email is required"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap an existing UUID, such as a primary key read from storage.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self::from_uuid(parsed))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Name shown for an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

/// Maximum allowed length for a display name.
pub const DISPLAY_NAME_MAX: usize = 100;

impl DisplayName {
    /// Validate and construct a [`DisplayName`], trimming surrounding
    /// whitespace.
    pub fn new(display_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = display_name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // One `@`, no whitespace, and a dot somewhere in the domain part.
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised login email.
///
/// # Examples
/// ```
/// use pet_registry::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Ada@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate, trim and lower-case an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let normalised = email.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Public view of an account. Never carries credentials.
///
/// ## Invariants
/// - `id` must be a valid UUID string.
/// - `name` must be non-empty once trimmed of whitespace.
/// - `email` is stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    name: DisplayName,
    email: EmailAddress,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, name: DisplayName, email: EmailAddress) -> Self {
        Self { id, name, email }
    }

    /// Fallible constructor enforcing identifier, name and email invariants.
    ///
    /// Prefer [`User::new`] when components are already validated.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        name: impl Into<String>,
        email: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            DisplayName::new(name)?,
            EmailAddress::new(email)?,
        ))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Account display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserDto {
    id: String,
    name: String,
    email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, name, email } = value;
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_strings(value.id, value.name, value.email)
    }
}

/// A stored account: the public profile plus its password digest.
///
/// Only repositories and authentication services see this type; handlers
/// receive [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user: User,
    pub password_hash: PasswordDigest,
}

impl UserAccount {
    /// Pair a profile with its password digest.
    pub fn new(user: User, password_hash: PasswordDigest) -> Self {
        Self {
            user,
            password_hash,
        }
    }

    /// Identifier of the underlying user.
    pub fn id(&self) -> &UserId {
        self.user.id()
    }
}
