//! Session cookie settings read from the environment.
//!
//! Debug builds fall back to permissive defaults with a warning; release
//! builds refuse to start unless every toggle is present and valid.
//!
//! | Variable | Meaning | Debug default |
//! |----------|---------|---------------|
//! | `SESSION_KEY_FILE` | path to the cookie key material | `/var/run/secrets/session_key` |
//! | `SESSION_COOKIE_SECURE` | mark the cookie `Secure` | `true` |
//! | `SESSION_SAMESITE` | `Strict`, `Lax` or `None` | `Lax` |
//! | `SESSION_ALLOW_EPHEMERAL` | generate a key when the file is missing | `false` |

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// How strictly session settings are validated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    Debug,
    Release,
}

impl BuildMode {
    /// Pick the mode matching `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use pet_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "SESSION_ALLOW_EPHEMERAL" => Some("1".to_owned()),
///     "SESSION_KEY_FILE" => Some("/nonexistent/session_key".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug settings");
/// assert!(settings.cookie_secure);
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = toggle(env, COOKIE_SECURE_ENV, mode, true)?;
    let same_site = same_site(env, mode, cookie_secure)?;
    let allow_ephemeral = toggle(env, ALLOW_EPHEMERAL_ENV, mode, false)?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

/// Read a boolean toggle. Debug builds substitute `debug_default` for a
/// missing or malformed value.
fn toggle<E: Env>(
    env: &E,
    name: &'static str,
    mode: BuildMode,
    debug_default: bool,
) -> Result<bool, SessionConfigError> {
    let Some(value) = env.string(name) else {
        if mode.is_debug() {
            warn!(variable = name, default = debug_default, "session toggle not set");
            return Ok(debug_default);
        }
        return Err(SessionConfigError::MissingEnv { name });
    };
    match parse_bool(&value) {
        Some(flag) => Ok(flag),
        None if mode.is_debug() => {
            warn!(variable = name, %value, default = debug_default, "invalid session toggle");
            Ok(debug_default)
        }
        None => Err(SessionConfigError::InvalidEnv {
            name,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn same_site<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let fallback = |reason: &str| {
        if mode.is_debug() {
            warn!(variable = SAMESITE_ENV, reason, "using SameSite=Lax");
            Ok(SameSite::Lax)
        } else {
            Err(())
        }
    };

    let Some(value) = env.string(SAMESITE_ENV) else {
        return fallback("not set").map_err(|()| SessionConfigError::MissingEnv {
            name: SAMESITE_ENV,
        });
    };
    match value.to_ascii_lowercase().as_str() {
        "lax" => Ok(SameSite::Lax),
        "strict" => Ok(SameSite::Strict),
        "none" if cookie_secure => Ok(SameSite::None),
        "none" if mode.is_debug() => {
            warn!("SESSION_SAMESITE=None without a secure cookie; browsers may drop it");
            Ok(SameSite::None)
        }
        "none" => Err(SessionConfigError::InsecureSameSiteNone),
        _ => fallback("invalid value").map_err(|()| SessionConfigError::InvalidEnv {
            name: SAMESITE_ENV,
            value,
            expected: SAMESITE_EXPECTED,
        }),
    }
}

fn session_key<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let result = if !mode.is_debug() && length < SESSION_KEY_MIN_LEN {
        Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        })
    } else {
        Ok(Key::derive_from(&bytes))
    };
    bytes.zeroize();
    result
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Session settings under debug and release rules.
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp key file");
        file.write_all(&vec![b'k'; len]).expect("write key");
        file
    }

    fn env_with(vars: &[(&'static str, String)]) -> MockEnv {
        let vars: HashMap<&'static str, String> = vars.iter().cloned().collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |name| vars.get(name).cloned());
        env
    }

    #[fixture]
    fn release_key() -> NamedTempFile {
        key_file(SESSION_KEY_MIN_LEN)
    }

    fn release_vars(key: &NamedTempFile) -> Vec<(&'static str, String)> {
        vec![
            (KEY_FILE_ENV, key.path().display().to_string()),
            (COOKIE_SECURE_ENV, "1".to_owned()),
            (SAMESITE_ENV, "Strict".to_owned()),
            (ALLOW_EPHEMERAL_ENV, "0".to_owned()),
        ]
    }

    fn without(vars: Vec<(&'static str, String)>, name: &str) -> Vec<(&'static str, String)> {
        vars.into_iter().filter(|(key, _)| *key != name).collect()
    }

    fn with(
        vars: Vec<(&'static str, String)>,
        name: &'static str,
        value: &str,
    ) -> Vec<(&'static str, String)> {
        let mut vars = without(vars, name);
        vars.push((name, value.to_owned()));
        vars
    }

    #[rstest]
    fn release_accepts_complete_configuration(release_key: NamedTempFile) {
        let env = env_with(&release_vars(&release_key));
        let settings = session_settings_from_env(&env, BuildMode::Release).expect("valid");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Strict);
    }

    #[rstest]
    #[case(COOKIE_SECURE_ENV)]
    #[case(SAMESITE_ENV)]
    #[case(ALLOW_EPHEMERAL_ENV)]
    fn release_requires_every_toggle(release_key: NamedTempFile, #[case] missing: &'static str) {
        let env = env_with(&without(release_vars(&release_key), missing));
        let error = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("missing toggle");
        assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
    }

    #[rstest]
    fn release_rejects_malformed_toggle(release_key: NamedTempFile) {
        let env = env_with(&with(release_vars(&release_key), COOKIE_SECURE_ENV, "maybe"));
        let error = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("malformed toggle");
        assert!(matches!(error, SessionConfigError::InvalidEnv { .. }));
    }

    #[rstest]
    fn release_rejects_insecure_same_site_none(release_key: NamedTempFile) {
        let vars = with(release_vars(&release_key), COOKIE_SECURE_ENV, "0");
        let env = env_with(&with(vars, SAMESITE_ENV, "None"));
        let error = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("insecure None");
        assert!(matches!(error, SessionConfigError::InsecureSameSiteNone));
    }

    #[rstest]
    fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
        let env = env_with(&with(release_vars(&release_key), ALLOW_EPHEMERAL_ENV, "yes"));
        let error = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("ephemeral refused");
        assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
    }

    #[rstest]
    fn release_rejects_short_key() {
        let short = key_file(SESSION_KEY_MIN_LEN - 1);
        let env = env_with(&release_vars(&short));
        let error = session_settings_from_env(&env, BuildMode::Release)
            .err()
            .expect("short key");
        assert!(matches!(error, SessionConfigError::KeyTooShort { length, .. } if length == SESSION_KEY_MIN_LEN - 1));
    }

    #[rstest]
    fn debug_defaults_when_nothing_is_set() {
        let env = env_with(&[(KEY_FILE_ENV, "/nonexistent/session_key".to_owned())]);
        let settings = session_settings_from_env(&env, BuildMode::Debug).expect("defaults");
        assert!(settings.cookie_secure);
        assert_eq!(settings.same_site, SameSite::Lax);
    }

    #[rstest]
    #[case("1", Some(true))]
    #[case(" Yes ", Some(true))]
    #[case("n", Some(false))]
    #[case("FALSE", Some(false))]
    #[case("2", None)]
    fn parses_boolean_spellings(#[case] raw: &str, #[case] expected: Option<bool>) {
        assert_eq!(parse_bool(raw), expected);
    }
}
