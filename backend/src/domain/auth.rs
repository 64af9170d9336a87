//! Staff authentication primitives.
//!
//! Staff credentials are checked by the record store's auth capability; the
//! domain only validates their shape and carries the resulting staff id.

use std::fmt;

use zeroize::Zeroizing;

/// Error returned when staff login values are malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated staff credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace. It is
///   zeroized on drop.
///
/// # Examples
/// ```
/// use intake::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" clerk@firm.test ", "s3cret").expect("valid");
/// assert_eq!(creds.username(), "clerk@firm.test");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Identifier of an authenticated staff member, as issued by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaffId(String);

/// Error returned when a staff id is blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("staff id must not be empty")]
pub struct StaffIdValidationError;

impl StaffId {
    /// Validate and wrap a staff id.
    pub fn new(id: impl Into<String>) -> Result<Self, StaffIdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(StaffIdValidationError);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for StaffId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
