// ABOUTME: Validated application and stage names.
// ABOUTME: Both end up inside remote resource names, so the character set is restricted.

use std::fmt;
use thiserror::Error;

const MAX_APP_NAME_LEN: usize = 64;
const MAX_STAGE_LEN: usize = 32;

/// Stage that is deployed without version history.
const UNVERSIONED_STAGE: &str = "dev";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{what} exceeds maximum length of {max} characters")]
    TooLong { what: &'static str, max: usize },

    #[error("invalid character in {what}: '{found}'")]
    InvalidChar { what: &'static str, found: char },
}

fn validate(
    value: &str,
    what: &'static str,
    max: usize,
    allowed: impl Fn(char) -> bool,
) -> Result<(), NameError> {
    if value.is_empty() {
        return Err(NameError::Empty(what));
    }
    if value.len() > max {
        return Err(NameError::TooLong { what, max });
    }
    match value.chars().find(|c| !allowed(*c)) {
        Some(found) => Err(NameError::InvalidChar { what, found }),
        None => Ok(()),
    }
}

/// Application name; prefixes every function name belonging to the app.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, NameError> {
        validate(value, "application name", MAX_APP_NAME_LEN, |c| {
            c.is_ascii_alphanumeric() || c == '-' || c == '_'
        })?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Deployment environment, e.g. `dev`, `staging`, `prod`.
///
/// The stage names the function alias, so it is lowercase like the aliases
/// the infrastructure creates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stage(String);

impl Stage {
    pub fn new(value: &str) -> Result<Self, NameError> {
        validate(value, "stage", MAX_STAGE_LEN, |c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
        })?;
        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether deploys to this stage keep a version history to roll back to.
    pub fn is_versioned(&self) -> bool {
        self.0 != UNVERSIONED_STAGE
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self(UNVERSIONED_STAGE.to_string())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
