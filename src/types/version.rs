// ABOUTME: Frontend deploy versions and serverless function versions.
// ABOUTME: Maps deploy versions to storage prefixes and CDN origin paths.

use serde::{Serialize, Serializer};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;

/// Storage prefix under which every frontend version lives.
pub const DEPLOY_ROOT: &str = "deploys/";

/// Function platform's name for the mutable, unpublished head.
pub const LATEST_FUNCTION_VERSION: &str = "$LATEST";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("not a deploy prefix: {0}")]
    NotAPrefix(String),

    #[error("invalid version number: {0}")]
    InvalidNumber(String),
}

/// A published frontend version. Always positive; "nothing deployed yet" is
/// represented as `Option::<DeployVersion>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeployVersion(NonZeroU64);

impl DeployVersion {
    pub fn new(value: u64) -> Option<Self> {
        NonZeroU64::new(value).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0.get()
    }

    /// First version, used when no deploy has happened yet.
    pub fn first() -> Self {
        Self(NonZeroU64::MIN)
    }

    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// The version a deploy allocates after `current`.
    pub fn after(current: Option<DeployVersion>) -> Self {
        current.map_or_else(Self::first, Self::next)
    }

    /// Storage prefix without trailing slash, e.g. `deploys/v3`.
    pub fn prefix(self) -> String {
        format!("{DEPLOY_ROOT}v{}", self.0)
    }

    /// CDN origin path, e.g. `/deploys/v3`.
    pub fn origin_path(self) -> String {
        format!("/{}", self.prefix())
    }

    /// Parse a listed common prefix such as `deploys/v12/`.
    pub fn from_prefix(prefix: &str) -> Result<Self, VersionError> {
        let digits = prefix
            .strip_prefix(DEPLOY_ROOT)
            .and_then(|rest| rest.strip_prefix('v'))
            .map(|rest| rest.strip_suffix('/').unwrap_or(rest))
            .ok_or_else(|| VersionError::NotAPrefix(prefix.to_string()))?;
        digits.parse()
    }
}

impl FromStr for DeployVersion {
    type Err = VersionError;

    /// Canonical base-10 form only: no sign, no leading zeros, no zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || VersionError::InvalidNumber(s.to_string());
        if s.is_empty() || s.starts_with('0') || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for DeployVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl Serialize for DeployVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.get())
    }
}

/// An immutable published function version, or the mutable head.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionVersion {
    Published(u64),
    Latest,
}

impl FunctionVersion {
    pub fn is_published(self) -> bool {
        matches!(self, FunctionVersion::Published(_))
    }

    /// Identifier the function platform expects.
    pub fn to_platform_string(self) -> String {
        match self {
            FunctionVersion::Published(n) => n.to_string(),
            FunctionVersion::Latest => LATEST_FUNCTION_VERSION.to_string(),
        }
    }
}

impl FromStr for FunctionVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LATEST_FUNCTION_VERSION {
            return Ok(FunctionVersion::Latest);
        }
        s.parse()
            .map(FunctionVersion::Published)
            .map_err(|_| VersionError::InvalidNumber(s.to_string()))
    }
}

impl fmt::Display for FunctionVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionVersion::Published(n) => write!(f, "v{n}"),
            FunctionVersion::Latest => f.write_str(LATEST_FUNCTION_VERSION),
        }
    }
}

impl Serialize for FunctionVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_platform_string())
    }
}
