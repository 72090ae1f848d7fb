// ABOUTME: Number of frontend versions kept in storage.
// ABOUTME: Lenient parsing: anything that is not a positive integer means the default.

use serde::{Deserialize, Deserializer};
use std::fmt;
use std::num::NonZeroUsize;

const DEFAULT_COUNT: NonZeroUsize = match NonZeroUsize::new(Retention::DEFAULT) {
    Some(count) => count,
    None => panic!("default retention must be positive"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retention(NonZeroUsize);

impl Retention {
    pub const DEFAULT: usize = 5;

    pub fn new(count: usize) -> Option<Self> {
        NonZeroUsize::new(count).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }

    /// Parse an operator-supplied value, falling back to [`Retention::DEFAULT`].
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().parse::<usize>().ok().and_then(Self::new) {
            Some(retention) => retention,
            None => {
                tracing::warn!(
                    value = raw,
                    "invalid retention count, keeping {} versions",
                    Self::DEFAULT
                );
                Self::default()
            }
        }
    }
}

impl Default for Retention {
    fn default() -> Self {
        Self(DEFAULT_COUNT)
    }
}

impl fmt::Display for Retention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Retention {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self::parse_lenient(&n.to_string()),
            Raw::Text(s) => Self::parse_lenient(&s),
        })
    }
}
