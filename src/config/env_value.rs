// ABOUTME: Config values that are either literals or environment variable references.
// ABOUTME: Resolution goes through a lookup function so tests need not touch the process env.

use crate::error::{Error, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EnvValue {
    Literal(String),
    FromEnv {
        #[serde(rename = "env")]
        var: String,
        #[serde(default)]
        default: Option<String>,
    },
}

impl EnvValue {
    pub fn resolve_with(&self, lookup: &impl Fn(&str) -> Option<String>) -> Result<String> {
        match self {
            EnvValue::Literal(s) => Ok(s.clone()),
            EnvValue::FromEnv { var, default } => lookup(var)
                .or_else(|| default.clone())
                .ok_or_else(|| Error::MissingEnvVar(var.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn literal_resolves_to_itself() {
        let v = EnvValue::Literal("eu-west-1".to_string());
        assert_eq!(v.resolve_with(&no_env).unwrap(), "eu-west-1");
    }

    #[test]
    fn env_reference_falls_back_to_default() {
        let v: EnvValue = serde_yaml::from_str("{ env: REGION, default: us-east-1 }").unwrap();
        assert_eq!(v.resolve_with(&no_env).unwrap(), "us-east-1");
    }

    #[test]
    fn env_reference_without_default_errors() {
        let v: EnvValue = serde_yaml::from_str("{ env: ACCOUNT }").unwrap();
        assert!(matches!(
            v.resolve_with(&no_env),
            Err(Error::MissingEnvVar(var)) if var == "ACCOUNT"
        ));
    }
}
