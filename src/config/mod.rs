// ABOUTME: Configuration discovery, parsing, and validation.
// ABOUTME: Merges an optional stagehand.yml with environment variables and CLI overrides.

mod env_value;
mod retention;

pub use env_value::EnvValue;
pub use retention::Retention;

use crate::cloud::aws::AwsTarget;
use crate::error::{Error, Result};
use crate::types::{AppName, Stage};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "stagehand.yml";
pub const CONFIG_FILENAME_ALT: &str = "stagehand.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".stagehand/config.yml";

pub const DEFAULT_BUILD_DIR: &str = "packages/frontend/dist";

/// Environment variables read during resolution. Later entries in each list
/// are fallbacks for earlier ones.
pub mod vars {
    pub const APP_NAME: &str = "APP_NAME";
    pub const STAGE: &str = "STAGE";
    pub const VERSIONS_TO_KEEP: &str = "VERSIONS_TO_KEEP";
    pub const ACCOUNT: &[&str] = &["AWS_ACCOUNT_ID", "CDK_DEFAULT_ACCOUNT"];
    pub const REGION: &[&str] = &["AWS_REGION", "AWS_DEFAULT_REGION", "CDK_DEFAULT_REGION"];
    pub const PROFILE: &str = "AWS_PROFILE";
    pub const BUILD_DIR: &str = "STAGEHAND_BUILD_DIR";
}

/// Contents of `stagehand.yml`. Every field is optional; the environment may
/// supply whatever the file leaves out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub app: Option<String>,

    #[serde(default)]
    pub stage: Option<String>,

    #[serde(default)]
    pub account: Option<EnvValue>,

    #[serde(default)]
    pub region: Option<EnvValue>,

    #[serde(default)]
    pub profile: Option<EnvValue>,

    #[serde(default)]
    pub retention: Option<Retention>,

    #[serde(default)]
    pub build_dir: Option<PathBuf>,

    #[serde(default)]
    pub frontend_stack: Option<String>,
}

impl ConfigFile {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    /// Find and parse a config file in `dir`. Absence is not an error.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        match candidates.iter().find(|path| path.exists()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config file");
                let content = std::fs::read_to_string(path)?;
                Self::from_yaml(&content).map(Some)
            }
            None => Ok(None),
        }
    }
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub stage: Option<String>,
    pub build_dir: Option<PathBuf>,
}

impl Overrides {
    pub fn for_stage(stage: Option<String>) -> Self {
        Self {
            stage,
            build_dir: None,
        }
    }
}

/// Fully resolved and validated configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppName,
    pub stage: Stage,
    pub account: String,
    pub region: String,
    pub profile: Option<String>,
    pub retention: Retention,
    /// Local frontend build output, absolute or relative to the working directory.
    pub build_dir: PathBuf,
    /// Stack whose outputs name the bucket, distribution, and version parameter.
    pub frontend_stack: String,
}

impl Config {
    /// Load configuration for a run started in `dir` from the process environment.
    pub fn load(dir: &Path, overrides: &Overrides) -> Result<Self> {
        let file = ConfigFile::discover(dir)?.unwrap_or_default();
        let mut config = Self::resolve(file, |name| std::env::var(name).ok(), overrides)?;
        if config.build_dir.is_relative() {
            config.build_dir = dir.join(&config.build_dir);
        }
        Ok(config)
    }

    /// Merge file, environment (through `lookup`), and overrides, then validate.
    pub fn resolve(
        file: ConfigFile,
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &Overrides,
    ) -> Result<Self> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let first_of = |names: &[&str]| names.iter().find_map(|name| non_empty(name));

        let app = non_empty(vars::APP_NAME)
            .or(file.app)
            .ok_or(Error::MissingConfig(vars::APP_NAME))?;
        let app = AppName::new(&app).map_err(|e| Error::InvalidConfig(e.to_string()))?;

        let stage = match overrides
            .stage
            .clone()
            .or_else(|| non_empty(vars::STAGE))
            .or(file.stage)
        {
            Some(stage) => Stage::new(&stage).map_err(|e| Error::InvalidConfig(e.to_string()))?,
            None => Stage::default(),
        };

        let account = match first_of(vars::ACCOUNT) {
            Some(account) => account,
            None => file
                .account
                .as_ref()
                .map(|v| v.resolve_with(&lookup))
                .transpose()?
                .ok_or(Error::MissingConfig(vars::ACCOUNT[0]))?,
        };

        let region = match first_of(vars::REGION) {
            Some(region) => region,
            None => file
                .region
                .as_ref()
                .map(|v| v.resolve_with(&lookup))
                .transpose()?
                .ok_or(Error::MissingConfig(vars::REGION[0]))?,
        };

        let profile = match non_empty(vars::PROFILE) {
            Some(profile) => Some(profile),
            None => file
                .profile
                .as_ref()
                .map(|v| v.resolve_with(&lookup))
                .transpose()?,
        };

        let retention = match lookup(vars::VERSIONS_TO_KEEP) {
            Some(raw) => Retention::parse_lenient(&raw),
            None => file.retention.unwrap_or_default(),
        };

        let build_dir = overrides
            .build_dir
            .clone()
            .or_else(|| non_empty(vars::BUILD_DIR).map(PathBuf::from))
            .or(file.build_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));

        let frontend_stack = file
            .frontend_stack
            .unwrap_or_else(|| format!("FrontendStack-{stage}"));

        Ok(Config {
            app,
            stage,
            account,
            region,
            profile,
            retention,
            build_dir,
            frontend_stack,
        })
    }

    /// Rollback needs a version history; the unversioned stage has none.
    pub fn ensure_versioned_stage(&self) -> Result<()> {
        if self.stage.is_versioned() {
            Ok(())
        } else {
            Err(Error::UnversionedStage(self.stage.to_string()))
        }
    }

    pub fn aws_target(&self) -> AwsTarget {
        AwsTarget {
            region: self.region.clone(),
            profile: self.profile.clone(),
        }
    }
}
