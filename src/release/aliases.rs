// ABOUTME: Stage aliases over immutable function versions.
// ABOUTME: Lists an app's functions and versions, resolves and repoints the stage alias.

use super::ReleaseError;
use crate::cloud::{FunctionError, FunctionOps, PublishedVersion};
use crate::types::{AppName, FunctionName, FunctionVersion, Stage};

/// A published function version, marked when the stage alias points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCandidate {
    pub version: PublishedVersion,
    pub is_current: bool,
}

impl FunctionCandidate {
    pub fn number(&self) -> u64 {
        match self.version.version {
            FunctionVersion::Published(n) => n,
            FunctionVersion::Latest => 0,
        }
    }
}

/// Whether `name` belongs to `app` in `stage`, e.g. `shop-orders-prod`.
pub fn belongs_to(name: &FunctionName, app: &AppName, stage: &Stage) -> bool {
    let name = name.as_str();
    name.starts_with(&format!("{app}-")) && name.contains(&format!("-{stage}"))
}

/// Manages the alias named after the stage on each of the app's functions.
pub struct FunctionAliasManager<'a, F> {
    functions: &'a F,
    stage: &'a Stage,
}

impl<'a, F: FunctionOps> FunctionAliasManager<'a, F> {
    pub fn new(functions: &'a F, stage: &'a Stage) -> Self {
        Self { functions, stage }
    }

    /// All functions of `app` deployed to this stage, in listing order.
    pub async fn list_app_functions(
        &self,
        app: &AppName,
    ) -> Result<Vec<FunctionName>, ReleaseError> {
        let mut names = Vec::new();
        let mut marker = None;
        loop {
            let page = self.functions.list_functions(marker).await?;
            names.extend(
                page.items
                    .into_iter()
                    .filter(|name| belongs_to(name, app, self.stage)),
            );
            match page.next {
                Some(next) => marker = Some(next),
                None => break,
            }
        }
        Ok(names)
    }

    /// Version the stage alias targets; `$LATEST` when no alias exists yet.
    pub async fn current_alias_target(
        &self,
        function: &FunctionName,
    ) -> Result<FunctionVersion, ReleaseError> {
        match self.functions.get_alias(function, self.stage.as_str()).await {
            Ok(version) => Ok(version),
            Err(FunctionError::AliasNotFound { .. }) => {
                tracing::debug!(%function, stage = %self.stage, "no alias yet, using $LATEST");
                Ok(FunctionVersion::Latest)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Published versions, highest first, with the aliased one marked.
    ///
    /// The mutable `$LATEST` head is left out; it cannot be rolled back to
    /// reproducibly.
    pub async fn list_versions(
        &self,
        function: &FunctionName,
    ) -> Result<Vec<FunctionCandidate>, ReleaseError> {
        let current = self.current_alias_target(function).await?;

        let mut candidates = Vec::new();
        let mut marker = None;
        loop {
            let page = self.functions.list_versions(function, marker).await?;
            candidates.extend(
                page.items
                    .into_iter()
                    .filter(|v| v.version.is_published())
                    .map(|v| FunctionCandidate {
                        is_current: v.version == current,
                        version: v,
                    }),
            );
            match page.next {
                Some(next) => marker = Some(next),
                None => break,
            }
        }

        candidates.sort_by_key(|c| std::cmp::Reverse(c.number()));
        Ok(candidates)
    }

    /// Point the stage alias at `version`. Last writer wins.
    pub async fn repoint_alias(
        &self,
        function: &FunctionName,
        version: FunctionVersion,
    ) -> Result<(), ReleaseError> {
        tracing::debug!(%function, stage = %self.stage, %version, "updating alias");
        self.functions
            .update_alias(function, self.stage.as_str(), version)
            .await?;
        Ok(())
    }
}
