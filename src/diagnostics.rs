// ABOUTME: Non-fatal warnings gathered while a command runs.
// ABOUTME: Commands report them once at the end, whether the run succeeded or not.

use crate::output::Output;
use crate::types::DistributionId;

/// Warnings raised during one command, in the order they occurred.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record `warning`; it is also logged at `warn` level right away.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Print every collected warning to the operator.
    pub fn report(&self, output: &Output) {
        for warning in &self.warnings {
            output.warning(&warning.message);
        }
    }
}

/// A non-fatal warning collected during a run.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// A prefix under the deploy root that is not a version; it is left in place.
    pub fn skipped_prefix(prefix: &str) -> Self {
        Self {
            kind: WarningKind::SkippedPrefix,
            message: format!("ignoring {prefix}: not a deploy version prefix, left untouched"),
        }
    }

    /// The frontend stack exports no public URL for `distribution`.
    pub fn missing_url(distribution: &DistributionId) -> Self {
        Self {
            kind: WarningKind::MissingUrl,
            message: format!("no DistributionUrl output for distribution {distribution}"),
        }
    }
}

/// Categories of warnings that can occur during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Unrecognised prefix found while listing versions.
    SkippedPrefix,
    /// The stack has no URL to show after a deploy.
    MissingUrl,
}
