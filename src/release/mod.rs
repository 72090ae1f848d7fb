// ABOUTME: Versioned frontend releases and function alias management.
// ABOUTME: Exports the release components and the type state deploy pipeline.

mod aliases;
mod catalog;
mod error;
mod invalidation;
mod lifecycle;
mod origin;
mod pipeline;
mod publisher;
mod retention;
mod state;
mod target;
mod transitions;
mod version_store;

pub use aliases::{FunctionAliasManager, FunctionCandidate, belongs_to};
pub use catalog::{VersionListing, list_deploy_versions};
pub use error::{ReleaseError, ReleaseErrorKind};
pub use invalidation::{CacheInvalidator, INVALIDATE_ALL, caller_reference};
pub use lifecycle::{Release, ReleaseSummary};
pub use origin::{OriginChange, OriginSwitcher};
pub use pipeline::{DeployReport, deploy_frontend, ensure_build_output};
pub use publisher::{
    ContentPublisher, FALLBACK_CONTENT_TYPE, PlannedUpload, PublishSummary, content_type_for,
    plan_uploads,
};
pub use retention::{CleanupReport, RetentionCleaner, split_retained};
pub use state::{Allocated, Committed, Live, Planned, Published, Switched, Versioned};
pub use target::FrontendTarget;
pub use version_store::VersionStore;
