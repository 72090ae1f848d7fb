// ABOUTME: Capability traits for the remote services a release touches.
// ABOUTME: Object storage, parameter store, CDN, function platform, and stack outputs.

pub mod aws;
mod distribution;
mod functions;
mod objects;
mod parameters;
mod stacks;

pub use distribution::{CdnError, DistributionConfig, DistributionOps, TaggedConfig};
pub use functions::{FunctionError, FunctionOps, PublishedVersion};
pub use objects::{MAX_DELETE_BATCH, ObjectStore, ObjectStoreError};
pub use parameters::{ParameterError, ParameterStore};
pub use stacks::{StackOps, StackOpsError};

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    /// Token for the next page; `None` on the last page.
    pub next: Option<String>,
}

impl<T> ListPage<T> {
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }
}

/// Every remote capability one run needs, bundled so commands and the
/// release pipeline can be driven by real clients or in-memory fakes.
pub trait Cloud: Send + Sync {
    type Objects: ObjectStore;
    type Parameters: ParameterStore;
    type Cdn: DistributionOps;
    type Functions: FunctionOps;
    type Stacks: StackOps;

    fn objects(&self) -> &Self::Objects;
    fn parameters(&self) -> &Self::Parameters;
    fn cdn(&self) -> &Self::Cdn;
    fn functions(&self) -> &Self::Functions;
    fn stacks(&self) -> &Self::Stacks;
}
