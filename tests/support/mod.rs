// ABOUTME: Test support utilities.
// ABOUTME: In-memory cloud that records every remote call in order.

use async_trait::async_trait;
use parking_lot::Mutex;
use stagehand::cloud::{
    CdnError, Cloud, DistributionConfig, DistributionOps, FunctionError, FunctionOps, ListPage,
    MAX_DELETE_BATCH, ObjectStore, ObjectStoreError, ParameterError, ParameterStore,
    PublishedVersion, StackOps, StackOpsError, TaggedConfig,
};
use stagehand::release::FrontendTarget;
use stagehand::types::{
    BucketName, DistributionId, FunctionName, FunctionVersion, ParameterName,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::Once;

pub const BUCKET: &str = "shop-frontend-prod";
pub const DISTRIBUTION: &str = "E2QWRUHAPOMQZL";
pub const VERSION_PARAMETER: &str = "/shop/prod/frontend-version";
pub const STACK: &str = "FrontendStack-prod";
pub const URL: &str = "https://d111111abcdef8.cloudfront.net";

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("stagehand=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One remote call, as seen by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Call {
    PutObject(String),
    ListPrefixes,
    ListKeys(String),
    DeleteObjects(usize),
    GetParameter,
    PutParameter(String),
    GetDistributionConfig,
    UpdateDistribution(String),
    CreateInvalidation(Vec<String>),
    ListFunctions,
    ListVersions(String),
    GetAlias(String),
    UpdateAlias(String, String),
    StackOutputs(String),
}

/// Remote operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Fail {
    Upload,
    GetParameter,
    UpdateDistribution,
    ConcurrentEdit,
    Invalidate,
    Delete,
}

#[derive(Debug, Clone)]
pub struct FakeConfig {
    pub origin_path: Option<String>,
}

impl DistributionConfig for FakeConfig {
    fn primary_origin_path(&self) -> Option<&str> {
        self.origin_path.as_deref()
    }

    fn set_primary_origin_path(&mut self, path: &str) -> bool {
        match &mut self.origin_path {
            Some(current) => {
                *current = path.to_string();
                true
            }
            None => false,
        }
    }
}

#[derive(Default)]
pub struct World {
    pub objects: BTreeMap<String, (Vec<u8>, String)>,
    pub parameters: HashMap<String, String>,
    /// `None` models a distribution without origins.
    pub origin_path: Option<String>,
    pub etag: u64,
    pub functions: Vec<FunctionName>,
    pub versions: HashMap<String, Vec<PublishedVersion>>,
    pub aliases: HashMap<String, FunctionVersion>,
    pub stacks: HashMap<String, HashMap<String, String>>,
    pub calls: Vec<Call>,
    pub fail: Option<Fail>,
}

/// In-memory stand-in for every cloud capability. Listings are paged two
/// items at a time so callers must follow continuation tokens.
pub struct FakeCloud {
    world: Mutex<World>,
}

const PAGE_SIZE: usize = 2;

fn page<T: Clone>(items: &[T], token: Option<String>) -> ListPage<T> {
    let start: usize = token.map(|t| t.parse().unwrap()).unwrap_or(0);
    let end = (start + PAGE_SIZE).min(items.len());
    ListPage {
        items: items[start..end].to_vec(),
        next: (end < items.len()).then(|| end.to_string()),
    }
}

#[allow(dead_code)]
impl FakeCloud {
    /// A provisioned stage with nothing deployed yet.
    pub fn new() -> Self {
        let outputs = HashMap::from([
            ("BucketName".to_string(), BUCKET.to_string()),
            ("DistributionId".to_string(), DISTRIBUTION.to_string()),
            ("VersionParameterName".to_string(), VERSION_PARAMETER.to_string()),
            ("DistributionUrl".to_string(), URL.to_string()),
        ]);
        Self {
            world: Mutex::new(World {
                origin_path: Some(String::new()),
                stacks: HashMap::from([(STACK.to_string(), outputs)]),
                ..World::default()
            }),
        }
    }

    /// Stage where versions `1..=n` were deployed and `active` is live.
    pub fn with_versions(numbers: &[u64], active: u64) -> Self {
        let cloud = Self::new();
        cloud.seed_versions(numbers);
        cloud.with(|w| {
            w.origin_path = Some(format!("/deploys/v{active}"));
            w.parameters
                .insert(VERSION_PARAMETER.to_string(), active.to_string());
        });
        cloud
    }

    pub fn seed_versions(&self, numbers: &[u64]) {
        self.with(|w| {
            for n in numbers {
                for file in ["index.html", "assets/app.js", "assets/app.css"] {
                    w.objects.insert(
                        format!("deploys/v{n}/{file}"),
                        (Vec::new(), "text/plain".to_string()),
                    );
                }
            }
        });
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut World) -> R) -> R {
        f(&mut self.world.lock())
    }

    pub fn target() -> FrontendTarget {
        FrontendTarget {
            bucket: BucketName::new(BUCKET),
            distribution: DistributionId::new(DISTRIBUTION),
            version_parameter: ParameterName::new(VERSION_PARAMETER),
            url: Some(URL.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with(|w| w.calls.clone())
    }

    pub fn clear_calls(&self) {
        self.with(|w| w.calls.clear());
    }

    /// Calls that change remote state.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::PutObject(_)
                        | Call::DeleteObjects(_)
                        | Call::PutParameter(_)
                        | Call::UpdateDistribution(_)
                        | Call::CreateInvalidation(_)
                        | Call::UpdateAlias(..)
                )
            })
            .collect()
    }

    pub fn fail(&self, fail: Fail) {
        self.with(|w| w.fail = Some(fail));
    }

    pub fn version_parameter(&self) -> Option<String> {
        self.with(|w| w.parameters.get(VERSION_PARAMETER).cloned())
    }

    pub fn origin_path(&self) -> Option<String> {
        self.with(|w| w.origin_path.clone())
    }

    /// Versions with at least one object in storage, ascending.
    pub fn stored_versions(&self) -> Vec<u64> {
        let mut versions: Vec<u64> = self.with(|w| {
            w.objects
                .keys()
                .filter_map(|k| k.strip_prefix("deploys/v")?.split('/').next()?.parse().ok())
                .collect()
        });
        versions.sort_unstable();
        versions.dedup();
        versions
    }

    pub fn object(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.with(|w| w.objects.get(key).cloned())
    }

    pub fn add_function(&self, name: &str, published: &[u64], alias: Option<u64>) {
        self.with(|w| {
            w.functions.push(FunctionName::new(name));
            let mut versions = vec![PublishedVersion {
                version: FunctionVersion::Latest,
                description: String::new(),
                last_modified: None,
            }];
            versions.extend(published.iter().map(|&n| PublishedVersion {
                version: FunctionVersion::Published(n),
                description: format!("build {n}"),
                last_modified: None,
            }));
            w.versions.insert(name.to_string(), versions);
            if let Some(n) = alias {
                w.aliases
                    .insert(name.to_string(), FunctionVersion::Published(n));
            }
        });
    }

    pub fn alias(&self, name: &str) -> Option<FunctionVersion> {
        self.with(|w| w.aliases.get(name).copied())
    }
}

impl World {
    fn failing(&self, fail: Fail) -> bool {
        self.fail == Some(fail)
    }
}

#[async_trait]
impl ObjectStore for FakeCloud {
    async fn put_object(
        &self,
        _bucket: &BucketName,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        let mut w = self.world.lock();
        w.calls.push(Call::PutObject(key.to_string()));
        if w.failing(Fail::Upload) {
            return Err(ObjectStoreError::Upload {
                key: key.to_string(),
                message: "connection reset".to_string(),
            });
        }
        w.objects
            .insert(key.to_string(), (body, content_type.to_string()));
        Ok(())
    }

    async fn list_prefixes(
        &self,
        _bucket: &BucketName,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage<String>, ObjectStoreError> {
        let mut w = self.world.lock();
        w.calls.push(Call::ListPrefixes);
        let mut prefixes: Vec<String> = w
            .objects
            .keys()
            .filter_map(|key| {
                let rest = key.strip_prefix(prefix)?;
                let (head, _) = rest.split_once('/')?;
                Some(format!("{prefix}{head}/"))
            })
            .collect();
        prefixes.dedup();
        Ok(page(&prefixes, continuation))
    }

    async fn list_keys(
        &self,
        _bucket: &BucketName,
        prefix: &str,
        continuation: Option<String>,
    ) -> Result<ListPage<String>, ObjectStoreError> {
        let mut w = self.world.lock();
        w.calls.push(Call::ListKeys(prefix.to_string()));
        let keys: Vec<String> = w
            .objects
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();
        Ok(page(&keys, continuation))
    }

    async fn delete_objects(
        &self,
        _bucket: &BucketName,
        keys: &[String],
    ) -> Result<(), ObjectStoreError> {
        let mut w = self.world.lock();
        w.calls.push(Call::DeleteObjects(keys.len()));
        if keys.len() > MAX_DELETE_BATCH {
            return Err(ObjectStoreError::BatchTooLarge(keys.len()));
        }
        if w.failing(Fail::Delete) {
            return Err(ObjectStoreError::Delete {
                requested: keys.len(),
                failed: keys.len(),
                message: "access denied".to_string(),
            });
        }
        for key in keys {
            w.objects.remove(key);
        }
        Ok(())
    }
}

#[async_trait]
impl ParameterStore for FakeCloud {
    async fn get_parameter(&self, name: &ParameterName) -> Result<String, ParameterError> {
        let mut w = self.world.lock();
        w.calls.push(Call::GetParameter);
        if w.failing(Fail::GetParameter) {
            return Err(ParameterError::Remote("throttled".to_string()));
        }
        w.parameters
            .get(name.as_str())
            .cloned()
            .ok_or_else(|| ParameterError::NotFound(name.to_string()))
    }

    async fn put_parameter(&self, name: &ParameterName, value: &str) -> Result<(), ParameterError> {
        let mut w = self.world.lock();
        w.calls.push(Call::PutParameter(value.to_string()));
        w.parameters
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[async_trait]
impl DistributionOps for FakeCloud {
    type Config = FakeConfig;

    async fn get_distribution_config(
        &self,
        _id: &DistributionId,
    ) -> Result<TaggedConfig<FakeConfig>, CdnError> {
        let mut w = self.world.lock();
        w.calls.push(Call::GetDistributionConfig);
        let tagged = TaggedConfig {
            config: FakeConfig {
                origin_path: w.origin_path.clone(),
            },
            etag: format!("E{}", w.etag),
        };
        if w.failing(Fail::ConcurrentEdit) {
            // Someone else updates between our read and write.
            w.etag += 1;
        }
        Ok(tagged)
    }

    async fn update_distribution(
        &self,
        id: &DistributionId,
        config: FakeConfig,
        if_match: &str,
    ) -> Result<(), CdnError> {
        let mut w = self.world.lock();
        w.calls.push(Call::UpdateDistribution(
            config.origin_path.clone().unwrap_or_default(),
        ));
        if w.failing(Fail::UpdateDistribution) {
            return Err(CdnError::Remote("service unavailable".to_string()));
        }
        if if_match != format!("E{}", w.etag) {
            return Err(CdnError::PreconditionFailed(id.to_string()));
        }
        w.origin_path = config.origin_path;
        w.etag += 1;
        Ok(())
    }

    async fn create_invalidation(
        &self,
        _id: &DistributionId,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<String, CdnError> {
        let mut w = self.world.lock();
        w.calls.push(Call::CreateInvalidation(paths.to_vec()));
        if w.failing(Fail::Invalidate) {
            return Err(CdnError::Remote("too many invalidations".to_string()));
        }
        Ok(format!("I{caller_reference}"))
    }
}

#[async_trait]
impl FunctionOps for FakeCloud {
    async fn list_functions(
        &self,
        marker: Option<String>,
    ) -> Result<ListPage<FunctionName>, FunctionError> {
        let mut w = self.world.lock();
        w.calls.push(Call::ListFunctions);
        Ok(page(&w.functions, marker))
    }

    async fn list_versions(
        &self,
        function: &FunctionName,
        marker: Option<String>,
    ) -> Result<ListPage<PublishedVersion>, FunctionError> {
        let mut w = self.world.lock();
        w.calls.push(Call::ListVersions(function.to_string()));
        let versions = w.versions.get(function.as_str()).cloned().unwrap_or_default();
        Ok(page(&versions, marker))
    }

    async fn get_alias(
        &self,
        function: &FunctionName,
        alias: &str,
    ) -> Result<FunctionVersion, FunctionError> {
        let mut w = self.world.lock();
        w.calls.push(Call::GetAlias(function.to_string()));
        w.aliases
            .get(function.as_str())
            .copied()
            .ok_or_else(|| FunctionError::AliasNotFound {
                function: function.to_string(),
                alias: alias.to_string(),
            })
    }

    async fn update_alias(
        &self,
        function: &FunctionName,
        _alias: &str,
        version: FunctionVersion,
    ) -> Result<(), FunctionError> {
        let mut w = self.world.lock();
        w.calls.push(Call::UpdateAlias(
            function.to_string(),
            version.to_platform_string(),
        ));
        w.aliases.insert(function.to_string(), version);
        Ok(())
    }
}

#[async_trait]
impl StackOps for FakeCloud {
    async fn stack_outputs(
        &self,
        stack_name: &str,
    ) -> Result<HashMap<String, String>, StackOpsError> {
        let mut w = self.world.lock();
        w.calls.push(Call::StackOutputs(stack_name.to_string()));
        w.stacks
            .get(stack_name)
            .cloned()
            .ok_or_else(|| StackOpsError::NotFound(stack_name.to_string()))
    }
}

impl Cloud for FakeCloud {
    type Objects = Self;
    type Parameters = Self;
    type Cdn = Self;
    type Functions = Self;
    type Stacks = Self;

    fn objects(&self) -> &Self {
        self
    }

    fn parameters(&self) -> &Self {
        self
    }

    fn cdn(&self) -> &Self {
        self
    }

    fn functions(&self) -> &Self {
        self
    }

    fn stacks(&self) -> &Self {
        self
    }
}
