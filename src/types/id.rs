// ABOUTME: Phantom-typed cloud resource identifiers.
// ABOUTME: Keeps bucket names, distribution ids, parameter names, and function names apart.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

pub enum BucketMarker {}
pub enum DistributionMarker {}
pub enum ParameterMarker {}
pub enum FunctionMarker {}

/// Identifier of a remote resource whose kind is fixed by `K`.
///
/// The marker is never instantiated; it only stops a `BucketName` from being
/// handed to an API that expects a `DistributionId`.
#[must_use = "identifiers name remote resources and should not be ignored"]
pub struct Id<K> {
    value: String,
    _kind: PhantomData<K>,
}

impl<K> Id<K> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _kind: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// Hand-written so that `K` needs no bounds.

impl<K> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone())
    }
}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<K> Serialize for Id<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, K> Deserialize<'de> for Id<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

/// Object storage bucket holding the versioned frontend prefixes.
pub type BucketName = Id<BucketMarker>;
/// CDN distribution whose origin path selects the active version.
pub type DistributionId = Id<DistributionMarker>;
/// Parameter store key holding the current version pointer.
pub type ParameterName = Id<ParameterMarker>;
/// Serverless function name.
pub type FunctionName = Id<FunctionMarker>;
