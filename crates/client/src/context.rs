// Path: crates/client/src/context.rs
//! Per-call resolution of the caller's signing identity and network topology.

use async_trait::async_trait;
use dashmap::DashMap;
use ledgerops_api::identity::{IdentityProvider, SigningIdentity};
use ledgerops_api::topology::TopologyResolver;
use ledgerops_types::app::Topology;
use ledgerops_types::config::OrchestratorConfig;
use ledgerops_types::error::ResolveError;
use std::sync::Arc;

/// Everything a single operation needs from its collaborators: who signs, and
/// which peers and orderer serve the organization on the requested channel.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// The identity that signs the operation's proposals.
    pub signer: Arc<dyn SigningIdentity>,
    /// The organization's endpoints, narrowed to the channel when one was given.
    pub topology: Topology,
}

/// Resolves a [`CallContext`] for an organization, user and optional channel.
#[async_trait]
pub trait ContextResolver: Send + Sync + std::fmt::Debug {
    /// Resolves identity and topology. Misconfiguration is reported, never fatal.
    async fn resolve(
        &self,
        org: &str,
        user: &str,
        channel: Option<&str>,
    ) -> Result<CallContext, ResolveError>;
}

/// Resolves both collaborators on every call.
#[derive(Debug, Clone)]
pub struct DirectResolver {
    identities: Arc<dyn IdentityProvider>,
    topology: Arc<dyn TopologyResolver>,
}

impl DirectResolver {
    /// Creates a resolver over the given collaborators.
    pub fn new(identities: Arc<dyn IdentityProvider>, topology: Arc<dyn TopologyResolver>) -> Self {
        Self {
            identities,
            topology,
        }
    }
}

#[async_trait]
impl ContextResolver for DirectResolver {
    async fn resolve(
        &self,
        org: &str,
        user: &str,
        channel: Option<&str>,
    ) -> Result<CallContext, ResolveError> {
        let signer = self.identities.resolve_identity(org, user).await?;
        let topology = self.topology.resolve_topology(org, channel).await?;
        Ok(CallContext { signer, topology })
    }
}

type CacheKey = (String, String, Option<String>);

/// Memoizes resolved contexts per `(org, user, channel)` until invalidated.
#[derive(Debug)]
pub struct CachedResolver {
    inner: DirectResolver,
    entries: DashMap<CacheKey, CallContext>,
}

impl CachedResolver {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: DirectResolver) -> Self {
        Self {
            inner,
            entries: DashMap::new(),
        }
    }

    /// Drops every cached context of `org`.
    pub fn invalidate(&self, org: &str) {
        self.entries.retain(|(o, _, _), _| o != org);
        tracing::debug!(target: "lifecycle", org, "Invalidated cached contexts");
    }

    /// Drops every cached context.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached contexts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl ContextResolver for CachedResolver {
    async fn resolve(
        &self,
        org: &str,
        user: &str,
        channel: Option<&str>,
    ) -> Result<CallContext, ResolveError> {
        let key = (org.to_string(), user.to_string(), channel.map(str::to_string));
        // Clone out so no shard guard is held across the await below.
        let hit = self.entries.get(&key).map(|entry| entry.value().clone());
        if let Some(ctx) = hit {
            return Ok(ctx);
        }
        let ctx = self.inner.resolve(org, user, channel).await?;
        self.entries.insert(key, ctx.clone());
        Ok(ctx)
    }
}

/// Builds the resolver `config` asks for.
pub fn resolver_for(
    config: &OrchestratorConfig,
    identities: Arc<dyn IdentityProvider>,
    topology: Arc<dyn TopologyResolver>,
) -> Arc<dyn ContextResolver> {
    let direct = DirectResolver::new(identities, topology);
    if config.cache_contexts {
        Arc::new(CachedResolver::new(direct))
    } else {
        Arc::new(direct)
    }
}
