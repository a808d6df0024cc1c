use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use genres_config::CacheConfig;
use genres_types::{ClassDecl, ClassId, DeclProvider, MemberId, TypeRef};
use parking_lot::RwLock;

use crate::member::resolve_member_in;
use crate::{build_context, BindingContext, Result};

/// Thread-safe memoization of declarations, binding contexts and member types.
///
/// Entries are never evicted: declaration graphs are immutable for the life of the provider.
/// Lookups take a read lock; a miss computes without holding any lock and then publishes under
/// a short write lock. When two threads miss on the same key, both compute, the first value
/// published is kept and returned to both.
pub struct ResolutionCache {
    provider: Arc<dyn DeclProvider>,
    config: CacheConfig,
    declarations: RwLock<HashMap<ClassId, Option<Arc<ClassDecl>>>>,
    contexts: RwLock<HashMap<TypeRef, Arc<BindingContext>>>,
    members: RwLock<HashMap<(TypeRef, MemberId), TypeRef>>,
    counters: Counters,
}

impl fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionCache")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Point-in-time hit/miss counters of a [`ResolutionCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub declaration_hits: u64,
    pub declaration_misses: u64,
    pub context_hits: u64,
    pub context_misses: u64,
    pub member_hits: u64,
    pub member_misses: u64,
}

#[derive(Debug, Default)]
struct Counters {
    declaration_hits: AtomicU64,
    declaration_misses: AtomicU64,
    context_hits: AtomicU64,
    context_misses: AtomicU64,
    member_hits: AtomicU64,
    member_misses: AtomicU64,
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl ResolutionCache {
    pub fn new(provider: Arc<dyn DeclProvider>) -> Self {
        Self::with_config(provider, CacheConfig::default())
    }

    pub fn with_config(provider: Arc<dyn DeclProvider>, config: CacheConfig) -> Self {
        Self {
            provider,
            config,
            declarations: RwLock::new(HashMap::new()),
            contexts: RwLock::new(HashMap::new()),
            members: RwLock::new(HashMap::new()),
            counters: Counters::default(),
        }
    }

    /// The declaration of `id`, fetched from the provider on first use.
    pub fn get_declaration(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        if !self.config.memoize_declarations {
            bump(&self.counters.declaration_misses);
            return self.provider.class_decl(id);
        }

        if let Some(decl) = self.declarations.read().get(id) {
            bump(&self.counters.declaration_hits);
            return decl.clone();
        }

        bump(&self.counters.declaration_misses);
        let decl = self.provider.class_decl(id);
        self.declarations
            .write()
            .entry(id.clone())
            .or_insert(decl)
            .clone()
    }

    /// The binding context of `leaf`, built on first use. Failures are not memoized.
    pub fn get_context(&self, leaf: &TypeRef) -> Result<Arc<BindingContext>> {
        if !self.config.memoize_contexts {
            bump(&self.counters.context_misses);
            return build_context(leaf, self).map(Arc::new);
        }

        if let Some(ctx) = self.contexts.read().get(leaf) {
            bump(&self.counters.context_hits);
            return Ok(ctx.clone());
        }

        bump(&self.counters.context_misses);
        let built = Arc::new(build_context(leaf, self)?);
        let mut contexts = self.contexts.write();
        let retained = contexts.entry(leaf.clone()).or_insert_with(|| built.clone());
        if !Arc::ptr_eq(retained, &built) {
            tracing::debug!(
                target: "genres.resolve",
                leaf = %leaf,
                "binding context published concurrently; using the retained one"
            );
        }
        Ok(retained.clone())
    }

    /// Resolve the type of the single member reachable from `leaf` that `predicate` selects.
    pub fn resolve_member(
        &self,
        leaf: &TypeRef,
        predicate: impl Fn(&MemberId) -> bool,
    ) -> Result<TypeRef> {
        let ctx = self.get_context(leaf)?;
        resolve_member_in(&ctx, self, &predicate)
    }

    /// Resolve the type of `member` as seen from `leaf`, memoized per `(leaf, member)`.
    pub fn resolve_member_id(&self, leaf: &TypeRef, member: &MemberId) -> Result<TypeRef> {
        if !self.config.memoize_members {
            bump(&self.counters.member_misses);
            return self
                .resolve_member(leaf, member.matcher())
                .map_err(|err| err.in_member(member));
        }

        let key = (leaf.clone(), member.clone());
        if let Some(ty) = self.members.read().get(&key) {
            bump(&self.counters.member_hits);
            return Ok(ty.clone());
        }

        bump(&self.counters.member_misses);
        let ty = self
            .resolve_member(leaf, member.matcher())
            .map_err(|err| err.in_member(member))?;
        Ok(self.members.write().entry(key).or_insert(ty).clone())
    }

    pub fn stats(&self) -> CacheStats {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);
        CacheStats {
            declaration_hits: load(&self.counters.declaration_hits),
            declaration_misses: load(&self.counters.declaration_misses),
            context_hits: load(&self.counters.context_hits),
            context_misses: load(&self.counters.context_misses),
            member_hits: load(&self.counters.member_hits),
            member_misses: load(&self.counters.member_misses),
        }
    }

    pub fn declaration_entries(&self) -> usize {
        self.declarations.read().len()
    }

    pub fn context_entries(&self) -> usize {
        self.contexts.read().len()
    }

    pub fn member_entries(&self) -> usize {
        self.members.read().len()
    }
}

impl DeclProvider for ResolutionCache {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        self.get_declaration(id)
    }
}
