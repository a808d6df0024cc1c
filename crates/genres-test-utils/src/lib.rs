//! Utilities shared by genres tests.
//!
//! [`DeclGraph`] is an in-memory [`DeclProvider`] that can be assembled from builders or loaded
//! from JSON; [`fixtures`] holds the canned graphs used across the workspace tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use genres_types::{ClassDecl, ClassId, DeclProvider};

pub mod fixtures;

/// An immutable-once-built set of class declarations.
#[derive(Clone, Debug, Default)]
pub struct DeclGraph {
    classes: BTreeMap<ClassId, Arc<ClassDecl>>,
}

impl DeclGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_decls(decls: impl IntoIterator<Item = ClassDecl>) -> Self {
        let mut graph = Self::new();
        for decl in decls {
            graph.insert(decl);
        }
        graph
    }

    /// Parse a JSON array of [`ClassDecl`]s.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let decls: Vec<ClassDecl> = serde_json::from_str(text)?;
        Ok(Self::from_decls(decls))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        let decls: Vec<&ClassDecl> = self.classes.values().map(|decl| &**decl).collect();
        serde_json::to_string_pretty(&decls)
    }

    /// Add (or replace) a declaration.
    pub fn insert(&mut self, decl: ClassDecl) -> &mut Self {
        self.classes.insert(decl.id.clone(), Arc::new(decl));
        self
    }

    pub fn with(mut self, decl: ClassDecl) -> Self {
        self.insert(decl);
        self
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Merge `other` into `self`; declarations in `other` replace same-named ones.
    pub fn extend(&mut self, other: DeclGraph) {
        self.classes.extend(other.classes);
    }

    pub fn into_provider(self) -> Arc<dyn DeclProvider> {
        Arc::new(self)
    }
}

impl DeclProvider for DeclGraph {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        self.classes.get(id).cloned()
    }
}

/// Wraps a provider and counts how often declarations are requested.
#[derive(Debug)]
pub struct CountingProvider<P> {
    inner: P,
    lookups: AtomicUsize,
}

impl<P> CountingProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl<P: DeclProvider> DeclProvider for CountingProvider<P> {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.class_decl(id)
    }
}
