use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use genres_types::{ClassDecl, ClassId, DeclProvider, TypeRef, TypeVar};

use crate::{ResolveError, Result};

/// Lookup of type variable values during [`crate::resolve_type`].
pub trait Bindings {
    /// The resolved value of `var`, or the reason it has none.
    fn lookup(&self, var: &TypeVar) -> Result<TypeRef>;
}

/// Type parameter bindings for one leaf instantiation.
///
/// Built by [`crate::build_context`]; immutable afterwards. Besides the bindings themselves it
/// keeps the order in which classes were visited (the member search order) and, for classes
/// walked raw, why their parameters are unbound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingContext {
    leaf: TypeRef,
    bindings: HashMap<(ClassId, Arc<str>), TypeRef>,
    order: Vec<ClassId>,
    visited: HashSet<ClassId>,
    raw: HashSet<ClassId>,
    gaps: HashMap<ClassId, ResolveError>,
}

impl BindingContext {
    pub(crate) fn new(leaf: TypeRef) -> Self {
        Self {
            leaf,
            bindings: HashMap::new(),
            order: Vec::new(),
            visited: HashSet::new(),
            raw: HashSet::new(),
            gaps: HashMap::new(),
        }
    }

    pub fn leaf(&self) -> &TypeRef {
        &self.leaf
    }

    pub fn get(&self, class: &ClassId, param: &str) -> Option<&TypeRef> {
        self.bindings.get(&(class.clone(), Arc::from(param)))
    }

    /// Classes reachable from the leaf, in traversal order. The leaf's class comes first.
    pub fn classes(&self) -> &[ClassId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassId, &str, &TypeRef)> {
        self.bindings
            .iter()
            .map(|((class, name), ty)| (class, &**name, ty))
    }

    /// `true` if `class` was reached without type arguments although it declares parameters.
    pub fn is_raw(&self, class: &ClassId) -> bool {
        self.raw.contains(class)
    }

    /// Why `class` was walked raw, when a supertype reference to it could not be resolved.
    pub fn gap(&self, class: &ClassId) -> Option<&ResolveError> {
        self.gaps.get(class)
    }

    pub(crate) fn has_visited(&self, class: &ClassId) -> bool {
        self.visited.contains(class)
    }

    pub(crate) fn visit(&mut self, class: ClassId) {
        if self.visited.insert(class.clone()) {
            self.order.push(class);
        }
    }

    /// Record a binding. The first value recorded for a key wins; returns `false` if the key
    /// was already bound.
    pub(crate) fn bind(&mut self, class: ClassId, param: Arc<str>, value: TypeRef) -> bool {
        debug_assert!(value.is_resolved(), "bindings hold resolved types only");
        match self.bindings.entry((class, param)) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub(crate) fn mark_raw(&mut self, class: ClassId) {
        self.raw.insert(class);
    }

    pub(crate) fn clear_raw(&mut self, class: &ClassId) {
        self.raw.remove(class);
    }

    /// `true` if any of `decl`'s type parameters already has a binding.
    pub(crate) fn is_bound(&self, decl: &ClassDecl) -> bool {
        decl.type_params
            .iter()
            .any(|param| self.get(&decl.id, &param.name).is_some())
    }

    pub(crate) fn record_gap(&mut self, class: ClassId, reason: ResolveError) {
        self.gaps.entry(class).or_insert(reason);
    }
}

impl Bindings for BindingContext {
    fn lookup(&self, var: &TypeVar) -> Result<TypeRef> {
        if let Some(value) = self.bindings.get(&(var.owner.clone(), var.name.clone())) {
            return Ok(value.clone());
        }
        if let Some(reason) = self.gaps.get(&var.owner) {
            return Err(reason.clone());
        }
        Err(ResolveError::UnresolvedVariable {
            name: var.name.clone(),
            class: var.owner.clone(),
            member: None,
        })
    }
}

/// A view of a [`BindingContext`] restricted to the variables a declaration can see: its own
/// type parameters and those of its enclosing classes.
#[derive(Debug)]
pub struct ScopedBindings<'a> {
    ctx: &'a BindingContext,
    visible: Vec<ClassId>,
}

impl<'a> ScopedBindings<'a> {
    pub fn new(ctx: &'a BindingContext, visible: Vec<ClassId>) -> Self {
        Self { ctx, visible }
    }

    /// Scope of `decl`: the class itself followed by its `enclosing` chain.
    pub fn for_decl(ctx: &'a BindingContext, decl: &ClassDecl, provider: &dyn DeclProvider) -> Self {
        Self::new(ctx, visible_classes(decl, provider))
    }
}

impl Bindings for ScopedBindings<'_> {
    fn lookup(&self, var: &TypeVar) -> Result<TypeRef> {
        if !self.visible.contains(&var.owner) {
            return Err(ResolveError::UnresolvedVariable {
                name: var.name.clone(),
                class: var.owner.clone(),
                member: None,
            });
        }
        self.ctx.lookup(var)
    }
}

/// Bindings with no variables at all; used to resolve types outside any leaf context.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBindings;

impl Bindings for NoBindings {
    fn lookup(&self, var: &TypeVar) -> Result<TypeRef> {
        Err(ResolveError::UnresolvedVariable {
            name: var.name.clone(),
            class: var.owner.clone(),
            member: None,
        })
    }
}

fn visible_classes(decl: &ClassDecl, provider: &dyn DeclProvider) -> Vec<ClassId> {
    let mut visible = vec![decl.id.clone()];
    let mut next = decl.enclosing.clone();
    while let Some(class) = next {
        // Guard against malformed graphs where enclosing links form a cycle.
        if visible.contains(&class) {
            break;
        }
        next = provider
            .class_decl(&class)
            .and_then(|enclosing| enclosing.enclosing.clone());
        visible.push(class);
    }
    visible
}
