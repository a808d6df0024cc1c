//! Generic type resolution over declaration graphs.
//!
//! Given a fully-instantiated leaf type (e.g. `ParentStructWithValue`, or `Box<Integer>`), this
//! crate computes the concrete type of any member reachable from it, substituting type
//! parameters through every level of the inheritance graph:
//!
//! ```text
//! class A<T>            { T value; }
//! class B<U> extends A<U> {}
//! class C    extends B<Integer> {}
//!
//! resolve C#value  =>  java.lang.Integer
//! ```
//!
//! - [`build_context`] computes the [`BindingContext`] of a leaf.
//! - [`resolve_type`] substitutes a type expression under a set of [`Bindings`].
//! - [`ResolutionCache`] memoizes declarations, contexts and member types and is safe to share
//!   between threads; [`install_global`] makes one available process-wide.
//!
//! Every successful result is *resolved*: it contains no type variable and no wildcard.

#![forbid(unsafe_code)]

mod bindings;
mod cache;
mod error;
mod global;
mod member;
mod subst;

pub use bindings::{BindingContext, Bindings, NoBindings, ScopedBindings};
pub use cache::{CacheStats, ResolutionCache};
pub use error::{ResolveError, Result};
pub use global::{global, install_global, GlobalError};
pub use member::{collect_members, resolve_member_in};
pub use subst::{build_context, resolve_standalone, resolve_type};

pub use genres_config::CacheConfig;
