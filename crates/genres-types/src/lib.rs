//! Type model shared by the genres crates.
//!
//! This crate only describes declaration graphs and type expressions. It has no opinion on how
//! graphs are produced (annotation scanning, reflection, fixtures) and performs no resolution; see
//! `genres-resolve` for that.
//!
//! - [`TypeRef`] is the closed set of type expressions (raw, parameterized, variable, wildcard,
//!   array).
//! - [`ClassDecl`] is the read-only declaration of one class: its type parameters, direct
//!   supertypes and members.
//! - [`DeclProvider`] is the contract through which resolvers read declarations.

#![forbid(unsafe_code)]

mod decl;
mod format;
mod provider;
mod type_ref;

pub use decl::{ClassDecl, MemberDecl, MemberId, MemberRole, TypeParamDecl};
pub use provider::DeclProvider;
pub use type_ref::{ClassId, TypeRef, TypeVar};
