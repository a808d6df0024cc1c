use std::sync::Arc;

use genres_types::{ClassDecl, DeclProvider, MemberDecl, MemberId, TypeRef};

use crate::bindings::ScopedBindings;
use crate::{resolve_type, BindingContext, ResolveError, Result};

/// Every member declared by the classes of `ctx`, in traversal order, paired with its
/// declaring class.
pub fn collect_members(
    ctx: &BindingContext,
    provider: &dyn DeclProvider,
) -> Vec<(Arc<ClassDecl>, MemberDecl)> {
    let mut out = Vec::new();
    for class in ctx.classes() {
        let Some(decl) = provider.class_decl(class) else {
            continue;
        };
        for member in &decl.members {
            out.push((decl.clone(), member.clone()));
        }
    }
    out
}

/// Find the single member of `ctx`'s leaf matching `predicate` and resolve its declared type.
///
/// The type is resolved in the scope of the member's declaring class, using the bindings that
/// were substituted down from the leaf.
pub fn resolve_member_in(
    ctx: &BindingContext,
    provider: &dyn DeclProvider,
    predicate: &dyn Fn(&MemberId) -> bool,
) -> Result<TypeRef> {
    let mut matches = collect_members(ctx, provider)
        .into_iter()
        .filter(|(_, member)| predicate(&member.id));

    let Some((decl, member)) = matches.next() else {
        return Err(ResolveError::MemberNotFound {
            leaf: ctx.leaf().clone(),
            member: None,
        });
    };
    let rest: Vec<MemberId> = matches.map(|(_, other)| other.id).collect();
    if !rest.is_empty() {
        let mut candidates = Vec::with_capacity(rest.len() + 1);
        candidates.push(member.id);
        candidates.extend(rest);
        return Err(ResolveError::AmbiguousMember {
            leaf: ctx.leaf().clone(),
            candidates,
        });
    }

    let scope = ScopedBindings::for_decl(ctx, &decl, provider);
    resolve_type(&member.ty, &scope).map_err(|err| err.in_member(&member.id))
}
