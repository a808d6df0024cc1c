use std::sync::Arc;

use genres_types::{ClassId, MemberId, TypeRef};

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Structural resolution failures.
///
/// These describe malformed or unsupported declarations, never transient conditions; retrying
/// the same query yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("leaf type `{leaf}` is not a concrete class instantiation")]
    UnresolvableLeaf { leaf: TypeRef },

    #[error("`{class}` declares {expected} type parameter(s) but was given {found} argument(s)")]
    ArityMismatch {
        class: ClassId,
        expected: usize,
        found: usize,
    },

    #[error("type variable `{name}` of `{class}` has no binding{}", member_suffix(.member))]
    UnresolvedVariable {
        name: Arc<str>,
        class: ClassId,
        member: Option<MemberId>,
    },

    #[error("wildcard `{wildcard}` cannot stand in for a concrete type{}", member_suffix(.member))]
    UnresolvableWildcard {
        wildcard: TypeRef,
        member: Option<MemberId>,
    },

    #[error("no member reachable from `{leaf}` matches {}", selector(.member))]
    MemberNotFound {
        leaf: TypeRef,
        member: Option<MemberId>,
    },

    #[error(
        "{} members reachable from `{leaf}` match the selector: {}",
        .candidates.len(),
        join_members(.candidates)
    )]
    AmbiguousMember {
        leaf: TypeRef,
        candidates: Vec<MemberId>,
    },
}

impl ResolveError {
    /// Attach the member that was being looked up or resolved, if not already set.
    pub fn in_member(mut self, id: &MemberId) -> Self {
        match &mut self {
            ResolveError::UnresolvedVariable { member, .. }
            | ResolveError::UnresolvableWildcard { member, .. }
            | ResolveError::MemberNotFound { member, .. } => {
                if member.is_none() {
                    *member = Some(id.clone());
                }
            }
            _ => {}
        }
        self
    }
}

fn member_suffix(member: &Option<MemberId>) -> String {
    match member {
        Some(member) => format!(" (in `{member}`)"),
        None => String::new(),
    }
}

fn selector(member: &Option<MemberId>) -> String {
    match member {
        Some(member) => format!("`{member}`"),
        None => "the selector".to_owned(),
    }
}

fn join_members(members: &[MemberId]) -> String {
    members
        .iter()
        .map(|m| format!("`{m}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
