use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{ClassId, TypeRef};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParamDecl {
    pub name: Arc<str>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

/// How a member exposes its value: a plain field, or an accessor whose declared type is its
/// return type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Field,
    Accessor,
}

/// Identity of a declared member.
///
/// Member selection compares these by equality, so an accessor declared in a base class and
/// its override in a subclass are distinct members.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId {
    pub owner: ClassId,
    pub name: Arc<str>,
    pub role: MemberRole,
}

impl MemberId {
    pub fn new(owner: impl Into<ClassId>, name: impl AsRef<str>, role: MemberRole) -> Self {
        Self {
            owner: owner.into(),
            name: Arc::from(name.as_ref()),
            role,
        }
    }

    pub fn field(owner: impl Into<ClassId>, name: impl AsRef<str>) -> Self {
        Self::new(owner, name, MemberRole::Field)
    }

    pub fn accessor(owner: impl Into<ClassId>, name: impl AsRef<str>) -> Self {
        Self::new(owner, name, MemberRole::Accessor)
    }

    /// A selection predicate matching exactly this member.
    pub fn matcher(&self) -> impl Fn(&MemberId) -> bool + Send + Sync + 'static {
        let this = self.clone();
        move |candidate| *candidate == this
    }
}

impl fmt::Debug for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({self})")
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            MemberRole::Field => write!(f, "{}#{}", self.owner, self.name),
            MemberRole::Accessor => write!(f, "{}#{}()", self.owner, self.name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub id: MemberId,
    pub ty: TypeRef,
}

impl MemberDecl {
    pub fn role(&self) -> MemberRole {
        self.id.role
    }
}

/// Declaration of one class as supplied by a [`crate::DeclProvider`].
///
/// `supertypes` and `members` may mention this class's own type parameters as
/// [`TypeRef::Variable`]s owned by `id` (and, for nested declarations, parameters of the
/// `enclosing` class chain).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub id: ClassId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_params: Vec<TypeParamDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supertypes: Vec<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<MemberDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enclosing: Option<ClassId>,
}

impl ClassDecl {
    pub fn new(id: impl Into<ClassId>) -> Self {
        Self {
            id: id.into(),
            type_params: Vec::new(),
            supertypes: Vec::new(),
            members: Vec::new(),
            enclosing: None,
        }
    }

    pub fn type_param(mut self, name: impl AsRef<str>, bounds: Vec<TypeRef>) -> Self {
        self.type_params.push(TypeParamDecl {
            name: Arc::from(name.as_ref()),
            bounds,
        });
        self
    }

    pub fn extends(mut self, supertype: TypeRef) -> Self {
        self.supertypes.push(supertype);
        self
    }

    pub fn field(mut self, name: impl AsRef<str>, ty: TypeRef) -> Self {
        let id = MemberId::field(self.id.clone(), name);
        self.members.push(MemberDecl { id, ty });
        self
    }

    pub fn accessor(mut self, name: impl AsRef<str>, ty: TypeRef) -> Self {
        let id = MemberId::accessor(self.id.clone(), name);
        self.members.push(MemberDecl { id, ty });
        self
    }

    pub fn enclosed_by(mut self, enclosing: impl Into<ClassId>) -> Self {
        self.enclosing = Some(enclosing.into());
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }
}
