use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::{ClassDecl, ClassId};

/// Source of class declarations.
///
/// Implementations must be stable for the lifetime of the process: asking twice for the same id
/// yields the same declaration (or `None` both times). A class without a declaration is treated
/// by resolvers as opaque: no type parameters, no supertypes, no members.
pub trait DeclProvider: Send + Sync {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>>;
}

impl<P: DeclProvider + ?Sized> DeclProvider for Arc<P> {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        (**self).class_decl(id)
    }
}

impl<P: DeclProvider + ?Sized> DeclProvider for &P {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        (**self).class_decl(id)
    }
}

impl DeclProvider for HashMap<ClassId, Arc<ClassDecl>> {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        self.get(id).cloned()
    }
}

impl DeclProvider for BTreeMap<ClassId, Arc<ClassDecl>> {
    fn class_decl(&self, id: &ClassId) -> Option<Arc<ClassDecl>> {
        self.get(id).cloned()
    }
}
