use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Nominal identity of a class, keyed by its binary name (e.g. `com.example.Node`).
///
/// Two ids are equal iff their names are equal. Cloning is a reference count bump.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassId(Arc<str>);

impl ClassId {
    pub fn new(binary_name: impl AsRef<str>) -> Self {
        Self(Arc::from(binary_name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name without its package or enclosing-class prefix (`a.b.Outer$Inner` -> `Inner`).
    pub fn simple_name(&self) -> &str {
        let name = self.as_str();
        let start = name.rfind(['.', '$']).map(|idx| idx + 1).unwrap_or(0);
        &name[start..]
    }
}

impl From<&str> for ClassId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference to a type parameter declared by `owner`.
///
/// Identity is `(owner, name)`. `bounds` is carried for diagnostics and erasure only and is
/// ignored by equality and hashing, so a self-referential bound such as `S extends Node<S>` can
/// mention `S` with empty bounds instead of an infinitely nested value.
#[derive(Clone, Serialize, Deserialize)]
pub struct TypeVar {
    pub name: Arc<str>,
    pub owner: ClassId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeRef>,
}

impl TypeVar {
    pub fn new(owner: ClassId, name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            owner,
            bounds: Vec::new(),
        }
    }

    pub fn with_bounds(mut self, bounds: Vec<TypeRef>) -> Self {
        self.bounds = bounds;
        self
    }
}

impl PartialEq for TypeVar {
    fn eq(&self, other: &Self) -> bool {
        self.owner == other.owner && self.name == other.name
    }
}

impl Eq for TypeVar {}

impl Hash for TypeVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.owner.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Debug for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.owner, self.name)
    }
}

/// A type expression as it appears in a declaration graph.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A nominal type used without type arguments.
    Raw(ClassId),
    /// A nominal type instantiated with positional type arguments. `owner` is the enclosing
    /// instantiation for nested generic declarations (`Outer<String>.Inner<T>`).
    Parameterized {
        raw: ClassId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner: Option<Box<TypeRef>>,
        args: Vec<TypeRef>,
    },
    Variable(TypeVar),
    Wildcard {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        upper: Vec<TypeRef>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        lower: Vec<TypeRef>,
    },
    Array(Box<TypeRef>),
}

impl TypeRef {
    pub fn raw(class: impl Into<ClassId>) -> Self {
        TypeRef::Raw(class.into())
    }

    pub fn class(class: impl Into<ClassId>, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: class.into(),
            owner: None,
            args,
        }
    }

    pub fn nested(owner: TypeRef, class: impl Into<ClassId>, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: class.into(),
            owner: Some(Box::new(owner)),
            args,
        }
    }

    pub fn var(owner: impl Into<ClassId>, name: impl AsRef<str>) -> Self {
        TypeRef::Variable(TypeVar::new(owner.into(), name))
    }

    /// `?`
    pub fn wildcard() -> Self {
        TypeRef::Wildcard {
            upper: Vec::new(),
            lower: Vec::new(),
        }
    }

    /// `? extends bound`
    pub fn wildcard_extends(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            upper: vec![bound],
            lower: Vec::new(),
        }
    }

    /// `? super bound`
    pub fn wildcard_super(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            upper: Vec::new(),
            lower: vec![bound],
        }
    }

    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// `true` iff the type contains no variable and no wildcard anywhere in its structure.
    pub fn is_resolved(&self) -> bool {
        match self {
            TypeRef::Raw(_) => true,
            TypeRef::Parameterized { owner, args, .. } => {
                owner.as_deref().map_or(true, TypeRef::is_resolved)
                    && args.iter().all(TypeRef::is_resolved)
            }
            TypeRef::Variable(_) | TypeRef::Wildcard { .. } => false,
            TypeRef::Array(component) => component.is_resolved(),
        }
    }

    pub fn contains_type_vars(&self) -> bool {
        match self {
            TypeRef::Raw(_) => false,
            TypeRef::Parameterized { owner, args, .. } => {
                owner.as_deref().is_some_and(TypeRef::contains_type_vars)
                    || args.iter().any(TypeRef::contains_type_vars)
            }
            TypeRef::Variable(_) => true,
            TypeRef::Wildcard { upper, lower } => upper
                .iter()
                .chain(lower.iter())
                .any(TypeRef::contains_type_vars),
            TypeRef::Array(component) => component.contains_type_vars(),
        }
    }

    pub fn contains_wildcards(&self) -> bool {
        match self {
            TypeRef::Raw(_) | TypeRef::Variable(_) => false,
            TypeRef::Parameterized { owner, args, .. } => {
                owner.as_deref().is_some_and(TypeRef::contains_wildcards)
                    || args.iter().any(TypeRef::contains_wildcards)
            }
            TypeRef::Wildcard { .. } => true,
            TypeRef::Array(component) => component.contains_wildcards(),
        }
    }

    pub fn is_class_or_parameterized(&self) -> bool {
        matches!(self, TypeRef::Raw(_) | TypeRef::Parameterized { .. })
    }

    /// The nominal class of a `Raw` or `Parameterized` type.
    pub fn raw_class(&self) -> Option<&ClassId> {
        match self {
            TypeRef::Raw(id) | TypeRef::Parameterized { raw: id, .. } => Some(id),
            _ => None,
        }
    }

    /// Top-level type arguments; empty for anything but `Parameterized`.
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Parameterized { args, .. } => args,
            _ => &[],
        }
    }

    pub fn first_type_arg(&self) -> Option<&TypeRef> {
        self.type_args().first()
    }

    /// Type erasure.
    ///
    /// Parameterized types erase to their raw class, arrays to an array of the erased
    /// component, and variables to the erasure of their first bound. Wildcards and unbounded
    /// variables have no erasure here.
    pub fn erasure(&self) -> Option<TypeRef> {
        match self {
            TypeRef::Raw(_) => Some(self.clone()),
            TypeRef::Parameterized { raw, .. } => Some(TypeRef::Raw(raw.clone())),
            TypeRef::Variable(var) => var.bounds.first().and_then(TypeRef::erasure),
            TypeRef::Wildcard { .. } => None,
            TypeRef::Array(component) => component.erasure().map(TypeRef::array),
        }
    }
}

impl From<TypeVar> for TypeRef {
    fn from(value: TypeVar) -> Self {
        TypeRef::Variable(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn variables_compare_by_owner_and_name_only() {
        let node = ClassId::new("com.example.Node");
        let bare = TypeVar::new(node.clone(), "S");
        let bounded = TypeVar::new(node.clone(), "S").with_bounds(vec![TypeRef::class(
            node.clone(),
            vec![TypeRef::Variable(bare.clone())],
        )]);
        assert_eq!(bare, bounded);

        let other_owner = TypeVar::new(ClassId::new("com.example.Other"), "S");
        assert_ne!(bare, other_owner);
    }

    #[test]
    fn resolved_means_no_variables_or_wildcards_anywhere() {
        let list = ClassId::new("java.util.List");
        let integer = TypeRef::raw("java.lang.Integer");

        assert!(TypeRef::class(list.clone(), vec![integer.clone()]).is_resolved());
        assert!(TypeRef::array(TypeRef::class(list.clone(), vec![integer.clone()])).is_resolved());

        let nested_var = TypeRef::array(TypeRef::class(
            list.clone(),
            vec![TypeRef::var("com.example.Box", "T")],
        ));
        assert!(!nested_var.is_resolved());
        assert!(nested_var.contains_type_vars());
        assert!(!nested_var.contains_wildcards());

        let wild = TypeRef::class(list, vec![TypeRef::wildcard_extends(integer)]);
        assert!(!wild.is_resolved());
        assert!(wild.contains_wildcards());
        assert!(!wild.contains_type_vars());

        let owner_var = TypeRef::nested(
            TypeRef::class("com.example.Outer", vec![TypeRef::var("com.example.Outer", "T")]),
            "com.example.Outer$Inner",
            vec![],
        );
        assert!(!owner_var.is_resolved());
    }

    #[test]
    fn class_shape_queries() {
        let integer = TypeRef::raw("java.lang.Integer");
        let list = TypeRef::class("java.util.List", vec![integer.clone()]);
        let map = TypeRef::class(
            "java.util.Map",
            vec![TypeRef::raw("java.lang.String"), integer.clone()],
        );

        assert_eq!(list.first_type_arg(), Some(&integer));
        assert_eq!(map.first_type_arg(), Some(&TypeRef::raw("java.lang.String")));
        assert_eq!(integer.first_type_arg(), None);
        assert_eq!(TypeRef::array(list.clone()).first_type_arg(), None);

        assert!(integer.is_class_or_parameterized());
        assert!(list.is_class_or_parameterized());
        assert!(!TypeRef::array(integer).is_class_or_parameterized());
        assert!(!TypeRef::var("com.example.Box", "T").is_class_or_parameterized());
        assert!(!TypeRef::wildcard().is_class_or_parameterized());
    }

    #[test]
    fn erasure_follows_class_array_and_bound() {
        let number = TypeRef::raw("java.lang.Number");
        let list_of_t = TypeRef::class("java.util.List", vec![TypeRef::var("com.example.Box", "T")]);

        assert_eq!(list_of_t.erasure(), Some(TypeRef::raw("java.util.List")));
        assert_eq!(
            TypeRef::array(list_of_t).erasure(),
            Some(TypeRef::array(TypeRef::raw("java.util.List")))
        );

        let bounded = TypeRef::Variable(
            TypeVar::new(ClassId::new("com.example.Box"), "T").with_bounds(vec![number.clone()]),
        );
        assert_eq!(bounded.erasure(), Some(number));
        assert_eq!(TypeRef::var("com.example.Box", "T").erasure(), None);
        assert_eq!(TypeRef::wildcard().erasure(), None);
    }

    #[test]
    fn simple_name_strips_package_and_enclosing_class() {
        assert_eq!(ClassId::new("a.b.Outer$Inner").simple_name(), "Inner");
        assert_eq!(ClassId::new("a.b.Outer").simple_name(), "Outer");
        assert_eq!(ClassId::new("int").simple_name(), "int");
    }
}
