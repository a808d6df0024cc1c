//! Type parameter substitution: binding contexts and the structural resolution primitive.

use std::collections::{HashSet, VecDeque};

use genres_types::{ClassDecl, ClassId, DeclProvider, TypeRef};

use crate::bindings::{Bindings, NoBindings, ScopedBindings};
use crate::{BindingContext, ResolveError, Result};

/// Replace every variable in `ty` by its binding.
///
/// Fails on the first variable without a binding and on any wildcard. On success the result
/// contains neither; there is no partially-resolved outcome.
pub fn resolve_type(ty: &TypeRef, bindings: &dyn Bindings) -> Result<TypeRef> {
    let resolved = match ty {
        TypeRef::Raw(_) => ty.clone(),
        TypeRef::Parameterized { raw, owner, args } => {
            let owner = match owner {
                Some(owner) => Some(Box::new(resolve_type(owner, bindings)?)),
                None => None,
            };
            let args = args
                .iter()
                .map(|arg| resolve_type(arg, bindings))
                .collect::<Result<Vec<_>>>()?;
            TypeRef::Parameterized {
                raw: raw.clone(),
                owner,
                args,
            }
        }
        TypeRef::Variable(var) => bindings.lookup(var)?,
        TypeRef::Wildcard { .. } => {
            return Err(ResolveError::UnresolvableWildcard {
                wildcard: ty.clone(),
                member: None,
            })
        }
        TypeRef::Array(component) => TypeRef::array(resolve_type(component, bindings)?),
    };
    debug_assert!(resolved.is_resolved());
    Ok(resolved)
}

/// Resolve a type that is not seen through any leaf. Only already-concrete types succeed.
pub fn resolve_standalone(ty: &TypeRef) -> Result<TypeRef> {
    resolve_type(ty, &NoBindings)
}

#[derive(Debug)]
struct WorkItem {
    class: ClassId,
    args: Vec<TypeRef>,
}

/// Compute the type parameter bindings of every class reachable from `leaf`.
///
/// Classes are visited breadth-first, direct supertypes in declaration order. Supertype
/// arguments are resolved against the bindings of the class that names them before being
/// pushed, so every recorded binding is concrete. The first binding recorded for a
/// `(class, parameter)` pair wins: a class reached again once its parameters are bound (through
/// a diamond or a self-referential bound) is not descended again, while a class first reached
/// raw is bound and walked again when a later path supplies arguments.
pub fn build_context(leaf: &TypeRef, provider: &dyn DeclProvider) -> Result<BindingContext> {
    let (root, args, owner) = match leaf {
        TypeRef::Raw(class) => (class.clone(), Vec::new(), None),
        TypeRef::Parameterized { raw, owner, args } if leaf.is_resolved() => {
            (raw.clone(), args.clone(), owner.as_deref())
        }
        _ => return Err(ResolveError::UnresolvableLeaf { leaf: leaf.clone() }),
    };

    let mut ctx = BindingContext::new(leaf.clone());
    if let Some(owner) = owner {
        bind_owner(&mut ctx, owner, provider)?;
    }

    let mut queue = VecDeque::new();
    queue.push_back(WorkItem { class: root, args });
    let mut seen: HashSet<(ClassId, Vec<TypeRef>)> = HashSet::new();

    while let Some(WorkItem { class, args }) = queue.pop_front() {
        if !seen.insert((class.clone(), args.clone())) {
            continue;
        }
        let revisit = ctx.has_visited(&class);
        ctx.visit(class.clone());

        let Some(decl) = provider.class_decl(&class) else {
            if !revisit {
                tracing::trace!(target: "genres.resolve", class = %class, "no declaration; treating as opaque");
            }
            continue;
        };

        if revisit {
            if args.is_empty() || ctx.is_bound(&decl) {
                if !args.is_empty() {
                    tracing::debug!(
                        target: "genres.resolve",
                        leaf = %leaf,
                        class = %class,
                        args = ?args,
                        "class reached again with different arguments; keeping first bindings"
                    );
                }
                continue;
            }
            tracing::debug!(
                target: "genres.resolve",
                leaf = %leaf,
                class = %class,
                args = ?args,
                "class first reached raw is now parameterized; binding it"
            );
        }

        let walk_raw = bind_params(&mut ctx, &decl, &args)?;
        let supertypes: Vec<(ClassId, Option<Result<TypeRef>>)> = {
            let scope = ScopedBindings::for_decl(&ctx, &decl, provider);
            decl.supertypes
                .iter()
                .filter_map(|supertype| {
                    let Some(super_class) = supertype.raw_class().cloned() else {
                        tracing::debug!(
                            target: "genres.resolve",
                            class = %class,
                            supertype = %supertype,
                            "ignoring non-class supertype"
                        );
                        return None;
                    };
                    let resolved = (!walk_raw).then(|| resolve_type(supertype, &scope));
                    Some((super_class, resolved))
                })
                .collect()
        };

        // Ancestors of a class walked raw because of a gap inherit its reason.
        let inherited_gap = if walk_raw {
            ctx.gap(&class).cloned()
        } else {
            None
        };

        for (super_class, resolved) in supertypes {
            match resolved {
                None => {
                    if let Some(reason) = &inherited_gap {
                        ctx.record_gap(super_class.clone(), reason.clone());
                    }
                    queue.push_back(WorkItem {
                        class: super_class,
                        args: Vec::new(),
                    });
                }
                Some(Ok(resolved)) => {
                    if let TypeRef::Parameterized {
                        owner: Some(owner), ..
                    } = &resolved
                    {
                        bind_owner(&mut ctx, owner, provider)?;
                    }
                    queue.push_back(WorkItem {
                        class: super_class,
                        args: resolved.type_args().to_vec(),
                    });
                }
                Some(Err(reason)) => {
                    tracing::debug!(
                        target: "genres.resolve",
                        class = %class,
                        supertype = %super_class,
                        error = %reason,
                        "supertype arguments are not concrete; walking it raw"
                    );
                    ctx.record_gap(super_class.clone(), reason);
                    queue.push_back(WorkItem {
                        class: super_class,
                        args: Vec::new(),
                    });
                }
            }
        }
    }

    tracing::trace!(
        target: "genres.resolve",
        leaf = %leaf,
        classes = ctx.classes().len(),
        bindings = ctx.len(),
        "built binding context"
    );
    Ok(ctx)
}

/// Bind `decl`'s parameters to `args`. Returns `true` if the class is used raw (generic, but no
/// arguments supplied), in which case nothing is bound and supertypes are walked erased.
fn bind_params(ctx: &mut BindingContext, decl: &ClassDecl, args: &[TypeRef]) -> Result<bool> {
    let expected = decl.type_params.len();
    if args.is_empty() {
        if expected > 0 {
            tracing::debug!(
                target: "genres.resolve",
                class = %decl.id,
                "raw use of generic class; its parameters stay unbound"
            );
            ctx.mark_raw(decl.id.clone());
            return Ok(true);
        }
        return Ok(false);
    }
    if args.len() != expected {
        return Err(ResolveError::ArityMismatch {
            class: decl.id.clone(),
            expected,
            found: args.len(),
        });
    }
    ctx.clear_raw(&decl.id);
    for (param, arg) in decl.type_params.iter().zip(args) {
        ctx.bind(decl.id.clone(), param.name.clone(), arg.clone());
    }
    Ok(false)
}

/// Bind the parameters of an enclosing instantiation (`Outer<String>` in
/// `Outer<String>.Inner`), and of its own owner in turn. Owners contribute bindings only; they
/// are not searched for members.
fn bind_owner(ctx: &mut BindingContext, owner: &TypeRef, provider: &dyn DeclProvider) -> Result<()> {
    let mut next = Some(owner);
    while let Some(current) = next {
        let Some(class) = current.raw_class() else {
            break;
        };
        if let Some(decl) = provider.class_decl(class) {
            bind_params(ctx, &decl, current.type_args())?;
        }
        next = match current {
            TypeRef::Parameterized { owner, .. } => owner.as_deref(),
            _ => None,
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use genres_types::{ClassDecl, ClassId};
    use pretty_assertions::assert_eq;

    use super::*;

    fn provider(decls: Vec<ClassDecl>) -> HashMap<ClassId, Arc<ClassDecl>> {
        decls
            .into_iter()
            .map(|decl| (decl.id.clone(), Arc::new(decl)))
            .collect()
    }

    #[test]
    fn resolve_type_rebuilds_structure_around_bindings() {
        let decls = provider(vec![ClassDecl::new("com.example.Box").type_param("T", vec![])]);
        let leaf = TypeRef::class("com.example.Box", vec![TypeRef::raw("java.lang.String")]);
        let ctx = build_context(&leaf, &decls).unwrap();

        let t = TypeRef::var("com.example.Box", "T");
        let declared = TypeRef::array(TypeRef::class(
            "java.util.Map",
            vec![t.clone(), TypeRef::array(t)],
        ));
        let resolved = resolve_type(&declared, &ctx).unwrap();

        let string = TypeRef::raw("java.lang.String");
        assert_eq!(
            resolved,
            TypeRef::array(TypeRef::class(
                "java.util.Map",
                vec![string.clone(), TypeRef::array(string)],
            ))
        );
        assert!(resolved.is_resolved());
    }

    #[test]
    fn resolve_type_resolves_owner() {
        let decls = provider(vec![ClassDecl::new("com.example.Outer").type_param("T", vec![])]);
        let leaf = TypeRef::class("com.example.Outer", vec![TypeRef::raw("int")]);
        let ctx = build_context(&leaf, &decls).unwrap();

        let declared = TypeRef::nested(
            TypeRef::class("com.example.Outer", vec![TypeRef::var("com.example.Outer", "T")]),
            "com.example.Outer$Inner",
            vec![],
        );
        assert_eq!(
            resolve_type(&declared, &ctx).unwrap(),
            TypeRef::nested(
                TypeRef::class("com.example.Outer", vec![TypeRef::raw("int")]),
                "com.example.Outer$Inner",
                vec![],
            )
        );
    }

    #[test]
    fn nested_wildcard_fails_the_whole_type() {
        let declared = TypeRef::class(
            "java.util.List",
            vec![TypeRef::class("java.util.List", vec![TypeRef::wildcard()])],
        );
        let err = resolve_standalone(&declared).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvableWildcard {
                wildcard: TypeRef::wildcard(),
                member: None,
            }
        );
    }

    #[test]
    fn standalone_accepts_concrete_and_rejects_variables() {
        let concrete = TypeRef::class("java.util.List", vec![TypeRef::raw("java.lang.Integer")]);
        assert_eq!(resolve_standalone(&concrete).unwrap(), concrete);

        let err = resolve_standalone(&TypeRef::var("com.example.Box", "T")).unwrap_err();
        assert!(matches!(
            err,
            ResolveError::UnresolvedVariable { ref class, .. } if class.as_str() == "com.example.Box"
        ));
    }

    #[test]
    fn raw_generic_class_records_no_bindings() {
        let decls = provider(vec![ClassDecl::new("com.example.Box").type_param("T", vec![])]);
        let ctx = build_context(&TypeRef::raw("com.example.Box"), &decls).unwrap();

        assert!(ctx.is_empty());
        assert!(ctx.is_raw(&ClassId::new("com.example.Box")));
        assert_eq!(ctx.classes(), &[ClassId::new("com.example.Box")]);
    }
}
