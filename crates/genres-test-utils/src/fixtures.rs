//! Canned declaration graphs.
//!
//! Each function returns a fresh [`DeclGraph`]; the associated constants name the classes it
//! declares so tests do not repeat string literals.

use genres_types::{ClassDecl, TypeRef};

use crate::DeclGraph;

pub const INTEGER: &str = "java.lang.Integer";
pub const STRING: &str = "java.lang.String";
pub const NUMBER: &str = "java.lang.Number";
pub const OBJECT: &str = "java.lang.Object";
pub const LIST: &str = "java.util.List";

pub fn integer() -> TypeRef {
    TypeRef::raw(INTEGER)
}

pub fn string() -> TypeRef {
    TypeRef::raw(STRING)
}

/// `A<T> { T value; }`, `B<U> extends A<U>`, `C extends B<Integer>`.
pub mod multi_level {
    use super::*;

    pub const A: &str = "com.example.A";
    pub const B: &str = "com.example.B";
    pub const C: &str = "com.example.C";

    pub fn graph() -> DeclGraph {
        DeclGraph::new()
            .with(
                ClassDecl::new(A)
                    .type_param("T", vec![])
                    .extends(TypeRef::raw(OBJECT))
                    .field("value", TypeRef::var(A, "T")),
            )
            .with(
                ClassDecl::new(B)
                    .type_param("U", vec![])
                    .extends(TypeRef::class(A, vec![TypeRef::var(B, "U")])),
            )
            .with(ClassDecl::new(C).extends(TypeRef::class(B, vec![integer()])))
    }
}

/// A chain `Level0<T0>`, `Level1<T1> extends Level0<T1>`, ... of arbitrary depth. Only
/// `Level0` declares a member, `T0 value`.
pub mod chain {
    use super::*;

    pub fn class(level: usize) -> String {
        format!("com.example.chain.Level{level}")
    }

    pub fn graph(depth: usize) -> DeclGraph {
        let mut graph = DeclGraph::new();
        graph.insert(
            ClassDecl::new(class(0).as_str())
                .type_param("T0", vec![])
                .field("value", TypeRef::var(class(0).as_str(), "T0")),
        );
        for level in 1..=depth {
            let this = class(level);
            let param = format!("T{level}");
            graph.insert(
                ClassDecl::new(this.as_str())
                    .type_param(&param, vec![])
                    .extends(TypeRef::class(
                        class(level - 1).as_str(),
                        vec![TypeRef::var(this.as_str(), &param)],
                    )),
            );
        }
        graph
    }
}

/// `Node<S extends Node<S>> { S next; S self(); }` and `ConcreteNode extends Node<ConcreteNode>`.
pub mod f_bounded {
    use super::*;

    pub const NODE: &str = "com.example.Node";
    pub const CONCRETE: &str = "com.example.ConcreteNode";

    pub fn graph() -> DeclGraph {
        let s = TypeRef::var(NODE, "S");
        DeclGraph::new()
            .with(
                ClassDecl::new(NODE)
                    .type_param("S", vec![TypeRef::class(NODE, vec![s.clone()])])
                    .field("next", s.clone())
                    .accessor("self", s),
            )
            .with(ClassDecl::new(CONCRETE).extends(TypeRef::class(
                NODE,
                vec![TypeRef::raw(CONCRETE)],
            )))
    }
}

/// Structure-like classes whose accessors return a type parameter bound further down the
/// hierarchy.
///
/// ```text
/// class GenericValue<V>           { V value; }
/// class ParentStruct<C, S>        { C child(); }
/// class ParentStructWithValue      extends ParentStruct<GenericValue<Integer>, ParentStructWithValue>
/// abstract class AbstractParentStruct<C2 extends GenericValue<?>, S2>
///                                  extends ParentStruct<C2, S2>
/// class AbstractParentWithValue    extends AbstractParentStruct<GenericValue<String>, AbstractParentWithValue>
/// class InheritedFieldStruct<X>   { List<X> items; }
/// class InheritedFieldStructWithValue extends InheritedFieldStruct<Integer>
/// ```
pub mod structs {
    use super::*;

    pub const GENERIC_VALUE: &str = "com.example.structs.GenericValue";
    pub const PARENT: &str = "com.example.structs.ParentStruct";
    pub const PARENT_WITH_VALUE: &str = "com.example.structs.ParentStructWithValue";
    pub const ABSTRACT_PARENT: &str = "com.example.structs.AbstractParentStruct";
    pub const ABSTRACT_PARENT_WITH_VALUE: &str = "com.example.structs.AbstractParentWithValue";
    pub const INHERITED: &str = "com.example.structs.InheritedFieldStruct";
    pub const INHERITED_WITH_VALUE: &str = "com.example.structs.InheritedFieldStructWithValue";

    pub fn generic_value(arg: TypeRef) -> TypeRef {
        TypeRef::class(GENERIC_VALUE, vec![arg])
    }

    pub fn graph() -> DeclGraph {
        DeclGraph::new()
            .with(
                ClassDecl::new(GENERIC_VALUE)
                    .type_param("V", vec![])
                    .field("value", TypeRef::var(GENERIC_VALUE, "V")),
            )
            .with(
                ClassDecl::new(PARENT)
                    .type_param("C", vec![])
                    .type_param("S", vec![])
                    .accessor("child", TypeRef::var(PARENT, "C")),
            )
            .with(ClassDecl::new(PARENT_WITH_VALUE).extends(TypeRef::class(
                PARENT,
                vec![generic_value(integer()), TypeRef::raw(PARENT_WITH_VALUE)],
            )))
            .with(
                ClassDecl::new(ABSTRACT_PARENT)
                    .type_param("C2", vec![generic_value(TypeRef::wildcard())])
                    .type_param("S2", vec![])
                    .extends(TypeRef::class(
                        PARENT,
                        vec![
                            TypeRef::var(ABSTRACT_PARENT, "C2"),
                            TypeRef::var(ABSTRACT_PARENT, "S2"),
                        ],
                    )),
            )
            .with(ClassDecl::new(ABSTRACT_PARENT_WITH_VALUE).extends(TypeRef::class(
                ABSTRACT_PARENT,
                vec![
                    generic_value(string()),
                    TypeRef::raw(ABSTRACT_PARENT_WITH_VALUE),
                ],
            )))
            .with(
                ClassDecl::new(INHERITED)
                    .type_param("X", vec![])
                    .field(
                        "items",
                        TypeRef::class(LIST, vec![TypeRef::var(INHERITED, "X")]),
                    ),
            )
            .with(
                ClassDecl::new(INHERITED_WITH_VALUE)
                    .extends(TypeRef::class(INHERITED, vec![integer()])),
            )
    }
}

/// `Holder<X> { X held; }` reached twice with different arguments.
///
/// `Left extends Holder<String>`, `Right extends Holder<Integer>`; `Both` lists `Left` then
/// `Right` as supertypes and `BothReversed` the opposite. `RawPath extends Holder` (raw), and
/// `RawFirst extends RawPath, Right` reaches `Holder` raw before reaching it parameterized.
pub mod diamond {
    use super::*;

    pub const HOLDER: &str = "com.example.diamond.Holder";
    pub const LEFT: &str = "com.example.diamond.Left";
    pub const RIGHT: &str = "com.example.diamond.Right";
    pub const BOTH: &str = "com.example.diamond.Both";
    pub const BOTH_REVERSED: &str = "com.example.diamond.BothReversed";
    pub const RAW_PATH: &str = "com.example.diamond.RawPath";
    pub const RAW_FIRST: &str = "com.example.diamond.RawFirst";

    pub fn graph() -> DeclGraph {
        DeclGraph::new()
            .with(
                ClassDecl::new(HOLDER)
                    .type_param("X", vec![])
                    .field("held", TypeRef::var(HOLDER, "X")),
            )
            .with(ClassDecl::new(LEFT).extends(TypeRef::class(HOLDER, vec![string()])))
            .with(ClassDecl::new(RIGHT).extends(TypeRef::class(HOLDER, vec![integer()])))
            .with(
                ClassDecl::new(BOTH)
                    .extends(TypeRef::raw(LEFT))
                    .extends(TypeRef::raw(RIGHT)),
            )
            .with(
                ClassDecl::new(BOTH_REVERSED)
                    .extends(TypeRef::raw(RIGHT))
                    .extends(TypeRef::raw(LEFT)),
            )
            .with(ClassDecl::new(RAW_PATH).extends(TypeRef::raw(HOLDER)))
            .with(
                ClassDecl::new(RAW_FIRST)
                    .extends(TypeRef::raw(RAW_PATH))
                    .extends(TypeRef::raw(RIGHT)),
            )
    }
}

/// Members whose declared types contain wildcards, and supertypes instantiated with one.
///
/// ```text
/// class Base<F>          { F base; }
/// class Bag<E>           extends Base<E> { List<? extends Number> numbers; ? anything; E element; }
/// class WildBag          extends Bag<?>
/// class RawBag           extends Bag
/// ```
pub mod wildcards {
    use super::*;

    pub const BASE: &str = "com.example.wild.Base";
    pub const BAG: &str = "com.example.wild.Bag";
    pub const WILD_BAG: &str = "com.example.wild.WildBag";
    pub const RAW_BAG: &str = "com.example.wild.RawBag";

    pub fn graph() -> DeclGraph {
        DeclGraph::new()
            .with(
                ClassDecl::new(BASE)
                    .type_param("F", vec![])
                    .field("base", TypeRef::var(BASE, "F")),
            )
            .with(
                ClassDecl::new(BAG)
                    .type_param("E", vec![])
                    .extends(TypeRef::class(BASE, vec![TypeRef::var(BAG, "E")]))
                    .field(
                        "numbers",
                        TypeRef::class(LIST, vec![TypeRef::wildcard_extends(TypeRef::raw(NUMBER))]),
                    )
                    .field("anything", TypeRef::wildcard())
                    .field("element", TypeRef::var(BAG, "E")),
            )
            .with(
                ClassDecl::new(WILD_BAG).extends(TypeRef::class(BAG, vec![TypeRef::wildcard()])),
            )
            .with(ClassDecl::new(RAW_BAG).extends(TypeRef::raw(BAG)))
    }
}

/// An inner class that refers to its enclosing class's parameter.
///
/// ```text
/// class Outer<O> {
///     class Inner<I> { O outer; I inner; Map<O, I> both; }
/// }
/// class Sub extends Outer<String>.Inner<Integer>
/// ```
pub mod nested {
    use super::*;

    pub const OUTER: &str = "com.example.nested.Outer";
    pub const INNER: &str = "com.example.nested.Outer$Inner";
    pub const SUB: &str = "com.example.nested.Sub";
    pub const MAP: &str = "java.util.Map";

    pub fn inner_of(outer_arg: TypeRef, inner_arg: TypeRef) -> TypeRef {
        TypeRef::nested(TypeRef::class(OUTER, vec![outer_arg]), INNER, vec![inner_arg])
    }

    pub fn graph() -> DeclGraph {
        let o = TypeRef::var(OUTER, "O");
        let i = TypeRef::var(INNER, "I");
        DeclGraph::new()
            .with(ClassDecl::new(OUTER).type_param("O", vec![]))
            .with(
                ClassDecl::new(INNER)
                    .type_param("I", vec![])
                    .enclosed_by(OUTER)
                    .field("outer", o.clone())
                    .field("inner", i.clone())
                    .field("both", TypeRef::class(MAP, vec![o, i])),
            )
            .with(ClassDecl::new(SUB).extends(inner_of(string(), integer())))
    }
}

/// Two classes declaring an accessor with the same name, for ambiguity tests.
///
/// `Base<T> { T child(); }`, `Leaf extends Base<Integer> { String child(); }`.
pub mod shadowing {
    use super::*;

    pub const BASE: &str = "com.example.Base";
    pub const LEAF: &str = "com.example.Leaf";

    pub fn graph() -> DeclGraph {
        DeclGraph::new()
            .with(
                ClassDecl::new(BASE)
                    .type_param("T", vec![])
                    .accessor("child", TypeRef::var(BASE, "T")),
            )
            .with(
                ClassDecl::new(LEAF)
                    .extends(TypeRef::class(BASE, vec![integer()]))
                    .accessor("child", string()),
            )
    }
}

/// A supertype whose argument refers to a variable out of the declaring class's scope.
///
/// `Target<T> { T value; }`, `Broken<B> extends Target<Elsewhere.Z>`.
pub mod broken {
    use super::*;

    pub const TARGET: &str = "com.example.broken.Target";
    pub const BROKEN: &str = "com.example.broken.Broken";
    pub const ELSEWHERE: &str = "com.example.broken.Elsewhere";

    pub fn graph() -> DeclGraph {
        DeclGraph::new()
            .with(
                ClassDecl::new(TARGET)
                    .type_param("T", vec![])
                    .field("value", TypeRef::var(TARGET, "T")),
            )
            .with(
                ClassDecl::new(BROKEN)
                    .type_param("B", vec![])
                    .extends(TypeRef::class(TARGET, vec![TypeRef::var(ELSEWHERE, "Z")])),
            )
            .with(ClassDecl::new(ELSEWHERE).type_param("Z", vec![]))
    }
}

/// Every fixture merged into one graph; class names do not collide.
pub fn all() -> DeclGraph {
    let mut graph = DeclGraph::new();
    for part in [
        multi_level::graph(),
        f_bounded::graph(),
        structs::graph(),
        diamond::graph(),
        wildcards::graph(),
        nested::graph(),
        shadowing::graph(),
        broken::graph(),
    ] {
        graph.extend(part);
    }
    graph
}
