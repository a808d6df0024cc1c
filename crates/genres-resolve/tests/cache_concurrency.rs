use std::sync::{Arc, Barrier};
use std::thread;

use genres_resolve::ResolutionCache;
use genres_test_utils::fixtures::{self, multi_level, structs};
use genres_test_utils::{CountingProvider, DeclGraph};
use genres_types::{MemberId, TypeRef};
use pretty_assertions::assert_eq;

#[test]
fn concurrent_resolution_of_one_member_agrees() {
    let cache = Arc::new(ResolutionCache::new(multi_level::graph().into_provider()));
    let leaf = TypeRef::raw(multi_level::C);
    let member = MemberId::field(multi_level::A, "value");

    let threads = 32;
    let barrier = Arc::new(Barrier::new(threads));
    let mut handles = Vec::with_capacity(threads);
    for _ in 0..threads {
        let cache = cache.clone();
        let barrier = barrier.clone();
        let leaf = leaf.clone();
        let member = member.clone();
        handles.push(thread::spawn(move || {
            barrier.wait();
            cache.resolve_member_id(&leaf, &member).unwrap()
        }));
    }

    for handle in handles {
        assert_eq!(handle.join().unwrap(), fixtures::integer());
    }
    assert_eq!(cache.context_entries(), 1);
    assert_eq!(cache.member_entries(), 1);
    // C, B, A and the undeclared java.lang.Object.
    assert_eq!(cache.declaration_entries(), 4);

    let stats = cache.stats();
    assert_eq!(stats.member_hits + stats.member_misses, threads as u64);
}

#[test]
fn concurrent_contexts_share_one_retained_value() {
    let cache = Arc::new(ResolutionCache::new(structs::graph().into_provider()));
    let leaf = TypeRef::raw(structs::ABSTRACT_PARENT_WITH_VALUE);

    let threads = 16;
    let barrier = Arc::new(Barrier::new(threads));
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let cache = cache.clone();
            let barrier = barrier.clone();
            let leaf = leaf.clone();
            thread::spawn(move || {
                barrier.wait();
                cache.get_context(&leaf).unwrap()
            })
        })
        .collect();

    let contexts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let retained = cache.get_context(&leaf).unwrap();
    for ctx in &contexts {
        assert_eq!(**ctx, *retained);
    }
    assert_eq!(cache.context_entries(), 1);
}

#[test]
fn mixed_queries_from_many_threads() {
    let provider = Arc::new(CountingProvider::new(fixtures::all()));
    let cache = Arc::new(ResolutionCache::new(provider.clone()));

    let queries: Vec<(TypeRef, MemberId, TypeRef)> = vec![
        (
            TypeRef::raw(multi_level::C),
            MemberId::field(multi_level::A, "value"),
            fixtures::integer(),
        ),
        (
            TypeRef::raw(structs::PARENT_WITH_VALUE),
            MemberId::accessor(structs::PARENT, "child"),
            structs::generic_value(fixtures::integer()),
        ),
        (
            TypeRef::raw(structs::ABSTRACT_PARENT_WITH_VALUE),
            MemberId::accessor(structs::PARENT, "child"),
            structs::generic_value(fixtures::string()),
        ),
        (
            TypeRef::raw(structs::INHERITED_WITH_VALUE),
            MemberId::field(structs::INHERITED, "items"),
            TypeRef::class(fixtures::LIST, vec![fixtures::integer()]),
        ),
    ];
    let queries = Arc::new(queries);

    let threads = 24;
    let handles: Vec<_> = (0..threads)
        .map(|i| {
            let cache = cache.clone();
            let queries = queries.clone();
            thread::spawn(move || {
                for round in 0..queries.len() {
                    let (leaf, member, expected) = &queries[(i + round) % queries.len()];
                    assert_eq!(&cache.resolve_member_id(leaf, member).unwrap(), expected);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(cache.context_entries(), queries.len());
    assert_eq!(cache.member_entries(), queries.len());
    // Each class is fetched at least once, and by at most every thread in a race.
    let lookups = provider.lookups();
    assert!(lookups >= cache.declaration_entries());
    assert!(lookups <= cache.declaration_entries() * threads);
}

#[test]
fn cache_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResolutionCache>();
    assert_send_sync::<DeclGraph>();
}
