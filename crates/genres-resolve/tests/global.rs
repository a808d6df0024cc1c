use genres_resolve::{global, install_global, CacheConfig, GlobalError};
use genres_test_utils::fixtures::{self, multi_level};
use genres_types::{MemberId, TypeRef};
use pretty_assertions::assert_eq;

// One test per binary: the process-wide resolver can be installed only once.
#[test]
fn process_wide_resolver_installs_once() {
    assert!(global().is_none());

    let installed = install_global(multi_level::graph().into_provider(), CacheConfig::default())
        .unwrap();
    let ty = installed
        .resolve_member_id(
            &TypeRef::raw(multi_level::C),
            &MemberId::field(multi_level::A, "value"),
        )
        .unwrap();
    assert_eq!(ty, fixtures::integer());

    let again = install_global(fixtures::all().into_provider(), CacheConfig::disabled());
    assert!(matches!(again, Err(GlobalError::AlreadyInstalled)));

    let current = global().unwrap();
    assert!(std::ptr::eq(current, installed));
    assert_eq!(current.member_entries(), 1);
}
