use genres_resolve::ResolutionCache;
use genres_test_utils::fixtures::{self, multi_level, structs};
use genres_test_utils::DeclGraph;
use genres_types::{MemberId, TypeRef};
use pretty_assertions::assert_eq;

const GRAPH: &str = r#"[
  {
    "id": "com.example.Box",
    "type_params": [{ "name": "T" }],
    "members": [
      {
        "id": { "owner": "com.example.Box", "name": "contents", "role": "accessor" },
        "ty": { "array": { "variable": { "name": "T", "owner": "com.example.Box" } } }
      }
    ]
  },
  {
    "id": "com.example.IntBox",
    "supertypes": [
      { "parameterized": { "raw": "com.example.Box", "args": [{ "raw": "java.lang.Integer" }] } }
    ]
  }
]"#;

#[test]
fn graph_loaded_from_json_resolves() {
    let graph = DeclGraph::from_json(GRAPH).unwrap();
    assert_eq!(graph.len(), 2);

    let cache = ResolutionCache::new(graph.into_provider());
    let ty = cache
        .resolve_member_id(
            &TypeRef::raw("com.example.IntBox"),
            &MemberId::accessor("com.example.Box", "contents"),
        )
        .unwrap();
    assert_eq!(ty, TypeRef::array(fixtures::integer()));
}

#[test]
fn fixture_graphs_survive_json_interchange() {
    for graph in [multi_level::graph(), structs::graph()] {
        let reloaded = DeclGraph::from_json(&graph.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.len(), graph.len());

        let original = ResolutionCache::new(graph.into_provider());
        let reloaded = ResolutionCache::new(reloaded.into_provider());
        for (leaf, member) in [
            (TypeRef::raw(multi_level::C), MemberId::field(multi_level::A, "value")),
            (
                TypeRef::raw(structs::PARENT_WITH_VALUE),
                MemberId::accessor(structs::PARENT, "child"),
            ),
        ] {
            assert_eq!(
                reloaded.resolve_member_id(&leaf, &member),
                original.resolve_member_id(&leaf, &member)
            );
        }
    }
}
