use super::*;
use crate::domain::entities::source::MiscRecord;
use crate::domain::entities::RawResults;
use serde_json::json;

fn foo() -> Component {
    Component::new("foo", "utils", Impl::new("module.exports=1;"))
        .with_version(Some(1))
        .with_scope(Some("myscope".to_string()))
}

fn fully_populated() -> Component {
    let mut deps = BitIds::new();
    deps.add(BitId::parse("myscope/utils/bar@2").unwrap());
    deps.add(BitId::parse("other/strings/pad@1").unwrap());

    let mut package_deps = PackageDependencies::new();
    package_deps.insert("lodash".to_string(), "^4.17.0".to_string());

    let raw: RawResults = serde_json::from_value(json!({
        "tests": [{"title": "works", "pass": true, "duration": 4}],
        "stats": {"start": "2024-03-01T10:00:00Z", "end": "2024-03-01T10:00:01Z"}
    }))
    .unwrap();

    Component::new(
        "foo",
        "utils",
        Impl::new("/**\n * Returns one\n */\nfunction foo() { return 1; }\n"),
    )
    .with_version(Some(3))
    .with_scope(Some("myscope".to_string()))
    .with_impl_file("index.js")
    .with_specs_file("index.spec.js")
    .with_misc_files(vec!["README.md".to_string()])
    .with_compiler_id(Some(BitId::parse("envs/compilers/babel@1").unwrap()))
    .with_tester_id(Some(BitId::parse("envs/testers/mocha@2").unwrap()))
    .with_dependencies(deps)
    .with_package_dependencies(package_deps)
    .with_specs(Some(Specs::new("describe('foo', () => {});")))
    .with_misc(Some(Misc::deserialize(vec![MiscRecord {
        name: "README.md".to_string(),
        content: "# foo".to_string(),
    }])))
    .with_dist(Some(Dist::new("var foo=1;", Some(json!({"version": 3})))))
    .with_specs_results(Some(SpecsResults::create_from_raw(raw)))
    .with_license(Some(License::new("MIT")))
    .with_deprecate(Some("use utils/bar".to_string()))
}

#[test]
fn id_requires_scope_and_version() {
    let no_scope = Component::new("foo", "utils", Impl::new("")).with_version(Some(1));
    assert!(matches!(
        no_scope.id(),
        Err(BitError::IdentityIncomplete { .. })
    ));

    let no_version =
        Component::new("foo", "utils", Impl::new("")).with_scope(Some("myscope".to_string()));
    assert!(matches!(
        no_version.id(),
        Err(BitError::IdentityIncomplete { .. })
    ));
}

#[test]
fn id_is_canonical_and_parseable() {
    let id = foo().id().unwrap();
    insta::assert_snapshot!(id.to_string(), @"myscope/utils/foo@1");
    assert_eq!(BitId::parse(&id.to_string()).unwrap(), id);
}

#[test]
fn empty_box_falls_back_to_default() {
    let component = Component::new("foo", "", Impl::new(""));
    assert_eq!(component.box_name(), DEFAULT_BOX_NAME);
}

#[test]
fn dependencies_default_to_empty_set() {
    assert!(foo().dependencies().is_empty());
}

#[test]
fn specs_absent_is_distinct_from_empty() {
    let absent = foo();
    assert!(absent.specs().is_none());
    assert_eq!(absent.runnable_specs().unwrap(), None);

    let empty = foo().with_specs(Some(Specs::new("")));
    assert!(empty.specs().is_some());
    assert_eq!(empty.runnable_specs().unwrap(), None);

    let whitespace = foo().with_specs(Some(Specs::new("\n")));
    assert_eq!(whitespace.runnable_specs().unwrap(), Some("\n"));
}

#[test]
fn docs_are_parsed_lazily_from_impl() {
    let component = fully_populated();
    let docs = component.docs().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, "foo");
    assert_eq!(docs[0].description, "Returns one");
}

#[test]
fn object_round_trip_is_exact() {
    let original = fully_populated().to_object().unwrap();
    let restored = Component::from_object(original.clone()).unwrap();
    assert_eq!(restored.to_object().unwrap(), original);
}

#[test]
fn json_round_trip_is_exact() {
    let component = fully_populated();
    let json = component.to_json().unwrap();
    let restored = Component::from_json(&json).unwrap();
    assert_eq!(restored.to_json().unwrap(), json);
}

#[test]
fn object_uses_wire_field_names() {
    let value = serde_json::to_value(foo().to_object().unwrap()).unwrap();
    assert_eq!(value["box"], json!("utils"));
    assert_eq!(value["impl"], json!("module.exports=1;"));
    assert_eq!(value["version"], json!("1"));
    assert_eq!(value["implFile"], json!("impl.js"));
    assert_eq!(value["compilerId"], json!(null));
    assert_eq!(value["specs"], json!(null));
    assert_eq!(value["dist"], json!(null));
}

#[test]
fn from_object_coerces_numeric_version() {
    let component = Component::from_json(
        r#"{"name":"foo","box":"utils","version":7,"scope":"s","impl":"x"}"#,
    )
    .unwrap();
    assert_eq!(component.version(), Some(7));
    assert_eq!(component.impl_file(), DEFAULT_IMPL_NAME);
    assert_eq!(component.specs_file(), DEFAULT_SPECS_NAME);
}

#[test]
fn from_object_rejects_non_numeric_version() {
    let err = Component::from_json(r#"{"name":"foo","box":"utils","version":"latest","impl":"x"}"#)
        .unwrap_err();
    assert!(matches!(err, BitError::InvalidVersion { .. }));
}

#[test]
fn from_object_treats_none_plugin_as_absent() {
    let component =
        Component::from_json(r#"{"name":"foo","box":"utils","compilerId":"none","impl":"x"}"#)
            .unwrap();
    assert!(component.compiler_id().is_none());
}

#[test]
fn from_object_rejects_malformed_plugin_id() {
    let err =
        Component::from_json(r#"{"name":"foo","box":"utils","testerId":"a/b/c/d","impl":"x"}"#)
            .unwrap_err();
    assert!(matches!(err, BitError::MalformedId { .. }));
}

#[test]
fn blank_license_has_no_content() {
    let component = foo().with_license(Some(License::new("")));
    assert!(component.license_with_content().unwrap().is_none());
}
