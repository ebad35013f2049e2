//! Library-level round trips through the directory-backed scope and the
//! inline working directory.

use std::io::Cursor;
use std::sync::Arc;

use tempfile::tempdir;

use bitpm::application::{export, put};
use bitpm::consumer::BitJson;
use bitpm::domain::entities::{Component, Impl, Specs};
use bitpm::domain::ports::{Scope, SharedFs, SourceRepository};
use bitpm::domain::value_objects::BitId;
use bitpm::infrastructure::{FsScope, LocalFs};

fn sample() -> Component {
    versioned(1, "module.exports = 1;")
}

fn versioned(version: u32, src: &str) -> Component {
    Component::new("foo", "utils", Impl::new(src))
        .with_scope(Some("acme".to_string()))
        .with_version(Some(version))
        .with_specs(Some(Specs::new("it('works');")))
        .with_compiler_id(Some(BitId::parse("envs/compilers/babel@2").unwrap()))
}

#[test]
fn exported_record_imports_into_another_scope() {
    let dir = tempdir().unwrap();
    let target = FsScope::new(dir.path(), "mirror");

    let record = export(&sample()).unwrap();
    let ids = put(&target, Cursor::new(format!("{record}\n\n"))).unwrap();
    assert_eq!(ids, vec![BitId::parse("acme/utils/foo@1").unwrap()]);

    let loaded = Component::load_from_scope(&target, &ids[0]).unwrap();
    assert_eq!(loaded.implementation().src().unwrap(), "module.exports = 1;");
    assert_eq!(loaded.specs().unwrap().src().unwrap(), "it('works');");
    assert_eq!(
        loaded.compiler_id().map(ToString::to_string).as_deref(),
        Some("envs/compilers/babel@2")
    );

    assert_eq!(target.sources().latest_version("utils", "foo").unwrap(), Some(1));
    let log = target.log("utils", "foo", 1).unwrap().unwrap();
    assert_eq!(log.message, "put acme/utils/foo@1");
    assert_eq!(target.name(), "mirror");
}

#[test]
fn versionless_id_loads_latest_from_scope() {
    let dir = tempdir().unwrap();
    let scope = FsScope::new(dir.path(), "acme");
    let first = export(&sample()).unwrap();
    let second = export(&versioned(2, "module.exports = 2;")).unwrap();
    put(&scope, Cursor::new(format!("{first}\n{second}\n"))).unwrap();

    let latest = Component::load_from_scope(&scope, &BitId::parse("utils/foo").unwrap()).unwrap();
    assert_eq!(latest.version(), Some(2));
    assert_eq!(latest.implementation().src().unwrap(), "module.exports = 2;");
}

#[test]
fn written_component_loads_back_from_inline_dir() {
    let dir = tempdir().unwrap();
    let bit_dir = dir.path().join("utils").join("foo");

    let report = sample().write(&LocalFs::new(), &bit_dir, true, false).unwrap();
    assert_eq!(report.written, 3);

    let local_fs: SharedFs = Arc::new(LocalFs::new());
    let loaded = Component::load_from_inline(&local_fs, &bit_dir, &BitJson::default()).unwrap();
    assert_eq!(loaded.display_name(), "utils/foo");
    assert_eq!(loaded.implementation().src().unwrap(), "module.exports = 1;");
    assert_eq!(loaded.specs().unwrap().src().unwrap(), "it('works');");
    assert_eq!(
        loaded.compiler_id().map(ToString::to_string).as_deref(),
        Some("envs/compilers/babel@2")
    );
}
