//! Component construction paths: authoring, inline load, scope load

use std::path::Path;

use crate::consumer::{BitJson, ConsumerBitJson};
use crate::constants::DEFAULT_BIT_VERSION;
use crate::domain::entities::{Component, Impl, Misc, Specs};
use crate::domain::ports::{LoadOptions, Scope, SharedFs};
use crate::domain::value_objects::BitId;
use crate::error::{BitError, BitResult};

/// Input for [`Component::create`]
#[derive(Debug, Clone, Copy)]
pub struct CreateOptions<'a> {
    pub name: &'a str,
    pub box_name: &'a str,
    pub scope_name: Option<&'a str>,
    pub with_specs: bool,
    pub consumer_bit_json: &'a ConsumerBitJson,
}

/// Starter content from an environment, when it is installed and has one
fn template(scope: &dyn Scope, id: Option<&BitId>, name: &str) -> Option<String> {
    let plugin = scope
        .load_plugin(id?, LoadOptions { bare_scope: true })
        .ok()?;
    plugin.template(name)
}

impl Component {
    /// Scaffold a new component from the consumer's defaults
    pub fn create(options: &CreateOptions<'_>, scope: &dyn Scope) -> BitResult<Self> {
        let bit_json = options.consumer_bit_json;
        let compiler_id = bit_json.compiler_id()?;
        let tester_id = bit_json.tester_id()?;

        let implementation = Impl::create(
            options.name,
            template(scope, compiler_id.as_ref(), options.name),
        );
        let specs = options.with_specs.then(|| {
            Specs::create(
                options.name,
                template(scope, tester_id.as_ref(), options.name),
            )
        });

        Ok(Component::new(options.name, options.box_name, implementation)
            .with_version(Some(DEFAULT_BIT_VERSION))
            .with_scope(options.scope_name.map(str::to_string))
            .with_impl_file(bit_json.impl_basename())
            .with_specs_file(bit_json.spec_basename())
            .with_misc_files(bit_json.misc_files().to_vec())
            .with_compiler_id(compiler_id)
            .with_tester_id(tester_id)
            .with_specs(specs))
    }

    /// Reconstruct a component from `<box>/<name>` working directory
    ///
    /// Artifacts are referenced by path and read through `fs` on first
    /// access. Specs are attached only when the specs file exists.
    pub fn load_from_inline(
        fs: &SharedFs,
        bit_dir: &Path,
        consumer_bit_json: &ConsumerBitJson,
    ) -> BitResult<Self> {
        let not_found = || BitError::ComponentNotFoundInline {
            path: bit_dir.to_path_buf(),
        };
        if !fs.exists(bit_dir) {
            return Err(not_found());
        }

        let name = bit_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(not_found)?;
        let box_name = bit_dir
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .ok_or_else(not_found)?;

        let bit_json = BitJson::load(fs.as_ref(), bit_dir, consumer_bit_json)?;
        let specs_path = bit_dir.join(bit_json.spec_basename());
        let misc_files = bit_json.misc_files();

        Ok(Component::new(
            name,
            box_name,
            Impl::load(fs.clone(), bit_dir.join(bit_json.impl_basename())),
        )
        .with_impl_file(bit_json.impl_basename())
        .with_specs_file(bit_json.spec_basename())
        .with_misc_files(bit_json.misc_files().to_vec())
        .with_compiler_id(bit_json.compiler_id()?)
        .with_tester_id(bit_json.tester_id()?)
        .with_dependencies(bit_json.dependencies()?)
        .with_package_dependencies(bit_json.package_dependencies().clone())
        .with_specs(
            fs.exists(&specs_path)
                .then(|| Specs::load(fs.clone(), specs_path)),
        )
        .with_misc(
            (!misc_files.is_empty()).then(|| Misc::load(fs.clone(), bit_dir, misc_files)),
        ))
    }

    /// Load a stored component; a versionless id means the latest version
    pub fn load_from_scope(scope: &dyn Scope, id: &BitId) -> BitResult<Self> {
        Ok(scope.sources().get(id)?)
    }
}
