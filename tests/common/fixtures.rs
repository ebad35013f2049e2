//! Plugin environment fixtures.
//!
//! Environments are laid out as `<source>/<box>/<name>/<version>/` and
//! installed into the scope with `--env`.

use super::TestEnv;

pub const ENVIRONMENTS_DIR: &str = "environments-source";
pub const COMPILER_ID: &str = "envs/compilers/upper@1";
pub const PASSING_TESTER_ID: &str = "envs/testers/pass@1";
pub const FAILING_TESTER_ID: &str = "envs/testers/fail@1";

/// Compiler that upper-cases its stdin
pub const UPPER_COMPILER: &str = r#"#!/bin/sh
code=$(tr '[:lower:]' '[:upper:]')
printf '{"code":"%s"}' "$code"
"#;

pub const PASSING_TESTER: &str = r#"#!/bin/sh
printf '{"tests":[{"title":"works","pass":true,"duration":3}],"stats":{"failures":0}}'
"#;

pub const FAILING_TESTER: &str = r#"#!/bin/sh
printf '{"tests":[{"title":"breaks","pass":false,"err":{"message":"expected 1"}}],"stats":{"failures":1}}'
"#;

impl TestEnv {
    /// Write an executable script into an environment directory
    #[cfg(unix)]
    pub fn write_environment_script(&self, id: &str, file: &str, script: &str) {
        use std::os::unix::fs::PermissionsExt;

        let dir = environment_dir(id);
        let relative = format!("{ENVIRONMENTS_DIR}/{dir}/{file}");
        self.write_project_file(&relative, script);
        let path = self.project_path(&relative);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    pub fn write_environment_manifest(&self, id: &str, manifest: &str) {
        let dir = environment_dir(id);
        self.write_project_file(&format!("{ENVIRONMENTS_DIR}/{dir}/plugin.toml"), manifest);
    }

    /// Compiler, passing tester and failing tester, plus project config pointing at them
    #[cfg(unix)]
    pub fn with_standard_environments(self) -> Self {
        self.write_environment_script(COMPILER_ID, "compile.sh", UPPER_COMPILER);
        self.write_environment_manifest(COMPILER_ID, "command = \"compile.sh\"\n");
        self.write_environment_script(PASSING_TESTER_ID, "tester.sh", PASSING_TESTER);
        self.write_environment_manifest(PASSING_TESTER_ID, "entry = \"tester.sh\"\n");
        self.write_environment_script(FAILING_TESTER_ID, "tester.sh", FAILING_TESTER);
        self.write_environment_manifest(FAILING_TESTER_ID, "entry = \"tester.sh\"\n");

        self.write_project_file(
            ".bitpm/config.toml",
            &format!(
                "[scope]\nname = \"acme\"\n\n[environments]\nsource = \"{}\"\n",
                self.project_path(ENVIRONMENTS_DIR).display()
            ),
        );
        self
    }

    pub fn with_bit_json(self, compiler: &str, tester: &str) -> Self {
        self.write_project_file(
            "bit.json",
            &format!(r#"{{"env":{{"compiler":"{compiler}","tester":"{tester}"}}}}"#),
        );
        self
    }
}

/// `envs/compilers/upper@1` -> `compilers/upper/1`
fn environment_dir(id: &str) -> String {
    let (path, version) = id.rsplit_once('@').unwrap();
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() == 3 {
        segments.remove(0);
    }
    format!("{}/{}", segments.join("/"), version)
}
