//! Subprocess specs runner
//!
//! Writes the implementation and specs into a temporary directory and runs
//! the tester against them:
//!
//! ```text
//! [runner.command] <tester> <dir>/impl.js <dir>/spec.js
//! ```
//!
//! The tester prints raw results as JSON on stdout.

use std::process::Command;

use tempfile::TempDir;

use crate::constants::{DEFAULT_IMPL_NAME, DEFAULT_SPECS_NAME};
use crate::domain::entities::RawResults;
use crate::domain::ports::{RunRequest, RunnerError, SpecsRunner};

pub const TESTER_ID_ENV: &str = "BITPM_TESTER_ID";

#[derive(Debug, Clone, Default)]
pub struct ProcessSpecsRunner {
    command: Option<String>,
}

impl ProcessSpecsRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpreter used to launch testers (e.g. `node`)
    pub fn with_command(mut self, command: Option<String>) -> Self {
        self.command = command;
        self
    }
}

impl SpecsRunner for ProcessSpecsRunner {
    fn run(&self, request: RunRequest<'_>) -> Result<RawResults, RunnerError> {
        let workdir = TempDir::new()?;
        let impl_path = workdir.path().join(DEFAULT_IMPL_NAME);
        let specs_path = workdir.path().join(DEFAULT_SPECS_NAME);
        std::fs::write(&impl_path, request.impl_src)?;
        std::fs::write(&specs_path, request.specs_src)?;

        let mut command = match &self.command {
            Some(interpreter) => {
                let mut command = Command::new(interpreter);
                command.arg(request.tester_file_path);
                command
            }
            None => Command::new(request.tester_file_path),
        };

        let output = command
            .arg(&impl_path)
            .arg(&specs_path)
            .current_dir(workdir.path())
            .env(TESTER_ID_ENV, request.tester_id.to_string())
            .output()
            .map_err(|e| RunnerError::Launch {
                tester: request.tester_id.to_string(),
                message: e.to_string(),
            })?;

        match serde_json::from_slice::<RawResults>(&output.stdout) {
            Ok(raw) => Ok(raw),
            Err(_) if !output.status.success() => Err(RunnerError::Crashed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Err(e) => Err(RunnerError::InvalidResults {
                message: e.to_string(),
            }),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::ports::{
        InstallRequest, LoadOptions, Plugin, Scope, ScopeError, ScopeResult, SourceRepository,
    };
    use crate::domain::value_objects::BitId;
    use std::os::unix::fs::PermissionsExt;
    use std::path::{Path, PathBuf};
    use tempfile::tempdir;

    struct NoScope;

    impl Scope for NoScope {
        fn name(&self) -> &str {
            "test"
        }
        fn install_environment(&self, _request: &InstallRequest<'_>) -> ScopeResult<()> {
            Ok(())
        }
        fn load_plugin(&self, id: &BitId, _o: LoadOptions) -> ScopeResult<Box<dyn Plugin>> {
            Err(ScopeError::EnvironmentNotFound { id: id.to_string() })
        }
        fn load_tester_path(&self, id: &BitId, _o: LoadOptions) -> ScopeResult<PathBuf> {
            Err(ScopeError::EnvironmentNotFound { id: id.to_string() })
        }
        fn sources(&self) -> &dyn SourceRepository {
            unreachable!("runner never touches sources")
        }
    }

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("tester.sh");
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn run(tester: &Path) -> Result<RawResults, RunnerError> {
        let id = BitId::parse("envs/testers/sh@1").unwrap();
        ProcessSpecsRunner::new().run(RunRequest {
            scope: &NoScope,
            tester_file_path: tester,
            impl_src: "module.exports = 1;",
            specs_src: "it('works')",
            tester_id: &id,
        })
    }

    #[test]
    fn parses_results_from_stdout() {
        let dir = tempdir().unwrap();
        let tester = script(
            dir.path(),
            "test -f \"$1\" && test -f \"$2\" || exit 9\n\
             printf '{\"tests\":[{\"title\":\"works\",\"pass\":true,\"duration\":3}],\"stats\":{\"failures\":0}}'\n",
        );

        let raw = run(&tester).unwrap();
        assert_eq!(raw.tests.len(), 1);
        assert!(raw.tests[0].pass);
    }

    #[test]
    fn crash_without_results_is_reported() {
        let dir = tempdir().unwrap();
        let tester = script(dir.path(), "echo 'cannot load' >&2\nexit 2\n");

        let err = run(&tester).unwrap_err();
        assert!(matches!(
            err,
            RunnerError::Crashed { status: Some(2), ref stderr } if stderr == "cannot load"
        ));
    }

    #[test]
    fn garbage_output_is_invalid_results() {
        let dir = tempdir().unwrap();
        let tester = script(dir.path(), "echo 'all good'\n");

        let err = run(&tester).unwrap_err();
        assert!(matches!(err, RunnerError::InvalidResults { .. }));
    }

    #[test]
    fn missing_tester_fails_to_launch() {
        let dir = tempdir().unwrap();
        let err = run(&dir.path().join("missing.sh")).unwrap_err();
        assert!(matches!(err, RunnerError::Launch { .. }));
    }

    #[test]
    fn interpreter_receives_tester_path() {
        let dir = tempdir().unwrap();
        let tester = dir.path().join("tester.sh");
        std::fs::write(&tester, "printf '{\"tests\":[],\"stats\":{}}'\n").unwrap();

        let id = BitId::parse("envs/testers/sh@1").unwrap();
        let raw = ProcessSpecsRunner::new()
            .with_command(Some("sh".to_string()))
            .run(RunRequest {
                scope: &NoScope,
                tester_file_path: &tester,
                impl_src: "",
                specs_src: "",
                tester_id: &id,
            })
            .unwrap();
        assert!(raw.tests.is_empty());
    }
}
