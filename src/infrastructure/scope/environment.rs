//! Installed plugin environments
//!
//! Each environment directory carries a `plugin.toml`:
//!
//! ```toml
//! command = "node"            # compiler: reads source on stdin,
//! args = ["compile.js"]       # prints {"code", "map"} on stdout
//! entry = "tester.js"         # tester executable
//! template = "template.js"    # starter content, `{{name}}` is substituted
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use crate::domain::ports::{Compiled, Compiler, Plugin, PluginError, ScopeError, ScopeResult};

pub const MANIFEST_FILE: &str = "plugin.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PluginManifest {
    #[serde(default)]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
}

impl PluginManifest {
    pub fn load(id: &str, dir: &Path) -> ScopeResult<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = std::fs::read_to_string(&path).map_err(|e| ScopeError::InvalidPlugin {
            id: id.to_string(),
            message: format!("{}: {}", path.display(), e),
        })?;
        toml::from_str(&content).map_err(|e| ScopeError::InvalidPlugin {
            id: id.to_string(),
            message: e.to_string(),
        })
    }
}

/// Compiler executed as a subprocess of the environment directory
#[derive(Debug, Clone)]
pub struct ProcessCompiler {
    id: String,
    program: PathBuf,
    args: Vec<String>,
    cwd: PathBuf,
}

impl ProcessCompiler {
    pub fn new(id: impl Into<String>, dir: &Path, command: &str, args: Vec<String>) -> Self {
        let local = dir.join(command);
        Self {
            id: id.into(),
            program: if local.is_file() {
                local
            } else {
                PathBuf::from(command)
            },
            args,
            cwd: dir.to_path_buf(),
        }
    }

    fn execution_error(&self, message: impl Into<String>) -> PluginError {
        PluginError::Execution {
            id: self.id.clone(),
            message: message.into(),
        }
    }
}

impl Compiler for ProcessCompiler {
    fn compile(&self, src: &str) -> Result<Compiled, PluginError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.execution_error(format!("failed to spawn: {}", e)))?;

        let stdin = child.stdin.take();
        let output = std::thread::scope(|s| {
            let writer = s.spawn(move || match stdin {
                Some(mut stdin) => match stdin.write_all(src.as_bytes()) {
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                },
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            output.and_then(|output| written.map(|_| output))
        })
        .map_err(|e| self.execution_error(e.to_string()))?;

        if !output.status.success() {
            return Err(self.execution_error(format!(
                "exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| PluginError::InvalidOutput {
            id: self.id.clone(),
            message: e.to_string(),
        })
    }
}

/// A plugin loaded from an installed environment directory
#[derive(Debug)]
pub struct EnvironmentPlugin {
    dir: PathBuf,
    manifest: PluginManifest,
    compiler: Option<ProcessCompiler>,
}

impl EnvironmentPlugin {
    pub fn load(id: &str, dir: &Path) -> ScopeResult<Self> {
        let manifest = PluginManifest::load(id, dir)?;
        let compiler = manifest
            .command
            .as_deref()
            .map(|command| ProcessCompiler::new(id, dir, command, manifest.args.clone()));
        Ok(Self {
            dir: dir.to_path_buf(),
            manifest,
            compiler,
        })
    }

    pub fn manifest(&self) -> &PluginManifest {
        &self.manifest
    }

    /// Tester executable; `None` when the manifest has no `entry`
    pub fn entry_path(&self) -> Option<PathBuf> {
        self.manifest.entry.as_ref().map(|entry| self.dir.join(entry))
    }
}

impl Plugin for EnvironmentPlugin {
    fn compiler(&self) -> Option<&dyn Compiler> {
        self.compiler.as_ref().map(|c| c as &dyn Compiler)
    }

    fn template(&self, name: &str) -> Option<String> {
        let file = self.manifest.template.as_ref()?;
        let content = std::fs::read_to_string(self.dir.join(file)).ok()?;
        Some(content.replace("{{name}}", name))
    }
}
