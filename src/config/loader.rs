//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::BitResult;

use super::types::{Config, Verbosity, CONFIG_DIRNAME};

const CONFIG_FILE: &str = "config.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BitResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// `<project>/.bitpm/config.toml`
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIRNAME).join(CONFIG_FILE)
}

/// `<config_dir>/bitpm/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("bitpm").join(CONFIG_FILE))
}

/// Load from project config, user config, or defaults
pub fn load_or_default(project_root: Option<&Path>) -> Config {
    let candidates = project_root
        .map(project_config_path)
        .into_iter()
        .chain(user_config_path());

    for path in candidates {
        if path.exists() {
            if let Ok(config) = Config::load(&path) {
                return with_env_overrides(config);
            }
        }
    }

    with_env_overrides(Config::default())
}

/// Apply environment variable overrides (BITPM_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    if let Ok(path) = std::env::var("BITPM_SCOPE_PATH") {
        config.scope.path = Some(PathBuf::from(path));
    }

    if let Ok(name) = std::env::var("BITPM_SCOPE_NAME") {
        config.scope.name = Some(name);
    }

    if let Ok(source) = std::env::var("BITPM_ENVIRONMENTS") {
        config.environments.source = Some(PathBuf::from(source));
    }

    if let Ok(command) = std::env::var("BITPM_RUNNER") {
        config.runner.command = (!command.trim().is_empty()).then_some(command);
    }

    if let Ok(verbosity) = std::env::var("BITPM_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "scope",
        "path",
        "name",
        "environments",
        "source",
        "runner",
        "command",
        "output",
        "verbosity",
    ];

    CANDIDATES
        .iter()
        .map(|candidate| (candidate, levenshtein(unknown, candidate)))
        .min_by_key(|(_, dist)| *dist)
        .filter(|(_, dist)| *dist <= 2)
        .map(|(candidate, _)| candidate.to_string())
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
