//! Shared command context: config, consumer, scope, sinks

use std::sync::Arc;

use anyhow::Result;

use bitpm::config::Config;
use bitpm::consumer::Consumer;
use bitpm::domain::entities::Component;
use bitpm::domain::ports::BuildEventSink;
use bitpm::domain::value_objects::BitId;
use bitpm::infrastructure::{
    ConsoleEventSink, FsScope, JsonEventSink, LocalFs, ProcessSpecsRunner,
};

pub struct Workspace {
    pub config: Config,
    pub consumer: Consumer,
    pub scope: FsScope,
    pub verbose: bool,
}

impl Workspace {
    pub fn open(json: bool, verbose: u8) -> Result<Self> {
        let root = std::env::current_dir()?;
        let config = Config::load_or_default(Some(&root));
        report_config_warnings(&root, json);

        let scope_name = config.scope_name(&root);
        BitId::validate_scope_name(&scope_name)?;
        let scope = FsScope::new(config.scope_path(&root), scope_name)
            .with_environments_source(config.environments.source.clone());
        let consumer = Consumer::load(Arc::new(LocalFs::new()), &root)?;
        let verbose = verbose > 0 || config.output.verbosity.is_verbose();

        Ok(Self {
            config,
            consumer,
            scope,
            verbose,
        })
    }

    pub fn runner(&self) -> ProcessSpecsRunner {
        ProcessSpecsRunner::new().with_command(self.config.runner.command.clone())
    }

    /// A versioned id names a stored component; otherwise the inline one
    pub fn resolve(&self, id: &BitId) -> Result<(Component, bool)> {
        if id.version().is_some() {
            return Ok((Component::load_from_scope(&self.scope, id)?, true));
        }
        let dir = self.consumer.inline_dir(id.box_name(), id.name());
        Ok((
            Component::load_from_inline(self.consumer.fs(), &dir, self.consumer.bit_json())?,
            false,
        ))
    }
}

pub fn event_sink(json: bool, verbose: bool) -> Box<dyn BuildEventSink> {
    if json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::stderr(verbose))
    }
}

fn report_config_warnings(root: &std::path::Path, json: bool) {
    let path = bitpm::config::project_config_path(root);
    if json || !path.exists() {
        return;
    }
    if let Ok((_, warnings)) = Config::load_with_warnings(&path) {
        for warning in warnings {
            let location = warning
                .line
                .map(|line| format!("{}:{}", warning.file.display(), line))
                .unwrap_or_else(|| warning.file.display().to_string());
            match warning.suggestion {
                Some(suggestion) => eprintln!(
                    "warning: unknown config key '{}' at {} (did you mean '{}'?)",
                    warning.key, location, suggestion
                ),
                None => eprintln!(
                    "warning: unknown config key '{}' at {}",
                    warning.key, location
                ),
            }
        }
    }
}
