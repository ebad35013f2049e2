//! Build orchestration
//!
//! Compiles a component's implementation through its compiler plugin and
//! returns a snapshot carrying the resulting distribution.

use crate::consumer::Consumer;
use crate::domain::entities::{Component, Dist};
use crate::domain::ports::{BuildEvent, BuildEventSink, InstallRequest, LoadOptions, NoopEventSink, Scope};
use crate::error::{BitError, BitResult};

/// Options for [`Component::build`]
#[derive(Clone, Copy)]
pub struct BuildOptions<'a> {
    /// Install the compiler environment before loading it
    pub environment: bool,
    /// Persist the distribution to the scope
    pub save: bool,
    /// Consumer project, if building from a working directory
    pub consumer: Option<&'a Consumer>,
    pub verbose: bool,
    pub events: &'a dyn BuildEventSink,
}

impl Default for BuildOptions<'_> {
    fn default() -> Self {
        Self {
            environment: false,
            save: false,
            consumer: None,
            verbose: false,
            events: &NoopEventSink,
        }
    }
}

impl<'a> BuildOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_environment(mut self, environment: bool) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
        self
    }

    pub fn with_consumer(mut self, consumer: Option<&'a Consumer>) -> Self {
        self.consumer = consumer;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_events(mut self, events: &'a dyn BuildEventSink) -> Self {
        self.events = events;
        self
    }
}

/// Outcome of a successful build
#[derive(Debug, Clone)]
pub struct Built {
    /// Component snapshot with `dist` attached
    pub component: Component,
    /// Compiled code
    pub code: String,
}

impl Component {
    /// Compile the implementation
    ///
    /// Returns `Ok(None)` without touching the scope when the component has
    /// no compiler. The receiver is never modified; on success the returned
    /// [`Built::component`] carries the new `dist`.
    pub fn build(&self, scope: &dyn Scope, options: &BuildOptions<'_>) -> BitResult<Option<Built>> {
        let events = options.events;
        let Some(compiler_id) = self.compiler_id() else {
            events.on_event(BuildEvent::BuildSkipped {
                component: self.display_name(),
            });
            return Ok(None);
        };

        if options.environment {
            events.on_event(BuildEvent::EnvironmentInstalling {
                ids: vec![compiler_id.to_string()],
            });
            scope.install_environment(&InstallRequest {
                ids: &[compiler_id],
                consumer: options.consumer,
                verbose: options.verbose,
            })?;
        }

        let plugin = scope.load_plugin(compiler_id, LoadOptions::for_consumer(options.consumer))?;
        let compiler = plugin
            .compiler()
            .ok_or_else(|| BitError::InvalidCompiler {
                id: compiler_id.to_string(),
            })?;

        if events.wants_detailed_events() {
            events.on_event(BuildEvent::CompilerLoaded {
                component: self.display_name(),
                compiler: compiler_id.to_string(),
            });
        }

        let compiled = compiler.compile(self.implementation().src()?)?;
        events.on_event(BuildEvent::Compiled {
            component: self.display_name(),
            bytes: compiled.code.len(),
        });

        let component = self
            .clone()
            .with_dist(Some(Dist::new(compiled.code.clone(), compiled.map)));

        if options.save {
            scope.sources().update_dist(&component)?;
            events.on_event(BuildEvent::DistSaved {
                component: component.display_name(),
            });
        }

        Ok(Some(Built {
            component,
            code: compiled.code,
        }))
    }
}
