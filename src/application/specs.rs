//! Specs orchestration
//!
//! Compiles implementation and specs (when a compiler is set), hands them to
//! a [`SpecsRunner`] with the tester's executable path and normalizes the
//! raw results.

use crate::consumer::Consumer;
use crate::domain::entities::{Component, SpecsResults};
use crate::domain::ports::{
    BuildEvent, BuildEventSink, Compiler, InstallRequest, LoadOptions, NoopEventSink, RunRequest,
    Scope, SpecsRunner,
};
use crate::domain::value_objects::BitId;
use crate::error::{BitError, BitResult};

/// Options for [`Component::run_specs`]
#[derive(Clone, Copy)]
pub struct SpecsOptions<'a> {
    /// Fail with [`BitError::SpecsFailed`] when the specs do not pass
    pub reject_on_failure: bool,
    pub consumer: Option<&'a Consumer>,
    /// Install compiler and tester environments first
    pub environment: bool,
    /// Persist the results to the scope
    pub save: bool,
    pub verbose: bool,
    pub events: &'a dyn BuildEventSink,
}

impl Default for SpecsOptions<'_> {
    fn default() -> Self {
        Self {
            reject_on_failure: false,
            consumer: None,
            environment: false,
            save: false,
            verbose: false,
            events: &NoopEventSink,
        }
    }
}

impl<'a> SpecsOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reject_on_failure(mut self, reject: bool) -> Self {
        self.reject_on_failure = reject;
        self
    }

    pub fn with_consumer(mut self, consumer: Option<&'a Consumer>) -> Self {
        self.consumer = consumer;
        self
    }

    pub fn with_environment(mut self, environment: bool) -> Self {
        self.environment = environment;
        self
    }

    pub fn with_save(mut self, save: bool) -> Self {
        self.save = save;
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

/// Outcome of a completed specs run
#[derive(Debug, Clone)]
pub struct SpecsRun {
    /// Component snapshot with `specs_results` attached
    pub component: Component,
    pub results: SpecsResults,
}

fn compile_or_pass(compiler: Option<&dyn Compiler>, src: &str) -> BitResult<String> {
    match compiler {
        Some(compiler) => Ok(compiler.compile(src)?.code),
        None => Ok(src.to_string()),
    }
}

impl Component {
    /// Run the component's specs
    ///
    /// Returns `Ok(None)` when there is no tester or no runnable specs, even
    /// with `reject_on_failure`. Plugin and runner failures surface as their
    /// own errors, distinct from [`BitError::SpecsFailed`].
    pub fn run_specs(
        &self,
        scope: &dyn Scope,
        runner: &dyn SpecsRunner,
        options: &SpecsOptions<'_>,
    ) -> BitResult<Option<SpecsRun>> {
        let events = options.events;
        let skip = |reason: &str| -> BitResult<Option<SpecsRun>> {
            events.on_event(BuildEvent::SpecsSkipped {
                component: self.display_name(),
                reason: reason.to_string(),
            });
            Ok(None)
        };

        let Some(tester_id) = self.tester_id() else {
            return skip("no tester");
        };
        let Some(specs_src) = self.runnable_specs()? else {
            return skip("no specs");
        };

        if options.environment {
            let ids: Vec<&BitId> = self.compiler_id().into_iter().chain([tester_id]).collect();
            events.on_event(BuildEvent::EnvironmentInstalling {
                ids: ids.iter().map(|id| id.to_string()).collect(),
            });
            scope.install_environment(&InstallRequest {
                ids: &ids,
                consumer: options.consumer,
                verbose: options.verbose,
            })?;
        }

        let load_options = LoadOptions::for_consumer(options.consumer);
        let tester_path = scope.load_tester_path(tester_id, load_options)?;
        let compiler_plugin = self
            .compiler_id()
            .map(|id| scope.load_plugin(id, load_options))
            .transpose()?;
        let compiler = compiler_plugin.as_deref().and_then(|plugin| plugin.compiler());

        if let (Some(compiler_id), true) = (self.compiler_id(), events.wants_detailed_events()) {
            events.on_event(BuildEvent::CompilerLoaded {
                component: self.display_name(),
                compiler: compiler_id.to_string(),
            });
        }

        let impl_src = compile_or_pass(compiler, self.implementation().src()?)?;
        let specs_src = compile_or_pass(compiler, specs_src)?;

        events.on_event(BuildEvent::SpecsStarted {
            component: self.display_name(),
            tester: tester_id.to_string(),
        });
        let raw = runner.run(RunRequest {
            scope,
            tester_file_path: &tester_path,
            impl_src: &impl_src,
            specs_src: &specs_src,
            tester_id,
        })?;

        let results = SpecsResults::create_from_raw(raw);
        events.on_event(BuildEvent::SpecsFinished {
            component: self.display_name(),
            pass: results.pass,
            tests: results.tests.len(),
        });

        if options.reject_on_failure && !results.pass {
            return Err(BitError::SpecsFailed {
                component: self.display_name(),
                results: Box::new(results),
            });
        }

        let component = self.clone().with_specs_results(Some(results.clone()));

        if options.save {
            scope
                .sources()
                .modify_specs_results(&component, &results)?;
            events.on_event(BuildEvent::SpecsResultsSaved {
                component: component.display_name(),
            });
        }

        Ok(Some(SpecsRun { component, results }))
    }
}
