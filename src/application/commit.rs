//! Commit workflow
//!
//! Turns an inline component into a stored version: assign scope and the
//! next version, build, run specs, then store with a log entry.

use crate::constants::DEFAULT_BIT_VERSION;
use crate::consumer::Consumer;
use crate::domain::entities::{CommitLog, Component, SpecsResults};
use crate::domain::ports::{BuildEventSink, NoopEventSink, Scope, SpecsRunner};
use crate::domain::value_objects::BitId;
use crate::error::BitResult;

use super::build::BuildOptions;
use super::specs::SpecsOptions;

#[derive(Clone, Copy)]
pub struct CommitOptions<'a> {
    pub message: &'a str,
    /// Store the version even when specs fail
    pub force: bool,
    /// Install environments before building
    pub environment: bool,
    pub verbose: bool,
    pub events: &'a dyn BuildEventSink,
}

impl<'a> CommitOptions<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            message,
            force: false,
            environment: false,
            verbose: false,
            events: &NoopEventSink,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_environment(mut self, environment: bool) -> Self {
        self.environment = environment;
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

#[derive(Debug, Clone)]
pub struct Committed {
    pub id: BitId,
    pub component: Component,
    pub specs_results: Option<SpecsResults>,
}

/// Commit the inline component `box/name` of `consumer` into `scope`
pub fn commit(
    consumer: &Consumer,
    box_name: &str,
    name: &str,
    scope: &dyn Scope,
    runner: &dyn SpecsRunner,
    options: &CommitOptions<'_>,
) -> BitResult<Committed> {
    let inline = Component::load_from_inline(
        consumer.fs(),
        &consumer.inline_dir(box_name, name),
        consumer.bit_json(),
    )?;

    let version = scope
        .sources()
        .latest_version(inline.box_name(), inline.name())?
        .map_or(DEFAULT_BIT_VERSION, |latest| latest + 1);
    let mut component = inline
        .with_scope(Some(scope.name().to_string()))
        .with_version(Some(version));

    let build_options = BuildOptions::new()
        .with_environment(options.environment)
        .with_consumer(Some(consumer))
        .with_verbose(options.verbose)
        .with_events(options.events);
    if let Some(built) = component.build(scope, &build_options)? {
        component = built.component;
    }

    let specs_options = SpecsOptions::new()
        .with_reject_on_failure(!options.force)
        .with_consumer(Some(consumer))
        .with_environment(options.environment)
        .with_verbose(options.verbose)
        .with_events(options.events);
    let specs_results = match component.run_specs(scope, runner, &specs_options)? {
        Some(run) => {
            component = run.component;
            Some(run.results)
        }
        None => None,
    };

    let id = component.id()?;
    scope
        .sources()
        .put(&component, &CommitLog::new(options.message))?;

    Ok(Committed {
        id,
        component,
        specs_results,
    })
}
