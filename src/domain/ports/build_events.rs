//! Build Event Port
//!
//! Provides an observable interface for build and specs orchestration.
//! Enables progress reporting, JSON event streams, and debugging.

/// Event emitted during build/specs operations
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    /// Component has no compiler; nothing to build
    BuildSkipped { component: String },

    /// Plugin environments are being installed
    EnvironmentInstalling { ids: Vec<String> },

    /// Compiler plugin resolved from the scope
    CompilerLoaded { component: String, compiler: String },

    /// Implementation compiled into a distribution
    Compiled { component: String, bytes: usize },

    /// Distribution persisted to the scope
    DistSaved { component: String },

    /// Specs were not run
    SpecsSkipped { component: String, reason: String },

    /// Specs handed over to the runner
    SpecsStarted { component: String, tester: String },

    /// Runner returned and results were normalized
    SpecsFinished {
        component: String,
        pass: bool,
        tests: usize,
    },

    /// Specs results persisted to the scope
    SpecsResultsSaved { component: String },
}

/// Trait for receiving build events
///
/// Implementations can be:
/// - ConsoleEventSink: human-readable lines on stderr
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait BuildEventSink {
    /// Handle a build event
    fn on_event(&self, event: BuildEvent);

    /// Check if this sink wants detailed events (compiler loads, sizes)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl BuildEventSink for NoopEventSink {
    fn on_event(&self, _event: BuildEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Test event sink that records all events
    struct RecordingEventSink {
        events: RefCell<Vec<BuildEvent>>,
    }

    impl BuildEventSink for RecordingEventSink {
        fn on_event(&self, event: BuildEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    #[test]
    fn recording_sink_captures_events() {
        let sink = RecordingEventSink {
            events: RefCell::new(Vec::new()),
        };

        sink.on_event(BuildEvent::BuildSkipped {
            component: "utils/foo".to_string(),
        });
        sink.on_event(BuildEvent::DistSaved {
            component: "utils/foo".to_string(),
        });

        assert_eq!(sink.events.borrow().len(), 2);
        assert!(sink.wants_detailed_events());
    }

    #[test]
    fn noop_sink_wants_no_details() {
        let sink = NoopEventSink;
        assert!(!sink.wants_detailed_events());
    }
}
