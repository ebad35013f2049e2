//! JSON Event Sink
//!
//! Outputs build events as NDJSON for CI/automation consumption.

use crate::domain::ports::{BuildEvent, BuildEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl BuildEventSink for JsonEventSink {
    fn on_event(&self, event: BuildEvent) {
        let json = match event {
            BuildEvent::BuildSkipped { component } => {
                serde_json::json!({
                    "event": "build_skipped",
                    "component": component,
                })
            }

            BuildEvent::EnvironmentInstalling { ids } => {
                serde_json::json!({
                    "event": "environment_installing",
                    "ids": ids,
                })
            }

            BuildEvent::CompilerLoaded {
                component,
                compiler,
            } => {
                serde_json::json!({
                    "event": "compiler_loaded",
                    "component": component,
                    "compiler": compiler,
                })
            }

            BuildEvent::Compiled { component, bytes } => {
                serde_json::json!({
                    "event": "compiled",
                    "component": component,
                    "bytes": bytes,
                })
            }

            BuildEvent::DistSaved { component } => {
                serde_json::json!({
                    "event": "dist_saved",
                    "component": component,
                })
            }

            BuildEvent::SpecsSkipped { component, reason } => {
                serde_json::json!({
                    "event": "specs_skipped",
                    "component": component,
                    "reason": reason,
                })
            }

            BuildEvent::SpecsStarted { component, tester } => {
                serde_json::json!({
                    "event": "specs_start",
                    "component": component,
                    "tester": tester,
                })
            }

            BuildEvent::SpecsFinished {
                component,
                pass,
                tests,
            } => {
                serde_json::json!({
                    "event": "specs_complete",
                    "component": component,
                    "status": if pass { "pass" } else { "fail" },
                    "tests": tests,
                })
            }

            BuildEvent::SpecsResultsSaved { component } => {
                serde_json::json!({
                    "event": "specs_results_saved",
                    "component": component,
                })
            }
        };

        self.write_event(json);
    }
}
