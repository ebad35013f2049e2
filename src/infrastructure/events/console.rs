//! Console Event Sink
//!
//! Human-readable progress lines on stderr.

use crate::domain::ports::{BuildEvent, BuildEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    verbose: bool,
}

impl ConsoleEventSink {
    pub fn stderr(verbose: bool) -> Self {
        Self::with_writer(io::stderr(), verbose)
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            verbose,
        }
    }

    fn line(&self, text: String) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
        }
    }
}

fn format_event(event: BuildEvent) -> String {
    match event {
        BuildEvent::BuildSkipped { component } => {
            format!("- {}: no compiler, build skipped", component)
        }
        BuildEvent::EnvironmentInstalling { ids } => {
            format!("… installing environments: {}", ids.join(", "))
        }
        BuildEvent::CompilerLoaded {
            component,
            compiler,
        } => format!("… {}: using compiler {}", component, compiler),
        BuildEvent::Compiled { component, bytes } => {
            format!("✓ {}: compiled ({} bytes)", component, bytes)
        }
        BuildEvent::DistSaved { component } => format!("✓ {}: dist saved", component),
        BuildEvent::SpecsSkipped { component, reason } => {
            format!("- {}: specs skipped ({})", component, reason)
        }
        BuildEvent::SpecsStarted { component, tester } => {
            format!("… {}: running specs with {}", component, tester)
        }
        BuildEvent::SpecsFinished {
            component,
            pass,
            tests,
        } => {
            let mark = if pass { "✓" } else { "✗" };
            format!("{} {}: {} specs", mark, component, tests)
        }
        BuildEvent::SpecsResultsSaved { component } => {
            format!("✓ {}: specs results saved", component)
        }
    }
}

fn is_detailed(event: &BuildEvent) -> bool {
    matches!(
        event,
        BuildEvent::EnvironmentInstalling { .. }
            | BuildEvent::CompilerLoaded { .. }
            | BuildEvent::SpecsStarted { .. }
    )
}

impl BuildEventSink for ConsoleEventSink {
    fn on_event(&self, event: BuildEvent) {
        if !self.verbose && is_detailed(&event) {
            return;
        }
        self.line(format_event(event));
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}
