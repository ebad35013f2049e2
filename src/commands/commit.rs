//! commit handler

use anyhow::Result;

use bitpm::application::{commit, CommitOptions};
use bitpm::domain::value_objects::BitId;

use super::workspace::{event_sink, Workspace};

pub fn cmd_commit(
    id: &str,
    message: &str,
    force: bool,
    env: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let ws = Workspace::open(json, verbose)?;
    let id = BitId::parse(id)?;
    let events = event_sink(json, ws.verbose);
    let runner = ws.runner();

    let committed = commit(
        &ws.consumer,
        id.box_name(),
        id.name(),
        &ws.scope,
        &runner,
        &CommitOptions::new(message)
            .with_force(force)
            .with_environment(env)
            .with_verbose(ws.verbose)
            .with_events(events.as_ref()),
    )?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "committed",
                "id": committed.id.to_string(),
                "specs": committed.specs_results.as_ref().map(|r| r.pass),
            })
        );
    } else {
        println!("committed {}", committed.id);
    }
    Ok(())
}
