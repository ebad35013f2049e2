//! create / build / test handlers

use anyhow::Result;

use bitpm::application::{BuildOptions, CreateOptions, SpecsOptions};
use bitpm::domain::entities::Component;
use bitpm::domain::ports::Scope;
use bitpm::domain::value_objects::BitId;

use super::workspace::{event_sink, Workspace};

pub fn cmd_create(id: &str, specs: bool, force: bool, json: bool, verbose: u8) -> Result<()> {
    let ws = Workspace::open(json, verbose)?;
    let id = BitId::parse(id)?;

    let component = Component::create(
        &CreateOptions {
            name: id.name(),
            box_name: id.box_name(),
            scope_name: Some(ws.scope.name()),
            with_specs: specs,
            consumer_bit_json: ws.consumer.bit_json(),
        },
        &ws.scope,
    )?;

    let dir = ws.consumer.inline_dir(component.box_name(), component.name());
    let report = component.write(ws.consumer.fs().as_ref(), &dir, true, force)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "event": "created",
                "component": component.display_name(),
                "path": dir.display().to_string(),
                "written": report.written,
                "skipped": report.skipped,
            })
        );
    } else {
        println!("created {} in {}", component.display_name(), dir.display());
    }
    Ok(())
}

pub fn cmd_build(id: &str, save: bool, env: bool, json: bool, verbose: u8) -> Result<()> {
    let ws = Workspace::open(json, verbose)?;
    let id = BitId::parse(id)?;
    let (component, stored) = ws.resolve(&id)?;
    if save && !stored {
        anyhow::bail!("--save needs a stored version, e.g. {}@1", component.display_name());
    }

    let events = event_sink(json, ws.verbose);
    let options = BuildOptions::new()
        .with_environment(env)
        .with_save(save)
        .with_consumer((!stored).then_some(&ws.consumer))
        .with_verbose(ws.verbose)
        .with_events(events.as_ref());

    let Some(built) = component.build(&ws.scope, &options)? else {
        return Ok(());
    };

    if !stored {
        let dir = ws.consumer.inline_dir(component.box_name(), component.name());
        if let Some(dist) = built.component.dist() {
            dist.write(ws.consumer.fs().as_ref(), &dir, component.impl_file(), true)?;
        }
    }
    Ok(())
}

pub fn cmd_test(
    id: &str,
    save: bool,
    env: bool,
    reject: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let ws = Workspace::open(json, verbose)?;
    let id = BitId::parse(id)?;
    let (component, stored) = ws.resolve(&id)?;
    if save && !stored {
        anyhow::bail!("--save needs a stored version, e.g. {}@1", component.display_name());
    }

    let events = event_sink(json, ws.verbose);
    let runner = ws.runner();
    let options = SpecsOptions::new()
        .with_reject_on_failure(reject)
        .with_consumer((!stored).then_some(&ws.consumer))
        .with_environment(env)
        .with_save(save)
        .with_verbose(ws.verbose)
        .with_events(events.as_ref());

    let Some(run) = component.run_specs(&ws.scope, &runner, &options)? else {
        return Ok(());
    };

    if !json {
        for test in run.results.failed_tests() {
            let message = test.err.as_ref().map_or("", |e| e.message.as_str());
            eprintln!("  ✗ {}: {}", test.title, message);
        }
    }
    Ok(())
}
