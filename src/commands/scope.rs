//! show / put handlers

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};

use bitpm::application::put;
use bitpm::config::Config;
use bitpm::domain::entities::Component;
use bitpm::domain::value_objects::BitId;
use bitpm::infrastructure::FsScope;

use super::workspace::Workspace;

pub fn cmd_show(id: &str, json: bool, verbose: u8) -> Result<()> {
    let ws = Workspace::open(json, verbose)?;
    let id = BitId::parse(id)?;
    let component = Component::load_from_scope(&ws.scope, &id)?;

    if json {
        println!("{}", component.to_json()?);
    } else {
        println!("{}", serde_json::to_string_pretty(&component.to_object()?)?);
    }
    Ok(())
}

pub fn cmd_put(scope_path: &Path, file: Option<&Path>, json: bool) -> Result<()> {
    let config = Config::load_or_default(None);
    let scope_name = config.scope_name(scope_path);
    BitId::validate_scope_name(&scope_name)?;
    let scope = FsScope::new(scope_path, scope_name);

    let ids = match file {
        Some(path) => {
            let reader = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            put(&scope, BufReader::new(reader))?
        }
        None => put(&scope, io::stdin().lock())?,
    };

    for id in ids {
        if json {
            println!("{}", serde_json::json!({"event": "put", "id": id.to_string()}));
        } else {
            println!("put {}", id);
        }
    }
    Ok(())
}
