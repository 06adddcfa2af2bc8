use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use regex::Regex;
use sc_api::shared_cache;
use sc_core::{ResourceEntry, ScriptStep};
use sc_resource::{ResourceCache, StdTransport, StdTransportOptions};
use serde::Deserialize;

use crate::{map_cli_manifest_invalid, map_cli_manifest_read, map_cli_transport, CliError, StepArgs};

#[derive(Debug, Deserialize)]
pub(crate) struct ScriptManifest {
    pub(crate) steps: Vec<ScriptStep>,
}

/// Manifest steps first, then `--file` entries, then `--eval` snippets.
pub(crate) fn collect_steps(args: &StepArgs) -> Result<Vec<ScriptStep>, CliError> {
    let mut steps = match &args.manifest {
        Some(path) => load_manifest(Path::new(path))?.steps,
        None => Vec::new(),
    };
    steps.extend(resource_entries(args)?.into_iter().map(ScriptStep::from));
    steps.extend(args.evals.iter().map(ScriptStep::inline));
    Ok(steps)
}

pub(crate) fn load_manifest(path: &Path) -> Result<ScriptManifest, CliError> {
    let raw = fs::read_to_string(path).map_err(map_cli_manifest_read)?;
    serde_json::from_str(&raw).map_err(map_cli_manifest_invalid)
}

/// `--file` values are taken verbatim as locators. Each `--expose` binds to
/// the closest `--file` before it on the command line.
pub(crate) fn resource_entries(args: &StepArgs) -> Result<Vec<ResourceEntry>, CliError> {
    let mut entries = Vec::with_capacity(args.files.len());
    for locator in &args.files {
        if locator.trim().is_empty() {
            return Err(CliError::new(
                "CLI_FILE_SPEC_INVALID",
                "--file requires a path or URL.",
            ));
        }
        entries.push(ResourceEntry::new(locator.as_str()));
    }

    for (name, expose_at) in args.exposes.iter().zip(&args.expose_indices) {
        if !global_name_pattern().is_match(name) {
            return Err(CliError::new(
                "CLI_EXPOSE_INVALID",
                format!("--expose {} is not a valid global name.", name),
            ));
        }
        let Some(owner) = args
            .file_indices
            .iter()
            .rposition(|file_at| file_at < expose_at)
        else {
            return Err(CliError::new(
                "CLI_EXPOSE_WITHOUT_FILE",
                format!("--expose {} must follow a --file.", name),
            ));
        };
        entries[owner].globals.push(name.clone());
    }
    Ok(entries)
}

fn global_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("global name regex should compile")
    })
}

/// A custom user agent needs its own transport, and therefore its own cache.
pub(crate) fn select_cache(user_agent: Option<&str>) -> Result<Arc<ResourceCache>, CliError> {
    let Some(user_agent) = user_agent else {
        return Ok(shared_cache());
    };
    let transport = StdTransport::new(StdTransportOptions {
        user_agent: Some(user_agent.to_string()),
    })
    .map_err(map_cli_transport)?;
    Ok(Arc::new(ResourceCache::new(Arc::new(transport))))
}
