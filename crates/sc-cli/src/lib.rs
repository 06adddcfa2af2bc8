use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};
use sc_api::{build_stream, run_steps, BuildStreamOptions, RunStepsOptions};
use tracing::info;

mod cli_args;
mod error_map;
mod logging;
mod step_loader;

pub(crate) use cli_args::{Cli, LogLevel, Mode, RenderArgs, RunArgs, StepArgs};
pub(crate) use error_map::{
    emit_error, map_cli_manifest_invalid, map_cli_manifest_read, map_cli_transport, CliError,
};
pub(crate) use logging::init_logging;
pub(crate) use step_loader::{collect_steps, select_cache};
#[cfg(test)]
pub(crate) use step_loader::{load_manifest, resource_entries};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match parse_cli(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    init_logging(cli.log_level);
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn parse_cli<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(args)?;
    let mut cli = Cli::from_arg_matches(&matches)?;
    if let Some((_, sub_matches)) = matches.subcommand() {
        cli.command.step_args_mut().record_positions(sub_matches);
    }
    Ok(cli)
}

fn run(cli: Cli) -> Result<i32, CliError> {
    match cli.command {
        Mode::Render(args) => run_render(args),
        Mode::Run(args) => run_script(args),
    }
}

fn run_render(args: RenderArgs) -> Result<i32, CliError> {
    let steps = collect_steps(&args.steps)?;
    let cache = select_cache(args.steps.user_agent.as_deref())?;
    let stream = build_stream(BuildStreamOptions {
        steps,
        cache: Some(cache),
    })?;
    info!(fragments = stream.len(), "stream assembled");

    let source = stream.render();
    if args.raw {
        println!("{}", source);
        return Ok(0);
    }
    println!("RESULT:OK");
    println!("FRAGMENTS:{}", stream.len());
    println!(
        "SOURCE_JSON:{}",
        serde_json::to_string(&source).expect("string json")
    );
    Ok(0)
}

fn run_script(args: RunArgs) -> Result<i32, CliError> {
    let steps = collect_steps(&args.steps)?;
    let cache = select_cache(args.steps.user_agent.as_deref())?;
    let outcome = run_steps(RunStepsOptions {
        steps,
        cache: Some(cache),
        echo_print: false,
    })?;

    println!("RESULT:OK");
    for line in &outcome.printed {
        println!(
            "PRINT_JSON:{}",
            serde_json::to_string(line).expect("string json")
        );
    }
    println!(
        "VALUE_JSON:{}",
        serde_json::to_string(&outcome.value).expect("value json")
    );
    Ok(0)
}
