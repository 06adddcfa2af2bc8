use clap::{ArgMatches, Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "sc-cli")]
#[command(about = "Assemble and run ordered JavaScript contexts")]
pub(crate) struct Cli {
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub(crate) log_level: LogLevel,
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Print the assembled command stream.
    Render(RenderArgs),
    /// Execute the assembled command stream.
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub(crate) struct StepArgs {
    /// JSON manifest with an ordered `steps` list.
    #[arg(long = "manifest")]
    pub(crate) manifest: Option<String>,
    /// Resource to load, a path or URL taken verbatim.
    #[arg(long = "file")]
    pub(crate) files: Vec<String>,
    /// Global to re-declare after the closest preceding `--file`.
    #[arg(long = "expose")]
    pub(crate) exposes: Vec<String>,
    /// Inline snippet appended after all resources.
    #[arg(long = "eval")]
    pub(crate) evals: Vec<String>,
    #[arg(long = "user-agent")]
    pub(crate) user_agent: Option<String>,
    // Command-line positions of `files` and `exposes`, filled after parsing.
    #[arg(skip)]
    pub(crate) file_indices: Vec<usize>,
    #[arg(skip)]
    pub(crate) expose_indices: Vec<usize>,
}

impl StepArgs {
    pub(crate) fn record_positions(&mut self, matches: &ArgMatches) {
        self.file_indices = positions(matches, "files");
        self.expose_indices = positions(matches, "exposes");
    }
}

impl Mode {
    pub(crate) fn step_args_mut(&mut self) -> &mut StepArgs {
        match self {
            Mode::Render(args) => &mut args.steps,
            Mode::Run(args) => &mut args.steps,
        }
    }
}

fn positions(matches: &ArgMatches, id: &str) -> Vec<usize> {
    matches
        .indices_of(id)
        .map(|indices| indices.collect())
        .unwrap_or_default()
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    #[command(flatten)]
    pub(crate) steps: StepArgs,
    /// Print the stream verbatim instead of the JSON report line.
    #[arg(long = "raw")]
    pub(crate) raw: bool,
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    #[command(flatten)]
    pub(crate) steps: StepArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
