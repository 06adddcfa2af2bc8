use std::sync::{Arc, OnceLock};

use sc_core::{InterpreterFault, ScriptStep, ScriptValue, StreamError};
use sc_resource::{ResourceCache, StdTransport};
use sc_runtime::{CommandStream, QuickJsInterpreter, QuickJsInterpreterOptions};
use thiserror::Error;
use tracing::debug;

pub use sc_core::{ResourceEntry, ResolveError};

static SHARED_CACHE: OnceLock<Arc<ResourceCache>> = OnceLock::new();

/// Process-wide cache backed by [`StdTransport`] defaults.
pub fn shared_cache() -> Arc<ResourceCache> {
    Arc::clone(SHARED_CACHE.get_or_init(|| {
        debug!("creating shared resource cache");
        Arc::new(ResourceCache::new(Arc::new(StdTransport::default())))
    }))
}

pub fn new_stream() -> CommandStream {
    CommandStream::new(shared_cache())
}

#[derive(Debug, Clone, Default)]
pub struct BuildStreamOptions {
    pub steps: Vec<ScriptStep>,
    pub cache: Option<Arc<ResourceCache>>,
}

#[derive(Debug, Clone, Default)]
pub struct RunStepsOptions {
    pub steps: Vec<ScriptStep>,
    pub cache: Option<Arc<ResourceCache>>,
    pub echo_print: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub value: ScriptValue,
    pub printed: Vec<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Failed to start interpreter: {0}")]
    InterpreterStart(InterpreterFault),
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InterpreterStart(_) => "INTERPRETER_START",
            Self::Stream(error) => error.code(),
        }
    }
}

pub fn build_stream(options: BuildStreamOptions) -> Result<CommandStream, StreamError> {
    let cache = options.cache.unwrap_or_else(shared_cache);
    let mut stream = CommandStream::new(cache);
    stream.append_steps(&options.steps)?;
    Ok(stream)
}

pub fn run_steps(options: RunStepsOptions) -> Result<RunOutcome, ApiError> {
    let stream = build_stream(BuildStreamOptions {
        steps: options.steps,
        cache: options.cache,
    })?;

    let mut interpreter = QuickJsInterpreter::new(QuickJsInterpreterOptions {
        echo_print: options.echo_print,
    })
    .map_err(ApiError::InterpreterStart)?;

    let value = stream.execute(&mut interpreter)?;
    Ok(RunOutcome {
        value,
        printed: interpreter.take_printed(),
    })
}
