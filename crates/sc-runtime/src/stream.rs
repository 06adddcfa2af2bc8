use std::sync::Arc;

use sc_core::{Interpreter, ResourceEntry, ScriptStep, ScriptValue, StreamError};
use sc_resource::ResourceCache;
use tracing::trace;

pub const CONSOLE_SHIM: &str = "var console = {warn: function(){}, log: print, error: print}";
pub const GLOBAL_SHIM: &str = "var global = {}";
pub const FRAGMENT_SEPARATOR: &str = "\n";

/// Statement re-declaring a shim global property as a top-level name.
pub fn export_statement(name: &str) -> String {
    format!("var {} = global.{}", name, name)
}

/// Append-only sequence of source fragments executed as one script.
///
/// Every stream starts with the console and `global` shims. Fragments keep
/// call order and are never edited after being appended.
#[derive(Debug)]
pub struct CommandStream {
    fragments: Vec<String>,
    cache: Arc<ResourceCache>,
}

impl CommandStream {
    pub fn new(cache: Arc<ResourceCache>) -> Self {
        Self {
            fragments: vec![CONSOLE_SHIM.to_string(), GLOBAL_SHIM.to_string()],
            cache,
        }
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    pub fn append_inline(&mut self, snippet: impl Into<String>) {
        let snippet = snippet.into();
        trace!(bytes = snippet.len(), "append inline fragment");
        self.fragments.push(snippet);
    }

    /// Appends the body of `locator` followed by one export statement per
    /// name in `exposed_globals`. Nothing is appended if resolution fails.
    pub fn append_resource<S: AsRef<str>>(
        &mut self,
        locator: &str,
        exposed_globals: &[S],
    ) -> Result<(), StreamError> {
        let body = self.cache.resolve(locator)?;
        trace!(locator, globals = exposed_globals.len(), "append resource fragment");
        self.fragments.push(body.to_string());
        self.fragments.extend(
            exposed_globals
                .iter()
                .map(|name| export_statement(name.as_ref())),
        );
        Ok(())
    }

    pub fn append_entry(&mut self, entry: &ResourceEntry) -> Result<(), StreamError> {
        self.append_resource(&entry.locator, entry.globals.as_slice())
    }

    /// Stops at the first failing entry; earlier entries stay appended.
    pub fn append_resource_batch(&mut self, entries: &[ResourceEntry]) -> Result<(), StreamError> {
        for entry in entries {
            self.append_entry(entry)?;
        }
        Ok(())
    }

    pub fn append_step(&mut self, step: &ScriptStep) -> Result<(), StreamError> {
        match step {
            ScriptStep::Inline { inline } => {
                self.append_inline(inline.as_str());
                Ok(())
            }
            ScriptStep::Resource(entry) => self.append_entry(entry),
        }
    }

    pub fn append_steps(&mut self, steps: &[ScriptStep]) -> Result<(), StreamError> {
        for step in steps {
            self.append_step(step)?;
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        self.fragments.join(FRAGMENT_SEPARATOR)
    }

    pub fn execute<I: Interpreter + ?Sized>(
        &self,
        interpreter: &mut I,
    ) -> Result<ScriptValue, StreamError> {
        let source = self.render();
        Ok(interpreter.execute_source(&source)?)
    }
}
