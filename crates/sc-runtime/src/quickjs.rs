use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rquickjs::{Context, Ctx, Function, Runtime, Value};
use sc_core::{Interpreter, InterpreterFault, ScriptValue};
use tracing::debug;

const HOST_PRINT: &str = "__sc_host_print";
const PRINT_SHIM: &str = r#"globalThis.print = function () {
  __sc_host_print(Array.prototype.map.call(arguments, String).join(" "));
};"#;
const MAX_VALUE_DEPTH: usize = 32;

#[derive(Debug, Clone, Default)]
pub struct QuickJsInterpreterOptions {
    /// Also write each `print` line to stdout.
    pub echo_print: bool,
}

/// Embedded QuickJS engine. Globals persist across executions.
pub struct QuickJsInterpreter {
    context: Context,
    // Dropped after `context`.
    _runtime: Runtime,
    printed: Arc<Mutex<Vec<String>>>,
}

impl QuickJsInterpreter {
    pub fn new(options: QuickJsInterpreterOptions) -> Result<Self, InterpreterFault> {
        let runtime = Runtime::new().map_err(engine_fault)?;
        let context = Context::full(&runtime).map_err(engine_fault)?;
        let printed = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&printed);
        let echo = options.echo_print;
        context.with(|ctx| {
            let print = Function::new(ctx.clone(), move |line: String| {
                if echo {
                    println!("{}", line);
                }
                sink.lock().push(line);
            })
            .map_err(|error| fault_from(&ctx, error))?;
            ctx.globals()
                .set(HOST_PRINT, print)
                .map_err(|error| fault_from(&ctx, error))?;
            ctx.eval::<(), _>(PRINT_SHIM)
                .map_err(|error| fault_from(&ctx, error))
        })?;

        Ok(Self {
            context,
            _runtime: runtime,
            printed,
        })
    }

    pub fn printed(&self) -> Vec<String> {
        self.printed.lock().clone()
    }

    pub fn take_printed(&self) -> Vec<String> {
        std::mem::take(&mut *self.printed.lock())
    }
}

impl Interpreter for QuickJsInterpreter {
    fn execute_source(&mut self, source: &str) -> Result<ScriptValue, InterpreterFault> {
        debug!(bytes = source.len(), "executing source");
        self.context.with(|ctx| {
            let value = ctx
                .eval::<Value, _>(source)
                .map_err(|error| fault_from(&ctx, error))?;
            to_script_value(&value, 0).map_err(|error| fault_from(&ctx, error))
        })
    }
}

fn engine_fault(error: rquickjs::Error) -> InterpreterFault {
    InterpreterFault::new(error.to_string())
}

fn fault_from(ctx: &Ctx<'_>, error: rquickjs::Error) -> InterpreterFault {
    if !error.is_exception() {
        return engine_fault(error);
    }

    let thrown = ctx.catch();
    if let Some(exception) = thrown.as_exception() {
        let message = exception.message().unwrap_or_default();
        return match exception.stack() {
            Some(stack) if !stack.is_empty() => InterpreterFault::with_stack(message, stack),
            _ => InterpreterFault::new(message),
        };
    }

    let message = thrown
        .as_string()
        .and_then(|text| text.to_string().ok())
        .unwrap_or_else(|| format!("uncaught {}", thrown.type_name()));
    InterpreterFault::new(message)
}

fn to_script_value(value: &Value<'_>, depth: usize) -> rquickjs::Result<ScriptValue> {
    if value.is_undefined() {
        return Ok(ScriptValue::Undefined);
    }
    if value.is_null() {
        return Ok(ScriptValue::Null);
    }
    if let Some(flag) = value.as_bool() {
        return Ok(ScriptValue::Bool(flag));
    }
    if let Some(number) = value.as_number() {
        return Ok(ScriptValue::Number(number));
    }
    if let Some(text) = value.as_string() {
        return Ok(ScriptValue::String(text.to_string()?));
    }
    if value.is_function() {
        return Ok(ScriptValue::Opaque("function".to_string()));
    }
    if depth >= MAX_VALUE_DEPTH {
        return Ok(ScriptValue::Opaque(value.type_name().to_string()));
    }
    if let Some(array) = value.as_array() {
        let mut items = Vec::with_capacity(array.len());
        for item in array.iter::<Value>() {
            items.push(to_script_value(&item?, depth + 1)?);
        }
        return Ok(ScriptValue::Array(items));
    }
    if let Some(object) = value.as_object() {
        let mut fields = BTreeMap::new();
        for entry in object.props::<String, Value>() {
            let (key, field) = entry?;
            fields.insert(key, to_script_value(&field, depth + 1)?);
        }
        return Ok(ScriptValue::Object(fields));
    }

    Ok(ScriptValue::Opaque(value.type_name().to_string()))
}
