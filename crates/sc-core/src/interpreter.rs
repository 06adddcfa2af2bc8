use crate::error::InterpreterFault;
use crate::value::ScriptValue;

/// Something able to run a complete source string.
pub trait Interpreter {
    fn execute_source(&mut self, source: &str) -> Result<ScriptValue, InterpreterFault>;
}

impl<T: Interpreter + ?Sized> Interpreter for &mut T {
    fn execute_source(&mut self, source: &str) -> Result<ScriptValue, InterpreterFault> {
        (**self).execute_source(source)
    }
}

impl<T: Interpreter + ?Sized> Interpreter for Box<T> {
    fn execute_source(&mut self, source: &str) -> Result<ScriptValue, InterpreterFault> {
        (**self).execute_source(source)
    }
}
