mod quickjs;
mod stream;

pub use quickjs::{QuickJsInterpreter, QuickJsInterpreterOptions};
pub use stream::{
    export_statement, CommandStream, CONSOLE_SHIM, FRAGMENT_SEPARATOR, GLOBAL_SHIM,
};
