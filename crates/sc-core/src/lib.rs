pub mod error;
pub mod interpreter;
pub mod types;
pub mod value;

pub use error::{InterpreterFault, ResolveError, StreamError, TransportFault};
pub use interpreter::Interpreter;
pub use types::*;
pub use value::*;
