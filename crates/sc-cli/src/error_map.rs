use std::fmt::Display;

use sc_api::ApiError;
use sc_core::StreamError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub(crate) struct CliError {
    pub(crate) code: String,
    pub(crate) message: String,
}

impl CliError {
    pub(crate) fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

impl From<StreamError> for CliError {
    fn from(error: StreamError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

fn map_error(code: &'static str, error: impl Display) -> CliError {
    CliError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: CliError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_cli_manifest_read(error: std::io::Error) -> CliError {
    map_error("CLI_MANIFEST_READ", error)
}

pub(crate) fn map_cli_manifest_invalid(error: serde_json::Error) -> CliError {
    map_error("CLI_MANIFEST_INVALID", error)
}

pub(crate) fn map_cli_transport(error: sc_core::TransportFault) -> CliError {
    map_error("CLI_TRANSPORT", error)
}

#[cfg(test)]
mod error_map_tests {
    use super::*;
    use sc_core::{InterpreterFault, ResolveError};

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        let code = emit_error(CliError::new("ERR", "failed"));
        assert_eq!(code, 1);
    }

    #[test]
    fn mapping_helpers_keep_error_codes() {
        assert_eq!(
            map_cli_manifest_read(std::io::Error::other("read")).code,
            "CLI_MANIFEST_READ"
        );
        let invalid = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(map_cli_manifest_invalid(invalid).code, "CLI_MANIFEST_INVALID");
        assert_eq!(
            map_cli_transport(sc_core::TransportFault::new("tls")).code,
            "CLI_TRANSPORT"
        );
    }

    #[test]
    fn library_errors_keep_their_codes() {
        let unavailable = CliError::from(StreamError::from(ResolveError::LocatorInvalid {
            locator: "nope".to_string(),
        }));
        assert_eq!(unavailable.code, "RESOURCE_UNAVAILABLE");
        assert!(unavailable.message.contains("nope"));

        let fault = CliError::from(ApiError::from(StreamError::from(InterpreterFault::new(
            "x is not defined",
        ))));
        assert_eq!(fault.code, "INTERPRETER_FAULT");
        assert_eq!(fault.message, "Interpreter fault: x is not defined");
    }
}
