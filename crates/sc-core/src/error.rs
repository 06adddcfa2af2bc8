use thiserror::Error;

/// Diagnostic payload reported by a transport that could not deliver a resource.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}", describe_transport_fault(.status, .detail))]
pub struct TransportFault {
    pub status: Option<u16>,
    pub detail: String,
}

impl TransportFault {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            status: None,
            detail: detail.into(),
        }
    }

    pub fn with_status(status: u16, detail: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            detail: detail.into(),
        }
    }
}

fn describe_transport_fault(status: &Option<u16>, detail: &str) -> String {
    match status {
        Some(status) if detail.is_empty() => format!("status {}", status),
        Some(status) => format!("status {}: {}", status, detail),
        None => detail.to_string(),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Resource {locator} is neither a readable file nor a valid remote address.")]
    LocatorInvalid { locator: String },
    #[error("Resource {locator} could not be loaded: {fault}")]
    FetchFailed {
        locator: String,
        fault: TransportFault,
    },
}

impl ResolveError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::LocatorInvalid { .. } => "RESOURCE_LOCATOR_INVALID",
            Self::FetchFailed { .. } => "RESOURCE_FETCH_FAILED",
        }
    }

    pub fn locator(&self) -> &str {
        match self {
            Self::LocatorInvalid { locator } | Self::FetchFailed { locator, .. } => locator,
        }
    }
}

/// Fault raised by an interpreter while running source. Opaque beyond its text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct InterpreterFault {
    pub message: String,
    pub stack: Option<String>,
}

impl InterpreterFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("Resource {locator} unavailable: {source}")]
    ResourceUnavailable {
        locator: String,
        #[source]
        source: ResolveError,
    },
    #[error("Interpreter fault: {0}")]
    InterpreterFault(#[from] InterpreterFault),
}

impl StreamError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ResourceUnavailable { .. } => "RESOURCE_UNAVAILABLE",
            Self::InterpreterFault(_) => "INTERPRETER_FAULT",
        }
    }
}

impl From<ResolveError> for StreamError {
    fn from(source: ResolveError) -> Self {
        Self::ResourceUnavailable {
            locator: source.locator().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_errors_keep_codes_and_locator() {
        let invalid = ResolveError::LocatorInvalid {
            locator: "nope".to_string(),
        };
        assert_eq!(invalid.code(), "RESOURCE_LOCATOR_INVALID");
        assert_eq!(invalid.locator(), "nope");

        let failed = ResolveError::FetchFailed {
            locator: "https://cdn.test/a.js".to_string(),
            fault: TransportFault::with_status(404, "Not Found"),
        };
        assert_eq!(failed.code(), "RESOURCE_FETCH_FAILED");
        assert_eq!(
            failed.to_string(),
            "Resource https://cdn.test/a.js could not be loaded: status 404: Not Found"
        );
    }

    #[test]
    fn stream_error_wraps_resolve_error_with_locator() {
        let error = StreamError::from(ResolveError::LocatorInvalid {
            locator: "nope".to_string(),
        });
        assert_eq!(error.code(), "RESOURCE_UNAVAILABLE");
        match error {
            StreamError::ResourceUnavailable { locator, source } => {
                assert_eq!(locator, "nope");
                assert_eq!(source.code(), "RESOURCE_LOCATOR_INVALID");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn transport_fault_message_varies_with_status() {
        assert_eq!(TransportFault::new("timed out").to_string(), "timed out");
        assert_eq!(TransportFault::with_status(500, "").to_string(), "status 500");
        let fault = StreamError::from(InterpreterFault::new("boom"));
        assert_eq!(fault.code(), "INTERPRETER_FAULT");
        assert_eq!(fault.to_string(), "Interpreter fault: boom");
    }
}
