use miette::Diagnostic;
use thiserror::Error;

/// Result type for tracer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the reference tracer
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("I/O error: {0}")]
    #[diagnostic(code(reftrace::io_error))]
    Io(String),

    #[error("Parse error: {message}")]
    #[diagnostic(code(reftrace::parse_error))]
    Parse { message: String },

    #[error("Semantic analysis failed: {message}")]
    #[diagnostic(code(reftrace::semantic_error))]
    Semantic { message: String },

    #[error("Invalid trace map: {message}")]
    #[diagnostic(code(reftrace::trace_map_error))]
    TraceMap { message: String },
}

impl Error {
    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Error::Parse {
            message: message.into(),
        }
    }

    /// Create a trace map error
    pub fn trace_map(message: impl Into<String>) -> Self {
        Error::TraceMap {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
