//! Engine error type and exit-code mapping.
//!
//! Everything in the crate returns `anyhow::Result`. The only typed error is
//! [`EngineError`]: a failure reported by the embedded database engine
//! (open, attach, catalog lookup, query). The binary distinguishes it from
//! everything else when choosing the process exit code.

use std::fmt;

use crate::consts::{EXIT_ENGINE_ERROR, EXIT_OTHER_ERROR};

#[derive(Debug)]
pub struct EngineError {
    message: String,
    source: Option<rusqlite::Error>,
}

impl EngineError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source<S: Into<String>>(message: S, source: rusqlite::Error) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{}: {}", self.message, src),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(e: rusqlite::Error) -> Self {
        Self::with_source("engine error", e)
    }
}

/// Is there an engine error anywhere in the chain?
pub fn is_engine_error(err: &anyhow::Error) -> bool {
    err.chain().any(|e| e.downcast_ref::<EngineError>().is_some())
}

/// 1: ошибка движка, 2: всё остальное (I/O, пустой каталог).
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if is_engine_error(err) {
        EXIT_ENGINE_ERROR
    } else {
        EXIT_OTHER_ERROR
    }
}
