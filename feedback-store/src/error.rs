use thiserror::Error;

/// Errors raised while talking to the record store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Client was built with missing credentials
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Store answered with a non-2xx status
    #[error("API error (status {status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw `error` payload returned by the store, if any
        details: Option<serde_json::Value>,
    },

    /// Network or connection error
    #[error("Network error: {source}")]
    Network {
        #[from]
        source: reqwest::Error,
    },

    /// Response body could not be decoded
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },

    /// Generic error for unexpected cases
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl StoreError {
    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api_error(status: u16, message: String, details: Option<serde_json::Value>) -> Self {
        Self::Api {
            status,
            message,
            details,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Human-readable `message` from a structured store error. A bare code
    /// such as `"NOT_FOUND"` is not a message and yields `None`.
    pub fn upstream_message(&self) -> Option<&str> {
        self.details()?.get("message").and_then(|m| m.as_str())
    }

    /// Raw error payload reported by the store
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Api { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}
