//! The `error` module defines the error types used within the `formrelay` application.
//!
//! Each hop of the submission path has its own enum: the persistence adapter
//! returns [`PersistError`], the relay returns [`RelayError`], and HTTP
//! handlers report what the browser should see through [`AppError`].

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

/// Outcome of a failed save. The store server decides from this whether the
/// datagram still gets echoed.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("malformed payload: {0}")]
    Parse(String),

    #[error("document store error: {0}")]
    Store(#[from] sled::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("relay socket error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store server did not reply within {0:?}")]
    Timeout(Duration),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read page '{path}': {source}")]
    Page {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Relay socket errors are only logged; a missing echo is the one relay
    /// outcome the browser gets to see.
    #[error("store server did not acknowledge within {0:?}")]
    RelayTimeout(Duration),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!("{self}");

        let status = match self {
            AppError::Page { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::RelayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        };

        // no body: the caller only learns the request failed
        status.into_response()
    }
}
