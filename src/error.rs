//! Unified error types for the item API and the version bump tool.

use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::bump::BumpLevel;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but rejected by validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Version bump error.
    #[error("version bump error: {0}")]
    Bump(#[from] BumpError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No item with the requested id.
    #[error("Not found")]
    NotFound,
}

/// Error body returned to HTTP clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable message.
    #[schema(example = "Not found")]
    pub message: String,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Version bump errors.
#[derive(Error, Debug)]
pub enum BumpError {
    /// Manifest file could not be read or written.
    #[error("manifest {path}: {source}")]
    ManifestIo {
        /// Manifest path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Manifest file is not valid JSON.
    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        /// Manifest path.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Manifest top level is not a JSON object.
    #[error("manifest {path} is not a JSON object")]
    ManifestShape {
        /// Manifest path.
        path: PathBuf,
    },

    /// Version string could not be parsed.
    #[error("invalid version {0:?}")]
    InvalidVersion(String),

    /// The bumped component is already at its maximum.
    #[error("cannot apply {level} bump to {version}: component overflow")]
    VersionOverflow {
        /// Version before the bump.
        version: String,
        /// Requested level.
        level: BumpLevel,
    },
}

/// Database probe errors.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Connection or read failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Server answered with an error packet.
    #[error("server error {code}: {message}")]
    Server {
        /// MySQL error code.
        code: u16,
        /// Server-supplied message.
        message: String,
    },

    /// Server greeting could not be understood.
    #[error("malformed handshake: {0}")]
    Malformed(String),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
