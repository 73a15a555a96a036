//! Error types for the launcher module.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::PathSecurityError;
use crate::workspace::ValidationError;

/// Errors reported by an OS launch primitive.
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },

    /// The URL scheme is not on the allow-list.
    #[error("Disallowed protocol in URL: {scheme}:")]
    DisallowedScheme { scheme: String },

    /// The path failed a safety check.
    #[error(transparent)]
    PathSecurity(#[from] PathSecurityError),

    /// The path does not exist.
    #[error("Path does not exist: {}", .path.display())]
    NotFound { path: PathBuf },

    /// The platform opener is not installed.
    #[error("Opener not found: {program}")]
    OpenerNotFound { program: String },

    /// The platform opener reported a failure.
    #[error("{program} exited with {status}: {stderr}")]
    OpenerFailed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The platform opener did not finish in time.
    #[error("{program} did not finish within {timeout_secs}s")]
    OpenerTimeout { program: String, timeout_secs: u64 },

    /// The process could not be started.
    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrimitiveError {
    /// Whether this failure comes from a path safety check.
    pub fn is_path_security(&self) -> bool {
        matches!(self, Self::PathSecurity(_))
    }
}

/// Broad failure category of a launch outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing or invalid item data.
    Validation,
    /// The OS open/spawn action failed.
    LaunchPrimitive,
    /// A path failed a safety check.
    PathSecurity,
    /// The item's dependency was not satisfied.
    Dependency,
    /// The launch was cancelled before this item ran.
    Cancelled,
}

impl FailureKind {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::LaunchPrimitive => "launch_primitive",
            FailureKind::PathSecurity => "path_security",
            FailureKind::Dependency => "dependency",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

/// Errors that can occur while dispatching a single item.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The item is missing data required for its kind.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Opening one of a browser item's URLs failed.
    #[error("Failed to open URL {url}: {source}")]
    OpenUrl {
        url: String,
        #[source]
        source: PrimitiveError,
    },

    /// Starting an application failed.
    #[error("Failed to launch app: {source}")]
    LaunchApp {
        #[source]
        source: PrimitiveError,
    },

    /// Opening a folder failed.
    #[error("Failed to open folder: {source}")]
    OpenFolder {
        #[source]
        source: PrimitiveError,
    },
}

impl LaunchError {
    /// The failure category for reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Validation(_) => FailureKind::Validation,
            Self::OpenUrl { source, .. }
            | Self::LaunchApp { source }
            | Self::OpenFolder { source } => {
                if source.is_path_security() {
                    FailureKind::PathSecurity
                } else {
                    FailureKind::LaunchPrimitive
                }
            }
        }
    }

    /// Launch failures are never retried at this layer.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
