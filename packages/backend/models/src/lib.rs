#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! SCM backend models for `scmbench`.
//!
//! This crate defines the data types carried by the SCM backend capability
//! contract, abstracting over the specific SCM system (git, hg, etc.).

use serde::{Deserialize, Serialize};

/// Captured output of an SCM mutation command.
///
/// A failed command is reported as [`ScmError::CommandFailed`] instead, so a
/// value of this type always describes a run that succeeded.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// Text the command wrote to stdout.
    pub stdout: String,
    /// Text the command wrote to stderr (warnings, progress noise).
    pub stderr: String,
}

/// One row of revision history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Backend-specific revision identifier (sha, changeset id, ...).
    pub revision: String,
    /// Author of the revision.
    pub author: String,
    /// Unix timestamp of the revision.
    pub timestamp: i64,
    /// First line of the commit message.
    pub summary: String,
}

/// A branch known to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchInfo {
    /// Branch name.
    pub name: String,
    /// Revision the branch currently points at.
    pub revision: String,
    /// Whether this is the checked-out branch.
    pub is_current: bool,
}

/// A tag known to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name.
    pub name: String,
    /// Revision the tag points at.
    pub revision: String,
    /// Annotation text (empty for lightweight tags).
    pub annotation: String,
}

/// A stashed change set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StashInfo {
    /// Stash identifier (e.g. `stash@{0}`).
    pub name: String,
    /// One-line description of the stashed work.
    pub summary: String,
}

/// A remote repository the playground knows about.
///
/// Covers both git remotes and hg paths; they are the same concern with two
/// vocabularies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteInfo {
    /// Remote name (e.g. `origin`, `default`).
    pub name: String,
    /// Remote URL.
    pub url: String,
}

/// Whether the backend can accept a patch import right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportReadiness {
    /// The backend is in a position to accept an import.
    Ready,
    /// The backend cannot accept an import.
    NotReady {
        /// Human-readable explanation for the refusal.
        reason: String,
    },
}

impl ImportReadiness {
    /// Build a `NotReady` value from any string-ish reason.
    #[must_use]
    pub fn not_ready(reason: impl Into<String>) -> Self {
        Self::NotReady {
            reason: reason.into(),
        }
    }

    /// True when an import can proceed.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The refusal reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ready => None,
            Self::NotReady { reason } => Some(reason),
        }
    }
}

/// Errors from SCM backend operations.
#[derive(Debug, thiserror::Error)]
pub enum ScmError {
    /// No registered backend carries this name.
    #[error("Unknown SCM backend: {name}")]
    UnknownBackend {
        /// The name that was looked up.
        name: String,
    },

    /// The operation has no meaning without an underlying SCM.
    #[error("No (or unsupported) underlying SCM for operation: {operation}")]
    UnsupportedOperation {
        /// The operation that was requested.
        operation: String,
    },

    /// An SCM command ran and reported failure.
    #[error("SCM command failed: {stderr}")]
    CommandFailed {
        /// Text the command wrote to stdout before failing.
        stdout: String,
        /// Text the command wrote to stderr.
        stderr: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScmError {
    /// Shorthand for [`ScmError::UnsupportedOperation`].
    #[must_use]
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
        }
    }
}
