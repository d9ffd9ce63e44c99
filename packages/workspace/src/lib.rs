#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Workspace bookkeeping for `scmbench`.
//!
//! This crate provides the two file-backed stores the session lifecycle
//! drives: a recently-used workspace history and a layered key/value
//! options store, both XDG-compliant.

mod error;
mod history;
mod options;

pub use error::WorkspaceStoreError;
pub use history::{WorkspaceEntry, WorkspaceHistory};
pub use options::OptionsStore;
