#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Session lifecycle orchestration for `scmbench`.
//!
//! An [`ScmSession`] owns the backend registry and the active backend
//! selection, and drives the working-directory, workspace-history, and
//! options side effects that follow a selection change.

mod events;
mod session;

pub use events::{ChangeFlags, ChangeNotifier, NullNotifier};
pub use session::{BackendChoice, ProjectManager, ScmSession, SessionError};
