#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! SCM backend capability contract for `scmbench`.
//!
//! This crate defines the `ScmBackend` trait that every concrete SCM adapter
//! (git, hg, ...) implements, and the inert `NullBackend` used when no real
//! SCM claims the working directory.

mod backend;
mod null;

pub use backend::ScmBackend;
pub use null::NullBackend;
pub use scmbench_backend_models::*;
