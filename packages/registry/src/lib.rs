#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Backend registration and playground resolution for `scmbench`.
//!
//! A [`BackendRegistry`] collects the SCM backends an application knows
//! about, partitions them by availability, and answers which backend owns
//! a given directory.

mod registry;
mod text;

pub use registry::BackendRegistry;
pub use text::{quote_if_needed, quoted_join, quoted_list};
