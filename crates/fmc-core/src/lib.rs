//! # fmc-core
//!
//! Core types and utilities for working with the Firewall Management Center
//! (FMC) configuration API.
//!
//! This crate provides the error taxonomy, configuration, and HTTP request
//! execution shared by the FMC service clients.
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Configuration structures for FMC clients
//! - [`client`] - HTTP client configuration and default timeouts
//! - [`context`] - Per-call deadlines and cancellation
//! - [`executor`] - Request execution and response decoding

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;

// Re-export commonly used types
pub use context::{CancelHandle, RequestContext};
pub use error::{Error, Result};
pub use executor::{HttpExecutor, PreparedRequest, RequestExecutor};
