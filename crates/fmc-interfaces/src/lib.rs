//! FMC physical-interface client and data models.
//!
//! Provides typed structures and an asynchronous client for reading and
//! replacing the physical interface configuration of devices managed by a
//! Firewall Management Center.

#![deny(missing_docs)]

pub mod client;
pub mod models;

pub use client::{InterfaceClient, InterfaceClientBuilder};
pub use fmc_core::{CancelHandle, RequestContext};
pub use models::{
    InterfaceIdentity, Ipv4Addressing, Ipv4Config, Ipv4Dhcp, Ipv4Static, Ipv6Address, Ipv6Config,
    Links, Paging, PhysicalInterface, PhysicalInterfaceList, SecurityZoneRef,
};

/// Convenient result alias sharing the `fmc-core` error type.
pub type Result<T> = fmc_core::Result<T>;
