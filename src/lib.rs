//! RFC 6724 destination-address selection and a `getaddrinfo`-style address
//! list assembler for dual-stack (IPv4 + IPv6) hosts.
//!
//! The interesting part of this crate is the destination-sort core
//! ([`classify`], [`summary`], [`compare`], [`sort`]): it classifies IPv6
//! and IPv4-mapped addresses by scope and precedence label under the RFC
//! 6724 default policy table, derives a presence-only summary of locally
//! available source addresses, and orders candidate destinations by a
//! subset of the RFC 6724 §6 comparison rules (2, 5, 6, 8, 10 — rules 1, 3,
//! 4, 7 and 9 are not attempted). [`getaddrinfo`] assembles a result list
//! around that core; [`legacy`] is a thin single-address façade for callers
//! that only want one IPv4 answer.

pub mod classify;
pub mod compare;
pub mod error;
pub mod family;
pub mod getaddrinfo;
pub mod legacy;
pub mod net;
pub mod sort;
pub mod summary;

pub use crate::classify::{MappedAddress, PrecedenceLabel, Scope};
pub use crate::error::{GaiError, GaiErrorKind, GaiResult, LegacyError, LegacyResult};
pub use crate::family::FamilyConstraint;
pub use crate::getaddrinfo::{getaddrinfo, AddrInfo, Hints, Protocol, Resolver, ResolveError, SockType};
pub use crate::legacy::{last_legacy_error, lookup_host_ipv4, lookup_host_ipv4_r, HostEntry};
pub use crate::summary::{InterfaceAddrs, InterfaceSource, SourceSummary};

#[cfg(feature = "system-interfaces")]
pub use crate::net::SystemInterfaces;
