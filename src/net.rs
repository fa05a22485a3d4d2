//! Default, system-backed [`InterfaceSource`] implementation.
//!
//! Mirrors the classic `message::get_local_addrs` helper, which walks
//! `netdev::get_interfaces()` and flattens each interface's `ipv4`/`ipv6`
//! address lists. Kept behind the `system-interfaces` feature (on by
//! default) so the RFC 6724 core itself never references `netdev` directly.

#![cfg(feature = "system-interfaces")]

use std::net::IpAddr;

use crate::summary::{InterfaceAddrs, InterfaceSource};

/// Enumerates the host's real network interfaces via `netdev`.
#[derive(Copy, Clone, Default, Debug)]
pub struct SystemInterfaces;

impl InterfaceSource for SystemInterfaces {
    fn for_each(&self, visit: &mut dyn FnMut(InterfaceAddrs)) {
        for iface in netdev::get_interfaces() {
            let primary_v4 = iface.ipv4.first().map(|net| IpAddr::from(net.addr()));
            let v6 = iface.ipv6.iter().map(|net| IpAddr::from(net.addr())).collect();

            visit(InterfaceAddrs { primary_v4, v6 });
        }
    }
}
