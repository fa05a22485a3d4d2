//! Destination-list sorting (RFC 6724 §6), built on [`crate::compare`].

use std::net::SocketAddr;

use log::debug;

use crate::classify::MappedAddress;
use crate::summary::{build_summary, InterfaceSource};

/// Sort `destinations` in place by RFC 6724 preference, using `source` to
/// derive which classes of local source address are available.
///
/// Lists of length <= 1 are returned unchanged without touching `source` at
/// all (the short-circuit is load-bearing: it is what lets a caller with a
/// single candidate skip interface enumeration entirely).
pub fn sort_destinations(destinations: &mut [SocketAddr], source: &dyn InterfaceSource) {
    if destinations.len() <= 1 {
        return;
    }

    let summary = build_summary(source);
    debug!("sorting {} destinations", destinations.len());

    let mapped: Vec<MappedAddress> = destinations.iter().map(|d| MappedAddress::widen(d.ip())).collect();

    let mut indices: Vec<usize> = (0..destinations.len()).collect();
    indices.sort_by(|&i, &j| crate::compare::compare(&mapped[i], &mapped[j], &summary));

    let sorted: Vec<SocketAddr> = indices.iter().map(|&i| destinations[i]).collect();
    destinations.copy_from_slice(&sorted);
}
