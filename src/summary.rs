//! Source-address summarisation (RFC 6724 presence-only proxy for §5
//! source-address selection).
//!
//! See `DESIGN.md` for the rationale behind using presence bitmasks instead
//! of running the full source-selection algorithm.

use std::net::IpAddr;

use log::{trace, warn};

use crate::classify::{self, MappedAddress};

/// Sampled sources beyond this count are skipped; a single `warn!` marks the
/// truncation rather than one per dropped source.
pub const MAX_CAND_SOURCE_ADDRESSES: usize = 32;

/// The local addresses of one network interface, as handed to
/// [`InterfaceSource::for_each`].
#[derive(Clone, Debug, Default)]
pub struct InterfaceAddrs {
    /// The interface's primary IPv4 address, if any (`None` for an
    /// unconfigured/zero address).
    pub primary_v4: Option<IpAddr>,
    /// Every configured IPv6 address on the interface (excluding the
    /// unspecified address).
    pub v6: Vec<IpAddr>,
}

/// External collaborator: enumerates local network interfaces and their
/// configured addresses.
///
/// Kept as a trait so the RFC 6724 core never depends on a concrete
/// system-interface-enumeration crate; see [`crate::net::SystemInterfaces`]
/// for the default, `netdev`-backed implementation.
pub trait InterfaceSource {
    /// Invoke `visit` once per interface.
    fn for_each(&self, visit: &mut dyn FnMut(InterfaceAddrs));
}

/// Presence-only summary of locally configured source addresses.
///
/// A flag being set means *at least one* source address of that
/// classification exists on some local interface; it does not identify which
/// interface, nor does it run RFC 6724 §5 source-address selection.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
pub struct SourceSummary {
    v6_scopes_present: u32,
    v4_scopes_present: u32,
    labels_present: u32,
}

impl SourceSummary {
    pub fn v6_scope_present(&self, scope: classify::Scope) -> bool {
        self.v6_scopes_present & (1 << scope.bits()) != 0
    }

    pub fn v4_scope_present(&self, scope: classify::Scope) -> bool {
        self.v4_scopes_present & (1 << scope.bits()) != 0
    }

    pub fn label_present(&self, label: classify::PrecedenceLabel) -> bool {
        self.labels_present & (1 << label.bits()) != 0
    }

    fn record(&mut self, source: &MappedAddress) {
        let label = classify::label(source);
        let scope = classify::scope(source);

        self.labels_present |= 1 << label.bits();
        if source.is_from_v4() {
            self.v4_scopes_present |= 1 << scope.bits();
        } else {
            self.v6_scopes_present |= 1 << scope.bits();
        }
    }
}

/// Build a [`SourceSummary`] by scanning every interface `source` yields.
///
/// Lists of length <= 1 are not short-circuited here (that belongs to
/// [`crate::sort::sort_destinations`]) — this always performs a full scan,
/// since the summary is reused by every comparison in the sort.
pub fn build_summary(source: &dyn InterfaceSource) -> SourceSummary {
    let mut summary = SourceSummary::default();
    let mut sampled = 0usize;
    let mut truncated = false;

    source.for_each(&mut |iface| {
        let mut sample = |addr: IpAddr| {
            if sampled >= MAX_CAND_SOURCE_ADDRESSES {
                if !truncated {
                    warn!(
                        "source summary hit MAX_CAND_SOURCE_ADDRESSES ({}); further sources are ignored",
                        MAX_CAND_SOURCE_ADDRESSES
                    );
                    truncated = true;
                }
                return;
            }
            let mapped = MappedAddress::widen(addr);
            trace!("sampled source address {:?}", addr);
            summary.record(&mapped);
            sampled += 1;
        };

        if let Some(v4) = iface.primary_v4 {
            sample(v4);
        }
        for v6 in iface.v6 {
            sample(v6);
        }
    });

    summary
}
