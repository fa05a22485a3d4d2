//! RFC 6724 address classification: scope and precedence label.
//!
//! Every destination and every sampled source is widened to a
//! [`MappedAddress`] before it is handed to [`scope`] or [`label`]. Both
//! functions are pure and total, and are safe to call concurrently.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A v6-shaped address: 16 bytes in network order plus an optional
/// zone/scope id. IPv4 addresses are widened into the IPv4-mapped IPv6 form
/// `::ffff:a.b.c.d` before being stored here.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MappedAddress {
    octets: [u8; 16],
    scope_id: u32,
    from_v4: bool,
}

impl MappedAddress {
    /// Widen an [`IpAddr`] to v6-shaped form.
    pub fn widen(addr: IpAddr) -> MappedAddress {
        match addr {
            IpAddr::V4(v4) => MappedAddress::from_v4(v4),
            IpAddr::V6(v6) => MappedAddress::from_v6(v6, 0),
        }
    }

    /// Widen an [`Ipv4Addr`] to its IPv4-mapped IPv6 form `::ffff:a.b.c.d`.
    pub fn from_v4(addr: Ipv4Addr) -> MappedAddress {
        let mut octets = [0u8; 16];
        octets[10] = 0xff;
        octets[11] = 0xff;
        octets[12..16].copy_from_slice(&addr.octets());
        MappedAddress {
            octets,
            scope_id: 0,
            from_v4: true,
        }
    }

    /// Widen an [`Ipv6Addr`], keeping its zone/scope id.
    pub fn from_v6(addr: Ipv6Addr, scope_id: u32) -> MappedAddress {
        MappedAddress {
            octets: addr.octets(),
            scope_id,
            from_v4: false,
        }
    }

    /// True if this address originated from an IPv4 source (i.e. it is the
    /// IPv4-mapped form, not a "natively" IPv6 address that happens to share
    /// the same prefix).
    pub fn is_from_v4(&self) -> bool {
        self.from_v4
    }

    pub fn scope_id(&self) -> u32 {
        self.scope_id
    }

    fn segments(&self) -> [u16; 8] {
        let mut out = [0u16; 8];
        for (i, chunk) in self.octets.chunks_exact(2).enumerate() {
            out[i] = u16::from_be_bytes([chunk[0], chunk[1]]);
        }
        out
    }

    fn is_v4_mapped(&self) -> bool {
        self.octets[0..10] == [0; 10] && self.octets[10] == 0xff && self.octets[11] == 0xff
    }

    fn is_v4_compatible(&self) -> bool {
        self.octets[0..12] == [0; 12] && !self.is_unspecified() && !self.is_v4_loopback_compat()
    }

    fn is_v4_loopback_compat(&self) -> bool {
        self.octets[0..15] == [0; 15] && self.octets[15] == 1
    }

    fn is_unspecified(&self) -> bool {
        self.octets == [0; 16]
    }

    fn is_loopback(&self) -> bool {
        self.octets == Ipv6Addr::LOCALHOST.octets()
    }

    fn is_multicast(&self) -> bool {
        self.octets[0] == 0xff
    }

    /// Multicast scope nibble, per RFC 4291 §2.7 (low nibble of the second
    /// address byte).
    fn multicast_scope_nibble(&self) -> u8 {
        self.octets[1] & 0x0f
    }

    fn is_link_local(&self) -> bool {
        self.octets[0] == 0xfe && (self.octets[1] & 0xc0) == 0x80
    }

    fn is_site_local(&self) -> bool {
        self.octets[0] == 0xfe && (self.octets[1] & 0xc0) == 0xc0
    }

    fn v4_mapped_is_link_local(&self) -> bool {
        // ::ffff:169.254.0.0/112
        self.is_v4_mapped() && self.octets[12] == 169 && self.octets[13] == 254
    }

    fn v4_mapped_is_loopback(&self) -> bool {
        // ::ffff:127.0.0.0/104
        self.is_v4_mapped() && self.octets[12] == 127
    }

    fn is_teredo(&self) -> bool {
        let seg = self.segments();
        seg[0] == 0x2001 && seg[1] == 0
    }

    fn is_6to4(&self) -> bool {
        self.segments()[0] == 0x2002
    }

    fn is_6bone(&self) -> bool {
        self.segments()[0] == 0x3ffe
    }

    fn is_unique_local(&self) -> bool {
        (self.octets[0] & 0xfe) == 0xfc
    }
}

/// RFC 4007-style scope of an address, reused by analogy for unicast
/// addresses via RFC 6724.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum Scope {
    Reserved = 0x0,
    LinkLocal = 0x2,
    SiteLocal = 0x5,
    Global = 0xe,
}

impl Scope {
    /// Reinterpret a raw scope nibble (e.g. from a multicast address) as a
    /// `Scope`. Values with no named variant fall back to `Reserved`.
    pub fn from_bits(bits: u8) -> Scope {
        match bits & 0x0f {
            0x2 => Scope::LinkLocal,
            0x5 => Scope::SiteLocal,
            0xe => Scope::Global,
            _ => Scope::Reserved,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// An equivalence class from the RFC 6724 default policy table.
///
/// Discriminants are pinned to the RFC 6724 default policy table's label
/// values so that `1u32 << label as u32` is a stable bit position across
/// builds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum PrecedenceLabel {
    Loopback = 0,
    General = 1,
    SixToFour = 2,
    V4Compatible = 3,
    V4Mapped = 4,
    Teredo = 5,
    SiteLocal = 11,
    SixBone = 12,
    Ula = 13,
}

impl PrecedenceLabel {
    /// The default policy table's precedence value for this label.
    pub fn precedence(self) -> u8 {
        match self {
            PrecedenceLabel::Loopback => 50,
            PrecedenceLabel::General => 40,
            PrecedenceLabel::SixToFour => 30,
            PrecedenceLabel::V4Compatible => 1,
            PrecedenceLabel::V4Mapped => 35,
            PrecedenceLabel::Teredo => 5,
            PrecedenceLabel::SiteLocal => 1,
            PrecedenceLabel::SixBone => 1,
            PrecedenceLabel::Ula => 3,
        }
    }

    pub fn bits(self) -> u8 {
        self as u8
    }
}

/// Classify `a`'s RFC 4007-style scope.
pub fn scope(a: &MappedAddress) -> Scope {
    if a.is_multicast() {
        Scope::from_bits(a.multicast_scope_nibble())
    } else if a.is_link_local()
        || a.is_loopback()
        || a.v4_mapped_is_link_local()
        || a.v4_mapped_is_loopback()
    {
        Scope::LinkLocal
    } else if a.is_site_local() {
        Scope::SiteLocal
    } else {
        Scope::Global
    }
}

/// Classify `a`'s precedence label, evaluated longest-prefix-first.
pub fn label(a: &MappedAddress) -> PrecedenceLabel {
    if a.is_loopback() {
        PrecedenceLabel::Loopback
    } else if a.is_v4_mapped() {
        PrecedenceLabel::V4Mapped
    } else if a.is_v4_compatible() {
        PrecedenceLabel::V4Compatible
    } else if a.is_teredo() {
        PrecedenceLabel::Teredo
    } else if a.is_6to4() {
        PrecedenceLabel::SixToFour
    } else if a.is_6bone() {
        PrecedenceLabel::SixBone
    } else if a.is_site_local() {
        PrecedenceLabel::SiteLocal
    } else if a.is_unique_local() {
        PrecedenceLabel::Ula
    } else {
        PrecedenceLabel::General
    }
}
