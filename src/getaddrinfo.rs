//! The `getaddrinfo`-style result list assembler (C5).
//!
//! Consults a [`Resolver`] for zero, one, or two addresses and, when both
//! address families resolved, sorts them with [`crate::sort`].

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::str::FromStr;

use log::debug;

use crate::error::{GaiError, GaiResult};
use crate::family::FamilyConstraint;
use crate::sort::sort_destinations;
use crate::summary::InterfaceSource;

/// Longest name `getaddrinfo` will accept, per the DNS name-length limit.
pub const MAX_NODE_LEN: usize = 253;

/// External collaborator: resolves a name to at most one address per call.
///
/// This crate never retries, caches, or applies timeout policy — that is
/// entirely the resolver's responsibility.
pub trait Resolver {
    fn resolve(&self, name: &str, family: FamilyConstraint) -> Result<IpAddr, ResolveError>;
}

/// A resolver failure, as reported by the external [`Resolver`].
#[derive(Clone, Debug)]
pub struct ResolveError(pub String);

/// Hints controlling how [`getaddrinfo`] resolves a node/service pair.
///
/// Uses a `set_*(self) -> Self` builder chain rather than public mutable
/// fields everywhere.
#[derive(Copy, Clone, Debug)]
pub struct Hints {
    pub family: FamilyConstraint,
    pub socktype: SockType,
    pub protocol: Protocol,
    pub numeric_host: bool,
    pub passive: bool,
    /// When both families are enabled and unspecified, sort the combined
    /// result with RFC 6724. Disabling this exercises the "prefer IPv4"
    /// fallback branch discussed in `DESIGN.md`'s Open Question.
    pub dynamic_sort: bool,
}

impl Hints {
    pub fn new() -> Hints {
        Default::default()
    }

    pub fn set_family(mut self, value: FamilyConstraint) -> Self {
        self.family = value;
        self
    }

    pub fn set_socktype(mut self, value: SockType) -> Self {
        self.socktype = value;
        self
    }

    pub fn set_protocol(mut self, value: Protocol) -> Self {
        self.protocol = value;
        self
    }

    pub fn set_numeric_host(mut self, value: bool) -> Self {
        self.numeric_host = value;
        self
    }

    pub fn set_passive(mut self, value: bool) -> Self {
        self.passive = value;
        self
    }

    pub fn set_dynamic_sort(mut self, value: bool) -> Self {
        self.dynamic_sort = value;
        self
    }
}

impl Default for Hints {
    fn default() -> Self {
        Hints {
            family: FamilyConstraint::Any,
            socktype: SockType::Unspecified,
            protocol: Protocol::Unspecified,
            numeric_host: false,
            passive: false,
            dynamic_sort: true,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SockType {
    Unspecified,
    Stream,
    Dgram,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Protocol {
    Unspecified,
    Tcp,
    Udp,
}

/// One entry of the returned address list.
#[derive(Clone, Debug)]
pub struct AddrInfo {
    pub socktype: SockType,
    pub protocol: Protocol,
    pub sockaddr: SocketAddr,
    pub canon_name: Option<String>,
}

/// Build the result address list for `node`/`service` under `hints`.
///
/// Unlike a C `getaddrinfo`, the result is an ordinary owned `Vec<AddrInfo>`:
/// there is no out-pointer, no manual chain to free, and no way to leak a
/// partially built list on an error path (`?` simply drops everything built
/// so far).
pub fn getaddrinfo(
    node: Option<&str>,
    service: Option<&str>,
    hints: &Hints,
    resolver: &dyn Resolver,
    interfaces: &dyn InterfaceSource,
) -> GaiResult<Vec<AddrInfo>> {
    // Step 1: a name is required in some form.
    if node.is_none() && service.is_none() {
        return Err(GaiError::NoName);
    }

    // Step 2: hints family must be one we understand.
    if !matches!(hints.family, FamilyConstraint::Any | FamilyConstraint::V4 | FamilyConstraint::V6) {
        return Err(GaiError::Family);
    }

    // Step 3: service is a numeric port, or absent.
    let port = parse_service(service)?;

    // Step 5: node length bound (checked before resolution so an
    // over-length name never reaches the resolver).
    if let Some(n) = node {
        if n.len() > MAX_NODE_LEN {
            return Err(GaiError::Fail(format!("node name exceeds {} octets", MAX_NODE_LEN)));
        }
    }

    // Step 4: node lookup.
    let mut addrs = resolve_node(node, hints, resolver)?;
    debug!("getaddrinfo resolved {} address(es) for {:?}", addrs.len(), node);

    if addrs.len() > 1 {
        let mut socks: Vec<SocketAddr> = addrs.iter().map(|a| SocketAddr::new(*a, port)).collect();
        sort_destinations(&mut socks, interfaces);
        addrs = socks.into_iter().map(|s| s.ip()).collect();
    }

    // Step 6/7: assemble one AddrInfo per address, in (sorted) order.
    let mut result = Vec::with_capacity(addrs.len());
    for addr in addrs {
        result.push(AddrInfo {
            socktype: hints.socktype,
            protocol: hints.protocol,
            sockaddr: SocketAddr::new(addr, port),
            canon_name: node.map(str::to_string),
        });
    }

    Ok(result)
}

fn parse_service(service: Option<&str>) -> GaiResult<u16> {
    match service {
        None => Ok(0),
        Some(s) => s
            .parse::<u16>()
            .map_err(|_| GaiError::Service(s.to_string())),
    }
}

fn resolve_node(node: Option<&str>, hints: &Hints, resolver: &dyn Resolver) -> GaiResult<Vec<IpAddr>> {
    let Some(name) = node else {
        // No node: substitute any-address when Passive, else loopback,
        // for whichever single family hints ask for (defaulting to v4).
        let family = match hints.family {
            FamilyConstraint::V6 => FamilyConstraint::V6,
            _ => FamilyConstraint::V4,
        };
        let addr = match (hints.passive, family) {
            (true, FamilyConstraint::V6) => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
            (true, _) => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            (false, FamilyConstraint::V6) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            (false, _) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        return Ok(vec![addr]);
    };

    if hints.numeric_host {
        let addr = IpAddr::from_str(name).map_err(|_| GaiError::Fail(format!("'{}' is not a numeric host", name)))?;
        let family_ok = match (hints.family, addr) {
            (FamilyConstraint::V4, IpAddr::V6(_)) => false,
            (FamilyConstraint::V6, IpAddr::V4(_)) => false,
            _ => true,
        };
        if !family_ok {
            return Err(GaiError::Fail(format!("'{}' does not match requested family", name)));
        }
        return Ok(vec![addr]);
    }

    match hints.family {
        FamilyConstraint::Any if hints.dynamic_sort => {
            let v6 = resolver.resolve(name, FamilyConstraint::V6).ok();
            let v4 = resolver.resolve(name, FamilyConstraint::V4).ok();
            match (v6, v4) {
                (Some(a), Some(b)) => Ok(vec![a, b]),
                (Some(a), None) => Ok(vec![a]),
                (None, Some(b)) => Ok(vec![b]),
                (None, None) => Err(GaiError::Fail(format!("could not resolve '{}'", name))),
            }
        }
        FamilyConstraint::Any => {
            // dynamic_sort disabled: resolve a single answer, preferring
            // IPv4 (see DESIGN.md, Open Question), instead of resolving
            // both families and sorting them.
            resolver
                .resolve(name, FamilyConstraint::V4)
                .or_else(|_| resolver.resolve(name, FamilyConstraint::V6))
                .map(|a| vec![a])
                .map_err(|e| GaiError::Fail(e.0))
        }
        FamilyConstraint::V4OrV6 => {
            // Open question preserved as-is (see DESIGN.md): only one slot
            // is consumed from a request that nominally allows either
            // family. We ask for V4 first, as the "prefer IPv4" comment in
            // the original non-dynamic branch implies, without inferring
            // further intent about a discarded v6 answer.
            resolver
                .resolve(name, FamilyConstraint::V4)
                .map(|a| vec![a])
                .map_err(|e| GaiError::Fail(e.0))
        }
        single => resolver
            .resolve(name, single)
            .map(|a| vec![a])
            .map_err(|e| GaiError::Fail(e.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::test_support::FixedInterfaces;
    use std::collections::HashMap;
    use std::net::Ipv4Addr;

    struct MapResolver(HashMap<(&'static str, &'static str), IpAddr>);

    impl Resolver for MapResolver {
        fn resolve(&self, name: &str, family: FamilyConstraint) -> Result<IpAddr, ResolveError> {
            let key = match family {
                FamilyConstraint::V4 => "v4",
                FamilyConstraint::V6 => "v6",
                _ => "any",
            };
            self.0
                .iter()
                .find(|((n, f), _)| *n == name && *f == key)
                .map(|(_, addr)| *addr)
                .ok_or_else(|| ResolveError(format!("no {key} record for {name}")))
        }
    }

    fn dual_stack_resolver() -> MapResolver {
        let mut m = HashMap::new();
        m.insert(("example.com", "v4"), IpAddr::from_str("198.51.100.121").unwrap());
        m.insert(("example.com", "v6"), IpAddr::from_str("2001:db8:1::1").unwrap());
        MapResolver(m)
    }

    #[test]
    fn positive_no_name_error() {
        let hints = Hints::new();
        let resolver = dual_stack_resolver();
        let ifaces = FixedInterfaces(vec![]);
        let err = getaddrinfo(None, None, &hints, &resolver, &ifaces).unwrap_err();
        assert_eq!(err.kind(), crate::error::GaiErrorKind::NoName);
    }

    #[test]
    fn positive_invalid_service_error() {
        let hints = Hints::new();
        let resolver = dual_stack_resolver();
        let ifaces = FixedInterfaces(vec![]);
        let err = getaddrinfo(Some("example.com"), Some("http"), &hints, &resolver, &ifaces).unwrap_err();
        assert_eq!(err.kind(), crate::error::GaiErrorKind::Service);
    }

    #[test]
    fn positive_dual_stack_result_sorted_and_capped_at_two() {
        let hints = Hints::new();
        let resolver = dual_stack_resolver();
        let ifaces = FixedInterfaces::from_strs(&["2001:db8:1::2", "fe80::1", "169.254.13.78"]);

        let result = getaddrinfo(Some("example.com"), Some("443"), &hints, &resolver, &ifaces).unwrap();
        assert!(result.len() <= 2);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].sockaddr.ip().to_string(), "2001:db8:1::1");
        assert_eq!(result[0].sockaddr.port(), 443);
    }

    #[test]
    fn positive_numeric_host_bypasses_resolver() {
        let hints = Hints::new().set_numeric_host(true);
        struct PanicResolver;
        impl Resolver for PanicResolver {
            fn resolve(&self, _: &str, _: FamilyConstraint) -> Result<IpAddr, ResolveError> {
                panic!("resolver must not be called for a numeric host");
            }
        }
        let ifaces = FixedInterfaces(vec![]);
        let result = getaddrinfo(Some("192.0.2.1"), None, &hints, &PanicResolver, &ifaces).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sockaddr.ip(), IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1)));
    }

    #[test]
    fn positive_numeric_host_family_mismatch_fails() {
        let hints = Hints::new().set_numeric_host(true).set_family(FamilyConstraint::V6);
        struct Unreachable;
        impl Resolver for Unreachable {
            fn resolve(&self, _: &str, _: FamilyConstraint) -> Result<IpAddr, ResolveError> {
                unreachable!()
            }
        }
        let ifaces = FixedInterfaces(vec![]);
        let err = getaddrinfo(Some("192.0.2.1"), None, &hints, &Unreachable, &ifaces).unwrap_err();
        assert_eq!(err.kind(), crate::error::GaiErrorKind::Fail);
    }

    #[test]
    fn positive_absent_node_passive_yields_any_address() {
        let hints = Hints::new().set_passive(true);
        struct Unreachable;
        impl Resolver for Unreachable {
            fn resolve(&self, _: &str, _: FamilyConstraint) -> Result<IpAddr, ResolveError> {
                unreachable!()
            }
        }
        let ifaces = FixedInterfaces(vec![]);
        let result = getaddrinfo(None, Some("80"), &hints, &Unreachable, &ifaces).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sockaddr.ip(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn positive_absent_node_active_yields_loopback() {
        let hints = Hints::new();
        struct Unreachable;
        impl Resolver for Unreachable {
            fn resolve(&self, _: &str, _: FamilyConstraint) -> Result<IpAddr, ResolveError> {
                unreachable!()
            }
        }
        let ifaces = FixedInterfaces(vec![]);
        let result = getaddrinfo(None, Some("80"), &hints, &Unreachable, &ifaces).unwrap();
        assert_eq!(result[0].sockaddr.ip(), IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn positive_oversized_node_name_fails() {
        let hints = Hints::new();
        let resolver = dual_stack_resolver();
        let ifaces = FixedInterfaces(vec![]);
        let long_name = "a".repeat(MAX_NODE_LEN + 1);
        let err = getaddrinfo(Some(&long_name), None, &hints, &resolver, &ifaces).unwrap_err();
        assert_eq!(err.kind(), crate::error::GaiErrorKind::Fail);
    }

    #[test]
    fn positive_dynamic_sort_disabled_yields_single_ipv4_preferred_answer() {
        let hints = Hints::new().set_dynamic_sort(false);
        let resolver = dual_stack_resolver();
        let ifaces = FixedInterfaces(vec![]);

        let result = getaddrinfo(Some("example.com"), Some("443"), &hints, &resolver, &ifaces).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sockaddr.ip().to_string(), "198.51.100.121");
    }

    #[test]
    fn positive_dynamic_sort_disabled_falls_back_to_ipv6_when_no_v4_record() {
        let hints = Hints::new().set_dynamic_sort(false);
        let mut m = HashMap::new();
        m.insert(("v6only.example", "v6"), IpAddr::from_str("2001:db8:1::1").unwrap());
        let resolver = MapResolver(m);
        let ifaces = FixedInterfaces(vec![]);

        let result = getaddrinfo(Some("v6only.example"), Some("443"), &hints, &resolver, &ifaces).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].sockaddr.ip().to_string(), "2001:db8:1::1");
    }

    #[test]
    fn positive_result_length_never_exceeds_two() {
        let hints = Hints::new();
        let resolver = dual_stack_resolver();
        let ifaces = FixedInterfaces(vec![]);
        let result = getaddrinfo(Some("example.com"), None, &hints, &resolver, &ifaces).unwrap();
        assert!(result.len() <= 2);
    }
}
