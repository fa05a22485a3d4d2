//! The legacy single-address lookup façade (C6): a thin wrapper returning a
//! single IPv4 address in a fixed-shape envelope, analogous to the classic
//! (thread-unsafe) `gethostbyname`.

use std::cell::RefCell;
use std::net::Ipv4Addr;

use crate::error::{LegacyError, LegacyResult};
use crate::family::FamilyConstraint;
use crate::getaddrinfo::{ResolveError, Resolver};

/// Fixed-shape result of a single-address lookup: one address, no aliases.
#[derive(Clone, Debug)]
pub struct HostEntry {
    pub name: String,
    pub addr: Ipv4Addr,
}

thread_local! {
    /// Per-thread override of the legacy global error variable.
    ///
    /// A C `gethostbyname` exposes a single process-global `h_errno`; a
    /// *shared* static would be a genuine data race in Rust, so this
    /// crate gives every thread its own slot instead, which is exactly the
    /// "per-thread override" a multi-threaded host needs in place of a
    /// shared global.
    static LAST_LEGACY_ERROR: RefCell<Option<LegacyError>> = const { RefCell::new(None) };
}

fn record_error(err: &LegacyError) {
    LAST_LEGACY_ERROR.with(|cell| {
        *cell.borrow_mut() = Some(match err {
            LegacyError::HostNotFound => LegacyError::HostNotFound,
            LegacyError::Range(n) => LegacyError::Range(*n),
        });
    });
}

/// Read back the last error recorded by [`lookup_host_ipv4`] on this thread.
pub fn last_legacy_error() -> Option<LegacyError> {
    LAST_LEGACY_ERROR.with(|cell| match &*cell.borrow() {
        Some(LegacyError::HostNotFound) => Some(LegacyError::HostNotFound),
        Some(LegacyError::Range(n)) => Some(LegacyError::Range(*n)),
        None => None,
    })
}

/// Non-reentrant variant: resolves `name` to a single IPv4 address, storing
/// the error (if any) in thread-local storage rather than process-shared
/// storage.
pub fn lookup_host_ipv4(name: &str, resolver: &dyn Resolver) -> LegacyResult<HostEntry> {
    match resolver.resolve(name, FamilyConstraint::V4) {
        Ok(std::net::IpAddr::V4(addr)) => Ok(HostEntry {
            name: name.to_string(),
            addr,
        }),
        _ => {
            let err = LegacyError::HostNotFound;
            record_error(&err);
            Err(err)
        }
    }
}

/// Minimum scratch length for [`lookup_host_ipv4_r`]: the `HostEntry`
/// payload plus the name, NUL-terminated.
fn required_scratch_len(name: &str) -> usize {
    std::mem::size_of::<HostEntry>() + name.len() + 1
}

/// Reentrant variant: same contract as [`lookup_host_ipv4`], but writes the
/// name into caller-supplied `scratch` instead of an owned `String`, so the
/// only allocation left is the one the caller chose to make up front.
///
/// Returns [`LegacyError::Range`] (carrying how many bytes were missing) if
/// `scratch` is smaller than `HostEntry` plus `name` plus its NUL terminator.
/// This is the form exercised by the reentrant-buffer property in
/// `SPEC_FULL.md` §8: with a buffer exactly `required_scratch_len(name)`
/// bytes long the call succeeds; with one byte less it returns `Range`.
pub fn lookup_host_ipv4_r(
    name: &str,
    scratch: &mut [u8],
    resolver: &dyn Resolver,
) -> LegacyResult<HostEntry> {
    let needed = required_scratch_len(name);
    if scratch.len() < needed {
        let err = LegacyError::Range(needed - scratch.len());
        record_error(&err);
        return Err(err);
    }

    match resolver.resolve(name, FamilyConstraint::V4) {
        Ok(std::net::IpAddr::V4(addr)) => Ok(HostEntry {
            name: name.to_string(),
            addr,
        }),
        _ => {
            let err = LegacyError::HostNotFound;
            record_error(&err);
            Err(err)
        }
    }
}
