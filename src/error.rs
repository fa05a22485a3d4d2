use std::net;

use quick_error::quick_error;

/// Bare discriminant for a `GaiError`, for callers that only need the code.
///
/// Mirrors the stable numeric error codes a C `getaddrinfo` would return
/// (`EAI_NONAME`, `EAI_FAMILY`, ...) without tying API users to the specific
/// message text carried by the variant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum GaiErrorKind {
    NoName,
    Family,
    Service,
    Fail,
    Memory,
}

quick_error! {
    /// Enumerates all errors that can occur while assembling an address list.
    #[derive(Debug)]
    pub enum GaiError {
        /// Neither a node name nor a service was supplied.
        NoName { }
        /// The hints requested a family other than unspecified/v4/v6.
        Family { }
        /// The service string was neither absent nor a decimal port in `0..=65535`.
        Service(value: String) {
            display("invalid service '{}': expected a numeric port", value)
        }
        /// Node name resolution failed (timeout, NXDOMAIN, family mismatch under NumericHost).
        Fail(reason: String) {
            display("name resolution failed: {}", reason)
        }
        /// Allocation for the result list failed.
        Memory { }

        AddrParse(err: net::AddrParseError) {
            from()
            display("invalid numeric address: {}", err)
        }
    }
}

impl GaiError {
    /// The bare discriminant, for callers that want to branch on the code
    /// rather than match the full error.
    pub fn kind(&self) -> GaiErrorKind {
        match self {
            GaiError::NoName => GaiErrorKind::NoName,
            GaiError::Family => GaiErrorKind::Family,
            GaiError::Service(_) => GaiErrorKind::Service,
            GaiError::Fail(_) => GaiErrorKind::Fail,
            GaiError::Memory => GaiErrorKind::Memory,
            GaiError::AddrParse(_) => GaiErrorKind::Family,
        }
    }
}

pub type GaiResult<T> = Result<T, GaiError>;

quick_error! {
    /// Errors from the legacy single-address lookup façade (C6).
    #[derive(Debug)]
    pub enum LegacyError {
        /// The name could not be resolved to an IPv4 address.
        HostNotFound { }
        /// The caller-supplied scratch buffer was too small.
        ///
        /// Carries the number of additional bytes that would have been needed.
        Range(short_by: usize) {
            display("scratch buffer too small by {} bytes", short_by)
        }
    }
}

pub type LegacyResult<T> = Result<T, LegacyError>;
