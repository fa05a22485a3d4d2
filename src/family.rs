//! Address-family constraints shared between the resolver facade and the
//! result assembler.

/// Which address family a resolver call (or a set of hints) is constrained to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum FamilyConstraint {
    /// No constraint; either family is acceptable.
    Any,
    /// IPv4 only.
    V4,
    /// IPv6 only.
    V6,
    /// Either family, but the caller only wants a single answer and prefers
    /// IPv4 if both would resolve.
    ///
    /// This mirrors the "prefer IPv4" fallback branch of `getaddrinfo` (see
    /// `DESIGN.md`, Open Question): the resolver is asked for `V4OrV6` and
    /// only one slot is consumed.
    V4OrV6,
}

#[cfg(test)]
mod tests {
    use super::FamilyConstraint;

    #[test]
    fn positive_equality() {
        assert_eq!(FamilyConstraint::Any, FamilyConstraint::Any);
        assert_ne!(FamilyConstraint::V4, FamilyConstraint::V6);
    }
}
