//! Open-enumeration value types: domains and named numbers.

use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;
use std::borrow::Cow;

use crate::error::InvalidValue;
use crate::num::{Radix, RawNum};

/// Name carried by every synthesized fallback instance.
pub const UNKNOWN: &str = "unknown";

/// A protocol-number domain.
///
/// Each domain is a `Copy` newtype over its raw wire integer (see the
/// `named_enum!` macro) plus the metadata the registry layer needs: a stable
/// label, a rendering convention, an optional structural invariant and the
/// default catalogue. The same numeric value has independent meaning in
/// different domains; the newtype keeps them apart at compile time.
pub trait Domain: Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync + 'static {
    /// The raw wire integer backing this domain.
    type Raw: RawNum;

    /// Stable label, e.g. `"ip-protocol"`. Used in dispatch keys and errors.
    const NAME: &'static str;

    /// Rendering convention for values of this domain.
    const RADIX: Radix = Radix::Dec;

    /// Wrap a raw value. Total; structural invariants live in [`Domain::check`].
    fn from_raw(raw: Self::Raw) -> Self;

    /// Unwrap to the raw value.
    fn raw(self) -> Self::Raw;

    /// Validate the domain's structural invariant, if it has one.
    fn check(self) -> Result<(), InvalidValue> {
        Ok(())
    }

    /// The default catalogue of `(value, name)` assignments.
    fn stock() -> &'static [(Self::Raw, &'static str)] {
        &[]
    }
}

/// An immutable `(value, name)` pair from one domain's catalogue.
///
/// Ordering is value-major (unsigned numeric order), with the name as a
/// tie-break so that `Ord` stays consistent with `Eq`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNum<D: Domain> {
    value: D,
    name: Cow<'static, str>,
}

impl<D: Domain> NamedNum<D> {
    /// Create a named number, enforcing the domain's structural invariant.
    pub fn new(value: D, name: impl Into<Cow<'static, str>>) -> Result<Self, InvalidValue> {
        value.check()?;
        Ok(Self {
            value,
            name: name.into(),
        })
    }

    /// Create without running [`Domain::check`]. Catalogue entries are
    /// assumed valid; wire values go through [`NamedNum::unknown`].
    pub(crate) fn new_unchecked(value: D, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            value,
            name: name.into(),
        }
    }

    /// The synthetic fallback for an uncatalogued value.
    ///
    /// Bypasses `check`: any value observed on the wire must be
    /// representable, invariants or not.
    pub fn unknown(value: D) -> Self {
        Self {
            value,
            name: Cow::Borrowed(UNKNOWN),
        }
    }

    /// Whether this instance is a synthesized fallback.
    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN
    }

    /// The typed value.
    #[inline]
    pub fn value(&self) -> D {
        self.value
    }

    /// The raw wire value.
    #[inline]
    pub fn raw(&self) -> D::Raw {
        self.value.raw()
    }

    /// The display name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value rendered under the domain's convention ([`Domain::RADIX`]).
    pub fn value_string(&self) -> String {
        D::RADIX.render(self.value.raw())
    }
}

impl<D: Domain> PartialOrd for NamedNum<D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<D: Domain> Ord for NamedNum<D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .raw()
            .cmp(&other.value.raw())
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl<D: Domain> fmt::Display for NamedNum<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.value_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ipv4::IpProtocol;
    use crate::ppp::PppDllProtocol;

    #[test]
    fn ordering_is_unsigned_value_major() {
        let lo = NamedNum::new(IpProtocol::from_raw(0x00), "zero").unwrap();
        let hi = NamedNum::new(IpProtocol::from_raw(0xff), "reserved").unwrap();
        assert!(lo < hi);

        let mut v = vec![hi.clone(), lo.clone()];
        v.sort();
        assert_eq!(v, vec![lo, hi]);
    }

    #[test]
    fn display_follows_domain_radix() {
        let tcp = NamedNum::new(IpProtocol::TCP, "TCP").unwrap();
        assert_eq!(tcp.value_string(), "6");
        assert_eq!(tcp.to_string(), "TCP (6)");

        let lcp = NamedNum::new(PppDllProtocol::LCP, "Link Control Protocol").unwrap();
        assert_eq!(lcp.value_string(), "0xc021");
    }

    #[test]
    fn unknown_renders_with_value() {
        let u = NamedNum::unknown(IpProtocol::from_raw(253));
        assert!(u.is_unknown());
        assert_eq!(u.to_string(), "unknown (253)");
    }

    #[test]
    fn construction_runs_domain_check() {
        assert!(NamedNum::new(PppDllProtocol::from_raw(0x0020), "bad parity").is_err());
        assert!(NamedNum::new(PppDllProtocol::from_raw(0x0021), "IPv4").is_ok());
    }
}
