//! DNS resource record types and classes.

named_enum! {
    /// DNS resource record types.
    pub struct RrType (u16), "dns-rr-type" {
        /// IPv4 host address.
        A = 1 => "A",
        /// Authoritative name server.
        NS = 2 => "NS",
        /// Canonical name.
        CNAME = 5 => "CNAME",
        /// Start of authority.
        SOA = 6 => "SOA",
        /// Domain name pointer.
        PTR = 12 => "PTR",
        /// Host information.
        HINFO = 13 => "HINFO",
        /// Mail exchange.
        MX = 15 => "MX",
        /// Text record.
        TXT = 16 => "TXT",
        /// IPv6 host address.
        AAAA = 28 => "AAAA",
        /// Service locator.
        SRV = 33 => "SRV",
        /// Naming authority pointer.
        NAPTR = 35 => "NAPTR",
        /// EDNS option pseudo-record.
        OPT = 41 => "OPT",
        /// Delegation signer.
        DS = 43 => "DS",
        /// DNSSEC signature.
        RRSIG = 46 => "RRSIG",
        /// Next secure record.
        NSEC = 47 => "NSEC",
        /// DNSSEC key.
        DNSKEY = 48 => "DNSKEY",
        /// NSEC3.
        NSEC3 = 50 => "NSEC3",
        /// TLSA certificate association.
        TLSA = 52 => "TLSA",
        /// Service binding.
        SVCB = 64 => "SVCB",
        /// HTTPS service binding.
        HTTPS = 65 => "HTTPS",
        /// Zone transfer request.
        AXFR = 252 => "AXFR",
        /// Any record type.
        ANY = 255 => "ANY",
        /// Certification authority authorization.
        CAA = 257 => "CAA",
    }
}

named_enum! {
    /// DNS resource record classes.
    pub struct RrClass (u16), "dns-rr-class" {
        /// The Internet.
        IN = 1 => "IN",
        /// Chaosnet.
        CH = 3 => "CH",
        /// Hesiod.
        HS = 4 => "HS",
        /// None class (RFC 2136).
        NONE = 254 => "NONE",
        /// Any class.
        ANY = 255 => "ANY",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, Registry};

    #[test]
    fn stock_catalogue_resolves() {
        let reg = Registry::<RrType>::with_stock();
        assert_eq!(reg.get(RrType::AAAA).to_string(), "AAAA (28)");
        assert_eq!(reg.get(RrType::from_raw(65280)).name(), "unknown");
    }

    #[test]
    fn rr_type_and_class_spaces_are_distinct() {
        let types = Registry::<RrType>::with_stock();
        let classes = Registry::<RrClass>::with_stock();
        // Value 1 is A in one space and IN in the other.
        assert_eq!(types.get(RrType::from_raw(1)).name(), "A");
        assert_eq!(classes.get(RrClass::from_raw(1)).name(), "IN");
    }
}
