//! Capture link-layer types, as reported by pcap-style capture sources.
//!
//! The capture layer itself is outside this crate; it hands decode callers a
//! raw frame plus one of these values to seed the dispatch chain.

named_enum! {
    /// Link-layer header types (the pcap `DLT_`/`LINKTYPE_` space).
    pub struct LinkType (u16), "link-type" {
        /// BSD loopback encapsulation.
        NULL = 0 => "BSD Loopback",
        /// Ethernet (10Mb and up).
        ETHERNET = 1 => "Ethernet",
        /// Amateur radio AX.25.
        AX25 = 3 => "AX.25",
        /// IEEE 802.5 token ring.
        IEEE802_5 = 6 => "IEEE 802.5 Token Ring",
        /// ARCNET.
        ARCNET = 7 => "ARCNET",
        /// SLIP.
        SLIP = 8 => "SLIP",
        /// PPP.
        PPP = 9 => "PPP",
        /// FDDI.
        FDDI = 10 => "FDDI",
        /// PPP in HDLC-like framing.
        PPP_HDLC = 50 => "PPP HDLC",
        /// PPP over Ethernet.
        PPP_ETHER = 51 => "PPPoE",
        /// Raw IP, no link header.
        RAW = 101 => "Raw IP",
        /// IEEE 802.11 wireless.
        IEEE802_11 = 105 => "IEEE 802.11",
        /// OpenBSD loopback.
        LOOP = 108 => "OpenBSD Loopback",
        /// Linux cooked capture.
        LINUX_SLL = 113 => "Linux Cooked Capture",
        /// Apple LocalTalk.
        LTALK = 114 => "LocalTalk",
        /// IEEE 802.11 with radiotap header.
        IEEE802_11_RADIOTAP = 127 => "IEEE 802.11 Radiotap",
        /// Linux cooked capture v2.
        LINUX_SLL2 = 276 => "Linux Cooked Capture v2",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Domain, Registry};

    #[test]
    fn stock_catalogue_resolves() {
        let reg = Registry::<LinkType>::with_stock();
        assert_eq!(reg.get(LinkType::ETHERNET).to_string(), "Ethernet (1)");
        assert_eq!(reg.get(LinkType::from_raw(147)).name(), "unknown");
    }
}
