//! Error types.

use thiserror::Error;

/// A raw value violated its domain's structural invariant.
///
/// Only domains with bit-structured code spaces (PPP DLL protocol parity,
/// 802.11 reserved bits) ever produce this; plain catalogues accept any
/// value of the right width.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {domain} value {value:#x}: {reason}")]
pub struct InvalidValue {
    /// Label of the domain that rejected the value.
    pub domain: &'static str,
    /// The offending raw value, zero-extended.
    pub value: u64,
    /// Which invariant was violated.
    pub reason: &'static str,
}

/// Fewer bytes remained than the header being decoded requires.
///
/// Decoders return this instead of reading past the buffer; the dispatch
/// loop turns it into a terminal state while keeping the already-decoded
/// layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("truncated {protocol} header: need {needed} bytes, {available} available")]
pub struct Truncated {
    /// Short name of the protocol whose header did not fit.
    pub protocol: &'static str,
    /// Minimum byte count the header requires.
    pub needed: usize,
    /// Bytes actually remaining.
    pub available: usize,
}
