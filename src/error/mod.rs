//! Error handling for key-share negotiation

use thiserror::Error;

/// Error type for key-share operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The curve capability failed to produce a usable key pair
    #[error("key generation failed for {curve}: {details}")]
    KeyGeneration {
        curve: &'static str,
        details: &'static str,
    },

    /// An operation that requires a negotiated curve ran before one was set
    #[error("no negotiated curve in {context}")]
    NullCurve { context: &'static str },

    /// A selection was announced without the matching offer-set key material
    #[error("no key share available for {curve}")]
    MissingKeyShare { curve: &'static str },

    /// Fewer bytes remained than the encoding declared
    #[error("truncated {context}: needed {needed} bytes, had {available}")]
    TruncatedInput {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    /// Unsupported group, wrong declared length, invalid point, or a
    /// selection that was never offered. Callers abort the handshake; they
    /// do not need to tell these apart.
    #[error("bad key share: {context}")]
    BadKeyShare { context: &'static str },
}

/// Result type for key-share operations
pub type Result<T> = core::result::Result<T, Error>;
