//! TLS 1.3 `key_share` negotiation
//!
//! This crate implements the key-share half of a TLS 1.3 handshake: a
//! client offers an ephemeral ECDHE share for every supported named group,
//! a server answers with a single selection, and both sides derive the
//! same shared secret from the exchange.
//!
//! The curve arithmetic itself is delegated to the RustCrypto `p256` and
//! `p384` crates; record framing, the handshake state machine, and the
//! surrounding extension plumbing are the caller's concern. Encoders and
//! decoders work against [`bytes`] cursors supplied by the caller and
//! never perform I/O.

pub mod curve;
pub mod ecdh;
pub mod error;
pub mod extensions;

// Re-exports
pub use curve::{NamedCurve, SUPPORTED_CURVES, SUPPORTED_CURVES_COUNT};
pub use ecdh::{compute_shared_secret, EphemeralKeyPair, KeyShareState, SharedSecret};
pub use error::{Error, Result};
