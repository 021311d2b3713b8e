// File: src/curve/mod.rs
//! Supported named groups and their key-exchange capabilities
//!
//! A fixed, preference-ordered registry of the elliptic-curve groups this
//! implementation will negotiate. Each entry carries the group's wire
//! identifier, the exact encoded size of a public share, and the hooks into
//! the underlying curve arithmetic. The registry is process-wide and never
//! mutated; everything per-connection lives in [`crate::ecdh`].

use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::{CryptoRng, RngCore};

use crate::ecdh::SharedSecret;
use crate::error::{Error, Result};

/// TLS named-group identifiers (RFC 8446 section 4.2.7)
const IANA_SECP256R1: u16 = 23;
const IANA_SECP384R1: u16 = 24;

/// Number of supported curves; fixed at compile time
pub const SUPPORTED_CURVES_COUNT: usize = 2;

/// Arithmetic backend for a supported curve
#[derive(Clone, Copy, PartialEq, Eq)]
enum Backend {
    Secp256r1,
    Secp384r1,
}

/// A named group supported for TLS 1.3 key exchange
pub struct NamedCurve {
    /// Wire identifier for this group
    pub iana_id: u16,
    pub name: &'static str,
    /// Exact length of an uncompressed public share on the wire
    pub share_size: usize,
    /// Fixed length of the derived shared secret
    pub secret_size: usize,
    backend: Backend,
}

/// Supported curves in negotiation-preference order
pub static SUPPORTED_CURVES: [NamedCurve; SUPPORTED_CURVES_COUNT] = [
    NamedCurve {
        iana_id: IANA_SECP256R1,
        name: "secp256r1",
        share_size: 65,
        secret_size: 32,
        backend: Backend::Secp256r1,
    },
    NamedCurve {
        iana_id: IANA_SECP384R1,
        name: "secp384r1",
        share_size: 97,
        secret_size: 48,
        backend: Backend::Secp384r1,
    },
];

/// Number of registry entries
pub fn count() -> usize {
    SUPPORTED_CURVES_COUNT
}

/// Registry entry by position
pub fn at(index: usize) -> Result<&'static NamedCurve> {
    SUPPORTED_CURVES.get(index).ok_or(Error::BadKeyShare {
        context: "curve index out of range",
    })
}

/// Registry entry by wire identifier
pub fn by_iana_id(iana_id: u16) -> Result<&'static NamedCurve> {
    SUPPORTED_CURVES
        .iter()
        .find(|curve| curve.iana_id == iana_id)
        .ok_or(Error::BadKeyShare {
            context: "unsupported named group",
        })
}

/// Registry position of `curve`; offer-set slots share this indexing
pub(crate) fn slot_index(curve: &NamedCurve) -> Result<usize> {
    SUPPORTED_CURVES
        .iter()
        .position(|entry| entry.iana_id == curve.iana_id)
        .ok_or(Error::BadKeyShare {
            context: "curve not in the registry",
        })
}

/// Private half of an ephemeral key pair, bound to its arithmetic backend.
/// The scalar is zeroized on drop by the backend crate and is never exposed
/// as bytes.
pub(crate) enum SecretScalar {
    Secp256r1(p256::ecdh::EphemeralSecret),
    Secp384r1(p384::ecdh::EphemeralSecret),
}

impl NamedCurve {
    /// Generate a fresh ephemeral key pair for this curve.
    ///
    /// The public half is returned in uncompressed SEC1 encoding, exactly
    /// `share_size` bytes, and is written to the wire without re-encoding.
    pub(crate) fn generate<R: CryptoRng + RngCore>(
        &self,
        rng: &mut R,
    ) -> Result<(SecretScalar, Vec<u8>)> {
        let (secret, public) = match self.backend {
            Backend::Secp256r1 => {
                let secret = p256::ecdh::EphemeralSecret::random(rng);
                let public = secret.public_key().to_encoded_point(false).as_bytes().to_vec();
                (SecretScalar::Secp256r1(secret), public)
            }
            Backend::Secp384r1 => {
                let secret = p384::ecdh::EphemeralSecret::random(rng);
                let public = secret.public_key().to_encoded_point(false).as_bytes().to_vec();
                (SecretScalar::Secp384r1(secret), public)
            }
        };
        if public.len() != self.share_size {
            return Err(Error::KeyGeneration {
                curve: self.name,
                details: "unexpected public share length",
            });
        }
        Ok((secret, public))
    }

    /// Check that `share` decodes to a valid, non-identity point on this
    /// curve. Length is the codec's concern; this is the point itself.
    pub(crate) fn validate_point(&self, share: &[u8]) -> Result<()> {
        let valid = match self.backend {
            Backend::Secp256r1 => p256::PublicKey::from_sec1_bytes(share).is_ok(),
            Backend::Secp384r1 => p384::PublicKey::from_sec1_bytes(share).is_ok(),
        };
        if valid {
            Ok(())
        } else {
            Err(Error::BadKeyShare {
                context: "invalid curve point",
            })
        }
    }

    /// Compute the raw ECDH shared secret between a local scalar and a
    /// peer's public share. The output length is `secret_size`, a property
    /// of the curve and never of the wire data.
    pub(crate) fn shared_secret(
        &self,
        secret: &SecretScalar,
        peer_public: &[u8],
    ) -> Result<SharedSecret> {
        let shared = match (self.backend, secret) {
            (Backend::Secp256r1, SecretScalar::Secp256r1(scalar)) => {
                let peer = p256::PublicKey::from_sec1_bytes(peer_public).map_err(|_| {
                    Error::BadKeyShare {
                        context: "invalid peer public share",
                    }
                })?;
                SharedSecret::new(scalar.diffie_hellman(&peer).raw_secret_bytes().as_slice())
            }
            (Backend::Secp384r1, SecretScalar::Secp384r1(scalar)) => {
                let peer = p384::PublicKey::from_sec1_bytes(peer_public).map_err(|_| {
                    Error::BadKeyShare {
                        context: "invalid peer public share",
                    }
                })?;
                SharedSecret::new(scalar.diffie_hellman(&peer).raw_secret_bytes().as_slice())
            }
            _ => {
                return Err(Error::NullCurve {
                    context: "secret scalar bound to a different curve",
                })
            }
        };
        debug_assert_eq!(shared.len(), self.secret_size);
        Ok(shared)
    }
}
