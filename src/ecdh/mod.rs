// File: src/ecdh/mod.rs
//! Per-connection ephemeral ECDHE state
//!
//! One key slot per supported curve for the multi-entry client offer, plus
//! a single slot for the negotiated selection. A slot owns whichever halves
//! of a key pair exist on this side: both halves when generated locally,
//! the public share alone when it arrived from the peer. Private material
//! is zeroized whenever a slot is released or dropped.
//!
//! State for one connection is not synchronized; the handshake driver owns
//! it exclusively. Different connections share nothing but the read-only
//! curve registry.

use core::fmt;

use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::curve::{self, NamedCurve, SecretScalar, SUPPORTED_CURVES_COUNT};
use crate::error::{Error, Result};

/// Raw ECDH output for one negotiated curve.
///
/// Fixed length per curve (32 bytes for secp256r1, 48 for secp384r1);
/// compared in constant time and zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(Vec<u8>);

impl SharedSecret {
    pub(crate) fn new(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        bool::from(self.0.ct_eq(&other.0))
    }
}

impl Eq for SharedSecret {}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSecret({} bytes)", self.0.len())
    }
}

/// One ephemeral key slot: a curve binding plus whichever key halves exist.
///
/// A locally generated slot holds the private scalar and the public share;
/// a slot filled from the wire holds only the peer's public share.
#[derive(Default)]
pub struct EphemeralKeyPair {
    curve: Option<&'static NamedCurve>,
    secret: Option<SecretScalar>,
    public: Option<Vec<u8>>,
}

impl EphemeralKeyPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn curve(&self) -> Option<&'static NamedCurve> {
        self.curve
    }

    /// Bind this slot to `curve` without generating material
    pub fn set_curve(&mut self, curve: &'static NamedCurve) {
        self.curve = Some(curve);
    }

    /// Generate a fresh key pair for the bound curve
    pub fn generate<R: CryptoRng + RngCore>(&mut self, rng: &mut R) -> Result<()> {
        let curve = self.curve.ok_or(Error::NullCurve {
            context: "ephemeral key generation",
        })?;
        let (secret, public) = curve.generate(rng)?;
        self.secret = Some(secret);
        self.public = Some(public);
        Ok(())
    }

    /// Curve bound and public share present
    pub fn is_populated(&self) -> bool {
        self.curve.is_some() && self.public.is_some()
    }

    /// Private half available for secret derivation
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Public share in uncompressed SEC1 encoding, if present
    pub fn public_share(&self) -> Option<&[u8]> {
        self.public.as_deref()
    }

    /// Install a peer's already-validated public share
    pub(crate) fn set_peer_share(&mut self, curve: &'static NamedCurve, share: Vec<u8>) {
        self.curve = Some(curve);
        self.secret = None;
        self.public = Some(share);
    }

    /// Drop all key material, zeroizing the private half. Idempotent.
    pub fn release(&mut self) {
        self.curve = None;
        self.secret = None;
        self.public = None;
    }
}

/// Per-connection key-share state: the multi-curve offer set and the single
/// negotiated selection.
///
/// On a client the offer set holds this side's generated key pairs and the
/// selection holds the server's share; on a server the offer set holds the
/// client's received shares and the selection holds this side's key pair.
/// A server never generates entries in the offer set.
#[derive(Default)]
pub struct KeyShareState {
    pub(crate) offers: [EphemeralKeyPair; SUPPORTED_CURVES_COUNT],
    pub(crate) selected: EphemeralKeyPair,
}

impl KeyShareState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer-set entry for `curve`
    pub fn offered(&self, curve: &NamedCurve) -> Result<&EphemeralKeyPair> {
        Ok(&self.offers[curve::slot_index(curve)?])
    }

    /// Mutable offer-set entry for `curve`
    pub fn offered_mut(&mut self, curve: &NamedCurve) -> Result<&mut EphemeralKeyPair> {
        let index = curve::slot_index(curve)?;
        Ok(&mut self.offers[index])
    }

    /// The negotiated selection slot
    pub fn selection(&self) -> &EphemeralKeyPair {
        &self.selected
    }

    pub fn selection_mut(&mut self) -> &mut EphemeralKeyPair {
        &mut self.selected
    }

    /// Check that the selection names a curve this side actually offered.
    ///
    /// A peer must not be able to select a curve the offer set never
    /// generated, and a negotiated curve must not change between messages.
    /// Run this before trusting a received selection for derivation.
    pub fn validate_selection(&self) -> Result<()> {
        let selected = self.selected.curve().ok_or(Error::BadKeyShare {
            context: "no curve selected",
        })?;
        let offer = self.offered(selected)?;
        match offer.curve() {
            Some(offered) if offered.iana_id == selected.iana_id && offer.is_populated() => Ok(()),
            _ => Err(Error::BadKeyShare {
                context: "selected curve was never offered",
            }),
        }
    }

    /// Drop all ephemeral material for this connection. Idempotent.
    pub fn release(&mut self) {
        for offer in &mut self.offers {
            offer.release();
        }
        self.selected.release();
    }
}

/// Derive the ECDH shared secret from a local private key and a peer's
/// public share.
///
/// Both slots must be bound to the same negotiated curve and carry the
/// required halves; anything else is a contract violation surfaced as
/// [`Error::NullCurve`], not a negotiation failure. On the receiving side
/// [`KeyShareState::validate_selection`] is expected to have run first.
pub fn compute_shared_secret(
    local: &EphemeralKeyPair,
    peer: &EphemeralKeyPair,
) -> Result<SharedSecret> {
    let local_curve = local.curve().ok_or(Error::NullCurve {
        context: "local key pair",
    })?;
    let peer_curve = peer.curve().ok_or(Error::NullCurve {
        context: "peer key pair",
    })?;
    if local_curve.iana_id != peer_curve.iana_id {
        return Err(Error::NullCurve {
            context: "key pairs bound to different curves",
        });
    }
    let secret = local.secret.as_ref().ok_or(Error::NullCurve {
        context: "local private key",
    })?;
    let public = peer.public.as_deref().ok_or(Error::NullCurve {
        context: "peer public share",
    })?;
    local_curve.shared_secret(secret, public)
}
