// File: src/extensions/client_key_share.rs
//! ClientHello `key_share`: one entry per supported curve
//!
//! Body format: `total:u16 | entries...`, each entry
//! `group:u16 | key_len:u16 | point:[u8; key_len]`. The client offers every
//! curve in the registry; a receiver skips entries for groups it does not
//! support and stores the rest as peer shares.

use bytes::{Buf, BufMut};
use rand::{CryptoRng, RngCore};

use super::{
    read_u16, EXTENSION_KEY_SHARE, SIZE_OF_EXTENSION_LEN, SIZE_OF_EXTENSION_TYPE,
    SIZE_OF_KEY_SHARE_LEN, SIZE_OF_NAMED_GROUP, SIZE_OF_SHARES_LEN,
};
use crate::curve::{self, SUPPORTED_CURVES};
use crate::ecdh::KeyShareState;
use crate::error::{Error, Result};

/// Exact encoded size of the extension for the current offer set.
/// Unpopulated entries contribute nothing.
pub fn size(state: &KeyShareState) -> usize {
    let mut entries = 0;
    for offer in &state.offers {
        if let Some(curve) = offer.curve() {
            if offer.is_populated() {
                entries += SIZE_OF_NAMED_GROUP + SIZE_OF_KEY_SHARE_LEN + curve.share_size;
            }
        }
    }
    SIZE_OF_EXTENSION_TYPE + SIZE_OF_EXTENSION_LEN + SIZE_OF_SHARES_LEN + entries
}

/// Encode the ClientHello `key_share` extension.
///
/// Any registry curve without a generated key gets one first; after this
/// call the offer set is fully populated. Entries are written in registry
/// order.
pub fn send<R, B>(state: &mut KeyShareState, rng: &mut R, out: &mut B) -> Result<()>
where
    R: CryptoRng + RngCore,
    B: BufMut,
{
    for (curve, offer) in SUPPORTED_CURVES.iter().zip(state.offers.iter_mut()) {
        if !offer.has_secret() {
            offer.set_curve(curve);
            offer.generate(rng)?;
        }
    }

    let shares_len: usize = SUPPORTED_CURVES
        .iter()
        .map(|curve| SIZE_OF_NAMED_GROUP + SIZE_OF_KEY_SHARE_LEN + curve.share_size)
        .sum();

    out.put_u16(EXTENSION_KEY_SHARE);
    out.put_u16((SIZE_OF_SHARES_LEN + shares_len) as u16);
    out.put_u16(shares_len as u16);
    for (curve, offer) in SUPPORTED_CURVES.iter().zip(state.offers.iter()) {
        let share = offer.public_share().ok_or(Error::MissingKeyShare {
            curve: curve.name,
        })?;
        out.put_u16(curve.iana_id);
        out.put_u16(curve.share_size as u16);
        out.put_slice(share);
    }
    Ok(())
}

/// Decode a ClientHello `key_share` body into the offer set.
///
/// Entries whose group is in the registry are validated and stored as peer
/// shares; entries for unknown groups are skipped with the cursor kept
/// consistent. The cursor ends exactly after the declared total.
pub fn recv<B: Buf>(state: &mut KeyShareState, input: &mut B) -> Result<()> {
    let total = read_u16(input, "client key share list")? as usize;
    if input.remaining() < total {
        return Err(Error::TruncatedInput {
            context: "client key share list",
            needed: total,
            available: input.remaining(),
        });
    }

    let mut consumed = 0;
    while consumed < total {
        if total - consumed < SIZE_OF_NAMED_GROUP + SIZE_OF_KEY_SHARE_LEN {
            return Err(Error::BadKeyShare {
                context: "malformed key share list",
            });
        }
        let group = input.get_u16();
        let declared = input.get_u16() as usize;
        consumed += SIZE_OF_NAMED_GROUP + SIZE_OF_KEY_SHARE_LEN;
        if total - consumed < declared {
            return Err(Error::BadKeyShare {
                context: "key share entry overruns the list",
            });
        }
        consumed += declared;

        match curve::by_iana_id(group) {
            Ok(curve) => {
                if declared != curve.share_size {
                    return Err(Error::BadKeyShare {
                        context: "declared length does not match the group",
                    });
                }
                let mut share = vec![0u8; declared];
                input.copy_to_slice(&mut share);
                curve.validate_point(&share)?;
                let index = curve::slot_index(curve)?;
                state.offers[index].set_peer_share(curve, share);
            }
            Err(_) => input.advance(declared),
        }
    }
    Ok(())
}
