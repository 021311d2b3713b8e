// File: src/extensions/server_key_share.rs
//! ServerHello `key_share`: the single negotiated selection
//!
//! Body format: `group:u16 | key_len:u16 | point:[u8; key_len]`, where
//! `key_len` must equal the registry share size for `group`.

use bytes::{Buf, BufMut};
use rand::{CryptoRng, RngCore};

use super::{
    read_share, read_u16, EXTENSION_KEY_SHARE, SIZE_OF_EXTENSION_LEN, SIZE_OF_EXTENSION_TYPE,
    SIZE_OF_KEY_SHARE_LEN, SIZE_OF_NAMED_GROUP,
};
use crate::curve;
use crate::ecdh::KeyShareState;
use crate::error::{Error, Result};

/// Exact encoded size of the extension, or 0 when no curve has been
/// selected yet. Size 0 means the extension is omitted, not that sending
/// failed.
pub fn send_size(state: &KeyShareState) -> usize {
    match state.selected.curve() {
        Some(curve) => {
            SIZE_OF_EXTENSION_TYPE
                + SIZE_OF_EXTENSION_LEN
                + SIZE_OF_NAMED_GROUP
                + SIZE_OF_KEY_SHARE_LEN
                + curve.share_size
        }
        None => 0,
    }
}

/// A selection may only be sent while the offer set still holds a populated
/// entry for the same curve; the key material behind that entry is what
/// derivation will use once the peer answers. The two must stay in
/// lock-step.
pub fn send_check(state: &KeyShareState) -> Result<()> {
    let selected = state.selected.curve().ok_or(Error::NullCurve {
        context: "server key share send",
    })?;
    let offer = state.offered(selected)?;
    match offer.curve() {
        Some(offered) if offered.iana_id == selected.iana_id && offer.is_populated() => Ok(()),
        _ => Err(Error::MissingKeyShare {
            curve: selected.name,
        }),
    }
}

/// Encode the ServerHello `key_share` extension.
///
/// Generates the selection slot's own ephemeral key pair if one has not
/// been generated yet. Writes nothing on failure.
pub fn send<R, B>(state: &mut KeyShareState, rng: &mut R, out: &mut B) -> Result<()>
where
    R: CryptoRng + RngCore,
    B: BufMut,
{
    send_check(state)?;
    if state.selected.public_share().is_none() {
        state.selected.generate(rng)?;
    }
    let curve = state.selected.curve().ok_or(Error::NullCurve {
        context: "server key share send",
    })?;
    let share = state.selected.public_share().ok_or(Error::MissingKeyShare {
        curve: curve.name,
    })?;

    out.put_u16(EXTENSION_KEY_SHARE);
    out.put_u16((SIZE_OF_NAMED_GROUP + SIZE_OF_KEY_SHARE_LEN + curve.share_size) as u16);
    out.put_u16(curve.iana_id);
    out.put_u16(curve.share_size as u16);
    out.put_slice(share);
    Ok(())
}

/// Decode a ServerHello `key_share` body into the selection slot.
///
/// Consumes exactly one entry and leaves the cursor at its end. The offer
/// set is not consulted here; run
/// [`KeyShareState::validate_selection`] before trusting the stored
/// selection for derivation.
pub fn recv<B: Buf>(state: &mut KeyShareState, input: &mut B) -> Result<()> {
    let group = read_u16(input, "server key share entry")?;
    let declared = read_u16(input, "server key share entry")? as usize;
    let share = read_share(input, declared, "server key share entry")?;

    let curve = curve::by_iana_id(group)?;
    if declared != curve.share_size {
        return Err(Error::BadKeyShare {
            context: "declared length does not match the group",
        });
    }
    curve.validate_point(&share)?;

    state.selected.set_peer_share(curve, share);
    Ok(())
}
