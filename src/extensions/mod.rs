// File: src/extensions/mod.rs
//! Wire codecs for the TLS 1.3 `key_share` extension
//!
//! Two shapes share one entry format: the multi-entry client offer and the
//! single-entry server selection. Senders emit the full extension (type,
//! length, body); receivers are handed the body with the outer framing
//! already consumed by the extension dispatcher. All integers are
//! big-endian. Decoders either consume a full, valid entry or leave the
//! target slot untouched.

use bytes::Buf;

use crate::error::{Error, Result};

pub mod client_key_share;
pub mod server_key_share;

/// `key_share` extension type (RFC 8446 section 4.2)
pub const EXTENSION_KEY_SHARE: u16 = 51;

const SIZE_OF_EXTENSION_TYPE: usize = 2;
const SIZE_OF_EXTENSION_LEN: usize = 2;
const SIZE_OF_SHARES_LEN: usize = 2;
const SIZE_OF_NAMED_GROUP: usize = 2;
const SIZE_OF_KEY_SHARE_LEN: usize = 2;

fn read_u16<B: Buf>(input: &mut B, context: &'static str) -> Result<u16> {
    if input.remaining() < 2 {
        return Err(Error::TruncatedInput {
            context,
            needed: 2,
            available: input.remaining(),
        });
    }
    Ok(input.get_u16())
}

fn read_share<B: Buf>(input: &mut B, len: usize, context: &'static str) -> Result<Vec<u8>> {
    if input.remaining() < len {
        return Err(Error::TruncatedInput {
            context,
            needed: len,
            available: input.remaining(),
        });
    }
    let mut share = vec![0u8; len];
    input.copy_to_slice(&mut share);
    Ok(share)
}
