//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Finalization padding and length encoding.
//!
//! Merkle-Damgard tails (FIPS 180-4 / ISO 10118-3 style, 64-bit or 256-bit
//! length field) and the SP 800-185 `left_encode` / `right_encode` /
//! `encode_string` / `bytepad` functions used by the Keccak derived
//! functions. Each primitive declares its scheme; the runtime applies it
//! generically.

/// Endianness and width of the trailing length field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthField {
    /// 64-bit little-endian bit count (MD5, RIPEMD).
    Le64,
    /// 64-bit big-endian bit count (SHA-2).
    Be64,
    /// 256-bit big-endian bit count (Whirlpool).
    Be256,
}

impl LengthField {
    fn len(self) -> usize {
        match self {
            LengthField::Le64 | LengthField::Be64 => 8,
            LengthField::Be256 => 32,
        }
    }
}

/// Build the Merkle-Damgard tail for a message of `total_bytes` bytes: one
/// `0x80` byte, zero fill to `block_len - field width`, then the bit length.
///
/// Feeding the returned tail through the normal absorption path compresses
/// the final block (or two, when the length field does not fit).
pub fn merkle_damgard_tail(total_bytes: u64, block_len: usize, field: LengthField) -> Vec<u8> {
    let field_len = field.len();
    let target = block_len - field_len;
    let used = (total_bytes % block_len as u64) as usize;
    let pad_len = if used < target {
        target - used
    } else {
        block_len + target - used
    };

    let mut tail = vec![0u8; pad_len + field_len];
    tail[0] = 0x80;

    let bits = (total_bytes as u128) << 3;
    match field {
        LengthField::Le64 => {
            tail[pad_len..].copy_from_slice(&(bits as u64).to_le_bytes());
        }
        LengthField::Be64 => {
            tail[pad_len..].copy_from_slice(&(bits as u64).to_be_bytes());
        }
        LengthField::Be256 => {
            // upper 16 of the 32 bytes stay zero for any practical size
            tail[pad_len + 16..].copy_from_slice(&bits.to_be_bytes());
        }
    }
    tail
}

/// SP 800-185 `left_encode`: minimal big-endian representation of `x`,
/// preceded by its byte count.
pub fn left_encode(x: u64) -> Vec<u8> {
    let bytes = x.to_be_bytes();
    let skip = (x.leading_zeros() / 8).min(7) as usize;
    let mut out = Vec::with_capacity(9 - skip);
    out.push((8 - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
    out
}

/// SP 800-185 `right_encode`: minimal big-endian representation of `x`,
/// followed by its byte count.
pub fn right_encode(x: u64) -> Vec<u8> {
    let bytes = x.to_be_bytes();
    let skip = (x.leading_zeros() / 8).min(7) as usize;
    let mut out = Vec::with_capacity(9 - skip);
    out.extend_from_slice(&bytes[skip..]);
    out.push((8 - skip) as u8);
    out
}

/// SP 800-185 `encode_string`: the bit length of `s`, left-encoded, followed
/// by `s` itself.
pub fn encode_string(s: &[u8]) -> Vec<u8> {
    let mut out = left_encode((s.len() as u64) << 3);
    out.extend_from_slice(s);
    out
}

/// SP 800-185 `bytepad`: prefix `data` with `left_encode(w)` and zero-pad to
/// a multiple of `w` bytes.
pub fn bytepad(data: &[u8], w: usize) -> Vec<u8> {
    let mut out = left_encode(w as u64);
    out.extend_from_slice(data);
    let rem = out.len() % w;
    if rem != 0 {
        out.resize(out.len() + (w - rem), 0);
    }
    out
}
