//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Whirlpool per ISO/IEC 10118-3 (the final 2003 revision): a 512-bit hash
//! built from a dedicated 10-round AES-like block cipher W over an 8x8 byte
//! matrix, chained with the Miyaguchi-Preneel combiner
//! `H' = W_H(m) ^ H ^ m`.
//!
//! The S-box is expanded once from the specification's E / E^-1 / R
//! mini-boxes and shared as an immutable table; the diffusion layer is the
//! circulant MDS row (1, 1, 4, 1, 8, 5, 2, 9) over GF(2^8) with the
//! polynomial 0x11D. The length field is 256 bits, big-endian.

use std::sync::OnceLock;

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::metadata::{
    hex_vector, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
};
use crate::ops;
use crate::padding::{merkle_damgard_tail, LengthField};
use crate::stream::{BlockBuffer, DigestCore, DigestStream};

const ROUNDS: usize = 10;
const MDS_ROW: [u8; 8] = [0x01, 0x01, 0x04, 0x01, 0x08, 0x05, 0x02, 0x09];

/// 4-bit exponential mini-box E; E^-1 and the pseudo-random R derive the
/// full 8-bit substitution.
const MINI_E: [u8; 16] = [
    0x1, 0xB, 0x9, 0xC, 0xD, 0x6, 0xF, 0x3, 0xE, 0x8, 0x7, 0x4, 0xA, 0x2, 0x5, 0x0,
];
const MINI_R: [u8; 16] = [
    0x7, 0xC, 0xB, 0xD, 0xE, 0x4, 0x9, 0xF, 0x6, 0x3, 0x8, 0xA, 0x2, 0x5, 0x1, 0x0,
];

static SBOX: OnceLock<[u8; 256]> = OnceLock::new();

fn sbox() -> &'static [u8; 256] {
    SBOX.get_or_init(|| {
        let mut inv_e = [0u8; 16];
        for (i, &e) in MINI_E.iter().enumerate() {
            inv_e[e as usize] = i as u8;
        }
        let mut table = [0u8; 256];
        for (u, entry) in table.iter_mut().enumerate() {
            let a = MINI_E[u >> 4];
            let b = inv_e[u & 0xF];
            let r = MINI_R[(a ^ b) as usize];
            *entry = (MINI_E[(a ^ r) as usize] << 4) | inv_e[(b ^ r) as usize];
        }
        table
    })
}

type Matrix = [[u8; 8]; 8];

fn load_matrix(block: &[u8]) -> Matrix {
    let mut m = [[0u8; 8]; 8];
    for (i, row) in m.iter_mut().enumerate() {
        row.copy_from_slice(&block[i * 8..i * 8 + 8]);
    }
    m
}

fn sub_bytes(m: &mut Matrix) {
    let s = sbox();
    for row in m.iter_mut() {
        for byte in row.iter_mut() {
            *byte = s[*byte as usize];
        }
    }
}

/// Column j rotated downwards by j positions.
fn shift_columns(m: &Matrix) -> Matrix {
    let mut out = [[0u8; 8]; 8];
    for i in 0..8 {
        for j in 0..8 {
            out[(i + j) % 8][j] = m[i][j];
        }
    }
    out
}

/// Each row multiplied by the circulant MDS matrix.
fn mix_rows(m: &Matrix) -> Matrix {
    let mut out = [[0u8; 8]; 8];
    for i in 0..8 {
        for j in 0..8 {
            let mut acc = 0u8;
            for k in 0..8 {
                acc ^= ops::gf256_mul_poly(m[i][k], MDS_ROW[(j + 8 - k) % 8], 0x11D);
            }
            out[i][j] = acc;
        }
    }
    out
}

fn add_key(m: &mut Matrix, key: &Matrix) {
    for (row, key_row) in m.iter_mut().zip(key.iter()) {
        for (byte, key_byte) in row.iter_mut().zip(key_row.iter()) {
            *byte ^= key_byte;
        }
    }
}

/// One application of the round structure: gamma, pi, theta, key addition.
fn round(m: &mut Matrix, key: &Matrix) {
    sub_bytes(m);
    *m = shift_columns(m);
    *m = mix_rows(m);
    add_key(m, key);
}

/// The dedicated cipher W keyed by the chaining value, applied to one block.
fn permute(chaining: &Matrix, block: &Matrix) -> Matrix {
    let s = sbox();

    let mut key = *chaining;
    let mut state = *block;
    add_key(&mut state, &key);

    for r in 1..=ROUNDS {
        // round constant: first row from the S-box, remaining rows zero
        let mut rc = [[0u8; 8]; 8];
        for (j, byte) in rc[0].iter_mut().enumerate() {
            *byte = s[8 * (r - 1) + j];
        }
        round(&mut key, &rc);
        round(&mut state, &key);
    }
    state
}

fn compress(h: &mut Matrix, block: &[u8]) {
    let m = load_matrix(block);
    let w = permute(h, &m);
    for i in 0..8 {
        for j in 0..8 {
            h[i][j] ^= w[i][j] ^ m[i][j];
        }
    }
}

#[derive(Clone)]
struct WhirlpoolCore {
    h: Matrix,
    buf: BlockBuffer,
}

impl WhirlpoolCore {
    fn new() -> Self {
        Self {
            h: [[0u8; 8]; 8],
            buf: BlockBuffer::new(64),
        }
    }
}

impl DigestCore for WhirlpoolCore {
    fn absorb(&mut self, input: &[u8]) {
        let Self { h, buf } = self;
        buf.feed(input, |block| compress(h, block));
    }

    fn digest(&self) -> Vec<u8> {
        let mut state = self.clone();
        let tail = merkle_damgard_tail(state.buf.total_bytes(), 64, LengthField::Be256);
        state.absorb(&tail);
        let mut out = Vec::with_capacity(64);
        for row in &state.h {
            out.extend_from_slice(row);
        }
        out
    }

    fn reset(&mut self) {
        self.h = [[0u8; 8]; 8];
        self.buf.reset();
    }
}

/// Whirlpool algorithm registration.
pub struct Whirlpool {
    descriptor: Descriptor,
}

impl Whirlpool {
    pub fn new() -> Self {
        let uri = "https://web.archive.org/web/20171129084214/http://www.larc.usp.br/~pbarreto/WhirlpoolPage.html";
        Self {
            descriptor: Descriptor {
                name: "Whirlpool",
                internal_name: "whirlpool",
                category: Category::Hash,
                sub_category: "miyaguchi-preneel",
                inventor: "Vincent Rijmen, Paulo Barreto",
                year: 2000,
                country: Country::Multi,
                description: "512-bit hash over a dedicated AES-like cipher with an \
                              8x8 byte state, standardized in ISO/IEC 10118-3.",
                security_status: SecurityStatus::Secure,
                complexity: Complexity::Advanced,
                documentation: vec![LinkItem::new("The Whirlpool hash function", uri)],
                references: vec![LinkItem::new(
                    "ISO/IEC 10118-3 dedicated hash functions",
                    "https://www.iso.org/standard/67116.html",
                )],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(64)],
                output_sizes: vec![KeySize::fixed(64)],
                vectors: vec![
                    TestVector::new(
                        Vec::new(),
                        hex_vector(
                            "19fa61d75522a4669b44e39c1d2e1726c530232130d407f89afee0964997f7a7\
                             3e83be698b288febcf88e3e03c4f0757ea8964e59b63d93708b138cc42a66eb3",
                        ),
                        "empty message",
                        uri,
                    ),
                    TestVector::new(
                        b"a".to_vec(),
                        hex_vector(
                            "8aca2602792aec6f11a67206531fb7d7f0dff59413145e6973c45001d0087b42\
                             d11bc645413aeff63a42391a39145a591a92200d560195e53b478584fdae231a",
                        ),
                        "single byte a",
                        uri,
                    ),
                    TestVector::new(
                        b"abc".to_vec(),
                        hex_vector(
                            "4e2448a4c6f486bb16b6562c73b4020bf3043e3a731bce721ae1b303d97e6d4c\
                             7181eebdb6c57e277d0e34957114cbd6c797fc9d95d8b582d225292076d4eef5",
                        ),
                        "abc",
                        uri,
                    ),
                ],
            },
        }
    }
}

impl Default for Whirlpool {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Whirlpool {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(WhirlpoolCore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    fn digest_of(input: &[u8]) -> String {
        let mut core = WhirlpoolCore::new();
        core.absorb(input);
        bytes_to_hex(&core.digest())
    }

    #[test]
    fn test_sbox_spot_values() {
        let s = sbox();
        // first and last entries of the published table
        assert_eq!(s[0x00], 0x18);
        assert_eq!(s[0x01], 0x23);
        assert_eq!(s[0xFF], 0x86);
        // a substitution must be a permutation
        let mut seen = [false; 256];
        for &v in s.iter() {
            assert!(!seen[v as usize]);
            seen[v as usize] = true;
        }
    }

    #[test]
    fn test_declared_vectors() {
        for v in Whirlpool::new().descriptor.vectors.iter() {
            assert_eq!(bytes_to_hex(&v.expected), digest_of(&v.input), "{}", v.text);
        }
    }

    #[test]
    fn test_chunked_feed_matches_whole() {
        let input: Vec<u8> = (0u8..=255).cycle().take(300).collect();
        let whole = digest_of(&input);
        let mut core = WhirlpoolCore::new();
        for chunk in input.chunks(11) {
            core.absorb(chunk);
        }
        assert_eq!(whole, bytes_to_hex(&core.digest()));
    }

    #[test]
    fn test_two_block_message() {
        // 64 bytes fills exactly one block and forces a full padding block
        let input = vec![0x42u8; 64];
        let digest = digest_of(&input);
        assert_eq!(digest.len(), 128);
        assert_ne!(digest, digest_of(&input[..63]));
    }
}
