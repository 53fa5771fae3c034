//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! The RIPEMD family per ISO/IEC 10118-3: little-endian Merkle-Damgard over
//! 64-byte blocks with two parallel computation lines.
//!
//! RIPEMD-128 and RIPEMD-160 cross-merge the two lines into the chaining
//! state at the end of each block; RIPEMD-256 and RIPEMD-320 keep the lines
//! separate (doubling the state) and instead exchange one register between
//! the lines at every round boundary. Round functions, message schedules,
//! rotation amounts, and constants are from the cited specification.

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::metadata::{
    hex_vector, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
    Vulnerability,
};
use crate::ops;
use crate::padding::{merkle_damgard_tail, LengthField};
use crate::stream::{BlockBuffer, DigestCore, DigestStream};

const DOC_URI: &str = "https://homes.esat.kuleuven.be/~bosselae/ripemd160.html";

// Message word order, left line, rounds 1..5 (RIPEMD-128/256 use the first
// four rounds only).
#[rustfmt::skip]
const R_LEFT: [[usize; 16]; 5] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [7, 4, 13, 1, 10, 6, 15, 3, 12, 0, 9, 5, 2, 14, 11, 8],
    [3, 10, 14, 4, 9, 15, 8, 1, 2, 7, 0, 6, 13, 11, 5, 12],
    [1, 9, 11, 10, 0, 8, 12, 4, 13, 3, 7, 15, 14, 5, 6, 2],
    [4, 0, 5, 9, 7, 12, 2, 10, 14, 1, 3, 8, 11, 6, 15, 13],
];

#[rustfmt::skip]
const R_RIGHT: [[usize; 16]; 5] = [
    [5, 14, 7, 0, 9, 2, 11, 4, 13, 6, 15, 8, 1, 10, 3, 12],
    [6, 11, 3, 7, 0, 13, 5, 10, 14, 15, 8, 12, 4, 9, 1, 2],
    [15, 5, 1, 3, 7, 14, 6, 9, 11, 8, 12, 2, 10, 0, 4, 13],
    [8, 6, 4, 1, 3, 11, 15, 0, 5, 12, 2, 13, 9, 7, 10, 14],
    [12, 15, 10, 4, 1, 5, 8, 7, 6, 2, 13, 14, 0, 3, 9, 11],
];

#[rustfmt::skip]
const S_LEFT: [[u32; 16]; 5] = [
    [11, 14, 15, 12, 5, 8, 7, 9, 11, 13, 14, 15, 6, 7, 9, 8],
    [7, 6, 8, 13, 11, 9, 7, 15, 7, 12, 15, 9, 11, 7, 13, 12],
    [11, 13, 6, 7, 14, 9, 13, 15, 14, 8, 13, 6, 5, 12, 7, 5],
    [11, 12, 14, 15, 14, 15, 9, 8, 9, 14, 5, 6, 8, 6, 5, 12],
    [9, 15, 5, 11, 6, 8, 13, 12, 5, 12, 13, 14, 11, 8, 5, 6],
];

#[rustfmt::skip]
const S_RIGHT: [[u32; 16]; 5] = [
    [8, 9, 9, 11, 13, 15, 15, 5, 7, 7, 8, 11, 14, 14, 12, 6],
    [9, 13, 15, 7, 12, 8, 9, 11, 7, 7, 12, 7, 6, 15, 13, 11],
    [9, 7, 15, 11, 8, 6, 6, 14, 12, 13, 5, 14, 13, 13, 7, 5],
    [15, 5, 8, 11, 14, 14, 6, 14, 6, 9, 12, 9, 12, 5, 15, 8],
    [8, 5, 12, 9, 12, 5, 14, 6, 8, 13, 6, 5, 15, 13, 11, 11],
];

const K_LEFT: [u32; 5] = [0x0000_0000, 0x5A82_7999, 0x6ED9_EBA1, 0x8F1B_BCDC, 0xA953_FD4E];
const K_RIGHT_FOUR: [u32; 4] = [0x50A2_8BE6, 0x5C4D_D124, 0x6D70_3EF3, 0x0000_0000];
const K_RIGHT_FIVE: [u32; 5] = [
    0x50A2_8BE6,
    0x5C4D_D124,
    0x6D70_3EF3,
    0x7A6D_76E9,
    0x0000_0000,
];

#[inline]
fn f(round: usize, x: u32, y: u32, z: u32) -> u32 {
    match round {
        0 => x ^ y ^ z,
        1 => (x & y) | (!x & z),
        2 => (x | !y) ^ z,
        3 => (x & z) | (y & !z),
        _ => x ^ (y | !z),
    }
}

fn load_words(block: &[u8]) -> [u32; 16] {
    let mut x = [0u32; 16];
    for (i, word) in x.iter_mut().enumerate() {
        *word = ops::load_u32_le(&block[i * 4..]);
    }
    x
}

/// One step of a four-register line; registers cycle `(a,b,c,d) <- (d,t,b,c)`.
#[inline]
fn step4(regs: &mut [u32; 4], fval: u32, x: u32, k: u32, s: u32) {
    let t = ops::rotl32(
        regs[0]
            .wrapping_add(fval)
            .wrapping_add(x)
            .wrapping_add(k),
        s,
    );
    regs[0] = regs[3];
    regs[3] = regs[2];
    regs[2] = regs[1];
    regs[1] = t;
}

/// One step of a five-register line with the rotate-by-10 pipeline.
#[inline]
fn step5(regs: &mut [u32; 5], fval: u32, x: u32, k: u32, s: u32) {
    let t = ops::rotl32(
        regs[0]
            .wrapping_add(fval)
            .wrapping_add(x)
            .wrapping_add(k),
        s,
    )
    .wrapping_add(regs[4]);
    regs[0] = regs[4];
    regs[4] = regs[3];
    regs[3] = ops::rotl32(regs[2], 10);
    regs[2] = regs[1];
    regs[1] = t;
}

fn compress128(h: &mut [u32; 10], block: &[u8]) {
    let x = load_words(block);
    let mut left = [h[0], h[1], h[2], h[3]];
    let mut right = left;

    for round in 0..4 {
        for i in 0..16 {
            let fl = f(round, left[1], left[2], left[3]);
            step4(&mut left, fl, x[R_LEFT[round][i]], K_LEFT[round], S_LEFT[round][i]);
            let fr = f(3 - round, right[1], right[2], right[3]);
            step4(&mut right, fr, x[R_RIGHT[round][i]], K_RIGHT_FOUR[round], S_RIGHT[round][i]);
        }
    }

    let t = h[1].wrapping_add(left[2]).wrapping_add(right[3]);
    h[1] = h[2].wrapping_add(left[3]).wrapping_add(right[0]);
    h[2] = h[3].wrapping_add(left[0]).wrapping_add(right[1]);
    h[3] = h[0].wrapping_add(left[1]).wrapping_add(right[2]);
    h[0] = t;
}

fn compress160(h: &mut [u32; 10], block: &[u8]) {
    let x = load_words(block);
    let mut left = [h[0], h[1], h[2], h[3], h[4]];
    let mut right = left;

    for round in 0..5 {
        for i in 0..16 {
            let fl = f(round, left[1], left[2], left[3]);
            step5(&mut left, fl, x[R_LEFT[round][i]], K_LEFT[round], S_LEFT[round][i]);
            let fr = f(4 - round, right[1], right[2], right[3]);
            step5(&mut right, fr, x[R_RIGHT[round][i]], K_RIGHT_FIVE[round], S_RIGHT[round][i]);
        }
    }

    let t = h[1].wrapping_add(left[2]).wrapping_add(right[3]);
    h[1] = h[2].wrapping_add(left[3]).wrapping_add(right[4]);
    h[2] = h[3].wrapping_add(left[4]).wrapping_add(right[0]);
    h[3] = h[4].wrapping_add(left[0]).wrapping_add(right[1]);
    h[4] = h[0].wrapping_add(left[1]).wrapping_add(right[2]);
    h[0] = t;
}

fn compress256(h: &mut [u32; 10], block: &[u8]) {
    let x = load_words(block);
    let mut left = [h[0], h[1], h[2], h[3]];
    let mut right = [h[4], h[5], h[6], h[7]];

    for round in 0..4 {
        for i in 0..16 {
            let fl = f(round, left[1], left[2], left[3]);
            step4(&mut left, fl, x[R_LEFT[round][i]], K_LEFT[round], S_LEFT[round][i]);
            let fr = f(3 - round, right[1], right[2], right[3]);
            step4(&mut right, fr, x[R_RIGHT[round][i]], K_RIGHT_FOUR[round], S_RIGHT[round][i]);
        }
        // one register trades sides per round
        std::mem::swap(&mut left[round], &mut right[round]);
    }

    for (i, reg) in left.iter().chain(right.iter()).enumerate() {
        h[i] = h[i].wrapping_add(*reg);
    }
}

fn compress320(h: &mut [u32; 10], block: &[u8]) {
    let x = load_words(block);
    let mut left = [h[0], h[1], h[2], h[3], h[4]];
    let mut right = [h[5], h[6], h[7], h[8], h[9]];
    // exchange order per round boundary: b, d, a, c, e
    const SWAPS: [usize; 5] = [1, 3, 0, 2, 4];

    for round in 0..5 {
        for i in 0..16 {
            let fl = f(round, left[1], left[2], left[3]);
            step5(&mut left, fl, x[R_LEFT[round][i]], K_LEFT[round], S_LEFT[round][i]);
            let fr = f(4 - round, right[1], right[2], right[3]);
            step5(&mut right, fr, x[R_RIGHT[round][i]], K_RIGHT_FIVE[round], S_RIGHT[round][i]);
        }
        std::mem::swap(&mut left[SWAPS[round]], &mut right[SWAPS[round]]);
    }

    for (i, reg) in left.iter().chain(right.iter()).enumerate() {
        h[i] = h[i].wrapping_add(*reg);
    }
}

/// Which member of the family a core computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Ripemd128,
    Ripemd160,
    Ripemd256,
    Ripemd320,
}

impl Variant {
    fn state_words(self) -> usize {
        match self {
            Variant::Ripemd128 => 4,
            Variant::Ripemd160 => 5,
            Variant::Ripemd256 => 8,
            Variant::Ripemd320 => 10,
        }
    }

    fn initial(self) -> [u32; 10] {
        let mut h = [0u32; 10];
        match self {
            Variant::Ripemd128 => {
                h[..4].copy_from_slice(&[0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476]);
            }
            Variant::Ripemd160 => {
                h[..5].copy_from_slice(&[
                    0x6745_2301,
                    0xEFCD_AB89,
                    0x98BA_DCFE,
                    0x1032_5476,
                    0xC3D2_E1F0,
                ]);
            }
            Variant::Ripemd256 => {
                h[..8].copy_from_slice(&[
                    0x6745_2301,
                    0xEFCD_AB89,
                    0x98BA_DCFE,
                    0x1032_5476,
                    0x7654_3210,
                    0xFEDC_BA98,
                    0x89AB_CDEF,
                    0x0123_4567,
                ]);
            }
            Variant::Ripemd320 => {
                h.copy_from_slice(&[
                    0x6745_2301,
                    0xEFCD_AB89,
                    0x98BA_DCFE,
                    0x1032_5476,
                    0xC3D2_E1F0,
                    0x7654_3210,
                    0xFEDC_BA98,
                    0x89AB_CDEF,
                    0x0123_4567,
                    0x3C2D_1E0F,
                ]);
            }
        }
        h
    }

    fn compress(self, h: &mut [u32; 10], block: &[u8]) {
        match self {
            Variant::Ripemd128 => compress128(h, block),
            Variant::Ripemd160 => compress160(h, block),
            Variant::Ripemd256 => compress256(h, block),
            Variant::Ripemd320 => compress320(h, block),
        }
    }
}

#[derive(Clone)]
struct RipemdCore {
    variant: Variant,
    h: [u32; 10],
    buf: BlockBuffer,
}

impl RipemdCore {
    fn new(variant: Variant) -> Self {
        Self {
            variant,
            h: variant.initial(),
            buf: BlockBuffer::new(64),
        }
    }
}

impl DigestCore for RipemdCore {
    fn absorb(&mut self, input: &[u8]) {
        let Self { variant, h, buf } = self;
        buf.feed(input, |block| variant.compress(h, block));
    }

    fn digest(&self) -> Vec<u8> {
        let mut state = self.clone();
        let tail = merkle_damgard_tail(state.buf.total_bytes(), 64, LengthField::Le64);
        state.absorb(&tail);
        let mut out = vec![0u8; state.variant.state_words() * 4];
        for (i, word) in state.h[..state.variant.state_words()].iter().enumerate() {
            ops::store_u32_le(*word, &mut out[i * 4..]);
        }
        out
    }

    fn reset(&mut self) {
        self.h = self.variant.initial();
        self.buf.reset();
    }
}

/// A registered member of the RIPEMD family.
pub struct Ripemd {
    variant: Variant,
    descriptor: Descriptor,
}

impl Ripemd {
    pub fn v128() -> Self {
        Self::build(
            Variant::Ripemd128,
            "RIPEMD-128",
            "ripemd128",
            "Drop-in 128-bit replacement for the original RIPEMD; two parallel \
             four-register lines cross-merged per block.",
            SecurityStatus::Deprecated,
            vec![collision_margin()],
            vec![
                TestVector::new(
                    Vec::new(),
                    hex_vector("cdf26213a150dc3ecb610f18f6b38b46"),
                    "empty message",
                    DOC_URI,
                ),
                TestVector::new(
                    b"a".to_vec(),
                    hex_vector("86be7afa339d0fc7cfc785e72f578d33"),
                    "single byte a",
                    DOC_URI,
                ),
                TestVector::new(
                    b"abc".to_vec(),
                    hex_vector("c14a12199c66e4ba84636b0f69144c77"),
                    "abc",
                    DOC_URI,
                ),
                TestVector::new(
                    b"message digest".to_vec(),
                    hex_vector("9e327b3d6e523062afc1132d7df9d1b8"),
                    "message digest",
                    DOC_URI,
                ),
                TestVector::new(
                    b"abcdefghijklmnopqrstuvwxyz".to_vec(),
                    hex_vector("fd2aa607f71dc8f510714922b371834e"),
                    "lowercase alphabet",
                    DOC_URI,
                ),
            ],
        )
    }

    pub fn v160() -> Self {
        Self::build(
            Variant::Ripemd160,
            "RIPEMD-160",
            "ripemd160",
            "160-bit strengthened RIPEMD; five rounds per line with a \
             rotate-by-ten register pipeline.",
            SecurityStatus::Deprecated,
            vec![],
            vec![
                TestVector::new(
                    Vec::new(),
                    hex_vector("9c1185a5c5e9fc54612808977ee8f548b2258d31"),
                    "empty message",
                    DOC_URI,
                ),
                TestVector::new(
                    b"a".to_vec(),
                    hex_vector("0bdc9d2d256b3ee9daae347be6f4dc835a467ffe"),
                    "single byte a",
                    DOC_URI,
                ),
                TestVector::new(
                    b"abc".to_vec(),
                    hex_vector("8eb208f7e05d987a9b044a8e98c6b087f15a0bfc"),
                    "abc",
                    DOC_URI,
                ),
                TestVector::new(
                    b"message digest".to_vec(),
                    hex_vector("5d0689ef49d2fae572b881b123a85ffa21595f36"),
                    "message digest",
                    DOC_URI,
                ),
            ],
        )
    }

    pub fn v256() -> Self {
        Self::build(
            Variant::Ripemd256,
            "RIPEMD-256",
            "ripemd256",
            "Doubled-width RIPEMD-128: the two lines keep separate state and \
             trade one register per round. Width, not strength, is doubled.",
            SecurityStatus::Deprecated,
            vec![collision_margin()],
            vec![
                TestVector::new(
                    Vec::new(),
                    hex_vector(
                        "02ba4c4e5f8ecd1877fc52d64d30e37a2d9774fb1e5d026380ae0168e3c5522d",
                    ),
                    "empty message",
                    DOC_URI,
                ),
                TestVector::new(
                    b"a".to_vec(),
                    hex_vector(
                        "f9333e45d857f5d90a91bab70a1eba0cfb1be4b0783c9acfcd883a9134692925",
                    ),
                    "single byte a",
                    DOC_URI,
                ),
                TestVector::new(
                    b"abc".to_vec(),
                    hex_vector(
                        "afbd6e228b9d8cbbcef5ca2d03e6dba10ac0bc7547734033faa7ec2a9a637bf3",
                    ),
                    "abc",
                    DOC_URI,
                ),
            ],
        )
    }

    pub fn v320() -> Self {
        Self::build(
            Variant::Ripemd320,
            "RIPEMD-320",
            "ripemd320",
            "Doubled-width RIPEMD-160 with per-round register exchange \
             between the lines.",
            SecurityStatus::Deprecated,
            vec![],
            vec![
                TestVector::new(
                    Vec::new(),
                    hex_vector(
                        "22d65d5661536cdc75c1fdf5c6de7b41b9f27325ebc61e8557177d705a0ec880151c3a32a00899b8",
                    ),
                    "empty message",
                    DOC_URI,
                ),
                TestVector::new(
                    b"a".to_vec(),
                    hex_vector(
                        "ce78850638f92658a5a585097579926dda667a5716562cfcf6fbe77f63542f99b04705d6970dff5d",
                    ),
                    "single byte a",
                    DOC_URI,
                ),
                TestVector::new(
                    b"abc".to_vec(),
                    hex_vector(
                        "de4c01b3054f8930a79d09ae738e92301e5a17085beffdc1b8d116713e74f82fa942d64cdbc4682d",
                    ),
                    "abc",
                    DOC_URI,
                ),
            ],
        )
    }

    fn build(
        variant: Variant,
        name: &'static str,
        internal_name: &'static str,
        description: &'static str,
        security_status: SecurityStatus,
        vulnerabilities: Vec<Vulnerability>,
        vectors: Vec<TestVector>,
    ) -> Self {
        Self {
            variant,
            descriptor: Descriptor {
                name,
                internal_name,
                category: Category::Hash,
                sub_category: "merkle-damgard",
                inventor: "Hans Dobbertin, Antoon Bosselaers, Bart Preneel",
                year: 1996,
                country: Country::Be,
                description,
                security_status,
                complexity: Complexity::Intermediate,
                documentation: vec![LinkItem::new(
                    "RIPEMD-160: a strengthened version of RIPEMD",
                    DOC_URI,
                )],
                references: vec![LinkItem::new(
                    "ISO/IEC 10118-3 dedicated hash functions",
                    "https://www.iso.org/standard/67116.html",
                )],
                vulnerabilities,
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(64)],
                output_sizes: vec![KeySize::fixed(variant.state_words() * 4)],
                vectors,
            },
        }
    }
}

fn collision_margin() -> Vulnerability {
    Vulnerability::new(
        "collision-resistance",
        "128-bit digests offer only 64-bit collision resistance, below \
         current recommendations.",
        "Use a 256-bit hash such as SHA-256 for new designs.",
    )
}

impl Algorithm for Ripemd {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(RipemdCore::new(self.variant)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    fn digest_of(variant: Variant, input: &[u8]) -> String {
        let mut core = RipemdCore::new(variant);
        core.absorb(input);
        bytes_to_hex(&core.digest())
    }

    #[test]
    fn test_declared_vectors() {
        for algorithm in [
            Ripemd::v128(),
            Ripemd::v160(),
            Ripemd::v256(),
            Ripemd::v320(),
        ] {
            for v in &algorithm.descriptor.vectors {
                assert_eq!(
                    bytes_to_hex(&v.expected),
                    digest_of(algorithm.variant, &v.input),
                    "{}: {}",
                    algorithm.descriptor.name,
                    v.text
                );
            }
        }
    }

    #[test]
    fn test_million_a_128() {
        let mut core = RipemdCore::new(Variant::Ripemd128);
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            core.absorb(&chunk);
        }
        assert_eq!(
            bytes_to_hex(&core.digest()),
            "4a7f5723f954eba1216c9d8f6320431f"
        );
    }

    #[test]
    fn test_million_a_160() {
        let mut core = RipemdCore::new(Variant::Ripemd160);
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            core.absorb(&chunk);
        }
        assert_eq!(
            bytes_to_hex(&core.digest()),
            "52783243c1697bdbe16d37f97f68f08325dc1528"
        );
    }

    #[test]
    fn test_chunked_feed_matches_whole() {
        let input: Vec<u8> = (0u8..=200).collect();
        for variant in [
            Variant::Ripemd128,
            Variant::Ripemd160,
            Variant::Ripemd256,
            Variant::Ripemd320,
        ] {
            let whole = digest_of(variant, &input);
            let mut core = RipemdCore::new(variant);
            for chunk in input.chunks(9) {
                core.absorb(chunk);
            }
            assert_eq!(whole, bytes_to_hex(&core.digest()));
        }
    }

    #[test]
    fn test_output_lengths() {
        assert_eq!(digest_of(Variant::Ripemd128, b"x").len(), 32);
        assert_eq!(digest_of(Variant::Ripemd160, b"x").len(), 40);
        assert_eq!(digest_of(Variant::Ripemd256, b"x").len(), 64);
        assert_eq!(digest_of(Variant::Ripemd320, b"x").len(), 80);
    }
}
