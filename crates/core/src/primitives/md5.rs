//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! MD5 per RFC 1321: little-endian Merkle-Damgard over 64-byte blocks.
//! Registered `broken`: collisions are constructed in seconds on commodity
//! hardware. Kept for interoperability study and as the simplest worked
//! example of the single-line construction.
//!
//! The sine-derived constant table is built once at first use, the same way
//! the RFC defines it.

use std::sync::OnceLock;

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::metadata::{
    hex_vector, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
    Vulnerability,
};
use crate::ops;
use crate::padding::{merkle_damgard_tail, LengthField};
use crate::stream::{BlockBuffer, DigestCore, DigestStream};

const H0: [u32; 4] = [0x6745_2301, 0xEFCD_AB89, 0x98BA_DCFE, 0x1032_5476];

#[rustfmt::skip]
const S: [u32; 64] = [
    7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22, 7, 12, 17, 22,
    5,  9, 14, 20, 5,  9, 14, 20, 5,  9, 14, 20, 5,  9, 14, 20,
    4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23, 4, 11, 16, 23,
    6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21, 6, 10, 15, 21,
];

static K: OnceLock<[u32; 64]> = OnceLock::new();

/// `K[i] = floor(|sin(i + 1)| * 2^32)`, exactly as RFC 1321 defines the
/// table.
fn k_table() -> &'static [u32; 64] {
    K.get_or_init(|| {
        let mut table = [0u32; 64];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (((i as f64) + 1.0).sin().abs() * 4_294_967_296.0) as u32;
        }
        table
    })
}

fn compress(h: &mut [u32; 4], block: &[u8]) {
    let k = k_table();
    let mut x = [0u32; 16];
    for (i, word) in x.iter_mut().enumerate() {
        *word = ops::load_u32_le(&block[i * 4..]);
    }

    let [mut a, mut b, mut c, mut d] = *h;
    for i in 0..64 {
        let (f, g) = match i / 16 {
            0 => ((b & c) | (!b & d), i),
            1 => ((d & b) | (!d & c), (5 * i + 1) % 16),
            2 => (b ^ c ^ d, (3 * i + 5) % 16),
            _ => (c ^ (b | !d), (7 * i) % 16),
        };
        let sum = a
            .wrapping_add(f)
            .wrapping_add(k[i])
            .wrapping_add(x[g]);
        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(ops::rotl32(sum, S[i]));
    }

    h[0] = h[0].wrapping_add(a);
    h[1] = h[1].wrapping_add(b);
    h[2] = h[2].wrapping_add(c);
    h[3] = h[3].wrapping_add(d);
}

#[derive(Clone)]
struct Md5Core {
    h: [u32; 4],
    buf: BlockBuffer,
}

impl Md5Core {
    fn new() -> Self {
        Self {
            h: H0,
            buf: BlockBuffer::new(64),
        }
    }
}

impl DigestCore for Md5Core {
    fn absorb(&mut self, input: &[u8]) {
        let Self { h, buf } = self;
        buf.feed(input, |block| compress(h, block));
    }

    fn digest(&self) -> Vec<u8> {
        let mut state = self.clone();
        let tail = merkle_damgard_tail(state.buf.total_bytes(), 64, LengthField::Le64);
        state.absorb(&tail);
        let mut out = vec![0u8; 16];
        for (i, word) in state.h.iter().enumerate() {
            ops::store_u32_le(*word, &mut out[i * 4..]);
        }
        out
    }

    fn reset(&mut self) {
        self.h = H0;
        self.buf.reset();
    }
}

/// MD5 algorithm registration.
pub struct Md5 {
    descriptor: Descriptor,
}

impl Md5 {
    pub fn new() -> Self {
        let uri = "https://datatracker.ietf.org/doc/html/rfc1321";
        Self {
            descriptor: Descriptor {
                name: "MD5",
                internal_name: "md5",
                category: Category::Hash,
                sub_category: "merkle-damgard",
                inventor: "Ron Rivest",
                year: 1992,
                country: Country::Us,
                description: "128-bit little-endian Merkle-Damgard hash. Thoroughly \
                              broken for collision resistance; study material only.",
                security_status: SecurityStatus::Broken,
                complexity: Complexity::Beginner,
                documentation: vec![LinkItem::new("RFC 1321: The MD5 message-digest algorithm", uri)],
                references: vec![LinkItem::new(
                    "RFC 6151: updated security considerations for MD5",
                    "https://datatracker.ietf.org/doc/html/rfc6151",
                )],
                vulnerabilities: vec![Vulnerability::new(
                    "collision",
                    "Practical chosen-prefix collisions (Wang et al. 2004, and \
                     far cheaper since).",
                    "Do not use for signatures or integrity. Prefer SHA-256.",
                )],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(64)],
                output_sizes: vec![KeySize::fixed(16)],
                vectors: vec![
                    TestVector::new(
                        Vec::new(),
                        hex_vector("d41d8cd98f00b204e9800998ecf8427e"),
                        "empty message",
                        uri,
                    ),
                    TestVector::new(
                        b"a".to_vec(),
                        hex_vector("0cc175b9c0f1b6a831c399e269772661"),
                        "single byte a",
                        uri,
                    ),
                    TestVector::new(
                        b"abc".to_vec(),
                        hex_vector("900150983cd24fb0d6963f7d28e17f72"),
                        "abc",
                        uri,
                    ),
                    TestVector::new(
                        b"message digest".to_vec(),
                        hex_vector("f96b697d7cb7938d525a2f31aaf161d0"),
                        "message digest",
                        uri,
                    ),
                ],
            },
        }
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Md5 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(Md5Core::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    fn digest_of(input: &[u8]) -> String {
        let mut core = Md5Core::new();
        core.absorb(input);
        bytes_to_hex(&core.digest())
    }

    #[test]
    fn test_sine_table_matches_rfc() {
        let k = k_table();
        assert_eq!(k[0], 0xD76A_A478);
        assert_eq!(k[1], 0xE8C7_B756);
        assert_eq!(k[2], 0x2420_70DB);
        assert_eq!(k[16], 0xF61E_2562);
        assert_eq!(k[32], 0xFFFA_3942);
        assert_eq!(k[48], 0xF429_2244);
        assert_eq!(k[63], 0xEB86_D391);
    }

    #[test]
    fn test_declared_vectors() {
        for v in Md5::new().descriptor.vectors.iter() {
            assert_eq!(bytes_to_hex(&v.expected), digest_of(&v.input), "{}", v.text);
        }
    }

    #[test]
    fn test_million_a() {
        let mut core = Md5Core::new();
        let chunk = [b'a'; 1000];
        for _ in 0..1000 {
            core.absorb(&chunk);
        }
        assert_eq!(
            bytes_to_hex(&core.digest()),
            "7707d6ae4e027c70eea2a935c2296f21"
        );
    }

    #[test]
    fn test_chunked_feed_matches_whole() {
        let input: Vec<u8> = (0u8..=180).collect();
        let whole = digest_of(&input);
        let mut core = Md5Core::new();
        for chunk in input.chunks(7) {
            core.absorb(chunk);
        }
        assert_eq!(whole, bytes_to_hex(&core.digest()));
    }
}
