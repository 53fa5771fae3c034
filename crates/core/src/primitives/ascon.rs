//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Ascon-Hash256 per NIST SP 800-232: a sponge over the 320-bit Ascon
//! permutation with an 8-byte rate.
//!
//! SP 800-232 fixes the little-endian byte-to-lane convention, so the
//! padding bit is the byte 0x01 at the first unused rate position (not the
//! 0x80 of the pre-standard big-endian formulation). Twelve rounds
//! everywhere; the digest is squeezed 8 bytes at a time.

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::metadata::{
    hex_vector, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
};
use crate::ops;
use crate::stream::{BlockBuffer, DigestCore, DigestStream};

const RATE: usize = 8;
const DIGEST_LEN: usize = 32;

/// Initial-value word for Ascon-Hash256 (SP 800-232 table 14).
const IV: u64 = 0x0000_0801_00CC_0002;

const ROUND_CONSTANTS: [u64; 12] = [
    0xF0, 0xE1, 0xD2, 0xC3, 0xB4, 0xA5, 0x96, 0x87, 0x78, 0x69, 0x5A, 0x4B,
];

/// The 12-round Ascon permutation.
fn permute(s: &mut [u64; 5]) {
    for &rc in &ROUND_CONSTANTS {
        s[2] ^= rc;

        // substitution layer (bitsliced 5-bit S-box)
        s[0] ^= s[4];
        s[4] ^= s[3];
        s[2] ^= s[1];
        let t0 = !s[0] & s[1];
        let t1 = !s[1] & s[2];
        let t2 = !s[2] & s[3];
        let t3 = !s[3] & s[4];
        let t4 = !s[4] & s[0];
        s[0] ^= t1;
        s[1] ^= t2;
        s[2] ^= t3;
        s[3] ^= t4;
        s[4] ^= t0;
        s[1] ^= s[0];
        s[0] ^= s[4];
        s[3] ^= s[2];
        s[2] = !s[2];

        // linear diffusion layer
        s[0] ^= ops::rotr64(s[0], 19) ^ ops::rotr64(s[0], 28);
        s[1] ^= ops::rotr64(s[1], 61) ^ ops::rotr64(s[1], 39);
        s[2] ^= ops::rotr64(s[2], 1) ^ ops::rotr64(s[2], 6);
        s[3] ^= ops::rotr64(s[3], 10) ^ ops::rotr64(s[3], 17);
        s[4] ^= ops::rotr64(s[4], 7) ^ ops::rotr64(s[4], 41);
    }
}

#[derive(Clone)]
struct AsconHashCore {
    s: [u64; 5],
    buf: BlockBuffer,
}

impl AsconHashCore {
    fn new() -> Self {
        let mut s = [IV, 0, 0, 0, 0];
        permute(&mut s);
        Self {
            s,
            buf: BlockBuffer::new(RATE),
        }
    }
}

impl DigestCore for AsconHashCore {
    fn absorb(&mut self, input: &[u8]) {
        let Self { s, buf } = self;
        buf.feed(input, |block| {
            s[0] ^= ops::load_u64_le(block);
            permute(s);
        });
    }

    fn digest(&self) -> Vec<u8> {
        let mut state = self.clone();
        let remainder = state.buf.remainder();

        // absorb the final partial block with the 0x01 padding byte at the
        // first unused position
        let mut last = [0u8; RATE];
        last[..remainder.len()].copy_from_slice(remainder);
        last[remainder.len()] = 0x01;
        state.s[0] ^= ops::pack64_le(last);
        permute(&mut state.s);

        let mut out = Vec::with_capacity(DIGEST_LEN);
        loop {
            out.extend_from_slice(&ops::unpack64_le(state.s[0]));
            if out.len() >= DIGEST_LEN {
                break;
            }
            permute(&mut state.s);
        }
        out
    }

    fn reset(&mut self) {
        let mut s = [IV, 0, 0, 0, 0];
        permute(&mut s);
        self.s = s;
        self.buf.reset();
    }
}

/// Ascon-Hash256 algorithm registration.
pub struct AsconHash256 {
    descriptor: Descriptor,
}

impl AsconHash256 {
    pub fn new() -> Self {
        let uri = "https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-232.pdf";
        Self {
            descriptor: Descriptor {
                name: "Ascon-Hash256",
                internal_name: "ascon-hash256",
                category: Category::Hash,
                sub_category: "sponge",
                inventor: "Christoph Dobraunig, Maria Eichlseder, Florian Mendel, Martin Schlaeffer",
                year: 2014,
                country: Country::At,
                description: "256-bit sponge hash over the 320-bit Ascon permutation, \
                              standardized for lightweight use in NIST SP 800-232.",
                security_status: SecurityStatus::Secure,
                complexity: Complexity::Advanced,
                documentation: vec![LinkItem::new(
                    "NIST SP 800-232: Ascon-based lightweight cryptography",
                    uri,
                )],
                references: vec![LinkItem::new(
                    "Ascon design page",
                    "https://ascon.isec.tugraz.at/",
                )],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(RATE)],
                output_sizes: vec![KeySize::fixed(DIGEST_LEN)],
                vectors: vec![TestVector::new(
                    vec![0x00],
                    hex_vector(
                        "8dd446ada58a7740ecf56eb638ef775f7d5c0fd5f0c2bbbdfdec29609d3c43a2",
                    ),
                    "single zero byte (KAT count 2)",
                    uri,
                )],
            },
        }
    }
}

impl Default for AsconHash256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for AsconHash256 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(AsconHashCore::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    fn digest_of(input: &[u8]) -> String {
        let mut core = AsconHashCore::new();
        core.absorb(input);
        bytes_to_hex(&core.digest())
    }

    #[test]
    fn test_declared_vectors() {
        for v in AsconHash256::new().descriptor.vectors.iter() {
            assert_eq!(bytes_to_hex(&v.expected), digest_of(&v.input), "{}", v.text);
        }
    }

    #[test]
    fn test_digest_length_and_distinctness() {
        let a = digest_of(b"");
        let b = digest_of(b"\x00");
        let c = digest_of(b"\x00\x00");
        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert_ne!(b, c);
    }

    #[test]
    fn test_rate_boundary_inputs() {
        // 7, 8 and 9 bytes straddle the one-block rate
        let whole7 = digest_of(&[0x11; 7]);
        let whole8 = digest_of(&[0x11; 8]);
        let whole9 = digest_of(&[0x11; 9]);
        assert_ne!(whole7, whole8);
        assert_ne!(whole8, whole9);

        let mut split = AsconHashCore::new();
        split.absorb(&[0x11; 4]);
        split.absorb(&[0x11; 5]);
        assert_eq!(whole9, bytes_to_hex(&split.digest()));
    }

    #[test]
    fn test_permutation_changes_every_lane() {
        let mut s = [IV, 0, 0, 0, 0];
        permute(&mut s);
        assert!(s.iter().all(|&lane| lane != 0));
    }
}
