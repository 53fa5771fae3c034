//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! CRC-32 (IEEE 802.3, the zlib/PNG polynomial) in its reflected
//! table-driven form. A checksum, not a cryptographic hash; registered so
//! consumers can study the error-detection family behind the same contract.
//!
//! The result is the final CRC value as four big-endian bytes, matching the
//! usual printed form (`crc32("123456789") = 0xCBF43926`).

use std::sync::OnceLock;

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::metadata::{
    hex_vector, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
};
use crate::stream::{DigestCore, DigestStream};

/// Reflected form of the IEEE polynomial 0x04C11DB7.
const POLY: u32 = 0xEDB8_8320;

static TABLE: OnceLock<[u32; 256]> = OnceLock::new();

fn table() -> &'static [u32; 256] {
    TABLE.get_or_init(|| {
        let mut table = [0u32; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            let mut crc = i as u32;
            for _ in 0..8 {
                crc = if crc & 1 != 0 {
                    (crc >> 1) ^ POLY
                } else {
                    crc >> 1
                };
            }
            *entry = crc;
        }
        table
    })
}

#[derive(Clone)]
struct Crc32Core {
    crc: u32,
}

impl Crc32Core {
    fn new() -> Self {
        Self { crc: 0xFFFF_FFFF }
    }
}

impl DigestCore for Crc32Core {
    fn absorb(&mut self, input: &[u8]) {
        let table = table();
        for &byte in input {
            self.crc = table[((self.crc ^ byte as u32) & 0xFF) as usize] ^ (self.crc >> 8);
        }
    }

    fn digest(&self) -> Vec<u8> {
        (self.crc ^ 0xFFFF_FFFF).to_be_bytes().to_vec()
    }

    fn reset(&mut self) {
        self.crc = 0xFFFF_FFFF;
    }
}

/// CRC-32 algorithm registration.
pub struct Crc32 {
    descriptor: Descriptor,
}

impl Crc32 {
    pub fn new() -> Self {
        let uri = "https://www.rfc-editor.org/rfc/rfc1952#section-8";
        Self {
            descriptor: Descriptor {
                name: "CRC-32",
                internal_name: "crc32",
                category: Category::ErrorCorrection,
                sub_category: "checksum",
                inventor: "W. Wesley Peterson",
                year: 1961,
                country: Country::Us,
                description: "32-bit cyclic redundancy check over the IEEE 802.3 \
                              polynomial; detects transmission errors, resists no \
                              adversary.",
                security_status: SecurityStatus::Unspecified,
                complexity: Complexity::Beginner,
                documentation: vec![LinkItem::new(
                    "RFC 1952: GZIP file format (CRC-32 definition)",
                    uri,
                )],
                references: vec![LinkItem::new(
                    "A painless guide to CRC error detection algorithms",
                    "https://zlib.net/crc_v3.txt",
                )],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![],
                output_sizes: vec![KeySize::fixed(4)],
                vectors: vec![
                    TestVector::new(Vec::new(), hex_vector("00000000"), "empty message", uri),
                    TestVector::new(
                        b"123456789".to_vec(),
                        hex_vector("cbf43926"),
                        "the classic check string",
                        uri,
                    ),
                    TestVector::new(b"abc".to_vec(), hex_vector("352441c2"), "abc", uri),
                ],
            },
        }
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Crc32 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(Crc32Core::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    fn crc_of(input: &[u8]) -> String {
        let mut core = Crc32Core::new();
        core.absorb(input);
        bytes_to_hex(&core.digest())
    }

    #[test]
    fn test_declared_vectors() {
        for v in Crc32::new().descriptor.vectors.iter() {
            assert_eq!(bytes_to_hex(&v.expected), crc_of(&v.input), "{}", v.text);
        }
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(crc_of(b"a"), "e8b7be43");
    }

    #[test]
    fn test_chunked_feed_matches_whole() {
        let input: Vec<u8> = (0u8..=255).collect();
        let whole = crc_of(&input);
        let mut core = Crc32Core::new();
        for chunk in input.chunks(5) {
            core.absorb(chunk);
        }
        assert_eq!(whole, bytes_to_hex(&core.digest()));
    }

    #[test]
    fn test_single_bit_flip_changes_crc() {
        let base = vec![0u8; 64];
        let reference = crc_of(&base);
        for bit in [0usize, 100, 511] {
            let mut flipped = base.clone();
            flipped[bit / 8] ^= 1 << (bit % 8);
            assert_ne!(reference, crc_of(&flipped));
        }
    }
}
