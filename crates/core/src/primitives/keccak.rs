//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! The Keccak-p[1600, 24] permutation (FIPS 202) and cSHAKE128 on top of it
//! (NIST SP 800-185).
//!
//! cSHAKE with an empty function name and empty customization degenerates to
//! plain SHAKE128, including the 0x1F domain byte; otherwise the bytepadded
//! `encode_string(N) || encode_string(S)` prefix is absorbed at construction
//! and the domain byte is 0x04. The derived functions (TupleHash) reuse this
//! core.

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    hex_vector, size_allowed, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus,
    TestVector,
};
use crate::ops;
use crate::padding::{bytepad, encode_string};
use crate::stream::{BlockBuffer, DigestCore, DigestStream};

/// cSHAKE128 / SHAKE128 rate in bytes.
pub(crate) const RATE128: usize = 168;

const SHAKE_DOMAIN: u8 = 0x1F;
const CSHAKE_DOMAIN: u8 = 0x04;

const ROUND_CONSTANTS: [u64; 24] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation offsets indexed by lane `x + 5y`.
#[rustfmt::skip]
const RHO: [u32; 25] = [
     0,  1, 62, 28, 27,
    36, 44,  6, 55, 20,
     3, 10, 43, 25, 39,
    41, 45, 15, 21,  8,
    18,  2, 61, 56, 14,
];

/// Keccak-p[1600] with 24 rounds.
pub(crate) fn keccak_p(a: &mut [u64; 25]) {
    for &rc in &ROUND_CONSTANTS {
        // theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ ops::rotl64(c[(x + 1) % 5], 1);
            for y in 0..5 {
                a[x + 5 * y] ^= d;
            }
        }

        // rho and pi
        let mut b = [0u64; 25];
        for x in 0..5 {
            for y in 0..5 {
                b[y + 5 * ((2 * x + 3 * y) % 5)] = ops::rotl64(a[x + 5 * y], RHO[x + 5 * y]);
            }
        }

        // chi
        for y in 0..5 {
            for x in 0..5 {
                a[x + 5 * y] = b[x + 5 * y] ^ (!b[(x + 1) % 5 + 5 * y] & b[(x + 2) % 5 + 5 * y]);
            }
        }

        // iota
        a[0] ^= rc;
    }
}

/// Incremental cSHAKE128 sponge, also usable as plain SHAKE128.
#[derive(Clone)]
pub(crate) struct CShake128 {
    state: [u64; 25],
    buf: BlockBuffer,
    domain: u8,
    output_size: usize,
    /// Absorbed prefix, kept so `reset` can replay it.
    prefix: Vec<u8>,
}

impl CShake128 {
    /// Build a cSHAKE128 instance with function name `n` and customization
    /// `s`. Both empty selects plain SHAKE128.
    pub(crate) fn new(n: &[u8], s: &[u8], output_size: usize) -> Self {
        let mut core = Self {
            state: [0u64; 25],
            buf: BlockBuffer::new(RATE128),
            domain: SHAKE_DOMAIN,
            output_size,
            prefix: Vec::new(),
        };
        if !n.is_empty() || !s.is_empty() {
            core.domain = CSHAKE_DOMAIN;
            let mut prefix = encode_string(n);
            prefix.extend_from_slice(&encode_string(s));
            core.prefix = bytepad(&prefix, RATE128);
            let prefix = core.prefix.clone();
            core.absorb_bytes(&prefix);
        }
        core
    }

    pub(crate) fn absorb_bytes(&mut self, input: &[u8]) {
        let Self { state, buf, .. } = self;
        buf.feed(input, |block| {
            xor_block(state, block);
            keccak_p(state);
        });
    }

    /// Finalize a clone of the sponge and squeeze `len` bytes.
    pub(crate) fn squeeze(&self, len: usize) -> Vec<u8> {
        let mut state = self.state;
        let remainder = self.buf.remainder();

        // multi-rate padding: domain byte after the data, 0x80 on the final
        // rate byte (they coincide on a full-minus-one block)
        let mut last = [0u8; RATE128];
        last[..remainder.len()].copy_from_slice(remainder);
        last[remainder.len()] ^= self.domain;
        last[RATE128 - 1] ^= 0x80;
        xor_block(&mut state, &last);
        keccak_p(&mut state);

        let mut out = Vec::with_capacity(len);
        loop {
            for lane in state.iter().take(RATE128 / 8) {
                out.extend_from_slice(&ops::unpack64_le(*lane));
                if out.len() >= len {
                    out.truncate(len);
                    return out;
                }
            }
            keccak_p(&mut state);
        }
    }
}

fn xor_block(state: &mut [u64; 25], block: &[u8]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        *lane ^= ops::load_u64_le(chunk);
    }
}

impl DigestCore for CShake128 {
    fn absorb(&mut self, input: &[u8]) {
        self.absorb_bytes(input);
    }

    fn digest(&self) -> Vec<u8> {
        self.squeeze(self.output_size)
    }

    fn reset(&mut self) {
        self.state = [0u64; 25];
        self.buf.reset();
        let prefix = std::mem::take(&mut self.prefix);
        self.absorb_bytes(&prefix);
        self.prefix = prefix;
    }

    fn set_output_size(&mut self, size: usize) -> Result<(), InstanceError> {
        if !size_allowed(&output_sizes(), size) {
            return Err(InstanceError::InvalidParameter {
                name: "output_size",
                reason: format!("{size} bytes outside the declared range"),
            });
        }
        self.output_size = size;
        Ok(())
    }

    fn set_customization(&mut self, customization: &[u8]) -> Result<(), InstanceError> {
        if self.buf.total_bytes() != self.prefix.len() as u64 {
            return Err(InstanceError::InvalidParameter {
                name: "customization",
                reason: "cannot change customization after feeding data".into(),
            });
        }
        *self = Self::new(b"", customization, self.output_size);
        Ok(())
    }
}

fn output_sizes() -> Vec<KeySize> {
    vec![KeySize::new(1, 1024, 1).expect("static size range")]
}

/// cSHAKE128 algorithm registration (XOF).
pub struct CShake128Algorithm {
    descriptor: Descriptor,
}

impl CShake128Algorithm {
    pub fn new() -> Self {
        let uri = "https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-185.pdf";
        Self {
            descriptor: Descriptor {
                name: "cSHAKE128",
                internal_name: "cshake128",
                category: Category::Hash,
                sub_category: "xof",
                inventor: "NIST",
                year: 2016,
                country: Country::Us,
                description: "Customizable SHAKE128: the FIPS 202 XOF with a domain \
                              separating function name and customization string.",
                security_status: SecurityStatus::Secure,
                complexity: Complexity::Advanced,
                documentation: vec![LinkItem::new(
                    "NIST SP 800-185: SHA-3 derived functions",
                    uri,
                )],
                references: vec![LinkItem::new(
                    "FIPS 202: SHA-3 standard",
                    "https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf",
                )],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(RATE128)],
                output_sizes: output_sizes(),
                vectors: vec![
                    TestVector::new(
                        Vec::new(),
                        hex_vector(
                            "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26",
                        ),
                        "empty input, empty customization (plain SHAKE128)",
                        "https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.202.pdf",
                    )
                    .with_output_size(32),
                    TestVector::new(
                        hex_vector("00010203"),
                        hex_vector(
                            "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5",
                        ),
                        "SP 800-185 cSHAKE sample 1",
                        uri,
                    )
                    .with_output_size(32)
                    .with_customization(b"Email Signature".to_vec()),
                ],
            },
        }
    }
}

impl Default for CShake128Algorithm {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for CShake128Algorithm {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(CShake128::new(b"", b"", 32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    #[test]
    fn test_shake128_empty() {
        let core = CShake128::new(b"", b"", 32);
        assert_eq!(
            bytes_to_hex(&core.squeeze(32)),
            "7f9c2ba4e88f827d616045507605853ed73b8093f6efbc88eb1a6eacfa66ef26"
        );
    }

    #[test]
    fn test_cshake_sample_one() {
        let mut core = CShake128::new(b"", b"Email Signature", 32);
        core.absorb_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert_eq!(
            bytes_to_hex(&core.squeeze(32)),
            "c1c36925b6409a04f1b504fcbca9d82b4017277cb5ed2b2065fc1d3814d5aaf5"
        );
    }

    #[test]
    fn test_squeeze_prefix_property() {
        // a longer squeeze of the same sponge starts with the shorter one
        let mut core = CShake128::new(b"", b"", 32);
        core.absorb_bytes(b"prefix property");
        let short = core.squeeze(16);
        let long = core.squeeze(64);
        assert_eq!(&long[..16], &short[..]);
    }

    #[test]
    fn test_customization_separates_domains() {
        let mut a = CShake128::new(b"", b"A", 32);
        let mut b = CShake128::new(b"", b"B", 32);
        a.absorb_bytes(b"same data");
        b.absorb_bytes(b"same data");
        assert_ne!(a.squeeze(32), b.squeeze(32));
    }

    #[test]
    fn test_reset_replays_prefix() {
        let mut core = CShake128::new(b"TupleHash", b"party", 32);
        let fresh = core.squeeze(32);
        core.absorb_bytes(b"some data");
        core.reset();
        assert_eq!(core.squeeze(32), fresh);
    }

    #[test]
    fn test_set_output_size_validation() {
        let mut core = CShake128::new(b"", b"", 32);
        assert!(DigestCore::set_output_size(&mut core, 64).is_ok());
        assert!(DigestCore::set_output_size(&mut core, 0).is_err());
        assert!(DigestCore::set_output_size(&mut core, 4096).is_err());
    }
}
