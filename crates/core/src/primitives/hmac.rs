//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! HMAC-SHA256 per RFC 2104 / FIPS 198-1: the nested keyed construction
//! `H((K ^ opad) || H((K ^ ipad) || m))` over the SHA-256 core.
//!
//! Keys longer than the 64-byte block are hashed first; shorter keys are
//! zero-padded. An unset key is the empty key, which HMAC defines. The key
//! block is wiped on drop.

use zeroize::Zeroize;

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    hex_vector, size_allowed, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus,
    TestVector,
};
use crate::primitives::sha2::Sha256Core;
use crate::stream::{DigestCore, DigestStream};

const BLOCK_LEN: usize = 64;
const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5C;

#[derive(Clone)]
struct HmacSha256Core {
    key_block: [u8; BLOCK_LEN],
    inner: Sha256Core,
}

impl Drop for HmacSha256Core {
    fn drop(&mut self) {
        self.key_block.zeroize();
    }
}

impl HmacSha256Core {
    fn new() -> Self {
        let mut core = Self {
            key_block: [0u8; BLOCK_LEN],
            inner: Sha256Core::new(),
        };
        core.absorb_inner_pad();
        core
    }

    /// Start the inner hash over `(K ^ ipad)`.
    fn absorb_inner_pad(&mut self) {
        let mut pad = [0u8; BLOCK_LEN];
        for (p, k) in pad.iter_mut().zip(self.key_block.iter()) {
            *p = k ^ IPAD;
        }
        self.inner = Sha256Core::new();
        self.inner.absorb(&pad);
        pad.zeroize();
    }
}

impl DigestCore for HmacSha256Core {
    fn absorb(&mut self, input: &[u8]) {
        self.inner.absorb(input);
    }

    fn digest(&self) -> Vec<u8> {
        let inner_digest = self.inner.digest();

        let mut pad = [0u8; BLOCK_LEN];
        for (p, k) in pad.iter_mut().zip(self.key_block.iter()) {
            *p = k ^ OPAD;
        }
        let mut outer = Sha256Core::new();
        outer.absorb(&pad);
        outer.absorb(&inner_digest);
        pad.zeroize();
        outer.digest()
    }

    fn reset(&mut self) {
        self.absorb_inner_pad();
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), InstanceError> {
        if !size_allowed(&key_sizes(), key.len()) {
            return Err(InstanceError::InvalidParameter {
                name: "key",
                reason: format!("{} bytes outside the declared sizes", key.len()),
            });
        }
        self.key_block.zeroize();
        if key.len() > BLOCK_LEN {
            let mut hasher = Sha256Core::new();
            hasher.absorb(key);
            let digest = hasher.digest();
            self.key_block[..digest.len()].copy_from_slice(&digest);
        } else {
            self.key_block[..key.len()].copy_from_slice(key);
        }
        self.absorb_inner_pad();
        Ok(())
    }
}

fn key_sizes() -> Vec<KeySize> {
    vec![KeySize::new(0, 1024, 1).expect("static size range")]
}

/// HMAC-SHA256 algorithm registration.
pub struct HmacSha256 {
    descriptor: Descriptor,
}

impl HmacSha256 {
    pub fn new() -> Self {
        let uri = "https://datatracker.ietf.org/doc/html/rfc4231";
        Self {
            descriptor: Descriptor {
                name: "HMAC-SHA256",
                internal_name: "hmac-sha256",
                category: Category::Mac,
                sub_category: "nested-hash",
                inventor: "Mihir Bellare, Ran Canetti, Hugo Krawczyk",
                year: 1996,
                country: Country::Us,
                description: "Keyed message authentication built by nesting SHA-256 \
                              with inner and outer key pads (FIPS 198-1).",
                security_status: SecurityStatus::Secure,
                complexity: Complexity::Intermediate,
                documentation: vec![LinkItem::new(
                    "RFC 2104: HMAC keyed-hashing for message authentication",
                    "https://datatracker.ietf.org/doc/html/rfc2104",
                )],
                references: vec![LinkItem::new("RFC 4231: HMAC-SHA test vectors", uri)],
                vulnerabilities: vec![],
                key_sizes: key_sizes(),
                block_sizes: vec![KeySize::fixed(BLOCK_LEN)],
                output_sizes: vec![KeySize::fixed(32)],
                vectors: vec![
                    TestVector::new(
                        b"Hi There".to_vec(),
                        hex_vector(
                            "b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7",
                        ),
                        "RFC 4231 test case 1",
                        uri,
                    )
                    .with_key(vec![0x0B; 20]),
                    TestVector::new(
                        b"what do ya want for nothing?".to_vec(),
                        hex_vector(
                            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
                        ),
                        "RFC 4231 test case 2 (short key)",
                        uri,
                    )
                    .with_key(b"Jefe".to_vec()),
                ],
            },
        }
    }
}

impl Default for HmacSha256 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for HmacSha256 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(HmacSha256Core::new()))
    }
}
