//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! TupleHash128 per NIST SP 800-185: an unambiguous hash over a sequence of
//! byte strings, built on cSHAKE128 with the function name "TupleHash".
//!
//! Every tuple element is absorbed as `encode_string(element)`, so element
//! boundaries are part of the input domain: ("ab", "c") and ("a", "bc")
//! never collide. The output length (or 0 in XOF mode) is right-encoded and
//! absorbed last.
//!
//! Tuple elements are configuration (`set_tuples`); bytes passed to `feed`
//! accumulate into one trailing element that is appended at finalization.

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    hex_vector, size_allowed, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus,
    TestVector,
};
use crate::padding::{encode_string, right_encode};
use crate::primitives::keccak::{CShake128, RATE128};
use crate::stream::{DigestCore, DigestStream};

const FUNCTION_NAME: &[u8] = b"TupleHash";
const DEFAULT_OUTPUT: usize = 32;

#[derive(Clone)]
struct TupleHash128Core {
    customization: Vec<u8>,
    tuples: Vec<Vec<u8>>,
    pending: Vec<u8>,
    output_size: usize,
    xof: bool,
}

impl TupleHash128Core {
    fn new() -> Self {
        Self {
            customization: Vec::new(),
            tuples: Vec::new(),
            pending: Vec::new(),
            output_size: DEFAULT_OUTPUT,
            xof: false,
        }
    }
}

impl DigestCore for TupleHash128Core {
    fn absorb(&mut self, input: &[u8]) {
        self.pending.extend_from_slice(input);
    }

    fn digest(&self) -> Vec<u8> {
        let mut sponge = CShake128::new(FUNCTION_NAME, &self.customization, self.output_size);
        for element in &self.tuples {
            sponge.absorb_bytes(&encode_string(element));
        }
        if !self.pending.is_empty() {
            sponge.absorb_bytes(&encode_string(&self.pending));
        }
        let requested_bits = if self.xof {
            0
        } else {
            (self.output_size as u64) << 3
        };
        sponge.absorb_bytes(&right_encode(requested_bits));
        sponge.squeeze(self.output_size)
    }

    fn reset(&mut self) {
        self.pending.clear();
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
        self.customization = customization.to_vec();
        Ok(())
    }

    fn set_xof(&mut self, xof: bool) -> Result<(), InstanceError> {
        self.xof = xof;
        Ok(())
    }

    fn set_tuples(&mut self, tuples: &[Vec<u8>]) -> Result<(), InstanceError> {
        self.tuples = tuples.to_vec();
        Ok(())
    }
}

fn output_sizes() -> Vec<KeySize> {
    vec![KeySize::new(1, 1024, 1).expect("static size range")]
}

/// TupleHash128 algorithm registration.
pub struct TupleHash128 {
    descriptor: Descriptor,
}

impl TupleHash128 {
    pub fn new() -> Self {
        let uri = "https://nvlpubs.nist.gov/nistpubs/SpecialPublications/NIST.SP.800-185.pdf";
        Self {
            descriptor: Descriptor {
                name: "TupleHash128",
                internal_name: "tuplehash128",
                category: Category::Hash,
                sub_category: "derived-function",
                inventor: "NIST",
                year: 2016,
                country: Country::Us,
                description: "Unambiguous hash over a tuple of byte strings; each \
                              element is length-prefixed before absorption into \
                              cSHAKE128.",
                security_status: SecurityStatus::Secure,
                complexity: Complexity::Advanced,
                documentation: vec![LinkItem::new(
                    "NIST SP 800-185: SHA-3 derived functions",
                    uri,
                )],
                references: vec![LinkItem::new(
                    "NIST SP 800-185 example values",
                    "https://csrc.nist.gov/projects/cryptographic-standards-and-guidelines/example-values",
                )],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(RATE128)],
                output_sizes: output_sizes(),
                vectors: vec![
                    TestVector::new(
                        Vec::new(),
                        hex_vector(
                            "c5d8786c1afb9b8211ab34b65b2c0048fa64e6d48e263264ce1707d3ffc8ed11",
                        ),
                        "SP 800-185 TupleHash sample 1",
                        uri,
                    )
                    .with_output_size(32)
                    .with_tuples(vec![hex_vector("000102"), hex_vector("101112131415")]),
                    TestVector::new(
                        Vec::new(),
                        hex_vector(
                            "75cdb20ff4db1154e841d758e24160c54bae86eb8c13e7f5f40eb35588e96dfb",
                        ),
                        "SP 800-185 TupleHash sample 2",
                        uri,
                    )
                    .with_output_size(32)
                    .with_customization(b"My Tuple App".to_vec())
                    .with_tuples(vec![hex_vector("000102"), hex_vector("101112131415")]),
                    TestVector::new(
                        Vec::new(),
                        hex_vector(
                            "900fe16cad098d28e74d632ed852f99daab7f7df4d99e775657885b4bf76d6f8",
                        ),
                        "SP 800-185 TupleHashXOF sample 3 (XOF mode)",
                        uri,
                    )
                    .with_output_size(32)
                    .with_xof(true)
                    .with_customization(b"My Tuple App".to_vec())
                    .with_tuples(vec![
                        hex_vector("000102"),
                        hex_vector("101112131415"),
                        hex_vector("202122232425262728"),
                    ]),
                ],
            },
        }
    }
}

impl Default for TupleHash128 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for TupleHash128 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        if inverse {
            return None;
        }
        Some(DigestStream::boxed(TupleHash128Core::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    fn tuple_digest(tuples: &[Vec<u8>], customization: &[u8]) -> String {
        let mut core = TupleHash128Core::new();
        core.set_tuples(tuples).unwrap();
        core.set_customization(customization).unwrap();
        bytes_to_hex(&core.digest())
    }

    #[test]
    fn test_declared_vectors() {
        for v in TupleHash128::new().descriptor.vectors.iter() {
            let mut core = TupleHash128Core::new();
            if let Some(tuples) = &v.tuples {
                core.set_tuples(tuples).unwrap();
            }
            if let Some(c) = &v.customization {
                core.set_customization(c).unwrap();
            }
            if let Some(n) = v.output_size {
                core.set_output_size(n).unwrap();
            }
            if v.xof {
                core.set_xof(true).unwrap();
            }
            core.absorb(&v.input);
            assert_eq!(bytes_to_hex(&v.expected), bytes_to_hex(&core.digest()), "{}", v.text);
        }
    }

    #[test]
    fn test_element_boundaries_matter() {
        let joined = tuple_digest(&[b"ab".to_vec(), b"c".to_vec()], b"");
        let resplit = tuple_digest(&[b"a".to_vec(), b"bc".to_vec()], b"");
        assert_ne!(joined, resplit);
    }

    #[test]
    fn test_fed_bytes_become_trailing_element() {
        let configured = tuple_digest(&[b"one".to_vec(), b"two".to_vec()], b"");

        let mut fed = TupleHash128Core::new();
        fed.set_tuples(&[b"one".to_vec()]).unwrap();
        fed.absorb(b"tw");
        fed.absorb(b"o");
        assert_eq!(configured, bytes_to_hex(&fed.digest()));
    }

    #[test]
    fn test_xof_mode_differs_from_fixed() {
        let mut fixed = TupleHash128Core::new();
        fixed.set_tuples(&[b"data".to_vec()]).unwrap();
        let mut xof = fixed.clone();
        xof.set_xof(true).unwrap();
        assert_ne!(fixed.digest(), xof.digest());
    }

    #[test]
    fn test_output_size_validation() {
        let mut core = TupleHash128Core::new();
        assert!(core.set_output_size(64).is_ok());
        assert!(core.set_output_size(0).is_err());
    }
}
