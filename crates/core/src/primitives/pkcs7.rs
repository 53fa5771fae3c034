//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! PKCS#7 block padding per RFC 5652 section 6.3, for a 16-byte block.
//!
//! The forward instance appends `n` bytes of value `n` (always at least
//! one, a full block when the input is aligned). The inverse instance
//! validates and strips; any malformed tail is rejected. Callers that
//! decrypt-then-unpad should treat the rejection as an authentication
//! signal and avoid exposing which byte failed.

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
};

const BLOCK_LEN: usize = 16;

fn pad(input: &[u8]) -> Vec<u8> {
    let fill = BLOCK_LEN - input.len() % BLOCK_LEN;
    let mut out = Vec::with_capacity(input.len() + fill);
    out.extend_from_slice(input);
    out.resize(input.len() + fill, fill as u8);
    out
}

fn unpad(input: &[u8]) -> Result<Vec<u8>, InstanceError> {
    let malformed = || InstanceError::InvalidParameter {
        name: "input",
        reason: "malformed padding".into(),
    };
    if input.is_empty() || input.len() % BLOCK_LEN != 0 {
        return Err(malformed());
    }
    let fill = *input.last().ok_or_else(malformed)? as usize;
    if fill == 0 || fill > BLOCK_LEN {
        return Err(malformed());
    }
    let (body, tail) = input.split_at(input.len() - fill);
    if tail.iter().any(|&b| b as usize != fill) {
        return Err(malformed());
    }
    Ok(body.to_vec())
}

struct Pkcs7Instance {
    strip: bool,
    pending: Vec<u8>,
    finished: Option<Vec<u8>>,
}

impl Pkcs7Instance {
    fn new(strip: bool) -> Self {
        Self {
            strip,
            pending: Vec::new(),
            finished: None,
        }
    }
}

impl Instance for Pkcs7Instance {
    fn feed(&mut self, input: &[u8]) -> Result<(), InstanceError> {
        if self.finished.take().is_some() {
            self.pending.clear();
        }
        self.pending.extend_from_slice(input);
        Ok(())
    }

    fn result(&mut self) -> Result<Vec<u8>, InstanceError> {
        if let Some(out) = &self.finished {
            return Ok(out.clone());
        }
        let out = if self.strip {
            unpad(&self.pending)?
        } else {
            pad(&self.pending)
        };
        self.finished = Some(out.clone());
        Ok(out)
    }
}

/// PKCS#7 padding algorithm registration.
pub struct Pkcs7 {
    descriptor: Descriptor,
}

impl Pkcs7 {
    pub fn new() -> Self {
        let uri = "https://datatracker.ietf.org/doc/html/rfc5652#section-6.3";
        Self {
            descriptor: Descriptor {
                name: "PKCS#7",
                internal_name: "pkcs7",
                category: Category::Padding,
                sub_category: "block-padding",
                inventor: "RSA Laboratories",
                year: 1993,
                country: Country::Us,
                description: "Deterministic block padding: n bytes of value n, \
                              always present, stripped unambiguously.",
                security_status: SecurityStatus::Unspecified,
                complexity: Complexity::Beginner,
                documentation: vec![LinkItem::new(
                    "RFC 5652: Cryptographic Message Syntax (content padding)",
                    uri,
                )],
                references: vec![],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(BLOCK_LEN)],
                output_sizes: vec![],
                vectors: vec![
                    TestVector::new(
                        Vec::new(),
                        vec![16u8; 16],
                        "empty input pads to one full block",
                        uri,
                    ),
                    TestVector::new(
                        b"ICE ICE BABY".to_vec(),
                        {
                            let mut v = b"ICE ICE BABY".to_vec();
                            v.extend_from_slice(&[4, 4, 4, 4]);
                            v
                        },
                        "twelve bytes gain four bytes of 0x04",
                        uri,
                    ),
                    TestVector::new(
                        b"YELLOW SUBMARINE".to_vec(),
                        {
                            let mut v = b"YELLOW SUBMARINE".to_vec();
                            v.extend_from_slice(&[16u8; 16]);
                            v
                        },
                        "aligned input gains a full padding block",
                        uri,
                    ),
                ],
            },
        }
    }
}

impl Default for Pkcs7 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Pkcs7 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        Some(Box::new(Pkcs7Instance::new(inverse)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_vectors() {
        for v in Pkcs7::new().descriptor.vectors.iter() {
            let mut inst = Pkcs7Instance::new(false);
            inst.feed(&v.input).unwrap();
            assert_eq!(v.expected, inst.result().unwrap(), "{}", v.text);
        }
    }

    #[test]
    fn test_round_trip_all_lengths() {
        for len in 0..40usize {
            let input: Vec<u8> = (0..len as u8).collect();
            let padded = pad(&input);
            assert_eq!(padded.len() % BLOCK_LEN, 0);
            assert!(padded.len() > input.len());
            assert_eq!(unpad(&padded).unwrap(), input);
        }
    }

    #[test]
    fn test_unpad_rejections() {
        assert!(unpad(b"").is_err());
        assert!(unpad(&[4u8; 15]).is_err()); // not block aligned
        assert!(unpad(&[0u8; 16]).is_err()); // zero fill value
        let mut bad = vec![7u8; 16];
        bad[15] = 17; // fill value beyond the block
        assert!(unpad(&bad).is_err());
        let mut torn = pad(b"ICE ICE BABY");
        torn[14] = 3; // one padding byte disagrees
        assert!(unpad(&torn).is_err());
    }

    #[test]
    fn test_inverse_instance_strips() {
        let mut padder = Pkcs7Instance::new(false);
        padder.feed(b"YELLOW SUBMARINE").unwrap();
        let padded = padder.result().unwrap();

        let mut stripper = Pkcs7Instance::new(true);
        stripper.feed(&padded).unwrap();
        assert_eq!(stripper.result().unwrap(), b"YELLOW SUBMARINE");
    }
}
