//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Base64 per RFC 4648 (standard alphabet, padded), implemented from the
//! alphabet table like every other primitive here.
//!
//! The forward instance encodes; `create_instance(true)` yields the strict
//! decoder, which rejects characters outside the alphabet, bad lengths, and
//! misplaced padding. Encoding-category finalize policy follows the hash
//! policy: `result` is idempotent and `feed` afterwards starts fresh.

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    hex_vector, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector,
};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';

fn encode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity((input.len() + 2) / 3 * 4);
    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let triple = (b0 << 16) | (b1 << 8) | b2;

        out.push(ALPHABET[(triple >> 18) as usize & 0x3F]);
        out.push(ALPHABET[(triple >> 12) as usize & 0x3F]);
        out.push(if chunk.len() > 1 {
            ALPHABET[(triple >> 6) as usize & 0x3F]
        } else {
            PAD
        });
        out.push(if chunk.len() > 2 {
            ALPHABET[triple as usize & 0x3F]
        } else {
            PAD
        });
    }
    out
}

fn invalid(reason: impl Into<String>) -> InstanceError {
    InstanceError::InvalidParameter {
        name: "input",
        reason: reason.into(),
    }
}

fn decode(input: &[u8]) -> Result<Vec<u8>, InstanceError> {
    if input.len() % 4 != 0 {
        return Err(invalid(format!(
            "length {} is not a multiple of four",
            input.len()
        )));
    }

    let mut reverse = [0xFFu8; 256];
    for (i, &c) in ALPHABET.iter().enumerate() {
        reverse[c as usize] = i as u8;
    }

    let mut out = Vec::with_capacity(input.len() / 4 * 3);
    for (group_index, group) in input.chunks(4).enumerate() {
        let last_group = group_index == input.len() / 4 - 1;
        let pad_len = group.iter().rev().take_while(|&&c| c == PAD).count();
        if pad_len > 2 || (pad_len > 0 && !last_group) {
            return Err(invalid("misplaced padding"));
        }

        let mut triple = 0u32;
        for &c in &group[..4 - pad_len] {
            let value = reverse[c as usize];
            if value == 0xFF {
                return Err(invalid(format!("byte 0x{c:02x} outside the alphabet")));
            }
            triple = (triple << 6) | value as u32;
        }
        triple <<= 6 * pad_len as u32;

        out.push((triple >> 16) as u8);
        if pad_len < 2 {
            out.push((triple >> 8) as u8);
        }
        if pad_len < 1 {
            out.push(triple as u8);
        }
    }
    Ok(out)
}

/// Streaming encoder/decoder over buffered input.
struct Base64Instance {
    decode: bool,
    pending: Vec<u8>,
    finished: Option<Vec<u8>>,
}

impl Base64Instance {
    fn new(decode: bool) -> Self {
        Self {
            decode,
            pending: Vec::new(),
            finished: None,
        }
    }
}

impl Instance for Base64Instance {
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
        let out = if self.decode {
            decode(&self.pending)?
        } else {
            encode(&self.pending)
        };
        self.finished = Some(out.clone());
        Ok(out)
    }
}

/// Base64 algorithm registration.
pub struct Base64 {
    descriptor: Descriptor,
}

impl Base64 {
    pub fn new() -> Self {
        let uri = "https://datatracker.ietf.org/doc/html/rfc4648";
        Self {
            descriptor: Descriptor {
                name: "Base64",
                internal_name: "base64",
                category: Category::Encoding,
                sub_category: "radix",
                inventor: "IETF",
                year: 1987,
                country: Country::Us,
                description: "Six-bit binary-to-text encoding with the standard \
                              alphabet and trailing padding.",
                security_status: SecurityStatus::Unspecified,
                complexity: Complexity::Beginner,
                documentation: vec![LinkItem::new(
                    "RFC 4648: the Base16, Base32, and Base64 data encodings",
                    uri,
                )],
                references: vec![],
                vulnerabilities: vec![],
                key_sizes: vec![],
                block_sizes: vec![KeySize::fixed(3)],
                output_sizes: vec![],
                vectors: vec![
                    TestVector::new(Vec::new(), Vec::new(), "empty input", uri),
                    TestVector::new(b"f".to_vec(), b"Zg==".to_vec(), "RFC 4648 vector f", uri),
                    TestVector::new(b"fo".to_vec(), b"Zm8=".to_vec(), "RFC 4648 vector fo", uri),
                    TestVector::new(b"foo".to_vec(), b"Zm9v".to_vec(), "RFC 4648 vector foo", uri),
                    TestVector::new(
                        b"foobar".to_vec(),
                        b"Zm9vYmFy".to_vec(),
                        "RFC 4648 vector foobar",
                        uri,
                    ),
                    TestVector::new(
                        hex_vector("00ff10"),
                        b"AP8Q".to_vec(),
                        "binary bytes",
                        uri,
                    ),
                ],
            },
        }
    }
}

impl Default for Base64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Base64 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        Some(Box::new(Base64Instance::new(inverse)))
    }
}
