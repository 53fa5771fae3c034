//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! RC4, Rivest's 1987 byte-oriented stream cipher. Registered as `broken`:
//! the keystream carries exploitable biases and the cipher survives here for
//! interoperability study only.
//!
//! Stream-cipher finalize policy: `result` drains the fed bytes against a
//! keystream generated from the key setup state, then restarts the
//! keystream, so the instance behaves like a fresh one afterwards.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    hex_vector, size_allowed, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus,
    TestVector, Vulnerability,
};

/// Cipher state: the S permutation plus the two PRGA indices. Wiped on drop
/// together with the retained key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct Rc4State {
    s: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4State {
    /// Key-scheduling algorithm.
    fn new(key: &[u8]) -> Self {
        let mut s = [0u8; 256];
        for (i, b) in s.iter_mut().enumerate() {
            *b = i as u8;
        }
        let mut j = 0u8;
        for i in 0..256 {
            j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
            s.swap(i, j as usize);
        }
        Self { s, i: 0, j: 0 }
    }

    /// One keystream byte.
    fn next(&mut self) -> u8 {
        self.i = self.i.wrapping_add(1);
        self.j = self.j.wrapping_add(self.s[self.i as usize]);
        self.s.swap(self.i as usize, self.j as usize);
        self.s[(self.s[self.i as usize].wrapping_add(self.s[self.j as usize])) as usize]
    }
}

struct Rc4Instance {
    key: Option<Vec<u8>>,
    pending: Vec<u8>,
}

impl Drop for Rc4Instance {
    fn drop(&mut self) {
        if let Some(key) = &mut self.key {
            key.zeroize();
        }
    }
}

impl Instance for Rc4Instance {
    fn feed(&mut self, input: &[u8]) -> Result<(), InstanceError> {
        self.pending.extend_from_slice(input);
        Ok(())
    }

    fn result(&mut self) -> Result<Vec<u8>, InstanceError> {
        let key = self.key.as_ref().ok_or(InstanceError::MissingKey)?;
        let mut state = Rc4State::new(key);
        let mut out = std::mem::take(&mut self.pending);
        for byte in out.iter_mut() {
            *byte ^= state.next();
        }
        Ok(out)
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), InstanceError> {
        if !size_allowed(&key_sizes(), key.len()) {
            return Err(InstanceError::InvalidParameter {
                name: "key",
                reason: format!("{} bytes outside the declared sizes", key.len()),
            });
        }
        if let Some(old) = &mut self.key {
            old.zeroize();
        }
        self.key = Some(key.to_vec());
        Ok(())
    }
}

fn key_sizes() -> Vec<KeySize> {
    vec![KeySize::new(1, 256, 1).expect("static size range")]
}

/// RC4 algorithm registration.
pub struct Rc4 {
    descriptor: Descriptor,
}

impl Rc4 {
    pub fn new() -> Self {
        let uri = "https://datatracker.ietf.org/doc/html/rfc6229";
        Self {
            descriptor: Descriptor {
                name: "RC4",
                internal_name: "rc4",
                category: Category::StreamCipher,
                sub_category: "byte-stream",
                inventor: "Ron Rivest",
                year: 1987,
                country: Country::Us,
                description: "Byte-oriented stream cipher built on an evolving 256-byte \
                              permutation. Ubiquitous historically, prohibited today.",
                security_status: SecurityStatus::Broken,
                complexity: Complexity::Beginner,
                documentation: vec![LinkItem::new("RFC 6229: RC4 test vectors", uri)],
                references: vec![LinkItem::new(
                    "RFC 7465: prohibiting RC4 cipher suites",
                    "https://datatracker.ietf.org/doc/html/rfc7465",
                )],
                vulnerabilities: vec![
                    Vulnerability::new(
                        "keystream-bias",
                        "The early keystream bytes are strongly biased (Fluhrer, \
                         Mantin, Shamir; later the RC4 NOMORE attack breaks the \
                         whole stream).",
                        "Do not use. Replace with a modern stream cipher or AEAD.",
                    ),
                ],
                key_sizes: key_sizes(),
                block_sizes: vec![],
                output_sizes: vec![],
                vectors: vec![
                    TestVector::new(
                        b"Plaintext".to_vec(),
                        hex_vector("bbf316e8d940af0ad3"),
                        "classic Key/Plaintext vector",
                        uri,
                    )
                    .with_key(b"Key".to_vec()),
                    TestVector::new(
                        b"pedia".to_vec(),
                        hex_vector("1021bf0420"),
                        "classic Wiki/pedia vector",
                        uri,
                    )
                    .with_key(b"Wiki".to_vec()),
                    TestVector::new(
                        b"Attack at dawn".to_vec(),
                        hex_vector("45a01f645fc35b383552544b9bf5"),
                        "classic Secret/Attack at dawn vector",
                        uri,
                    )
                    .with_key(b"Secret".to_vec()),
                ],
            },
        }
    }
}

impl Default for Rc4 {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Rc4 {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, _inverse: bool) -> Option<Box<dyn Instance>> {
        // encryption and decryption are the same XOR transform
        Some(Box::new(Rc4Instance {
            key: None,
            pending: Vec::new(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::bytes_to_hex;

    #[test]
    fn test_declared_vectors() {
        for v in Rc4::new().descriptor.vectors.iter() {
            let mut inst = Rc4Instance {
                key: None,
                pending: Vec::new(),
            };
            inst.set_key(v.key.as_ref().unwrap()).unwrap();
            inst.feed(&v.input).unwrap();
            assert_eq!(
                bytes_to_hex(&v.expected),
                bytes_to_hex(&inst.result().unwrap()),
                "{}",
                v.text
            );
        }
    }

    #[test]
    fn test_decrypt_is_encrypt() {
        let mut enc = Rc4Instance {
            key: None,
            pending: Vec::new(),
        };
        enc.set_key(b"Secret").unwrap();
        enc.feed(b"Attack at dawn").unwrap();
        let ciphertext = enc.result().unwrap();

        let mut dec = Rc4Instance {
            key: None,
            pending: Vec::new(),
        };
        dec.set_key(b"Secret").unwrap();
        dec.feed(&ciphertext).unwrap();
        assert_eq!(dec.result().unwrap(), b"Attack at dawn");
    }

    #[test]
    fn test_result_restarts_keystream() {
        let mut inst = Rc4Instance {
            key: None,
            pending: Vec::new(),
        };
        inst.set_key(b"Key").unwrap();
        inst.feed(b"Plaintext").unwrap();
        let first = inst.result().unwrap();

        // the instance is reusable; the keystream starts over
        inst.feed(b"Plaintext").unwrap();
        let second = inst.result().unwrap();
        assert_eq!(first, second);

        // an empty message encrypts to nothing
        assert_eq!(inst.result().unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_chunked_feed_matches_whole() {
        let mut whole = Rc4Instance {
            key: None,
            pending: Vec::new(),
        };
        whole.set_key(b"Wiki").unwrap();
        whole.feed(b"pedia").unwrap();

        let mut split = Rc4Instance {
            key: None,
            pending: Vec::new(),
        };
        split.set_key(b"Wiki").unwrap();
        split.feed(b"pe").unwrap();
        split.feed(b"").unwrap();
        split.feed(b"dia").unwrap();

        assert_eq!(whole.result().unwrap(), split.result().unwrap());
    }

    #[test]
    fn test_key_size_validation() {
        let mut inst = Rc4Instance {
            key: None,
            pending: Vec::new(),
        };
        assert!(inst.set_key(&[]).is_err());
        assert!(inst.set_key(&[0u8; 257]).is_err());
        assert!(inst.set_key(&[0u8; 5]).is_ok());
    }
}
