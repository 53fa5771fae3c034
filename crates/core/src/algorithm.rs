//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Algorithm taxonomy: the descriptor every registered algorithm carries and
//! the uniform streaming-instance contract every primitive honors.
//!
//! Instead of one trait per category with category-shaped methods, there is a
//! single [`Instance`] contract with defaulted setters; an algorithm accepts
//! the setters its category needs and rejects the rest with
//! `InstanceError::InvalidParameter`. Capability discovery happens through
//! the descriptor, not through downcasting.

use crate::error::InstanceError;
use crate::metadata::{
    Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector, Vulnerability,
};

/// Immutable self-description of one registered algorithm.
///
/// Created once at registration and never mutated afterwards; the registry
/// hands out shared references for the life of the process.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Unique display name; lookup is case-insensitive on this.
    pub name: &'static str,
    /// Short slug for machine consumers.
    pub internal_name: &'static str,
    pub category: Category,
    pub sub_category: &'static str,
    pub inventor: &'static str,
    pub year: u16,
    pub country: Country,
    pub description: &'static str,
    pub security_status: SecurityStatus,
    pub complexity: Complexity,
    pub documentation: Vec<LinkItem>,
    pub references: Vec<LinkItem>,
    pub vulnerabilities: Vec<Vulnerability>,
    /// Accepted key sizes in bytes; empty when the category is unkeyed.
    pub key_sizes: Vec<KeySize>,
    /// Processing block sizes in bytes; empty for byte-oriented algorithms.
    pub block_sizes: Vec<KeySize>,
    /// Producible output sizes in bytes.
    pub output_sizes: Vec<KeySize>,
    /// Declared test vectors, in publication order.
    pub vectors: Vec<TestVector>,
}

impl Descriptor {
    /// Canonical lookup key: the case-folded display name.
    pub fn folded_name(&self) -> String {
        self.name.to_ascii_lowercase()
    }
}

/// A registered algorithm: its descriptor plus an instance factory.
pub trait Algorithm: Send + Sync {
    fn descriptor(&self) -> &Descriptor;

    /// Produce a fresh streaming instance bound to this algorithm.
    ///
    /// `inverse = true` requests the decryption/verification direction.
    /// Categories with no inverse (hashes, KDFs) return `None` for that
    /// request; this is the `NotInvertible` sentinel, not an error.
    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>>;

    fn name(&self) -> &'static str {
        self.descriptor().name
    }

    fn category(&self) -> Category {
        self.descriptor().category
    }
}

/// The uniform streaming contract.
///
/// Lifecycle: created, optionally configured (any order, idempotent), zero
/// or more `feed` calls, then `result`. `feed` with an empty slice is a
/// no-op and `feed` never fails on length. What happens after `result` is
/// category policy:
///
/// - hashes, XOFs, and derived functions: `result` is idempotent and a
///   subsequent `feed` silently resets to the post-construction state;
/// - stream ciphers: `result` drains the fed bytes and restarts the
///   keystream, so the instance is immediately reusable;
/// - block ciphers: `result` is idempotent and a subsequent `feed` fails
///   with `FeedAfterFinalize`.
///
/// Instances are exclusively owned and never internally shared; drop zeroes
/// any key material.
pub trait Instance: Send {
    /// Absorb `input`. Output is a function of the concatenation of all fed
    /// bytes, independent of how the caller split them.
    fn feed(&mut self, input: &[u8]) -> Result<(), InstanceError>;

    /// Finalize and return the output bytes.
    fn result(&mut self) -> Result<Vec<u8>, InstanceError>;

    fn set_key(&mut self, _key: &[u8]) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("key"))
    }

    fn set_iv(&mut self, _iv: &[u8]) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("iv"))
    }

    fn set_aad(&mut self, _aad: &[u8]) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("aad"))
    }

    fn set_output_size(&mut self, _size: usize) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("output_size"))
    }

    fn set_customization(&mut self, _customization: &[u8]) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("customization"))
    }

    fn set_xof(&mut self, _xof: bool) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("xof"))
    }

    fn set_tuples(&mut self, _tuples: &[Vec<u8>]) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("tuples"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink;

    impl Instance for Sink {
        fn feed(&mut self, _input: &[u8]) -> Result<(), InstanceError> {
            Ok(())
        }

        fn result(&mut self) -> Result<Vec<u8>, InstanceError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_default_setters_reject() {
        let mut sink = Sink;
        assert!(matches!(
            sink.set_key(&[0; 16]),
            Err(InstanceError::InvalidParameter { name: "key", .. })
        ));
        assert!(matches!(
            sink.set_iv(&[0; 16]),
            Err(InstanceError::InvalidParameter { name: "iv", .. })
        ));
        assert!(matches!(
            sink.set_output_size(32),
            Err(InstanceError::InvalidParameter {
                name: "output_size",
                ..
            })
        ));
        assert!(sink.feed(b"data").is_ok());
    }
}
