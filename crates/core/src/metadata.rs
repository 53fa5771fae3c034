//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Self-describing metadata value types carried by every algorithm
//! descriptor: documentation links, known vulnerabilities, capability size
//! ranges, declared test vectors, and the closed classification enums.
//!
//! Everything here is immutable after construction and serializable for the
//! catalog projection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// A documentation or reference link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkItem {
    pub text: String,
    pub uri: String,
}

impl LinkItem {
    pub fn new(text: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            uri: uri.into(),
        }
    }
}

/// A published weakness of an algorithm, with its suggested mitigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vulnerability {
    pub kind: String,
    pub description: String,
    pub mitigation: String,
}

impl Vulnerability {
    pub fn new(
        kind: impl Into<String>,
        description: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            description: description.into(),
            mitigation: mitigation.into(),
        }
    }
}

/// An inclusive size range in bytes, stepped.
///
/// Invariants: `min <= max`, `step >= 1`, `(max - min) % step == 0`. The
/// constructor validates; a `KeySize` that exists is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySize {
    pub min: usize,
    pub max: usize,
    pub step: usize,
}

impl KeySize {
    pub fn new(min: usize, max: usize, step: usize) -> Result<Self, MetadataError> {
        if min > max || step == 0 || (max - min) % step != 0 {
            return Err(MetadataError::InvalidSizeRange { min, max, step });
        }
        Ok(Self { min, max, step })
    }

    /// A single fixed size.
    pub fn fixed(size: usize) -> Self {
        Self {
            min: size,
            max: size,
            step: 1,
        }
    }

    /// Whether `size` is one of the sizes this range declares.
    pub fn contains(&self, size: usize) -> bool {
        size >= self.min && size <= self.max && (size - self.min) % self.step == 0
    }
}

/// Whether any range in `sizes` admits `size`. An empty declaration admits
/// everything (the algorithm places no constraint).
pub fn size_allowed(sizes: &[KeySize], size: usize) -> bool {
    sizes.is_empty() || sizes.iter().any(|s| s.contains(size))
}

/// A declared test vector: input bytes, expected output bytes, and the
/// category-specific context needed to reproduce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestVector {
    pub input: Vec<u8>,
    pub expected: Vec<u8>,
    pub text: String,
    pub uri: String,
    pub key: Option<Vec<u8>>,
    pub iv: Option<Vec<u8>>,
    pub aad: Option<Vec<u8>>,
    pub output_size: Option<usize>,
    pub customization: Option<Vec<u8>>,
    pub xof: bool,
    pub tuples: Option<Vec<Vec<u8>>>,
}

impl TestVector {
    pub fn new(
        input: impl Into<Vec<u8>>,
        expected: impl Into<Vec<u8>>,
        text: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            expected: expected.into(),
            text: text.into(),
            uri: uri.into(),
            key: None,
            iv: None,
            aad: None,
            output_size: None,
            customization: None,
            xof: false,
            tuples: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<Vec<u8>>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_iv(mut self, iv: impl Into<Vec<u8>>) -> Self {
        self.iv = Some(iv.into());
        self
    }

    pub fn with_aad(mut self, aad: impl Into<Vec<u8>>) -> Self {
        self.aad = Some(aad.into());
        self
    }

    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = Some(output_size);
        self
    }

    pub fn with_customization(mut self, customization: impl Into<Vec<u8>>) -> Self {
        self.customization = Some(customization.into());
        self
    }

    pub fn with_xof(mut self, xof: bool) -> Self {
        self.xof = xof;
        self
    }

    pub fn with_tuples(mut self, tuples: Vec<Vec<u8>>) -> Self {
        self.tuples = Some(tuples);
        self
    }
}

/// Decode a hex literal from a built-in vector table.
///
/// Panics on a malformed literal: the tables are compiled-in constants, so a
/// bad digit is a defect of this crate, not a runtime condition.
pub fn hex_vector(literal: &str) -> Vec<u8> {
    hex::decode(literal).expect("built-in test vector hex literal")
}

/// Algorithm category. Closed set; unknown values fail deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Hash,
    BlockCipher,
    StreamCipher,
    Mac,
    Kdf,
    Aead,
    Padding,
    CipherMode,
    Encoding,
    Compression,
    ErrorCorrection,
    Random,
    Asymmetric,
    Special,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hash => "hash",
            Category::BlockCipher => "block-cipher",
            Category::StreamCipher => "stream-cipher",
            Category::Mac => "mac",
            Category::Kdf => "kdf",
            Category::Aead => "aead",
            Category::Padding => "padding",
            Category::CipherMode => "cipher-mode",
            Category::Encoding => "encoding",
            Category::Compression => "compression",
            Category::ErrorCorrection => "error-correction",
            Category::Random => "random",
            Category::Asymmetric => "asymmetric",
            Category::Special => "special",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hash" => Ok(Category::Hash),
            "block-cipher" => Ok(Category::BlockCipher),
            "stream-cipher" => Ok(Category::StreamCipher),
            "mac" => Ok(Category::Mac),
            "kdf" => Ok(Category::Kdf),
            "aead" => Ok(Category::Aead),
            "padding" => Ok(Category::Padding),
            "cipher-mode" => Ok(Category::CipherMode),
            "encoding" => Ok(Category::Encoding),
            "compression" => Ok(Category::Compression),
            "error-correction" => Ok(Category::ErrorCorrection),
            "random" => Ok(Category::Random),
            "asymmetric" => Ok(Category::Asymmetric),
            "special" => Ok(Category::Special),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// How much trust the algorithm deserves today. Carried verbatim to the
/// catalog so consumers can decide what to expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SecurityStatus {
    Secure,
    Educational,
    Deprecated,
    Broken,
    Experimental,
    Obsolete,
    Unspecified,
}

impl SecurityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityStatus::Secure => "secure",
            SecurityStatus::Educational => "educational",
            SecurityStatus::Deprecated => "deprecated",
            SecurityStatus::Broken => "broken",
            SecurityStatus::Experimental => "experimental",
            SecurityStatus::Obsolete => "obsolete",
            SecurityStatus::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for SecurityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implementation difficulty, for documentation consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Complexity {
    Beginner,
    Intermediate,
    Advanced,
    Research,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Beginner => "beginner",
            Complexity::Intermediate => "intermediate",
            Complexity::Advanced => "advanced",
            Complexity::Research => "research",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Country of origin: ISO-3166-style two-letter codes used by the built-in
/// catalog, plus the `MULTI` and `UNKNOWN` sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    At,
    Be,
    Br,
    Cn,
    De,
    Gb,
    Jp,
    Ru,
    Us,
    Multi,
    Unknown,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::At => "AT",
            Country::Be => "BE",
            Country::Br => "BR",
            Country::Cn => "CN",
            Country::De => "DE",
            Country::Gb => "GB",
            Country::Jp => "JP",
            Country::Ru => "RU",
            Country::Us => "US",
            Country::Multi => "MULTI",
            Country::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_size_invariants() {
        assert!(KeySize::new(16, 32, 8).is_ok());
        assert!(KeySize::new(16, 16, 1).is_ok());
        assert!(KeySize::new(32, 16, 8).is_err()); // min > max
        assert!(KeySize::new(16, 32, 0).is_err()); // step 0
        assert!(KeySize::new(16, 33, 8).is_err()); // span not divisible
    }

    #[test]
    fn test_key_size_contains() {
        let ks = KeySize::new(16, 32, 8).unwrap();
        assert!(ks.contains(16));
        assert!(ks.contains(24));
        assert!(ks.contains(32));
        assert!(!ks.contains(20));
        assert!(!ks.contains(8));
        assert!(!ks.contains(40));

        let fixed = KeySize::fixed(64);
        assert!(fixed.contains(64));
        assert!(!fixed.contains(63));
    }

    #[test]
    fn test_size_allowed() {
        let sizes = [KeySize::fixed(16), KeySize::new(24, 32, 8).unwrap()];
        assert!(size_allowed(&sizes, 16));
        assert!(size_allowed(&sizes, 24));
        assert!(!size_allowed(&sizes, 20));
        // no declaration, no constraint
        assert!(size_allowed(&[], 12345));
    }

    #[test]
    fn test_test_vector_builder() {
        let v = TestVector::new(b"in".to_vec(), b"out".to_vec(), "t", "uri")
            .with_key(vec![1, 2])
            .with_output_size(32)
            .with_xof(true);
        assert_eq!(v.key.as_deref(), Some(&[1u8, 2][..]));
        assert_eq!(v.output_size, Some(32));
        assert!(v.xof);
        assert!(v.iv.is_none());
    }

    #[test]
    fn test_category_round_trip() {
        for cat in [
            Category::Hash,
            Category::BlockCipher,
            Category::StreamCipher,
            Category::ErrorCorrection,
            Category::Special,
        ] {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
            let json = serde_json::to_string(&cat).unwrap();
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, cat);
        }
        assert!("hash-cipher".parse::<Category>().is_err());
        assert!(serde_json::from_str::<Category>("\"rot13\"").is_err());
    }

    #[test]
    fn test_serde_kebab_case_spelling() {
        assert_eq!(
            serde_json::to_string(&Category::BlockCipher).unwrap(),
            "\"block-cipher\""
        );
        assert_eq!(
            serde_json::to_string(&SecurityStatus::Broken).unwrap(),
            "\"broken\""
        );
        assert_eq!(serde_json::to_string(&Country::Multi).unwrap(), "\"MULTI\"");
    }
}
