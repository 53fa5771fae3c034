//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! External interface layer: a stable, read-only projection of the registry
//! for downstream consumers (UIs, code generators, documentation tooling).
//!
//! [`vectors`] hands out the declared `TestVector`s themselves; the
//! serializable summary types render byte fields as hex strings for
//! consumers that want plain data. The rest of the framework is internal to
//! embedders.

use serde::Serialize;

use crate::algorithm::{Algorithm, Descriptor};
use crate::metadata::{
    Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector, Vulnerability,
};
use crate::ops::bytes_to_hex;
use crate::registry::AlgorithmRegistry;

/// One algorithm's public metadata.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmSummary {
    pub name: String,
    pub internal_name: String,
    pub category: Category,
    pub sub_category: String,
    pub security_status: SecurityStatus,
    pub complexity: Complexity,
    pub country: Country,
    pub year: u16,
    pub inventor: String,
    pub description: String,
    pub documentation: Vec<LinkItem>,
    pub references: Vec<LinkItem>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub key_sizes: Vec<KeySize>,
    pub block_sizes: Vec<KeySize>,
    pub output_sizes: Vec<KeySize>,
    pub vector_count: usize,
}

impl From<&Descriptor> for AlgorithmSummary {
    fn from(d: &Descriptor) -> Self {
        Self {
            name: d.name.to_string(),
            internal_name: d.internal_name.to_string(),
            category: d.category,
            sub_category: d.sub_category.to_string(),
            security_status: d.security_status,
            complexity: d.complexity,
            country: d.country,
            year: d.year,
            inventor: d.inventor.to_string(),
            description: d.description.to_string(),
            documentation: d.documentation.clone(),
            references: d.references.clone(),
            vulnerabilities: d.vulnerabilities.clone(),
            key_sizes: d.key_sizes.clone(),
            block_sizes: d.block_sizes.clone(),
            output_sizes: d.output_sizes.clone(),
            vector_count: d.vectors.len(),
        }
    }
}

/// One declared vector with byte fields rendered as hex.
#[derive(Debug, Clone, Serialize)]
pub struct VectorSummary {
    pub text: String,
    pub uri: String,
    pub input: String,
    pub expected: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customization: Option<String>,
    pub xof: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuples: Option<Vec<String>>,
}

impl From<&TestVector> for VectorSummary {
    fn from(v: &TestVector) -> Self {
        Self {
            text: v.text.clone(),
            uri: v.uri.clone(),
            input: bytes_to_hex(&v.input),
            expected: bytes_to_hex(&v.expected),
            key: v.key.as_deref().map(bytes_to_hex),
            iv: v.iv.as_deref().map(bytes_to_hex),
            aad: v.aad.as_deref().map(bytes_to_hex),
            output_size: v.output_size,
            customization: v.customization.as_deref().map(bytes_to_hex),
            xof: v.xof,
            tuples: v
                .tuples
                .as_ref()
                .map(|t| t.iter().map(|e| bytes_to_hex(e)).collect()),
        }
    }
}

/// Summaries of every registered algorithm, in registration order.
pub fn list_algorithms(registry: &AlgorithmRegistry) -> Vec<AlgorithmSummary> {
    registry
        .all()
        .iter()
        .map(|a| AlgorithmSummary::from(a.descriptor()))
        .collect()
}

/// The declared vectors of one algorithm, or `None` for an unknown name.
///
/// Returns the raw `TestVector` slice so consumers keep access to the real
/// byte fields; render with [`VectorSummary`] where hex is wanted.
pub fn vectors<'a>(registry: &'a AlgorithmRegistry, name: &str) -> Option<&'a [TestVector]> {
    let folded = name.to_ascii_lowercase();
    registry
        .all()
        .iter()
        .find(|algorithm| algorithm.descriptor().folded_name() == folded)
        .map(|algorithm| algorithm.descriptor().vectors.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_list_matches_registry_order() {
        let reg = registry::shared();
        let summaries = list_algorithms(reg);
        assert_eq!(summaries.len(), reg.len());
        for (summary, algorithm) in summaries.iter().zip(reg.all()) {
            assert_eq!(summary.name, algorithm.name());
            assert_eq!(summary.vector_count, algorithm.descriptor().vectors.len());
        }
    }

    #[test]
    fn test_vectors_projection() {
        let reg = registry::shared();
        let declared = vectors(reg, "rc4").unwrap();
        assert_eq!(declared.len(), 3);
        assert_eq!(declared[0].key.as_deref(), Some(&b"Key"[..]));
        assert!(declared[0].iv.is_none());

        // lookup is case-insensitive, like the registry's
        assert_eq!(vectors(reg, "RC4").unwrap().len(), 3);
        assert!(vectors(reg, "unknown").is_none());

        // hex rendering happens at the summary layer, not in the accessor
        let summaries: Vec<VectorSummary> =
            declared.iter().map(VectorSummary::from).collect();
        assert_eq!(summaries[0].key.as_deref(), Some("4b6579"));
    }

    #[test]
    fn test_summary_serializes_with_status_tags() {
        let reg = registry::shared();
        let json = serde_json::to_string(&list_algorithms(reg)).unwrap();
        assert!(json.contains("\"security_status\":\"broken\""));
        assert!(json.contains("\"category\":\"block-cipher\""));
    }
}
