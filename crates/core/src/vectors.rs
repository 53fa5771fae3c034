//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Test-vector harness: drive every registered algorithm against its
//! declared vectors and produce a structured, serializable report.
//!
//! For each vector a fresh instance is created, the vector's context is
//! applied (key, IV, AAD, output size, customization, XOF flag, tuples),
//! the input is fed, and the result is compared byte-for-byte. Results are
//! independent of run order and thread count because nothing is shared
//! between instances.

use std::time::Instant;

use serde::Serialize;

use crate::algorithm::{Algorithm, Instance};
use crate::error::InstanceError;
use crate::metadata::TestVector;
use crate::ops::bytes_to_hex;
use crate::registry::AlgorithmRegistry;

/// First point of disagreement between expected and actual output.
#[derive(Debug, Serialize)]
pub struct Mismatch {
    /// Byte offset of the first differing byte (the shorter length when one
    /// output is a prefix of the other).
    pub first_diff: usize,
    pub expected: String,
    pub actual: String,
}

/// Outcome of one `(algorithm, vector)` pair.
#[derive(Debug, Serialize)]
pub struct VectorOutcome {
    pub index: usize,
    pub text: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mismatch: Option<Mismatch>,
}

/// Per-algorithm aggregate.
#[derive(Debug, Serialize)]
pub struct AlgorithmReport {
    pub algorithm: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub outcomes: Vec<VectorOutcome>,
}

impl AlgorithmReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Whole-registry aggregate.
#[derive(Debug, Serialize)]
pub struct HarnessReport {
    pub algorithms: usize,
    pub vectors: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u64,
    pub reports: Vec<AlgorithmReport>,
}

impl HarnessReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Apply a vector's declared context to a fresh instance.
pub fn apply_context(
    instance: &mut dyn Instance,
    vector: &TestVector,
) -> Result<(), InstanceError> {
    if let Some(key) = &vector.key {
        instance.set_key(key)?;
    }
    if let Some(iv) = &vector.iv {
        instance.set_iv(iv)?;
    }
    if let Some(aad) = &vector.aad {
        instance.set_aad(aad)?;
    }
    if let Some(customization) = &vector.customization {
        instance.set_customization(customization)?;
    }
    if let Some(size) = vector.output_size {
        instance.set_output_size(size)?;
    }
    if vector.xof {
        instance.set_xof(true)?;
    }
    if let Some(tuples) = &vector.tuples {
        instance.set_tuples(tuples)?;
    }
    Ok(())
}

fn first_diff(expected: &[u8], actual: &[u8]) -> usize {
    expected
        .iter()
        .zip(actual.iter())
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()))
}

fn run_vector(algorithm: &dyn Algorithm, index: usize, vector: &TestVector) -> VectorOutcome {
    let mut outcome = VectorOutcome {
        index,
        text: vector.text.clone(),
        passed: false,
        error: None,
        mismatch: None,
    };

    let Some(mut instance) = algorithm.create_instance(false) else {
        outcome.error = Some("algorithm produced no forward instance".into());
        return outcome;
    };

    let run = (|| -> Result<Vec<u8>, InstanceError> {
        apply_context(instance.as_mut(), vector)?;
        instance.feed(&vector.input)?;
        instance.result()
    })();

    match run {
        Ok(actual) if actual == vector.expected => outcome.passed = true,
        Ok(actual) => {
            outcome.mismatch = Some(Mismatch {
                first_diff: first_diff(&vector.expected, &actual),
                expected: bytes_to_hex(&vector.expected),
                actual: bytes_to_hex(&actual),
            });
        }
        Err(err) => outcome.error = Some(err.to_string()),
    }
    outcome
}

/// Run every declared vector of one algorithm.
pub fn run_algorithm(algorithm: &dyn Algorithm) -> AlgorithmReport {
    let started = Instant::now();
    let descriptor = algorithm.descriptor();
    let outcomes: Vec<VectorOutcome> = descriptor
        .vectors
        .iter()
        .enumerate()
        .map(|(i, v)| run_vector(algorithm, i, v))
        .collect();

    let passed = outcomes.iter().filter(|o| o.passed).count();
    AlgorithmReport {
        algorithm: descriptor.name.to_string(),
        total: outcomes.len(),
        passed,
        failed: outcomes.len() - passed,
        duration_ms: started.elapsed().as_millis() as u64,
        outcomes,
    }
}

/// Run every declared vector of every registered algorithm.
pub fn run_all(registry: &AlgorithmRegistry) -> HarnessReport {
    let started = Instant::now();
    let reports: Vec<AlgorithmReport> = registry
        .all()
        .iter()
        .map(|algorithm| run_algorithm(algorithm.as_ref()))
        .collect();

    let vectors = reports.iter().map(|r| r.total).sum();
    let passed = reports.iter().map(|r| r.passed).sum();
    let failed = reports.iter().map(|r| r.failed).sum();
    HarnessReport {
        algorithms: reports.len(),
        vectors,
        passed,
        failed,
        duration_ms: started.elapsed().as_millis() as u64,
        reports,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn test_every_declared_vector_passes() {
        let report = run_all(registry::shared());
        assert!(report.algorithms > 0);
        assert!(report.vectors > 0);
        assert!(
            report.all_passed(),
            "vector failures:\n{}",
            serde_json::to_string_pretty(&report).unwrap_or_default()
        );
    }

    #[test]
    fn test_first_diff_position() {
        assert_eq!(first_diff(b"abc", b"abd"), 2);
        assert_eq!(first_diff(b"abc", b"abc"), 3);
        assert_eq!(first_diff(b"abc", b"ab"), 2);
        assert_eq!(first_diff(b"", b"x"), 0);
    }

    #[test]
    fn test_report_serializes() {
        let report = run_all(registry::shared());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"algorithms\""));
        assert!(json.contains("RIPEMD-128"));
    }
}
