//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

use cipherforge_core::{AlgorithmReport, HarnessReport};

/// Exit codes for the cipherforge shell
#[repr(u8)]
#[allow(dead_code)]
pub enum ExitCode {
    /// Success
    Ok = 0,
    /// Named algorithm is not registered
    UnknownAlgorithm = 2,
    /// Parameter validation failure (key/iv/output size/hex input)
    InvalidParameter = 3,
    /// One or more declared vectors did not match in test mode
    VectorMismatch = 4,
}

impl ExitCode {
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }
}

/// Render one algorithm's vector results in the text format.
pub fn print_algorithm_report(report: &AlgorithmReport) {
    let marker = if report.all_passed() { "✔" } else { "✖" };
    println!(
        "{} {} ({}/{} vectors, {} ms)",
        marker, report.algorithm, report.passed, report.total, report.duration_ms
    );
    for outcome in &report.outcomes {
        if outcome.passed {
            continue;
        }
        println!("   ✖ vector {}: {}", outcome.index, outcome.text);
        if let Some(error) = &outcome.error {
            println!("     error: {error}");
        }
        if let Some(mismatch) = &outcome.mismatch {
            println!("     first difference at byte {}", mismatch.first_diff);
            println!("     expected: {}", mismatch.expected);
            println!("     actual:   {}", mismatch.actual);
        }
    }
}

/// Render the whole-registry summary line.
pub fn print_harness_summary(report: &HarnessReport) {
    println!(
        "● {} algorithms, {} vectors: {} passed, {} failed ({} ms)",
        report.algorithms, report.vectors, report.passed, report.failed, report.duration_ms
    );
}
