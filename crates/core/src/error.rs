//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Unified error hierarchy for the cipherforge workspace.
//!
//! Errors are local: they surface at the call site and are never retried or
//! swallowed, with one documented exception (duplicate registration, which is
//! intentionally a silent no-op). Two absence conditions are deliberately not
//! errors: an unknown algorithm name is a `None` from the registry, and a
//! request for an inverse instance of a non-invertible category is a `None`
//! from the factory.

use thiserror::Error;

/// Top-level unified error type for cipherforge operations
#[derive(Error, Debug)]
pub enum CipherForgeError {
    #[error("kernel operation failed")]
    Kernel(#[from] KernelError),

    #[error("metadata validation failed")]
    Metadata(#[from] MetadataError),

    #[error("instance operation failed")]
    Instance(#[from] InstanceError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the operations kernel conversion functions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    #[error("invalid hex encoding: {0}")]
    InvalidEncoding(String),

    #[error("non-ASCII character at byte offset {0}")]
    NonAscii(usize),
}

/// Errors raised while constructing metadata value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    #[error("invalid size range: min {min}, max {max}, step {step}")]
    InvalidSizeRange { min: usize, max: usize, step: usize },
}

/// Errors raised by streaming instances
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InstanceError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("no key configured")]
    MissingKey,

    #[error("input is not a whole number of blocks ({remainder} trailing bytes)")]
    IncompleteBlock { remainder: usize },

    #[error("feed after finalize")]
    FeedAfterFinalize,

    #[error("authentication failed")]
    AuthenticationFailed,
}

impl InstanceError {
    /// Rejection for a setter the algorithm's category does not accept.
    pub fn unsupported(name: &'static str) -> Self {
        InstanceError::InvalidParameter {
            name,
            reason: "not accepted by this algorithm".into(),
        }
    }
}
