//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

#![cfg_attr(docsrs, feature(doc_cfg))]

//! # cipherforge Core
//!
//! A polymorphic algorithm framework: one registry, one streaming-instance
//! contract, and a shared low-level operations kernel hosting independent
//! implementations of classic and modern cryptographic primitives.
//!
//! Many registered algorithms are deliberately historical or broken; every
//! descriptor carries a security status tag and consumers decide what to
//! expose. This crate provides no production security guarantees.
//!
//! ## Key Features
//!
//! - **Uniform streaming contract**: feed bytes, obtain a result, with
//!   documented per-category finalize semantics
//! - **Self-describing algorithms**: provenance, capability sizes, safety
//!   tags, documentation links, and test vectors on every descriptor
//! - **Frozen process-wide registry**: case-insensitive lookup, category
//!   filtering, stable insertion order, duplicate-tolerant registration
//! - **Operations kernel**: endian packing, rotations, GF(2^8) arithmetic,
//!   constant-time comparison, secure zeroing
//! - **Built-in vector harness**: every registered algorithm is exercised
//!   against its declared vectors with a structured report
//! - **Memory safety**: key material is zeroized on drop
//!
//! ## Quick Start
//!
//! ```rust
//! use cipherforge_core::{registry, Algorithm, Instance};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let algorithm = registry::shared().find("RIPEMD-128").expect("built-in");
//! let mut instance = algorithm.create_instance(false).expect("hashes run forward");
//!
//! instance.feed(b"abc")?;
//! let digest = instance.result()?;
//! assert_eq!(hex::encode(digest), "c14a12199c66e4ba84636b0f69144c77");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`ops`] - the numeric operations kernel every primitive imports
//! - [`metadata`] - descriptor value types and classification enums
//! - [`algorithm`] - the algorithm taxonomy and streaming contract
//! - [`registry`] - process-wide algorithm lookup
//! - [`stream`] - block absorption shared by block-structured primitives
//! - [`padding`] - Merkle-Damgard tails and SP 800-185 length encodings
//! - [`primitives`] - the built-in algorithm adapters
//! - [`vectors`] - the declared-vector test harness
//! - [`catalog`] - the read-only projection for downstream consumers

pub mod algorithm;
pub mod catalog;
pub mod error;
pub mod metadata;
pub mod ops;
pub mod padding;
pub mod primitives;
pub mod registry;
pub mod stream;
pub mod vectors;

pub use algorithm::{Algorithm, Descriptor, Instance};
pub use catalog::{list_algorithms, AlgorithmSummary, VectorSummary};
pub use error::{CipherForgeError, InstanceError, KernelError, MetadataError};
pub use metadata::{
    Category, Complexity, Country, KeySize, LinkItem, SecurityStatus, TestVector, Vulnerability,
};
pub use registry::AlgorithmRegistry;
pub use vectors::{AlgorithmReport, HarnessReport, VectorOutcome};
