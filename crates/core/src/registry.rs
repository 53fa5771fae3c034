//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Process-wide algorithm registry.
//!
//! Registration happens in a single startup phase; afterwards the registry
//! is read-only and lookups are lock-free. The [`shared`] accessor freezes
//! the default catalog behind a `OnceLock` on first use.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::algorithm::Algorithm;
use crate::metadata::Category;
use crate::primitives;

/// Registry for looking up algorithms by name or category.
///
/// Iteration order is registration order, stable. Lookup is case-insensitive
/// and O(1) expected.
pub struct AlgorithmRegistry {
    entries: Vec<Arc<dyn Algorithm>>,
    index: HashMap<String, usize>,
}

impl AlgorithmRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a registry with every built-in algorithm registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for algorithm in primitives::builtin() {
            registry.register(algorithm);
        }
        registry
    }

    /// Register an algorithm.
    ///
    /// Idempotent by case-folded name: a second registration under a name
    /// already present is silently ignored so double-loads are harmless.
    /// Returns whether an insertion occurred.
    pub fn register(&mut self, algorithm: Arc<dyn Algorithm>) -> bool {
        let key = algorithm.descriptor().folded_name();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.entries.len());
        self.entries.push(algorithm);
        true
    }

    /// Look up an algorithm by name, case-insensitively.
    ///
    /// `None` is the only signal of absence.
    pub fn find(&self, name: &str) -> Option<Arc<dyn Algorithm>> {
        self.index
            .get(&name.to_ascii_lowercase())
            .map(|&i| Arc::clone(&self.entries[i]))
    }

    /// All algorithms of one category, in registration order.
    pub fn find_by_category(&self, category: Category) -> Vec<Arc<dyn Algorithm>> {
        self.entries
            .iter()
            .filter(|a| a.descriptor().category == category)
            .cloned()
            .collect()
    }

    /// All registered algorithms, in registration order.
    pub fn all(&self) -> &[Arc<dyn Algorithm>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static SHARED_REGISTRY: OnceLock<AlgorithmRegistry> = OnceLock::new();

/// The process-wide registry of built-in algorithms.
///
/// Built on first access and frozen afterwards; all subsequent reads are
/// lock-free.
pub fn shared() -> &'static AlgorithmRegistry {
    SHARED_REGISTRY.get_or_init(AlgorithmRegistry::with_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = AlgorithmRegistry::with_defaults();
        assert!(!registry.is_empty());
        assert!(registry.find("RIPEMD-128").is_some());
        assert!(registry.find("Rijndael").is_some());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let registry = AlgorithmRegistry::with_defaults();
        let a = registry.find("whirlpool").unwrap();
        let b = registry.find("WHIRLPOOL").unwrap();
        let c = registry.find("WhIrLpOoL").unwrap();
        assert_eq!(a.name(), b.name());
        assert_eq!(b.name(), c.name());
    }

    #[test]
    fn test_duplicate_registration_is_ignored() {
        let mut registry = AlgorithmRegistry::new();
        let algorithm = AlgorithmRegistry::with_defaults().find("SHA-256").unwrap();
        assert!(registry.register(Arc::clone(&algorithm)));
        assert!(!registry.register(algorithm));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_iteration_is_registration_order() {
        let defaults = AlgorithmRegistry::with_defaults();
        let mut registry = AlgorithmRegistry::new();
        let b = defaults.find("Whirlpool").unwrap();
        let a = defaults.find("SHA-256").unwrap();
        registry.register(b);
        registry.register(a);
        let names: Vec<_> = registry.all().iter().map(|x| x.name()).collect();
        assert_eq!(names, vec!["Whirlpool", "SHA-256"]);
    }

    #[test]
    fn test_find_by_category() {
        let registry = AlgorithmRegistry::with_defaults();
        let hashes = registry.find_by_category(Category::Hash);
        assert!(!hashes.is_empty());
        assert!(hashes
            .iter()
            .all(|a| a.descriptor().category == Category::Hash));

        let ciphers = registry.find_by_category(Category::BlockCipher);
        assert!(ciphers.iter().any(|a| a.name() == "Rijndael"));
    }

    #[test]
    fn test_unknown_name_is_none() {
        let registry = AlgorithmRegistry::with_defaults();
        assert!(registry.find("no-such-algorithm").is_none());
    }

    #[test]
    fn test_shared_registry_is_stable() {
        let first = shared();
        let second = shared();
        assert_eq!(first.len(), second.len());
        assert!(std::ptr::eq(first, second));
    }
}
