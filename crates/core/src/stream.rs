//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Streaming instance runtime: the block-absorption state machine shared by
//! every block-structured primitive, and the digest-family overlay that turns
//! a compression core into a full [`Instance`](crate::Instance).

use crate::algorithm::Instance;
use crate::error::InstanceError;

/// Fixed-capacity block accumulator with a running total byte count.
///
/// `feed` hands every complete block to the compression closure, compressing
/// directly from the caller's slice once the internal buffer has been
/// satisfied, so large inputs are not copied byte-by-byte. The buffer fill
/// level is always strictly below the block length between calls.
#[derive(Debug, Clone)]
pub struct BlockBuffer {
    block: Vec<u8>,
    filled: usize,
    total: u64,
}

impl BlockBuffer {
    pub fn new(block_len: usize) -> Self {
        debug_assert!(block_len > 0);
        Self {
            block: vec![0u8; block_len],
            filled: 0,
            total: 0,
        }
    }

    pub fn block_len(&self) -> usize {
        self.block.len()
    }

    /// Bytes currently buffered (always `< block_len`).
    pub fn filled(&self) -> usize {
        self.filled
    }

    /// The buffered partial block.
    pub fn remainder(&self) -> &[u8] {
        &self.block[..self.filled]
    }

    /// Total bytes absorbed since construction or the last reset.
    pub fn total_bytes(&self) -> u64 {
        self.total
    }

    /// Absorb `input`, invoking `compress` once per completed block.
    pub fn feed(&mut self, input: &[u8], mut compress: impl FnMut(&[u8])) {
        self.total = self.total.wrapping_add(input.len() as u64);
        let block_len = self.block.len();
        let mut rest = input;

        if self.filled > 0 {
            let need = block_len - self.filled;
            if rest.len() < need {
                self.block[self.filled..self.filled + rest.len()].copy_from_slice(rest);
                self.filled += rest.len();
                return;
            }
            self.block[self.filled..].copy_from_slice(&rest[..need]);
            compress(&self.block);
            self.filled = 0;
            rest = &rest[need..];
        }

        let mut chunks = rest.chunks_exact(block_len);
        for chunk in &mut chunks {
            compress(chunk);
        }
        let tail = chunks.remainder();
        self.block[..tail.len()].copy_from_slice(tail);
        self.filled = tail.len();
    }

    /// Return to the post-construction state.
    pub fn reset(&mut self) {
        self.block.fill(0);
        self.filled = 0;
        self.total = 0;
    }
}

/// A digest-family compression core: everything an [`Instance`] needs except
/// the shared finalize bookkeeping.
///
/// `digest` must be pure with respect to `self` (cores clone their state
/// internally), so repeated `result` calls observe identical bytes and the
/// absorbed input is never disturbed.
pub(crate) trait DigestCore: Clone + Send {
    fn absorb(&mut self, input: &[u8]);

    fn digest(&self) -> Vec<u8>;

    /// Return to the post-construction state, keeping configuration.
    fn reset(&mut self);

    fn set_key(&mut self, _key: &[u8]) -> Result<(), InstanceError> {
        Err(InstanceError::unsupported("key"))
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

/// The hash/XOF/derived-function overlay on a [`DigestCore`].
///
/// Implements the per-category finalize policy: `result` is idempotent (the
/// digest is cached) and `feed` after `result` silently resets the core.
pub(crate) struct DigestStream<C: DigestCore> {
    core: C,
    cached: Option<Vec<u8>>,
}

impl<C: DigestCore + 'static> DigestStream<C> {
    pub(crate) fn boxed(core: C) -> Box<dyn Instance> {
        Box::new(Self { core, cached: None })
    }
}

impl<C: DigestCore + 'static> Instance for DigestStream<C> {
    fn feed(&mut self, input: &[u8]) -> Result<(), InstanceError> {
        if self.cached.take().is_some() {
            self.core.reset();
        }
        self.core.absorb(input);
        Ok(())
    }

    fn result(&mut self) -> Result<Vec<u8>, InstanceError> {
        if let Some(digest) = &self.cached {
            return Ok(digest.clone());
        }
        let digest = self.core.digest();
        self.cached = Some(digest.clone());
        Ok(digest)
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), InstanceError> {
        self.cached = None;
        self.core.set_key(key)
    }

    fn set_output_size(&mut self, size: usize) -> Result<(), InstanceError> {
        self.cached = None;
        self.core.set_output_size(size)
    }

    fn set_customization(&mut self, customization: &[u8]) -> Result<(), InstanceError> {
        self.cached = None;
        self.core.set_customization(customization)
    }

    fn set_xof(&mut self, xof: bool) -> Result<(), InstanceError> {
        self.cached = None;
        self.core.set_xof(xof)
    }

    fn set_tuples(&mut self, tuples: &[Vec<u8>]) -> Result<(), InstanceError> {
        self.cached = None;
        self.core.set_tuples(tuples)
    }
}
