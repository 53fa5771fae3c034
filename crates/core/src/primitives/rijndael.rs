//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Rijndael per FIPS 197, kept at its originally submitted generality:
//! block and key sizes of 16 to 32 bytes in 4-byte steps (AES is the
//! 16-byte-block restriction). `Nr = max(Nb, Nk) + 6`; the ShiftRows
//! offsets grow with the block width.
//!
//! The S-box pair is generated once from the field inverse and the affine
//! transform and shared as an immutable table. Instances transform raw
//! whole blocks; chaining modes are a separate category. Round keys are
//! zeroized on drop.

use std::sync::OnceLock;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::algorithm::{Algorithm, Descriptor, Instance};
use crate::error::InstanceError;
use crate::metadata::{
    hex_vector, size_allowed, Category, Complexity, Country, KeySize, LinkItem, SecurityStatus,
    TestVector,
};
use crate::ops;

const DEFAULT_BLOCK_LEN: usize = 16;

static SBOXES: OnceLock<([u8; 256], [u8; 256])> = OnceLock::new();

fn gf_pow(mut base: u8, mut exp: u32) -> u8 {
    let mut acc = 1u8;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = ops::gf256_mul(acc, base);
        }
        base = ops::gf256_mul(base, base);
        exp >>= 1;
    }
    acc
}

/// Forward and inverse S-boxes: multiplicative inverse in GF(2^8) followed
/// by the FIPS 197 affine transform.
fn sboxes() -> &'static ([u8; 256], [u8; 256]) {
    SBOXES.get_or_init(|| {
        let mut forward = [0u8; 256];
        let mut inverse = [0u8; 256];
        for x in 0..=255u8 {
            let inv = gf_pow(x, 254);
            let s = inv
                ^ inv.rotate_left(1)
                ^ inv.rotate_left(2)
                ^ inv.rotate_left(3)
                ^ inv.rotate_left(4)
                ^ 0x63;
            forward[x as usize] = s;
            inverse[s as usize] = x;
        }
        (forward, inverse)
    })
}

fn sub_word(w: u32) -> u32 {
    let (forward, _) = sboxes();
    let b = w.to_be_bytes();
    u32::from_be_bytes([
        forward[b[0] as usize],
        forward[b[1] as usize],
        forward[b[2] as usize],
        forward[b[3] as usize],
    ])
}

/// ShiftRows offsets per row for a given block width in columns.
fn shift_offsets(nb: usize) -> [usize; 4] {
    match nb {
        4..=6 => [0, 1, 2, 3],
        7 => [0, 1, 2, 4],
        _ => [0, 1, 3, 4],
    }
}

/// Expanded round keys, flat bytes in column order. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
struct KeySchedule {
    round_keys: Vec<u8>,
    nb: usize,
    nr: usize,
}

impl KeySchedule {
    fn expand(key: &[u8], block_len: usize) -> Self {
        let nk = key.len() / 4;
        let nb = block_len / 4;
        let nr = nk.max(nb) + 6;

        let total_words = nb * (nr + 1);
        let mut w = vec![0u32; total_words];
        for (i, word) in w.iter_mut().take(nk).enumerate() {
            *word = ops::load_u32_be(&key[i * 4..]);
        }

        let mut rcon = 1u8;
        for i in nk..total_words {
            let mut temp = w[i - 1];
            if i % nk == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ ((rcon as u32) << 24);
                rcon = ops::xtime(rcon);
            } else if nk > 6 && i % nk == 4 {
                temp = sub_word(temp);
            }
            w[i] = w[i - nk] ^ temp;
        }

        let mut round_keys = vec![0u8; total_words * 4];
        for (i, word) in w.iter().enumerate() {
            round_keys[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
        }
        ops::clear_words32(&mut w);
        Self { round_keys, nb, nr }
    }

    /// Round key `r` as column-ordered bytes.
    fn round_key(&self, r: usize) -> &[u8] {
        &self.round_keys[r * self.nb * 4..(r + 1) * self.nb * 4]
    }
}

fn add_round_key(state: &mut [u8], key: &[u8]) {
    for (s, k) in state.iter_mut().zip(key.iter()) {
        *s ^= k;
    }
}

fn sub_bytes(state: &mut [u8], table: &[u8; 256]) {
    for byte in state.iter_mut() {
        *byte = table[*byte as usize];
    }
}

fn shift_rows(state: &mut [u8], nb: usize, inverse: bool) {
    let offsets = shift_offsets(nb);
    let mut row = vec![0u8; nb];
    for (r, &off) in offsets.iter().enumerate().skip(1) {
        for c in 0..nb {
            row[c] = state[c * 4 + r];
        }
        for c in 0..nb {
            let src = if inverse {
                (c + nb - off) % nb
            } else {
                (c + off) % nb
            };
            state[c * 4 + r] = row[src];
        }
    }
}

fn mix_columns(state: &mut [u8], nb: usize) {
    for c in 0..nb {
        let col = &state[c * 4..c * 4 + 4];
        let mixed = [
            ops::xtime(col[0]) ^ ops::gf256_mul(col[1], 3) ^ col[2] ^ col[3],
            col[0] ^ ops::xtime(col[1]) ^ ops::gf256_mul(col[2], 3) ^ col[3],
            col[0] ^ col[1] ^ ops::xtime(col[2]) ^ ops::gf256_mul(col[3], 3),
            ops::gf256_mul(col[0], 3) ^ col[1] ^ col[2] ^ ops::xtime(col[3]),
        ];
        state[c * 4..c * 4 + 4].copy_from_slice(&mixed);
    }
}

fn inv_mix_columns(state: &mut [u8], nb: usize) {
    for c in 0..nb {
        let col = &state[c * 4..c * 4 + 4];
        let mixed = [
            ops::gf256_mul(col[0], 0x0E)
                ^ ops::gf256_mul(col[1], 0x0B)
                ^ ops::gf256_mul(col[2], 0x0D)
                ^ ops::gf256_mul(col[3], 0x09),
            ops::gf256_mul(col[0], 0x09)
                ^ ops::gf256_mul(col[1], 0x0E)
                ^ ops::gf256_mul(col[2], 0x0B)
                ^ ops::gf256_mul(col[3], 0x0D),
            ops::gf256_mul(col[0], 0x0D)
                ^ ops::gf256_mul(col[1], 0x09)
                ^ ops::gf256_mul(col[2], 0x0E)
                ^ ops::gf256_mul(col[3], 0x0B),
            ops::gf256_mul(col[0], 0x0B)
                ^ ops::gf256_mul(col[1], 0x0D)
                ^ ops::gf256_mul(col[2], 0x09)
                ^ ops::gf256_mul(col[3], 0x0E),
        ];
        state[c * 4..c * 4 + 4].copy_from_slice(&mixed);
    }
}

fn encrypt_block(schedule: &KeySchedule, block: &mut [u8]) {
    let (forward, _) = sboxes();
    let nb = schedule.nb;
    add_round_key(block, schedule.round_key(0));
    for r in 1..schedule.nr {
        sub_bytes(block, forward);
        shift_rows(block, nb, false);
        mix_columns(block, nb);
        add_round_key(block, schedule.round_key(r));
    }
    sub_bytes(block, forward);
    shift_rows(block, nb, false);
    add_round_key(block, schedule.round_key(schedule.nr));
}

fn decrypt_block(schedule: &KeySchedule, block: &mut [u8]) {
    let (_, inverse) = sboxes();
    let nb = schedule.nb;
    add_round_key(block, schedule.round_key(schedule.nr));
    for r in (1..schedule.nr).rev() {
        shift_rows(block, nb, true);
        sub_bytes(block, inverse);
        add_round_key(block, schedule.round_key(r));
        inv_mix_columns(block, nb);
    }
    shift_rows(block, nb, true);
    sub_bytes(block, inverse);
    add_round_key(block, schedule.round_key(0));
}

/// A streaming Rijndael instance: buffers fed bytes, transforms whole
/// blocks at `result`. Block-cipher finalize policy: `result` is idempotent
/// and `feed` after `result` is an error.
struct RijndaelInstance {
    decrypt: bool,
    block_len: usize,
    key_sizes: Vec<KeySize>,
    schedule: Option<KeySchedule>,
    pending: Vec<u8>,
    finished: Option<Vec<u8>>,
}

impl RijndaelInstance {
    fn new(block_len: usize, decrypt: bool) -> Self {
        Self {
            decrypt,
            block_len,
            key_sizes: key_sizes(),
            schedule: None,
            pending: Vec::new(),
            finished: None,
        }
    }
}

impl Instance for RijndaelInstance {
    fn feed(&mut self, input: &[u8]) -> Result<(), InstanceError> {
        if self.finished.is_some() {
            return Err(InstanceError::FeedAfterFinalize);
        }
        self.pending.extend_from_slice(input);
        Ok(())
    }

    fn result(&mut self) -> Result<Vec<u8>, InstanceError> {
        if let Some(out) = &self.finished {
            return Ok(out.clone());
        }
        let schedule = self.schedule.as_ref().ok_or(InstanceError::MissingKey)?;
        let remainder = self.pending.len() % self.block_len;
        if remainder != 0 {
            return Err(InstanceError::IncompleteBlock { remainder });
        }

        let mut out = self.pending.clone();
        for block in out.chunks_exact_mut(self.block_len) {
            if self.decrypt {
                decrypt_block(schedule, block);
            } else {
                encrypt_block(schedule, block);
            }
        }
        self.finished = Some(out.clone());
        Ok(out)
    }

    fn set_key(&mut self, key: &[u8]) -> Result<(), InstanceError> {
        if self.finished.is_some() {
            return Err(InstanceError::FeedAfterFinalize);
        }
        if !size_allowed(&self.key_sizes, key.len()) {
            return Err(InstanceError::InvalidParameter {
                name: "key",
                reason: format!("{} bytes outside the declared sizes", key.len()),
            });
        }
        self.schedule = Some(KeySchedule::expand(key, self.block_len));
        Ok(())
    }
}

fn key_sizes() -> Vec<KeySize> {
    vec![KeySize::new(16, 32, 4).expect("static size range")]
}

/// Rijndael algorithm registration (AES block width).
pub struct Rijndael {
    descriptor: Descriptor,
}

impl Rijndael {
    pub fn new() -> Self {
        let uri = "https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.197-upd1.pdf";
        Self {
            descriptor: Descriptor {
                name: "Rijndael",
                internal_name: "rijndael",
                category: Category::BlockCipher,
                sub_category: "substitution-permutation",
                inventor: "Joan Daemen, Vincent Rijmen",
                year: 1998,
                country: Country::Be,
                description: "The AES winner at its full generality: 128-bit block \
                              (wider blocks supported internally), 128/160/192/224/\
                              256-bit keys, 10 to 14 rounds.",
                security_status: SecurityStatus::Secure,
                complexity: Complexity::Advanced,
                documentation: vec![LinkItem::new(
                    "FIPS 197: Advanced Encryption Standard",
                    uri,
                )],
                references: vec![LinkItem::new(
                    "The design of Rijndael",
                    "https://cs.ru.nl/~joan/papers/JDA_VRI_Rijndael_2002.pdf",
                )],
                vulnerabilities: vec![],
                key_sizes: key_sizes(),
                block_sizes: vec![KeySize::new(16, 32, 4).expect("static size range")],
                output_sizes: vec![],
                vectors: vec![
                    TestVector::new(
                        hex_vector("00112233445566778899aabbccddeeff"),
                        hex_vector("69c4e0d86a7b0430d8cdb78070b4c55a"),
                        "FIPS 197 appendix C.1 (AES-128)",
                        uri,
                    )
                    .with_key(hex_vector("000102030405060708090a0b0c0d0e0f")),
                    TestVector::new(
                        hex_vector("00112233445566778899aabbccddeeff"),
                        hex_vector("dda97ca4864cdfe06eaf70a0ec0d7191"),
                        "FIPS 197 appendix C.2 (AES-192)",
                        uri,
                    )
                    .with_key(hex_vector("000102030405060708090a0b0c0d0e0f1011121314151617")),
                    TestVector::new(
                        hex_vector("00112233445566778899aabbccddeeff"),
                        hex_vector("8ea2b7ca516745bfeafc49904b496089"),
                        "FIPS 197 appendix C.3 (AES-256)",
                        uri,
                    )
                    .with_key(hex_vector(
                        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
                    )),
                ],
            },
        }
    }
}

impl Default for Rijndael {
    fn default() -> Self {
        Self::new()
    }
}

impl Algorithm for Rijndael {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn create_instance(&self, inverse: bool) -> Option<Box<dyn Instance>> {
        Some(Box::new(RijndaelInstance::new(DEFAULT_BLOCK_LEN, inverse)))
    }
}
