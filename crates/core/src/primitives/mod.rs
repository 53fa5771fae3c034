//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! The built-in primitive adapters.
//!
//! One module per algorithm family; each wires a cited standard onto the
//! streaming contract and declares its descriptor and test vectors. The
//! framework never special-cases any of them: everything a consumer can
//! learn about an algorithm flows through its descriptor.

pub mod ascon;
pub mod base64;
pub mod crc32;
pub mod hmac;
pub mod keccak;
pub mod md5;
pub mod pkcs7;
pub mod rc4;
pub mod rijndael;
pub mod ripemd;
pub mod sha2;
pub mod tuplehash;
pub mod whirlpool;

use std::sync::Arc;

use crate::algorithm::Algorithm;

/// Every built-in algorithm, in catalog order.
pub(crate) fn builtin() -> Vec<Arc<dyn Algorithm>> {
    vec![
        Arc::new(md5::Md5::new()),
        Arc::new(ripemd::Ripemd::v128()),
        Arc::new(ripemd::Ripemd::v160()),
        Arc::new(ripemd::Ripemd::v256()),
        Arc::new(ripemd::Ripemd::v320()),
        Arc::new(sha2::Sha256::new()),
        Arc::new(whirlpool::Whirlpool::new()),
        Arc::new(ascon::AsconHash256::new()),
        Arc::new(keccak::CShake128Algorithm::new()),
        Arc::new(tuplehash::TupleHash128::new()),
        Arc::new(hmac::HmacSha256::new()),
        Arc::new(rijndael::Rijndael::new()),
        Arc::new(rc4::Rc4::new()),
        Arc::new(pkcs7::Pkcs7::new()),
        Arc::new(base64::Base64::new()),
        Arc::new(crc32::Crc32::new()),
    ]
}
