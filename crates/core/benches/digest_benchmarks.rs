//
// Copyright (c) 2025 TRUSTEDGE LABS LLC
// This source code is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Project: cipherforge — Classic and modern primitives behind one streaming contract.
//

//! Throughput benchmarks for the built-in digests and the ops kernel.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use cipherforge_core::{ops, registry, Algorithm, Instance};

fn bench_digests(c: &mut Criterion) {
    let input = vec![0xA5u8; 64 * 1024];
    let mut group = c.benchmark_group("digest_64k");
    group.throughput(Throughput::Bytes(input.len() as u64));

    for name in ["SHA-256", "RIPEMD-160", "Whirlpool", "Ascon-Hash256"] {
        let algorithm = registry::shared().find(name).expect("built-in");
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut instance = algorithm.create_instance(false).expect("forward hash");
                instance.feed(black_box(&input)).unwrap();
                instance.result().unwrap()
            })
        });
    }
    group.finish();
}

fn bench_kernel(c: &mut Criterion) {
    let a = vec![0x5Au8; 4096];
    let b = vec![0x5Au8; 4096];
    c.bench_function("secure_compare_4k", |bench| {
        bench.iter(|| ops::secure_compare(black_box(&a), black_box(&b)))
    });

    c.bench_function("gf256_mul_table", |bench| {
        bench.iter(|| {
            let mut acc = 0u8;
            for x in 0..=255u8 {
                acc ^= ops::gf256_mul(black_box(x), 0x1B);
            }
            acc
        })
    });
}

criterion_group!(benches, bench_digests, bench_kernel);
criterion_main!(benches);
