/*
Copyright 2014 Google Inc. All rights reserved.
Copyright 2017 Jihyun Yu. All rights reserved.

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Benchmarks for CellUnion normalization and set operations.
//!
//! Run with: cargo bench --bench cellunion

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

use s2cellunion::cellid::{CellID, MAX_LEVEL};
use s2cellunion::s1::Deg;
use s2cellunion::CellUnion;

fn random_cellid(rng: &mut StdRng, level: u64) -> CellID {
    let face = rng.gen_range(0..6);
    let pos = rng.gen::<u64>() & ((1 << 61) - 1);
    CellID::from_face_pos_level(face, pos, level)
}

// Groups of complete sibling sets under random parents, shuffled, so that
// normalization has containment and collapsing to do.
fn clustered_ids(rng: &mut StdRng, parents: usize) -> Vec<CellID> {
    let mut ids = Vec::new();
    for _ in 0..parents {
        let level = rng.gen_range(4..20);
        let parent = random_cellid(rng, level);
        ids.extend(parent.child_iter_at_level(level + 2));
        ids.push(parent.child_begin_at_level(MAX_LEVEL));
    }
    ids.shuffle(rng);
    ids
}

fn random_union(rng: &mut StdRng, n: usize) -> CellUnion {
    let ids = (0..n)
        .map(|_| {
            let level = rng.gen_range(8..24);
            random_cellid(rng, level)
        })
        .collect();
    CellUnion::from_cell_ids_normalized(ids)
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("cellunion/normalize");
    let mut rng = StdRng::seed_from_u64(1);

    for parents in [16usize, 256, 4096] {
        let ids = clustered_ids(&mut rng, parents);
        group.throughput(Throughput::Elements(ids.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ids.len()), &ids, |b, ids| {
            b.iter(|| {
                let mut cells = CellUnion::from_cell_ids(ids.clone());
                black_box(cells.normalize());
                black_box(cells)
            })
        });
    }
    group.finish();
}

fn bench_set_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("cellunion/set");
    let mut rng = StdRng::seed_from_u64(2);

    for n in [64usize, 1024] {
        let x = random_union(&mut rng, n);
        let y = random_union(&mut rng, n);
        let pair = (x, y);

        group.bench_with_input(BenchmarkId::new("union", n), &pair, |b, (x, y)| {
            b.iter(|| black_box(CellUnion::union(x, y)))
        });
        group.bench_with_input(BenchmarkId::new("intersection", n), &pair, |b, (x, y)| {
            b.iter(|| black_box(CellUnion::intersection(x, y)))
        });
        group.bench_with_input(BenchmarkId::new("difference", n), &pair, |b, (x, y)| {
            b.iter(|| black_box(CellUnion::difference(x, y)))
        });
        group.bench_with_input(BenchmarkId::new("contains", n), &pair, |b, (x, y)| {
            b.iter(|| black_box(x.contains(y)))
        });
    }
    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("cellunion/expand");
    let mut rng = StdRng::seed_from_u64(3);
    let cells = random_union(&mut rng, 256);

    for degrees in [0.01, 0.1, 1.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(degrees),
            &cells,
            |b, cells| {
                b.iter(|| {
                    let mut expanded = cells.clone();
                    expanded.expand_by_radius(Deg(degrees).into(), 2);
                    black_box(expanded)
                })
            },
        );
    }
    group.finish();
}

fn bench_denormalize(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(4);
    let cells = random_union(&mut rng, 1024);

    c.bench_function("cellunion/denormalize", |b| {
        b.iter(|| black_box(cells.denormalize(black_box(6), black_box(3))))
    });
}

criterion_group!(
    benches,
    bench_normalize,
    bench_set_operations,
    bench_expand,
    bench_denormalize
);
criterion_main!(benches);
