//! Micro benchmarks for the in-memory B-tree index.
#![allow(missing_docs)]

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use memindex::BTree;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const INSERT_COUNT: u64 = 32_768;
const LOOKUP_SAMPLES: usize = 4_096;

fn populated_tree(keys: &[u64], degree: usize) -> BTree<u64> {
    let mut tree = BTree::new(degree).expect("valid degree");
    for key in keys {
        tree.insert(*key);
    }
    tree
}

fn micro_btree(c: &mut Criterion) {
    let mut group = c.benchmark_group("micro/btree");
    group.sample_size(30);

    group.throughput(Throughput::Elements(INSERT_COUNT));
    group.bench_function("sequential_insert", |b| {
        b.iter_batched(
            || BTree::new(16).expect("valid degree"),
            |mut tree| {
                for key in 0..INSERT_COUNT {
                    tree.insert(key);
                }
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        );
    });

    let mut random_keys: Vec<u64> = (0..INSERT_COUNT).collect();
    random_keys.shuffle(&mut ChaCha8Rng::seed_from_u64(0xBEEF_F00D));
    group.throughput(Throughput::Elements(INSERT_COUNT));
    group.bench_function("random_insert", |b| {
        b.iter_batched(
            || BTree::new(16).expect("valid degree"),
            |mut tree| {
                for key in &random_keys {
                    tree.insert(*key);
                }
                black_box(tree.height());
            },
            BatchSize::SmallInput,
        );
    });

    let tree = populated_tree(&random_keys, 16);
    let mut probe_rng = ChaCha8Rng::seed_from_u64(0xF00D_BEEF);
    let hits: Vec<u64> = random_keys
        .choose_multiple(&mut probe_rng, LOOKUP_SAMPLES)
        .copied()
        .collect();
    group.throughput(Throughput::Elements(LOOKUP_SAMPLES as u64));
    group.bench_function("search_hit", |b| {
        b.iter(|| {
            for key in &hits {
                black_box(tree.search(key));
            }
        });
    });

    group.throughput(Throughput::Elements(LOOKUP_SAMPLES as u64));
    group.bench_function("search_miss", |b| {
        b.iter(|| {
            for offset in 0..LOOKUP_SAMPLES as u64 {
                black_box(tree.search(&(INSERT_COUNT + offset)));
            }
        });
    });

    for degree in [2usize, 8, 32, 128] {
        group.throughput(Throughput::Elements(INSERT_COUNT));
        group.bench_with_input(
            BenchmarkId::new("random_insert_degree", degree),
            &degree,
            |b, &degree| {
                b.iter_batched(
                    || BTree::new(degree).expect("valid degree"),
                    |mut tree| {
                        for key in &random_keys {
                            tree.insert(*key);
                        }
                        black_box(tree.len());
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(benches, micro_btree);
criterion_main!(benches);
