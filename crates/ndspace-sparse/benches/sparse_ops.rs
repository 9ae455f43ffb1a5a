//! Benchmarks for sparse array operations
//!
//! Compares conversion, sorting and window reads across sizes and densities.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ndspace_core::index::{range, range_step};
use ndspace_core::{HydrationTarget, NdArray, Shape, Sliceable};
use ndspace_sparse::SparseArray;
use std::hint::black_box;

/// Generate row-major data of a square matrix with the given density
fn random_dense_data(size: usize, density: f64) -> Vec<f64> {
    let threshold = (density * 10000.0) as u64;
    let mut seed = 12345u64;
    (0..size * size)
        .map(|_| {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            if seed % 10000 < threshold {
                (seed % 997) as f64 + 1.0
            } else {
                0.0
            }
        })
        .collect()
}

/// Generate the entries of a square matrix in pseudo-random order
fn random_unsorted_sparse(size: usize, density: f64) -> SparseArray<f64> {
    let data = random_dense_data(size, density);
    let sorted = SparseArray::from_slice(&data, Shape::new(&[size, size]).unwrap(), 0.0).unwrap();

    let mut order: Vec<usize> = (0..sorted.nnz()).collect();
    let mut seed = 54321u64;
    for i in (1..order.len()).rev() {
        seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
        order.swap(i, (seed % (i as u64 + 1)) as usize);
    }
    let indices = order.iter().map(|&k| sorted.indices()[k].to_vec()).collect();
    let values = order.iter().map(|&k| sorted.values()[k]).collect();
    SparseArray::new(indices, values, Shape::new(&[size, size]).unwrap(), 0.0).unwrap()
}

/// Benchmark dense → sparse conversion
fn bench_from_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_slice");

    for size in [100, 500].iter() {
        for density in [0.01, 0.1].iter() {
            let data = random_dense_data(*size, *density);
            group.throughput(Throughput::Elements((size * size) as u64));

            group.bench_with_input(
                BenchmarkId::from_parameter(format!("{}x{}_d{}", size, size, density)),
                &data,
                |b, data| {
                    b.iter(|| {
                        let shape = Shape::new(&[*size, *size]).unwrap();
                        let sparse = SparseArray::from_slice(black_box(data), shape, 0.0);
                        let _ = black_box(sparse);
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark sparse → dense expansion
fn bench_to_dense(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_dense");

    for size in [100, 500].iter() {
        let data = random_dense_data(*size, 0.05);
        let sparse = SparseArray::from_slice(&data, Shape::new(&[*size, *size]).unwrap(), 0.0)
            .unwrap();
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &sparse, |b, sparse| {
            b.iter(|| {
                let dense = black_box(sparse).to_dense();
                let _ = black_box(dense);
            });
        });
    }

    group.finish();
}

/// Benchmark sorting of shuffled entries
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_indices_and_values");

    for size in [100, 500].iter() {
        let sparse = random_unsorted_sparse(*size, 0.05);
        group.throughput(Throughput::Elements(sparse.nnz() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &sparse, |b, sparse| {
            b.iter(|| {
                let mut copy = sparse.clone();
                copy.sort_indices_and_values();
                black_box(copy);
            });
        });
    }

    group.finish();
}

/// Benchmark reads of a contiguous and a strided window, on sorted and
/// unsorted sources
fn bench_window_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_read");
    let size = 500;
    let unsorted = random_unsorted_sparse(size, 0.05);
    let mut sorted = unsorted.clone();
    sorted.sort_indices_and_values();

    for (name, sparse) in [("sorted", &sorted), ("unsorted", &unsorted)] {
        let rows = [range(200, 250), range(0, size)];
        let strided = [range_step(0, size, 4), range_step(1, size, 4)];
        for (kind, indices) in [("rows", &rows), ("strided", &strided)] {
            let window = sparse.slice(indices).unwrap();
            group.throughput(Throughput::Elements(window.size() as u64));

            group.bench_function(BenchmarkId::new(name, kind), |b| {
                b.iter(|| {
                    let values = black_box(&window).to_vec();
                    let _ = black_box(values);
                });
            });
        }
    }

    group.finish();
}

/// Benchmark hydration of an empty array scalar by scalar
fn bench_hydrate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hydrate_by_scalars");

    for size in [100, 500].iter() {
        let data = random_dense_data(*size, 0.05);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| {
                let mut sparse = SparseArray::create(Shape::new(&[*size, *size]).unwrap(), 0.0);
                {
                    let mut hydrator = sparse.hydrate().unwrap();
                    let mut scalars = hydrator.by_scalars(&[0, 0]).unwrap();
                    for &value in data {
                        scalars.put(value).unwrap();
                    }
                }
                black_box(sparse);
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_from_slice,
    bench_to_dense,
    bench_sort,
    bench_window_read,
    bench_hydrate
);
criterion_main!(benches);
