//! Property-based tests for sparse arrays
//!
//! These tests use proptest to verify conversions, sorting and windows of
//! sparse arrays against their dense expansions.

use ndspace_core::index::{range_step, Index};
use ndspace_core::{DenseArray, HydrationTarget, NdArray, Shape, Sliceable};
use ndspace_sparse::SparseArray;
use proptest::prelude::*;

// ============================================================================
// Test Utilities
// ============================================================================

// Shape and row-major data, mostly zeros
type DenseData = (Vec<usize>, Vec<i32>);

fn dense_strategy() -> impl Strategy<Value = DenseData> {
    prop::collection::vec(1usize..5, 1..=3).prop_flat_map(|dims| {
        let size: usize = dims.iter().product();
        (
            Just(dims),
            prop::collection::vec(prop_oneof![3 => Just(0), 1 => -5i32..5], size..=size),
        )
    })
}

// Dense data plus one (start, step) selection per dimension
fn dense_and_selection() -> impl Strategy<Value = (DenseData, Vec<(usize, usize)>)> {
    dense_strategy().prop_flat_map(|(dims, data)| {
        let selection: Vec<_> = dims.iter().map(|&d| (0..d, 1usize..4)).collect();
        (Just((dims, data)), selection)
    })
}

fn shape(dims: &[usize]) -> Shape {
    Shape::new(dims).unwrap()
}

// ============================================================================
// Conversion Properties
// ============================================================================

proptest! {
    /// Property: dense → sparse → dense reproduces the data for any default
    #[test]
    fn prop_dense_roundtrip((dims, data) in dense_strategy(), default in -1i32..=1) {
        let sparse = SparseArray::from_slice(&data, shape(&dims), default).unwrap();
        prop_assert_eq!(sparse.to_vec().unwrap(), data.clone());
        prop_assert_eq!(sparse.nnz(), data.iter().filter(|&&v| v != default).count());
        prop_assert!(sparse.is_sorted());
    }

    /// Property: converting a dense array equals converting its data
    #[test]
    fn prop_from_dense_matches_from_slice((dims, data) in dense_strategy()) {
        let dense = DenseArray::from_vec(data.clone(), shape(&dims)).unwrap();
        let a = SparseArray::from_dense(&dense, 0).unwrap();
        let b = SparseArray::from_slice(&data, shape(&dims), 0).unwrap();
        prop_assert_eq!(a.indices(), b.indices());
        prop_assert_eq!(a.values(), b.values());
    }

    /// Property: hydrating scalar by scalar stores the same entries as a conversion
    #[test]
    fn prop_hydration_matches_conversion((dims, data) in dense_strategy()) {
        let mut hydrated = SparseArray::create(shape(&dims), 0);
        {
            let mut hydrator = hydrated.hydrate().unwrap();
            let start = vec![0; dims.len()];
            let mut scalars = hydrator.by_scalars(&start).unwrap();
            for &value in &data {
                scalars.put(value).unwrap();
            }
        }
        let converted = SparseArray::from_slice(&data, shape(&dims), 0).unwrap();
        prop_assert_eq!(hydrated.indices(), converted.indices());
        prop_assert_eq!(hydrated.values(), converted.values());
    }
}

// ============================================================================
// Sorting Properties
// ============================================================================

proptest! {
    /// Property: sorting orders entries, keeps them paired, and is idempotent
    #[test]
    fn prop_sort_orders_and_is_idempotent(
        ((dims, data), seed) in (dense_strategy(), any::<u64>())
    ) {
        let converted = SparseArray::from_slice(&data, shape(&dims), 0).unwrap();

        // Deterministic shuffle of the entries
        let mut order: Vec<usize> = (0..converted.nnz()).collect();
        let mut state = seed;
        for i in (1..order.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            order.swap(i, (state >> 33) as usize % (i + 1));
        }
        let indices = order.iter().map(|&k| converted.indices()[k].to_vec()).collect();
        let values = order.iter().map(|&k| converted.values()[k]).collect();

        let mut sparse = SparseArray::new(indices, values, shape(&dims), 0).unwrap();
        prop_assert_eq!(sparse.to_vec().unwrap(), data.clone());

        sparse.sort_indices_and_values();
        prop_assert!(sparse.indices().windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(sparse.to_vec().unwrap(), data);
        prop_assert_eq!(sparse.indices(), converted.indices());

        let once = sparse.values().to_vec();
        sparse.sort_indices_and_values();
        prop_assert_eq!(sparse.values(), once.as_slice());
    }
}

// ============================================================================
// Window Properties
// ============================================================================

proptest! {
    /// Property: a window reads like the same slice of the dense expansion
    #[test]
    fn prop_window_matches_dense_slice(((dims, data), selection) in dense_and_selection()) {
        let sparse = SparseArray::from_slice(&data, shape(&dims), 0).unwrap();
        let dense = sparse.to_dense().unwrap();
        let indices: Vec<Index> = dims
            .iter()
            .zip(&selection)
            .map(|(&d, &(start, step))| range_step(start, d, step))
            .collect();

        let window = sparse.slice(&indices).unwrap();
        let expected = dense.slice(&indices).unwrap();
        prop_assert_eq!(window.shape(), expected.shape());
        prop_assert_eq!(window.to_vec().unwrap(), expected.to_vec().unwrap());
        prop_assert_eq!(window.to_dense().unwrap(), expected.clone());

        let mut first = vec![0; window.rank()];
        if window.size() > 0 {
            first[0] = window.shape().dims()[0] - 1;
            prop_assert_eq!(window.get(&first).unwrap(), expected.get(&first).unwrap());
        }
    }
}
