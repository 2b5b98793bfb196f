//! Property-based tests using proptest
//!
//! Random operation sequences are run against a `BinaryHeap` reference model;
//! the Fibonacci heap must produce identical extraction sequences and agree
//! on the minimum at every step.

use proptest::prelude::*;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

use fibonacci_heap::{FibonacciHeap, HeapError};

proptest! {
    #[test]
    fn extraction_matches_reference(values in prop::collection::vec(-1_000i64..1_000, 0..300)) {
        let mut heap = FibonacciHeap::new();
        let mut reference = BinaryHeap::new();

        for &value in &values {
            heap.insert(value, value);
            reference.push(Reverse(value));
        }
        prop_assert_eq!(heap.len(), values.len());

        while let Some(Reverse(expected)) = reference.pop() {
            let (priority, _item) = heap.delete_min().unwrap();
            prop_assert_eq!(priority, expected);
        }
        prop_assert!(heap.is_empty());
        prop_assert_eq!(heap.delete_min(), Err(HeapError::EmptyHeap));
    }

    #[test]
    fn interleaved_ops_match_reference(
        ops in prop::collection::vec((any::<bool>(), -500i64..500), 0..400)
    ) {
        let mut heap = FibonacciHeap::new();
        let mut reference = BinaryHeap::new();
        let mut inserts = 0usize;
        let mut removals = 0usize;

        for (pop, value) in ops {
            if pop {
                let expected = reference.pop().map(|Reverse(v)| v);
                let got = heap.delete_min().ok().map(|(p, _)| p);
                prop_assert_eq!(got, expected);
                if expected.is_some() {
                    removals += 1;
                }
            } else {
                heap.insert(value, value);
                reference.push(Reverse(value));
                inserts += 1;
            }
            prop_assert_eq!(heap.len(), inserts - removals);
            prop_assert_eq!(
                heap.peek().map(|(p, _)| *p),
                reference.peek().map(|Reverse(v)| *v)
            );
        }
    }

    #[test]
    fn decrease_key_tracks_global_min(
        initial in prop::collection::vec(0i64..100_000, 1..120),
        decreases in prop::collection::vec((any::<prop::sample::Index>(), 1i64..10_000), 0..120)
    ) {
        let mut heap = FibonacciHeap::new();
        let mut handles = Vec::new();
        let mut model = initial.clone();

        for (i, &priority) in initial.iter().enumerate() {
            handles.push(heap.insert(priority, i));
        }

        for (index, delta) in decreases {
            let i = index.index(model.len());
            let target = model[i] - delta;
            heap.decrease_key(&handles[i], target).unwrap();
            model[i] = target;

            let expected_min = *model.iter().min().unwrap();
            prop_assert_eq!(heap.peek().map(|(p, _)| *p), Some(expected_min));
        }

        // Drain and compare against the fully-decreased model.
        model.sort_unstable();
        for expected in model {
            let (priority, _item) = heap.delete_min().unwrap();
            prop_assert_eq!(priority, expected);
        }
    }

    #[test]
    fn merge_preserves_contents(
        first in prop::collection::vec(-500i64..500, 0..100),
        second in prop::collection::vec(-500i64..500, 0..100)
    ) {
        let mut a = FibonacciHeap::new();
        for &value in &first {
            a.insert(value, value);
        }
        let mut b = FibonacciHeap::new();
        for &value in &second {
            b.insert(value, value);
        }

        let min_a = a.peek().map(|(p, _)| *p);
        let min_b = b.peek().map(|(p, _)| *p);
        let expected_min = match (min_a, min_b) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (x, None) => x,
            (None, y) => y,
        };

        let mut merged = FibonacciHeap::merge(a, b);
        prop_assert_eq!(merged.len(), first.len() + second.len());
        prop_assert_eq!(merged.peek().map(|(p, _)| *p), expected_min);

        let mut all: Vec<i64> = first.iter().chain(second.iter()).copied().collect();
        all.sort_unstable();
        for expected in all {
            prop_assert_eq!(merged.delete_min().map(|(p, _)| p), Ok(expected));
        }
    }
}
