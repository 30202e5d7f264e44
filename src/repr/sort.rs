//! In-place hybrid sort of an [`EdgeStore`] by `(source, destination)`.
//!
//! The sort is an iterative quicksort with an explicit range stack: the pivot is drawn
//! uniformly from the current range and swapped to its end, the range is split three ways
//! (smaller / equal / larger) so that runs of parallel edges do not degrade the running time,
//! and ranges shorter than [`INSERTION_SORT_THRESHOLD`] are finished by insertion sort.
//! All permutations go through [`EdgeStore::swap_edges`], hence weights move with their edges.

use std::cmp::Ordering;

use rand::Rng;

use super::*;

/// Ranges with fewer slots than this are finished by insertion sort
pub const INSERTION_SORT_THRESHOLD: usize = 5;

/// Sorts all slots of `store` by `(source, destination)`
pub fn sort_edges<S, R>(store: &mut S, rng: &mut R)
where
    S: EdgeStore,
    R: Rng,
{
    // half-open ranges `lo..hi`
    let mut stack: Vec<(EdgeSlot, EdgeSlot)> = vec![(0, store.len())];

    while let Some((lo, hi)) = stack.pop() {
        if hi - lo < INSERTION_SORT_THRESHOLD {
            insertion_sort(store, lo, hi);
            continue;
        }

        let (lt, gt) = partition(store, lo, hi, rng);

        // Process the smaller side first to keep the stack logarithmic
        if lt - lo < hi - gt {
            stack.push((gt, hi));
            stack.push((lo, lt));
        } else {
            stack.push((lo, lt));
            stack.push((gt, hi));
        }
    }
}

/// Three-way partition of `lo..hi` around a random pivot.
///
/// Returns `(lt, gt)` such that `lo..lt` is smaller than the pivot, `lt..gt` equals it and
/// `gt..hi` is larger.
fn partition<S, R>(store: &mut S, lo: EdgeSlot, hi: EdgeSlot, rng: &mut R) -> (EdgeSlot, EdgeSlot)
where
    S: EdgeStore,
    R: Rng,
{
    let last = hi - 1;
    store.swap_edges(rng.random_range(lo..hi), last);
    let pivot = store.endpoints(last);

    let (mut lt, mut i, mut gt) = (lo, lo, last);
    while i < gt {
        match store.endpoints(i).cmp(&pivot) {
            Ordering::Less => {
                store.swap_edges(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                store.swap_edges(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }

    // Move the pivot from the end into the equal run
    store.swap_edges(gt, last);
    (lt, gt + 1)
}

fn insertion_sort<S: EdgeStore>(store: &mut S, lo: EdgeSlot, hi: EdgeSlot) {
    for i in (lo + 1)..hi {
        let mut j = i;
        while j > lo && store.endpoints(j - 1) > store.endpoints(j) {
            store.swap_edges(j - 1, j);
            j -= 1;
        }
    }
}

/// Returns *true* if the slots of `store` are ordered by `(source, destination)`
pub fn is_sorted<S: EdgeStore>(store: &S) -> bool {
    (1..store.len()).all(|i| store.endpoints(i - 1) <= store.endpoints(i))
}
