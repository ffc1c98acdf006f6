//! Multi-index insertion and removal over a `Vec`.
//!
//! Both primitives validate every index before touching the vector, so a
//! contract violation never leaves it half-modified.

use horizon_collection_core::{contract_violation, ContractViolation};

/// Remove the elements at `indices`.
///
/// Indices address the vector as it is before the call. They are processed
/// from the highest down so earlier removals never shift later ones, and a
/// repeated index removes one element only.
///
/// # Panics
///
/// Panics if any index is `>= vec.len()`.
pub(crate) fn remove_at_indices<T>(vec: &mut Vec<T>, indices: &[usize]) {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted.dedup();

    if let Some(&highest) = sorted.first() {
        if highest >= vec.len() {
            contract_violation(ContractViolation::IndexOutOfBounds {
                index: highest,
                len: vec.len(),
            });
        }
    }

    for index in sorted {
        vec.remove(index);
    }
}

/// Insert `elements[i]` so that it ends up at `indices[i]`.
///
/// Each index is a final position: pairs are applied in ascending index
/// order, so inserting at `[0, 2]` into `[a]` yields `[x, a, y]`. When the
/// same index appears more than once, only the first pair supplied for it is
/// inserted; the rest are returned to the caller in their original order.
///
/// # Panics
///
/// Panics if `elements.len() != indices.len()`, or if an index would land
/// past the end of the vector at the moment it is applied.
pub(crate) fn insert_at_indices<T>(
    vec: &mut Vec<T>,
    elements: Vec<T>,
    indices: &[usize],
    operation: &'static str,
) -> Vec<T> {
    if elements.len() != indices.len() {
        contract_violation(ContractViolation::length_mismatch(
            operation,
            indices.len(),
            elements.len(),
        ));
    }

    let mut order: Vec<usize> = (0..indices.len()).collect();
    order.sort_by_key(|&i| indices[i]);

    let mut accepted = Vec::with_capacity(order.len());
    let mut last = None;
    for i in order {
        if last == Some(indices[i]) {
            continue;
        }
        last = Some(indices[i]);
        accepted.push(i);
    }

    for (inserted, &i) in accepted.iter().enumerate() {
        let len = vec.len() + inserted;
        if indices[i] > len {
            contract_violation(ContractViolation::IndexOutOfBounds {
                index: indices[i],
                len,
            });
        }
    }

    let mut slots: Vec<Option<T>> = elements.into_iter().map(Some).collect();
    for &i in &accepted {
        if let Some(element) = slots[i].take() {
            vec.insert(indices[i], element);
        }
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_descending() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        remove_at_indices(&mut v, &[1, 3]);
        assert_eq!(v, vec!['a', 'c', 'e']);
    }

    #[test]
    fn test_remove_skips_repeats() {
        let mut v = vec!['a', 'b', 'c'];
        remove_at_indices(&mut v, &[2, 0, 2]);
        assert_eq!(v, vec!['b']);
    }

    #[test]
    fn test_remove_nothing() {
        let mut v = vec![1, 2];
        remove_at_indices(&mut v, &[]);
        assert_eq!(v, vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "index 3 is out of bounds for length 3")]
    fn test_remove_out_of_bounds() {
        let mut v = vec![1, 2, 3];
        remove_at_indices(&mut v, &[0, 3]);
    }

    #[test]
    fn test_insert_final_positions() {
        let mut v = vec!["e"];
        let skipped = insert_at_indices(&mut v, vec!["h1", "h2"], &[0, 2], "insert");
        assert!(skipped.is_empty());
        assert_eq!(v, vec!["h1", "e", "h2"]);
    }

    #[test]
    fn test_insert_unsorted_input() {
        let mut v = vec!["a", "b"];
        insert_at_indices(&mut v, vec!["y", "x"], &[3, 0], "insert");
        assert_eq!(v, vec!["x", "a", "b", "y"]);
    }

    #[test]
    fn test_insert_repeated_index_keeps_first() {
        let mut v = vec![1];
        let skipped = insert_at_indices(&mut v, vec![10, 20, 30], &[0, 0, 1], "insert");
        assert_eq!(v, vec![10, 30, 1]);
        assert_eq!(skipped, vec![20]);
    }

    #[test]
    #[should_panic(expected = "must match the number of indices")]
    fn test_insert_length_mismatch() {
        let mut v = vec![1];
        insert_at_indices(&mut v, vec![2, 3], &[0], "insert_supplementary");
    }

    #[test]
    #[should_panic(expected = "index 3 is out of bounds for length 2")]
    fn test_insert_out_of_bounds_leaves_vec_untouched() {
        let mut v = vec![1];
        insert_at_indices(&mut v, vec![2, 3], &[0, 3], "insert");
    }
}
