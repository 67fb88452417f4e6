// File: src/core/aligner.rs
use crate::core::error::{AlphabetError, Result};
use crate::core::types::{AlphabetTable, LetterId, PositionPair};
use std::collections::{HashMap, HashSet};

/// Maps each identifier of `target` to the 1-based position of its first
/// occurrence. Later duplicates never overwrite an earlier entry.
fn first_positions(target: &[LetterId]) -> HashMap<&str, usize> {
    let mut index = HashMap::with_capacity(target.len());
    for (i, letter) in target.iter().enumerate() {
        index.entry(letter.as_str()).or_insert(i + 1);
    }
    index
}

/// Pairs every source identifier that also occurs in `target` with its
/// target position. Letters present in only one ordering are dropped.
/// O(n + m) complexity.
pub fn align(source: &[LetterId], target: &[LetterId]) -> Vec<PositionPair> {
    let index = first_positions(target);
    source
        .iter()
        .enumerate()
        .filter_map(|(i, letter)| {
            index
                .get(letter.as_str())
                .map(|&j| PositionPair::new(i + 1, j, letter.clone()))
        })
        .collect()
}

/// Like [`align`], but an alignment with no shared letters is an error.
pub fn align_checked(source: &AlphabetTable, target: &AlphabetTable) -> Result<Vec<PositionPair>> {
    let pairs = align(source.order(), target.order());
    if pairs.is_empty() {
        return Err(AlphabetError::EmptyAlignment {
            source_name: source.name.clone(),
            target_name: target.name.clone(),
        });
    }
    Ok(pairs)
}

/// Source identifiers with no counterpart in `target`, each listed once.
pub fn unmatched<'a>(source: &'a [LetterId], target: &[LetterId]) -> Vec<&'a str> {
    let index = first_positions(target);
    let mut seen = HashSet::new();
    source
        .iter()
        .map(String::as_str)
        .filter(|letter| !index.contains_key(letter) && seen.insert(*letter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn letters(items: &[&str]) -> Vec<LetterId> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rotated_alphabet() {
        let source = letters(&["alpha", "beta", "gamma"]);
        let target = letters(&["gamma", "alpha", "beta"]);
        let xy: Vec<_> = align(&source, &target).iter().map(PositionPair::xy).collect();
        assert_eq!(xy, vec![(1, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn target_lookup_uses_first_occurrence() {
        let source = letters(&["y", "x"]);
        let target = letters(&["x", "y", "x"]);
        let xy: Vec<_> = align(&source, &target).iter().map(PositionPair::xy).collect();
        assert_eq!(xy, vec![(1, 2), (2, 1)]);
    }

    #[test]
    fn duplicate_source_letters_each_emit_a_pair() {
        let source = letters(&["iota", "iota", "kappa"]);
        let target = letters(&["kappa", "iota"]);
        let xy: Vec<_> = align(&source, &target).iter().map(PositionPair::xy).collect();
        assert_eq!(xy, vec![(1, 2), (2, 2), (3, 1)]);
    }

    #[test]
    fn letters_missing_from_target_are_skipped() {
        let source = letters(&["digamma", "upsilon", "ihwaz", "alpha"]);
        let target = letters(&["alpha", "upsilon"]);
        let pairs = align(&source, &target);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].letter, "upsilon");
        assert_eq!(pairs[1].letter, "alpha");
        assert_eq!(unmatched(&source, &target), vec!["digamma", "ihwaz"]);
    }

    #[test]
    fn disjoint_tables_fail_checked_alignment() {
        let a = AlphabetTable::from_letters("A", &["a", "b"]).unwrap();
        let b = AlphabetTable::from_letters("B", &["c", "d"]).unwrap();
        assert!(align(a.order(), b.order()).is_empty());
        let err = align_checked(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            AlphabetError::EmptyAlignment { ref source_name, ref target_name }
                if source_name == "A" && target_name == "B"
        ));
    }

    fn alphabet() -> impl Strategy<Value = Vec<LetterId>> {
        prop::collection::vec("[a-h]", 1..20)
    }

    proptest! {
        #[test]
        fn pairs_are_valid_positions(source in alphabet(), target in alphabet()) {
            let pairs = align(&source, &target);
            let shared = source.iter().filter(|l| target.contains(l)).count();
            prop_assert_eq!(pairs.len(), shared);
            for pair in &pairs {
                prop_assert!(pair.source >= 1 && pair.source <= source.len());
                prop_assert!(pair.target >= 1 && pair.target <= target.len());
                prop_assert_eq!(&source[pair.source - 1], &pair.letter);
                let first = target.iter().position(|l| *l == pair.letter).unwrap() + 1;
                prop_assert_eq!(pair.target, first);
            }
            prop_assert!(pairs.windows(2).all(|w| w[0].source < w[1].source));
        }

        #[test]
        fn self_alignment_of_distinct_letters_is_identity(n in 1usize..30) {
            let source: Vec<LetterId> = (0..n).map(|i| format!("l{i}")).collect();
            let pairs = align(&source, &source);
            prop_assert_eq!(pairs.len(), n);
            prop_assert!(pairs.iter().all(|p| p.source == p.target));
        }
    }
}
