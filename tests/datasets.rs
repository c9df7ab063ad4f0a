// Catalog invariants, native-friendly (no wasm/browser APIs).
// The order check in the game depends on ranks being a contiguous 1..=N
// sequence with no duplicates.

use std::collections::HashSet;

use canon_sort::catalog::{card_by_rank, CATALOG};

#[test]
fn catalog_nonempty() {
    assert!(!CATALOG.is_empty());
}

#[test]
fn ranks_are_contiguous_one_to_n() {
    let mut ranks: Vec<u32> = CATALOG.iter().map(|c| c.rank).collect();
    ranks.sort_unstable();
    let expected: Vec<u32> = (1..=CATALOG.len() as u32).collect();
    assert_eq!(ranks, expected);
}

#[test]
fn catalog_is_stored_in_canonical_order() {
    for (i, card) in CATALOG.iter().enumerate() {
        assert_eq!(
            card.rank,
            i as u32 + 1,
            "card '{}' out of place at index {}",
            card.title,
            i
        );
    }
}

#[test]
fn titles_are_unique_and_nonempty() {
    let mut seen = HashSet::new();
    for card in CATALOG {
        assert!(!card.title.is_empty(), "empty title at rank {}", card.rank);
        assert!(seen.insert(card.title), "duplicate title '{}'", card.title);
    }
}

#[test]
fn display_text_matches_rank_ordinal() {
    for card in CATALOG {
        assert!(
            card.display.ends_with(" book"),
            "display '{}' for '{}' has unexpected shape",
            card.display,
            card.title
        );
        assert!(
            card.display.starts_with(&card.rank.to_string()),
            "display '{}' does not start with rank {}",
            card.display,
            card.rank
        );
    }
}

#[test]
fn rank_lookup_round_trips() {
    for card in CATALOG {
        assert_eq!(card_by_rank(card.rank), Some(card));
    }
    assert_eq!(card_by_rank(0), None);
    assert_eq!(card_by_rank(CATALOG.len() as u32 + 1), None);
}
