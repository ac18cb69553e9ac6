//! Adding, removing and replacing items.

use crate::common::*;
use bitfuse::{Config, Fuse};

#[test]
fn test_add_appends_with_next_ref() {
    let mut fuse = fruit_index();
    assert_eq!(fuse.next_ref_index(), 3);
    let ref_index = fuse.add("Cherry".to_string());
    assert_eq!(ref_index, 3);
    assert_eq!(fuse.len(), 4);

    let results = fuse.search("cherry");
    assert_eq!(results[0].ref_index, 3);
    assert_eq!(results[0].item, "Cherry");
}

#[test]
fn test_remove_keeps_other_refs() {
    let mut fuse = fruit_index();
    let removed = fuse.remove(|fruit| fruit == "Orange");
    assert_eq!(removed, vec!["Orange".to_string()]);
    assert_eq!(fuse.len(), 2);

    let results = fuse.search("banana");
    assert_eq!(results[0].ref_index, 2);
    assert_eq!(fuse.get(2).map(String::as_str), Some("Banana"));
    assert_eq!(fuse.get(1), None);
}

#[test]
fn test_add_after_remove_never_reuses() {
    let mut fuse = fruit_index();
    assert_eq!(fuse.remove_at(2), Some("Banana".to_string()));
    let ref_index = fuse.add("Blueberry".to_string());
    assert_eq!(ref_index, 3);

    let refs: Vec<usize> = fuse.iter().map(|(r, _)| r).collect();
    assert_eq!(refs, vec![0, 1, 3]);
}

#[test]
fn test_remove_at_unknown_ref() {
    let mut fuse = fruit_index();
    assert_eq!(fuse.remove_at(42), None);
    fuse.remove_at(0);
    assert_eq!(fuse.remove_at(0), None);
    assert_eq!(fuse.len(), 2);
}

#[test]
fn test_remove_returns_in_insertion_order() {
    let mut fuse = Fuse::new(numbered(10), Config::default()).unwrap();
    let removed = fuse.remove(|item| item.ends_with('3') || item.ends_with('7') || item.ends_with('1'));
    assert_eq!(removed, vec!["item 1", "item 3", "item 7"]);
    assert_eq!(fuse.len(), 7);
}

#[test]
fn test_remove_nothing() {
    let mut fuse = fruit_index();
    assert!(fuse.remove(|_| false).is_empty());
    assert_eq!(fuse.len(), 3);
}

#[test]
fn test_removed_items_stop_matching() {
    let mut fuse = fruit_index();
    fuse.remove(|fruit| fruit == "Banana");
    let found: Vec<&str> = fuse.search("nan").iter().map(|r| r.item.as_str()).collect();
    assert_eq!(found, vec!["Orange"]);
}

#[test]
fn test_set_collection_restarts_refs() {
    let mut fuse = fruit_index();
    fuse.add("Cherry".to_string());
    fuse.set_collection(vec!["Kiwi".to_string(), "Mango".to_string()]);

    assert_eq!(fuse.len(), 2);
    assert_eq!(fuse.next_ref_index(), 2);
    assert!(fuse.search("apple").is_empty());
    assert_eq!(fuse.search("mango")[0].ref_index, 1);
}

#[test]
fn test_set_collection_empty() {
    let mut fuse = fruit_index();
    fuse.set_collection(Vec::new());
    assert!(fuse.is_empty());
    assert_eq!(fuse.next_ref_index(), 0);
    assert_eq!(fuse.add("Fig".to_string()), 0);
}

#[test]
fn test_keyed_add_resolves_keys() {
    let mut fuse = book_index(weighted_book_config());
    let ref_index = fuse.add(Book {
        title: "Redshirts".to_string(),
        author: "John Scalzi".to_string(),
        tags: vec!["sf".to_string()],
    });
    assert_eq!(ref_index, 4);
    assert_eq!(fuse.search("redshirts")[0].ref_index, 4);
}
