//! Snapshots written to and read back from disk.

use std::fs;

use crate::common::*;
use bitfuse::binary::{self, SnapshotHeader, MAGIC, VERSION};
use bitfuse::{Config, Fuse, FuseError, SnapshotError};
use tempfile::TempDir;

#[test]
fn test_snapshot_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("books.bfse");

    let mut fuse = book_index(weighted_book_config().include_score(true));
    fuse.remove_at(0);
    fs::write(&path, binary::save(&fuse).unwrap()).unwrap();

    let loaded: Fuse<Book> = binary::load(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.next_ref_index(), 4);

    let before = fuse.search("John Smith");
    let after = loaded.search("John Smith");
    assert_eq!(ref_indices(&before), ref_indices(&after));
    assert_eq!(scores(&before), scores(&after));
}

#[test]
fn test_loaded_index_keeps_growing() {
    let fuse = fruit_index();
    let mut loaded: Fuse<String> = binary::load(&binary::save(&fuse).unwrap()).unwrap();
    assert_eq!(loaded.add("Cherry".to_string()), 3);
    assert_eq!(loaded.search("cherry")[0].ref_index, 3);
}

#[test]
fn test_loaded_index_reports_scores_on_request() {
    let fuse = book_index(weighted_book_config());
    let mut loaded: Fuse<Book> = binary::load(&binary::save(&fuse).unwrap()).unwrap();
    assert!(loaded.search("steve")[0].score.is_none());

    loaded.set_result_fields(true, true);
    let results = loaded.search("steve");
    assert_eq!(ref_indices(&results), ref_indices(&fuse.search("steve")));
    assert!(results[0].score.is_some());
    assert!(!results[0].matches.as_ref().unwrap().is_empty());
}

#[test]
fn test_json_values_snapshot() {
    let config = Config::default()
        .with_keys(["title", "author", "tags"])
        .extended_search(true);
    let fuse = Fuse::new(book_values(), config).unwrap();
    let bytes = binary::save(&fuse).unwrap();

    let info = binary::inspect(&bytes).unwrap();
    assert!(info.checksum_ok());
    assert!(info.header.flags.has_keys());
    assert!(info.header.flags.extended_search());
    assert_eq!(info.header.entry_count, 4);

    let loaded: Fuse<serde_json::Value> = binary::load(&bytes).unwrap();
    let results = loaded.search("^steve");
    assert_eq!(ref_indices(&results), vec![3]);
}

#[test]
fn test_header_layout() {
    let bytes = binary::save(&fruit_index()).unwrap();
    assert_eq!(&bytes[..4], &MAGIC);
    assert_eq!(bytes[4], VERSION);
    let header = SnapshotHeader::read(&bytes).unwrap();
    assert_eq!(header.total_size(), bytes.len());
}

#[test]
fn test_flipped_byte_is_rejected() {
    let mut bytes = binary::save(&fruit_index()).unwrap();
    let mid = SnapshotHeader::SIZE + 2;
    bytes[mid] ^= 0xFF;

    let info = binary::inspect(&bytes).unwrap();
    assert!(!info.checksum_ok());
    let err = binary::load::<String>(&bytes).unwrap_err();
    assert!(matches!(
        err,
        FuseError::Snapshot(SnapshotError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_truncated_file_is_rejected() {
    let bytes = binary::save(&fruit_index()).unwrap();
    for cut in [0, 3, SnapshotHeader::SIZE, bytes.len() - 1] {
        assert!(
            binary::load::<String>(&bytes[..cut]).is_err(),
            "loaded {} of {} bytes",
            cut,
            bytes.len()
        );
    }
}

#[test]
fn test_not_a_snapshot() {
    let err = binary::load::<String>(b"{\"definitely\": \"json\"}").unwrap_err();
    assert!(matches!(err, FuseError::Snapshot(_)));
}
