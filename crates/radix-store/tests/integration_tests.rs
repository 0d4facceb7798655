//! Integration tests for the SQLite ledger

use radix_domain::traits::{HistoryQuery, SearchLedger};
use radix_domain::SearchId;
use radix_store::{SqliteLedger, StoreError};
use serde_json::json;

fn ledger() -> SqliteLedger {
    SqliteLedger::new(":memory:").unwrap()
}

#[test]
fn test_record_search_and_fetch() {
    let mut ledger = ledger();

    let id = ledger
        .record_search("filosofia", Some("203.0.113.7"), Some("user-42"))
        .unwrap();

    let event = ledger.get_search(id).unwrap().expect("search should exist");
    assert_eq!(event.id, id);
    assert_eq!(event.word, "filosofia");
    assert_eq!(event.origin_address.as_deref(), Some("203.0.113.7"));
    assert_eq!(event.requested_by.as_deref(), Some("user-42"));
    assert!(event.created_at > 0);
}

#[test]
fn test_record_search_without_origin() {
    let mut ledger = ledger();

    let id = ledger.record_search("radix", None, None).unwrap();

    let event = ledger.get_search(id).unwrap().unwrap();
    assert!(event.origin_address.is_none());
    assert!(event.requested_by.is_none());
}

#[test]
fn test_result_round_trip_to_parent_search() {
    let mut ledger = ledger();

    let search_id = ledger.record_search("democracia", None, None).unwrap();
    let payload = json!({"word": "democracia", "status": "completed"});
    let record_id = ledger
        .record_result("democracia", &payload, search_id)
        .unwrap();

    // The record's parent reference resolves back to the originating search
    let record = ledger.get_result(record_id).unwrap().unwrap();
    assert_eq!(record.search_id, search_id);
    assert_eq!(record.payload, payload);

    let parent = ledger.get_search(record.search_id).unwrap().unwrap();
    assert_eq!(parent.word, "democracia");

    let linked = ledger.results_for_search(search_id).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, record_id);
}

#[test]
fn test_record_result_missing_parent() {
    let mut ledger = ledger();

    let payload = json!({"word": "fantasma", "status": "completed"});
    let result = ledger.record_result("fantasma", &payload, SearchId::new());

    assert!(matches!(result, Err(StoreError::MissingParent(_))));
}

#[test]
fn test_delete_search_cascades_to_results() {
    let mut ledger = ledger();

    let search_id = ledger.record_search("biblioteca", None, None).unwrap();
    let payload = json!({"word": "biblioteca", "status": "completed"});
    let record_id = ledger
        .record_result("biblioteca", &payload, search_id)
        .unwrap();

    ledger.delete_search(search_id).unwrap();

    assert!(ledger.get_search(search_id).unwrap().is_none());
    assert!(ledger.get_result(record_id).unwrap().is_none());
    assert!(ledger.results_for_search(search_id).unwrap().is_empty());
}

#[test]
fn test_delete_missing_search() {
    let mut ledger = ledger();
    let result = ledger.delete_search(SearchId::new());
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn test_orphaned_search_is_normal() {
    // A search with no linked result models an external call that failed
    // after the search was recorded
    let mut ledger = ledger();

    let id = ledger.record_search("umbra", None, None).unwrap();
    assert!(ledger.get_search(id).unwrap().is_some());
    assert!(ledger.results_for_search(id).unwrap().is_empty());
}

#[test]
fn test_history_newest_first() {
    let mut ledger = ledger();

    let first = ledger.record_search("alpha", None, None).unwrap();
    let second = ledger.record_search("beta", None, None).unwrap();
    let third = ledger.record_search("gamma", None, None).unwrap();

    let history = ledger.search_history(&HistoryQuery::default()).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].id, third);
    assert_eq!(history[1].id, second);
    assert_eq!(history[2].id, first);
}

#[test]
fn test_history_prefix_filter_and_limit() {
    let mut ledger = ledger();

    ledger.record_search("filosofia", None, None).unwrap();
    ledger.record_search("filologia", None, None).unwrap();
    ledger.record_search("democracia", None, None).unwrap();

    let query = HistoryQuery {
        word_prefix: Some("filo".to_string()),
        limit: None,
    };
    let history = ledger.search_history(&query).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|e| e.word.starts_with("filo")));

    let query = HistoryQuery {
        word_prefix: None,
        limit: Some(2),
    };
    let history = ledger.search_history(&query).unwrap();
    assert_eq!(history.len(), 2);
}

#[test]
fn test_history_prefix_metacharacters_are_literal() {
    let mut ledger = ledger();

    ledger.record_search("centavo", None, None).unwrap();
    ledger.record_search("%avo", None, None).unwrap();
    ledger.record_search("ab", None, None).unwrap();
    ledger.record_search("a_b", None, None).unwrap();

    // "%" is a literal prefix, not match-anything
    let query = HistoryQuery {
        word_prefix: Some("%".to_string()),
        limit: None,
    };
    let history = ledger.search_history(&query).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].word, "%avo");

    // "_" is a literal underscore, not match-any-character
    let query = HistoryQuery {
        word_prefix: Some("a_".to_string()),
        limit: None,
    };
    let history = ledger.search_history(&query).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].word, "a_b");
}

#[test]
fn test_multiple_results_per_search() {
    // Schema allows many results per search even though one is the norm
    let mut ledger = ledger();

    let search_id = ledger.record_search("vox", None, None).unwrap();
    ledger
        .record_result("vox", &json!({"word": "vox", "status": "completed"}), search_id)
        .unwrap();
    ledger
        .record_result("vox", &json!({"word": "vox", "status": "completed"}), search_id)
        .unwrap();

    assert_eq!(ledger.results_for_search(search_id).unwrap().len(), 2);
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("radix.db");

    let search_id = {
        let mut ledger = SqliteLedger::new(&path).unwrap();
        ledger.record_search("lumen", None, None).unwrap()
    };

    let ledger = SqliteLedger::new(&path).unwrap();
    let event = ledger.get_search(search_id).unwrap().unwrap();
    assert_eq!(event.word, "lumen");
}
