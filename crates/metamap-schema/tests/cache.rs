use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use serde_json::json;

use metamap_model::SchemaRef;
use metamap_schema::{SchemaCache, SchemaError};

fn reference(value: &str) -> SchemaRef {
    SchemaRef::new(value).unwrap()
}

#[test]
fn retrieves_at_most_once_per_reference() {
    let cache = SchemaCache::new();
    let uri = reference("https://example.org/schemas/mri.json");
    let calls = AtomicUsize::new(0);

    let first = cache
        .fetch_or_retrieve(&uri, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "properties": { "PatientName": {} } }))
        })
        .unwrap();
    let second = cache
        .fetch_or_retrieve(&uri, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "properties": { "PatientName": {} } }))
        })
        .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
}

#[test]
fn distinct_references_are_retrieved_independently() {
    let cache = SchemaCache::new();
    let calls = AtomicUsize::new(0);

    for uri in ["file://a.json", "file://b.json"] {
        cache
            .fetch_or_retrieve(&reference(uri), |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(json!({}))
            })
            .unwrap();
    }

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn failed_retrieval_is_not_cached() {
    let cache = SchemaCache::new();
    let uri = reference("file://flaky.json");

    let error = cache
        .fetch_or_retrieve(&uri, |r| Err(SchemaError::fetch(r, "connection refused")))
        .unwrap_err();
    assert!(matches!(error, SchemaError::Fetch { .. }));
    assert!(!cache.contains(&uri));

    // The next call must re-attempt retrieval rather than serve a failure.
    let body = cache
        .fetch_or_retrieve(&uri, |_| Ok(json!({ "ok": true })))
        .unwrap();
    assert_eq!(body, json!({ "ok": true }));
    assert!(cache.contains(&uri));
}

#[test]
fn get_fails_before_any_retrieval() {
    let cache = SchemaCache::new();
    let uri = reference("file://absent.json");

    assert!(!cache.contains(&uri));
    let error = cache.get(&uri).unwrap_err();
    assert!(matches!(error, SchemaError::NotCached { .. }));
}

#[test]
fn insert_never_overwrites() {
    let cache = SchemaCache::new();
    let uri = reference("file://pinned.json");

    cache.insert(&uri, json!({ "version": 1 }));
    cache.insert(&uri, json!({ "version": 1 }));
    assert_eq!(cache.get(&uri).unwrap(), json!({ "version": 1 }));

    // First write wins; entries are immutable for the process lifetime.
    cache.insert(&uri, json!({ "version": 2 }));
    assert_eq!(cache.get(&uri).unwrap(), json!({ "version": 1 }));
}

#[test]
fn racing_fetches_for_one_reference_retrieve_once() {
    let cache = Arc::new(SchemaCache::new());
    let uri = reference("https://example.org/schemas/contended.json");
    let calls = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            let calls = Arc::clone(&calls);
            let uri = uri.clone();
            thread::spawn(move || {
                cache
                    .fetch_or_retrieve(&uri, |_| {
                        calls.fetch_add(1, Ordering::SeqCst);
                        thread::sleep(Duration::from_millis(10));
                        Ok(json!({ "slow": true }))
                    })
                    .unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), json!({ "slow": true }));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
