//! End-to-end indexing through on-disk uploads / 端到端索引测试

use retrieval_backend::search::{index_batch, BatchOptions, PendingDocument, QueryType};
use retrieval_backend::storage::DocumentStore;
use retrieval_backend::utils::{doc_id_from_filename, secure_filename};
use retrieval_backend::{SearchEngine, SearchError};

const DOCS: &[(&str, &str)] = &[
    ("1.txt", "Information retrieval systems rank documents for a query."),
    ("2.txt", "A boolean query combines terms with AND, OR and NOT."),
    ("3.txt", "Proximity search finds terms appearing near each other in documents."),
    ("10.txt", "Stemming maps retrieval and retrieving onto one term."),
    ("11.txt", "Stopwords such as the and a are dropped before indexing."),
];

async fn upload_all(store: &DocumentStore) -> Vec<PendingDocument> {
    store.ensure_dir().await.unwrap();
    let mut pending = Vec::new();
    for (name, text) in DOCS {
        let filename = secure_filename(name);
        let path = store.save(&filename, text.as_bytes()).await.unwrap();
        pending.push(PendingDocument::from_file(doc_id_from_filename(&filename), path));
    }
    pending
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_upload_index_and_query() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path().join("uploads"));
    let engine = SearchEngine::new();
    engine.set_stopwords(["the", "a", "and", "of"].iter().map(|s| s.to_string()).collect());

    let pending = upload_all(&store).await;
    let report = index_batch(&engine, pending, BatchOptions { max_workers: 2, excerpt_chars: 200 }).await;
    assert_eq!(report.processed, DOCS.len());
    assert!(report.errors.is_empty());

    // numeric order, not lexical
    assert_eq!(
        engine.search("retrieval", QueryType::Boolean).unwrap(),
        vec!["1", "10"]
    );
    assert_eq!(
        engine.search("query OR stemming", QueryType::Boolean).unwrap(),
        vec!["1", "2", "10"]
    );
    assert_eq!(
        engine.search("documents AND NOT query", QueryType::Boolean).unwrap(),
        vec!["1", "3"]
    );
    assert_eq!(
        engine.search("terms near /2", QueryType::Proximity).unwrap(),
        vec!["3"]
    );
    assert!(engine.search("the", QueryType::Boolean).unwrap().is_empty());

    let stored = store.read("10").await.unwrap().unwrap();
    assert_eq!(stored.content, DOCS[3].1);
}

#[tokio::test]
async fn test_concurrency_does_not_change_the_index() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());

    let sequential = SearchEngine::new();
    index_batch(&sequential, upload_all(&store).await, BatchOptions { max_workers: 1, excerpt_chars: 200 }).await;

    let concurrent = SearchEngine::new();
    index_batch(&concurrent, upload_all(&store).await, BatchOptions { max_workers: 4, excerpt_chars: 200 }).await;

    assert_eq!(sequential.snapshot(), concurrent.snapshot());
}

#[tokio::test]
async fn test_clear_resets_index_and_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let store = DocumentStore::new(dir.path());
    let engine = SearchEngine::new();
    index_batch(&engine, upload_all(&store).await, BatchOptions::default()).await;

    engine.clear();
    assert_eq!(store.clear().await.unwrap(), DOCS.len());

    let stats = engine.stats();
    assert_eq!(stats.processed_files, 0);
    assert_eq!(stats.unique_terms, 0);
    assert!(engine.search("retrieval", QueryType::Boolean).unwrap().is_empty());
    assert!(store.read("1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_non_numeric_upload_surfaces_sort_error() {
    let engine = SearchEngine::new();
    let pending = vec![
        PendingDocument::from_text("4", "shared words"),
        PendingDocument::from_text("readme", "shared words"),
    ];
    index_batch(&engine, pending, BatchOptions::default()).await;

    assert!(matches!(
        engine.search("shared", QueryType::Boolean),
        Err(SearchError::NonNumericDocId(_))
    ));
    assert!(matches!(engine.search("", QueryType::Boolean), Err(SearchError::EmptyQuery)));
}
