//! Batch coordinator - bounded concurrent indexing / 批量索引协调
//!
//! Each document is indexed on the blocking pool, at most `max_workers` at a
//! time. Results are consumed by a single loop that merges them one by one in
//! completion order, so the merge step is never run concurrently with itself.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{self, StreamExt};

use super::engine::SearchEngine;
use super::indexer::index_pending;
use super::schema::{BatchReport, IndexFailure, IndexOutcome, IndexedDocument, PendingDocument};

/// Default worker concurrency / 默认并发数
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Batch indexing options / 批量索引选项
#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub max_workers: usize,
    pub excerpt_chars: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            excerpt_chars: super::indexer::DEFAULT_EXCERPT_CHARS,
        }
    }
}

/// Index a batch of documents and merge every success / 批量索引
///
/// Returns once all documents have been processed. A failed document is
/// recorded in the report and never stops its siblings.
pub async fn index_batch(
    engine: &SearchEngine,
    documents: Vec<PendingDocument>,
    options: BatchOptions,
) -> BatchReport {
    let total = documents.len();
    let max_workers = options.max_workers.max(1);
    // Stopwords are fixed for the whole batch / 整批使用同一停用词快照
    let stopwords: Arc<HashSet<String>> = engine.stopwords();

    tracing::info!("Indexing {} documents, concurrency: {}", total, max_workers);

    // First occurrence of an id wins; known ids are never re-indexed / 同ID只索引一次
    let mut report = BatchReport::default();
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(total);
    for pending in documents {
        if seen.insert(pending.doc_id.clone()) && !engine.contains(&pending.doc_id) {
            unique.push(pending);
        } else {
            report.errors.push(already_indexed(pending.doc_id));
        }
    }

    let mut outcomes = stream::iter(unique)
        .map(|pending| {
            let stopwords = stopwords.clone();
            let excerpt_chars = options.excerpt_chars;
            async move {
                let doc_id = pending.doc_id.clone();
                let task = tokio::task::spawn_blocking(move || {
                    index_pending(&pending, &stopwords, excerpt_chars)
                });
                match task.await {
                    Ok(outcome) => outcome,
                    Err(e) => IndexOutcome::Failed(IndexFailure {
                        doc_id,
                        message: format!("indexing task failed: {}", e),
                    }),
                }
            }
        })
        .buffer_unordered(max_workers);

    while let Some(outcome) = outcomes.next().await {
        match outcome {
            IndexOutcome::Indexed(doc) => {
                let indexed = IndexedDocument {
                    doc_id: doc.doc_id.clone(),
                    excerpt: doc.excerpt.clone(),
                };
                // A concurrent batch may have merged the same id meanwhile
                if engine.merge(doc) {
                    report.indexed.push(indexed);
                    report.processed += 1;
                } else {
                    report.errors.push(already_indexed(indexed.doc_id));
                }
            }
            IndexOutcome::Failed(failure) => {
                tracing::warn!("{}", failure);
                report.errors.push(failure);
            }
        }
    }

    tracing::info!(
        "Batch finished, {}/{} documents indexed, {} failed",
        report.processed,
        total,
        report.errors.len()
    );
    report
}

fn already_indexed(doc_id: String) -> IndexFailure {
    tracing::warn!("Document {} is already indexed, skipped", doc_id);
    IndexFailure {
        doc_id,
        message: "already indexed".to_string(),
    }
}
