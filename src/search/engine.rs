//! Search engine - shared in-memory index state / 搜索引擎
//!
//! Primitive operations only / 仅提供原语操作：
//! - merge: apply one document's partial index / 合并局部索引
//! - set_stopwords: replace the stopword set / 替换停用词
//! - search: boolean or proximity query / 搜索
//! - clear: empty the index / 清空索引
//! - stats: aggregate sizes / 统计信息
//!
//! Batch indexing lives in `batch`; it only ever mutates through `merge`.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::schema::{DocumentIndex, IndexData, IndexStats, QueryType};
use super::{boolean, proximity};
use crate::error::{Result, SearchError};

/// Search engine / 搜索引擎
///
/// Merges and clears take the write side of `index`, so the inverted index,
/// the positional index and the document set always change together.
/// Queries hold the read side while they evaluate.
pub struct SearchEngine {
    /// Inverted + positional index + document ids / 索引数据
    index: RwLock<IndexData>,
    /// Replaced wholesale, never merged / 停用词集合
    stopwords: RwLock<Arc<HashSet<String>>>,
    /// Unix timestamp of the last merge / 最后更新时间
    last_updated: Mutex<Option<i64>>,
}

impl SearchEngine {
    /// Create an empty engine / 创建空引擎
    pub fn new() -> Self {
        Self {
            index: RwLock::new(IndexData::default()),
            stopwords: RwLock::new(Arc::new(HashSet::new())),
            last_updated: Mutex::new(None),
        }
    }

    /// Merge one document's partial index (the only index mutator) / 合并局部索引
    ///
    /// A document id is merged at most once. Returns `false` and leaves the
    /// index untouched when the id is already present.
    pub fn merge(&self, partial: DocumentIndex) -> bool {
        let mut index = self.index.write();
        if index.all_docs.contains(&partial.doc_id) {
            return false;
        }
        merge_into(&mut index, partial);
        *self.last_updated.lock() = Some(chrono::Utc::now().timestamp());
        true
    }

    /// Whether a document id has been merged / 文档是否已索引
    pub fn contains(&self, doc_id: &str) -> bool {
        self.index.read().all_docs.contains(doc_id)
    }

    /// Empty the index; idempotent / 清空索引
    pub fn clear(&self) {
        let mut index = self.index.write();
        *index = IndexData::default();
        *self.last_updated.lock() = None;
        tracing::info!("Index cleared");
    }

    /// Replace the stopword set / 替换停用词集合
    pub fn set_stopwords(&self, stopwords: HashSet<String>) -> usize {
        let count = stopwords.len();
        *self.stopwords.write() = Arc::new(stopwords);
        tracing::info!("Stopwords replaced, {} words", count);
        count
    }

    /// Snapshot of the current stopword set / 停用词快照
    pub fn stopwords(&self) -> Arc<HashSet<String>> {
        self.stopwords.read().clone()
    }

    /// Aggregate sizes of the current state / 获取统计信息
    pub fn stats(&self) -> IndexStats {
        let index = self.index.read();
        IndexStats {
            processed_files: index.all_docs.len(),
            unique_terms: index.inverted.len(),
            stopwords_count: self.stopwords.read().len(),
            last_updated: *self.last_updated.lock(),
        }
    }

    /// Copy of the whole index / 索引快照
    pub fn snapshot(&self) -> IndexData {
        self.index.read().clone()
    }

    /// Unordered boolean query result / 布尔查询
    pub fn boolean(&self, query: &str) -> HashSet<String> {
        let stopwords = self.stopwords();
        let index = self.index.read();
        boolean::evaluate(query, &index.inverted, &index.all_docs, &stopwords)
    }

    /// Unordered proximity query result / 邻近查询
    pub fn proximity(&self, query: &str) -> HashSet<String> {
        let stopwords = self.stopwords();
        let index = self.index.read();
        proximity::evaluate(query, &index.inverted, &index.positional, &stopwords)
    }

    /// Run a query and return ids in ascending numeric order / 搜索（原语操作）
    pub fn search(&self, query: &str, query_type: QueryType) -> Result<Vec<String>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let hits = match query_type {
            QueryType::Boolean => self.boolean(query),
            QueryType::Proximity => self.proximity(query),
        };
        tracing::debug!("{} query {:?} matched {} documents", query_type.as_str(), query, hits.len());
        sort_numeric(hits)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Union the partial index into the shared one / 合并逻辑
///
/// Union/append only, so merging documents in any order gives the same state.
pub fn merge_into(index: &mut IndexData, partial: DocumentIndex) {
    for (term, docs) in partial.inverted {
        index.inverted.entry(term).or_default().extend(docs);
    }
    for (term, docs) in partial.positional {
        let entry = index.positional.entry(term).or_default();
        for (doc_id, positions) in docs {
            entry.entry(doc_id).or_default().extend(positions);
        }
    }
    index.all_docs.insert(partial.doc_id);
}

/// Sort document ids by their integer value / 按数值排序文档ID
///
/// A non-numeric id is reported, not skipped.
pub fn sort_numeric(ids: HashSet<String>) -> Result<Vec<String>> {
    let mut keyed = ids
        .into_iter()
        .map(|id| match id.trim().parse::<i128>() {
            Ok(n) => Ok((n, id)),
            Err(_) => Err(SearchError::NonNumericDocId(id)),
        })
        .collect::<Result<Vec<_>>>()?;
    keyed.sort();
    Ok(keyed.into_iter().map(|(_, id)| id).collect())
}
