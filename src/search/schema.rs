//! Index data model / 索引数据模型

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Inverted index: term -> document ids / 倒排索引
pub type InvertedIndex = HashMap<String, HashSet<String>>;

/// Positional index: term -> document id -> token positions / 位置索引
pub type PositionalIndex = HashMap<String, HashMap<String, Vec<usize>>>;

/// The three structures that change together on every merge / 共享索引数据
///
/// Invariant: a (term, doc) pair present in `positional` is also present in
/// `inverted`, and the doc is in `all_docs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexData {
    pub inverted: InvertedIndex,
    pub positional: PositionalIndex,
    pub all_docs: HashSet<String>,
}

impl IndexData {
    pub fn is_empty(&self) -> bool {
        self.inverted.is_empty() && self.positional.is_empty() && self.all_docs.is_empty()
    }
}

/// Partial index built for a single document / 单个文档的局部索引
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    pub doc_id: String,
    pub inverted: InvertedIndex,
    pub positional: PositionalIndex,
    /// Leading characters of the raw text / 原文摘要
    pub excerpt: String,
    /// Whether the raw text was longer than the excerpt / 是否被截断
    pub truncated: bool,
}

/// Tagged per-document indexing failure / 单文档索引失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFailure {
    pub doc_id: String,
    pub message: String,
}

impl std::fmt::Display for IndexFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error processing document {}: {}", self.doc_id, self.message)
    }
}

/// Result of indexing one document / 文档索引结果
#[derive(Debug, Clone)]
pub enum IndexOutcome {
    Indexed(DocumentIndex),
    Failed(IndexFailure),
}

impl IndexOutcome {
    pub fn doc_id(&self) -> &str {
        match self {
            IndexOutcome::Indexed(doc) => &doc.doc_id,
            IndexOutcome::Failed(failure) => &failure.doc_id,
        }
    }
}

/// Where a pending document's bytes come from / 待索引文档来源
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Raw bytes already in memory / 内存中的原始字节
    Text(Vec<u8>),
    /// A file on disk, read by the worker / 磁盘文件
    File(PathBuf),
}

/// A document waiting to be indexed / 待索引文档
#[derive(Debug, Clone)]
pub struct PendingDocument {
    pub doc_id: String,
    pub source: DocumentSource,
}

impl PendingDocument {
    pub fn from_text(doc_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            doc_id: doc_id.into(),
            source: DocumentSource::Text(text.into().into_bytes()),
        }
    }

    pub fn from_file(doc_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            doc_id: doc_id.into(),
            source: DocumentSource::File(path.into()),
        }
    }
}

/// Successfully indexed document, as reported to callers / 已索引文档
#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub doc_id: String,
    pub excerpt: String,
}

/// Outcome of a whole batch / 批量索引报告
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Number of documents merged into the index / 已合并文档数
    pub processed: usize,
    pub indexed: Vec<IndexedDocument>,
    pub errors: Vec<IndexFailure>,
}

/// Aggregate sizes of the search state / 索引统计
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    pub processed_files: usize,
    pub unique_terms: usize,
    pub stopwords_count: usize,
    /// Unix timestamp of the last merge / 最后更新时间
    pub last_updated: Option<i64>,
}

/// Supported query forms / 查询类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    #[default]
    Boolean,
    Proximity,
}

impl QueryType {
    /// Anything other than "proximity" is evaluated as a boolean query / 解析查询类型
    pub fn from_name(name: &str) -> Self {
        if name == "proximity" {
            QueryType::Proximity
        } else {
            QueryType::Boolean
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Boolean => "boolean",
            QueryType::Proximity => "proximity",
        }
    }
}
