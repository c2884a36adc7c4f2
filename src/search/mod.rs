//! Search module - in-memory boolean and proximity retrieval / 搜索模块
//!
//! Architecture principles / 架构原则：
//! - Indexing a document is a pure function (`indexer`), safe to run in parallel
//! - `SearchEngine::merge` is the only mutator of the shared index
//! - `batch` fans indexing out over a bounded pool and merges results one at a time
//! - Query evaluators (`boolean`, `proximity`) only read
//!
//! Data flow / 数据流：
//! text → tokenizer → indexer (parallel) → merge (serialized) → engine → queries

pub mod batch;
pub mod boolean;
pub mod engine;
pub mod indexer;
pub mod proximity;
pub mod schema;
pub mod tokenizer;

pub use batch::{index_batch, BatchOptions};
pub use engine::SearchEngine;
pub use schema::{
    BatchReport, DocumentIndex, IndexFailure, IndexOutcome, IndexStats, PendingDocument, QueryType,
};
