//! Document indexer - builds a partial index for one document / 文档索引器
//!
//! Pure functions: nothing here touches shared state, so any number of
//! documents can be indexed in parallel and merged afterwards.

use std::collections::HashSet;

use super::schema::{DocumentIndex, DocumentSource, IndexFailure, IndexOutcome, PendingDocument};
use super::tokenizer::normalize;

/// Default excerpt length in characters / 默认摘要长度
pub const DEFAULT_EXCERPT_CHARS: usize = 200;

/// Index already-decoded text / 索引文本
///
/// Positions count retained tokens only, so a filtered stopword never opens
/// a gap between its neighbours.
pub fn index_text(
    text: &str,
    doc_id: &str,
    stopwords: &HashSet<String>,
    excerpt_chars: usize,
) -> DocumentIndex {
    let mut doc = DocumentIndex {
        doc_id: doc_id.to_string(),
        ..Default::default()
    };

    for (pos, term) in normalize(text, stopwords).into_iter().enumerate() {
        doc.inverted
            .entry(term.clone())
            .or_default()
            .insert(doc_id.to_string());
        doc.positional
            .entry(term)
            .or_default()
            .entry(doc_id.to_string())
            .or_default()
            .push(pos);
    }

    let (excerpt, truncated) = excerpt(text, excerpt_chars);
    doc.excerpt = excerpt;
    doc.truncated = truncated;
    doc
}

/// Read, decode and index a pending document / 读取并索引待处理文档
///
/// Never fails outward: read errors come back as `IndexOutcome::Failed`.
pub fn index_pending(
    pending: &PendingDocument,
    stopwords: &HashSet<String>,
    excerpt_chars: usize,
) -> IndexOutcome {
    let bytes = match &pending.source {
        DocumentSource::Text(bytes) => std::borrow::Cow::Borrowed(bytes.as_slice()),
        DocumentSource::File(path) => match std::fs::read(path) {
            Ok(bytes) => std::borrow::Cow::Owned(bytes),
            Err(e) => {
                tracing::error!("Error processing file {:?}: {}", path, e);
                return IndexOutcome::Failed(IndexFailure {
                    doc_id: pending.doc_id.clone(),
                    message: e.to_string(),
                });
            }
        },
    };

    // Invalid UTF-8 is replaced, never fatal / 非法字节替换
    let text = String::from_utf8_lossy(&bytes);
    IndexOutcome::Indexed(index_text(&text, &pending.doc_id, stopwords, excerpt_chars))
}

/// First `max_chars` characters of the raw text / 截取摘要
fn excerpt(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => (text[..cut].to_string(), true),
        None => (text.to_string(), false),
    }
}
