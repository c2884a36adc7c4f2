//! Proximity query evaluation / 邻近查询
//!
//! Query shape: `term1 term2 /k`. A document matches when some occurrence of
//! each term lies within `k + 1` token positions of the other.

use std::collections::HashSet;

use super::schema::{InvertedIndex, PositionalIndex};
use super::tokenizer::stem;

/// Parsed `term1 term2 /k` query (terms already stemmed) / 解析后的邻近查询
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProximityQuery {
    pub first: String,
    pub second: String,
    pub distance: i64,
}

impl ProximityQuery {
    /// Parse the three-token shape; anything else is `None` / 解析查询
    pub fn parse(query: &str) -> Option<Self> {
        let mut parts = query.split_whitespace();
        let (first, second, window) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || first.contains('/') || second.contains('/') {
            return None;
        }
        let distance = window.strip_prefix('/')?.parse::<i64>().ok()?;

        Some(Self {
            first: stem(&first.to_lowercase()),
            second: stem(&second.to_lowercase()),
            distance,
        })
    }

    /// Maximum allowed gap between the two positions / 允许的最大间距
    fn max_gap(&self) -> i64 {
        self.distance.saturating_add(1)
    }
}

/// Evaluate a proximity query / 计算邻近查询
pub fn evaluate(
    query: &str,
    inverted: &InvertedIndex,
    positional: &PositionalIndex,
    stopwords: &HashSet<String>,
) -> HashSet<String> {
    let Some(query) = ProximityQuery::parse(query) else {
        return HashSet::new();
    };
    if stopwords.contains(&query.first) || stopwords.contains(&query.second) {
        return HashSet::new();
    }

    let (Some(docs1), Some(docs2)) = (inverted.get(&query.first), inverted.get(&query.second))
    else {
        return HashSet::new();
    };

    let max_gap = query.max_gap();
    docs1
        .intersection(docs2)
        .filter(|doc_id| {
            let pos1 = positions(positional, &query.first, doc_id);
            let pos2 = positions(positional, &query.second, doc_id);
            within(pos1, pos2, max_gap)
        })
        .cloned()
        .collect()
}

fn positions<'a>(positional: &'a PositionalIndex, term: &str, doc_id: &str) -> &'a [usize] {
    positional
        .get(term)
        .and_then(|docs| docs.get(doc_id))
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Existence test: stops at the first pair close enough / 存在性检测
fn within(pos1: &[usize], pos2: &[usize], max_gap: i64) -> bool {
    pos1.iter().any(|&p1| {
        pos2.iter()
            .any(|&p2| (p1 as i64 - p2 as i64).abs() <= max_gap)
    })
}
