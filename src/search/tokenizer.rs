//! Tokenizer - case folding, stopword filtering and stemming / 分词器
//!
//! Pipeline / 流程：
//! - Extract maximal runs of word characters (`\w+`) / 提取单词
//! - Lowercase / 转小写
//! - Drop stopwords (checked on the raw lowercase word, before stemming) / 过滤停用词
//! - Stem with the English Snowball stemmer / 词干提取

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

/// Global stemmer instance / 全局词干提取器实例
static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// Word character runs (letters, digits, underscore) / 单词字符序列
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("static word pattern"));

/// Reduce a single lowercase word to its canonical term / 词干提取
pub fn stem(word: &str) -> String {
    STEMMER.stem(word).into_owned()
}

/// Normalize text into the ordered sequence of indexed terms / 将文本规范化为词项序列
///
/// The position of a term in the returned vector is its token position:
/// filtered stopwords do not occupy a slot.
pub fn normalize(text: &str, stopwords: &HashSet<String>) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|token| !stopwords.contains(*token))
        .map(stem)
        .collect()
}

/// Parse an uploaded stopword list, one word per line / 解析停用词文件
pub fn parse_stopwords(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}
