//! Error types / 错误类型

use thiserror::Error;

/// Errors surfaced by the search core / 搜索核心错误
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Empty query")]
    EmptyQuery,

    /// Result ids are ordered numerically; an id that is not an integer cannot be placed
    #[error("invalid literal for numeric document id: '{0}'")]
    NonNumericDocId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for search operations / 搜索操作结果
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Whether the caller sent something unusable (as opposed to a server-side failure)
    pub fn is_client_error(&self) -> bool {
        matches!(self, SearchError::EmptyQuery)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "Empty query");
        let err = SearchError::NonNumericDocId("intro".to_string());
        assert!(err.to_string().contains("'intro'"));
    }

    #[test]
    fn test_client_error() {
        assert!(SearchError::EmptyQuery.is_client_error());
        assert!(!SearchError::NonNumericDocId("x".into()).is_client_error());
    }
}
