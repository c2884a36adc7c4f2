//! Uploaded document storage / 上传文档存储
//!
//! Keeps raw uploads in a flat directory so they can be indexed from disk
//! and served back by document id. The index itself never touches this.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::utils::doc_id_from_filename;

/// Flat directory of uploaded documents / 上传文档目录
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

/// A stored document read back from disk / 读取的文档
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub doc_id: String,
    pub path: PathBuf,
    pub content: String,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist / 创建目录
    pub async fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            tokio::fs::create_dir_all(&self.root).await?;
            tracing::info!("Created upload directory: {:?}", self.root);
        }
        Ok(())
    }

    /// Write an upload under an already-sanitized name / 保存文件
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.root.join(filename);
        tokio::fs::write(&path, bytes).await?;
        Ok(path)
    }

    /// First regular file whose id matches / 按文档ID查找文件
    pub async fn find(&self, doc_id: &str) -> Result<Option<PathBuf>> {
        if !self.root.exists() {
            return Ok(None);
        }
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if doc_id_from_filename(&name) == doc_id && entry.file_type().await?.is_file() {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }

    /// Read a document back, replacing invalid UTF-8 / 读取文档内容
    pub async fn read(&self, doc_id: &str) -> Result<Option<StoredDocument>> {
        let Some(path) = self.find(doc_id).await? else {
            return Ok(None);
        };
        let bytes = tokio::fs::read(&path).await?;
        Ok(Some(StoredDocument {
            doc_id: doc_id.to_string(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            path,
        }))
    }

    /// Remove every regular file, returning how many were deleted / 删除所有文件
    pub async fn clear(&self) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut removed = 0;
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                tokio::fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }
        tracing::info!("Removed {} uploaded files", removed);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_find_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path().join("uploads"));
        store.ensure_dir().await.unwrap();

        store.save("7.txt", b"seven \xff bytes").await.unwrap();
        let doc = store.read("7").await.unwrap().unwrap();
        assert_eq!(doc.doc_id, "7");
        assert!(doc.content.starts_with("seven "));
        assert!(doc.content.ends_with(" bytes"));

        assert!(store.find("8").await.unwrap().is_none());
        assert!(store.read("8").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path());
        store.save("1.txt", b"one").await.unwrap();
        store.save("2.txt", b"two").await.unwrap();
        tokio::fs::create_dir(dir.path().join("nested")).await.unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert_eq!(store.clear().await.unwrap(), 0);
        assert!(dir.path().join("nested").exists());
    }

    #[tokio::test]
    async fn test_missing_dir() {
        let store = DocumentStore::new("/nonexistent/uploads/dir");
        assert!(store.find("1").await.unwrap().is_none());
        assert_eq!(store.clear().await.unwrap(), 0);
    }
}
