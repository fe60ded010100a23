//! In-memory comment store with optional JSON file backing.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use super::error::CommentError;

/// A comment left on a region's board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub region: String,
    pub name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// On-disk layout of the comment file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CommentFile {
    comments: Vec<Comment>,
}

#[derive(Debug, Default)]
struct Inner {
    comments: Vec<Comment>,
    next_id: u64,
}

/// Thread-safe comment store.
///
/// When opened with a path, every successful `add` rewrites the file while
/// the write lock is held, so memory and disk never disagree.
#[derive(Debug, Default)]
pub struct CommentStore {
    inner: RwLock<Inner>,
    path: Option<PathBuf>,
}

impl CommentStore {
    /// Create an empty store that is not persisted.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by the JSON file at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first `add`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CommentError> {
        let path = path.into();
        let comments = read_file(&path)?;
        let next_id = comments.iter().map(|c| c.id).max().map_or(1, |id| id + 1);

        info!(path = %path.display(), comments = comments.len(), "opened comment store");

        Ok(Self {
            inner: RwLock::new(Inner { comments, next_id }),
            path: Some(path),
        })
    }

    /// All comments for `region`, oldest first.
    pub async fn list_by_region(&self, region: &str) -> Vec<Comment> {
        let guard = self.inner.read().await;
        guard
            .comments
            .iter()
            .filter(|c| c.region == region)
            .cloned()
            .collect()
    }

    /// Add a comment to `region`.
    ///
    /// `name` and `text` must be non-empty after trimming. If the store is
    /// file-backed and the write fails, the comment is not kept.
    pub async fn add(
        &self,
        region: &str,
        name: &str,
        text: &str,
    ) -> Result<Comment, CommentError> {
        let name = name.trim();
        let text = text.trim();
        if name.is_empty() {
            return Err(CommentError::Validation { field: "name" });
        }
        if text.is_empty() {
            return Err(CommentError::Validation { field: "comment" });
        }

        let mut guard = self.inner.write().await;
        let comment = Comment {
            id: guard.next_id.max(1),
            region: region.to_string(),
            name: name.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
        };

        guard.comments.push(comment.clone());
        if let Some(path) = &self.path
            && let Err(e) = write_file(path, &guard.comments)
        {
            guard.comments.pop();
            return Err(e);
        }
        guard.next_id = comment.id + 1;

        info!(id = comment.id, region = %comment.region, "added comment");
        Ok(comment)
    }
}

fn read_file(path: &Path) -> Result<Vec<Comment>, CommentError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(CommentError::Persist {
                message: format!("failed to read {}: {}", path.display(), e),
            });
        }
    };

    let file: CommentFile = serde_json::from_str(&contents).map_err(|e| CommentError::Persist {
        message: format!("failed to parse {}: {}", path.display(), e),
    })?;

    Ok(file.comments)
}

fn write_file(path: &Path, comments: &[Comment]) -> Result<(), CommentError> {
    // Create parent directories if needed
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| CommentError::Persist {
            message: format!("failed to create comment directory: {}", e),
        })?;
    }

    let file = CommentFile {
        comments: comments.to_vec(),
    };
    let json = serde_json::to_string_pretty(&file).map_err(|e| CommentError::Persist {
        message: format!("failed to serialize comments: {}", e),
    })?;

    std::fs::write(path, json).map_err(|e| CommentError::Persist {
        message: format!("failed to write comment file: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn total(store: &CommentStore) -> usize {
        store.inner.read().await.comments.len()
    }

    #[tokio::test]
    async fn list_is_scoped_and_ordered() {
        let store = CommentStore::in_memory();
        store.add("청주시 서원구", "민수", "맑음").await.unwrap();
        store.add("서울특별시", "지영", "비").await.unwrap();
        store.add("청주시 서원구", "현우", "흐림").await.unwrap();

        let comments = store.list_by_region("청주시 서원구").await;
        let texts: Vec<_> = comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["맑음", "흐림"]);
        assert!(comments[0].id < comments[1].id);

        assert_eq!(total(&store).await, 3);
    }

    #[tokio::test]
    async fn unknown_region_is_empty() {
        let store = CommentStore::in_memory();
        assert!(store.list_by_region("부산광역시").await.is_empty());
        assert_eq!(total(&store).await, 0);
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let store = CommentStore::in_memory();
        store.add("A", "n", "same").await.unwrap();
        store.add("A", "n", "same").await.unwrap();

        assert_eq!(store.list_by_region("A").await.len(), 2);
    }

    #[tokio::test]
    async fn empty_fields_rejected() {
        let store = CommentStore::in_memory();

        let err = store.add("A", "  ", "text").await.unwrap_err();
        assert!(matches!(err, CommentError::Validation { field: "name" }));

        let err = store.add("A", "name", "").await.unwrap_err();
        assert!(matches!(err, CommentError::Validation { field: "comment" }));

        assert_eq!(total(&store).await, 0);
    }

    #[tokio::test]
    async fn fields_are_trimmed() {
        let store = CommentStore::in_memory();
        let comment = store.add("A", " 민수 ", " 맑음\n").await.unwrap();

        assert_eq!(comment.name, "민수");
        assert_eq!(comment.text, "맑음");
    }

    #[tokio::test]
    async fn persisted_comments_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("comments.json");

        let store = CommentStore::open(&path).unwrap();
        assert_eq!(total(&store).await, 0);
        store.add("청주시 서원구", "민수", "맑음").await.unwrap();
        store.add("청주시 서원구", "지영", "바람").await.unwrap();
        assert!(path.exists());

        let reopened = CommentStore::open(&path).unwrap();
        let comments = reopened.list_by_region("청주시 서원구").await;
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].name, "지영");

        // IDs continue after the highest persisted one
        let next = reopened.add("청주시 서원구", "현우", "눈").await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn failed_write_keeps_memory_unchanged() {
        let dir = tempdir().unwrap();
        // A directory where the file should be makes the write fail
        let path = dir.path().join("comments.json");
        std::fs::create_dir(&path).unwrap();

        let store = CommentStore {
            inner: RwLock::new(Inner::default()),
            path: Some(path),
        };

        let err = store.add("A", "n", "t").await.unwrap_err();
        assert!(matches!(err, CommentError::Persist { .. }));
        assert_eq!(total(&store).await, 0);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("comments.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(
            CommentStore::open(&path),
            Err(CommentError::Persist { .. })
        ));
    }
}
