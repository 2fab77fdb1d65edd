//! # Wire Models
//!
//! Response shapes consumed by the interaction layer. Each value lives for
//! the duration of one handler invocation and is discarded afterwards; the
//! document tree is the only state that outlives a response.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user-authored timeline entry with display counts for likes/comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub avatar: String,
    pub content: String,
    /// Empty string from the backend means "no image".
    #[serde(default)]
    pub image_url: Option<String>,
    pub likes: i64,
    pub comments: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// The attached image, if any. The backend serializes "no image" as an
    /// empty string rather than omitting the field.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// A reply to a post, rendered chronologically as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub username: String,
    pub avatar: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of toggling the viewer's like on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeToggle {
    /// The authoritative like count after the toggle.
    pub likes: i64,
    /// Whether the viewer likes the post now.
    pub liked: bool,
}

/// Outcome of toggling the viewer's follow relationship to another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowToggle {
    pub following: bool,
}

/// A file picked through a file input, identified by its on-disk handle.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub path: PathBuf,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_url_means_no_image() {
        let json = serde_json::json!({
            "id": 7, "user_id": 1, "username": "mika", "avatar": "/a.png",
            "content": "hi", "image_url": "", "likes": 0, "comments": 0,
            "created_at": "2025-06-01T09:30:00Z"
        });
        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.image(), None);
    }

    #[test]
    fn present_image_url_is_kept() {
        let json = serde_json::json!({
            "id": 7, "user_id": 1, "username": "mika", "avatar": "/a.png",
            "content": "hi", "image_url": "/uploads/cat.png", "likes": 2,
            "comments": 1, "created_at": "2025-06-01T09:30:00Z"
        });
        let post: Post = serde_json::from_value(json).unwrap();
        assert_eq!(post.image(), Some("/uploads/cat.png"));
    }

    #[test]
    fn selected_file_takes_its_name_from_the_path() {
        let file = SelectedFile::from_path("/tmp/shots/beach.jpg");
        assert_eq!(file.name, "beach.jpg");
    }
}
