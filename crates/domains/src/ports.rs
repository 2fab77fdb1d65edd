//! # Ports
//!
//! Trait boundaries between the interaction logic and the outside world.
//! Adapters implement these; the dispatcher only ever sees the traits, so
//! every handler is testable against mockall mocks without a backend or a
//! filesystem.

use async_trait::async_trait;

use crate::error::{ApiError, FileError};
use crate::models::{Comment, FollowToggle, LikeToggle, Post, SelectedFile};

/// The backend REST contract, one method per endpoint.
///
/// Implementations fetch and decode only; applying the result to the
/// display is the caller's business.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TimelineApi: Send + Sync {
    /// POST `/api/posts/{id}/like`: toggles the viewer's like.
    async fn toggle_like(&self, post_id: i64) -> Result<LikeToggle, ApiError>;

    /// GET `/api/posts/{id}/comments`: all comments, oldest first.
    async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, ApiError>;

    /// POST `/api/posts/{id}/comments` with `{content}`.
    async fn create_comment(&self, post_id: i64, content: &str) -> Result<(), ApiError>;

    /// DELETE `/api/posts/{id}`: owner only, enforced server-side.
    async fn delete_post(&self, post_id: i64) -> Result<(), ApiError>;

    /// POST `/api/users/{id}/follow`: toggles the follow relationship.
    async fn toggle_follow(&self, user_id: i64) -> Result<FollowToggle, ApiError>;

    /// GET `/api/posts?page=N`: one page of timeline posts, newest first.
    async fn posts_page(&self, page: u32) -> Result<Vec<Post>, ApiError>;
}

/// Blocking yes/no confirmation shown before destructive actions.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

/// Asynchronous file contents as a `data:` URL, the `readAsDataURL` of this
/// layer.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FileReader: Send + Sync {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String, FileError>;
}
