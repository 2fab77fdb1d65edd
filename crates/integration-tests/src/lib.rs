//! Shared fixtures for the behavioral test suite in `tests/`.

use chrono::{TimeZone, Utc};
use domains::models::{Comment, Post};

/// A timeline post with fixed counts: 3 likes, 2 comments.
pub fn post(id: i64, user_id: i64) -> Post {
    Post {
        id,
        user_id,
        username: format!("user{user_id}"),
        avatar: "/static/img/default-avatar.png".into(),
        content: format!("post {id} content"),
        image_url: None,
        likes: 3,
        comments: 2,
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
    }
}

pub fn comment(id: i64, post_id: i64, username: &str, content: &str) -> Comment {
    Comment {
        id,
        user_id: id + 100,
        post_id,
        username: username.into(),
        avatar: "/static/img/default-avatar.png".into(),
        content: content.into(),
        created_at: Utc.with_ymd_and_hms(2025, 6, 1, 10, 0, 0).unwrap(),
    }
}
