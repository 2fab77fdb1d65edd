//! `TimelineApi` over HTTP.
//!
//! Every endpoint answers with the same JSON envelope: a `success` flag, an
//! optional `message`, and whichever payload fields the operation carries
//! (zero/false fields are omitted by the backend). The status line is not
//! inspected; a non-2xx with a decodable envelope behaves exactly like any
//! other rejection, and an undecodable body is a decode failure.

use std::time::Duration;

use async_trait::async_trait;
use domains::error::ApiError;
use domains::models::{Comment, FollowToggle, LikeToggle, Post};
use domains::ports::TimelineApi;
use reqwest::header;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

pub struct HttpTimelineApi {
    client: reqwest::Client,
    base_url: String,
    session_token: Option<SecretString>,
}

impl HttpTimelineApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            client,
            base_url,
            session_token: None,
        })
    }

    /// Attaches the backend's session cookie (a JWT minted at login) to
    /// every request. Without it the API routes answer as unauthenticated.
    pub fn with_session_token(mut self, token: SecretString) -> Self {
        self.session_token = Some(token);
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Envelope, ApiError> {
        let request = match &self.session_token {
            Some(token) => request.header(
                header::COOKIE,
                format!("token={}", token.expose_secret()),
            ),
            None => request,
        };
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        tracing::debug!(url = %response.url(), "timeline api response");
        let envelope: Envelope = response
            .json()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        envelope.accept()
    }
}

#[async_trait]
impl TimelineApi for HttpTimelineApi {
    async fn toggle_like(&self, post_id: i64) -> Result<LikeToggle, ApiError> {
        let url = self.endpoint(&format!("/api/posts/{post_id}/like"));
        let envelope = self
            .send(
                self.client
                    .post(url)
                    .header(header::CONTENT_TYPE, "application/json"),
            )
            .await?;
        Ok(LikeToggle {
            likes: envelope.likes.unwrap_or(0),
            liked: envelope.liked.unwrap_or(false),
        })
    }

    async fn comments(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let url = self.endpoint(&format!("/api/posts/{post_id}/comments"));
        let envelope = self.send(self.client.get(url)).await?;
        Ok(envelope.comments)
    }

    async fn create_comment(&self, post_id: i64, content: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/posts/{post_id}/comments"));
        self.send(self.client.post(url).json(&CommentBody { content }))
            .await?;
        Ok(())
    }

    async fn delete_post(&self, post_id: i64) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/api/posts/{post_id}"));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn toggle_follow(&self, user_id: i64) -> Result<FollowToggle, ApiError> {
        let url = self.endpoint(&format!("/api/users/{user_id}/follow"));
        let envelope = self
            .send(
                self.client
                    .post(url)
                    .header(header::CONTENT_TYPE, "application/json"),
            )
            .await?;
        Ok(FollowToggle {
            following: envelope.following.unwrap_or(false),
        })
    }

    async fn posts_page(&self, page: u32) -> Result<Vec<Post>, ApiError> {
        let url = self.endpoint("/api/posts");
        let envelope = self
            .send(self.client.get(url).query(&[("page", page)]))
            .await?;
        Ok(envelope.posts)
    }
}

#[derive(Serialize)]
struct CommentBody<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    message: Option<String>,
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    comments: Vec<Comment>,
    likes: Option<i64>,
    liked: Option<bool>,
    following: Option<bool>,
}

impl Envelope {
    fn accept(self) -> Result<Self, ApiError> {
        if self.success {
            Ok(self)
        } else {
            Err(ApiError::Rejected(
                self.message.unwrap_or_else(|| "no reason given".into()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_carries_the_server_message() {
        let envelope: Envelope =
            serde_json::from_str(r#"{"success": false, "message": "Unauthorized"}"#).unwrap();
        match envelope.accept() {
            Err(ApiError::Rejected(message)) => assert_eq!(message, "Unauthorized"),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn omitted_fields_default_like_the_backend_omits_them() {
        // likes: 0 and liked: false are dropped by the backend's encoder.
        let envelope: Envelope = serde_json::from_str(r#"{"success": true}"#).unwrap();
        let envelope = envelope.accept().unwrap();
        assert_eq!(envelope.likes, None);
        assert_eq!(envelope.liked, None);
        assert!(envelope.posts.is_empty());
        assert!(envelope.comments.is_empty());
    }

    #[test]
    fn posts_payload_decodes() {
        let envelope: Envelope = serde_json::from_str(
            r#"{
                "success": true,
                "posts": [{
                    "id": 3, "user_id": 2, "username": "rin", "avatar": "/a.png",
                    "content": "hey", "image_url": "", "likes": 1, "comments": 0,
                    "created_at": "2025-06-01T08:00:00Z"
                }]
            }"#,
        )
        .unwrap();
        let envelope = envelope.accept().unwrap();
        assert_eq!(envelope.posts.len(), 1);
        assert_eq!(envelope.posts[0].image(), None);
    }
}
