//! # Dispatcher
//!
//! One value owns the ports, the document and the scroll state; `dispatch`
//! is the single entry point for every UI event. Handlers fetch first and
//! patch second; the document lock is never held across a network await,
//! so overlapping dispatches interleave at the fetch boundary. Duplicate
//! like/follow requests are allowed and the last response to arrive wins,
//! while the scroll guard keeps next-page fetches single-flight.

use domains::document::{Document, Element, NodeId};
use domains::error::PatchError;
use domains::models::SelectedFile;
use domains::ports::{ConfirmPrompt, FileReader, TimelineApi};
use tokio::sync::Mutex;

use crate::error::InteractionError;
use crate::event::{resolve_click, resolve_submit, ClickAction, ScrollMetrics, SubmitAction, UiEvent};
use crate::fragments;
use crate::scroll::{ScrollController, NEAR_BOTTOM_PX};

const LIKED_COLOR: &str = "#e91e63";
const NOT_LIKED_COLOR: &str = "#657786";
const FOLLOW_LABEL: &str = "Follow";
const UNFOLLOW_LABEL: &str = "Unfollow";
const DELETE_CONFIRM: &str = "Delete this post?";

pub struct Dispatcher {
    api: Box<dyn TimelineApi>,
    prompt: Box<dyn ConfirmPrompt>,
    reader: Box<dyn FileReader>,
    doc: Mutex<Document>,
    scroll: Mutex<ScrollController>,
    scroll_threshold_px: f64,
}

impl Dispatcher {
    pub fn new(
        api: Box<dyn TimelineApi>,
        prompt: Box<dyn ConfirmPrompt>,
        reader: Box<dyn FileReader>,
        document: Document,
    ) -> Self {
        Self {
            api,
            prompt,
            reader,
            doc: Mutex::new(document),
            scroll: Mutex::new(ScrollController::new()),
            scroll_threshold_px: NEAR_BOTTOM_PX,
        }
    }

    pub fn with_scroll_threshold(mut self, px: f64) -> Self {
        self.scroll_threshold_px = px;
        self
    }

    /// The live document, for embedders that need to synthesize events or
    /// render the current state.
    pub fn document(&self) -> &Mutex<Document> {
        &self.doc
    }

    /// The page the last begun fetch asked for (1 = server-rendered page).
    pub async fn current_page(&self) -> u32 {
        self.scroll.lock().await.page()
    }

    /// Handles one event, logging any failure. The display is only ever
    /// changed by a successful response; a failed interaction is a silent
    /// no-op from the user's point of view.
    pub async fn dispatch(&self, event: UiEvent) {
        if let Err(error) = self.try_dispatch(event).await {
            tracing::error!(%error, "interaction failed");
        }
    }

    /// Same as [`dispatch`](Self::dispatch) but surfaces the failure,
    /// which the tests assert on.
    pub async fn try_dispatch(&self, event: UiEvent) -> Result<(), InteractionError> {
        match event {
            UiEvent::Click { target } => {
                let action = {
                    let doc = self.doc.lock().await;
                    resolve_click(&doc, target)
                };
                match action {
                    Some(ClickAction::ToggleLike { button, post_id }) => {
                        self.toggle_like(button, post_id).await
                    }
                    Some(ClickAction::ToggleComments { post_id }) => {
                        self.toggle_comments(post_id).await
                    }
                    Some(ClickAction::DeletePost { post_id }) => self.delete_post(post_id).await,
                    Some(ClickAction::ToggleFollow { button, user_id }) => {
                        self.toggle_follow(button, user_id).await
                    }
                    Some(ClickAction::RemovePreview) => self.remove_preview().await,
                    None => Ok(()),
                }
            }
            UiEvent::Submit { target } => {
                let action = {
                    let doc = self.doc.lock().await;
                    resolve_submit(&doc, target)
                };
                match action {
                    Some(SubmitAction::CreateComment { form, post_id }) => {
                        self.submit_comment(form, post_id).await
                    }
                    None => Ok(()),
                }
            }
            UiEvent::Scroll(metrics) => self.load_next_page(metrics).await,
            UiEvent::FileSelected { input, file } => self.preview_image(input, file).await,
        }
    }

    async fn toggle_like(&self, button: NodeId, post_id: i64) -> Result<(), InteractionError> {
        let outcome = self.api.toggle_like(post_id).await?;
        let mut doc = self.doc.lock().await;
        let count = doc
            .descendant(button, |el| el.has_class("like-count"))
            .ok_or(PatchError::MissingTarget("like count"))?;
        doc.set_text(count, outcome.likes.to_string());
        doc.set_style(
            button,
            "color",
            if outcome.liked { LIKED_COLOR } else { NOT_LIKED_COLOR },
        );
        Ok(())
    }

    async fn toggle_comments(&self, post_id: i64) -> Result<(), InteractionError> {
        let revealed = {
            let mut doc = self.doc.lock().await;
            let panel = doc
                .by_dom_id(&format!("comments-{post_id}"))
                .ok_or(PatchError::MissingTarget("comments panel"))?;
            let hidden = doc.style_of(panel, "display") == Some("none");
            doc.set_style(panel, "display", if hidden { "block" } else { "none" });
            hidden
        };
        if revealed {
            // The reload has its own failure boundary; a dead comments
            // endpoint must not re-hide the panel.
            if let Err(error) = self.load_comments(post_id).await {
                tracing::error!(%error, post_id, "loading comments failed");
            }
        }
        Ok(())
    }

    /// Fetches all comments and fully rebuilds the panel list.
    async fn load_comments(&self, post_id: i64) -> Result<(), InteractionError> {
        let comments = self.api.comments(post_id).await?;
        let mut doc = self.doc.lock().await;
        let list = doc
            .by_dom_id(&format!("comment-list-{post_id}"))
            .ok_or(PatchError::MissingTarget("comment list"))?;
        doc.clear_children(list);
        for comment in &comments {
            fragments::append_comment(&mut doc, list, comment);
        }
        Ok(())
    }

    async fn submit_comment(&self, form: NodeId, post_id: i64) -> Result<(), InteractionError> {
        let (input, content) = {
            let doc = self.doc.lock().await;
            let input = doc
                .descendant(form, |el| el.attribute("name") == Some("content"))
                .ok_or(PatchError::MissingTarget("comment input"))?;
            let content = doc.attr_of(input, "value").unwrap_or_default().to_string();
            (input, content)
        };

        self.api.create_comment(post_id, &content).await?;

        {
            let mut doc = self.doc.lock().await;
            doc.set_attr(input, "value", "");
        }
        if let Err(error) = self.load_comments(post_id).await {
            tracing::error!(%error, post_id, "reloading comments failed");
        }

        // Counter bump is client-side arithmetic on the displayed text, not
        // a server-confirmed count.
        let mut doc = self.doc.lock().await;
        let id_attr = post_id.to_string();
        let button = doc
            .first_match(|el| {
                el.has_class("comment-btn") && el.attribute("data-post-id") == Some(id_attr.as_str())
            })
            .ok_or(PatchError::MissingTarget("comment button"))?;
        let count = doc
            .descendant(button, |el| el.has_class("comment-count"))
            .ok_or(PatchError::MissingTarget("comment count"))?;
        let shown = doc
            .text_of(count)
            .and_then(|text| text.trim().parse::<i64>().ok())
            .unwrap_or(0);
        doc.set_text(count, (shown + 1).to_string());
        Ok(())
    }

    async fn delete_post(&self, post_id: i64) -> Result<(), InteractionError> {
        if !self.prompt.confirm(DELETE_CONFIRM).await {
            return Ok(());
        }
        self.api.delete_post(post_id).await?;
        let mut doc = self.doc.lock().await;
        let id_attr = post_id.to_string();
        let card = doc
            .first_match(|el| el.attribute("data-post-id") == Some(id_attr.as_str()))
            .ok_or(PatchError::MissingTarget("post card"))?;
        doc.remove(card);
        Ok(())
    }

    async fn toggle_follow(&self, button: NodeId, user_id: i64) -> Result<(), InteractionError> {
        let outcome = self.api.toggle_follow(user_id).await?;
        let mut doc = self.doc.lock().await;
        doc.set_text(
            button,
            if outcome.following { UNFOLLOW_LABEL } else { FOLLOW_LABEL },
        );
        doc.toggle_class(button, "btn-primary", !outcome.following);
        doc.toggle_class(button, "btn-secondary", outcome.following);
        Ok(())
    }

    async fn preview_image(
        &self,
        input: NodeId,
        file: SelectedFile,
    ) -> Result<(), InteractionError> {
        let data_url = self.reader.read_as_data_url(&file).await?;
        let mut doc = self.doc.lock().await;
        let preview = match doc.by_dom_id("image-preview") {
            Some(existing) => existing,
            None => {
                // Created once, next to the input; later selections only
                // swap the image source.
                let parent = doc
                    .parent(input)
                    .ok_or(PatchError::MissingTarget("file input parent"))?;
                let preview = doc.append(parent, Element::new("div").id("image-preview"));
                doc.append(
                    preview,
                    Element::new("img")
                        .id("preview-img")
                        .style("max-width", "200px")
                        .style("border-radius", "8px")
                        .style("margin-top", "1rem"),
                );
                doc.append(
                    preview,
                    Element::new("button")
                        .id("remove-preview")
                        .attr("type", "button")
                        .style("margin-left", "1rem")
                        .text("Remove"),
                );
                preview
            }
        };
        let img = doc
            .descendant(preview, |el| el.dom_id() == Some("preview-img"))
            .ok_or(PatchError::MissingTarget("preview image"))?;
        doc.set_attr(img, "src", data_url);
        Ok(())
    }

    async fn remove_preview(&self) -> Result<(), InteractionError> {
        let mut doc = self.doc.lock().await;
        let input = doc
            .first_match(|el| {
                el.tag() == "input"
                    && el.attribute("type") == Some("file")
                    && el.attribute("name") == Some("image")
            })
            .ok_or(PatchError::MissingTarget("file input"))?;
        doc.set_attr(input, "value", "");
        let preview = doc
            .by_dom_id("image-preview")
            .ok_or(PatchError::MissingTarget("image preview"))?;
        doc.remove(preview);
        Ok(())
    }

    async fn load_next_page(&self, metrics: ScrollMetrics) -> Result<(), InteractionError> {
        if !metrics.near_bottom(self.scroll_threshold_px) {
            return Ok(());
        }
        let page = match self.scroll.lock().await.try_begin() {
            Some(page) => page,
            None => return Ok(()),
        };
        let outcome = self.fetch_and_append(page).await;
        self.scroll.lock().await.finish();
        outcome
    }

    async fn fetch_and_append(&self, page: u32) -> Result<(), InteractionError> {
        let posts = self.api.posts_page(page).await?;
        if posts.is_empty() {
            return Ok(());
        }
        let mut doc = self.doc.lock().await;
        let container = doc
            .first_match(|el| el.has_class("posts"))
            .ok_or(PatchError::MissingTarget("posts container"))?;
        for post in &posts {
            fragments::append_post(&mut doc, container, post);
        }
        Ok(())
    }
}
