//! # Events
//!
//! The embedder feeds raw UI events in; resolution turns the clicked or
//! submitted node into a tagged action by inspecting its classes, id and
//! `data-*` attributes, `closest`-style. One dispatch table per event type
//! rather than a stack of per-feature document listeners.

use domains::document::{Document, NodeId};
use domains::models::SelectedFile;

/// A raw gesture, carrying the target node the way a browser event carries
/// `event.target`.
#[derive(Debug)]
pub enum UiEvent {
    Click { target: NodeId },
    Submit { target: NodeId },
    Scroll(ScrollMetrics),
    FileSelected { input: NodeId, file: SelectedFile },
}

/// Viewport measurements at the moment of a scroll event.
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub page_height: f64,
}

impl ScrollMetrics {
    /// `innerHeight + scrollY >= offsetHeight - threshold`
    pub fn near_bottom(&self, threshold_px: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.page_height - threshold_px
    }
}

/// What a click on some node means, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    ToggleLike { button: NodeId, post_id: i64 },
    ToggleComments { post_id: i64 },
    DeletePost { post_id: i64 },
    ToggleFollow { button: NodeId, user_id: i64 },
    RemovePreview,
}

/// What a form submission means, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitAction {
    CreateComment { form: NodeId, post_id: i64 },
}

/// Resolves a click target to an action. Like and comment controls match
/// on the nearest ancestor-or-self with the control class (a click usually
/// lands on the count span inside the button); delete and follow match the
/// target itself. Unmatched targets and controls with an unparsable id
/// resolve to nothing.
pub fn resolve_click(doc: &Document, target: NodeId) -> Option<ClickAction> {
    let element = doc.get(target)?;

    if element.dom_id() == Some("remove-preview") {
        return Some(ClickAction::RemovePreview);
    }
    if let Some(button) = doc.closest(target, |el| el.has_class("like-btn")) {
        let post_id = doc.get(button)?.data_id("data-post-id")?;
        return Some(ClickAction::ToggleLike { button, post_id });
    }
    if let Some(button) = doc.closest(target, |el| el.has_class("comment-btn")) {
        let post_id = doc.get(button)?.data_id("data-post-id")?;
        return Some(ClickAction::ToggleComments { post_id });
    }
    if element.has_class("delete-btn") {
        let post_id = element.data_id("data-post-id")?;
        return Some(ClickAction::DeletePost { post_id });
    }
    if element.has_class("follow-btn") {
        let user_id = element.data_id("data-user-id")?;
        return Some(ClickAction::ToggleFollow { button: target, user_id });
    }
    None
}

pub fn resolve_submit(doc: &Document, target: NodeId) -> Option<SubmitAction> {
    let element = doc.get(target)?;
    if element.has_class("comment-submit") {
        let post_id = element.data_id("data-post-id")?;
        return Some(SubmitAction::CreateComment { form: target, post_id });
    }
    None
}
