//! # Fragment Builders
//!
//! Pure functions from wire models to document subtrees, mirroring the
//! fixed markup the backend renders. Two flavors of post card exist on a
//! real page and both are kept: the full server-rendered card (delete
//! control for own posts, hidden comments panel, reply form) and the leaner
//! card appended by infinite scroll, which carries only the like/comment
//! controls.

use chrono::{DateTime, Utc};
use domains::document::{Document, Element, NodeId};
use domains::models::{Comment, Post};

struct CardParts {
    card: NodeId,
    header: NodeId,
    actions: NodeId,
}

fn card_skeleton(doc: &mut Document, container: NodeId, post: &Post) -> CardParts {
    let id = post.id.to_string();
    let card = doc.append(
        container,
        Element::new("div").class("post").attr("data-post-id", id.as_str()),
    );

    let header = doc.append(card, Element::new("div").class("post-header"));
    doc.append(
        header,
        Element::new("img")
            .class("avatar")
            .attr("src", post.avatar.as_str())
            .attr("alt", post.username.as_str()),
    );
    let info = doc.append(header, Element::new("div").class("post-info"));
    doc.append(info, Element::new("strong").text(post.username.as_str()));
    doc.append(
        info,
        Element::new("span")
            .class("post-time")
            .text(format_timestamp(post.created_at)),
    );

    let content = doc.append(card, Element::new("div").class("post-content"));
    doc.append(content, Element::new("p").text(post.content.as_str()));
    if let Some(url) = post.image() {
        doc.append(content, Element::new("img").class("post-image").attr("src", url));
    }

    let actions = doc.append(card, Element::new("div").class("post-actions"));
    let like = doc.append(
        actions,
        Element::new("button")
            .class("btn")
            .class("btn-sm")
            .class("like-btn")
            .attr("data-post-id", id.as_str()),
    );
    doc.append(
        like,
        Element::new("span").class("like-count").text(post.likes.to_string()),
    );
    let comment = doc.append(
        actions,
        Element::new("button")
            .class("btn")
            .class("btn-sm")
            .class("comment-btn")
            .attr("data-post-id", id.as_str()),
    );
    doc.append(
        comment,
        Element::new("span")
            .class("comment-count")
            .text(post.comments.to_string()),
    );

    CardParts { card, header, actions }
}

/// The card infinite scroll appends: header, content, like/comment
/// controls. No delete button and no comments panel; only server-rendered
/// cards carry those.
pub fn append_post(doc: &mut Document, container: NodeId, post: &Post) -> NodeId {
    card_skeleton(doc, container, post).card
}

/// The full card as the backend renders it on first load: the skeleton
/// plus a delete control on the viewer's own posts, a follow control on
/// other authors, and the hidden comments panel with its reply form.
///
/// The follow control always starts in the not-following state; only the
/// backend knows the real relationship, and the first toggle response
/// corrects the label either way.
pub fn server_card(
    doc: &mut Document,
    container: NodeId,
    post: &Post,
    viewer: Option<i64>,
) -> NodeId {
    let parts = card_skeleton(doc, container, post);
    let id = post.id.to_string();

    match viewer {
        Some(viewer_id) if viewer_id == post.user_id => {
            doc.append(
                parts.actions,
                Element::new("button")
                    .class("btn")
                    .class("btn-sm")
                    .class("delete-btn")
                    .attr("data-post-id", id.as_str())
                    .text("Delete"),
            );
        }
        Some(_) => {
            doc.append(
                parts.header,
                Element::new("button")
                    .class("btn")
                    .class("btn-sm")
                    .class("follow-btn")
                    .class("btn-primary")
                    .attr("data-user-id", post.user_id.to_string())
                    .text("Follow"),
            );
        }
        None => {}
    }

    let panel = doc.append(
        parts.card,
        Element::new("div")
            .id(format!("comments-{id}"))
            .style("display", "none"),
    );
    doc.append(panel, Element::new("div").id(format!("comment-list-{id}")));
    let form = doc.append(
        panel,
        Element::new("form")
            .class("comment-submit")
            .attr("data-post-id", id.as_str()),
    );
    doc.append(
        form,
        Element::new("input")
            .attr("type", "text")
            .attr("name", "content")
            .attr("value", ""),
    );
    doc.append(form, Element::new("button").attr("type", "submit").text("Reply"));

    parts.card
}

/// One comment row: avatar, author, localized time, body.
pub fn append_comment(doc: &mut Document, list: NodeId, comment: &Comment) -> NodeId {
    let row = doc.append(list, Element::new("div").class("comment"));
    let header = doc.append(row, Element::new("div").class("comment-header"));
    doc.append(
        header,
        Element::new("img")
            .class("avatar-sm")
            .attr("src", comment.avatar.as_str())
            .attr("alt", comment.username.as_str()),
    );
    doc.append(header, Element::new("strong").text(comment.username.as_str()));
    doc.append(
        header,
        Element::new("span")
            .class("comment-time")
            .text(format_timestamp(comment.created_at)),
    );
    doc.append(
        row,
        Element::new("p").class("comment-body").text(comment.content.as_str()),
    );
    row
}

/// The initial page: a compose form with the image file input, then the
/// timeline container with one full card per post. Stands in for the
/// backend's server-rendered template.
pub fn timeline_page(posts: &[Post], viewer: Option<i64>) -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let compose = doc.append(root, Element::new("form").class("post-form"));
    doc.append(
        compose,
        Element::new("input")
            .attr("type", "file")
            .attr("name", "image")
            .attr("value", ""),
    );

    let container = doc.append(root, Element::new("div").class("posts"));
    for post in posts {
        server_card(&mut doc, container, post, viewer);
    }
    doc
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y/%m/%d %H:%M:%S").to_string()
}
