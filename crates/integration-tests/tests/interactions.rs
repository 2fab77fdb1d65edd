//! Behavioral contract of the click/submit handlers against a mocked
//! backend: the document must reflect exactly what the server returned,
//! and nothing else.

use domains::document::NodeId;
use domains::error::ApiError;
use domains::models::{FollowToggle, LikeToggle};
use domains::ports::{MockConfirmPrompt, MockFileReader, MockTimelineApi};
use integration_tests::{comment, post};
use services::{fragments, Dispatcher, UiEvent};

/// Timeline with two posts: #42 by user 5 (foreign, gets a follow
/// control), #43 by the viewer (gets a delete control).
fn dispatcher(api: MockTimelineApi, prompt: MockConfirmPrompt) -> Dispatcher {
    let doc = fragments::timeline_page(&[post(42, 5), post(43, 9)], Some(9));
    Dispatcher::new(
        Box::new(api),
        Box::new(prompt),
        Box::new(MockFileReader::new()),
        doc,
    )
}

async fn control(dispatcher: &Dispatcher, class: &str, attr: &str, id: i64) -> NodeId {
    let wanted = id.to_string();
    let doc = dispatcher.document().lock().await;
    doc.first_match(|el| el.has_class(class) && el.attribute(attr) == Some(wanted.as_str()))
        .expect("control present in fixture")
}

// ── Like toggle ──────────────────────────────────────────────────────────

#[tokio::test]
async fn like_applies_server_count_and_liked_color() {
    let mut api = MockTimelineApi::new();
    api.expect_toggle_like()
        .withf(|post_id| *post_id == 42)
        .times(1)
        .returning(|_| Ok(LikeToggle { likes: 5, liked: true }));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let button = control(&dispatcher, "like-btn", "data-post-id", 42).await;
    dispatcher.dispatch(UiEvent::Click { target: button }).await;

    let doc = dispatcher.document().lock().await;
    let count = doc.descendant(button, |el| el.has_class("like-count")).unwrap();
    assert_eq!(doc.text_of(count), Some("5"));
    assert_eq!(doc.style_of(button, "color"), Some("#e91e63"));
}

#[tokio::test]
async fn unliking_applies_the_neutral_color() {
    let mut api = MockTimelineApi::new();
    api.expect_toggle_like()
        .returning(|_| Ok(LikeToggle { likes: 2, liked: false }));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let button = control(&dispatcher, "like-btn", "data-post-id", 42).await;
    dispatcher.dispatch(UiEvent::Click { target: button }).await;

    let doc = dispatcher.document().lock().await;
    assert_eq!(doc.style_of(button, "color"), Some("#657786"));
}

#[tokio::test]
async fn rejected_like_leaves_prior_count() {
    let mut api = MockTimelineApi::new();
    api.expect_toggle_like()
        .returning(|_| Err(ApiError::Rejected("Invalid post ID".into())));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let button = control(&dispatcher, "like-btn", "data-post-id", 42).await;
    dispatcher.dispatch(UiEvent::Click { target: button }).await;

    let doc = dispatcher.document().lock().await;
    let count = doc.descendant(button, |el| el.has_class("like-count")).unwrap();
    assert_eq!(doc.text_of(count), Some("3")); // fixture count untouched
    assert_eq!(doc.style_of(button, "color"), None);
}

// ── Comment panel + submission ───────────────────────────────────────────

#[tokio::test]
async fn revealing_the_panel_loads_and_replaces_the_list() {
    let mut api = MockTimelineApi::new();
    api.expect_comments()
        .withf(|post_id| *post_id == 42)
        .times(1)
        .returning(|_| Ok(vec![comment(1, 42, "aoi", "first"), comment(2, 42, "rin", "second")]));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let button = control(&dispatcher, "comment-btn", "data-post-id", 42).await;
    dispatcher.dispatch(UiEvent::Click { target: button }).await;

    {
        let doc = dispatcher.document().lock().await;
        let panel = doc.by_dom_id("comments-42").unwrap();
        assert_eq!(doc.style_of(panel, "display"), Some("block"));
        let list = doc.by_dom_id("comment-list-42").unwrap();
        assert_eq!(doc.children(list).len(), 2);
    }

    // Hiding again must not refetch (times(1) above enforces it).
    dispatcher.dispatch(UiEvent::Click { target: button }).await;
    let doc = dispatcher.document().lock().await;
    let panel = doc.by_dom_id("comments-42").unwrap();
    assert_eq!(doc.style_of(panel, "display"), Some("none"));
}

#[tokio::test]
async fn submitting_a_comment_posts_clears_and_bumps_the_counter() {
    let mut api = MockTimelineApi::new();
    api.expect_create_comment()
        .withf(|post_id, content| *post_id == 42 && content == "hello")
        .times(1)
        .returning(|_, _| Ok(()));
    api.expect_comments()
        .returning(|_| Ok(vec![comment(1, 42, "user9", "hello")]));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let form = control(&dispatcher, "comment-submit", "data-post-id", 42).await;
    {
        let mut doc = dispatcher.document().lock().await;
        let input = doc
            .descendant(form, |el| el.attribute("name") == Some("content"))
            .unwrap();
        doc.set_attr(input, "value", "hello");
    }

    dispatcher.dispatch(UiEvent::Submit { target: form }).await;

    let doc = dispatcher.document().lock().await;
    let input = doc
        .descendant(form, |el| el.attribute("name") == Some("content"))
        .unwrap();
    assert_eq!(doc.attr_of(input, "value"), Some(""));
    let button = doc
        .first_match(|el| el.has_class("comment-btn") && el.attribute("data-post-id") == Some("42"))
        .unwrap();
    let count = doc.descendant(button, |el| el.has_class("comment-count")).unwrap();
    assert_eq!(doc.text_of(count), Some("3")); // fixture showed 2
    let list = doc.by_dom_id("comment-list-42").unwrap();
    assert_eq!(doc.children(list).len(), 1);
}

#[tokio::test]
async fn failed_submission_keeps_input_and_counter() {
    let mut api = MockTimelineApi::new();
    api.expect_create_comment()
        .returning(|_, _| Err(ApiError::Transport("connection reset".into())));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let form = control(&dispatcher, "comment-submit", "data-post-id", 42).await;
    {
        let mut doc = dispatcher.document().lock().await;
        let input = doc
            .descendant(form, |el| el.attribute("name") == Some("content"))
            .unwrap();
        doc.set_attr(input, "value", "hello");
    }

    dispatcher.dispatch(UiEvent::Submit { target: form }).await;

    let doc = dispatcher.document().lock().await;
    let input = doc
        .descendant(form, |el| el.attribute("name") == Some("content"))
        .unwrap();
    assert_eq!(doc.attr_of(input, "value"), Some("hello"));
    let button = doc
        .first_match(|el| el.has_class("comment-btn") && el.attribute("data-post-id") == Some("42"))
        .unwrap();
    let count = doc.descendant(button, |el| el.has_class("comment-count")).unwrap();
    assert_eq!(doc.text_of(count), Some("2"));
}

// ── Post deletion ────────────────────────────────────────────────────────

#[tokio::test]
async fn confirmed_delete_removes_the_post_subtree() {
    let mut api = MockTimelineApi::new();
    api.expect_delete_post()
        .withf(|post_id| *post_id == 43)
        .times(1)
        .returning(|_| Ok(()));
    let mut prompt = MockConfirmPrompt::new();
    prompt.expect_confirm().times(1).returning(|_| true);
    let dispatcher = dispatcher(api, prompt);

    let button = control(&dispatcher, "delete-btn", "data-post-id", 43).await;
    dispatcher.dispatch(UiEvent::Click { target: button }).await;

    let doc = dispatcher.document().lock().await;
    assert!(doc
        .first_match(|el| el.attribute("data-post-id") == Some("43"))
        .is_none());
    // The other post is untouched.
    assert!(doc
        .first_match(|el| el.attribute("data-post-id") == Some("42"))
        .is_some());
}

#[tokio::test]
async fn declined_delete_issues_no_request() {
    let mut api = MockTimelineApi::new();
    api.expect_delete_post().times(0);
    let mut prompt = MockConfirmPrompt::new();
    prompt.expect_confirm().times(1).returning(|_| false);
    let dispatcher = dispatcher(api, prompt);

    let button = control(&dispatcher, "delete-btn", "data-post-id", 43).await;
    dispatcher.dispatch(UiEvent::Click { target: button }).await;

    let doc = dispatcher.document().lock().await;
    assert!(doc
        .first_match(|el| el.attribute("data-post-id") == Some("43"))
        .is_some());
}

// ── Follow toggle ────────────────────────────────────────────────────────

#[tokio::test]
async fn follow_toggle_swaps_label_and_classes_both_ways() {
    let mut api = MockTimelineApi::new();
    let mut seq = mockall::Sequence::new();
    api.expect_toggle_follow()
        .withf(|user_id| *user_id == 5)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(FollowToggle { following: true }));
    api.expect_toggle_follow()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(FollowToggle { following: false }));
    let dispatcher = dispatcher(api, MockConfirmPrompt::new());

    let button = control(&dispatcher, "follow-btn", "data-user-id", 5).await;

    dispatcher.dispatch(UiEvent::Click { target: button }).await;
    {
        let doc = dispatcher.document().lock().await;
        assert_eq!(doc.text_of(button), Some("Unfollow"));
        let element = doc.get(button).unwrap();
        assert!(element.has_class("btn-secondary"));
        assert!(!element.has_class("btn-primary"));
    }

    dispatcher.dispatch(UiEvent::Click { target: button }).await;
    let doc = dispatcher.document().lock().await;
    assert_eq!(doc.text_of(button), Some("Follow"));
    let element = doc.get(button).unwrap();
    assert!(element.has_class("btn-primary"));
    assert!(!element.has_class("btn-secondary"));
}
