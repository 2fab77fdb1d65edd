//! Line-driven driver.
//!
//! Each command is translated into the UI event the browser page would
//! have produced: `like 3` becomes a click on post 3's like button,
//! `scroll` a scroll event inside the near-bottom window, and so on. The
//! document is re-rendered after every interaction so the effect of each
//! patch is visible.

use domains::models::SelectedFile;
use services::{Dispatcher, ScrollMetrics, UiEvent};

pub async fn run(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    print_help();
    render(dispatcher).await;

    loop {
        let Some(line) = read_line().await? else {
            break; // EOF
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, ' ');
        let command = parts.next().unwrap_or_default();
        let first = parts.next();
        let rest = parts.next();

        match command {
            "quit" | "q" => break,
            "help" => {
                print_help();
                continue;
            }
            "show" => {}
            "like" => match parse_id(first) {
                Some(post_id) => click_control(dispatcher, "like-btn", "data-post-id", post_id).await,
                None => println!("usage: like <post-id>"),
            },
            "comments" => match parse_id(first) {
                Some(post_id) => {
                    click_control(dispatcher, "comment-btn", "data-post-id", post_id).await
                }
                None => println!("usage: comments <post-id>"),
            },
            "comment" => match (parse_id(first), rest) {
                (Some(post_id), Some(text)) => submit_comment(dispatcher, post_id, text).await,
                _ => println!("usage: comment <post-id> <text>"),
            },
            "delete" => match parse_id(first) {
                Some(post_id) => {
                    click_control(dispatcher, "delete-btn", "data-post-id", post_id).await
                }
                None => println!("usage: delete <post-id>"),
            },
            "follow" => match parse_id(first) {
                Some(user_id) => {
                    click_control(dispatcher, "follow-btn", "data-user-id", user_id).await
                }
                None => println!("usage: follow <user-id>"),
            },
            "attach" => match first {
                Some(path) => attach(dispatcher, path).await,
                None => println!("usage: attach <path>"),
            },
            "detach" => detach(dispatcher).await,
            "scroll" => scroll(dispatcher).await,
            other => {
                println!("unknown command: {other} (try `help`)");
                continue;
            }
        }
        render(dispatcher).await;
    }
    Ok(())
}

fn print_help() {
    println!(
        "commands: show | like <post> | comments <post> | comment <post> <text> | \
         delete <post> | follow <user> | attach <path> | detach | scroll | quit"
    );
}

fn parse_id(arg: Option<&str>) -> Option<i64> {
    arg?.trim().parse().ok()
}

async fn read_line() -> anyhow::Result<Option<String>> {
    let line: Result<Option<String>, std::io::Error> = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let read = std::io::stdin().read_line(&mut line)?;
        Ok(if read == 0 { None } else { Some(line) })
    })
    .await?;
    Ok(line?)
}

/// Clicks the first control with the given class and numeric data
/// attribute, exactly what tapping it on the page would target.
async fn click_control(dispatcher: &Dispatcher, class: &str, attr: &str, id: i64) {
    let wanted = id.to_string();
    let target = {
        let doc = dispatcher.document().lock().await;
        doc.first_match(|el| el.has_class(class) && el.attribute(attr) == Some(wanted.as_str()))
    };
    match target {
        Some(target) => dispatcher.dispatch(UiEvent::Click { target }).await,
        None => println!("no {class} control for id {id}"),
    }
}

async fn submit_comment(dispatcher: &Dispatcher, post_id: i64, text: &str) {
    let wanted = post_id.to_string();
    let form = {
        let mut doc = dispatcher.document().lock().await;
        let form = doc.first_match(|el| {
            el.has_class("comment-submit") && el.attribute("data-post-id") == Some(wanted.as_str())
        });
        if let Some(form) = form {
            if let Some(input) = doc.descendant(form, |el| el.attribute("name") == Some("content"))
            {
                doc.set_attr(input, "value", text);
            }
        }
        form
    };
    match form {
        Some(form) => dispatcher.dispatch(UiEvent::Submit { target: form }).await,
        None => println!("no comment form for post {post_id} (scrolled-in posts have none)"),
    }
}

async fn attach(dispatcher: &Dispatcher, path: &str) {
    let input = {
        let doc = dispatcher.document().lock().await;
        doc.first_match(|el| el.tag() == "input" && el.attribute("type") == Some("file"))
    };
    match input {
        Some(input) => {
            dispatcher
                .dispatch(UiEvent::FileSelected {
                    input,
                    file: SelectedFile::from_path(path),
                })
                .await
        }
        None => println!("no file input on this page"),
    }
}

async fn detach(dispatcher: &Dispatcher) {
    let target = {
        let doc = dispatcher.document().lock().await;
        doc.by_dom_id("remove-preview")
    };
    match target {
        Some(target) => dispatcher.dispatch(UiEvent::Click { target }).await,
        None => println!("nothing attached"),
    }
}

async fn scroll(dispatcher: &Dispatcher) {
    // Synthetic metrics landing inside the near-bottom window.
    let metrics = ScrollMetrics {
        viewport_height: 800.0,
        scroll_y: 9_200.0,
        page_height: 10_000.0,
    };
    dispatcher.dispatch(UiEvent::Scroll(metrics)).await;
}

async fn render(dispatcher: &Dispatcher) {
    let page = dispatcher.current_page().await;
    let doc = dispatcher.document().lock().await;
    println!("── timeline (through page {page}) ──");

    let Some(container) = doc.first_match(|el| el.has_class("posts")) else {
        println!("(no timeline container)");
        return;
    };
    for &card in doc.children(container) {
        let post_id = doc.attr_of(card, "data-post-id").unwrap_or("?");
        let author = doc
            .descendant(card, |el| el.tag() == "strong")
            .and_then(|node| doc.text_of(node))
            .unwrap_or("?");
        let content = doc
            .descendant(card, |el| el.tag() == "p" && !el.has_class("comment-body"))
            .and_then(|node| doc.text_of(node))
            .unwrap_or("");
        let likes = count_of(&doc, card, "like-count");
        let comments = count_of(&doc, card, "comment-count");
        println!("#{post_id} <{author}> {content}  [likes {likes} | comments {comments}]");

        let panel_visible = doc
            .by_dom_id(&format!("comments-{post_id}"))
            .map(|panel| doc.style_of(panel, "display") == Some("block"))
            .unwrap_or(false);
        if panel_visible {
            if let Some(list) = doc.by_dom_id(&format!("comment-list-{post_id}")) {
                for &row in doc.children(list) {
                    let who = doc
                        .descendant(row, |el| el.tag() == "strong")
                        .and_then(|node| doc.text_of(node))
                        .unwrap_or("?");
                    let body = doc
                        .descendant(row, |el| el.has_class("comment-body"))
                        .and_then(|node| doc.text_of(node))
                        .unwrap_or("");
                    println!("    {who}: {body}");
                }
            }
        }
    }

    if let Some(img) = doc.by_dom_id("preview-img") {
        let src = doc.attr_of(img, "src").unwrap_or("");
        let shown: String = src.chars().take(48).collect();
        println!("attachment preview: {shown}…");
    }
}

fn count_of(doc: &domains::document::Document, card: domains::document::NodeId, class: &str) -> String {
    doc.descendant(card, |el| el.has_class(class))
        .and_then(|node| doc.text_of(node))
        .unwrap_or("0")
        .to_string()
}
