//! Integration Tests
//!
//! Full conversations through the session actor. Time is paused, so the
//! thinking and navigation delays are exact.

use super::{advance_ms, spawn_session};
use crate::models::{ActionKind, Role};

#[tokio::test(start_paused = true)]
async fn test_search_conversation() {
    let (assistant, navigator) = spawn_session(&[1200]);
    assistant.open(None).await.unwrap();

    assert!(assistant.send_message("tell me about phishing").await.unwrap());
    let state = assistant.snapshot();
    assert!(state.typing);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].role, Role::User);

    advance_ms(1300).await;

    let state = assistant.snapshot();
    assert!(!state.typing);
    assert_eq!(state.messages.len(), 2);
    let reply = &state.messages[1];
    assert_eq!(reply.role, Role::Assistant);
    assert!(reply.content.starts_with("SEARCH RESULTS"));
    assert!(reply.content.contains("Intro to Phishing"));
    assert_eq!(reply.suggestions[0].id, "cs-001");

    advance_ms(5000).await;
    assert!(navigator.visited().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_navigation_follows_reply() {
    let (assistant, navigator) = spawn_session(&[1500]);
    assistant.open(None).await.unwrap();

    assistant.send_message("go to cyber scams section").await.unwrap();

    // Reply lands at 1500 ms, navigation 1000 ms later.
    advance_ms(1600).await;
    let state = assistant.snapshot();
    assert_eq!(state.messages.len(), 2);
    let action = state.messages[1].action.clone().unwrap();
    assert_eq!(action.kind, ActionKind::Navigate);
    assert_eq!(action.target, "/cyber-scams");
    assert!(navigator.visited().is_empty());

    advance_ms(800).await;
    assert!(navigator.visited().is_empty());

    advance_ms(200).await;
    assert_eq!(navigator.visited(), vec!["/cyber-scams".to_string()]);
    let session = assistant.snapshot().session;
    assert_eq!(session.current_route, "/cyber-scams");
    assert_eq!(session.visited_routes, vec!["/".to_string(), "/cyber-scams".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_topic_question_navigates_to_topic_page() {
    let (assistant, navigator) = spawn_session(&[1000]);
    assistant.open(None).await.unwrap();

    assistant.send_message("what is machine learning?").await.unwrap();
    advance_ms(1100).await;

    let reply = assistant.snapshot().messages[1].clone();
    assert_eq!(reply.suggestions.len(), 3);
    assert!(reply.suggestions.iter().all(|item| item.category == "AI"));

    advance_ms(2000).await;
    assert_eq!(navigator.visited(), vec!["/ai".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_back_to_back_replies_stay_in_order() {
    let (assistant, _) = spawn_session(&[2500, 1000]);
    assistant.open(None).await.unwrap();

    assistant.send_message("help").await.unwrap();
    assistant.send_message("how am I doing?").await.unwrap();

    // The second reply's delay has elapsed, but it waits behind the first.
    advance_ms(1500).await;
    let state = assistant.snapshot();
    assert_eq!(state.messages.len(), 2);
    assert!(state.typing);

    advance_ms(1100).await;
    let state = assistant.snapshot();
    assert!(!state.typing);
    let log: Vec<(Role, &str)> = state.messages.iter().map(|m| (m.role, m.content.as_str())).collect();
    assert_eq!(log.len(), 4);
    assert_eq!(log[0], (Role::User, "help"));
    assert_eq!(log[1], (Role::User, "how am I doing?"));
    assert_eq!(log[2].0, Role::Assistant);
    assert!(log[2].1.starts_with("Here's what I can do"));
    assert_eq!(log[3].0, Role::Assistant);
    assert!(log[3].1.starts_with("You've visited"));
}

#[tokio::test(start_paused = true)]
async fn test_typing_tracks_pending_count() {
    let (assistant, _) = spawn_session(&[1000, 2000]);

    assistant.send_message("hello").await.unwrap();
    assistant.send_message("help").await.unwrap();

    advance_ms(1100).await;
    let state = assistant.snapshot();
    assert_eq!(state.messages.len(), 3);
    assert!(state.typing, "typing must stay set while a reply is pending");

    advance_ms(1000).await;
    let state = assistant.snapshot();
    assert_eq!(state.messages.len(), 4);
    assert!(!state.typing);
}

#[tokio::test(start_paused = true)]
async fn test_close_cancels_pending_navigation() {
    let (assistant, navigator) = spawn_session(&[1000]);
    assistant.open(None).await.unwrap();

    assistant.send_message("open the software section").await.unwrap();
    advance_ms(1100).await;
    assert_eq!(assistant.snapshot().messages.len(), 2);

    assistant.close().await.unwrap();
    advance_ms(5000).await;

    assert!(navigator.visited().is_empty());
    assert_eq!(assistant.snapshot().session.visited_routes, vec!["/".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_reply_committed_while_closed_does_not_navigate() {
    let (assistant, navigator) = spawn_session(&[1000]);
    assistant.open(None).await.unwrap();

    assistant.send_message("take me to the home page").await.unwrap();
    assistant.close().await.unwrap();
    advance_ms(5000).await;

    let state = assistant.snapshot();
    assert_eq!(state.messages.len(), 2, "pending replies survive close");
    assert!(!state.typing);
    assert!(navigator.visited().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_cancels_everything() {
    let (assistant, navigator) = spawn_session(&[1000, 1000]);
    assistant.open(None).await.unwrap();

    assistant.send_message("go to the about page").await.unwrap();
    advance_ms(1100).await;
    assistant.send_message("help").await.unwrap();

    assistant.shutdown().await.unwrap();
    advance_ms(5000).await;

    let state = assistant.snapshot();
    assert!(navigator.visited().is_empty());
    // The second reply never lands.
    assert_eq!(state.messages.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_last_handle_cancels_navigation() {
    let (assistant, navigator) = spawn_session(&[1000]);
    assistant.open(None).await.unwrap();

    assistant.send_message("go to cyber scams section").await.unwrap();
    advance_ms(1100).await;
    assert_eq!(assistant.snapshot().messages.len(), 2);

    // Navigation is due at 2000 ms; nobody holds the session any more.
    drop(assistant);
    advance_ms(5000).await;

    assert!(navigator.visited().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_committed_reply() {
    let (assistant, _) = spawn_session(&[2000]);
    let mut updates = assistant.subscribe();

    assistant.send_message("search python").await.unwrap();
    let state = updates
        .wait_for(|state| state.messages.iter().any(|m| m.role == Role::Assistant))
        .await
        .unwrap()
        .clone();

    assert!(!state.typing);
    assert!(state.messages[1].content.contains("Python for Beginners"));
}
