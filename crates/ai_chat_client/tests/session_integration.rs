//! Integration tests for a chat session driving the real HTTP client.

mod common;

use ai_chat_client::config::Endpoints;
use ai_chat_client::render::{render_history, EMPTY_HISTORY};
use ai_chat_client::{ChatSession, Client, ExchangeId};
use serde_json::json;

fn session_for(base_url: &str) -> ChatSession<Client> {
    let client = Client::new(Endpoints::from_base_url(base_url), None).unwrap();
    ChatSession::open(client)
}

#[tokio::test]
async fn ask_shows_answer_clears_input_and_refreshes_history() {
    let store = common::Store::default();
    let base = common::serve(common::working_backend(store.clone())).await;
    let mut session = session_for(&base);
    session.settle().await;
    assert!(session.state().history().is_empty());
    assert_eq!(render_history(session.state()).trim(), EMPTY_HISTORY);

    session.set_draft("hello");
    assert!(session.submit_question());
    assert!(session.state().is_loading());
    session.settle().await;

    let state = session.state();
    assert_eq!(state.pending_answer(), Some("hi there"));
    assert_eq!(state.draft_input(), "");
    assert!(!state.is_loading());
    assert_eq!(state.error_message(), None);
    assert_eq!(store.len(), 1);
    assert_eq!(state.history().len(), 1);
    assert_eq!(state.history()[0].prompt, "hello");
}

#[tokio::test]
async fn failed_ask_keeps_input_and_shows_one_error() {
    let base = common::serve(common::misconfigured_backend()).await;
    let mut session = session_for(&base);
    session.settle().await;
    assert!(session.state().history_notice().is_some());

    session.set_draft("hello");
    session.submit_question();
    session.settle().await;

    let state = session.state();
    assert_eq!(state.draft_input(), "hello");
    assert_eq!(state.pending_answer(), None);
    assert!(!state.is_loading());
    let error = state.error_message().expect("an error message");
    assert!(error.starts_with("❌ Error: OpenAI API key not set."));
}

#[tokio::test]
async fn unreachable_backend_shows_connectivity_message() {
    let mut session = session_for(&common::unreachable_base_url());
    session.settle().await;
    assert!(session.state().history().is_empty());

    session.set_draft("anyone there?");
    session.submit_question();
    session.settle().await;

    let state = session.state();
    assert!(!state.is_loading());
    assert!(state.error_message().unwrap().contains("Cannot connect"));
}

#[tokio::test]
async fn toggling_history_row_reveals_and_hides_response() {
    let store = common::Store::with_exchanges(vec![json!({ "id": 1, "prompt": "a", "response": "b" })]);
    let base = common::serve(common::working_backend(store)).await;
    let mut session = session_for(&base);
    session.settle().await;

    session.toggle_expanded(ExchangeId::Number(1));
    assert_eq!(session.state().expanded_response(), Some("b"));

    session.toggle_expanded(ExchangeId::Number(1));
    assert_eq!(session.state().expanded_response(), None);
    assert_eq!(session.state().expanded_exchange_id(), None);
}
