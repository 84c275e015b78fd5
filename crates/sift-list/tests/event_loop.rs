//! Drives a list through the real event loop: ranking runs in spawned tasks
//! and its results come back as ordinary messages.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sift_core::{EventLoop, EventLoopError};
use sift_list::{FilterState, List, ListOptions, Message};

fn key(code: KeyCode) -> Message<String> {
    Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
}

fn fruit() -> List<String> {
    let items = ["apple", "banana", "cherry", "date", "elderberry"]
        .into_iter()
        .map(String::from)
        .collect();
    List::new(items).with_size(40, 20)
}

#[tokio::test]
async fn ranking_results_arrive_as_messages() {
    let mut event_loop = EventLoop::new(fruit());
    event_loop.send(Message::ActivateFilter);
    event_loop.send(Message::QueryChanged("rr".into()));

    event_loop.step().await.unwrap();
    event_loop.step().await.unwrap();
    assert_eq!(event_loop.component().available_len(), 5);

    // The spawned ranking task posts its result back onto the loop.
    event_loop.step().await.unwrap();
    let list = event_loop.component();
    assert_eq!(list.filter_state(), FilterState::Filtering);
    let mut names: Vec<&str> = (0..list.available_len())
        .filter_map(|i| list.available_item(i).map(String::as_str))
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["cherry", "elderberry"]);
}

#[tokio::test]
async fn keys_filter_accept_and_quit() {
    let mut event_loop = EventLoop::new(fruit());
    let handle = event_loop.handle();
    handle.send(key(KeyCode::Char('/')));
    handle.send(key(KeyCode::Char('d')));
    event_loop.step().await.unwrap();
    event_loop.step().await.unwrap();
    // Ranking result for "d".
    event_loop.step().await.unwrap();

    handle.send(key(KeyCode::Enter));
    event_loop.step().await.unwrap();
    assert!(event_loop.component().is_filtered());

    handle.send(key(KeyCode::Char('q')));
    let list = event_loop.run().await.unwrap();
    assert_eq!(list.filter_value(), "d");
}

#[tokio::test]
async fn stopped_loop_refuses_to_step() {
    let mut event_loop = EventLoop::new(fruit());
    event_loop.send(key(KeyCode::Char('q')));
    event_loop.step().await.unwrap();
    assert!(event_loop.should_quit());
    assert!(matches!(
        event_loop.step().await,
        Err(EventLoopError::Stopped)
    ));
}

#[tokio::test(start_paused = true)]
async fn status_message_clears_itself() {
    let options = ListOptions {
        status_message_lifetime: Duration::from_millis(250),
        ..ListOptions::default()
    };
    let mut event_loop = EventLoop::new(fruit().with_options(options));
    event_loop.send(Message::ShowStatus("copied".into()));
    event_loop.step().await.unwrap();
    assert_eq!(event_loop.component().status_message(), Some("copied"));

    // The paused clock auto-advances to the timer.
    event_loop.step().await.unwrap();
    assert_eq!(event_loop.component().status_message(), None);
}
