//! Core plumbing for **sift**.
//!
//! `sift-core` provides the pieces the list engine runs on, following the
//! [Elm Architecture]: state lives in a [`Component`], every change arrives as
//! a message through [`Component::update`], and side effects are returned as
//! [`Command`]s instead of being performed inline.
//!
//! # Key types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Component`] | State + `update` + `view` into a [`ratatui::layout::Rect`] |
//! | [`Command`] | A side effect: immediate message, deferred future, timer, quit |
//! | [`EventLoop`] | Single-writer loop that applies messages and runs commands on tokio |
//! | [`TestHarness`](testing::TestHarness) | Drives a component synchronously in tests |
//!
//! # Concurrency model
//!
//! One loop owns the component and applies messages strictly one at a time.
//! Deferred commands (fuzzy ranking, status timers) are spawned as detached
//! tasks; when they finish, their output is posted back to the same loop as an
//! ordinary message. Nothing but `update` ever mutates component state.
//!
//! [Elm Architecture]: https://guide.elm-lang.org/architecture/

pub mod command;
pub mod component;
pub mod runtime;
pub mod testing;

pub use command::Command;
pub use component::Component;
pub use runtime::{EventLoop, EventLoopError, EventLoopHandle};
