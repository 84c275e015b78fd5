//! **sift** -- a filterable, scrollable selection list for [`ratatui`].
//!
//! This is the umbrella crate that re-exports everything needed to embed a
//! list from a single dependency:
//!
//! ```toml
//! [dependencies]
//! sift = "0.1"
//! ```
//!
//! # Re-exports
//!
//! * All public items from [`sift_core`] are available at the crate root
//!   ([`Component`], [`Command`], [`EventLoop`], etc.).
//! * The [`list`] module re-exports everything from [`sift_list`].
//! * [`prelude`] gathers the names most applications use.
//! * [`ratatui`], [`crossterm`], and [`tokio`] are re-exported so downstream
//!   crates do not need to depend on them directly.
//!
//! # Quick start
//!
//! ```ignore
//! use sift::prelude::*;
//!
//! #[tokio::main]
//! async fn main() {
//!     let list = List::new(vec!["apple", "banana", "cherry"]).with_size(40, 10);
//!     let mut event_loop = EventLoop::new(list);
//!     event_loop.send(Message::ActivateFilter);
//!     event_loop.send(Message::QueryChanged("an".into()));
//!     event_loop.step().await.unwrap();
//!     event_loop.step().await.unwrap();
//!     // The ranking result arrives as a later message.
//!     event_loop.step().await.unwrap();
//!     assert_eq!(event_loop.component().available_len(), 1);
//! }
//! ```

pub use sift_core::*;
pub mod list {
    pub use sift_list::*;
}

pub mod prelude {
    pub use sift_core::{Command, Component, EventLoop, EventLoopError};
    pub use sift_list::{
        DefaultDelegate, FilterState, FilteredItem, Item, ItemDelegate, List, ListError,
        ListOptions, Message, SortedRanker, UnsortedRanker,
    };
}

// Re-export dependencies for downstream crates
pub use crossterm;
pub use ratatui;
pub use tokio;
