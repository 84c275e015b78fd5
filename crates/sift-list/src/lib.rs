//! State engine for a filterable, scrollable selection list.
//!
//! [`List`] implements [`sift_core::Component`]: feed it [`Message`]s, run
//! the [`Command`](sift_core::Command)s it returns, and render it with
//! `view`. The pieces it is built from are usable on their own.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`store`] | Master item sequence with clamping mutations |
//! | [`filter`] | Three-state filter engine and ranking snapshots |
//! | [`rank`] | Sorted and unsorted fuzzy ranking policies |
//! | [`selection`] | Clamped selected index |
//! | [`viewport`] | Incrementally reconciled visible window |
//! | [`delegate`] | Item rendering and per-item key handling |
//! | [`key`] | Key bindings, help key maps and eligibility rules |
//! | [`status`] | Transient status message with a scoped timer |
//! | [`spinner`] | Activity spinner for the title bar |
//! | [`list`] | The [`List`] component tying them together |
//! | [`runeutil`] | Display-width truncation |

pub mod delegate;
pub mod error;
pub mod filter;
pub mod item;
pub mod key;
pub mod list;
pub mod rank;
pub mod runeutil;
pub mod selection;
pub mod spinner;
pub mod status;
pub mod store;
pub mod viewport;

pub use delegate::{DefaultDelegate, DelegateStyle, ItemDelegate};
pub use error::ListError;
pub use filter::{FilterEngine, FilterState, RankingRequest};
pub use item::{FilteredItem, Item};
pub use key::{Binding, KeyCombination, KeyMap, ListKeyMap};
pub use list::{List, ListOptions, ListStyle, Message};
pub use rank::{Rank, Ranker, SortedRanker, UnsortedRanker};
pub use selection::Selection;
pub use spinner::Spinner;
pub use status::StatusMessage;
pub use store::ItemStore;
pub use viewport::{Window, WindowParams};
