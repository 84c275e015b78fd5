/// Errors surfaced by list mutations that refuse to clamp.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    /// A caller-supplied position does not name an existing item.
    #[error("index {index} is out of range for a list of {len} items")]
    OutOfRange {
        /// The requested position.
        index: usize,
        /// Number of items at the time of the call.
        len: usize,
    },
}
