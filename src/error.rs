use thiserror::Error;

/// The error type for fallible operations across the crate.
///
/// Every variant reflects a precondition violation at the call site, never a
/// transient fault, so none of them is worth retrying. A failed operation
/// leaves the structure it was called on exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// An insert found its key already present. The map has no upsert; the
    /// existing entry is left untouched.
    #[error("key is already present in the map")]
    DuplicateKey,

    /// A lookup or removal reached an absent slot without finding its key.
    #[error("key not found")]
    KeyNotFound,

    /// A rank query was called with a rank outside `[1, len]`.
    #[error("rank {rank} is out of range for {len} element(s)")]
    RankOutOfRange {
        /// The 1-based rank that was requested.
        rank: usize,
        /// The number of elements present at the time of the call.
        len: usize,
    },

    /// A push was attempted on a full fixed-capacity container, or an insert
    /// on a full table.
    #[error("container is at capacity")]
    CapacityExceeded,

    /// A pop or peek was attempted on an empty stack.
    #[error("stack is empty")]
    EmptyStack,
}
