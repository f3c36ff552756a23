//! Error type shared by the tree and its adapters.

use thiserror::Error;

/// Errors surfaced by checked container operations.
///
/// Plain lookups and removals by key do not use this type: a missing key is `None`.
///
/// # Examples
///
/// ```
/// use boundary_tree::{Error, TreeMap};
///
/// let map = TreeMap::from([(1, "one")]);
/// assert_eq!(map.at(&1), Ok(&"one"));
/// assert_eq!(map.at(&4), Err(Error::OutOfRange));
/// ```
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// The node named by a [`NodeId`](crate::NodeId) is no longer in the container.
    #[error("key not found")]
    KeyNotFound,

    /// Checked access to a key that is not in the map.
    #[error("key is out of range")]
    OutOfRange,
}

/// A `Result` alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
