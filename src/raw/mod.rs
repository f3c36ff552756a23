mod arena;
mod handle;
mod iter;
mod node;
mod raw_tree;

pub(crate) use handle::Handle;
pub use handle::NodeId;
pub(crate) use iter::RawIter;
pub(crate) use node::Side;
pub(crate) use raw_tree::RawTree;

#[cfg(test)]
pub(crate) use raw_tree::tests::assert_invariants;
