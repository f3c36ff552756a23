use super::handle::Handle;
use super::node::Side;
use super::raw_tree::RawTree;

/// Double-ended in-order walk over a borrowed tree.
///
/// Both ends step through parent back-links; `remaining` keeps them from crossing.
pub(crate) struct RawIter<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        Self {
            tree,
            front: tree.min(),
            back: tree.max(),
            remaining: tree.len(),
        }
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }

    fn take_end(&mut self, side: Side) -> Option<(&'a K, &'a V)> {
        if self.remaining == 0 {
            return None;
        }
        let (end, step) = match side {
            Side::Left => (&mut self.front, Side::Right),
            Side::Right => (&mut self.back, Side::Left),
        };
        let handle = (*end)?;
        *end = self.tree.step(handle, step);
        self.remaining -= 1;

        let node = self.tree.node(handle);
        Some((node.key(), node.value()))
    }

    pub(crate) fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.take_end(Side::Left)
    }

    pub(crate) fn next_back(&mut self) -> Option<(&'a K, &'a V)> {
        self.take_end(Side::Right)
    }
}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}
