//! Per-call bookkeeping of a single A* run over a [NodeStore]. The open list keeps discovery
//! order and is stably re-sorted by `f` before every selection, so nodes with equal `f` are
//! expanded in the order they were opened. Dropping the context hands every node it touched
//! back to [NodeState::None].
use crate::node::{NodeState, NodeStore};
use fxhash::FxBuildHasher;
use indexmap::IndexSet;
use log::trace;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

pub(crate) struct SearchContext<'a> {
    store: &'a mut NodeStore,
    open: FxIndexSet<usize>,
    closed: Vec<usize>,
}

impl<'a> SearchContext<'a> {
    pub fn new(store: &'a mut NodeStore) -> SearchContext<'a> {
        debug_assert!(store.idle());
        SearchContext {
            store,
            open: FxIndexSet::default(),
            closed: Vec::new(),
        }
    }

    pub fn store(&self) -> &NodeStore {
        &*self.store
    }

    pub fn state(&self, ix: usize) -> NodeState {
        self.store.state(ix)
    }

    /// Fetches or creates the node at `position`, binds it to `parent` and puts it on the
    /// frontier. Returns its store index.
    pub fn open(
        &mut self,
        position: (usize, usize),
        parent: Option<usize>,
        g: i32,
        h: i32,
    ) -> usize {
        let node = self.store.get_or_create(position, parent.is_none(), parent);
        node.g = g;
        node.h = h;
        node.state = NodeState::Open;
        let ix = self.store.index(position);
        let inserted = self.open.insert(ix);
        debug_assert!(inserted, "node {ix} opened twice");
        ix
    }

    /// Removes the open node with the lowest `f` and closes it.
    pub fn pop_best(&mut self) -> Option<usize> {
        let SearchContext { store, open, .. } = self;
        open.sort_by(|a, b| store.f(*a).cmp(&store.f(*b)));
        let ix = open.shift_remove_index(0)?;
        if let Some(node) = self.store.get_mut(ix) {
            node.state = NodeState::Closed;
            trace!("expanding {:?} with f = {}", node.position, node.f());
        }
        self.closed.push(ix);
        Some(ix)
    }

    /// Re-parents an open node if `g` improves on its current cost. The next
    /// [pop_best](Self::pop_best) picks up the new priority.
    pub fn relax(&mut self, ix: usize, parent: usize, g: i32) {
        if let Some(node) = self.store.get_mut(ix) {
            if g < node.g {
                node.g = g;
                node.parent = Some(parent);
            }
        }
    }

    /// Positions from the node after the root up to and including `ix`.
    pub fn reconstruct(&self, ix: usize) -> Vec<(usize, usize)> {
        let mut path: Vec<(usize, usize)> =
            std::iter::successors(self.store.get(ix), |node| {
                node.parent.and_then(|p| self.store.get(p))
            })
            .take_while(|node| !node.root)
            .map(|node| node.position)
            .collect();
        path.reverse();
        path
    }
}

impl Drop for SearchContext<'_> {
    fn drop(&mut self) {
        let touched = self.open.len() + self.closed.len();
        for &ix in self.open.iter().chain(self.closed.iter()) {
            self.store.release(ix);
        }
        trace!("released {touched} nodes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_keep_discovery_order() {
        let mut store = NodeStore::new(4, 1);
        let mut ctx = SearchContext::new(&mut store);
        let root = ctx.open((0, 0), None, 0, 30);
        assert_eq!(ctx.pop_best(), Some(root));
        let a = ctx.open((1, 0), Some(root), 10, 20);
        let b = ctx.open((2, 0), Some(root), 20, 10);
        let c = ctx.open((3, 0), Some(root), 5, 0);
        assert_eq!(ctx.pop_best(), Some(c));
        assert_eq!(ctx.pop_best(), Some(a));
        assert_eq!(ctx.pop_best(), Some(b));
        assert_eq!(ctx.pop_best(), None);
    }

    #[test]
    fn relax_reorders_and_reparents() {
        let mut store = NodeStore::new(3, 1);
        let mut ctx = SearchContext::new(&mut store);
        let root = ctx.open((0, 0), None, 0, 20);
        ctx.pop_best();
        let a = ctx.open((1, 0), Some(root), 10, 10);
        let b = ctx.open((2, 0), Some(root), 30, 0);
        ctx.relax(b, a, 40);
        assert_eq!(ctx.store().get(b).map(|n| n.parent), Some(Some(root)));
        ctx.relax(b, a, 15);
        assert_eq!(ctx.store().get(b).map(|n| n.parent), Some(Some(a)));
        assert_eq!(ctx.pop_best(), Some(b));
        assert_eq!(ctx.reconstruct(b), vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn drop_resets_touched_nodes() {
        let mut store = NodeStore::new(2, 2);
        {
            let mut ctx = SearchContext::new(&mut store);
            let root = ctx.open((0, 0), None, 0, 0);
            ctx.pop_best();
            ctx.open((1, 0), Some(root), 10, 0);
            assert_eq!(ctx.state(root), NodeState::Closed);
        }
        assert!(store.idle());
        assert_eq!(store.allocated(), 2);
        assert_eq!(store.get(0).map(|n| n.root), Some(true));
    }
}
