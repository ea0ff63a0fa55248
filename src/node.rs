/// Search status of a [Node] within the current call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeState {
    /// Not part of the running search; free for reuse.
    #[default]
    None,
    /// On the frontier.
    Open,
    /// Expanded; its cost from the root is final.
    Closed,
}

/// Per-cell search record. Created the first time its cell is reached and reused afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub position: (usize, usize),
    pub g: i32,
    pub h: i32,
    pub state: NodeState,
    pub root: bool,
    /// Store index of the node this one was reached from.
    pub parent: Option<usize>,
}

impl Node {
    fn new(position: (usize, usize)) -> Node {
        Node {
            position,
            g: 0,
            h: 0,
            state: NodeState::None,
            root: false,
            parent: None,
        }
    }

    pub fn f(&self) -> i32 {
        self.g + self.h
    }
}

/// Dense arena holding at most one [Node] per grid cell, indexed by `y * width + x`.
#[derive(Clone, Debug)]
pub struct NodeStore {
    width: usize,
    nodes: Vec<Option<Node>>,
}

impl NodeStore {
    pub fn new(width: usize, height: usize) -> NodeStore {
        NodeStore {
            width,
            nodes: vec![None; width * height],
        }
    }

    pub fn index(&self, position: (usize, usize)) -> usize {
        position.1 * self.width + position.0
    }

    pub fn get(&self, ix: usize) -> Option<&Node> {
        self.nodes.get(ix).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, ix: usize) -> Option<&mut Node> {
        self.nodes.get_mut(ix).and_then(Option::as_mut)
    }

    /// State of the node at `ix`, treating cells without a node as [NodeState::None].
    pub fn state(&self, ix: usize) -> NodeState {
        self.get(ix).map_or(NodeState::None, |n| n.state)
    }

    pub fn f(&self, ix: usize) -> i32 {
        self.get(ix).map_or(i32::MAX, Node::f)
    }

    /// Returns the node at `position`, allocating it on first use. A reused node gets its
    /// `parent` and `root` rebound and its state cleared; `g` and `h` are left for the caller.
    pub fn get_or_create(
        &mut self,
        position: (usize, usize),
        root: bool,
        parent: Option<usize>,
    ) -> &mut Node {
        let ix = self.index(position);
        let node = self.nodes[ix].get_or_insert_with(|| Node::new(position));
        debug_assert_eq!(node.position, position);
        node.parent = parent;
        node.root = root;
        node.state = NodeState::None;
        node
    }

    /// Returns the node at `ix` to [NodeState::None].
    pub fn release(&mut self, ix: usize) {
        if let Some(node) = self.get_mut(ix) {
            node.state = NodeState::None;
        }
    }

    pub fn allocated(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// True if no node is taking part in a search.
    pub fn idle(&self) -> bool {
        self.nodes
            .iter()
            .flatten()
            .all(|n| n.state == NodeState::None)
    }
}
