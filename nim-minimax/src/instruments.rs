use std::cell::Cell;

/// Hooks into the search so callers can observe it without changing its result
pub trait SearchInstruments {
    /// Called once for every node the search visits, with the depth left below it
    fn observe_node(&self, depth_remaining: usize);
}

#[derive(Debug, Clone, Copy)]
/// An empty struct that implements [SearchInstruments] as a no-op which can be used when you
/// don't want to observe the search
pub struct Instruments {}

impl SearchInstruments for Instruments {
    fn observe_node(&self, _depth_remaining: usize) {}
}

#[derive(Debug, Default)]
/// Counts the nodes visited by a search
pub struct NodeCounter {
    nodes: Cell<usize>,
}

impl NodeCounter {
    #[allow(missing_docs)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes observed so far
    pub fn nodes(&self) -> usize {
        self.nodes.get()
    }
}

impl SearchInstruments for NodeCounter {
    fn observe_node(&self, _depth_remaining: usize) {
        self.nodes.set(self.nodes.get() + 1);
    }
}
