//! Directed graph with identity-keyed nodes and edges.
//!
//! # Design
//!
//! Nodes and edges live in arenas and are addressed by [`NodeId`] and
//! [`EdgeId`]. Identity is the handle, never the value: two nodes holding
//! equal values are distinct. An edge value exists independently of the
//! graph structure and is attached to at most one `(from, to)` pair at a
//! time. Relating an attached edge again moves it.
//!
//! Every node keeps two adjacency maps keyed by edge, so for every attached
//! edge `e` from `a` to `b`, `outgoing[a][e] = b` and `incoming[b][e] = a`.

use std::collections::BTreeMap;

/// A handle to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A handle to an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    value: N,
    incoming: BTreeMap<EdgeId, NodeId>,
    outgoing: BTreeMap<EdgeId, NodeId>,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    value: E,
    endpoints: Option<(NodeId, NodeId)>,
}

/// A directed graph of `N` values related by `E` values.
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<Option<NodeEntry<N>>>,
    edges: Vec<Option<EdgeEntry<E>>>,
}

impl<N, E> Graph<N, E> {
    /// Create an empty graph.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Insert a node with empty adjacency and return its handle.
    pub fn add(&mut self, value: N) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(NodeEntry {
            value,
            incoming: BTreeMap::new(),
            outgoing: BTreeMap::new(),
        }));
        id
    }

    /// Whether `id` is a node of the graph.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Whether the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every node, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_some())
            .map(|(index, _)| NodeId(index))
    }

    /// The value of node `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&N> {
        self.entry(id).map(|entry| &entry.value)
    }

    /// The value of node `id`, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut N> {
        self.entry_mut(id).map(|entry| &mut entry.value)
    }

    /// The values of two distinct nodes, both mutably.
    pub fn node_pair_mut(&mut self, a: NodeId, b: NodeId) -> Option<(&mut N, &mut N)> {
        if a == b {
            return None;
        }
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.nodes.get_mut(..=high)?.split_at_mut(high);
        let low_value = &mut head[low].as_mut()?.value;
        let high_value = &mut tail[0].as_mut()?.value;
        if a.0 < b.0 {
            Some((low_value, high_value))
        } else {
            Some((high_value, low_value))
        }
    }

    /// Remove node `id` and detach every edge incident to it. The edges
    /// themselves stay in the graph, detached. Returns the node value.
    pub fn delete(&mut self, id: NodeId) -> Option<N> {
        let entry = self.nodes.get_mut(id.0)?.take()?;

        for (&edge, &from) in &entry.incoming {
            if let Some(other) = self.entry_mut(from) {
                let _ = other.outgoing.remove(&edge);
            }
            self.set_endpoints(edge, None);
        }
        for (&edge, &to) in &entry.outgoing {
            if let Some(other) = self.entry_mut(to) {
                let _ = other.incoming.remove(&edge);
            }
            self.set_endpoints(edge, None);
        }
        Some(entry.value)
    }

    /// Insert a detached edge and return its handle.
    pub fn add_edge(&mut self, value: E) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Some(EdgeEntry {
            value,
            endpoints: None,
        }));
        id
    }

    /// The value of edge `id`.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&E> {
        self.edges
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|entry| &entry.value)
    }

    /// The value of edge `id`, mutably.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut E> {
        self.edges
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .map(|entry| &mut entry.value)
    }

    /// The `(from, to)` pair edge `id` is attached to.
    #[must_use]
    pub fn endpoints(&self, id: EdgeId) -> Option<(NodeId, NodeId)> {
        self.edges
            .get(id.0)
            .and_then(Option::as_ref)
            .and_then(|entry| entry.endpoints)
    }

    /// Remove edge `id`, detaching it first. Returns the edge value.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<E> {
        let _ = self.unrelate(id);
        self.edges.get_mut(id.0)?.take().map(|entry| entry.value)
    }

    /// Attach `edge` from `from` to `to`, moving it if it was attached
    /// elsewhere. Fails when either node or the edge is unknown.
    pub fn relate(&mut self, from: NodeId, to: NodeId, edge: EdgeId) -> bool {
        if !self.contains(from) || !self.contains(to) || self.edge(edge).is_none() {
            return false;
        }
        let _ = self.unrelate(edge);

        if let Some(entry) = self.entry_mut(from) {
            let _ = entry.outgoing.insert(edge, to);
        }
        if let Some(entry) = self.entry_mut(to) {
            let _ = entry.incoming.insert(edge, from);
        }
        self.set_endpoints(edge, Some((from, to)));
        true
    }

    /// Detach `edge` from its endpoints. Returns false when it was not
    /// attached.
    pub fn unrelate(&mut self, edge: EdgeId) -> bool {
        let Some((from, to)) = self.endpoints(edge) else {
            return false;
        };
        if let Some(entry) = self.entry_mut(from) {
            let _ = entry.outgoing.remove(&edge);
        }
        if let Some(entry) = self.entry_mut(to) {
            let _ = entry.incoming.remove(&edge);
        }
        self.set_endpoints(edge, None);
        true
    }

    /// An edge from `from` to `to`, if there is one.
    #[must_use]
    pub fn relation(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.entry(from)?
            .outgoing
            .iter()
            .find(|&(_, &target)| target == to)
            .map(|(&edge, _)| edge)
    }

    /// The edges leaving `id` with the node each one reaches.
    #[must_use]
    pub fn outgoing(&self, id: NodeId) -> Vec<(EdgeId, NodeId)> {
        self.entry(id)
            .map(|entry| entry.outgoing.iter().map(|(&e, &n)| (e, n)).collect())
            .unwrap_or_default()
    }

    /// The edges reaching `id` with the node each one leaves.
    #[must_use]
    pub fn incoming(&self, id: NodeId) -> Vec<(EdgeId, NodeId)> {
        self.entry(id)
            .map(|entry| entry.incoming.iter().map(|(&e, &n)| (e, n)).collect())
            .unwrap_or_default()
    }

    /// Nodes without incoming edges.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&id| self.entry(id).is_some_and(|entry| entry.incoming.is_empty()))
            .collect()
    }

    /// Nodes without outgoing edges.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|&id| self.entry(id).is_some_and(|entry| entry.outgoing.is_empty()))
            .collect()
    }

    /// The first node, in insertion order, whose value satisfies `query`.
    #[must_use]
    pub fn lookup(&self, mut query: impl FnMut(&N) -> bool) -> Option<NodeId> {
        self.nodes().find(|&id| self.node(id).is_some_and(&mut query))
    }

    fn entry(&self, id: NodeId) -> Option<&NodeEntry<N>> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, id: NodeId) -> Option<&mut NodeEntry<N>> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    fn set_endpoints(&mut self, edge: EdgeId, endpoints: Option<(NodeId, NodeId)>) {
        if let Some(entry) = self.edges.get_mut(edge.0).and_then(Option::as_mut) {
            entry.endpoints = endpoints;
        }
    }
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}
