//! The asset graph.
//!
//! A [`Bundle`] holds assets as nodes and [`Reference`]s as edges. Merging
//! collapses one asset into another and re-anchors every reference that
//! touched it, rewriting the URLs written in the assets so they still reach
//! the same resources.

use pak_common::Url;
use pak_common::url::{rebase, rewrite};

use crate::asset::Asset;
use crate::graph::{EdgeId, Graph, NodeId};
use crate::reference::Reference;

/// Assets and the references between them.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    graph: Graph<Asset, Reference>,
}

impl Bundle {
    /// Create an empty bundle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            graph: Graph::new(),
        }
    }

    /// Add an asset. Every call inserts a new node, even for an asset equal
    /// to one already present.
    pub fn add(&mut self, asset: Asset) -> NodeId {
        self.graph.add(asset)
    }

    /// Whether `id` is an asset of the bundle.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.graph.contains(id)
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.len()
    }

    /// Whether the bundle has no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    /// Every asset, in insertion order.
    pub fn assets(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.nodes()
    }

    /// The asset `id`.
    #[must_use]
    pub fn asset(&self, id: NodeId) -> Option<&Asset> {
        self.graph.node(id)
    }

    /// The asset `id`, mutably.
    pub fn asset_mut(&mut self, id: NodeId) -> Option<&mut Asset> {
        self.graph.node_mut(id)
    }

    /// Remove asset `id` and every reference to or from it.
    pub fn delete(&mut self, id: NodeId) -> Option<Asset> {
        let incident: Vec<EdgeId> = self
            .graph
            .incoming(id)
            .into_iter()
            .chain(self.graph.outgoing(id))
            .map(|(edge, _)| edge)
            .collect();
        let asset = self.graph.delete(id)?;
        for edge in incident {
            let _ = self.graph.remove_edge(edge);
        }
        Some(asset)
    }

    /// Record that `from` references `to`. Fails when either asset is
    /// unknown.
    pub fn relate(&mut self, from: NodeId, to: NodeId, reference: Reference) -> Option<EdgeId> {
        if !self.contains(from) || !self.contains(to) {
            return None;
        }
        let edge = self.graph.add_edge(reference);
        self.graph.relate(from, to, edge).then_some(edge)
    }

    /// A reference from `from` to `to`, if there is one.
    #[must_use]
    pub fn relation(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.graph.relation(from, to)
    }

    /// The reference carried by `edge`.
    #[must_use]
    pub fn reference(&self, edge: EdgeId) -> Option<&Reference> {
        self.graph.edge(edge)
    }

    /// The `(from, to)` assets of `edge`.
    #[must_use]
    pub fn endpoints(&self, edge: EdgeId) -> Option<(NodeId, NodeId)> {
        self.graph.endpoints(edge)
    }

    /// References written in `id`, with the asset each one reaches.
    #[must_use]
    pub fn outgoing(&self, id: NodeId) -> Vec<(EdgeId, NodeId)> {
        self.graph.outgoing(id)
    }

    /// References to `id`, with the asset each one is written in.
    #[must_use]
    pub fn incoming(&self, id: NodeId) -> Vec<(EdgeId, NodeId)> {
        self.graph.incoming(id)
    }

    /// Assets nothing references.
    #[must_use]
    pub fn roots(&self) -> Vec<NodeId> {
        self.graph.roots()
    }

    /// Assets that reference nothing.
    #[must_use]
    pub fn leaves(&self) -> Vec<NodeId> {
        self.graph.leaves()
    }

    /// The first asset, in insertion order, satisfying `query`.
    #[must_use]
    pub fn lookup(&self, query: impl FnMut(&Asset) -> bool) -> Option<NodeId> {
        self.graph.lookup(query)
    }

    /// Collapse `source` into `target`.
    ///
    /// 1. `target` must reference `source`; the first such reference is the
    ///    one merged through.
    /// 2. The content of `source` is merged into `target`; the asset kinds
    ///    decide whether that is possible.
    /// 3. References written in `source` now live in `target`: each URL is
    ///    rebased from the location of `source` to that of `target`.
    /// 4. References to `source` now reach `target`: each URL is rewritten,
    ///    from the location of the asset it is written in, to point at
    ///    `target`.
    /// 5. `source` is deleted.
    ///
    /// Returns false, leaving the bundle untouched, when step 1 or 2 fails.
    pub fn merge(&mut self, target: NodeId, source: NodeId) -> bool {
        let Some(link) = self.graph.relation(target, source) else {
            return false;
        };
        let Some(reference) = self.graph.edge(link).cloned() else {
            return false;
        };
        let Some((into, from)) = self.graph.node_pair_mut(target, source) else {
            return false;
        };
        if !into.merge(from, &reference) {
            return false;
        }
        let source_url = from.url().clone();
        let target_url = into.url().clone();

        for (edge, to) in self.graph.outgoing(source) {
            if to == target {
                continue;
            }
            self.rewrite_reference(target, edge, |written, _| {
                rebase(written, &source_url, &target_url)
            });
            let _ = self.graph.relate(target, to, edge);
        }

        for (edge, owner) in self.graph.incoming(source) {
            if owner == target {
                continue;
            }
            self.rewrite_reference(owner, edge, |written, base| {
                rewrite(base, written, &target_url)
            });
            let _ = self.graph.relate(owner, target, edge);
        }

        let _ = self.delete(source);
        true
    }

    /// Rewrite the URL of `edge`, written in `owner`, to `compute(written,
    /// owner_url)`. References whose anchor is no longer in `owner` are left
    /// as they are.
    fn rewrite_reference(
        &mut self,
        owner: NodeId,
        edge: EdgeId,
        compute: impl FnOnce(&Url, &Url) -> Url,
    ) {
        let Some(mut reference) = self.graph.edge(edge).cloned() else {
            return;
        };
        let Some(asset) = self.graph.node_mut(owner) else {
            return;
        };
        let Some(written) = asset.written(&reference.anchor) else {
            return;
        };
        let url = compute(&written, asset.url());
        if !asset.rewrite(&mut reference, &url) {
            return;
        }
        if let Some(slot) = self.graph.edge_mut(edge) {
            *slot = reference;
        }
    }
}
