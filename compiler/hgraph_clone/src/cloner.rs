//! The region cloner.
//!
//! A [`Cloner`] is built for one operation over one graph. The caller walks
//! the region to duplicate, node by node in graph order, and the cloner
//! either classifies each node (probe) or classifies and duplicates it
//! (commit). Afterwards the caller asks whether every node was clonable and
//! takes the [`CloneMap`] to splice the copies in.
//!
//! # Probe, then commit
//!
//! Allocated nodes cannot be taken back, so a pass first walks the region
//! with [`CloneConfig::probe`]. Nothing is allocated and nothing is
//! registered; only the feasibility verdict accumulates. If the probe
//! reports a failure the pass gives up with the graph untouched. Otherwise
//! it walks the same region again with a committing cloner.
//! [`clone_region`] runs both walks over a list of blocks.
//!
//! # What a clone is
//!
//! A clone has the original's descriptor (kind, type, payload, bytecode
//! position), operands resolved per [`OperandPolicy`](crate::OperandPolicy),
//! a copy of the original's environment chain, and for calls the original's
//! call-site metadata. It is not placed in any block and has no users: uses,
//! successors and placement are up to the caller.

use smallvec::SmallVec;

use hgraph::{BlockId, Environment, Graph, InvokeInfo, NodeId, NodeKind};

use crate::classify::{classify, Classification, UnsupportedReason};
use crate::config::CloneConfig;
use crate::environment::clone_environment;
use crate::feasibility::{CloneFailure, Feasibility};
use crate::map::CloneMap;
use crate::resolve::Resolver;

/// Duplicates nodes of one graph.
pub struct Cloner<'g> {
    graph: &'g mut Graph,
    config: CloneConfig,
    map: CloneMap,
    feasibility: Feasibility,
    /// Nodes classified so far (visited, not seeded).
    visited: usize,
}

impl<'g> Cloner<'g> {
    pub fn new(graph: &'g mut Graph, config: CloneConfig) -> Self {
        Self {
            graph,
            config,
            map: CloneMap::new(config.allow_overwrite),
            feasibility: Feasibility::default(),
            visited: 0,
        }
    }

    pub fn config(&self) -> CloneConfig {
        self.config
    }

    /// The graph being cloned into.
    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    // ── Walking ─────────────────────────────────────────────────────

    /// Classify one node and, when cloning is enabled and the kind allows
    /// it, clone it.
    ///
    /// A node whose operand count disagrees with its kind's arity fails the
    /// walk in both probe and commit mode.
    pub fn visit_node(&mut self, node: NodeId) {
        self.visited += 1;
        let kind = self.graph.node(node).kind();
        match classify(kind) {
            Classification::Clonable(arity) => {
                let resolver = Resolver::new(&self.map, self.config.operand_policy);
                let original = self.graph.node(node);
                match resolver.operands(original, arity) {
                    Some(operands) if self.config.cloning_enabled => {
                        self.clone_node(node, operands);
                    }
                    Some(_) => {}
                    None => {
                        let found = original.arity();
                        let expected = arity.expected().unwrap_or(found);
                        self.unsupported(
                            node,
                            kind,
                            UnsupportedReason::OperandCount { expected, found },
                        );
                    }
                }
            }
            Classification::Unsupported(reason) => self.unsupported(node, kind, reason),
            Classification::Unclassified => self.unclassified(node, kind),
        }
    }

    /// Visit nodes in the given order.
    pub fn visit_nodes(&mut self, nodes: impl IntoIterator<Item = NodeId>) {
        for node in nodes {
            self.visit_node(node);
        }
    }

    /// Visit a block's phis, then its instructions.
    pub fn visit_block(&mut self, block: BlockId) {
        let nodes: Vec<NodeId> = self.graph.block(block).nodes().collect();
        self.visit_nodes(nodes);
    }

    /// Visit blocks in the given order.
    pub fn visit_blocks(&mut self, blocks: impl IntoIterator<Item = BlockId>) {
        for block in blocks {
            self.visit_block(block);
        }
    }

    // ── Registry access ─────────────────────────────────────────────

    /// Seed the clone of `original` with a node the caller built.
    ///
    /// Later clones that use `original` are wired to `clone`. Subject to the
    /// same once-per-original rule as clones the cloner builds itself.
    pub fn add_clone_manually(&mut self, original: NodeId, clone: NodeId) {
        self.map.put(original, clone);
        self.map.mark_manual(original);
    }

    /// Seed or replace the clone of `original`, regardless of the overwrite
    /// setting.
    pub fn add_or_update_clone_manually(&mut self, original: NodeId, clone: NodeId) {
        self.map.overwrite(original, clone);
        self.map.mark_manual(original);
    }

    /// The clone of `original`, if one was built or seeded.
    pub fn get_clone(&self, original: NodeId) -> Option<NodeId> {
        self.map.get(original)
    }

    pub fn clone_map(&self) -> &CloneMap {
        &self.map
    }

    /// Copy an environment chain, resolving live values through the clones
    /// registered so far.
    pub fn clone_environment(&self, env: &Environment) -> Environment {
        clone_environment(env, &self.map)
    }

    // ── Feasibility ─────────────────────────────────────────────────

    /// Returns `true` if every visited node was clonable.
    pub fn all_cloned_okay(&self) -> bool {
        self.feasibility.all_okay()
    }

    /// Kind of the first node that could not be cloned.
    pub fn failed_kind(&self) -> Option<NodeKind> {
        self.feasibility.first_failure().map(|failure| failure.kind)
    }

    /// The first node that could not be cloned.
    pub fn failure(&self) -> Option<CloneFailure> {
        self.feasibility.first_failure()
    }

    /// End the operation: hand over the registry, or report why the region
    /// cannot be cloned.
    ///
    /// On failure the registry is dropped. Clones a committing walk built
    /// before the failure stay in the arena but nothing refers to them.
    pub fn finish(self) -> Result<CloneMap, CloneFailure> {
        tracing::debug!(
            method = %self.graph.method(),
            cloning_enabled = self.config.cloning_enabled,
            visited = self.visited,
            cloned = self.map.len().saturating_sub(self.map.manual_count()),
            seeded = self.map.manual_count(),
            failures = self.feasibility.failure_count(),
            "cloning walk finished",
        );
        match self.feasibility.first_failure() {
            Some(failure) => Err(failure),
            None => Ok(self.map),
        }
    }

    // ── Dispatch ────────────────────────────────────────────────────

    fn clone_node(&mut self, original: NodeId, operands: SmallVec<[NodeId; 4]>) {
        let node = self.graph.node(original);
        let desc = node.desc();
        let env = node
            .environment()
            .map(|env| clone_environment(env, &self.map));
        let invoke = node.invoke_info().copied();

        let clone = self.graph.alloc(desc, operands);
        if let Some(env) = env {
            self.graph.set_environment(clone, env);
        }
        if desc.kind.is_invoke() {
            self.finish_invoke_cloning(original, clone, invoke);
        }
        self.commit(original, clone);
    }

    /// Carry call-site metadata over to a cloned call.
    fn finish_invoke_cloning(&mut self, original: NodeId, clone: NodeId, info: Option<InvokeInfo>) {
        debug_assert!(
            info.is_some(),
            "{original} is a call without call-site metadata",
        );
        if let Some(info) = info {
            self.graph.set_invoke_info(clone, info);
        }
    }

    /// Register a clone the cloner built. Replacing a seeded entry makes it
    /// an automatic one.
    fn commit(&mut self, original: NodeId, clone: NodeId) {
        tracing::trace!(%original, %clone, kind = %self.graph.node(clone).kind(), "cloned");
        self.map.put(original, clone);
    }

    fn unsupported(&mut self, node: NodeId, kind: NodeKind, reason: UnsupportedReason) {
        tracing::debug!(%node, %kind, %reason, "node cannot be cloned");
        self.feasibility.record(CloneFailure { node, kind, reason });
    }

    /// A kind the classification table does not know about.
    ///
    /// Debug builds stop here so the table gets updated; release builds
    /// refuse to clone the region instead of crashing the compiler.
    fn unclassified(&mut self, node: NodeId, kind: NodeKind) {
        if cfg!(debug_assertions) {
            panic!("found node that cannot be cloned: {node} ({kind}) has no cloning classification");
        }
        tracing::error!(%node, %kind, "node kind has no cloning classification");
        self.unsupported(node, kind, UnsupportedReason::Unclassified);
    }
}

/// Clone a list of blocks if, and only if, every node in them is clonable.
///
/// Runs a probe walk over `blocks` and, when it succeeds, a committing walk
/// with `config`'s operand and overwrite settings. The `cloning_enabled`
/// setting of `config` is ignored. On failure the graph is left unchanged.
pub fn clone_region(
    graph: &mut Graph,
    blocks: &[BlockId],
    config: CloneConfig,
) -> Result<CloneMap, CloneFailure> {
    let mut probe = Cloner::new(graph, config.with_cloning(false));
    probe.visit_blocks(blocks.iter().copied());
    probe.finish()?;

    let mut commit = Cloner::new(graph, config.with_cloning(true));
    commit.visit_blocks(blocks.iter().copied());
    commit.finish()
}
