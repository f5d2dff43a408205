//! The node arena and its basic blocks.
//!
//! A [`Graph`] owns every node of one compiled method. Nodes are never freed
//! individually: passes that duplicate or replace code allocate new nodes and
//! leave dead ones for the arena to drop with the graph. That keeps
//! [`NodeId`]s stable for the lifetime of the method and makes
//! [`Graph::node_count`] a monotone allocation counter.
//!
//! Blocks only record placement and order. A node may exist in the arena
//! without being placed in any block; freshly cloned nodes start out that way
//! and are placed by whichever pass splices them in.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::env::Environment;
use crate::error::GraphError;
use crate::ids::{next_index, BlockId, MethodRef, NodeId};
use crate::invoke::InvokeInfo;
use crate::kind::{DataType, NodeKind};

// ── Nodes ───────────────────────────────────────────────────────────

/// Immutable descriptor of a node: everything except its operands and
/// attachments.
///
/// Two nodes with equal descriptors compute the same operation; a clone is
/// built from the original's descriptor unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeDesc {
    pub kind: NodeKind,
    pub ty: DataType,
    /// Kind-specific immutable data: field offset, type index, constant
    /// bits, switch start value, condition bias.
    pub payload: u64,
    /// Bytecode position the node was built from.
    pub dex_pc: u32,
}

impl NodeDesc {
    pub fn new(kind: NodeKind, ty: DataType) -> Self {
        Self {
            kind,
            ty,
            payload: 0,
            dex_pc: 0,
        }
    }

    #[must_use]
    pub fn with_payload(mut self, payload: u64) -> Self {
        self.payload = payload;
        self
    }

    #[must_use]
    pub fn with_dex_pc(mut self, dex_pc: u32) -> Self {
        self.dex_pc = dex_pc;
        self
    }
}

/// A node in the graph arena.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    desc: NodeDesc,
    operands: SmallVec<[NodeId; 4]>,
    env: Option<Environment>,
    invoke: Option<InvokeInfo>,
    block: Option<BlockId>,
}

impl Node {
    #[inline]
    pub fn desc(&self) -> NodeDesc {
        self.desc
    }

    #[inline]
    pub fn kind(&self) -> NodeKind {
        self.desc.kind
    }

    #[inline]
    pub fn ty(&self) -> DataType {
        self.desc.ty
    }

    /// Operands in order.
    #[inline]
    pub fn operands(&self) -> &[NodeId] {
        &self.operands
    }

    /// Number of operands.
    #[inline]
    pub fn arity(&self) -> usize {
        self.operands.len()
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    pub fn invoke_info(&self) -> Option<&InvokeInfo> {
        self.invoke.as_ref()
    }

    /// Block the node is placed in, if any.
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }
}

// ── Blocks ──────────────────────────────────────────────────────────

/// A basic block: its phis, then its instructions in execution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    phis: Vec<NodeId>,
    insns: Vec<NodeId>,
}

impl Block {
    pub fn phis(&self) -> &[NodeId] {
        &self.phis
    }

    pub fn insns(&self) -> &[NodeId] {
        &self.insns
    }

    /// Every node of the block in graph order: phis first.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.phis.iter().chain(self.insns.iter()).copied()
    }
}

// ── Graph ───────────────────────────────────────────────────────────

/// Node graph of one compiled method.
#[derive(Clone, Debug)]
pub struct Graph {
    method: MethodRef,
    nodes: Vec<Node>,
    blocks: Vec<Block>,
}

impl Graph {
    pub fn new(method: MethodRef) -> Self {
        Self {
            method,
            nodes: Vec::new(),
            blocks: Vec::new(),
        }
    }

    /// The method being compiled.
    pub fn method(&self) -> MethodRef {
        self.method
    }

    /// Number of nodes ever allocated in this graph.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if `id` names a node of this graph.
    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this graph.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Every node with its ID, in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(idx, node)| (NodeId::new(next_index(idx, "node")), node))
    }

    /// Allocate a new, unplaced node.
    ///
    /// This is the only way nodes come into existence. The node has no
    /// environment or call-site metadata until they are attached.
    ///
    /// # Panics
    ///
    /// Debug-panics if an operand is not a node of this graph.
    pub fn alloc(&mut self, desc: NodeDesc, operands: impl IntoIterator<Item = NodeId>) -> NodeId {
        let id = NodeId::new(next_index(self.nodes.len(), "node"));
        let operands: SmallVec<[NodeId; 4]> = operands.into_iter().collect();
        debug_assert!(
            operands.iter().all(|&op| self.contains(op)),
            "{} ({}) built with an operand outside the graph: {operands:?}",
            id,
            desc.kind,
        );
        self.nodes.push(Node {
            desc,
            operands,
            env: None,
            invoke: None,
            block: None,
        });
        id
    }

    /// Attach (or replace) the environment of a node.
    pub fn set_environment(&mut self, id: NodeId, env: Environment) {
        self.nodes[id.index()].env = Some(env);
    }

    /// Attach (or replace) the call-site metadata of a node.
    pub fn set_invoke_info(&mut self, id: NodeId, info: InvokeInfo) {
        debug_assert!(
            self.node(id).kind().is_invoke(),
            "call-site metadata attached to {id} ({})",
            self.node(id).kind(),
        );
        self.nodes[id.index()].invoke = Some(info);
    }

    /// Create a new empty block.
    pub fn add_block(&mut self) -> BlockId {
        let id = BlockId::new(next_index(self.blocks.len(), "block"));
        self.blocks.push(Block::default());
        id
    }

    /// Look up a block.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a block of this graph.
    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    /// All blocks, indexed by `BlockId::index()`.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Place an unplaced node at the end of a block.
    ///
    /// Phis go to the block's phi list; everything else is appended to its
    /// instructions.
    pub fn append(&mut self, block: BlockId, node: NodeId) -> Result<(), GraphError> {
        if block.index() >= self.blocks.len() {
            return Err(GraphError::UnknownBlock { block });
        }
        let Some(entry) = self.nodes.get_mut(node.index()) else {
            return Err(GraphError::UnknownNode { node });
        };
        if let Some(owner) = entry.block {
            return Err(GraphError::AlreadyPlaced { node, block: owner });
        }
        entry.block = Some(block);
        let is_phi = entry.desc.kind.is_phi();
        let target = &mut self.blocks[block.index()];
        if is_phi {
            target.phis.push(node);
        } else {
            target.insns.push(node);
        }
        Ok(())
    }

    /// Check the structural invariants of the graph.
    ///
    /// Returns the first violation found, scanning nodes in allocation order
    /// and then blocks in index order.
    pub fn verify(&self) -> Result<(), GraphError> {
        for (id, node) in self.nodes() {
            if let Some(&operand) = node.operands.iter().find(|&&op| !self.contains(op)) {
                return Err(GraphError::DanglingOperand { node: id, operand });
            }
            if let Some(env) = &node.env {
                if env.depth() == 0 {
                    return Err(GraphError::EmptyEnvironment { node: id });
                }
                if let Some(value) = env.values().find(|&v| !self.contains(v)) {
                    return Err(GraphError::DanglingEnvSlot { node: id, value });
                }
            }
            match (node.kind().is_invoke(), node.invoke.is_some()) {
                (true, false) => {
                    return Err(GraphError::MissingInvokeInfo {
                        node: id,
                        kind: node.kind(),
                    })
                }
                (false, true) => {
                    return Err(GraphError::UnexpectedInvokeInfo {
                        node: id,
                        kind: node.kind(),
                    })
                }
                _ => {}
            }
        }

        let mut placed = FxHashSet::default();
        for (idx, block) in self.blocks.iter().enumerate() {
            let block_id = BlockId::new(next_index(idx, "block"));
            let last = block.insns.last().copied();
            for node_id in block.nodes() {
                let node = self
                    .get(node_id)
                    .ok_or(GraphError::UnknownNode { node: node_id })?;
                if node.block != Some(block_id) || !placed.insert(node_id) {
                    return Err(GraphError::BlockMismatch {
                        node: node_id,
                        block: block_id,
                        owner: node.block,
                    });
                }
                if node.kind().is_control_flow() && Some(node_id) != last {
                    return Err(GraphError::ControlNotLast {
                        node: node_id,
                        kind: node.kind(),
                        block: block_id,
                    });
                }
            }
        }
        Ok(())
    }
}
