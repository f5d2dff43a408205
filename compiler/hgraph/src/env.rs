//! Deoptimization environments.
//!
//! An [`Environment`] records the interpreter-visible state at a node so the
//! runtime can rebuild interpreter frames if compiled code has to bail out.
//! When calls have been inlined, one node stands for several interpreter
//! frames at once, so the environment is a chain of [`EnvFrame`]s: index 0 is
//! the innermost (inlined callee) frame and each following frame is the
//! caller of the one before it.
//!
//! Environments only point *down* at the values they keep alive. A value
//! never refers back to an environment that holds it, so the chain is acyclic
//! and can be copied frame by frame.

use crate::ids::{MethodRef, NodeId};

/// One live-value slot of an environment frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnvSlot {
    /// The slot holds the value produced by a node.
    Value(NodeId),
    /// The slot is dead, or holds a value the runtime can rematerialize
    /// without a node (e.g. the high half of a wide value).
    Absent,
}

impl EnvSlot {
    /// The node held by this slot, if any.
    #[inline]
    pub fn node(self) -> Option<NodeId> {
        match self {
            EnvSlot::Value(node) => Some(node),
            EnvSlot::Absent => None,
        }
    }
}

/// Interpreter state for one (possibly inlined) method frame.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnvFrame {
    /// Method the frame belongs to.
    pub method: MethodRef,
    /// Bytecode position to resume at in that method.
    pub dex_pc: u32,
    /// Virtual registers of the frame, in register order.
    pub slots: Vec<EnvSlot>,
}

impl EnvFrame {
    pub fn new(method: MethodRef, dex_pc: u32, slots: Vec<EnvSlot>) -> Self {
        Self {
            method,
            dex_pc,
            slots,
        }
    }

    /// Number of slots in this frame.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Chain of frames attached to a node, innermost first.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Environment {
    frames: Vec<EnvFrame>,
}

impl Environment {
    /// Build an environment from its frames, innermost first.
    ///
    /// An empty chain is representable so that [`Graph::verify`] can report
    /// it; a well-formed graph never attaches one.
    ///
    /// [`Graph::verify`]: crate::Graph::verify
    pub fn new(frames: Vec<EnvFrame>) -> Self {
        Self { frames }
    }

    /// The innermost frame.
    pub fn innermost(&self) -> Option<&EnvFrame> {
        self.frames.first()
    }

    /// Frames, innermost first.
    pub fn frames(&self) -> &[EnvFrame] {
        &self.frames
    }

    /// Number of frames in the chain (1 + inlining depth).
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// The frame shape: slot count per frame, innermost first.
    pub fn shape(&self) -> Vec<usize> {
        self.frames.iter().map(EnvFrame::len).collect()
    }

    /// Every node kept alive by the chain, in frame then slot order.
    pub fn values(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.frames
            .iter()
            .flat_map(|frame| frame.slots.iter().filter_map(|slot| slot.node()))
    }
}
