//! Structural errors reported by [`Graph::verify`](crate::Graph::verify).

use crate::ids::{BlockId, NodeId};
use crate::kind::NodeKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("{node} uses {operand}, which is not in the graph")]
    DanglingOperand { node: NodeId, operand: NodeId },

    #[error("environment of {node} keeps {value} alive, which is not in the graph")]
    DanglingEnvSlot { node: NodeId, value: NodeId },

    #[error("{node} has an environment with no frames")]
    EmptyEnvironment { node: NodeId },

    #[error("{node} ({kind}) is a call but has no call-site metadata")]
    MissingInvokeInfo { node: NodeId, kind: NodeKind },

    #[error("{node} ({kind}) carries call-site metadata but is not a call")]
    UnexpectedInvokeInfo { node: NodeId, kind: NodeKind },

    #[error("{node} is listed in {block} but belongs to {owner:?}")]
    BlockMismatch {
        node: NodeId,
        block: BlockId,
        owner: Option<BlockId>,
    },

    #[error("{node} ({kind}) ends control flow but is not last in {block}")]
    ControlNotLast {
        node: NodeId,
        kind: NodeKind,
        block: BlockId,
    },

    #[error("{node} is already placed in {block}")]
    AlreadyPlaced { node: NodeId, block: BlockId },

    #[error("{node} is not in the graph")]
    UnknownNode { node: NodeId },

    #[error("{block} is not in the graph")]
    UnknownBlock { block: BlockId },
}
