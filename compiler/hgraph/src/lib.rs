//! Node-graph IR for the optimizing backend.
//!
//! This crate provides:
//!
//! - **The arena** ([`Graph`], [`Node`], [`NodeDesc`]): every node of one
//!   compiled method, addressed by dense [`NodeId`]s, plus the basic blocks
//!   ([`Block`]) that place them.
//!
//! - **The kind catalog** ([`NodeKind`]): a closed set of node kinds that
//!   passes dispatch on. It is `#[non_exhaustive]`: a pass in another crate
//!   has to say what happens to kinds added after it was written.
//!
//! - **Deoptimization state** ([`Environment`], [`EnvFrame`], [`EnvSlot`]):
//!   the interpreter frames a node must be able to reconstruct, one frame per
//!   inlining level.
//!
//! - **Call-site metadata** ([`InvokeInfo`], [`DispatchKind`],
//!   [`InvokeFlags`]): attached to call kinds only.
//!
//! Nodes are only ever added. Passes that rewrite code allocate new nodes and
//! stop referring to old ones; the arena is dropped with the graph.

mod env;
mod error;
mod graph;
mod ids;
mod invoke;
mod kind;

pub use env::{EnvFrame, EnvSlot, Environment};
pub use error::GraphError;
pub use graph::{Block, Graph, Node, NodeDesc};
pub use ids::{BlockId, MethodRef, NodeId};
pub use invoke::{DispatchKind, InvokeFlags, InvokeInfo};
pub use kind::{DataType, NodeKind};
