//! Shared graph factories for cloner tests. Only compiled in test builds.

use hgraph::{
    DataType, DispatchKind, EnvFrame, EnvSlot, Environment, Graph, InvokeInfo, MethodRef, NodeDesc,
    NodeId, NodeKind,
};

use crate::classify::{classify, Arity, Classification};

/// Method every test graph compiles.
pub(crate) const METHOD: MethodRef = MethodRef::new(0);

pub(crate) fn graph() -> Graph {
    Graph::new(METHOD)
}

/// An `int` parameter. Parameters are never cloned, so they make good
/// operands from outside the region.
pub(crate) fn param(g: &mut Graph) -> NodeId {
    g.alloc(NodeDesc::new(NodeKind::ParameterValue, DataType::Int32), [])
}

/// An `int`-typed node of `kind`.
pub(crate) fn node(g: &mut Graph, kind: NodeKind, operands: &[NodeId]) -> NodeId {
    g.alloc(NodeDesc::new(kind, DataType::Int32), operands.iter().copied())
}

/// A call node with call-site metadata attached.
pub(crate) fn call(g: &mut Graph, kind: NodeKind, args: &[NodeId], info: InvokeInfo) -> NodeId {
    let id = node(g, kind, args);
    g.set_invoke_info(id, info);
    id
}

/// A single environment frame of `METHOD` at bytecode position 0.
pub(crate) fn frame(slots: &[EnvSlot]) -> EnvFrame {
    EnvFrame::new(METHOD, 0, slots.to_vec())
}

pub(crate) fn env(frames: Vec<EnvFrame>) -> Environment {
    Environment::new(frames)
}

/// Dispatch kind matching an invoke node kind.
pub(crate) fn dispatch_for(kind: NodeKind) -> DispatchKind {
    match kind {
        NodeKind::InvokeVirtual => DispatchKind::Virtual,
        NodeKind::InvokeInterface => DispatchKind::Interface,
        NodeKind::InvokeUnresolved => DispatchKind::Unresolved,
        NodeKind::InvokePolymorphic => DispatchKind::Polymorphic,
        _ => DispatchKind::Static,
    }
}

/// Build one node of `kind` whose operands are fresh parameters.
///
/// Clonable kinds get exactly the operand count their classification
/// expects (three for variadic kinds); other kinds get none. Calls get
/// call-site metadata.
pub(crate) fn sample_node(g: &mut Graph, kind: NodeKind) -> NodeId {
    let count = match classify(kind) {
        Classification::Clonable(arity) => arity.expected().unwrap_or(3),
        Classification::Unsupported(_) | Classification::Unclassified => 0,
    };
    let operands: Vec<NodeId> = (0..count).map(|_| param(g)).collect();
    if kind.is_invoke() {
        let info = InvokeInfo::new(MethodRef::new(7), dispatch_for(kind));
        call(g, kind, &operands, info)
    } else {
        node(g, kind, &operands)
    }
}

/// Every kind the table says can be cloned.
pub(crate) fn clonable_kinds() -> impl Iterator<Item = (NodeKind, Arity)> {
    NodeKind::ALL.iter().filter_map(|&kind| match classify(kind) {
        Classification::Clonable(arity) => Some((kind, arity)),
        _ => None,
    })
}
