//! Operand resolution for clones.
//!
//! The fixed-arity resolvers return arrays so the common one- and
//! two-operand kinds never touch the heap; [`Resolver::variadic`] handles
//! phis and calls. All of them apply the same [`OperandPolicy`]. A node
//! whose operand count disagrees with a fixed arity resolves to `None`
//! rather than to a truncated list.

use smallvec::SmallVec;

use hgraph::{Node, NodeId};

use crate::classify::Arity;
use crate::config::OperandPolicy;
use crate::map::CloneMap;

/// Resolves the operands of an original node for its clone.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    map: &'a CloneMap,
    policy: OperandPolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(map: &'a CloneMap, policy: OperandPolicy) -> Self {
        Self { map, policy }
    }

    /// Resolve a single operand.
    #[inline]
    pub fn resolve(&self, operand: NodeId) -> NodeId {
        match self.policy {
            OperandPolicy::ThroughClones => self.map.get(operand).unwrap_or(operand),
            OperandPolicy::Originals => operand,
        }
    }

    pub fn nullary(&self, node: &Node) -> Option<[NodeId; 0]> {
        self.fixed(node)
    }

    pub fn unary(&self, node: &Node) -> Option<[NodeId; 1]> {
        self.fixed(node)
    }

    pub fn binary(&self, node: &Node) -> Option<[NodeId; 2]> {
        self.fixed(node)
    }

    pub fn ternary(&self, node: &Node) -> Option<[NodeId; 3]> {
        self.fixed(node)
    }

    pub fn quaternary(&self, node: &Node) -> Option<[NodeId; 4]> {
        self.fixed(node)
    }

    /// Resolve an operand list of any length.
    pub fn variadic(&self, node: &Node) -> SmallVec<[NodeId; 4]> {
        node.operands().iter().map(|&op| self.resolve(op)).collect()
    }

    /// Resolve the operands of a node built with `arity` operands.
    ///
    /// Returns `None` if the node's operand count disagrees with a fixed
    /// arity. Variadic arities always resolve.
    pub fn operands(&self, node: &Node, arity: Arity) -> Option<SmallVec<[NodeId; 4]>> {
        match arity {
            Arity::Nullary => self.nullary(node).map(|ops| SmallVec::from_slice(&ops)),
            Arity::Unary => self.unary(node).map(|ops| SmallVec::from_slice(&ops)),
            Arity::Binary => self.binary(node).map(|ops| SmallVec::from_slice(&ops)),
            Arity::Ternary => self.ternary(node).map(|ops| SmallVec::from_slice(&ops)),
            Arity::Quaternary => self.quaternary(node).map(|ops| SmallVec::from_slice(&ops)),
            Arity::Variadic => Some(self.variadic(node)),
        }
    }

    /// `None` unless the node has exactly `N` operands.
    fn fixed<const N: usize>(&self, node: &Node) -> Option<[NodeId; N]> {
        let operands: &[NodeId; N] = node.operands().try_into().ok()?;
        Some(operands.map(|op| self.resolve(op)))
    }
}

#[cfg(test)]
mod tests {
    use hgraph::{DataType, Graph, MethodRef, NodeDesc, NodeKind};
    use pretty_assertions::assert_eq;

    use super::*;

    /// `p0`, `p1` parameters; `add = p0 + p1`; `sel = select(p0, p1, add)`.
    fn sample() -> (Graph, [NodeId; 4]) {
        let mut g = Graph::new(MethodRef::new(0));
        let int = |kind| NodeDesc::new(kind, DataType::Int32);
        let p0 = g.alloc(int(NodeKind::ParameterValue), []);
        let p1 = g.alloc(int(NodeKind::ParameterValue), []);
        let add = g.alloc(int(NodeKind::Add), [p0, p1]);
        let sel = g.alloc(int(NodeKind::Select), [p0, p1, add]);
        (g, [p0, p1, add, sel])
    }

    #[test]
    fn through_clones_prefers_registered_clone() {
        let (g, [p0, p1, add, _]) = sample();
        let mut map = CloneMap::new(false);
        map.put(p0, NodeId::new(100));
        let r = Resolver::new(&map, OperandPolicy::ThroughClones);
        assert_eq!(r.binary(g.node(add)), Some([NodeId::new(100), p1]));
    }

    #[test]
    fn originals_ignores_registry() {
        let (g, [p0, p1, add, _]) = sample();
        let mut map = CloneMap::new(false);
        map.put(p0, NodeId::new(100));
        map.put(p1, NodeId::new(101));
        let r = Resolver::new(&map, OperandPolicy::Originals);
        assert_eq!(r.binary(g.node(add)), Some([p0, p1]));
    }

    #[test]
    fn variadic_matches_fixed() {
        let (g, [p0, _, add, sel]) = sample();
        let mut map = CloneMap::new(false);
        map.put(add, NodeId::new(50));
        let r = Resolver::new(&map, OperandPolicy::ThroughClones);
        let fixed = r.ternary(g.node(sel)).unwrap();
        let variadic = r.variadic(g.node(sel));
        assert_eq!(variadic.as_slice(), fixed.as_slice());
        assert_eq!(fixed[0], p0);
        assert_eq!(fixed[2], NodeId::new(50));
    }

    #[test]
    fn nullary_is_empty() {
        let (g, [p0, ..]) = sample();
        let map = CloneMap::new(false);
        let r = Resolver::new(&map, OperandPolicy::ThroughClones);
        assert_eq!(r.nullary(g.node(p0)), Some([]));
    }

    #[test]
    fn wrong_count_does_not_resolve() {
        let (g, [p0, _, add, sel]) = sample();
        let map = CloneMap::new(false);
        let r = Resolver::new(&map, OperandPolicy::ThroughClones);
        assert_eq!(r.unary(g.node(add)), None);
        assert_eq!(r.quaternary(g.node(sel)), None);
        assert_eq!(r.operands(g.node(p0), Arity::Unary), None);
        assert_eq!(r.operands(g.node(sel), Arity::Binary), None);
    }

    #[test]
    fn operands_follow_arity() {
        let (g, [p0, p1, add, sel]) = sample();
        let mut map = CloneMap::new(false);
        map.put(add, NodeId::new(50));
        let r = Resolver::new(&map, OperandPolicy::ThroughClones);
        let ternary = r.operands(g.node(sel), Arity::Ternary).unwrap();
        assert_eq!(ternary.as_slice(), &[p0, p1, NodeId::new(50)]);
        let variadic = r.operands(g.node(sel), Arity::Variadic).unwrap();
        assert_eq!(variadic, ternary);
        assert!(r.operands(g.node(p0), Arity::Nullary).unwrap().is_empty());
    }
}
