//! Property-based tests for region cloning.
//!
//! Random straight-line regions of arithmetic and check nodes over a few
//! parameters. Every such region must pass the probe without touching the
//! graph, and the commit must wire each clone to the clones of its
//! operands (or to the originals, under the originals policy).

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    reason = "Proptest macros generate code with these patterns"
)]

use hgraph::{DataType, EnvFrame, EnvSlot, Environment, Graph, MethodRef, NodeDesc, NodeId, NodeKind};
use hgraph_clone::{classify, Arity, Classification, CloneConfig, Cloner, OperandPolicy};
use proptest::prelude::*;

// -- Region Generation --

const UNARY: &[NodeKind] = &[
    NodeKind::Neg,
    NodeKind::Not,
    NodeKind::TypeConversion,
    NodeKind::NullCheck,
    NodeKind::DivZeroCheck,
];

const BINARY: &[NodeKind] = &[
    NodeKind::Add,
    NodeKind::Sub,
    NodeKind::Mul,
    NodeKind::Div,
    NodeKind::Compare,
    NodeKind::BoundsCheck,
];

/// One region node: a kind and operand picks into the nodes built so far.
#[derive(Clone, Debug)]
struct Step {
    kind: NodeKind,
    picks: Vec<usize>,
    with_env: bool,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    let unary = prop::sample::select(UNARY).prop_map(|kind| (kind, 1usize));
    let binary = prop::sample::select(BINARY).prop_map(|kind| (kind, 2usize));
    (prop_oneof![unary, binary], any::<bool>()).prop_flat_map(|((kind, count), with_env)| {
        prop::collection::vec(any::<usize>(), count).prop_map(move |picks| Step {
            kind,
            picks,
            with_env,
        })
    })
}

/// Builds the graph; returns it with the ids of the region nodes.
fn build(params: usize, steps: &[Step]) -> (Graph, Vec<NodeId>) {
    let mut g = Graph::new(MethodRef::new(0));
    let mut available: Vec<NodeId> = (0..params)
        .map(|_| g.alloc(NodeDesc::new(NodeKind::ParameterValue, DataType::Int32), []))
        .collect();
    let mut region = Vec::with_capacity(steps.len());
    for step in steps {
        let operands: Vec<NodeId> = step
            .picks
            .iter()
            .map(|&pick| available[pick % available.len()])
            .collect();
        let id = g.alloc(NodeDesc::new(step.kind, DataType::Int32), operands.iter().copied());
        if step.with_env {
            let slots = operands.iter().copied().map(EnvSlot::Value).collect();
            g.set_environment(id, Environment::new(vec![EnvFrame::new(MethodRef::new(0), 0, slots)]));
        }
        available.push(id);
        region.push(id);
    }
    (g, region)
}

// -- Properties --

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn generated_kinds_are_clonable(step in step_strategy()) {
        let expected = if UNARY.contains(&step.kind) { Arity::Unary } else { Arity::Binary };
        prop_assert_eq!(classify(step.kind), Classification::Clonable(expected));
    }

    #[test]
    fn probe_never_allocates(
        params in 1usize..4,
        steps in prop::collection::vec(step_strategy(), 0..24),
    ) {
        let (mut g, region) = build(params, &steps);
        let before = g.node_count();

        let mut probe = Cloner::new(&mut g, CloneConfig::probe());
        probe.visit_nodes(region.iter().copied());
        prop_assert!(probe.all_cloned_okay());
        let map = probe.finish().unwrap();

        prop_assert!(map.is_empty());
        prop_assert_eq!(g.node_count(), before);
    }

    #[test]
    fn commit_wires_clones_to_cloned_operands(
        params in 1usize..4,
        steps in prop::collection::vec(step_strategy(), 1..24),
    ) {
        hgraph_clone::init_tracing();
        let (mut g, region) = build(params, &steps);
        let before = g.node_count();

        let mut commit = Cloner::new(&mut g, CloneConfig::commit());
        commit.visit_nodes(region.iter().copied());
        let map = commit.finish().unwrap();

        prop_assert_eq!(map.len(), region.len());
        prop_assert_eq!(g.node_count(), before + region.len());
        for &original in &region {
            let clone = map.get(original).unwrap();
            let expected: Vec<NodeId> = g
                .node(original)
                .operands()
                .iter()
                .map(|&op| map.get(op).unwrap_or(op))
                .collect();
            prop_assert_eq!(g.node(clone).operands(), expected.as_slice());
            prop_assert_eq!(g.node(clone).desc(), g.node(original).desc());
            let env_values: Option<Vec<NodeId>> =
                g.node(clone).environment().map(|env| env.values().collect());
            prop_assert_eq!(env_values.is_some(), g.node(original).environment().is_some());
            if let Some(values) = env_values {
                prop_assert_eq!(values, expected);
            }
        }
        prop_assert_eq!(g.verify(), Ok(()));
    }

    #[test]
    fn originals_policy_shares_operands(
        params in 1usize..4,
        steps in prop::collection::vec(step_strategy(), 1..24),
    ) {
        let (mut g, region) = build(params, &steps);

        let config = CloneConfig::commit().with_operand_policy(OperandPolicy::Originals);
        let mut commit = Cloner::new(&mut g, config);
        commit.visit_nodes(region.iter().copied());
        let map = commit.finish().unwrap();

        for &original in &region {
            let clone = map.get(original).unwrap();
            prop_assert_eq!(g.node(clone).operands(), g.node(original).operands());
        }
    }
}
