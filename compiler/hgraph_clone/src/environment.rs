//! Environment-chain cloning.

use hgraph::{EnvFrame, EnvSlot, Environment};

use crate::map::CloneMap;

/// Copy an environment chain for a clone.
///
/// The copy has the same frames with the same slot counts, method and
/// bytecode position. Each live value is replaced by its clone when it has
/// one and kept otherwise; absent slots stay absent. Slots are always
/// resolved through `map`, whatever operand policy the clone was built with,
/// so a clone's deoptimization state names the values that are live alongside
/// it.
pub fn clone_environment(env: &Environment, map: &CloneMap) -> Environment {
    let frames = env
        .frames()
        .iter()
        .map(|frame| {
            let slots = frame
                .slots
                .iter()
                .map(|&slot| match slot {
                    EnvSlot::Value(node) => EnvSlot::Value(map.get(node).unwrap_or(node)),
                    EnvSlot::Absent => EnvSlot::Absent,
                })
                .collect();
            EnvFrame::new(frame.method, frame.dex_pc, slots)
        })
        .collect();
    Environment::new(frames)
}
