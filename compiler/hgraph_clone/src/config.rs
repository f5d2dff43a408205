//! Per-operation cloning configuration.

/// Where a clone's operands point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OperandPolicy {
    /// Use the clone of an operand when one has been registered, otherwise
    /// the original operand (it lies outside the cloned region and is shared).
    #[default]
    ThroughClones,
    /// Always use the original operands, ignoring the registry.
    Originals,
}

/// Settings fixed when a [`Cloner`](crate::Cloner) is constructed.
///
/// The default clones for real, wires clones through already-cloned
/// operands, and keeps one clone per original.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CloneConfig {
    /// `false` classifies nodes without allocating anything (feasibility probe).
    pub cloning_enabled: bool,
    pub operand_policy: OperandPolicy,
    /// Let one original be cloned more than once, the newest clone winning.
    /// Loop unrolling needs this to stamp out one template body N times.
    pub allow_overwrite: bool,
}

impl Default for CloneConfig {
    fn default() -> Self {
        Self {
            cloning_enabled: true,
            operand_policy: OperandPolicy::ThroughClones,
            allow_overwrite: false,
        }
    }
}

impl CloneConfig {
    /// Settings for the commit pass: clone, through clones, no overwrite.
    pub fn commit() -> Self {
        Self::default()
    }

    /// Settings for the feasibility probe: classify only.
    pub fn probe() -> Self {
        Self::default().with_cloning(false)
    }

    #[must_use]
    pub fn with_cloning(mut self, enabled: bool) -> Self {
        self.cloning_enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_operand_policy(mut self, policy: OperandPolicy) -> Self {
        self.operand_policy = policy;
        self
    }

    #[must_use]
    pub fn with_overwrite(mut self, allow: bool) -> Self {
        self.allow_overwrite = allow;
        self
    }
}
