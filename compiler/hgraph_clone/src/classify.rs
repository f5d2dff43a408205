//! Per-kind cloning classification.
//!
//! Every kind in the catalog gets exactly one decision here: clonable with a
//! fixed operand count, or not clonable for a stated reason. Kinds added to
//! the catalog after this table was written fall into the wildcard arm and
//! come back as [`Classification::Unclassified`], which the cloner treats as
//! a bug in this table.

use std::fmt;

use hgraph::NodeKind;

/// Operand count a clonable kind is built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Nullary,
    Unary,
    Binary,
    Ternary,
    Quaternary,
    /// Phis and calls: any number of operands.
    Variadic,
}

impl Arity {
    /// The exact operand count, or `None` for [`Arity::Variadic`].
    pub fn expected(self) -> Option<usize> {
        match self {
            Arity::Nullary => Some(0),
            Arity::Unary => Some(1),
            Arity::Binary => Some(2),
            Arity::Ternary => Some(3),
            Arity::Quaternary => Some(4),
            Arity::Variadic => None,
        }
    }
}

/// Why a kind is not cloned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnsupportedReason {
    /// Exists once per compiled method (exit block marker, current method,
    /// base method address).
    UniquePerMethod,
    /// Materialized once and shared by every user (constants, parameters).
    MaterializedOnce,
    /// Created by the backend after the passes that clone have run.
    BackendArtifact,
    /// Could be cloned, but no pass has needed it yet.
    NotYetSupported,
    /// Missing from the classification table.
    Unclassified,
    /// A fixed-arity kind built with the wrong number of operands.
    OperandCount { expected: usize, found: usize },
}

impl fmt::Display for UnsupportedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedReason::UniquePerMethod => f.write_str("only one may exist per method"),
            UnsupportedReason::MaterializedOnce => {
                f.write_str("value is materialized once per method")
            }
            UnsupportedReason::BackendArtifact => f.write_str("backend-generated node"),
            UnsupportedReason::NotYetSupported => f.write_str("not supported yet"),
            UnsupportedReason::Unclassified => f.write_str("kind has no cloning classification"),
            UnsupportedReason::OperandCount { expected, found } => {
                write!(f, "kind takes {expected} operands, node has {found}")
            }
        }
    }
}

/// Cloning decision for a node kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Classification {
    Clonable(Arity),
    Unsupported(UnsupportedReason),
    Unclassified,
}

/// Classify a node kind for cloning.
pub fn classify(kind: NodeKind) -> Classification {
    use Arity::{Binary, Nullary, Quaternary, Ternary, Unary, Variadic};
    use Classification::{Clonable, Unsupported};
    use UnsupportedReason::{BackendArtifact, MaterializedOnce, NotYetSupported, UniquePerMethod};

    match kind {
        // Arithmetic and logic
        NodeKind::Add
        | NodeKind::Sub
        | NodeKind::Mul
        | NodeKind::Div
        | NodeKind::Rem
        | NodeKind::And
        | NodeKind::Or
        | NodeKind::Xor
        | NodeKind::Shl
        | NodeKind::Shr
        | NodeKind::UShr
        | NodeKind::Ror
        | NodeKind::Compare => Clonable(Binary),
        NodeKind::Neg | NodeKind::Not | NodeKind::BooleanNot | NodeKind::TypeConversion => {
            Clonable(Unary)
        }

        // Conditions
        NodeKind::Equal
        | NodeKind::NotEqual
        | NodeKind::LessThan
        | NodeKind::LessThanOrEqual
        | NodeKind::GreaterThan
        | NodeKind::GreaterThanOrEqual
        | NodeKind::Below
        | NodeKind::BelowOrEqual
        | NodeKind::Above
        | NodeKind::AboveOrEqual => Clonable(Binary),

        // Memory and objects
        NodeKind::ArrayGet
        | NodeKind::InstanceFieldSet
        | NodeKind::StaticFieldSet
        | NodeKind::UnresolvedInstanceFieldSet
        | NodeKind::NewArray
        | NodeKind::NewInstance => Clonable(Binary),
        NodeKind::ArraySet => Clonable(Ternary),
        NodeKind::ArrayLength
        | NodeKind::InstanceFieldGet
        | NodeKind::StaticFieldGet
        | NodeKind::UnresolvedInstanceFieldGet
        | NodeKind::UnresolvedStaticFieldSet
        | NodeKind::LoadClass
        | NodeKind::LoadString
        | NodeKind::ClassTableGet
        | NodeKind::MonitorOperation => Clonable(Unary),
        NodeKind::UnresolvedStaticFieldGet
        | NodeKind::LoadException
        | NodeKind::ClearException
        | NodeKind::MemoryBarrier => Clonable(Nullary),
        NodeKind::ConstructorFence => Unsupported(NotYetSupported),

        // Checks and typing
        NodeKind::BoundsCheck | NodeKind::CheckCast | NodeKind::InstanceOf | NodeKind::DevirtGuard => {
            Clonable(Binary)
        }
        NodeKind::NullCheck
        | NodeKind::DivZeroCheck
        | NodeKind::ClinitCheck
        | NodeKind::BoundType
        | NodeKind::Deoptimize => Clonable(Unary),
        NodeKind::SuspendCheck | NodeKind::Suspend | NodeKind::TestSuspend => Clonable(Nullary),

        // Control. Clones come out without successors; the caller wires them.
        NodeKind::Goto | NodeKind::ReturnVoid | NodeKind::TryBoundary => Clonable(Nullary),
        NodeKind::If | NodeKind::PackedSwitch | NodeKind::Return | NodeKind::Throw => {
            Clonable(Unary)
        }
        NodeKind::Select => Clonable(Ternary),
        NodeKind::Phi => Clonable(Variadic),
        NodeKind::Exit => Unsupported(UniquePerMethod),

        // Calls
        NodeKind::InvokeStaticOrDirect
        | NodeKind::InvokeVirtual
        | NodeKind::InvokeInterface
        | NodeKind::InvokeUnresolved => Clonable(Variadic),
        NodeKind::InvokePolymorphic => Unsupported(NotYetSupported),

        // Values that exist once per method
        NodeKind::CurrentMethod => Unsupported(UniquePerMethod),
        NodeKind::ParameterValue
        | NodeKind::IntConstant
        | NodeKind::LongConstant
        | NodeKind::FloatConstant
        | NodeKind::DoubleConstant
        | NodeKind::NullConstant => Unsupported(MaterializedOnce),

        NodeKind::NativeDebugInfo => Clonable(Nullary),

        // Backend artifacts
        NodeKind::ParallelMove
        | NodeKind::AddLhsMemory
        | NodeKind::AddRhsMemory
        | NodeKind::SubRhsMemory
        | NodeKind::MulRhsMemory
        | NodeKind::DivRhsMemory
        | NodeKind::IntermediateAddress => Unsupported(BackendArtifact),

        // x86 extensions
        NodeKind::X86ComputeBaseMethodAddress => Unsupported(UniquePerMethod),
        NodeKind::X86LoadFromConstantTable
        | NodeKind::X86FpNeg
        | NodeKind::X86PackedSwitch
        | NodeKind::X86BoundsCheckMemory => Clonable(Binary),
        NodeKind::X86SelectValue => Clonable(Quaternary),
        NodeKind::X86ProfileInvoke => Clonable(Unary),
        NodeKind::X86IncrementExecutionCount => Clonable(Nullary),

        _ => Classification::Unclassified,
    }
}
