//! The node-kind catalog and result data types.

use std::fmt;

/// Define [`NodeKind`] together with its debug-name table.
///
/// The debug name is the variant name; it is what diagnostics print when a
/// pass reports a node it could not handle.
macro_rules! node_kinds {
    ($($(#[$meta:meta])* $variant:ident),* $(,)?) => {
        /// Kind tag of a graph node.
        ///
        /// The set is closed for any given build of the compiler, but grows
        /// as backends add nodes. Passes outside this crate that dispatch on
        /// the kind must keep a fallback arm for kinds they have not been
        /// taught about yet.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[non_exhaustive]
        pub enum NodeKind {
            $($(#[$meta])* $variant,)*
        }

        impl NodeKind {
            /// Every kind in the catalog, in declaration order.
            pub const ALL: &'static [NodeKind] = &[$(NodeKind::$variant,)*];

            /// Debug name of the kind, as shown in diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $(NodeKind::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

node_kinds!(
    // Arithmetic and logic
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    UShr,
    Ror,
    Neg,
    Not,
    BooleanNot,
    Compare,
    TypeConversion,
    // Conditions
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Below,
    BelowOrEqual,
    Above,
    AboveOrEqual,
    // Memory and objects
    ArrayGet,
    ArraySet,
    ArrayLength,
    InstanceFieldGet,
    InstanceFieldSet,
    StaticFieldGet,
    StaticFieldSet,
    UnresolvedInstanceFieldGet,
    UnresolvedInstanceFieldSet,
    UnresolvedStaticFieldGet,
    UnresolvedStaticFieldSet,
    NewArray,
    NewInstance,
    LoadClass,
    LoadString,
    LoadException,
    ClearException,
    ClassTableGet,
    MonitorOperation,
    MemoryBarrier,
    ConstructorFence,
    // Checks and typing
    BoundsCheck,
    NullCheck,
    DivZeroCheck,
    ClinitCheck,
    CheckCast,
    InstanceOf,
    BoundType,
    Deoptimize,
    DevirtGuard,
    SuspendCheck,
    Suspend,
    TestSuspend,
    // Control
    Goto,
    If,
    PackedSwitch,
    Return,
    ReturnVoid,
    Throw,
    TryBoundary,
    Exit,
    Select,
    Phi,
    // Calls
    InvokeStaticOrDirect,
    InvokeVirtual,
    InvokeInterface,
    InvokeUnresolved,
    InvokePolymorphic,
    // Values that exist once per method
    CurrentMethod,
    ParameterValue,
    IntConstant,
    LongConstant,
    FloatConstant,
    DoubleConstant,
    NullConstant,
    // Debug
    NativeDebugInfo,
    // Introduced by the backend after high-level optimization
    ParallelMove,
    AddLhsMemory,
    AddRhsMemory,
    SubRhsMemory,
    MulRhsMemory,
    DivRhsMemory,
    IntermediateAddress,
    // x86 extensions
    X86ComputeBaseMethodAddress,
    X86LoadFromConstantTable,
    X86FpNeg,
    X86PackedSwitch,
    X86BoundsCheckMemory,
    X86SelectValue,
    X86ProfileInvoke,
    X86IncrementExecutionCount,
);

impl NodeKind {
    /// Returns `true` for call kinds, which carry [`InvokeInfo`](crate::InvokeInfo).
    pub const fn is_invoke(self) -> bool {
        matches!(
            self,
            NodeKind::InvokeStaticOrDirect
                | NodeKind::InvokeVirtual
                | NodeKind::InvokeInterface
                | NodeKind::InvokeUnresolved
                | NodeKind::InvokePolymorphic
        )
    }

    /// Returns `true` for block-ending control instructions.
    pub const fn is_control_flow(self) -> bool {
        matches!(
            self,
            NodeKind::Goto
                | NodeKind::If
                | NodeKind::PackedSwitch
                | NodeKind::X86PackedSwitch
                | NodeKind::Return
                | NodeKind::ReturnVoid
                | NodeKind::Throw
                | NodeKind::TryBoundary
                | NodeKind::Exit
        )
    }

    /// Returns `true` for phis, which live in a block's phi list.
    pub const fn is_phi(self) -> bool {
        matches!(self, NodeKind::Phi)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result type of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    #[default]
    Void,
    Bool,
    Int8,
    Uint16,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Reference,
}
