//! Call-site metadata carried by invoke nodes.

use bitflags::bitflags;

use crate::ids::MethodRef;

/// How a call site reaches its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DispatchKind {
    /// Static method; no receiver.
    Static,
    /// Direct call to a known instance method (private, constructor, super).
    Direct,
    /// Through the receiver's vtable.
    Virtual,
    /// Through the receiver's interface method table.
    Interface,
    /// Target not resolved at compile time; the runtime resolves on first call.
    Unresolved,
    /// Signature-polymorphic call (method handles).
    Polymorphic,
}

bitflags! {
    /// Immutable properties of a call site.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct InvokeFlags: u16 {
        /// First argument is the receiver.
        const HAS_RECEIVER = 1 << 0;
        /// Target is recognized as an intrinsic.
        const INTRINSIC = 1 << 1;
        /// `String.<init>` rewritten to a string factory call.
        const STRING_INIT = 1 << 2;
        /// Last operand is an explicit class-initialization check.
        const EXPLICIT_CLINIT_CHECK = 1 << 3;
        /// Dispatch was narrowed from virtual/interface by devirtualization.
        const DEVIRTUALIZED = 1 << 4;
        /// Arguments came from a register range in the bytecode.
        const RANGE = 1 << 5;
    }
}

/// Descriptor of a call site.
///
/// Every field is fixed when the invoke is built. Cloning an invoke copies
/// the descriptor as-is: duplicating code never changes what it calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InvokeInfo {
    /// Resolved (or referenced, for unresolved calls) target method.
    pub target: MethodRef,
    pub dispatch: DispatchKind,
    pub flags: InvokeFlags,
    /// Vtable or interface-table slot; 0 when the dispatch kind has none.
    pub table_index: u32,
    /// Number of arguments, including the receiver.
    pub num_args: u32,
}

impl InvokeInfo {
    pub fn new(target: MethodRef, dispatch: DispatchKind) -> Self {
        Self {
            target,
            dispatch,
            flags: InvokeFlags::empty(),
            table_index: 0,
            num_args: 0,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: InvokeFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_table_index(mut self, table_index: u32) -> Self {
        self.table_index = table_index;
        self
    }

    #[must_use]
    pub fn with_num_args(mut self, num_args: u32) -> Self {
        self.num_args = num_args;
        self
    }

    /// Returns `true` if the call goes through a method table.
    pub fn is_table_dispatch(&self) -> bool {
        matches!(self.dispatch, DispatchKind::Virtual | DispatchKind::Interface)
    }
}
