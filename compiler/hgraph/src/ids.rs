//! Dense index newtypes for graph entities.
//!
//! Every node, block and method referenced by a [`Graph`](crate::Graph) is
//! named by a `u32` index. Indices are allocated sequentially starting at 0,
//! which lets side tables (clone maps, liveness sets) be plain `Vec`s.

/// Define a `u32` index newtype.
///
/// Each generated type has:
/// - `new()`, `raw()` and `index()` accessors
/// - `Display` as `<prefix><raw>` (e.g. `n12`, `b3`)
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident => $prefix:literal),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create an ID from a raw index.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Get the raw `u32` value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Get the index as `usize` (for indexing into `Vec`s).
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    )* };
}

define_id!(
    /// A node in the graph arena. Clones get fresh IDs past every original.
    NodeId => "n",
    /// A basic block of the graph.
    BlockId => "b",
    /// A method: call target, or the method an environment frame belongs to.
    MethodRef => "m",
);

/// Convert an arena length into the next `u32` index.
///
/// # Panics
///
/// Panics if the arena has grown past `u32::MAX` entries.
pub(crate) fn next_index(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("{what} count exceeds u32::MAX"))
}

#[cfg(test)]
mod tests {
    use std::mem;

    use super::*;

    #[test]
    fn node_id_basics() {
        let n = NodeId::new(42);
        assert_eq!(n.raw(), 42);
        assert_eq!(n.index(), 42);
        assert_eq!(n.to_string(), "n42");
    }

    #[test]
    fn block_and_method_display() {
        assert_eq!(BlockId::new(3).to_string(), "b3");
        assert_eq!(MethodRef::new(0).to_string(), "m0");
    }

    #[test]
    fn id_ordering() {
        assert!(NodeId::new(0) < NodeId::new(1));
        assert_ne!(BlockId::new(0), BlockId::new(1));
    }

    #[test]
    fn id_sizes() {
        assert_eq!(mem::size_of::<NodeId>(), 4);
        assert_eq!(mem::size_of::<Option<NodeId>>(), 8);
    }
}
