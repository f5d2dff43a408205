//! Region cloning for the node-graph IR.
//!
//! Passes that duplicate code (loop unrolling, tail duplication,
//! specialization) use this crate to copy a region of a method's graph:
//!
//! - **[`Cloner`]**: walks nodes or blocks, classifies each node kind and,
//!   when enabled, allocates a clone with resolved operands, a copied
//!   environment chain and copied call-site metadata.
//! - **[`CloneMap`]**: the original → clone registry handed back to the pass
//!   for splicing.
//! - **[`Resolver`]**: fixed-arity and variadic operand resolution under an
//!   [`OperandPolicy`].
//! - **[`classify`]**: the per-kind decision table.
//! - **[`clone_region`]**: probe, then commit, over a list of blocks.
//!
//! # Failure tiers
//!
//! A kind that cannot be cloned (constants, the method exit, backend-only
//! nodes) is an expected outcome: the walk records it and [`Cloner::finish`]
//! returns a [`CloneFailure`]. A kind missing from the classification table
//! is a compiler bug and panics in debug builds. Registering an original
//! twice without overwrite is a bug in the calling pass and is caught by a
//! debug assertion.

mod classify;
mod cloner;
mod config;
mod environment;
mod feasibility;
mod map;
mod resolve;

#[cfg(test)]
mod test_helpers;

use std::sync::Once;

pub use classify::{classify, Arity, Classification, UnsupportedReason};
pub use cloner::{clone_region, Cloner};
pub use config::{CloneConfig, OperandPolicy};
pub use environment::clone_environment;
pub use feasibility::CloneFailure;
pub use map::CloneMap;
pub use resolve::Resolver;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=hgraph_clone=debug`
/// (one line per walk and per unclonable node) or `RUST_LOG=hgraph_clone=trace`
/// (one line per clone).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
