//! Resolution checkpoints for an injected observer.
//!
//! The resolver is side-effect-free by default; diagnostics hook in through
//! this callback at well-defined points instead of interleaving logging
//! with the algorithm. All methods default to no-ops.

use crate::TypeDesc;

/// Callback invoked at resolution checkpoints.
pub trait ResolveObserver {
    /// The exact-signature fast path found nothing; the broader search
    /// continues.
    fn exact_miss(&self, _type_name: &str, _member: &str) {}

    /// A candidate was rejected as inapplicable.
    fn candidate_rejected(&self, _member: &str, _params: &[TypeDesc]) {}

    /// A candidate was selected for invocation.
    fn candidate_selected(&self, _member: &str, _params: &[TypeDesc]) {}

    /// Standard resolution failed; the extended coercion fallback engaged.
    fn fallback_engaged(&self, _member: &str) {}
}

/// The no-op observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl ResolveObserver for NullObserver {}
