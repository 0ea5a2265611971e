//! hostscript-registry: the in-memory host object-model binding.
//!
//! Provides [`HostRegistry`], the [`hostscript_core::ObjectModel`]
//! implementation the engine resolves against by default. Embedders
//! populate it with [`hostscript_core::ClassEntry`] values describing the
//! host types exposed to scripts.

mod registry;

pub use registry::HostRegistry;
