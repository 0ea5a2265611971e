//! Script-defined instances ("this"-like objects).
//!
//! A script instance is backed by the embedding namespace rather than the
//! host object model. The engine special-cases these targets before host
//! resolution starts: a method call first consults the instance's declared
//! method table, then its default invoke handler.

use std::fmt;
use std::sync::Arc;

use crate::namespace::Namespace;
use crate::{ReflectError, Value};

/// A callable produced by the namespace or a script instance.
pub type ScriptCallable = Arc<dyn Fn(&[Value]) -> Result<Value, ReflectError> + Send + Sync>;

/// The default `invoke` handler of a script instance: receives the
/// requested method name and the original arguments.
pub type DefaultInvokeHandler =
    Arc<dyn Fn(&str, &[Value]) -> Result<Value, ReflectError> + Send + Sync>;

/// A script-defined instance.
pub trait ScriptInstance: Send + Sync {
    /// A method declared directly on this instance.
    fn declared_method(&self, name: &str) -> Option<ScriptCallable>;

    /// The catch-all handler invoked when no declared method matches.
    fn default_invoke_handler(&self) -> Option<DefaultInvokeHandler>;

    /// The namespace backing this instance.
    fn namespace(&self) -> Arc<dyn Namespace>;
}

/// Shared handle to a script instance.
#[derive(Clone)]
pub struct ScriptRef(pub Arc<dyn ScriptInstance>);

impl ScriptRef {
    pub fn new(instance: impl ScriptInstance + 'static) -> Self {
        ScriptRef(Arc::new(instance))
    }

    pub fn ptr_eq(a: &ScriptRef, b: &ScriptRef) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for ScriptRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptRef").finish_non_exhaustive()
    }
}
