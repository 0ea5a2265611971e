//! Native member bodies and the call context handed to them.
//!
//! [`NativeFn`] wraps any Rust callable behind an `Arc` so member bodies of
//! different shapes can be stored uniformly on registry entries and cloned
//! cheaply. Bodies receive a [`HostCall`] with the optional target object
//! and the raw argument values, and either return a raw [`HostValue`] or a
//! [`NativeError`] that the invoker surfaces as an invocation-target
//! failure.

use std::fmt;
use std::sync::Arc;

use crate::{HostValue, NativeError, ObjectRef, Primitive};

/// Type-erased native member body.
pub struct NativeFn {
    inner: Arc<dyn Fn(HostCall<'_>) -> Result<HostValue, NativeError> + Send + Sync>,
}

impl NativeFn {
    /// Wrap a callable as a native body.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(HostCall<'_>) -> Result<HostValue, NativeError> + Send + Sync + 'static,
    {
        NativeFn { inner: Arc::new(f) }
    }

    /// Invoke the body.
    pub fn call(&self, call: HostCall<'_>) -> Result<HostValue, NativeError> {
        (self.inner)(call)
    }
}

impl Clone for NativeFn {
    fn clone(&self) -> Self {
        NativeFn {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFn").finish_non_exhaustive()
    }
}

/// Context for one native call: target object and raw arguments.
#[derive(Debug, Clone, Copy)]
pub struct HostCall<'a> {
    target: Option<&'a ObjectRef>,
    args: &'a [HostValue],
}

impl<'a> HostCall<'a> {
    pub fn new(target: Option<&'a ObjectRef>, args: &'a [HostValue]) -> Self {
        HostCall { target, args }
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    /// The raw argument slot at `index`.
    pub fn arg_slot(&self, index: usize) -> Result<&HostValue, NativeError> {
        self.args.get(index).ok_or(NativeError::ArgumentIndexOutOfBounds {
            index,
            count: self.args.len(),
        })
    }

    /// Typed argument extraction with widening.
    pub fn arg<T: FromHostValue>(&self, index: usize) -> Result<T, NativeError> {
        let slot = self.arg_slot(index)?;
        T::from_host_value(slot).ok_or(NativeError::WrongType { index })
    }

    /// The target object of an instance call.
    pub fn this(&self) -> Result<&ObjectRef, NativeError> {
        self.target.ok_or(NativeError::MissingTarget)
    }
}

/// Conversion from a raw host value into a concrete Rust type.
pub trait FromHostValue: Sized {
    fn from_host_value(value: &HostValue) -> Option<Self>;
}

impl FromHostValue for bool {
    fn from_host_value(value: &HostValue) -> Option<Self> {
        match value {
            HostValue::Prim(Primitive::Bool(b)) => Some(*b),
            _ => None,
        }
    }
}

impl FromHostValue for char {
    fn from_host_value(value: &HostValue) -> Option<Self> {
        match value {
            HostValue::Prim(Primitive::Char(c)) => Some(*c),
            _ => None,
        }
    }
}

macro_rules! impl_from_host_integral {
    ($($ty:ty),*) => {
        $(
            impl FromHostValue for $ty {
                fn from_host_value(value: &HostValue) -> Option<Self> {
                    match value {
                        HostValue::Prim(Primitive::Bool(_)) => None,
                        HostValue::Prim(p) => p.as_i64().map(|v| v as $ty),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_host_integral!(i8, i16, i32, i64);

macro_rules! impl_from_host_floating {
    ($($ty:ty),*) => {
        $(
            impl FromHostValue for $ty {
                fn from_host_value(value: &HostValue) -> Option<Self> {
                    match value {
                        HostValue::Prim(Primitive::Bool(_)) => None,
                        HostValue::Prim(p) => p.as_f64().map(|v| v as $ty),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_from_host_floating!(f32, f64);

impl FromHostValue for ObjectRef {
    fn from_host_value(value: &HostValue) -> Option<Self> {
        match value {
            HostValue::Object(obj) => Some(obj.clone()),
            _ => None,
        }
    }
}
